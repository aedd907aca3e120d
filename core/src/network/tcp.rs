use std::time::Duration;

use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::error::ProbeError;

/// Opens a TCP connection to `endpoint`, abandoning it once `limit` elapses.
///
/// `endpoint` is `address:port` as built from user input; a port token that is
/// not a number fails here like any other connect error.
pub async fn connect(endpoint: &str, limit: Duration) -> Result<TcpStream, ProbeError> {
    match timeout(limit, TcpStream::connect(endpoint)).await {
        Ok(Ok(stream)) => Ok(stream),
        Ok(Err(e)) => Err(ProbeError::Connect(e)),
        Err(_elapsed) => Err(ProbeError::ConnectTimeout(limit)),
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
