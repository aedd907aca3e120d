use std::net::IpAddr;
use std::sync::Arc;

use dnsrange_protocols::tls::{self as proto, CertificateError, CertificateIdentity};
use rustls::pki_types::ServerName;
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;
use tokio_rustls::client::TlsStream;

use crate::error::{ProbeError, ScanError};

/// Connector that completes a handshake against any certificate.
pub fn insecure_connector() -> Result<TlsConnector, ScanError> {
    let config = proto::insecure_client_config()?;
    Ok(TlsConnector::from(Arc::new(config)))
}

/// Runs the client handshake over `stream`. On failure the socket is dropped, and closed.
pub async fn handshake(
    connector: &TlsConnector,
    addr: IpAddr,
    stream: TcpStream,
) -> Result<TlsStream<TcpStream>, ProbeError> {
    connector
        .connect(ServerName::from(addr), stream)
        .await
        .map_err(ProbeError::Handshake)
}

/// Parses every certificate the server presented, leaf first.
pub fn peer_identities(
    session: &TlsStream<TcpStream>,
) -> Vec<Result<CertificateIdentity, CertificateError>> {
    let (_, connection) = session.get_ref();
    connection
        .peer_certificates()
        .unwrap_or_default()
        .iter()
        .map(|der| CertificateIdentity::from_der(der.as_ref()))
        .collect()
}
