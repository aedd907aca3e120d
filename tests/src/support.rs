use std::collections::HashMap;
use std::io;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dnsrange_common::config::ScanConfig;
use dnsrange_common::finding::Finding;
use dnsrange_core::diagnostics::MemoryDiagnostics;
use dnsrange_core::scanner::FindingStream;
use dnsrange_core::scanner::probe::TargetProbe;
use dnsrange_core::scanner::resolver::ReverseResolver;
use rcgen::{CertificateParams, DistinguishedName, DnType, KeyPair};
use rustls::pki_types::{CertificateDer, PrivateKeyDer, PrivatePkcs8KeyDer};
use tokio::io::AsyncReadExt;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_rustls::TlsAcceptor;

/// A TLS server on loopback presenting a self-signed leaf certificate,
/// optionally followed by extra chain entries sent as-is.
pub struct TlsStub {
    pub addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl TlsStub {
    pub async fn start(bind: SocketAddr, common_name: &str, sans: &[&str]) -> anyhow::Result<Self> {
        Self::start_with_chain(bind, common_name, sans, Vec::new()).await
    }

    pub async fn start_with_chain(
        bind: SocketAddr,
        common_name: &str,
        sans: &[&str],
        chain: Vec<CertificateDer<'static>>,
    ) -> anyhow::Result<Self> {
        let config = server_config(common_name, sans, chain)?;
        let acceptor = TlsAcceptor::from(Arc::new(config));
        let listener = TcpListener::bind(bind).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            while let Ok((socket, _)) = listener.accept().await {
                let acceptor = acceptor.clone();
                tokio::spawn(async move {
                    if let Ok(mut tls) = acceptor.accept(socket).await {
                        let mut buf = [0u8; 64];
                        let _ = tls.read(&mut buf).await;
                    }
                });
            }
        });

        Ok(Self { addr, handle })
    }

    pub fn port(&self) -> String {
        self.addr.port().to_string()
    }
}

impl Drop for TlsStub {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// A self-signed certificate for `common_name` and `sans`, with its key.
pub fn self_signed(
    common_name: &str,
    sans: &[&str],
) -> anyhow::Result<(CertificateDer<'static>, KeyPair)> {
    let sans: Vec<String> = sans.iter().map(|s| s.to_string()).collect();
    let mut params = CertificateParams::new(sans)?;
    params.distinguished_name = DistinguishedName::new();
    params
        .distinguished_name
        .push(DnType::CommonName, common_name);

    let key = KeyPair::generate()?;
    let cert = params.self_signed(&key)?.der().clone();
    Ok((cert, key))
}

fn server_config(
    common_name: &str,
    sans: &[&str],
    chain: Vec<CertificateDer<'static>>,
) -> anyhow::Result<rustls::ServerConfig> {
    let (leaf, key) = self_signed(common_name, sans)?;
    let key = PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(key.serialize_der()));

    let mut certs = vec![leaf];
    certs.extend(chain);

    let provider = Arc::new(rustls::crypto::ring::default_provider());
    let config = rustls::ServerConfig::builder_with_provider(provider)
        .with_protocol_versions(rustls::ALL_VERSIONS)?
        .with_no_client_auth()
        .with_single_cert(certs, key)?;
    Ok(config)
}

/// Static PTR records; unknown addresses have none.
#[derive(Default)]
pub struct AddressBook {
    records: HashMap<IpAddr, Vec<String>>,
}

impl AddressBook {
    pub fn with(mut self, addr: &str, names: &[&str]) -> Self {
        let addr: IpAddr = addr.parse().unwrap();
        self.records
            .insert(addr, names.iter().map(|n| n.to_string()).collect());
        self
    }
}

#[async_trait]
impl ReverseResolver for AddressBook {
    async fn reverse(&self, addr: IpAddr) -> io::Result<Vec<String>> {
        Ok(self.records.get(&addr).cloned().unwrap_or_default())
    }
}

pub fn config() -> ScanConfig {
    ScanConfig {
        connect_timeout: Duration::from_secs(2),
        ..ScanConfig::default()
    }
}

pub fn probe(book: AddressBook, diagnostics: Arc<MemoryDiagnostics>) -> TargetProbe {
    TargetProbe::new(&config())
        .unwrap()
        .with_resolver(Arc::new(book))
        .with_diagnostics(diagnostics)
}

pub async fn collect(mut stream: FindingStream) -> Vec<Finding> {
    let mut findings = Vec::new();
    while let Some(finding) = stream.recv().await {
        findings.push(finding);
    }
    findings
}
