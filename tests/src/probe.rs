use std::sync::Arc;

use dnsrange_common::finding::{Finding, Source};
use dnsrange_common::network::target::Target;
use dnsrange_core::diagnostics::MemoryDiagnostics;
use dnsrange_core::error::Stage;
use dnsrange_core::scanner::FindingStream;
use rustls::pki_types::CertificateDer;

use crate::support::{self, AddressBook, TlsStub};

async fn probe_once(stub: &TlsStub, book: AddressBook) -> (Vec<Finding>, Arc<MemoryDiagnostics>) {
    let diagnostics = Arc::new(MemoryDiagnostics::new());
    let probe = support::probe(book, diagnostics.clone());
    let target = Target::new(stub.addr.ip(), stub.port());

    let (tx, stream) = FindingStream::channel();
    probe.run(&target, &tx).await;
    drop(tx);

    (support::collect(stream).await, diagnostics)
}

#[tokio::test]
async fn certificate_cn_and_each_san_become_findings() {
    let stub = TlsStub::start(
        "127.0.0.1:0".parse().unwrap(),
        "a.example.com",
        &["b.example.com", "c.example.com"],
    )
    .await
    .unwrap();

    let (findings, diagnostics) = probe_once(&stub, AddressBook::default()).await;

    assert_eq!(
        findings,
        vec![
            Finding::new("127.0.0.1", "a.example.com", Source::CertificateIdentity),
            Finding::new("127.0.0.1", "b.example.com", Source::CertificateIdentity),
            Finding::new("127.0.0.1", "c.example.com", Source::CertificateIdentity),
        ]
    );
    assert!(diagnostics.reports().is_empty());
}

/// Every SAN is reported under its own name: the CN is not repeated per SAN
/// and the last SAN is not lost.
#[tokio::test]
async fn single_san_is_reported_verbatim() {
    let stub = TlsStub::start(
        "127.0.0.1:0".parse().unwrap(),
        "cn.example.com",
        &["last.example.com"],
    )
    .await
    .unwrap();

    let (findings, _) = probe_once(&stub, AddressBook::default()).await;
    let names: Vec<&str> = findings.iter().map(|f| f.name.as_str()).collect();

    assert_eq!(names, vec!["cn.example.com", "last.example.com"]);
}

#[tokio::test]
async fn reverse_names_follow_certificate_names() {
    let stub = TlsStub::start(
        "127.0.0.1:0".parse().unwrap(),
        "a.example.com",
        &["b.example.com"],
    )
    .await
    .unwrap();
    let book = AddressBook::default().with("127.0.0.1", &["ptr.example.net"]);

    let (findings, _) = probe_once(&stub, book).await;

    assert_eq!(
        findings,
        vec![
            Finding::new("127.0.0.1", "a.example.com", Source::CertificateIdentity),
            Finding::new("127.0.0.1", "b.example.com", Source::CertificateIdentity),
            Finding::new("127.0.0.1", "ptr.example.net", Source::ReverseDns),
        ]
    );
}

/// A chain entry that does not parse is reported and skipped; the entries
/// after it and the reverse names are still emitted.
#[tokio::test]
async fn unparsable_chain_entry_is_reported_and_skipped() {
    let (second, _) = support::self_signed("second.example.com", &["alt.example.com"]).unwrap();
    let garbage = CertificateDer::from(vec![0x30, 0x03, 0x02, 0x01, 0xff]);
    let stub = TlsStub::start_with_chain(
        "127.0.0.1:0".parse().unwrap(),
        "leaf.example.com",
        &[],
        vec![garbage, second],
    )
    .await
    .unwrap();
    let book = AddressBook::default().with("127.0.0.1", &["ptr.example.net"]);

    let (findings, diagnostics) = probe_once(&stub, book).await;

    assert_eq!(
        findings,
        vec![
            Finding::new("127.0.0.1", "leaf.example.com", Source::CertificateIdentity),
            Finding::new("127.0.0.1", "second.example.com", Source::CertificateIdentity),
            Finding::new("127.0.0.1", "alt.example.com", Source::CertificateIdentity),
            Finding::new("127.0.0.1", "ptr.example.net", Source::ReverseDns),
        ]
    );
    assert_eq!(diagnostics.stages(), vec![Stage::Certificate]);
}
