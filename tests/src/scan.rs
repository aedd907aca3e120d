use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::Arc;

use dnsrange_common::config::ScanConfig;
use dnsrange_common::network::range::AddressRange;
use dnsrange_core::aggregator::ResultAggregator;
use dnsrange_core::diagnostics::MemoryDiagnostics;
use dnsrange_core::output::{CsvSink, TextSink};
use dnsrange_core::scanner::ScanOrchestrator;

use crate::support::{self, AddressBook, TlsStub};

/// Two stubs on the same port of 127.0.0.1 and 127.0.0.2.
///
/// Returns `None` where the second loopback address cannot be bound.
async fn two_endpoints() -> Option<(TlsStub, TlsStub)> {
    let first = TlsStub::start(
        "127.0.0.1:0".parse().unwrap(),
        "one.example.com",
        &["one.example.com", "www.one.example.com"],
    )
    .await
    .ok()?;

    let second_addr: SocketAddr = format!("127.0.0.2:{}", first.port()).parse().unwrap();
    match TlsStub::start(second_addr, "two.example.com", &[]).await {
        Ok(second) => Some((first, second)),
        Err(e) => {
            eprintln!("Skipping two-endpoint test: cannot bind {second_addr}: {e}");
            None
        }
    }
}

fn orchestrator(config: &ScanConfig, book: AddressBook) -> ScanOrchestrator {
    let probe = support::probe(book, Arc::new(MemoryDiagnostics::new()));
    ScanOrchestrator::new(config, probe)
}

#[tokio::test]
async fn text_output_lists_each_name_once() {
    let Some((first, _second)) = two_endpoints().await else {
        return;
    };
    let range: AddressRange = "127.0.0.1-127.0.0.2".parse().unwrap();

    let stream = orchestrator(&support::config(), AddressBook::default())
        .start(range, vec![first.port()]);

    let mut sink = TextSink::new(Vec::new());
    let summary = ResultAggregator::new()
        .drain(stream, &mut sink)
        .await
        .unwrap();
    let text = String::from_utf8(sink.into_inner().unwrap()).unwrap();

    let lines: Vec<&str> = text.lines().collect();
    let unique: HashSet<&str> = lines.iter().copied().collect();
    let expected: HashSet<&str> = [
        "127.0.0.1:one.example.com",
        "127.0.0.1:www.one.example.com",
        "127.0.0.2:two.example.com",
    ]
    .into_iter()
    .collect();

    assert_eq!(lines.len(), unique.len());
    assert_eq!(unique, expected);
    assert_eq!(summary.received, 4);
    assert_eq!(summary.written, 3);
    assert_eq!(summary.probes, 2);
}

#[tokio::test]
async fn repeated_ports_and_reverse_names_are_deduplicated() {
    let stub = TlsStub::start(
        "127.0.0.1:0".parse().unwrap(),
        "one.example.com",
        &["www.one.example.com"],
    )
    .await
    .unwrap();
    let book = AddressBook::default().with("127.0.0.1", &["one.example.com", "ptr.example.net"]);
    let range: AddressRange = "127.0.0.1/32".parse().unwrap();
    let ports = vec![stub.port(), stub.port(), stub.port()];

    let stream = orchestrator(&support::config(), book).start(range, ports);

    let mut sink = CsvSink::new(Vec::new());
    let summary = ResultAggregator::new()
        .drain(stream, &mut sink)
        .await
        .unwrap();
    let text = String::from_utf8(sink.into_inner().unwrap()).unwrap();

    let rows: HashSet<&str> = text.lines().collect();
    let expected: HashSet<&str> = [
        "127.0.0.1,one.example.com,SSL",
        "127.0.0.1,www.one.example.com,SSL",
        "127.0.0.1,ptr.example.net,rDNS",
    ]
    .into_iter()
    .collect();

    assert_eq!(text.lines().count(), 3);
    assert_eq!(rows, expected);
    assert_eq!(summary.probes, 3);
    assert_eq!(summary.received, 3 * 4);
}

#[tokio::test]
async fn in_flight_cap_keeps_results() {
    let stub = TlsStub::start(
        "127.0.0.1:0".parse().unwrap(),
        "capped.example.com",
        &["alt.capped.example.com"],
    )
    .await
    .unwrap();
    let config = ScanConfig {
        max_in_flight: Some(1),
        ..support::config()
    };
    let range: AddressRange = "127.0.0.1/32".parse().unwrap();

    let stream = orchestrator(&config, AddressBook::default())
        .start(range, vec![stub.port(), stub.port()]);
    let findings = support::collect(stream).await;

    let names: Vec<&str> = findings.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "capped.example.com",
            "alt.capped.example.com",
            "capped.example.com",
            "alt.capped.example.com",
        ]
    );
}
