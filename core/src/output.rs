//! Writers for deduplicated findings.
//!
//! * `txt`: one `address:name` line per finding.
//! * `csv`: `address,name,source` rows, no header, source being `SSL` or `rDNS`.

use std::io::{self, BufWriter, Write};

use dnsrange_common::finding::Finding;

use crate::aggregator::FindingSink;

pub struct TextSink<W: Write> {
    out: BufWriter<W>,
}

impl<W: Write> TextSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: BufWriter::new(out),
        }
    }

    pub fn into_inner(self) -> io::Result<W> {
        self.out.into_inner().map_err(|e| e.into_error())
    }
}

impl<W: Write> FindingSink for TextSink<W> {
    fn write(&mut self, finding: &Finding) -> io::Result<()> {
        writeln!(self.out, "{}:{}", finding.address, finding.name)
    }

    fn finish(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

pub struct CsvSink<W: Write> {
    out: csv::Writer<W>,
}

impl<W: Write> CsvSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: csv::WriterBuilder::new().has_headers(false).from_writer(out),
        }
    }

    pub fn into_inner(self) -> io::Result<W> {
        self.out.into_inner().map_err(|e| e.into_error())
    }
}

impl<W: Write> FindingSink for CsvSink<W> {
    fn write(&mut self, finding: &Finding) -> io::Result<()> {
        self.out
            .write_record([
                finding.address.as_str(),
                finding.name.as_str(),
                finding.source.as_str(),
            ])
            .map_err(io::Error::from)
    }

    fn finish(&mut self) -> io::Result<()> {
        self.out.flush()
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
