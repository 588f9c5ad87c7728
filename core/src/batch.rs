//! Count-prefixed batch protocol.
//!
//! Input: a line with `N`, then `N` address lines, then a line with `M R`,
//! then `M` query lines. Blank or malformed record lines are skipped and do
//! not count toward `N` or `M`.
//!
//! Output: a line with `M`, then for every query a `<query id>;<hits>` line
//! followed by one `<entity id>;<name>` line per hit, nearest first.

use crate::catalog::{Catalog, CatalogBuilder};
use crate::query::Query;
use crate::record::{AddressRecord, QueryRecord};
use crate::topk::Candidate;
use std::io::{self, BufRead, Lines, Write};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BatchError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("input ended while reading {0}")]
    UnexpectedEof(&'static str),
    #[error("line {line}: invalid {what} {value:?}")]
    BadHeader { line: usize, what: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, BatchError>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub addresses: usize,
    pub skipped_addresses: usize,
    pub queries: usize,
    pub skipped_queries: usize,
}

/// Line reader that tracks line numbers for diagnostics.
pub struct BatchReader<R> {
    lines: Lines<R>,
    line_no: usize,
}

impl<R: BufRead> BatchReader<R> {
    pub fn new(reader: R) -> Self {
        Self { lines: reader.lines(), line_no: 0 }
    }

    fn next_nonblank(&mut self, what: &'static str) -> Result<String> {
        for line in self.lines.by_ref() {
            self.line_no += 1;
            let line = line?;
            if !line.trim().is_empty() {
                return Ok(line);
            }
        }
        Err(BatchError::UnexpectedEof(what))
    }

    /// Reads `count` whitespace-separated unsigned integers, spanning lines
    /// if needed.
    fn read_counts(&mut self, what: &'static str, count: usize) -> Result<Vec<usize>> {
        let mut out = Vec::with_capacity(count);
        while out.len() < count {
            let line = self.next_nonblank(what)?;
            for word in line.split_whitespace().take(count - out.len()) {
                let n = word.parse().map_err(|_| BatchError::BadHeader {
                    line: self.line_no,
                    what,
                    value: word.to_owned(),
                })?;
                out.push(n);
            }
        }
        Ok(out)
    }

    /// Feeds parsed records to `sink` until `count` were accepted. Returns
    /// the number of malformed lines skipped on the way. Stops at the first
    /// error from `sink` without reading further.
    fn read_records<T>(
        &mut self,
        what: &'static str,
        count: usize,
        mut sink: impl FnMut(T) -> Result<()>,
    ) -> Result<usize>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let (mut accepted, mut skipped) = (0, 0);
        while accepted < count {
            let line = self.next_nonblank(what)?;
            match line.parse::<T>() {
                Ok(record) => {
                    sink(record)?;
                    accepted += 1;
                }
                Err(err) => {
                    skipped += 1;
                    tracing::warn!(line = self.line_no, %err, "skipping malformed {what}");
                }
            }
        }
        Ok(skipped)
    }

    /// Reads the address section and runs the build phase over it.
    pub fn read_catalog(&mut self) -> Result<(Catalog, usize)> {
        let n = self.read_counts("address count", 1)?[0];
        let mut builder = CatalogBuilder::new();
        let skipped = self.read_records("address", n, |rec: AddressRecord| {
            builder.add_record(&rec);
            Ok(())
        })?;
        Ok((builder.finish(), skipped))
    }
}

/// Writes one query's answer block.
pub fn write_results<W: Write>(out: &mut W, query_id: i64, hits: &[Candidate<'_>]) -> io::Result<()> {
    writeln!(out, "{};{}", query_id, hits.len())?;
    for hit in hits {
        writeln!(out, "{};{}", hit.id, hit.name)?;
    }
    Ok(())
}

/// Runs the whole protocol: build phase, then every query in input order.
pub fn run<R: BufRead, W: Write>(input: R, mut output: W) -> Result<BatchSummary> {
    let mut reader = BatchReader::new(input);
    let (catalog, skipped_addresses) = reader.read_catalog()?;
    let counts = reader.read_counts("query header", 2)?;
    let (m, cap) = (counts[0], counts[1]);

    writeln!(output, "{m}")?;
    let skipped_queries = reader.read_records("query", m, |rec: QueryRecord| {
        let query = Query { id: rec.id, text: rec.text, origin: rec.origin, cap };
        let hits = catalog.run(&query);
        write_results(&mut output, query.id, &hits)?;
        Ok(())
    })?;
    output.flush()?;

    let summary = BatchSummary { addresses: catalog.stats().records, skipped_addresses, queries: m, skipped_queries };
    tracing::info!(
        addresses = summary.addresses,
        skipped_addresses,
        queries = m,
        skipped_queries,
        "batch complete"
    );
    Ok(summary)
}
