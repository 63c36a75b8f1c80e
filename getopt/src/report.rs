//! Where diagnostics go.

use std::io::{self, Write};

use crate::error::GetoptError;

/// Receives every diagnostic a session decides to print.
pub trait Reporter {
    fn report(&mut self, error: &GetoptError);
}

impl<F: FnMut(&GetoptError)> Reporter for F {
    fn report(&mut self, error: &GetoptError) {
        self(error)
    }
}

/// Writes `getopt_long: <message>` lines to any writer.
pub struct WriterReporter<W> {
    out: W,
    prefix: String,
}

impl WriterReporter<io::Stderr> {
    pub fn stderr() -> Self {
        WriterReporter::new(io::stderr())
    }
}

impl<W: Write> WriterReporter<W> {
    pub fn new(out: W) -> Self {
        WriterReporter {
            out,
            prefix: "getopt_long".to_string(),
        }
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = prefix.to_string();
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for WriterReporter<W> {
    fn report(&mut self, error: &GetoptError) {
        // Diagnostics are advisory; a failing sink must not disturb the scan.
        if let Err(e) = writeln!(self.out, "{}: {}", self.prefix, error).and_then(|()| self.out.flush()) {
            tracing::debug!(error = %e, "failed to write diagnostic");
        }
    }
}

/// Forwards diagnostics as `tracing` warnings.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&mut self, error: &GetoptError) {
        tracing::warn!(option = %error.option(), "{}", error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writer_format() {
        let mut r = WriterReporter::new(Vec::new());
        r.report(&GetoptError::UnknownOption('x'));
        r.report(&GetoptError::MissingLongArgument("output".into()));
        assert_eq!(
            String::from_utf8(r.into_inner()).unwrap(),
            "getopt_long: unknown option -- x\n\
             getopt_long: option requires an argument -- output\n"
        );
    }

    #[test]
    fn custom_prefix() {
        let mut r = WriterReporter::new(Vec::new()).with_prefix("prog");
        r.report(&GetoptError::AmbiguousLongOption("fo".into()));
        assert_eq!(r.into_inner(), b"prog: ambiguous option -- fo\n");
    }

    #[test]
    fn closure_reporter() {
        let mut seen = Vec::new();
        {
            let mut r = |e: &GetoptError| seen.push(e.clone());
            r.report(&GetoptError::MissingArgument('a'));
        }
        assert_eq!(seen, [GetoptError::MissingArgument('a')]);
    }
}
