use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Destination for reports: a file when one is given, stdout otherwise.
pub struct ReportSink {
    inner: BufWriter<Box<dyn Write>>,
}

impl ReportSink {
    pub fn open(path: Option<&Path>) -> Result<Self> {
        let target: Box<dyn Write> = match path {
            Some(path) => Box::new(
                File::create(path)
                    .with_context(|| format!("failed to create {}", path.display()))?,
            ),
            None => Box::new(io::stdout()),
        };
        Ok(Self {
            inner: BufWriter::new(target),
        })
    }
}

impl Write for ReportSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
