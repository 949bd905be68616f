use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use tracing::info;

use tagwindow_core::TagWindowError;

/// Buffered line reader over a line-delimited JSON file.
///
/// Opening the file is the only fatal failure; per-line IO errors surface
/// through the iterator for the caller to decide on.
#[derive(Debug)]
pub struct JsonlSource {
    lines: Lines<BufReader<File>>,
}

impl JsonlSource {
    pub fn open(path: &Path) -> Result<Self, TagWindowError> {
        let file = File::open(path)?;
        info!("reading records from {}", path.display());
        Ok(Self {
            lines: BufReader::new(file).lines(),
        })
    }
}

impl Iterator for JsonlSource {
    type Item = Result<String, TagWindowError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.lines.next().map(|r| r.map_err(TagWindowError::Io))
    }
}
