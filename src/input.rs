// src/input.rs

//! Splitting a path list into delimiter-terminated records.

use std::io::{self, BufRead};

use crate::types::Delimiter;
use crate::watch::path_utils::WatchPath;

/// Iterator over path records read from `reader`.
///
/// Each record has its trailing delimiter stripped. A final record without a
/// delimiter is still yielded; empty records are not.
#[derive(Debug)]
pub struct PathRecords<R> {
    reader: R,
    delimiter: u8,
}

impl<R: BufRead> PathRecords<R> {
    pub fn new(reader: R, delimiter: Delimiter) -> Self {
        Self {
            reader,
            delimiter: delimiter.byte(),
        }
    }
}

impl<R: BufRead> Iterator for PathRecords<R> {
    type Item = io::Result<WatchPath>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let mut record = Vec::new();
            match self.reader.read_until(self.delimiter, &mut record) {
                Ok(0) => return None,
                Ok(_) => {
                    if record.last() == Some(&self.delimiter) {
                        record.pop();
                    }
                    if record.is_empty() {
                        continue;
                    }
                    return Some(Ok(WatchPath::new(record)));
                }
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Some(Err(err)),
            }
        }
    }
}
