//! Log reader
//!
//! Line-by-line iteration over the log file.

use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

use crate::error::{KvError, Result};
use crate::record::{decode, DecodedFields};

/// One decoded log line
#[derive(Debug, Clone, PartialEq)]
pub struct LogLine {
    /// 1-based line number in the file
    pub line_no: usize,

    pub fields: DecodedFields,
}

/// Iterator over decoded log lines, in file order
///
/// Blank lines are skipped. A line that fails to decode (including one that
/// is not valid UTF-8) yields a `MalformedRecord` error carrying its line
/// number; iteration may continue past it. The file handle is released when
/// the iterator is dropped.
pub struct LogEntries {
    reader: Option<BufReader<File>>,
    line_no: usize,
    buf: Vec<u8>,
}

impl LogEntries {
    /// Open `path` for reading; a missing file yields no entries
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let reader = match File::open(path) {
            Ok(file) => Some(BufReader::new(file)),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            reader,
            line_no: 0,
            buf: Vec::with_capacity(256),
        })
    }
}

impl Iterator for LogEntries {
    type Item = Result<LogLine>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.as_mut()?.read_until(b'\n', &mut self.buf) {
                Ok(0) => {
                    self.reader = None;
                    return None;
                }
                Ok(_) => {}
                Err(e) => {
                    // Reading past an I/O error is not meaningful
                    self.reader = None;
                    return Some(Err(e.into()));
                }
            }
            self.line_no += 1;
            let line_no = self.line_no;

            let line = match std::str::from_utf8(&self.buf) {
                Ok(line) => line,
                Err(e) => {
                    return Some(Err(
                        KvError::malformed(format!("invalid UTF-8: {}", e)).at_line(line_no)
                    ))
                }
            };

            if line.trim().is_empty() {
                continue;
            }

            return Some(
                decode(line)
                    .map(|fields| LogLine { line_no, fields })
                    .map_err(|e| e.at_line(line_no)),
            );
        }
    }
}
