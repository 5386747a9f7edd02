//! Line-oriented tokenizer shared by the text mesh readers.
//!
//! Splits input into whitespace-separated records, one per line. Blank
//! lines and `#` comments are dropped. End of input is `Ok(None)`; any
//! record that fails to parse is reported with its line number instead of
//! ending the read silently.

use std::io::BufRead;
use std::str::FromStr;

use meshkit_math::Point3;

use crate::error::{IoError, IoResult};

/// One non-empty input line split into fields.
#[derive(Debug, Clone)]
pub(crate) struct Record {
    /// Line number (1-indexed).
    pub line: usize,
    pub fields: Vec<String>,
}

impl Record {
    /// First field of the record.
    pub fn tag(&self) -> &str {
        // Records are never empty.
        &self.fields[0]
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Fail unless the record has exactly `n` fields.
    pub fn expect_len(&self, n: usize, what: &str) -> IoResult<()> {
        if self.fields.len() == n {
            Ok(())
        } else {
            Err(IoError::malformed(
                self.line,
                format!("{what}: expected {n} fields, found {}", self.fields.len()),
            ))
        }
    }

    /// Parse field `i` as `T`.
    pub fn parse<T: FromStr>(&self, i: usize, what: &str) -> IoResult<T> {
        let field = self
            .fields
            .get(i)
            .ok_or_else(|| IoError::malformed(self.line, format!("missing {what}")))?;
        field
            .parse()
            .map_err(|_| IoError::malformed(self.line, format!("invalid {what} `{field}`")))
    }

    /// Parse fields `start..start + 3` as a point.
    pub fn point(&self, start: usize) -> IoResult<Point3> {
        Ok(Point3::new(
            self.parse(start, "x coordinate")?,
            self.parse(start + 1, "y coordinate")?,
            self.parse(start + 2, "z coordinate")?,
        ))
    }
}

/// Pulls [`Record`]s out of a buffered reader.
pub(crate) struct LineReader<R> {
    inner: R,
    line: usize,
    buf: Vec<u8>,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            line: 0,
            buf: Vec::new(),
        }
    }

    /// Number of the last line read.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Next non-empty record, or `None` at end of input.
    pub fn next_record(&mut self) -> IoResult<Option<Record>> {
        loop {
            self.buf.clear();
            if self.inner.read_until(b'\n', &mut self.buf)? == 0 {
                return Ok(None);
            }
            self.line += 1;

            let line = self.line;
            let text = std::str::from_utf8(&self.buf)
                .map_err(|e| IoError::malformed(line, format!("invalid UTF-8: {e}")))?;
            let content = match text.find('#') {
                Some(pos) => &text[..pos],
                None => text,
            };
            let fields: Vec<String> = content.split_whitespace().map(str::to_owned).collect();
            if !fields.is_empty() {
                return Ok(Some(Record {
                    line: self.line,
                    fields,
                }));
            }
        }
    }
}
