//! Streaming reader for 6-column per-base signal tracks.
//!
//! Each line holds one 1bp site:
//! `chrom  pos-1  pos  id  score  summit`

use crate::error::{PeakError, Result};
use crate::streaming::parsing::{
    parse_score, parse_u64_fast, should_skip_line, trim_line_end, Fields,
};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Number of columns in a signal track line.
pub const SIGNAL_COLUMNS: usize = 6;

/// One parsed signal site, borrowing its text fields from the reader.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalRecord<'a> {
    /// Input line the record was read from.
    pub line: usize,
    pub chrom: &'a str,
    pub start: u64,
    /// 1-based site coordinate (`start + 1`).
    pub pos: u64,
    pub id: &'a str,
    pub score: f32,
    pub summit: u64,
}

/// Line reader that counts lines and skips blank and header lines.
pub struct LineReader<R: Read> {
    reader: BufReader<R>,
    line_number: usize,
    buffer: Vec<u8>,
}

impl LineReader<File> {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(file))
    }
}

impl<R: Read> LineReader<R> {
    pub fn new(reader: R) -> Self {
        Self::with_capacity(reader, 256 * 1024)
    }

    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        Self {
            reader: BufReader::with_capacity(capacity, reader),
            line_number: 0,
            buffer: Vec::with_capacity(1024),
        }
    }

    /// Next data line without its line terminator, paired with its line
    /// number, or None at end of input.
    pub fn next_line(&mut self) -> Result<Option<(usize, &[u8])>> {
        loop {
            self.buffer.clear();
            let bytes_read = self.reader.read_until(b'\n', &mut self.buffer)?;
            if bytes_read == 0 {
                return Ok(None);
            }
            self.line_number += 1;
            if !should_skip_line(trim_line_end(&self.buffer)) {
                break;
            }
        }
        Ok(Some((self.line_number, trim_line_end(&self.buffer))))
    }

    /// Number of lines consumed so far.
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

/// A streaming signal track reader.
pub struct SignalReader<R: Read> {
    lines: LineReader<R>,
}

impl SignalReader<File> {
    /// Open a signal track from a path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self {
            lines: LineReader::from_path(path)?,
        })
    }
}

impl<R: Read> SignalReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: LineReader::new(reader),
        }
    }

    /// Read the next site.
    pub fn read_record(&mut self) -> Result<Option<SignalRecord<'_>>> {
        match self.lines.next_line()? {
            Some((line_number, line)) => parse_signal_line(line, line_number).map(Some),
            None => Ok(None),
        }
    }

    /// Line number of the record most recently read.
    pub fn line_number(&self) -> usize {
        self.lines.line_number()
    }
}

/// Parse one 6-column signal line.
pub fn parse_signal_line(line: &[u8], line_number: usize) -> Result<SignalRecord<'_>> {
    let mut fields = Fields::tabs(line);

    let chrom = required_field(&mut fields, 1, line_number)?;
    if chrom.is_empty() {
        return Err(missing_field(1, line_number));
    }
    let start_bytes = required_field(&mut fields, 2, line_number)?;
    let end_bytes = required_field(&mut fields, 3, line_number)?;
    let id = required_field(&mut fields, 4, line_number)?;
    let score_bytes = required_field(&mut fields, 5, line_number)?;
    let summit_bytes = required_field(&mut fields, 6, line_number)?;

    if fields.next().is_some() {
        return Err(PeakError::Parse {
            line: line_number,
            message: format!(
                "Expected exactly {} columns, but encountered at least {}",
                SIGNAL_COLUMNS,
                SIGNAL_COLUMNS + 1
            ),
        });
    }

    let chrom = utf8_field(chrom, "chromosome", line_number)?;
    let id = utf8_field(id, "id", line_number)?;
    let start = parse_coord(start_bytes, "start", line_number)?;
    let pos = parse_coord(end_bytes, "end", line_number)?;
    let summit = parse_coord(summit_bytes, "summit", line_number)?;
    let score = parse_score(score_bytes).ok_or_else(|| PeakError::Parse {
        line: line_number,
        message: format!("Invalid score: '{}'", String::from_utf8_lossy(score_bytes)),
    })?;

    if start.checked_add(1) != Some(pos) {
        return Err(PeakError::NotSingleBase {
            line: line_number,
            chrom: chrom.to_string(),
            start,
            end: pos,
        });
    }

    Ok(SignalRecord {
        line: line_number,
        chrom,
        start,
        pos,
        id,
        score,
        summit,
    })
}

#[inline]
fn required_field<'a>(
    fields: &mut Fields<'a>,
    field_num: usize,
    line_number: usize,
) -> Result<&'a [u8]> {
    fields
        .next()
        .ok_or_else(|| missing_field(field_num, line_number))
}

fn missing_field(field_num: usize, line_number: usize) -> PeakError {
    PeakError::Parse {
        line: line_number,
        message: format!("Failed to find required field {}", field_num),
    }
}

fn utf8_field<'a>(bytes: &'a [u8], field_name: &str, line_number: usize) -> Result<&'a str> {
    std::str::from_utf8(bytes).map_err(|_| PeakError::Parse {
        line: line_number,
        message: format!("{} is not valid UTF-8", field_name),
    })
}

fn parse_coord(bytes: &[u8], field_name: &str, line_number: usize) -> Result<u64> {
    parse_u64_fast(bytes).ok_or_else(|| PeakError::Parse {
        line: line_number,
        message: format!(
            "Invalid {} coordinate: '{}'",
            field_name,
            String::from_utf8_lossy(bytes)
        ),
    })
}
