//! Buffered output for called peaks.
//!
//! Uses itoa for integer formatting and ryu for float formatting
//! to avoid allocation in the hot path.

use crate::error::PeakError;
use crate::interval::Peak;
use std::io::{BufWriter, Write};

/// Output buffer size (2 MB).
pub const DEFAULT_OUTPUT_BUFFER: usize = 2 * 1024 * 1024;

/// Tab-separated writer for peak and cluster output.
pub struct PeakWriter<W: Write> {
    writer: BufWriter<W>,
    itoa_buf: itoa::Buffer,
    ryu_buf: ryu::Buffer,
}

impl<W: Write> PeakWriter<W> {
    /// Create a new PeakWriter with the default buffer.
    pub fn new(output: W) -> Self {
        Self::with_capacity(DEFAULT_OUTPUT_BUFFER, output)
    }

    pub fn with_capacity(capacity: usize, output: W) -> Self {
        Self {
            writer: BufWriter::with_capacity(capacity, output),
            itoa_buf: itoa::Buffer::new(),
            ryu_buf: ryu::Buffer::new(),
        }
    }

    /// Write one peak as
    /// `chrom, beg-1, end, id, maxScore, apex, inputSummit`.
    pub fn write_peak(&mut self, peak: &Peak) -> Result<(), PeakError> {
        self.write_bed3(peak.chrom.as_bytes(), peak.beg - 1, peak.end)?;
        self.write_tab()?;
        self.write_bytes(peak.id.as_bytes())?;
        self.write_tab()?;
        self.write_score(peak.max_score)?;
        self.write_tab()?;
        self.write_int(peak.apex)?;
        self.write_tab()?;
        self.write_int(peak.input_summit)?;
        self.write_newline()
    }

    /// Write a BED3 prefix (chrom, start, end) without a newline.
    #[inline]
    pub fn write_bed3(&mut self, chrom: &[u8], start: u64, end: u64) -> Result<(), PeakError> {
        self.write_bytes(chrom)?;
        self.write_tab()?;
        self.write_int(start)?;
        self.write_tab()?;
        self.write_int(end)
    }

    /// Write raw bytes.
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), PeakError> {
        self.writer.write_all(bytes)?;
        Ok(())
    }

    #[inline]
    pub fn write_tab(&mut self) -> Result<(), PeakError> {
        self.write_bytes(b"\t")
    }

    #[inline]
    pub fn write_newline(&mut self) -> Result<(), PeakError> {
        self.write_bytes(b"\n")
    }

    /// Write an integer using itoa.
    #[inline]
    pub fn write_int<I: itoa::Integer>(&mut self, n: I) -> Result<(), PeakError> {
        self.writer.write_all(self.itoa_buf.format(n).as_bytes())?;
        Ok(())
    }

    /// Write a score in shortest round-trip form. Integral values are
    /// written without the trailing `.0`.
    #[inline]
    pub fn write_score(&mut self, score: f32) -> Result<(), PeakError> {
        let text = self.ryu_buf.format(score);
        let text = text.strip_suffix(".0").unwrap_or(text);
        self.writer.write_all(text.as_bytes())?;
        Ok(())
    }

    /// Flush the output buffer.
    pub fn flush(&mut self) -> Result<(), PeakError> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(peak: &Peak) -> String {
        let mut output = Vec::new();
        {
            let mut writer = PeakWriter::new(&mut output);
            writer.write_peak(peak).unwrap();
            writer.flush().unwrap();
        }
        String::from_utf8(output).unwrap()
    }

    fn peak(max_score: f32) -> Peak {
        Peak {
            chrom: "chr1".to_string(),
            id: "sample".to_string(),
            beg: 102,
            end: 105,
            max_score,
            apex: 103,
            input_summit: 104,
            summit_separation: 1,
        }
    }

    #[test]
    fn test_write_peak() {
        assert_eq!(render(&peak(5.0)), "chr1\t101\t105\tsample\t5\t103\t104\n");
    }

    #[test]
    fn test_write_fractional_score() {
        assert_eq!(
            render(&peak(0.25)),
            "chr1\t101\t105\tsample\t0.25\t103\t104\n"
        );
    }

    #[test]
    fn test_write_bed3() {
        let mut output = Vec::new();
        {
            let mut writer = PeakWriter::new(&mut output);
            writer.write_bed3(b"chr2", 10, 20).unwrap();
            writer.write_newline().unwrap();
            writer.flush().unwrap();
        }
        assert_eq!(output, b"chr2\t10\t20\n");
    }
}
