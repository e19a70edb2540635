//! Zero-allocation field parsing for tab-separated signal tracks.

use memchr::memchr;

/// Fast u64 parsing - no allocation, no error formatting.
///
/// Returns None if the input is empty or contains non-digit characters.
#[inline(always)]
pub fn parse_u64_fast(bytes: &[u8]) -> Option<u64> {
    if bytes.is_empty() || bytes.len() > 20 {
        return None;
    }
    let mut n: u64 = 0;
    for &b in bytes {
        let d = b.wrapping_sub(b'0');
        if d > 9 {
            return None;
        }
        n = n.checked_mul(10)?.checked_add(d as u64)?;
    }
    Some(n)
}

/// Parse a score column. Accepts anything `f32::from_str` accepts except NaN.
#[inline]
pub fn parse_score(bytes: &[u8]) -> Option<f32> {
    let s = std::str::from_utf8(bytes).ok()?;
    let v: f32 = s.trim().parse().ok()?;
    if v.is_nan() {
        None
    } else {
        Some(v)
    }
}

/// Strip a trailing `\n` and/or `\r`.
#[inline(always)]
pub fn trim_line_end(mut line: &[u8]) -> &[u8] {
    if line.last() == Some(&b'\n') {
        line = &line[..line.len() - 1];
    }
    if line.last() == Some(&b'\r') {
        line = &line[..line.len() - 1];
    }
    line
}

/// Check if a line should be skipped (empty, comment, or header).
#[inline(always)]
pub fn should_skip_line(line: &[u8]) -> bool {
    line.is_empty() || line[0] == b'#' || line.starts_with(b"track") || line.starts_with(b"browser")
}

/// Iterator over the fields of a line separated by `sep`, found with memchr.
#[derive(Debug, Clone)]
pub struct Fields<'a> {
    rest: Option<&'a [u8]>,
    sep: u8,
}

impl<'a> Fields<'a> {
    #[inline]
    pub fn new(line: &'a [u8], sep: u8) -> Self {
        Self {
            rest: Some(line),
            sep,
        }
    }

    /// Tab-separated fields.
    #[inline]
    pub fn tabs(line: &'a [u8]) -> Self {
        Self::new(line, b'\t')
    }
}

impl<'a> Iterator for Fields<'a> {
    type Item = &'a [u8];

    #[inline]
    fn next(&mut self) -> Option<&'a [u8]> {
        let rest = self.rest?;
        match memchr(self.sep, rest) {
            Some(i) => {
                self.rest = Some(&rest[i + 1..]);
                Some(&rest[..i])
            }
            None => {
                self.rest = None;
                Some(rest)
            }
        }
    }
}
