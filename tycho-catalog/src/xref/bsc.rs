//! Fixed-width Bright Star Catalogue (BSC5) lines.
//!
//! Only the columns the cross-reference needs are decoded; the rest of the
//! line is carried through untouched so the corrected catalog stays
//! byte-for-byte identical outside the magnitude field.

/// HR number, bytes `[0,4)`.
const HR_COLS: (usize, usize) = (0, 4);
/// Henry Draper number, bytes `[25,31)`.
const HD_COLS: (usize, usize) = (25, 31);
/// RA hours, bytes `[75,77)`. Blank for entries withdrawn from the catalog.
const RA_HOURS_COLS: (usize, usize) = (75, 77);
/// Visual magnitude, bytes `[102,107)`, formatted `%5.2f`.
pub const VMAG_COLS: (usize, usize) = (102, 107);

/// One BSC entry, borrowing its raw line.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceStar<'a> {
    pub line: &'a str,
    pub hr_id: u32,
    pub hd_id: Option<u32>,
    pub magnitude: Option<f32>,
    /// Withdrawn entry: the HR number is kept but no star data follows.
    pub is_placeholder: bool,
}

impl<'a> SourceStar<'a> {
    /// Parse a catalog line. Returns `None` when the HR field is not a number.
    pub fn parse(line: &'a str) -> Option<Self> {
        let bytes = line.as_bytes();
        let hr_id: u32 = col(bytes, HR_COLS)?.trim().parse().ok()?;
        let hd_id = col(bytes, HD_COLS).and_then(|s| s.trim().parse().ok());
        let magnitude = col(bytes, VMAG_COLS).and_then(|s| s.trim().parse().ok());
        let is_placeholder = col(bytes, RA_HOURS_COLS).map_or(true, |s| s.trim().is_empty());

        Some(Self {
            line,
            hr_id,
            hd_id,
            magnitude,
            is_placeholder,
        })
    }
}

fn col(bytes: &[u8], (start, end): (usize, usize)) -> Option<&str> {
    if end > bytes.len() {
        return None;
    }
    std::str::from_utf8(&bytes[start..end]).ok()
}

/// Round to the 0.01 mag resolution of the BSC, in hundredths.
fn hundredths(mag: f32) -> i64 {
    (f64::from(mag) * 100.0).round() as i64
}

/// Whether `catalog_mag` differs from the BSC value by at least 0.01 once
/// rounded to two decimals. A missing BSC value always needs correcting; a
/// non-finite catalog value never replaces anything.
pub fn needs_correction(source_mag: Option<f32>, catalog_mag: f32) -> bool {
    if !catalog_mag.is_finite() {
        return false;
    }
    match source_mag {
        Some(mag) => hundredths(mag) != hundredths(catalog_mag),
        None => true,
    }
}

/// Copy of `line` with the V magnitude field set to `mag` (`%5.2f`).
///
/// Short lines are space-padded out to the field. Returns `None` when the
/// line is not ASCII or `mag` does not fit in five columns.
pub fn with_magnitude(line: &str, mag: f32) -> Option<String> {
    if !line.is_ascii() {
        return None;
    }
    let field = format!("{:5.2}", mag);
    if field.len() != VMAG_COLS.1 - VMAG_COLS.0 {
        return None;
    }

    let mut out = String::with_capacity(line.len().max(VMAG_COLS.1));
    out.push_str(line);
    while out.len() < VMAG_COLS.1 {
        out.push(' ');
    }
    out.replace_range(VMAG_COLS.0..VMAG_COLS.1, &field);
    Some(out)
}
