use crate::foundation::error::{CalsheetError, CalsheetResult};

/// A physical width x height in inches.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PhysicalSize {
    pub width_in: f64,
    pub height_in: f64,
}

impl PhysicalSize {
    pub fn new(width_in: f64, height_in: f64) -> Self {
        Self {
            width_in,
            height_in,
        }
    }

    fn validate(self, what: &str) -> CalsheetResult<Self> {
        for v in [self.width_in, self.height_in] {
            if !v.is_finite() || v <= 0.0 {
                return Err(CalsheetError::validation(format!(
                    "{what} size must be finite and > 0 (got {} x {})",
                    self.width_in, self.height_in
                )));
            }
        }
        Ok(self)
    }
}

/// Scale factor that makes a printer reproduce `expected` when it printed `measured`.
///
/// Averages the per-axis ratios `expected / measured`.
pub fn calibrated_scale(expected: PhysicalSize, measured: PhysicalSize) -> CalsheetResult<f64> {
    let expected = expected.validate("expected")?;
    let measured = measured.validate("measured")?;
    let w = expected.width_in / measured.width_in;
    let h = expected.height_in / measured.height_in;
    Ok((w + h) / 2.0)
}

/// Effective printer DPI: pixels printed per measured inch, averaged over both axes.
pub fn actual_dpi(printed_px: (u32, u32), measured: PhysicalSize) -> CalsheetResult<f64> {
    let measured = measured.validate("measured")?;
    let w = f64::from(printed_px.0) / measured.width_in;
    let h = f64::from(printed_px.1) / measured.height_in;
    Ok((w + h) / 2.0)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ToleranceGrade {
    /// Within 0.5%.
    Excellent,
    /// Within 1%.
    Good,
    /// Within 2%.
    Acceptable,
    /// Within 5%; measurements should be double-checked.
    Warning,
    /// Over 5%.
    Poor,
}

impl ToleranceGrade {
    pub fn from_scale(scale: f64) -> Self {
        let pct = percent_error(scale);
        if pct <= 0.5 {
            ToleranceGrade::Excellent
        } else if pct <= 1.0 {
            ToleranceGrade::Good
        } else if pct <= 2.0 {
            ToleranceGrade::Acceptable
        } else if pct <= 5.0 {
            ToleranceGrade::Warning
        } else {
            ToleranceGrade::Poor
        }
    }
}

impl std::fmt::Display for ToleranceGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            ToleranceGrade::Excellent => "EXCELLENT (within 0.5%)",
            ToleranceGrade::Good => "GOOD (within 1%)",
            ToleranceGrade::Acceptable => "ACCEPTABLE (within 2%)",
            ToleranceGrade::Warning => "WARNING (within 5%, check measurements)",
            ToleranceGrade::Poor => "POOR (over 5%, re-measure or check printer settings)",
        };
        f.write_str(msg)
    }
}

/// Deviation of `scale` from 1.0, in percent.
pub fn percent_error(scale: f64) -> f64 {
    (scale - 1.0).abs() * 100.0
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeasurementReport {
    pub expected: PhysicalSize,
    pub measured: PhysicalSize,
    pub scale: f64,
    pub printer_dpi: f64,
    pub grade: ToleranceGrade,
}

/// Grade a measured rectangle against the one a sheet with `expected` size and `rect_px`
/// pixels should print.
pub fn assess(
    expected: PhysicalSize,
    measured: PhysicalSize,
    rect_px: (u32, u32),
) -> CalsheetResult<MeasurementReport> {
    let scale = calibrated_scale(expected, measured)?;
    let printer_dpi = actual_dpi(rect_px, measured)?;
    Ok(MeasurementReport {
        expected,
        measured,
        scale,
        printer_dpi,
        grade: ToleranceGrade::from_scale(scale),
    })
}

impl std::fmt::Display for MeasurementReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Measured size: {:.2} x {:.2} inches",
            self.measured.width_in, self.measured.height_in
        )?;
        writeln!(
            f,
            "Expected size: {:.2} x {:.2} inches",
            self.expected.width_in, self.expected.height_in
        )?;
        writeln!(f, "Calculated printer DPI: {:.1}", self.printer_dpi)?;
        writeln!(f, "Calibrated scale factor: {:.3}x", self.scale)?;
        write!(f, "Accuracy: {}", self.grade)
    }
}

#[cfg(test)]
#[path = "../tests/unit/measure.rs"]
mod tests;
