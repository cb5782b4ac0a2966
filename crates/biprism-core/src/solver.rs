use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{GeometryQuantity, SolveError};
use crate::params::InputParameters;

/// Magnitude below which a length is treated as zero.
pub const LENGTH_EPSILON: f64 = 1e-9;

/// Open interval of wavelengths (nm) considered physically plausible.
pub const PLAUSIBLE_NM: (f64, f64) = (1.0, 10_000.0);

/// Closed interval of visible wavelengths (nm).
pub const VISIBLE_NM: (f64, f64) = (380.0, 780.0);

/// Quantities derived from a validated set of readings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedResults {
    /// Object distance `u = x2 - x1` (cm).
    pub u_cm: f64,
    /// Image distance `v = x3 - x2` (cm).
    pub v_cm: f64,
    /// Slit to eyepiece distance `D = x3 - x1` (cm).
    #[serde(rename = "D_cm")]
    pub screen_distance_cm: f64,
    /// Separation of the two real images (mm).
    pub d_prime_mm: f64,
    /// Separation of the two virtual sources (mm).
    pub d_mm: f64,
    /// Fringe spacing (mm).
    pub delta_x_mm: f64,
    /// Derived wavelength (nm).
    pub wavelength_nm: f64,
    /// Screen distance in mm, for plotting.
    #[serde(rename = "D_mm_plot")]
    pub screen_distance_mm_plot: f64,
    /// Virtual source separation in mm, for plotting.
    #[serde(rename = "d_mm_plot")]
    pub source_separation_mm_plot: f64,
    /// Slit width in mm, for plotting.
    #[serde(rename = "b_slit_mm_plot")]
    pub slit_width_mm_plot: f64,
    /// Wavelength in mm, for plotting.
    #[serde(rename = "lambda_mm_plot")]
    pub wavelength_mm_plot: f64,
}

/// Inputs consumed by [`crate::synthesize`], all in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotInputs {
    /// Wavelength.
    pub wavelength_mm: f64,
    /// Virtual source separation.
    pub d_mm: f64,
    /// Slit to screen distance.
    pub screen_distance_mm: f64,
    /// Slit width.
    pub slit_width_mm: f64,
}

impl DerivedResults {
    /// Extracts the plotting quantities.
    pub fn plot_inputs(&self) -> PlotInputs {
        PlotInputs {
            wavelength_mm: self.wavelength_mm_plot,
            d_mm: self.source_separation_mm_plot,
            screen_distance_mm: self.screen_distance_mm_plot,
            slit_width_mm: self.slit_width_mm_plot,
        }
    }

    /// Reads a displayed output.
    pub fn get(&self, key: ResultKey) -> f64 {
        match key {
            ResultKey::U => self.u_cm,
            ResultKey::V => self.v_cm,
            ResultKey::ScreenDistance => self.screen_distance_cm,
            ResultKey::ImageSeparation => self.d_prime_mm,
            ResultKey::SourceSeparation => self.d_mm,
            ResultKey::FringeSpacing => self.delta_x_mm,
            ResultKey::Wavelength => self.wavelength_nm,
        }
    }

    /// Output value at its display precision.
    pub fn format_field(&self, key: ResultKey) -> String {
        format!("{:.*}", key.precision(), self.get(key))
    }
}

/// Identifier of a displayed output quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultKey {
    /// Object distance.
    U,
    /// Image distance.
    V,
    /// Screen distance.
    ScreenDistance,
    /// Real image separation.
    ImageSeparation,
    /// Virtual source separation.
    SourceSeparation,
    /// Fringe spacing.
    FringeSpacing,
    /// Wavelength.
    Wavelength,
}

impl ResultKey {
    /// All outputs in record order.
    pub const ALL: [ResultKey; 7] = [
        ResultKey::U,
        ResultKey::V,
        ResultKey::ScreenDistance,
        ResultKey::ImageSeparation,
        ResultKey::SourceSeparation,
        ResultKey::FringeSpacing,
        ResultKey::Wavelength,
    ];

    /// Results panel layout, four rows of two cells.
    pub const LAYOUT: [[Option<ResultKey>; 2]; 4] = [
        [Some(ResultKey::U), Some(ResultKey::SourceSeparation)],
        [Some(ResultKey::V), Some(ResultKey::FringeSpacing)],
        [Some(ResultKey::ScreenDistance), Some(ResultKey::Wavelength)],
        [Some(ResultKey::ImageSeparation), None],
    ];

    /// Field name in serialized records.
    pub fn name(&self) -> &'static str {
        match self {
            ResultKey::U => "u_cm",
            ResultKey::V => "v_cm",
            ResultKey::ScreenDistance => "D_cm",
            ResultKey::ImageSeparation => "d_prime_mm",
            ResultKey::SourceSeparation => "d_mm",
            ResultKey::FringeSpacing => "delta_x_mm",
            ResultKey::Wavelength => "wavelength_nm",
        }
    }

    /// Panel label including the unit.
    pub fn label(&self) -> &'static str {
        match self {
            ResultKey::U => "object distance u (cm)",
            ResultKey::V => "image distance v (cm)",
            ResultKey::ScreenDistance => "screen distance D (cm)",
            ResultKey::ImageSeparation => "image separation d' (mm)",
            ResultKey::SourceSeparation => "source separation d (mm)",
            ResultKey::FringeSpacing => "fringe spacing Δx (mm)",
            ResultKey::Wavelength => "wavelength λ (nm)",
        }
    }

    /// Decimal places used when the value is displayed.
    pub fn precision(&self) -> usize {
        match self {
            ResultKey::U | ResultKey::V | ResultKey::ScreenDistance => 1,
            ResultKey::ImageSeparation | ResultKey::SourceSeparation | ResultKey::FringeSpacing => 3,
            ResultKey::Wavelength => 2,
        }
    }
}

/// How loudly an advisory should be surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// The result is usable but the inputs deserve a second look.
    Warning,
    /// Informational remark.
    Notice,
}

/// Non-fatal annotation attached to a successful solve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    /// Virtual sources nearly coincide; fringe contrast will be negligible.
    NegligibleSourceSeparation {
        /// Virtual source separation (mm).
        d_mm: f64,
    },
    /// Wavelength outside any sensible optical range.
    ImplausibleWavelength {
        /// Derived wavelength (nm).
        nm: f64,
    },
    /// Wavelength plausible but not visible light.
    OutsideVisibleRange {
        /// Derived wavelength (nm).
        nm: f64,
    },
}

impl Advisory {
    /// Severity of the advisory.
    pub fn severity(&self) -> Severity {
        match self {
            Advisory::OutsideVisibleRange { .. } => Severity::Notice,
            _ => Severity::Warning,
        }
    }

    /// Stable machine readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Advisory::NegligibleSourceSeparation { .. } => "negligible-source-separation",
            Advisory::ImplausibleWavelength { .. } => "implausible-wavelength",
            Advisory::OutsideVisibleRange { .. } => "outside-visible-range",
        }
    }
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::NegligibleSourceSeparation { d_mm } => write!(
                f,
                "virtual source separation d = {d_mm:.3e} mm is very small; fringes may not be visible"
            ),
            Advisory::ImplausibleWavelength { nm } => write!(
                f,
                "derived wavelength λ = {nm:.2} nm is outside the usual range; check every input"
            ),
            Advisory::OutsideVisibleRange { nm } => write!(
                f,
                "derived wavelength λ = {nm:.2} nm is outside the visible range ({:.0}-{:.0} nm)",
                VISIBLE_NM.0, VISIBLE_NM.1
            ),
        }
    }
}

/// Successful solve: results plus any advisories raised on the way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    /// Derived quantities.
    pub results: DerivedResults,
    /// Non-fatal annotations, in the order they were raised.
    #[serde(default)]
    pub advisories: Vec<Advisory>,
}

impl Solution {
    /// Whether any advisory of the given severity was raised.
    pub fn has(&self, severity: Severity) -> bool {
        self.advisories.iter().any(|a| a.severity() == severity)
    }
}

// Every check is phrased so that a NaN reading fails it.
#[allow(clippy::neg_cmp_op_on_partial_ord)]
fn validate(p: &InputParameters) -> Result<(), SolveError> {
    if !(p.x1 < p.x2 && p.x2 < p.x3) {
        return Err(SolveError::Ordering {
            x1: p.x1,
            x2: p.x2,
            x3: p.x3,
        });
    }
    if !((p.p1 - p.p2).abs() >= LENGTH_EPSILON) {
        return Err(SolveError::DegenerateImages { p1: p.p1, p2: p.p2 });
    }
    if !(p.x5 > p.x4) {
        return Err(SolveError::FringeOrdering { x4: p.x4, x5: p.x5 });
    }
    if !(p.slit_width > 0.0) {
        return Err(SolveError::InvalidSlitWidth {
            slit_width: p.slit_width,
        });
    }
    Ok(())
}

fn classify_wavelength(nm: f64) -> Option<Advisory> {
    if !(nm > PLAUSIBLE_NM.0 && nm < PLAUSIBLE_NM.1) {
        Some(Advisory::ImplausibleWavelength { nm })
    } else if !(VISIBLE_NM.0..=VISIBLE_NM.1).contains(&nm) {
        Some(Advisory::OutsideVisibleRange { nm })
    } else {
        None
    }
}

/// Derives the biprism quantities from a snapshot of bench readings.
///
/// Checks run in a fixed order and the first failure is returned. Advisories
/// never block the result.
pub fn solve(params: InputParameters) -> Result<Solution, SolveError> {
    validate(&params)?;

    let u_cm = params.x2 - params.x1;
    let v_cm = params.x3 - params.x2;
    let d_prime_mm = (params.p2 - params.p1).abs();
    let u_mm = u_cm * 10.0;
    let v_mm = v_cm * 10.0;
    let screen_mm = (params.x3 - params.x1) * 10.0;

    if v_mm.abs() < LENGTH_EPSILON {
        return Err(SolveError::DegenerateGeometry {
            quantity: GeometryQuantity::ImageDistance,
            value: v_mm,
        });
    }
    if screen_mm.abs() < LENGTH_EPSILON {
        return Err(SolveError::DegenerateGeometry {
            quantity: GeometryQuantity::ScreenDistance,
            value: screen_mm,
        });
    }

    let mut advisories = Vec::new();
    let d_mm = d_prime_mm * (u_mm / v_mm);
    if d_mm.abs() < LENGTH_EPSILON {
        advisories.push(Advisory::NegligibleSourceSeparation { d_mm });
    }

    let delta_x_mm = (params.x5 - params.x4).abs() / 10.0;
    if delta_x_mm <= LENGTH_EPSILON {
        return Err(SolveError::DegenerateFringeSpacing { delta_x_mm });
    }

    let wavelength_mm = (d_mm * delta_x_mm) / screen_mm;
    let wavelength_nm = wavelength_mm * 1e6;
    advisories.extend(classify_wavelength(wavelength_nm));

    Ok(Solution {
        results: DerivedResults {
            u_cm,
            v_cm,
            screen_distance_cm: screen_mm / 10.0,
            d_prime_mm,
            d_mm,
            delta_x_mm,
            wavelength_nm,
            screen_distance_mm_plot: screen_mm,
            source_separation_mm_plot: d_mm,
            slit_width_mm_plot: params.slit_width,
            wavelength_mm_plot: wavelength_mm,
        },
        advisories,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_band_is_inclusive() {
        assert_eq!(classify_wavelength(380.0), None);
        assert_eq!(classify_wavelength(780.0), None);
        assert_eq!(
            classify_wavelength(379.99),
            Some(Advisory::OutsideVisibleRange { nm: 379.99 })
        );
    }

    #[test]
    fn plausible_band_is_exclusive() {
        assert_eq!(
            classify_wavelength(1.0),
            Some(Advisory::ImplausibleWavelength { nm: 1.0 })
        );
        assert_eq!(
            classify_wavelength(10_000.0),
            Some(Advisory::ImplausibleWavelength { nm: 10_000.0 })
        );
        assert_eq!(
            classify_wavelength(f64::NAN).map(|a| a.code()),
            Some("implausible-wavelength")
        );
    }
}
