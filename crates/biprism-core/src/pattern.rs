//! Screen intensity synthesis: single-slit envelope times two-source fringes.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::errors::SynthesisError;
use crate::solver::{PlotInputs, LENGTH_EPSILON};

/// Magnitude below which a wavelength (mm) or `λ·D` product is treated as zero.
pub const WAVELENGTH_EPSILON: f64 = 1e-15;

/// Smallest span allowed between `vmin` and `vmax`.
pub const MIN_DISPLAY_SPAN: f64 = 1e-9;

fn default_x_min() -> f64 {
    -6.0
}

fn default_x_max() -> f64 {
    6.0
}

fn default_columns() -> usize {
    1000
}

fn default_rows() -> usize {
    200
}

fn default_half_height() -> f64 {
    2.0
}

/// Sampling of the screen window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SynthesisOpts {
    /// Left edge of the window (mm).
    #[serde(default = "default_x_min")]
    pub x_min: f64,
    /// Right edge of the window (mm).
    #[serde(default = "default_x_max")]
    pub x_max: f64,
    /// Number of horizontal samples, endpoints included.
    #[serde(default = "default_columns")]
    pub columns: usize,
    /// Number of identical rows in the rendered field.
    #[serde(default = "default_rows")]
    pub rows: usize,
    /// Half of the displayed vertical extent (mm).
    #[serde(default = "default_half_height")]
    pub half_height_mm: f64,
}

impl Default for SynthesisOpts {
    fn default() -> Self {
        Self {
            x_min: default_x_min(),
            x_max: default_x_max(),
            columns: default_columns(),
            rows: default_rows(),
            half_height_mm: default_half_height(),
        }
    }
}

impl SynthesisOpts {
    /// Checks that the options describe a usable window.
    pub fn validate(&self) -> Result<(), SynthesisError> {
        if self.columns < 2 {
            return Err(SynthesisError::InvalidOptions(
                "at least two columns are required".into(),
            ));
        }
        if self.rows == 0 {
            return Err(SynthesisError::InvalidOptions(
                "at least one row is required".into(),
            ));
        }
        if !self.x_min.is_finite() || !self.x_max.is_finite() || self.x_min >= self.x_max {
            return Err(SynthesisError::InvalidOptions(format!(
                "window [{}, {}] is empty or not finite",
                self.x_min, self.x_max
            )));
        }
        if !self.half_height_mm.is_finite() || self.half_height_mm <= 0.0 {
            return Err(SynthesisError::InvalidOptions(
                "half height must be positive and finite".into(),
            ));
        }
        Ok(())
    }

    /// Spatial extent covered by the field.
    pub fn extent(&self) -> Extent {
        Extent {
            x_min: self.x_min,
            x_max: self.x_max,
            y_min: -self.half_height_mm,
            y_max: self.half_height_mm,
        }
    }
}

/// Rectangle on the screen covered by a field (mm).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    /// Left edge.
    pub x_min: f64,
    /// Right edge.
    pub x_max: f64,
    /// Bottom edge.
    pub y_min: f64,
    /// Top edge.
    pub y_max: f64,
}

/// Normalized 2D depiction of a 1D intensity profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntensityField {
    /// Samples per row.
    pub columns: usize,
    /// Number of rows.
    pub rows: usize,
    /// Screen position of each column (mm).
    pub x_mm: Vec<f64>,
    /// Row-major samples, `rows * columns` long.
    pub values: Vec<f64>,
    /// Lower bound of the display range.
    pub vmin: f64,
    /// Upper bound of the display range.
    pub vmax: f64,
    /// Window covered by the field.
    pub extent: Extent,
}

impl IntensityField {
    /// One row of samples; every row is identical.
    pub fn row(&self, index: usize) -> Option<&[f64]> {
        if index >= self.rows {
            return None;
        }
        let start = index * self.columns;
        self.values.get(start..start + self.columns)
    }

    /// The underlying 1D profile.
    pub fn profile(&self) -> &[f64] {
        self.row(0).unwrap_or(&[])
    }

    /// Sample at `(row, column)`.
    pub fn value(&self, row: usize, column: usize) -> Option<f64> {
        if column >= self.columns {
            return None;
        }
        self.row(row).map(|r| r[column])
    }

    /// Maps a sample into `[0, 1]` against the display range.
    pub fn normalized(&self, value: f64) -> f64 {
        ((value - self.vmin) / (self.vmax - self.vmin)).clamp(0.0, 1.0)
    }
}

/// Normalized sinc, `sin(πx) / (πx)` with `sinc(0) = 1`.
pub fn sinc(x: f64) -> f64 {
    if x == 0.0 {
        return 1.0;
    }
    let arg = PI * x;
    arg.sin() / arg
}

/// `count` evenly spaced samples over `[start, end]`, both ends included.
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count)
                .map(|idx| {
                    if idx == count - 1 {
                        end
                    } else {
                        start + step * idx as f64
                    }
                })
                .collect()
        }
    }
}

/// `λ·D` with the protective floor applied.
pub fn lambda_d(inputs: &PlotInputs) -> f64 {
    let product = inputs.wavelength_mm * inputs.screen_distance_mm;
    if product.abs() < WAVELENGTH_EPSILON {
        WAVELENGTH_EPSILON
    } else {
        product
    }
}

/// Single-slit diffraction envelope at screen position `x_mm`.
pub fn diffraction_envelope(x_mm: f64, inputs: &PlotInputs, lambda_d: f64) -> f64 {
    if inputs.slit_width_mm.abs() < LENGTH_EPSILON {
        return 1.0;
    }
    let alpha = inputs.slit_width_mm * PI * x_mm / lambda_d;
    let envelope = sinc(alpha / PI).powi(2);
    if envelope.is_finite() {
        envelope
    } else {
        0.0
    }
}

/// Two-source interference term at screen position `x_mm`.
pub fn interference_term(x_mm: f64, inputs: &PlotInputs, lambda_d: f64) -> f64 {
    if inputs.d_mm.abs() < LENGTH_EPSILON {
        return 0.5;
    }
    let beta = inputs.d_mm * PI * x_mm / lambda_d;
    beta.cos().powi(2)
}

/// Builds the screen intensity field for the given plotting inputs.
pub fn synthesize(
    inputs: &PlotInputs,
    opts: &SynthesisOpts,
) -> Result<IntensityField, SynthesisError> {
    opts.validate()?;
    if inputs.screen_distance_mm.abs() < LENGTH_EPSILON
        || inputs.wavelength_mm.abs() < WAVELENGTH_EPSILON
    {
        return Err(SynthesisError::DegeneratePlotInputs {
            screen_distance_mm: inputs.screen_distance_mm,
            wavelength_mm: inputs.wavelength_mm,
        });
    }

    let x_mm = linspace(opts.x_min, opts.x_max, opts.columns);
    let scale = lambda_d(inputs);
    let profile: Vec<f64> = x_mm
        .iter()
        .map(|&x| {
            let intensity =
                diffraction_envelope(x, inputs, scale) * interference_term(x, inputs, scale);
            intensity.max(0.0)
        })
        .collect();

    let vmin = 0.0;
    let peak = profile.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let vmax = if peak > vmin + MIN_DISPLAY_SPAN {
        peak
    } else {
        vmin + MIN_DISPLAY_SPAN
    };

    let mut values = Vec::with_capacity(profile.len() * opts.rows);
    for _ in 0..opts.rows {
        values.extend_from_slice(&profile);
    }

    Ok(IntensityField {
        columns: opts.columns,
        rows: opts.rows,
        x_mm,
        values,
        vmin,
        vmax,
        extent: opts.extent(),
    })
}

/// [`synthesize`] over the standard window.
pub fn synthesize_default(inputs: &PlotInputs) -> Result<IntensityField, SynthesisError> {
    synthesize(inputs, &SynthesisOpts::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sinc_is_defined_at_zero() {
        assert_eq!(sinc(0.0), 1.0);
        assert!(sinc(1.0).abs() < 1e-15);
        assert!((sinc(0.5) - 2.0 / PI).abs() < 1e-15);
    }

    #[test]
    fn linspace_hits_both_ends() {
        let xs = linspace(-6.0, 6.0, 1000);
        assert_eq!(xs.len(), 1000);
        assert_eq!(xs[0], -6.0);
        assert_eq!(xs[999], 6.0);
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(2.0, 3.0, 1), vec![2.0]);
    }

    #[test]
    fn lambda_d_is_floored() {
        let inputs = PlotInputs {
            wavelength_mm: 1e-16,
            d_mm: 0.3,
            screen_distance_mm: 1.0,
            slit_width_mm: 0.05,
        };
        assert_eq!(lambda_d(&inputs), WAVELENGTH_EPSILON);
    }
}
