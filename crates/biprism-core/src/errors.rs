//! Structured error types shared across biprism crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::params::ParamKey;

/// Structured payload every typed error can be lowered into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (offending values, quantities, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

/// Broad classification of a fatal solve failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorFamily {
    /// One of the explicit checks on the bench readings failed.
    InputValidation,
    /// Readings passed validation but a divisor collapsed to zero.
    DegenerateGeometry,
}

/// Quantity whose magnitude collapsed during the derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeometryQuantity {
    /// Image distance `v = x3 - x2`.
    ImageDistance,
    /// Screen distance `D = x3 - x1`.
    ScreenDistance,
}

impl GeometryQuantity {
    /// Short symbol used in messages.
    pub fn symbol(&self) -> &'static str {
        match self {
            GeometryQuantity::ImageDistance => "v",
            GeometryQuantity::ScreenDistance => "D",
        }
    }
}

/// Fatal outcome of [`crate::solve`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    /// Positions along the optical axis are not strictly increasing.
    #[error("position error: must satisfy x1 ({x1:.1}) < x2 ({x2:.1}) < x3 ({x3:.1}) cm")]
    Ordering {
        /// Slit position in cm.
        x1: f64,
        /// Lens position in cm.
        x2: f64,
        /// Eyepiece position in cm.
        x3: f64,
    },
    /// The two real images coincide.
    #[error("real image positions P1 ({p1:.3}) and P2 ({p2:.3}) mm must differ")]
    DegenerateImages {
        /// Position of S1' in mm.
        p1: f64,
        /// Position of S2' in mm.
        p2: f64,
    },
    /// The tenth fringe reading does not exceed the zeroth.
    #[error("reading x5 ({x5:.3}) mm must be greater than x4 ({x4:.3}) mm")]
    FringeOrdering {
        /// Reading at fringe 0 in mm.
        x4: f64,
        /// Reading at fringe 10 in mm.
        x5: f64,
    },
    /// Slit width is zero or negative.
    #[error("slit width b ({slit_width:.3}) mm must be positive")]
    InvalidSlitWidth {
        /// Offending width in mm.
        slit_width: f64,
    },
    /// Image distance or screen distance is numerically zero.
    #[error("derived {} is close to zero ({value:.3e} mm); check the bench positions", .quantity.symbol())]
    DegenerateGeometry {
        /// Which distance collapsed.
        quantity: GeometryQuantity,
        /// Its value in mm.
        value: f64,
    },
    /// Fringe spacing is too small to derive a wavelength.
    #[error("derived fringe spacing {delta_x_mm:.3e} mm is non-positive or too small; check x4 and x5")]
    DegenerateFringeSpacing {
        /// Per-fringe spacing in mm.
        delta_x_mm: f64,
    },
}

impl SolveError {
    /// Stable machine readable code.
    pub fn code(&self) -> &'static str {
        match self {
            SolveError::Ordering { .. } => "ordering",
            SolveError::DegenerateImages { .. } => "degenerate-images",
            SolveError::FringeOrdering { .. } => "fringe-ordering",
            SolveError::InvalidSlitWidth { .. } => "invalid-slit-width",
            SolveError::DegenerateGeometry { .. } => "degenerate-geometry",
            SolveError::DegenerateFringeSpacing { .. } => "degenerate-fringe-spacing",
        }
    }

    /// Family the failure belongs to.
    pub fn family(&self) -> ErrorFamily {
        match self {
            SolveError::DegenerateGeometry { .. } => ErrorFamily::DegenerateGeometry,
            _ => ErrorFamily::InputValidation,
        }
    }

    /// Lowers the error into a serializable payload.
    pub fn info(&self) -> ErrorInfo {
        let info = ErrorInfo::new(self.code(), self.to_string());
        match *self {
            SolveError::Ordering { x1, x2, x3 } => info
                .with_context("x1", format!("{x1}"))
                .with_context("x2", format!("{x2}"))
                .with_context("x3", format!("{x3}")),
            SolveError::DegenerateImages { p1, p2 } => info
                .with_context("P1", format!("{p1}"))
                .with_context("P2", format!("{p2}")),
            SolveError::FringeOrdering { x4, x5 } => info
                .with_context("x4", format!("{x4}"))
                .with_context("x5", format!("{x5}")),
            SolveError::InvalidSlitWidth { slit_width } => {
                info.with_context("slit_width", format!("{slit_width}"))
            }
            SolveError::DegenerateGeometry { quantity, value } => info
                .with_context("quantity", quantity.symbol())
                .with_context("value_mm", format!("{value}"))
                .with_hint(match quantity {
                    GeometryQuantity::ImageDistance => "check x2 and x3",
                    GeometryQuantity::ScreenDistance => "check x1 and x3",
                }),
            SolveError::DegenerateFringeSpacing { delta_x_mm } => info
                .with_context("delta_x_mm", format!("{delta_x_mm}"))
                .with_hint("check x4 and x5"),
        }
    }
}

/// Fatal outcome of [`crate::synthesize`]; the numeric results stay valid.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SynthesisError {
    /// Screen distance or wavelength too small to build a pattern.
    #[error("plotting requires a non-zero screen distance D ({screen_distance_mm:.3e} mm) and wavelength ({wavelength_mm:.3e} mm)")]
    DegeneratePlotInputs {
        /// Screen distance in mm.
        screen_distance_mm: f64,
        /// Wavelength in mm.
        wavelength_mm: f64,
    },
    /// Sampling options cannot describe a window.
    #[error("invalid synthesis options: {0}")]
    InvalidOptions(String),
}

impl SynthesisError {
    /// Stable machine readable code.
    pub fn code(&self) -> &'static str {
        match self {
            SynthesisError::DegeneratePlotInputs { .. } => "degenerate-plot-inputs",
            SynthesisError::InvalidOptions(_) => "invalid-options",
        }
    }

    /// Lowers the error into a serializable payload.
    pub fn info(&self) -> ErrorInfo {
        let info = ErrorInfo::new(self.code(), self.to_string());
        match self {
            SynthesisError::DegeneratePlotInputs {
                screen_distance_mm,
                wavelength_mm,
            } => info
                .with_context("screen_distance_mm", format!("{screen_distance_mm}"))
                .with_context("wavelength_mm", format!("{wavelength_mm}")),
            SynthesisError::InvalidOptions(_) => info,
        }
    }
}

/// Rejected parameter edit.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamError {
    /// Key name is not one of the eight bench parameters.
    #[error("unknown parameter `{0}`")]
    UnknownKey(String),
    /// Edit text does not parse as a number.
    #[error("invalid input for {key} ('{text}'): not a number")]
    NotNumeric {
        /// Parameter being edited.
        key: ParamKey,
        /// Raw text supplied.
        text: String,
    },
    /// Numeric value outside what the parameter accepts.
    #[error("invalid input for {key} ({value}): {reason}")]
    Rejected {
        /// Parameter being edited.
        key: ParamKey,
        /// Offending value.
        value: f64,
        /// Why it was refused.
        reason: &'static str,
    },
}

impl ParamError {
    /// Stable machine readable code.
    pub fn code(&self) -> &'static str {
        match self {
            ParamError::UnknownKey(_) => "unknown-key",
            ParamError::NotNumeric { .. } => "not-numeric",
            ParamError::Rejected { .. } => "rejected",
        }
    }

    /// Lowers the error into a serializable payload.
    pub fn info(&self) -> ErrorInfo {
        let info = ErrorInfo::new(self.code(), self.to_string());
        match self {
            ParamError::UnknownKey(name) => info
                .with_context("key", name.clone())
                .with_hint("expected one of x1, x2, x3, P1, P2, x4, x5, slit_width"),
            ParamError::NotNumeric { key, text } => info
                .with_context("key", key.name())
                .with_context("text", text.clone()),
            ParamError::Rejected { key, value, .. } => info
                .with_context("key", key.name())
                .with_context("value", format!("{value}")),
        }
    }
}
