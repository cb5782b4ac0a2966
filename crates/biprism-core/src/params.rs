//! Bench readings entered by the user.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ParamError;

/// Identifier of one of the eight bench readings, in panel order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ParamKey {
    /// Slit position.
    #[serde(rename = "x1")]
    X1,
    /// Lens position.
    #[serde(rename = "x2")]
    X2,
    /// Eyepiece position.
    #[serde(rename = "x3")]
    X3,
    /// Position of the real image S1'.
    #[serde(rename = "P1")]
    P1,
    /// Position of the real image S2'.
    #[serde(rename = "P2")]
    P2,
    /// Micrometer reading at fringe 0.
    #[serde(rename = "x4")]
    X4,
    /// Micrometer reading at fringe 10.
    #[serde(rename = "x5")]
    X5,
    /// Source slit width.
    #[serde(rename = "slit_width")]
    SlitWidth,
}

impl ParamKey {
    /// All keys in panel and file order.
    pub const ALL: [ParamKey; 8] = [
        ParamKey::X1,
        ParamKey::X2,
        ParamKey::X3,
        ParamKey::P1,
        ParamKey::P2,
        ParamKey::X4,
        ParamKey::X5,
        ParamKey::SlitWidth,
    ];

    /// Name used in the parameter file and on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            ParamKey::X1 => "x1",
            ParamKey::X2 => "x2",
            ParamKey::X3 => "x3",
            ParamKey::P1 => "P1",
            ParamKey::P2 => "P2",
            ParamKey::X4 => "x4",
            ParamKey::X5 => "x5",
            ParamKey::SlitWidth => "slit_width",
        }
    }

    /// Human label shown next to the input.
    pub fn label(&self) -> &'static str {
        match self {
            ParamKey::X1 => "slit position x1",
            ParamKey::X2 => "lens position x2",
            ParamKey::X3 => "eyepiece position x3",
            ParamKey::P1 => "image S1' position P1",
            ParamKey::P2 => "image S2' position P2",
            ParamKey::X4 => "fringe 0 reading x4",
            ParamKey::X5 => "fringe 10 reading x5",
            ParamKey::SlitWidth => "slit width b",
        }
    }

    /// Unit of the reading.
    pub fn unit(&self) -> &'static str {
        if self.is_axial_position() {
            "cm"
        } else {
            "mm"
        }
    }

    /// Value used when the user supplied nothing usable.
    pub fn default_value(&self) -> f64 {
        match self {
            ParamKey::X1 => 10.0,
            ParamKey::X2 => 40.0,
            ParamKey::X3 => 110.0,
            ParamKey::P1 => 0.00,
            ParamKey::P2 => 0.80,
            ParamKey::X4 => 5.00,
            ParamKey::X5 => 15.94,
            ParamKey::SlitWidth => 0.05,
        }
    }

    /// Decimal places used when the value is displayed.
    pub fn precision(&self) -> usize {
        if self.is_axial_position() {
            1
        } else {
            3
        }
    }

    /// Whether the key is one of the cm positions along the optical axis.
    pub fn is_axial_position(&self) -> bool {
        matches!(self, ParamKey::X1 | ParamKey::X2 | ParamKey::X3)
    }

    /// Formats `value` at this key's display precision.
    pub fn format(&self, value: f64) -> String {
        format!("{:.*}", self.precision(), value)
    }
}

impl fmt::Display for ParamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ParamKey {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        ParamKey::ALL
            .into_iter()
            .find(|key| key.name() == trimmed)
            .ok_or_else(|| ParamError::UnknownKey(trimmed.to_string()))
    }
}

/// Immutable snapshot of the eight bench readings handed to the solver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputParameters {
    /// Slit position (cm).
    pub x1: f64,
    /// Lens position (cm).
    pub x2: f64,
    /// Eyepiece position (cm).
    pub x3: f64,
    /// Real image S1' position (mm).
    #[serde(rename = "P1")]
    pub p1: f64,
    /// Real image S2' position (mm).
    #[serde(rename = "P2")]
    pub p2: f64,
    /// Micrometer reading at fringe 0 (mm).
    pub x4: f64,
    /// Micrometer reading at fringe 10 (mm).
    pub x5: f64,
    /// Source slit width (mm).
    pub slit_width: f64,
}

impl Default for InputParameters {
    fn default() -> Self {
        Self {
            x1: ParamKey::X1.default_value(),
            x2: ParamKey::X2.default_value(),
            x3: ParamKey::X3.default_value(),
            p1: ParamKey::P1.default_value(),
            p2: ParamKey::P2.default_value(),
            x4: ParamKey::X4.default_value(),
            x5: ParamKey::X5.default_value(),
            slit_width: ParamKey::SlitWidth.default_value(),
        }
    }
}

impl InputParameters {
    /// Reads the value stored under `key`.
    pub fn get(&self, key: ParamKey) -> f64 {
        match key {
            ParamKey::X1 => self.x1,
            ParamKey::X2 => self.x2,
            ParamKey::X3 => self.x3,
            ParamKey::P1 => self.p1,
            ParamKey::P2 => self.p2,
            ParamKey::X4 => self.x4,
            ParamKey::X5 => self.x5,
            ParamKey::SlitWidth => self.slit_width,
        }
    }

    /// Returns a copy with `key` replaced by `value`, without any checks.
    pub fn with_value(mut self, key: ParamKey, value: f64) -> Self {
        let slot = match key {
            ParamKey::X1 => &mut self.x1,
            ParamKey::X2 => &mut self.x2,
            ParamKey::X3 => &mut self.x3,
            ParamKey::P1 => &mut self.p1,
            ParamKey::P2 => &mut self.p2,
            ParamKey::X4 => &mut self.x4,
            ParamKey::X5 => &mut self.x5,
            ParamKey::SlitWidth => &mut self.slit_width,
        };
        *slot = value;
        self
    }

    /// Ordered `(key, value)` pairs.
    pub fn entries(&self) -> [(ParamKey, f64); 8] {
        ParamKey::ALL.map(|key| (key, self.get(key)))
    }

    /// Value of `key` at its display precision.
    pub fn format_value(&self, key: ParamKey) -> String {
        key.format(self.get(key))
    }

    /// Applies a single user edit, refusing values the input box would refuse.
    ///
    /// Only per-field constraints are enforced here; cross-field ordering is
    /// left to [`crate::solve`].
    pub fn apply_edit(&self, key: ParamKey, value: f64) -> Result<Self, ParamError> {
        if !value.is_finite() {
            return Err(ParamError::Rejected {
                key,
                value,
                reason: "value must be finite",
            });
        }
        if key == ParamKey::SlitWidth && value <= 0.0 {
            return Err(ParamError::Rejected {
                key,
                value,
                reason: "slit width b must be positive",
            });
        }
        if key.is_axial_position() && value < 0.0 {
            return Err(ParamError::Rejected {
                key,
                value,
                reason: "positions x1, x2, x3 cannot be negative",
            });
        }
        Ok(self.with_value(key, value))
    }

    /// Parses raw edit text and applies it through [`Self::apply_edit`].
    pub fn parse_edit(&self, key: ParamKey, text: &str) -> Result<Self, ParamError> {
        let value = text
            .trim()
            .parse::<f64>()
            .map_err(|_| ParamError::NotNumeric {
                key,
                text: text.to_string(),
            })?;
        self.apply_edit(key, value)
    }

    /// The factory defaults.
    pub fn reset() -> Self {
        Self::default()
    }
}
