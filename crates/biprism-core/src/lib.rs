#![deny(missing_docs)]
#![doc = "Fresnel biprism wavelength solver and interference pattern synthesis. The solver turns bench readings into derived optics quantities; the synthesizer turns those into a normalized screen intensity field."]

pub mod errors;
pub mod params;
pub mod pattern;
pub mod provenance;
/// Closed-form derivation of the biprism quantities.
pub mod solver;

pub use errors::{ErrorFamily, ErrorInfo, GeometryQuantity, ParamError, SolveError, SynthesisError};
pub use params::{InputParameters, ParamKey};
pub use pattern::{synthesize, synthesize_default, Extent, IntensityField, SynthesisOpts};
pub use provenance::{RunProvenance, SchemaVersion};
pub use solver::{solve, Advisory, DerivedResults, PlotInputs, ResultKey, Severity, Solution};

/// Crate version recorded in report provenance.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
