//! One calculation pipeline for the biprism bench and the front-ends that present it.

pub mod figure;
pub mod panel;
pub mod pipeline;
pub mod report;

use std::io;

use biprism_core::ErrorInfo;
use biprism_store::StoreError;

pub use figure::{render_field_svg, render_message_svg, FigureConfig, SvgFigure};
pub use panel::TextPanel;
pub use pipeline::{calculate, Outcome};
pub use report::{build_report, JsonReport, PatternSummary, Report, ReportOpts, REPORT_SCHEMA};

/// Crate version recorded in report provenance.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// A presentation strategy for a calculation outcome.
pub trait Frontend {
    /// Presents one outcome.
    fn present(&mut self, outcome: &Outcome) -> Result<(), ViewError>;
}

/// Errors raised while presenting an outcome.
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error("failed to write output")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ViewError {
    /// Lowers the error into a serializable payload.
    pub fn info(&self) -> ErrorInfo {
        match self {
            ViewError::Io(err) => ErrorInfo::new("view-io", self.to_string())
                .with_context("io", err.to_string()),
            ViewError::Store(err) => err.info(),
        }
    }
}
