#![doc = "Persistence of the bench readings as a flat JSON record, plus the canonical JSON and hashing helpers used by exported reports."]

use std::io;
use std::path::PathBuf;

use biprism_core::ErrorInfo;

/// Canonical hashing helpers.
pub mod hash;
/// Canonical JSON serde helpers.
pub mod serde;
/// Parameter store trait and its file and memory backends.
pub mod store;

pub use hash::stable_hash_string;
pub use store::{
    decode_parameters, decode_text, encode_parameters, sanitize_for_save, JsonFileStore,
    LoadReport, LoadSource, MemoryStore, ParameterStore, SaveReport, DEFAULT_PARAMS_FILE,
};

/// Crate version recorded in report provenance.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Errors raised while writing or encoding records.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The parameter file could not be written.
    #[error("failed to write parameter file {1:?}")]
    Write(#[source] io::Error, PathBuf),
    /// A value could not be encoded as JSON.
    #[error("json encoding failed: {0}")]
    Encode(#[source] serde_json::Error),
    /// Encoded output was not valid UTF-8.
    #[error("encoded record is not utf-8: {0}")]
    Utf8(String),
}

impl StoreError {
    /// Lowers the error into a serializable payload.
    pub fn info(&self) -> ErrorInfo {
        let code = match self {
            StoreError::Write(..) => "store-write",
            StoreError::Encode(_) => "json-encode",
            StoreError::Utf8(_) => "utf8",
        };
        let info = ErrorInfo::new(code, self.to_string());
        match self {
            StoreError::Write(err, path) => info
                .with_context("path", path.display().to_string())
                .with_context("io", err.to_string()),
            _ => info,
        }
    }
}
