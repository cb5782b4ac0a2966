use std::fs;
use std::path::{Path, PathBuf};

use biprism_core::{InputParameters, ParamKey};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::serde::to_pretty_json_string;
use crate::StoreError;

/// File name used when no explicit parameter file is configured.
pub const DEFAULT_PARAMS_FILE: &str = "fresnel_params.json";

/// Where the loaded parameters came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadSource {
    /// Nothing stored yet; the defaults were used.
    Missing,
    /// Stored text could not be read or parsed; the defaults were used.
    Corrupt(String),
    /// Parameters were decoded key by key from the stored record.
    Stored,
}

/// Parameters recovered by a load, with a per-key account of fallbacks.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    /// Recovered parameters, defaults filled in where needed.
    pub params: InputParameters,
    /// Origin of the record.
    pub source: LoadSource,
    /// Keys taken from the record.
    pub loaded: Vec<ParamKey>,
    /// Keys present with an unusable value, paired with that value's text.
    pub invalid: Vec<(ParamKey, String)>,
    /// Keys absent from the record.
    pub missing: Vec<ParamKey>,
    /// Unknown keys present in the record.
    pub ignored: Vec<String>,
}

impl LoadReport {
    fn defaults(source: LoadSource) -> Self {
        Self {
            params: InputParameters::default(),
            source,
            loaded: Vec::new(),
            invalid: Vec::new(),
            missing: ParamKey::ALL.to_vec(),
            ignored: Vec::new(),
        }
    }
}

/// Outcome of a save.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveReport {
    /// Parameters as written.
    pub written: InputParameters,
    /// Keys whose in-memory value was replaced by the default.
    pub replaced: Vec<ParamKey>,
}

/// Persistence collaborator for the eight bench readings.
pub trait ParameterStore {
    /// Loads parameters, falling back to defaults wherever the record is unusable.
    fn load(&self) -> LoadReport;

    /// Persists the parameters.
    fn save(&mut self, params: &InputParameters) -> Result<SaveReport, StoreError>;
}

fn numeric_value(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

/// Decodes a stored record key by key.
pub fn decode_parameters(value: &Value) -> LoadReport {
    let Some(map) = value.as_object() else {
        return LoadReport::defaults(LoadSource::Corrupt(
            "parameter record is not a JSON object".into(),
        ));
    };

    let mut report = LoadReport::defaults(LoadSource::Stored);
    report.missing.clear();
    for key in ParamKey::ALL {
        match map.get(key.name()) {
            Some(raw) => match numeric_value(raw) {
                Some(number) => {
                    report.params = report.params.with_value(key, number);
                    report.loaded.push(key);
                }
                None => report.invalid.push((key, raw.to_string())),
            },
            None => report.missing.push(key),
        }
    }
    report.ignored = map
        .keys()
        .filter(|name| name.parse::<ParamKey>().is_err())
        .cloned()
        .collect();
    report
}

/// Decodes stored text, treating unparsable text as a corrupt record.
pub fn decode_text(text: &str) -> LoadReport {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => decode_parameters(&value),
        Err(err) => LoadReport::defaults(LoadSource::Corrupt(err.to_string())),
    }
}

/// Replaces every value that cannot be written as a number by its default.
pub fn sanitize_for_save(params: &InputParameters) -> SaveReport {
    let mut written = *params;
    let mut replaced = Vec::new();
    for (key, value) in params.entries() {
        if !value.is_finite() {
            written = written.with_value(key, key.default_value());
            replaced.push(key);
        }
    }
    SaveReport { written, replaced }
}

/// Encodes the parameters as the stored text.
pub fn encode_parameters(params: &InputParameters) -> Result<(String, SaveReport), StoreError> {
    let report = sanitize_for_save(params);
    let text = to_pretty_json_string(&report.written)?;
    Ok((text, report))
}

fn log_load(report: &LoadReport, origin: &str) {
    match &report.source {
        LoadSource::Missing => info!("no parameter record at {origin}, using defaults"),
        LoadSource::Corrupt(reason) => {
            warn!("failed to load parameters from {origin}: {reason}; using defaults")
        }
        LoadSource::Stored => {
            if report.loaded.is_empty() && report.invalid.is_empty() {
                info!("parameter record {origin} holds no usable keys, using defaults");
            } else {
                info!("loaded {} parameters from {origin}", report.loaded.len());
            }
        }
    }
    for (key, raw) in &report.invalid {
        warn!(
            "invalid value for '{}': {} (using default {})",
            key,
            raw,
            key.default_value()
        );
    }
    for name in &report.ignored {
        debug!("ignoring unknown parameter '{name}'");
    }
}

fn log_save(report: &SaveReport) {
    for key in &report.replaced {
        warn!(
            "parameter '{}' is not a finite number, saving default {}",
            key,
            key.default_value()
        );
    }
}

/// Flat JSON object on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::new(DEFAULT_PARAMS_FILE)
    }
}

impl JsonFileStore {
    /// Store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ParameterStore for JsonFileStore {
    fn load(&self) -> LoadReport {
        let origin = self.path.display().to_string();
        let report = if !self.path.exists() {
            LoadReport::defaults(LoadSource::Missing)
        } else {
            match fs::read_to_string(&self.path) {
                Ok(text) => decode_text(&text),
                Err(err) => LoadReport::defaults(LoadSource::Corrupt(err.to_string())),
            }
        };
        log_load(&report, &origin);
        report
    }

    fn save(&mut self, params: &InputParameters) -> Result<SaveReport, StoreError> {
        let (text, report) = encode_parameters(params)?;
        log_save(&report);
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| StoreError::Write(err, self.path.clone()))?;
        }
        fs::write(&self.path, text).map_err(|err| StoreError::Write(err, self.path.clone()))?;
        info!("parameters saved to {}", self.path.display());
        Ok(report)
    }
}

/// In-memory record with the same decoding rules as [`JsonFileStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    text: Option<String>,
}

impl MemoryStore {
    /// Store pre-seeded with raw record text.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    /// Raw record text, if anything was saved.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Overwrites the raw record text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }
}

impl ParameterStore for MemoryStore {
    fn load(&self) -> LoadReport {
        let report = match &self.text {
            None => LoadReport::defaults(LoadSource::Missing),
            Some(text) => decode_text(text),
        };
        log_load(&report, "memory");
        report
    }

    fn save(&mut self, params: &InputParameters) -> Result<SaveReport, StoreError> {
        let (text, report) = encode_parameters(params)?;
        log_save(&report);
        self.text = Some(text);
        Ok(report)
    }
}
