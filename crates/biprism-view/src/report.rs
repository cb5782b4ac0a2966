use std::collections::BTreeMap;
use std::io::Write;

use biprism_core::{
    Advisory, DerivedResults, ErrorInfo, Extent, InputParameters, ResultKey, RunProvenance,
    SchemaVersion,
};
use biprism_store::serde::to_canonical_json_bytes;
use biprism_store::{stable_hash_string, StoreError};
use serde::{Deserialize, Serialize};

use crate::{Frontend, Outcome, ViewError};

/// Schema of the exported report.
pub const REPORT_SCHEMA: SchemaVersion = SchemaVersion::new(1, 0, 0);

/// Shape of the synthesized field, without the samples unless requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternSummary {
    pub columns: usize,
    pub rows: usize,
    pub vmin: f64,
    pub vmax: f64,
    pub extent: Extent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<Vec<f64>>,
}

/// Machine readable record of one calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub schema: SchemaVersion,
    pub provenance: RunProvenance,
    pub title: String,
    pub inputs: InputParameters,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<DerivedResults>,
    /// Results at their panel precision, keyed by record name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub formatted: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
    #[serde(default)]
    pub advisories: Vec<Advisory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<PatternSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern_error: Option<ErrorInfo>,
}

/// Knobs for [`build_report`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReportOpts {
    /// Embed the 1D intensity profile.
    pub include_profile: bool,
    /// Extra tool versions merged into the provenance.
    pub tool_versions: BTreeMap<String, String>,
}

/// Assembles the report for an outcome.
pub fn build_report(outcome: &Outcome, opts: &ReportOpts) -> Result<Report, StoreError> {
    let mut tool_versions = opts.tool_versions.clone();
    for (name, version) in [
        ("biprism-core", biprism_core::VERSION),
        ("biprism-store", biprism_store::VERSION),
        ("biprism-view", crate::VERSION),
    ] {
        tool_versions.insert(name.to_string(), version.to_string());
    }
    let provenance = RunProvenance {
        input_hash: stable_hash_string(&outcome.params)?,
        options_hash: stable_hash_string(&outcome.opts)?,
        tool_versions,
    };

    let (results, error, advisories) = match &outcome.solution {
        Ok(solved) => (Some(solved.results), None, solved.advisories.clone()),
        Err(err) => (None, Some(err.info()), Vec::new()),
    };
    let formatted: BTreeMap<String, String> = results
        .map(|r| {
            ResultKey::ALL
                .iter()
                .map(|key| (key.name().to_string(), r.format_field(*key)))
                .collect()
        })
        .unwrap_or_default();
    let pattern = outcome.field().map(|field| PatternSummary {
        columns: field.columns,
        rows: field.rows,
        vmin: field.vmin,
        vmax: field.vmax,
        extent: field.extent,
        profile: opts.include_profile.then(|| field.profile().to_vec()),
    });

    Ok(Report {
        schema: REPORT_SCHEMA,
        provenance,
        title: outcome.title(),
        inputs: outcome.params,
        results,
        formatted,
        error,
        advisories,
        pattern,
        pattern_error: outcome.synthesis_error().map(|err| err.info()),
    })
}

/// Writes each outcome as one line of canonical JSON.
pub struct JsonReport<W: Write> {
    opts: ReportOpts,
    out: W,
}

impl<W: Write> JsonReport<W> {
    pub fn new(opts: ReportOpts, out: W) -> Self {
        Self { opts, out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Frontend for JsonReport<W> {
    fn present(&mut self, outcome: &Outcome) -> Result<(), ViewError> {
        let report = build_report(outcome, &self.opts)?;
        let bytes = to_canonical_json_bytes(&report)?;
        self.out.write_all(&bytes)?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        Ok(())
    }
}
