pub mod reset;
pub mod run;
pub mod set;
pub mod show;
pub mod version;

use std::collections::BTreeMap;

/// Versions of every crate taking part in a run.
pub fn tool_versions() -> BTreeMap<String, String> {
    [
        ("biprism-core", biprism_core::VERSION),
        ("biprism-store", biprism_store::VERSION),
        ("biprism-view", biprism_view::VERSION),
        ("biprism-sim", env!("CARGO_PKG_VERSION")),
    ]
    .into_iter()
    .map(|(name, version)| (name.to_string(), version.to_string()))
    .collect()
}
