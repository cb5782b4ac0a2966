use std::error::Error;
use std::io;

use biprism_store::{LoadSource, ParameterStore};
use biprism_view::TextPanel;

use crate::Context;

pub fn run(ctx: &Context) -> Result<(), Box<dyn Error>> {
    let loaded = ctx.store.load();
    let mut panel = TextPanel::new(io::stdout().lock());
    panel.write_inputs(&loaded.params)?;
    let source = match &loaded.source {
        LoadSource::Stored => ctx.store.path().display().to_string(),
        LoadSource::Missing => "defaults (no parameter file)".to_string(),
        LoadSource::Corrupt(_) => "defaults (unreadable parameter file)".to_string(),
    };
    println!("source: {source}");
    for (key, _) in &loaded.invalid {
        println!("fallback: {key} reset to default {}", key.format(key.default_value()));
    }
    Ok(())
}
