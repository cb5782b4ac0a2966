use std::error::Error;

use biprism_core::InputParameters;
use biprism_store::ParameterStore;

use crate::Context;

pub fn run(ctx: &mut Context) -> Result<(), Box<dyn Error>> {
    ctx.store.save(&InputParameters::reset())?;
    println!("parameters reset to defaults in {}", ctx.store.path().display());
    Ok(())
}
