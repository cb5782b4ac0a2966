use std::error::Error;

use biprism_core::ParamKey;
use biprism_store::ParameterStore;
use clap::Args;

use crate::Context;

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Parameter name as stored (x1, x2, x3, P1, P2, x4, x5, slit_width).
    pub key: String,
    /// New value.
    #[arg(allow_hyphen_values = true)]
    pub value: String,
}

pub fn run(args: &SetArgs, ctx: &mut Context) -> Result<(), Box<dyn Error>> {
    let key: ParamKey = args.key.parse()?;
    let current = ctx.store.load().params;
    let edited = current.parse_edit(key, &args.value)?;
    ctx.store.save(&edited)?;
    println!("{key} = {}", edited.format_value(key));
    Ok(())
}
