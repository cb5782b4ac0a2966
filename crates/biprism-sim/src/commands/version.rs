use std::error::Error;

use clap::Args;
use serde_json::json;

use super::tool_versions;

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Print every crate version as JSON.
    #[arg(long)]
    pub long: bool,
}

pub fn run(args: &VersionArgs) -> Result<(), Box<dyn Error>> {
    if args.long {
        let payload = json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "tool_versions": tool_versions(),
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    }
    Ok(())
}
