use std::error::Error;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use biprism_core::{InputParameters, ParamKey};
use biprism_store::ParameterStore;
use biprism_view::{calculate, Frontend, JsonReport, ReportOpts, SvgFigure, TextPanel};
use clap::{Args, ValueEnum};
use tracing::{debug, info};

use super::tool_versions;
use crate::Context;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Svg,
    Json,
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Slit position (cm).
    #[arg(long)]
    pub x1: Option<f64>,
    /// Lens position (cm).
    #[arg(long)]
    pub x2: Option<f64>,
    /// Eyepiece position (cm).
    #[arg(long)]
    pub x3: Option<f64>,
    /// Image S1' position (mm).
    #[arg(long)]
    pub p1: Option<f64>,
    /// Image S2' position (mm).
    #[arg(long)]
    pub p2: Option<f64>,
    /// Fringe 0 reading (mm).
    #[arg(long)]
    pub x4: Option<f64>,
    /// Fringe 10 reading (mm).
    #[arg(long)]
    pub x5: Option<f64>,
    /// Slit width (mm).
    #[arg(long)]
    pub slit_width: Option<f64>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Write the presentation to a file instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// Do not persist the readings after a successful solve.
    #[arg(long)]
    pub no_save: bool,
    /// Embed the intensity profile in JSON reports.
    #[arg(long)]
    pub profile: bool,
    /// Horizontal sample count, overriding the config.
    #[arg(long)]
    pub columns: Option<usize>,
    /// Row count, overriding the config.
    #[arg(long)]
    pub rows: Option<usize>,
}

impl RunArgs {
    fn overrides(&self) -> [(ParamKey, Option<f64>); 8] {
        [
            (ParamKey::X1, self.x1),
            (ParamKey::X2, self.x2),
            (ParamKey::X3, self.x3),
            (ParamKey::P1, self.p1),
            (ParamKey::P2, self.p2),
            (ParamKey::X4, self.x4),
            (ParamKey::X5, self.x5),
            (ParamKey::SlitWidth, self.slit_width),
        ]
    }

    fn apply(&self, base: InputParameters) -> Result<InputParameters, Box<dyn Error>> {
        let mut params = base;
        for (key, value) in self.overrides() {
            if let Some(value) = value {
                params = params.apply_edit(key, value)?;
                debug!("override {key} = {}", key.format(value));
            }
        }
        Ok(params)
    }
}

pub fn run(args: &RunArgs, ctx: &mut Context) -> Result<(), Box<dyn Error>> {
    let loaded = ctx.store.load();
    let params = args.apply(loaded.params)?;

    let mut opts = ctx.config.synthesis;
    if let Some(columns) = args.columns {
        opts.columns = columns;
    }
    if let Some(rows) = args.rows {
        opts.rows = rows;
    }

    let outcome = calculate(params, &opts);

    let sink: Box<dyn Write> = match &args.out {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    };
    let mut frontend: Box<dyn Frontend> = match args.format {
        OutputFormat::Text => Box::new(TextPanel::new(sink)),
        OutputFormat::Svg => Box::new(SvgFigure::new(ctx.config.figure, sink)),
        OutputFormat::Json => {
            let report_opts = ReportOpts {
                include_profile: args.profile,
                tool_versions: tool_versions(),
            };
            Box::new(JsonReport::new(report_opts, sink))
        }
    };
    frontend.present(&outcome)?;
    if let Some(path) = &args.out {
        info!("wrote {:?} output to {}", args.format, path.display());
    }

    match &outcome.solution {
        Ok(_) if args.no_save => Ok(()),
        Ok(_) => {
            ctx.store.save(&outcome.params)?;
            Ok(())
        }
        Err(err) => Err(err.clone().into()),
    }
}
