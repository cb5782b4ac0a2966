use std::io::Write;

use biprism_core::{InputParameters, ParamKey, ResultKey, Severity};

use crate::{Frontend, Outcome, ViewError};

const LABEL_WIDTH: usize = 26;
const CELL_WIDTH: usize = 38;
const PLACEHOLDER: &str = "--";

/// Plain text rendition of the input and result panels.
pub struct TextPanel<W: Write> {
    out: W,
}

impl<W: Write> TextPanel<W> {
    /// Panel writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Writes only the input panel.
    pub fn write_inputs(&mut self, params: &InputParameters) -> Result<(), ViewError> {
        writeln!(self.out, "Input parameters")?;
        for key in ParamKey::ALL {
            let label = format!("{} ({})", key.label(), key.unit());
            writeln!(
                self.out,
                "  {label:<LABEL_WIDTH$} {}",
                params.format_value(key)
            )?;
        }
        Ok(())
    }

    fn write_results(&mut self, outcome: &Outcome) -> Result<(), ViewError> {
        writeln!(self.out, "Results")?;
        let results = outcome.solution.as_ref().ok().map(|solved| &solved.results);
        for row in ResultKey::LAYOUT {
            let cells: Vec<String> = row
                .iter()
                .flatten()
                .map(|key| {
                    let value = results
                        .map(|r| r.format_field(*key))
                        .unwrap_or_else(|| PLACEHOLDER.to_string());
                    format!("{:<LABEL_WIDTH$} {value}", key.label())
                })
                .collect();
            let line = match cells.as_slice() {
                [left, right] => format!("{left:<CELL_WIDTH$}{right}"),
                [single] => single.clone(),
                _ => String::new(),
            };
            writeln!(self.out, "  {}", line.trim_end())?;
        }
        Ok(())
    }

    fn write_status(&mut self, outcome: &Outcome) -> Result<(), ViewError> {
        match &outcome.solution {
            Ok(solved) => {
                for advisory in &solved.advisories {
                    let tag = match advisory.severity() {
                        Severity::Warning => "warning",
                        Severity::Notice => "note",
                    };
                    writeln!(self.out, "{tag}: {advisory}")?;
                }
            }
            Err(err) => writeln!(self.out, "error: {err}")?,
        }
        if let Some(err) = outcome.synthesis_error() {
            writeln!(self.out, "plot error: {err}")?;
        }
        Ok(())
    }
}

impl<W: Write> Frontend for TextPanel<W> {
    fn present(&mut self, outcome: &Outcome) -> Result<(), ViewError> {
        self.write_inputs(&outcome.params)?;
        writeln!(self.out)?;
        self.write_results(outcome)?;
        writeln!(self.out)?;
        self.write_status(outcome)?;
        writeln!(self.out, "{}", outcome.title())?;
        self.out.flush()?;
        Ok(())
    }
}
