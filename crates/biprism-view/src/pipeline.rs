use biprism_core::{
    solve, synthesize, InputParameters, IntensityField, Severity, Solution, SolveError,
    SynthesisError, SynthesisOpts,
};
use tracing::{debug, info, warn};

const TITLE_PREFIX: &str = "Simulated interference pattern";

/// Everything a front-end needs to present one calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    /// Readings the calculation ran on.
    pub params: InputParameters,
    /// Sampling used for the pattern.
    pub opts: SynthesisOpts,
    /// Derived quantities or the reason they could not be derived.
    pub solution: Result<Solution, SolveError>,
    /// Rendered field; `None` when the solve failed.
    pub pattern: Option<Result<IntensityField, SynthesisError>>,
}

/// Solves the readings and, on success, synthesizes the screen pattern.
pub fn calculate(params: InputParameters, opts: &SynthesisOpts) -> Outcome {
    let solution = solve(params);
    let pattern = match &solution {
        Ok(solved) => {
            for advisory in &solved.advisories {
                match advisory.severity() {
                    Severity::Warning => warn!(code = advisory.code(), "{advisory}"),
                    Severity::Notice => info!(code = advisory.code(), "{advisory}"),
                }
            }
            let field = synthesize(&solved.results.plot_inputs(), opts);
            match &field {
                Ok(field) => debug!(
                    columns = field.columns,
                    rows = field.rows,
                    vmax = field.vmax,
                    "pattern synthesized"
                ),
                Err(err) => warn!(code = err.code(), "pattern synthesis failed: {err}"),
            }
            Some(field)
        }
        Err(err) => {
            warn!(code = err.code(), "calculation failed: {err}");
            None
        }
    };
    Outcome {
        params,
        opts: *opts,
        solution,
        pattern,
    }
}

impl Outcome {
    /// Whether the readings produced a result.
    pub fn is_solved(&self) -> bool {
        self.solution.is_ok()
    }

    /// Derived wavelength, when the solve succeeded.
    pub fn wavelength_nm(&self) -> Option<f64> {
        self.solution
            .as_ref()
            .ok()
            .map(|solved| solved.results.wavelength_nm)
    }

    /// The synthesized field, when both stages succeeded.
    pub fn field(&self) -> Option<&IntensityField> {
        self.pattern.as_ref().and_then(|pattern| pattern.as_ref().ok())
    }

    /// The synthesis failure, if the solve succeeded but the image did not.
    pub fn synthesis_error(&self) -> Option<&SynthesisError> {
        self.pattern.as_ref().and_then(|pattern| pattern.as_ref().err())
    }

    /// Plot title reporting the wavelength to two decimals.
    pub fn title(&self) -> String {
        match (&self.solution, &self.pattern) {
            (Err(_), _) => format!("{TITLE_PREFIX} (invalid parameters or calculation error)"),
            (Ok(_), Some(Err(_))) => format!("{TITLE_PREFIX} (plot error)"),
            (Ok(solved), _) => format!(
                "{TITLE_PREFIX} (λ = {:.2} nm)",
                solved.results.wavelength_nm
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_solve_skips_synthesis() {
        let params = InputParameters {
            x2: 10.0,
            ..InputParameters::default()
        };
        let outcome = calculate(params, &SynthesisOpts::default());
        assert!(outcome.pattern.is_none());
        assert!(outcome.title().contains("invalid parameters"));
    }

    #[test]
    fn bad_options_only_break_the_image() {
        let opts = SynthesisOpts {
            columns: 1,
            ..SynthesisOpts::default()
        };
        let outcome = calculate(InputParameters::default(), &opts);
        assert!(outcome.is_solved());
        assert!(outcome.synthesis_error().is_some());
        assert!(outcome.title().ends_with("(plot error)"));
    }
}
