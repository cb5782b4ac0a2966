use biprism_core::{InputParameters, SynthesisOpts};
use biprism_view::{calculate, Frontend, TextPanel};

fn render(params: InputParameters) -> String {
    let outcome = calculate(params, &SynthesisOpts::default());
    let mut panel = TextPanel::new(Vec::new());
    panel.present(&outcome).expect("present");
    String::from_utf8(panel.into_inner()).expect("utf8")
}

#[test]
fn default_bench_fills_every_cell() {
    let text = render(InputParameters::default());
    for expected in ["30.0", "70.0", "100.0", "0.800", "0.343", "1.094", "375.09"] {
        assert!(text.contains(expected), "missing {expected} in\n{text}");
    }
    assert!(!text.contains("--"));
    assert!(text.contains("note: "));
    assert!(!text.contains("warning: "));
    assert!(text.trim_end().ends_with("Simulated interference pattern (λ = 375.09 nm)"));
}

#[test]
fn inputs_use_their_display_precision() {
    let text = render(InputParameters::default());
    assert!(text.contains("slit position x1 (cm)"));
    assert!(text.contains("15.940"));
    assert!(text.contains("0.050"));
}

#[test]
fn failed_solve_shows_placeholders_and_the_error() {
    let params = InputParameters {
        p2: 0.0,
        ..InputParameters::default()
    };
    let text = render(params);
    assert_eq!(text.matches("--").count(), 7);
    assert!(text.contains("error: real image positions P1 (0.000) and P2 (0.000) mm must differ"));
    assert!(text.contains("(invalid parameters or calculation error)"));
}
