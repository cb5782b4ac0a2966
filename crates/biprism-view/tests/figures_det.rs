use biprism_core::{InputParameters, SynthesisOpts};
use biprism_view::{calculate, FigureConfig, Frontend, SvgFigure};

fn small_opts() -> SynthesisOpts {
    SynthesisOpts {
        columns: 64,
        rows: 4,
        ..SynthesisOpts::default()
    }
}

fn svg_for(params: InputParameters, config: FigureConfig) -> String {
    let outcome = calculate(params, &small_opts());
    let mut figure = SvgFigure::new(config, Vec::new());
    figure.present(&outcome).expect("present");
    String::from_utf8(figure.into_inner()).expect("utf8")
}

#[test]
fn pattern_svg_is_deterministic() {
    let a = svg_for(InputParameters::default(), FigureConfig::default());
    let b = svg_for(InputParameters::default(), FigureConfig::default());
    assert_eq!(a, b);
    assert!(a.starts_with("<svg xmlns='http://www.w3.org/2000/svg' width='720' height='360'"));
    assert!(a.contains("λ = 375.09 nm"));
    assert_eq!(a.matches("fill='rgb(").count(), 64);
    assert!(a.contains("fill='rgb(255,255,255)'"));
}

#[test]
fn tick_count_and_colorbar_follow_config() {
    let config = FigureConfig {
        width: 400,
        height: 200,
        ticks: 3,
        colorbar: false,
    };
    let svg = svg_for(InputParameters::default(), config);
    assert!(svg.contains("width='400' height='200'"));
    assert!(svg.contains(">-6.0</text>"));
    assert!(svg.contains(">0.0</text>"));
    assert!(svg.contains(">6.0</text>"));
    assert!(!svg.contains("linearGradient"));

    let with_bar = svg_for(InputParameters::default(), FigureConfig::default());
    assert!(with_bar.contains("normalized intensity"));
}

#[test]
fn failure_renders_an_escaped_message() {
    let params = InputParameters {
        x1: 50.0,
        ..InputParameters::default()
    };
    let svg = svg_for(params, FigureConfig::default());
    assert!(!svg.contains("fill='rgb("));
    assert!(svg.contains("x1 (50.0) &lt; x2 (40.0) &lt; x3 (110.0)"));
}
