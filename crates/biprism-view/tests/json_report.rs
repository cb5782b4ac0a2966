use biprism_core::{InputParameters, SynthesisOpts};
use biprism_view::{build_report, calculate, Frontend, JsonReport, ReportOpts, REPORT_SCHEMA};
use serde_json::Value;

fn report_json(params: InputParameters, opts: ReportOpts) -> Value {
    let outcome = calculate(params, &SynthesisOpts::default());
    let mut report = JsonReport::new(opts, Vec::new());
    report.present(&outcome).expect("present");
    serde_json::from_slice(&report.into_inner()).expect("json line")
}

#[test]
fn successful_report_carries_results_and_summary() {
    let value = report_json(InputParameters::default(), ReportOpts::default());
    assert_eq!(value["schema"]["major"], 1);
    assert_eq!(value["results"]["D_cm"], 100.0);
    assert_eq!(value["formatted"]["wavelength_nm"], "375.09");
    assert_eq!(value["formatted"]["d_mm"], "0.343");
    assert_eq!(value["formatted"]["D_cm"], "100.0");
    assert_eq!(value["formatted"].as_object().map(|m| m.len()), Some(7));
    assert_eq!(value["advisories"][0]["kind"], "outside_visible_range");
    assert_eq!(value["pattern"]["columns"], 1000);
    assert_eq!(value["pattern"]["rows"], 200);
    assert!(value["pattern"].get("profile").is_none());
    assert!(value.get("error").is_none());
    assert_eq!(value["provenance"]["input_hash"].as_str().map(str::len), Some(64));
    assert!(value["provenance"]["tool_versions"]["biprism-view"].is_string());
}

#[test]
fn profile_is_embedded_on_request() {
    let opts = ReportOpts {
        include_profile: true,
        ..ReportOpts::default()
    };
    let value = report_json(InputParameters::default(), opts);
    assert_eq!(value["pattern"]["profile"].as_array().map(Vec::len), Some(1000));
}

#[test]
fn failed_report_carries_error_info() {
    let params = InputParameters {
        x5: 4.0,
        ..InputParameters::default()
    };
    let value = report_json(params, ReportOpts::default());
    assert_eq!(value["error"]["code"], "fringe-ordering");
    assert!(value.get("results").is_none());
    assert!(value.get("formatted").is_none());
    assert!(value.get("pattern").is_none());
}

#[test]
fn input_hash_tracks_the_readings() {
    let opts = SynthesisOpts::default();
    let a = build_report(&calculate(InputParameters::default(), &opts), &ReportOpts::default())
        .expect("report");
    let b = build_report(&calculate(InputParameters::default(), &opts), &ReportOpts::default())
        .expect("report");
    let edited = InputParameters {
        x4: 5.5,
        ..InputParameters::default()
    };
    let c = build_report(&calculate(edited, &opts), &ReportOpts::default()).expect("report");
    assert_eq!(a, b);
    assert_eq!(a.schema, REPORT_SCHEMA);
    assert_ne!(a.provenance.input_hash, c.provenance.input_hash);
    assert_eq!(a.provenance.options_hash, c.provenance.options_hash);
}
