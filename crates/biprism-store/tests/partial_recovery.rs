use biprism_core::{InputParameters, ParamKey};
use biprism_store::{decode_parameters, JsonFileStore, LoadSource, MemoryStore, ParameterStore};
use serde_json::json;

#[test]
fn corrupted_keys_fall_back_independently() {
    let record = json!({
        "x1": 12.0,
        "x2": "oops",
        "x3": "105.5",
        "P1": null,
        "P2": 0.9,
        "x4": true,
        "x5": [15.0],
        "slit_width": 0.07,
        "lambda": 589.0
    });
    let report = decode_parameters(&record);

    assert_eq!(report.source, LoadSource::Stored);
    let expected = InputParameters {
        x1: 12.0,
        x3: 105.5,
        p2: 0.9,
        slit_width: 0.07,
        ..InputParameters::default()
    };
    assert_eq!(report.params, expected);
    let invalid: Vec<ParamKey> = report.invalid.iter().map(|(key, _)| *key).collect();
    assert_eq!(
        invalid,
        vec![ParamKey::X2, ParamKey::P1, ParamKey::X4, ParamKey::X5]
    );
    assert_eq!(report.invalid[0].1, "\"oops\"");
    assert_eq!(report.ignored, vec!["lambda".to_string()]);
    assert!(report.missing.is_empty());
}

#[test]
fn absent_keys_are_listed_as_missing() {
    let store = MemoryStore::with_text(r#"{"x1": 11.0, "P2": 1.2}"#);
    let report = store.load();
    assert_eq!(report.params.x1, 11.0);
    assert_eq!(report.params.p2, 1.2);
    assert_eq!(report.params.x5, ParamKey::X5.default_value());
    assert_eq!(report.loaded, vec![ParamKey::X1, ParamKey::P2]);
    assert_eq!(report.missing.len(), 6);
}

#[test]
fn unparsable_text_is_a_whole_record_fallback() {
    let store = MemoryStore::with_text("{\"x1\": 10.0,");
    let report = store.load();
    assert!(matches!(report.source, LoadSource::Corrupt(_)));
    assert_eq!(report.params, InputParameters::default());
}

#[test]
fn non_numeric_strings_do_not_disturb_neighbours() {
    let mut store = MemoryStore::default();
    store.save(&InputParameters::default()).expect("save");
    let corrupted = store
        .text()
        .expect("saved text")
        .replace("15.94", "\"fifteen\"");
    store.set_text(corrupted);

    let report = store.load();
    assert_eq!(report.invalid.len(), 1);
    assert_eq!(report.invalid[0].0, ParamKey::X5);
    assert_eq!(report.params, InputParameters::default());
    assert_eq!(report.loaded.len(), 7);
}

#[test]
fn unreadable_path_is_corrupt_not_fatal() {
    let dir = tempfile::tempdir().expect("tempdir");
    // A directory exists at the path but cannot be read as a file.
    let store = JsonFileStore::new(dir.path());
    let report = store.load();
    assert!(matches!(report.source, LoadSource::Corrupt(_)));
}
