use biprism_core::{InputParameters, ParamKey};
use biprism_store::{JsonFileStore, LoadSource, MemoryStore, ParameterStore};
use tempfile::tempdir;

fn bench_readings() -> InputParameters {
    InputParameters {
        x1: 12.5,
        x2: 41.2,
        x3: 118.0,
        p1: 0.125,
        p2: 1.0625,
        x4: 4.73,
        x5: 17.019,
        slit_width: 0.0375,
    }
}

#[test]
fn file_roundtrip_reproduces_every_value() {
    let dir = tempdir().expect("tempdir");
    let mut store = JsonFileStore::new(dir.path().join("fresnel_params.json"));
    let params = bench_readings();

    let report = store.save(&params).expect("save");
    assert!(report.replaced.is_empty());

    let loaded = store.load();
    assert_eq!(loaded.source, LoadSource::Stored);
    assert_eq!(loaded.params, params);
    assert_eq!(loaded.loaded, ParamKey::ALL.to_vec());
    assert!(loaded.invalid.is_empty() && loaded.missing.is_empty());
}

#[test]
fn missing_file_yields_defaults() {
    let dir = tempdir().expect("tempdir");
    let store = JsonFileStore::new(dir.path().join("absent.json"));
    let loaded = store.load();
    assert_eq!(loaded.source, LoadSource::Missing);
    assert_eq!(loaded.params, InputParameters::default());
}

#[test]
fn saved_file_is_a_flat_object_with_four_space_indent() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("params.json");
    let mut store = JsonFileStore::new(&path);
    store.save(&InputParameters::default()).expect("save");

    let text = std::fs::read_to_string(&path).expect("read back");
    assert!(text.starts_with("{\n    \"x1\": 10.0,"));
    let value: serde_json::Value = serde_json::from_str(&text).expect("json");
    let object = value.as_object().expect("object root");
    assert_eq!(object.len(), 8);
    for key in ParamKey::ALL {
        assert!(object[key.name()].is_number(), "{key} stored as number");
    }
}

#[test]
fn non_finite_values_are_replaced_before_writing() {
    let mut store = MemoryStore::default();
    let params = InputParameters {
        x4: f64::NAN,
        slit_width: f64::INFINITY,
        ..InputParameters::default()
    };
    let report = store.save(&params).expect("save");
    assert_eq!(report.replaced, vec![ParamKey::X4, ParamKey::SlitWidth]);
    assert_eq!(report.written.x4, 5.0);
    assert_eq!(report.written.slit_width, 0.05);

    let loaded = store.load();
    assert_eq!(loaded.params, InputParameters::default());
}

#[test]
fn memory_store_matches_file_store_text() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("params.json");
    let mut file = JsonFileStore::new(&path);
    let mut memory = MemoryStore::default();
    let params = bench_readings();

    file.save(&params).expect("file save");
    memory.save(&params).expect("memory save");
    let on_disk = std::fs::read_to_string(&path).expect("read back");
    assert_eq!(memory.text(), Some(on_disk.as_str()));
}
