use catalogapp::api::CatalogApi;
use catalogapp::error::ErrorKind;
use catalogapp::model::{NewFeature, NewResource};
use catalogapp::store::backend::StorageBackend;
use catalogapp::store::catalog_store::CatalogStore;
use catalogapp::store::fs_backend::FsBackend;
use catalogapp::store::{DataStore, Tables};
use catalogapp::values::{ValueSlots, ValueType};
use std::fs;
use tempfile::TempDir;

fn setup() -> (TempDir, FsBackend) {
    let dir = TempDir::new().unwrap();
    let backend = FsBackend::new(dir.path().to_path_buf());
    (dir, backend)
}

#[test]
fn test_missing_file_is_empty_catalog() {
    let (_dir, backend) = setup();
    assert!(backend.load_tables().unwrap().is_empty());
}

#[test]
fn test_blank_file_is_empty_catalog() {
    let (dir, backend) = setup();
    fs::write(dir.path().join("catalog.json"), "  \n").unwrap();
    assert!(backend.load_tables().unwrap().is_empty());
}

#[test]
fn test_creates_missing_data_dir() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("deep").join("catalog");
    let backend = FsBackend::new(nested.clone());

    backend.save_tables(&Tables::default()).unwrap();
    assert!(nested.join("catalog.json").exists());
}

#[test]
fn test_atomic_write_leaves_no_tmp_files() {
    let (dir, backend) = setup();
    let store = CatalogStore::with_backend(backend);
    let api = CatalogApi::new(store);
    api.create_category("Lab").unwrap();
    api.create_category("Audio").unwrap();

    for entry in fs::read_dir(dir.path()).unwrap() {
        let path = entry.unwrap().path();
        let name = path.file_name().unwrap().to_str().unwrap().to_string();
        assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
    }
}

#[test]
fn test_catalog_survives_reopen() {
    let (dir, backend) = setup();
    let api = CatalogApi::new(CatalogStore::with_backend(backend));

    let lab = api.create_category("Lab").unwrap();
    let ram = api
        .create_feature(NewFeature::new("RAM", ValueType::Number, lab.id))
        .unwrap();
    let laptop = api
        .create_resource(NewResource::new("Laptop", 20, lab.id))
        .unwrap();
    let value = api
        .create_feature_value(laptop.id, ram.id, ValueSlots::number(16.0))
        .unwrap();

    let reopened = CatalogApi::new(CatalogStore::with_backend(FsBackend::new(
        dir.path().to_path_buf(),
    )));
    let loaded = reopened.get_feature_value(value.id).unwrap();
    assert_eq!(loaded.value.as_number(), Some(16.0));
    assert_eq!(reopened.get_feature(ram.id).unwrap().value_type, ValueType::Number);
    assert_eq!(reopened.get_resource(laptop.id).unwrap().quantity, 20);
}

#[test]
fn test_snapshot_file_format() {
    let (dir, backend) = setup();
    let api = CatalogApi::new(CatalogStore::with_backend(backend));
    let lab = api.create_category("Lab").unwrap();
    let flag = api
        .create_feature(NewFeature::new("Calibrated", ValueType::Boolean, lab.id))
        .unwrap();

    let raw = fs::read_to_string(dir.path().join("catalog.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();

    let lab_json = &json["categories"][lab.id.to_string()];
    assert_eq!(lab_json["name"], "Lab");
    let flag_json = &json["features"][flag.id.to_string()];
    assert_eq!(flag_json["type"], "BOOLEAN");
    assert_eq!(flag_json["categoryId"], lab.id.to_string());
    assert!(json["featureValues"].as_object().unwrap().is_empty());
}

#[test]
fn test_custom_file_name() {
    let dir = TempDir::new().unwrap();
    let backend = FsBackend::new(dir.path().to_path_buf()).with_file_name("inventory");
    assert_eq!(backend.data_path(), dir.path().join("inventory.json"));

    let store = CatalogStore::with_backend(backend);
    store.transact(|_| Ok(())).unwrap();
    assert!(dir.path().join("inventory.json").exists());
    assert!(!dir.path().join("catalog.json").exists());
}

#[test]
fn test_corrupt_file_is_storage_error() {
    let (dir, backend) = setup();
    fs::write(dir.path().join("catalog.json"), "{ not json").unwrap();

    let api = CatalogApi::new(CatalogStore::with_backend(backend));
    let err = api.list_categories().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Storage);

    // Writes fail too and the file is left as it was
    assert_eq!(
        api.create_category("Lab").unwrap_err().kind(),
        ErrorKind::Storage
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("catalog.json")).unwrap(),
        "{ not json"
    );
}

#[test]
fn test_writes_hold_the_lock_file() {
    let (dir, backend) = setup();
    let lock_path = backend.lock_path();
    assert_eq!(lock_path, dir.path().join(".catalog.json.lock"));

    let held = backend.lock().unwrap().unwrap();
    let store = CatalogStore::with_backend(FsBackend::new(dir.path().to_path_buf()));
    std::thread::scope(|s| {
        let writer = s.spawn(|| store.transact(|_| Ok(())).unwrap());
        std::thread::sleep(std::time::Duration::from_millis(50));
        // Blocked behind the held lock, so nothing written yet
        assert!(!dir.path().join("catalog.json").exists());
        drop(held);
        writer.join().unwrap();
    });

    assert!(dir.path().join("catalog.json").exists());
    assert!(lock_path.exists());
}
