use taskboard_cli::datastore::FileStore;
use taskboard_core::KeyValueStore;
use tempfile::tempdir;

#[test]
fn set_get_remove_roundtrip() {
    let temp = tempdir().expect("tempdir");
    let mut store = FileStore::open(&temp.path().join("nested")).expect("open store");

    assert_eq!(store.get("taskMeta").unwrap(), None);

    store.set("taskMeta", r#"{"1":{"priority":"high"}}"#).unwrap();
    assert_eq!(
        store.get("taskMeta").unwrap().as_deref(),
        Some(r#"{"1":{"priority":"high"}}"#)
    );
    assert!(temp.path().join("nested/taskMeta.json").exists());

    store.set("taskMeta", "{}").unwrap();
    assert_eq!(store.get("taskMeta").unwrap().as_deref(), Some("{}"));

    store.remove("taskMeta").unwrap();
    assert_eq!(store.get("taskMeta").unwrap(), None);
    store.remove("taskMeta").expect("removing a missing key is fine");
}

#[test]
fn keys_cannot_escape_the_data_dir() {
    let temp = tempdir().expect("tempdir");
    let mut store = FileStore::open(temp.path()).unwrap();

    assert!(store.set("../outside", "x").is_err());
    assert!(store.get("a/b").is_err());
    assert!(store.path_for("").is_err());
    assert!(store.path_for("demoTasks").is_ok());
}
