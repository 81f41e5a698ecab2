use scriptmap::{MappingConfig, MappingStore, ScriptFile, ScriptMapError};
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn foo_mapping_survives_a_new_store_instance() {
    init_logger();
    let dir = tempdir().expect("tempdir");

    let mut store = MappingStore::new(dir.path());
    assert_eq!(store.lookup("Foo").expect("lookup"), None);

    store
        .record(&ScriptFile::new("Foo", "/tmp/foo.gradle"))
        .expect("record");
    let contents = fs::read_to_string(store.mapping_file()).expect("mapping file written");
    assert!(contents.starts_with("# Autogenerated.  Do not edit.\n"));
    assert!(contents.lines().any(|line| line == "Foo=/tmp/foo.gradle"));

    let mut reopened = MappingStore::new(dir.path());
    assert_eq!(
        reopened.lookup("Foo").expect("lookup"),
        Some(PathBuf::from("/tmp/foo.gradle"))
    );
}

#[test]
fn lookup_under_missing_root_finds_nothing() {
    let dir = tempdir().expect("tempdir");
    let mut store = MappingStore::new(dir.path().join("does").join("not").join("exist"));

    assert_eq!(store.lookup("Anything").expect("lookup"), None);
    assert_eq!(store.lookup("Else").expect("lookup"), None);
    assert!(!dir.path().join("does").exists());
}

#[test]
fn empty_class_name_is_an_invalid_argument() {
    let dir = tempdir().expect("tempdir");
    let mut store = MappingStore::new(dir.path());

    let err = store.lookup("").expect_err("empty key must be rejected");
    assert!(matches!(err, ScriptMapError::InvalidArgument(_)));
    assert!(err.to_string().contains("Invalid argument"));
}

#[test]
fn other_instances_see_external_changes() {
    init_logger();
    let dir = tempdir().expect("tempdir");

    let mut first = MappingStore::new(dir.path());
    first
        .record(&ScriptFile::new("A", "/x"))
        .expect("record");
    assert_eq!(first.lookup("A").expect("lookup"), Some(PathBuf::from("/x")));

    let mut second = MappingStore::new(dir.path());
    second
        .record(&ScriptFile::new("A", "/somewhere/else.gradle"))
        .expect("record");

    assert_eq!(
        first.lookup("A").expect("lookup"),
        Some(PathBuf::from("/somewhere/else.gradle"))
    );
}

#[test]
fn hand_edited_file_is_picked_up() {
    let dir = tempdir().expect("tempdir");
    let mut store = MappingStore::new(dir.path());
    store
        .record(&ScriptFile::new("A", "/x"))
        .expect("record");

    fs::write(
        store.mapping_file(),
        "# edited by hand\nA = /edited/path.gradle\nB:/b.gradle\n",
    )
    .expect("rewrite mapping file");

    assert_eq!(
        store.lookup("A").expect("lookup"),
        Some(PathBuf::from("/edited/path.gradle"))
    );
    assert_eq!(
        store.lookup("B").expect("lookup"),
        Some(PathBuf::from("/b.gradle"))
    );
}

#[test]
fn deleted_file_empties_the_mapping() {
    let dir = tempdir().expect("tempdir");
    let mut store = MappingStore::new(dir.path());
    store
        .record(&ScriptFile::new("A", "/x.gradle"))
        .expect("record");
    assert_eq!(
        store.lookup("A").expect("lookup"),
        Some(PathBuf::from("/x.gradle"))
    );

    fs::remove_file(store.mapping_file()).expect("remove mapping file");

    assert_eq!(store.lookup("A").expect("lookup"), None);
}

#[test]
fn in_memory_script_leaves_existing_mapping_alone() {
    let dir = tempdir().expect("tempdir");
    let mut store = MappingStore::new(dir.path());
    store
        .record(&ScriptFile::new("C", "/c.gradle"))
        .expect("record");
    let before = fs::read(store.mapping_file()).expect("read mapping file");

    store
        .record(&ScriptFile::in_memory("C"))
        .expect("record");

    assert_eq!(fs::read(store.mapping_file()).expect("read mapping file"), before);
    assert_eq!(
        store.lookup("C").expect("lookup"),
        Some(PathBuf::from("/c.gradle"))
    );
}

#[test]
fn awkward_names_and_paths_round_trip_through_disk() {
    let dir = tempdir().expect("tempdir");
    let pairs = [
        ("script with spaces", "/home/user/my project/build.gradle"),
        ("s=1:2#3!4", "/srv/caf\u{e9}/\u{65e5}\u{672c}/init.gradle"),
        ("emoji_\u{1F600}", "/tmp/ tab\there.gradle"),
    ];

    let mut store = MappingStore::new(dir.path());
    for (class_name, path) in pairs {
        store
            .record(&ScriptFile::new(class_name, path))
            .expect("record");
    }
    assert!(fs::read(store.mapping_file()).expect("read").is_ascii());

    let mut reopened = MappingStore::new(dir.path());
    for (class_name, path) in pairs {
        assert_eq!(
            reopened.lookup(class_name).expect("lookup"),
            Some(PathBuf::from(path))
        );
    }
}

#[test]
fn custom_layout_is_honoured() {
    let dir = tempdir().expect("tempdir");
    let config = MappingConfig {
        tmp_dir_name: "tmp".to_string(),
        file_name: "scripts.properties".to_string(),
    };

    let mut store = MappingStore::with_config(dir.path(), &config);
    store
        .record(&ScriptFile::new("D", "/d.gradle"))
        .expect("record");

    assert!(dir.path().join("tmp").join("scripts.properties").is_file());
    assert!(!dir.path().join(".gradle").exists());
}
