//! Layout discovery and loading against throwaway directories.

use panescript::loader::{
    list_layouts, load_document, load_settings_from, resolve_layout_path, LOCAL_LAYOUT,
};
use panescript::script::ScriptAssembler;
use panescript::{AddressingMode, PanescriptError};
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn write(path: &PathBuf, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

#[test]
fn prefers_first_directory() {
    let home = tempdir().unwrap();
    let dirs = vec![home.path().join(".panescript"), home.path().join(".teamocil")];
    write(&dirs[0].join("dev.yml"), "windows: []\n");
    write(&dirs[1].join("dev.yml"), "windows: []\n");

    let path = resolve_layout_path(Some("dev"), false, home.path(), &dirs).unwrap();
    assert_eq!(path, dirs[0].join("dev.yml"));
}

#[test]
fn falls_back_to_teamocil_directory() {
    let home = tempdir().unwrap();
    let dirs = vec![home.path().join(".panescript"), home.path().join(".teamocil")];
    write(&dirs[1].join("ops.yml"), "windows: []\n");

    let path = resolve_layout_path(Some("ops"), false, home.path(), &dirs).unwrap();
    assert_eq!(path, dirs[1].join("ops.yml"));

    // Unknown names still resolve, so --edit can create them.
    let new = resolve_layout_path(Some("fresh"), false, home.path(), &dirs).unwrap();
    assert_eq!(new, dirs[1].join("fresh.yml"));
}

#[test]
fn name_is_sanitized() {
    let home = tempdir().unwrap();
    let dirs = vec![home.path().join(".panescript")];
    fs::create_dir_all(&dirs[0]).unwrap();

    let path = resolve_layout_path(Some("de;v$"), false, home.path(), &dirs).unwrap();
    assert_eq!(path, dirs[0].join("dev.yml"));
}

#[test]
fn no_layout_directories() {
    let home = tempdir().unwrap();
    let dirs = vec![home.path().join(".panescript"), home.path().join(".teamocil")];
    let err = resolve_layout_path(Some("dev"), false, home.path(), &dirs).unwrap_err();
    assert!(matches!(err, PanescriptError::NoLayoutDir));
}

#[test]
fn local_layout_without_name() {
    let cwd = tempdir().unwrap();
    let err = resolve_layout_path(None, false, cwd.path(), &[]).unwrap_err();
    assert!(matches!(err, PanescriptError::NoLayoutSpecified));

    let local = cwd.path().join(LOCAL_LAYOUT);
    write(&local, "windows: []\n");
    assert_eq!(resolve_layout_path(None, false, cwd.path(), &[]).unwrap(), local);
}

#[test]
fn layout_flag_reads_relative_file() {
    let cwd = tempdir().unwrap();
    let path = resolve_layout_path(Some("work/site.yml"), true, cwd.path(), &[]).unwrap();
    assert_eq!(path, cwd.path().join("work/site.yml"));
}

#[test]
fn lists_only_yml_files_sorted() {
    let home = tempdir().unwrap();
    let dir = home.path().join(".panescript");
    write(&dir.join("zeta.yml"), "");
    write(&dir.join("alpha.yml"), "");
    write(&dir.join("notes.txt"), "");

    let listings = list_layouts(&[dir.clone(), home.path().join(".teamocil")]).unwrap();
    assert_eq!(listings, vec![(dir, vec!["alpha".to_string(), "zeta".to_string()])]);
}

#[test]
fn document_without_windows_is_rejected() {
    let home = tempdir().unwrap();
    let path = home.path().join("empty.yml");
    write(&path, "pre: echo hi\n");

    let document = load_document(&path).unwrap();
    let err = ScriptAssembler::new(AddressingMode::Direct)
        .assemble(&document, &path)
        .unwrap_err();
    assert!(matches!(&err, PanescriptError::MissingWindows(p) if p == &path));
    assert!(err.to_string().contains("empty.yml"));
}

#[test]
fn missing_document() {
    let home = tempdir().unwrap();
    let err = load_document(&home.path().join("nope.yml")).unwrap_err();
    assert!(matches!(err, PanescriptError::LayoutNotFound(_)));
}

#[test]
fn malformed_document() {
    let home = tempdir().unwrap();
    let path = home.path().join("bad.yml");
    write(&path, "windows: [unclosed\n");
    assert!(matches!(load_document(&path), Err(PanescriptError::Yaml(_))));
}

#[test]
fn settings_file() {
    let home = tempdir().unwrap();
    let path = home.path().join("config.toml");
    write(&path, "[defaults]\nlayout = \"even-vertical\"\nmode = \"direct\"\n");

    let settings = load_settings_from(&path).unwrap();
    assert_eq!(settings.default_layout(), "even-vertical");
    assert_eq!(settings.defaults.mode, Some(AddressingMode::Direct));
}
