//! libvlc version resolution from the version header.

use std::path::{Path, PathBuf};

use bnd_ctypes::extract::SourceFile;
use bnd_ctypes::version::{bindings_version, resolve_version, version_from_macros};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../tests/fixtures/parser")
        .join(name)
}

#[test]
fn three_part_version() {
    let src = SourceFile::read(&fixture("libvlc_version_without_extra.h")).unwrap();
    assert_eq!(version_from_macros(&src).as_deref(), Some("3.0.16"));
}

#[test]
fn extra_component_inside_include_guard() {
    let path = fixture("libvlc_version_with_extra.h");
    let src = SourceFile::read(&path).unwrap();
    assert_eq!(resolve_version(&src, &path).as_deref(), Some("4.2.14.3"));
}

#[test]
fn unknown_without_macros_or_git() {
    let dir = tempfile::tempdir().unwrap();
    let header_dir = dir.path().join("include").join("vlc");
    std::fs::create_dir_all(&header_dir).unwrap();
    let header = header_dir.join("vlc.h");
    std::fs::write(&header, "int x;\n").unwrap();

    let src = SourceFile::parse(header_dir.join("libvlc_version.h"), "/* empty */\n").unwrap();
    assert_eq!(resolve_version(&src, &header), None);
    assert_eq!(bindings_version(None), "N/A109");
}

#[test]
fn bindings_version_appends_generator_version() {
    assert_eq!(bindings_version(Some("3.0.16")), "3.0.16109");
    assert_eq!(bindings_version(Some("4.2.14.3")), "4.2.14.3109");
}
