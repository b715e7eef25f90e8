//! libvlc version resolution.

use std::path::Path;
use std::process::Command;

use tracing::{debug, info};

use crate::extract::SourceFile;
use crate::tables::GENERATOR_VERSION;

/// Version from the `LIBVLC_VERSION_*` macros, falling back to
/// `git describe` on the source tree the header lives in. `None` when
/// neither works.
pub fn resolve_version(version_header: &SourceFile, header_path: &Path) -> Option<String> {
    if let Some(v) = version_from_macros(version_header) {
        info!(version = %v, "libvlc version from header");
        return Some(v);
    }
    let v = version_from_git(header_path);
    match &v {
        Some(v) => info!(version = %v, "libvlc version from git"),
        None => info!("libvlc version unknown"),
    }
    v
}

/// Join `MAJOR.MINOR.REVISION[.EXTRA]`. `EXTRA` is left out when it is
/// `0` or empty; a missing component makes the whole version unknown.
pub fn version_from_macros(src: &SourceFile) -> Option<String> {
    let mut major = None;
    let mut minor = None;
    let mut revision = None;
    let mut extra = None;

    let root = src.root();
    let mut cursor = root.walk();
    let mut stack: Vec<_> = root.children(&mut cursor).collect();
    while let Some(node) = stack.pop() {
        if node.kind() != "preproc_def" {
            // Version macros may sit inside an include guard.
            if node.kind().starts_with("preproc_if") {
                let mut inner = node.walk();
                stack.extend(node.children(&mut inner));
            }
            continue;
        }
        let Some(name) = node.child_by_field_name("name") else {
            continue;
        };
        let value = node
            .child_by_field_name("value")
            .map(|v| {
                src.text_of(v)
                    .trim()
                    .trim_start_matches('(')
                    .trim_end_matches(')')
                    .trim()
                    .to_string()
            })
            .unwrap_or_default();
        match src.text_of(name) {
            "LIBVLC_VERSION_MAJOR" => major = Some(value),
            "LIBVLC_VERSION_MINOR" => minor = Some(value),
            "LIBVLC_VERSION_REVISION" => revision = Some(value),
            "LIBVLC_VERSION_EXTRA" => extra = Some(value),
            _ => {}
        }
    }

    let mut version = format!("{}.{}.{}", major?, minor?, revision?);
    if let Some(extra) = extra.filter(|e| !e.is_empty() && e != "0") {
        version.push('.');
        version.push_str(&extra);
    }
    Some(version)
}

/// `git describe` in the repository two levels above the header's
/// directory (`<root>/include/vlc/vlc.h` → `<root>/.git`).
fn version_from_git(header_path: &Path) -> Option<String> {
    let absolute = std::path::absolute(header_path).ok()?;
    let git_dir = absolute.ancestors().nth(3)?.join(".git");
    if !git_dir.is_dir() {
        return None;
    }
    let output = Command::new("git")
        .arg(format!("--git-dir={}", git_dir.display()))
        .arg("describe")
        .output()
        .ok()?;
    if !output.status.success() {
        debug!(status = %output.status, "git describe failed");
        return None;
    }
    let v = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!v.is_empty()).then_some(v)
}

/// Bindings version: the libvlc version followed by the generator's major
/// digit and two-digit minor, e.g. `3.0.16` → `3.0.16109`.
pub fn bindings_version(libvlc: Option<&str>) -> String {
    let (major, minor) = GENERATOR_VERSION
        .split_once('.')
        .unwrap_or((GENERATOR_VERSION, "0"));
    let major: u32 = major.parse().unwrap_or(0);
    let minor: u32 = minor.parse().unwrap_or(0);
    format!("{}{major}{minor:02}", libvlc.unwrap_or("N/A"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bindings_version_appends_generator_version() {
        assert_eq!(bindings_version(Some("3.0.16")), "3.0.16109");
        assert_eq!(bindings_version(None), "N/A109");
    }

    #[test]
    fn extra_zero_is_omitted() {
        let src = SourceFile::parse(
            "libvlc_version.h",
            "#define LIBVLC_VERSION_MAJOR (4)\n\
             #define LIBVLC_VERSION_MINOR (0)\n\
             #define LIBVLC_VERSION_REVISION (1)\n\
             #define LIBVLC_VERSION_EXTRA (0)\n",
        )
        .unwrap();
        assert_eq!(version_from_macros(&src).as_deref(), Some("4.0.1"));
    }

    #[test]
    fn incomplete_macros_give_no_version() {
        let src = SourceFile::parse("v.h", "#define LIBVLC_VERSION_MAJOR 3\n").unwrap();
        assert_eq!(version_from_macros(&src), None);
    }
}
