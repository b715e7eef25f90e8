//! Configuration types for `bnd-ctypes.toml`.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Root configuration.
#[derive(Debug, Deserialize)]
pub struct Config {
    pub input: InputConfig,
    pub templates: TemplateConfig,
    #[serde(default)]
    pub output: OutputConfig,
    /// Pinned libvlc version. Skips header and git resolution.
    #[serde(default)]
    pub version: Option<String>,
    /// Pinned build timestamp, for reproducible output.
    #[serde(default)]
    pub build_date: Option<String>,
}

/// Headers to parse.
#[derive(Debug, Deserialize)]
pub struct InputConfig {
    /// Public-API header. Must already be preprocessed unless
    /// `preprocessor` is set.
    pub header: PathBuf,
    /// Header defining the `LIBVLC_VERSION_*` macros.
    pub version_header: PathBuf,
    /// Command run with the header path appended; its stdout is parsed
    /// instead of the header itself (e.g. `["cc", "-E", "-C", "-P"]`).
    #[serde(default)]
    pub preprocessor: Option<Vec<String>>,
}

/// Python text spliced around the generated code.
#[derive(Debug, Deserialize)]
pub struct TemplateConfig {
    pub header: PathBuf,
    pub footer: PathBuf,
    /// Hand-written wrapper class bodies.
    #[serde(rename = "override", default)]
    pub overrides: Option<PathBuf>,
}

/// Output file settings.
#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_file")]
    pub file: PathBuf,
    /// Formatter run on the written file, with its path appended.
    #[serde(default)]
    pub formatter: Option<Vec<String>>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file: default_output_file(),
            formatter: None,
        }
    }
}

fn default_output_file() -> PathBuf {
    PathBuf::from("vlc.py")
}

/// Resolve `path` against `base_dir` (the TOML file's directory).
/// Absolute paths are returned as-is.
pub fn resolve_path(path: &Path, base_dir: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

/// Load and parse a `bnd-ctypes.toml` configuration file.
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read config file {}: {}", path.display(), e))?;
    let config: Config = toml::from_str(&content)
        .map_err(|e| anyhow::anyhow!("failed to parse config file {}: {}", path.display(), e))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_and_renamed_override() {
        let cfg: Config = toml::from_str(
            r#"
            [input]
            header = "vlc.i"
            version_header = "libvlc_version.h"

            [templates]
            header = "header.py"
            footer = "footer.py"
            override = "override.py"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.output.file, PathBuf::from("vlc.py"));
        assert!(cfg.output.formatter.is_none());
        assert!(cfg.input.preprocessor.is_none());
        assert_eq!(cfg.templates.overrides, Some(PathBuf::from("override.py")));
        assert_eq!(cfg.version, None);
    }

    #[test]
    fn relative_paths_resolve_against_base_dir() {
        let base = Path::new("/cfg");
        assert_eq!(resolve_path(Path::new("a/b.h"), base), PathBuf::from("/cfg/a/b.h"));
        assert_eq!(resolve_path(Path::new("/abs.h"), base), PathBuf::from("/abs.h"));
    }
}
