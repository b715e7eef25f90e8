//! bnd-ctypes: libvlc C header → Python ctypes binding generator.
//!
//! Parses the libvlc public header with tree-sitter into an intermediate
//! model, maps every C type to a ctypes expression and renders a complete
//! `vlc.py` module around hand-written header/footer templates.
//!
//! # Quick start
//!
//! Generate the module from a config (suitable for `build.rs`):
//!
//! ```no_run
//! use std::path::Path;
//!
//! // Reads config TOML, parses headers, writes vlc.py.
//! let (path, diagnostics) = bnd_ctypes::run(Path::new("bnd-ctypes.toml"), None).unwrap();
//! println!("{} with {} error(s)", path.display(), diagnostics.error_count());
//! ```
//!
//! Or get the module text without writing to disk:
//!
//! ```no_run
//! use std::path::Path;
//!
//! let generated = bnd_ctypes::generate(Path::new("bnd-ctypes.toml")).unwrap();
//! assert!(generated.module.contains("class Media(_Ctype):"));
//! ```

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result, bail};
use tracing::info;

pub mod comment;
pub mod config;
pub mod diagnostics;
pub mod emit;
pub mod eval;
pub mod extract;
pub mod model;
pub mod naming;
pub mod overrides;
pub mod python;
pub mod tables;
pub mod types;
pub mod version;

use diagnostics::{DiagnosticKind, Diagnostics};
use emit::{Emitter, Templates};
use extract::SourceFile;
use model::{Field, Parsed};
use overrides::Overrides;
use types::TypeMap;

/// Generated module text and everything reported while producing it.
#[derive(Debug)]
pub struct Generated {
    pub module: String,
    pub diagnostics: Diagnostics,
}

/// Run the full pipeline: load config, parse the headers, emit the module,
/// write it and run the configured formatter.
///
/// `output` optionally overrides the output file path from the config.
///
/// Returns the path written to, with the diagnostics of the run.
pub fn run(config_path: &Path, output: Option<&Path>) -> Result<(PathBuf, Diagnostics)> {
    let cfg = config::load_config(config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?;

    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));

    let generated = generate_from_config(&cfg, base_dir)?;

    let output_path = match output {
        Some(p) => p.to_path_buf(),
        None => config::resolve_path(&cfg.output.file, base_dir),
    };
    if let Some(parent) = output_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    std::fs::write(&output_path, &generated.module)
        .with_context(|| format!("writing output to {}", output_path.display()))?;

    info!(
        path = %output_path.display(),
        size = generated.module.len(),
        "wrote module"
    );

    if let Some(formatter) = &cfg.output.formatter {
        run_formatter(formatter, &output_path)?;
    }

    Ok((output_path, generated.diagnostics))
}

/// Load a config, parse the headers it names and return the generated
/// module without writing to disk.
pub fn generate(config_path: &Path) -> Result<Generated> {
    let cfg = config::load_config(config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?;

    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));

    generate_from_config(&cfg, base_dir)
}

/// Generate the module from an already-loaded [`config::Config`].
///
/// `base_dir` is the directory relative to which paths in the config are
/// resolved (typically the parent directory of the TOML file).
pub fn generate_from_config(cfg: &config::Config, base_dir: &Path) -> Result<Generated> {
    let mut diagnostics = Diagnostics::new();
    let parsed = parse(cfg, base_dir, &mut diagnostics)?;
    let types = TypeMap::build(&parsed);
    let templates = load_templates(cfg, base_dir)?;

    let module = emit::emit_module(
        &parsed,
        &types,
        &templates,
        &build_date(cfg),
        &mut diagnostics,
    );
    info!(
        size = module.len(),
        errors = diagnostics.error_count(),
        "generated module"
    );

    Ok(Generated {
        module,
        diagnostics,
    })
}

/// Parse and run every consistency check without writing anything.
pub fn check(config_path: &Path) -> Result<Diagnostics> {
    let generated = generate(config_path)?;
    Ok(generated.diagnostics)
}

/// Log the parsed model, the type table, the override classes and the
/// doc-link tables.
pub fn dump(config_path: &Path) -> Result<Diagnostics> {
    let cfg = config::load_config(config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?;
    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));

    let mut diagnostics = Diagnostics::new();
    let parsed = parse(&cfg, base_dir, &mut diagnostics)?;
    let types = TypeMap::build(&parsed);

    info!(version = ?parsed.version, "libvlc");
    for e in &parsed.enums {
        info!(name = %e.name, kind = e.kind(), values = e.vals.len(), "enum");
        for v in &e.vals {
            info!(c_name = %v.c_name, name = %v.name, value = %v.value, "  value");
        }
    }
    for s in &parsed.structs {
        info!(name = %s.name, kind = s.kind.as_str(), fields = s.fields.len(), "composite");
    }
    for f in parsed.funcs.iter().chain(&parsed.callbacks) {
        let params: Vec<&str> = f.params.iter().map(Field::name).collect();
        info!(name = %f.name, ret = %f.return_type, params = ?params, out = ?f.doc.out, "function");
    }
    for (name, ret) in &parsed.denied {
        info!(name = %name, ret = %ret, "denied");
    }
    for (c_type, class) in types.iter() {
        info!(c_type, class, "type");
    }

    let templates = load_templates(&cfg, base_dir)?;
    for class in templates.overrides.class_names() {
        info!(class, "override class");
    }
    Emitter::new(&parsed, &types, &templates.overrides, build_date(&cfg)).dump();
    Ok(diagnostics)
}

/// Read both headers, extract the model and resolve the libvlc version.
pub fn parse(cfg: &config::Config, base_dir: &Path, diags: &mut Diagnostics) -> Result<Parsed> {
    let header_path = config::resolve_path(&cfg.input.header, base_dir);
    let header = match &cfg.input.preprocessor {
        Some(command) => {
            let text = preprocess(command, &header_path)?;
            SourceFile::parse(&header_path, text)?
        }
        None => SourceFile::read(&header_path)?,
    };

    let mut parsed = extract::extract(&header, diags)
        .with_context(|| format!("extracting declarations from {}", header_path.display()))?;

    parsed.version = match &cfg.version {
        Some(v) => Some(v.clone()),
        None => {
            let version_path = config::resolve_path(&cfg.input.version_header, base_dir);
            let version_header = SourceFile::read(&version_path)?;
            version::resolve_version(&version_header, &header_path)
        }
    };

    check_docs(&parsed, diags);
    Ok(parsed)
}

/// Record undocumented declarations and functions whose documented
/// parameter count differs from the declared one.
pub fn check_docs(parsed: &Parsed, diags: &mut Diagnostics) {
    for e in &parsed.enums {
        if e.docs.is_empty() {
            diags.record(DiagnosticKind::MissingDocs, format!("no docs for {} {}", e.kind(), e.name));
        }
    }
    for s in &parsed.structs {
        if s.docs.is_empty() {
            diags.record(
                DiagnosticKind::MissingDocs,
                format!("no docs for {} {}", s.kind.as_str(), s.name),
            );
        }
    }
    for f in parsed.funcs.iter().chain(&parsed.callbacks) {
        if f.docs.is_empty() {
            diags.record(DiagnosticKind::MissingDocs, format!("no docs for {}", f.name));
            continue;
        }
        let declared = f
            .params
            .iter()
            .filter(|p| p.as_par().is_none_or(|p| p.ty != "..."))
            .count();
        let documented = f.documented_param_count();
        if declared != documented {
            diags.record(
                DiagnosticKind::ParamCountMismatch,
                format!("{}: {declared} parameter(s), {documented} documented", f.name),
            );
        }
    }
}

fn load_templates(cfg: &config::Config, base_dir: &Path) -> Result<Templates> {
    let read = |path: &Path| {
        let path = config::resolve_path(path, base_dir);
        std::fs::read_to_string(&path).with_context(|| format!("reading template {}", path.display()))
    };
    let overrides = match &cfg.templates.overrides {
        Some(path) => Overrides::parse(&read(path)?),
        None => Overrides::default(),
    };
    Ok(Templates {
        header: read(&cfg.templates.header)?,
        footer: read(&cfg.templates.footer)?,
        overrides,
    })
}

fn build_date(cfg: &config::Config) -> String {
    match &cfg.build_date {
        Some(date) => date.clone(),
        None => chrono::Local::now().format("%a %b %e %H:%M:%S %Y").to_string(),
    }
}

/// Run `command` with `header` appended and return its stdout.
fn preprocess(command: &[String], header: &Path) -> Result<String> {
    let Some((program, args)) = command.split_first() else {
        bail!("empty preprocessor command");
    };
    let output = Command::new(program)
        .args(args)
        .arg(header)
        .output()
        .with_context(|| format!("running preprocessor {program}"))?;
    if !output.status.success() {
        bail!(
            "preprocessor {program} failed on {} ({}):\n{}",
            header.display(),
            output.status,
            String::from_utf8_lossy(&output.stderr)
        );
    }
    String::from_utf8(output.stdout)
        .with_context(|| format!("preprocessor output for {} is not UTF-8", header.display()))
}

fn run_formatter(command: &[String], path: &Path) -> Result<()> {
    let Some((program, args)) = command.split_first() else {
        bail!("empty formatter command");
    };
    let output = Command::new(program)
        .args(args)
        .arg(path)
        .output()
        .with_context(|| format!("running formatter {program}"))?;
    if !output.status.success() {
        bail!(
            "formatter {program} failed on {} ({}):\n{}{}",
            path.display(),
            output.status,
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
    }
    info!(formatter = %program, path = %path.display(), "formatted module");
    Ok(())
}
