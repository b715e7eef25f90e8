//! Function extraction and doc checks on `tests/fixtures/parser/funcs.h`.

use std::path::Path;
use std::sync::LazyLock;

use bnd_ctypes::diagnostics::{DiagnosticKind, Diagnostics};
use bnd_ctypes::extract::{SourceFile, extract};
use bnd_ctypes::model::{Field, Flag, Func, Par, Parsed};

static PARSED: LazyLock<Parsed> = LazyLock::new(|| {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../tests/fixtures/parser/funcs.h");
    let src = SourceFile::read(&path).expect("parse funcs.h");
    extract(&src, &mut Diagnostics::new()).expect("extract funcs.h")
});

fn find(name: &str) -> &'static Func {
    PARSED
        .funcs
        .iter()
        .find(|f| f.name == name)
        .unwrap_or_else(|| panic!("{name} missing"))
}

#[test]
fn only_exported_prefixed_functions() {
    let names: Vec<&str> = PARSED.funcs.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(
        names,
        [
            "libvlc_new",
            "libvlc_video_get_size",
            "libvlc_audio_set_volume",
            "libvlc_release",
        ]
    );
}

#[test]
fn deny_listed_functions_keep_their_return_type() {
    assert_eq!(PARSED.denied.len(), 1);
    assert_eq!(PARSED.denied["libvlc_set_exit_handler"], "void");
}

#[test]
fn pointer_return_and_const_parameters() {
    let f = find("libvlc_new");
    assert_eq!(f.return_type, "libvlc_instance_t*");
    assert_eq!(
        f.params,
        [
            Field::Param(Par::new("argc", "int", vec![false])),
            Field::Param(Par::new("argv", "char**", vec![true, true, false])),
        ]
    );
    assert_eq!(f.doc.heads, ["Create and initialize a libvlc instance."]);
    assert_eq!(
        f.doc.tails,
        [":return: the libvlc instance or None in case of error."]
    );
}

#[test]
fn out_parameters_from_docs() {
    let f = find("libvlc_video_get_size");
    assert_eq!(f.doc.out, ["px", "py"]);
    assert_eq!(f.params.len(), 4);
    assert_eq!(f.documented_param_count(), 4);

    let flags: Vec<Flag> = f
        .params
        .iter()
        .filter_map(Field::as_par)
        .map(|p| Flag::classify(&p.name, &p.ty, &f.doc.out))
        .collect();
    assert_eq!(flags, [Flag::In, Flag::In, Flag::Out, Flag::Out]);
}

#[test]
fn unnamed_parameters_keep_documented_names() {
    let f = find("libvlc_audio_set_volume");
    assert!(f.params.iter().all(|p| p.name().is_empty()));
    assert_eq!(f.doc.param_names, ["p_mi", "i_volume"]);
}

#[test]
fn undocumented_parameters_are_reported() {
    let mut diags = Diagnostics::new();
    bnd_ctypes::check_docs(&PARSED, &mut diags);
    assert_eq!(diags.count(DiagnosticKind::ParamCountMismatch), 1);
    assert_eq!(diags.count(DiagnosticKind::MissingDocs), 0);
    assert!(diags.iter().all(|d| d.message.starts_with("libvlc_release")));
}
