//! End-to-end: `tests/fixtures/mini/mini.toml` → vlc.py text.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use bnd_ctypes::diagnostics::DiagnosticKind;

fn mini_config() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../tests/fixtures/mini/mini.toml")
}

static GENERATED: LazyLock<bnd_ctypes::Generated> =
    LazyLock::new(|| bnd_ctypes::generate(&mini_config()).expect("generate mini module"));

fn module() -> &'static str {
    &GENERATED.module
}

fn position(needle: &str) -> usize {
    module()
        .find(needle)
        .unwrap_or_else(|| panic!("`{needle}` not found in:\n{}", module()))
}

#[test]
fn version_block_replaces_marker() {
    let m = module();
    assert!(m.contains(
        "__version__ = \"3.0.16109\"\n\
         __libvlc_version__ = \"3.0.16\"\n\
         __generator_version__ = \"1.9\"\n\
         build_date  = \"Thu Jan  1 00:00:00 1970 3.0.16\"\n"
    ));
    assert!(!m.contains("see generate.py"));
}

#[test]
fn markers_are_replaced_and_template_kept() {
    let m = module();
    assert!(!m.lines().any(|l| l.starts_with("# GENERATED_")), "{m}");
    assert!(m.starts_with("#! /usr/bin/python\n"));
    assert!(position("class _Enum(ctypes.c_uint):") < position("# End of generated enum types #"));
    assert!(position("class MediaStats(ctypes.Structure):") < position("# End of generated structs #"));
    assert!(
        position("class CallbackDecorators(object):")
            < position("# End of generated callback definitions #")
    );
}

#[test]
fn enum_class_and_singletons() {
    let m = module();
    assert!(m.contains(
        "class State(_Enum):\n    '''Media player states.\n    '''\n    _enum_names_ = {\n        0: 'NothingSpecial',\n        1: 'Opening',\n        2: 'Buffering',\n        3: 'Playing',\n        0x7: 'Error',\n    }\n"
    ));
    assert!(m.contains(
        "State.Buffering      = State(2)\n\
         State.Error          = State(0x7)\n\
         State.NothingSpecial = State(0)\n\
         State.Opening        = State(1)\n\
         State.Playing        = State(3)\n"
    ));
}

#[test]
fn struct_layout() {
    assert!(module().contains(
        "MediaStats._fields_ = (\n    ('i_read_bytes', ctypes.c_int),\n    ('f_input_bitrate', ctypes.c_float),\n)\n"
    ));
}

#[test]
fn callback_decorator() {
    assert!(module().contains(
        "    AudioPlayCb = ctypes.CFUNCTYPE(None, ctypes.c_void_p, ctypes.c_void_p, ctypes.c_uint)\n"
    ));
    assert!(module().contains("cb = CallbackDecorators\n"));
}

#[test]
fn function_binding_with_out_parameters() {
    let expected = "\
def libvlc_video_get_size(p_mi, num):
    '''Get video size in pixels.
    :param p_mi: media player.
    :param num: number of the video.
    :return: px pixel width, py pixel height.
    '''
    f = _Cfunctions.get('libvlc_video_get_size', None) or \\
        _Cfunction('libvlc_video_get_size', ((1,), (1,), (2,), (2,),), None,
                    ctypes.c_int, MediaPlayer, ctypes.c_uint, ctypes.POINTER(ctypes.c_uint), ctypes.POINTER(ctypes.c_uint))
    return f(p_mi, num)
";
    assert!(module().contains(expected), "{}", module());
}

#[test]
fn result_checks() {
    let m = module();
    assert!(m.contains(
        "_Cfunction('libvlc_media_get_mrl', ((1,),), string_result,\n                    ctypes.c_void_p, Media)"
    ));
    assert!(m.contains(
        "_Cfunction('libvlc_media_new_path', ((1,), (1,),), class_result(Media),\n                    ctypes.c_void_p, Instance, ctypes.c_char_p)"
    ));
    assert!(m.contains(
        "def libvlc_get_version():\n"
    ));
    assert!(m.contains(
        "_Cfunction('libvlc_get_version', (), None,\n                    ctypes.c_char_p)\n    return f()\n"
    ));
}

#[test]
fn unnamed_parameters_get_documented_names() {
    assert!(module().contains("def libvlc_audio_set_volume(p_mi, i_volume):\n"));
    assert!(module().contains(
        "    def audio_set_volume(self, i_volume):\n"
    ));
}

#[test]
fn doc_links() {
    let m = module();
    assert!(m.contains("    See :func:`libvlc_media_list_item_at_index`.\n"));
    assert!(m.contains("        See :meth:`item_at_index`.\n"));
}

#[test]
fn wrapper_class_special_methods() {
    let m = module();
    assert!(m.contains(
        "class MediaList(_Ctype):\n    '''N/A\n    '''\n    def __new__(cls, ptr=_internal_guard):\n        '''(INTERNAL) ctypes wrapper constructor.\n        '''\n        return _Constructor(cls, ptr)\n"
    ));
    assert!(m.contains("    def __len__(self):\n        return libvlc_media_list_count(self)\n"));
    assert!(m.contains(
        "    def __getitem__(self, i):\n        return libvlc_media_list_item_at_index(self, i)\n"
    ));
    assert!(m.contains(
        "    def __iter__(self):\n        for i in range(len(self)):\n            yield self[i]\n"
    ));
    assert!(m.contains("    @memoize_parameterless\n    def event_manager(self):\n"));
    assert!(m.contains(
        "    def get_mrl(self):\n"
    ));
}

#[test]
fn overrides_replace_docs_and_methods() {
    let m = module();
    assert!(m.contains("class Instance(_Ctype):\n    '''Create a new Instance instance.\n"));
    assert!(m.contains("    def media_list_new(self, mrls=None):\n"));
    assert!(!m.contains("    def media_list_new(self):\n"));
    assert!(m.contains(
        "    def media_new_path(self, path):\n"
    ));
    assert!(m.contains("        return libvlc_media_new_path(self, str_to_bytes(path))\n"));
    // Instance brings its own constructor.
    assert_eq!(m.matches("def __new__(cls, ptr=_internal_guard):").count(), 3);
    assert!(m.contains("    def get_instance(self):\n"));
}

#[test]
fn section_order_and_report() {
    assert!(position("class Instance(_Ctype):") < position("class Media(_Ctype):"));
    assert!(position("class Media(_Ctype):") < position("class MediaList(_Ctype):"));
    assert!(position("class MediaList(_Ctype):") < position("class MediaPlayer(_Ctype):"));
    assert!(position("class MediaPlayer(_Ctype):") < position("# LibVLC __version__ functions #"));
    assert!(position("def libvlc_clock():") < position("# 1 function(s) blacklisted:"));
    assert!(position("# 1 function(s) blacklisted:") < position("# Start of footer.py #"));
    assert!(module().contains(
        "# 1 function(s) blacklisted:\n#  libvlc_set_exit_handler (void)\n"
    ));
    assert!(module().contains(
        "# 2 function(s) not wrapped as methods:\n#  libvlc_clock\n#  libvlc_get_version\n"
    ));
}

#[test]
fn diagnostics_for_undocumented_function() {
    let diags = &GENERATED.diagnostics;
    assert_eq!(diags.count(DiagnosticKind::MissingDocs), 1, "{:?}", diags.iter().collect::<Vec<_>>());
    assert_eq!(diags.error_count(), 1);
    assert_eq!(diags.exit_code(), 1);
    assert_eq!(bnd_ctypes::check(&mini_config()).unwrap().error_count(), 1);
}

#[test]
fn generation_is_deterministic() {
    let again = bnd_ctypes::generate(&mini_config()).unwrap();
    assert_eq!(again.module, module());
}

#[test]
fn run_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("nested").join("vlc.py");
    let (path, diags) = bnd_ctypes::run(&mini_config(), Some(&out)).unwrap();
    assert_eq!(path, out);
    assert_eq!(std::fs::read_to_string(&out).unwrap(), module());
    assert_eq!(diags.exit_code(), 1);
}

/// Config pointing at the mini fixture through absolute paths, written
/// into `dir`.
fn config_in(dir: &Path, extra: &str) -> PathBuf {
    let mini = Path::new(env!("CARGO_MANIFEST_DIR")).join("../tests/fixtures/mini");
    let text = format!(
        "build_date = \"Thu Jan  1 00:00:00 1970\"\n\
         version = \"3.0.20\"\n\
         [input]\n\
         header = {:?}\n\
         version_header = {:?}\n\
         {extra}\n\
         [templates]\n\
         header = {:?}\n\
         footer = {:?}\n",
        mini.join("mini.h"),
        mini.join("libvlc_version.h"),
        mini.join("header.py"),
        mini.join("footer.py"),
    );
    let path = dir.join("bnd-ctypes.toml");
    std::fs::write(&path, text).unwrap();
    path
}

#[test]
fn pinned_version_and_preprocessor_output() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path(), "preprocessor = [\"cat\"]");
    let generated = bnd_ctypes::generate(&config).unwrap();
    assert!(generated.module.contains("__version__ = \"3.0.20109\"\n"));
    // Without overrides every wrapper class gets a generated constructor.
    assert!(generated.module.contains("    def media_list_new(self):\n"));
}

#[test]
fn failing_preprocessor_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path(), "preprocessor = [\"false\"]");
    let err = bnd_ctypes::generate(&config).unwrap_err();
    assert!(format!("{err:#}").contains("preprocessor false failed"), "{err:#}");
}
