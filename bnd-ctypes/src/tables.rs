//! Fixed tables for the libvlc binding surface.
//!
//! The C-type → ctypes table is a compatibility contract with the native
//! ABI: changing an entry changes how the generated module marshals calls.

/// Reserved name prefix of every libvlc public symbol.
pub const LIBRARY_PREFIX: &str = "libvlc_";

/// Generator version, folded into the bindings version string.
/// Major must stay below 10 and minor below 100.
pub const GENERATOR_VERSION: &str = "1.9";

/// Prefixes left over after common-prefix stripping of enumerator names.
/// These cover the library-wide macro prefix and enum families whose
/// enumerators do not follow the enum type's name.
pub const IRREGULAR_ENUMERATOR_PREFIXES: &[&str] = &[
    "LIBVLC_",
    "role_",
    "marquee_",
    "adjust_",
    "AudioChannel_",
    "AudioOutputDevice_",
];

/// Functions that are never bound, with the reason.
pub const DENY_LIST: &[(&str, &str)] = &[
    ("libvlc_audio_output_set_device_type", "deprecated"),
    ("libvlc_audio_output_get_device_type", "deprecated"),
    ("libvlc_set_exit_handler", "deprecated"),
    ("libvlc_printerr", "variadic, not callable through ctypes"),
    ("libvlc_dialog_set_callbacks", "needs a wrapped callback structure"),
];

/// Returns the deny-list reason for `name`, if it is deny-listed.
pub fn deny_reason(name: &str) -> Option<&'static str> {
    DENY_LIST
        .iter()
        .find(|(denied, _)| *denied == name)
        .map(|(_, reason)| *reason)
}

/// Functions returning a string the caller must free.
pub const FREE_STRING_FUNCS: &[&str] = &[
    "libvlc_media_discoverer_localized_name",
    "libvlc_media_get_mrl",
    "libvlc_media_get_meta",
    "libvlc_video_get_aspect_ratio",
    "libvlc_video_get_crop_geometry",
    "libvlc_video_get_marquee_string",
    "libvlc_audio_output_device_longname",
    "libvlc_audio_output_device_id",
    "libvlc_audio_output_device_get",
    "libvlc_vlm_show_media",
];

/// Python classes that get generated method wrappers around the libvlc
/// functions taking them as first parameter.
pub const DEFINED_CLASSES: &[&str] = &[
    "AudioEqualizer",
    "EventManager",
    "Instance",
    "Log",
    "LogIterator",
    "Media",
    "MediaDiscoverer",
    "MediaLibrary",
    "MediaList",
    "MediaListPlayer",
    "MediaListView",
    "MediaPlayer",
    "Picture",
    "Renderer",
    "RendererDiscoverer",
];

pub fn is_defined_class(class: &str) -> bool {
    DEFINED_CLASSES.contains(&class)
}

/// Method prefixes that do not follow the class's C type name.
pub const IRREGULAR_METHOD_PREFIXES: &[(&str, &str)] =
    &[("AudioEqualizer", "libvlc_audio_equalizer_")];

/// Parameter types that are always output parameters.
pub const OUT_PARAM_TYPES: &[&str] = &["int*", "unsigned*", "libvlc_media_track_info_t**"];

/// C type → ctypes expression. Enum, struct and callback names are added
/// on top of this table, but never override an entry listed here.
pub const TYPE_TO_CLASS: &[(&str, &str)] = &[
    ("libvlc_audio_output_t*", "ctypes.POINTER(AudioOutput)"),
    ("libvlc_event_t*", "ctypes.c_void_p"),
    ("libvlc_event_e", "EventType"),
    ("libvlc_dialog_id*", "ctypes.c_void_p"),
    ("libvlc_drawable_t", "ctypes.c_uint"),
    ("libvlc_event_type_t", "ctypes.c_uint"),
    ("libvlc_event_manager_t*", "EventManager"),
    ("libvlc_instance_t*", "Instance"),
    ("libvlc_log_t*", "Log_ptr"),
    ("libvlc_log_iterator_t*", "LogIterator"),
    ("libvlc_log_subscriber_t*", "ctypes.c_void_p"),
    ("libvlc_log_message_t*", "ctypes.POINTER(LogMessage)"),
    ("libvlc_media_track_t**", "ctypes.POINTER(MediaTrack)"),
    ("libvlc_media_track_t***", "ctypes.POINTER(ctypes.POINTER(MediaTrack))"),
    ("libvlc_media_t*", "Media"),
    ("libvlc_media_discoverer_t*", "MediaDiscoverer"),
    ("libvlc_media_discoverer_description_t**", "ctypes.POINTER(MediaDiscovererDescription)"),
    (
        "libvlc_media_discoverer_description_t***",
        "ctypes.POINTER(ctypes.POINTER(MediaDiscovererDescription))",
    ),
    ("libvlc_media_library_t*", "MediaLibrary"),
    ("libvlc_media_list_t*", "MediaList"),
    ("libvlc_media_list_player_t*", "MediaListPlayer"),
    ("libvlc_media_list_view_t*", "MediaListView"),
    ("libvlc_media_player_t*", "MediaPlayer"),
    ("libvlc_video_viewpoint_t*", "ctypes.POINTER(VideoViewpoint)"),
    ("libvlc_media_stats_t*", "ctypes.POINTER(MediaStats)"),
    ("libvlc_picture_t*", "Picture"),
    ("libvlc_media_thumbnail_request_t*", "MediaThumbnailRequest"),
    ("libvlc_renderer_item_t*", "Renderer"),
    ("libvlc_renderer_discoverer_t*", "RendererDiscoverer"),
    ("libvlc_rd_description_t**", "ctypes.POINTER(RDDescription)"),
    ("libvlc_rd_description_t***", "ctypes.POINTER(ctypes.POINTER(RDDescription))"),
    ("libvlc_media_track_info_t**", "ctypes.POINTER(ctypes.c_void_p)"),
    ("libvlc_rectangle_t*", "ctypes.POINTER(Rectangle)"),
    ("libvlc_time_t", "ctypes.c_longlong"),
    ("libvlc_time_t*", "ctypes.POINTER(ctypes.c_longlong)"),
    ("libvlc_track_description_t*", "ctypes.POINTER(TrackDescription)"),
    ("libvlc_title_description_t**", "ctypes.POINTER(TitleDescription)"),
    ("libvlc_title_description_t***", "ctypes.POINTER(ctypes.POINTER(TitleDescription))"),
    ("libvlc_chapter_description_t**", "ctypes.POINTER(ChapterDescription)"),
    (
        "libvlc_chapter_description_t***",
        "ctypes.POINTER(ctypes.POINTER(ChapterDescription))",
    ),
    ("libvlc_module_description_t*", "ctypes.POINTER(ModuleDescription)"),
    ("libvlc_audio_output_device_t*", "ctypes.POINTER(AudioOutputDevice)"),
    ("libvlc_equalizer_t*", "AudioEqualizer"),
    ("libvlc_media_slave_t**", "ctypes.POINTER(MediaSlave)"),
    ("libvlc_media_slave_t***", "ctypes.POINTER(ctypes.POINTER(MediaSlave))"),
    ("FILE*", "FILE_ptr"),
    ("...", "ctypes.c_void_p"),
    ("va_list", "ctypes.c_void_p"),
    ("char", "ctypes.c_char"),
    ("char*", "ctypes.c_char_p"),
    ("char**", "ListPOINTER(ctypes.c_char_p)"),
    ("unsigned char", "ctypes.c_ubyte"),
    ("unsigned char*", "ctypes.POINTER(ctypes.c_ubyte)"),
    ("bool", "ctypes.c_bool"),
    ("bool*", "ctypes.POINTER(ctypes.c_bool)"),
    ("float", "ctypes.c_float"),
    ("float*", "ctypes.POINTER(ctypes.c_float)"),
    ("double", "ctypes.c_double"),
    ("double*", "ctypes.POINTER(ctypes.c_double)"),
    ("short", "ctypes.c_short"),
    ("int", "ctypes.c_int"),
    ("int*", "ctypes.POINTER(ctypes.c_int)"),
    ("long", "ctypes.c_long"),
    ("long long", "ctypes.c_longlong"),
    ("unsigned", "ctypes.c_uint"),
    ("unsigned*", "ctypes.POINTER(ctypes.c_uint)"),
    ("unsigned int", "ctypes.c_uint"),
    ("unsigned int*", "ctypes.POINTER(ctypes.c_uint)"),
    ("unsigned long", "ctypes.c_ulong"),
    ("int8_t", "ctypes.c_int8"),
    ("uint8_t", "ctypes.c_uint8"),
    ("uint8_t*", "ctypes.POINTER(ctypes.c_uint8)"),
    ("int16_t", "ctypes.c_int16"),
    ("uint16_t", "ctypes.c_uint16"),
    ("int32_t", "ctypes.c_int32"),
    ("uint32_t", "ctypes.c_uint32"),
    ("uint32_t*", "ctypes.POINTER(ctypes.c_uint32)"),
    ("int64_t", "ctypes.c_int64"),
    ("int64_t*", "ctypes.POINTER(ctypes.c_int64)"),
    ("uint64_t", "ctypes.c_uint64"),
    ("uint64_t*", "ctypes.POINTER(ctypes.c_uint64)"),
    ("uintptr_t*", "ctypes.POINTER(ctypes.c_uint)"),
    ("ssize_t", "ctypes.c_ssize_t"),
    ("ssize_t*", "ctypes.POINTER(ctypes.c_ssize_t)"),
    ("size_t", "ctypes.c_size_t"),
    ("size_t*", "ctypes.POINTER(ctypes.c_size_t)"),
    ("void", "None"),
    ("void*", "ctypes.c_void_p"),
    ("void**", "ctypes.POINTER(ctypes.c_void_p)"),
    ("WINDOWHANDLE", "ctypes.c_ulong"),
];

/// Overrides of [`TYPE_TO_CLASS`] for output parameters.
pub const TYPE_TO_CLASS_OUT: &[(&str, &str)] = &[("char**", "ctypes.POINTER(ctypes.c_char_p)")];
