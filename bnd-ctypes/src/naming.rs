//! C name → Python name conversions.

use crate::python::is_keyword;
use crate::tables::{IRREGULAR_ENUMERATOR_PREFIXES, LIBRARY_PREFIX};

/// Short Python name of an enumerator.
///
/// The longest common prefix with the enum's type name (a trailing `_t`
/// turned into `_`) is removed, then one irregular prefix. Without a type
/// name the last `_`-separated segment is kept.
pub fn enumerator_name(c_name: &str, context: Option<&str>) -> String {
    let mut name = match context {
        Some(ctx) => {
            let ctx = match ctx.strip_suffix("_t") {
                Some(stem) => format!("{stem}_"),
                None => ctx.to_string(),
            };
            let prefix = common_prefix(c_name, &ctx);
            let rest = &c_name[prefix.len()..];
            strip_irregular_prefix(rest).to_string()
        }
        None => last_segment(c_name).to_string(),
    };
    if name.is_empty() {
        name = last_segment(c_name).to_string();
    }
    if name.is_empty() {
        name = c_name.to_string();
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) || is_keyword(&name) {
        name.insert(0, '_');
    }
    name
}

fn strip_irregular_prefix(name: &str) -> &str {
    IRREGULAR_ENUMERATOR_PREFIXES
        .iter()
        .find_map(|p| name.strip_prefix(p))
        .unwrap_or(name)
}

fn last_segment(name: &str) -> &str {
    name.rsplit('_').next().unwrap_or(name)
}

/// Longest common prefix of `a` and `b`, on char boundaries.
pub fn common_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    let end = a
        .char_indices()
        .zip(b.chars())
        .find(|((_, x), y)| x != y)
        .map(|((i, _), _)| i)
        .unwrap_or_else(|| a.len().min(b.len()));
    &a[..end]
}

/// Python class name for a libvlc C type name.
///
/// `libvlc_media_player_t` → `MediaPlayer`, `libvlc_state_t` → `State`.
/// Names outside the library prefix keep their spelling rules but not
/// their prefix stripping.
pub fn class_name(c_type: &str) -> String {
    let stem = match c_type.find(LIBRARY_PREFIX) {
        Some(at) => {
            let rest = &c_type[at + LIBRARY_PREFIX.len()..];
            rest.strip_suffix("_t").filter(|s| !s.is_empty()).unwrap_or(rest)
        }
        None => c_type,
    };
    if stem.contains('_') {
        title_case(stem).replace('_', "")
    } else if stem.starts_with(|c: char| c.is_lowercase()) {
        capitalize(stem)
    } else {
        stem.to_string()
    }
}

/// Upper-case the first letter of every run of letters, lower-case the rest.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }
    out
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Parameter name safe to use as a Python identifier.
pub fn param_name(name: &str) -> String {
    if is_keyword(name) {
        format!("{name}_")
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enumerator_strips_type_prefix() {
        assert_eq!(enumerator_name("libvlc_state_Playing", Some("libvlc_state_t")), "Playing");
        assert_eq!(enumerator_name("libvlc_x_A", Some("libvlc_x_t")), "A");
    }

    #[test]
    fn enumerator_strips_irregular_prefix() {
        assert_eq!(
            enumerator_name("libvlc_role_Music", Some("libvlc_media_player_role_t")),
            "Music"
        );
        assert_eq!(enumerator_name("LIBVLC_DEBUG", Some("libvlc_log_level")), "DEBUG");
    }

    #[test]
    fn enumerator_reserved_and_digit_names() {
        assert_eq!(enumerator_name("libvlc_x_None", Some("libvlc_x_t")), "_None");
        assert_eq!(enumerator_name("libvlc_video_fit_2x", Some("libvlc_video_fit_t")), "_2x");
    }

    #[test]
    fn enumerator_without_context_keeps_last_segment() {
        assert_eq!(enumerator_name("libvlc_foo_Bar", None), "Bar");
    }

    #[test]
    fn class_names() {
        assert_eq!(class_name("libvlc_media_player_t"), "MediaPlayer");
        assert_eq!(class_name("libvlc_state_t"), "State");
        assert_eq!(class_name("libvlc_rd_description_t"), "RdDescription");
        assert_eq!(class_name("libvlc_log_cb"), "LogCb");
        assert_eq!(class_name("libvlc_Meta"), "Meta");
        assert_eq!(class_name("FILE"), "FILE");
    }

    #[test]
    fn keyword_params_get_suffix() {
        assert_eq!(param_name("from"), "from_");
        assert_eq!(param_name("p_mi"), "p_mi");
    }

    #[test]
    fn common_prefix_is_char_wise() {
        assert_eq!(common_prefix("libvlc_state_t", "libvlc_stats"), "libvlc_stat");
        assert_eq!(common_prefix("abc", "abc"), "abc");
        assert_eq!(common_prefix("", "abc"), "");
    }
}
