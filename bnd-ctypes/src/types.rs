//! C type → ctypes expression table.
//!
//! Built once from the fixed table plus the parsed enums, structs and
//! callbacks, then only read during emission.

use std::collections::BTreeMap;

use tracing::debug;

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::model::{Flag, Parsed};
use crate::naming::class_name;
use crate::tables::{TYPE_TO_CLASS, TYPE_TO_CLASS_OUT};

#[derive(Debug, Clone)]
pub struct TypeMap {
    classes: BTreeMap<String, String>,
    out_classes: BTreeMap<String, String>,
}

impl TypeMap {
    /// The fixed table only.
    pub fn seeded() -> Self {
        Self {
            classes: TYPE_TO_CLASS
                .iter()
                .map(|(c, py)| (c.to_string(), py.to_string()))
                .collect(),
            out_classes: TYPE_TO_CLASS_OUT
                .iter()
                .map(|(c, py)| (c.to_string(), py.to_string()))
                .collect(),
        }
    }

    /// Seeded table plus every struct, enum and callback of `parsed`.
    pub fn build(parsed: &Parsed) -> Self {
        let mut map = Self::seeded();
        for s in &parsed.structs {
            map.register_name(&s.name);
        }
        for e in &parsed.enums {
            map.register_name(&e.name);
        }
        for cb in &parsed.callbacks {
            map.register_name(&cb.name);
        }
        debug!(entries = map.classes.len(), "type map built");
        map
    }

    /// Add `c_type` unless it is already mapped. Returns whether it was added.
    pub fn register(&mut self, c_type: &str, class: &str) -> bool {
        if self.classes.contains_key(c_type) {
            return false;
        }
        self.classes.insert(c_type.to_string(), class.to_string());
        true
    }

    /// Register a parsed type name, and pointers to it, under its
    /// computed class name. Existing entries win.
    pub fn register_name(&mut self, name: &str) -> String {
        let class = class_name(name);
        self.register(name, &class);
        self.register(&format!("{name}*"), &format!("ctypes.POINTER({class})"));
        self.register(
            &format!("{name}**"),
            &format!("ctypes.POINTER(ctypes.POINTER({class}))"),
        );
        class
    }

    /// Mapping for `c_type`, if any. Fixed-size arrays `T[N]` map to
    /// `(class(T) * N)`.
    pub fn lookup(&self, c_type: &str, flag: Flag) -> Option<String> {
        if flag == Flag::Out
            && let Some(class) = self.out_classes.get(c_type)
        {
            return Some(class.clone());
        }
        if let Some(class) = self.classes.get(c_type) {
            return Some(class.clone());
        }
        let (element, len) = split_array(c_type)?;
        let class = self.lookup(element, Flag::In)?;
        Some(format!("({class} * {len})"))
    }

    /// Mapping for `c_type`, or a `FIXME_` placeholder recorded as a
    /// missing conversion.
    pub fn class_of(&self, c_type: &str, flag: Flag, diags: &mut Diagnostics) -> String {
        match self.lookup(c_type, flag) {
            Some(class) => class,
            None => {
                diags.record_once(
                    DiagnosticKind::MissingTypeConversion,
                    format!("no type conversion for {c_type}"),
                );
                format!("FIXME_{}", placeholder_ident(c_type))
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.classes.iter().map(|(c, py)| (c.as_str(), py.as_str()))
    }
}

/// `char[16]` → (`char`, `16`).
fn split_array(c_type: &str) -> Option<(&str, &str)> {
    let open = c_type.rfind('[')?;
    let len = c_type[open + 1..].strip_suffix(']')?;
    if len.is_empty() {
        return None;
    }
    Some((&c_type[..open], len))
}

fn placeholder_ident(c_type: &str) -> String {
    c_type
        .chars()
        .map(|c| match c {
            '*' => 'p',
            c if c.is_ascii_alphanumeric() => c,
            _ => '_',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Enum, Struct, StructKind};

    fn parsed_with(struct_name: &str, enum_name: &str) -> Parsed {
        Parsed {
            structs: vec![Struct {
                name: struct_name.into(),
                kind: StructKind::Struct,
                fields: vec![],
                docs: String::new(),
            }],
            enums: vec![Enum {
                name: enum_name.into(),
                vals: vec![],
                docs: String::new(),
            }],
            ..Parsed::default()
        }
    }

    #[test]
    fn registered_names_and_pointers() {
        let map = TypeMap::build(&parsed_with("libvlc_audio_output_t", "libvlc_state_t"));
        assert_eq!(map.lookup("libvlc_audio_output_t", Flag::In).unwrap(), "AudioOutput");
        // The fixed table keeps its pointer entry.
        assert_eq!(
            map.lookup("libvlc_audio_output_t*", Flag::In).unwrap(),
            "ctypes.POINTER(AudioOutput)"
        );
        assert_eq!(
            map.lookup("libvlc_state_t**", Flag::In).unwrap(),
            "ctypes.POINTER(ctypes.POINTER(State))"
        );
    }

    #[test]
    fn registration_never_overwrites() {
        let mut map = TypeMap::seeded();
        assert!(!map.register("libvlc_media_t*", "Other"));
        assert_eq!(map.lookup("libvlc_media_t*", Flag::In).unwrap(), "Media");
        map.register_name("libvlc_event_e");
        assert_eq!(map.lookup("libvlc_event_e", Flag::In).unwrap(), "EventType");
    }

    #[test]
    fn out_override_and_arrays() {
        let map = TypeMap::seeded();
        assert_eq!(
            map.lookup("char**", Flag::Out).unwrap(),
            "ctypes.POINTER(ctypes.c_char_p)"
        );
        assert_eq!(map.lookup("char**", Flag::In).unwrap(), "ListPOINTER(ctypes.c_char_p)");
        assert_eq!(map.lookup("char[16]", Flag::In).unwrap(), "(ctypes.c_char * 16)");
        assert_eq!(map.lookup("float[]", Flag::In), None);
    }

    #[test]
    fn missing_mapping_is_a_placeholder() {
        let map = TypeMap::seeded();
        let mut diags = Diagnostics::new();
        assert_eq!(map.class_of("foo_t*", Flag::In, &mut diags), "FIXME_foo_tp");
        assert_eq!(diags.count(DiagnosticKind::MissingTypeConversion), 1);
    }

    #[test]
    fn missing_mapping_reported_once_per_type() {
        let map = TypeMap::seeded();
        let mut diags = Diagnostics::new();
        for flag in [Flag::In, Flag::In, Flag::Out] {
            map.class_of("foo_t*", flag, &mut diags);
        }
        map.class_of("bar_t", Flag::In, &mut diags);
        assert_eq!(diags.count(DiagnosticKind::MissingTypeConversion), 2);
        assert_eq!(diags.exit_code(), 2);
    }
}
