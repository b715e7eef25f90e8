//! Intermediate model: the bridge between tree-sitter extraction and
//! Python emission.
//!
//! Nothing here refers to tree nodes, so parsed headers can be compared,
//! dumped and emitted independently of the parser.

use std::collections::BTreeMap;

use crate::comment::DocSections;
use crate::naming;
use crate::tables::OUT_PARAM_TYPES;

/// Everything extracted from one header set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parsed {
    pub enums: Vec<Enum>,
    pub structs: Vec<Struct>,
    pub funcs: Vec<Func>,
    pub callbacks: Vec<Func>,
    /// libvlc version, e.g. `3.0.16`.
    pub version: Option<String>,
    /// Deny-listed functions and callbacks → their C return type.
    pub denied: BTreeMap<String, String>,
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// One enumerator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Val {
    /// C name, e.g. `libvlc_Playing`.
    pub c_name: String,
    /// Short Python attribute name.
    pub name: String,
    /// Decimal, or `0x` hex when the source spelled it in hex.
    pub value: String,
    pub docs: String,
}

impl Val {
    /// Build an enumerator, deriving the short name from the enum's C
    /// type name (`context`).
    pub fn new(c_name: &str, value: impl Into<String>, context: Option<&str>, docs: String) -> Self {
        Self {
            c_name: c_name.to_string(),
            name: naming::enumerator_name(c_name, context),
            value: value.into(),
            docs,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enum {
    pub name: String,
    pub vals: Vec<Val>,
    pub docs: String,
}

impl Enum {
    pub fn kind(&self) -> &'static str {
        "enum"
    }
}

// ---------------------------------------------------------------------------
// Structs and their fields
// ---------------------------------------------------------------------------

/// A plain typed name: a function parameter or a struct field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Par {
    /// Empty for unnamed parameters.
    pub name: String,
    /// Base C type with one `*` per pointer level, e.g. `char*`.
    pub ty: String,
    /// Index 0 is the base type; one more entry per pointer level,
    /// outermost pointer first.
    pub constness: Vec<bool>,
}

impl Par {
    pub fn new(name: impl Into<String>, ty: impl Into<String>, constness: Vec<bool>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            constness,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructKind {
    Struct,
    Union,
}

impl StructKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StructKind::Struct => "struct",
            StructKind::Union => "union",
        }
    }

    /// Base class of the generated ctypes type.
    pub fn ctypes_base(self) -> &'static str {
        match self {
            StructKind::Struct => "ctypes.Structure",
            StructKind::Union => "ctypes.Union",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Struct {
    pub name: String,
    pub kind: StructKind,
    pub fields: Vec<Field>,
    pub docs: String,
}

/// A struct member or function parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    Param(Par),
    /// Named nested struct; its name is the member name.
    Struct(Struct),
    /// Named nested union; its name is the member name.
    Union(Struct),
    /// Function-pointer member or parameter.
    Callback(Func),
}

impl Field {
    /// Wrap a nested composite in the variant matching its kind.
    pub fn nested(s: Struct) -> Self {
        match s.kind {
            StructKind::Struct => Field::Struct(s),
            StructKind::Union => Field::Union(s),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Field::Param(p) => &p.name,
            Field::Struct(s) | Field::Union(s) => &s.name,
            Field::Callback(f) => &f.name,
        }
    }

    pub fn as_par(&self) -> Option<&Par> {
        match self {
            Field::Param(p) => Some(p),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Functions and callbacks
// ---------------------------------------------------------------------------

/// ctypes parameter direction flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    In = 1,
    Out = 2,
    InOut = 3,
    InZero = 4,
}

impl Flag {
    /// Direction of a parameter given its name, C type and the names
    /// documented as `[OUT]`.
    pub fn classify(name: &str, ty: &str, out: &[String]) -> Self {
        if out.iter().any(|o| o == name) || OUT_PARAM_TYPES.contains(&ty) {
            Flag::Out
        } else {
            Flag::In
        }
    }

    pub fn value(self) -> u8 {
        self as u8
    }
}

/// A public function or a callback typedef.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Func {
    pub name: String,
    pub return_type: String,
    pub params: Vec<Field>,
    pub docs: String,
    /// `docs` split into Sphinx sections.
    pub doc: DocSections,
}

impl Func {
    pub fn new(
        name: impl Into<String>,
        return_type: impl Into<String>,
        params: Vec<Field>,
        docs: String,
    ) -> Self {
        let doc = DocSections::from_doxygen(&docs);
        Self {
            name: name.into(),
            return_type: return_type.into(),
            params,
            docs,
            doc,
        }
    }

    /// Parameter count according to the doc comment.
    pub fn documented_param_count(&self) -> usize {
        self.doc.params.len() + self.doc.out.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_from_out_docs_and_type() {
        let out = vec!["length".to_string()];
        assert_eq!(Flag::classify("length", "size_t*", &out), Flag::Out);
        assert_eq!(Flag::classify("width", "unsigned*", &[]), Flag::Out);
        assert_eq!(Flag::classify("p_mi", "libvlc_media_player_t*", &out), Flag::In);
        assert_eq!(Flag::InOut.value(), 3);
    }

    #[test]
    fn nested_field_kind_follows_struct_kind() {
        let u = Struct {
            name: "u".into(),
            kind: StructKind::Union,
            fields: vec![Field::Param(Par::new("b", "char", vec![false]))],
            docs: String::new(),
        };
        let field = Field::nested(u);
        assert!(matches!(field, Field::Union(_)));
        assert_eq!(field.name(), "u");
    }

    #[test]
    fn documented_count_includes_out_params() {
        let docs = "Get size.\n@param p_mi the player\n@param px [OUT] pointer to get the width\n@return 0 on success";
        let f = Func::new("libvlc_video_get_size", "int", vec![], docs.to_string());
        assert_eq!(f.documented_param_count(), 2);
        assert_eq!(f.doc.out, vec!["px".to_string()]);
    }
}
