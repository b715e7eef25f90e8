//! Emission: intermediate model → Python ctypes module text.
//!
//! Every section is built as a [`Stmt`] list and rendered by
//! [`crate::python::render`]. The header template is copied line by line,
//! with its marker lines replaced by generated sections.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::{debug, info};

use crate::comment::DocSections;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::model::*;
use crate::naming::{class_name, param_name};
use crate::overrides::Overrides;
use crate::python::{Stmt, Value, render, str_literal};
use crate::tables::{
    FREE_STRING_FUNCS, GENERATOR_VERSION, IRREGULAR_METHOD_PREFIXES, LIBRARY_PREFIX,
    is_defined_class,
};
use crate::types::TypeMap;
use crate::version::bindings_version;

/// Placeholder for missing docs and versions.
const NA: &str = "N/A";

const ENUMS_MARKER: &str = "# GENERATED_ENUMS";
const STRUCTS_MARKER: &str = "# GENERATED_STRUCTS";
const CALLBACKS_MARKER: &str = "# GENERATED_CALLBACKS";

static BUILD_DATE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^build_date\s*=").unwrap());
static LIBVLC_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"libvlc_[a-z0-9_]+").unwrap());

const ENUM_BASE: &str = r#"class _Enum(ctypes.c_uint):
    '''(INTERNAL) Base class
    '''
    _enum_names_ = {}

    def __str__(self):
        n = self._enum_names_.get(self.value, '') or ('FIXME_(%r)' % (self.value,))
        return '.'.join((self.__class__.__name__, n))

    def __hash__(self):
        return self.value

    def __repr__(self):
        return '.'.join((self.__class__.__module__, self.__str__()))

    def __eq__(self, other):
        return ( (isinstance(other, _Enum) and self.value == other.value)
              or (isinstance(other, _Ints) and self.value == other) )

    def __ne__(self, other):
        return not self.__eq__(other)
"#;

/// Template text the generated sections are spliced into.
#[derive(Debug, Clone, Default)]
pub struct Templates {
    pub header: String,
    pub footer: String,
    pub overrides: Overrides,
}

/// Render the complete module.
pub fn emit_module(
    parsed: &Parsed,
    types: &TypeMap,
    templates: &Templates,
    build_date: &str,
    diags: &mut Diagnostics,
) -> String {
    let mut emitter = Emitter::new(parsed, types, &templates.overrides, build_date);
    emitter.module(&templates.header, &templates.footer, diags)
}

/// Target of a doc link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Link {
    Class(String),
    Func,
}

/// A function parameter as bound by ctypes.
#[derive(Debug, Clone)]
struct ParamView {
    name: String,
    c_type: String,
    flag: Flag,
    class: String,
}

/// A function with its parameters and result resolved against the type map.
struct FuncView<'p> {
    func: &'p Func,
    params: Vec<ParamView>,
    errcheck: String,
    result: String,
}

impl FuncView<'_> {
    /// Parameters the Python caller passes, skipping the first `skip`.
    fn in_params(&self, skip: usize) -> impl Iterator<Item = &ParamView> {
        self.params.iter().skip(skip).filter(|p| p.flag != Flag::Out)
    }
}

pub struct Emitter<'a> {
    parsed: &'a Parsed,
    types: &'a TypeMap,
    overrides: &'a Overrides,
    build_date: String,
    links: BTreeMap<String, Link>,
    prefixes: BTreeMap<String, String>,
    /// Generated method count per function.
    wrapped: BTreeMap<String, usize>,
}

impl<'a> Emitter<'a> {
    pub fn new(
        parsed: &'a Parsed,
        types: &'a TypeMap,
        overrides: &'a Overrides,
        build_date: impl Into<String>,
    ) -> Self {
        let mut links = BTreeMap::new();
        links.insert("libvlc_event_e".to_string(), Link::Class("EventType".to_string()));
        for e in &parsed.enums {
            let class = types.lookup(&e.name, Flag::In).unwrap_or_else(|| class_name(&e.name));
            links.insert(e.name.clone(), Link::Class(class));
        }
        for s in &parsed.structs {
            let class = types.lookup(&s.name, Flag::In).unwrap_or_else(|| class_name(&s.name));
            links.insert(s.name.clone(), Link::Class(class));
        }

        let mut prefixes = BTreeMap::new();
        for (c_type, class) in types.iter() {
            let bare = c_type.trim_end_matches('*');
            if is_defined_class(class) {
                links.insert(bare.to_string(), Link::Class(class.to_string()));
                // `libvlc_media_player_t` → `libvlc_media_player_`
                if let Some((last, _)) = bare.char_indices().last() {
                    prefixes.insert(class.to_string(), bare[..last].to_string());
                }
            } else if let Some(inner) = class.strip_prefix("ctypes.POINTER(") {
                let inner = inner.replace("ctypes.POINTER(", "");
                let inner = inner.trim_end_matches(')');
                if inner.starts_with(|c: char| c.is_ascii_uppercase()) {
                    links.insert(bare.to_string(), Link::Class(inner.to_string()));
                }
            }
        }
        for (class, prefix) in IRREGULAR_METHOD_PREFIXES {
            prefixes.insert(class.to_string(), prefix.to_string());
        }
        for f in &parsed.funcs {
            links.insert(f.name.clone(), Link::Func);
        }

        Self {
            parsed,
            types,
            overrides,
            build_date: build_date.into(),
            links,
            prefixes,
            wrapped: BTreeMap::new(),
        }
    }

    /// Header template with generated sections, then wrapper classes,
    /// function bindings, the unwrapped report and the footer template.
    pub fn module(&mut self, header: &str, footer: &str, diags: &mut Diagnostics) -> String {
        let has_structs_marker = header.lines().any(|l| l.starts_with(STRUCTS_MARKER));
        let has_callbacks_marker = header.lines().any(|l| l.starts_with(CALLBACKS_MARKER));

        let mut out = String::with_capacity(header.len() + footer.len());
        for line in header.split_inclusive('\n') {
            let trimmed = line.trim_end();
            if BUILD_DATE_RE.is_match(trimmed) {
                out.push_str(&render(&self.version_block()));
            } else if trimmed.starts_with(ENUMS_MARKER) {
                out.push_str(&render(&self.enums(diags)));
                if !has_structs_marker {
                    out.push_str(&render(&self.structs(diags)));
                }
                if !has_callbacks_marker {
                    out.push_str(&render(&self.callbacks(diags)));
                }
            } else if trimmed.starts_with(STRUCTS_MARKER) {
                out.push_str(&render(&self.structs(diags)));
            } else if trimmed.starts_with(CALLBACKS_MARKER) {
                out.push_str(&render(&self.callbacks(diags)));
            } else {
                out.push_str(line);
                if !line.ends_with('\n') {
                    out.push('\n');
                }
            }
        }

        let views = self.func_views(diags);
        out.push_str(&render(&self.wrappers(&views)));
        out.push_str(&render(&self.functions(&views)));
        out.push_str(&render(&self.unwrapped_report()));
        out.push_str(footer);
        info!(
            functions = views.len(),
            wrapped = self.wrapped.values().filter(|&&n| n > 0).count(),
            "module emitted"
        );
        out
    }

    /// Log the link and method-prefix tables.
    pub fn dump(&self) {
        for (name, link) in &self.links {
            info!(name = %name, link = ?link, "link");
        }
        for (class, prefix) in &self.prefixes {
            info!(class = %class, prefix = %prefix, "method prefix");
        }
    }

    pub fn wrapped_count(&self, func: &str) -> usize {
        self.wrapped.get(func).copied().unwrap_or(0)
    }

    // -----------------------------------------------------------------------
    // Version
    // -----------------------------------------------------------------------

    fn version_block(&self) -> Vec<Stmt> {
        let libvlc = self.parsed.version.as_deref();
        let v = libvlc.unwrap_or(NA);
        vec![
            Stmt::code(format!("__version__ = \"{}\"", bindings_version(libvlc))),
            Stmt::code(format!("__libvlc_version__ = \"{v}\"")),
            Stmt::code(format!("__generator_version__ = \"{GENERATOR_VERSION}\"")),
            Stmt::code(format!("build_date  = \"{} {v}\"", self.build_date)),
        ]
    }

    // -----------------------------------------------------------------------
    // Docs
    // -----------------------------------------------------------------------

    /// Rewrite `libvlc_*` names with a link target into Sphinx roles.
    /// With `method_prefix`, function links become method links.
    fn linkify(&self, text: &str, method_prefix: Option<&str>) -> String {
        LIBVLC_NAME_RE
            .replace_all(text, |caps: &Captures<'_>| {
                let name = &caps[0];
                match self.links.get(name) {
                    Some(Link::Class(class)) => format!(":class:`{class}`"),
                    Some(Link::Func) => match method_prefix {
                        Some(prefix) => format!(":meth:`{}`", strip_prefix(name, prefix)),
                        None => format!(":func:`{name}`"),
                    },
                    None => name.to_string(),
                }
            })
            .into_owned()
    }

    fn docstring(&self, lines: &[String], method_prefix: Option<&str>) -> Option<String> {
        if lines.is_empty() {
            return None;
        }
        Some(self.linkify(&lines.join("\n"), method_prefix))
    }

    fn narrative(&self, docs: &str) -> Option<String> {
        self.docstring(&DocSections::from_doxygen(docs).lines(0), None)
    }

    // -----------------------------------------------------------------------
    // Enums
    // -----------------------------------------------------------------------

    pub fn enums(&self, diags: &mut Diagnostics) -> Vec<Stmt> {
        let mut out = vec![Stmt::Blank, Stmt::Verbatim(ENUM_BASE.to_string()), Stmt::Blank];
        for e in &self.parsed.enums {
            let cls = self.types.class_of(&e.name, Flag::In, diags);
            let names = e
                .vals
                .iter()
                .map(|v| (v.value.clone(), str_literal(&v.name)))
                .collect();
            out.push(Stmt::Class {
                name: cls.clone(),
                bases: vec!["_Enum".to_string()],
                doc: Some(self.narrative(&e.docs).unwrap_or_else(|| NA.to_string())),
                body: vec![Stmt::assign("_enum_names_", Value::Dict(names))],
            });

            let width = e.vals.iter().map(|v| v.name.len()).max().unwrap_or(0);
            let mut singletons: Vec<String> = e
                .vals
                .iter()
                .map(|v| format!("{cls}.{:<width$} = {cls}({})", v.name, v.value))
                .collect();
            singletons.sort();
            out.extend(singletons.into_iter().map(Stmt::Code));
            out.push(Stmt::Blank);
            debug!(name = %e.name, class = %cls, values = e.vals.len(), "emitted enum");
        }
        out
    }

    // -----------------------------------------------------------------------
    // Structs and unions
    // -----------------------------------------------------------------------

    pub fn structs(&self, diags: &mut Diagnostics) -> Vec<Stmt> {
        let mut out = Vec::new();
        let classes: Vec<String> = self
            .parsed
            .structs
            .iter()
            .map(|s| self.types.class_of(&s.name, Flag::In, diags))
            .collect();

        for (s, cls) in self.parsed.structs.iter().zip(&classes) {
            out.push(Stmt::Class {
                name: cls.clone(),
                bases: vec![s.kind.ctypes_base().to_string()],
                doc: self.narrative(&s.docs),
                body: vec![],
            });
            out.push(Stmt::Blank);
        }
        for (s, cls) in self.parsed.structs.iter().zip(&classes) {
            let entries = self.fields(cls, &s.fields, &mut out, diags);
            out.push(Stmt::assign(format!("{cls}._fields_"), Value::Tuple(entries)));
            out.push(Stmt::Blank);
            debug!(name = %s.name, class = %cls, fields = s.fields.len(), "emitted struct");
        }
        out
    }

    /// `_fields_` entries for `fields` of class `owner`. Nested types are
    /// declared into `out` first, as attributes of `owner`.
    fn fields(
        &self,
        owner: &str,
        fields: &[Field],
        out: &mut Vec<Stmt>,
        diags: &mut Diagnostics,
    ) -> Vec<String> {
        let mut entries = Vec::with_capacity(fields.len());
        for field in fields {
            match field {
                Field::Param(p) => {
                    let class = self.types.class_of(&p.ty, Flag::In, diags);
                    if is_defined_class(&class) {
                        debug!(owner, field = %p.name, class = %class, "dropping wrapper-class field");
                        continue;
                    }
                    entries.push(format!("({}, {class})", str_literal(&p.name)));
                }
                Field::Struct(s) | Field::Union(s) => {
                    let short = class_name(&s.name);
                    let nested = format!("{owner}.{short}");
                    out.push(Stmt::code(format!(
                        "{nested} = type({}, ({},), {{}})",
                        str_literal(&short),
                        s.kind.ctypes_base()
                    )));
                    let inner = self.fields(&nested, &s.fields, out, diags);
                    out.push(Stmt::assign(format!("{nested}._fields_"), Value::Tuple(inner)));
                    entries.push(format!("({}, {nested})", str_literal(&s.name)));
                }
                Field::Callback(f) => {
                    let nested = format!("{owner}.{}", class_name(&f.name));
                    out.push(Stmt::code(format!("{nested} = {}", self.cfunctype(f, diags))));
                    entries.push(format!("({}, {nested})", str_literal(&f.name)));
                }
            }
        }
        entries
    }

    /// `ctypes.CFUNCTYPE(result, params...)` for a callback signature.
    fn cfunctype(&self, f: &Func, diags: &mut Diagnostics) -> String {
        // `void**` results are declared as plain pointers (video lock callbacks).
        let ret = if f.return_type == "void**" {
            "void*"
        } else {
            f.return_type.as_str()
        };
        let mut types = vec![self.types.class_of(ret, Flag::In, diags)];
        for (i, param) in f.params.iter().enumerate() {
            let class = match param {
                Field::Param(p) => {
                    let name = if p.name.is_empty() {
                        f.doc.param_names.get(i).map(String::as_str).unwrap_or("")
                    } else {
                        p.name.as_str()
                    };
                    self.types
                        .class_of(&p.ty, Flag::classify(name, &p.ty, &f.doc.out), diags)
                }
                Field::Callback(inner) => self.cfunctype(inner, diags),
                Field::Struct(s) | Field::Union(s) => self.types.class_of(
                    &format!("{} {}", s.kind.as_str(), s.name),
                    Flag::In,
                    diags,
                ),
            };
            types.push(class);
        }
        format!("ctypes.CFUNCTYPE({})", types.join(", "))
    }

    // -----------------------------------------------------------------------
    // Callbacks
    // -----------------------------------------------------------------------

    pub fn callbacks(&self, diags: &mut Diagnostics) -> Vec<Stmt> {
        if self.parsed.callbacks.is_empty() {
            return Vec::new();
        }
        let mut out = Vec::new();
        let mut decorators = Vec::new();
        for cb in &self.parsed.callbacks {
            let cls = self.types.class_of(&cb.name, Flag::In, diags);
            let doc = self.docstring(&cb.doc.lines(0), None);
            out.push(Stmt::Class {
                name: cls.clone(),
                bases: vec!["ctypes.c_void_p".to_string()],
                doc: doc.clone(),
                body: vec![],
            });
            out.push(Stmt::Blank);
            decorators.push(Stmt::assign(
                cls.clone(),
                Value::Expr(self.cfunctype(cb, diags)),
            ));
            if let Some(doc) = doc {
                decorators.push(Stmt::assign(format!("{cls}.__doc__"), Value::Doc(doc)));
            }
        }
        out.push(Stmt::Class {
            name: "CallbackDecorators".to_string(),
            bases: vec!["object".to_string()],
            doc: Some("Class holding various method decorators for callback functions.".to_string()),
            body: decorators,
        });
        out.push(Stmt::code("cb = CallbackDecorators"));
        out.push(Stmt::Blank);
        out
    }

    // -----------------------------------------------------------------------
    // Functions
    // -----------------------------------------------------------------------

    fn func_views(&self, diags: &mut Diagnostics) -> Vec<FuncView<'a>> {
        let parsed = self.parsed;
        parsed
            .funcs
            .iter()
            .map(|f| self.func_view(f, diags))
            .collect()
    }

    fn func_view(&self, f: &'a Func, diags: &mut Diagnostics) -> FuncView<'a> {
        let mut params = Vec::with_capacity(f.params.len());
        for (i, field) in f.params.iter().enumerate() {
            let raw = match field.name() {
                "" if field.as_par().is_some_and(|p| p.ty == "...") => "args".to_string(),
                "" => match f.doc.param_names.get(i) {
                    Some(documented) => documented.clone(),
                    None => {
                        diags.record(
                            DiagnosticKind::MissingParamName,
                            format!("{}: parameter {i} has no name", f.name),
                        );
                        format!("param{i}")
                    }
                },
                name => name.to_string(),
            };
            let view = match field {
                Field::Param(p) => {
                    let flag = Flag::classify(&raw, &p.ty, &f.doc.out);
                    ParamView {
                        class: self.types.class_of(&p.ty, flag, diags),
                        c_type: p.ty.clone(),
                        flag,
                        name: param_name(&raw),
                    }
                }
                Field::Callback(cb) => ParamView {
                    class: self.cfunctype(cb, diags),
                    c_type: cb.return_type.clone(),
                    flag: Flag::In,
                    name: param_name(&raw),
                },
                Field::Struct(s) | Field::Union(s) => {
                    let c_type = format!("{} {}", s.kind.as_str(), s.name);
                    ParamView {
                        class: self.types.class_of(&c_type, Flag::In, diags),
                        c_type,
                        flag: Flag::In,
                        name: param_name(&raw),
                    }
                }
            };
            params.push(view);
        }

        let rtype = self.types.class_of(&f.return_type, Flag::In, diags);
        let (errcheck, result) = if FREE_STRING_FUNCS.contains(&f.name.as_str()) {
            if rtype != "ctypes.c_char_p" {
                diags.record(
                    DiagnosticKind::InvalidReturnType,
                    format!("{} expected to return char* not {}", f.name, f.return_type),
                );
            }
            ("string_result".to_string(), "ctypes.c_void_p".to_string())
        } else if is_defined_class(&rtype) {
            (format!("class_result({rtype})"), "ctypes.c_void_p".to_string())
        } else {
            ("None".to_string(), rtype)
        };

        FuncView {
            func: f,
            params,
            errcheck,
            result,
        }
    }

    fn functions(&self, views: &[FuncView<'_>]) -> Vec<Stmt> {
        let mut out = vec![Stmt::Blank, Stmt::comment("LibVLC __version__ functions #"), Stmt::Blank];
        for view in views {
            let f = view.func;
            let args: Vec<String> = view.in_params(0).map(|p| p.name.clone()).collect();
            let mut flags = view
                .params
                .iter()
                .map(|p| format!("({},)", p.flag.value()))
                .collect::<Vec<_>>()
                .join(", ");
            if !flags.is_empty() {
                flags.push(',');
            }
            let types = std::iter::once(view.result.clone())
                .chain(view.params.iter().map(|p| p.class.clone()))
                .collect::<Vec<_>>()
                .join(", ");
            let name = str_literal(&f.name);
            out.push(Stmt::Def {
                decorators: vec![],
                name: f.name.clone(),
                args: args.clone(),
                doc: self.docstring(&f.doc.lines(0), None),
                body: vec![
                    Stmt::code(format!(
                        "f = _Cfunctions.get({name}, None) or \\\n    _Cfunction({name}, ({flags}), {},\n                {types})",
                        view.errcheck
                    )),
                    Stmt::code(format!("return f({})", args.join(", "))),
                ],
            });
            out.push(Stmt::Blank);
        }
        out
    }

    // -----------------------------------------------------------------------
    // Wrapper classes
    // -----------------------------------------------------------------------

    fn wrappers(&mut self, views: &[FuncView<'_>]) -> Vec<Stmt> {
        let mut grouped: Vec<(&str, &FuncView<'_>)> = views
            .iter()
            .filter_map(|v| {
                let first = v.params.first()?;
                is_defined_class(&first.class).then_some((first.class.as_str(), v))
            })
            .collect();
        grouped.sort_by_key(|(class, _)| *class);

        let mut out = Vec::new();
        let mut i = 0;
        while i < grouped.len() {
            let class = grouped[i].0;
            let end = grouped[i..]
                .iter()
                .position(|(c, _)| *c != class)
                .map_or(grouped.len(), |n| i + n);
            out.push(self.wrapper_class(class, &grouped[i..end]));
            out.push(Stmt::Blank);
            i = end;
        }
        out
    }

    fn wrapper_class(&mut self, class: &str, members: &[(&str, &FuncView<'_>)]) -> Stmt {
        let overrides = self.overrides;
        let over = overrides.get(class);
        let code = over.map(|o| o.code.as_str()).unwrap_or("");
        let prefix = self
            .prefixes
            .get(class)
            .cloned()
            .unwrap_or_else(|| LIBRARY_PREFIX.to_string());

        let mut body = Vec::new();
        if !code.contains("def __new__") {
            body.push(Stmt::Def {
                decorators: vec![],
                name: "__new__".to_string(),
                args: vec!["cls".to_string(), "ptr=_internal_guard".to_string()],
                doc: Some("(INTERNAL) ctypes wrapper constructor.".to_string()),
                body: vec![Stmt::code("return _Constructor(cls, ptr)")],
            });
            body.push(Stmt::Blank);
        }
        if !code.trim().is_empty() {
            body.push(Stmt::Verbatim(code.to_string()));
        }

        for (_, view) in members {
            let f = view.func;
            *self.wrapped.entry(f.name.clone()).or_default() += 1;
            let meth = strip_prefix(&f.name, &prefix);
            if over.is_some_and(|o| o.defines(&meth)) {
                debug!(class, method = %meth, "method overridden");
                continue;
            }

            let mut args = vec!["self".to_string()];
            let mut call = vec!["self".to_string()];
            for p in view.in_params(1) {
                args.push(p.name.clone());
                if p.c_type == "char*" {
                    call.push(format!("str_to_bytes({})", p.name));
                } else {
                    call.push(p.name.clone());
                }
            }
            let decorators = if meth.ends_with("event_manager") {
                vec!["memoize_parameterless".to_string()]
            } else {
                vec![]
            };
            body.push(Stmt::Def {
                decorators,
                name: meth.clone(),
                args,
                doc: self.docstring(&f.doc.lines(1), Some(&prefix)),
                body: vec![Stmt::code(format!("return {}({})", f.name, call.join(", ")))],
            });
            body.push(Stmt::Blank);

            if meth == "count" {
                body.push(Stmt::Def {
                    decorators: vec![],
                    name: "__len__".to_string(),
                    args: vec!["self".to_string()],
                    doc: None,
                    body: vec![Stmt::code(format!("return {}(self)", f.name))],
                });
                body.push(Stmt::Blank);
            } else if meth.ends_with("item_at_index") {
                body.push(Stmt::Def {
                    decorators: vec![],
                    name: "__getitem__".to_string(),
                    args: vec!["self".to_string(), "i".to_string()],
                    doc: None,
                    body: vec![Stmt::code(format!("return {}(self, i)", f.name))],
                });
                body.push(Stmt::Blank);
                body.push(Stmt::Def {
                    decorators: vec![],
                    name: "__iter__".to_string(),
                    args: vec!["self".to_string()],
                    doc: None,
                    body: vec![Stmt::code("for i in range(len(self)):\n    yield self[i]")],
                });
                body.push(Stmt::Blank);
            }
        }
        while body.last() == Some(&Stmt::Blank) {
            body.pop();
        }

        Stmt::Class {
            name: class.to_string(),
            bases: vec!["_Ctype".to_string()],
            doc: Some(
                over.and_then(|o| o.doc.clone())
                    .unwrap_or_else(|| NA.to_string()),
            ),
            body,
        }
    }

    // -----------------------------------------------------------------------
    // Completeness report
    // -----------------------------------------------------------------------

    fn unwrapped_report(&self) -> Vec<Stmt> {
        let mut out = Vec::new();
        if !self.parsed.denied.is_empty() {
            out.push(Stmt::Blank);
            out.push(Stmt::comment(format!(
                "{} function(s) blacklisted:",
                self.parsed.denied.len()
            )));
            for (name, ret) in &self.parsed.denied {
                out.push(Stmt::comment(format!(" {name} ({ret})")));
            }
        }
        let mut unwrapped: Vec<&str> = self
            .parsed
            .funcs
            .iter()
            .filter(|f| self.wrapped_count(&f.name) == 0)
            .map(|f| f.name.as_str())
            .collect();
        unwrapped.sort_unstable();
        if !unwrapped.is_empty() {
            out.push(Stmt::Blank);
            out.push(Stmt::comment(format!(
                "{} function(s) not wrapped as methods:",
                unwrapped.len()
            )));
            out.extend(unwrapped.iter().map(|name| Stmt::comment(format!(" {name}"))));
        }
        out.push(Stmt::Blank);
        out
    }
}

/// Method name for a function: drop the class prefix, then the library prefix.
fn strip_prefix(name: &str, class_prefix: &str) -> String {
    name.replace(class_prefix, "").replace(LIBRARY_PREFIX, "")
}
