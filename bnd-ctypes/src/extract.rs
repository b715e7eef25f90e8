//! Extraction: tree-sitter C syntax tree → intermediate model types.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use tracing::{debug, info, warn};
use tree_sitter::{Node, Parser, Tree};

use crate::comment::doc_comment;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::eval::{eval_expr, python_hex};
use crate::model::*;
use crate::tables::{LIBRARY_PREFIX, deny_reason};

/// A parsed C source text.
pub struct SourceFile {
    pub path: PathBuf,
    pub text: String,
    tree: Tree,
}

impl SourceFile {
    /// Parse `text` as C. `path` is only used in messages.
    pub fn parse(path: impl Into<PathBuf>, text: impl Into<String>) -> Result<Self> {
        let path = path.into();
        let text = text.into();
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_c::LANGUAGE.into())
            .context("loading the C grammar")?;
        let tree = parser
            .parse(&text, None)
            .ok_or_else(|| anyhow!("tree-sitter gave no tree for {}", path.display()))?;
        if tree.root_node().has_error() {
            warn!(path = %path.display(), "syntax errors in header, affected declarations are skipped");
        }
        Ok(Self { path, text, tree })
    }

    pub fn read(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::parse(path, text)
    }

    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    pub fn text_of(&self, node: Node<'_>) -> &str {
        &self.text[node.byte_range()]
    }

    /// The doc comment attached to `node`.
    pub fn docs(&self, node: Node<'_>) -> String {
        doc_comment(node, &self.text)
    }
}

/// Extract all enums, structs, public functions and callbacks.
pub fn extract(src: &SourceFile, diags: &mut Diagnostics) -> Result<Parsed> {
    let mut denied = BTreeMap::new();
    let enums = collect_enums(src, diags)?;
    let structs = collect_structs(src, diags)?;
    let funcs = collect_functions(src, &mut denied)?;
    let callbacks = collect_callbacks(src, &mut denied)?;

    info!(
        path = %src.path.display(),
        enums = enums.len(),
        structs = structs.len(),
        funcs = funcs.len(),
        callbacks = callbacks.len(),
        denied = denied.len(),
        "extraction complete"
    );

    Ok(Parsed {
        enums,
        structs,
        funcs,
        callbacks,
        version: None,
        denied,
    })
}

// ---------------------------------------------------------------------------
// Tree walking
// ---------------------------------------------------------------------------

/// All nodes of the given kinds, in source order. Function bodies are not
/// entered.
fn descendants<'t>(root: Node<'t>, kinds: &[&str]) -> Vec<Node<'t>> {
    let mut found = Vec::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if kinds.contains(&node.kind()) {
            found.push(node);
        }
        if node.kind() == "compound_statement" {
            continue;
        }
        let mut cursor = node.walk();
        let children: Vec<Node<'t>> = node.children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }
    found
}

/// The node carrying an item's doc comment: the enclosing typedef or
/// declaration if there is one.
fn doc_anchor(node: Node<'_>) -> Node<'_> {
    match node.parent() {
        Some(p) if matches!(p.kind(), "type_definition" | "declaration") => p,
        _ => node,
    }
}

/// Name declared by a (possibly nested) declarator.
fn declarator_name(src: &SourceFile, node: Node<'_>) -> Option<String> {
    let mut node = node;
    loop {
        match node.kind() {
            "identifier" | "field_identifier" | "type_identifier" | "primitive_type" => {
                return Some(src.text_of(node).to_string());
            }
            "parenthesized_declarator" | "attributed_declarator" => {
                let mut cursor = node.walk();
                node = node
                    .named_children(&mut cursor)
                    .find(|c| !matches!(c.kind(), "ms_call_modifier" | "comment" | "attribute_declaration"))?;
            }
            _ => node = node.child_by_field_name("declarator")?,
        }
    }
}

// ---------------------------------------------------------------------------
// Type resolution
// ---------------------------------------------------------------------------

/// A declared type: the normalised type string, per-level constness and
/// the innermost declarator reached.
#[derive(Debug)]
pub struct ResolvedType<'t> {
    pub ty: String,
    pub constness: Vec<bool>,
    pub declarator: Option<Node<'t>>,
}

/// Resolve the type of a node with a `type` field and, optionally, a
/// `declarator` field.
pub fn resolve_type<'t>(src: &'t SourceFile, node: Node<'t>) -> Result<ResolvedType<'t>> {
    resolve_declarator(src, node, node.child_by_field_name("declarator"))
}

/// As [`resolve_type`], for one specific declarator of `node`.
fn resolve_declarator<'t>(
    src: &'t SourceFile,
    node: Node<'t>,
    declarator: Option<Node<'t>>,
) -> Result<ResolvedType<'t>> {
    let type_node = node
        .child_by_field_name("type")
        .ok_or_else(|| anyhow!("{} without a type at byte {}", node.kind(), node.start_byte()))?;
    let mut ty = src
        .text_of(type_node)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    let base_const = {
        let mut cursor = node.walk();
        node.children(&mut cursor)
            .any(|c| c.kind() == "type_qualifier" && src.text_of(c) == "const")
    };
    let mut constness = vec![base_const];

    let mut current = declarator;
    while let Some(decl) = current {
        match decl.kind() {
            "pointer_declarator" | "abstract_pointer_declarator" => {
                ty.push('*');
                let mut cursor = decl.walk();
                let is_const = decl
                    .children(&mut cursor)
                    .any(|c| c.kind() == "type_qualifier" && src.text_of(c) == "const");
                constness.push(is_const);
                current = decl.child_by_field_name("declarator");
            }
            "array_declarator" | "abstract_array_declarator" => {
                let size = decl
                    .child_by_field_name("size")
                    .map(|s| src.text_of(s).trim().to_string())
                    .unwrap_or_default();
                ty.push_str(&format!("[{size}]"));
                current = decl.child_by_field_name("declarator");
            }
            "init_declarator" => current = decl.child_by_field_name("declarator"),
            _ => break,
        }
    }

    Ok(ResolvedType {
        ty: ty.replace("struct ", ""),
        constness,
        declarator: current,
    })
}

fn is_function_declarator(node: Node<'_>) -> bool {
    matches!(
        node.kind(),
        "function_declarator" | "abstract_function_declarator"
    )
}

/// Unwrap parentheses around a declarator, e.g. the `(*cb)` of a
/// function pointer.
fn unparenthesize(node: Node<'_>) -> Node<'_> {
    let mut node = node;
    while matches!(
        node.kind(),
        "parenthesized_declarator" | "abstract_parenthesized_declarator"
    ) {
        let mut cursor = node.walk();
        let inner = node
            .named_children(&mut cursor)
            .find(|c| !matches!(c.kind(), "ms_call_modifier" | "comment"));
        match inner {
            Some(inner) => node = inner,
            None => break,
        }
    }
    node
}

/// Resolve a declarator through any function-pointer wrapping: returns the
/// return type and the function declarator, if the declared entity is a
/// function or pointer to function.
fn resolve_function<'t>(
    src: &'t SourceFile,
    node: Node<'t>,
    declarator: Option<Node<'t>>,
) -> Result<Option<(ResolvedType<'t>, Node<'t>)>> {
    let resolved = resolve_declarator(src, node, declarator)?;
    match resolved.declarator {
        Some(func) if is_function_declarator(func) => Ok(Some((resolved, func))),
        _ => Ok(None),
    }
}

// ---------------------------------------------------------------------------
// Fields and parameters
// ---------------------------------------------------------------------------

/// Parse one `parameter_declaration`, `field_declaration` or
/// `variadic_parameter` into zero or more fields.
///
/// Anonymous nested composites are spliced into the result; named ones
/// become a single nested field.
pub fn parse_member(src: &SourceFile, node: Node<'_>) -> Result<Vec<Field>> {
    if node.kind() == "variadic_parameter" {
        return Ok(vec![Field::Param(Par::new("", "...", vec![false]))]);
    }
    let type_node = node
        .child_by_field_name("type")
        .ok_or_else(|| anyhow!("{} without a type at byte {}", node.kind(), node.start_byte()))?;

    let declarators: Vec<Node<'_>> = {
        let mut cursor = node.walk();
        node.children_by_field_name("declarator", &mut cursor).collect()
    };

    if matches!(type_node.kind(), "struct_specifier" | "union_specifier")
        && let Some(body) = type_node.child_by_field_name("body")
    {
        let kind = composite_kind(type_node);
        let fields = parse_composite_body(src, body)?;
        let Some(first) = declarators.first() else {
            return Ok(fields);
        };
        let name = declarator_name(src, *first).unwrap_or_default();
        return Ok(vec![Field::nested(Struct {
            name,
            kind,
            fields,
            docs: src.docs(node),
        })]);
    }

    if declarators.is_empty() {
        let resolved = resolve_declarator(src, node, None)?;
        return Ok(vec![Field::Param(Par::new("", resolved.ty, resolved.constness))]);
    }

    let mut fields = Vec::with_capacity(declarators.len());
    for decl in declarators {
        if let Some((resolved, func)) = resolve_function(src, node, Some(decl))? {
            fields.push(Field::Callback(function_from(src, node, resolved, func)?));
            continue;
        }
        let resolved = resolve_declarator(src, node, Some(decl))?;
        let name = resolved
            .declarator
            .and_then(|d| declarator_name(src, unparenthesize(d)))
            .unwrap_or_default();
        fields.push(Field::Param(Par::new(name, resolved.ty, resolved.constness)));
    }
    Ok(fields)
}

/// Build a [`Func`] from a function declarator and its resolved return type.
fn function_from<'t>(
    src: &'t SourceFile,
    doc_node: Node<'t>,
    resolved: ResolvedType<'t>,
    func: Node<'t>,
) -> Result<Func> {
    let name = func
        .child_by_field_name("declarator")
        .and_then(|d| declarator_name(src, unparenthesize(d)))
        .unwrap_or_default();
    let params = match func.child_by_field_name("parameters") {
        Some(list) => parse_parameter_list(src, list)?,
        None => bail!("function declarator {name} without parameters"),
    };
    Ok(Func::new(name, resolved.ty, params, src.docs(doc_node)))
}

/// Parse a `parameter_list`. A lone unnamed `void` means no parameters.
pub fn parse_parameter_list(src: &SourceFile, list: Node<'_>) -> Result<Vec<Field>> {
    let mut params = Vec::new();
    let mut cursor = list.walk();
    for child in list.named_children(&mut cursor) {
        if child.has_error() {
            debug!(byte = child.start_byte(), "skipping malformed parameter");
            continue;
        }
        match child.kind() {
            "parameter_declaration" | "variadic_parameter" => {
                params.extend(parse_member(src, child)?)
            }
            "comment" => {}
            other => debug!(kind = other, "skipping parameter list entry"),
        }
    }
    if let [Field::Param(p)] = params.as_slice()
        && p.ty == "void"
        && p.name.is_empty()
    {
        params.clear();
    }
    Ok(params)
}

fn parse_composite_body(src: &SourceFile, body: Node<'_>) -> Result<Vec<Field>> {
    let mut fields = Vec::new();
    let mut cursor = body.walk();
    for child in body.named_children(&mut cursor) {
        if child.has_error() {
            debug!(byte = child.start_byte(), "skipping malformed field");
            continue;
        }
        match child.kind() {
            "field_declaration" => fields.extend(parse_member(src, child)?),
            "comment" => {}
            other => debug!(kind = other, "skipping struct body entry"),
        }
    }
    Ok(fields)
}

fn composite_kind(node: Node<'_>) -> StructKind {
    if node.kind() == "union_specifier" {
        StructKind::Union
    } else {
        StructKind::Struct
    }
}

/// Typedef name if `specifier` sits in a typedef, else its tag.
fn specifier_name(src: &SourceFile, specifier: Node<'_>) -> Option<String> {
    if let Some(parent) = specifier.parent()
        && parent.kind() == "type_definition"
    {
        let decl = parent.child_by_field_name("declarator")?;
        return declarator_name(src, decl);
    }
    specifier
        .child_by_field_name("name")
        .map(|n| src.text_of(n).to_string())
}

// ---------------------------------------------------------------------------
// Collection: one pass per declaration kind
// ---------------------------------------------------------------------------

/// Collect every named, prefixed enum with its enumerator values.
pub fn collect_enums(src: &SourceFile, diags: &mut Diagnostics) -> Result<Vec<Enum>> {
    let mut enums = Vec::new();
    for node in descendants(src.root(), &["enum_specifier"]) {
        let Some(body) = node.child_by_field_name("body") else {
            continue;
        };
        let Some(name) = specifier_name(src, node) else {
            debug!("skipping anonymous enum");
            continue;
        };
        if !name.starts_with(LIBRARY_PREFIX) {
            continue;
        }
        let vals = enum_values(src, &name, body, diags);
        if vals.is_empty() {
            debug!(name = %name, "skipping enum without values");
            continue;
        }
        debug!(name = %name, vals = vals.len(), "extracted enum");
        enums.push(Enum {
            name,
            vals,
            docs: src.docs(doc_anchor(node)),
        });
    }
    Ok(enums)
}

fn enum_values(src: &SourceFile, enum_name: &str, body: Node<'_>, diags: &mut Diagnostics) -> Vec<Val> {
    let children: Vec<Node<'_>> = {
        let mut cursor = body.walk();
        body.children(&mut cursor).collect()
    };
    let is_error = |i: usize| children.get(i).is_some_and(|n| n.is_error());

    let mut env: HashMap<String, i64> = HashMap::new();
    let mut counter: i64 = -1;
    let mut vals = Vec::new();
    let mut well_formed = HashSet::new();
    for (i, child) in children.iter().enumerate() {
        if child.kind() != "enumerator" {
            continue;
        }
        let Some(name_node) = child.child_by_field_name("name") else {
            continue;
        };
        if child.has_error() || (i > 0 && is_error(i - 1)) || is_error(i + 1) {
            continue;
        }
        let c_name = src.text_of(name_node);
        well_formed.insert(c_name);

        let value_text = match child.child_by_field_name("value") {
            Some(expr) => match eval_expr(expr, &src.text, &env) {
                Ok(v) => {
                    counter = v;
                    let spelled = src.text_of(expr).trim_start();
                    if spelled.starts_with("0x") || spelled.starts_with("0X") {
                        python_hex(v)
                    } else {
                        v.to_string()
                    }
                }
                Err(e) => {
                    diags.record(
                        DiagnosticKind::EnumValue,
                        format!("{enum_name}.{c_name}: {e:#}"),
                    );
                    continue;
                }
            },
            None => {
                counter += 1;
                counter.to_string()
            }
        };
        env.insert(c_name.to_string(), counter);
        vals.push(Val::new(c_name, value_text, Some(enum_name), src.docs(*child)));
    }

    if body.has_error() {
        // The tree around a malformed entry is unreliable, so entries are
        // named from the source text.
        for entry in enum_entries(src.text_of(body)) {
            match leading_identifier(&entry) {
                Some(name) if well_formed.contains(name) => {}
                Some(name) => diags.record(
                    DiagnosticKind::DroppedEnumerator,
                    format!("{enum_name}: dropped malformed enumerator {name}"),
                ),
                None => diags.record(
                    DiagnosticKind::DroppedEnumerator,
                    format!("{enum_name}: malformed entry `{}`", entry.trim()),
                ),
            }
        }
    }
    vals
}

/// Collect every named, prefixed struct or union with at least one field.
///
/// Member initializers (`int a = 1;`) are not C, but appear in headers the
/// generator is fed; such bodies are reparsed without them.
pub fn collect_structs(src: &SourceFile, diags: &mut Diagnostics) -> Result<Vec<Struct>> {
    let mut structs = Vec::new();
    for node in descendants(src.root(), &["struct_specifier", "union_specifier"]) {
        let Some(body) = node.child_by_field_name("body") else {
            continue;
        };
        let Some(name) = specifier_name(src, node) else {
            continue;
        };
        if !name.starts_with(LIBRARY_PREFIX) {
            continue;
        }
        let fields = if body.has_error() {
            recovered_fields(src, &name, node, body, diags)
        } else {
            parse_composite_body(src, body)
        }
        .with_context(|| format!("parsing fields of {name}"))?;
        if fields.is_empty() {
            if body.has_error() {
                diags.record(
                    DiagnosticKind::DroppedField,
                    format!("{name}: no member could be parsed, {} dropped", composite_kind(node).as_str()),
                );
            } else {
                debug!(name = %name, "skipping struct without fields");
            }
            continue;
        }
        debug!(name = %name, fields = fields.len(), "extracted struct");
        structs.push(Struct {
            name,
            kind: composite_kind(node),
            fields,
            docs: src.docs(doc_anchor(node)),
        });
    }
    Ok(structs)
}

/// Fields of a body with syntax errors, read from a reparse of the body
/// with comments and member initializers removed. Members still malformed
/// after that are reported and skipped.
fn recovered_fields(
    src: &SourceFile,
    name: &str,
    specifier: Node<'_>,
    body: Node<'_>,
    diags: &mut Diagnostics,
) -> Result<Vec<Field>> {
    let keyword = composite_kind(specifier).as_str();
    let code = strip_initializers(&blank_comments(src.text_of(body)));
    let reparsed = SourceFile::parse(&src.path, format!("{keyword} {name} {code};"))?;
    let Some(body) = descendants(reparsed.root(), &["struct_specifier", "union_specifier"])
        .into_iter()
        .find_map(|n| n.child_by_field_name("body"))
    else {
        bail!("{keyword} body did not survive reparsing");
    };
    let mut cursor = body.walk();
    for child in body.named_children(&mut cursor) {
        if child.has_error() {
            diags.record(
                DiagnosticKind::DroppedField,
                format!("{name}: dropped malformed member `{}`", reparsed.text_of(child).trim()),
            );
        }
    }
    let fields = parse_composite_body(&reparsed, body)?;
    debug!(name, fields = fields.len(), "recovered fields without initializers");
    Ok(fields)
}

// ---------------------------------------------------------------------------
// Source text recovery
// ---------------------------------------------------------------------------

/// `text` with every comment replaced by a single space. String and
/// character literals are kept intact.
fn blank_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut quote = None;
    let mut escaped = false;
    while let Some(c) = chars.next() {
        if let Some(q) = quote {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        let next = chars.peek().copied();
        match (c, next) {
            ('/', Some('*')) => {
                chars.next();
                let mut prev = ' ';
                for n in chars.by_ref() {
                    if prev == '*' && n == '/' {
                        break;
                    }
                    prev = n;
                }
                out.push(' ');
            }
            ('/', Some('/')) => {
                while chars.next_if(|&n| n != '\n').is_some() {}
                out.push(' ');
            }
            ('\'' | '"', _) => {
                quote = Some(c);
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// Drop every `= initializer` up to the `;` or `,` that ends it. Expects
/// comment-free code.
fn strip_initializers(code: &str) -> String {
    let mut out = String::with_capacity(code.len());
    let mut skipping = false;
    let mut depth = 0usize;
    let mut quote = None;
    let mut escaped = false;
    for c in code.chars() {
        if let Some(q) = quote {
            if !skipping {
                out.push(c);
            }
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '\'' | '"' => quote = Some(c),
            '=' if !skipping => {
                skipping = true;
                depth = 0;
                continue;
            }
            '(' | '[' | '{' if skipping => depth += 1,
            ')' | ']' | '}' if skipping => match depth.checked_sub(1) {
                Some(d) => depth = d,
                None => skipping = false,
            },
            ';' | ',' if skipping && depth == 0 => skipping = false,
            _ => {}
        }
        if !skipping {
            out.push(c);
        }
    }
    out
}

/// The comma separated entries of an enum body `{ ... }`, comments removed.
fn enum_entries(body: &str) -> Vec<String> {
    let code = blank_comments(body);
    let inner = code.trim();
    let inner = inner.strip_prefix('{').unwrap_or(inner);
    let inner = inner.strip_suffix('}').unwrap_or(inner);

    let mut entries = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut quote = None;
    let mut escaped = false;
    for c in inner.chars() {
        if let Some(q) = quote {
            current.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '\'' | '"' => quote = Some(c),
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                entries.push(std::mem::take(&mut current));
                continue;
            }
            _ => {}
        }
        current.push(c);
    }
    entries.push(current);
    entries.retain(|e| !e.trim().is_empty());
    entries
}

/// The C identifier `entry` starts with, ignoring leading whitespace.
fn leading_identifier(entry: &str) -> Option<&str> {
    let entry = entry.trim_start();
    let end = entry
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(entry.len());
    let ident = &entry[..end];
    (!ident.is_empty() && !ident.starts_with(|c: char| c.is_ascii_digit())).then_some(ident)
}

fn is_export_attribute(src: &SourceFile, node: Node<'_>) -> bool {
    let text = src.text_of(node);
    match node.kind() {
        "attribute_specifier" => text.contains("visibility") && text.contains("\"default\""),
        "ms_declspec_modifier" => text.contains("dllexport") || text.contains("dllimport"),
        _ => false,
    }
}

/// Whether a declaration carries the library's export attribute, either
/// in front of the declaration or after the parameter list.
fn is_exported(src: &SourceFile, decl: Node<'_>, func: Node<'_>) -> bool {
    let mut cursor = decl.walk();
    if decl.children(&mut cursor).any(|c| is_export_attribute(src, c)) {
        return true;
    }
    let mut cursor = func.walk();
    func.children(&mut cursor).any(|c| is_export_attribute(src, c))
}

/// Declarations the grammar could not make sense of are skipped whole.
fn is_well_formed(node: Node<'_>) -> bool {
    if node.has_error() {
        warn!(byte = node.start_byte(), kind = node.kind(), "skipping malformed declaration");
        return false;
    }
    node.child_by_field_name("type").is_some()
}

/// Collect exported, prefixed function declarations. Deny-listed ones are
/// recorded in `denied` with their return type.
pub fn collect_functions(
    src: &SourceFile,
    denied: &mut BTreeMap<String, String>,
) -> Result<Vec<Func>> {
    let mut funcs = Vec::new();
    for decl in descendants(src.root(), &["declaration"]) {
        if !is_well_formed(decl) {
            continue;
        }
        let declarator = decl.child_by_field_name("declarator");
        let Some((resolved, func)) = resolve_function(src, decl, declarator)? else {
            continue;
        };
        let Some(name) = func
            .child_by_field_name("declarator")
            .and_then(|d| declarator_name(src, unparenthesize(d)))
        else {
            continue;
        };
        if !name.starts_with(LIBRARY_PREFIX) || !is_exported(src, decl, func) {
            continue;
        }
        if let Some(reason) = deny_reason(&name) {
            debug!(name = %name, reason, "deny-listed function");
            denied.insert(name, resolved.ty);
            continue;
        }
        let f = function_from(src, decl, resolved, func)
            .with_context(|| format!("parsing function {name}"))?;
        debug!(name = %f.name, params = f.params.len(), "extracted function");
        funcs.push(f);
    }
    Ok(funcs)
}

/// Collect prefixed typedefs of function or pointer-to-function type.
pub fn collect_callbacks(
    src: &SourceFile,
    denied: &mut BTreeMap<String, String>,
) -> Result<Vec<Func>> {
    let mut callbacks = Vec::new();
    for typedef in descendants(src.root(), &["type_definition"]) {
        if !is_well_formed(typedef) {
            continue;
        }
        let declarator = typedef.child_by_field_name("declarator");
        let Some((resolved, func)) = resolve_function(src, typedef, declarator)? else {
            continue;
        };
        let Some(name) = func
            .child_by_field_name("declarator")
            .and_then(|d| declarator_name(src, unparenthesize(d)))
        else {
            continue;
        };
        if !name.starts_with(LIBRARY_PREFIX) {
            continue;
        }
        if let Some(reason) = deny_reason(&name) {
            debug!(name = %name, reason, "deny-listed callback");
            denied.insert(name, resolved.ty);
            continue;
        }
        let cb = function_from(src, typedef, resolved, func)
            .with_context(|| format!("parsing callback {name}"))?;
        debug!(name = %cb.name, params = cb.params.len(), "extracted callback");
        callbacks.push(cb);
    }
    Ok(callbacks)
}
