//! Minimal Python statement tree and its renderer.
//!
//! The emitter builds [`Stmt`] values; indentation, docstring quoting and
//! string-literal escaping happen only here.

const INDENT: &str = "    ";

/// Python reserved words.
pub const KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if",
    "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try",
    "while", "with", "yield",
];

pub fn is_keyword(name: &str) -> bool {
    KEYWORDS.contains(&name)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    Class {
        name: String,
        bases: Vec<String>,
        doc: Option<String>,
        body: Vec<Stmt>,
    },
    Def {
        decorators: Vec<String>,
        name: String,
        args: Vec<String>,
        doc: Option<String>,
        body: Vec<Stmt>,
    },
    Assign {
        target: String,
        value: Value,
    },
    /// One logical line. Embedded newlines start continuation lines, each
    /// indented at the current depth plus whatever the text itself carries.
    Code(String),
    /// Text inserted as-is, without re-indentation.
    Verbatim(String),
    Comment(String),
    Blank,
}

/// Right-hand side of an assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Expr(String),
    /// Triple-quoted string, laid out like a docstring.
    Doc(String),
    /// One item per line, trailing commas.
    Tuple(Vec<String>),
    /// One `key: value` pair per line, trailing commas.
    Dict(Vec<(String, String)>),
}

impl Stmt {
    pub fn code(text: impl Into<String>) -> Self {
        Stmt::Code(text.into())
    }

    pub fn assign(target: impl Into<String>, value: Value) -> Self {
        Stmt::Assign {
            target: target.into(),
            value,
        }
    }

    pub fn comment(text: impl Into<String>) -> Self {
        Stmt::Comment(text.into())
    }
}

/// Quote `s` as a single-quoted Python string literal.
pub fn str_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Make `text` safe inside a `'''` string.
fn escape_docstring(text: &str) -> String {
    text.replace('\\', "\\\\").replace("'''", "\\'\\'\\'")
}

pub fn render(stmts: &[Stmt]) -> String {
    let mut r = Renderer::default();
    r.block(stmts);
    r.out
}

#[derive(Default)]
struct Renderer {
    out: String,
    depth: usize,
}

impl Renderer {
    fn line(&mut self, text: &str) {
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.out.push_str(INDENT);
            }
            self.out.push_str(text);
        }
        self.out.push('\n');
    }

    fn block(&mut self, stmts: &[Stmt]) {
        for stmt in stmts {
            self.stmt(stmt);
        }
    }

    fn stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Class {
                name,
                bases,
                doc,
                body,
            } => {
                if bases.is_empty() {
                    self.line(&format!("class {name}:"));
                } else {
                    self.line(&format!("class {name}({}):", bases.join(", ")));
                }
                self.suite(doc.as_deref(), body);
            }
            Stmt::Def {
                decorators,
                name,
                args,
                doc,
                body,
            } => {
                for d in decorators {
                    self.line(&format!("@{d}"));
                }
                self.line(&format!("def {name}({}):", args.join(", ")));
                self.suite(doc.as_deref(), body);
            }
            Stmt::Assign { target, value } => self.assign(target, value),
            Stmt::Code(text) => {
                for l in text.lines() {
                    self.line(l);
                }
            }
            Stmt::Verbatim(text) => {
                self.out.push_str(text);
                if !text.ends_with('\n') {
                    self.out.push('\n');
                }
            }
            Stmt::Comment(text) => self.line(&format!("# {text}")),
            Stmt::Blank => self.line(""),
        }
    }

    /// Indented body of a class or def, with its docstring.
    fn suite(&mut self, doc: Option<&str>, body: &[Stmt]) {
        self.depth += 1;
        if let Some(doc) = doc {
            self.triple_quoted("", doc);
        }
        if body.is_empty() {
            self.line("pass");
        } else {
            self.block(body);
        }
        self.depth -= 1;
    }

    /// `'''first line` ... `'''`, continuation lines at the current depth.
    fn triple_quoted(&mut self, lead: &str, text: &str) {
        let text = escape_docstring(text);
        let mut lines = text.lines();
        let first = lines.next().unwrap_or("");
        self.line(&format!("{lead}'''{first}"));
        for l in lines {
            self.line(l);
        }
        self.line("'''");
    }

    fn assign(&mut self, target: &str, value: &Value) {
        match value {
            Value::Expr(expr) => self.line(&format!("{target} = {expr}")),
            Value::Doc(text) => self.triple_quoted(&format!("{target} = "), text),
            Value::Tuple(items) if items.is_empty() => self.line(&format!("{target} = ()")),
            Value::Tuple(items) => {
                self.line(&format!("{target} = ("));
                self.depth += 1;
                for item in items {
                    self.line(&format!("{item},"));
                }
                self.depth -= 1;
                self.line(")");
            }
            Value::Dict(pairs) if pairs.is_empty() => self.line(&format!("{target} = {{}}")),
            Value::Dict(pairs) => {
                self.line(&format!("{target} = {{"));
                self.depth += 1;
                for (k, v) in pairs {
                    self.line(&format!("{k}: {v},"));
                }
                self.depth -= 1;
                self.line("}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_with_docstring_and_method() {
        let stmts = vec![Stmt::Class {
            name: "Media".into(),
            bases: vec!["_Ctype".into()],
            doc: Some("Create a media.\nSee also.".into()),
            body: vec![Stmt::Def {
                decorators: vec!["memoize_parameterless".into()],
                name: "event_manager".into(),
                args: vec!["self".into()],
                doc: None,
                body: vec![Stmt::code("return libvlc_media_event_manager(self)")],
            }],
        }];
        let expected = "\
class Media(_Ctype):
    '''Create a media.
    See also.
    '''
    @memoize_parameterless
    def event_manager(self):
        return libvlc_media_event_manager(self)
";
        assert_eq!(render(&stmts), expected);
    }

    #[test]
    fn empty_body_renders_pass() {
        let stmts = vec![Stmt::Class {
            name: "Rect".into(),
            bases: vec!["ctypes.Structure".into()],
            doc: None,
            body: vec![],
        }];
        assert_eq!(render(&stmts), "class Rect(ctypes.Structure):\n    pass\n");
    }

    #[test]
    fn tuple_and_dict_values() {
        let stmts = vec![
            Stmt::assign("S._fields_", Value::Tuple(vec!["('a', ctypes.c_int)".into()])),
            Stmt::assign("E._enum_names_", Value::Dict(vec![])),
            Stmt::assign("T._fields_", Value::Tuple(vec![])),
        ];
        let expected = "\
S._fields_ = (
    ('a', ctypes.c_int),
)
E._enum_names_ = {}
T._fields_ = ()
";
        assert_eq!(render(&stmts), expected);
    }

    #[test]
    fn docstrings_are_escaped() {
        let stmts = vec![Stmt::assign("Cb.__doc__", Value::Doc("a '''quoted''' \\path".into()))];
        assert_eq!(
            render(&stmts),
            "Cb.__doc__ = '''a \\'\\'\\'quoted\\'\\'\\' \\\\path\n'''\n"
        );
    }

    #[test]
    fn string_literals() {
        assert_eq!(str_literal("it's"), "'it\\'s'");
        assert_eq!(str_literal("a\nb"), "'a\\nb'");
    }

    #[test]
    fn continuation_lines_keep_depth() {
        let stmts = vec![Stmt::Def {
            decorators: vec![],
            name: "f".into(),
            args: vec![],
            doc: None,
            body: vec![Stmt::code("x = a or \\\n    b")],
        }];
        assert_eq!(render(&stmts), "def f():\n    x = a or \\\n        b\n");
    }
}
