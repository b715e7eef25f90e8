//! Hand-written class code merged into the generated wrapper classes.
//!
//! The override template is a Python file of `class Name:` blocks. Each
//! block's docstring replaces the generated class docstring, and methods it
//! defines are not generated.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

static CLASS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^class\s+(\w+)").unwrap());
static DEF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s+def\s+(\w+)\s*\(").unwrap());

/// One overridden class.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideClass {
    /// Class body without the docstring, indentation kept.
    pub code: String,
    /// Dedented class docstring.
    pub doc: Option<String>,
    /// Names of the methods defined in `code`.
    pub methods: Vec<String>,
}

impl OverrideClass {
    pub fn defines(&self, method: &str) -> bool {
        self.methods.iter().any(|m| m == method)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Overrides {
    classes: BTreeMap<String, OverrideClass>,
}

impl Overrides {
    pub fn parse(text: &str) -> Self {
        let mut blocks: Vec<(String, String)> = Vec::new();
        for line in text.split_inclusive('\n') {
            if let Some(caps) = CLASS_RE.captures(line) {
                blocks.push((caps[1].to_string(), String::new()));
            } else if let Some((_, body)) = blocks.last_mut() {
                body.push_str(line);
            }
        }

        let classes = blocks
            .into_iter()
            .map(|(name, body)| (name, parse_class_body(body)))
            .collect();
        Self { classes }
    }

    pub fn get(&self, class: &str) -> Option<&OverrideClass> {
        self.classes.get(class)
    }

    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }
}

fn parse_class_body(body: String) -> OverrideClass {
    let trimmed = body.trim_start();
    let quote = ["\"\"\"", "'''"].into_iter().find(|q| trimmed.starts_with(q));
    let (doc, code) = match quote {
        Some(q) => {
            let after = &trimmed[q.len()..];
            match after.find(q) {
                Some(end) => (
                    Some(dedent(&after[..end])),
                    after[end + q.len()..].to_string(),
                ),
                None => (None, body),
            }
        }
        None => (None, body),
    };
    // Drop the remainder of the docstring's closing line.
    let code = match code.split_once('\n') {
        Some((first, rest)) if first.trim().is_empty() => rest.to_string(),
        _ => code,
    };
    let methods = DEF_RE
        .captures_iter(&code)
        .map(|c| c[1].to_string())
        .collect();
    OverrideClass { code, doc, methods }
}

/// First line trimmed; following lines lose their common indentation.
fn dedent(doc: &str) -> String {
    let mut lines = doc.lines();
    let first = lines.next().unwrap_or("").trim().to_string();
    let rest: Vec<&str> = lines.collect();
    let indent = rest
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.chars().take_while(|c| c.is_whitespace()).count())
        .min()
        .unwrap_or(0);
    let mut out = vec![first];
    out.extend(rest.iter().map(|l| {
        if l.trim().is_empty() {
            return String::new();
        }
        // Indent is counted in characters, not bytes.
        let start = l.char_indices().nth(indent).map_or(l.len(), |(i, _)| i);
        l[start..].trim_end().to_string()
    }));
    while out.last().is_some_and(|l| l.is_empty()) {
        out.pop();
    }
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const OVERRIDE: &str = r#"class Instance:
    """Create a new Instance instance.

    It may take as parameter either:
      - a string
    """
    def __new__(cls, *args):
        return libvlc_new(len(args), args)

    def media_new(self, mrl):
        return libvlc_media_new_location(self, mrl)

class MediaPlayer:  # comment
    def get_instance(self):
        return self._instance
"#;

    #[test]
    fn multibyte_indentation_is_dedented() {
        let doc = "Summary.\n\u{a0}\u{a0}first\n\u{a0}\u{a0}  nested\n\n";
        assert_eq!(dedent(doc), "Summary.\nfirst\n  nested");
        assert_eq!(dedent("Only\n\u{3000}wide"), "Only\nwide");
    }

    #[test]
    fn classes_docs_and_methods() {
        let o = Overrides::parse(OVERRIDE);
        assert_eq!(o.class_names().collect::<Vec<_>>(), vec!["Instance", "MediaPlayer"]);

        let instance = o.get("Instance").unwrap();
        assert_eq!(
            instance.doc.as_deref(),
            Some("Create a new Instance instance.\n\nIt may take as parameter either:\n  - a string")
        );
        assert_eq!(instance.methods, vec!["__new__", "media_new"]);
        assert!(instance.code.starts_with("    def __new__"));
        assert!(instance.defines("media_new"));

        let player = o.get("MediaPlayer").unwrap();
        assert_eq!(player.doc, None);
        assert_eq!(player.methods, vec!["get_instance"]);
    }
}
