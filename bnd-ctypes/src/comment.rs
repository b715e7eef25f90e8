//! Doxygen comments: extraction from the syntax tree and conversion to
//! Sphinx docstring sections.

use tree_sitter::Node;

const OUT_MARKER: &str = "[OUT]";
const OUT_FILLER: &str = "pointer to get the ";

/// The cleaned Javadoc-style comment immediately preceding `node`, or an
/// empty string. Plain `/* */`, `//` and `/***` banner comments are not
/// documentation.
pub fn doc_comment(node: Node<'_>, source: &str) -> String {
    let Some(prev) = node.prev_sibling() else {
        return String::new();
    };
    if prev.kind() != "comment" {
        return String::new();
    }
    let text = &source[prev.byte_range()];
    if !text.starts_with("/**") || text.starts_with("/***") || text == "/**/" {
        return String::new();
    }
    clean_comment(text)
}

/// Strip comment delimiters and leading `*` decoration.
pub fn clean_comment(raw: &str) -> String {
    let body = raw.strip_prefix("/**").unwrap_or(raw);
    let body = body.strip_suffix("*/").unwrap_or(body);
    let lines: Vec<&str> = body
        .lines()
        .map(|l| {
            let l = l.trim();
            if l == "*" {
                ""
            } else {
                l.strip_prefix("* ").unwrap_or(l).trim()
            }
        })
        .collect();
    let start = lines.iter().position(|l| !l.is_empty());
    let end = lines.iter().rposition(|l| !l.is_empty());
    match (start, end) {
        (Some(s), Some(e)) => lines[s..=e].join("\n"),
        _ => String::new(),
    }
}

/// Append a period unless `text` already ends in punctuation.
pub fn endot(text: &str) -> String {
    match text.chars().last() {
        None => String::new(),
        Some('.' | ',' | ';' | ':' | '!' | '?' | ')') => text.to_string(),
        Some(_) => format!("{text}."),
    }
}

/// Doc comment split into Sphinx sections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocSections {
    /// Narrative lines before the first tag.
    pub heads: Vec<String>,
    /// `:param name: text` lines, in declaration order.
    pub params: Vec<String>,
    /// `:return:`, `:version:` and `:bug:` lines.
    pub tails: Vec<String>,
    /// Names of parameters documented as `[OUT]`.
    pub out: Vec<String>,
    /// Every name documented with `@param`, `[OUT]` ones included.
    pub param_names: Vec<String>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Section {
    Head,
    Param,
    Return,
    Version,
    Bug,
    Out,
}

impl DocSections {
    pub fn from_doxygen(docs: &str) -> Self {
        let mut heads: Vec<String> = Vec::new();
        let mut params: Vec<String> = Vec::new();
        let mut returns: Vec<String> = Vec::new();
        let mut versions: Vec<String> = Vec::new();
        let mut bugs: Vec<String> = Vec::new();
        let mut out_lines: Vec<String> = Vec::new();
        let mut param_names = Vec::new();
        let mut section = Section::Head;
        let mut in_code = false;

        for raw in docs.lines() {
            let trimmed = raw.trim();
            if is_code_fence(trimmed) {
                if in_code {
                    heads.push(String::new());
                } else {
                    heads.push("::".to_string());
                    heads.push(String::new());
                }
                in_code = !in_code;
                continue;
            }
            if in_code {
                heads.push(format!("    {}", raw.trim_end()));
                continue;
            }

            let line = normalize(trimmed);
            if let Some(at) = line.find("@param") {
                let rest = line[at + "@param".len()..].trim_start();
                let rest = strip_direction(rest);
                let (name, text) = split_word(rest);
                if !name.is_empty() {
                    param_names.push(name.to_string());
                }
                if line.contains(OUT_MARKER) {
                    let text = text.replace(OUT_MARKER, "").replace(OUT_FILLER, "");
                    out_lines.push(collapse(&format!("{name} {text}")));
                    section = Section::Out;
                } else {
                    params.push(format!(":param {name}: {}", text.trim()));
                    section = Section::Param;
                }
            } else if let Some(rest) = tag_rest(&line, &["@return", "@retval", "@returns"]) {
                returns.push(format!(":return: {rest}"));
                section = Section::Return;
            } else if let Some(rest) = tag_rest(&line, &["@version"]) {
                versions.push(format!(":version: {rest}"));
                section = Section::Version;
            } else if let Some(rest) = tag_rest(&line, &["@bug"]) {
                bugs.push(format!(":bug: {rest}"));
                section = Section::Bug;
            } else if section == Section::Head {
                heads.push(line);
            } else if !line.is_empty() {
                let target = match section {
                    Section::Param => params.last_mut(),
                    Section::Return => returns.last_mut(),
                    Section::Version => versions.last_mut(),
                    Section::Bug => bugs.last_mut(),
                    Section::Out => out_lines.last_mut(),
                    Section::Head => None,
                };
                if let Some(last) = target {
                    last.push(' ');
                    last.push_str(&line);
                }
            }
        }

        while heads.last().is_some_and(|l| l.is_empty()) {
            heads.pop();
        }
        while heads.first().is_some_and(|l| l.is_empty()) {
            heads.remove(0);
        }
        if let Some(last) = heads.last_mut()
            && !last.starts_with("    ")
        {
            *last = endot(last);
        }

        let out: Vec<String> = out_lines
            .iter()
            .filter_map(|l| l.split_whitespace().next().map(str::to_string))
            .collect();
        if !out_lines.is_empty() {
            returns = vec![format!(":return: {}", out_lines.join(", "))];
        }

        let tails = returns
            .into_iter()
            .chain(versions)
            .chain(bugs)
            .map(|l| endot(&l))
            .collect();
        Self {
            heads,
            params: params.iter().map(|l| endot(l)).collect(),
            tails,
            out,
            param_names,
        }
    }

    /// Docstring lines, skipping the first `skip` documented parameters
    /// (the `self` of a method).
    pub fn lines(&self, skip: usize) -> Vec<String> {
        self.heads
            .iter()
            .chain(self.params.iter().skip(skip))
            .chain(self.tails.iter())
            .cloned()
            .collect()
    }
}

fn is_code_fence(line: &str) -> bool {
    matches!(line, "@code" | "@endcode" | "\\code" | "\\endcode" | "~~~" | "```")
        || line.starts_with("~~~{")
        || line.starts_with("```c")
}

fn strip_direction(rest: &str) -> &str {
    ["[in]", "[out]", "[in,out]"]
        .iter()
        .find_map(|d| rest.strip_prefix(d))
        .map(str::trim_start)
        .unwrap_or(rest)
}

fn split_word(s: &str) -> (&str, &str) {
    match s.find(char::is_whitespace) {
        Some(i) => (&s[..i], &s[i..]),
        None => (s, ""),
    }
}

/// Text following the first of `tags` found at the start of `line`.
fn tag_rest<'a>(line: &'a str, tags: &[&str]) -> Option<&'a str> {
    tags.iter().find_map(|t| {
        let rest = line.strip_prefix(t)?;
        (rest.is_empty() || rest.starts_with(char::is_whitespace)).then(|| rest.trim())
    })
}

fn collapse(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Inline Doxygen markup → Sphinx.
fn normalize(line: &str) -> String {
    let mut s = line
        .replace("<b>", "**")
        .replace("</b>", "**")
        .replace("@{", "")
        .replace("@}", "")
        .replace("@see", "See")
        .replace("\\see", "See")
        .replace("\\ingroup", "")
        .replace("\\defgroup", "")
        .replace("\\file", "")
        .replace("\\note", "@note")
        .replace("\\warning", "@warning")
        .replace("\\param", "@param")
        .replace("\\return", "@return")
        .replace("\\version", "@version")
        .replace("\\bug", "@bug")
        .replace("@note", ".. note::")
        .replace("@warning", ".. warning::")
        .replace("NULL", "None");
    if let Some(rest) = s.strip_prefix("@deprecated") {
        s = format!(".. deprecated::{rest}");
    }
    s.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_strips_decoration() {
        let raw = "/**\n * Some Doxygen\n * documentation\n *\n * more\n */";
        assert_eq!(clean_comment(raw), "Some Doxygen\ndocumentation\n\nmore");
        assert_eq!(clean_comment("/** one line */"), "one line");
        assert_eq!(clean_comment("/** */"), "");
    }

    #[test]
    fn endot_adds_period_once() {
        assert_eq!(endot("Play"), "Play.");
        assert_eq!(endot("Play."), "Play.");
        assert_eq!(endot(""), "");
    }

    #[test]
    fn sections_from_doxygen() {
        let docs = "Get the <b>current</b> time.\n\
                    @param p_mi the Media Player\n\
                    continued here\n\
                    @return the time or -1 if NULL\n\
                    @version LibVLC 3.0.0 or later";
        let doc = DocSections::from_doxygen(docs);
        assert_eq!(doc.heads, vec!["Get the **current** time."]);
        assert_eq!(doc.params, vec![":param p_mi: the Media Player continued here."]);
        assert_eq!(
            doc.tails,
            vec![
                ":return: the time or -1 if None.",
                ":version: LibVLC 3.0.0 or later."
            ]
        );
        assert!(doc.out.is_empty());
        assert_eq!(doc.param_names, vec!["p_mi"]);
    }

    #[test]
    fn out_params_replace_return() {
        let docs = "Get video size.\n\
                    @param p_mi media player\n\
                    @param px [OUT] pointer to get the pixel width\n\
                    @param py [OUT] pointer to get the pixel height\n\
                    @return 0 on success";
        let doc = DocSections::from_doxygen(docs);
        assert_eq!(doc.out, vec!["px", "py"]);
        assert_eq!(doc.params.len(), 1);
        assert_eq!(doc.tails, vec![":return: px pixel width, py pixel height."]);
        assert_eq!(doc.param_names, vec!["p_mi", "px", "py"]);
    }

    #[test]
    fn notes_and_code_blocks() {
        let docs = "Do it.\n@note careful\nExample:\n@code\nint x = 0;\n@endcode";
        let doc = DocSections::from_doxygen(docs);
        assert_eq!(
            doc.heads,
            vec!["Do it.", ".. note:: careful", "Example:", "::", "", "    int x = 0;"]
        );
    }

    #[test]
    fn method_lines_skip_self_param() {
        let docs = "Stop.\n@param p_mi the player\n@param force whether to force";
        let doc = DocSections::from_doxygen(docs);
        assert_eq!(doc.lines(1), vec!["Stop.", ":param force: whether to force."]);
        assert_eq!(doc.lines(0).len(), 3);
    }
}
