//! Integer constant-expression evaluation over tree-sitter expression nodes.

use std::collections::HashMap;

use anyhow::{Result, anyhow, bail};
use tree_sitter::Node;

/// Evaluate an enumerator value expression. Identifiers resolve through
/// `env`, which holds the enumerators seen so far.
pub fn eval_expr(node: Node<'_>, source: &str, env: &HashMap<String, i64>) -> Result<i64> {
    let text = &source[node.byte_range()];
    match node.kind() {
        "number_literal" => parse_int_literal(text)
            .ok_or_else(|| anyhow!("not an integer literal: {text}")),
        "char_literal" => parse_char_literal(text),
        "identifier" => env
            .get(text)
            .copied()
            .ok_or_else(|| anyhow!("unknown identifier {text}")),
        "parenthesized_expression" => {
            let inner = node
                .named_child(0)
                .ok_or_else(|| anyhow!("empty parentheses"))?;
            eval_expr(inner, source, env)
        }
        "cast_expression" => {
            let value = field(node, "value")?;
            eval_expr(value, source, env)
        }
        "unary_expression" => {
            let op = field(node, "operator")?.kind();
            let v = eval_expr(field(node, "argument")?, source, env)?;
            match op {
                "-" => Ok(v.wrapping_neg()),
                "+" => Ok(v),
                "~" => Ok(!v),
                "!" => Ok((v == 0) as i64),
                _ => bail!("unsupported unary operator {op}"),
            }
        }
        "binary_expression" => {
            let op = field(node, "operator")?.kind();
            let l = eval_expr(field(node, "left")?, source, env)?;
            let r = eval_expr(field(node, "right")?, source, env)?;
            binary(op, l, r)
        }
        "conditional_expression" => {
            let cond = eval_expr(field(node, "condition")?, source, env)?;
            let branch = if cond != 0 {
                field(node, "consequence")?
            } else {
                field(node, "alternative")?
            };
            eval_expr(branch, source, env)
        }
        kind => bail!("unsupported expression {kind}: {text}"),
    }
}

fn field<'t>(node: Node<'t>, name: &str) -> Result<Node<'t>> {
    node.child_by_field_name(name)
        .ok_or_else(|| anyhow!("{} without {name}", node.kind()))
}

fn binary(op: &str, l: i64, r: i64) -> Result<i64> {
    Ok(match op {
        "+" => l.wrapping_add(r),
        "-" => l.wrapping_sub(r),
        "*" => l.wrapping_mul(r),
        "/" | "%" if r == 0 => bail!("division by zero"),
        "/" => l.wrapping_div(r),
        "%" => l.wrapping_rem(r),
        "<<" => l.wrapping_shl(r as u32),
        ">>" => l.wrapping_shr(r as u32),
        "&" => l & r,
        "|" => l | r,
        "^" => l ^ r,
        "&&" => (l != 0 && r != 0) as i64,
        "||" => (l != 0 || r != 0) as i64,
        "==" => (l == r) as i64,
        "!=" => (l != r) as i64,
        "<" => (l < r) as i64,
        ">" => (l > r) as i64,
        "<=" => (l <= r) as i64,
        ">=" => (l >= r) as i64,
        _ => bail!("unsupported binary operator {op}"),
    })
}

/// Parse a C integer literal: decimal, `0x` hex, `0b` binary or leading-zero
/// octal, with optional `u`/`l` suffixes.
pub fn parse_int_literal(s: &str) -> Option<i64> {
    let s = s.trim().trim_end_matches(['u', 'U', 'l', 'L']).replace('\'', "");
    if let Some(magnitude) = s.strip_prefix('-') {
        return parse_int_literal(magnitude).map(i64::wrapping_neg);
    }
    let s = s.strip_prefix('+').unwrap_or(&s);
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16).ok().map(|v| v as i64)
    } else if let Some(bin) = s.strip_prefix("0b").or_else(|| s.strip_prefix("0B")) {
        u64::from_str_radix(bin, 2).ok().map(|v| v as i64)
    } else if s.len() > 1 && s.starts_with('0') {
        i64::from_str_radix(&s[1..], 8).ok()
    } else {
        s.parse::<i64>().ok()
    }
}

/// Ordinal of a character literal such as `'r'` or `'\n'`.
fn parse_char_literal(text: &str) -> Result<i64> {
    let start = text
        .find('\'')
        .ok_or_else(|| anyhow!("malformed character literal {text}"))?;
    let inner = text[start + 1..]
        .strip_suffix('\'')
        .ok_or_else(|| anyhow!("malformed character literal {text}"))?;
    let Some(esc) = inner.strip_prefix('\\') else {
        let mut chars = inner.chars();
        return match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c as i64),
            _ => bail!("multi-character literal {text}"),
        };
    };
    let value = match esc {
        "n" => 10,
        "t" => 9,
        "r" => 13,
        "0" => 0,
        "a" => 7,
        "b" => 8,
        "f" => 12,
        "v" => 11,
        "\\" => 92,
        "'" => 39,
        "\"" => 34,
        "?" => 63,
        _ => {
            if let Some(hex) = esc.strip_prefix('x') {
                i64::from_str_radix(hex, 16)?
            } else {
                i64::from_str_radix(esc, 8)?
            }
        }
    };
    Ok(value)
}

/// Render `value` as Python's `hex()` would.
pub fn python_hex(value: i64) -> String {
    if value < 0 {
        format!("-0x{:x}", value.unsigned_abs())
    } else {
        format!("0x{value:x}")
    }
}
