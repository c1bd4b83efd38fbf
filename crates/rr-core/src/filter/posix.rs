//! Rewrites POSIX basic/extended patterns into `regex` crate syntax.
//!
//! Differences handled:
//! - basic syntax: `\( \) \{ \} \|` are operators, bare `( ) { } + ? |` are literals,
//!   `^` anchors only at the start and `$` only at the end of an expression;
//! - a `*` with nothing to repeat is a literal;
//! - bracket expressions: backslash, `[`, `&` and `~` are literals, a leading `]` is a literal,
//!   `[:class:]` passes through, `[.x.]` and `[=x=]` become the literal `x`.
use std::iter::Peekable;
use std::str::Chars;

use rr_model::PatternSyntax;

pub(crate) fn translate(src: &str, syntax: PatternSyntax) -> Result<String, String> {
    let basic = syntax == PatternSyntax::Basic;
    let mut out = String::with_capacity(src.len() + 8);
    let mut chars = src.chars().peekable();
    // true where a `*` would have nothing to repeat
    let mut at_start = true;

    while let Some(c) = chars.next() {
        match c {
            '[' => out.push_str(&bracket(&mut chars)?),
            '\\' => {
                let Some(n) = chars.next() else {
                    return Err("trailing backslash".into());
                };
                match n {
                    '(' | '|' if basic => {
                        out.push(n);
                        at_start = true;
                        continue;
                    }
                    ')' | '{' | '}' if basic => out.push(n),
                    '1'..='9' => return Err("back-references are not supported".into()),
                    'w' | 'W' | 's' | 'S' | 'b' | 'B' => {
                        out.push('\\');
                        out.push(n);
                    }
                    '<' | '>' => out.push_str(r"\b"),
                    _ => push_literal(&mut out, n),
                }
            }
            '*' if at_start => push_literal(&mut out, c),
            '^' if basic && !at_start => push_literal(&mut out, c),
            '^' => {
                out.push(c);
                continue;
            }
            '$' if basic && !at_end(&chars) => push_literal(&mut out, c),
            '(' | ')' | '{' | '}' | '+' | '?' | '|' if basic => push_literal(&mut out, c),
            '(' | '|' => {
                out.push(c);
                at_start = true;
                continue;
            }
            _ => out.push(c),
        }
        at_start = false;
    }
    Ok(out)
}

/// `$` is an anchor in basic syntax only before the end of the pattern,
/// a closing `\)` or an alternation `\|`.
fn at_end(rest: &Peekable<Chars<'_>>) -> bool {
    let mut look = rest.clone();
    match look.next() {
        None => true,
        Some('\\') => matches!(look.next(), Some(')') | Some('|')),
        Some(_) => false,
    }
}

fn bracket(chars: &mut Peekable<Chars<'_>>) -> Result<String, String> {
    let mut out = String::from("[");
    if chars.peek() == Some(&'^') {
        chars.next();
        out.push('^');
    }
    if chars.peek() == Some(&']') {
        chars.next();
        out.push_str(r"\]");
    }
    loop {
        let Some(c) = chars.next() else {
            return Err("unterminated bracket expression".into());
        };
        match c {
            ']' => {
                out.push(']');
                return Ok(out);
            }
            '[' if matches!(chars.peek(), Some(':' | '.' | '=')) => {
                let Some(kind) = chars.next() else {
                    return Err("unterminated bracket expression".into());
                };
                let name = element(chars, kind)?;
                if kind == ':' {
                    out.push_str("[:");
                    out.push_str(&name);
                    out.push_str(":]");
                } else {
                    for ch in name.chars() {
                        push_class_literal(&mut out, ch);
                    }
                }
            }
            '\\' | '[' | '&' | '~' | '^' => push_class_literal(&mut out, c),
            _ => out.push(c),
        }
    }
}

/// Body of `[:name:]`, `[.x.]` or `[=x=]` up to the closing `kind]`.
fn element(chars: &mut Peekable<Chars<'_>>, kind: char) -> Result<String, String> {
    let mut name = String::new();
    loop {
        match chars.next() {
            Some(c) if c == kind && chars.peek() == Some(&']') => {
                chars.next();
                return Ok(name);
            }
            Some(c) => name.push(c),
            None => return Err(format!("unterminated [{kind} element")),
        }
    }
}

fn push_literal(out: &mut String, c: char) {
    let mut buf = [0u8; 4];
    out.push_str(&regex::escape(c.encode_utf8(&mut buf)));
}

fn push_class_literal(out: &mut String, c: char) {
    out.push('\\');
    out.push(c);
}
