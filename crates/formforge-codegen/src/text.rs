//! Escaping helpers for values interpolated into generated source.

/// A single-quoted JavaScript string literal.
pub(crate) fn js_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Text placed between JSX tags.
pub(crate) fn jsx_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('{', "&#123;")
        .replace('}', "&#125;")
}

/// A double-quoted JSX attribute value, including the quotes.
pub(crate) fn jsx_attr(s: &str) -> String {
    format!("\"{}\"", jsx_text(s).replace('"', "&quot;"))
}

/// A JavaScript regex literal. Unescaped slashes in the source are escaped.
pub(crate) fn js_regex(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 2);
    out.push('/');
    let mut escaped = false;
    for c in pattern.chars() {
        if c == '/' && !escaped {
            out.push('\\');
        }
        escaped = c == '\\' && !escaped;
        out.push(c);
    }
    // A dangling backslash would escape the closing slash.
    if escaped {
        out.push('\\');
    }
    out.push('/');
    out
}

/// A regular C# string literal.
pub(crate) fn cs_str(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

/// A C# verbatim string literal (`@"..."`), for regex sources.
pub(crate) fn cs_verbatim(s: &str) -> String {
    format!("@\"{}\"", s.replace('"', "\"\""))
}

/// Single line of text, for comments.
pub(crate) fn one_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Indent every non-empty line by `n` spaces.
pub(crate) fn indent(block: &str, n: usize) -> String {
    let pad = " ".repeat(n);
    block
        .lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{pad}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
