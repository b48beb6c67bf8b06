//! Renders analysis text with a tiny Markdown subset.
//!
//! The input is HTML-escaped first, so the only tags in the output are the
//! ones introduced here: `<p>`, `<br>`, `<strong>` and `<em>`.

use std::sync::OnceLock;

use regex::Regex;

fn strong() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\*\*(.*?)\*\*").expect("valid regex"))
}

fn emphasis() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\*(.*?)\*").expect("valid regex"))
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// `**x**` → strong, `*x*` → em, blank lines → paragraphs, newlines → `<br>`.
pub fn render(text: &str) -> String {
    let text = text.replace("\r\n", "\n");
    let escaped = escape_html(&text);
    let html = strong().replace_all(&escaped, "<strong>$1</strong>");
    let html = emphasis().replace_all(&html, "<em>$1</em>");
    let html = html.replace("\n\n", "</p><p>").replace('\n', "<br>");
    format!("<p>{}</p>", html)
}
