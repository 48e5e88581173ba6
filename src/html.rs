//! HTML → plain text stripping for work-item descriptions.
//!
//! DESIGN
//! ======
//! Work-item descriptions arrive as HTML fragments. Both the display path
//! and the prompt path want plain text: tags removed, entities decoded,
//! and whitespace introduced by markup collapsed away. Block-level tags
//! and `<br>` become line breaks so paragraph structure survives; inline
//! tags contribute nothing.

/// Strip an HTML fragment down to plain text.
///
/// Tags are removed (block tags become line breaks), character entities
/// are decoded, runs of whitespace collapse to a single space, and blank
/// lines collapse to at most one.
#[must_use]
pub fn strip_html(html: &str) -> String {
    collapse_whitespace(&strip_tags(html))
}

fn strip_tags(html: &str) -> String {
    let chars: Vec<char> = html.chars().collect();
    let mut out = String::with_capacity(html.len());
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '<' => {
                let mut tag = String::new();
                i += 1;
                while i < chars.len() && chars[i] != '>' {
                    tag.push(chars[i]);
                    i += 1;
                }
                i += 1;
                if breaks_line(&tag) {
                    out.push('\n');
                }
            }
            '&' => {
                if let Some((decoded, consumed)) = decode_entity(&chars[i..]) {
                    out.push(decoded);
                    i += consumed;
                } else {
                    out.push('&');
                    i += 1;
                }
            }
            c => {
                out.push(c);
                i += 1;
            }
        }
    }
    out
}

/// Whether a tag (opening or closing, attributes included) separates lines.
fn breaks_line(tag: &str) -> bool {
    let name = tag
        .trim_start_matches('/')
        .split(|c: char| c.is_whitespace() || c == '/')
        .next()
        .unwrap_or("")
        .to_ascii_lowercase();
    matches!(
        name.as_str(),
        "br" | "p" | "div" | "li" | "tr" | "ul" | "ol" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6"
    )
}

/// Decode one character entity at the head of `rest` (which starts at `&`).
/// Returns the decoded character and how many source chars were consumed.
/// Unknown or unterminated entities return `None` and the `&` stays literal.
fn decode_entity(rest: &[char]) -> Option<(char, usize)> {
    const MAX_ENTITY_LEN: usize = 32;

    let end = rest
        .iter()
        .take(MAX_ENTITY_LEN)
        .position(|&c| c == ';')?;
    let name: String = rest[1..end].iter().collect();

    let decoded = match name.as_str() {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => ' ',
        _ => {
            let code = if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok()?
            } else if let Some(dec) = name.strip_prefix('#') {
                dec.parse::<u32>().ok()?
            } else {
                return None;
            };
            char::from_u32(code)?
        }
    };
    Some((decoded, end + 1))
}

fn collapse_whitespace(text: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    for line in text.lines() {
        let collapsed = line.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() {
            // At most one blank line between paragraphs, none at the edges.
            if !lines.is_empty() && !lines.last().is_some_and(|l| l.is_empty()) {
                lines.push(String::new());
            }
        } else {
            lines.push(collapsed);
        }
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

#[cfg(test)]
#[path = "html_test.rs"]
mod tests;
