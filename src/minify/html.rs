//! HTML minification.
//!
//! A single forward scan over the document:
//! - comments are dropped, except IE conditional comments
//! - whitespace in text collapses to one space, whitespace-only text between
//!   tags is dropped
//! - tags are copied verbatim (quoted attribute values may contain `>`)
//! - the body of `script`, `style`, `pre`, `textarea` and `title` is copied
//!   verbatim up to the matching close tag

use super::MinifyError;

/// Elements whose content must not be touched.
///
/// Per HTML spec: script and style are raw text, textarea and title are
/// escapable raw text, and pre keeps its whitespace.
#[inline]
fn is_verbatim_element(tag: &str) -> bool {
    matches!(tag, "script" | "style" | "textarea" | "title" | "pre")
}

/// Minify an HTML document, stripping comments.
pub fn minify_html(source: &str) -> Result<String, MinifyError> {
    // ASCII lowercasing keeps byte offsets identical to `source`.
    let lower = source.to_ascii_lowercase();
    let mut out = String::with_capacity(source.len());
    let mut pos = 0;

    while pos < source.len() {
        let rest = &source[pos..];

        if rest.starts_with("<!--") {
            let end = rest[4..]
                .find("-->")
                .map(|i| i + 4 + 3)
                .ok_or(MinifyError::UnterminatedComment(pos))?;
            if is_conditional_comment(rest) {
                out.push_str(&rest[..end]);
            }
            pos += end;
        } else if rest.starts_with('<') {
            let tag_end = pos + find_tag_end(rest);
            out.push_str(&source[pos..tag_end]);

            if let Some(name) = opening_tag_name(&lower[pos..tag_end])
                && is_verbatim_element(name)
            {
                let close = format!("</{name}");
                let body_end = lower[tag_end..]
                    .find(&close)
                    .map_or(source.len(), |i| tag_end + i);
                out.push_str(&source[tag_end..body_end]);
                pos = body_end;
            } else {
                pos = tag_end;
            }
        } else {
            let text_end = rest.find('<').map_or(source.len(), |i| pos + i);
            push_collapsed(&mut out, &source[pos..text_end]);
            pos = text_end;
        }
    }

    Ok(out)
}

/// `<!--[if IE]> ... <![endif]-->` must survive comment stripping.
fn is_conditional_comment(comment: &str) -> bool {
    comment[4..].trim_start().starts_with("[if")
}

/// Byte length of the tag starting at `tag[0] == '<'`, honoring quotes.
fn find_tag_end(tag: &str) -> usize {
    let mut quote: Option<u8> = None;
    for (i, b) in tag.bytes().enumerate().skip(1) {
        match (quote, b) {
            (Some(q), _) if b == q => quote = None,
            (Some(_), _) => {}
            (None, b'"' | b'\'') => quote = Some(b),
            (None, b'>') => return i + 1,
            _ => {}
        }
    }
    tag.len()
}

/// Name of an opening tag (`<pre class="x">` -> `pre`), `None` for closing
/// tags, doctypes and processing instructions.
fn opening_tag_name(tag: &str) -> Option<&str> {
    let inner = tag.strip_prefix('<')?;
    let len = inner
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(inner.len());
    (len > 0).then(|| &inner[..len])
}

/// Append text with whitespace runs collapsed.
///
/// Whitespace-only text is dropped entirely; a collapsed space is never
/// emitted after output that already ends in whitespace.
fn push_collapsed(out: &mut String, text: &str) {
    if text.trim().is_empty() {
        return;
    }
    let mut in_space = out.ends_with(char::is_whitespace);
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push(' ');
                in_space = true;
            }
        } else {
            out.push(c);
            in_space = false;
        }
    }
}
