//! Lenient markup utilities shared by the portal parsers and the
//! normalizer.
//!
//! Portal exports are frequently malformed: unescaped brackets inside
//! question text, unclosed tags, decorative markup. Everything here is
//! best-effort by contract: never panic, prefer truncated output over
//! guessed repairs. A bracket run that never closes swallows text to the
//! end of its block; callers surface that through the `balanced` flag.

/// A block of markup sliced out of a document by a class marker.
#[derive(Debug, Clone)]
pub struct ClassBlock<'a> {
    /// 1-based ordinal of the block within the document.
    pub index: usize,
    /// Inner markup of the block.
    pub html: &'a str,
    /// False when the block's div nesting never returned to zero; the
    /// slice then extends to the next block (or end of input) and its
    /// content may be truncated or mis-split.
    pub balanced: bool,
}

/// Slice out every `<div>` region whose class list contains all the
/// space-separated tokens of `marker`, tracking div nesting depth.
pub fn class_blocks<'a>(doc: &'a str, marker: &str) -> Vec<ClassBlock<'a>> {
    let tokens: Vec<&str> = marker.split_whitespace().collect();

    let mut starts = Vec::new();
    let mut pos = 0;
    while let Some(rel) = doc[pos..].find("<div") {
        let tag_start = pos + rel;
        pos = tag_start + 4;
        if !boundary_after(doc, tag_start + 4) {
            continue;
        }
        let Some(tag) = read_tag(&doc[tag_start..]) else {
            continue;
        };
        if has_class_tokens(tag, &tokens) {
            starts.push((tag_start, tag.len()));
        }
    }

    let mut blocks = Vec::new();
    for (i, &(start, tag_len)) in starts.iter().enumerate() {
        let content_start = start + tag_len;
        let limit = starts
            .get(i + 1)
            .map(|&(next, _)| next)
            .unwrap_or(doc.len());
        let region = &doc[content_start..limit.max(content_start)];
        let (end, balanced) = element_close(region, "div");
        blocks.push(ClassBlock {
            index: i + 1,
            html: &region[..end],
            balanced,
        });
    }
    blocks
}

/// Inner content of the first element in `html` whose class list contains
/// the token `class_name`.
pub fn class_section<'a>(html: &'a str, class_name: &str) -> Option<&'a str> {
    let tokens = [class_name];
    let mut pos = 0;
    while let Some(rel) = html[pos..].find('<') {
        let tag_start = pos + rel;
        pos = tag_start + 1;
        let tail = &html[tag_start..];
        let name = element_name(tail)?;
        if name.is_empty() {
            continue;
        }
        let Some(tag) = read_tag(tail) else { continue };
        if !has_class_tokens(tag, &tokens) {
            continue;
        }
        let content_start = tag_start + tag.len();
        let (end, _) = element_close(&html[content_start..], name);
        return Some(&html[content_start..content_start + end]);
    }
    None
}

/// Inner regions of every `<tag>…</tag>` element, in document order.
/// Self-closing occurrences are skipped.
pub fn tag_sections<'a>(html: &'a str, tag: &str) -> Vec<&'a str> {
    let open = format!("<{}", tag);
    let mut sections = Vec::new();
    let mut pos = 0;
    while let Some(rel) = html[pos..].find(open.as_str()) {
        let tag_start = pos + rel;
        pos = tag_start + open.len();
        if !boundary_after(html, tag_start + open.len()) {
            continue;
        }
        let Some(tag_text) = read_tag(&html[tag_start..]) else {
            continue;
        };
        if tag_text.ends_with("/>") {
            continue;
        }
        let content_start = tag_start + tag_text.len();
        let (end, balanced) = element_close(&html[content_start..], tag);
        sections.push(&html[content_start..content_start + end]);
        pos = if balanced {
            content_start + end
        } else {
            html.len()
        };
    }
    sections
}

/// Value of attribute `name` inside an opening tag's text.
pub fn attr<'a>(tag: &'a str, name: &str) -> Option<&'a str> {
    for quote in ['"', '\''] {
        let needle = format!("{}={}", name, quote);
        let mut pos = 0;
        while let Some(rel) = tag[pos..].find(needle.as_str()) {
            let at = pos + rel;
            pos = at + needle.len();
            // require a boundary so "alt=" never matches inside "xalt="
            let preceded = tag[..at]
                .chars()
                .next_back()
                .is_some_and(|c| c.is_whitespace());
            if !preceded {
                continue;
            }
            let value_start = at + needle.len();
            let value_end = tag[value_start..].find(quote)?;
            return Some(&tag[value_start..value_start + value_end]);
        }
    }
    None
}

/// Remove markup tags and unescape entity references.
///
/// Each tag is replaced with a single space (text runs on either side of
/// markup are distinct words); callers collapse whitespace afterwards. A
/// `<` that does not open something tag-like is kept as a literal
/// character. An opened tag that never closes swallows the rest of the
/// input, which is the documented corruption mode for unescaped brackets.
pub fn strip_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    loop {
        match rest.find('<') {
            None => {
                out.push_str(rest);
                break;
            }
            Some(i) => {
                out.push_str(&rest[..i]);
                let tail = &rest[i..];
                if looks_like_tag(tail) {
                    match tail.find('>') {
                        Some(j) => {
                            out.push(' ');
                            rest = &tail[j + 1..];
                        }
                        None => {
                            out.push(' ');
                            break;
                        }
                    }
                } else {
                    out.push('<');
                    rest = &tail[1..];
                }
            }
        }
    }
    unescape_entities(&out)
}

/// Unescape the common named entities plus numeric references.
/// Unrecognized sequences are kept literally.
pub fn unescape_entities(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(i) = rest.find('&') {
        out.push_str(&rest[..i]);
        let tail = &rest[i..];
        let entity = tail[1..].find(';').and_then(|p| {
            if p == 0 || p > 9 {
                return None;
            }
            decode_entity(&tail[1..1 + p]).map(|ch| (ch, 1 + p + 1))
        });
        match entity {
            Some((ch, consumed)) => {
                out.push(ch);
                rest = &tail[consumed..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some(' '),
        _ => {
            let code = if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                name.strip_prefix('#')?.parse().ok()?
            };
            char::from_u32(code)
        }
    }
}

/// Byte offset just before `</name>` that closes the element whose content
/// starts at the beginning of `html`, plus whether nesting actually
/// closed. On damaged markup the whole region is returned unbalanced.
fn element_close(html: &str, name: &str) -> (usize, bool) {
    let open = format!("<{}", name);
    let close = format!("</{}", name);
    let mut depth = 1usize;
    let mut pos = 0;
    while pos < html.len() {
        let next_open = html[pos..].find(open.as_str());
        let next_close = html[pos..].find(close.as_str());
        match (next_open, next_close) {
            (Some(o), Some(c)) if o < c => {
                let at = pos + o;
                pos = at + open.len();
                if boundary_after(html, at + open.len())
                    && !read_tag(&html[at..]).is_some_and(|t| t.ends_with("/>"))
                {
                    depth += 1;
                }
            }
            (_, Some(c)) => {
                let at = pos + c;
                pos = at + close.len();
                if !boundary_after(html, at + close.len()) {
                    continue;
                }
                depth -= 1;
                if depth == 0 {
                    return (at, true);
                }
            }
            (Some(o), None) => {
                // opens without closes: damaged, give up
                let at = pos + o;
                pos = at + open.len();
                if boundary_after(html, at + open.len()) {
                    return (html.len(), false);
                }
            }
            (None, None) => break,
        }
    }
    (html.len(), false)
}

/// Opening tag text starting at a `<`, up to and including the `>`.
fn read_tag(tail: &str) -> Option<&str> {
    let end = tail.find('>')?;
    Some(&tail[..end + 1])
}

/// Element name following the `<` at the start of `tail`; empty for
/// closing/declaration tags.
fn element_name(tail: &str) -> Option<&str> {
    let rest = &tail[1..];
    let end = rest
        .char_indices()
        .find(|(_, c)| !c.is_ascii_alphanumeric())
        .map(|(i, _)| i)
        .unwrap_or(rest.len());
    Some(&rest[..end])
}

/// True when the character at `at` terminates an element name (so "<div"
/// does not match "<divider").
fn boundary_after(html: &str, at: usize) -> bool {
    html[at..]
        .chars()
        .next()
        .map(|c| c.is_whitespace() || c == '>' || c == '/')
        .unwrap_or(true)
}

fn looks_like_tag(tail: &str) -> bool {
    matches!(
        tail[1..].chars().next(),
        Some(c) if c.is_ascii_alphabetic() || c == '/' || c == '!' || c == '?'
    )
}

fn has_class_tokens(tag: &str, tokens: &[&str]) -> bool {
    match attr(tag, "class") {
        Some(value) => {
            let classes: Vec<&str> = value.split_whitespace().collect();
            tokens.iter().all(|t| classes.contains(t))
        }
        None => false,
    }
}
