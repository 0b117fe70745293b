//! Block attribute lines.
//!
//! ```markdown
//! {#intro .lead data-level="2"}
//! A paragraph carrying the attribute.
//! ```
//!
//! The attribute is staged on the parser and handed to the next block that
//! gets opened.

use std::collections::BTreeMap;

use super::BlockParser;
use super::utils::{skip_char, skip_char_n, text};
use crate::ast::Attribute;

/// Split `key="value"`. The value must be double quoted.
fn key_value(chunk: &[u8]) -> Option<(String, String)> {
    let eq = chunk.iter().position(|&b| b == b'=')?;
    let (key, value) = (&chunk[..eq], &chunk[eq + 1..]);
    if key.is_empty() || value.len() < 2 || value[0] != b'"' || value[value.len() - 1] != b'"' {
        return None;
    }
    Some((text(key), text(&value[1..value.len() - 1])))
}

/// Parse the inside of `{...}`. Any malformed chunk rejects the whole line.
fn parse_attribute(inner: &[u8]) -> Option<Attribute> {
    let mut attribute = Attribute {
        id: None,
        classes: Vec::new(),
        attrs: BTreeMap::new(),
    };

    let mut i = 0;
    while i < inner.len() {
        i = skip_char(inner, i, b' ');
        if i >= inner.len() {
            break;
        }
        // Quoted values may contain spaces.
        let start = i;
        let mut quoted = false;
        while i < inner.len() && (quoted || inner[i] != b' ') {
            if inner[i] == b'"' {
                quoted = !quoted;
            }
            i += 1;
        }
        if quoted {
            return None;
        }
        let chunk = &inner[start..i];
        match chunk[0] {
            b'#' if chunk.len() > 1 => attribute.id = Some(text(&chunk[1..])),
            b'.' if chunk.len() > 1 => attribute.classes.push(text(&chunk[1..])),
            _ => {
                let (key, value) = key_value(chunk)?;
                attribute.attrs.insert(key, value);
            }
        }
    }
    Some(attribute)
}

impl BlockParser<'_> {
    /// Stage an attribute line at the start of `data`. Returns what is left
    /// of `data` after it, or `data` itself when there is no attribute.
    pub(super) fn attribute<'d>(&mut self, data: &'d [u8]) -> &'d [u8] {
        let beg = skip_char_n(data, 0, b' ', 3);
        if data.get(beg) != Some(&b'{') {
            return data;
        }
        let line_end = data[beg..]
            .iter()
            .position(|&b| b == b'\n')
            .map_or(data.len(), |p| beg + p);

        // The closing brace must end the line.
        let mut close = line_end;
        while close > beg && data[close - 1] == b' ' {
            close -= 1;
        }
        if close <= beg + 1 || data[close - 1] != b'}' {
            return data;
        }

        let Some(attribute) = parse_attribute(&data[beg + 1..close - 1]) else {
            return data;
        };
        log::debug!("staged attribute {attribute:?}");
        if self.pending_attribute.is_some() {
            log::trace!("replacing unused staged attribute");
        }
        self.pending_attribute = Some(attribute);

        let next = (line_end + 1).min(data.len());
        &data[next..]
    }
}
