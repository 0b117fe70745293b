//! Transclusion directives.
//!
//! `{{path}}` parses the file's text in place, `<{{path}}` wraps it in a
//! fenced code block tagged with the file extension. Either form may carry
//! an address, `{{path}}[address]`, which is passed through to the
//! resolver untouched.

use std::path::Path;

use super::BlockParser;
use super::figures::{CAPTION_FIGURE, CAPTION_QUOTE, CAPTION_TABLE, caption};
use super::utils::{skip_char_n, skip_until_char, text};

/// A recognized directive.
#[derive(Debug, PartialEq, Eq)]
struct Directive {
    path: String,
    address: Option<String>,
    consumed: usize,
    code: bool,
}

fn is_include(data: &[u8]) -> Option<Directive> {
    let mut i = skip_char_n(data, 0, b' ', 3);
    if data.len() < i + 3 || data[i] != b'{' || data[i + 1] != b'{' {
        return None;
    }
    let start = i + 2;
    i = skip_until_char(data, start, b'}');
    if i + 1 >= data.len() || data[i + 1] != b'}' || i == start {
        return None;
    }
    let path = &data[start..i];
    if path.contains(&b'\n') {
        return None;
    }
    i += 2;

    let mut address = None;
    if data.get(i) == Some(&b'[') {
        let end = skip_until_char(data, i + 1, b']');
        if end >= data.len() || data[i + 1..end].contains(&b'\n') {
            return None;
        }
        address = Some(text(&data[i + 1..end]));
        i = end + 1;
    }

    Some(Directive {
        path: text(path),
        address,
        consumed: i,
        code: false,
    })
}

fn is_code_include(data: &[u8]) -> Option<Directive> {
    let i = skip_char_n(data, 0, b' ', 3);
    if data.get(i) != Some(&b'<') {
        return None;
    }
    let directive = is_include(&data[i + 1..])?;
    Some(Directive {
        consumed: directive.consumed + i + 1,
        code: true,
        ..directive
    })
}

/// Wrap `body` in a fence whose info string is the extension of `path`.
fn fence_code(path: &str, body: Vec<u8>) -> Vec<u8> {
    let mut out = b"```".to_vec();
    if let Some(ext) = Path::new(path).extension() {
        out.push(b' ');
        out.extend_from_slice(ext.to_string_lossy().as_bytes());
    }
    out.push(b'\n');
    let needs_newline = body.last().is_some_and(|&b| b != b'\n');
    out.extend(body);
    if needs_newline {
        out.push(b'\n');
    }
    out.extend_from_slice(b"```\n");
    out
}

impl BlockParser<'_> {
    /// Directory of the innermost include being expanded.
    fn include_dir(&self) -> Option<String> {
        let current = self.include_stack.last()?;
        let dir = Path::new(current).parent()?.to_string_lossy();
        (!dir.is_empty()).then(|| dir.into_owned())
    }

    /// Expand a directive at the start of `data`. Returns the bytes
    /// consumed, including a caption line that follows the directive.
    pub(super) fn include(&mut self, data: &[u8]) -> usize {
        let Some(directive) = is_include(data).or_else(|| is_code_include(data)) else {
            return 0;
        };
        let mut consumed = directive.consumed;

        let from = self.include_dir();
        let resolved = match &from {
            Some(dir) => Path::new(dir)
                .join(&directive.path)
                .to_string_lossy()
                .into_owned(),
            None => directive.path.clone(),
        };

        let cyclic = self.include_stack.contains(&resolved);
        let mut included = match self.include_resolver.as_mut() {
            Some(resolver) if !cyclic => {
                resolver.read_include(from.as_deref(), &directive.path, directive.address.as_deref())
            }
            _ => Vec::new(),
        };
        if directive.code && !included.is_empty() {
            included = fence_code(&directive.path, included);
        }

        // A caption after the directive belongs to the included block.
        if consumed < data.len() {
            let rest = &data[consumed + 1..];
            for prefix in [CAPTION_FIGURE, CAPTION_TABLE, CAPTION_QUOTE] {
                if let Some(cap) = caption(rest, prefix) {
                    if included.last().is_some_and(|&b| b != b'\n') {
                        included.push(b'\n');
                    }
                    included.extend_from_slice(&rest[..cap.consumed]);
                    consumed += 1 + cap.consumed;
                    break;
                }
            }
        }

        if cyclic {
            log::warn!("include cycle on {resolved}, skipping");
            return consumed;
        }

        log::debug!(
            "including {resolved} ({} bytes{})",
            included.len(),
            if directive.code { ", as code" } else { "" }
        );
        self.include_stack.push(resolved);
        self.block(&included);
        self.include_stack.pop();
        consumed
    }
}
