use super::BlockParser;
use super::utils::{line_end, text, trim_bytes};
use crate::ast::NodeKind;

/// Three or more `*`, `-` or `_` (the same character), optionally separated
/// by spaces, after at most three spaces of indentation.
pub(crate) fn is_hrule(data: &[u8]) -> bool {
    let mut i = 0;
    while i < 3 && i < data.len() && data[i] == b' ' {
        i += 1;
    }
    let Some(&c) = data.get(i) else {
        return false;
    };
    if !matches!(c, b'*' | b'-' | b'_') {
        return false;
    }

    let mut n = 0;
    while i < data.len() && data[i] != b'\n' {
        if data[i] == c {
            n += 1;
        } else if data[i] != b' ' {
            return false;
        }
        i += 1;
    }
    n >= 3
}

impl BlockParser<'_> {
    pub(super) fn hrule(&mut self, data: &[u8]) -> usize {
        let end = line_end(data, 0);
        self.add_block(NodeKind::HorizontalRule {
            literal: text(trim_bytes(&data[..end], b" \n")),
        });
        end
    }
}
