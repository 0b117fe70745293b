//! Pandoc title blocks and Mmark document-matter markers.

use super::BlockParser;
use super::utils::{line_end, text};
use crate::ast::{Heading, Matter, NodeKind};

const MATTER_MARKERS: [(&[u8], Matter); 3] = [
    (b"{frontmatter}", Matter::Front),
    (b"{mainmatter}", Matter::Main),
    (b"{backmatter}", Matter::Back),
];

impl BlockParser<'_> {
    /// Consecutive `%` lines at the start of a block become one level-1
    /// title heading. The newline after the last line is left unconsumed.
    pub(super) fn title_block(&mut self, data: &[u8]) -> usize {
        if data.first() != Some(&b'%') {
            return 0;
        }
        let mut end = 0;
        while end < data.len() && data[end] == b'%' {
            end = line_end(data, end);
        }
        let consumed = if data[end - 1] == b'\n' { end - 1 } else { end };

        let block = &data[..consumed];
        let block = block.strip_prefix(b"% ").unwrap_or(block);
        let content = text(block).replace("\n% ", "\n");
        log::trace!("title block of {consumed} bytes");

        self.add_block(NodeKind::Heading(Heading {
            level: 1,
            id: None,
            auto_id: false,
            is_special: false,
            is_titleblock: true,
            content,
        }));
        consumed
    }

    /// `{frontmatter}`, `{mainmatter}` or `{backmatter}`. Only the marker
    /// itself is consumed.
    pub(super) fn document_matter(&mut self, data: &[u8]) -> usize {
        let Some((marker, matter)) = MATTER_MARKERS
            .iter()
            .find(|(marker, _)| data.starts_with(marker))
        else {
            return 0;
        };
        let node = self.add_block(NodeKind::DocumentMatter { matter: *matter });
        self.finalize(node);
        marker.len()
    }
}
