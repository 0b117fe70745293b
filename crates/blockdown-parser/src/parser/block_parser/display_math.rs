use super::BlockParser;
use super::utils::text;
use crate::ast::NodeKind;

impl BlockParser<'_> {
    /// `$$ ... $$` display math. The body runs to the next `$$` and may span
    /// lines; whatever follows the closing delimiter is left in the input.
    pub(super) fn block_math(&mut self, data: &[u8]) -> usize {
        if data.len() <= 4 || data[0] != b'$' || data[1] != b'$' || data[2] == b'$' {
            return 0;
        }
        let mut end = 2;
        while end + 1 < data.len() && !(data[end] == b'$' && data[end + 1] == b'$') {
            end += 1;
        }
        if end + 1 >= data.len() {
            return 0;
        }
        self.add_block(NodeKind::MathBlock {
            literal: text(&data[2..end]),
        });
        end + 2
    }
}
