//! Link reference definitions (`[label]: url "title"`) and footnote
//! definitions (`[^id]: text`). Neither produces a node; both end a
//! paragraph and are recorded in the document's reference registry.

use super::BlockParser;
use super::utils::{empty_line_len, line_end, text};

/// Where the pieces of a link reference definition are.
#[derive(Debug, Default, PartialEq, Eq)]
struct LinkRef {
    link: (usize, usize),
    title: (usize, usize),
    line_end: usize,
}

/// Columns of indentation at the start of `data` when it is indented by at
/// least `tab_size` spaces (or one tab), else 0.
fn indented_by(data: &[u8], tab_size: usize) -> usize {
    match data.first() {
        None => 0,
        Some(b'\t') => 1,
        Some(_) if data.len() < tab_size => 0,
        Some(_) if data[..tab_size].iter().all(|&b| b == b' ') => tab_size,
        Some(_) => 0,
    }
}

/// Scan `url "title"` starting at `i`.
fn scan_link_ref(data: &[u8], mut i: usize) -> Option<LinkRef> {
    let n = data.len();
    let angled = data[i] == b'<';
    if angled {
        i += 1;
    }
    let link_start = i;
    while i < n && !matches!(data[i], b' ' | b'\t' | b'\n' | b'\r') {
        i += 1;
    }
    let mut link_end = i;
    if angled && link_end > link_start && data[link_end - 1] == b'>' {
        link_end -= 1;
    }

    // Spacer before an optional title.
    while i < n && matches!(data[i], b' ' | b'\t') {
        i += 1;
    }
    if i < n && !matches!(data[i], b'\n' | b'\r' | b'\'' | b'"' | b'(') {
        return None;
    }

    let mut line_end = 0;
    if i >= n || data[i] == b'\r' || data[i] == b'\n' {
        line_end = i;
    }
    if i + 1 < n && data[i] == b'\r' && data[i + 1] == b'\n' {
        line_end += 1;
    }

    // The title may sit alone on the next line.
    if line_end > 0 {
        i = line_end + 1;
        while i < n && matches!(data[i], b' ' | b'\t') {
            i += 1;
        }
    }

    let mut title = (0, 0);
    if i + 1 < n && matches!(data[i], b'\'' | b'"' | b'(') {
        i += 1;
        let title_start = i;
        while i < n && data[i] != b'\n' && data[i] != b'\r' {
            i += 1;
        }
        let title_line_end = if i + 1 < n && data[i] == b'\n' && data[i + 1] == b'\r' {
            i + 1
        } else {
            i
        };
        // Step back over trailing blanks to the closing delimiter.
        let mut close = i - 1;
        while close > title_start && matches!(data[close], b' ' | b'\t') {
            close -= 1;
        }
        if close > title_start && matches!(data[close], b'\'' | b'"' | b')') {
            line_end = title_line_end;
            title = (title_start, close);
        }
    }

    if line_end == 0 {
        return None;
    }
    Some(LinkRef {
        link: (link_start, link_end),
        title,
        line_end,
    })
}

/// Gather a footnote body starting at `i`: the rest of the first line plus
/// following lines indented by `tab_size` (blank lines in between kept).
/// Returns the end offset, the body and whether it continued past one line.
fn scan_footnote(data: &[u8], mut i: usize, tab_size: usize) -> (usize, Vec<u8>, bool) {
    while i < data.len() && data[i] == b' ' {
        i += 1;
    }
    let first = i;
    i = line_end(data, first);
    let mut raw = data[first..i].to_vec();
    let mut end = i;
    let mut has_block = false;
    let mut contains_blank_line = false;

    while end < data.len() {
        i += 1;
        while i < data.len() && data[i - 1] != b'\n' {
            i += 1;
        }
        if empty_line_len(&data[end..i]) > 0 {
            contains_blank_line = true;
            end = i;
            continue;
        }
        let indent = indented_by(&data[end..i], tab_size);
        if indent == 0 {
            break;
        }
        if contains_blank_line {
            raw.push(b'\n');
            contains_blank_line = false;
        }
        raw.extend_from_slice(&data[end + indent..i]);
        has_block = true;
        end = i;
    }

    if end > 0 && data[end - 1] != b'\n' {
        raw.push(b'\n');
    }
    (end, raw, has_block)
}

impl BlockParser<'_> {
    /// Record a reference or footnote definition at the start of `data`.
    /// Returns the bytes consumed, 0 if there is none.
    pub(super) fn reference(&mut self, data: &[u8]) -> usize {
        if data.len() < 4 {
            return 0;
        }
        let mut i = 0;
        while i < 3 && data[i] == b' ' {
            i += 1;
        }
        if data[i] != b'[' {
            return 0;
        }
        i += 1;

        let mut is_footnote = false;
        if self.extensions.footnotes && data.get(i) == Some(&b'^') {
            is_footnote = true;
            i += 1;
        }

        let id_start = i;
        while i < data.len() && !matches!(data[i], b'\n' | b'\r' | b']') {
            i += 1;
        }
        if i >= data.len() || data[i] != b']' {
            return 0;
        }
        let id_end = i;
        // `[^]` is a valid footnote id, `[]` is not a label.
        if !is_footnote && id_start == id_end {
            return 0;
        }

        i += 1;
        if i >= data.len() || data[i] != b':' {
            return 0;
        }
        i += 1;
        while i < data.len() && matches!(data[i], b' ' | b'\t') {
            i += 1;
        }
        if i < data.len() && matches!(data[i], b'\n' | b'\r') {
            i += 1;
            if i < data.len() && data[i] == b'\n' && data[i - 1] == b'\r' {
                i += 1;
            }
        }
        while i < data.len() && matches!(data[i], b' ' | b'\t') {
            i += 1;
        }
        if i >= data.len() {
            return 0;
        }

        let id = text(&data[id_start..id_end]);
        if is_footnote {
            let (end, body, has_block) = scan_footnote(data, i, self.extensions.tab_size());
            log::debug!("footnote definition [^{id}]");
            self.doc
                .references_mut()
                .add_footnote(id, text(&body), has_block);
            return end;
        }

        let Some(link_ref) = scan_link_ref(data, i) else {
            return 0;
        };
        let url = text(&data[link_ref.link.0..link_ref.link.1]);
        let (title_start, title_end) = link_ref.title;
        let title = (title_end > title_start).then(|| text(&data[title_start..title_end]));
        log::debug!("reference definition [{id}] -> {url}");
        self.doc.references_mut().add(id, url, title);
        link_ref.line_end
    }
}
