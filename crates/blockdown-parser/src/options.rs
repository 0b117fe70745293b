//! Parser extensions and flavor presets.

#[cfg(feature = "serde")]
use serde::Deserialize;

/// Default cap on nested block parsing (quotes in lists in quotes ...).
pub const DEFAULT_MAX_NESTING: usize = 16;

/// The flavor of Markdown to parse.
/// Each flavor has a different set of default extensions enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Flavor {
    /// Tables, fenced code, definition lists, heading ids and math.
    #[default]
    Common,
    /// Common plus the Mmark document extensions (asides, figures,
    /// captions, document matter, includes, attributes).
    Mmark,
    /// Plain Markdown, every extension off.
    Strict,
}

/// Parsing extensions. Each field toggles one recognizer branch or one
/// behavior of the inline collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Extensions {
    // ===== Block-level extensions =====
    /// Pipe tables
    pub tables: bool,
    /// ``` and ~~~ fenced code blocks
    pub fenced_code: bool,
    /// `# Heading` requires a space after the hashes
    pub space_headings: bool,
    /// Record the start number and delimiter of ordered lists
    pub ordered_list_start: bool,
    /// Term / `:` definition lists
    pub definition_lists: bool,
    /// Two blank lines end a list
    pub empty_lines_break_list: bool,
    /// `[^id]: text` footnote definitions
    pub footnotes: bool,
    /// Explicit `{#id}` on headings
    pub heading_ids: bool,
    /// Generate ids for headings without an explicit one
    pub auto_heading_ids: bool,
    /// Closing HTML block tags need not be followed by a blank line
    pub lax_html_blocks: bool,
    /// Pandoc-style `%` title block
    pub titleblock: bool,
    /// `$$` display math blocks
    pub math_jax: bool,
    /// Asides, figure blocks, captions, special headings, document matter
    pub mmark: bool,
    /// `{#id .class key="value"}` block attribute lines
    pub attributes: bool,
    /// `{{file}}` and `<{{file}}` transclusion
    pub includes: bool,
    /// Indented continuation in footnotes uses 8 columns instead of 4
    pub tab_size_eight: bool,
    /// Lists, quotes and indented code may interrupt a paragraph
    pub no_empty_line_before_block: bool,

    // ===== Inline extensions (consumed by the inline processor) =====
    /// Bare URLs become links
    pub autolink: bool,
    /// ~~text~~
    pub strikethrough: bool,
    /// Backslash at end of line is a hard break
    pub backslash_line_break: bool,
    /// ^super^ and ~sub~
    pub super_subscript: bool,
    /// No emphasis inside words
    pub no_intra_emphasis: bool,
}

impl Default for Extensions {
    fn default() -> Self {
        Self::for_flavor(Flavor::default())
    }
}

impl Extensions {
    /// Get the default extension set for a given flavor.
    pub fn for_flavor(flavor: Flavor) -> Self {
        match flavor {
            Flavor::Common => Self::common_defaults(),
            Flavor::Mmark => Self::mmark_defaults(),
            Flavor::Strict => Self::none(),
        }
    }

    /// Every extension disabled.
    pub fn none() -> Self {
        Self {
            tables: false,
            fenced_code: false,
            space_headings: false,
            ordered_list_start: false,
            definition_lists: false,
            empty_lines_break_list: false,
            footnotes: false,
            heading_ids: false,
            auto_heading_ids: false,
            lax_html_blocks: false,
            titleblock: false,
            math_jax: false,
            mmark: false,
            attributes: false,
            includes: false,
            tab_size_eight: false,
            no_empty_line_before_block: false,

            autolink: false,
            strikethrough: false,
            backslash_line_break: false,
            super_subscript: false,
            no_intra_emphasis: false,
        }
    }

    fn common_defaults() -> Self {
        Self {
            tables: true,
            fenced_code: true,
            space_headings: true,
            heading_ids: true,
            definition_lists: true,
            math_jax: true,

            autolink: true,
            strikethrough: true,
            backslash_line_break: true,
            no_intra_emphasis: true,

            ..Self::none()
        }
    }

    fn mmark_defaults() -> Self {
        let mut ext = Self::common_defaults();

        ext.attributes = true;
        ext.footnotes = true;
        ext.includes = true;
        ext.ordered_list_start = true;
        ext.auto_heading_ids = true;
        ext.mmark = true;

        ext
    }

    /// Columns a footnote continuation line must be indented by.
    pub fn tab_size(&self) -> usize {
        if self.tab_size_eight { 8 } else { 4 }
    }
}

/// Everything the block parser needs to know up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    pub extensions: Extensions,
    pub max_nesting: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            extensions: Extensions::default(),
            max_nesting: DEFAULT_MAX_NESTING,
        }
    }
}

impl ParserOptions {
    pub fn new(extensions: Extensions) -> Self {
        Self {
            extensions,
            ..Self::default()
        }
    }

    pub fn max_nesting(mut self, max_nesting: usize) -> Self {
        self.max_nesting = max_nesting;
        self
    }
}
