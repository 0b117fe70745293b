pub mod config;
pub mod includes;

pub use blockdown_parser::{
    Attribute, BlockHook, BlockParser, DEFAULT_MAX_NESTING, Document, Extensions, Flavor,
    HookBlock, IncludeResolver, InlineProcessor, Node, NodeId, NodeKind, ParserOptions,
    ReferenceRegistry, ast, sanitize_heading_id,
};
pub use config::Config;
pub use config::ConfigBuilder;
pub use includes::FsIncludeResolver;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Parses a document into its block tree.
///
/// Transclusion directives expand to nothing here; use
/// [`parse_with_includes`] to read them from disk.
///
/// # Examples
///
/// ```no_run
/// let cfg = blockdown::ConfigBuilder::default()
///     .flavor(blockdown::Flavor::Mmark)
///     .build();
/// let doc = blockdown::parse("# Title\n\nBody\n", Some(cfg));
/// println!("{doc}");
/// ```
pub fn parse(input: &str, config: Option<Config>) -> Document {
    #[cfg(debug_assertions)]
    {
        init_logger();
    }

    let config = config.unwrap_or_default();
    BlockParser::new(config.parser_options()).parse(input)
}

/// Like [`parse`], resolving `{{path}}` directives through `resolver`.
pub fn parse_with_includes(
    input: &str,
    config: Option<Config>,
    resolver: FsIncludeResolver,
) -> Document {
    #[cfg(debug_assertions)]
    {
        init_logger();
    }

    let config = config.unwrap_or_default();
    BlockParser::new(config.parser_options())
        .with_include_resolver(resolver)
        .parse(input)
}
