use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use blockdown_parser::{DEFAULT_MAX_NESTING, Extensions, Flavor, ParserOptions};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Preset used when no `[extensions]` table is given.
    pub flavor: Flavor,
    /// Explicit extension set, replacing the flavor preset entirely.
    pub extensions: Option<Extensions>,
    pub max_nesting: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            flavor: Flavor::default(),
            extensions: None,
            max_nesting: DEFAULT_MAX_NESTING,
        }
    }
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Extension flags in effect for this configuration.
    pub fn effective_extensions(&self) -> Extensions {
        self.extensions
            .unwrap_or_else(|| Extensions::for_flavor(self.flavor))
    }

    pub fn parser_options(&self) -> ParserOptions {
        ParserOptions::new(self.effective_extensions()).max_nesting(self.max_nesting)
    }
}

#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn flavor(mut self, flavor: Flavor) -> Self {
        self.config.flavor = flavor;
        self
    }

    pub fn extensions(mut self, extensions: Extensions) -> Self {
        self.config.extensions = Some(extensions);
        self
    }

    pub fn max_nesting(mut self, max_nesting: usize) -> Self {
        self.config.max_nesting = max_nesting;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

/// File names looked up in each directory, in order of preference.
const PROJECT_FILES: [&str; 2] = [".blockdown.toml", "blockdown.toml"];

fn parse_toml(s: &str, path: &Path) -> io::Result<Config> {
    toml::from_str(s).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("invalid config {}: {e}", path.display()),
        )
    })
}

/// Where the configuration in effect came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Passed with `--config`.
    Explicit(PathBuf),
    /// Found next to the document or in one of its ancestors.
    Project(PathBuf),
    /// The per-user config file.
    User(PathBuf),
    Defaults,
}

impl ConfigSource {
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::User(p) => Some(p),
            Self::Defaults => None,
        }
    }

    /// Read and parse the file behind this source.
    fn read(&self) -> io::Result<Config> {
        let Some(path) = self.path() else {
            return Ok(Config::default());
        };
        let s = fs::read_to_string(path).map_err(|e| {
            io::Error::new(e.kind(), format!("cannot read config {}: {e}", path.display()))
        })?;
        let config = parse_toml(&s, path)?;
        log::info!("Loaded config from: {}", path.display());
        Ok(config)
    }

    fn project(start_dir: &Path) -> Option<Self> {
        start_dir
            .ancestors()
            .flat_map(|dir| PROJECT_FILES.iter().map(move |name| dir.join(name)))
            .find(|candidate| candidate.is_file())
            .map(Self::Project)
    }

    fn user() -> Option<Self> {
        let xdg = std::env::var_os("XDG_CONFIG_HOME")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        let home = std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config"));
        [xdg, home]
            .into_iter()
            .flatten()
            .map(|dir| dir.join("blockdown").join("config.toml"))
            .find(|p| p.is_file())
            .map(Self::User)
    }

    /// Pick the highest-priority source available for `start_dir`.
    pub fn discover(explicit: Option<&Path>, start_dir: &Path) -> Self {
        if let Some(path) = explicit {
            return Self::Explicit(path.to_path_buf());
        }
        Self::project(start_dir)
            .or_else(Self::user)
            .unwrap_or(Self::Defaults)
    }
}

/// Load the configuration in effect for a document under `start_dir`.
///
/// An explicit path must be readable. Otherwise the nearest
/// `.blockdown.toml` or `blockdown.toml` up the tree wins, then the user
/// config, then the defaults.
pub fn load(explicit: Option<&Path>, start_dir: &Path) -> io::Result<(Config, ConfigSource)> {
    let source = ConfigSource::discover(explicit, start_dir);
    log::debug!("Config source: {source:?}");
    let config = source.read()?;
    Ok((config, source))
}
