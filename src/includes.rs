//! Filesystem backed include resolution.
//!
//! Paths resolve against the including file's directory, or `base_dir` at
//! the top level. An address narrows the file to a range of lines:
//!
//! - `N,M` keeps lines `N` through `M` (1-based, inclusive); either side may
//!   be omitted.
//! - `/start/,/end/` keeps the first line matching `start` up to and
//!   including the first later line matching `end`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use regex::Regex;

use blockdown_parser::IncludeResolver;

#[derive(Debug, Clone)]
pub struct FsIncludeResolver {
    base_dir: PathBuf,
}

impl FsIncludeResolver {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    fn resolve(&self, from: Option<&str>, path: &str) -> PathBuf {
        let mut full = self.base_dir.clone();
        if let Some(dir) = from {
            full.push(dir);
        }
        full.push(path);
        full
    }

    fn read(&self, from: Option<&str>, path: &str, address: Option<&str>) -> io::Result<Vec<u8>> {
        let full = self.resolve(from, path);
        let data = fs::read(&full)?;
        match address {
            None => Ok(data),
            Some(addr) => select(&data, addr),
        }
    }
}

impl IncludeResolver for FsIncludeResolver {
    fn read_include(&mut self, from: Option<&str>, path: &str, address: Option<&str>) -> Vec<u8> {
        match self.read(from, path, address) {
            Ok(data) => data,
            Err(e) => {
                log::warn!("failed to include {path}: {e}");
                Vec::new()
            }
        }
    }
}

fn invalid(message: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, message)
}

/// Apply `address` to `data`, keeping whole lines.
fn select(data: &[u8], address: &str) -> io::Result<Vec<u8>> {
    let text = String::from_utf8_lossy(data);
    let lines: Vec<&str> = text.split_inclusive('\n').collect();

    let (start, end) = if address.starts_with('/') {
        regex_range(&lines, address)?
    } else {
        line_range(lines.len(), address)?
    };

    if start > end || start >= lines.len() {
        return Ok(Vec::new());
    }
    let end = end.min(lines.len() - 1);
    Ok(lines[start..=end].concat().into_bytes())
}

/// `N,M` as zero-based inclusive indices.
fn line_range(count: usize, address: &str) -> io::Result<(usize, usize)> {
    let (lo, hi) = address
        .split_once(',')
        .ok_or_else(|| invalid(format!("address {address:?} has no ','")))?;
    let parse = |s: &str, default: usize| -> io::Result<usize> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(default);
        }
        s.parse::<usize>()
            .map_err(|_| invalid(format!("invalid line number {s:?} in address {address:?}")))
    };
    let lo = parse(lo, 1)?.max(1);
    let hi = parse(hi, count)?;
    if hi == 0 {
        return Err(invalid(format!("invalid line range {address:?}")));
    }
    Ok((lo - 1, hi - 1))
}

/// `/re1/,/re2/` as zero-based inclusive indices.
fn regex_range(lines: &[&str], address: &str) -> io::Result<(usize, usize)> {
    let bad = || invalid(format!("invalid regex address {address:?}"));
    let rest = address.strip_prefix('/').ok_or_else(bad)?;
    let (first, rest) = rest.split_once("/,/").ok_or_else(bad)?;
    let second = rest.strip_suffix('/').ok_or_else(bad)?;

    let compile =
        |re: &str| Regex::new(re).map_err(|e| invalid(format!("invalid regex {re:?}: {e}")));
    let (first, second) = (compile(first)?, compile(second)?);

    let start = lines
        .iter()
        .position(|l| first.is_match(l))
        .ok_or_else(|| invalid(format!("no line matches {address:?}")))?;
    let end = lines[start + 1..]
        .iter()
        .position(|l| second.is_match(l))
        .map_or(lines.len() - 1, |p| start + 1 + p);
    Ok((start, end))
}

/// Directory to resolve top-level includes of `input` against.
pub fn base_dir_for(input: Option<&Path>) -> io::Result<PathBuf> {
    match input.and_then(Path::parent) {
        Some(dir) if !dir.as_os_str().is_empty() => Ok(dir.to_path_buf()),
        _ => std::env::current_dir(),
    }
}
