use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::Parser;

use blockdown::{FsIncludeResolver, parse_with_includes};

mod cli;
use cli::{Cli, Commands};

fn read_all(path: Option<&PathBuf>) -> io::Result<String> {
    match path {
        Some(p) => fs::read_to_string(p),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn start_dir_for(input_path: &Option<PathBuf>) -> io::Result<PathBuf> {
    blockdown::includes::base_dir_for(input_path.as_deref())
}

fn run(cli: Cli) -> io::Result<()> {
    match cli.command {
        Commands::Parse { file, json } => {
            let start_dir = start_dir_for(&file)?;
            let (cfg, cfg_source) = blockdown::config::load(cli.config.as_deref(), &start_dir)?;

            match cfg_source.path() {
                Some(path) => log::debug!("Using config from: {}", path.display()),
                None => log::debug!("Using default config"),
            }

            let input = read_all(file.as_ref())?;
            let doc = parse_with_includes(&input, Some(cfg), FsIncludeResolver::new(start_dir));

            if json {
                let out = serde_json::to_string_pretty(&doc.to_tree(doc.root()))
                    .map_err(io::Error::other)?;
                println!("{out}");
            } else {
                print!("{doc}");
            }
            Ok(())
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
