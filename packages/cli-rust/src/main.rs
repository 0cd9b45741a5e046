//! `pathset` binary: print every legal access path of a schema description.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use pathset_core::{enumerate_paths, PathsOptions, DEFAULT_MAX_DEPTH};

mod load;

/// Enumerate the legal access paths of a JSON schema description.
///
/// Reads a schema document, walks it, and prints the complete set of path
/// strings a "get value at path" accessor would accept, one per line.
#[derive(Parser, Debug)]
#[command(name = "pathset", version, about)]
struct Cli {
    /// Path to a JSON schema description file.
    schema: PathBuf,

    /// Maximum number of nested member accesses a path may contain.
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH, env = "PATHSET_MAX_DEPTH")]
    max_depth: usize,

    /// Emit the path set as a JSON array instead of one path per line.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let document = load::read_document(&cli.schema)?;
    let (schema, registry) = document.into_parts()?;
    tracing::debug!(
        definitions = registry.len(),
        max_depth = cli.max_depth,
        "loaded schema document"
    );

    let options = PathsOptions { max_depth: cli.max_depth };
    let paths = enumerate_paths(&schema, &registry, &options);

    if cli.json {
        let rendered =
            serde_json::to_string_pretty(&paths).context("cannot render path set as JSON")?;
        println!("{rendered}");
    } else {
        for path in &paths {
            println!("{path}");
        }
    }

    Ok(())
}
