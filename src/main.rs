//! JSS config generator CLI
//!
//! Entry point for the `jss-config` command-line tool.

use clap::Parser;
use jss_config_gen::cli::{Cli, Command, SourceArgs};
use jss_config_gen::{logging, ConfigError, ConfigResult, ResolvedConfig};
use std::path::PathBuf;
use std::process;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("Error initializing logging: {}", e);
        process::exit(1);
    }

    let result = match cli.command {
        Command::Generate {
            sources,
            output,
            dry_run,
        } => run_generate(&sources, output, dry_run),
        Command::Verify { sources, json } => run_verify(&sources, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn resolve(sources: &SourceArgs) -> ConfigResult<ResolvedConfig> {
    let inputs = sources.load_inputs()?;
    ResolvedConfig::build(inputs)
}

fn run_generate(sources: &SourceArgs, output: PathBuf, dry_run: bool) -> ConfigResult<()> {
    let resolved = resolve(sources)?;

    if dry_run {
        print!("{}", resolved.render()?);
    } else {
        resolved.write_to(&output)?;
    }
    Ok(())
}

fn run_verify(sources: &SourceArgs, json: bool) -> ConfigResult<()> {
    let resolved = resolve(sources)?;

    if json {
        let text = serde_json::to_string_pretty(&resolved)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        println!("{}", text);
        return Ok(());
    }

    println!("Configuration valid");
    println!();
    if let Some(endpoint) = resolved.graphql_endpoint() {
        println!("  GraphQL endpoint: {}", endpoint);
    }
    if let Some(app) = resolved.get_str("jssAppName") {
        println!("  App name: {}", app);
    }
    println!("  Sources:");
    for source in &resolved.sources {
        match (&source.path, &source.digest) {
            (Some(path), Some(digest)) => {
                let short = &digest[..12.min(digest.len())];
                println!("    {:<9} {} (sha256 {})", source.origin, path, short);
            }
            _ => println!("    {}", source.origin),
        }
    }
    Ok(())
}
