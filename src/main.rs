//! coffee-cache - caching CoffeeScript compile step
//!
//! Compiles inline snippets, single files, and concatenated bundles through
//! an external compiler, and skips the compiler whenever a previous result is
//! still valid.

mod block;
mod build;
mod cache;
mod cli;
mod compiler;
mod config;
mod core;
mod error;
mod export;
mod logging;
mod store;

use block::{parse_bundle_block, parse_bundle_body};
use build::{Builder, InlineCompiler};
use cache::{clear_cache, FileCache, KeyValueCache, MemoryCache};
use clap::Parser;
use cli::{Cli, Command};
use compiler::ExternalCompiler;
use config::Config;
use error::{CoffeeError, Result};
use export::{create_exporter, Report};
use rayon::prelude::*;
use std::collections::HashSet;
use std::io::{self, BufWriter, Read, Write};
use std::process::ExitCode;
use store::DiskStore;
use tracing::{debug, info, warn};

fn main() -> ExitCode {
    // Parse command line arguments
    let cli = Cli::parse();

    // Convert to config
    let (config, command) = match cli.into_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };

    logging::init_logging(config.verbose);

    match run(&config, command) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}

fn run(config: &Config, command: Command) -> Result<ExitCode> {
    match command {
        Command::Inline => run_inline(config),
        Command::Compile { paths } => run_compile(config, &paths),
        Command::Bundle { name, inputs } => run_bundle(config, name, inputs),
        Command::ClearCache => {
            let removed = clear_cache(&config.effective_cache_dir())?;
            info!(removed, "cleared inline cache");
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Exit code 1 signals that at least one compile produced only diagnostics
fn exit_code(failed: bool) -> ExitCode {
    if failed {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}

fn read_stdin() -> Result<String> {
    let mut text = String::new();
    io::stdin().read_to_string(&mut text)?;
    Ok(text)
}

/// Open the on-disk inline cache, or fall back to a per-process one
fn open_cache(config: &Config) -> Box<dyn KeyValueCache> {
    let dir = config.effective_cache_dir();
    match FileCache::new(&dir) {
        Ok(cache) => {
            debug!(dir = %dir.display(), "inline cache enabled");
            Box::new(cache)
        }
        Err(e) => {
            warn!("{}; caching in memory for this run only", e);
            Box::new(MemoryCache::new())
        }
    }
}

fn run_inline(config: &Config) -> Result<ExitCode> {
    let source = read_stdin()?;

    let mut inline = InlineCompiler::new(ExternalCompiler::from_config(config)?);
    if config.use_cache {
        inline = inline.with_cache(open_cache(config), config.cache_timeout);
    }

    let output = inline.compile(&source)?;
    let failed = !output.is_compiled();

    let mut stdout = io::stdout().lock();
    stdout.write_all(output.into_text().as_bytes())?;
    stdout.flush()?;

    Ok(exit_code(failed))
}

fn run_compile(config: &Config, paths: &[String]) -> Result<ExitCode> {
    // Two workers on the same path would race on one output file
    let mut seen = HashSet::new();
    let unique: Vec<&str> = paths
        .iter()
        .map(String::as_str)
        .filter(|p| seen.insert(*p))
        .collect();

    let builder = Builder::new(
        config.layout(),
        DiskStore,
        ExternalCompiler::from_config(config)?,
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.num_threads)
        .build()
        .map_err(|e| CoffeeError::InvalidConfig(format!("Failed to create thread pool: {}", e)))?;

    let results: Vec<Result<Report>> = pool.install(|| {
        unique
            .par_iter()
            .map(|path| {
                builder
                    .compile_file(path)
                    .map(|artifact| Report::new(*path, artifact))
            })
            .collect()
    });

    // Paths that compiled are still reported when others hit an error
    let mut reports = Vec::with_capacity(results.len());
    let mut errors = 0;
    for (path, result) in unique.iter().zip(results) {
        match result {
            Ok(report) => reports.push(report),
            Err(e) => {
                eprintln!("Error: {}: {}", path, e);
                errors += 1;
            }
        }
    }

    let code = write_reports(config, &reports)?;
    if errors > 0 {
        debug!(errors, reported = reports.len(), "compile finished with errors");
        return Ok(ExitCode::from(2));
    }
    Ok(code)
}

fn run_bundle(config: &Config, name: Option<String>, inputs: Vec<String>) -> Result<ExitCode> {
    let (name, inputs) = match name {
        Some(name) if !inputs.is_empty() => (name, inputs),
        Some(name) => (name, parse_bundle_body(&read_stdin()?)),
        None => parse_bundle_block(&read_stdin()?)?,
    };

    if inputs.is_empty() {
        warn!(bundle = %name, "bundle has no inputs");
    }

    let builder = Builder::new(
        config.layout(),
        DiskStore,
        ExternalCompiler::from_config(config)?,
    );
    let artifact = builder.compile_bundle(&name, &inputs)?;

    write_reports(config, &[Report::new(name, artifact)])
}

fn write_reports(config: &Config, reports: &[Report]) -> Result<ExitCode> {
    let exporter = create_exporter(config.output_format);
    let mut writer = BufWriter::new(io::stdout().lock());
    exporter.export(reports, &mut writer)?;
    writer.flush()?;

    Ok(exit_code(reports.iter().any(|r| r.artifact.is_failed())))
}
