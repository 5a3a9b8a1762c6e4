//! `signa`: translate sentences into sign-language animation tokens.
//!
//! ## Usage
//!
//! ```bash
//! # Translate one sentence
//! signa --assets static/assets translate "She went home"
//!
//! # Translate every line of stdin
//! cat sentences.txt | signa translate
//!
//! # Measure pipeline throughput over a file of sentences
//! signa --assets static/assets bench sentences.txt --runs 5
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `signa=info`).
//!
//! ## Example Output (bench)
//!
//! ```text
//! --------------------------------
//! Sentences   : 10_000
//! Elapsed     : 0.052 s
//! Sent/sec    : 192_307
//! Tokens      : 61_234
//! Tokens/sec  : 1_177_576
//! --------------------------------
//! ```

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use signa_core::analyzer::Resources;
use signa_core::pipeline::{AssetLookup, CachedLookup, DirectoryAssets, Pipeline, Translation};
use signa_core::Config;

const WARMUP_RUNS: usize = 1;

#[derive(Parser, Debug)]
#[command(name = "signa")]
#[command(about = "Translate sentences into sign-language animation tokens")]
#[command(version)]
struct Args {
    /// TOML configuration file
    #[arg(short, long, global = true, env = "SIGNA_CONFIG")]
    config: Option<PathBuf>,

    /// Asset directory to search for clips (repeatable, searched in order)
    #[arg(short, long = "assets", global = true)]
    assets: Vec<PathBuf>,

    /// Directory overriding the embedded analyzer resources
    #[arg(short, long, global = true)]
    resources: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Translate the given sentence, or each line of stdin when none is given
    Translate {
        /// Sentence words
        text: Vec<String>,
    },
    /// Measure throughput over every line of a file
    Bench {
        /// File with one sentence per line
        file: PathBuf,

        /// Measured runs
        #[arg(long, default_value_t = 5)]
        runs: usize,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("signa=info")),
        )
        .init();

    let args = Args::parse();
    let config = resolve_config(&args)?;

    let mut resources = match &config.resources.dir {
        Some(dir) => Resources::with_dir(dir),
        None => Resources::new(),
    };
    resources
        .ensure_ready()
        .context("failed to load analyzer resources")?;

    let directory = DirectoryAssets::with_roots(config.assets.roots.iter().cloned());
    let stems = directory
        .clip_stems(&config.assets.extension)
        .context("failed to list asset directories")?;
    let capabilities = resources.capabilities_with_vocabulary(stems.iter().map(String::as_str))?;
    info!(
        roots = ?directory.roots(),
        clips = stems.len(),
        cache = config.assets.cache,
        "asset lookup ready"
    );

    let lookup: Box<dyn AssetLookup> = if config.assets.cache {
        Box::new(CachedLookup::with_policy(
            directory,
            config.assets.cache_capacity,
            config.assets.cache_ttl(),
        ))
    } else {
        Box::new(directory)
    };

    let mut pipeline = Pipeline::with_options(capabilities, lookup, config.pipeline_options());

    match args.command {
        Command::Translate { text } => translate(&mut pipeline, &text),
        Command::Bench { file, runs } => bench(&mut pipeline, &file, runs.max(1)),
    }
}

/// File, then environment, then command line.
fn resolve_config(args: &Args) -> Result<Config> {
    resolve_config_from(args, Config::apply_env)
}

fn resolve_config_from(args: &Args, apply_env: impl FnOnce(&mut Config)) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::default(),
    };
    apply_env(&mut config);

    if !args.assets.is_empty() {
        config.assets.roots = args.assets.clone();
    }
    if let Some(dir) = &args.resources {
        config.resources.dir = Some(dir.clone());
    }
    config.validate()?;
    Ok(config)
}

fn translate(pipeline: &mut Pipeline<Box<dyn AssetLookup>>, text: &[String]) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if !text.is_empty() {
        let sentence = text.join(" ");
        let translation = pipeline.process(&sentence)?;
        print_translation(&mut out, &translation)?;
        return Ok(());
    }

    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        let translation = pipeline
            .process(&line)
            .with_context(|| format!("failed to translate {:?}", line))?;
        print_translation(&mut out, &translation)?;
    }
    info!(metrics = %pipeline.metrics(), "done");
    Ok(())
}

fn print_translation(out: &mut impl Write, t: &Translation) -> io::Result<()> {
    let tokens: Vec<String> = t.tokens.iter().map(ToString::to_string).collect();
    writeln!(out, "text    : {}", t.text)?;
    writeln!(out, "tense   : {} ({})", t.tense, t.scores)?;
    match t.marker {
        Some(marker) => writeln!(out, "marker  : {}", marker)?,
        None => writeln!(out, "marker  : -")?,
    }
    writeln!(out, "tokens  : {}", tokens.join(" "))?;
    writeln!(out)
}

fn bench(pipeline: &mut Pipeline<Box<dyn AssetLookup>>, file: &Path, runs: usize) -> Result<()> {
    let input = fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let sentences: Vec<&str> = input.lines().filter(|l| !l.trim().is_empty()).collect();

    println!("Sentences : {}", fmt_count(sentences.len() as u64));
    println!("Runs      : {}\n", runs);

    for _ in 0..WARMUP_RUNS {
        run_once(pipeline, &sentences)?;
    }

    let mut total = Duration::ZERO;
    let mut tokens = 0u64;
    for _ in 0..runs {
        let start = Instant::now();
        tokens = run_once(pipeline, &sentences)?;
        total += start.elapsed();
    }
    let elapsed = total / runs as u32;

    print_perf(sentences.len() as u64, elapsed, tokens);
    info!(metrics = %pipeline.metrics(), "bench finished");
    Ok(())
}

fn run_once(pipeline: &mut Pipeline<Box<dyn AssetLookup>>, sentences: &[&str]) -> Result<u64> {
    let mut tokens = 0u64;
    for sentence in sentences {
        let translation = pipeline
            .process(sentence)
            .with_context(|| format!("failed to translate {:?}", sentence))?;
        tokens += translation.tokens.len() as u64;
        std::hint::black_box(&translation);
    }
    Ok(tokens)
}

fn print_perf(sentences: u64, elapsed: Duration, tokens: u64) {
    let secs = elapsed.as_secs_f64().max(f64::EPSILON);

    println!("--------------------------------");
    println!("Sentences   : {}", fmt_count(sentences));
    println!("Elapsed     : {:.3} s", secs);
    println!("Sent/sec    : {}", fmt_count((sentences as f64 / secs) as u64));

    if tokens > 0 {
        println!("Tokens      : {}", fmt_count(tokens));
        println!("Tokens/sec  : {}", fmt_count((tokens as f64 / secs) as u64));
    }

    println!("--------------------------------\n");
}

fn fmt_count(n: u64) -> String {
    let s = n.to_string();
    let mut out = String::with_capacity(s.len() + s.len() / 3);

    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push('_');
        }
        out.push(ch);
    }

    out.chars().rev().collect()
}
