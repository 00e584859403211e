// Sonnet finder CLI.
//
// Scans a plain-text file for phrases that happen to scan as iambic
// pentameter, buckets them by slant rhyme and prints a Shakespearean sonnet
// made of them. The candidate store can be cached to a TSV file and remixed
// into new sonnets later without rescanning.
//
// Usage:
//   sonnet find TEXTFILE --dict CMUDICT [--output TSV] [--seed N]
//     [--similarity S | --no-similarity] [--config JSON] [--parallel]
//     [--no-prose-filter] [--debug]
//   sonnet remix TSVFILE [--seed N] [--similarity S | --no-similarity]
//     [--config JSON] [--debug]
//
// Logs go to stderr (`RUST_LOG` filters them); the sonnet goes to stdout.
// Exit status 1 means the text did not contain enough rhyming material.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use pentameter_phonetics::PronouncingDictionary;
use pentameter_prng::SeededRng;
use pentameter_sonnet::{
    Assembler, CandidateStore, FinderConfig, collect_candidates, collect_candidates_parallel,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sonnet")]
#[command(about = "Find accidental iambic pentameter and turn it into sonnets.")]
struct CommandLine {
    /// Show debug logs (every candidate found, every skipped line)
    #[arg(long, global = true)]
    debug: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a text file and print a sonnet
    #[command(alias = "f")]
    Find {
        textfile: PathBuf,
        /// Pronouncing dictionary in CMUdict format
        #[arg(long)]
        dict: PathBuf,
        /// Write all candidates to this TSV file
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Scan lines on all cores
        #[arg(long)]
        parallel: bool,
        /// Scan every line, including ones that do not look like prose
        #[arg(long)]
        no_prose_filter: bool,
        #[command(flatten)]
        assembly: AssemblyArgs,
    },
    /// Print a new sonnet from a TSV file written by `find`
    #[command(alias = "r")]
    Remix {
        tsvfile: PathBuf,
        #[command(flatten)]
        assembly: AssemblyArgs,
    },
}

#[derive(Args)]
struct AssemblyArgs {
    /// Random seed (default: derived from the clock)
    #[arg(long)]
    seed: Option<u64>,
    /// Phoneme similarity limit for slant rhymes; higher is stricter
    #[arg(long, allow_hyphen_values = true, conflicts_with = "no_similarity")]
    similarity: Option<f64>,
    /// Pair any two lines of a rhyme bucket
    #[arg(long)]
    no_similarity: bool,
    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,
}

impl AssemblyArgs {
    fn finder_config(&self) -> anyhow::Result<FinderConfig> {
        let mut config = match &self.config {
            Some(path) => FinderConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => FinderConfig::default(),
        };
        if let Some(limit) = self.similarity {
            config.similarity_limit = Some(limit);
        }
        if self.no_similarity {
            config.similarity_limit = None;
        }
        Ok(config)
    }

    fn seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or_default()
        })
    }
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn read_lines(path: &Path) -> anyhow::Result<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    Ok(text.lines().map(str::to_string).collect())
}

fn find(
    textfile: &Path,
    dict: &Path,
    output: Option<&Path>,
    config: &FinderConfig,
) -> anyhow::Result<CandidateStore> {
    let dict_text =
        std::fs::read_to_string(dict).with_context(|| format!("reading {}", dict.display()))?;
    let dictionary = PronouncingDictionary::from_cmudict(&dict_text)
        .with_context(|| format!("parsing {}", dict.display()))?;
    info!(words = dictionary.len(), "loaded pronouncing dictionary");

    let keyer = config.keyer()?;
    let lines = read_lines(textfile)?;
    info!(lines = lines.len(), path = %textfile.display(), "scanning for iambic pentameter");
    let store = if config.parallel {
        collect_candidates_parallel(&lines, &dictionary, &keyer, config.prose_filter)
    } else {
        collect_candidates(&lines, &dictionary, &keyer, config.prose_filter)
    };

    if let Some(path) = output {
        store
            .save(path)
            .with_context(|| format!("writing {}", path.display()))?;
    }
    Ok(store)
}

fn print_sonnet(store: &CandidateStore, config: &FinderConfig, seed: u64) -> ExitCode {
    info!(
        seed,
        similarity_limit = ?config.similarity_limit,
        rhyme_buckets = store.buckets_of_size(2).len(),
        "assembling sonnet"
    );
    let mut rng = SeededRng::new(seed);
    match Assembler::new(store, config.pair_rule()).assemble(&mut rng) {
        Ok(sonnet) => {
            print!("{sonnet}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            warn!("{e}");
            eprintln!("not enough rhyming material found");
            ExitCode::FAILURE
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = CommandLine::parse();
    init_logging(cli.debug);

    match cli.command {
        Commands::Find {
            textfile,
            dict,
            output,
            parallel,
            no_prose_filter,
            assembly,
        } => {
            let mut config = assembly.finder_config()?;
            config.parallel |= parallel;
            config.prose_filter &= !no_prose_filter;
            let store = find(&textfile, &dict, output.as_deref(), &config)?;
            Ok(print_sonnet(&store, &config, assembly.seed()))
        }
        Commands::Remix { tsvfile, assembly } => {
            let config = assembly.finder_config()?;
            let store = CandidateStore::load(&tsvfile)
                .with_context(|| format!("reading {}", tsvfile.display()))?;
            Ok(print_sonnet(&store, &config, assembly.seed()))
        }
    }
}
