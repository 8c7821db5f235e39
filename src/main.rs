use std::{
    fs,
    io::{self, BufRead, BufWriter, Read, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use wardrobe_tagger::{
    feature_vector, parse_clarifai, parse_google_vision, AttributeRecord, Resolver,
    ResolverConfig, SignalBundle, Vocabulary,
};

#[derive(Debug, Parser)]
#[command(name = "wardrobe-tagger")]
#[command(about = "Maps vision labels of clothing photos to wardrobe attributes", long_about = None)]
struct Cli {
    /// JSON resolver configuration; `WARDROBE__*` variables override single values
    #[arg(long, global = true, env = "WARDROBE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve one signal bundle
    Resolve {
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Resolve JSON-lines bundles in parallel
    Batch {
        #[arg(long)]
        input: PathBuf,
    },
    /// Resolve a Google Vision `images:annotate` response
    Vision {
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Resolve a Clarifai model outputs response
    Clarifai {
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Bring a stored record back into the vocabulary
    Conform {
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// One-hot encode a record
    Encode {
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Print the vocabulary
    Vocabulary,
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(io::stderr),
        )
        .init();
}

fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("could not read {}", path.display()))
        }
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("could not read stdin")?;
            Ok(buffer)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

fn load_resolver(config: Option<&Path>) -> Result<Resolver> {
    let config = ResolverConfig::load(config).context("invalid resolver configuration")?;
    Ok(Resolver::new(&config)?)
}

fn batch(resolver: &Resolver, input: &Path) -> Result<()> {
    let file = fs::File::open(input).with_context(|| format!("could not open {}", input.display()))?;
    let mut bundles = Vec::new();
    for (index, line) in io::BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let bundle: SignalBundle = serde_json::from_str(&line)
            .with_context(|| format!("malformed bundle on line {}", index + 1))?;
        bundles.push(bundle);
    }

    let records = resolver.resolve_all(&bundles);
    let mut stdout = BufWriter::new(io::stdout().lock());
    for record in &records {
        serde_json::to_writer(&mut stdout, record)?;
        writeln!(stdout)?;
    }
    stdout.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    setup_logging();
    let Cli { config, command } = Cli::parse();
    let config = config.as_deref();

    match command {
        Commands::Resolve { input } => {
            let bundle: SignalBundle = serde_json::from_str(&read_input(input.as_deref())?)
                .context("malformed signal bundle")?;
            print_json(&load_resolver(config)?.resolve_bundle(&bundle))?;
        }
        Commands::Batch { input } => batch(&load_resolver(config)?, &input)?,
        Commands::Vision { input } => {
            let bundle = parse_google_vision(&read_input(input.as_deref())?)?;
            print_json(&load_resolver(config)?.resolve_bundle(&bundle))?;
        }
        Commands::Clarifai { input } => {
            let bundle = parse_clarifai(&read_input(input.as_deref())?)?;
            print_json(&load_resolver(config)?.resolve_bundle(&bundle))?;
        }
        Commands::Conform { input } => {
            let record: AttributeRecord = serde_json::from_str(&read_input(input.as_deref())?)
                .context("malformed attribute record")?;
            print_json(&load_resolver(config)?.conform(&record))?;
        }
        Commands::Encode { input } => {
            let record: AttributeRecord = serde_json::from_str(&read_input(input.as_deref())?)
                .context("malformed attribute record")?;
            print_json(&feature_vector(&record, Vocabulary::builtin()))?;
        }
        Commands::Vocabulary => print_json(&Vocabulary::builtin().snapshot())?,
    }

    Ok(())
}
