use std::env;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{Level, debug, info};

use fixture_gen::config::CONFIG_ENV_VAR;
use fixture_gen::models::{DEFAULT_CREDENTIAL_FILE, DEFAULT_POST_FILE};
use fixture_gen::{CredentialService, FixtureConfig, PostService};

/// Generate and read back synthetic test fixtures
#[derive(Debug, Parser)]
#[command(name = "fixture-gen", version, about, long_about = None)]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Username/password fixtures (default file: user_pass.txt)
    Credentials {
        #[command(subcommand)]
        action: Action,
    },
    /// Image post fixtures (default file: post_values.txt)
    Posts {
        #[command(subcommand)]
        action: Action,
    },
}

#[derive(Debug, Subcommand)]
enum Action {
    /// Recreate the fixture file with fresh random records
    Generate(GenerateArgs),
    /// Read a fixture file back into aligned columns
    Parse(ParseArgs),
}

#[derive(Debug, Args)]
struct GenerateArgs {
    /// Output file
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Number of random records after the sentinel
    #[arg(short = 'n', long)]
    count: Option<usize>,

    /// Seed for reproducible output
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON config file (falls back to $FIXTURE_CONFIG)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Do not echo generated records
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Args)]
struct ParseArgs {
    /// Fixture file to read
    #[arg(value_name = "PATH")]
    path: Option<PathBuf>,

    /// Print the columns as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // stdout carries records, logs go to stderr
    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Command::Credentials { action } => match action {
            Action::Generate(args) => generate_credentials(&args),
            Action::Parse(args) => parse_credentials(&args),
        },
        Command::Posts { action } => match action {
            Action::Generate(args) => generate_posts(&args),
            Action::Parse(args) => parse_posts(&args),
        },
    }
}

// Defaults, then the JSON file from --config or $FIXTURE_CONFIG
fn load_config(args: &GenerateArgs) -> Result<FixtureConfig> {
    let path = args
        .config
        .clone()
        .or_else(|| env::var(CONFIG_ENV_VAR).ok().map(PathBuf::from));

    match path {
        Some(path) => {
            info!("using config {}", path.display());
            Ok(FixtureConfig::from_json_file(&path)?)
        }
        None => Ok(FixtureConfig::default()),
    }
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => {
            debug!("seeding rng with {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    }
}

fn echo(quiet: bool) -> impl FnMut(&str) {
    move |line: &str| {
        if !quiet {
            println!("{line}");
        }
    }
}

fn generate_credentials(args: &GenerateArgs) -> Result<()> {
    let mut config = load_config(args)?.credentials;
    if let Some(count) = args.count {
        config.record_count = count;
    }
    let path = output_path(args, DEFAULT_CREDENTIAL_FILE);
    let mut rng = make_rng(args.seed);

    let lines = CredentialService::generate_file(&path, &config, &mut rng, echo(args.quiet))
        .with_context(|| format!("generating {}", path.display()))?;
    info!("credential fixture ready: {} ({} lines)", path.display(), lines);
    Ok(())
}

fn generate_posts(args: &GenerateArgs) -> Result<()> {
    let mut config = load_config(args)?.posts;
    if let Some(count) = args.count {
        config.record_count = count;
    }
    let path = output_path(args, DEFAULT_POST_FILE);
    let mut rng = make_rng(args.seed);

    let lines = PostService::generate_file(&path, &config, &mut rng, echo(args.quiet))
        .with_context(|| format!("generating {}", path.display()))?;
    info!("post fixture ready: {} ({} lines)", path.display(), lines);
    Ok(())
}

fn parse_credentials(args: &ParseArgs) -> Result<()> {
    let path = input_path(args, DEFAULT_CREDENTIAL_FILE);
    let columns = CredentialService::parse_file(&path)
        .with_context(|| format!("parsing {}", path.display()))?;

    if args.json {
        return print_json(&columns);
    }
    println!("Usernames: {:?}", columns.usernames);
    println!("Passwords: {:?}", columns.passwords);
    Ok(())
}

fn parse_posts(args: &ParseArgs) -> Result<()> {
    let path = input_path(args, DEFAULT_POST_FILE);
    let columns =
        PostService::parse_file(&path).with_context(|| format!("parsing {}", path.display()))?;

    if args.json {
        return print_json(&columns);
    }
    println!("File Names: {:?}", columns.file_names);
    println!("Post Descriptions: {:?}", columns.post_descriptions);
    println!("Image Sizes: {:?}", columns.image_sizes);
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

fn output_path(args: &GenerateArgs, default: &str) -> PathBuf {
    args.output
        .clone()
        .unwrap_or_else(|| Path::new(default).to_path_buf())
}

fn input_path(args: &ParseArgs, default: &str) -> PathBuf {
    args.path
        .clone()
        .unwrap_or_else(|| Path::new(default).to_path_buf())
}
