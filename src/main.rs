//! gostsum CLI
//!
//! Streebog (GOST R 34.11-2012) checksums from the command line.
//!
//! # Commands
//!
//! - `hash` - Print checksums of files or stdin
//! - `check` - Verify a checksum list
//! - `hmac` - Keyed HMAC-Streebog tag
//! - `make` - Salted prefix digest
//! - `benchmark` - Run performance benchmark
//! - `config` - Show or create the config file

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};
use std::hint::black_box;
use std::time::Instant;

use gostsum::algorithm::{BLOCK_SIZE, ROUNDS};
use gostsum::config::{default_config_path, ensure_config_dir, Config};
use gostsum::digest::{
    format_checksum_line, hash_path, verify_checksums, CheckOutcome, STDIN_NAME,
};
use gostsum::{DigestSize, Streebog256, Streebog512};

#[derive(Parser)]
#[command(name = "gostsum")]
#[command(version = "0.1.0")]
#[command(about = "Streebog (GOST R 34.11-2012) checksum and HMAC tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Custom config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print checksums of files ("-" or nothing reads stdin)
    Hash {
        files: Vec<PathBuf>,

        /// Digest size in bits (256 or 512)
        #[arg(short, long)]
        bits: Option<u32>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,

        /// Number of threads to use (default: number of CPU cores)
        #[arg(short, long)]
        jobs: Option<usize>,
    },

    /// Verify files against a checksum list
    Check {
        /// Checksum list ("-" reads stdin)
        list: PathBuf,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compute HMAC-Streebog of a file or stdin
    Hmac {
        /// The key
        #[arg(long)]
        key: String,

        /// Decode the key from hex
        #[arg(long)]
        key_hex: bool,

        /// Digest size in bits (256 or 512)
        #[arg(short, long)]
        bits: Option<u32>,

        file: Option<PathBuf>,
    },

    /// Salted digest H(salt || data) of a file or stdin
    Make {
        /// Salt prefix (default: configured secure key)
        #[arg(long)]
        salt: Option<String>,

        /// Digest size in bits (256 or 512)
        #[arg(short, long)]
        bits: Option<u32>,

        file: Option<PathBuf>,
    },

    /// Run performance benchmark
    Benchmark {
        /// Message size in bytes
        #[arg(short, long, default_value = "1048576")]
        size: usize,

        /// Number of messages to hash
        #[arg(short, long, default_value = "100")]
        count: u32,
    },

    /// Show or create the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Hash {
            files,
            bits,
            json,
            jobs,
        } => cmd_hash(files, bits, json, jobs, cli.config),
        Commands::Check { list, json } => cmd_check(&list, json, cli.config),
        Commands::Hmac {
            key,
            key_hex,
            bits,
            file,
        } => cmd_hmac(&key, key_hex, bits, file, cli.config),
        Commands::Make { salt, bits, file } => cmd_make(salt, bits, file, cli.config),
        Commands::Benchmark { size, count } => cmd_benchmark(size, count),
        Commands::Config { action } => cmd_config(action, cli.config),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Log records go to stderr, filtered by `RUST_LOG` (default `warn`)
fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .try_init();
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<Config> {
    let path = path.unwrap_or_else(default_config_path);
    Config::load_or_default(&path)
        .with_context(|| format!("Failed to load config from {}", path.display()))
}

fn digest_size(bits: Option<u32>, config: &Config) -> anyhow::Result<DigestSize> {
    let size = match bits {
        Some(bits) => DigestSize::try_from(bits)?,
        None => config
            .digest_size()
            .context("Invalid default_bits in config")?,
    };
    Ok(size)
}

/// Whole file or stdin in memory, for the one-shot keyed commands
fn read_input(file: Option<&Path>) -> anyhow::Result<Vec<u8>> {
    let mut data = Vec::new();
    match file {
        Some(path) if path.as_os_str() != STDIN_NAME => {
            File::open(path)
                .and_then(|mut f| f.read_to_end(&mut data))
                .with_context(|| format!("Failed to read {}", path.display()))?;
        }
        _ => {
            io::stdin().lock().read_to_end(&mut data)?;
        }
    }
    Ok(data)
}

fn cmd_hash(
    files: Vec<PathBuf>,
    bits: Option<u32>,
    json: bool,
    jobs: Option<usize>,
    config_path: Option<PathBuf>,
) -> anyhow::Result<()> {
    use rayon::prelude::*;

    let config = load_config(config_path)?;
    let size = digest_size(bits, &config)?;
    let chunk = config.chunk_size();

    let files = if files.is_empty() {
        vec![PathBuf::from(STDIN_NAME)]
    } else {
        files
    };

    let num_threads = jobs.unwrap_or_else(num_cpus::get).max(1);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build()
        .context("Failed to start worker threads")?;

    let results: Vec<_> = pool.install(|| {
        files
            .par_iter()
            .map(|path| (path, hash_path(size, path, chunk)))
            .collect()
    });

    let mut failed = 0usize;
    let mut entries = Vec::new();
    for (path, result) in results {
        let name = path.display().to_string();
        match result {
            Ok(digest) if json => entries.push(serde_json::json!({
                "file": name,
                "algorithm": size.to_string(),
                "digest": hex::encode(&digest),
            })),
            Ok(digest) => println!("{}", format_checksum_line(&digest, &name)),
            Err(e) => {
                eprintln!("gostsum: {}", e);
                failed += 1;
            }
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    }
    if failed > 0 {
        anyhow::bail!("{} of {} files could not be read", failed, files.len());
    }

    Ok(())
}

fn cmd_check(list: &Path, json: bool, config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let chunk = config.chunk_size();

    let results = if list.as_os_str() == STDIN_NAME {
        verify_checksums(io::stdin().lock(), chunk)?
    } else {
        let file = File::open(list)
            .with_context(|| format!("Failed to open checksum list {}", list.display()))?;
        verify_checksums(BufReader::new(file), chunk)?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        for result in &results {
            match &result.outcome {
                CheckOutcome::Ok => println!("{}: OK", result.name),
                CheckOutcome::Mismatch => println!("{}: FAILED", result.name),
                CheckOutcome::Unreadable { reason } => {
                    println!("{}: FAILED open or read", result.name);
                    eprintln!("gostsum: {}", reason);
                }
            }
        }
    }

    let failed = results
        .iter()
        .filter(|r| r.outcome != CheckOutcome::Ok)
        .count();
    if failed > 0 {
        anyhow::bail!("{} of {} checksums did not match", failed, results.len());
    }

    Ok(())
}

fn cmd_hmac(
    key: &str,
    key_hex: bool,
    bits: Option<u32>,
    file: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let size = digest_size(bits, &config)?;

    let key = if key_hex {
        hex::decode(key).context("Key is not valid hex")?
    } else {
        key.as_bytes().to_vec()
    };
    let data = read_input(file.as_deref())?;

    println!("{}", hex::encode(size.hmac(&data, &key)));

    Ok(())
}

fn cmd_make(
    salt: Option<String>,
    bits: Option<u32>,
    file: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let size = digest_size(bits, &config)?;
    let salt = salt.unwrap_or_default();
    let data = read_input(file.as_deref())?;

    let digest = size.make_with_default(&data, salt.as_bytes(), config.secure_key.as_bytes());
    println!("{}", hex::encode(digest));

    Ok(())
}

/// Hash `input` `count` times, returning the last digest
///
/// Input and output pass through `black_box` so the loop survives LTO.
fn hash_repeatedly(size: DigestSize, input: &[u8], count: u32) -> Vec<u8> {
    let mut last = Vec::new();
    for _ in 0..count {
        last = black_box(size.digest(black_box(input)));
    }
    last
}

fn cmd_benchmark(size: usize, count: u32) -> anyhow::Result<()> {
    println!(
        "Running benchmark with {} messages of {} bytes...",
        count, size
    );

    let input: Vec<u8> = (0..size).map(|i| i as u8).collect();
    let mut results = Vec::new();

    for digest_size in [DigestSize::Bits256, DigestSize::Bits512] {
        let start = Instant::now();
        black_box(hash_repeatedly(digest_size, &input, count));
        let elapsed = start.elapsed();
        results.push((digest_size, elapsed));
    }

    println!("\nResults:");
    for (digest_size, elapsed) in results {
        let secs = elapsed.as_secs_f64();
        let throughput = (size as f64 * count as f64) / secs / (1024.0 * 1024.0);
        println!(
            "  {}: {:.2}s elapsed, {:.2} MiB/s, {:.2} H/s",
            digest_size,
            secs,
            throughput,
            count as f64 / secs
        );
    }

    println!("\nAlgorithm parameters:");
    println!("  Block size: {} bytes", BLOCK_SIZE);
    println!("  Rounds: {}", ROUNDS);
    println!(
        "  HMAC block: {} / {} bytes",
        Streebog256::HMAC_BLOCK_SIZE,
        Streebog512::HMAC_BLOCK_SIZE
    );

    Ok(())
}

fn cmd_config(action: ConfigAction, config_path: Option<PathBuf>) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show => {
            let path = config_path.unwrap_or_else(default_config_path);
            let config = Config::load_or_default(&path)?;
            println!("# {}", path.display());
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigAction::Init { force } => {
            let path = match config_path {
                Some(path) => path,
                None => ensure_config_dir()?,
            };
            if path.exists() && !force {
                anyhow::bail!(
                    "Config already exists at {}. Use --force to overwrite it.",
                    path.display()
                );
            }
            Config::default().save(&path)?;
            println!("Config written to {}", path.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_repeatedly_returns_real_digest() {
        let input = b"benchmark input";
        for size in [DigestSize::Bits256, DigestSize::Bits512] {
            assert_eq!(hash_repeatedly(size, input, 3), size.digest(input));
        }
        assert!(hash_repeatedly(DigestSize::Bits256, input, 0).is_empty());
    }

    #[test]
    fn test_digest_size_flag_overrides_config() {
        let config = Config {
            default_bits: 256,
            ..Config::default()
        };
        assert_eq!(digest_size(None, &config).unwrap(), DigestSize::Bits256);
        assert_eq!(digest_size(Some(512), &config).unwrap(), DigestSize::Bits512);
        assert!(digest_size(Some(384), &config).is_err());
    }
}
