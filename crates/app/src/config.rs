//! Configuration for the huffstream demonstration.
//!
//! Handles parsing command-line arguments and generating sensible defaults.
//!
//! The tool works with ZERO arguments: it samples a fixed pangram, encodes
//! it through a temporary file and decodes it back. All defaults are printed
//! with `--print-config` so runs are reproducible.

use std::path::PathBuf;

/// Default sample when neither text, a file, nor a seed is supplied.
pub const DEFAULT_TEXT: &str = "the quick brown fox jumped over the lazy dog";

/// Where the sample comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Literal text from the command line (or the default pangram)
    Text(String),
    /// Contents of a file
    File(PathBuf),
    /// Seeded generated text of the given size
    Generated { seed: u64, size_bytes: usize },
}

/// Complete configuration for a demonstration run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Sample to build the distribution from (and to encode)
    pub source: Source,

    /// Encoded output path (None = temporary file, removed afterwards)
    pub output_file: Option<PathBuf>,

    /// Whether to print the resolved configuration
    pub print_config: bool,

    /// Whether to print the code table
    pub show_codes: bool,

    /// Whether to print the metrics summary
    pub print_metrics: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: Source::Text(DEFAULT_TEXT.to_string()),
            output_file: None,
            print_config: false,
            show_codes: false,
            print_metrics: true,
        }
    }
}

impl Config {
    /// Parse configuration from command-line arguments (program name excluded).
    ///
    /// `--text`, `--in` and `--seed` are mutually exclusive sample sources.
    pub fn from_args(args: &[String]) -> Result<Self, String> {
        let mut config = Config::default();
        let mut text: Option<String> = None;
        let mut input_file: Option<PathBuf> = None;
        let mut seed: Option<u64> = None;
        let mut size_bytes: Option<usize> = None;

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--text" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--text requires a string".to_string());
                    }
                    text = Some(args[i].clone());
                }
                "--in" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--in requires a path".to_string());
                    }
                    input_file = Some(PathBuf::from(&args[i]));
                }
                "--seed" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--seed requires a number".to_string());
                    }
                    seed = Some(args[i].parse().map_err(|_| "invalid seed")?);
                }
                "--size" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--size requires a number".to_string());
                    }
                    size_bytes = Some(args[i].parse().map_err(|_| "invalid size")?);
                }
                "--out" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--out requires a path".to_string());
                    }
                    config.output_file = Some(PathBuf::from(&args[i]));
                }
                "--print-config" => {
                    config.print_config = true;
                }
                "--show-codes" => {
                    config.show_codes = true;
                }
                "--no-metrics" => {
                    config.print_metrics = false;
                }
                "--help" | "-h" => {
                    print_help();
                    std::process::exit(0);
                }
                _ => {
                    return Err(format!("unknown argument: {}", args[i]));
                }
            }
            i += 1;
        }

        let sources = [text.is_some(), input_file.is_some(), seed.is_some()];
        if sources.iter().filter(|&&set| set).count() > 1 {
            return Err("--text, --in and --seed are mutually exclusive".to_string());
        }
        if size_bytes.is_some() && seed.is_none() {
            return Err("--size only applies with --seed".to_string());
        }

        if let Some(text) = text {
            if text.is_empty() {
                return Err("--text must not be empty".to_string());
            }
            config.source = Source::Text(text);
        } else if let Some(path) = input_file {
            config.source = Source::File(path);
        } else if let Some(seed) = seed {
            config.source = Source::Generated {
                seed,
                size_bytes: size_bytes.unwrap_or(4096),
            };
        }

        Ok(config)
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Configuration ===");
        match &self.source {
            Source::Text(text) => println!("Sample: text ({} bytes)", text.len()),
            Source::File(path) => println!("Sample: file {}", path.display()),
            Source::Generated { seed, size_bytes } => {
                println!("Sample: generated (seed {seed}, {size_bytes} bytes)")
            }
        }
        match &self.output_file {
            Some(path) => println!("Output file: {}", path.display()),
            None => println!("Output file: (temporary)"),
        }
        println!();
    }
}

fn print_help() {
    println!("huffstream: Huffman encode/decode round trip");
    println!();
    println!("USAGE:");
    println!("    huffstream [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    --text <STR>      Sample text (default: \"{DEFAULT_TEXT}\")");
    println!("    --in <PATH>       Sample file");
    println!("    --seed <N>        Generate a seeded sample instead");
    println!("    --size <N>        Generated sample size (default: 4096, needs --seed)");
    println!("    --out <PATH>      Keep the encoded stream at PATH (default: temp file)");
    println!();
    println!("    --print-config    Print resolved configuration");
    println!("    --show-codes      Print the code table");
    println!("    --no-metrics      Don't print metrics summary");
    println!("    --help, -h        Print this help");
    println!();
    println!("EXAMPLES:");
    println!("    huffstream                          # Encode the default pangram");
    println!("    huffstream --text \"aaab\" --show-codes");
    println!("    huffstream --seed 42 --size 65536   # Deterministic generated sample");
    println!();
}
