//! huffstream: sample a distribution, encode through a file, decode it back.
//!
//! The tree never touches the file: the decoder reuses the encoder's
//! in-memory tree, since the stream format carries none.

mod config;
mod input_gen;

use std::fs::File;

use huffstream_core::metrics::Metrics;
use huffstream_core::{Distribution, Error, Reader, Result, Writer};
use tempfile::NamedTempFile;

use crate::config::{Config, Source};

/// Decoded samples longer than this are summarized rather than printed.
const MAX_ECHO_BYTES: usize = 256;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let result = Config::from_args(&args)
        .map_err(Error::Config)
        .and_then(|config| run(&config));

    if let Err(e) = result {
        eprintln!("error: {e}");
        if matches!(e, Error::Config(_)) {
            eprintln!("run with --help for usage");
            std::process::exit(2);
        }
        std::process::exit(1);
    }
}

fn load_sample(source: &Source) -> Result<Vec<u8>> {
    match source {
        Source::Text(text) => Ok(text.as_bytes().to_vec()),
        Source::File(path) => Ok(std::fs::read(path)?),
        Source::Generated { seed, size_bytes } => {
            Ok(input_gen::generate_sample_data(*seed, *size_bytes))
        }
    }
}

fn run(config: &Config) -> Result<()> {
    if config.print_config {
        config.print();
    }

    let mut metrics = Metrics::new();
    let sample = load_sample(&config.source)?;
    let dist = Distribution::from_sample(&sample)?;
    println!("{dist}");

    let temp_file;
    let path = match &config.output_file {
        Some(path) => path.as_path(),
        None => {
            temp_file = NamedTempFile::new()?;
            temp_file.path()
        }
    };

    // Encode
    let mut writer = Writer::new(File::create(path)?, &dist)?;
    metrics.record_model(&dist, writer.code_table());

    if config.show_codes {
        println!("\n=== Code Table ===");
        for (symbol, code) in writer.code_table().iter() {
            println!("{:>3} {:?}: {}", symbol, symbol as char, code);
        }
        println!();
    }

    let written = writer.write(&sample)?;
    let (file, tree) = writer.into_parts();
    file.sync_all()?;
    drop(file);

    let encoded_bytes = std::fs::metadata(path)?.len() as usize;
    metrics.record_encode(written, encoded_bytes);
    println!("Wrote: {} bytes, Originally: {} bytes", encoded_bytes, sample.len());
    println!("Compression rate: {:.2}%", metrics.space_savings() * 100.0);

    // Decode with the encoder's tree
    let mut reader = Reader::new(File::open(path)?, &tree);
    let decoded = reader.read_symbols(sample.len())?;
    metrics.record_decode(decoded.len());

    if decoded.len() <= MAX_ECHO_BYTES {
        println!("Decompressed into: {}", String::from_utf8_lossy(&decoded));
    } else {
        println!("Decompressed {} bytes", decoded.len());
    }

    let expected = crc32fast::hash(&sample);
    let actual = crc32fast::hash(&decoded);
    metrics.complete();

    if config.print_metrics {
        metrics.print_summary();
    }
    metrics.print_result();

    if expected != actual {
        return Err(Error::Crc { expected, actual });
    }
    println!("Verification: CRC32 {expected:#010x} matches");

    Ok(())
}
