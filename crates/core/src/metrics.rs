//! Metrics collection and reporting for a codec run.
//!
//! Tracks how well a code fits its data:
//! - Volume (sample, symbols encoded/decoded, bytes produced)
//! - Compression ratio and space savings
//! - Entropy vs. average code length (coding efficiency)
//! - Timing information
//!
//! # Thread Safety
//!
//! The `Metrics` struct is NOT thread-safe. For multi-threaded use, wrap in
//! `Arc<Mutex<Metrics>>` or keep per-thread metrics and merge at the end.

use std::time::{Duration, Instant};

use crate::code_table::CodeTable;
use crate::distribution::Distribution;

/// Counters and model statistics for one encode/decode run.
#[derive(Debug, Clone)]
pub struct Metrics {
    // === Timing ===
    /// When the run started
    pub start_time: Instant,

    /// When the run ended (set on completion)
    pub end_time: Option<Instant>,

    // === Model ===
    /// Size of the sample the distribution was built from
    pub sample_bytes: u64,

    /// Distinct symbols in the distribution
    pub alphabet_size: usize,

    /// Shannon entropy of the distribution, bits per symbol
    pub entropy_bits: f64,

    /// Expected code length under the distribution, bits per symbol
    pub average_code_length: f64,

    // === Encoding ===
    /// Symbols passed to the encoder
    pub symbols_encoded: u64,

    /// Bytes the encoder produced
    pub encoded_bytes: u64,

    // === Decoding ===
    /// Symbols recovered by the decoder
    pub symbols_decoded: u64,
}

impl Metrics {
    /// Create new metrics with start time set to now.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            end_time: None,
            sample_bytes: 0,
            alphabet_size: 0,
            entropy_bits: 0.0,
            average_code_length: 0.0,
            symbols_encoded: 0,
            encoded_bytes: 0,
            symbols_decoded: 0,
        }
    }

    /// Record the model statistics of `distribution` and its code table.
    pub fn record_model(&mut self, distribution: &Distribution, table: &CodeTable) {
        self.sample_bytes = distribution.total();
        self.alphabet_size = distribution.alphabet_size();
        self.entropy_bits = distribution.entropy();
        self.average_code_length = table.average_length(distribution);
    }

    /// Record one encoder call.
    pub fn record_encode(&mut self, symbols: usize, bytes: usize) {
        self.symbols_encoded += symbols as u64;
        self.encoded_bytes += bytes as u64;
    }

    /// Record one decoder call.
    pub fn record_decode(&mut self, symbols: usize) {
        self.symbols_decoded += symbols as u64;
    }

    /// Mark the run as complete.
    pub fn complete(&mut self) {
        self.end_time = Some(Instant::now());
    }

    /// Get total duration (or current elapsed if not complete).
    pub fn duration(&self) -> Duration {
        match self.end_time {
            Some(end) => end.duration_since(self.start_time),
            None => self.start_time.elapsed(),
        }
    }

    /// Compute compression ratio (encoded bytes / raw symbols).
    ///
    /// Returns 0.0 if nothing was encoded.
    pub fn compression_ratio(&self) -> f64 {
        if self.symbols_encoded == 0 {
            0.0
        } else {
            self.encoded_bytes as f64 / self.symbols_encoded as f64
        }
    }

    /// Fraction of the raw size saved by encoding (1 - ratio).
    pub fn space_savings(&self) -> f64 {
        if self.symbols_encoded == 0 {
            0.0
        } else {
            1.0 - self.compression_ratio()
        }
    }

    /// Entropy divided by average code length; 1.0 is a perfect fit.
    ///
    /// Returns 0.0 when no code length has been recorded.
    pub fn coding_efficiency(&self) -> f64 {
        if self.average_code_length == 0.0 {
            0.0
        } else {
            self.entropy_bits / self.average_code_length
        }
    }

    /// True when every encoded symbol was decoded back.
    pub fn is_balanced(&self) -> bool {
        self.symbols_encoded == self.symbols_decoded
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("\n=== Codec Summary ===");
        println!("Duration: {} ms", self.duration().as_millis());
        println!();

        println!("=== Model ===");
        println!("Sample: {} bytes", self.sample_bytes);
        println!("Alphabet: {} symbols", self.alphabet_size);
        println!("Entropy: {:.4} bits/symbol", self.entropy_bits);
        println!("Average code length: {:.4} bits/symbol", self.average_code_length);
        println!("Efficiency: {:.1}%", self.coding_efficiency() * 100.0);
        println!();

        println!("=== Compression ===");
        println!("Symbols encoded: {}", self.symbols_encoded);
        println!("Encoded bytes: {}", self.encoded_bytes);
        println!("Ratio: {:.1}%", self.compression_ratio() * 100.0);
        println!("Savings: {:.2}%", self.space_savings() * 100.0);
        println!();

        println!("=== Decoding ===");
        println!("Symbols decoded: {}", self.symbols_decoded);
        println!();
    }

    /// Print just the final result (pass/fail).
    pub fn print_result(&self) {
        if self.is_balanced() {
            println!("✓ Round trip completed");
            println!(
                "  {} symbols in {} bytes, {} ms",
                self.symbols_encoded,
                self.encoded_bytes,
                self.duration().as_millis()
            );
        } else {
            println!(
                "✗ Round trip failed: encoded {} symbols, decoded {}",
                self.symbols_encoded, self.symbols_decoded
            );
        }
    }

    /// Export metrics as a simple text format (for parsing/testing).
    pub fn export_text(&self) -> String {
        format!(
            "duration_ms={}\n\
             sample_bytes={}\n\
             alphabet_size={}\n\
             entropy_bits={:.4}\n\
             average_code_length={:.4}\n\
             symbols_encoded={}\n\
             encoded_bytes={}\n\
             compression_ratio={:.4}\n\
             symbols_decoded={}\n",
            self.duration().as_millis(),
            self.sample_bytes,
            self.alphabet_size,
            self.entropy_bits,
            self.average_code_length,
            self.symbols_encoded,
            self.encoded_bytes,
            self.compression_ratio(),
            self.symbols_decoded,
        )
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
