//! Command line front end. Every cipher command takes an input file and one
//! numeric parameter and prints the result to stdout.
use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use num_bigint::BigUint;
use tracing::info;

use classic_ciphers::{
    alphabet::{Alphabet, CYRILLIC, LATIN},
    bag::{BagCodec, BagKey, REFERENCE_MULTIPLIER, REFERENCE_SEQUENCE},
    rsa::{Factors, RsaCodec, REFERENCE_EXPONENT, REFERENCE_MODULUS},
    text,
};

/// Classical ciphers over Cyrillic text.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Alphabet the text is written in
    #[arg(long, value_enum, global = true, default_value_t = AlphabetArg::Cyrillic)]
    alphabet: AlphabetArg,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum AlphabetArg {
    Cyrillic,
    Latin,
}

impl From<AlphabetArg> for Alphabet {
    fn from(arg: AlphabetArg) -> Self {
        match arg {
            AlphabetArg::Cyrillic => CYRILLIC,
            AlphabetArg::Latin => LATIN,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt normalized text with the RSA-like block cipher.
    RsaEncode {
        input: PathBuf,
        /// One prime factor of the modulus
        p: BigUint,
        #[arg(long, default_value_t = BigUint::from(REFERENCE_MODULUS))]
        modulus: BigUint,
        #[arg(long, default_value_t = BigUint::from(REFERENCE_EXPONENT), conflicts_with = "random_exponent")]
        exponent: BigUint,
        /// Search for an exponent coprime to phi instead of using the fixed one
        #[arg(long)]
        random_exponent: bool,
    },

    /// Decrypt the output of `rsa-encode`.
    RsaDecode {
        input: PathBuf,
        /// The prime factor used for encoding
        p: BigUint,
    },

    /// Encrypt normalized text with the knapsack cipher.
    BagEncode {
        input: PathBuf,
        /// Modulus, larger than the sum of the private sequence
        n: BigUint,
        #[arg(long, default_value_t = BigUint::from(REFERENCE_MULTIPLIER), conflicts_with = "random_key")]
        multiplier: BigUint,
        /// Generate a fresh sequence and multiplier
        #[arg(long)]
        random_key: bool,
    },

    /// Decrypt the output of `bag-encode`.
    BagDecode {
        input: PathBuf,
        /// Modulus used for encoding
        n: BigUint,
    },

    /// Uppercase the text, fold Ё into Е and drop everything outside the alphabet.
    Prepare { input: PathBuf },
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn run(cli: Cli) -> anyhow::Result<String> {
    let alphabet = Alphabet::from(cli.alphabet);
    let output = match cli.command {
        Commands::RsaEncode {
            input,
            p,
            modulus,
            exponent,
            random_exponent,
        } => {
            let factors = Factors::from_modulus(p, modulus).context("building the rsa key")?;
            let exponent = if random_exponent {
                factors.random_exponent(rand::thread_rng())?
            } else {
                exponent
            };
            info!(%exponent, q = %factors.q(), "encoding with the rsa-like cipher");
            RsaCodec::new(alphabet).encode(&read_input(&input)?, &factors, &exponent)?
        }
        Commands::RsaDecode { input, p } => {
            RsaCodec::new(alphabet).decode(&read_input(&input)?, &p)?
        }
        Commands::BagEncode {
            input,
            n,
            multiplier,
            random_key,
        } => {
            let key = if random_key {
                BagKey::generate(rand::thread_rng(), n)
            } else {
                BagKey::new(REFERENCE_SEQUENCE.clone(), n, multiplier)
            }
            .context("building the knapsack key")?;
            info!(multiplier = %key.multiplier(), "encoding with the knapsack cipher");
            BagCodec::new(alphabet).encode(&read_input(&input)?, &key)?
        }
        Commands::BagDecode { input, n } => {
            BagCodec::new(alphabet).decode(&read_input(&input)?, &n)?
        }
        Commands::Prepare { input } => text::normalize(&read_input(&input)?, &alphabet),
    };
    Ok(output)
}

fn main() -> anyhow::Result<()> {
    // stdout carries only the cipher output
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    println!("{}", run(cli)?);
    Ok(())
}
