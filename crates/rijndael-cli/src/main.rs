//! Command-line interface for `rijndael-core`.

#![forbid(unsafe_code)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, ensure, Context, Result};
use clap::{Parser, Subcommand};
use rand::{CryptoRng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rijndael_core::{BlockCipherEngine, KeyLength};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// FIPS-197 Appendix C plaintext.
const KAT_PLAIN: &str = "00112233445566778899aabbccddeeff";
/// FIPS-197 Appendix C: (key, ciphertext) for each key size.
const KAT_VECTORS: [(&str, &str); 3] = [
    (
        "000102030405060708090a0b0c0d0e0f",
        "69c4e0d86a7b0430d8cdb78070b4c55a",
    ),
    (
        "000102030405060708090a0b0c0d0e0f1011121314151617",
        "dda97ca4864cdfe06eaf70a0ec0d7191",
    ),
    (
        "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f",
        "8ea2b7ca516745bfeafc49904b496089",
    ),
];

/// AES (Rijndael) file encryption CLI.
#[derive(Parser)]
#[command(
    name = "rijndael",
    version,
    author,
    about = "AES-128/192/256 block encryption of files (zero-padded, no chaining)"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a random key and print it as hex.
    Keygen {
        /// Key size in bits (128, 192 or 256).
        #[arg(long, default_value_t = 128)]
        bits: usize,
        /// Optional RNG seed for reproducible keys.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Encrypt a file, zero-padding the final partial block.
    Enc {
        /// AES key as 32, 48 or 64 hex characters.
        #[arg(long, value_name = "HEX", env = "RIJNDAEL_KEY", hide_env_values = true)]
        key_hex: String,
        /// Input plaintext path.
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        /// Output ciphertext path.
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Decrypt a file whose length is a multiple of 16 bytes.
    Dec {
        /// AES key as 32, 48 or 64 hex characters.
        #[arg(long, value_name = "HEX", env = "RIJNDAEL_KEY", hide_env_values = true)]
        key_hex: String,
        /// Input ciphertext path.
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        /// Output plaintext path.
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
        /// Truncate the plaintext to this many bytes (drops zero padding).
        #[arg(long)]
        length: Option<usize>,
    },
    /// Verify the FIPS-197 vectors and random buffer round trips.
    Check {
        /// Number of random samples per key size.
        #[arg(long, default_value_t = 4)]
        samples: usize,
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Run a local demo: random key + message, encrypt, decrypt back.
    Demo {
        /// Key size in bits (128, 192 or 256).
        #[arg(long, default_value_t = 128)]
        bits: usize,
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Keygen { bits, seed } => cmd_keygen(bits, seed),
        Commands::Enc {
            key_hex,
            input,
            output,
        } => cmd_enc(&key_hex, &input, &output),
        Commands::Dec {
            key_hex,
            input,
            output,
            length,
        } => cmd_dec(&key_hex, &input, &output, length),
        Commands::Check { samples, seed } => cmd_check(samples, seed),
        Commands::Demo { bits, seed } => cmd_demo(bits, seed),
    }
}

fn cmd_keygen(bits: usize, seed: Option<u64>) -> Result<()> {
    let length = parse_bits(bits)?;
    let mut rng = seeded_rng(seed);
    println!("{}", hex::encode(random_key(&mut rng, length)));
    Ok(())
}

fn cmd_enc(key_hex: &str, input_path: &Path, output_path: &Path) -> Result<()> {
    let engine = engine_from_hex(key_hex)?;
    let data = fs::read(input_path).with_context(|| format!("read {}", input_path.display()))?;
    let ciphertext = engine.encrypt_to_vec(&data);
    fs::write(output_path, &ciphertext)
        .with_context(|| format!("write {}", output_path.display()))?;
    info!(
        key_length = %engine.key_length(),
        plaintext = data.len(),
        ciphertext = ciphertext.len(),
        "encrypted file"
    );
    Ok(())
}

fn cmd_dec(
    key_hex: &str,
    input_path: &Path,
    output_path: &Path,
    length: Option<usize>,
) -> Result<()> {
    let engine = engine_from_hex(key_hex)?;
    let data = fs::read(input_path).with_context(|| format!("read {}", input_path.display()))?;
    let mut plaintext = engine
        .decrypt_to_vec(&data)
        .with_context(|| format!("decrypt {}", input_path.display()))?;
    if let Some(length) = length {
        ensure!(
            length <= plaintext.len(),
            "requested length {length} exceeds decrypted size {}",
            plaintext.len()
        );
        plaintext.truncate(length);
    }
    fs::write(output_path, &plaintext)
        .with_context(|| format!("write {}", output_path.display()))?;
    info!(
        key_length = %engine.key_length(),
        ciphertext = data.len(),
        plaintext = plaintext.len(),
        "decrypted file"
    );
    Ok(())
}

fn cmd_check(samples: usize, seed: Option<u64>) -> Result<()> {
    let plain = hex::decode(KAT_PLAIN).context("decode vector plaintext")?;
    for (key_hex, cipher_hex) in KAT_VECTORS {
        let engine = engine_from_hex(key_hex)?;
        let ciphertext = engine.encrypt_to_vec(&plain);
        if hex::encode(&ciphertext) != cipher_hex {
            bail!("{} known-answer encryption mismatch", engine.key_length());
        }
        if engine.decrypt_to_vec(&ciphertext)? != plain {
            bail!("{} known-answer decryption mismatch", engine.key_length());
        }
        debug!(key_length = %engine.key_length(), "known-answer vector ok");
    }

    let mut rng = seeded_rng(seed);
    for length in [KeyLength::Aes128, KeyLength::Aes192, KeyLength::Aes256] {
        let engine = BlockCipherEngine::with_key(&random_key(&mut rng, length))?;
        for _ in 0..samples {
            let len = (rng.next_u32() % 256) as usize;
            let mut message = vec![0u8; len];
            rng.fill_bytes(&mut message);
            let ciphertext = engine.encrypt_to_vec(&message);
            let decrypted = engine.decrypt_to_vec(&ciphertext)?;
            if decrypted[..len] != message[..] {
                bail!("{length} round trip failed for {len}-byte message");
            }
        }
    }
    println!("all checks passed");
    Ok(())
}

fn cmd_demo(bits: usize, seed: Option<u64>) -> Result<()> {
    let length = parse_bits(bits)?;
    let mut rng = seeded_rng(seed);
    let key = random_key(&mut rng, length);
    let engine = BlockCipherEngine::with_key(&key)?;

    let mut message = [0u8; 40];
    rng.fill_bytes(&mut message);
    let ciphertext = engine.encrypt_to_vec(&message);
    let decrypted = engine.decrypt_to_vec(&ciphertext)?;

    println!("demo key: {}", hex::encode(&key));
    println!("plaintext: {}", hex::encode(message));
    println!("ciphertext: {}", hex::encode(&ciphertext));
    println!("decrypted: {}", hex::encode(&decrypted[..message.len()]));
    if decrypted[..message.len()] != message {
        bail!("demo roundtrip failed");
    }
    Ok(())
}

fn parse_bits(bits: usize) -> Result<KeyLength> {
    ensure!(bits % 8 == 0, "key size must be 128, 192 or 256 bits");
    KeyLength::try_from(bits / 8).context("key size must be 128, 192 or 256 bits")
}

fn engine_from_hex(hex_str: &str) -> Result<BlockCipherEngine> {
    let bytes = hex::decode(hex_str.trim()).context("decode key hex")?;
    let engine = BlockCipherEngine::with_key(&bytes)
        .context("AES key must be 16, 24 or 32 bytes (32, 48 or 64 hex characters)")?;
    Ok(engine)
}

fn random_key(rng: &mut impl RngCore, length: KeyLength) -> Vec<u8> {
    let mut key = vec![0u8; length.bytes()];
    rng.fill_bytes(&mut key);
    key
}

fn seeded_rng(seed: Option<u64>) -> impl RngCore + CryptoRng {
    match seed {
        Some(value) => {
            let mut seed_bytes = [0u8; 32];
            seed_bytes[..8].copy_from_slice(&value.to_le_bytes());
            ChaCha20Rng::from_seed(seed_bytes)
        }
        None => {
            let mut seed_bytes = [0u8; 32];
            rand::rngs::OsRng.fill_bytes(&mut seed_bytes);
            ChaCha20Rng::from_seed(seed_bytes)
        }
    }
}
