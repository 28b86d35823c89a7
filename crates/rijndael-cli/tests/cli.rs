use std::error::Error;
use std::fs;
use std::process::{Command, Output};
use tempfile::tempdir;

const KEY_256: &str = "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";

fn rijndael_command() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_rijndael"));
    command.env_remove("RIJNDAEL_KEY");
    command
}

fn run(args: &[&str]) -> Result<Output, Box<dyn Error>> {
    Ok(rijndael_command().args(args).output()?)
}

#[test]
fn encrypt_decrypt_file_round_trip() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let input = dir.path().join("plain.txt");
    let sealed = dir.path().join("plain.enc");
    let recovered = dir.path().join("recovered.txt");

    let payload = b"thirty-seven bytes of secret payload!";
    fs::write(&input, payload)?;

    let enc = run(&[
        "enc",
        "--key-hex",
        KEY_256,
        "--input",
        input.to_str().unwrap(),
        "--output",
        sealed.to_str().unwrap(),
    ])?;
    assert!(
        enc.status.success(),
        "enc command failed: {}",
        String::from_utf8_lossy(&enc.stderr)
    );
    assert_eq!(fs::metadata(&sealed)?.len(), 48);

    let dec = run(&[
        "dec",
        "--key-hex",
        KEY_256,
        "--input",
        sealed.to_str().unwrap(),
        "--output",
        recovered.to_str().unwrap(),
        "--length",
        &payload.len().to_string(),
    ])?;
    assert!(
        dec.status.success(),
        "dec command failed: {}",
        String::from_utf8_lossy(&dec.stderr)
    );
    assert_eq!(fs::read(&recovered)?, payload);
    Ok(())
}

#[test]
fn decrypt_without_length_keeps_padding() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let input = dir.path().join("short");
    let sealed = dir.path().join("short.enc");
    let recovered = dir.path().join("short.out");
    fs::write(&input, b"abc")?;

    let enc = rijndael_command()
        .env("RIJNDAEL_KEY", "000102030405060708090a0b0c0d0e0f")
        .args(["enc", "--input", input.to_str().unwrap()])
        .args(["--output", sealed.to_str().unwrap()])
        .output()?;
    assert!(enc.status.success());

    let dec = rijndael_command()
        .env("RIJNDAEL_KEY", "000102030405060708090a0b0c0d0e0f")
        .args(["dec", "--input", sealed.to_str().unwrap()])
        .args(["--output", recovered.to_str().unwrap()])
        .output()?;
    assert!(dec.status.success());

    let mut expected = b"abc".to_vec();
    expected.resize(16, 0);
    assert_eq!(fs::read(&recovered)?, expected);
    Ok(())
}

#[test]
fn decrypt_rejects_unaligned_file() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let input = dir.path().join("bad.enc");
    let output = dir.path().join("bad.out");
    fs::write(&input, [0u8; 17])?;

    let dec = run(&[
        "dec",
        "--key-hex",
        KEY_256,
        "--input",
        input.to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
    ])?;
    assert!(!dec.status.success());
    assert!(String::from_utf8_lossy(&dec.stderr).contains("not a multiple of 16"));
    assert!(!output.exists());
    Ok(())
}

#[test]
fn rejects_unsupported_key_size() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let input = dir.path().join("plain");
    fs::write(&input, b"data")?;

    let enc = run(&[
        "enc",
        "--key-hex",
        "00112233445566778899",
        "--input",
        input.to_str().unwrap(),
        "--output",
        dir.path().join("out").to_str().unwrap(),
    ])?;
    assert!(!enc.status.success());
    assert!(String::from_utf8_lossy(&enc.stderr).contains("unsupported key length"));
    Ok(())
}

#[test]
fn check_passes() -> Result<(), Box<dyn Error>> {
    let check = run(&["check", "--samples", "8", "--seed", "7"])?;
    assert!(
        check.status.success(),
        "check failed: {}",
        String::from_utf8_lossy(&check.stderr)
    );
    assert!(String::from_utf8(check.stdout)?.contains("all checks passed"));
    Ok(())
}

#[test]
fn keygen_is_reproducible_with_seed() -> Result<(), Box<dyn Error>> {
    let first = run(&["keygen", "--bits", "192", "--seed", "42"])?;
    let second = run(&["keygen", "--bits", "192", "--seed", "42"])?;
    assert!(first.status.success());
    let key = String::from_utf8(first.stdout)?;
    assert_eq!(key.trim().len(), 48);
    assert_eq!(key, String::from_utf8(second.stdout)?);

    let bad = run(&["keygen", "--bits", "100"])?;
    assert!(!bad.status.success());
    Ok(())
}

#[test]
fn demo_round_trips() -> Result<(), Box<dyn Error>> {
    let demo = run(&["demo", "--bits", "256", "--seed", "3"])?;
    assert!(demo.status.success());
    let stdout = String::from_utf8(demo.stdout)?;
    let line = |prefix: &str| {
        stdout
            .lines()
            .find_map(|l| l.strip_prefix(prefix))
            .map(str::to_owned)
    };
    assert_eq!(line("plaintext: "), line("decrypted: "));
    Ok(())
}
