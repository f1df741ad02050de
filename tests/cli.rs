use assert_cmd::Command;
use predicates::prelude::*;

fn bin() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("pwscrypt"))
}

// Low-cost parameters so the end-to-end runs stay fast.
const FAST: [&str; 6] = ["--log-n", "4", "--scrypt-r", "1", "--scrypt-p", "1"];

fn hash_secret(secret: &str) -> String {
    let output = bin()
        .env("PWSCRYPT_SECRET", secret)
        .arg("hash")
        .args(FAST)
        .output()
        .unwrap();

    assert!(output.status.success());
    String::from_utf8(output.stdout).unwrap().trim().to_string()
}

#[test]
fn hash_outputs_fixed_length() {
    let stored = hash_secret("pw");
    assert_eq!(stored.len(), 109);
}

#[test]
fn hash_then_verify_roundtrip() {
    let stored = hash_secret("pw");

    bin()
        .env("PWSCRYPT_SECRET", "pw")
        .arg("verify")
        .arg(&stored)
        .args(FAST)
        .assert()
        .success()
        .stdout(predicate::str::contains("ok"));
}

#[test]
fn verify_rejects_wrong_secret() {
    let stored = hash_secret("pw");

    bin()
        .env("PWSCRYPT_SECRET", "not-pw")
        .arg("verify")
        .arg(&stored)
        .args(FAST)
        .assert()
        .failure()
        .stderr(predicate::str::contains("mismatch"));
}

#[test]
fn verify_reports_malformed_hash() {
    bin()
        .env("PWSCRYPT_SECRET", "pw")
        .arg("verify")
        .arg("not|a|valid|hash")
        .args(FAST)
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed"));
}

#[test]
fn secret_can_be_piped_via_stdin() {
    let stored = hash_secret("piped-secret");

    bin()
        .env_remove("PWSCRYPT_SECRET")
        .arg("verify")
        .arg(&stored)
        .args(FAST)
        .write_stdin("piped-secret\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("ok"));
}

#[test]
fn hash_with_no_secret_fails() {
    bin()
        .env_remove("PWSCRYPT_SECRET")
        .arg("hash")
        .args(FAST)
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("secret cannot be empty"));
}

#[test]
fn check_flags_params_that_differ_from_policy() {
    let stored = hash_secret("pw");

    // Same hash, stricter policy: must be flagged for re-hashing.
    bin()
        .arg("check")
        .arg(&stored)
        .args(["--log-n", "5", "--scrypt-r", "1", "--scrypt-p", "1"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("rehash needed"));
}

#[test]
fn check_accepts_matching_params() {
    let stored = hash_secret("pw");

    bin()
        .arg("check")
        .arg(&stored)
        .args(FAST)
        .assert()
        .success()
        .stdout(predicate::str::contains("up to date"));
}

#[test]
fn info_describes_the_hasher() {
    bin()
        .env_remove("PWSCRYPT_LOG_N")
        .env_remove("PWSCRYPT_R")
        .env_remove("PWSCRYPT_P")
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains("algorithm: scrypt"))
        .stdout(predicate::str::contains("logN=14 r=8 p=1"))
        .stdout(predicate::str::contains("encoded length: 109"));
}
