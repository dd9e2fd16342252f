//! Tests for HMAC secret resolution.

use crate::webhook::{HmacTokenGenerator, TokenGenerator};

use super::*;

fn token(generator: &HmacTokenGenerator) -> String {
    generator.generate(b"digest").unwrap()
}

#[test]
fn secret_required_for_delivery() {
    let cli = cli(&["--job", "-"]);

    let result = ValidatedConfig::from_raw(&cli, None);

    assert!(matches!(
        result,
        Err(ConfigError::MissingRequired {
            field: "hmac_secret_file",
            ..
        })
    ));
}

#[test]
fn secret_optional_in_dry_run() {
    let cli = cli(&["--job", "-", "--dry-run"]);

    let config = ValidatedConfig::from_raw(&cli, None).unwrap();

    assert!(config.token_generator.is_none());
}

#[test]
fn secret_optional_with_delivery_disabled() {
    let cli = cli(&["--job", "-", "--disable-delivery"]);

    let config = ValidatedConfig::from_raw(&cli, None).unwrap();

    assert!(config.token_generator.is_none());
}

#[test]
fn trailing_newline_is_ignored() {
    let with_newline = secret_file("s3cret\n");
    let without = secret_file("s3cret");
    let path_a = with_newline.path().to_str().unwrap();
    let path_b = without.path().to_str().unwrap();

    let a = ValidatedConfig::from_raw(&cli(&["--job", "-", "--hmac-secret-file", path_a]), None)
        .unwrap();
    let b = ValidatedConfig::from_raw(&cli(&["--job", "-", "--hmac-secret-file", path_b]), None)
        .unwrap();

    assert_eq!(
        token(a.token_generator.as_ref().unwrap()),
        token(b.token_generator.as_ref().unwrap())
    );
}

#[test]
fn cli_secret_file_overrides_toml() {
    let cli_secret = secret_file("from-cli");
    let toml_secret = secret_file("from-toml");
    let cli = cli(&[
        "--job",
        "-",
        "--hmac-secret-file",
        cli_secret.path().to_str().unwrap(),
    ]);
    let toml = toml(&format!(
        "[http]\nhmac_secret_file = \"{}\"",
        toml_secret.path().display()
    ));

    let config = ValidatedConfig::from_raw(&cli, Some(&toml)).unwrap();

    assert_eq!(
        token(config.token_generator.as_ref().unwrap()),
        token(&HmacTokenGenerator::new("from-cli"))
    );
}

#[test]
fn empty_secret_file_is_rejected() {
    let file = secret_file(" \n");
    let cli = cli(&["--job", "-", "--hmac-secret-file", file.path().to_str().unwrap()]);

    let result = ValidatedConfig::from_raw(&cli, None);

    assert!(matches!(result, Err(ConfigError::InvalidSecret { .. })));
}

#[test]
fn missing_secret_file_is_rejected_even_in_dry_run() {
    let cli = cli(&[
        "--job",
        "-",
        "--dry-run",
        "--hmac-secret-file",
        "/nonexistent_dir_12345/hmac",
    ]);

    let result = ValidatedConfig::from_raw(&cli, None);

    assert!(matches!(result, Err(ConfigError::InvalidSecret { .. })));
}

#[test]
fn secret_is_not_displayed() {
    let file = secret_file("top-secret-value");
    let cli = cli(&["--job", "-", "--hmac-secret-file", file.path().to_str().unwrap()]);

    let config = ValidatedConfig::from_raw(&cli, None).unwrap();

    assert!(!format!("{config:?}").contains("top-secret-value"));
    assert!(!config.to_string().contains("top-secret-value"));
}
