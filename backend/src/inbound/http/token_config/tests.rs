//! Unit tests for token configuration parsing.

use super::*;
use mockable::MockEnv;
use rstest::rstest;
use std::collections::HashMap;
use std::io::Write;

fn mock_env(vars: &[(&str, &str)]) -> MockEnv {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
        .collect();
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |key| vars.get(key).cloned());
    env
}

fn secret_file(contents: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(contents).expect("write secret");
    file
}

const LONG_SECRET: &str = "0123456789abcdef0123456789abcdef";

#[rstest]
fn release_requires_a_secret() {
    let result = token_settings_from_env(&mock_env(&[]), BuildMode::Release);
    assert!(matches!(result, Err(TokenConfigError::MissingSecret)));
}

#[rstest]
fn debug_falls_back_to_ephemeral_secret() {
    let settings =
        token_settings_from_env(&mock_env(&[]), BuildMode::Debug).expect("debug fallback");
    assert_eq!(settings.source(), SecretSource::Ephemeral);
    assert_eq!(settings.secret().len(), EPHEMERAL_SECRET_LEN);
    assert_eq!(settings.ttl(), TimeDelta::hours(12));
}

#[rstest]
fn ephemeral_secrets_differ_between_calls() {
    let first = token_settings_from_env(&mock_env(&[]), BuildMode::Debug).expect("first");
    let second = token_settings_from_env(&mock_env(&[]), BuildMode::Debug).expect("second");
    assert_ne!(first.fingerprint(), second.fingerprint());
}

#[rstest]
#[case(BuildMode::Release, false)]
#[case(BuildMode::Debug, true)]
fn short_inline_secret_is_release_error(#[case] mode: BuildMode, #[case] accepted: bool) {
    let result = token_settings_from_env(&mock_env(&[(TOKEN_SECRET_ENV, "short")]), mode);
    match result {
        Ok(settings) => {
            assert!(accepted, "short secret accepted in {mode:?}");
            assert_eq!(settings.secret(), b"short");
        }
        Err(err) => {
            assert!(!accepted, "short secret rejected in {mode:?}");
            assert!(matches!(
                err,
                TokenConfigError::SecretTooShort {
                    length: 5,
                    min_len: TOKEN_SECRET_MIN_LEN
                }
            ));
        }
    }
}

#[rstest]
fn secret_file_is_read_without_trailing_newline() {
    let file = secret_file(format!("{LONG_SECRET}\n").as_bytes());
    let path = file.path().to_string_lossy().into_owned();
    let settings = token_settings_from_env(
        &mock_env(&[(TOKEN_SECRET_FILE_ENV, path.as_str())]),
        BuildMode::Release,
    )
    .expect("file secret");

    assert_eq!(settings.source(), SecretSource::File);
    assert_eq!(settings.secret(), LONG_SECRET.as_bytes());
}

#[rstest]
fn inline_secret_wins_over_file() {
    let file = secret_file(&[b'f'; 40]);
    let path = file.path().to_string_lossy().into_owned();
    let settings = token_settings_from_env(
        &mock_env(&[
            (TOKEN_SECRET_ENV, LONG_SECRET),
            (TOKEN_SECRET_FILE_ENV, path.as_str()),
        ]),
        BuildMode::Release,
    )
    .expect("inline secret");

    assert_eq!(settings.source(), SecretSource::Inline);
    assert_eq!(settings.secret(), LONG_SECRET.as_bytes());
}

#[rstest]
fn unreadable_secret_file_is_release_error() {
    let result = token_settings_from_env(
        &mock_env(&[(TOKEN_SECRET_FILE_ENV, "/nonexistent/saarthi/secret")]),
        BuildMode::Release,
    );
    assert!(matches!(result, Err(TokenConfigError::SecretRead { .. })));
}

#[rstest]
#[case("6", Some(6))]
#[case(" 24 ", Some(24))]
#[case("0", None)]
#[case("-3", None)]
#[case("soon", None)]
#[case("721", None)]
fn ttl_override_is_validated(#[case] raw: &str, #[case] hours: Option<i64>) {
    let env = mock_env(&[(TOKEN_SECRET_ENV, LONG_SECRET), (TOKEN_TTL_HOURS_ENV, raw)]);

    let release = token_settings_from_env(&env, BuildMode::Release);
    let debug = token_settings_from_env(&env, BuildMode::Debug).expect("debug tolerates ttl");

    match hours {
        Some(expected) => {
            assert_eq!(release.expect("valid ttl").ttl(), TimeDelta::hours(expected));
            assert_eq!(debug.ttl(), TimeDelta::hours(expected));
        }
        None => {
            assert!(matches!(release, Err(TokenConfigError::InvalidTtl { .. })));
            assert_eq!(debug.ttl(), TimeDelta::hours(DEFAULT_TOKEN_TTL_HOURS));
        }
    }
}
