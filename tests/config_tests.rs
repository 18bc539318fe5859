mod support;

use rust_decimal_macros::dec;

use support::temp::temp_file;
use wagerline::config::Config;
use wagerline::domain::{OddsFormat, SportFamily};
use wagerline::error::{ConfigError, Error};

#[test]
fn config_loads_from_file() {
    let file = temp_file(
        ".toml",
        r#"
[display]
odds_format = "fractional"

[clv]
positive_threshold = 1.5

[[teaser.options]]
family = "football"
points = 7
odds = -125
"#,
    );

    let config = Config::load(file.path()).expect("valid config");
    assert_eq!(config.display.odds_format, OddsFormat::Fractional);
    assert_eq!(config.clv.positive_threshold, dec!(1.5));
    assert_eq!(config.clv.negative_threshold, dec!(-2));
    assert_eq!(
        config.teaser.fixed_odds(SportFamily::Football, dec!(7)),
        -125
    );
    assert_eq!(
        config.teaser.allowed_points(SportFamily::Basketball),
        vec![dec!(6)]
    );
}

#[test]
fn config_rejects_negative_teaser_points() {
    let file = temp_file(
        ".toml",
        r#"
[[teaser.options]]
family = "basketball"
points = -4
odds = -110
"#,
    );

    let result = Config::load(file.path());
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidValue {
            field: "teaser.options.points",
            ..
        }))
    ));
}

#[test]
fn config_rejects_malformed_toml() {
    let file = temp_file(".toml", "[clv\npositive_threshold = ");
    assert!(matches!(
        Config::load(file.path()),
        Err(Error::Config(ConfigError::Parse(_)))
    ));
}

#[test]
fn config_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");
    assert!(matches!(
        Config::load(&missing),
        Err(Error::Config(ConfigError::ReadFile(_)))
    ));
}

#[test]
fn default_path_is_optional() {
    let dir = tempfile::tempdir().unwrap();
    let default_path = dir.path().join("config.toml");

    let config = Config::load_or_default(None, &default_path).unwrap();
    assert_eq!(config, Config::default());

    std::fs::write(&default_path, "[logging]\nlevel = \"debug\"\n").unwrap();
    let config = Config::load_or_default(None, &default_path).unwrap();
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn rendered_config_round_trips() {
    let file = temp_file(
        ".toml",
        r#"
[display]
odds_format = "decimal"

[[teaser.options]]
family = "basketball"
points = 4.5
odds = -120
"#,
    );
    let config = Config::load(file.path()).unwrap();
    let rendered = config.to_toml().unwrap();
    assert_eq!(Config::parse_toml(&rendered).unwrap(), config);
}
