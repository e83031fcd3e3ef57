use flipdeck::config::{Config, ConfigError, MAX_ANIMATION_DURATION};
use flipdeck::style::{Dimension, ThemeColor};
use flipdeck::{Direction, Theme};
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

fn write_config(content: &str) -> (TempDir, std::path::PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, content).expect("Failed to write config");
    (temp_dir, path)
}

#[test]
fn test_config_default_values() {
    let config = Config::default();

    assert_eq!(config.counter.start, 0);
    assert_eq!(config.counter.interval_ms, 1000);
    assert_eq!(config.counter.direction, Direction::Up);
    assert_eq!(config.logging.level, "info");
    assert!(config.logging.file.is_none());
    assert_eq!(config.theme(), Theme::default());
}

#[test]
fn test_config_path_ends_with_expected() {
    let path = Config::config_path();
    assert!(path.ends_with("flipdeck/config.toml"));
}

#[test]
fn test_missing_file_yields_default() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::load_from(&temp_dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_full_config_parses() {
    let (_dir, path) = write_config(
        r##"[counter]
start = 95
interval_ms = 250
direction = "down"

[animation]
duration = "300ms"

[style.card]
width = 120
height = "50%"
font_size = "10rem"
border_radius = 0

[style.center_line]
height = 4
background_color = "#ffffff40"

[style.number]
color = "yellow"
background_color = "#222"

[logging]
level = "debug"
file = "/tmp/flipdeck-test.log"
"##,
    );

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.counter.start, 95);
    assert_eq!(config.counter.interval_ms, 250);
    assert_eq!(config.counter.direction, Direction::Down);
    assert_eq!(config.logging.level, "debug");

    let theme = config.theme();
    assert_eq!(theme.animation_duration, Duration::from_millis(300));
    assert_eq!(theme.card_width, Dimension::Px(120.0));
    assert_eq!(theme.card_height, Dimension::Percent(50.0));
    assert_eq!(theme.card_font_size, Dimension::Rem(10.0));
    assert_eq!(theme.center_line_color, ThemeColor::rgba(0xff, 0xff, 0xff, 0x40));
    assert_eq!(theme.number_color, ThemeColor::rgb(0xff, 0xff, 0));
    assert_eq!(theme.number_bg_color, ThemeColor::rgb(0x22, 0x22, 0x22));
}

#[test]
fn test_partial_config_keeps_defaults() {
    let (_dir, path) = write_config("[style.card]\nwidth = \"200px\"\n");
    let config = Config::load_from(&path).unwrap();
    let theme = config.theme();
    assert_eq!(theme.card_width, Dimension::Px(200.0));
    assert_eq!(theme.card_height, Theme::default().card_height);
    assert_eq!(config.counter.interval_ms, 1000);
}

#[test]
fn test_invalid_color_is_parse_error() {
    let (_dir, path) = write_config("[style.number]\ncolor = \"not-a-color\"\n");
    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn test_invalid_unit_is_parse_error() {
    let (_dir, path) = write_config("[style.card]\nwidth = \"12pt\"\n");
    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn test_zero_interval_fails_validation() {
    let (_dir, path) = write_config("[counter]\ninterval_ms = 0\n");
    match Config::load_from(&path).unwrap_err() {
        ConfigError::ValidationError { message } => {
            assert!(message.contains("interval_ms"));
        }
        other => panic!("Expected ValidationError, got {other:?}"),
    }
}

#[test]
fn test_zero_duration_fails_validation() {
    let (_dir, path) = write_config("[animation]\nduration = 0\n");
    match Config::load_from(&path).unwrap_err() {
        ConfigError::ValidationError { message } => {
            assert!(message.contains("animation.duration"));
        }
        other => panic!("Expected ValidationError, got {other:?}"),
    }
}

#[test]
fn test_negative_card_width_fails_validation() {
    let (_dir, path) = write_config("[style.card]\nwidth = -5\n");
    match Config::load_from(&path).unwrap_err() {
        ConfigError::ValidationError { message } => {
            assert!(message.contains("style.card.width"));
        }
        other => panic!("Expected ValidationError, got {other:?}"),
    }
}

#[test]
fn test_negative_start_fails_validation() {
    let (_dir, path) = write_config("[counter]\nstart = -12\n");
    match Config::load_from(&path).unwrap_err() {
        ConfigError::ValidationError { message } => {
            assert!(message.contains("counter.start"));
        }
        other => panic!("Expected ValidationError, got {other:?}"),
    }
}

#[test]
fn test_oversized_duration_fails_validation() {
    let (_dir, path) = write_config("[animation]\nduration = 1e19\n");
    match Config::load_from(&path).unwrap_err() {
        ConfigError::ValidationError { message } => {
            assert!(message.contains("animation.duration"));
        }
        other => panic!("Expected ValidationError, got {other:?}"),
    }
}

#[test]
fn test_duration_at_limit_is_accepted() {
    let (_dir, path) = write_config("[animation]\nduration = \"60s\"\n");
    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.theme().animation_duration, MAX_ANIMATION_DURATION);
}
