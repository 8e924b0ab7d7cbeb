//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use hoglet::config::AppConfig;
use serial_test::serial;

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("HOG_WINDOW__TITLE", "Test From Env");
    let config = AppConfig::load().unwrap();
    assert_eq!(config.window.title, "Test From Env");
    std::env::remove_var("HOG_WINDOW__TITLE");
}

#[test]
#[serial]
fn test_default_file_loading() {
    std::env::remove_var("HOG_WINDOW__TITLE");

    let config = AppConfig::load().unwrap();
    assert_eq!(config.window.title, "Hoglet");
    assert_eq!(config.physics.gravity, -9.8);
    assert_eq!(config.game.map_path, "assets/maps/testmap.txt");
}

#[test]
#[serial]
fn test_env_overrides_nested_section() {
    std::env::set_var("HOG_PLAYER__JUMP_SPEED", "9.5");
    let config = AppConfig::load().unwrap();
    assert_eq!(config.player.jump_speed, 9.5);
    std::env::remove_var("HOG_PLAYER__JUMP_SPEED");
}

#[test]
#[serial]
fn test_missing_config_dir_falls_back_to_defaults() {
    let config = AppConfig::load_from("no_such_dir").unwrap();
    assert_eq!(config.window.width, 1280);
    assert_eq!(config.player.coyote_time, 0.1);
}
