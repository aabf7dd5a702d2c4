//! Config file handling against real files

use tempfile::TempDir;
use verbalingo::config::migrate_config;
use verbalingo::Config;

#[test]
fn migrated_file_loads_with_user_values_intact() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[player]\nseek_step_secs = 2.0\n").unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let result = migrate_config(&content).unwrap();
    assert!(result.added_fields.contains(&"player.tick_millis".into()));
    assert!(result.sections_added.contains(&"sessions".to_string()));
    std::fs::write(&path, &result.content).unwrap();

    let config = Config::from_toml(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(config.player.seek_step_secs, 2.0);
    assert_eq!(config.player.lookahead_offset_secs, 3.0);

    let again = migrate_config(&result.content).unwrap();
    assert!(!again.has_changes());
}

#[test]
fn explicit_sessions_directory_wins() {
    let config = Config::from_toml("[sessions]\ndirectory = \"/var/lib/vl\"\n").unwrap();
    assert_eq!(
        config.sessions_dir().unwrap(),
        std::path::PathBuf::from("/var/lib/vl")
    );
}
