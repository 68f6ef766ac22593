use super::*;

#[test]
fn missing_file_loads_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let store = SettingsStore::at(dir.path().join("nope.json"));
    assert_eq!(store.load(), Settings::default());
    assert_eq!(store.load().backside_mode, BacksideMode::Off);
}

#[test]
fn save_creates_parents_and_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let store = SettingsStore::at(dir.path().join("a/b/settings.json"));
    let s = Settings {
        backside_mode: BacksideMode::SimulateUpsideDown,
    };
    store.save(&s).unwrap();
    assert_eq!(store.load(), s);

    let raw = std::fs::read_to_string(store.path()).unwrap();
    assert!(raw.contains("\"simulate_upside_down\""), "{raw}");
}

#[test]
fn corrupt_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert_eq!(SettingsStore::at(&path).load(), Settings::default());
}

#[test]
fn unknown_and_missing_keys_are_tolerated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{"theme":"dark"}"#).unwrap();
    assert_eq!(SettingsStore::at(&path).load(), Settings::default());
}

#[test]
fn update_persists_change() {
    let dir = tempfile::tempdir().unwrap();
    let store = SettingsStore::at(dir.path().join("settings.json"));
    let s = store
        .update(|s| s.backside_mode = BacksideMode::Simulate)
        .unwrap();
    assert_eq!(s.backside_mode, BacksideMode::Simulate);
    assert_eq!(store.load().backside_mode, BacksideMode::Simulate);
}

#[test]
fn default_path_prefers_explicit_then_xdg_then_home() {
    let explicit = default_settings_path(|k| match k {
        SETTINGS_ENV => Some(PathBuf::from("/x/s.json")),
        "XDG_CONFIG_HOME" => Some(PathBuf::from("/xdg")),
        _ => None,
    });
    assert_eq!(explicit, PathBuf::from("/x/s.json"));

    let xdg = default_settings_path(|k| match k {
        "XDG_CONFIG_HOME" => Some(PathBuf::from("/xdg")),
        "HOME" => Some(PathBuf::from("/home/u")),
        _ => None,
    });
    assert_eq!(xdg, PathBuf::from("/xdg/cardspin/settings.json"));

    let home = default_settings_path(|k| match k {
        "HOME" => Some(PathBuf::from("/home/u")),
        _ => None,
    });
    assert_eq!(home, PathBuf::from("/home/u/.config/cardspin/settings.json"));
}
