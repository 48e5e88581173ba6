use super::*;

fn store_in(dir: &tempfile::TempDir) -> SettingsStore {
    SettingsStore::new(dir.path().join("settings.json"))
}

#[test]
fn load_missing_file_returns_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let settings = store_in(&dir).load().unwrap();

    assert_eq!(settings.org_url, DEFAULT_ORG_URL);
    assert_eq!(settings.ai_endpoint, DEFAULT_AI_ENDPOINT);
    assert_eq!(settings.ai_deployment, DEFAULT_AI_DEPLOYMENT);
    assert!(settings.access_token.is_empty());
    assert!(settings.ai_token.is_empty());
}

#[test]
fn save_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    let settings = Settings {
        org_url: "https://example.visualstudio.com".into(),
        access_token: "pat-123".into(),
        ai_endpoint: "https://aoai.example.com".into(),
        ai_deployment: "gpt-4o".into(),
        ai_token: "h.p.s".into(),
    };
    store.save(&settings).unwrap();

    assert_eq!(store.load().unwrap(), settings);
}

#[test]
fn save_strips_all_whitespace_from_ai_token() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    let settings = Settings {
        ai_token: "  eyJh\nbGci .eyJl\teHAi. c2ln  ".into(),
        ..Settings::default()
    };
    let saved = store.save(&settings).unwrap();
    assert_eq!(saved.ai_token, "eyJhbGci.eyJleHAi.c2ln");

    // Reloading returns the sanitized value, not the raw input.
    assert_eq!(store.load().unwrap().ai_token, "eyJhbGci.eyJleHAi.c2ln");
}

#[test]
fn save_trims_surrounding_whitespace_on_fields() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    let settings = Settings {
        org_url: "  https://example.visualstudio.com  ".into(),
        access_token: "\tpat-123\n".into(),
        ..Settings::default()
    };
    let saved = store.save(&settings).unwrap();
    assert_eq!(saved.org_url, "https://example.visualstudio.com");
    assert_eq!(saved.access_token, "pat-123");
}

#[test]
fn save_overwrites_previous_record_wholesale() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    store
        .save(&Settings { access_token: "old".into(), ..Settings::default() })
        .unwrap();
    store
        .save(&Settings { ai_deployment: "gpt-4o-mini".into(), ..Settings::default() })
        .unwrap();

    let loaded = store.load().unwrap();
    assert!(loaded.access_token.is_empty());
    assert_eq!(loaded.ai_deployment, "gpt-4o-mini");
}

#[test]
fn load_merges_missing_fields_with_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    std::fs::write(store.path(), r#"{"access_token":"pat-only"}"#).unwrap();

    let loaded = store.load().unwrap();
    assert_eq!(loaded.access_token, "pat-only");
    assert_eq!(loaded.org_url, DEFAULT_ORG_URL);
    assert_eq!(loaded.ai_deployment, DEFAULT_AI_DEPLOYMENT);
}

#[test]
fn load_malformed_record_errors() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    std::fs::write(store.path(), "not json").unwrap();

    assert!(matches!(store.load(), Err(SettingsError::Serde(_))));
}

#[test]
fn env_overrides_apply_after_load_and_are_not_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    store
        .save(&Settings { access_token: "saved-pat".into(), ..Settings::default() })
        .unwrap();

    unsafe {
        std::env::set_var(ENV_ACCESS_TOKEN, "env-pat");
        std::env::set_var(ENV_AI_TOKEN, "env\ntoken");
    }
    let loaded = store.load_with_env().unwrap();
    unsafe {
        std::env::remove_var(ENV_ACCESS_TOKEN);
        std::env::remove_var(ENV_AI_TOKEN);
    }

    assert_eq!(loaded.access_token, "env-pat");
    assert_eq!(loaded.ai_token, "envtoken");
    // The file still holds the saved value.
    assert_eq!(store.load().unwrap().access_token, "saved-pat");
}
