use blogsmith::presentation::{Environment, Settings};

fn base_settings() -> Settings {
    let mut settings = Settings::load(Environment::Test).unwrap();
    settings.llm.api_key = None;
    settings.photos.access_key = None;
    settings.cms.project_id = None;
    settings.cms.token = None;
    settings.admin.username = None;
    settings.admin.password_hash = None;
    settings.admin.jwt_secret = None;
    settings
}

#[test]
fn given_no_overrides_when_loading_then_uses_defaults() {
    let settings = Settings::load(Environment::Test).unwrap();
    assert!(!settings.llm.model.is_empty());
    assert!(settings.jobs.retention_secs > 0);
    assert!(!settings.cms.dataset.is_empty());
}

#[test]
fn given_missing_credentials_when_checking_readiness_then_reports_not_ready() {
    let readiness = base_settings().readiness();
    assert!(!readiness.text_generation);
    assert!(!readiness.photo_search);
    assert!(!readiness.content_store);
    assert!(!readiness.admin_auth);
    assert!(!readiness.is_ready());
}

#[test]
fn given_all_credentials_when_checking_readiness_then_reports_ready() {
    let mut settings = base_settings();
    settings.llm.api_key = Some("sk".to_string());
    settings.photos.access_key = Some("ak".to_string());
    settings.cms.project_id = Some("proj".to_string());
    settings.cms.token = Some("tok".to_string());
    settings.admin.username = Some("admin".to_string());
    settings.admin.password_hash = Some("$2b$hash".to_string());
    settings.admin.jwt_secret = Some("secret".to_string());

    assert!(settings.readiness().is_ready());
}

#[test]
fn given_blank_token_when_checking_readiness_then_content_store_is_not_ready() {
    let mut settings = base_settings();
    settings.cms.project_id = Some("proj".to_string());
    settings.cms.token = Some("  ".to_string());

    assert!(!settings.readiness().content_store);
}

#[test]
fn given_readiness_when_serialized_then_exposes_only_flags() {
    let json = serde_json::to_value(base_settings().readiness()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "textGeneration": false,
            "photoSearch": false,
            "contentStore": false,
            "adminAuth": false
        })
    );
}

#[test]
fn given_no_admin_section_when_loading_then_admin_credentials_are_absent() {
    let settings = Settings::load(Environment::Test).unwrap();

    if std::env::var_os("APP_ADMIN__USERNAME").is_none() {
        assert!(settings.admin.username.is_none());
    }
    if std::env::var_os("APP_ADMIN__JWT_SECRET").is_none() {
        assert!(settings.admin.jwt_secret.is_none());
    }
}
