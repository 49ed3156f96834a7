use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};

use super::Environment;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub llm: LlmSettings,
    pub photos: PhotoSettings,
    pub cms: CmsSettings,
    #[serde(default)]
    pub admin: AdminSettings,
    pub jobs: JobSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhotoSettings {
    pub base_url: String,
    pub access_key: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CmsSettings {
    pub project_id: Option<String>,
    pub dataset: String,
    pub api_version: String,
    pub token: Option<String>,
    /// Overrides the project-derived API host, mainly for tests and proxies.
    pub base_url: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminSettings {
    pub username: Option<String>,
    pub password_hash: Option<String>,
    pub jwt_secret: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobSettings {
    pub retention_secs: u64,
    pub sweep_interval_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub json: bool,
}

/// Which collaborators have credentials configured. Values are never exposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Readiness {
    pub text_generation: bool,
    pub photo_search: bool,
    pub content_store: bool,
    pub admin_auth: bool,
}

impl Readiness {
    pub fn is_ready(&self) -> bool {
        self.text_generation && self.photo_search && self.content_store && self.admin_auth
    }
}

impl Settings {
    /// Defaults, then `appsettings.{environment}` if present, then `APP_*` variables
    /// (`APP_LLM__API_KEY`, `APP_CMS__PROJECT_ID`, ...).
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("llm.base_url", "https://api.openai.com/v1")?
            .set_default("llm.model", "gpt-4o-mini")?
            .set_default("llm.max_tokens", 2500)?
            .set_default("llm.temperature", 0.7)?
            .set_default("llm.timeout_secs", 120)?
            .set_default("photos.base_url", "https://api.unsplash.com")?
            .set_default("photos.timeout_secs", 30)?
            .set_default("cms.dataset", "production")?
            .set_default("cms.api_version", "2024-01-01")?
            .set_default("cms.timeout_secs", 60)?
            .set_default("jobs.retention_secs", 3600)?
            .set_default("jobs.sweep_interval_secs", 300)?
            .set_default("logging.json", false)?
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str())).required(false),
            )
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    pub fn readiness(&self) -> Readiness {
        Readiness {
            text_generation: present(&self.llm.api_key),
            photo_search: present(&self.photos.access_key),
            content_store: present(&self.cms.project_id) && present(&self.cms.token),
            admin_auth: present(&self.admin.username)
                && present(&self.admin.password_hash)
                && present(&self.admin.jwt_secret),
        }
    }
}

fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}
