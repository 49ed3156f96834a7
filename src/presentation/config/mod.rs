mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    AdminSettings, CmsSettings, JobSettings, LlmSettings, LoggingSettings, PhotoSettings,
    Readiness, ServerSettings, Settings,
};
