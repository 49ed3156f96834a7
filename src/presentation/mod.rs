pub mod admin_auth;
pub mod config;
pub mod handlers;
pub mod router;
pub mod state;

pub use config::{Environment, Readiness, Settings};
pub use router::{GENERATE_BLOG_PATH, create_router};
pub use state::AppState;
