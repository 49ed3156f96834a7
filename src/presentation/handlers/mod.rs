mod error_response;
mod generate_blog;
mod health;
mod readiness;

pub use error_response::ErrorResponse;
pub use generate_blog::{
    CONFIG_FIELD, CSV_FIELD, StatusQuery, SubmitResponse, generation_status_handler,
    submit_generation_handler,
};
pub use health::health_handler;
pub use readiness::{ReadinessResponse, readiness_handler};
