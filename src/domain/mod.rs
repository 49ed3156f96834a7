mod generated_content;
mod image;
mod job;
mod job_id;
mod job_status;
mod publish_config;
mod row_input;
mod row_result;
mod slug;

pub use generated_content::GeneratedContent;
pub use image::{FetchedImage, UploadedAsset};
pub use job::{Job, JobTransitionError, progress_percent};
pub use job_id::JobId;
pub use job_status::JobStatus;
pub use publish_config::PublishConfig;
pub use row_input::RowInput;
pub use row_result::RowResult;
pub use slug::slugify;
