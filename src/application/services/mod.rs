mod cms_uploader;
mod content_generator;
mod content_response_parser;
mod csv_ingestion;
mod image_fetcher;
mod job_orchestrator;
mod job_reaper;
pub mod markdown_blocks;

pub use cms_uploader::{CmsUploadError, CmsUploader};
pub use content_generator::{
    BRAND_VOICE_PROMPT, ContentGenerationError, ContentGenerator, build_user_prompt,
};
pub use content_response_parser::{
    ParseAttempt, extract_clean_content, fallback_meta_description, parse_content_field,
    parse_generated_content, parse_raw_text, parse_strict_json, tags_from_key_points,
};
pub use csv_ingestion::{CsvIngestionError, CsvValidation, parse_csv, validate_csv};
pub use image_fetcher::{ImageFetchError, ImageFetcher, build_search_query, extract_search_terms};
pub use job_orchestrator::{JobOrchestrationError, JobOrchestrator};
pub use job_reaper::spawn_job_reaper;
pub use markdown_blocks::{Block, BlockStyle, MarkDef, Span, markdown_to_blocks};
