pub mod auth;
pub mod cms;
pub mod llm;
pub mod observability;
pub mod persistence;
pub mod photos;
