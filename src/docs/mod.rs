pub mod client;
pub mod error;
pub mod models;

pub use client::DocsClient;
pub use error::DocsError;
pub use models::{ApiResponse, DocArticle, DocArticleUpdate, NewDocArticle, group_by_category, slugify};
