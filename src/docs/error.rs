use crate::store::Toast;

#[derive(Debug, thiserror::Error)]
pub enum DocsError {
    #[error("{0}")]
    Validation(String),
    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("Not signed in: no access token")]
    MissingToken,
    #[error("{message} (HTTP {status})")]
    Http { status: u16, message: String },
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl DocsError {
    pub fn status(&self) -> Option<u16> {
        match self {
            DocsError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl From<DocsError> for Toast {
    fn from(error: DocsError) -> Self {
        match &error {
            DocsError::Validation(message) => Toast::warning(message.clone()),
            _ => Toast::error(error.to_string()),
        }
    }
}
