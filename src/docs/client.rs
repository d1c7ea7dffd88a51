//! HTTP client for the documentation API.

use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

use super::error::DocsError;
use super::models::{ApiResponse, DocArticle, DocArticleUpdate, NewDocArticle};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct DocsClient {
    http: reqwest::Client,
    base_url: Url,
    token: Option<String>,
}

impl DocsClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, DocsError> {
        let base_url = base_url.into();
        let parsed = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| DocsError::InvalidBaseUrl(format!("{}: {}", base_url, e)))?;
        if parsed.cannot_be_a_base() {
            return Err(DocsError::InvalidBaseUrl(base_url));
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("sartthi/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: parsed,
            token: None,
        })
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Published articles, optionally limited to one category.
    pub async fn list(&self, category: Option<&str>) -> Result<Vec<DocArticle>, DocsError> {
        let request = self.request(Method::GET, &["docs"], false)?;
        let response = send(with_category(request, category)).await?;
        expect_data(response)
    }

    /// A single published article by slug.
    pub async fn get(&self, slug: &str) -> Result<DocArticle, DocsError> {
        let request = self.request(Method::GET, &["docs", segment("slug", slug)?], false)?;
        expect_data(send(request).await?)
    }

    /// Every article, published or not.
    pub async fn admin_list(&self, category: Option<&str>) -> Result<Vec<DocArticle>, DocsError> {
        let request = self.request(Method::GET, &["docs", "admin", "all"], true)?;
        let response = send(with_category(request, category)).await?;
        expect_data(response)
    }

    pub async fn create(&self, article: NewDocArticle) -> Result<DocArticle, DocsError> {
        let article = article.normalized();
        article.validate()?;

        let request = self.request(Method::POST, &["docs", "admin", "create"], true)?;
        let response = send(request.json(&article)).await?;
        debug!(message = %response.message, slug = %article.slug, "Created documentation");
        expect_data(response)
    }

    pub async fn update(&self, id: &str, update: DocArticleUpdate) -> Result<DocArticle, DocsError> {
        let update = update.normalized();
        update.validate()?;
        if update.is_empty() {
            return Err(DocsError::Validation("Nothing to update".to_string()));
        }

        let request = self.request(Method::PUT, &["docs", "admin", segment("id", id)?], true)?;
        expect_data(send(request.json(&update)).await?)
    }

    /// Deletes an article and returns the server's confirmation message.
    pub async fn delete(&self, id: &str) -> Result<String, DocsError> {
        let request = self.request(Method::DELETE, &["docs", "admin", segment("id", id)?], true)?;
        let response: ApiResponse<serde_json::Value> = send(request).await?;
        Ok(response.message)
    }

    /// Appends `segments` to the base path, percent-encoding each one.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `new`: the base URL can carry path segments
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str], admin: bool) -> Result<RequestBuilder, DocsError> {
        let url = self.url(segments);
        debug!(method = %method, url = %url, "Docs request");

        let request = self.http.request(method, url);
        match (&self.token, admin) {
            (Some(token), _) => Ok(request.bearer_auth(token)),
            (None, true) => Err(DocsError::MissingToken),
            (None, false) => Ok(request),
        }
    }
}

/// A slug or id used as one path segment. Dot segments would be dropped
/// from the URL and address a different route.
fn segment<'a>(name: &str, value: &'a str) -> Result<&'a str, DocsError> {
    match value.trim() {
        "" | "." | ".." => Err(DocsError::Validation(format!("Invalid {}: '{}'", name, value))),
        _ => Ok(value),
    }
}

fn with_category(request: RequestBuilder, category: Option<&str>) -> RequestBuilder {
    match category {
        Some(category) => request.query(&[("category", category)]),
        None => request,
    }
}

async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<ApiResponse<T>, DocsError> {
    let response = request.send().await.inspect_err(|e| {
        warn!(error = %e, "Docs request failed");
    })?;
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<ApiResponse<serde_json::Value>>(&body)
            .map(|envelope| envelope.message)
            .unwrap_or_else(|_| {
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string()
            });
        warn!(status = %status, message = %message, "Docs API returned an error");
        return Err(DocsError::Http {
            status: status.as_u16(),
            message,
        });
    }

    let envelope: ApiResponse<T> =
        serde_json::from_str(&body).map_err(|e| DocsError::Decode(e.to_string()))?;
    if !envelope.success {
        return Err(DocsError::Decode(envelope.message));
    }
    Ok(envelope)
}

fn expect_data<T>(response: ApiResponse<T>) -> Result<T, DocsError> {
    response
        .data
        .ok_or_else(|| DocsError::Decode(format!("no data in response: {}", response.message)))
}
