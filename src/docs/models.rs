use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::error::DocsError;

/// A documentation article as served by the docs API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocArticle {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of a create request.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDocArticle {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub is_published: bool,
}

impl NewDocArticle {
    /// Checks the fields the form requires before anything is sent.
    pub fn validate(&self) -> Result<(), DocsError> {
        let missing: Vec<&str> = [
            ("title", &self.title),
            ("slug", &self.slug),
            ("content", &self.content),
            ("category", &self.category),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(DocsError::Validation(format!(
                "Missing required field(s): {}",
                missing.join(", ")
            )))
        }
    }

    pub fn normalized(mut self) -> Self {
        self.slug = slugify(&self.slug);
        self
    }
}

/// Body of an update request. Only present fields change.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocArticleUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_published: Option<bool>,
}

impl DocArticleUpdate {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Required fields may be changed but not blanked.
    pub fn validate(&self) -> Result<(), DocsError> {
        for (name, value) in [
            ("title", &self.title),
            ("slug", &self.slug),
            ("content", &self.content),
            ("category", &self.category),
        ] {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                return Err(DocsError::Validation(format!("{} cannot be empty", name)));
            }
        }
        Ok(())
    }

    pub fn normalized(mut self) -> Self {
        self.slug = self.slug.as_deref().map(slugify);
        self
    }

    pub fn apply_to(self, article: &mut DocArticle) {
        if let Some(title) = self.title {
            article.title = title;
        }
        if let Some(slug) = self.slug {
            article.slug = slug;
        }
        if let Some(content) = self.content {
            article.content = content;
        }
        if let Some(category) = self.category {
            article.category = category;
        }
        if self.subcategory.is_some() {
            article.subcategory = self.subcategory;
        }
        if self.video_url.is_some() {
            article.video_url = self.video_url;
        }
        if let Some(order) = self.order {
            article.order = order;
        }
        if let Some(is_published) = self.is_published {
            article.is_published = is_published;
        }
    }
}

/// Envelope every docs endpoint answers with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn done(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }
}

/// Lower-cases and joins whitespace-separated words with '-'.
pub fn slugify(input: &str) -> String {
    input
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Groups articles by category, keeping their order within each group.
pub fn group_by_category(articles: &[DocArticle]) -> BTreeMap<&str, Vec<&DocArticle>> {
    let mut groups: BTreeMap<&str, Vec<&DocArticle>> = BTreeMap::new();
    for article in articles {
        groups.entry(article.category.as_str()).or_default().push(article);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn article(slug: &str, category: &str) -> DocArticle {
        DocArticle {
            id: slug.to_string(),
            title: slug.to_string(),
            slug: slug.to_string(),
            content: "body".to_string(),
            category: category.to_string(),
            subcategory: None,
            video_url: None,
            order: 0,
            is_published: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Getting Started"), "getting-started");
        assert_eq!(slugify("  API   Authentication \t"), "api-authentication");
        assert_eq!(slugify("faq"), "faq");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn test_validate_lists_missing_fields() {
        let article = NewDocArticle {
            title: "Intro".to_string(),
            content: "   ".to_string(),
            ..Default::default()
        };
        let err = article.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing required field(s): slug, content, category"
        );
    }

    #[test]
    fn test_new_article_serializes_camel_case() {
        let article = NewDocArticle {
            title: "Intro".to_string(),
            slug: "Intro Page".to_string(),
            content: "Hello".to_string(),
            category: "getting-started".to_string(),
            video_url: Some("https://example.com/v".to_string()),
            order: 2,
            is_published: true,
            ..Default::default()
        }
        .normalized();

        let value = serde_json::to_value(&article).unwrap();
        assert_eq!(value["slug"], "intro-page");
        assert_eq!(value["videoUrl"], "https://example.com/v");
        assert_eq!(value["isPublished"], true);
        assert_eq!(value["order"], 2);
        assert!(value.get("subcategory").is_none());
    }

    #[test]
    fn test_update_validate_and_apply() {
        let update = DocArticleUpdate {
            title: Some(String::new()),
            ..Default::default()
        };
        assert!(update.validate().is_err());

        let update = DocArticleUpdate {
            slug: Some("New Slug".to_string()),
            is_published: Some(false),
            ..Default::default()
        }
        .normalized();
        let mut doc = article("old", "faq");
        update.apply_to(&mut doc);

        assert_eq!(doc.slug, "new-slug");
        assert!(!doc.is_published);
        assert_eq!(doc.title, "old");
        assert!(DocArticleUpdate::default().is_empty());
    }

    #[test]
    fn test_article_deserializes_api_shape() {
        let doc: DocArticle = serde_json::from_value(json!({
            "_id": "65f0c0",
            "title": "Installation",
            "slug": "installation",
            "content": "# Installation Guide",
            "category": "getting-started",
            "order": 2,
            "isPublished": true,
            "createdAt": "2024-10-01T10:00:00Z",
            "updatedAt": "2024-10-02T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(doc.id, "65f0c0");
        assert_eq!(doc.order, 2);
        assert!(doc.subcategory.is_none());
    }

    #[test]
    fn test_envelope_without_data() {
        let resp: ApiResponse<DocArticle> =
            serde_json::from_str(r#"{"success":true,"message":"Documentation deleted successfully"}"#)
                .unwrap();
        assert!(resp.data.is_none());
    }

    #[test]
    fn test_group_by_category() {
        let docs = vec![article("a", "faq"), article("b", "api"), article("c", "faq")];
        let groups = group_by_category(&docs);

        assert_eq!(groups.keys().copied().collect::<Vec<_>>(), vec!["api", "faq"]);
        assert_eq!(
            groups["faq"].iter().map(|d| d.slug.as_str()).collect::<Vec<_>>(),
            vec!["a", "c"]
        );
    }
}
