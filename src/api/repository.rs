use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::docs::{DocArticle, DocArticleUpdate, NewDocArticle, slugify};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Documentation not found")]
    NotFound,
    #[error("A documentation article with this slug already exists")]
    DuplicateSlug,
    #[error("Title, slug, content, and category are required")]
    MissingFields,
}

#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    /// `None` or `"all"` means every category.
    pub category: Option<String>,
    pub published_only: bool,
}

impl ListFilter {
    fn matches(&self, article: &DocArticle) -> bool {
        if self.published_only && !article.is_published {
            return false;
        }
        match self.category.as_deref() {
            None | Some("all") => true,
            Some(category) => article.category == category,
        }
    }
}

/// In-memory article store. Contents are lost when the process exits.
#[derive(Debug, Clone, Default)]
pub struct DocsRepository {
    articles: Arc<RwLock<Vec<DocArticle>>>,
}

impl DocsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sorted by category, then order, newest first within equal order.
    pub async fn list(&self, filter: &ListFilter) -> Vec<DocArticle> {
        let articles = self.articles.read().await;
        let mut matching: Vec<DocArticle> = articles
            .iter()
            .filter(|article| filter.matches(article))
            .cloned()
            .collect();
        matching.sort_by(|a, b| {
            a.category
                .cmp(&b.category)
                .then(a.order.cmp(&b.order))
                .then(b.created_at.cmp(&a.created_at))
        });
        matching
    }

    pub async fn find_published(&self, slug: &str) -> Option<DocArticle> {
        self.articles
            .read()
            .await
            .iter()
            .find(|article| article.slug == slug && article.is_published)
            .cloned()
    }

    pub async fn create(&self, new: NewDocArticle) -> Result<DocArticle, RepositoryError> {
        if new.validate().is_err() {
            return Err(RepositoryError::MissingFields);
        }
        let new = new.normalized();

        let mut articles = self.articles.write().await;
        if articles.iter().any(|article| article.slug == new.slug) {
            return Err(RepositoryError::DuplicateSlug);
        }

        let now = Utc::now();
        let article = DocArticle {
            id: Uuid::new_v4().simple().to_string(),
            title: new.title,
            slug: new.slug,
            content: new.content,
            category: new.category,
            subcategory: new.subcategory,
            video_url: new.video_url,
            order: new.order,
            is_published: new.is_published,
            created_at: now,
            updated_at: now,
        };
        articles.push(article.clone());
        Ok(article)
    }

    pub async fn update(
        &self,
        id: &str,
        update: DocArticleUpdate,
    ) -> Result<DocArticle, RepositoryError> {
        let mut update = update;
        if update.validate().is_err() {
            return Err(RepositoryError::MissingFields);
        }
        update.slug = update.slug.as_deref().map(slugify);

        let mut articles = self.articles.write().await;
        let index = articles
            .iter()
            .position(|article| article.id == id)
            .ok_or(RepositoryError::NotFound)?;
        if let Some(slug) = &update.slug
            && articles
                .iter()
                .any(|article| article.id != id && &article.slug == slug)
        {
            return Err(RepositoryError::DuplicateSlug);
        }

        let article = &mut articles[index];
        update.apply_to(article);
        article.updated_at = Utc::now();
        Ok(article.clone())
    }

    pub async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        let mut articles = self.articles.write().await;
        let index = articles
            .iter()
            .position(|article| article.id == id)
            .ok_or(RepositoryError::NotFound)?;
        articles.remove(index);
        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.articles.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Loads the getting-started articles shipped with the product.
    pub async fn seed_defaults(&self) -> Result<(), RepositoryError> {
        for article in default_articles() {
            self.create(article).await?;
        }
        Ok(())
    }
}

fn default_articles() -> Vec<NewDocArticle> {
    vec![
        NewDocArticle {
            title: "Introduction to Sartthi".to_string(),
            slug: "introduction".to_string(),
            content: "# Welcome to Sartthi Documentation\n\nSartthi combines project management \
                      tools with integrated payroll features."
                .to_string(),
            category: "getting-started".to_string(),
            order: 1,
            is_published: true,
            ..Default::default()
        },
        NewDocArticle {
            title: "Installation".to_string(),
            slug: "installation".to_string(),
            content: "# Installation Guide\n\nGet Sartthi up and running in just a few steps."
                .to_string(),
            category: "getting-started".to_string(),
            order: 2,
            is_published: true,
            ..Default::default()
        },
        NewDocArticle {
            title: "Managing Tasks".to_string(),
            slug: "managing-tasks".to_string(),
            content: "# Managing Tasks\n\nCreate, assign and track tasks across projects."
                .to_string(),
            category: "features".to_string(),
            order: 1,
            is_published: true,
            ..Default::default()
        },
    ]
}
