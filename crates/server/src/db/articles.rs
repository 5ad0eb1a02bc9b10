//! Article repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use registra_core::{ArticleId, Slug};

use super::RepositoryError;
use crate::models::Article;

/// Internal row type for `PostgreSQL` article queries.
#[derive(Debug, sqlx::FromRow)]
struct ArticleRow {
    id: i32,
    slug: String,
    title: String,
    excerpt: Option<String>,
    content: Option<String>,
    author_name: Option<String>,
    image_url: Option<String>,
    is_published: bool,
    published_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ArticleRow> for Article {
    type Error = RepositoryError;

    fn try_from(row: ArticleRow) -> Result<Self, Self::Error> {
        let slug = Slug::parse(&row.slug).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid slug in database: {e}"))
        })?;

        Ok(Self {
            id: ArticleId::new(row.id),
            slug,
            title: row.title,
            excerpt: row.excerpt,
            content: row.content,
            author_name: row.author_name,
            image_url: row.image_url,
            is_published: row.is_published,
            published_at: row.published_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const ARTICLE_COLUMNS: &str = "id, slug, title, excerpt, content, author_name, image_url, \
                               is_published, published_at, created_at, updated_at";

/// Fields accepted when creating or replacing an article.
#[derive(Debug, Clone)]
pub struct ArticleInput {
    pub slug: Slug,
    pub title: String,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub author_name: Option<String>,
    pub image_url: Option<String>,
    pub is_published: bool,
}

/// Repository for article database operations.
pub struct ArticleRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ArticleRepository<'a> {
    /// Create a new article repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List published articles, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn list_published(&self) -> Result<Vec<Article>, RepositoryError> {
        let rows = sqlx::query_as::<_, ArticleRow>(&format!(
            r"
            SELECT {ARTICLE_COLUMNS}
            FROM article
            WHERE is_published
            ORDER BY published_at DESC NULLS LAST
            "
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get a published article by its slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get_published_by_slug(
        &self,
        slug: &Slug,
    ) -> Result<Option<Article>, RepositoryError> {
        let row = sqlx::query_as::<_, ArticleRow>(&format!(
            r"
            SELECT {ARTICLE_COLUMNS}
            FROM article
            WHERE slug = $1 AND is_published
            "
        ))
        .bind(slug.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// List all articles including drafts, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn list_all(&self) -> Result<Vec<Article>, RepositoryError> {
        let rows = sqlx::query_as::<_, ArticleRow>(&format!(
            r"
            SELECT {ARTICLE_COLUMNS}
            FROM article
            ORDER BY created_at DESC
            "
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Create a new article.
    ///
    /// `published_at` is stamped when the article is created already
    /// published.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the slug already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, input: &ArticleInput) -> Result<Article, RepositoryError> {
        let row = sqlx::query_as::<_, ArticleRow>(&format!(
            r"
            INSERT INTO article (slug, title, excerpt, content, author_name, image_url,
                                 is_published, published_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, CASE WHEN $7 THEN NOW() END)
            RETURNING {ARTICLE_COLUMNS}
            "
        ))
        .bind(input.slug.as_str())
        .bind(&input.title)
        .bind(&input.excerpt)
        .bind(&input.content)
        .bind(&input.author_name)
        .bind(&input.image_url)
        .bind(input.is_published)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "slug already exists"))?;

        row.try_into()
    }

    /// Replace an article's fields.
    ///
    /// `published_at` is stamped on the draft-to-published transition and
    /// cleared when unpublishing.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the article doesn't exist.
    /// Returns `RepositoryError::Conflict` if the new slug already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: ArticleId,
        input: &ArticleInput,
    ) -> Result<Article, RepositoryError> {
        let row = sqlx::query_as::<_, ArticleRow>(&format!(
            r"
            UPDATE article
            SET slug = $1, title = $2, excerpt = $3, content = $4,
                author_name = $5, image_url = $6, is_published = $7,
                published_at = CASE
                    WHEN $7 AND NOT is_published THEN NOW()
                    WHEN NOT $7 THEN NULL
                    ELSE published_at
                END,
                updated_at = NOW()
            WHERE id = $8
            RETURNING {ARTICLE_COLUMNS}
            "
        ))
        .bind(input.slug.as_str())
        .bind(&input.title)
        .bind(&input.excerpt)
        .bind(&input.content)
        .bind(&input.author_name)
        .bind(&input.image_url)
        .bind(input.is_published)
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "slug already exists"))?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }

    /// Delete an article by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the article doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: ArticleId) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM article
            WHERE id = $1
            ",
        )
        .bind(id.as_i32())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
