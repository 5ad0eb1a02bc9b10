//! Home-page content repository: hero block, feature cards, testimonials.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use registra_core::{FeatureId, HeroContentId, TestimonialId};

use super::RepositoryError;
use crate::models::{Feature, HeroContent, Testimonial};

#[derive(Debug, sqlx::FromRow)]
struct HeroContentRow {
    id: i32,
    title: String,
    subtitle: Option<String>,
    description: Option<String>,
    button_text: Option<String>,
    button_link: Option<String>,
    image_url: Option<String>,
    is_active: bool,
    updated_at: DateTime<Utc>,
}

impl From<HeroContentRow> for HeroContent {
    fn from(row: HeroContentRow) -> Self {
        Self {
            id: HeroContentId::new(row.id),
            title: row.title,
            subtitle: row.subtitle,
            description: row.description,
            button_text: row.button_text,
            button_link: row.button_link,
            image_url: row.image_url,
            is_active: row.is_active,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct FeatureRow {
    id: i32,
    title: String,
    description: Option<String>,
    icon: Option<String>,
    is_active: bool,
    order_index: i32,
}

impl From<FeatureRow> for Feature {
    fn from(row: FeatureRow) -> Self {
        Self {
            id: FeatureId::new(row.id),
            title: row.title,
            description: row.description,
            icon: row.icon,
            is_active: row.is_active,
            order_index: row.order_index,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TestimonialRow {
    id: i32,
    name: String,
    role: Option<String>,
    company: Option<String>,
    content: String,
    rating: Option<i32>,
    image_url: Option<String>,
    is_active: bool,
    order_index: i32,
}

impl From<TestimonialRow> for Testimonial {
    fn from(row: TestimonialRow) -> Self {
        Self {
            id: TestimonialId::new(row.id),
            name: row.name,
            role: row.role,
            company: row.company,
            content: row.content,
            rating: row.rating,
            image_url: row.image_url,
            is_active: row.is_active,
            order_index: row.order_index,
        }
    }
}

const HERO_COLUMNS: &str =
    "id, title, subtitle, description, button_text, button_link, image_url, is_active, updated_at";

/// Fields accepted when creating or replacing the hero block.
#[derive(Debug, Clone)]
pub struct HeroContentInput {
    pub title: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub button_text: Option<String>,
    pub button_link: Option<String>,
    pub image_url: Option<String>,
    pub is_active: bool,
}

/// Fields accepted when creating or replacing a feature card.
#[derive(Debug, Clone)]
pub struct FeatureInput {
    pub title: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub is_active: bool,
    pub order_index: i32,
}

/// Fields accepted when creating or replacing a testimonial.
#[derive(Debug, Clone)]
pub struct TestimonialInput {
    pub name: String,
    pub role: Option<String>,
    pub company: Option<String>,
    pub content: String,
    pub rating: Option<i32>,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub order_index: i32,
}

/// Repository for home-page content blocks.
pub struct ContentRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ContentRepository<'a> {
    /// Create a new content repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    // -------------------------------------------------------------------------
    // Hero
    // -------------------------------------------------------------------------

    /// Get the active hero block, if any. When several are active the most
    /// recently updated one wins.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_active_hero(&self) -> Result<Option<HeroContent>, RepositoryError> {
        let row = sqlx::query_as::<_, HeroContentRow>(&format!(
            r"
            SELECT {HERO_COLUMNS}
            FROM hero_content
            WHERE is_active
            ORDER BY updated_at DESC
            LIMIT 1
            "
        ))
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// List all hero blocks, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_heroes(&self) -> Result<Vec<HeroContent>, RepositoryError> {
        let rows = sqlx::query_as::<_, HeroContentRow>(&format!(
            r"
            SELECT {HERO_COLUMNS}
            FROM hero_content
            ORDER BY updated_at DESC
            "
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Create a hero block.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create_hero(
        &self,
        input: &HeroContentInput,
    ) -> Result<HeroContent, RepositoryError> {
        let row = sqlx::query_as::<_, HeroContentRow>(&format!(
            r"
            INSERT INTO hero_content (title, subtitle, description, button_text, button_link,
                                      image_url, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {HERO_COLUMNS}
            "
        ))
        .bind(&input.title)
        .bind(&input.subtitle)
        .bind(&input.description)
        .bind(&input.button_text)
        .bind(&input.button_link)
        .bind(&input.image_url)
        .bind(input.is_active)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Replace a hero block's fields.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the hero block doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_hero(
        &self,
        id: HeroContentId,
        input: &HeroContentInput,
    ) -> Result<HeroContent, RepositoryError> {
        let row = sqlx::query_as::<_, HeroContentRow>(&format!(
            r"
            UPDATE hero_content
            SET title = $1, subtitle = $2, description = $3, button_text = $4,
                button_link = $5, image_url = $6, is_active = $7, updated_at = NOW()
            WHERE id = $8
            RETURNING {HERO_COLUMNS}
            "
        ))
        .bind(&input.title)
        .bind(&input.subtitle)
        .bind(&input.description)
        .bind(&input.button_text)
        .bind(&input.button_link)
        .bind(&input.image_url)
        .bind(input.is_active)
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }

    // -------------------------------------------------------------------------
    // Feature cards
    // -------------------------------------------------------------------------

    /// List active feature cards in display order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_active_features(&self) -> Result<Vec<Feature>, RepositoryError> {
        let rows = sqlx::query_as::<_, FeatureRow>(
            r"
            SELECT id, title, description, icon, is_active, order_index
            FROM feature
            WHERE is_active
            ORDER BY order_index ASC, created_at ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// List all feature cards including inactive ones.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_features(&self) -> Result<Vec<Feature>, RepositoryError> {
        let rows = sqlx::query_as::<_, FeatureRow>(
            r"
            SELECT id, title, description, icon, is_active, order_index
            FROM feature
            ORDER BY order_index ASC, created_at ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Create a feature card.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create_feature(&self, input: &FeatureInput) -> Result<Feature, RepositoryError> {
        let row = sqlx::query_as::<_, FeatureRow>(
            r"
            INSERT INTO feature (title, description, icon, is_active, order_index)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, description, icon, is_active, order_index
            ",
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.icon)
        .bind(input.is_active)
        .bind(input.order_index)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Replace a feature card's fields.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the feature card doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_feature(
        &self,
        id: FeatureId,
        input: &FeatureInput,
    ) -> Result<Feature, RepositoryError> {
        let row = sqlx::query_as::<_, FeatureRow>(
            r"
            UPDATE feature
            SET title = $1, description = $2, icon = $3, is_active = $4,
                order_index = $5, updated_at = NOW()
            WHERE id = $6
            RETURNING id, title, description, icon, is_active, order_index
            ",
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.icon)
        .bind(input.is_active)
        .bind(input.order_index)
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }

    /// Delete a feature card.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the feature card doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete_feature(&self, id: FeatureId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM feature WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    // -------------------------------------------------------------------------
    // Testimonials
    // -------------------------------------------------------------------------

    /// List active testimonials in display order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_active_testimonials(&self) -> Result<Vec<Testimonial>, RepositoryError> {
        let rows = sqlx::query_as::<_, TestimonialRow>(
            r"
            SELECT id, name, role, company, content, rating, image_url, is_active, order_index
            FROM testimonial
            WHERE is_active
            ORDER BY order_index ASC, created_at ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// List all testimonials including inactive ones.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_testimonials(&self) -> Result<Vec<Testimonial>, RepositoryError> {
        let rows = sqlx::query_as::<_, TestimonialRow>(
            r"
            SELECT id, name, role, company, content, rating, image_url, is_active, order_index
            FROM testimonial
            ORDER BY order_index ASC, created_at ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Create a testimonial.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create_testimonial(
        &self,
        input: &TestimonialInput,
    ) -> Result<Testimonial, RepositoryError> {
        let row = sqlx::query_as::<_, TestimonialRow>(
            r"
            INSERT INTO testimonial (name, role, company, content, rating, image_url,
                                     is_active, order_index)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, name, role, company, content, rating, image_url, is_active, order_index
            ",
        )
        .bind(&input.name)
        .bind(&input.role)
        .bind(&input.company)
        .bind(&input.content)
        .bind(input.rating)
        .bind(&input.image_url)
        .bind(input.is_active)
        .bind(input.order_index)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Replace a testimonial's fields.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the testimonial doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_testimonial(
        &self,
        id: TestimonialId,
        input: &TestimonialInput,
    ) -> Result<Testimonial, RepositoryError> {
        let row = sqlx::query_as::<_, TestimonialRow>(
            r"
            UPDATE testimonial
            SET name = $1, role = $2, company = $3, content = $4, rating = $5,
                image_url = $6, is_active = $7, order_index = $8
            WHERE id = $9
            RETURNING id, name, role, company, content, rating, image_url, is_active, order_index
            ",
        )
        .bind(&input.name)
        .bind(&input.role)
        .bind(&input.company)
        .bind(&input.content)
        .bind(input.rating)
        .bind(&input.image_url)
        .bind(input.is_active)
        .bind(input.order_index)
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }

    /// Delete a testimonial.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the testimonial doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete_testimonial(&self, id: TestimonialId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM testimonial WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
