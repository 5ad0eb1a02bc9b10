//! Product and product feature repositories.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use registra_core::{ProductFeatureId, ProductId, Slug};

use super::RepositoryError;
use crate::models::{Product, ProductFeature};

/// Internal row type for `PostgreSQL` product queries.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i32,
    slug: String,
    name: String,
    short_description: Option<String>,
    full_description: Option<String>,
    price: Option<String>,
    image_url: Option<String>,
    demo_link: Option<String>,
    download_link: Option<String>,
    is_active: bool,
    is_featured: bool,
    order_index: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let slug = Slug::parse(&row.slug).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid slug in database: {e}"))
        })?;

        Ok(Self {
            id: ProductId::new(row.id),
            slug,
            name: row.name,
            short_description: row.short_description,
            full_description: row.full_description,
            price: row.price,
            image_url: row.image_url,
            demo_link: row.demo_link,
            download_link: row.download_link,
            is_active: row.is_active,
            is_featured: row.is_featured,
            order_index: row.order_index,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Internal row type for `PostgreSQL` product feature queries.
#[derive(Debug, sqlx::FromRow)]
struct ProductFeatureRow {
    id: i32,
    product_id: i32,
    title: String,
    description: Option<String>,
    icon: Option<String>,
    order_index: i32,
}

impl From<ProductFeatureRow> for ProductFeature {
    fn from(row: ProductFeatureRow) -> Self {
        Self {
            id: ProductFeatureId::new(row.id),
            product_id: ProductId::new(row.product_id),
            title: row.title,
            description: row.description,
            icon: row.icon,
            order_index: row.order_index,
        }
    }
}

const PRODUCT_COLUMNS: &str = "id, slug, name, short_description, full_description, price, \
                               image_url, demo_link, download_link, is_active, is_featured, \
                               order_index, created_at, updated_at";

/// Fields accepted when creating or replacing a product.
#[derive(Debug, Clone)]
pub struct ProductInput {
    pub slug: Slug,
    pub name: String,
    pub short_description: Option<String>,
    pub full_description: Option<String>,
    pub price: Option<String>,
    pub image_url: Option<String>,
    pub demo_link: Option<String>,
    pub download_link: Option<String>,
    pub is_active: bool,
    pub is_featured: bool,
    pub order_index: i32,
}

/// Fields accepted when creating or replacing a product feature.
#[derive(Debug, Clone)]
pub struct ProductFeatureInput {
    pub title: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub order_index: i32,
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List active products in display order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn list_active(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            r"
            SELECT {PRODUCT_COLUMNS}
            FROM product
            WHERE is_active
            ORDER BY order_index ASC, created_at ASC
            "
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get an active product by its slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get_active_by_slug(
        &self,
        slug: &Slug,
    ) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r"
            SELECT {PRODUCT_COLUMNS}
            FROM product
            WHERE slug = $1 AND is_active
            "
        ))
        .bind(slug.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// List all products including inactive ones.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn list_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            r"
            SELECT {PRODUCT_COLUMNS}
            FROM product
            ORDER BY order_index ASC, created_at ASC
            "
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Create a new product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the slug already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, input: &ProductInput) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r"
            INSERT INTO product (slug, name, short_description, full_description, price,
                                 image_url, demo_link, download_link, is_active, is_featured,
                                 order_index)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {PRODUCT_COLUMNS}
            "
        ))
        .bind(input.slug.as_str())
        .bind(&input.name)
        .bind(&input.short_description)
        .bind(&input.full_description)
        .bind(&input.price)
        .bind(&input.image_url)
        .bind(&input.demo_link)
        .bind(&input.download_link)
        .bind(input.is_active)
        .bind(input.is_featured)
        .bind(input.order_index)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "slug already exists"))?;

        row.try_into()
    }

    /// Replace a product's fields.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Conflict` if the new slug already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: ProductId,
        input: &ProductInput,
    ) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r"
            UPDATE product
            SET slug = $1, name = $2, short_description = $3, full_description = $4,
                price = $5, image_url = $6, demo_link = $7, download_link = $8,
                is_active = $9, is_featured = $10, order_index = $11, updated_at = NOW()
            WHERE id = $12
            RETURNING {PRODUCT_COLUMNS}
            "
        ))
        .bind(input.slug.as_str())
        .bind(&input.name)
        .bind(&input.short_description)
        .bind(&input.full_description)
        .bind(&input.price)
        .bind(&input.image_url)
        .bind(&input.demo_link)
        .bind(&input.download_link)
        .bind(input.is_active)
        .bind(input.is_featured)
        .bind(input.order_index)
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "slug already exists"))?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }

    /// Delete a product by its ID. Features cascade with it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM product
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

    /// List a product's features in display order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_features(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<ProductFeature>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductFeatureRow>(
            r"
            SELECT id, product_id, title, description, icon, order_index
            FROM product_feature
            WHERE product_id = $1
            ORDER BY order_index ASC, created_at ASC
            ",
        )
        .bind(product_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Add a feature to a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create_feature(
        &self,
        product_id: ProductId,
        input: &ProductFeatureInput,
    ) -> Result<ProductFeature, RepositoryError> {
        let row = sqlx::query_as::<_, ProductFeatureRow>(
            r"
            INSERT INTO product_feature (product_id, title, description, icon, order_index)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, product_id, title, description, icon, order_index
            ",
        )
        .bind(product_id.as_i32())
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.icon)
        .bind(input.order_index)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_foreign_key_violation()
            {
                return RepositoryError::NotFound;
            }
            RepositoryError::Database(e)
        })?;

        Ok(row.into())
    }

    /// Delete a product feature, verifying it belongs to the given product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the feature doesn't exist or
    /// belongs to a different product.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete_feature(
        &self,
        feature_id: ProductFeatureId,
        product_id: ProductId,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM product_feature
            WHERE id = $1 AND product_id = $2
            ",
        )
        .bind(feature_id.as_i32())
        .bind(product_id.as_i32())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
