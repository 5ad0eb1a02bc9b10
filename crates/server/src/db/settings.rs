//! Site settings repository.
//!
//! Settings are free-form key/value pairs (site name, contact email, social
//! links). The public API exposes them as a single JSON object.

use std::collections::BTreeMap;

use sqlx::PgPool;

use super::RepositoryError;

/// Repository for site settings.
pub struct SettingsRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SettingsRepository<'a> {
    /// Create a new settings repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Fetch all settings as a key/value map.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_all(&self) -> Result<BTreeMap<String, Option<String>>, RepositoryError> {
        let rows = sqlx::query_as::<_, (String, Option<String>)>(
            r"
            SELECT key, value
            FROM site_setting
            ORDER BY key ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().collect())
    }

    /// Insert or update a batch of settings in a single transaction.
    ///
    /// Either every entry is applied or none is; a failure partway through
    /// rolls back the earlier upserts.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails.
    pub async fn upsert_many(
        &self,
        entries: &BTreeMap<String, Option<String>>,
    ) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        for (key, value) in entries {
            sqlx::query(
                r"
                INSERT INTO site_setting (key, value)
                VALUES ($1, $2)
                ON CONFLICT (key) DO UPDATE
                SET value = EXCLUDED.value, updated_at = NOW()
                ",
            )
            .bind(key)
            .bind(value.as_deref())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }

    /// Delete a setting by key.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the key doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, key: &str) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM site_setting WHERE key = $1")
            .bind(key)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
