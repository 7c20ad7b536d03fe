//! PostgreSQL implementation of the registration store.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::models::{REGISTRATION_COLUMNS, RegistrationRow};
use super::{ListPage, RegistrationStore, StoreError};
use crate::config::AppConfig;
use crate::domain::{
    NewRegistration, Page, Registration, RegistrationFilter, RegistrationId, TShirtSize,
};

/// PostgreSQL-backed registration store using `sqlx::PgPool`.
///
/// The pool is created once per process and connects lazily, so the
/// first request pays the connection cost and later requests reuse it.
/// A store built without `DATABASE_URL` answers every call with
/// [`StoreError::Unavailable`].
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: Option<PgPool>,
}

impl PostgresStore {
    /// Creates a store over an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool: Some(pool) }
    }

    /// Creates a store with no database behind it.
    #[must_use]
    pub fn unconfigured() -> Self {
        Self { pool: None }
    }

    /// Builds a lazily connecting pool from the database settings.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if `DATABASE_URL` cannot be
    /// parsed.
    pub fn connect_lazy(config: &AppConfig) -> Result<Self, StoreError> {
        let Some(url) = config.database_url.as_deref() else {
            tracing::warn!("DATABASE_URL is not set; registrations will fail with 503");
            return Ok(Self::unconfigured());
        };
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect_lazy(url)?;
        Ok(Self::new(pool))
    }

    /// Applies the embedded migrations.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the database is unreachable or a
    /// migration fails.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations")
            .run(self.pool()?)
            .await
            .map_err(|e| StoreError::Backend(format!("migration failed: {e}")))
    }

    fn pool(&self) -> Result<&PgPool, StoreError> {
        self.pool
            .as_ref()
            .ok_or_else(|| StoreError::Unavailable("DATABASE_URL is not configured".to_string()))
    }
}

#[async_trait]
impl RegistrationStore for PostgresStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Registration>, StoreError> {
        let sql =
            format!("SELECT {REGISTRATION_COLUMNS} FROM registrations WHERE email = $1 LIMIT 1");
        let row = sqlx::query_as::<_, RegistrationRow>(&sql)
            .bind(email)
            .fetch_optional(self.pool()?)
            .await?;
        row.map(Registration::try_from).transpose()
    }

    async fn insert_many(
        &self,
        records: Vec<NewRegistration>,
    ) -> Result<Vec<Registration>, StoreError> {
        let sql = format!(
            "INSERT INTO registrations (name, email, contact, gender, birthday, race_category, \
             affiliations, promotional, tshirt_size, team_id, team_member_index, created_at, \
             updated_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $12) \
             RETURNING {REGISTRATION_COLUMNS}"
        );
        let now = Utc::now();
        let mut tx = self.pool()?.begin().await?;
        let mut stored = Vec::with_capacity(records.len());

        for record in records {
            let row = sqlx::query_as::<_, RegistrationRow>(&sql)
                .bind(record.name)
                .bind(record.email)
                .bind(record.contact)
                .bind(record.gender)
                .bind(record.birthday)
                .bind(record.race_category.as_str())
                .bind(record.affiliations)
                .bind(record.promotional)
                .bind(record.tshirt_size.map(TShirtSize::as_str))
                .bind(record.team_id.map(|t| *t.as_uuid()))
                .bind(record.team_member_index.map(i16::from))
                .bind(now)
                .fetch_one(&mut *tx)
                .await?;
            stored.push(Registration::try_from(row)?);
        }

        tx.commit().await?;
        Ok(stored)
    }

    async fn list(
        &self,
        filter: &RegistrationFilter,
        page: Page,
    ) -> Result<ListPage, StoreError> {
        let pool = self.pool()?;

        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM registrations");
        push_filter(&mut count, filter);
        let total = count.build_query_scalar::<i64>().fetch_one(pool).await?;

        let mut query = QueryBuilder::<Postgres>::new(format!(
            "SELECT {REGISTRATION_COLUMNS} FROM registrations"
        ));
        push_filter(&mut query, filter);
        query
            .push(" ORDER BY created_at DESC, team_member_index ASC NULLS FIRST LIMIT ")
            .push_bind(i64::from(page.limit))
            .push(" OFFSET ")
            .push_bind(i64::try_from(page.offset()).unwrap_or(i64::MAX));
        let rows = query
            .build_query_as::<RegistrationRow>()
            .fetch_all(pool)
            .await?;

        let records = rows
            .into_iter()
            .map(Registration::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ListPage {
            records,
            total: u64::try_from(total).unwrap_or(0),
        })
    }

    async fn update_tshirt_size(
        &self,
        id: RegistrationId,
        size: Option<TShirtSize>,
    ) -> Result<Option<Registration>, StoreError> {
        let sql = format!(
            "UPDATE registrations SET tshirt_size = $1, updated_at = now() WHERE id = $2 \
             RETURNING {REGISTRATION_COLUMNS}"
        );
        let row = sqlx::query_as::<_, RegistrationRow>(&sql)
            .bind(size.map(TShirtSize::as_str))
            .bind(*id.as_uuid())
            .fetch_optional(self.pool()?)
            .await?;
        row.map(Registration::try_from).transpose()
    }

    async fn delete(&self, id: RegistrationId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM registrations WHERE id = $1")
            .bind(*id.as_uuid())
            .execute(self.pool()?)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Appends the `WHERE` clause for `filter` with bound parameters.
fn push_filter(query: &mut QueryBuilder<'_, Postgres>, filter: &RegistrationFilter) {
    query.push(" WHERE TRUE");
    if let Some(name) = &filter.name {
        query.push(" AND name ILIKE ").push_bind(like_pattern(name));
    }
    if let Some(email) = &filter.email {
        query.push(" AND email ILIKE ").push_bind(like_pattern(email));
    }
    if let Some(club) = &filter.club {
        query
            .push(" AND affiliations ILIKE ")
            .push_bind(like_pattern(club));
    }
    if let Some(gender) = &filter.gender {
        query.push(" AND gender = ").push_bind(gender.clone());
    }
    if let Some(category) = &filter.race_category {
        query.push(" AND race_category = ").push_bind(category.clone());
    }
    if let Some(from) = filter.created_from {
        query.push(" AND created_at >= ").push_bind(from);
    }
    if let Some(to) = filter.created_to {
        query.push(" AND created_at <= ").push_bind(to);
    }
}

/// Wraps `needle` in `%` after escaping `LIKE` wildcards, so the match
/// is a literal substring.
fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        let message = err.to_string();
        let unavailable = matches!(
            err,
            sqlx::Error::Configuration(_)
                | sqlx::Error::PoolTimedOut
                | sqlx::Error::PoolClosed
                | sqlx::Error::Io(_)
                | sqlx::Error::Tls(_)
        ) || message.contains("DATABASE_URL");

        if unavailable {
            Self::Unavailable(message)
        } else {
            Self::Backend(message)
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("ana"), "%ana%");
        assert_eq!(like_pattern("50%_off\\"), "%50\\%\\_off\\\\%");
    }

    #[test]
    fn connection_failures_are_unavailable() {
        assert!(matches!(
            StoreError::from(sqlx::Error::PoolTimedOut),
            StoreError::Unavailable(_)
        ));
        assert!(matches!(
            StoreError::from(sqlx::Error::RowNotFound),
            StoreError::Backend(_)
        ));
    }

    #[tokio::test]
    async fn unconfigured_store_is_unavailable() {
        let store = PostgresStore::unconfigured();
        assert!(matches!(
            store.find_by_email("a@x.com").await,
            Err(StoreError::Unavailable(_))
        ));
        assert!(matches!(
            store.delete(RegistrationId::new()).await,
            Err(StoreError::Unavailable(_))
        ));
    }

    #[test]
    fn missing_database_url_builds_unconfigured_store() {
        let Ok(config) = AppConfig::from_lookup(|_| None) else {
            panic!("empty environment should load");
        };
        let store = PostgresStore::connect_lazy(&config);
        assert!(matches!(store, Ok(PostgresStore { pool: None })));
    }
}
