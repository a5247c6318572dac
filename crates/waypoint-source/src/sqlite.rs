// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! SQLite row source.
//!
//! Table and column names here are the external contract with whatever
//! job materializes the event logs into SQLite. Timestamps are stored as
//! RFC 3339 text.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::instrument;

use waypoint_core::{
	IdentityMapping, InteractionRow, LinkCreationRow, PageViewRow, PurchaseRow, ScreenViewRow,
};

use crate::error::{Result, SourceError};
use crate::RowSource;

/// Reads the six input tables from a SQLite database.
#[derive(Clone)]
pub struct SqliteRowSource {
	pool: SqlitePool,
}

impl SqliteRowSource {
	#[must_use]
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// Connect to a SQLite database by URL (e.g. `sqlite:./journey.db`).
	pub async fn connect(url: &str) -> Result<Self> {
		let pool = SqlitePool::connect(url).await?;
		Ok(Self::new(pool))
	}
}

fn parse_ts(field: &str, value: &str) -> Result<DateTime<Utc>> {
	DateTime::parse_from_rfc3339(value)
		.map(|dt| dt.with_timezone(&Utc))
		.map_err(|e| SourceError::InvalidData(format!("invalid {field}: {e}")))
}

#[derive(sqlx::FromRow)]
struct EventRecord {
	name: String,
	timestamp: String,
	anonymous_id: String,
	session_id: Option<String>,
	user_id: Option<String>,
	email: Option<String>,
	referral_link: Option<String>,
	resource_id: Option<String>,
}

#[derive(sqlx::FromRow)]
struct PurchaseRecord {
	id: String,
	timestamp: String,
	session_id: Option<String>,
	anonymous_id: Option<String>,
	user_id: Option<String>,
	email: Option<String>,
	resource_id: Option<String>,
	resource_type: String,
}

impl TryFrom<PurchaseRecord> for PurchaseRow {
	type Error = SourceError;

	fn try_from(row: PurchaseRecord) -> Result<Self> {
		Ok(PurchaseRow {
			timestamp: parse_ts("timestamp", &row.timestamp)?,
			id: row.id,
			session_id: row.session_id,
			anonymous_id: row.anonymous_id,
			user_id: row.user_id,
			email: row.email,
			resource_id: row.resource_id,
			resource_type: row.resource_type,
		})
	}
}

#[derive(sqlx::FromRow)]
struct IdentityRecord {
	anonymous_id: String,
	user_id: String,
	email: Option<String>,
}

#[derive(sqlx::FromRow)]
struct LinkCreationRecord {
	link_token: String,
	creator_anonymous_id: Option<String>,
	creator_user_id: Option<String>,
	creator_email: Option<String>,
	created_at: String,
}

impl TryFrom<LinkCreationRecord> for LinkCreationRow {
	type Error = SourceError;

	fn try_from(row: LinkCreationRecord) -> Result<Self> {
		Ok(LinkCreationRow {
			created_at: parse_ts("created_at", &row.created_at)?,
			link_token: row.link_token,
			creator_anonymous_id: row.creator_anonymous_id,
			creator_user_id: row.creator_user_id,
			creator_email: row.creator_email,
		})
	}
}

#[async_trait]
impl RowSource for SqliteRowSource {
	#[instrument(skip(self))]
	async fn page_views(&self) -> Result<Vec<PageViewRow>> {
		let records: Vec<EventRecord> = sqlx::query_as(
			r#"
			SELECT page_path AS name, timestamp, anonymous_id, session_id,
			       user_id, email, referral_link, resource_id
			FROM page_views
			"#,
		)
		.fetch_all(&self.pool)
		.await?;

		records
			.into_iter()
			.map(|r| {
				Ok(PageViewRow {
					timestamp: parse_ts("timestamp", &r.timestamp)?,
					page_path: r.name,
					anonymous_id: r.anonymous_id,
					session_id: r.session_id,
					user_id: r.user_id,
					email: r.email,
					referral_link: r.referral_link,
					resource_id: r.resource_id,
				})
			})
			.collect()
	}

	#[instrument(skip(self))]
	async fn screen_views(&self) -> Result<Vec<ScreenViewRow>> {
		let records: Vec<EventRecord> = sqlx::query_as(
			r#"
			SELECT screen_name AS name, timestamp, anonymous_id, session_id,
			       user_id, email, referral_link, resource_id
			FROM screen_views
			"#,
		)
		.fetch_all(&self.pool)
		.await?;

		records
			.into_iter()
			.map(|r| {
				Ok(ScreenViewRow {
					timestamp: parse_ts("timestamp", &r.timestamp)?,
					screen_name: r.name,
					anonymous_id: r.anonymous_id,
					session_id: r.session_id,
					user_id: r.user_id,
					email: r.email,
					referral_link: r.referral_link,
					resource_id: r.resource_id,
				})
			})
			.collect()
	}

	#[instrument(skip(self))]
	async fn interactions(&self) -> Result<Vec<InteractionRow>> {
		let records: Vec<EventRecord> = sqlx::query_as(
			r#"
			SELECT interaction_code AS name, timestamp, anonymous_id, session_id,
			       user_id, email, referral_link, resource_id
			FROM interactions
			"#,
		)
		.fetch_all(&self.pool)
		.await?;

		records
			.into_iter()
			.map(|r| {
				Ok(InteractionRow {
					timestamp: parse_ts("timestamp", &r.timestamp)?,
					interaction_code: r.name,
					anonymous_id: r.anonymous_id,
					session_id: r.session_id,
					user_id: r.user_id,
					email: r.email,
					referral_link: r.referral_link,
					resource_id: r.resource_id,
				})
			})
			.collect()
	}

	#[instrument(skip(self))]
	async fn purchases(&self) -> Result<Vec<PurchaseRow>> {
		let records: Vec<PurchaseRecord> = sqlx::query_as(
			r#"
			SELECT id, timestamp, session_id, anonymous_id,
			       user_id, email, resource_id, resource_type
			FROM purchases
			"#,
		)
		.fetch_all(&self.pool)
		.await?;

		records.into_iter().map(PurchaseRow::try_from).collect()
	}

	#[instrument(skip(self))]
	async fn identity_mappings(&self) -> Result<Vec<IdentityMapping>> {
		let records: Vec<IdentityRecord> = sqlx::query_as(
			"SELECT anonymous_id, user_id, email FROM identity_mappings",
		)
		.fetch_all(&self.pool)
		.await?;

		Ok(records
			.into_iter()
			.map(|r| IdentityMapping {
				anonymous_id: r.anonymous_id,
				user_id: r.user_id,
				email: r.email,
			})
			.collect())
	}

	#[instrument(skip(self))]
	async fn link_creations(&self) -> Result<Vec<LinkCreationRow>> {
		let records: Vec<LinkCreationRecord> = sqlx::query_as(
			r#"
			SELECT link_token, creator_anonymous_id, creator_user_id,
			       creator_email, created_at
			FROM link_creations
			"#,
		)
		.fetch_all(&self.pool)
		.await?;

		records.into_iter().map(LinkCreationRow::try_from).collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const EVENT_COLUMNS: &str = r#"
		timestamp TEXT NOT NULL,
		anonymous_id TEXT NOT NULL,
		session_id TEXT,
		user_id TEXT,
		email TEXT,
		referral_link TEXT,
		resource_id TEXT
	"#;

	async fn test_pool() -> SqlitePool {
		// A single connection keeps the in-memory database alive and shared.
		let pool = sqlx::sqlite::SqlitePoolOptions::new()
			.max_connections(1)
			.connect("sqlite::memory:")
			.await
			.unwrap();
		let statements = [
			format!("CREATE TABLE page_views (page_path TEXT NOT NULL, {EVENT_COLUMNS})"),
			format!("CREATE TABLE screen_views (screen_name TEXT NOT NULL, {EVENT_COLUMNS})"),
			format!("CREATE TABLE interactions (interaction_code TEXT NOT NULL, {EVENT_COLUMNS})"),
			"CREATE TABLE purchases (
				id TEXT PRIMARY KEY,
				timestamp TEXT NOT NULL,
				session_id TEXT,
				anonymous_id TEXT,
				user_id TEXT,
				email TEXT,
				resource_id TEXT,
				resource_type TEXT NOT NULL
			)"
			.to_string(),
			"CREATE TABLE identity_mappings (
				anonymous_id TEXT PRIMARY KEY,
				user_id TEXT NOT NULL,
				email TEXT
			)"
			.to_string(),
			"CREATE TABLE link_creations (
				link_token TEXT PRIMARY KEY,
				creator_anonymous_id TEXT,
				creator_user_id TEXT,
				creator_email TEXT,
				created_at TEXT NOT NULL
			)"
			.to_string(),
		];
		for stmt in statements {
			sqlx::query(&stmt).execute(&pool).await.unwrap();
		}
		pool
	}

	#[tokio::test]
	async fn test_page_views_roundtrip() {
		let pool = test_pool().await;
		sqlx::query(
			"INSERT INTO page_views (page_path, timestamp, anonymous_id, session_id)
			 VALUES (?, ?, ?, ?)",
		)
		.bind("/onboarding/intro")
		.bind("2026-03-01T10:00:00+00:00")
		.bind("anon-1")
		.bind("s-1")
		.execute(&pool)
		.await
		.unwrap();

		let source = SqliteRowSource::new(pool);
		let rows = source.page_views().await.unwrap();
		assert_eq!(rows.len(), 1);
		assert_eq!(rows[0].page_path, "/onboarding/intro");
		assert_eq!(rows[0].session_id.as_deref(), Some("s-1"));
		assert_eq!(rows[0].timestamp.to_rfc3339(), "2026-03-01T10:00:00+00:00");
	}

	#[tokio::test]
	async fn test_invalid_timestamp_aborts() {
		let pool = test_pool().await;
		sqlx::query(
			"INSERT INTO purchases (id, timestamp, resource_type) VALUES (?, ?, ?)",
		)
		.bind("p-1")
		.bind("yesterday")
		.bind("experience")
		.execute(&pool)
		.await
		.unwrap();

		let source = SqliteRowSource::new(pool);
		let err = source.purchases().await.unwrap_err();
		assert!(matches!(err, SourceError::InvalidData(_)));
	}

	#[tokio::test]
	async fn test_empty_tables() {
		let source = SqliteRowSource::new(test_pool().await);
		let tables = crate::fetch_tables(&source).await.unwrap();
		assert_eq!(tables.event_count(), 0);
		assert!(tables.purchases.is_empty());
	}
}
