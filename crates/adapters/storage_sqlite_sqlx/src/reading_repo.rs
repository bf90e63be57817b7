//! `SQLite` implementation of [`ReadingRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use airhub_app::ports::storage::ReadingRepository;
use airhub_domain::device::DeviceId;
use airhub_domain::error::AirHubError;
use airhub_domain::reading::{Reading, ReadingId};

use crate::error::StorageError;

/// Wrapper for converting database rows into domain types without polluting
/// domain structs with database concerns.
struct Wrapper(Reading);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: uuid::Uuid = row.try_get("id")?;
        let device_id: i64 = row.try_get("device_id")?;
        let temperature: f64 = row.try_get("temperature")?;
        let pressure: f64 = row.try_get("pressure")?;
        let humidity: f64 = row.try_get("humidity")?;
        let recorded_at_str: String = row.try_get("recorded_at")?;

        let device_id = u16::try_from(device_id)
            .map(DeviceId::from_raw)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let recorded_at = chrono::DateTime::parse_from_rfc3339(&recorded_at_str)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?
            .to_utc();

        Ok(Self(Reading {
            id: ReadingId::from_uuid(id),
            device_id,
            temperature,
            pressure,
            humidity,
            recorded_at,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO readings (id, device_id, temperature, pressure, humidity, recorded_at)
    VALUES (?, ?, ?, ?, ?, ?)
";

const SELECT_BY_DEVICE: &str = r"
    SELECT * FROM readings
    WHERE device_id = ?
    ORDER BY recorded_at ASC
";

const SELECT_RECENT: &str = r"
    SELECT * FROM readings
    WHERE device_id = ?
    ORDER BY recorded_at DESC
    LIMIT ?
";

const SELECT_LATEST: &str = r"
    SELECT * FROM readings
    WHERE device_id = ?
    ORDER BY recorded_at DESC
    LIMIT 1
";

// Bare columns with MAX() follow SQLite's aggregate row selection: the
// non-aggregate columns come from the row that carries the maximum.
const SELECT_LATEST_PER_DEVICE: &str = r"
    SELECT id, device_id, temperature, pressure, humidity, MAX(recorded_at) AS recorded_at
    FROM readings
    GROUP BY device_id
    ORDER BY device_id ASC
";

const DELETE_BY_DEVICE: &str = "DELETE FROM readings WHERE device_id = ?";

/// `SQLite`-backed reading repository.
pub struct SqliteReadingRepository {
    pool: SqlitePool,
}

impl SqliteReadingRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl ReadingRepository for SqliteReadingRepository {
    async fn insert(&self, reading: Reading) -> Result<Reading, AirHubError> {
        sqlx::query(INSERT)
            .bind(reading.id.as_uuid())
            .bind(i64::from(reading.device_id.as_u16()))
            .bind(reading.temperature)
            .bind(reading.pressure)
            .bind(reading.humidity)
            .bind(reading.recorded_at.to_rfc3339())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(reading)
    }

    async fn find_by_device(&self, device_id: DeviceId) -> Result<Vec<Reading>, AirHubError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_DEVICE)
            .bind(i64::from(device_id.as_u16()))
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn find_recent(
        &self,
        device_id: DeviceId,
        limit: usize,
    ) -> Result<Vec<Reading>, AirHubError> {
        let limit_i64 = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_RECENT)
            .bind(i64::from(device_id.as_u16()))
            .bind(limit_i64)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn find_latest(&self, device_id: DeviceId) -> Result<Option<Reading>, AirHubError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_LATEST)
            .bind(i64::from(device_id.as_u16()))
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(row.map(|w| w.0))
    }

    async fn find_latest_per_device(&self) -> Result<Vec<Reading>, AirHubError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_LATEST_PER_DEVICE)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn delete_by_device(&self, device_id: DeviceId) -> Result<u64, AirHubError> {
        let result = sqlx::query(DELETE_BY_DEVICE)
            .bind(i64::from(device_id.as_u16()))
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Config;
    use airhub_domain::time::{Timestamp, now};
    use chrono::Duration;

    async fn setup() -> SqliteReadingRepository {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        SqliteReadingRepository::new(db.pool().clone())
    }

    fn test_reading(device: u16, recorded_at: Timestamp) -> Reading {
        Reading::builder()
            .device_id(DeviceId::from_raw(device))
            .temperature(21.5)
            .pressure(1013.0)
            .humidity(40.0)
            .recorded_at(recorded_at)
            .build()
    }

    #[tokio::test]
    async fn should_insert_and_retrieve_reading_when_valid() {
        let repo = setup().await;
        let reading = test_reading(3, now());
        let id = reading.id;

        let inserted = repo.insert(reading).await.unwrap();
        assert_eq!(inserted.id, id);

        let found = repo.find_by_device(DeviceId::from_raw(3)).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, id);
        assert_eq!(found[0].device_id, DeviceId::from_raw(3));
        assert_eq!(found[0].temperature, 21.5);
        assert_eq!(found[0].pressure, 1013.0);
        assert_eq!(found[0].humidity, 40.0);
    }

    #[tokio::test]
    async fn should_order_readings_by_recorded_at_ascending() {
        let repo = setup().await;
        let base = now();

        let first = test_reading(0, base);
        let second = test_reading(0, base + Duration::hours(1));
        let third = test_reading(0, base + Duration::hours(2));

        repo.insert(second.clone()).await.unwrap();
        repo.insert(first.clone()).await.unwrap();
        repo.insert(third.clone()).await.unwrap();

        let found = repo.find_by_device(DeviceId::from_raw(0)).await.unwrap();
        assert_eq!(found.len(), 3);
        assert_eq!(found[0].id, first.id);
        assert_eq!(found[1].id, second.id);
        assert_eq!(found[2].id, third.id);
    }

    #[tokio::test]
    async fn should_return_recent_readings_newest_first_with_limit() {
        let repo = setup().await;
        let base = now();

        for i in 0..5 {
            repo.insert(test_reading(1, base + Duration::hours(i)))
                .await
                .unwrap();
        }

        let found = repo.find_recent(DeviceId::from_raw(1), 3).await.unwrap();
        assert_eq!(found.len(), 3);
        assert_eq!(found[0].recorded_at, base + Duration::hours(4));
        assert_eq!(found[1].recorded_at, base + Duration::hours(3));
        assert_eq!(found[2].recorded_at, base + Duration::hours(2));
    }

    #[tokio::test]
    async fn should_return_latest_reading_for_device() {
        let repo = setup().await;
        let base = now();

        repo.insert(test_reading(2, base)).await.unwrap();
        let newest = test_reading(2, base + Duration::minutes(30));
        repo.insert(newest.clone()).await.unwrap();

        let found = repo.find_latest(DeviceId::from_raw(2)).await.unwrap();
        assert_eq!(found.unwrap().id, newest.id);
    }

    #[tokio::test]
    async fn should_return_none_when_device_has_no_readings() {
        let repo = setup().await;
        let found = repo.find_latest(DeviceId::from_raw(4)).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn should_return_one_newest_reading_per_device() {
        let repo = setup().await;
        let base = now();

        repo.insert(test_reading(0, base)).await.unwrap();
        let newest0 = test_reading(0, base + Duration::hours(1));
        repo.insert(newest0.clone()).await.unwrap();
        let only1 = test_reading(1, base);
        repo.insert(only1.clone()).await.unwrap();

        let found = repo.find_latest_per_device().await.unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].device_id, DeviceId::from_raw(0));
        assert_eq!(found[0].id, newest0.id);
        assert_eq!(found[1].device_id, DeviceId::from_raw(1));
        assert_eq!(found[1].id, only1.id);
    }

    #[tokio::test]
    async fn should_delete_only_readings_of_given_device() {
        let repo = setup().await;
        let base = now();

        repo.insert(test_reading(0, base)).await.unwrap();
        repo.insert(test_reading(0, base + Duration::minutes(1)))
            .await
            .unwrap();
        repo.insert(test_reading(1, base)).await.unwrap();

        let deleted = repo.delete_by_device(DeviceId::from_raw(0)).await.unwrap();
        assert_eq!(deleted, 2);

        assert!(
            repo.find_by_device(DeviceId::from_raw(0))
                .await
                .unwrap()
                .is_empty()
        );
        assert_eq!(
            repo.find_by_device(DeviceId::from_raw(1))
                .await
                .unwrap()
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn should_report_zero_when_deleting_device_without_readings() {
        let repo = setup().await;
        let deleted = repo.delete_by_device(DeviceId::from_raw(9)).await.unwrap();
        assert_eq!(deleted, 0);
    }

    #[tokio::test]
    async fn should_preserve_measurements_through_roundtrip() {
        let repo = setup().await;
        let reading = Reading::builder()
            .device_id(DeviceId::from_raw(5))
            .temperature(-7.25)
            .pressure(987.125)
            .humidity(82.5)
            .recorded_at(now())
            .build();

        repo.insert(reading.clone()).await.unwrap();

        let found = repo.find_by_device(DeviceId::from_raw(5)).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].temperature, -7.25);
        assert_eq!(found[0].pressure, 987.125);
        assert_eq!(found[0].humidity, 82.5);
    }
}
