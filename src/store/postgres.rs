//! PostgreSQL deed store

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use uuid::Uuid;

use super::{DeedStore, StoreError};
use crate::deed::models::{Deed, NewDeed};

pub struct PgDeedStore {
    pool: PgPool,
}

impl PgDeedStore {
    /// Open the connection pool and apply pending migrations.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(900))
            .max_lifetime(Duration::from_secs(1800))
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        log::info!("Connected to PostgreSQL (max {} connections)", max_connections);

        Ok(Self::from_pool(pool))
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DeedStore for PgDeedStore {
    async fn create(&self, deed: NewDeed) -> Result<Deed, StoreError> {
        if self.pool.is_closed() {
            return Err(StoreError::Unavailable("connection pool is closed".to_string()));
        }

        let record = sqlx::query_as::<_, Deed>(
            r#"
            INSERT INTO deeds (id, full_name, father_name, property_size, sale_amount, sale_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, full_name, father_name, property_size, sale_amount, sale_date, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&deed.full_name)
        .bind(&deed.father_name)
        .bind(deed.property_size)
        .bind(deed.sale_amount)
        .bind(deed.sale_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    async fn close(&self) {
        self.pool.close().await;
        log::info!("PostgreSQL pool closed");
    }
}
