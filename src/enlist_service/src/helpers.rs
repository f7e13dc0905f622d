use enlist_adapters::config::{PostgresSettings, RedisSettings};
use redis::{Client, RedisResult};
use secrecy::ExposeSecret;
use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::ServiceError;

/// Configure and return a PostgreSQL connection pool
///
/// Creates the pool and runs all pending migrations.
pub async fn configure_postgresql(settings: &PostgresSettings) -> Result<PgPool, ServiceError> {
    let pg_pool = get_postgres_pool(settings.url.expose_secret(), settings.max_connections).await?;

    sqlx::migrate!("./migrations").run(&pg_pool).await?;

    Ok(pg_pool)
}

/// Configure and return a Redis connection
pub fn configure_redis(settings: &RedisSettings) -> Result<redis::Connection, ServiceError> {
    let connection = get_redis_client(&settings.connection_url()?)?.get_connection()?;
    Ok(connection)
}

/// Create a PostgreSQL connection pool
///
/// # Arguments
/// * `url` - Database connection URL
/// * `max_connections` - Upper bound of the pool size
pub async fn get_postgres_pool(url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(url)
        .await
}

/// Create a Redis client
///
/// # Arguments
/// * `redis_url` - Full `redis://` connection URL
pub fn get_redis_client(redis_url: &str) -> RedisResult<Client> {
    redis::Client::open(redis_url)
}
