//! Thin Redis client wrapper: connection setup and a deadline-bounded health
//! check. The service only depends on the cache being reachable; richer
//! command surface lives with the callers that need it.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

const PING_TIMEOUT: Duration = Duration::from_secs(1);

#[derive(Error, Debug)]
pub enum CustomRedisError {
    #[error("Timeout error")]
    Timeout,
    #[error(transparent)]
    Redis(#[from] redis::RedisError),
}

#[async_trait]
pub trait Client {
    /// PING the server under a short deadline; `Ok(())` means reachable.
    async fn ping(&self) -> Result<(), CustomRedisError>;
}

pub struct RedisClient {
    connection: redis::aio::MultiplexedConnection,
}

impl RedisClient {
    pub async fn new(addr: String) -> Result<RedisClient, CustomRedisError> {
        let client = redis::Client::open(addr)?;
        let connection = client.get_multiplexed_async_connection().await?;
        Ok(RedisClient { connection })
    }
}

#[async_trait]
impl Client for RedisClient {
    async fn ping(&self) -> Result<(), CustomRedisError> {
        let mut connection = self.connection.clone();
        let reply = tokio::time::timeout(
            PING_TIMEOUT,
            redis::cmd("PING").query_async::<String>(&mut connection),
        )
        .await
        .map_err(|_| CustomRedisError::Timeout)?;

        reply?;
        Ok(())
    }
}
