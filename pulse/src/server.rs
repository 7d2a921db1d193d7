use std::sync::Arc;

use anyhow::{anyhow, Context};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use common_database::{get_pool, health_check};
use common_redis::{Client, RedisClient};
use shutdown::{ShutdownRegistry, TeardownAction};

use crate::config::Config;
use crate::health::HealthChecker;
use crate::router::router;

/// Construct the service's dependencies, register their teardowns in
/// acquisition order (so shutdown releases them in reverse), and spawn the
/// HTTP server. Returns once everything is up; the caller then blocks in
/// [`shutdown::wait_for_exit`].
pub async fn start(config: Config, registry: Arc<ShutdownRegistry>) -> anyhow::Result<()> {
    let pool = get_pool(&config.database_url, config.max_pg_connections)
        .await
        .context("failed to create postgres pool")?;
    {
        let pool = pool.clone();
        registry.defer(
            "postgres-pool",
            TeardownAction::infallible(move || async move {
                pool.close().await;
            }),
        );
    }

    let redis_client = Arc::new(
        RedisClient::new(config.redis_url.clone())
            .await
            .context("failed to create redis client")?,
    );
    {
        // The multiplexed connection closes when its last handle drops; this
        // teardown releases the handle held for the registry.
        let redis_client = redis_client.clone();
        registry.defer(
            "redis",
            TeardownAction::infallible(move || async move {
                drop(redis_client);
            }),
        );
    }

    let checker = {
        let pool = pool.clone();
        let redis = redis_client.clone();
        HealthChecker::new()
            .register("postgres", move || {
                let pool = pool.clone();
                async move { health_check(&pool).await.map_err(Into::into) }
            })
            .register("cache", move || {
                let redis = redis.clone();
                async move { redis.ping().await.map_err(Into::into) }
            })
    };

    let listener = TcpListener::bind(config.address)
        .await
        .context("could not bind port")?;
    tracing::info!("listening on {:?}", listener.local_addr()?);

    let app = router(Arc::new(checker), config.export_prometheus);
    let server_token = CancellationToken::new();
    let graceful = server_token.clone().cancelled_owned();
    let server_task = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app.into_make_service())
            .with_graceful_shutdown(graceful)
            .await
        {
            tracing::error!(error = %e, "http server exited with error");
        }
    });

    // Registered last so it runs first: stop accepting traffic and wait for
    // in-flight requests before the data stores go away.
    registry.defer(
        "http-server",
        TeardownAction::cancellable(move |cancel| async move {
            server_token.cancel();
            tokio::select! {
                res = server_task => res.map_err(|e| anyhow!("http server task failed: {e}")),
                _ = cancel.cancelled() => Err(anyhow!("gave up waiting for in-flight requests")),
            }
        }),
    );

    Ok(())
}
