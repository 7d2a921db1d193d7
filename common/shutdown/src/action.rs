//! Uniform adapter over the recognized teardown callable shapes.
//!
//! Registering code picks the constructor matching the shape it has; the
//! coordinator only ever sees the single `run(budget)` contract.

use std::future::Future;
use std::time::Duration;

use anyhow::anyhow;
use futures::future::BoxFuture;
use tokio_util::sync::CancellationToken;

use crate::error::TeardownError;

type CancellableFn =
    Box<dyn FnOnce(CancellationToken) -> BoxFuture<'static, anyhow::Result<()>> + Send>;
type SimpleFn = Box<dyn FnOnce() -> BoxFuture<'static, anyhow::Result<()>> + Send>;

enum Shape {
    /// Observes a cancellation token; the token fires when the budget elapses.
    Cancellable(CancellableFn),
    /// Ignores cancellation; can only be abandoned when the budget elapses.
    Simple(SimpleFn),
    /// Bridge code could not produce a recognized shape. Never spawned.
    Unsupported,
}

/// A teardown callable normalized to one cancellable contract.
///
/// The four recognized shapes each get a constructor; infallible shapes are
/// wrapped so everything runs as `anyhow::Result<()>` internally.
pub struct TeardownAction {
    shape: Shape,
}

impl TeardownAction {
    /// Shape: takes a cancellation token, returns a result.
    pub fn cancellable<F, Fut>(f: F) -> Self
    where
        F: FnOnce(CancellationToken) -> Fut + Send + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        Self {
            shape: Shape::Cancellable(Box::new(move |token| Box::pin(f(token)))),
        }
    }

    /// Shape: takes a cancellation token, returns nothing.
    pub fn cancellable_infallible<F, Fut>(f: F) -> Self
    where
        F: FnOnce(CancellationToken) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self {
            shape: Shape::Cancellable(Box::new(move |token| {
                Box::pin(async move {
                    f(token).await;
                    Ok(())
                })
            })),
        }
    }

    /// Shape: takes no token, returns a result.
    pub fn fallible<F, Fut>(f: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        Self {
            shape: Shape::Simple(Box::new(move || Box::pin(f()))),
        }
    }

    /// Shape: takes no token, returns nothing.
    pub fn infallible<F, Fut>(f: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self {
            shape: Shape::Simple(Box::new(move || {
                Box::pin(async move {
                    f().await;
                    Ok(())
                })
            })),
        }
    }

    /// Escape hatch for registration paths that bridge type-erased callables
    /// and cannot produce one of the recognized shapes. Running it yields
    /// [`TeardownError::UnsupportedShape`] without spawning a worker.
    pub fn unsupported() -> Self {
        Self {
            shape: Shape::Unsupported,
        }
    }

    /// Run the action on a detached worker task, racing completion against
    /// `budget`. On timeout the token handed to cancellable shapes is
    /// cancelled and the worker is abandoned; it is not forcibly stopped.
    pub(crate) async fn run(self, budget: Duration) -> Result<(), TeardownError> {
        let token = CancellationToken::new();
        let fut = match self.shape {
            Shape::Unsupported => return Err(TeardownError::UnsupportedShape),
            Shape::Cancellable(f) => f(token.clone()),
            Shape::Simple(f) => f(),
        };

        let worker = tokio::spawn(fut);
        match tokio::time::timeout(budget, worker).await {
            Ok(Ok(result)) => result.map_err(TeardownError::Failed),
            Ok(Err(join_err)) => Err(TeardownError::Failed(anyhow!(
                "teardown worker panicked: {join_err}"
            ))),
            Err(_) => {
                token.cancel();
                Err(TeardownError::TimedOut { budget })
            }
        }
    }
}
