use futures::future::{BoxFuture, FutureExt, LocalBoxFuture};
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Finishes when an external asynchronous operation settles.
///
/// The operation is driven by the host (its own executor, a platform
/// callback...), never by `poll`. Settling flips a shared flag, which is the
/// only state touched outside of the simulation thread. A failed operation is
/// logged and counts as finished: the scheduler has no failure outcome, and an
/// unobserved failure must not leave game logic waiting forever.
#[derive(Debug, Clone)]
pub struct PromiseTask {
    resolved: Arc<AtomicBool>,
}

/// Settles a [`PromiseTask`] from outside the polling cycle.
#[derive(Debug, Clone)]
pub struct PromiseSettler {
    resolved: Arc<AtomicBool>,
}

impl PromiseTask {
    /// Wraps `operation`. The returned driver must be spawned on the host executor;
    /// it settles the task once `operation` completes.
    pub fn wrap<F, T, E>(operation: F) -> (Self, BoxFuture<'static, ()>)
    where
        F: Future<Output = Result<T, E>> + Send + 'static,
        T: 'static,
        E: fmt::Display + 'static,
    {
        let (task, settler) = Self::pending();
        let driver = async move { settler.settle(operation.await) }.boxed();
        (task, driver)
    }

    /// Same as [`PromiseTask::wrap`] for operations bound to the current thread.
    pub fn wrap_local<F, T, E>(operation: F) -> (Self, LocalBoxFuture<'static, ()>)
    where
        F: Future<Output = Result<T, E>> + 'static,
        T: 'static,
        E: fmt::Display + 'static,
    {
        let (task, settler) = Self::pending();
        let driver = async move { settler.settle(operation.await) }.boxed_local();
        (task, driver)
    }

    /// A task settled by hand through the returned [`PromiseSettler`].
    pub fn pending() -> (Self, PromiseSettler) {
        let resolved = Arc::new(AtomicBool::new(false));
        let settler = PromiseSettler {
            resolved: resolved.clone(),
        };
        (Self { resolved }, settler)
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved.load(Ordering::Acquire)
    }

    pub fn poll(&self) -> bool {
        self.is_resolved()
    }
}

impl PromiseSettler {
    pub fn settle<T, E: fmt::Display>(&self, outcome: Result<T, E>) {
        match outcome {
            Ok(_) => self.settle_ok(),
            Err(err) => self.settle_err(err),
        }
    }

    pub fn settle_ok(&self) {
        self.mark_resolved();
    }

    pub fn settle_err(&self, err: impl fmt::Display) {
        tracing::error!("Unhandled error in an asynchronous operation, resuming anyway: {}", err);
        self.mark_resolved();
    }

    pub fn is_settled(&self) -> bool {
        self.resolved.load(Ordering::Acquire)
    }

    fn mark_resolved(&self) {
        if self.resolved.swap(true, Ordering::AcqRel) {
            tracing::debug!("Asynchronous operation settled more than once, ignoring");
        }
    }
}
