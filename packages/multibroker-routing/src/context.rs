//! Scoped, task-local routing key.
//!
//! The active routing key is per-execution-context state, never a shared
//! global: each task or thread observes only the key it set itself. Scopes
//! nest, and the immediately-enclosing key is restored on every exit path,
//! including panics and error propagation.

use std::future::Future;

tokio::task_local! {
    /// Active routing key for the current task or call chain.
    static ACTIVE_KEY: String;
}

/// Scopes the active routing key to a unit of work.
///
/// Call sites pick a broker per operation without threading a parameter
/// through every intermediate call:
///
/// ```
/// use multibroker_routing::RoutingContext;
///
/// let key = RoutingContext::with_key("connection-a", || {
///     // everything in here routes to `connection-a`
///     RoutingContext::active_key()
/// });
/// assert_eq!(key.as_deref(), Some("connection-a"));
/// assert!(RoutingContext::active_key().is_none());
/// ```
pub struct RoutingContext;

impl RoutingContext {
    /// Runs `body` with the active routing key set to `key`.
    ///
    /// Scopes nest: an inner `with_key` shadows the outer key for exactly its
    /// own duration and the enclosing key is restored afterwards, even if
    /// `body` panics.
    pub fn with_key<K, F, R>(key: K, body: F) -> R
    where
        K: Into<String>,
        F: FnOnce() -> R,
    {
        ACTIVE_KEY.sync_scope(key.into(), body)
    }

    /// Runs `fut` with the active routing key set to `key`.
    ///
    /// The async counterpart of [`RoutingContext::with_key`]: the key follows
    /// the future across `.await` points and worker threads.
    pub async fn scope<K, F>(key: K, fut: F) -> F::Output
    where
        K: Into<String>,
        F: Future,
    {
        ACTIVE_KEY.scope(key.into(), fut).await
    }

    /// The routing key active in the current scope, if any.
    ///
    /// Yields `None` outside any `with_key`/`scope`, which drives the routing
    /// connection factory to the default broker.
    #[must_use]
    pub fn active_key() -> Option<String> {
        ACTIVE_KEY.try_with(Clone::clone).ok()
    }
}

#[cfg(test)]
mod tests {
    use std::panic::AssertUnwindSafe;

    use super::*;

    #[test]
    fn no_scope_yields_none() {
        assert!(RoutingContext::active_key().is_none());
    }

    #[test]
    fn key_is_visible_inside_scope_only() {
        let seen = RoutingContext::with_key("connection-a", RoutingContext::active_key);
        assert_eq!(seen.as_deref(), Some("connection-a"));
        assert!(RoutingContext::active_key().is_none());
    }

    #[test]
    fn nested_scope_restores_enclosing_key() {
        RoutingContext::with_key("outer", || {
            let inner = RoutingContext::with_key("inner", RoutingContext::active_key);
            assert_eq!(inner.as_deref(), Some("inner"));
            assert_eq!(RoutingContext::active_key().as_deref(), Some("outer"));
        });
        assert!(RoutingContext::active_key().is_none());
    }

    #[test]
    fn key_is_restored_when_body_panics() {
        let result = std::panic::catch_unwind(AssertUnwindSafe(|| {
            RoutingContext::with_key("doomed", || panic!("boom"));
        }));
        assert!(result.is_err());
        assert!(RoutingContext::active_key().is_none());
    }

    #[test]
    fn sibling_threads_never_observe_each_others_key() {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                std::thread::spawn(move || {
                    let key = format!("broker-{i}");
                    RoutingContext::with_key(key.clone(), || {
                        for _ in 0..1_000 {
                            assert_eq!(RoutingContext::active_key().as_deref(), Some(key.as_str()));
                        }
                    });
                    assert!(RoutingContext::active_key().is_none());
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn key_follows_future_across_await_points() {
        let seen = RoutingContext::scope("connection-a", async {
            tokio::task::yield_now().await;
            let first = RoutingContext::active_key();
            tokio::task::yield_now().await;
            (first, RoutingContext::active_key())
        })
        .await;
        assert_eq!(seen.0.as_deref(), Some("connection-a"));
        assert_eq!(seen.1.as_deref(), Some("connection-a"));
        assert!(RoutingContext::active_key().is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_scopes_are_isolated_under_stress() {
        use rand::Rng;

        let mut rng = rand::rng();
        let mut tasks = Vec::new();
        for _ in 0..64 {
            let key = format!("broker-{}", rng.random_range(0..1_000_000u32));
            tasks.push(tokio::spawn(RoutingContext::scope(key.clone(), async move {
                for _ in 0..50 {
                    assert_eq!(
                        RoutingContext::active_key().as_deref(),
                        Some(key.as_str()),
                        "task observed a sibling's routing key"
                    );
                    tokio::task::yield_now().await;
                }
            })));
        }
        for task in tasks {
            task.await.unwrap();
        }
    }
}
