//! Bounded-concurrency batch execution
//!
//! One round of the crawl fans a task out over every frontier member. The
//! pool runs those tasks concurrently up to a configured width, collects
//! results as they complete, and always drains fully before returning. A
//! failed task is logged and dropped; it never aborts or cancels its
//! siblings.

use futures::stream::{self, StreamExt};
use std::fmt::Display;
use std::future::Future;

/// Runs `task` over every target with bounded concurrency
///
/// Results are collected in completion order, which is unrelated to input
/// order; callers must merge them with an order-insensitive operation.
/// Failures are logged at WARN and omitted from the output.
///
/// # Arguments
///
/// * `targets` - The batch of task inputs
/// * `width` - Maximum number of tasks in flight at once
/// * `task` - The fallible async task run per target
pub async fn run_batch<I, T, E, F, Fut>(targets: I, width: usize, task: F) -> Vec<T>
where
    I: IntoIterator<Item = String>,
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    stream::iter(targets.into_iter().map(|target| {
        let work = task(target.clone());
        async move { (target, work.await) }
    }))
    .buffer_unordered(width.max(1))
    .filter_map(|(target, result)| async move {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                tracing::warn!("Task for {} failed: {}", target, error);
                None
            }
        }
    })
    .collect()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_all_tasks_complete() {
        let targets: Vec<String> = (0..20).map(|i| format!("t{}", i)).collect();
        let results = run_batch(targets, 4, |target| async move {
            Ok::<_, String>(target.len())
        })
        .await;
        assert_eq!(results.len(), 20);
    }

    #[tokio::test]
    async fn test_failures_dropped_without_aborting_batch() {
        let targets: Vec<String> = (0..10).map(|i| i.to_string()).collect();
        let results = run_batch(targets, 3, |target| async move {
            let n: usize = target.parse().unwrap();
            if n % 2 == 0 {
                Ok(n)
            } else {
                Err("odd target".to_string())
            }
        })
        .await;

        let mut evens = results.clone();
        evens.sort_unstable();
        assert_eq!(evens, vec![0, 2, 4, 6, 8]);
    }

    #[tokio::test]
    async fn test_batch_drains_before_returning() {
        let finished = Arc::new(AtomicUsize::new(0));
        let targets: Vec<String> = (0..8).map(|i| i.to_string()).collect();

        let counter = Arc::clone(&finished);
        let results = run_batch(targets, 2, move |target| {
            let counter = Arc::clone(&counter);
            async move {
                // Stagger completion so later tasks outlive earlier ones
                let n: u64 = target.parse().unwrap();
                tokio::time::sleep(Duration::from_millis(8 - n)).await;
                counter.fetch_add(1, Ordering::SeqCst);
                Ok::<_, String>(target)
            }
        })
        .await;

        assert_eq!(results.len(), 8);
        assert_eq!(finished.load(Ordering::SeqCst), 8);
    }

    #[tokio::test]
    async fn test_zero_width_still_runs() {
        let results = run_batch(vec!["a".to_string()], 0, |target| async move {
            Ok::<_, String>(target)
        })
        .await;
        assert_eq!(results, vec!["a".to_string()]);
    }
}
