//! The polling loop that waits for services to become externally available.

use tokio::time::{Instant, sleep};

use crate::config::WaitConfig;
use crate::error::{Error, Result};
use crate::k8s::{KubeSnapshotProvider, SnapshotProvider, take_snapshot};
use crate::model::NamespaceScope;
use crate::resolver::{NameMatchResolver, Resolver};
use crate::state::CompletionState;

/// Waits until every configured service is externally available.
///
/// A Kubernetes client is created from the default configuration for the
/// duration of the call and dropped on every return path.
///
/// # Errors
///
/// - [`Error::InvalidArgument`] if the configuration is invalid
/// - [`Error::Timeout`] if the time budget runs out first
/// - [`Error::Client`] if the cluster cannot be reached or read
pub async fn wait(config: WaitConfig) -> Result<()> {
    config.validate()?;

    let provider = KubeSnapshotProvider::try_default().await?;
    wait_with(&config, &provider, &NameMatchResolver::default()).await
}

/// Waits using the given snapshot provider and resolver.
///
/// Polling is strictly sequential: take a snapshot, resolve, merge, sleep.
/// The budget is checked at the top of every iteration. Any provider error
/// ends the wait.
///
/// # Errors
///
/// Same as [`wait`].
pub async fn wait_with<P, R>(config: &WaitConfig, provider: &P, resolver: &R) -> Result<()>
where
    P: SnapshotProvider + ?Sized,
    R: Resolver + ?Sized,
{
    config.validate()?;

    let start = Instant::now();
    let scope = config.scope();
    let mut state = CompletionState::new(config.service_names.iter().map(String::as_str));

    tracing::info!("initial status: {state}");

    loop {
        let elapsed = start.elapsed();
        if elapsed >= config.timeout {
            tracing::warn!("timed out after {elapsed:?}, status: {state}");
            return Err(Error::Timeout {
                timeout: config.timeout,
                state,
            });
        }

        poll_once(&mut state, &scope, provider, resolver)
            .await
            .map_err(|e| {
                tracing::error!("cluster access failed: {e}, status: {state}");
                e.with_state(&state)
            })?;

        if state.is_complete() {
            tracing::info!("final status: {state}");
            return Ok(());
        }

        let remaining = config.timeout.saturating_sub(start.elapsed());
        sleep(config.poll_interval.min(remaining)).await;
    }
}

/// Runs one iteration against a fresh snapshot and merges the result.
async fn poll_once<P, R>(
    state: &mut CompletionState,
    scope: &NamespaceScope,
    provider: &P,
    resolver: &R,
) -> Result<()>
where
    P: SnapshotProvider + ?Sized,
    R: Resolver + ?Sized,
{
    let unsatisfied = state.unsatisfied();
    if unsatisfied.is_empty() {
        return Ok(());
    }

    let snapshot = take_snapshot(provider, scope).await?;

    for name in resolver.resolve(&unsatisfied, &snapshot) {
        if state.mark_satisfied(&name) {
            tracing::debug!("{name} is externally available");
        }
    }

    tracing::info!("status: {state}");
    Ok(())
}
