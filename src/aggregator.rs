use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::client::FetchError;
use crate::config::FailurePolicy;
use crate::fallback::FallbackData;

/// Where a ready view's data came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    Live,
    /// Sample data stands in for a failed batch.
    Fallback { reason: String },
    /// The batch failed and no sample data was substituted.
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel<T> {
    pub data: T,
    pub origin: Origin,
}

impl<T> ViewModel<T> {
    pub fn is_live(&self) -> bool {
        self.origin == Origin::Live
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Ready(ViewModel<T>),
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        ViewState::Loading
    }
}

impl<T: FallbackData> ViewState<T> {
    /// Applies a settled batch. `Ready` is terminal, so a ready view ignores it.
    pub fn settle(self, outcome: Result<T, FetchError>, policy: FailurePolicy) -> Self {
        if let ViewState::Ready(_) = self {
            return self;
        }

        let view = match outcome {
            Ok(data) => ViewModel {
                data,
                origin: Origin::Live,
            },
            Err(err) => {
                let reason = err.to_string();
                match policy {
                    FailurePolicy::Fallback => {
                        warn!(error = %reason, "fetch batch failed, showing sample data");
                        ViewModel {
                            data: T::fallback(),
                            origin: Origin::Fallback { reason },
                        }
                    }
                    FailurePolicy::Surface => {
                        warn!(error = %reason, "fetch batch failed");
                        ViewModel {
                            data: T::default(),
                            origin: Origin::Failed { reason },
                        }
                    }
                }
            }
        };

        ViewState::Ready(view)
    }

    #[cfg(test)]
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn ready(&self) -> Option<&ViewModel<T>> {
        match self {
            ViewState::Ready(view) => Some(view),
            ViewState::Loading => None,
        }
    }

    pub fn into_ready(self) -> Option<ViewModel<T>> {
        match self {
            ViewState::Ready(view) => Some(view),
            ViewState::Loading => None,
        }
    }
}

/// Cancellation shared between a fetch batch and whoever owns the view.
#[derive(Debug, Clone)]
pub struct CancelToken {
    tx: Arc<watch::Sender<bool>>,
    rx: watch::Receiver<bool>,
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

impl CancelToken {
    pub fn new() -> Self {
        let (tx, rx) = watch::channel(false);
        Self {
            tx: Arc::new(tx),
            rx,
        }
    }

    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        // The sender lives as long as `self`, so this only returns once cancelled.
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }
}

/// Runs one fetch batch for a fresh view and settles it.
///
/// A cancelled batch commits nothing: the view stays `Loading` and the
/// in-flight requests are dropped.
pub async fn load_view<T, F>(
    label: &str,
    batch: F,
    cancel: &CancelToken,
    policy: FailurePolicy,
) -> ViewState<T>
where
    T: FallbackData,
    F: Future<Output = Result<T, FetchError>>,
{
    let state = ViewState::Loading;
    if cancel.is_cancelled() {
        return state;
    }

    info!(view = label, "loading view");
    let outcome = tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(FetchError::Cancelled),
        outcome = batch => outcome,
    };

    if matches!(outcome, Err(FetchError::Cancelled)) || cancel.is_cancelled() {
        debug!(view = label, "batch cancelled before commit");
        return state;
    }

    let state = state.settle(outcome, policy);
    if let Some(view) = state.ready() {
        info!(view = label, live = view.is_live(), "view ready");
    }
    state
}
