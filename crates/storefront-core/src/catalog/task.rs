use tokio::sync::watch;
use tracing::debug;

use super::{load_catalog, CatalogSource, CatalogState};

/// A single catalog load running on the tokio runtime.
///
/// The state starts as [`CatalogState::Loading`] and moves exactly once to
/// `Loaded` or `Failed`. There is no cancellation and no retry.
#[derive(Debug)]
pub struct CatalogTask {
    rx: watch::Receiver<CatalogState>,
}

impl CatalogTask {
    /// Start loading from `source`. Must be called within a tokio runtime.
    pub fn spawn<C>(source: C) -> Self
    where
        C: CatalogSource + Send + Sync + 'static,
    {
        let (tx, rx) = watch::channel(CatalogState::Loading);
        tokio::spawn(async move {
            let state = load_catalog(&source).await;
            if tx.send(state).is_err() {
                debug!("catalog loaded with no observers left");
            }
        });
        Self { rx }
    }

    /// Current state without waiting.
    pub fn state(&self) -> CatalogState {
        self.rx.borrow().clone()
    }

    /// A receiver that observes the transition out of `Loading`.
    pub fn subscribe(&self) -> watch::Receiver<CatalogState> {
        self.rx.clone()
    }

    /// Wait for the load to finish.
    pub async fn finished(mut self) -> CatalogState {
        let result = self
            .rx
            .wait_for(|state| !state.is_loading())
            .await
            .map(|state| state.clone());
        match result {
            Ok(state) => state,
            // sender dropped without a result: the task panicked
            Err(_) => CatalogState::Failed("catalog task ended without a result".to_string()),
        }
    }
}
