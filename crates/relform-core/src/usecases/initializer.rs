//! Sequential async initialization
//!
//! Runs an ordered list of setup steps strictly one at a time. A step starts
//! only after the previous one has completed, so later steps can rely on the
//! side effects of earlier ones. Readiness is published through a
//! [`tokio::sync::watch`] channel:
//!
//! - `Loading` while the sequence runs
//! - `Ready` once every step has completed (immediately for an empty list)
//! - `Failed { step }` when a step fails; later steps never run

use std::future::Future;

use futures_util::future::BoxFuture;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, warn};

/// One unit of asynchronous setup work
pub type InitStep = Box<dyn FnOnce() -> BoxFuture<'static, anyhow::Result<()>> + Send>;

/// Boxes an async closure as an [`InitStep`]
pub fn init_step<F, Fut>(step: F) -> InitStep
where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    Box::new(move || Box::pin(step()))
}

/// Readiness of the view being initialized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// Setup still running
    Loading,
    /// All steps completed
    Ready,
    /// The step at this index failed
    Failed {
        /// Zero-based index of the failing step
        step: usize,
    },
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}

/// Error returned when a setup step fails
#[derive(Debug, Error)]
pub enum InitError {
    #[error("Initialization step {index} failed: {source:#}")]
    StepFailed {
        /// Zero-based index of the failing step
        index: usize,
        /// Error returned by the step
        source: anyhow::Error,
    },
}

impl InitError {
    pub fn step(&self) -> usize {
        match self {
            InitError::StepFailed { index, .. } => *index,
        }
    }
}

/// Runs setup steps in order and tracks readiness
pub struct SequentialInitializer {
    state: watch::Sender<LoadState>,
}

impl Default for SequentialInitializer {
    fn default() -> Self {
        Self::new()
    }
}

impl SequentialInitializer {
    /// Creates an initializer in the `Loading` state
    pub fn new() -> Self {
        let (state, _) = watch::channel(LoadState::Loading);
        Self { state }
    }

    /// Current readiness
    pub fn state(&self) -> LoadState {
        *self.state.borrow()
    }

    pub fn is_loading(&self) -> bool {
        self.state().is_loading()
    }

    /// Receiver that observes every readiness change
    pub fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.state.subscribe()
    }

    /// Awaits each step in order; stops at the first failure
    pub async fn run_sequence(&self, steps: Vec<InitStep>) -> Result<(), InitError> {
        self.state.send_replace(LoadState::Loading);
        let total = steps.len();

        for (index, step) in steps.into_iter().enumerate() {
            debug!(step = index, total, "Running initialization step");
            if let Err(source) = step().await {
                warn!(step = index, total, error = %source, "Initialization step failed");
                self.state.send_replace(LoadState::Failed { step: index });
                return Err(InitError::StepFailed { index, source });
            }
        }

        debug!(total, "Initialization complete");
        self.state.send_replace(LoadState::Ready);
        Ok(())
    }
}
