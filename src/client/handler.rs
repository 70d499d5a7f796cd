// src/client/handler.rs
//! Submit handler: one form submission, one request, one render

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, Instrument};

use super::error::SubmitError;
use super::service_client::AnalyzeBackend;
use super::targets::ResultTargets;
use crate::types::{AnalysisResult, FormSnapshot};

/// Terminal state of a submission.
#[derive(Debug)]
pub enum Settled {
    /// The response was validated and written to the targets.
    Rendered(AnalysisResult),
    /// The request or response failed; targets are untouched.
    Failed(SubmitError),
    /// A newer submission started before this one settled.
    Superseded,
    /// Cancelled through [`SubmitHandler::cancel`].
    Cancelled,
}

impl Settled {
    pub fn is_rendered(&self) -> bool {
        matches!(self, Settled::Rendered(_))
    }
}

#[derive(Default)]
struct InFlight {
    generation: u64,
    token: Option<CancellationToken>,
}

/// Bridges form submissions to rendered results.
///
/// Every submission runs as its own task. Starting a submission cancels the
/// one still pending, and a response is only rendered if its submission is
/// still the latest, so the targets always reflect the newest submission.
pub struct SubmitHandler<B: AnalyzeBackend> {
    backend: Arc<B>,
    targets: Arc<ResultTargets>,
    in_flight: Arc<Mutex<InFlight>>,
}

impl<B: AnalyzeBackend> Clone for SubmitHandler<B> {
    fn clone(&self) -> Self {
        Self {
            backend: self.backend.clone(),
            targets: self.targets.clone(),
            in_flight: self.in_flight.clone(),
        }
    }
}

/// Handle to a pending submission. Dropping it does not cancel the request.
pub struct Submission {
    generation: u64,
    task: JoinHandle<Settled>,
}

impl Submission {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Wait for the submission to settle.
    pub async fn settled(self) -> Settled {
        match self.task.await {
            Ok(settled) => settled,
            Err(e) => {
                error!(generation = self.generation, "Submission task failed: {}", e);
                Settled::Failed(SubmitError::Aborted(e.to_string()))
            }
        }
    }
}

fn lock(in_flight: &Mutex<InFlight>) -> MutexGuard<'_, InFlight> {
    in_flight.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<B: AnalyzeBackend> SubmitHandler<B> {
    pub fn new(backend: B, targets: ResultTargets) -> Self {
        Self {
            backend: Arc::new(backend),
            targets: Arc::new(targets),
            in_flight: Arc::new(Mutex::new(InFlight::default())),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn targets(&self) -> &ResultTargets {
        &self.targets
    }

    /// Start a submission. Must be called from within a tokio runtime.
    pub fn submit(&self, snapshot: FormSnapshot) -> Submission {
        let token = CancellationToken::new();
        let generation = {
            let mut in_flight = lock(&self.in_flight);
            if let Some(previous) = in_flight.token.replace(token.clone()) {
                previous.cancel();
            }
            in_flight.generation += 1;
            in_flight.generation
        };

        let span = tracing::info_span!("submission", generation);
        debug!(parent: &span, fields = snapshot.len(), "Submission pending");

        let backend = self.backend.clone();
        let targets = self.targets.clone();
        let in_flight = self.in_flight.clone();

        let task = tokio::spawn(
            async move {
                let response = tokio::select! {
                    _ = token.cancelled() => None,
                    response = backend.analyze(&snapshot) => Some(response),
                };

                let mut state = lock(&in_flight);
                if state.generation != generation {
                    debug!("Discarding result of superseded submission");
                    return Settled::Superseded;
                }
                state.token = None;

                match response {
                    None => {
                        info!("Submission cancelled");
                        Settled::Cancelled
                    }
                    Some(Ok(result)) => {
                        targets.render(&result);
                        info!(
                            "Rendered analysis: {}% match",
                            result.match_percentage
                        );
                        Settled::Rendered(result)
                    }
                    Some(Err(e)) => {
                        error!("Submission failed: {}", e);
                        Settled::Failed(e)
                    }
                }
            }
            .instrument(span),
        );

        Submission { generation, task }
    }

    /// Cancel the pending submission, if any. Its targets are left unchanged.
    pub fn cancel(&self) {
        if let Some(token) = lock(&self.in_flight).token.take() {
            token.cancel();
        }
    }
}
