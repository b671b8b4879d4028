//! Trigger-side coordinator for harvest runs.

use crate::harvest::harvest;
use crate::node::{Node, NodeTree};
use crate::submit::{SubmitError, SubmitOutcome, Submitter};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{info, instrument};

/// Drives one harvest trigger end to end: resolve the target forms,
/// harvest each, and hand each result to the submitter.
///
/// A single-permit semaphore serializes runs, so one trigger completes
/// before the next of the same kind is processed. The harvest itself is
/// synchronous and read-only; only the submission path awaits.
pub struct HarvestExecutor {
    semaphore: Arc<Semaphore>,
}

impl HarvestExecutor {
    pub fn new() -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(1)),
        }
    }

    /// Harvests and submits the form named by `form_id`, or every form in
    /// the tree when `form_id` is `None`, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::FormNotFound`] when an explicit id does not
    /// resolve, and propagates any submitter failure. Harvesting itself
    /// cannot fail.
    #[instrument(skip(self, tree, submitter))]
    pub async fn run<T, S>(
        &self,
        tree: &T,
        submitter: &S,
        form_id: Option<&str>,
    ) -> Result<Vec<SubmitOutcome>, SubmitError>
    where
        T: NodeTree,
        S: Submitter,
    {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|e| SubmitError::Interrupted(e.to_string()))?;

        let forms: Vec<&Node> = match form_id {
            Some(id) => vec![tree
                .form(id)
                .ok_or_else(|| SubmitError::FormNotFound(id.to_string()))?],
            None => tree.forms().iter().collect(),
        };

        info!(forms = forms.len(), "starting harvest run");

        let mut outcomes = Vec::with_capacity(forms.len());
        for form in forms {
            let data = harvest(form);
            let outcome = submitter.submit(form, &data).await?;
            outcomes.push(outcome);
        }

        info!(submitted = outcomes.len(), "harvest run finished");
        Ok(outcomes)
    }
}

impl Default for HarvestExecutor {
    fn default() -> Self {
        Self::new()
    }
}
