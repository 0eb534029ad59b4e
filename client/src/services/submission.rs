//! Maps and transmits finished submissions

use shared::{StocktakePayload, Submission, SubmissionMapper, TransferPayload};
use std::sync::Arc;

use crate::error::ClientResult;
use crate::external::ScriptTransport;

/// One POST per submission, no retries, result reported as a boolean
#[derive(Clone)]
pub struct SubmissionService {
    transport: Arc<dyn ScriptTransport>,
    mapper: SubmissionMapper,
}

impl SubmissionService {
    pub fn new(transport: Arc<dyn ScriptTransport>, mapper: SubmissionMapper) -> Self {
        Self { transport, mapper }
    }

    pub fn mapper(&self) -> SubmissionMapper {
        self.mapper
    }

    /// True when the endpoint accepted the request. Errors are logged, never raised.
    pub async fn submit(&self, submission: &Submission) -> bool {
        tracing::info!(
            kind = %submission.kind(),
            staff = submission.staff_name(),
            items = submission.items().len(),
            "Submitting"
        );

        match self.try_submit(submission).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(code = e.code(), "Submission failed: {}", e);
                false
            }
        }
    }

    pub async fn submit_stocktake(&self, payload: StocktakePayload) -> bool {
        self.submit(&Submission::Stocktake(payload)).await
    }

    pub async fn submit_transfer(&self, payload: TransferPayload) -> bool {
        self.submit(&Submission::Transfer(payload)).await
    }

    async fn try_submit(&self, submission: &Submission) -> ClientResult<()> {
        let body = self.mapper.encode(submission)?;
        self.transport.post_text(body).await
    }
}
