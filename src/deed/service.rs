//! Submission pipeline: validate, persist, render, generate.

use chrono::NaiveDate;
use std::fmt;
use thiserror::Error;

use super::models::{CreateDeedRequest, Deed};
use super::validation::ValidationErrors;
use crate::document::{deed_context, load_template, render_template, RenderError, TemplateError};
use crate::store::StoreError;
use crate::AppState;

/// Progress of one submission through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionStage {
    Received,
    Validated,
    Persisted,
    Rendered,
    Generated,
    Responded,
}

impl fmt::Display for SubmissionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SubmissionStage::Received => "received",
            SubmissionStage::Validated => "validated",
            SubmissionStage::Persisted => "persisted",
            SubmissionStage::Rendered => "rendered",
            SubmissionStage::Generated => "generated",
            SubmissionStage::Responded => "responded",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum DeedError {
    #[error("Missing: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("validation failed: {0}")]
    Invalid(ValidationErrors),
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error("failed to save deed: {0}")]
    Storage(#[from] StoreError),
    #[error("failed to generate PDF: {0}")]
    Render(#[from] RenderError),
}

impl DeedError {
    /// Failure kind reported to clients.
    pub fn kind(&self) -> &'static str {
        match self {
            DeedError::MissingFields(_) | DeedError::Invalid(_) => "BadRequest",
            DeedError::Template(TemplateError::NotFound(_)) => "TemplateNotFound",
            DeedError::Template(_) => "TemplateFailure",
            DeedError::Storage(_) => "StorageFailure",
            DeedError::Render(e) if e.is_timeout() => "RenderTimeout",
            DeedError::Render(_) => "RenderFailure",
        }
    }

    pub fn is_client_error(&self) -> bool {
        matches!(self, DeedError::MissingFields(_) | DeedError::Invalid(_))
    }
}

/// A stored deed together with its generated document.
#[derive(Debug)]
pub struct GeneratedDeed {
    pub record: Deed,
    pub pdf: Vec<u8>,
}

/// Run one submission through every stage.
///
/// A missing `date` defaults to `today` before validation. The record is
/// persisted before the document is generated, so a generation failure leaves
/// a stored record without a document; its id is logged for follow-up.
pub async fn process_submission(
    state: &AppState,
    request: CreateDeedRequest,
    today: NaiveDate,
) -> Result<GeneratedDeed, DeedError> {
    let mut stage = SubmissionStage::Received;
    let result = run_stages(state, request, today, &mut stage).await;

    match &result {
        Ok(deed) => log::info!(
            "Deed {} generated ({} bytes)",
            deed.record.id,
            deed.pdf.len()
        ),
        Err(e) if e.is_client_error() => log::info!("Deed submission rejected: {}", e),
        Err(e) => log::error!("Deed submission failed after stage '{}': {}", stage, e),
    }

    result
}

async fn run_stages(
    state: &AppState,
    mut request: CreateDeedRequest,
    today: NaiveDate,
    stage: &mut SubmissionStage,
) -> Result<GeneratedDeed, DeedError> {
    let missing = request.missing_fields();
    if !missing.is_empty() {
        return Err(DeedError::MissingFields(missing));
    }

    if request.date.as_deref().map_or(true, |d| d.trim().is_empty()) {
        request.date = Some(today.format("%Y-%m-%d").to_string());
    }

    let new_deed = request.validate(today).map_err(DeedError::Invalid)?;
    advance(stage, SubmissionStage::Validated);

    let record = state.store.create(new_deed).await?;
    advance(stage, SubmissionStage::Persisted);

    let template = load_template(&state.template_path).await.map_err(|e| {
        log::error!("Deed {} stored but template unavailable", record.id);
        e
    })?;
    let html = render_template(&template, &deed_context(&record));
    advance(stage, SubmissionStage::Rendered);

    let pdf = state.renderer.render_pdf(&html).await.map_err(|e| {
        log::error!("Deed {} stored but PDF generation failed", record.id);
        e
    })?;
    advance(stage, SubmissionStage::Generated);

    Ok(GeneratedDeed { record, pdf })
}

fn advance(stage: &mut SubmissionStage, next: SubmissionStage) {
    log::debug!("Deed submission {} -> {}", stage, next);
    *stage = next;
}
