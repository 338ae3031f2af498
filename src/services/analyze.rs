// Analysis Service
// One submission end to end: access gate, input check, detector call, render

use serde_json::Value;
use thiserror::Error;
use tracing::{info, info_span, warn, Instrument};

use crate::models::Analysis;
use super::detector_client::{reply_from_value, DetectionReply, DetectorClient, DetectorError};
use super::render::{render_document, RenderOptions};
use super::session::{AccessPolicy, Session};

pub const SIGN_IN_MESSAGE: &str = "Please sign in to use this app.";
pub const EMPTY_INPUT_MESSAGE: &str = "Please enter some text to analyze.";
pub const EMPTY_RESULT_MESSAGE: &str = "Error in processing the request. Please try again.";

#[derive(Error, Debug)]
pub enum AnalyzeError {
    #[error("{msg}", msg = SIGN_IN_MESSAGE)]
    SignInRequired,
    #[error("{msg}", msg = EMPTY_INPUT_MESSAGE)]
    EmptyInput,
    #[error("{msg}", msg = EMPTY_RESULT_MESSAGE)]
    EmptyResult,
    #[error("Detection request failed: {0}")]
    Upstream(#[from] DetectorError),
}

impl AnalyzeError {
    /// Warnings are user mistakes rather than failures.
    pub fn is_warning(&self) -> bool {
        matches!(self, AnalyzeError::EmptyInput)
    }
}

/// Who is asking, checked against the access policy before any network call.
#[derive(Debug, Clone, Copy)]
pub struct Access<'a> {
    pub policy: AccessPolicy,
    pub session: Option<&'a Session>,
}

impl<'a> Access<'a> {
    pub fn open() -> Self {
        Self {
            policy: AccessPolicy::Open,
            session: None,
        }
    }

    fn check(&self, now: chrono::DateTime<chrono::Utc>) -> Result<(), AnalyzeError> {
        match (self.policy, self.session) {
            (AccessPolicy::Open, _) => Ok(()),
            (AccessPolicy::SignInRequired, Some(s)) if s.is_live(now) => Ok(()),
            (AccessPolicy::SignInRequired, _) => Err(AnalyzeError::SignInRequired),
        }
    }
}

pub async fn analyze_text(
    client: &DetectorClient,
    text: &str,
    access: Access<'_>,
    options: &RenderOptions,
) -> Result<Analysis, AnalyzeError> {
    let request_id = uuid::Uuid::new_v4().to_string();
    let span = info_span!("analyze", request_id = %request_id);
    submit(client, text, access, options, request_id)
        .instrument(span)
        .await
}

async fn submit(
    client: &DetectorClient,
    text: &str,
    access: Access<'_>,
    options: &RenderOptions,
    request_id: String,
) -> Result<Analysis, AnalyzeError> {
    access.check(chrono::Utc::now())?;

    if text.trim().is_empty() {
        warn!("analyze.empty_input");
        return Err(AnalyzeError::EmptyInput);
    }

    info!(
        chars = text.chars().count(),
        signed_in = access.session.is_some(),
        endpoint = %client.endpoint(),
        "analyze.start"
    );
    let reply = client.analyze(text).await?;
    finish(request_id, reply, options)
}

/// Render an already-fetched API response, e.g. one saved to disk.
pub fn render_response(response: &Value, options: &RenderOptions) -> Result<Analysis, AnalyzeError> {
    let request_id = uuid::Uuid::new_v4().to_string();
    finish(request_id, reply_from_value(response), options)
}

fn finish(
    request_id: String,
    reply: DetectionReply,
    options: &RenderOptions,
) -> Result<Analysis, AnalyzeError> {
    let document = match reply {
        DetectionReply::Document(document) => document,
        DetectionReply::Empty => {
            warn!(request_id = %request_id, "analyze.empty_result");
            return Err(AnalyzeError::EmptyResult);
        }
    };

    let outcome = render_document(&document, options);
    info!(request_id = %request_id, fallback = outcome.is_fallback(), "analyze.done");

    Ok(Analysis {
        request_id,
        created_at: chrono::Local::now().to_rfc3339(),
        outcome,
    })
}
