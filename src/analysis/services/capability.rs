//! Paper analysis capability backed by a completion client.

use crate::agent::{
    domain::{CapabilityError, ExecutionContext},
    ports::{Capability, CapabilityOutput, CapabilityResult},
};
use crate::analysis::{
    domain::{AnalysisError, AnalysisKind, AnalysisOutput, AnalysisRequest},
    ports::{CompletionClient, CompletionRequest},
    prompt::{SYSTEM_PROMPT, render_prompt},
    schema::output_schema,
};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Context preference that overrides the client's default model.
pub const MODEL_PREFERENCE: &str = "model";

const CODE_FENCE: &str = "```";

/// Capability producing one [`AnalysisOutput`] per request.
///
/// Each call renders the kind's prompt, requests one completion and
/// decodes it. Completions that are not valid JSON for the requested kind
/// fail with a transient error, so a retrying executor asks again. That
/// error still carries the tokens the rejected completion consumed.
pub struct PaperAnalysisCapability<C: ?Sized> {
    client: Arc<C>,
}

impl<C> PaperAnalysisCapability<C>
where
    C: CompletionClient + ?Sized,
{
    /// Identifier reported in execution metadata when the client does not
    /// name a model.
    pub const CAPABILITY_ID: &'static str = "paper_analysis";

    /// Creates a capability that sends prompts to `client`.
    #[must_use]
    pub const fn new(client: Arc<C>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<C> Capability for PaperAnalysisCapability<C>
where
    C: CompletionClient + ?Sized,
{
    type Input = AnalysisRequest;
    type Output = AnalysisOutput;

    fn capability_id(&self) -> &str {
        Self::CAPABILITY_ID
    }

    async fn call(
        &self,
        input: &AnalysisRequest,
        context: Option<&ExecutionContext>,
    ) -> CapabilityResult<AnalysisOutput> {
        let prompt = render_prompt(input)?;
        let mut request = CompletionRequest::new(SYSTEM_PROMPT, prompt);
        if let Some(model) = context
            .and_then(|ctx| ctx.preference(MODEL_PREFERENCE))
            .and_then(Value::as_str)
        {
            request = request.with_model(model);
        }

        debug!(kind = %input.kind, title = %input.paper.title, "requesting paper analysis");
        let completion = self.client.complete(&request).await?;
        let output = parse_completion(input.kind, completion.text()).map_err(|error| {
            let mut failure = CapabilityError::from(error);
            if let Some(tokens) = completion.tokens_used() {
                failure = failure.with_tokens_used(tokens);
            }
            failure
        })?;

        let mut result = CapabilityOutput::new(output);
        if let Some(tokens) = completion.tokens_used() {
            result = result.with_tokens_used(tokens);
        }
        if let Some(model) = completion.model() {
            result = result.with_model(model);
        }
        Ok(result)
    }
}

/// Decodes completion `text` into the output for `kind`.
///
/// The JSON object is located with [`strip_code_fences`] and must satisfy
/// [`output_schema`] for `kind`.
///
/// # Errors
///
/// Returns [`AnalysisError::MalformedCompletion`] when the text is not JSON,
/// violates the output schema, or does not decode into the kind's type.
pub fn parse_completion(kind: AnalysisKind, text: &str) -> Result<AnalysisOutput, AnalysisError> {
    let malformed = |error: serde_json::Error| AnalysisError::MalformedCompletion(error.to_string());

    let value: Value = serde_json::from_str(strip_code_fences(text)).map_err(malformed)?;
    let report = output_schema(kind).validate_value(&value);
    if !report.is_valid() {
        return Err(AnalysisError::MalformedCompletion(report.summary()));
    }

    let decoded = match kind {
        AnalysisKind::Summary => serde_json::from_value(value).map(AnalysisOutput::Summary),
        AnalysisKind::QualityScore => {
            serde_json::from_value(value).map(AnalysisOutput::QualityScore)
        }
        AnalysisKind::GapAnalysis => serde_json::from_value(value).map(AnalysisOutput::GapAnalysis),
    };
    decoded.map_err(malformed)
}

/// Extracts the JSON object from a completion.
///
/// A Markdown code fence is unwrapped first, dropping a language tag on the
/// opening line (`` ```json `` or `` ``` json ``) and anything after the
/// closing fence. The result is then narrowed to the span from the first
/// `{` to the last `}`, which also discards prose around an unfenced
/// object. Text without braces is returned trimmed.
#[must_use]
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let body = fenced_block(trimmed).unwrap_or(trimmed);
    object_span(body).unwrap_or(body)
}

fn fenced_block(text: &str) -> Option<&str> {
    let (_, opened) = text.split_once(CODE_FENCE)?;
    let block = opened
        .split_once(CODE_FENCE)
        .map_or(opened, |(inner, _)| inner);
    let body = match block.split_once('\n') {
        Some((tag, rest)) if is_language_tag(tag) => rest,
        _ => block,
    };
    Some(body.trim())
}

fn is_language_tag(line: &str) -> bool {
    line.trim()
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+'))
}

fn object_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}').filter(|&close| close > start)?;
    text.get(start..=end)
}
