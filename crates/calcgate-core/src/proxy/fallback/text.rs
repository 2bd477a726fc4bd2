use std::sync::Arc;

use calcgate_types::models::TextProviderConfig;
use calcgate_types::protocol::{TextGenerationRequest, TextGenerationResponse};

use crate::error::{GatewayError, GatewayResult};
use crate::proxy::retry::FailureClassifier;
use crate::proxy::upstream::{CompletionRequest, TextCompletion};

const MAX_TOKENS_CEILING: u32 = 8192;

/// Candidate models for one logical request.
///
/// Search mode replaces the chain with `[primary, fallback]`. Otherwise the
/// requested model (if any) goes first, followed by the chain, keeping the
/// first occurrence of each id.
pub fn build_candidates(
    requested: Option<&str>,
    chain: &[String],
    search: bool,
    search_models: &[String; 2],
) -> Vec<String> {
    if search {
        return search_models.to_vec();
    }

    let requested = requested.map(str::trim).filter(|m| !m.is_empty());
    let mut candidates: Vec<String> = Vec::with_capacity(chain.len() + 1);
    for model in requested.into_iter().chain(chain.iter().map(String::as_str)) {
        if !candidates.iter().any(|c| c == model) {
            candidates.push(model.to_string());
        }
    }
    candidates
}

/// Sequential fallback across text-completion models.
pub struct TextFallback {
    provider: Arc<dyn TextCompletion>,
    classifier: Arc<dyn FailureClassifier>,
    chain: Vec<String>,
    search_models: [String; 2],
    default_max_tokens: u32,
    default_temperature: f32,
}

impl TextFallback {
    pub fn new(
        provider: Arc<dyn TextCompletion>,
        classifier: Arc<dyn FailureClassifier>,
        config: &TextProviderConfig,
    ) -> Self {
        Self {
            provider,
            classifier,
            chain: config.models.clone(),
            search_models: [config.search_model.clone(), config.search_fallback_model.clone()],
            default_max_tokens: config.default_max_tokens,
            default_temperature: config.default_temperature,
        }
    }

    pub fn ensure_configured(&self) -> GatewayResult<()> {
        if self.provider.is_configured() {
            Ok(())
        } else {
            Err(GatewayError::MissingCredential("Text generation API key"))
        }
    }

    pub async fn generate(
        &self,
        request: &TextGenerationRequest,
        trace_id: &str,
    ) -> GatewayResult<TextGenerationResponse> {
        if let Err(err) = self.ensure_configured() {
            tracing::error!("[{}] Text provider API key is not configured", trace_id);
            return Err(err);
        }

        let messages = request.normalized_turns();
        if messages.is_empty() {
            return Err(GatewayError::BadRequest(
                "Request must include a non-empty 'messages' array or 'prompt'".to_string(),
            ));
        }

        let options = request.options.clone().unwrap_or_default();
        let search = request.search_enabled();
        let candidates =
            build_candidates(options.model.as_deref(), &self.chain, search, &self.search_models);

        let mut call = CompletionRequest {
            model: String::new(),
            messages,
            max_tokens: options
                .max_tokens
                .unwrap_or(self.default_max_tokens)
                .clamp(1, MAX_TOKENS_CEILING),
            temperature: options
                .temperature
                .filter(|t| t.is_finite())
                .unwrap_or(self.default_temperature)
                .clamp(0.0, 2.0),
        };

        tracing::info!(
            "[{}] Text request: turns={}, search={}, candidates={:?}",
            trace_id,
            call.messages.len(),
            search,
            candidates
        );

        let mut last_error: Option<String> = None;
        for (attempt, model) in candidates.iter().enumerate() {
            call.model.clone_from(model);
            match self.provider.complete(&call).await {
                Ok(content) => {
                    if attempt > 0 {
                        tracing::info!(
                            "[{}] Served by fallback model {} after {} failed attempt(s)",
                            trace_id,
                            model,
                            attempt
                        );
                    } else {
                        tracing::info!("[{}] Served by {}", trace_id, model);
                    }
                    return Ok(TextGenerationResponse { content, model: model.clone() });
                },
                Err(failure) => {
                    let classification =
                        self.classifier.classify(failure.status, &failure.message, search);
                    if !classification.should_try_next() {
                        tracing::warn!(
                            "[{}] Terminal failure from {}: {}",
                            trace_id,
                            model,
                            failure
                        );
                        return Err(GatewayError::Upstream {
                            status: failure.status,
                            message: failure.message,
                            model: Some(model.clone()),
                        });
                    }
                    tracing::warn!(
                        "[{}] {:?} from {} ({}/{}): {}",
                        trace_id,
                        classification,
                        model,
                        attempt + 1,
                        candidates.len(),
                        failure
                    );
                    last_error = Some(failure.message);
                },
            }
        }

        let message = match last_error {
            Some(err) => format!("All text models are currently unavailable. Last error: {}", err),
            None => "No text models are configured".to_string(),
        };
        tracing::error!("[{}] {}", trace_id, message);
        Err(GatewayError::Exhausted { message })
    }
}
