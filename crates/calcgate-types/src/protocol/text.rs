//! Text-generation request/response types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One normalized conversation turn.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatTurn {
    pub role: String,
    pub content: String,
}

impl ChatTurn {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self { role: role.into(), content: content.into() }
    }
}

/// Caller-supplied generation options. Missing values fall back to config defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOptions {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub max_tokens: Option<u32>,
    #[serde(default)]
    pub temperature: Option<f32>,
}

/// Body of `POST /api/generate-text`.
///
/// `messages` is kept as raw JSON so that malformed turns, or a `messages`
/// value that is not an array at all, are dropped instead of failing the
/// whole request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TextGenerationRequest {
    #[serde(default)]
    pub messages: Option<Value>,
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub system_prompt: Option<String>,
    #[serde(default)]
    pub search: Option<bool>,
    #[serde(default)]
    pub options: Option<GenerationOptions>,
}

impl TextGenerationRequest {
    pub fn search_enabled(&self) -> bool {
        self.search.unwrap_or(false)
    }

    /// Normalize the request into a turn list.
    ///
    /// Turns without a string role or with blank text are dropped. When no
    /// usable turn remains, a non-empty `prompt` becomes a user turn, preceded
    /// by `systemPrompt` when that is non-empty. An empty result means the
    /// request carried no usable input.
    pub fn normalized_turns(&self) -> Vec<ChatTurn> {
        let turns: Vec<ChatTurn> = self
            .messages
            .as_ref()
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(|raw| {
                let role = raw.get("role")?.as_str()?.trim();
                let content = raw.get("content")?.as_str()?;
                if role.is_empty() || content.trim().is_empty() {
                    return None;
                }
                Some(ChatTurn::new(role, content))
            })
            .collect();

        if !turns.is_empty() {
            return turns;
        }

        let prompt = self.prompt.as_deref().map(str::trim).unwrap_or_default();
        if prompt.is_empty() {
            return Vec::new();
        }

        let mut turns = Vec::with_capacity(2);
        if let Some(system) = self.system_prompt.as_deref().map(str::trim) {
            if !system.is_empty() {
                turns.push(ChatTurn::new("system", system));
            }
        }
        turns.push(ChatTurn::new("user", prompt));
        turns
    }
}

/// Successful text-generation response. `model` names the candidate that served it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TextGenerationResponse {
    pub content: String,
    pub model: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> TextGenerationRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_messages_drop_blank_and_roleless_turns() {
        let req = parse(json!({
            "messages": [
                {"role": "system", "content": "be brief"},
                {"content": "no role"},
                {"role": "user", "content": "   "},
                {"role": "user", "content": 42},
                {"role": "user", "content": "what is 2+2?"}
            ]
        }));
        assert_eq!(
            req.normalized_turns(),
            vec![ChatTurn::new("system", "be brief"), ChatTurn::new("user", "what is 2+2?")]
        );
    }

    #[test]
    fn test_prompt_pair_used_when_messages_empty() {
        let req = parse(json!({
            "messages": [{"role": "user", "content": ""}],
            "prompt": "convert 5 miles",
            "systemPrompt": "You are a unit converter."
        }));
        let turns = req.normalized_turns();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].role, "system");
        assert_eq!(turns[1], ChatTurn::new("user", "convert 5 miles"));
    }

    #[test]
    fn test_non_array_messages_fall_back_to_prompt() {
        for messages in [json!("oops"), json!({"role": "user"}), json!(7), Value::Null] {
            let req = parse(json!({ "messages": messages, "prompt": "2+2" }));
            assert_eq!(req.normalized_turns(), vec![ChatTurn::new("user", "2+2")]);
        }

        let req = parse(json!({ "messages": "oops" }));
        assert!(req.normalized_turns().is_empty());
    }

    #[test]
    fn test_system_prompt_alone_is_empty_input() {
        let req = parse(json!({"systemPrompt": "You are helpful."}));
        assert!(req.normalized_turns().is_empty());
    }

    #[test]
    fn test_options_are_camel_case() {
        let req = parse(json!({
            "prompt": "hi",
            "search": true,
            "options": {"model": "m1", "maxTokens": 256, "temperature": 0.2}
        }));
        let options = req.options.unwrap();
        assert_eq!(options.model.as_deref(), Some("m1"));
        assert_eq!(options.max_tokens, Some(256));
        assert!(req.search.unwrap());
    }
}
