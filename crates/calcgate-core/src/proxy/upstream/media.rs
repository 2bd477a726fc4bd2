use url::Url;

/// Media family served by one orchestrator instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn label(self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }

    /// Required prefix of an acceptable upstream `Content-Type`.
    pub fn content_prefix(self) -> &'static str {
        match self {
            MediaKind::Image => "image/",
            MediaKind::Video => "video/",
        }
    }
}

/// Validated media-generation parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRequest {
    pub prompt: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub seed: Option<u32>,
}

impl MediaRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self { prompt: prompt.into(), width: None, height: None, seed: None }
    }
}

/// Client for the prompt-in-path media provider.
pub struct MediaClient {
    http_client: reqwest::Client,
    base_url: Url,
    token: Option<String>,
}

impl MediaClient {
    pub fn new(http_client: reqwest::Client, base_url: &str, token: Option<String>) -> Result<Self, String> {
        let base_url =
            Url::parse(base_url).map_err(|e| format!("Invalid media base URL '{}': {}", base_url, e))?;
        if base_url.cannot_be_a_base() {
            return Err(format!("Media base URL '{}' cannot carry a path", base_url));
        }
        let token = token.filter(|t| !t.trim().is_empty());
        Ok(Self { http_client, base_url, token })
    }

    /// `{base}/prompt/{prompt}?model=..` plus the parameters the media kind accepts.
    pub fn build_url(&self, kind: MediaKind, request: &MediaRequest, model: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("prompt").push(&request.prompt);
        }
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("model", model);
            if kind == MediaKind::Image {
                if let Some(width) = request.width {
                    query.append_pair("width", &width.to_string());
                }
                if let Some(height) = request.height {
                    query.append_pair("height", &height.to_string());
                }
                if let Some(seed) = request.seed {
                    query.append_pair("seed", &seed.to_string());
                }
                query.append_pair("nologo", "true");
            }
        }
        url
    }

    pub async fn fetch(&self, url: Url) -> Result<reqwest::Response, reqwest::Error> {
        let mut builder = self.http_client.get(url);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        builder.send().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> MediaClient {
        match MediaClient::new(reqwest::Client::new(), base, None) {
            Ok(c) => c,
            Err(e) => panic!("client build failed: {}", e),
        }
    }

    #[test]
    fn test_image_url_encodes_prompt_and_params() {
        let mut request = MediaRequest::new("a cat / dog?");
        request.width = Some(512);
        request.height = Some(768);
        request.seed = Some(42);

        let url = client("https://media.example/").build_url(MediaKind::Image, &request, "flux");
        assert_eq!(
            url.as_str(),
            "https://media.example/prompt/a%20cat%20%2F%20dog%3F?model=flux&width=512&height=768&seed=42&nologo=true"
        );
    }

    #[test]
    fn test_video_url_ignores_image_params() {
        let mut request = MediaRequest::new("waves");
        request.width = Some(512);
        let url = client("https://media.example/api").build_url(MediaKind::Video, &request, "veo");
        assert_eq!(url.as_str(), "https://media.example/api/prompt/waves?model=veo");
    }

    #[test]
    fn test_rejects_non_base_url() {
        assert!(MediaClient::new(reqwest::Client::new(), "mailto:ops@example.com", None).is_err());
        assert!(MediaClient::new(reqwest::Client::new(), "not a url", None).is_err());
    }

    #[test]
    fn test_kind_prefixes() {
        assert_eq!(MediaKind::Image.content_prefix(), "image/");
        assert_eq!(MediaKind::Video.label(), "video");
    }
}
