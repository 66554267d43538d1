use crate::models::{PreviewRequest, PreviewResponse, SuggestionResponse};
use futures::future::{FutureExt, LocalBoxFuture};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ApiErrorKind {
    Network,
    Http,
    Parse,
}

#[derive(Clone, Debug)]
pub(crate) struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl ApiError {
    pub(crate) fn network(e: impl std::fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            message: e.to_string(),
        }
    }

    fn parse(e: impl std::fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Parse,
            message: e.to_string(),
        }
    }

    fn http(status: reqwest::StatusCode, body: String, ctx: &str) -> Self {
        Self {
            kind: ApiErrorKind::Http,
            message: format!("{ctx} ({status}): {body}"),
        }
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

pub(crate) const DEFAULT_API_URL: &str = "http://localhost:5000";
pub(crate) const DEFAULT_PREVIEW_PATH: &str = "/api/preview";
pub(crate) const DEFAULT_SUGGEST_PATH: &str = "/api/suggest";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct EnvConfig {
    pub api_url: String,
    pub preview_path: String,
    pub suggest_path: String,
}

impl EnvConfig {
    /// Reads `window.ENV`, falling back to the page origin for the API base.
    pub fn new() -> Self {
        let Some(window) = web_sys::window() else {
            return Self::resolve(None, None, None, None);
        };

        let origin = window.location().origin().ok();
        let env = window
            .get("ENV")
            .filter(|env| !env.is_undefined() && env.is_object());

        let read = |names: &[&str]| -> Option<String> {
            let env = env.as_ref()?;
            names.iter().find_map(|name| {
                js_sys::Reflect::get(env, &(*name).into())
                    .ok()
                    .and_then(|v| v.as_string())
            })
        };

        // Both `API_URL` (template style) and `api_url` are accepted.
        Self::resolve(
            read(&["API_URL", "api_url"]),
            read(&["PREVIEW_PATH", "preview_path"]),
            read(&["SUGGEST_PATH", "suggest_path"]),
            origin,
        )
    }

    pub(crate) fn resolve(
        api_url: Option<String>,
        preview_path: Option<String>,
        suggest_path: Option<String>,
        origin: Option<String>,
    ) -> Self {
        let non_empty = |s: Option<String>| s.filter(|v| !v.trim().is_empty());

        let api_url = non_empty(api_url)
            .or_else(|| non_empty(origin).filter(|o| o != "null"))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            preview_path: non_empty(preview_path)
                .unwrap_or_else(|| DEFAULT_PREVIEW_PATH.to_string()),
            suggest_path: non_empty(suggest_path)
                .unwrap_or_else(|| DEFAULT_SUGGEST_PATH.to_string()),
        }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders raw draft text into a trusted HTML fragment.
pub(crate) trait PreviewSource {
    fn render(&self, text: String) -> LocalBoxFuture<'static, ApiResult<PreviewResponse>>;
}

/// Looks up suggestions for a non-empty, trimmed query.
pub(crate) trait SuggestionSource {
    fn suggest(&self, query: String) -> LocalBoxFuture<'static, ApiResult<SuggestionResponse>>;
}

#[derive(Clone, Debug)]
pub(crate) struct ApiClient {
    pub(crate) config: EnvConfig,
}

impl ApiClient {
    pub fn new(config: EnvConfig) -> Self {
        Self { config }
    }

    pub fn from_env() -> Self {
        Self::new(EnvConfig::new())
    }

    pub(crate) fn preview_url(&self) -> String {
        format!("{}{}", self.config.api_url, self.config.preview_path)
    }

    pub(crate) fn suggest_url(&self, query: &str) -> String {
        let sep = if self.config.suggest_path.contains('?') {
            '&'
        } else {
            '?'
        };
        format!(
            "{}{}{}q={}",
            self.config.api_url,
            self.config.suggest_path,
            sep,
            urlencoding::encode(query)
        )
    }

    async fn read_json<T: serde::de::DeserializeOwned>(
        res: reqwest::Response,
        ctx: &str,
    ) -> ApiResult<T> {
        if res.status().is_success() {
            res.json().await.map_err(ApiError::parse)
        } else {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            Err(ApiError::http(status, body, ctx))
        }
    }

    pub async fn fetch_preview(&self, text: String) -> ApiResult<PreviewResponse> {
        let res = reqwest::Client::new()
            .post(self.preview_url())
            .json(&PreviewRequest { text })
            .send()
            .await
            .map_err(ApiError::network)?;
        Self::read_json(res, "Preview failed").await
    }

    pub async fn fetch_suggestions(&self, query: &str) -> ApiResult<SuggestionResponse> {
        let res = reqwest::Client::new()
            .get(self.suggest_url(query))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(ApiError::network)?;
        Self::read_json(res, "Suggest failed").await
    }
}

impl PreviewSource for ApiClient {
    fn render(&self, text: String) -> LocalBoxFuture<'static, ApiResult<PreviewResponse>> {
        let client = self.clone();
        async move { client.fetch_preview(text).await }.boxed_local()
    }
}

impl SuggestionSource for ApiClient {
    fn suggest(&self, query: String) -> LocalBoxFuture<'static, ApiResult<SuggestionResponse>> {
        let client = self.clone();
        async move { client.fetch_suggestions(&query).await }.boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        ApiClient::new(EnvConfig::resolve(
            Some("http://bbs.local/".to_string()),
            None,
            None,
            None,
        ))
    }

    #[test]
    fn test_env_config_defaults_without_window_env() {
        let c = EnvConfig::resolve(None, None, None, None);
        assert_eq!(c.api_url, DEFAULT_API_URL);
        assert_eq!(c.preview_path, DEFAULT_PREVIEW_PATH);
        assert_eq!(c.suggest_path, DEFAULT_SUGGEST_PATH);
    }

    #[test]
    fn test_env_config_prefers_explicit_api_url_over_origin() {
        let c = EnvConfig::resolve(
            Some("https://api.example.org".to_string()),
            None,
            None,
            Some("https://bbs.example.org".to_string()),
        );
        assert_eq!(c.api_url, "https://api.example.org");
    }

    #[test]
    fn test_env_config_falls_back_to_origin() {
        let c = EnvConfig::resolve(
            Some("  ".to_string()),
            Some("/render".to_string()),
            None,
            Some("https://bbs.example.org".to_string()),
        );
        assert_eq!(c.api_url, "https://bbs.example.org");
        assert_eq!(c.preview_path, "/render");
    }

    #[test]
    fn test_env_config_ignores_opaque_origin() {
        let c = EnvConfig::resolve(None, None, None, Some("null".to_string()));
        assert_eq!(c.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_preview_url_joins_base_and_path() {
        assert_eq!(client().preview_url(), "http://bbs.local/api/preview");
    }

    #[test]
    fn test_suggest_url_encodes_query() {
        assert_eq!(
            client().suggest_url("rust & wasm?"),
            "http://bbs.local/api/suggest?q=rust%20%26%20wasm%3F"
        );
    }

    #[test]
    fn test_suggest_url_appends_to_existing_query() {
        let c = ApiClient::new(EnvConfig::resolve(
            Some("http://bbs.local".to_string()),
            None,
            Some("/search?format=json".to_string()),
            None,
        ));
        assert_eq!(c.suggest_url("x"), "http://bbs.local/search?format=json&q=x");
    }

    #[test]
    fn test_preview_response_contract_deserialize() {
        let parsed: PreviewResponse =
            serde_json::from_str(r#"{"html":"<p><strong>hi</strong></p>"}"#)
                .expect("preview response should parse");
        assert_eq!(parsed.html, "<p><strong>hi</strong></p>");
    }

    #[test]
    fn test_api_error_display_is_message() {
        let e = ApiError::network("connection refused");
        assert_eq!(e.kind, ApiErrorKind::Network);
        assert_eq!(e.to_string(), "connection refused");
    }
}
