use serde::{Deserialize, Serialize};

/// Cached, not-yet-submitted content of one form.
///
/// Persisted as JSON under the page-supplied draft key. There is no version field: both
/// fields default when missing and unknown fields are ignored, so older or newer payloads
/// still decode.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct DraftRecord {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct PreviewRequest {
    pub text: String,
}

/// Rendered fragment from the preview endpoint. Trusted markup, injected as-is.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct PreviewResponse {
    pub html: String,
}

/// One suggestion. The endpoint may send more fields; only `title` is consumed.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Suggestion {
    pub title: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct SuggestionResponse {
    #[serde(default)]
    pub results: Vec<Suggestion>,
}

impl SuggestionResponse {
    pub(crate) fn titles(&self) -> Vec<String> {
        self.results.iter().map(|s| s.title.clone()).collect()
    }
}
