use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StepAction {
    Next,
    Previous,
}

/// Either an explicit step index or a relative move.
#[derive(Debug, Deserialize)]
pub struct StepRequest {
    pub step: Option<usize>,
    pub action: Option<StepAction>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MediaTarget {
    Cover,
    Poster,
    Gallery,
    Archive,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaUploadRequest {
    pub target: MediaTarget,
    pub file_name: String,
    pub content_base64: String,
}
