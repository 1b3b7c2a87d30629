use serde::{Deserialize, Serialize};

/// One provider's listing of a title.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceInfo {
    pub source_code: String,
    pub source_name: String,
    pub vod_id: i64,
}

/// A single search hit, possibly aggregated across several sources.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoResult {
    pub vod_name: String,
    pub vod_pic: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vod_remarks: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    pub sources: Vec<SourceInfo>,
}

/// Full metadata for one title.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoDetail {
    pub vod_name: String,
    pub vod_pic: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vod_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vod_year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vod_area: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vod_director: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vod_actor: Option<String>,
    pub episodes: Vec<String>,
}

/// Response envelope for the search endpoint. `list` is only meaningful
/// when `code == 200`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list: Option<Vec<VideoResult>>,
}

/// Response envelope for the detail endpoint. `data` is only meaningful
/// when `code == 200`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailResponse {
    pub code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<VideoDetail>,
}

/// One entry in the backend's provider listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceListItem {
    pub code: String,
    pub name: String,
}

/// Response envelope for the provider listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesResponse {
    pub code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list: Option<Vec<SourceListItem>>,
}
