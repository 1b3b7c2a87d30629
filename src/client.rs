use anyhow::Context;
use reqwest::StatusCode;
use tracing::debug;
use url::Url;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::prefs::Preferences;
use crate::types::{DetailResponse, SearchResponse, VideoDetail, VideoResult};

/// Header carrying the stored password.
pub const AUTH_HEADER: &str = "X-Auth-Password";

const SEARCH_FALLBACK: &str = "Search failed";
const DETAIL_FALLBACK: &str = "Failed to get detail";

/// Typed client for the SearchAV HTTP API.
///
/// Each call is an independent request that runs to completion; there are no
/// retries and no client-imposed timeouts. The preference store supplies the
/// auth header and the default adult-mode flag at call time.
pub struct Client {
    http: reqwest::Client,
    base_url: Url,
    prefs: Preferences,
}

impl Client {
    pub fn new(config: &ClientConfig, prefs: Preferences) -> anyhow::Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .with_context(|| format!("invalid API base URL: {}", config.base_url))?;
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .context("building HTTP client")?;
        Ok(Self {
            http,
            base_url,
            prefs,
        })
    }

    pub fn preferences(&self) -> &Preferences {
        &self.prefs
    }

    /// Search across the backend's sources. When `include_adult` is `None`,
    /// the stored adult-mode preference decides whether adult-flagged
    /// sources are requested.
    pub async fn search(
        &self,
        query: &str,
        include_adult: Option<bool>,
    ) -> Result<Vec<VideoResult>, ApiError> {
        debug!(query, "search request");
        let res = self.search_request(query, include_adult).send().await?;
        let status = res.status();
        let body = res.text().await?;
        decode_search(status, &body)
    }

    /// Fetch full metadata for one title from a specific source.
    pub async fn get_detail(
        &self,
        source_code: &str,
        vod_id: i64,
    ) -> Result<VideoDetail, ApiError> {
        debug!(source = source_code, id = vod_id, "detail request");
        let res = self.detail_request(source_code, vod_id).send().await?;
        let status = res.status();
        let body = res.text().await?;
        decode_detail(status, &body)
    }

    fn search_request(&self, query: &str, include_adult: Option<bool>) -> reqwest::RequestBuilder {
        let adult = include_adult.unwrap_or_else(|| self.prefs.adult_mode());
        let mut params = vec![("q", query.to_string())];
        if adult {
            params.push(("adult", "1".to_string()));
        }
        self.with_auth(self.http.get(self.endpoint("search")).query(&params))
    }

    fn detail_request(&self, source_code: &str, vod_id: i64) -> reqwest::RequestBuilder {
        let params = [
            ("source", source_code.to_string()),
            ("id", vod_id.to_string()),
        ];
        self.with_auth(self.http.get(self.endpoint("detail")).query(&params))
    }

    fn with_auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.prefs.password() {
            Some(password) => req.header(AUTH_HEADER, password),
            None => req,
        }
    }

    fn endpoint(&self, name: &str) -> String {
        format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), name)
    }
}

/// Interpret a search response. The body is decoded before any status
/// inspection, so a body that is not a valid envelope fails generically
/// regardless of status.
fn decode_search(status: StatusCode, body: &str) -> Result<Vec<VideoResult>, ApiError> {
    let envelope: SearchResponse = serde_json::from_str(body)?;
    if status == StatusCode::UNAUTHORIZED || envelope.code == 401 {
        return Err(ApiError::Unauthorized);
    }
    if !status.is_success() || envelope.code != 200 {
        return Err(ApiError::failed(
            envelope.msg.unwrap_or_else(|| SEARCH_FALLBACK.to_string()),
        ));
    }
    Ok(envelope.list.unwrap_or_default())
}

/// Interpret a detail response. A success envelope without a `data` payload
/// is a decoding failure, never a default value.
fn decode_detail(status: StatusCode, body: &str) -> Result<VideoDetail, ApiError> {
    let envelope: DetailResponse = serde_json::from_str(body)?;
    if status == StatusCode::UNAUTHORIZED || envelope.code == 401 {
        return Err(ApiError::Unauthorized);
    }
    if !status.is_success() || envelope.code != 200 {
        return Err(ApiError::failed(
            envelope.msg.unwrap_or_else(|| DETAIL_FALLBACK.to_string()),
        ));
    }
    envelope.data.ok_or_else(|| ApiError::failed(DETAIL_FALLBACK))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::{KeyValueStore, MemoryStore, Preferences};
    use std::sync::Arc;

    fn memory_prefs() -> Preferences {
        Preferences::new(Arc::new(MemoryStore::new()))
    }

    fn test_client(prefs: Preferences) -> Client {
        Client::new(&ClientConfig::default(), prefs).unwrap()
    }

    fn failure_message(err: ApiError) -> String {
        match err {
            ApiError::RequestFailed { message } => message,
            other => panic!("expected RequestFailed, got {other:?}"),
        }
    }

    #[test]
    fn search_success_returns_list_unchanged() {
        let body = r#"{"code":200,"msg":"success","list":[
            {"vod_name":"Example Show","vod_pic":"http://img.example/1.jpg",
             "sources":[{"source_code":"src1","source_name":"Source One","vod_id":42}]}
        ]}"#;
        let list = decode_search(StatusCode::OK, body).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].vod_name, "Example Show");
        assert_eq!(list[0].sources[0].vod_id, 42);
    }

    #[test]
    fn search_missing_list_is_empty() {
        let list = decode_search(StatusCode::OK, r#"{"code":200,"msg":"success"}"#).unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn envelope_401_is_unauthorized() {
        let err = decode_search(StatusCode::OK, r#"{"code":401,"msg":"nope"}"#).unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
    }

    #[test]
    fn http_401_is_unauthorized() {
        let err =
            decode_search(StatusCode::UNAUTHORIZED, r#"{"code":200,"list":[]}"#).unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
    }

    #[test]
    fn backend_error_carries_message() {
        let err = decode_search(StatusCode::OK, r#"{"code":500,"msg":"boom"}"#).unwrap_err();
        assert_eq!(failure_message(err), "boom");
    }

    #[test]
    fn backend_error_without_message_uses_fallback() {
        let err = decode_search(StatusCode::OK, r#"{"code":500}"#).unwrap_err();
        assert_eq!(failure_message(err), "Search failed");
    }

    #[test]
    fn non_success_status_with_ok_envelope_fails() {
        let err = decode_search(StatusCode::BAD_GATEWAY, r#"{"code":200,"list":[]}"#).unwrap_err();
        assert_eq!(failure_message(err), "Search failed");
    }

    #[test]
    fn malformed_body_fails_even_on_401() {
        let err = decode_search(StatusCode::UNAUTHORIZED, "<html>denied</html>").unwrap_err();
        assert!(matches!(err, ApiError::RequestFailed { .. }));
    }

    #[test]
    fn detail_success_returns_data() {
        let body = r#"{"code":200,"data":{
            "vod_name":"Example Show","vod_pic":"http://img.example/1.jpg",
            "episodes":["EP01$http://cdn.example/1.m3u8"]
        }}"#;
        let detail = decode_detail(StatusCode::OK, body).unwrap();
        assert_eq!(detail.vod_name, "Example Show");
        assert_eq!(detail.episodes.len(), 1);
    }

    #[test]
    fn detail_missing_data_is_failure() {
        let err = decode_detail(StatusCode::OK, r#"{"code":200,"msg":"success"}"#).unwrap_err();
        assert_eq!(failure_message(err), "Failed to get detail");
    }

    #[test]
    fn detail_error_uses_fallback() {
        let err = decode_detail(StatusCode::OK, r#"{"code":500}"#).unwrap_err();
        assert_eq!(failure_message(err), "Failed to get detail");
    }

    #[test]
    fn detail_request_url_and_query() {
        let client = test_client(memory_prefs());
        let req = client.detail_request("src1", 42).build().unwrap();
        assert_eq!(
            req.url().as_str(),
            "http://localhost:9898/api/detail?source=src1&id=42"
        );
    }

    #[test]
    fn search_request_encodes_query() {
        let client = test_client(memory_prefs());
        let req = client.search_request("spirited away", None).build().unwrap();
        assert_eq!(
            req.url().as_str(),
            "http://localhost:9898/api/search?q=spirited+away"
        );
    }

    #[test]
    fn auth_header_attached_when_password_stored() {
        let prefs = memory_prefs();
        prefs.save_password("hunter2");
        let client = test_client(prefs);
        let req = client.search_request("foo", None).build().unwrap();
        assert_eq!(req.headers().get(AUTH_HEADER).unwrap(), "hunter2");
    }

    #[test]
    fn auth_header_absent_without_password() {
        let client = test_client(memory_prefs());
        let req = client.search_request("foo", None).build().unwrap();
        assert!(req.headers().get(AUTH_HEADER).is_none());
    }

    #[test]
    fn adult_param_follows_explicit_argument() {
        let prefs = memory_prefs();
        prefs.set_adult_mode(true);
        let client = test_client(prefs);

        let req = client.search_request("foo", Some(false)).build().unwrap();
        assert!(!req.url().query().unwrap().contains("adult"));

        let req = client.search_request("foo", Some(true)).build().unwrap();
        assert!(req.url().query().unwrap().contains("adult=1"));
    }

    #[test]
    fn adult_param_falls_back_to_preference() {
        let client = test_client(memory_prefs());
        let req = client.search_request("foo", None).build().unwrap();
        assert!(!req.url().query().unwrap().contains("adult"));

        let prefs = memory_prefs();
        prefs.set_adult_mode(true);
        let client = test_client(prefs);
        let req = client.search_request("foo", None).build().unwrap();
        assert!(req.url().query().unwrap().contains("adult=1"));
    }

    #[test]
    fn trailing_slash_in_base_url_is_tolerated() {
        let config = ClientConfig {
            base_url: "http://localhost:9898/api/".to_string(),
            ..ClientConfig::default()
        };
        let client = Client::new(&config, memory_prefs()).unwrap();
        let req = client.search_request("foo", None).build().unwrap();
        assert_eq!(
            req.url().as_str(),
            "http://localhost:9898/api/search?q=foo"
        );
    }

    #[test]
    fn empty_stored_password_sends_no_header() {
        let store = MemoryStore::new();
        store.set("searchav_auth_password", "");
        let client = test_client(Preferences::new(Arc::new(store)));
        let req = client.search_request("foo", None).build().unwrap();
        assert!(req.headers().get(AUTH_HEADER).is_none());
    }
}
