use crate::models::{
    AddFavoriteRequest, Attraction, AttractionId, AttractionList, AuthResponse, City, CityId,
    CityList, Favorite, FavoriteList, TelegramAuthRequest,
};
use crate::storage::TokenStore;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[cfg(test)]
pub(crate) mod fake;

pub(crate) const INIT_DATA_HEADER: &str = "X-Telegram-Init-Data";

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub(crate) enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    /// The token was rejected. The client has already cleared it and left the page.
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Request failed ({status}): {body}")]
    Http { status: u16, body: String },

    #[error("Unexpected response: {0}")]
    Parse(String),
}

impl ApiError {
    fn network(e: reqwest::Error) -> Self {
        Self::Network(e.to_string())
    }

    fn parse(e: impl std::fmt::Display) -> Self {
        Self::Parse(e.to_string())
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Error body as sent by the server, if any.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Http { body, .. } => Some(body.as_str()),
            _ => None,
        }
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct EnvConfig {
    pub api_url: String,
}

pub(crate) const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1";

impl EnvConfig {
    pub fn new() -> Self {
        // We support BOTH `window.ENV.API_URL` and
        // `window.ENV.api_url` for compatibility.
        if let Some(window) = web_sys::window() {
            if let Some(env) = window.get("ENV") {
                if !env.is_undefined() && env.is_object() {
                    for key in ["API_URL", "api_url"] {
                        if let Ok(api_url) = js_sys::Reflect::get(&env, &key.into()) {
                            if let Some(url_str) = api_url.as_string() {
                                return Self { api_url: url_str };
                            }
                        }
                    }
                }
            }
        }

        Self::from_build_env()
    }

    /// Build-time `API_URL`, else the local development backend.
    pub fn from_build_env() -> Self {
        Self {
            api_url: option_env!("API_URL").unwrap_or(DEFAULT_API_URL).to_string(),
        }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Filter for `GET /attractions`. Unset fields are left out of the query string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct AttractionQuery {
    pub city_id: Option<CityId>,
    pub category: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl AttractionQuery {
    pub fn for_city(city_id: CityId, page: u32, page_size: u32) -> Self {
        Self {
            city_id: Some(city_id),
            category: None,
            page: Some(page),
            page_size: Some(page_size),
        }
    }

    pub fn to_query_string(&self) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(4);
        if let Some(city_id) = self.city_id {
            parts.push(format!("city_id={city_id}"));
        }
        if let Some(category) = self.category.as_deref().filter(|c| !c.trim().is_empty()) {
            parts.push(format!("category={}", urlencoding::encode(category)));
        }
        if let Some(page) = self.page {
            parts.push(format!("page={page}"));
        }
        if let Some(page_size) = self.page_size {
            parts.push(format!("page_size={page_size}"));
        }
        parts.join("&")
    }
}

/// The backend as seen by page logic.
#[allow(async_fn_in_trait)]
pub(crate) trait CatalogApi {
    async fn list_cities(&self) -> ApiResult<CityList>;
    async fn get_city(&self, id: CityId) -> ApiResult<City>;
    async fn list_attractions(&self, query: &AttractionQuery) -> ApiResult<AttractionList>;
    async fn get_attraction(&self, id: AttractionId) -> ApiResult<Attraction>;
    async fn list_favorites(&self) -> ApiResult<FavoriteList>;
    async fn add_favorite(&self, attraction_id: AttractionId) -> ApiResult<Favorite>;
    async fn remove_favorite(&self, attraction_id: AttractionId) -> ApiResult<()>;
    async fn authenticate(&self, init_data: &str) -> ApiResult<AuthResponse>;
    async fn health(&self) -> ApiResult<serde_json::Value>;
}

pub(crate) type UnauthorizedHandler = Arc<dyn Fn() + Send + Sync>;

/// Hard navigation back to the app entry point.
pub(crate) fn redirect_to_entry() {
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_href("/");
    }
}

#[derive(Clone)]
pub(crate) struct ApiClient {
    pub(crate) base_url: String,
    init_data: Option<String>,
    tokens: Arc<dyn TokenStore>,
    on_unauthorized: UnauthorizedHandler,
}

impl ApiClient {
    pub fn new(base_url: String, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            init_data: None,
            tokens,
            on_unauthorized: Arc::new(redirect_to_entry),
        }
    }

    pub fn with_init_data(mut self, init_data: Option<String>) -> Self {
        self.init_data = init_data.filter(|d| !d.trim().is_empty());
        self
    }

    #[cfg(test)]
    pub fn with_unauthorized_handler(mut self, handler: UnauthorizedHandler) -> Self {
        self.on_unauthorized = handler;
        self
    }

    pub fn tokens(&self) -> &dyn TokenStore {
        self.tokens.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.tokens.get().is_some()
    }

    /// Headers attached to every outbound call, in send order.
    pub(crate) fn identity_headers(&self) -> Vec<(&'static str, String)> {
        let mut headers = Vec::with_capacity(2);
        if let Some(init_data) = &self.init_data {
            headers.push((INIT_DATA_HEADER, init_data.clone()));
        }
        if let Some(token) = self.tokens.get() {
            headers.push(("Authorization", format!("Bearer {}", token)));
        }
        headers
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `/health` lives at the server root, outside the versioned API prefix.
    pub(crate) fn health_url(&self) -> String {
        let origin = self
            .base_url
            .strip_suffix("/api/v1")
            .unwrap_or(&self.base_url);
        format!("{}/health", origin)
    }

    fn handle_unauthorized(&self) {
        log::warn!("access token rejected; clearing session");
        self.tokens.clear();
        (self.on_unauthorized)();
    }

    /// Maps a response status onto the error taxonomy. A 401 also clears the session.
    pub(crate) fn classify(&self, status: u16, body: String) -> ApiResult<String> {
        match status {
            200..=299 => Ok(body),
            401 => {
                self.handle_unauthorized();
                Err(ApiError::Unauthorized)
            }
            _ => Err(ApiError::Http { status, body }),
        }
    }

    async fn request<B: Serialize>(
        &self,
        method: Method,
        url: String,
        body: Option<&B>,
    ) -> ApiResult<String> {
        log::debug!("{} {}", method, url);

        let client = reqwest::Client::new();
        let mut req = client.request(method, url);
        for (name, value) in self.identity_headers() {
            req = req.header(name, value);
        }
        if let Some(b) = body {
            req = req.json(b);
        }

        let res = req.send().await.map_err(ApiError::network)?;
        let status = res.status().as_u16();
        let text = res.text().await.unwrap_or_default();
        self.classify(status, text)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let text = self.request::<()>(Method::GET, self.url(path), None).await?;
        decode(&text)
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> ApiResult<T> {
        let text = self.request(Method::POST, self.url(path), Some(body)).await?;
        decode(&text)
    }
}

fn decode<T: DeserializeOwned>(text: &str) -> ApiResult<T> {
    serde_json::from_str(text).map_err(ApiError::parse)
}

impl CatalogApi for ApiClient {
    async fn list_cities(&self) -> ApiResult<CityList> {
        self.get_json("/cities").await
    }

    async fn get_city(&self, id: CityId) -> ApiResult<City> {
        self.get_json(&format!("/cities/{id}")).await
    }

    async fn list_attractions(&self, query: &AttractionQuery) -> ApiResult<AttractionList> {
        let qs = query.to_query_string();
        if qs.is_empty() {
            self.get_json("/attractions").await
        } else {
            self.get_json(&format!("/attractions?{qs}")).await
        }
    }

    async fn get_attraction(&self, id: AttractionId) -> ApiResult<Attraction> {
        self.get_json(&format!("/attractions/{id}")).await
    }

    async fn list_favorites(&self) -> ApiResult<FavoriteList> {
        self.get_json("/favorites").await
    }

    async fn add_favorite(&self, attraction_id: AttractionId) -> ApiResult<Favorite> {
        self.post_json("/favorites", &AddFavoriteRequest { attraction_id })
            .await
    }

    async fn remove_favorite(&self, attraction_id: AttractionId) -> ApiResult<()> {
        self.request::<()>(
            Method::DELETE,
            self.url(&format!("/favorites/{attraction_id}")),
            None,
        )
        .await
        .map(|_| ())
    }

    async fn authenticate(&self, init_data: &str) -> ApiResult<AuthResponse> {
        self.post_json(
            "/auth/telegram",
            &TelegramAuthRequest {
                init_data: init_data.to_string(),
            },
        )
        .await
    }

    async fn health(&self) -> ApiResult<serde_json::Value> {
        let text = self.request::<()>(Method::GET, self.health_url(), None).await?;
        decode(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryTokenStore;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn client_with(store: &MemoryTokenStore) -> ApiClient {
        ApiClient::new("http://localhost:8000/api/v1".to_string(), Arc::new(store.clone()))
            .with_unauthorized_handler(Arc::new(|| {}))
    }

    #[test]
    fn test_api_client_new_trims_trailing_slash() {
        let client = ApiClient::new(
            "http://localhost:8000/api/v1/".to_string(),
            Arc::new(MemoryTokenStore::default()),
        );
        assert_eq!(client.base_url, "http://localhost:8000/api/v1");
        assert_eq!(client.url("/cities"), "http://localhost:8000/api/v1/cities");
    }

    #[test]
    fn test_identity_headers_without_session() {
        let client = client_with(&MemoryTokenStore::default());
        assert!(client.identity_headers().is_empty());
        assert!(!client.is_authenticated());
    }

    #[test]
    fn test_identity_headers_with_init_data_and_token() {
        let store = MemoryTokenStore::with_token("my-jwt-token");
        let client = client_with(&store).with_init_data(Some("query_id=1&hash=abc".to_string()));

        let headers = client.identity_headers();
        assert_eq!(
            headers,
            vec![
                (INIT_DATA_HEADER, "query_id=1&hash=abc".to_string()),
                ("Authorization", "Bearer my-jwt-token".to_string()),
            ]
        );
    }

    #[test]
    fn test_blank_init_data_is_not_sent() {
        let client =
            client_with(&MemoryTokenStore::default()).with_init_data(Some("  ".to_string()));
        assert!(client.identity_headers().is_empty());
    }

    #[test]
    fn test_token_is_read_per_request() {
        let store = MemoryTokenStore::default();
        let client = client_with(&store);
        assert!(client.identity_headers().is_empty());

        store.set("late-token");
        assert_eq!(
            client.identity_headers(),
            vec![("Authorization", "Bearer late-token".to_string())]
        );
    }

    #[test]
    fn test_unauthorized_clears_token_and_redirects() {
        let store = MemoryTokenStore::with_token("stale");
        let redirects = Arc::new(AtomicUsize::new(0));
        let counter = redirects.clone();
        let client = ApiClient::new("http://api".to_string(), Arc::new(store.clone()))
            .with_unauthorized_handler(Arc::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }));

        let res = client.classify(401, r#"{"detail":"expired"}"#.to_string());
        assert_eq!(res, Err(ApiError::Unauthorized));
        assert_eq!(redirects.load(Ordering::SeqCst), 1);
        assert!(store.get().is_none());
        assert!(client
            .identity_headers()
            .iter()
            .all(|(name, _)| *name != "Authorization"));
    }

    #[test]
    fn test_other_failures_carry_status_and_body() {
        let store = MemoryTokenStore::with_token("t");
        let client = client_with(&store);

        let err = client
            .classify(404, r#"{"detail":"Attraction not found"}"#.to_string())
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.body(), Some(r#"{"detail":"Attraction not found"}"#));
        // Only 401 touches the session.
        assert_eq!(store.get().as_deref(), Some("t"));

        let err = client.classify(500, "boom".to_string()).unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.to_string(), "Request failed (500): boom");
    }

    #[test]
    fn test_success_passes_body_through() {
        let client = client_with(&MemoryTokenStore::default());
        assert_eq!(client.classify(204, String::new()), Ok(String::new()));
    }

    #[test]
    fn test_attraction_query_string() {
        let q = AttractionQuery::for_city(2, 1, 10);
        assert_eq!(q.to_query_string(), "city_id=2&page=1&page_size=10");

        let q = AttractionQuery {
            category: Some("art & history".to_string()),
            ..Default::default()
        };
        assert_eq!(q.to_query_string(), "category=art%20%26%20history");

        assert_eq!(AttractionQuery::default().to_query_string(), "");
    }

    #[test]
    fn test_health_url_strips_api_prefix() {
        let client = client_with(&MemoryTokenStore::default());
        assert_eq!(client.health_url(), "http://localhost:8000/health");

        let client = ApiClient::new(
            "https://api.example.com".to_string(),
            Arc::new(MemoryTokenStore::default()),
        );
        assert_eq!(client.health_url(), "https://api.example.com/health");
    }

    #[test]
    fn test_decode_reports_parse_errors() {
        let err = decode::<CityList>("not json").unwrap_err();
        assert!(matches!(err, ApiError::Parse(_)));
    }

    #[test]
    fn test_env_config_build_default() {
        let cfg = EnvConfig::from_build_env();
        assert!(!cfg.api_url.is_empty());
    }
}
