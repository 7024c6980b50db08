// Account API HTTP client.
// Handles authentication, response caching, and request/response processing.

use reqwest::{
    Client, Method, Response, StatusCode, Url,
    header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT},
};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::cache::{CachedResponse, ResponseCache};
use crate::config::Config;
use crate::error::{AccountError, Result};

/// Account API client with an optional response cache.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    cache: Option<ResponseCache>,
}

impl ApiClient {
    /// Create a new client for `base_url`, authenticating with `token` when given.
    pub fn new(base_url: &str, token: Option<&str>) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| AccountError::Other(format!("Invalid API URL {}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(AccountError::Other(format!(
                "Invalid API URL {}: not a base URL",
                base_url
            )));
        }

        let mut headers = HeaderMap::new();
        if let Some(token) = token {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", token))
                    .map_err(|e| AccountError::Other(e.to_string()))?,
            );
        }
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static("account-client"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(AccountError::Api)?;

        Ok(Self {
            client,
            base_url,
            cache: None,
        })
    }

    /// Create a client from loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.api_url, config.api_token.as_deref())
    }

    /// Attach a response cache produced by [`configure_cache`](crate::cache::configure_cache).
    pub fn with_cache(mut self, cache: ResponseCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn cache(&self) -> Option<&ResponseCache> {
        self.cache.as_ref()
    }

    /// Build an endpoint URL by appending percent-encoded path segments to the base URL.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AccountError::Other(format!("Invalid API URL {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Make a GET request, serving from the cache when a fresh entry exists.
    pub async fn get(&self, url: &Url) -> Result<String> {
        let cache = self
            .cache
            .as_ref()
            .filter(|_| ResponseCache::is_cacheable(&Method::GET, url));

        if let Some(cache) = cache {
            match cache.get(url).await {
                Ok(Some(hit)) => {
                    debug!(url = %url, "Serving response from cache");
                    return Ok(hit.body);
                }
                Ok(None) => {}
                Err(e) => warn!(url = %url, error = %e, "Cache read failed"),
            }
        }

        let response = self.client.get(url.clone()).send().await?;
        let response = check_response(response).await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        if let Some(cache) = cache {
            let entry = CachedResponse {
                status,
                body: body.clone(),
            };
            if let Err(e) = cache.put(url, entry).await {
                warn!(url = %url, error = %e, "Cache write failed");
            }
        }

        Ok(body)
    }

    /// GET and deserialize a JSON response.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T> {
        let body = self.get(url).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// PUT a JSON body. Any cached entry for the URL is invalidated first.
    pub async fn put_json<B, T>(&self, url: &Url, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        if let Some(cache) = &self.cache {
            if let Err(e) = cache.invalidate(url).await {
                warn!(url = %url, error = %e, "Cache invalidation failed");
            }
        }

        let response = self.client.put(url.clone()).json(body).send().await?;
        let response = check_response(response).await?;
        Ok(response.json().await?)
    }
}

/// Check response status and convert errors.
async fn check_response(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().to_string();
    let body = response.text().await.unwrap_or_default();
    Err(status_error(status, url, body))
}

fn status_error(status: StatusCode, url: String, body: String) -> AccountError {
    match status {
        StatusCode::UNAUTHORIZED => AccountError::Unauthorized,
        StatusCode::NOT_FOUND => AccountError::NotFound(url),
        status => AccountError::Other(format!("HTTP {}: {}", status, body)),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::cache::{MemoryDriver, Storage, configure_cache_with};

    async fn cached_client(base_url: &str) -> ApiClient {
        let storage = Storage::new(None);
        let cache = configure_cache_with(&storage, Arc::new(MemoryDriver::new()))
            .await
            .unwrap();
        ApiClient::new(base_url, None).unwrap().with_cache(cache)
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        assert!(matches!(
            ApiClient::new("not a url", None),
            Err(AccountError::Other(_))
        ));
        assert!(matches!(
            ApiClient::new("mailto:someone@example.com", None),
            Err(AccountError::Other(_))
        ));
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let client = ApiClient::new("https://api.example.com/v1/", None).unwrap();
        let url = client.endpoint(&["user-accounts", "a b/c"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.example.com/v1/user-accounts/a%20b%2Fc"
        );
    }

    #[test]
    fn test_status_error_mapping() {
        let url = "https://api.example.com/x".to_string();
        assert!(matches!(
            status_error(StatusCode::UNAUTHORIZED, url.clone(), String::new()),
            AccountError::Unauthorized
        ));
        assert!(matches!(
            status_error(StatusCode::NOT_FOUND, url.clone(), String::new()),
            AccountError::NotFound(u) if u == url
        ));
        match status_error(StatusCode::INTERNAL_SERVER_ERROR, url, "boom".to_string()) {
            AccountError::Other(msg) => assert_eq!(msg, "HTTP 500 Internal Server Error: boom"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_is_cached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user-accounts/a"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"username":"a"}"#))
            .expect(1)
            .mount(&server)
            .await;

        let client = cached_client(&server.uri()).await;
        let url = client.endpoint(&["user-accounts", "a"]).unwrap();

        let first = client.get(&url).await.unwrap();
        let second = client.get(&url).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_get_with_query_bypasses_cache() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user-accounts"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .expect(2)
            .mount(&server)
            .await;

        let client = cached_client(&server.uri()).await;
        let mut url = client.endpoint(&["user-accounts"]).unwrap();
        url.set_query(Some("page=1"));

        assert_eq!(client.get(&url).await.unwrap(), "[]");
        assert_eq!(client.get(&url).await.unwrap(), "[]");
        assert_eq!(server.received_requests().await.unwrap().len(), 2);
        assert!(client.cache().unwrap().get(&url).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_invalidates_cached_get() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user-accounts/a"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"username":"a"}"#))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/user-accounts/a"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"{"username":"a","saved":true}"#),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = cached_client(&server.uri()).await;
        let url = client.endpoint(&["user-accounts", "a"]).unwrap();

        client.get(&url).await.unwrap();
        assert!(client.cache().unwrap().get(&url).await.unwrap().is_some());

        let _: serde_json::Value = client
            .put_json(&url, &serde_json::json!({"username": "a"}))
            .await
            .unwrap();
        assert!(client.cache().unwrap().get(&url).await.unwrap().is_none());

        // Next read goes back to the server
        client.get(&url).await.unwrap();
        let gets = server
            .received_requests()
            .await
            .unwrap()
            .into_iter()
            .filter(|r| r.method.as_str() == "GET")
            .count();
        assert_eq!(gets, 2);
    }

    #[tokio::test]
    async fn test_error_status_is_not_cached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user-accounts/ghost"))
            .respond_with(ResponseTemplate::new(404).set_body_string("missing"))
            .mount(&server)
            .await;

        let client = cached_client(&server.uri()).await;
        let url = client.endpoint(&["user-accounts", "ghost"]).unwrap();

        assert!(matches!(
            client.get(&url).await,
            Err(AccountError::NotFound(_))
        ));
        assert!(client.cache().unwrap().get(&url).await.unwrap().is_none());
    }
}
