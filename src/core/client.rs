use crate::config::ClientConfig;
use crate::core::status::{is_success_code, wrap_status};
use crate::core::web_image_editor::WebImageEditorService;
use crate::domain::model::ApiResponse;
use crate::utils::error::{Diy99Error, Result};
use crate::utils::validation::Validate;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::Client;
use serde::Serialize;
use std::sync::Arc;

const USER_AGENT_VALUE: &str = concat!("diy99-client/", env!("CARGO_PKG_VERSION"));

/// Reusable handle to the 99Diy API.
///
/// Holds one `reqwest::Client` with the fixed headers and timeout applied, so
/// clones share the connection pool. Every call goes through [`Diy99Client::post`],
/// which retries transport failures and turns the response envelope into a
/// [`Diy99Error`] when the remote side reports a failure.
#[derive(Clone)]
pub struct Diy99Client {
    inner: Client,
    config: Arc<ClientConfig>,
    debug: bool,
}

impl Diy99Client {
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        default_headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let inner = Client::builder()
            .timeout(config.timeout())
            .default_headers(default_headers)
            .build()?;

        tracing::debug!(
            "99Diy client ready: base_url={}, sandbox={}, timeout={:?}",
            config.base_url(),
            config.sandbox,
            config.timeout()
        );

        Ok(Self {
            inner,
            debug: config.debug,
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        self.config.base_url()
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    /// 開啟後記錄完整的請求與回應內容
    pub fn set_debug(&mut self, debug: bool) -> &mut Self {
        self.debug = debug;
        self
    }

    pub fn web_image_editor(&self) -> WebImageEditorService {
        WebImageEditorService::new(self.clone())
    }

    /// POST a JSON body to `path` and return the unwrapped response envelope.
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<ApiResponse> {
        let url = format!("{}/{}", self.base_url(), path.trim_start_matches('/'));
        let payload = serde_json::to_vec(body)?;
        let policy = self.config.retry_policy();

        if self.debug {
            tracing::debug!(
                "📤 POST {} body={}",
                url,
                String::from_utf8_lossy(&payload)
            );
        }

        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.send_once(&url, &payload).await {
                Ok(response) => return Ok(response),
                Err(e) if e.is_retryable() && attempt < policy.max_attempts() => {
                    let delay = policy.delay_for_attempt(attempt);
                    tracing::warn!(
                        "🔁 POST {} failed (attempt {}/{}): {}, retrying in {:?}",
                        url,
                        attempt,
                        policy.max_attempts(),
                        e,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) if e.is_retryable() && attempt > 1 => {
                    return Err(Diy99Error::RetriesExhaustedError {
                        attempts: attempt,
                        last_error: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn send_once(&self, url: &str, payload: &[u8]) -> Result<ApiResponse> {
        let response = self.inner.post(url).body(payload.to_vec()).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if self.debug {
            tracing::debug!("📥 {} {} body={}", status, url, body);
        }

        if status.is_client_error() || status.is_server_error() {
            let status_text = match status.canonical_reason() {
                Some(reason) => format!("{} {}", status.as_u16(), reason),
                None => status.as_u16().to_string(),
            };
            return Err(Diy99Error::HttpStatusError {
                status: status.as_u16(),
                status_text,
                body,
            });
        }

        let envelope: ApiResponse = serde_json::from_str(&body)?;

        if envelope.result == Some(false) || !is_success_code(envelope.status_code()) {
            // 沒有業務錯誤碼時以 HTTP 狀態碼代替
            let code = match envelope.status_code() {
                0 => i64::from(status.as_u16()),
                code => code,
            };
            wrap_status(code, envelope.message())?;
        }

        Ok(envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn test_config(base_url: String) -> ClientConfig {
        ClientConfig {
            base_url: Some(base_url),
            retry_count: 2,
            retry_wait_seconds: 0,
            retry_max_wait_seconds: 0,
            ..ClientConfig::default()
        }
    }

    #[test]
    fn test_client_creation() {
        let client = Diy99Client::new(ClientConfig::sandbox());
        assert!(client.is_ok());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ClientConfig {
            base_url: Some("not-a-url".to_string()),
            ..ClientConfig::default()
        };
        assert!(Diy99Client::new(config).is_err());
    }

    #[test]
    fn test_set_debug() {
        let mut client = Diy99Client::new(ClientConfig::default()).unwrap();
        assert!(!client.is_debug());
        client.set_debug(true);
        assert!(client.is_debug());
    }

    #[tokio::test]
    async fn test_post_sends_fixed_headers() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/ping")
                .header("Content-Type", "application/json")
                .header("Accept", "application/json")
                .header("User-Agent", USER_AGENT_VALUE)
                .json_body(serde_json::json!({"hello": "world"}));
            then.status(200)
                .json_body(serde_json::json!({"code": 200, "message": "ok", "data": 1}));
        });

        let client = Diy99Client::new(test_config(server.base_url())).unwrap();
        let response = client
            .post("/ping", &serde_json::json!({"hello": "world"}))
            .await
            .unwrap();

        api_mock.assert();
        assert_eq!(response.data, serde_json::json!(1));
    }

    #[tokio::test]
    async fn test_server_errors_are_retried() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/ping");
            then.status(503).body("upstream unavailable");
        });

        let client = Diy99Client::new(test_config(server.base_url())).unwrap();
        let err = client.post("ping", &serde_json::json!({})).await.unwrap_err();

        api_mock.assert_hits(3);
        match err {
            Diy99Error::RetriesExhaustedError { attempts, last_error } => {
                assert_eq!(attempts, 3);
                assert_eq!(last_error, "503 Service Unavailable: upstream unavailable");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_client_errors_are_not_retried() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/ping");
            then.status(404).body("not here");
        });

        let client = Diy99Client::new(test_config(server.base_url())).unwrap();
        let err = client.post("ping", &serde_json::json!({})).await.unwrap_err();

        api_mock.assert_hits(1);
        assert_eq!(err.to_string(), "404 Not Found: not here");
    }

    #[tokio::test]
    async fn test_without_retries_the_raw_error_is_returned() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/ping");
            then.status(503).body("upstream unavailable");
        });

        let config = ClientConfig {
            retry_count: 0,
            ..test_config(server.base_url())
        };
        let client = Diy99Client::new(config).unwrap();
        let err = client.post("ping", &serde_json::json!({})).await.unwrap_err();

        api_mock.assert_hits(1);
        match err {
            Diy99Error::HttpStatusError { status, .. } => assert_eq!(status, 503),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unknown_status_has_no_reason_phrase() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/ping");
            then.status(599).body("odd");
        });

        let config = ClientConfig {
            retry_count: 0,
            ..test_config(server.base_url())
        };
        let client = Diy99Client::new(config).unwrap();
        let err = client.post("ping", &serde_json::json!({})).await.unwrap_err();

        assert_eq!(err.to_string(), "599: odd");
    }

    #[tokio::test]
    async fn test_remote_error_code_is_mapped() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/ping");
            then.status(200)
                .json_body(serde_json::json!({"result": false, "code": 400, "msg": "x"}));
        });

        let client = Diy99Client::new(test_config(server.base_url())).unwrap();
        let err = client.post("ping", &serde_json::json!({})).await.unwrap_err();

        api_mock.assert_hits(1);
        assert_eq!(err.to_string(), "400: service not found");
    }

    #[tokio::test]
    async fn test_failed_result_without_code_uses_http_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/ping");
            then.status(200)
                .json_body(serde_json::json!({"result": false, "msg": "ignored", "data": 9}));
        });

        let client = Diy99Client::new(test_config(server.base_url())).unwrap();
        let response = client.post("ping", &serde_json::json!({})).await.unwrap();
        assert_eq!(response.data, serde_json::json!(9));
    }

    #[tokio::test]
    async fn test_connection_failures_exhaust_retries() {
        let config = ClientConfig {
            retry_count: 1,
            ..test_config("http://127.0.0.1:1".to_string())
        };

        let client = Diy99Client::new(config).unwrap();
        let err = client.post("ping", &serde_json::json!({})).await.unwrap_err();

        assert!(matches!(
            err,
            Diy99Error::RetriesExhaustedError { attempts: 2, .. }
        ));
    }
}
