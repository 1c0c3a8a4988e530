//! Async push client with route setup and backoff retry

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::StatusCode;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::core::backoff::Backoff;
use crate::core::config::LookupConfig;
use crate::core::credentials::Credentials;
use crate::core::errors::{JuremyError, Result};
use crate::core::languages::{to_iso639_3, Language};
use crate::core::models::{PushOutcome, PushRequest, PushStats, RouteResponse, RoutingHeaders, Search};
use crate::core::push_stats::PushTracker;

/// User agent sent with every request
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Header carrying the app token
pub const APP_TOKEN_HEADER: &str = "X-Juremy-App-Token";

const PUSH_PATH: &str = "/push";
const SETUP_ROUTE_PATH: &str = "/setup-route";

/// Result of a single push attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SendStatus {
    Delivered,
    /// 421: route must be set up again before retrying
    Misrouted,
}

/// Backoff and sequence of the active search, changed together
#[derive(Debug)]
struct SearchState {
    sequence: u64,
    backoff: Backoff,
}

/// Client for the Juremy app-push API
#[derive(Debug, Clone)]
pub struct PushClient {
    client: reqwest::Client,
    config: Arc<LookupConfig>,
    api_base: String,
    credentials: Arc<RwLock<Credentials>>,
    route: Arc<Mutex<Option<(HeaderName, HeaderValue)>>>,
    search: Arc<Mutex<SearchState>>,
    tracker: PushTracker,
}

impl PushClient {
    /// Create a new push client
    pub fn new(config: LookupConfig, credentials: Credentials) -> Result<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(USER_AGENT)
            .pool_idle_timeout(Some(Duration::from_secs(30)))
            .build()?;

        let backoff = Backoff::new(
            config.max_backoff_steps,
            Duration::from_millis(config.backoff_base_ms),
        );

        Ok(Self {
            client,
            api_base: config.api_base(),
            config: Arc::new(config),
            credentials: Arc::new(RwLock::new(credentials)),
            route: Arc::new(Mutex::new(None)),
            search: Arc::new(Mutex::new(SearchState {
                sequence: 0,
                backoff,
            })),
            tracker: PushTracker::new(),
        })
    }

    /// Create from environment, loading stored credentials
    pub fn from_env() -> Result<Self> {
        let config = LookupConfig::from_env()?;
        let credentials = config.credentials()?;
        Self::new(config, credentials)
    }

    pub fn config(&self) -> &LookupConfig {
        &self.config
    }

    /// Push a search for `text` to the user's Juremy session.
    ///
    /// Starting a search supersedes any earlier one still waiting to retry.
    pub async fn push_search(
        &self,
        source: &Language,
        target: &Language,
        text: &str,
    ) -> Result<PushOutcome> {
        let sequence = self.begin_search().await;
        debug!("new search: {}", sequence);

        match self.retry_search(sequence, source, target, text).await {
            Ok(PushOutcome::Delivered) => {
                self.tracker.record_delivered().await;
                Ok(PushOutcome::Delivered)
            }
            Ok(PushOutcome::Superseded) => {
                self.tracker.record_superseded().await;
                Ok(PushOutcome::Superseded)
            }
            Err(e) => {
                self.tracker.record_failed().await;
                Err(e)
            }
        }
    }

    /// Set up the route from scratch and tell the session a client is connected
    pub async fn setup_route_and_ping(&self) -> Result<()> {
        self.forget_route().await;
        self.setup_route_if_needed().await?;

        match self.send_push(&PushRequest::ping()).await? {
            SendStatus::Delivered => info!("Connected to Juremy"),
            SendStatus::Misrouted => warn!("Ping was misrouted, route will be set up again"),
        }
        Ok(())
    }

    /// Store a new app token
    pub async fn set_app_token(&self, token: &str, temporary: bool) -> Result<()> {
        self.credentials.write().await.set(token, temporary)?;
        // A route belongs to a token
        self.forget_route().await;
        Ok(())
    }

    /// The configured token, if any, and whether it is session-only
    pub async fn configured_token(&self) -> (Option<String>, bool) {
        let credentials = self.credentials.read().await;
        (
            credentials.configured().map(str::to_string),
            credentials.is_temporary(),
        )
    }

    /// Get push statistics
    pub async fn stats(&self) -> PushStats {
        self.tracker.snapshot().await
    }

    async fn begin_search(&self) -> u64 {
        let mut state = self.search.lock().await;
        state.backoff.reset();
        state.sequence += 1;
        state.sequence
    }

    async fn is_current(&self, sequence: u64) -> bool {
        self.search.lock().await.sequence == sequence
    }

    async fn retry_search(
        &self,
        sequence: u64,
        source: &Language,
        target: &Language,
        text: &str,
    ) -> Result<PushOutcome> {
        let request = PushRequest::search(Search {
            src_lang: to_iso639_3(source)?.to_string(),
            dst_lang: to_iso639_3(target)?.to_string(),
            q: limit_text(text, self.config.max_text_length),
        });

        loop {
            let delay = self.search.lock().await.backoff.next_delay();
            let Some(delay) = delay else {
                return Err(JuremyError::NoSuccessAfterRetries);
            };
            if !delay.is_zero() {
                warn!("backoff: {} ms", delay.as_millis());
                sleep(delay).await;
            }

            // Checked after waiting, a newer search may have started meanwhile
            if !self.is_current(sequence).await {
                debug!("no longer the active search: {}", sequence);
                return Ok(PushOutcome::Superseded);
            }

            match self.send_push(&request).await? {
                SendStatus::Delivered => return Ok(PushOutcome::Delivered),
                SendStatus::Misrouted => {
                    debug!("search {} misrouted, retrying", sequence);
                    continue;
                }
            }
        }
    }

    async fn send_push(&self, request: &PushRequest) -> Result<SendStatus> {
        let (name, value) = self.setup_route_if_needed().await?;

        let mut headers = self.token_headers().await?;
        headers.insert(name, value);

        let response = self
            .client
            .post(format!("{}{}", self.api_base, PUSH_PATH))
            .headers(headers)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            self.search.lock().await.backoff.reset();
            return Ok(SendStatus::Delivered);
        }

        if status == StatusCode::MISDIRECTED_REQUEST {
            // Either the route expired or the session was briefly not
            // listening (e.g. right after a previous push).
            self.search.lock().await.backoff.increase();
            self.forget_route().await;
            return Ok(SendStatus::Misrouted);
        }

        let message = response.text().await.unwrap_or_default();
        Err(match status.as_u16() {
            400 => JuremyError::Caller,
            401 => JuremyError::AppTokenRejected,
            403 => JuremyError::DeviceProblem,
            500 => JuremyError::Server,
            504 => JuremyError::Connection,
            code => JuremyError::Api {
                status: code,
                message,
            },
        })
    }

    async fn setup_route_if_needed(&self) -> Result<(HeaderName, HeaderValue)> {
        let mut route = self.route.lock().await;
        if let Some(header) = route.as_ref() {
            return Ok(header.clone());
        }

        let response = self
            .client
            .get(format!("{}{}", self.api_base, SETUP_ROUTE_PATH))
            .headers(self.token_headers().await?)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 => JuremyError::AppTokenRejected,
                // Maybe the browser session is not listening
                421 => JuremyError::RoutingSetup,
                504 => JuremyError::Connection,
                code => JuremyError::Api {
                    status: code,
                    message,
                },
            });
        }

        let body = response.bytes().await?;
        let parsed: RouteResponse = serde_json::from_slice(&body).map_err(|e| {
            error!("Error parsing routing response: {}", e);
            JuremyError::RoutingResponseParse
        })?;

        debug!("routing.header_name: {}", parsed.routing.header_name);
        debug!("routing.header_value: {}", parsed.routing.header_value);

        // Only a usable header is cached, so a bad one is asked for again
        let header = route_header(&parsed.routing)?;
        *route = Some(header.clone());
        Ok(header)
    }

    async fn forget_route(&self) {
        *self.route.lock().await = None;
    }

    async fn token_headers(&self) -> Result<HeaderMap> {
        let token = self.credentials.read().await.app_token()?;
        let value = HeaderValue::from_str(&token).map_err(|_| JuremyError::InvalidAppToken)?;

        let mut headers = HeaderMap::new();
        headers.insert(APP_TOKEN_HEADER, value);
        Ok(headers)
    }
}

fn route_header(routing: &RoutingHeaders) -> Result<(HeaderName, HeaderValue)> {
    let name = HeaderName::from_bytes(routing.header_name.as_bytes());
    let value = HeaderValue::from_str(&routing.header_value);
    match (name, value) {
        (Ok(name), Ok(value)) => Ok((name, value)),
        _ => {
            error!(
                "Routing response has an unusable header: {:?}: {:?}",
                routing.header_name, routing.header_value
            );
            Err(JuremyError::RoutingResponseParse)
        }
    }
}

/// Cut `text` to at most `max` characters
fn limit_text(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const ROUTE: &str = "/api/app-push/v1/setup-route";
    const PUSH: &str = "/api/app-push/v1/push";

    fn test_config(base_url: &str) -> LookupConfig {
        LookupConfig {
            base_url: base_url.to_string(),
            backoff_base_ms: 1,
            timeout_ms: 5000,
            ..Default::default()
        }
    }

    fn test_client(base_url: &str) -> PushClient {
        PushClient::new(
            test_config(base_url),
            Credentials::with_fallback(Some("test-token".to_string())),
        )
        .unwrap()
    }

    fn lang(tag: &str) -> Language {
        Language::parse(tag).unwrap()
    }

    fn route_ok() -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "routing": { "header_name": "X-Juremy-Route", "header_value": "session-1" }
        }))
    }

    async fn mount_route(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path(ROUTE))
            .respond_with(route_ok())
            .mount(server)
            .await;
    }

    #[test]
    fn test_limit_text() {
        assert_eq!(limit_text("hello", 10), "hello");
        assert_eq!(limit_text("hello", 5), "hello");
        assert_eq!(limit_text("hello", 3), "hel");
        assert_eq!(limit_text("árvíztűrő", 4), "árví");
    }

    #[test]
    fn test_client_rejects_invalid_config() {
        let config = LookupConfig {
            base_url: String::new(),
            ..Default::default()
        };
        assert!(PushClient::new(config, Credentials::default()).is_err());
    }

    #[tokio::test]
    async fn test_push_delivered_with_headers() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(ROUTE))
            .and(header(APP_TOKEN_HEADER, "test-token"))
            .and(header("user-agent", USER_AGENT))
            .respond_with(route_ok())
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path(PUSH))
            .and(header("X-Juremy-Route", "session-1"))
            .and(header(APP_TOKEN_HEADER, "test-token"))
            .and(body_json(json!({
                "search": { "src_lang": "eng", "dst_lang": "hun", "q": "internal market" }
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let outcome = client
            .push_search(&lang("en-GB"), &lang("hu"), "internal market")
            .await
            .unwrap();

        assert_eq!(outcome, PushOutcome::Delivered);
        assert_eq!(client.stats().await.delivered, 1);
    }

    #[tokio::test]
    async fn test_route_is_reused() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(ROUTE))
            .respond_with(route_ok())
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path(PUSH))
            .respond_with(ResponseTemplate::new(200))
            .expect(2)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        for text in ["first", "second"] {
            let outcome = client.push_search(&lang("de"), &lang("fr"), text).await.unwrap();
            assert_eq!(outcome, PushOutcome::Delivered);
        }
    }

    #[tokio::test]
    async fn test_misroute_sets_up_route_again_and_retries() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(ROUTE))
            .respond_with(route_ok())
            .expect(3)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path(PUSH))
            .respond_with(ResponseTemplate::new(421))
            .up_to_n_times(2)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path(PUSH))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let outcome = client
            .push_search(&lang("it"), &lang("es"), "regolamento")
            .await
            .unwrap();
        assert_eq!(outcome, PushOutcome::Delivered);
    }

    #[tokio::test]
    async fn test_gives_up_after_six_misroutes() {
        let server = MockServer::start().await;
        mount_route(&server).await;

        Mock::given(method("POST"))
            .and(path(PUSH))
            .respond_with(ResponseTemplate::new(421))
            .expect(6)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client
            .push_search(&lang("en"), &lang("pl"), "directive")
            .await
            .unwrap_err();

        assert!(matches!(err, JuremyError::NoSuccessAfterRetries));
        assert_eq!(client.stats().await.failed, 1);
    }

    #[tokio::test]
    async fn test_push_status_mapping() {
        let cases = [
            (400, "caller"),
            (401, "app_token_rejected"),
            (403, "device_problem"),
            (500, "server"),
            (504, "connection"),
            (418, "api_error"),
        ];

        for (status, expected) in cases {
            let server = MockServer::start().await;
            mount_route(&server).await;
            Mock::given(method("POST"))
                .and(path(PUSH))
                .respond_with(ResponseTemplate::new(status))
                .expect(1)
                .mount(&server)
                .await;

            let client = test_client(&server.uri());
            let err = client
                .push_search(&lang("en"), &lang("de"), "text")
                .await
                .unwrap_err();
            assert_eq!(err.code(), expected, "status {} gave {:?}", status, err);
        }
    }

    #[tokio::test]
    async fn test_route_setup_status_mapping() {
        let cases = [
            (401, "app_token_rejected"),
            (421, "routing_setup"),
            (504, "connection"),
            (502, "api_error"),
        ];

        for (status, expected) in cases {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path(ROUTE))
                .respond_with(ResponseTemplate::new(status))
                .mount(&server)
                .await;
            Mock::given(method("POST"))
                .and(path(PUSH))
                .respond_with(ResponseTemplate::new(200))
                .expect(0)
                .mount(&server)
                .await;

            let client = test_client(&server.uri());
            let err = client
                .push_search(&lang("en"), &lang("de"), "text")
                .await
                .unwrap_err();
            assert_eq!(err.code(), expected, "status {} gave {:?}", status, err);
        }
    }

    #[tokio::test]
    async fn test_unparseable_route_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(ROUTE))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "routing": null })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client
            .push_search(&lang("en"), &lang("de"), "text")
            .await
            .unwrap_err();
        assert!(matches!(err, JuremyError::RoutingResponseParse));
    }

    #[tokio::test]
    async fn test_long_text_is_truncated() {
        let server = MockServer::start().await;
        mount_route(&server).await;

        Mock::given(method("POST"))
            .and(path(PUSH))
            .and(body_partial_json(json!({ "search": { "q": "abcde" } })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let config = LookupConfig {
            max_text_length: 5,
            ..test_config(&server.uri())
        };
        let client = PushClient::new(
            config,
            Credentials::with_fallback(Some("test-token".to_string())),
        )
        .unwrap();

        let outcome = client
            .push_search(&lang("en"), &lang("nl"), "abcdefghij")
            .await
            .unwrap();
        assert_eq!(outcome, PushOutcome::Delivered);
    }

    #[tokio::test]
    async fn test_unsupported_language_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(ROUTE))
            .respond_with(route_ok())
            .expect(0)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client
            .push_search(&lang("en"), &lang("zh-CN"), "text")
            .await
            .unwrap_err();
        assert!(matches!(err, JuremyError::LanguageNotSupported { ref code } if code == "zh"));
    }

    #[tokio::test]
    async fn test_missing_token() {
        let server = MockServer::start().await;
        let client = PushClient::new(test_config(&server.uri()), Credentials::default()).unwrap();

        let err = client
            .push_search(&lang("en"), &lang("de"), "text")
            .await
            .unwrap_err();
        assert!(matches!(err, JuremyError::AppTokenNotFound));
    }

    #[tokio::test]
    async fn test_stored_token_used_after_set() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(ROUTE))
            .and(header(APP_TOKEN_HEADER, "fresh-token"))
            .respond_with(route_ok())
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(PUSH))
            .and(header(APP_TOKEN_HEADER, "fresh-token"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        client.set_app_token("  fresh-token  ", true).await.unwrap();
        assert_eq!(
            client.configured_token().await,
            (Some("fresh-token".to_string()), true)
        );

        client.push_search(&lang("en"), &lang("sv"), "text").await.unwrap();
    }

    #[tokio::test]
    async fn test_ping_sends_connected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(ROUTE))
            .respond_with(route_ok())
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(PUSH))
            .and(body_json(json!({ "connected": true })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        client.setup_route_and_ping().await.unwrap();
    }

    #[tokio::test]
    async fn test_ping_misroute_is_not_an_error() {
        let server = MockServer::start().await;
        mount_route(&server).await;
        Mock::given(method("POST"))
            .and(path(PUSH))
            .respond_with(ResponseTemplate::new(421))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        assert!(client.setup_route_and_ping().await.is_ok());
    }

    #[tokio::test]
    async fn test_newer_search_supersedes_waiting_retry() {
        let server = MockServer::start().await;
        mount_route(&server).await;

        Mock::given(method("POST"))
            .and(path(PUSH))
            .and(body_partial_json(json!({ "search": { "q": "older" } })))
            .respond_with(ResponseTemplate::new(421))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(PUSH))
            .and(body_partial_json(json!({ "search": { "q": "newer" } })))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let config = LookupConfig {
            backoff_base_ms: 300,
            ..test_config(&server.uri())
        };
        let client = PushClient::new(
            config,
            Credentials::with_fallback(Some("test-token".to_string())),
        )
        .unwrap();

        let older = {
            let client = client.clone();
            tokio::spawn(async move {
                client
                    .push_search(&lang("en"), &lang("fr"), "older")
                    .await
            })
        };
        sleep(Duration::from_millis(150)).await;

        let newer = client
            .push_search(&lang("en"), &lang("fr"), "newer")
            .await
            .unwrap();
        assert_eq!(newer, PushOutcome::Delivered);

        let older = older.await.unwrap().unwrap();
        assert_eq!(older, PushOutcome::Superseded);

        let stats = client.stats().await;
        assert_eq!(stats.delivered, 1);
        assert_eq!(stats.superseded, 1);
    }

    #[tokio::test]
    async fn test_unusable_route_header_is_not_cached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(ROUTE))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "routing": { "header_name": "bad header", "header_value": "v" }
            })))
            .expect(3)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(PUSH))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        for _ in 0..3 {
            let err = client
                .push_search(&lang("en"), &lang("de"), "text")
                .await
                .unwrap_err();
            assert!(matches!(err, JuremyError::RoutingResponseParse));
        }
    }

    #[tokio::test]
    async fn test_route_recovers_after_unusable_header() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(ROUTE))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "routing": { "header_name": "X-Route", "header_value": "bad\nvalue" }
            })))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        mount_route(&server).await;
        Mock::given(method("POST"))
            .and(path(PUSH))
            .and(header("X-Juremy-Route", "session-1"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        assert!(client
            .push_search(&lang("en"), &lang("de"), "text")
            .await
            .is_err());
        let outcome = client
            .push_search(&lang("en"), &lang("de"), "text")
            .await
            .unwrap();
        assert_eq!(outcome, PushOutcome::Delivered);
    }

    #[tokio::test]
    async fn test_connection_refused_is_http_error() {
        // Bind then drop a listener to get a port nothing listens on
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let client = test_client(&format!("http://127.0.0.1:{}", port));

        let err = client
            .push_search(&lang("en"), &lang("de"), "text")
            .await
            .unwrap_err();
        assert!(matches!(err, JuremyError::Http(_)), "got {:?}", err);
        assert_eq!(client.stats().await.failed, 1);
    }

    #[tokio::test]
    async fn test_concurrent_pushes_share_route_setup() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(ROUTE))
            .respond_with(route_ok().set_delay(Duration::from_millis(100)))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(PUSH))
            .and(header("X-Juremy-Route", "session-1"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let (source, target) = (lang("en"), lang("cs"));
        let (first, second) = tokio::join!(
            client.push_search(&source, &target, "first"),
            client.push_search(&source, &target, "second"),
        );

        assert!(first.is_ok());
        assert_eq!(second.unwrap(), PushOutcome::Delivered);
    }

    #[tokio::test]
    async fn test_unusable_token_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(ROUTE))
            .respond_with(route_ok())
            .expect(0)
            .mount(&server)
            .await;

        let client = PushClient::new(
            test_config(&server.uri()),
            Credentials::with_fallback(Some("bad\ntoken".to_string())),
        )
        .unwrap();
        let err = client
            .push_search(&lang("en"), &lang("de"), "text")
            .await
            .unwrap_err();
        assert!(matches!(err, JuremyError::InvalidAppToken));
    }
}
