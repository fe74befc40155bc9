//! In-process stand-ins for the review API and the Telegram Bot API.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::io::Write;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header::AUTHORIZATION};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use homework_bot::config::BotConfig;
use homework_bot::notification::{Notifier, TelegramSender};
use homework_bot::poller::PollLoop;
use homework_bot::review::ReviewClient;
use serde_json::Value;
use tokio::net::TcpListener;
use tracing_subscriber::fmt::MakeWriter;

pub const REVIEW_TOKEN: &str = "review-token";
pub const BOT_TOKEN: &str = "123:ABC";
pub const CHAT_ID: &str = "4242";

/// A request seen by the review endpoint.
#[derive(Debug, Clone)]
pub struct ReviewRequest {
    pub from_date: Option<String>,
    pub authorization: Option<String>,
}

/// A `sendMessage` call seen by the bot endpoint.
#[derive(Debug, Clone)]
pub struct SentMessage {
    pub bot_segment: String,
    pub chat_id: String,
    pub text: String,
}

#[derive(Default)]
struct MockState {
    review_responses: VecDeque<(StatusCode, String)>,
    review_requests: Vec<ReviewRequest>,
    messages: Vec<SentMessage>,
    telegram_status: Option<StatusCode>,
}

/// Both remote APIs served from one local listener.
#[derive(Clone)]
pub struct MockApis {
    addr: SocketAddr,
    state: Arc<Mutex<MockState>>,
}

impl MockApis {
    pub async fn start() -> Self {
        let state = Arc::new(Mutex::new(MockState::default()));

        let app = Router::new()
            .route("/api/user_api/homework_statuses/", get(review_statuses))
            .route("/{bot_segment}/sendMessage", post(send_message))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    pub fn endpoint(&self) -> String {
        format!("http://{}/api/user_api/homework_statuses/", self.addr)
    }

    pub fn telegram_base(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Queue a JSON response for the next review request.
    pub fn push_json(&self, status: StatusCode, body: Value) {
        self.push_raw(status, body.to_string());
    }

    pub fn push_raw(&self, status: StatusCode, body: impl Into<String>) {
        self.state
            .lock()
            .unwrap()
            .review_responses
            .push_back((status, body.into()));
    }

    /// Make every `sendMessage` call answer with `status`.
    pub fn fail_telegram(&self, status: StatusCode) {
        self.state.lock().unwrap().telegram_status = Some(status);
    }

    pub fn review_requests(&self) -> Vec<ReviewRequest> {
        self.state.lock().unwrap().review_requests.clone()
    }

    pub fn messages(&self) -> Vec<SentMessage> {
        self.state.lock().unwrap().messages.clone()
    }

    pub fn config(&self) -> BotConfig {
        let vars: HashMap<&str, String> = [
            ("REVIEW_API_TOKEN", REVIEW_TOKEN.to_string()),
            ("BOT_TOKEN", BOT_TOKEN.to_string()),
            ("CHAT_ID", CHAT_ID.to_string()),
            ("REVIEW_API_ENDPOINT", self.endpoint()),
            ("TELEGRAM_API_BASE", self.telegram_base()),
            ("HTTP_TIMEOUT_SECS", "5".to_string()),
        ]
        .into_iter()
        .collect();
        BotConfig::from_lookup(|key| vars.get(key).cloned()).unwrap()
    }

    /// A loop wired to these APIs with the given cursor and interval.
    pub fn poll_loop(&self, cursor: i64, interval: Duration) -> PollLoop {
        let config = self.config();
        PollLoop::with_parts(
            ReviewClient::new(&config).unwrap(),
            Notifier::new(TelegramSender::new(&config).unwrap()),
            interval,
            cursor,
        )
    }
}

async fn review_statuses(
    State(state): State<Arc<Mutex<MockState>>>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let mut state = state.lock().unwrap();
    state.review_requests.push(ReviewRequest {
        from_date: query.get("from_date").cloned(),
        authorization: headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    });

    let (status, body) = state
        .review_responses
        .pop_front()
        .unwrap_or((StatusCode::INTERNAL_SERVER_ERROR, "{}".to_string()));

    (status, [("content-type", "application/json")], body).into_response()
}

async fn send_message(
    State(state): State<Arc<Mutex<MockState>>>,
    Path(bot_segment): Path<String>,
    axum::Json(body): axum::Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    if let Some(status) = state.telegram_status {
        return (status, r#"{"ok":false,"description":"Bad Request: chat not found"}"#)
            .into_response();
    }

    state.messages.push(SentMessage {
        bot_segment,
        chat_id: body["chat_id"].as_str().unwrap_or_default().to_string(),
        text: body["text"].as_str().unwrap_or_default().to_string(),
    });

    (StatusCode::OK, r#"{"ok":true}"#).into_response()
}

/// Collects formatted log output for assertions.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    /// Install a thread-local subscriber writing into this capture.
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    /// Number of log lines containing `needle`.
    pub fn count(&self, needle: &str) -> usize {
        self.contents()
            .lines()
            .filter(|line| line.contains(needle))
            .count()
    }
}

impl Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
