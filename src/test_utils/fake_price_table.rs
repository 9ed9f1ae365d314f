//! A local stand-in for the hosted price table.

use std::{
    net::SocketAddr,
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
    routing::get,
};
use tokio::{net::TcpListener, task::JoinHandle};

use crate::price_table::{DEFAULT_TABLE, PriceTable};

pub(crate) const TEST_API_KEY: &str = "test-api-key";

/// A request received by a [FakePriceTable].
#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub query: Vec<(String, String)>,
    pub api_key: Option<String>,
    pub authorization: Option<String>,
}

impl RecordedRequest {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Clone)]
struct FakeTableState {
    status: StatusCode,
    body: String,
    delay: Duration,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// Serves a fixed response for every row query and records the requests.
///
/// The server stops when this is dropped.
pub(crate) struct FakePriceTable {
    address: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    server: JoinHandle<()>,
}

impl FakePriceTable {
    pub async fn start(status: StatusCode, body: &str) -> Self {
        Self::start_with_delay(status, body, Duration::ZERO).await
    }

    /// Like [FakePriceTable::start], but each response is held back for `delay`.
    pub async fn start_with_delay(status: StatusCode, body: &str, delay: Duration) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = FakeTableState {
            status,
            body: body.to_owned(),
            delay,
            requests: requests.clone(),
        };
        let router = Router::new()
            .route("/rest/v1/{table}", get(serve_rows))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Could not bind fake price table");
        let address = listener
            .local_addr()
            .expect("Could not get fake price table address");
        let server = tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("Fake price table stopped unexpectedly");
        });

        Self {
            address,
            requests,
            server,
        }
    }

    /// A client for the fake table using [TEST_API_KEY].
    pub fn price_table(&self) -> PriceTable {
        PriceTable::new(
            &format!("http://{}", self.address),
            DEFAULT_TABLE,
            TEST_API_KEY,
        )
        .expect("Could not create price table for fake")
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for FakePriceTable {
    fn drop(&mut self) {
        self.server.abort();
    }
}

async fn serve_rows(
    State(state): State<FakeTableState>,
    Query(query): Query<Vec<(String, String)>>,
    headers: HeaderMap,
) -> Response {
    let header_text = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
    };

    state.requests.lock().unwrap().push(RecordedRequest {
        query,
        api_key: header_text("apikey"),
        authorization: header_text("authorization"),
    });

    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }

    (
        state.status,
        [(CONTENT_TYPE, "application/json")],
        state.body,
    )
        .into_response()
}

/// A client for an address where nothing is listening.
pub(crate) fn unreachable_price_table() -> PriceTable {
    let listener =
        std::net::TcpListener::bind("127.0.0.1:0").expect("Could not bind to a free port");
    let address = listener
        .local_addr()
        .expect("Could not get the address of the free port");
    drop(listener);

    PriceTable::new(&format!("http://{address}"), DEFAULT_TABLE, TEST_API_KEY)
        .expect("Could not create price table for unreachable address")
}
