//! In-memory transport for exercising the client without a network.

use crate::error::{Error, Result};
use crate::mangadex_client::{ApiClient, ApiRequest, RawResponse, Transport};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Mutex;
use url::Url;

pub const BASE_URL: &str = "https://api.test/";

#[derive(Default)]
pub struct FakeTransport {
    responses: HashMap<String, (u16, String)>,
    files: HashMap<String, Vec<u8>>,
    calls: Mutex<Vec<String>>,
    queries: Mutex<Vec<Vec<(String, String)>>>,
    bodies: Mutex<Vec<Value>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `body` with `status` for every request to `endpoint`.
    pub fn respond(mut self, endpoint: &str, status: u16, body: &str) -> Self {
        self.responses
            .insert(endpoint.to_string(), (status, body.to_string()));
        self
    }

    pub fn file(mut self, url: &str, bytes: &[u8]) -> Self {
        self.files.insert(url.to_string(), bytes.to_vec());
        self
    }

    pub fn client(self) -> ApiClient<FakeTransport> {
        ApiClient::new(self, BASE_URL)
    }

    /// `"METHOD endpoint"` for API calls, `"FETCH url"` for file downloads.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn queries(&self) -> Vec<Vec<(String, String)>> {
        self.queries.lock().unwrap().clone()
    }

    /// JSON bodies of API calls, in call order.
    pub fn bodies(&self) -> Vec<Value> {
        self.bodies.lock().unwrap().clone()
    }
}

impl Transport for FakeTransport {
    async fn send(&self, request: ApiRequest<'_>) -> Result<RawResponse> {
        let endpoint = request.url.path().trim_start_matches('/').to_string();
        self.calls
            .lock()
            .unwrap()
            .push(format!("{} {}", request.method.as_str(), endpoint));
        self.queries.lock().unwrap().push(request.query.to_vec());
        self.bodies.lock().unwrap().push(request.body.clone());

        let (status, body) = self
            .responses
            .get(&endpoint)
            .cloned()
            .unwrap_or((404, r#"{"result":"error","errors":[]}"#.to_string()));
        Ok(RawResponse { status, body })
    }

    async fn download(&self, url: &Url, dest: &Path) -> Result<u64> {
        self.calls.lock().unwrap().push(format!("FETCH {}", url));
        let bytes = self.files.get(url.as_str()).ok_or_else(|| Error::UnexpectedStatus {
            endpoint: url.to_string(),
            status: 404,
            body: String::new(),
        })?;
        fs::write(dest, bytes).map_err(Error::io(dest))?;
        Ok(bytes.len() as u64)
    }
}
