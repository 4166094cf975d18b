use crate::configuration::Settings;
use crate::error::{excerpt, Error, Result};
use log::{debug, error};
use serde_json::Value;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;
use url::Url;

/// The request methods the API is called with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PATCH" => Ok(Method::Patch),
            "DELETE" => Ok(Method::Delete),
            other => Err(Error::UnsupportedMethod(other.to_string())),
        }
    }
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(m: Method) -> Self {
        match m {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

pub struct ApiRequest<'a> {
    pub method: Method,
    pub url: Url,
    pub query: &'a [(String, String)],
    pub body: &'a Value,
}

pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Moves bytes between the client and the remote service.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: ApiRequest<'_>) -> Result<RawResponse>;

    /// Streams a resource outside the JSON API into `dest`, failing on
    /// non-success statuses. Returns the number of bytes written.
    async fn download(&self, url: &Url, dest: &Path) -> Result<u64>;
}

pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|source| Error::Transport {
                url: String::new(),
                source,
            })?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest<'_>) -> Result<RawResponse> {
        let url = request.url.to_string();
        let transport_err = |source| Error::Transport {
            url: url.clone(),
            source,
        };

        let response = self
            .client
            .request(request.method.into(), request.url)
            .query(request.query)
            .json(request.body)
            .send()
            .await
            .map_err(transport_err)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport_err)?;

        Ok(RawResponse { status, body })
    }

    async fn download(&self, url: &Url, dest: &Path) -> Result<u64> {
        let transport_err = |source| Error::Transport {
            url: url.to_string(),
            source,
        };

        let mut response = self
            .client
            .get(url.clone())
            .send()
            .await
            .and_then(|res| res.error_for_status())
            .map_err(transport_err)?;

        let mut file = File::create(dest).map_err(Error::io(dest))?;
        let mut written = 0;
        while let Some(chunk) = response.chunk().await.map_err(transport_err)? {
            file.write_all(&chunk).map_err(Error::io(dest))?;
            written += chunk.len() as u64;
        }
        file.flush().map_err(Error::io(dest))?;

        Ok(written)
    }
}

/// Thin client over the MangaDex JSON API that enforces its response envelope.
pub struct ApiClient<T = HttpTransport> {
    transport: T,
    base_url: String,
}

impl ApiClient<HttpTransport> {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let transport = HttpTransport::new(&settings.user_agent)?;
        Ok(Self::new(transport, &settings.base_url))
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T, base_url: &str) -> Self {
        let mut base_url = base_url.to_string();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self {
            transport,
            base_url,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Issues `method` against `endpoint` and returns the decoded body.
    ///
    /// Only `GET`, `POST`, `PATCH` and `DELETE` are accepted. The call fails
    /// unless the status is exactly 200 and the body's `result` is `"ok"`.
    pub async fn request(
        &self,
        method: &str,
        endpoint: &str,
        query: &[(String, String)],
        body: &Value,
    ) -> Result<Value> {
        let method: Method = method.parse()?;
        let url = Url::parse(&format!("{}{}", self.base_url, endpoint))?;

        debug!("{} {}", method.as_str(), url);
        let response = self
            .transport
            .send(ApiRequest {
                method,
                url,
                query,
                body,
            })
            .await?;

        if response.status != 200 {
            error!(
                "Unexpected status {} from {}: {}",
                response.status, endpoint, response.body
            );
            return Err(Error::UnexpectedStatus {
                endpoint: endpoint.to_string(),
                status: response.status,
                body: excerpt(&response.body),
            });
        }

        let json: Value = serde_json::from_str(&response.body).map_err(|source| Error::Decode {
            endpoint: endpoint.to_string(),
            source,
        })?;

        match json.get("result").and_then(Value::as_str) {
            Some("ok") => Ok(json),
            other => {
                error!("Unexpected result from {}: {}", endpoint, response.body);
                Err(Error::UnexpectedResult {
                    endpoint: endpoint.to_string(),
                    result: other.unwrap_or_default().to_string(),
                    body: excerpt(&response.body),
                })
            }
        }
    }

    /// `GET` with an empty JSON body.
    pub async fn get(&self, endpoint: &str, query: &[(String, String)]) -> Result<Value> {
        self.request("GET", endpoint, query, &Value::Object(Default::default()))
            .await
    }

    pub async fn download(&self, url: &Url, dest: &Path) -> Result<u64> {
        self.transport.download(url, dest).await
    }
}
