//! Minimal HTTP client abstraction shared by the Pinata, JSON-RPC and
//! PostgREST providers.

use std::collections::HashMap;
use std::fmt::Display;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

pub mod imp;

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait HttpClient: Send + Sync {
    fn get(&self, url: &str) -> RequestBuilder;
    fn head(&self, url: &str) -> RequestBuilder;
    fn post(&self, url: &str) -> RequestBuilder;

    async fn send(
        &self,
        url: &str,
        body: Option<Body>,
        headers: Option<Headers>,
        method: Method,
    ) -> Result<Response, Error>;
}

pub type Headers = HashMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusCode(pub u16);

#[derive(Debug)]
pub struct Response {
    pub body: Vec<u8>,
    pub headers: Headers,
    pub status: StatusCode,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    HttpError(String),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Other HTTP client error: {0}")]
    Other(String),
    #[error("HTTP status code is error: {0}")]
    StatusCodeIsError(StatusCode),
    #[error("Url encoding error: {0}")]
    UrlEncode(#[from] serde_urlencoded::ser::Error),
}

impl Response {
    pub fn error_for_status(self) -> Result<Self, Error> {
        if self.status.is_client_error() || self.status.is_server_error() {
            Err(Error::StatusCodeIsError(self.status))
        } else {
            Ok(self)
        }
    }

    pub fn header_get(&self, key: &str) -> Option<&String> {
        self.headers
            .iter()
            .find(|(header_key, _)| header_key.eq_ignore_ascii_case(key))
            .map(|(_, value)| value)
    }

    pub fn json<T: DeserializeOwned>(self) -> Result<T, Error> {
        serde_json::from_slice(&self.body).map_err(Error::JsonError)
    }
}

impl StatusCode {
    pub fn is_success(&self) -> bool {
        self.0 >= 200 && self.0 < 300
    }

    pub fn is_client_error(&self) -> bool {
        self.0 >= 400 && self.0 < 500
    }

    pub fn is_server_error(&self) -> bool {
        self.0 >= 500 && self.0 < 600
    }
}

impl Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Head,
    Post,
}

#[derive(Debug, Clone)]
pub enum Body {
    Bytes(Vec<u8>),
    /// Encoded by the client implementation, which owns the boundary.
    Multipart(Vec<FormPart>),
}

/// One part of a `multipart/form-data` body.
#[derive(Debug, Clone)]
pub struct FormPart {
    pub name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl FormPart {
    pub fn text(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: name.to_owned(),
            file_name: None,
            content_type: None,
            body: value.into().into_bytes(),
        }
    }

    pub fn file(name: &str, file_name: &str, content_type: &str, body: Vec<u8>) -> Self {
        Self {
            name: name.to_owned(),
            file_name: Some(file_name.to_owned()),
            content_type: Some(content_type.to_owned()),
            body,
        }
    }
}

pub struct RequestBuilder {
    client: Arc<dyn HttpClient>,
    body: Option<Body>,
    headers: Headers,
    method: Method,
    url: String,
}

impl RequestBuilder {
    pub fn new(client: Arc<dyn HttpClient>, method: Method, url: &str) -> Self {
        Self {
            client,
            body: None,
            headers: Headers::default(),
            method,
            url: url.to_string(),
        }
    }

    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    pub fn bearer_auth(mut self, token: &str) -> Self {
        self.headers
            .insert("Authorization".to_string(), format!("Bearer {token}"));
        self
    }

    /// Appends url-encoded query parameters to the request url.
    pub fn query<T: Serialize>(mut self, value: T) -> Result<Self, Error> {
        let query = serde_urlencoded::to_string(value)?;
        if !query.is_empty() {
            let separator = if self.url.contains('?') { '&' } else { '?' };
            self.url = format!("{}{separator}{query}", self.url);
        }
        Ok(self)
    }

    pub fn json<T: Serialize>(mut self, value: T) -> Result<Self, Error> {
        self.headers
            .insert("Content-Type".to_string(), "application/json".to_owned());
        self.body = Some(Body::Bytes(
            serde_json::to_vec(&value).map_err(Error::JsonError)?,
        ));
        Ok(self)
    }

    pub fn multipart(mut self, parts: Vec<FormPart>) -> Self {
        self.body = Some(Body::Multipart(parts));
        self
    }

    pub async fn send(self) -> Result<Response, Error> {
        let headers = if self.headers.is_empty() {
            None
        } else {
            Some(self.headers)
        };

        self.client
            .send(&self.url, self.body, headers, self.method)
            .await
    }
}

#[cfg(test)]
mod test;
