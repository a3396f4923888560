use std::str::FromStr;
use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::multipart::{Form, Part};

use crate::http_client::{
    Body, Error, FormPart, Headers, HttpClient, Method, RequestBuilder, Response, StatusCode,
};

#[derive(Clone)]
pub struct ReqwestClient {
    pub client: reqwest::Client,
}

impl ReqwestClient {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn builder(&self, method: Method, url: &str) -> RequestBuilder {
        RequestBuilder::new(Arc::new(self.clone()), method, url)
    }
}

impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new(Default::default())
    }
}

#[async_trait::async_trait]
impl HttpClient for ReqwestClient {
    fn get(&self, url: &str) -> RequestBuilder {
        self.builder(Method::Get, url)
    }

    fn head(&self, url: &str) -> RequestBuilder {
        self.builder(Method::Head, url)
    }

    fn post(&self, url: &str) -> RequestBuilder {
        self.builder(Method::Post, url)
    }

    async fn send(
        &self,
        url: &str,
        body: Option<Body>,
        headers: Option<Headers>,
        method: Method,
    ) -> Result<Response, Error> {
        let mut builder = match method {
            Method::Get => self.client.get(url),
            Method::Head => self.client.head(url),
            Method::Post => self.client.post(url),
        };

        if let Some(headers) = headers {
            builder = builder.headers(to_header_map(headers)?);
        }
        builder = match body {
            Some(Body::Bytes(bytes)) => builder.body(bytes),
            Some(Body::Multipart(parts)) => builder.multipart(to_form(parts)?),
            None => builder,
        };

        tracing::trace!(url, ?method, "sending request");
        do_send(builder).await
    }
}

fn to_header_map(headers: Headers) -> Result<HeaderMap, Error> {
    headers
        .into_iter()
        .map(|(k, v)| {
            let name = HeaderName::from_str(&k).map_err(|e| Error::Other(e.to_string()))?;
            let value = HeaderValue::from_str(&v).map_err(|e| Error::Other(e.to_string()))?;

            Ok((name, value))
        })
        .collect()
}

fn to_form(parts: Vec<FormPart>) -> Result<Form, Error> {
    parts.into_iter().try_fold(Form::new(), |form, part| {
        let mut field = Part::bytes(part.body);
        if let Some(file_name) = part.file_name {
            field = field.file_name(file_name);
        }
        if let Some(content_type) = part.content_type {
            field = field
                .mime_str(&content_type)
                .map_err(|e| Error::Other(e.to_string()))?;
        }

        Ok(form.part(part.name, field))
    })
}

async fn do_send(builder: reqwest::RequestBuilder) -> Result<Response, Error> {
    let response = builder
        .send()
        .await
        .map_err(|e| Error::HttpError(e.to_string()))?;

    let headers = response
        .headers()
        .iter()
        .map(|(k, v)| {
            let value = v.to_str().map_err(|e| Error::Other(e.to_string()))?;

            Ok((k.to_string(), value.to_string()))
        })
        .collect::<Result<Headers, Error>>()?;
    let status = StatusCode(response.status().as_u16());
    let body = response
        .bytes()
        .await
        .map_err(|e| Error::HttpError(e.to_string()))?;

    Ok(Response {
        body: body.to_vec(),
        headers,
        status,
    })
}
