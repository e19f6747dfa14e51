use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use tracing::{instrument, warn};
use url::Url;

use crate::error::{Error, Result};
use crate::utils::upload::UploadFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    Text { name: String, value: String },
    File { name: String, file: UploadFile },
}

/// Ordered form-data fields, the way a browser `FormData` would send them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultipartBody {
    pub parts: Vec<Part>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: impl Into<String>) -> Self {
        self.parts.push(Part::Text {
            name: name.to_string(),
            value: value.into(),
        });
        self
    }

    pub fn file(mut self, name: &str, file: UploadFile) -> Self {
        self.parts.push(Part::File {
            name: name.to_string(),
            file,
        });
        self
    }

    pub fn text_value(&self, field: &str) -> Option<&str> {
        self.parts.iter().find_map(|part| match part {
            Part::Text { name, value } if name == field => Some(value.as_str()),
            _ => None,
        })
    }

    fn into_form(self) -> Result<reqwest::multipart::Form> {
        let mut form = reqwest::multipart::Form::new();
        for part in self.parts {
            form = match part {
                Part::Text { name, value } => form.text(name, value),
                Part::File { name, file } => {
                    let body = reqwest::multipart::Part::bytes(file.bytes.to_vec())
                        .file_name(file.file_name)
                        .mime_str(&file.content_type)?;
                    form.part(name, body)
                }
            };
        }
        Ok(form)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(JsonValue),
    Multipart(MultipartBody),
}

/// One call against the recruitment backend, relative to its base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
}

impl ApiRequest {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn queries(mut self, pairs: Vec<(String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    pub fn json<T: serde::Serialize>(mut self, body: &T) -> Result<Self> {
        self.body = RequestBody::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn multipart(mut self, body: MultipartBody) -> Self {
        self.body = RequestBody::Multipart(body);
        self
    }
}

/// Raw answer of the backend before success is decided.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiReply {
    pub status: u16,
    pub body: JsonValue,
}

impl ApiReply {
    pub fn new(status: u16, body: JsonValue) -> Self {
        Self { status, body }
    }

    /// 2xx and no explicit `success: false` in the body. Both signals the
    /// backend uses are folded into this one check.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
            && !matches!(self.body.get("success"), Some(JsonValue::Bool(false)))
    }

    pub fn message(&self) -> Option<&str> {
        self.body
            .get("message")
            .and_then(JsonValue::as_str)
            .filter(|m| !m.trim().is_empty())
    }

    pub fn into_result(self) -> Result<ApiReply> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(Error::Server {
                status: self.status,
                message: self.message().map(str::to_string),
            })
        }
    }

    /// The object under the first wrapper key that holds one. Acknowledgements
    /// without a record give `None`.
    pub fn record(&self, keys: &[&str]) -> Option<&JsonValue> {
        keys.iter()
            .find_map(|key| self.body.get(*key).filter(|v| v.is_object()))
    }

    /// Decodes the payload from the first present wrapper key, else from the
    /// body itself.
    pub fn extract<T: DeserializeOwned>(&self, keys: &[&str]) -> Result<T> {
        let value = keys
            .iter()
            .find_map(|key| self.body.get(*key).filter(|v| !v.is_null()))
            .unwrap_or(&self.body);
        Ok(serde_json::from_value(value.clone())?)
    }

    /// Like [`extract`](Self::extract) for collections; anything that is not
    /// an array decodes to an empty list.
    pub fn extract_list<T: DeserializeOwned>(&self, keys: &[&str]) -> Result<Vec<T>> {
        let value = keys
            .iter()
            .find_map(|key| self.body.get(*key))
            .unwrap_or(&self.body);
        match value {
            JsonValue::Array(_) => Ok(serde_json::from_value(value.clone())?),
            _ => Ok(Vec::new()),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> Result<ApiReply>;
}

#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
}

impl HttpTransport {
    pub fn new(base_url: Url, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, request), fields(method = ?request.method, path = %request.path))]
    async fn execute(&self, request: ApiRequest) -> Result<ApiReply> {
        let url = self
            .base_url
            .join(request.path.trim_start_matches('/'))
            .map_err(|e| Error::BadRequest(format!("Invalid endpoint {}: {}", request.path, e)))?;

        let mut builder = self.client.request(request.method.into(), url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(body) => builder.multipart(body.into_form()?),
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        let body = if text.trim().is_empty() {
            JsonValue::Null
        } else {
            match serde_json::from_str(&text) {
                Ok(value) => value,
                Err(_) => {
                    warn!(status, "Backend answered with a non-JSON body");
                    JsonValue::String(text)
                }
            }
        };

        Ok(ApiReply { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_needs_ok_status_and_no_false_flag() {
        assert!(ApiReply::new(200, json!({"success": true})).is_success());
        assert!(ApiReply::new(201, json!({"jobs": []})).is_success());
        assert!(ApiReply::new(204, JsonValue::Null).is_success());
        assert!(!ApiReply::new(200, json!({"success": false, "message": "Duplicate"})).is_success());
        assert!(!ApiReply::new(400, json!({"success": true})).is_success());
        assert!(!ApiReply::new(500, JsonValue::Null).is_success());
    }

    #[test]
    fn failure_keeps_server_message() {
        let err = ApiReply::new(409, json!({"message": "Already subscribed"}))
            .into_result()
            .unwrap_err();
        assert_eq!(err.user_message("Could not subscribe."), "Already subscribed");

        let silent = ApiReply::new(500, json!({"message": "  "})).into_result().unwrap_err();
        assert_eq!(silent.user_message("Could not subscribe."), "Could not subscribe.");
    }

    #[test]
    fn extract_from_wrapper_or_bare_body() {
        let wrapped = ApiReply::new(200, json!({"success": true, "items": [1, 2]}));
        let bare = ApiReply::new(200, json!([1, 2]));
        let odd = ApiReply::new(200, json!({"success": true}));
        assert_eq!(wrapped.extract_list::<u8>(&["items"]).unwrap(), vec![1, 2]);
        assert_eq!(bare.extract_list::<u8>(&["items"]).unwrap(), vec![1, 2]);
        assert!(odd.extract_list::<u8>(&["items"]).unwrap().is_empty());
    }
}
