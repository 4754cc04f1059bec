//! Request and response values passed through the API client
//!
//! An [`ApiRequest`] owns everything needed to send it again, so the
//! interceptor can replay it after a refresh.

use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::errors::ApiError;

/// Request body
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(Value),
    /// Single-file `multipart/form-data` upload
    Multipart { field: String, file_name: String, content_type: String, bytes: Vec<u8> },
}

impl RequestBody {
    pub(crate) fn apply(&self, builder: RequestBuilder) -> Result<RequestBuilder, ApiError> {
        match self {
            Self::Empty => Ok(builder),
            Self::Json(value) => Ok(builder.json(value)),
            Self::Multipart { field, file_name, content_type, bytes } => {
                let part = Part::bytes(bytes.clone())
                    .file_name(file_name.clone())
                    .mime_str(content_type)
                    .map_err(|err| {
                        ApiError::Validation(format!("invalid content type {content_type}: {err}"))
                    })?;
                Ok(builder.multipart(Form::new().part(field.clone(), part)))
            }
        }
    }
}

/// One call against the ordering API
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) query: Vec<(String, String)>,
    pub(crate) body: RequestBody,
    /// Set once the request has been through a refresh; a second 401 is final.
    pub(crate) retried: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
            retried: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Append query parameters from a flat struct. `None` fields are skipped.
    ///
    /// # Errors
    /// `ApiError::Validation` if `params` is not a flat JSON object.
    pub fn query<P: Serialize + ?Sized>(mut self, params: &P) -> Result<Self, ApiError> {
        let value = serde_json::to_value(params)
            .map_err(|err| ApiError::Validation(format!("failed to encode query: {err}")))?;

        let Value::Object(map) = value else {
            return Err(ApiError::Validation("query parameters must be an object".into()));
        };

        for (key, value) in map {
            let rendered = match value {
                Value::Null => continue,
                Value::String(s) => s,
                Value::Bool(b) => b.to_string(),
                Value::Number(n) => n.to_string(),
                Value::Array(_) | Value::Object(_) => {
                    return Err(ApiError::Validation(format!("query parameter {key} is not scalar")));
                }
            };
            self.query.push((key, rendered));
        }
        Ok(self)
    }

    /// Set a JSON body.
    ///
    /// # Errors
    /// `ApiError::Validation` if `body` cannot be serialized.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body)
            .map_err(|err| ApiError::Validation(format!("failed to serialize body: {err}")))?;
        self.body = RequestBody::Json(value);
        Ok(self)
    }

    /// Set a single-file multipart body.
    pub fn multipart(
        mut self,
        field: impl Into<String>,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        self.body = RequestBody::Multipart {
            field: field.into(),
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        };
        self
    }

    pub const fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    pub const fn is_retried(&self) -> bool {
        self.retried
    }
}

/// Status and raw body of a completed exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// `Ok(self)` for 2xx, otherwise `ApiError::Http` carrying the body.
    ///
    /// # Errors
    /// `ApiError::Http` for any non-2xx status.
    pub fn error_for_status(self) -> Result<Self, ApiError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(self.into_error())
        }
    }

    pub(crate) fn into_error(self) -> ApiError {
        ApiError::Http { status: self.status, body: String::from_utf8_lossy(&self.body).into_owned() }
    }

    /// Decode the body as JSON.
    ///
    /// 204/205 and empty bodies decode as JSON `null`, so `()` and
    /// `Option<T>` targets work.
    ///
    /// # Errors
    /// `ApiError::Decode` if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        let no_content = self.status == StatusCode::NO_CONTENT.as_u16()
            || self.status == StatusCode::RESET_CONTENT.as_u16();

        if no_content || self.body.is_empty() {
            return serde_json::from_value(Value::Null).map_err(|_| {
                ApiError::Decode(format!(
                    "No content response ({}), but response type cannot be deserialized from empty body",
                    self.status
                ))
            });
        }

        serde_json::from_slice(&self.body)
            .map_err(|err| ApiError::Decode(format!("Failed to parse response: {err}")))
    }
}
