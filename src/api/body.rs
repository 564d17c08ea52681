use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;

/// Outgoing request body. Multipart bodies are kept as plain data and only
/// turned into a transport form at send time.
#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    Text(String),
    Multipart(MultipartForm),
}

impl RequestBody {
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, ApiError> {
        serde_json::to_value(value)
            .map(RequestBody::Json)
            .map_err(|e| ApiError::decode(None, format!("Failed to encode request body: {}", e)))
    }

    pub fn is_multipart(&self) -> bool {
        matches!(self, RequestBody::Multipart(_))
    }
}

impl From<Value> for RequestBody {
    fn from(value: Value) -> Self {
        RequestBody::Json(value)
    }
}

impl From<MultipartForm> for RequestBody {
    fn from(form: MultipartForm) -> Self {
        RequestBody::Multipart(form)
    }
}

/// A file attached to a multipart request (company logo, employee photo, ...)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Read a file from disk, guessing its content type from the extension
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let mime_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();

        Ok(Self::new(file_name, mime_type, bytes))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValue {
    Text(String),
    File(FileUpload),
}

/// Ordered multipart fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartForm {
    fields: Vec<(String, FormValue)>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.fields.push((name.into(), FormValue::Text(value.to_string())));
        self
    }

    /// Append a text field only when a value is present (partial updates)
    pub fn text_opt<V: ToString>(self, name: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(v) => self.text(name, v),
            None => self,
        }
    }

    pub fn file(mut self, name: impl Into<String>, file: FileUpload) -> Self {
        self.fields.push((name.into(), FormValue::File(file)));
        self
    }

    pub fn file_opt(self, name: impl Into<String>, file: Option<FileUpload>) -> Self {
        match file {
            Some(f) => self.file(name, f),
            None => self,
        }
    }

    pub fn fields(&self) -> &[(String, FormValue)] {
        &self.fields
    }

    pub fn get_text(&self, name: &str) -> Option<&str> {
        self.fields.iter().find_map(|(n, v)| match v {
            FormValue::Text(t) if n == name => Some(t.as_str()),
            _ => None,
        })
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|(n, _)| n == name)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub(crate) fn into_reqwest(self) -> Result<reqwest::multipart::Form, ApiError> {
        let mut form = reqwest::multipart::Form::new();
        for (name, value) in self.fields {
            form = match value {
                FormValue::Text(text) => form.text(name, text),
                FormValue::File(file) => {
                    let part = reqwest::multipart::Part::bytes(file.bytes)
                        .file_name(file.file_name)
                        .mime_str(&file.mime_type)
                        .map_err(|e| {
                            ApiError::decode(None, format!("Invalid upload content type: {}", e))
                        })?;
                    form.part(name, part)
                }
            };
        }
        Ok(form)
    }
}
