//! Decoded request payloads.
//!
//! A request carries exactly one [`Body`] variant. The query string and the
//! payload both decode into a `Body`, and the two are merged by key union
//! with [`Body::merge`].

use std::collections::HashMap;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

/// The decoded representation of a request payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Body {
    /// No payload, or a payload whose content type is not recognized.
    #[default]
    Empty,
    /// `application/x-www-form-urlencoded` fields, or query string fields.
    FormFields(HashMap<String, String>),
    /// An `application/json` document.
    Json(Value),
    /// `multipart/form-data` fields keyed by their `name`.
    MultipartForm(HashMap<String, MultipartField>),
}

/// A single named field of a multipart form.
#[derive(Debug, Clone, PartialEq)]
pub enum MultipartField {
    Text(String),
    File(FilePart),
}

/// An uploaded file: the original filename and the raw content.
#[derive(Debug, Clone, PartialEq)]
pub struct FilePart {
    filename: String,
    content: Bytes,
}

impl FilePart {
    pub fn new(filename: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self { filename: filename.into(), content: content.into() }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn content(&self) -> &Bytes {
        &self.content
    }
}

impl MultipartField {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MultipartField::Text(text) => Some(text),
            MultipartField::File(_) => None,
        }
    }

    pub fn as_file(&self) -> Option<&FilePart> {
        match self {
            MultipartField::Text(_) => None,
            MultipartField::File(file) => Some(file),
        }
    }
}

impl From<&str> for MultipartField {
    fn from(value: &str) -> Self {
        MultipartField::Text(value.to_owned())
    }
}

impl From<FilePart> for MultipartField {
    fn from(file: FilePart) -> Self {
        MultipartField::File(file)
    }
}

impl Body {
    /// Returns true for [`Body::Empty`] and for field maps with no entries.
    pub fn is_empty(&self) -> bool {
        match self {
            Body::Empty => true,
            Body::FormFields(fields) => fields.is_empty(),
            Body::Json(_) => false,
            Body::MultipartForm(fields) => fields.is_empty(),
        }
    }

    /// Looks up a string field by name.
    ///
    /// Works for form fields, text parts of a multipart form, and string
    /// members of a JSON object.
    pub fn get(&self, name: &str) -> Option<&str> {
        match self {
            Body::Empty => None,
            Body::FormFields(fields) => fields.get(name).map(String::as_str),
            Body::Json(value) => value.get(name).and_then(Value::as_str),
            Body::MultipartForm(fields) => fields.get(name).and_then(MultipartField::as_text),
        }
    }

    /// Looks up an uploaded file by field name.
    pub fn file(&self, name: &str) -> Option<&FilePart> {
        match self {
            Body::MultipartForm(fields) => fields.get(name).and_then(MultipartField::as_file),
            _ => None,
        }
    }

    /// Deserializes the body into `T`.
    ///
    /// Form fields and multipart text fields are presented as a JSON object of
    /// strings; uploaded files are skipped. An empty body is presented as `null`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        let value = match self {
            Body::Empty => Value::Null,
            Body::Json(value) => value.clone(),
            Body::FormFields(fields) => {
                Value::Object(fields.iter().map(|(k, v)| (k.clone(), Value::String(v.clone()))).collect())
            }
            Body::MultipartForm(fields) => Value::Object(
                fields
                    .iter()
                    .filter_map(|(k, v)| v.as_text().map(|text| (k.clone(), Value::String(text.to_owned()))))
                    .collect(),
            ),
        };
        serde_json::from_value(value)
    }

    /// Merges `other` into `self` by key union; keys from `other` win.
    pub fn merge(self, other: Body) -> Body {
        match (self, other) {
            (Body::Empty, other) => other,
            (this, Body::Empty) => this,

            (Body::FormFields(mut fields), Body::FormFields(other)) => {
                fields.extend(other);
                Body::FormFields(fields)
            }

            (Body::FormFields(fields), Body::MultipartForm(other)) => {
                let mut merged: HashMap<String, MultipartField> =
                    fields.into_iter().map(|(k, v)| (k, MultipartField::Text(v))).collect();
                merged.extend(other);
                Body::MultipartForm(merged)
            }

            (Body::MultipartForm(mut fields), Body::MultipartForm(other)) => {
                fields.extend(other);
                Body::MultipartForm(fields)
            }

            (Body::MultipartForm(mut fields), Body::FormFields(other)) => {
                fields.extend(other.into_iter().map(|(k, v)| (k, MultipartField::Text(v))));
                Body::MultipartForm(fields)
            }

            (Body::FormFields(fields), Body::Json(Value::Object(object))) => {
                let mut merged: Map<String, Value> = fields.into_iter().map(|(k, v)| (k, Value::String(v))).collect();
                merged.extend(object);
                Body::Json(Value::Object(merged))
            }

            (Body::Json(Value::Object(mut object)), Body::Json(Value::Object(other))) => {
                object.extend(other);
                Body::Json(Value::Object(object))
            }

            (this, other) => {
                debug!(dropped = this.kind(), kept = other.kind(), "bodies have no common key space, keeping the later one");
                other
            }
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Body::Empty => "empty",
            Body::FormFields(_) => "form",
            Body::Json(_) => "json",
            Body::MultipartForm(_) => "multipart",
        }
    }
}
