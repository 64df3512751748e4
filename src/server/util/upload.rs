//! Form bodies that may carry an image upload.
//!
//! Advert and profile forms arrive either as `multipart/form-data` (with an optional image
//! in the `imageUrl` part) or as a plain JSON object. Both are normalised into an
//! [`UploadForm`] of text fields plus at most one accepted image.

use std::collections::HashMap;

use axum::{
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    Json,
};
use serde_json::{Map, Value};

use crate::server::{error::AppError, service::media::is_accepted_image};

/// Name of the form part carrying the image file.
pub const IMAGE_FIELD: &str = "imageUrl";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    /// File name as sent by the client, not yet sanitised.
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Default)]
pub struct UploadForm {
    fields: HashMap<String, String>,
    image: Option<UploadedImage>,
}

impl UploadForm {
    /// Trimmed value of a text field, `None` when absent or blank.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    pub fn take_image(&mut self) -> Option<UploadedImage> {
        self.image.take()
    }

    async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if name == IMAGE_FIELD && field.file_name().is_some() {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;

                if bytes.is_empty() || !is_accepted_image(&content_type) {
                    tracing::debug!("Ignoring upload '{}' of type '{}'", file_name, content_type);
                    continue;
                }

                form.image = Some(UploadedImage {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            } else {
                let value = field.text().await?;
                form.fields.insert(name, value);
            }
        }

        Ok(form)
    }

    fn from_json(map: Map<String, Value>) -> Self {
        let fields = map
            .into_iter()
            .filter_map(|(key, value)| {
                let text = match value {
                    Value::String(s) => s,
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    _ => return None,
                };
                Some((key, text))
            })
            .collect();

        Self {
            fields,
            image: None,
        }
    }
}

impl<S> FromRequest<S> for UploadForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("multipart/form-data"));

        if is_multipart {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            return Self::from_multipart(multipart).await;
        }

        let Json(map) = Json::<Map<String, Value>>::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        Ok(Self::from_json(map))
    }
}
