use std::collections::HashMap;

use axum::extract::Multipart;

use crate::server::{error::validation::ValidationError, service::image_host::ImageUpload};

/// Name of the multipart part carrying a donation picture.
pub const PICTURE_FIELD: &str = "picture";

/// Text fields and the optional picture of a multipart form.
#[derive(Debug, Default)]
pub struct FormData {
    fields: HashMap<String, String>,
    pub picture: Option<ImageUpload>,
}

impl FormData {
    /// Removes and returns the text field `name`.
    pub fn take(&mut self, name: &str) -> Option<String> {
        self.fields.remove(name)
    }
}

/// Reads every part of `multipart`.
///
/// The `picture` part is kept as raw bytes when it carries a file name and is non-empty,
/// every other part is read as text. Later parts with the same name replace earlier ones.
pub async fn read_form(mut multipart: Multipart) -> Result<FormData, ValidationError> {
    let mut form = FormData::default();

    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == PICTURE_FIELD {
            if let Some(filename) = field.file_name().map(str::to_string) {
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(malformed)?;

                if !bytes.is_empty() {
                    form.picture = Some(ImageUpload {
                        bytes: bytes.to_vec(),
                        filename,
                        content_type,
                    });
                }
                continue;
            }
        }

        let value = field.text().await.map_err(malformed)?;
        form.fields.insert(name, value);
    }

    Ok(form)
}

fn malformed(e: axum::extract::multipart::MultipartError) -> ValidationError {
    ValidationError::MalformedForm(e.body_text())
}
