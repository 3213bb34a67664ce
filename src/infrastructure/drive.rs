use super::sheets::server_message;
use crate::domain::ports::{FileUploader, UploadedFile};
use crate::error::{RegistryError, Result};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use unicode_normalization::UnicodeNormalization;

/// Drops combining diacritics so "Acción Niño.pdf" is sent as "Accion Nino.pdf".
pub fn strip_accents(name: &str) -> String {
    name.nfd()
        .filter(|c| !('\u{0300}'..='\u{036f}').contains(c))
        .collect()
}

/// Uploads files to a Drive folder through a multipart endpoint.
///
/// The form is not wired to this; it is reachable from the `upload` command.
#[derive(Debug, Clone)]
pub struct DriveUploader {
    client: Client,
    endpoint: String,
}

impl DriveUploader {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl FileUploader for DriveUploader {
    async fn upload(
        &self,
        contents: Vec<u8>,
        file_name: &str,
        folder_id: &str,
    ) -> Result<UploadedFile> {
        let file_name = strip_accents(file_name);
        log::debug!("Uploading {file_name} to folder {folder_id}");

        let form = Form::new()
            .part("file", Part::bytes(contents).file_name(file_name))
            .text("folderId", folder_id.to_string());

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            log::error!("Upload endpoint answered {status}");
            return Err(RegistryError::Rejected {
                status: status.as_u16(),
                message: server_message(&body),
            });
        }

        let uploaded: UploadedFile = serde_json::from_str(&body)?;
        log::info!("Uploaded file to Drive: {}", uploaded.file_url);
        Ok(uploaded)
    }
}
