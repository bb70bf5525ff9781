pub mod cloudinary;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
  #[error("Http error: {0}")]
  HttpError(#[from] reqwest::Error),

  #[error("Upload rejected with status {status}: {body}")]
  Rejected { status: u16, body: String },

  #[error("Upload response did not contain a secure url")]
  MissingUrl,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedMedia {
  pub secure_url: String,
}

/// How the upload service should classify the stored asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResourceType {
  #[default]
  Image,
  Auto,
}

impl ResourceType {
  pub fn as_str(&self) -> &'static str {
    match self {
      ResourceType::Image => "image",
      ResourceType::Auto => "auto",
    }
  }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UploadOptions {
  pub resource_type: ResourceType,
}

/// External asset store returning a durable URL for each upload.
pub trait MediaUploader {
  /// Uploads a data URI or a remote URL.
  async fn upload(&self, source: &str) -> Result<UploadedMedia, UploadError>;

  /// Uploads a raw file buffer.
  async fn upload_bytes(
    &self,
    bytes: Vec<u8>,
    file_name: &str,
    options: UploadOptions,
  ) -> Result<UploadedMedia, UploadError>;
}

#[cfg(test)]
pub mod tests {
  use super::{MediaUploader, UploadError, UploadOptions, UploadedMedia};
  use std::sync::{Arc, RwLock};

  #[derive(Debug, Clone, PartialEq, Eq)]
  pub struct RecordedUpload {
    pub file_name: Option<String>,
    pub size: usize,
    pub resource_type: &'static str,
  }

  /// Clones share the recorded uploads.
  #[derive(Clone)]
  pub struct FakeMediaUploader {
    pub fail: bool,
    pub uploads: Arc<RwLock<Vec<RecordedUpload>>>,
  }

  impl FakeMediaUploader {
    pub fn new() -> Self {
      Self {
        fail: false,
        uploads: Arc::new(RwLock::new(Vec::new())),
      }
    }

    pub fn failing() -> Self {
      Self {
        fail: true,
        uploads: Arc::new(RwLock::new(Vec::new())),
      }
    }

    fn record(
      &self,
      upload: RecordedUpload,
    ) -> Result<UploadedMedia, UploadError> {
      if self.fail {
        return Err(UploadError::Rejected {
          status: 502,
          body: "upstream unavailable".to_string(),
        });
      }
      let mut uploads = self.uploads.write().unwrap();
      uploads.push(upload);
      Ok(UploadedMedia {
        secure_url: format!(
          "https://media.test/uploads/{}",
          uploads.len()
        ),
      })
    }
  }

  impl MediaUploader for FakeMediaUploader {
    async fn upload(
      &self,
      source: &str,
    ) -> Result<UploadedMedia, UploadError> {
      self.record(RecordedUpload {
        file_name: None,
        size: source.len(),
        resource_type: "image",
      })
    }

    async fn upload_bytes(
      &self,
      bytes: Vec<u8>,
      file_name: &str,
      options: UploadOptions,
    ) -> Result<UploadedMedia, UploadError> {
      self.record(RecordedUpload {
        file_name: Some(file_name.to_string()),
        size: bytes.len(),
        resource_type: options.resource_type.as_str(),
      })
    }
  }
}
