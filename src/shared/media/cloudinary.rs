use std::time::Duration;

use chrono::Utc;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha1::{Digest, Sha1};

use super::{
  MediaUploader, ResourceType, UploadError, UploadOptions, UploadedMedia,
};
use crate::shared::config::CloudinaryConfig;

const DEFAULT_API_BASE: &str = "https://api.cloudinary.com";

/// Client for Cloudinary's signed upload API.
#[derive(Clone)]
pub struct CloudinaryUploader {
  client: reqwest::Client,
  config: CloudinaryConfig,
  api_base: String,
}

#[derive(Debug, Deserialize)]
struct CloudinaryResponse {
  secure_url: Option<String>,
}

impl CloudinaryUploader {
  pub fn new(config: CloudinaryConfig) -> Result<Self, UploadError> {
    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .build()?;
    Ok(Self {
      client,
      config,
      api_base: DEFAULT_API_BASE.to_string(),
    })
  }

  fn endpoint(&self, resource_type: ResourceType) -> String {
    format!(
      "{}/v1_1/{}/{}/upload",
      self.api_base,
      self.config.cloud_name,
      resource_type.as_str()
    )
  }

  fn signed_form(&self) -> Form {
    let timestamp = Utc::now().timestamp().to_string();
    let signature = sign_params(
      &[("timestamp", timestamp.as_str())],
      &self.config.api_secret,
    );
    Form::new()
      .text("api_key", self.config.api_key.clone())
      .text("timestamp", timestamp)
      .text("signature", signature)
  }

  async fn send(
    &self,
    resource_type: ResourceType,
    form: Form,
  ) -> Result<UploadedMedia, UploadError> {
    let response = self
      .client
      .post(self.endpoint(resource_type))
      .multipart(form)
      .send()
      .await?;

    let status = response.status();
    if !status.is_success() {
      let body = response.text().await.unwrap_or_default();
      return Err(UploadError::Rejected {
        status: status.as_u16(),
        body,
      });
    }

    let body: CloudinaryResponse = response.json().await?;
    body
      .secure_url
      .filter(|url| !url.is_empty())
      .map(|secure_url| UploadedMedia { secure_url })
      .ok_or(UploadError::MissingUrl)
  }
}

impl MediaUploader for CloudinaryUploader {
  async fn upload(&self, source: &str) -> Result<UploadedMedia, UploadError> {
    let form = self.signed_form().text("file", source.to_string());
    self.send(ResourceType::Image, form).await
  }

  async fn upload_bytes(
    &self,
    bytes: Vec<u8>,
    file_name: &str,
    options: UploadOptions,
  ) -> Result<UploadedMedia, UploadError> {
    let part = Part::bytes(bytes).file_name(file_name.to_string());
    let form = self.signed_form().part("file", part);
    self.send(options.resource_type, form).await
  }
}

/// Signature over the non-empty parameters sorted by name, joined as a query
/// string and suffixed with the API secret.
pub fn sign_params(params: &[(&str, &str)], api_secret: &str) -> String {
  let mut signed: Vec<&(&str, &str)> =
    params.iter().filter(|(_, value)| !value.is_empty()).collect();
  signed.sort_by(|a, b| a.0.cmp(b.0));

  let to_sign = signed
    .iter()
    .map(|(key, value)| format!("{}={}", key, value))
    .collect::<Vec<_>>()
    .join("&");

  let mut hasher = Sha1::new();
  hasher.update(to_sign.as_bytes());
  hasher.update(api_secret.as_bytes());
  hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn config() -> CloudinaryConfig {
    CloudinaryConfig {
      cloud_name: "portal".to_string(),
      api_key: "key".to_string(),
      api_secret: "secret".to_string(),
      timeout_secs: 5,
    }
  }

  #[test]
  fn test_signature_is_sha1_of_params_and_secret() {
    // sha1("abc")
    assert_eq!(
      sign_params(&[], "abc"),
      "a9993e364706816aba3e25717850c26c9cd0d89d"
    );
  }

  #[test]
  fn test_signature_ignores_param_order_and_empty_values() {
    let a = sign_params(&[("timestamp", "1"), ("folder", "cv")], "s");
    let b =
      sign_params(&[("folder", "cv"), ("public_id", ""), ("timestamp", "1")], "s");
    assert_eq!(a, b);
    assert_eq!(a.len(), 40);
    assert_ne!(a, sign_params(&[("timestamp", "1"), ("folder", "cv")], "t"));
  }

  #[test]
  fn test_endpoint_uses_cloud_name_and_resource_type() {
    let uploader = CloudinaryUploader::new(config()).unwrap();
    assert_eq!(
      uploader.endpoint(ResourceType::Auto),
      "https://api.cloudinary.com/v1_1/portal/auto/upload"
    );
    assert_eq!(
      uploader.endpoint(ResourceType::Image),
      "https://api.cloudinary.com/v1_1/portal/image/upload"
    );
  }
}
