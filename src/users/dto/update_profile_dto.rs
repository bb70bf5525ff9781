use actix_multipart::form::{bytes::Bytes, text::Text, MultipartForm};

/// Multipart body of a profile update. Every part is optional.
#[derive(MultipartForm)]
pub struct UpdateProfileForm {
  pub fullname: Option<Text<String>>,
  pub email: Option<Text<String>>,
  #[multipart(rename = "phoneNumber")]
  pub phone_number: Option<Text<String>>,
  pub bio: Option<Text<String>>,
  /// Comma separated.
  pub skills: Option<Text<String>>,
  /// Resume or any other document.
  pub file: Option<Bytes>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeUpload {
  pub bytes: Vec<u8>,
  pub file_name: String,
}

/// Normalized update: `None` means "keep the stored value".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateProfileDto {
  pub fullname: Option<String>,
  pub email: Option<String>,
  pub phone_number: Option<String>,
  pub bio: Option<String>,
  pub skills: Option<Vec<String>>,
  pub resume: Option<ResumeUpload>,
}

impl From<UpdateProfileForm> for UpdateProfileDto {
  fn from(form: UpdateProfileForm) -> Self {
    let resume = form
      .file
      .filter(|file| {
        !file.data.is_empty()
          || file.file_name.as_deref().is_some_and(|name| !name.is_empty())
      })
      .map(|file| ResumeUpload {
        bytes: file.data.to_vec(),
        file_name: file.file_name.unwrap_or_default(),
      });
    Self {
      fullname: present(form.fullname),
      email: present(form.email),
      phone_number: present(form.phone_number),
      bio: present(form.bio),
      skills: present(form.skills).map(|skills| parse_skills(&skills)),
      resume,
    }
  }
}

fn present(field: Option<Text<String>>) -> Option<String> {
  field.map(Text::into_inner).filter(|value| !value.is_empty())
}

/// Splits on commas and trims each entry. Order and empty entries are kept.
pub fn parse_skills(skills: &str) -> Vec<String> {
  skills
    .split(',')
    .map(|skill| skill.trim().to_string())
    .collect()
}
