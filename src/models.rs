use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Store or ad network the generated content is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TargetPlatform {
    AppleAppStore,
    GooglePlayStore,
    AppleAds,
    GoogleAds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TargetContentType {
    Localization,
    DemoExpansion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Lifecycle of a project on the service side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
}

impl ProjectStatus {
    /// Terminal = won't change anymore (COMPLETED or FAILED).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    pub fn is_complete(&self) -> bool {
        *self == Self::Completed
    }

    pub fn is_failed(&self) -> bool {
        *self == Self::Failed
    }
}

/// Kind of an uploaded source asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetType {
    Image,
    Video,
    Text,
    Glossary,
}

impl AssetType {
    /// Wire value, as sent in the `assetType` form field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "IMAGE",
            Self::Video => "VIDEO",
            Self::Text => "TEXT",
            Self::Glossary => "GLOSSARY",
        }
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of an asset produced by generation. Glossaries are input-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GeneratedAssetType {
    Image,
    Video,
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ImageGenerationConfig {
    pub width: u32,
    pub height: u32,
    pub count: u32,
}

/// One language/market the project should be generated for.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TargetContentConfig {
    /// Free-form, e.g. "Arabic".
    pub target_language: String,

    /// Free-form, e.g. "Saudi Arabia".
    pub target_location: String,

    /// Age range such as "18-24".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_demo_age: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_demo_gender: Option<Gender>,

    /// Predefined custom product page, e.g. "APPLE_APP_CPP".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_custom_product_page: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_configs: Option<Vec<ImageGenerationConfig>>,
}

impl TargetContentConfig {
    pub fn new(language: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            target_language: language.into(),
            target_location: location.into(),
            target_demo_age: None,
            target_demo_gender: None,
            target_custom_product_page: None,
            image_configs: None,
        }
    }

    pub fn with_demo_age(mut self, age: impl Into<String>) -> Self {
        self.target_demo_age = Some(age.into());
        self
    }

    pub fn with_demo_gender(mut self, gender: Gender) -> Self {
        self.target_demo_gender = Some(gender);
        self
    }

    pub fn with_custom_product_page(mut self, page: impl Into<String>) -> Self {
        self.target_custom_product_page = Some(page.into());
        self
    }

    /// Append an image spec; creates the list on first use.
    pub fn with_image_config(mut self, width: u32, height: u32, count: u32) -> Self {
        self.image_configs
            .get_or_insert_with(Vec::new)
            .push(ImageGenerationConfig {
                width,
                height,
                count,
            });
        self
    }
}

/// Body of `POST /projects`.
///
/// The service requires at least one entry in `target_content_configs`; the
/// SDK does not check this and leaves the rejection to the API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CreateProjectRequest {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instruction: Option<String>,

    pub target_platform: TargetPlatform,
    pub target_content_type: TargetContentType,

    /// Page whose content should be localized or expanded.
    pub content_url: String,

    pub target_content_configs: Vec<TargetContentConfig>,
}

impl CreateProjectRequest {
    pub fn new(
        name: impl Into<String>,
        target_platform: TargetPlatform,
        target_content_type: TargetContentType,
        content_url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: None,
            instruction: None,
            target_platform,
            target_content_type,
            content_url: content_url.into(),
            target_content_configs: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = Some(instruction.into());
        self
    }

    pub fn with_target(mut self, config: TargetContentConfig) -> Self {
        self.target_content_configs.push(config);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CreateProjectResponse {
    #[serde(rename = "projectId")]
    pub project_id: String,
}

/// Source asset attached to a project.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AssetDetail {
    pub asset_id: String,
    pub name: String,
    pub asset_type: AssetType,
    /// Empty until the service has processed the asset.
    #[serde(default)]
    pub resource_uri: String,
}

/// Full project record returned by `GET /projects/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProjectDetails {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instruction: Option<String>,

    pub target_platform: TargetPlatform,
    pub target_content_type: TargetContentType,
    pub content_url: String,

    #[serde(default)]
    pub target_content_configs: Vec<TargetContentConfig>,

    /// ISO 8601.
    pub created_at: String,
    /// ISO 8601.
    pub updated_at: String,

    pub status: ProjectStatus,

    #[serde(default)]
    pub assets: Vec<AssetDetail>,
}

impl ProjectDetails {
    /// Decode a `GET /projects/{id}` body, which is either the bare record or
    /// the record wrapped in `{"project": ...}`.
    pub(crate) fn from_response(value: &Value) -> serde_json::Result<Self> {
        let record = value.get("project").unwrap_or(value);
        Self::deserialize(record)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UploadAssetResponse {
    pub asset_id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GeneratedAsset {
    pub generated_asset_id: String,
    pub asset_type: GeneratedAssetType,
    pub name: String,
    pub resource_uri: String,
}

/// Generated output for one target content config.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TargetResult {
    pub target_content_config_id: String,
    #[serde(default)]
    pub results: Vec<GeneratedAsset>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProjectResultsResponse {
    pub project_id: String,
    /// Kept as the raw string the service sends.
    pub status: String,
    #[serde(default)]
    pub targets: Vec<TargetResult>,
}

impl ProjectResultsResponse {
    /// Results for one target content config, if the service returned any.
    pub fn target(&self, target_content_config_id: &str) -> Option<&TargetResult> {
        self.targets
            .iter()
            .find(|t| t.target_content_config_id == target_content_config_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RerunResponse {
    pub status: String,
}

/// A file to send with [`Client::upload_asset`](crate::Client::upload_asset).
///
/// Path-backed files are not touched until the upload runs; the handle is
/// opened right before the request and released when the read completes.
#[derive(Debug, Clone)]
pub struct AssetFile {
    pub(crate) file_name: String,
    pub(crate) source: AssetSource,
    pub(crate) mime: Option<String>,
}

#[derive(Debug, Clone)]
pub(crate) enum AssetSource {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

impl AssetFile {
    /// Upload the file at `path`. The form filename is the path's last
    /// component.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "asset".to_string());

        Self {
            file_name,
            source: AssetSource::Path(path.to_path_buf()),
            mime: None,
        }
    }

    /// Upload bytes already in memory under the given filename.
    pub fn from_bytes(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            source: AssetSource::Bytes(bytes.into()),
            mime: None,
        }
    }

    /// Send the file part with this Content-Type instead of one guessed from
    /// the filename.
    pub fn with_mime_type(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Content-Type of the file part: the explicit one if set, otherwise
    /// guessed from the filename extension, falling back to
    /// `application/octet-stream`.
    pub fn mime_type(&self) -> String {
        match &self.mime {
            Some(mime) => mime.clone(),
            None => mime_guess::from_path(&self.file_name)
                .first_or_octet_stream()
                .essence_str()
                .to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Internal wire helpers (not part of the public API surface)
// ---------------------------------------------------------------------------

/// POST /projects/{id}/textAssets body.
#[derive(Serialize)]
pub(crate) struct TextAssetRequest<'a> {
    #[serde(rename = "assetType")]
    pub asset_type: AssetType,
    #[serde(rename = "textField")]
    pub text_field: &'a str,
    #[serde(rename = "textContent")]
    pub text_content: &'a str,
}

/// POST /projects/{id}/rerun body.
#[derive(Serialize)]
pub(crate) struct RerunRequest<'a> {
    pub target_content_config_id: &'a str,
}
