use std::time::Duration;

use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::errors::{GloberError, Result};
use crate::models::{
    AssetFile, AssetSource, AssetType, CreateProjectRequest, CreateProjectResponse,
    ProjectDetails, ProjectResultsResponse, RerunRequest, RerunResponse, TextAssetRequest,
    UploadAssetResponse,
};

pub const DEFAULT_BASE_URL: &str = "https://api.glober.ai/api/v1";
const TOKEN_ENV: &str = "GLOBER_API_TOKEN";
pub(crate) const USER_AGENT: &str = concat!("globerai-rust/", env!("CARGO_PKG_VERSION"));

/// Builder for constructing a [`Client`] with custom configuration.
///
/// # Example
///
/// ```no_run
/// use globerai::ClientBuilder;
/// use std::time::Duration;
///
/// # fn example() -> globerai::Result<()> {
/// let client = ClientBuilder::new()
///     .token("eyJhbGciOi...")
///     .base_url("https://staging.example.com/api/v1")
///     .timeout(Duration::from_secs(120))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ClientBuilder {
    token: Option<String>,
    base_url: String,
    timeout: Option<Duration>,
    http: Option<reqwest::Client>,
}

impl ClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            token: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            http: None,
        }
    }

    /// Set the bearer token used on every request.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Override the base URL (defaults to `https://api.glober.ai/api/v1`).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set a transport-level timeout. No timeout is applied by default.
    ///
    /// Ignored when a custom client is supplied with
    /// [`http_client`](Self::http_client).
    pub fn timeout(mut self, d: Duration) -> Self {
        self.timeout = Some(d);
        self
    }

    /// Use a preconfigured `reqwest::Client` (proxies, TLS roots, timeouts).
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    /// Build the [`Client`].
    ///
    /// If no token was set via [`token`](Self::token), the builder reads the
    /// `GLOBER_API_TOKEN` environment variable.
    ///
    /// Returns [`GloberError::InvalidArgument`] if no token is available, the
    /// token is not a valid header value, or the base URL does not parse.
    pub fn build(self) -> Result<Client> {
        let token = self
            .token
            .or_else(|| std::env::var(TOKEN_ENV).ok())
            .ok_or_else(|| {
                GloberError::InvalidArgument(
                    "an access token is required. Pass it to ClientBuilder::token() \
                     or set the GLOBER_API_TOKEN environment variable."
                        .into(),
                )
            })?;

        let mut auth = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
            GloberError::InvalidArgument("access token contains invalid header characters".into())
        })?;
        auth.set_sensitive(true);

        let base_url = parse_base_url(&self.base_url)?;

        let http = match self.http {
            Some(http) => http,
            None => {
                let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                builder.build()?
            }
        };

        Ok(Client {
            base_url,
            auth,
            http,
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The Glober AI API client.
///
/// Every method performs exactly one HTTP round trip. Nothing is retried,
/// cached or deduplicated: calling [`create_project`](Self::create_project)
/// twice creates two projects.
///
/// The token is fixed at construction. Clones share it, and clients built
/// with different tokens are fully independent.
///
/// # Example
///
/// ```no_run
/// use globerai::{Client, CreateProjectRequest, TargetContentConfig,
///     TargetContentType, TargetPlatform};
///
/// # async fn example() -> globerai::Result<()> {
/// let client = Client::new("eyJhbGciOi...")?;
///
/// let request = CreateProjectRequest::new(
///     "spring_campaign",
///     TargetPlatform::AppleAppStore,
///     TargetContentType::Localization,
///     "https://apps.apple.com/app/id123",
/// )
/// .with_target(TargetContentConfig::new("Arabic", "Saudi Arabia"));
///
/// let created = client.create_project(&request).await?;
/// let details = client.get_project_details(&created.project_id).await?;
/// println!("{:?}", details.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    auth: HeaderValue,
    http: reqwest::Client,
}

impl Client {
    /// Create a client for the default base URL with the given token.
    ///
    /// For customization, use [`ClientBuilder`] instead.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        ClientBuilder::new().token(token).build()
    }

    /// Create a project. Returns the identifier the service assigned to it.
    pub async fn create_project(
        &self,
        request: &CreateProjectRequest,
    ) -> Result<CreateProjectResponse> {
        let url = self.endpoint(&["projects"])?;
        self.execute(self.request(Method::POST, url).json(request))
            .await
    }

    /// Fetch the full project record, including status and attached assets.
    pub async fn get_project_details(&self, project_id: &str) -> Result<ProjectDetails> {
        let project_id = require_id("project id", project_id)?;
        let url = self.endpoint(&["projects", project_id])?;
        let value: serde_json::Value = self.execute(self.request(Method::GET, url)).await?;
        ProjectDetails::from_response(&value).map_err(|source| GloberError::Decode {
            source,
            body: value.to_string(),
        })
    }

    /// Upload a file asset as `multipart/form-data` with the fields
    /// `assetType` and `file`.
    ///
    /// The `file` part carries the filename and a Content-Type (see
    /// [`AssetFile::mime_type`]). Path-backed files are read right before the
    /// request is sent. A file that cannot be read fails with
    /// [`GloberError::Io`] and nothing is sent.
    ///
    /// Inline text goes through [`upload_text_asset`](Self::upload_text_asset)
    /// instead; the two endpoints are distinct on the service side.
    pub async fn upload_asset(
        &self,
        project_id: &str,
        asset_type: AssetType,
        file: AssetFile,
    ) -> Result<UploadAssetResponse> {
        let project_id = require_id("project id", project_id)?;
        let url = self.endpoint(&["projects", project_id, "assets"])?;

        let mime = file.mime_type();
        let AssetFile {
            file_name, source, ..
        } = file;
        let bytes = match source {
            AssetSource::Path(path) => tokio::fs::read(&path).await?,
            AssetSource::Bytes(bytes) => bytes,
        };

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(&mime)
            .map_err(|_| GloberError::InvalidArgument(format!("invalid MIME type {mime:?}")))?;

        // The request Content-Type is left to reqwest so it carries the
        // generated boundary.
        let form = Form::new()
            .text("assetType", asset_type.as_str())
            .part("file", part);

        self.execute(self.request(Method::POST, url).multipart(form))
            .await
    }

    /// Attach a text asset given inline, as JSON.
    ///
    /// `text_field` names the slot the text belongs to (e.g. a store
    /// listing's subtitle) and `text_content` is the text itself.
    pub async fn upload_text_asset(
        &self,
        project_id: &str,
        text_field: &str,
        text_content: &str,
    ) -> Result<UploadAssetResponse> {
        let project_id = require_id("project id", project_id)?;
        let url = self.endpoint(&["projects", project_id, "textAssets"])?;
        let body = TextAssetRequest {
            asset_type: AssetType::Text,
            text_field,
            text_content,
        };
        self.execute(self.request(Method::POST, url).json(&body))
            .await
    }

    /// Fetch the project status and the generated assets of every target.
    pub async fn get_project_results(&self, project_id: &str) -> Result<ProjectResultsResponse> {
        let project_id = require_id("project id", project_id)?;
        let url = self.endpoint(&["projects", project_id, "results"])?;
        self.execute(self.request(Method::GET, url)).await
    }

    /// Trigger generation again for one target content config of the project.
    ///
    /// Each call starts new work on the service.
    pub async fn rerun_generation(
        &self,
        project_id: &str,
        target_content_config_id: &str,
    ) -> Result<RerunResponse> {
        let project_id = require_id("project id", project_id)?;
        let target_content_config_id =
            require_id("target content config id", target_content_config_id)?;
        let url = self.endpoint(&["projects", project_id, "rerun"])?;
        let body = RerunRequest {
            target_content_config_id,
        };
        self.execute(self.request(Method::POST, url).json(&body))
            .await
    }

    // -----------------------------------------------------------------------
    // Private helpers
    // -----------------------------------------------------------------------

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        join_segments(&self.base_url, segments)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http
            .request(method, url)
            .header(AUTHORIZATION, self.auth.clone())
    }

    async fn execute<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let request = builder
            .build()
            .map_err(|e| GloberError::InvalidArgument(format!("could not build request: {e}")))?;
        let method = request.method().clone();
        let path = request.url().path().to_string();

        debug!(%method, %path, "sending request");
        let response = self.http.execute(request).await?;
        debug!(%method, %path, status = response.status().as_u16(), "received response");

        read_json(response).await
    }
}

pub(crate) fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw)
        .map_err(|e| GloberError::InvalidArgument(format!("invalid base URL {raw:?}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(GloberError::InvalidArgument(format!(
            "base URL {raw:?} cannot carry a path"
        )));
    }
    Ok(url)
}

/// Append percent-encoded path segments to `base`.
pub(crate) fn join_segments(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| GloberError::InvalidArgument(format!("base URL {base} cannot carry a path")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Turn a response into `T`, or into [`GloberError::Api`] for any
/// non-success status.
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(GloberError::Api {
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_str(&body).map_err(|source| GloberError::Decode { source, body })
}

fn require_id<'a>(what: &str, id: &'a str) -> Result<&'a str> {
    if id.is_empty() {
        return Err(GloberError::InvalidArgument(format!("{what} must not be empty")));
    }
    Ok(id)
}
