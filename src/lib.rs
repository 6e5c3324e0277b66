//! # Glober AI SDK for Rust
//!
//! Typed async client for the [Glober AI](https://glober.ai) content
//! localization API. Create projects, upload source assets, and fetch the
//! generated results.
//!
//! ## Quick start
//!
//! ```no_run
//! use globerai::{AssetFile, AssetType, Client, CreateProjectRequest, Gender,
//!     TargetContentConfig, TargetContentType, TargetPlatform};
//!
//! #[tokio::main]
//! async fn main() -> globerai::Result<()> {
//!     let token = globerai::login(globerai::DEFAULT_AUTH_URL, "demo@example.com", "secret").await?;
//!     let client = Client::new(token)?;
//!
//!     let request = CreateProjectRequest::new(
//!         "test_project",
//!         TargetPlatform::AppleAppStore,
//!         TargetContentType::Localization,
//!         "https://www.content-page-for-optimization.com",
//!     )
//!     .with_target(
//!         TargetContentConfig::new("Arabic", "Saudi Arabia")
//!             .with_demo_age("18-24")
//!             .with_demo_gender(Gender::Male)
//!             .with_image_config(1920, 1080, 3),
//!     );
//!
//!     let project = client.create_project(&request).await?;
//!     client
//!         .upload_asset(&project.project_id, AssetType::Image, AssetFile::from_path("images/7.jpg"))
//!         .await?;
//!
//!     let results = client.get_project_results(&project.project_id).await?;
//!     for target in &results.targets {
//!         println!("{}: {} assets", target.target_content_config_id, target.results.len());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Builder pattern
//!
//! ```no_run
//! use globerai::ClientBuilder;
//! use std::time::Duration;
//!
//! # fn example() -> globerai::Result<()> {
//! let client = ClientBuilder::new()
//!     .token("eyJhbGciOi...")
//!     .base_url("https://staging.example.com/api/v1")
//!     .timeout(Duration::from_secs(30))
//!     .build()?;
//! # Ok(())
//! # }
//! ```
//!
//! The library emits `tracing` events at `debug` level for each request; it
//! never installs a subscriber itself.

mod auth;
mod client;
mod errors;
mod models;

pub use auth::{login, login_with, DEFAULT_AUTH_URL};
pub use client::{Client, ClientBuilder, DEFAULT_BASE_URL};
pub use errors::{GloberError, Result};
pub use models::{
    AssetDetail, AssetFile, AssetType, CreateProjectRequest, CreateProjectResponse, Gender,
    GeneratedAsset, GeneratedAssetType, ImageGenerationConfig, ProjectDetails,
    ProjectResultsResponse, ProjectStatus, RerunResponse, TargetContentConfig,
    TargetContentType, TargetPlatform, TargetResult, UploadAssetResponse,
};
