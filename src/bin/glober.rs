//! Command-line access to the Glober AI API.
//!
//! ```bash
//! export GLOBER_EMAIL=demo@example.com GLOBER_PASSWORD=...
//! glober create project.json
//! glober upload <project-id> --type IMAGE images/7.jpg images/8.jpg
//! glober results <project-id>
//! ```
//!
//! Set `RUST_LOG=globerai=debug` to see each request.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use globerai::{AssetFile, AssetType, Client, ClientBuilder, CreateProjectRequest};
use serde::Serialize;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "glober")]
#[command(about = "Glober AI project client", long_about = None)]
struct Cli {
    /// Access token. When absent, logs in with --email/--password.
    #[arg(long, env = "GLOBER_API_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[arg(long, env = "GLOBER_EMAIL")]
    email: Option<String>,

    #[arg(long, env = "GLOBER_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Project API root.
    #[arg(long, default_value = globerai::DEFAULT_BASE_URL)]
    base_url: String,

    /// Auth API root.
    #[arg(long, default_value = globerai::DEFAULT_AUTH_URL)]
    auth_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and print the access token.
    Login,
    #[command(flatten)]
    Api(ApiCommand),
}

#[derive(Subcommand, Debug)]
enum ApiCommand {
    /// Create a project from a JSON request file.
    Create { request: PathBuf },
    /// Show a project's details.
    Details { project_id: String },
    /// Upload one or more files as assets.
    Upload {
        project_id: String,
        #[arg(long = "type", value_enum, ignore_case = true)]
        asset_type: AssetKind,
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Attach inline text to a project.
    UploadText {
        project_id: String,
        #[arg(long)]
        field: String,
        #[arg(long)]
        content: String,
    },
    /// Show generated results.
    Results { project_id: String },
    /// Re-run generation for one target content config.
    Rerun {
        project_id: String,
        target_content_config_id: String,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
#[value(rename_all = "SCREAMING_SNAKE_CASE")]
enum AssetKind {
    Image,
    Video,
    Text,
    Glossary,
}

impl From<AssetKind> for AssetType {
    fn from(kind: AssetKind) -> Self {
        match kind {
            AssetKind::Image => AssetType::Image,
            AssetKind::Video => AssetType::Video,
            AssetKind::Text => AssetType::Text,
            AssetKind::Glossary => AssetType::Glossary,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Login => {
            println!("{}", login(&cli).await?);
            Ok(())
        }
        Command::Api(ref command) => {
            let token = match &cli.token {
                Some(token) => token.clone(),
                None => login(&cli).await?,
            };
            let client = ClientBuilder::new()
                .token(token)
                .base_url(&cli.base_url)
                .build()?;
            run(&client, command).await
        }
    }
}

async fn login(cli: &Cli) -> Result<String> {
    let (Some(email), Some(password)) = (&cli.email, &cli.password) else {
        bail!("no token given; pass --token or both --email and --password");
    };

    let token = globerai::login(&cli.auth_url, email, password)
        .await
        .context("login failed")?;
    info!(%email, "logged in");
    Ok(token)
}

async fn run(client: &Client, command: &ApiCommand) -> Result<()> {
    match command {
        ApiCommand::Create { request } => {
            let raw = tokio::fs::read_to_string(request)
                .await
                .with_context(|| format!("failed to read {}", request.display()))?;
            let request: CreateProjectRequest =
                serde_json::from_str(&raw).context("invalid project request")?;
            print_json(&client.create_project(&request).await?)
        }
        ApiCommand::Details { project_id } => {
            print_json(&client.get_project_details(project_id).await?)
        }
        ApiCommand::Upload {
            project_id,
            asset_type,
            files,
        } => {
            let asset_type = AssetType::from(*asset_type);
            let mut uploaded = Vec::with_capacity(files.len());
            for path in files {
                let asset = client
                    .upload_asset(project_id, asset_type, AssetFile::from_path(path))
                    .await
                    .with_context(|| format!("failed to upload {}", path.display()))?;
                info!(asset_id = %asset.asset_id, "asset uploaded");
                uploaded.push(asset);
            }
            print_json(&uploaded)
        }
        ApiCommand::UploadText {
            project_id,
            field,
            content,
        } => print_json(
            &client
                .upload_text_asset(project_id, field, content)
                .await?,
        ),
        ApiCommand::Results { project_id } => {
            print_json(&client.get_project_results(project_id).await?)
        }
        ApiCommand::Rerun {
            project_id,
            target_content_config_id,
        } => print_json(
            &client
                .rerun_generation(project_id, target_content_config_id)
                .await?,
        ),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
