//! Quick-start walkthrough for the Glober AI Rust SDK.
//!
//! Run with:
//!   GLOBER_EMAIL=demo@example.com GLOBER_PASSWORD=... cargo run --example quickstart
//!
//! Or export GLOBER_API_TOKEN to skip the login step.

use std::time::Duration;

use globerai::{
    AssetFile, AssetType, Client, ClientBuilder, CreateProjectRequest, Gender,
    TargetContentConfig, TargetContentType, TargetPlatform,
};

#[tokio::main]
async fn main() -> globerai::Result<()> {
    // -----------------------------------------------------------------------
    // 1. Get a token and create a client
    // -----------------------------------------------------------------------
    let client = match std::env::var("GLOBER_API_TOKEN") {
        Ok(_) => ClientBuilder::new().build()?,
        Err(_) => {
            let email = std::env::var("GLOBER_EMAIL").unwrap_or_else(|_| "demo@example.com".into());
            let password = std::env::var("GLOBER_PASSWORD").map_err(|_| {
                globerai::GloberError::InvalidArgument(
                    "set GLOBER_API_TOKEN, or GLOBER_PASSWORD to log in".into(),
                )
            })?;
            let token = globerai::login(globerai::DEFAULT_AUTH_URL, &email, &password).await?;
            println!("Login successful.");
            Client::new(token)?
        }
    };

    // -----------------------------------------------------------------------
    // 2. Create a localization project with a predefined custom product page
    // -----------------------------------------------------------------------
    let request = CreateProjectRequest::new(
        "test_project",
        TargetPlatform::AppleAppStore,
        TargetContentType::Localization,
        "https://www.content-page-for-optimization.com",
    )
    .with_description("test_description")
    .with_target(
        TargetContentConfig::new("Arabic", "Saudi Arabia")
            .with_demo_age("18-24")
            .with_demo_gender(Gender::Male)
            .with_custom_product_page("APPLE_APP_CPP")
            .with_image_config(1920, 1080, 3),
    );

    let project = client.create_project(&request).await?;
    let project_id = project.project_id;
    println!("Project created. Project ID: {project_id}");

    // -----------------------------------------------------------------------
    // 3. Upload source assets
    // -----------------------------------------------------------------------
    for path in ["images/7.jpg", "images/8.jpg"] {
        let asset = client
            .upload_asset(&project_id, AssetType::Image, AssetFile::from_path(path))
            .await?;
        println!("Uploaded {} as {}", asset.name, asset.asset_id);
    }

    let text = client
        .upload_text_asset(&project_id, "subtitle", "Track every workout")
        .await?;
    println!("Uploaded text asset {}", text.asset_id);

    // -----------------------------------------------------------------------
    // 4. Look up the project
    // -----------------------------------------------------------------------
    let details = client.get_project_details(&project_id).await?;
    println!("Current project status: {:?}", details.status);
    for asset in &details.assets {
        println!("  {} | {} | {}", asset.asset_id, asset.asset_type, asset.name);
    }
    println!();

    // -----------------------------------------------------------------------
    // 5. Wait for generation and print the results
    // -----------------------------------------------------------------------
    loop {
        let details = client.get_project_details(&project_id).await?;
        if details.status.is_terminal() {
            println!("Generation finished: {:?}", details.status);
            break;
        }
        tokio::time::sleep(Duration::from_secs(10)).await;
    }

    let results = client.get_project_results(&project_id).await?;
    for target in &results.targets {
        println!("Target {}:", target.target_content_config_id);
        for asset in &target.results {
            println!("  [{:?}] {} -> {}", asset.asset_type, asset.name, asset.resource_uri);
        }
    }

    // -----------------------------------------------------------------------
    // 6. Not happy with a target? Generate it again.
    // -----------------------------------------------------------------------
    if let Some(first) = results.targets.first() {
        let rerun = client
            .rerun_generation(&project_id, &first.target_content_config_id)
            .await?;
        println!("Rerun requested, status: {}", rerun.status);
    }

    Ok(())
}
