//! Health check command - probes a running Devlog server.

use std::time::Duration;

use serde::Deserialize;

use crate::cli::HealthArgs;

#[derive(Debug, Deserialize)]
struct HealthBody {
    status: String,
    #[serde(default)]
    backend: Option<String>,
}

/// Normalize the target to the server's `/health` route.
fn health_url(base: &str) -> String {
    let base = base.trim_end_matches('/');
    if base.ends_with("/health") {
        base.to_string()
    } else {
        format!("{base}/health")
    }
}

/// Run the health check command
pub async fn run(args: &HealthArgs) -> Result<(), Box<dyn std::error::Error>> {
    let url = health_url(&args.url);
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(args.timeout))
        .build()?;

    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| format!("unhealthy: failed to connect to {url}: {e}"))?;

    if !response.status().is_success() {
        return Err(format!("unhealthy: server returned HTTP status {}", response.status()).into());
    }

    let body: HealthBody = response.json().await?;
    if body.status != "healthy" {
        return Err(format!("unhealthy: server returned status {}", body.status).into());
    }

    println!(
        "healthy (backend: {})",
        body.backend.as_deref().unwrap_or("unknown")
    );
    Ok(())
}
