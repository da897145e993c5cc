//! Serve command - runs the Devlog HTTP server.

use std::time::Duration;

use axum::http::HeaderValue;
use devlog::{
    Devlog, SigningSecret, backend::database::InMemory, constants::RECOMMENDED_SECRET_LEN,
};
use tokio::task::JoinHandle;

use crate::backend::{SNAPSHOT_FILE, create_backend, data_dir};
use crate::cli::ServeArgs;
use crate::handlers::router;
use crate::state::AppState;

/// Run the Devlog server
pub async fn run(mut args: ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    // The secret leaves the CLI struct here and is zeroized when dropped
    let secret = SigningSecret::new(std::mem::take(&mut args.jwt_secret).into_bytes())?;
    if secret.len() < RECOMMENDED_SECRET_LEN {
        tracing::warn!(
            "Signing secret is shorter than {RECOMMENDED_SECRET_LEN} bytes; use a longer random value"
        );
    }

    let allowed_origins = parse_origins(&args.allowed_origins)?;

    let backend = create_backend(&args.backend_config).await?;
    let devlog = Devlog::open(backend, secret);
    tracing::info!(backend = devlog.backend().kind_name(), "Storage ready");

    let sweeper = spawn_revocation_sweep(devlog.clone(), args.revocation_sweep_secs);

    let app = router(AppState::new(devlog.clone()), allowed_origins);

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let local_addr = listener.local_addr()?;

    println!("Devlog server listening on http://{local_addr}");
    println!();
    println!("Available endpoints:");
    println!("  POST   /auth/signup          - Create an account");
    println!("  POST   /auth/login           - Log in and receive a session cookie");
    println!("  POST   /auth/logout          - Revoke the session");
    println!("  GET    /auth/user            - Current user (requires session)");
    println!("  POST   /share/save           - Update sharing settings (owner only)");
    println!("  GET    /share/{{journalid}}    - Read a shared entry");
    println!("  *      /journal/...          - Journal entries (requires session)");
    println!("  GET    /health               - Health check");
    println!();
    println!("Press Ctrl+C to shutdown");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(handle) = sweeper {
        handle.abort();
    }

    // Save state on shutdown (only needed for InMemory backend)
    if let Some(in_memory) = devlog.backend().as_any().downcast_ref::<InMemory>() {
        let json_path = data_dir(&args.backend_config).join(SNAPSHOT_FILE);
        match in_memory.save_to_file(&json_path).await {
            Ok(()) => {
                tracing::info!("Database saved to {}", json_path.display());
                println!("\nDatabase saved successfully");
            }
            Err(e) => {
                tracing::error!("Failed to save database: {e:?}");
                eprintln!("Failed to save database: {e:?}");
            }
        }
    }

    println!("Server shut down");
    Ok(())
}

/// Parse the configured origins into header values for the CORS layer.
pub fn parse_origins(origins: &[String]) -> Result<Vec<HeaderValue>, Box<dyn std::error::Error>> {
    origins
        .iter()
        .map(|o| o.trim().trim_end_matches('/'))
        .filter(|o| !o.is_empty())
        .map(|o| {
            HeaderValue::from_str(o).map_err(|e| -> Box<dyn std::error::Error> {
                format!("Invalid allowed origin {o:?}: {e}").into()
            })
        })
        .collect()
}

/// Periodically drop revocation records whose tokens have expired anyway.
fn spawn_revocation_sweep(devlog: Devlog, every_secs: u64) -> Option<JoinHandle<()>> {
    if every_secs == 0 {
        tracing::info!("Revocation sweep disabled");
        return None;
    }

    Some(tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(every_secs));
        loop {
            interval.tick().await;
            if let Err(e) = devlog.purge_expired_revocations().await {
                tracing::warn!("Revocation sweep failed: {e}");
            }
        }
    }))
}

/// Resolves on SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for SIGINT: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received SIGINT, initiating graceful shutdown..."),
        _ = terminate => tracing::info!("Received SIGTERM, initiating graceful shutdown..."),
    }
}
