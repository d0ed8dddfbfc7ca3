use std::path::PathBuf;
use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Render the app icons into `ICON_OUT_DIR` (default `public`).
fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "facerate_icon=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let out_dir: PathBuf = std::env::var("ICON_OUT_DIR")
        .unwrap_or_else(|_| "public".into())
        .into();

    match facerate_icon::write_icons(&out_dir) {
        Ok(paths) => {
            tracing::info!(count = paths.len(), dir = %out_dir.display(), "Icons generated");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, dir = %out_dir.display(), "Failed to generate icons");
            ExitCode::FAILURE
        }
    }
}
