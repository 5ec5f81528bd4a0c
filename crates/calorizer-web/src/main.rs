//! Calorizer REST server binary.
//!
//! # Environment Variables
//! - `CALORIZER_REST_ADDR`: Server address (default: "0.0.0.0:3000")
//! - `CALORIZER_DB_PATH`: SQLite database file (default: "calorizer.db")
//! - `CALORIZER_LOCALIZATION_PATH`: Message table JSON (default: "localization/translations.json")
//! - `CALORIZER_ACTING_USER_ID`: `createdBy` stamp while authentication is stubbed (default: 1)
//!
//! A `.env` file in the working directory is read first, if present.

use std::path::PathBuf;

use calorizer_core::{config::acting_user_id_from_value, Calorizer, CoreConfig};
use calorizer_web::{router, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_DB_PATH: &str = "calorizer.db";
const DEFAULT_LOCALIZATION_PATH: &str = "localization/translations.json";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("calorizer_web=info".parse()?)
                .add_directive("calorizer_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("CALORIZER_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let db_path = std::env::var("CALORIZER_DB_PATH").unwrap_or_else(|_| DEFAULT_DB_PATH.into());
    let localization_path = std::env::var("CALORIZER_LOCALIZATION_PATH")
        .unwrap_or_else(|_| DEFAULT_LOCALIZATION_PATH.into());
    let acting_user_id =
        acting_user_id_from_value(std::env::var("CALORIZER_ACTING_USER_ID").ok().as_deref())?;

    let config = CoreConfig::new(
        PathBuf::from(db_path),
        Some(PathBuf::from(localization_path)),
        acting_user_id,
    )?;
    let core = Calorizer::open(&config)?;

    let app = router(AppState::new(core));

    tracing::info!("-- Starting Calorizer REST API on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
