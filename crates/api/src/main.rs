use std::sync::Arc;

use pricelist_api::app;
use pricelist_api::config::Config;
use pricelist_store::db;

#[tokio::main]
async fn main() {
    pricelist_observability::init();

    let config = Config::load();

    let services = match &config.database_url {
        Some(url) => {
            let pool = db::connect(url).await.expect("failed to connect to database");
            if config.sync_schema {
                db::ensure_schema(&pool).await.expect("failed to sync schema");
            }
            app::services::AppServices::postgres(pool)
        }
        None => {
            tracing::warn!("DATABASE_URL not set; using in-memory stores");
            app::services::AppServices::in_memory()
        }
    };

    let router = app::build_app(Arc::new(services), Some(config.static_dir.as_path()));

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .unwrap_or_else(|e| panic!("failed to bind 0.0.0.0:{}: {e}", config.port));

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, router).await.unwrap();
}
