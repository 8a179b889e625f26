use tokio::net::TcpListener;
use tracing::info;

use crate::infrastructure::settings::Settings;
use crate::presentation::AppState;
use crate::presentation::http::middleware::layers::{apply_limits, apply_no_cache, apply_trace};
use crate::presentation::http::app_router;

pub(crate) async fn run_http(settings: &Settings, state: AppState) -> anyhow::Result<()> {
    let app = app_router(state);
    let app = apply_no_cache(app, settings.http_no_cache);
    let app = apply_limits(app, settings);
    let app = apply_trace(app);

    let listener = TcpListener::bind(&settings.http_addr).await?;

    info!("HTTP server listening on {}", settings.http_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
