// region:    --- Imports
use auction_dashboard::backend::{HttpBackend, SharedBackend};
use auction_dashboard::config::Settings;
use auction_dashboard::handlers::{self, Dashboard};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};
// endregion: --- Imports

// region:    --- Main
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // logging 초기화
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .without_time()
        .with_target(false)
        .init();

    let settings = Settings::load();
    let backend_url = settings.backend_url();

    // 백엔드 클라이언트 생성
    let backend = match HttpBackend::new(&backend_url, settings.request_timeout()) {
        Ok(backend) => backend,
        Err(e) => {
            error!("{:<12} --> 백엔드 클라이언트 생성 실패: {}", "Main", e);
            return Err(e.into());
        }
    };
    info!("{:<12} --> 백엔드: {}", "Main", backend.base_url());

    let backend: SharedBackend = Arc::new(backend);
    let dashboard = Arc::new(Dashboard::new(backend));
    let routes_all = handlers::routes(dashboard);

    // 리스너 생성
    let listener = TcpListener::bind(settings.listen_addr).await?;
    info!(
        "{:<12} --> Dashboard: Listening on http://{}",
        "Main",
        listener.local_addr()?
    );

    // 서버 실행
    if let Err(err) = axum::serve(listener, routes_all.into_make_service()).await {
        error!("{:<12} --> Server error: {}", "Main", err);
    }
    Ok(())
}
// endregion: --- Main
