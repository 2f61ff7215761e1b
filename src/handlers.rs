// region:    --- Imports
use crate::backend::SharedBackend;
use crate::store::{AuctionStore, Page, PageSnapshot};
use crate::view;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use std::collections::HashMap;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

// endregion: --- Imports

// region:    --- Dashboard State
/// 페이지별 저장소 묶음
pub struct Dashboard {
    stores: HashMap<Page, AuctionStore>,
}

pub type AppState = Arc<Dashboard>;

impl Dashboard {
    pub fn new(backend: SharedBackend) -> Self {
        let stores = Page::ALL
            .iter()
            .map(|page| (*page, AuctionStore::new(*page, Arc::clone(&backend))))
            .collect();
        Self { stores }
    }

    pub fn store(&self, page: Page) -> &AuctionStore {
        // 모든 Page 에 대해 new() 에서 생성된다
        &self.stores[&page]
    }

    /// 페이지 이동: 다른 페이지는 언마운트하고 대상 페이지는 처음이면 마운트
    pub async fn visit(&self, page: Page) -> PageSnapshot {
        for other in Page::ALL.iter().filter(|other| **other != page) {
            self.store(*other).unmount();
        }
        let store = self.store(page);
        store.ensure_mounted().await;
        store.snapshot()
    }
}
// endregion: --- Dashboard State

// region:    --- Router
/// 대시보드 라우터
pub fn routes(state: AppState) -> Router {
    // 외부 도구에서 상태 API 를 볼 수 있도록 cors 허용
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handle_dashboard_page))
        .route("/watchlist", get(handle_watchlist_page))
        .route("/opportunities", get(handle_opportunities_page))
        .route("/health", get(handle_health))
        .route("/api/pages/:page/state", get(handle_page_state))
        .route("/pages/:page/refresh", post(handle_refresh))
        .route("/pages/:page/scrape", post(handle_scrape))
        .route("/pages/:page/analyze/:id", post(handle_analyze))
        .route("/pages/:page/analyze-batch", post(handle_analyze_batch))
        .route("/pages/:page/watchlist/:id", post(handle_toggle_watchlist))
        .route("/pages/:page/select/:id", post(handle_toggle_selection))
        .route("/pages/:page/select-all", post(handle_select_all))
        .route("/pages/:page/select-clear", post(handle_clear_selection))
        .route("/pages/:page/open/:id", post(handle_open_auction))
        .route("/pages/:page/close", post(handle_close_auction))
        .layer(cors)
        .with_state(state)
}

fn back_to(page: Page) -> Response {
    Redirect::to(page.path()).into_response()
}
// endregion: --- Router

// region:    --- Page Handlers
async fn render(state: &Dashboard, page: Page) -> Html<String> {
    info!("{:<12} --> 페이지 렌더링: {}", "Handler", page.slug());
    let snapshot = state.visit(page).await;
    Html(view::render_page(&snapshot))
}

/// 전체 경매 페이지
pub async fn handle_dashboard_page(State(state): State<AppState>) -> impl IntoResponse {
    render(&state, Page::Dashboard).await
}

/// 관심 목록 페이지
pub async fn handle_watchlist_page(State(state): State<AppState>) -> impl IntoResponse {
    render(&state, Page::Watchlist).await
}

/// 추천 매물 페이지
pub async fn handle_opportunities_page(State(state): State<AppState>) -> impl IntoResponse {
    render(&state, Page::Opportunities).await
}

/// 페이지 상태 조회 (JSON)
pub async fn handle_page_state(
    State(state): State<AppState>,
    Path(page): Path<Page>,
) -> impl IntoResponse {
    Json(state.store(page).snapshot())
}

pub async fn handle_health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}
// endregion: --- Page Handlers

// region:    --- Action Handlers
/// 새로고침 (다시 마운트 후 전체 로드)
pub async fn handle_refresh(State(state): State<AppState>, Path(page): Path<Page>) -> Response {
    info!("{:<12} --> 새로고침: {}", "Handler", page.slug());
    state.store(page).mount().await;
    back_to(page)
}

/// 스크래핑 (전체 경매 페이지 전용)
pub async fn handle_scrape(State(state): State<AppState>, Path(page): Path<Page>) -> Response {
    if page != Page::Dashboard {
        return (StatusCode::NOT_FOUND, "scraping is only available on the dashboard")
            .into_response();
    }
    info!("{:<12} --> 스크래핑 요청", "Handler");
    state.store(page).trigger_scrape().await;
    back_to(page)
}

/// 단건 분석
pub async fn handle_analyze(
    State(state): State<AppState>,
    Path((page, auction_id)): Path<(Page, i64)>,
) -> Response {
    info!("{:<12} --> 단건 분석 요청 id: {}", "Handler", auction_id);
    state.store(page).analyze_one(auction_id).await;
    back_to(page)
}

/// 선택 항목 일괄 분석
pub async fn handle_analyze_batch(
    State(state): State<AppState>,
    Path(page): Path<Page>,
) -> Response {
    info!("{:<12} --> 일괄 분석 요청", "Handler");
    state.store(page).analyze_batch().await;
    back_to(page)
}

/// 관심 목록 토글
pub async fn handle_toggle_watchlist(
    State(state): State<AppState>,
    Path((page, auction_id)): Path<(Page, i64)>,
) -> Response {
    info!("{:<12} --> 관심 목록 토글 id: {}", "Handler", auction_id);
    state.store(page).toggle_watchlist(auction_id).await;
    back_to(page)
}

pub async fn handle_toggle_selection(
    State(state): State<AppState>,
    Path((page, auction_id)): Path<(Page, i64)>,
) -> Response {
    state.store(page).toggle_selection(auction_id);
    back_to(page)
}

pub async fn handle_select_all(State(state): State<AppState>, Path(page): Path<Page>) -> Response {
    state.store(page).select_all();
    back_to(page)
}

pub async fn handle_clear_selection(
    State(state): State<AppState>,
    Path(page): Path<Page>,
) -> Response {
    state.store(page).clear_selection();
    back_to(page)
}

/// 상세 모달 열기
pub async fn handle_open_auction(
    State(state): State<AppState>,
    Path((page, auction_id)): Path<(Page, i64)>,
) -> Response {
    info!("{:<12} --> 상세 조회 id: {}", "Handler", auction_id);
    state.store(page).open_auction(auction_id).await;
    back_to(page)
}

pub async fn handle_close_auction(
    State(state): State<AppState>,
    Path(page): Path<Page>,
) -> Response {
    state.store(page).close_auction();
    back_to(page)
}
// endregion: --- Action Handlers
