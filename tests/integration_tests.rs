use auction_dashboard::auction::model::{Auction, AuctionList, BatchAnalyzeResponse};
use auction_dashboard::backend::{ApiError, AuctionBackend, HttpBackend, SharedBackend};
use auction_dashboard::config::{normalize_backend_url, DEFAULT_BACKEND_URL};
use auction_dashboard::handlers::{self, Dashboard};
use auction_dashboard::store::EMPTY_SELECTION;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use parking_lot::Mutex;
use reqwest::redirect::Policy;
use reqwest::Client;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

/// 트레이싱 초기화 (여러 테스트에서 호출되어도 처음 한 번만 설정)
fn init_tracing() {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .without_time()
        .with_target(false)
        .with_test_writer()
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

// region:    --- Mock Backend
/// 테스트용 백엔드 상태
#[derive(Default)]
struct MockBackend {
    auctions: Mutex<Vec<Auction>>,
    batch_requests: Mutex<Vec<Vec<i64>>>,
}

type MockState = Arc<MockBackend>;

fn sample_auctions() -> Vec<Auction> {
    serde_json::from_value(json!([
        {
            "id": 1,
            "title": "Brass Lamp",
            "price": "$10.00",
            "image_url": "https://img.example/1.jpg",
            "auction_url": "https://shopgoodwill.example/item/1",
            "estimated_value": null,
            "analysis": null,
            "is_watchlisted": false
        },
        {
            "id": 2,
            "title": "Mantel Clock",
            "price": "$25.00",
            "image_url": "https://img.example/2.jpg",
            "all_images": ["https://img.example/2a.jpg", "https://img.example/2b.jpg"],
            "auction_url": "https://shopgoodwill.example/item/2",
            "estimated_value": 80.0,
            "analysis": "Item 1: Mantel Clock - Value: $80.00\n\nSolid oak case.",
            "is_watchlisted": true,
            "seller": "Goodwill Tacoma",
            "num_bids": 3
        },
        {
            "id": 3,
            "title": "Tea Set",
            "price": "$8.50",
            "image_url": "https://img.example/3.jpg",
            "auction_url": "https://shopgoodwill.example/item/3"
        }
    ]))
    .expect("sample auctions")
}

async fn mock_auctions(State(state): State<MockState>) -> impl IntoResponse {
    Json(AuctionList {
        auctions: state.auctions.lock().clone(),
    })
}

async fn mock_opportunities(State(state): State<MockState>) -> impl IntoResponse {
    let auctions = state
        .auctions
        .lock()
        .iter()
        .filter(|a| {
            let price = a.price.trim_start_matches('$').parse::<f64>().unwrap_or(0.0);
            a.estimated_value.map(|v| v >= price * 1.5).unwrap_or(false)
        })
        .cloned()
        .collect();
    Json(AuctionList { auctions })
}

async fn mock_analyze(
    State(state): State<MockState>,
    Path(auction_id): Path<i64>,
) -> impl IntoResponse {
    let mut auctions = state.auctions.lock();
    match auctions.iter_mut().find(|a| a.id == auction_id) {
        Some(auction) => {
            auction.estimated_value = Some(50.0);
            auction.analysis = Some(format!("Item 1: {} - $50.00", auction.title));
            Json(auction.clone()).into_response()
        }
        None => (StatusCode::NOT_FOUND, "Auction not found").into_response(),
    }
}

async fn mock_analyze_batch(
    State(state): State<MockState>,
    Json(auction_ids): Json<Vec<i64>>,
) -> impl IntoResponse {
    state.batch_requests.lock().push(auction_ids.clone());
    let mut auctions = state.auctions.lock();
    let mut analyzed = Vec::new();
    let mut total_errors = 0;
    for auction_id in auction_ids {
        match auctions.iter_mut().find(|a| a.id == auction_id) {
            Some(auction) => {
                auction.estimated_value = Some(20.0);
                analyzed.push(auction.clone());
            }
            None => total_errors += 1,
        }
    }
    Json(BatchAnalyzeResponse {
        total_analyzed: analyzed.len() as i64,
        analyzed,
        total_errors,
    })
}

async fn mock_watchlist(
    State(state): State<MockState>,
    Path(auction_id): Path<i64>,
) -> impl IntoResponse {
    let mut auctions = state.auctions.lock();
    match auctions.iter_mut().find(|a| a.id == auction_id) {
        Some(auction) => {
            auction.is_watchlisted = !auction.is_watchlisted;
            Json(auction.clone()).into_response()
        }
        None => (StatusCode::NOT_FOUND, "Auction not found").into_response(),
    }
}

async fn mock_market_research(Path(auction_id): Path<i64>) -> impl IntoResponse {
    if auction_id == 2 {
        Json(json!({
            "market_research": {
                "item_name": "Mantel Clock",
                "ebay_data": { "num_sold": 4 },
                "price_summary": {
                    "status": "success",
                    "estimated_value_range": "$60 - $95",
                    "average_value": 78.5,
                    "confidence": "medium",
                    "data_points": 7
                },
                "market_insights": ["Found 4 sold listings on eBay"],
                "recommendations": {
                    "list_price": "$105",
                    "accept_offers_above": "$66",
                    "strategy": "Allow room for negotiation due to variable market prices",
                    "key_factors": []
                }
            }
        }))
    } else {
        Json(json!({ "market_research": null }))
    }
}

async fn mock_scrape(State(state): State<MockState>) -> impl IntoResponse {
    Json(AuctionList {
        auctions: state.auctions.lock().clone(),
    })
}

/// 목 백엔드 실행 후 주소 반환
async fn spawn_mock_backend() -> (String, MockState) {
    let state = Arc::new(MockBackend {
        auctions: Mutex::new(sample_auctions()),
        ..Default::default()
    });

    let app = Router::new()
        .route("/auctions", get(mock_auctions))
        .route("/opportunities", get(mock_opportunities))
        .route("/scrape", post(mock_scrape))
        .route("/analyze/batch", post(mock_analyze_batch))
        .route("/analyze/:id", post(mock_analyze))
        .route("/watchlist/:id", post(mock_watchlist))
        .route("/market-research/:id", get(mock_market_research))
        .with_state(Arc::clone(&state));

    let url = serve(app).await;
    (url, state)
}

async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("리스너 생성 실패");
    let addr = listener.local_addr().expect("주소 조회 실패");
    tokio::spawn(async move {
        axum::serve(listener, app.into_make_service())
            .await
            .expect("서버 실행 실패");
    });
    format!("http://{}", addr)
}

fn http_backend(url: &str) -> HttpBackend {
    HttpBackend::new(url, Duration::from_secs(5)).expect("백엔드 클라이언트 생성 실패")
}
// endregion: --- Mock Backend

// region:    --- Config
#[test]
fn test_backend_url_normalization() {
    assert_eq!(normalize_backend_url(None), DEFAULT_BACKEND_URL);
    assert_eq!(normalize_backend_url(Some("  ")), DEFAULT_BACKEND_URL);
    assert_eq!(
        normalize_backend_url(Some("api.example.com")),
        "https://api.example.com"
    );
    assert_eq!(
        normalize_backend_url(Some("http://10.0.0.5:8000/")),
        "http://10.0.0.5:8000"
    );
    assert_eq!(
        normalize_backend_url(Some("https://api.example.com/v1//")),
        "https://api.example.com/v1"
    );
}

#[test]
fn test_invalid_backend_url_is_rejected() {
    let result = HttpBackend::new("ftp://files.example.com", Duration::from_secs(1));
    assert!(matches!(result, Err(ApiError::InvalidUrl(_))));
}
// endregion: --- Config

// region:    --- Http Backend
#[tokio::test]
async fn test_http_backend_endpoints() {
    init_tracing();
    let (url, _state) = spawn_mock_backend().await;
    let backend = http_backend(&url);

    let auctions = backend.list_auctions().await.unwrap();
    assert_eq!(auctions.len(), 3);
    assert_eq!(auctions[2].estimated_value, None);
    assert!(!auctions[2].is_watchlisted);
    assert_eq!(auctions[1].images().len(), 2);
    assert_eq!(auctions[0].images(), vec!["https://img.example/1.jpg"]);

    let opportunities = backend.list_opportunities().await.unwrap();
    assert_eq!(opportunities.iter().map(|a| a.id).collect::<Vec<_>>(), vec![2]);

    let scraped = backend.scrape().await.unwrap();
    assert_eq!(scraped.len(), 3);

    let analyzed = backend.analyze(1).await.unwrap();
    assert_eq!(analyzed.id, 1);
    assert_eq!(analyzed.estimated_value, Some(50.0));

    let toggled = backend.toggle_watchlist(3).await.unwrap();
    assert!(toggled.is_watchlisted);
}

/// 2xx 가 아니면 실패
#[tokio::test]
async fn test_http_backend_maps_non_success_status() {
    let (url, _state) = spawn_mock_backend().await;
    let backend = http_backend(&url);

    let err = backend.analyze(404).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert!(matches!(err, ApiError::Status { .. }));
}

#[tokio::test]
async fn test_http_backend_transport_failure() {
    // 아무도 듣지 않는 포트
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let backend = http_backend(&url);
    let err = backend.list_auctions().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport { .. }));
    assert_eq!(err.status(), None);
}

/// 일괄 분석은 id 배열을 JSON 본문으로 보낸다
#[tokio::test]
async fn test_http_backend_batch_body() {
    let (url, state) = spawn_mock_backend().await;
    let backend = http_backend(&url);

    let response = backend.analyze_batch(&[1, 3, 99]).await.unwrap();

    assert_eq!(state.batch_requests.lock().clone(), vec![vec![1, 3, 99]]);
    assert_eq!(response.total_analyzed, 2);
    assert_eq!(response.total_errors, 1);
    assert_eq!(
        response.analyzed.iter().map(|a| a.id).collect::<Vec<_>>(),
        vec![1, 3]
    );
}

#[tokio::test]
async fn test_http_backend_market_research() {
    let (url, _state) = spawn_mock_backend().await;
    let backend = http_backend(&url);

    let research = backend.market_research(2).await.unwrap().unwrap();
    assert_eq!(research.item_name.as_deref(), Some("Mantel Clock"));
    assert_eq!(research.price_summary.average_value, Some(78.5));
    assert_eq!(research.recommendations.list_price.as_deref(), Some("$105"));

    assert!(backend.market_research(1).await.unwrap().is_none());
}
// endregion: --- Http Backend

// region:    --- Dashboard Server
async fn spawn_dashboard() -> (String, MockState, Client) {
    let (backend_url, state) = spawn_mock_backend().await;
    let backend: SharedBackend = Arc::new(http_backend(&backend_url));
    let dashboard = Arc::new(Dashboard::new(backend));
    let url = serve(handlers::routes(dashboard)).await;
    let client = Client::builder()
        .redirect(Policy::none())
        .build()
        .expect("클라이언트 생성 실패");
    (url, state, client)
}

async fn page_state(client: &Client, url: &str, page: &str) -> Value {
    client
        .get(format!("{url}/api/pages/{page}/state"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

/// 페이지 렌더링
#[tokio::test]
async fn test_dashboard_pages_render() {
    let (url, _state, client) = spawn_dashboard().await;

    let response = client.get(format!("{url}/")).send().await.unwrap();
    assert!(response.status().is_success());
    let body = response.text().await.unwrap();
    assert!(body.contains("Auction Analysis Agent"));
    assert!(body.contains("Brass Lamp"));
    assert!(body.contains("Scrape Auctions"));
    // 분석된 경매만 재분석 버튼
    assert_eq!(body.matches(">Re-analyze<").count(), 1);
    assert_eq!(body.matches(">Analyze<").count(), 2);

    let body = client
        .get(format!("{url}/watchlist"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("My Watchlist"));
    assert!(body.contains("Mantel Clock"));
    assert!(!body.contains("Brass Lamp"));

    let body = client
        .get(format!("{url}/opportunities"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("Top Opportunities"));
    assert!(body.contains("Mantel Clock"));
    assert!(body.contains("Profit $55.00 (220%)"));
}

/// 선택, 일괄 분석, 빈 선택 안내
#[tokio::test]
async fn test_dashboard_batch_flow() {
    init_tracing();
    let (url, state, client) = spawn_dashboard().await;
    client.get(format!("{url}/")).send().await.unwrap();

    let response = client
        .post(format!("{url}/pages/dashboard/analyze-batch"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let snapshot = page_state(&client, &url, "dashboard").await;
    assert_eq!(snapshot["notice"], EMPTY_SELECTION);
    assert!(state.batch_requests.lock().is_empty());

    client
        .post(format!("{url}/pages/dashboard/select/1"))
        .send()
        .await
        .unwrap();
    client
        .post(format!("{url}/pages/dashboard/select/3"))
        .send()
        .await
        .unwrap();
    let snapshot = page_state(&client, &url, "dashboard").await;
    assert_eq!(snapshot["selection"], json!([1, 3]));

    client
        .post(format!("{url}/pages/dashboard/analyze-batch"))
        .send()
        .await
        .unwrap();
    let snapshot = page_state(&client, &url, "dashboard").await;
    assert_eq!(snapshot["selection"], json!([]));
    assert_eq!(snapshot["auctions"][0]["estimated_value"], json!(20.0));
    assert_eq!(snapshot["auctions"][1]["estimated_value"], json!(80.0));
    assert_eq!(snapshot["auctions"][2]["estimated_value"], json!(20.0));
    assert_eq!(state.batch_requests.lock().clone(), vec![vec![1, 3]]);
}

/// 모달 열기 후 관심 목록 토글
#[tokio::test]
async fn test_dashboard_modal_and_watchlist() {
    let (url, _state, client) = spawn_dashboard().await;
    client.get(format!("{url}/opportunities")).send().await.unwrap();

    client
        .post(format!("{url}/pages/opportunities/open/2"))
        .send()
        .await
        .unwrap();
    let body = client
        .get(format!("{url}/opportunities"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("Market Research"));
    assert!(body.contains("$60 - $95"));
    assert!(body.contains("Solid oak case."));
    assert!(body.contains("Remove from Watchlist"));

    client
        .post(format!("{url}/pages/opportunities/watchlist/2"))
        .send()
        .await
        .unwrap();
    let snapshot = page_state(&client, &url, "opportunities").await;
    assert_eq!(snapshot["open_auction"]["is_watchlisted"], json!(false));
    assert_eq!(snapshot["auctions"][0]["is_watchlisted"], json!(false));

    client
        .post(format!("{url}/pages/opportunities/close"))
        .send()
        .await
        .unwrap();
    let snapshot = page_state(&client, &url, "opportunities").await;
    assert_eq!(snapshot["open_auction"], Value::Null);
}

#[tokio::test]
async fn test_scrape_only_on_dashboard() {
    let (url, _state, client) = spawn_dashboard().await;

    let response = client
        .post(format!("{url}/pages/watchlist/scrape"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = client
        .post(format!("{url}/pages/dashboard/scrape"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers()[reqwest::header::LOCATION],
        "/"
    );
}
// endregion: --- Dashboard Server
