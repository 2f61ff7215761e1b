/// 경매 분석 백엔드와의 통신
/// 스크래핑, 가치 평가, 시세 조사는 모두 백엔드가 담당하고 대시보드는 HTTP 로 호출만 한다.
// region:    --- Imports
use crate::auction::model::{Auction, BatchAnalyzeResponse, MarketResearch};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

// endregion: --- Imports

// region:    --- Modules
mod http;

pub use self::http::HttpBackend;
// endregion: --- Modules

// region:    --- Api Error
/// 백엔드 호출 오류
/// 화면에서는 모든 변형을 "요청 실패" 하나로 취급한다.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("backend responded with status {status} for {path}")]
    Status { path: String, status: u16 },
    #[error("request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("could not decode response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("invalid backend url: {0}")]
    InvalidUrl(String),
    #[error("could not build http client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

impl ApiError {
    /// 응답 상태 코드 (전송 단계 실패면 None)
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
// endregion: --- Api Error

// region:    --- Auction Backend Trait
/// 백엔드 엔드포인트 트레이트
#[async_trait]
pub trait AuctionBackend: Send + Sync {
    /// GET /auctions
    async fn list_auctions(&self) -> Result<Vec<Auction>, ApiError>;
    /// GET /opportunities
    async fn list_opportunities(&self) -> Result<Vec<Auction>, ApiError>;
    /// POST /scrape
    async fn scrape(&self) -> Result<Vec<Auction>, ApiError>;
    /// POST /analyze/{id}
    async fn analyze(&self, auction_id: i64) -> Result<Auction, ApiError>;
    /// POST /analyze/batch
    async fn analyze_batch(&self, auction_ids: &[i64]) -> Result<BatchAnalyzeResponse, ApiError>;
    /// POST /watchlist/{id}
    async fn toggle_watchlist(&self, auction_id: i64) -> Result<Auction, ApiError>;
    /// GET /market-research/{id}
    async fn market_research(&self, auction_id: i64) -> Result<Option<MarketResearch>, ApiError>;
}

pub type SharedBackend = Arc<dyn AuctionBackend + 'static>;
// endregion: --- Auction Backend Trait
