// region:    --- Imports
use super::{ApiError, AuctionBackend};
use crate::auction::model::{
    Auction, AuctionList, BatchAnalyzeResponse, MarketResearch, MarketResearchResponse,
};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

// endregion: --- Imports

// region:    --- Http Backend
/// reqwest 기반 백엔드 클라이언트
#[derive(Clone)]
pub struct HttpBackend {
    base_url: Url,
    client: Client,
}

impl HttpBackend {
    /// 정규화된 base url 로 클라이언트 생성
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url =
            Url::parse(base_url).map_err(|e| ApiError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.scheme() != "http" && base_url.scheme() != "https" {
            return Err(ApiError::InvalidUrl(format!(
                "unsupported scheme {}",
                base_url.scheme()
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::ClientBuild)?;

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url(), path);
        self.client.request(method, url)
    }

    /// 요청 전송 후 2xx 가 아니면 실패, 본문은 해석하지 않는다
    async fn send<T: DeserializeOwned>(
        &self,
        path: &str,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        debug!("{:<12} --> 요청 전송: {}", "Backend", path);
        let response = request.send().await.map_err(|source| ApiError::Transport {
            path: path.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("{:<12} --> 요청 실패 {}: {}", "Backend", path, status);
            return Err(ApiError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        response.json::<T>().await.map_err(|source| ApiError::Decode {
            path: path.to_string(),
            source,
        })
    }
}
// endregion: --- Http Backend

// region:    --- Endpoints
#[async_trait]
impl AuctionBackend for HttpBackend {
    async fn list_auctions(&self) -> Result<Vec<Auction>, ApiError> {
        let path = "/auctions";
        let list: AuctionList = self.send(path, self.request(Method::GET, path)).await?;
        Ok(list.auctions)
    }

    async fn list_opportunities(&self) -> Result<Vec<Auction>, ApiError> {
        let path = "/opportunities";
        let list: AuctionList = self.send(path, self.request(Method::GET, path)).await?;
        Ok(list.auctions)
    }

    async fn scrape(&self) -> Result<Vec<Auction>, ApiError> {
        let path = "/scrape";
        let list: AuctionList = self.send(path, self.request(Method::POST, path)).await?;
        Ok(list.auctions)
    }

    async fn analyze(&self, auction_id: i64) -> Result<Auction, ApiError> {
        let path = format!("/analyze/{auction_id}");
        self.send(&path, self.request(Method::POST, &path)).await
    }

    async fn analyze_batch(&self, auction_ids: &[i64]) -> Result<BatchAnalyzeResponse, ApiError> {
        let path = "/analyze/batch";
        let request = self.request(Method::POST, path).json(auction_ids);
        self.send(path, request).await
    }

    async fn toggle_watchlist(&self, auction_id: i64) -> Result<Auction, ApiError> {
        let path = format!("/watchlist/{auction_id}");
        self.send(&path, self.request(Method::POST, &path)).await
    }

    async fn market_research(&self, auction_id: i64) -> Result<Option<MarketResearch>, ApiError> {
        let path = format!("/market-research/{auction_id}");
        let response: MarketResearchResponse =
            self.send(&path, self.request(Method::GET, &path)).await?;
        Ok(response.market_research)
    }
}
// endregion: --- Endpoints
