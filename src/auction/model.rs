use serde::{Deserialize, Serialize};

// region:    --- Auction Model
/// 경매 상품 모델 (백엔드가 id를 부여한다)
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Auction {
    pub id: i64,
    pub title: String,
    /// 통화 형식 문자열 그대로 보관 (예: "$12.34", "$1.23 (5 bids)")
    pub price: String,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all_images: Option<Vec<String>>,
    pub auction_url: String,
    #[serde(default)]
    pub estimated_value: Option<f64>,
    #[serde(default)]
    pub analysis: Option<String>,
    #[serde(default)]
    pub is_watchlisted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_bids: Option<i64>,
}

impl Auction {
    /// 이미지 목록 (비어 있으면 대표 이미지 하나로 대체)
    pub fn images(&self) -> Vec<&str> {
        match &self.all_images {
            Some(images) if !images.is_empty() => images.iter().map(String::as_str).collect(),
            _ => vec![self.image_url.as_str()],
        }
    }

    /// 분석 완료 여부
    pub fn is_analyzed(&self) -> bool {
        self.estimated_value.is_some() || self.analysis.is_some()
    }
}
// endregion: --- Auction Model

// region:    --- Responses
/// `/auctions`, `/opportunities`, `/scrape` 응답
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AuctionList {
    pub auctions: Vec<Auction>,
}

/// `/analyze/batch` 응답
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BatchAnalyzeResponse {
    #[serde(default)]
    pub analyzed: Vec<Auction>,
    #[serde(default)]
    pub total_analyzed: i64,
    #[serde(default)]
    pub total_errors: i64,
}

/// `/market-research/{id}` 응답
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MarketResearchResponse {
    #[serde(default)]
    pub market_research: Option<MarketResearch>,
}
// endregion: --- Responses

// region:    --- Market Research
/// 시세 조사 결과 (모르는 필드는 무시)
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct MarketResearch {
    #[serde(default)]
    pub item_name: Option<String>,
    #[serde(default)]
    pub price_summary: PriceSummary,
    #[serde(default)]
    pub market_insights: Vec<String>,
    #[serde(default)]
    pub recommendations: Recommendations,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct PriceSummary {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub estimated_value_range: Option<String>,
    #[serde(default)]
    pub average_value: Option<f64>,
    #[serde(default)]
    pub confidence: Option<String>,
    #[serde(default)]
    pub data_points: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Recommendations {
    #[serde(default)]
    pub list_price: Option<String>,
    #[serde(default)]
    pub accept_offers_above: Option<String>,
    #[serde(default)]
    pub quick_sale_price: Option<String>,
    #[serde(default)]
    pub strategy: Option<String>,
    #[serde(default)]
    pub key_factors: Vec<String>,
}
// endregion: --- Market Research
