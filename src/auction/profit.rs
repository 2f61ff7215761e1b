// region:    --- Imports
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

// endregion: --- Imports

lazy_static! {
    static ref PRICE_NUMBER: Regex = Regex::new(r"-?[\d,]*\.?\d+").expect("price pattern");
}

// region:    --- Profit Estimate
/// 가격 대비 예상 수익 (표시 전용)
#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct ProfitEstimate {
    pub numeric_price: f64,
    pub estimated_value: f64,
    pub profit: f64,
    /// 가격이 0 이면 None ("N/A" 로 표시)
    pub profit_percent: Option<f64>,
}

impl ProfitEstimate {
    /// 통화 문자열 가격과 추정가로 수익 계산
    pub fn compute(price: &str, estimated_value: f64) -> Option<Self> {
        let numeric_price = parse_price(price)?;
        let profit = estimated_value - numeric_price;
        let profit_percent = if numeric_price == 0.0 {
            None
        } else {
            Some(profit / numeric_price * 100.0)
        };

        Some(Self {
            numeric_price,
            estimated_value,
            profit,
            profit_percent,
        })
    }

    pub fn is_gain(&self) -> bool {
        self.profit > 0.0
    }

    /// 표시용 퍼센트 문자열
    pub fn percent_label(&self) -> String {
        match self.profit_percent {
            Some(percent) => format!("{:.0}%", percent),
            None => "N/A".to_string(),
        }
    }
}
// endregion: --- Profit Estimate

// region:    --- Price Parsing
/// "$1,234.50 (5 bids)" 같은 문자열에서 첫 번째 숫자를 꺼낸다
///
/// 숫자가 아닌 문자를 모두 지우고 이어 붙이지 않는다.
/// 그래서 "$1.23 (5 bids)" 는 1.235 가 아니라 1.23 이 된다.
pub fn parse_price(price: &str) -> Option<f64> {
    let raw = PRICE_NUMBER.find(price)?.as_str().replace(',', "");
    raw.parse::<f64>().ok().filter(|value| value.is_finite())
}
// endregion: --- Price Parsing
