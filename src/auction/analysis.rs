/// 분석 텍스트 파서
/// 백엔드가 돌려준 자유 형식 분석 문자열에서 "Item N: 설명 - $값" 줄을 뽑아낸다.
/// 1. 품목 줄은 items 로
/// 2. 나머지 문장은 summary 로
// region:    --- Imports
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

// endregion: --- Imports

// region:    --- Patterns
lazy_static! {
    /// 품목 줄 판별 ("Item 1:" 또는 "- Item 1:" 로 시작)
    static ref ITEM_LINE: Regex = Regex::new(r"^(?:- )?Item \d+:").expect("item line pattern");
    /// 설명과 값 추출
    static ref ITEM_DETAIL: Regex =
        Regex::new(r"(?:- )?Item \d+: (.+) - (?:Value: )?\$?([\d,]+(?:\.\d{2})?)")
            .expect("item detail pattern");
}
// endregion: --- Patterns

// region:    --- Parsed Analysis
/// 분석 텍스트에서 추출된 품목
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct AnalysisItem {
    pub description: String,
    pub value: f64,
}

/// 파싱 결과 (저장하지 않고 렌더링 때마다 다시 계산한다)
#[derive(Debug, Serialize, Clone, PartialEq, Default)]
pub struct ParsedAnalysis {
    pub items: Vec<AnalysisItem>,
    pub summary: String,
}

impl ParsedAnalysis {
    /// 품목 값 합계
    pub fn items_total(&self) -> f64 {
        self.items.iter().map(|item| item.value).sum()
    }
}
// endregion: --- Parsed Analysis

// region:    --- Parser
/// 분석 텍스트 파싱
///
/// 품목 구간 안에서 빈 줄을 만나면 구간이 끝나고, 그 빈 줄부터 다시 summary 에 들어간다.
/// 패턴에 맞지 않는 품목 줄은 구간 상태만 바꾸고 버려진다.
pub fn parse_analysis(analysis: Option<&str>) -> ParsedAnalysis {
    let Some(text) = analysis else {
        return ParsedAnalysis::default();
    };

    let mut items = Vec::new();
    let mut summary_lines: Vec<&str> = Vec::new();
    let mut in_item_section = false;

    for line in text.split('\n') {
        // summary 에는 원문 줄을 그대로 넣고, 판별만 '\r' 을 뗀 줄로 한다
        let bare = line.strip_suffix('\r').unwrap_or(line);

        if ITEM_LINE.is_match(bare) {
            in_item_section = true;
            if let Some(item) = parse_item_line(bare) {
                items.push(item);
            }
            continue;
        }

        if in_item_section && bare.trim().is_empty() {
            in_item_section = false;
        }

        if !in_item_section {
            summary_lines.push(line);
        }
    }

    ParsedAnalysis {
        items,
        summary: summary_lines.join("\n"),
    }
}

fn parse_item_line(line: &str) -> Option<AnalysisItem> {
    let captures = ITEM_DETAIL.captures(line)?;
    let description = captures.get(1)?.as_str().to_string();
    let value = parse_number(captures.get(2)?.as_str())?;
    Some(AnalysisItem { description, value })
}

/// 천 단위 구분자를 지우고 소수로 변환
fn parse_number(raw: &str) -> Option<f64> {
    raw.replace(',', "").parse::<f64>().ok()
}
// endregion: --- Parser
