/// 대시보드 HTML 렌더링
/// 상태 스냅샷을 그대로 그리기만 하고 상태를 바꾸지 않는다.
// region:    --- Modules
mod layout;
mod modal;
mod page;

pub use self::page::render_page;
// endregion: --- Modules

// region:    --- Helpers
pub(crate) fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// $1,234.50 형식
pub(crate) fn format_usd(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}${grouped}.{:02}", cents % 100)
}

/// 글자 수 기준으로 자르기 (카드 미리보기용)
pub(crate) fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}…", cut.trim_end())
}
// endregion: --- Helpers
