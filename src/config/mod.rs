/// 대시보드 설정
/// 명령행 인자가 없으면 환경 변수, 둘 다 없으면 로컬 개발용 기본값을 쓴다.
// region:    --- Imports
use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;

// endregion: --- Imports

/// 로컬 개발용 백엔드 주소
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

// region:    --- Settings
#[derive(Debug, Clone, Parser)]
#[command(name = "auction-dashboard", version, about = "Auction analysis agent dashboard")]
pub struct Settings {
    /// 백엔드 base url (스킴이 없으면 https:// 를 붙인다)
    #[arg(long, env = "BACKEND_URL")]
    pub backend_url: Option<String>,

    /// 대시보드 서버 주소
    #[arg(long = "listen", env = "DASHBOARD_ADDR", default_value = "0.0.0.0:3000")]
    pub listen_addr: SocketAddr,

    /// 백엔드 요청 타임아웃 (초)
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = 60)]
    pub request_timeout_secs: u64,
}

impl Settings {
    /// 명령행 + 환경 변수에서 설정 읽기
    pub fn load() -> Self {
        let mut settings = Settings::parse();
        if settings.backend_url.is_none() {
            // 예전 프론트엔드 배포에서 쓰던 변수도 받아준다
            settings.backend_url = std::env::var("NEXT_PUBLIC_BACKEND_URL").ok();
        }
        settings
    }

    /// 정규화된 백엔드 주소
    pub fn backend_url(&self) -> String {
        normalize_backend_url(self.backend_url.as_deref())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}
// endregion: --- Settings

// region:    --- Backend Url
/// 백엔드 주소 정규화
/// 1. 비어 있으면 기본값
/// 2. 스킴이 없으면 https://
/// 3. 끝의 / 제거
pub fn normalize_backend_url(raw: Option<&str>) -> String {
    let trimmed = raw.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return DEFAULT_BACKEND_URL.to_string();
    }

    let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    with_scheme.trim_end_matches('/').to_string()
}
// endregion: --- Backend Url
