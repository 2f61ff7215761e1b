use crate::auction::model::Auction;
use serde::{Deserialize, Serialize};

/// 대시보드 페이지 종류
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    Dashboard,
    Watchlist,
    Opportunities,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Dashboard, Page::Watchlist, Page::Opportunities];

    /// 페이지 경로
    pub fn path(&self) -> &'static str {
        match self {
            Page::Dashboard => "/",
            Page::Watchlist => "/watchlist",
            Page::Opportunities => "/opportunities",
        }
    }

    /// 액션 경로에 쓰는 이름
    pub fn slug(&self) -> &'static str {
        match self {
            Page::Dashboard => "dashboard",
            Page::Watchlist => "watchlist",
            Page::Opportunities => "opportunities",
        }
    }

    /// 내비게이션 표시 이름
    pub fn label(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Watchlist => "Watchlist",
            Page::Opportunities => "Opportunities",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Dashboard => "Auction Analysis Agent",
            Page::Watchlist => "My Watchlist",
            Page::Opportunities => "Top Opportunities",
        }
    }

    /// 목록이 비었을 때 문구
    pub fn empty_message(&self) -> &'static str {
        match self {
            Page::Dashboard => "No auctions loaded yet. Scrape to fetch the latest listings.",
            Page::Watchlist => "You haven't added any auctions to your watchlist yet.",
            Page::Opportunities => "No opportunities found. Analyze more auctions to find them!",
        }
    }

    /// 이 페이지에 보여줄 경매인지
    /// 관심 목록은 전체 목록을 받아 화면에서 거른다
    pub fn shows(&self, auction: &Auction) -> bool {
        match self {
            Page::Watchlist => auction.is_watchlisted,
            Page::Dashboard | Page::Opportunities => true,
        }
    }
}
