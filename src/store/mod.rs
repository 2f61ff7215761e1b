/// 페이지별 경매 상태 저장소
/// 1. 전체 목록 로드 / 스크래핑
/// 2. 단건 분석, 일괄 분석
/// 3. 관심 목록 토글
/// 4. 상세 모달 (열린 id 만 보관하고 목록에서 찾아 쓴다)
// region:    --- Imports
use crate::auction::model::{Auction, MarketResearch};
use crate::backend::{ApiError, SharedBackend};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

// endregion: --- Imports

// region:    --- Modules
mod page;
mod selection;

pub use self::page::Page;
pub use self::selection::Selection;
// endregion: --- Modules

// region:    --- Messages
pub const LOAD_FAILED: &str = "Failed to fetch auctions";
pub const LOAD_OPPORTUNITIES_FAILED: &str = "Failed to fetch opportunities";
pub const SCRAPE_FAILED: &str = "Failed to scrape auctions";
pub const ANALYZE_FAILED: &str = "Failed to analyze auction";
pub const BATCH_FAILED: &str = "Failed to analyze selected auctions";
pub const WATCHLIST_FAILED: &str = "Failed to update watchlist";
pub const RESEARCH_FAILED: &str = "Failed to fetch market research";
pub const EMPTY_SELECTION: &str = "Select at least one auction to analyze.";
// endregion: --- Messages

// region:    --- Replacement Rules
/// id 가 같은 레코드를 통째로 교체 (순서, 길이 유지)
pub fn replace_by_id(auctions: &mut [Auction], updated: Auction) -> bool {
    match auctions.iter_mut().find(|auction| auction.id == updated.id) {
        Some(slot) => {
            *slot = updated;
            true
        }
        None => false,
    }
}

/// 응답에 포함된 레코드만 교체하고 나머지는 그대로 둔다
pub fn merge_by_id(auctions: &mut [Auction], updated: &[Auction]) -> usize {
    let by_id: HashMap<i64, &Auction> = updated.iter().map(|a| (a.id, a)).collect();
    let mut replaced = 0;
    for slot in auctions.iter_mut() {
        if let Some(fresh) = by_id.get(&slot.id) {
            *slot = (*fresh).clone();
            replaced += 1;
        }
    }
    replaced
}
// endregion: --- Replacement Rules

// region:    --- Page State
/// 진행 중인 요청 표시
#[derive(Debug, Default, Clone, Serialize, PartialEq)]
pub struct Activity {
    pub loading: bool,
    pub scraping: bool,
    pub batch_analyzing: bool,
    pub analyzing: BTreeSet<i64>,
    pub toggling: BTreeSet<i64>,
    pub researching: Option<i64>,
}

/// 모달에 표시할 시세 조사 결과
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ResearchEntry {
    pub auction_id: i64,
    pub market_research: Option<MarketResearch>,
}

#[derive(Debug, Default)]
struct PageState {
    mounted: bool,
    generation: u64,
    auctions: Vec<Auction>,
    selection: Selection,
    open_auction_id: Option<i64>,
    research: Option<ResearchEntry>,
    activity: Activity,
    error: Option<String>,
    notice: Option<String>,
    last_loaded: Option<DateTime<Utc>>,
}

impl PageState {
    fn find(&self, auction_id: i64) -> Option<&Auction> {
        self.auctions.iter().find(|auction| auction.id == auction_id)
    }

    /// 새로 마운트할 때 페이지 상태 초기화
    fn reset(&mut self) {
        self.generation += 1;
        self.mounted = true;
        self.selection.clear();
        self.open_auction_id = None;
        self.research = None;
        self.activity = Activity::default();
        self.error = None;
        self.notice = None;
    }
}

/// 렌더링용 상태 스냅샷
#[derive(Debug, Clone, Serialize)]
pub struct PageSnapshot {
    pub page: Page,
    pub generation: u64,
    pub auctions: Vec<Auction>,
    pub selection: Selection,
    pub open_auction: Option<Auction>,
    pub research: Option<ResearchEntry>,
    pub activity: Activity,
    pub error: Option<String>,
    pub notice: Option<String>,
    pub last_loaded: Option<DateTime<Utc>>,
}

impl PageSnapshot {
    /// 페이지에 실제로 보이는 경매
    pub fn visible(&self) -> impl Iterator<Item = &Auction> {
        let page = self.page;
        self.auctions.iter().filter(move |auction| page.shows(auction))
    }

    pub fn research_for(&self, auction_id: i64) -> Option<&ResearchEntry> {
        self.research
            .as_ref()
            .filter(|entry| entry.auction_id == auction_id)
    }
}
// endregion: --- Page State

// region:    --- Auction Store
/// 액션 처리 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// 응답이 상태에 반영됨
    Applied,
    /// 요청 실패, 오류 메시지 설정됨
    Failed,
    /// 페이지가 다시 마운트되어 늦게 온 응답을 버림
    Discarded,
    /// 요청을 보내지 않음
    Skipped,
}

/// 페이지 하나의 경매 상태 저장소
/// 백엔드 호출 중에는 잠금을 잡지 않는다
#[derive(Clone)]
pub struct AuctionStore {
    page: Page,
    backend: SharedBackend,
    state: Arc<Mutex<PageState>>,
}

impl AuctionStore {
    pub fn new(page: Page, backend: SharedBackend) -> Self {
        Self {
            page,
            backend,
            state: Arc::new(Mutex::new(PageState::default())),
        }
    }

    // -- 마운트

    /// 페이지 마운트 (세대 토큰 갱신 후 전체 로드)
    pub async fn mount(&self) -> ActionOutcome {
        self.state.lock().reset();
        info!("{:<12} --> {} 페이지 마운트", "Store", self.page.slug());
        self.load_all().await
    }

    /// 아직 마운트되지 않았을 때만 마운트
    pub async fn ensure_mounted(&self) -> Option<ActionOutcome> {
        {
            let mut state = self.state.lock();
            if state.mounted {
                return None;
            }
            state.reset();
        }
        Some(self.load_all().await)
    }

    /// 페이지 이탈. 진행 중인 요청의 응답은 버려진다
    pub fn unmount(&self) {
        let mut state = self.state.lock();
        state.generation += 1;
        state.mounted = false;
        state.activity = Activity::default();
        debug!("{:<12} --> {} 페이지 언마운트", "Store", self.page.slug());
    }

    // -- 목록

    /// 전체 목록 로드
    pub async fn load_all(&self) -> ActionOutcome {
        let generation = self.begin(|state| state.activity.loading = true);

        let (result, failure) = match self.page {
            Page::Opportunities => (
                self.backend.list_opportunities().await,
                LOAD_OPPORTUNITIES_FAILED,
            ),
            Page::Dashboard | Page::Watchlist => (self.backend.list_auctions().await, LOAD_FAILED),
        };

        self.finish(generation, |state| {
            state.activity.loading = false;
            match result {
                Ok(auctions) => {
                    info!(
                        "{:<12} --> {} 목록 로드: {}건",
                        "Store",
                        self.page.slug(),
                        auctions.len()
                    );
                    state.auctions = auctions;
                    state.last_loaded = Some(Utc::now());
                    state.error = None;
                    state.notice = None;
                    ActionOutcome::Applied
                }
                Err(e) => fail(state, failure, &e),
            }
        })
    }

    /// 스크래핑 후 목록 전체 교체 (선택 목록은 유지)
    pub async fn trigger_scrape(&self) -> ActionOutcome {
        let generation = self.begin(|state| {
            state.activity.scraping = true;
            state.error = None;
            state.notice = None;
        });

        let result = self.backend.scrape().await;

        self.finish(generation, |state| {
            state.activity.scraping = false;
            match result {
                Ok(auctions) => {
                    info!("{:<12} --> 스크래핑 완료: {}건", "Store", auctions.len());
                    state.auctions = auctions;
                    state.last_loaded = Some(Utc::now());
                    ActionOutcome::Applied
                }
                Err(e) => fail(state, SCRAPE_FAILED, &e),
            }
        })
    }

    // -- 분석

    /// 단건 분석 후 같은 id 레코드만 교체
    pub async fn analyze_one(&self, auction_id: i64) -> ActionOutcome {
        let generation = self.begin(|state| {
            state.activity.analyzing.insert(auction_id);
        });

        let result = self.backend.analyze(auction_id).await;

        self.finish(generation, |state| {
            state.activity.analyzing.remove(&auction_id);
            match result {
                Ok(updated) => {
                    if !replace_by_id(&mut state.auctions, updated) {
                        warn!(
                            "{:<12} --> 목록에 없는 경매 분석 결과 무시 id: {}",
                            "Store", auction_id
                        );
                    }
                    state.error = None;
                    ActionOutcome::Applied
                }
                Err(e) => fail(state, ANALYZE_FAILED, &e),
            }
        })
    }

    /// 선택된 경매 일괄 분석
    /// 선택이 비어 있으면 요청 없이 안내 메시지만 남긴다
    pub async fn analyze_batch(&self) -> ActionOutcome {
        let (generation, auction_ids) = {
            let mut state = self.state.lock();
            if state.selection.is_empty() {
                state.notice = Some(EMPTY_SELECTION.to_string());
                return ActionOutcome::Skipped;
            }
            state.activity.batch_analyzing = true;
            state.notice = None;
            (state.generation, state.selection.ids())
        };

        info!("{:<12} --> 일괄 분석 요청: {}건", "Store", auction_ids.len());
        let result = self.backend.analyze_batch(&auction_ids).await;

        self.finish(generation, |state| {
            state.activity.batch_analyzing = false;
            match result {
                Ok(response) => {
                    let replaced = merge_by_id(&mut state.auctions, &response.analyzed);
                    state.selection.clear();
                    state.error = None;
                    state.notice = Some(batch_summary(
                        response.total_analyzed,
                        response.total_errors,
                    ));
                    if response.total_errors > 0 {
                        warn!(
                            "{:<12} --> 일괄 분석 일부 실패: {}건 성공, {}건 실패",
                            "Store", response.total_analyzed, response.total_errors
                        );
                    }
                    debug!("{:<12} --> 일괄 분석 반영: {}건", "Store", replaced);
                    ActionOutcome::Applied
                }
                Err(e) => fail(state, BATCH_FAILED, &e),
            }
        })
    }

    // -- 관심 목록

    /// 관심 목록 토글
    /// 관심 목록 페이지는 목록 구성이 바뀌므로 전체를 다시 로드한다
    pub async fn toggle_watchlist(&self, auction_id: i64) -> ActionOutcome {
        let (generation, removing_open) = {
            let mut state = self.state.lock();
            state.activity.toggling.insert(auction_id);
            let removing_open = state.open_auction_id == Some(auction_id)
                && state
                    .find(auction_id)
                    .map(|auction| auction.is_watchlisted)
                    .unwrap_or(false);
            (state.generation, removing_open)
        };

        let result = self.backend.toggle_watchlist(auction_id).await;
        let reload = self.page == Page::Watchlist;

        let outcome = self.finish(generation, |state| {
            state.activity.toggling.remove(&auction_id);
            match result {
                Ok(updated) => {
                    debug!(
                        "{:<12} --> 관심 목록 토글 id: {} -> {}",
                        "Store", auction_id, updated.is_watchlisted
                    );
                    if reload {
                        if removing_open {
                            state.open_auction_id = None;
                            state.research = None;
                        }
                    } else {
                        replace_by_id(&mut state.auctions, updated);
                    }
                    state.error = None;
                    ActionOutcome::Applied
                }
                Err(e) => fail(state, WATCHLIST_FAILED, &e),
            }
        });

        if reload && outcome == ActionOutcome::Applied {
            return self.load_all().await;
        }
        outcome
    }

    // -- 선택

    /// 선택이 바뀌면 이전 안내 메시지는 지운다
    pub fn toggle_selection(&self, auction_id: i64) -> bool {
        let mut state = self.state.lock();
        state.notice = None;
        state.selection.toggle(auction_id)
    }

    /// 현재 로드된 id 전체 선택
    pub fn select_all(&self) {
        let mut state = self.state.lock();
        state.notice = None;
        let ids: Vec<i64> = state.auctions.iter().map(|auction| auction.id).collect();
        state.selection.select_all(ids);
    }

    pub fn clear_selection(&self) {
        let mut state = self.state.lock();
        state.notice = None;
        state.selection.clear();
    }

    // -- 모달

    /// 상세 모달 열기 후 시세 조사 결과 조회
    pub async fn open_auction(&self, auction_id: i64) -> ActionOutcome {
        let generation = {
            let mut state = self.state.lock();
            if state.find(auction_id).is_none() {
                return ActionOutcome::Skipped;
            }
            state.open_auction_id = Some(auction_id);
            state.research = None;
            state.activity.researching = Some(auction_id);
            state.generation
        };

        let result = self.backend.market_research(auction_id).await;

        self.finish(generation, |state| {
            if state.activity.researching == Some(auction_id) {
                state.activity.researching = None;
            }
            // 그 사이 다른 경매로 바뀌었으면 버린다
            if state.open_auction_id != Some(auction_id) {
                return ActionOutcome::Discarded;
            }
            match result {
                Ok(market_research) => {
                    state.research = Some(ResearchEntry {
                        auction_id,
                        market_research,
                    });
                    ActionOutcome::Applied
                }
                Err(e) => fail(state, RESEARCH_FAILED, &e),
            }
        })
    }

    pub fn close_auction(&self) {
        let mut state = self.state.lock();
        state.open_auction_id = None;
        state.research = None;
    }

    /// 모달에 표시할 경매 (목록에서 id 로 찾는다)
    pub fn open_auction_view(&self) -> Option<Auction> {
        let state = self.state.lock();
        state
            .open_auction_id
            .and_then(|auction_id| state.find(auction_id).cloned())
    }

    // -- 스냅샷

    pub fn snapshot(&self) -> PageSnapshot {
        let state = self.state.lock();
        PageSnapshot {
            page: self.page,
            generation: state.generation,
            auctions: state.auctions.clone(),
            selection: state.selection.clone(),
            open_auction: state
                .open_auction_id
                .and_then(|auction_id| state.find(auction_id).cloned()),
            research: state.research.clone(),
            activity: state.activity.clone(),
            error: state.error.clone(),
            notice: state.notice.clone(),
            last_loaded: state.last_loaded,
        }
    }

    // -- 내부

    /// 진행 표시 설정 후 현재 세대 토큰 반환
    fn begin(&self, mark: impl FnOnce(&mut PageState)) -> u64 {
        let mut state = self.state.lock();
        mark(&mut state);
        state.generation
    }

    /// 세대 토큰이 그대로일 때만 응답 반영
    fn finish(
        &self,
        generation: u64,
        apply: impl FnOnce(&mut PageState) -> ActionOutcome,
    ) -> ActionOutcome {
        let mut state = self.state.lock();
        if state.generation != generation {
            debug!(
                "{:<12} --> 오래된 응답 폐기 (세대 {} != {})",
                "Store", generation, state.generation
            );
            return ActionOutcome::Discarded;
        }
        apply(&mut state)
    }
}

fn fail(state: &mut PageState, message: &str, e: &ApiError) -> ActionOutcome {
    error!("{:<12} --> {}: {}", "Store", message, e);
    state.error = Some(message.to_string());
    ActionOutcome::Failed
}

/// 일괄 분석 결과 안내 문구
pub fn batch_summary(total_analyzed: i64, total_errors: i64) -> String {
    if total_errors > 0 {
        format!(
            "Analyzed {} auctions, {} could not be analyzed.",
            total_analyzed, total_errors
        )
    } else {
        format!("Analyzed {} auctions.", total_analyzed)
    }
}
// endregion: --- Auction Store
