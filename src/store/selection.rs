use serde::Serialize;
use std::collections::BTreeSet;

/// 일괄 분석용 선택 목록 (페이지 수명 동안만 유지)
#[derive(Debug, Default, Clone, Serialize, PartialEq)]
#[serde(transparent)]
pub struct Selection {
    ids: BTreeSet<i64>,
}

impl Selection {
    /// 없으면 추가, 있으면 제거. 선택 후 상태를 돌려준다
    pub fn toggle(&mut self, auction_id: i64) -> bool {
        if self.ids.remove(&auction_id) {
            false
        } else {
            self.ids.insert(auction_id);
            true
        }
    }

    /// 현재 로드된 id 전체로 교체
    pub fn select_all(&mut self, auction_ids: impl IntoIterator<Item = i64>) {
        self.ids = auction_ids.into_iter().collect();
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, auction_id: i64) -> bool {
        self.ids.contains(&auction_id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn ids(&self) -> Vec<i64> {
        self.ids.iter().copied().collect()
    }
}
