use std::{cmp, ops::Range};

use anyhow::Error;
use chrono::{DateTime, Utc};

use crate::access::cooldown::CooldownTracker;
use crate::db::StoreHandle;
use crate::quote_api::ApiHandle;

pub struct BotData {
    pub store: StoreHandle,
    pub api: ApiHandle,
    pub cooldowns: CooldownTracker,
    pub started_at: DateTime<Utc>,
}

pub type Context<'a> = poise::Context<'a, BotData, Error>;

/// One page's slice of a longer list, clamped to the last page when `page`
/// points past the end.
#[derive(Clone, Debug, PartialEq)]
pub struct PageChunk {
    pub range: Range<usize>,
    pub page: usize,
    pub total_pages: usize,
}

impl PageChunk {
    /// # Panics
    /// Panics if page_size is 0
    pub fn new(length: usize, page: usize, page_size: usize) -> Self {
        assert!(page_size > 0, "page_size must be greater than 0");

        let total_pages = length.div_ceil(page_size);

        let clamped_page = if total_pages == 0 {
            0
        } else {
            cmp::min(page, total_pages - 1)
        };

        let start_index = clamped_page * page_size;
        let end_index = cmp::min(start_index + page_size, length);

        Self {
            range: start_index..end_index,
            page: clamped_page,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_empty_list() {
        assert_eq!(
            PageChunk::new(0, 0, 10),
            PageChunk {
                range: 0..0,
                page: 0,
                total_pages: 0
            }
        );
    }

    #[test]
    fn chunk_partial_last_page() {
        assert_eq!(
            PageChunk::new(23, 2, 10),
            PageChunk {
                range: 20..23,
                page: 2,
                total_pages: 3
            }
        );
    }

    #[test]
    fn chunk_exact_fit() {
        assert_eq!(
            PageChunk::new(20, 1, 10),
            PageChunk {
                range: 10..20,
                page: 1,
                total_pages: 2
            }
        );
    }

    #[test]
    fn chunk_clamps_past_end() {
        assert_eq!(
            PageChunk::new(12, 7, 10),
            PageChunk {
                range: 10..12,
                page: 1,
                total_pages: 2
            }
        );
    }

    #[test]
    #[should_panic]
    fn chunk_page_size_zero() {
        PageChunk::new(12, 0, 0);
    }
}
