use serde::{Deserialize, Serialize};

use crate::grouped_list::GroupedSearchList;
use crate::{AppError, DEFAULT_SCROLL_TO_TOP_THRESHOLD};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct ListConfig {
    /// The scroll-to-top button shows once the first visible row index exceeds this.
    pub scroll_to_top_threshold: usize,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            scroll_to_top_threshold: DEFAULT_SCROLL_TO_TOP_THRESHOLD,
        }
    }
}

impl ListConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[must_use]
    pub const fn shows_scroll_to_top(&self, first_visible_index: usize) -> bool {
        first_visible_index > self.scroll_to_top_threshold
    }
}

#[derive(Clone, Debug, Default)]
pub struct Model {
    pub list: GroupedSearchList,
    pub config: ListConfig,

    // Scroll position as reported by the shell
    pub first_visible_index: usize,
    pub pending_scroll_to: Option<usize>,

    pub active_error: Option<AppError>,
}

impl Model {
    pub fn show_scroll_to_top(&self) -> bool {
        self.config.shows_scroll_to_top(self.first_visible_index)
    }
}
