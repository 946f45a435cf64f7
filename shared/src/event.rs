use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::model::ListConfig;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub enum Event {
    #[default]
    Noop,

    AppStarted,
    ConfigChanged {
        config: ListConfig,
    },
    CatalogLoaded {
        entities: Vec<Entity>,
    },

    SearchQueryChanged {
        query: String,
    },

    ListScrolled {
        first_visible_index: usize,
    },
    ScrollToTopRequested,

    ErrorDismissed,
}

impl Event {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Noop => "noop",
            Self::AppStarted => "app_started",
            Self::ConfigChanged { .. } => "config_changed",
            Self::CatalogLoaded { .. } => "catalog_loaded",
            Self::SearchQueryChanged { .. } => "search_query_changed",
            Self::ListScrolled { .. } => "list_scrolled",
            Self::ScrollToTopRequested => "scroll_to_top_requested",
            Self::ErrorDismissed => "error_dismissed",
        }
    }

    #[must_use]
    pub const fn is_user_initiated(&self) -> bool {
        matches!(
            self,
            Self::SearchQueryChanged { .. }
                | Self::ListScrolled { .. }
                | Self::ScrollToTopRequested
                | Self::ErrorDismissed
        )
    }
}
