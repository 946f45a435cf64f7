// lib.rs - shared core for the searchable heroes list

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod capabilities;
pub mod catalog;
pub mod entity;
pub mod event;
pub mod grouped_list;
pub mod model;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub use app::App;
pub use capabilities::{Capabilities, Effect};
pub use catalog::{bundled_heroes, CatalogError, CatalogProvider, JsonCatalog};
pub use crux_core::{render::Render, App as CruxApp};
pub use entity::{Entity, EntityId, EntityName, ImageRef, ValidationError};
pub use event::Event;
pub use grouped_list::{group_key, matches_query, Group, GroupedSearchList, GroupedView, ListError};
pub use model::{ListConfig, Model};

pub const DEFAULT_SCROLL_TO_TOP_THRESHOLD: usize = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    InvalidArgument,
    Validation,
    Deserialization,
}

impl ErrorKind {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::Validation => "VALIDATION_ERROR",
            Self::Deserialization => "DESERIALIZATION_ERROR",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppError {
    pub kind: ErrorKind,
    pub message: String,
    pub context: HashMap<String, String>,
}

impl AppError {
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            context: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.kind.code()
    }

    #[must_use]
    pub fn user_facing_message(&self) -> String {
        match self.kind {
            ErrorKind::InvalidArgument => {
                "The hero list could not be loaded because it contains duplicate entries.".into()
            }
            ErrorKind::Validation => {
                "The hero list could not be loaded because an entry is incomplete.".into()
            }
            ErrorKind::Deserialization => "The hero list could not be read.".into(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code(), self.message)
    }
}

impl std::error::Error for AppError {}

impl From<ListError> for AppError {
    fn from(e: ListError) -> Self {
        let kind = e.kind();
        match &e {
            ListError::DuplicateId { id } => {
                AppError::new(kind, e.to_string()).with_context("id", id.as_str())
            }
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        AppError::new(ErrorKind::Validation, e.to_string())
    }
}

impl From<CatalogError> for AppError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::Parse(inner) => {
                AppError::new(ErrorKind::Deserialization, inner.to_string())
            }
            CatalogError::Invalid { index, source } => AppError::from(source)
                .with_context("index", index.to_string()),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserFacingError {
    pub message: String,
    pub error_code: String,
}

impl From<&AppError> for UserFacingError {
    fn from(e: &AppError) -> Self {
        Self {
            message: e.user_facing_message(),
            error_code: e.code().to_string(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemView {
    pub id: String,
    pub name: String,
    pub image_ref: String,
}

impl From<Entity> for ItemView {
    fn from(e: Entity) -> Self {
        Self {
            id: e.id().to_string(),
            name: e.name().to_string(),
            image_ref: e.image_ref().as_str().to_string(),
        }
    }
}

/// One sticky-header section: the header text followed by its rows.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SectionView {
    pub header: String,
    pub items: Vec<ItemView>,
}

impl From<Group> for SectionView {
    fn from(g: Group) -> Self {
        Self {
            header: g.key.to_string(),
            items: g.members.into_iter().map(ItemView::from).collect(),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ViewModel {
    pub query: String,
    pub sections: Vec<SectionView>,
    pub match_count: usize,
    pub total_count: usize,
    pub is_empty_result: bool,
    pub show_scroll_to_top: bool,
    pub scroll_to: Option<usize>,
    pub error: Option<UserFacingError>,
}

pub mod app {
    use super::*;
    use tracing::{debug, info, warn};

    #[derive(Default)]
    pub struct App;

    impl App {
        fn load_catalog(model: &mut Model, entities: Vec<Entity>) {
            match GroupedSearchList::new(entities) {
                Ok(mut list) => {
                    // Keep the shell's search field and the list in agreement.
                    list.set_query(model.list.query());
                    info!(count = list.len(), "catalog installed");
                    model.list = list;
                    model.active_error = None;
                }
                Err(e) => {
                    warn!(error = %e, "catalog rejected, keeping previous list");
                    model.active_error = Some(e.into());
                }
            }
        }
    }

    impl crux_core::App for App {
        type Event = Event;
        type Model = Model;
        type ViewModel = ViewModel;
        type Capabilities = Capabilities;

        fn update(&self, event: Event, model: &mut Model, caps: &Capabilities) {
            debug!(
                event = event.name(),
                user_initiated = event.is_user_initiated(),
                "update"
            );

            match event {
                Event::Noop => {}

                Event::AppStarted => {
                    match bundled_heroes() {
                        Ok(entities) => Self::load_catalog(model, entities),
                        Err(e) => {
                            warn!(error = %e, "bundled catalog unreadable");
                            model.active_error = Some(e.into());
                        }
                    }
                    caps.render.render();
                }

                Event::ConfigChanged { config } => {
                    model.config = config;
                    caps.render.render();
                }

                Event::CatalogLoaded { entities } => {
                    Self::load_catalog(model, entities);
                    caps.render.render();
                }

                Event::SearchQueryChanged { query } => {
                    model.list.set_query(query);
                    debug!(
                        matches = model.list.current_view().total_members(),
                        "search results updated"
                    );
                    caps.render.render();
                }

                Event::ListScrolled {
                    first_visible_index,
                } => {
                    let was_shown = model.show_scroll_to_top();
                    model.first_visible_index = first_visible_index;

                    let reached_target = model.pending_scroll_to == Some(first_visible_index);
                    if reached_target {
                        model.pending_scroll_to = None;
                    }

                    if reached_target || was_shown != model.show_scroll_to_top() {
                        caps.render.render();
                    }
                }

                Event::ScrollToTopRequested => {
                    model.pending_scroll_to = Some(0);
                    caps.render.render();
                }

                Event::ErrorDismissed => {
                    model.active_error = None;
                    caps.render.render();
                }
            }
        }

        fn view(&self, model: &Model) -> ViewModel {
            let grouped = model.list.current_view();
            let match_count = grouped.total_members();

            ViewModel {
                query: model.list.query().to_string(),
                sections: grouped.into_groups().into_iter().map(SectionView::from).collect(),
                match_count,
                total_count: model.list.len(),
                is_empty_result: match_count == 0,
                show_scroll_to_top: model.show_scroll_to_top(),
                scroll_to: model.pending_scroll_to,
                error: model.active_error.as_ref().map(UserFacingError::from),
            }
        }
    }
}
