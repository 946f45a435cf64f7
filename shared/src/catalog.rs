use thiserror::Error;
use tracing::{info, instrument};

use crate::entity::{Entity, RawEntity, ValidationError};

const BUNDLED_HEROES_JSON: &str = include_str!("../data/heroes.json");

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid catalog entry at index {index}: {source}")]
    Invalid {
        index: usize,
        #[source]
        source: ValidationError,
    },
}

/// Source of the immutable entity list handed to a
/// [`GroupedSearchList`](crate::grouped_list::GroupedSearchList).
pub trait CatalogProvider {
    fn load(&self) -> Result<Vec<Entity>, CatalogError>;
}

/// Catalog backed by a JSON array of `{ "id", "name", "image_ref" }` objects.
#[derive(Debug, Clone)]
pub struct JsonCatalog {
    source: String,
}

impl JsonCatalog {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    pub fn bundled() -> Self {
        Self::new(BUNDLED_HEROES_JSON)
    }
}

impl CatalogProvider for JsonCatalog {
    #[instrument(skip_all)]
    fn load(&self) -> Result<Vec<Entity>, CatalogError> {
        let raw: Vec<RawEntity> = serde_json::from_str(&self.source)?;
        let entities = raw
            .into_iter()
            .enumerate()
            .map(|(index, r)| {
                Entity::try_from(r).map_err(|source| CatalogError::Invalid { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        info!(count = entities.len(), "catalog loaded");
        Ok(entities)
    }
}

/// Sample hero catalog shipped with the crate.
pub fn bundled_heroes() -> Result<Vec<Entity>, CatalogError> {
    JsonCatalog::bundled().load()
}
