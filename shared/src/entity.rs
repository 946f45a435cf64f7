use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("entity id cannot be empty")]
    EmptyId,
    #[error("entity name cannot be empty (id `{id}`)")]
    EmptyName { id: String },
}

/// Ids arrive from catalogs as either JSON strings or integers.
#[derive(Deserialize, Clone, Debug)]
#[serde(untagged)]
pub enum RawId {
    Str(String),
    Int(u64),
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(try_from = "RawId", into = "String")]
pub struct EntityId(String);

impl EntityId {
    pub fn new(s: impl Into<String>) -> Result<Self, ValidationError> {
        let s = s.into();
        if s.trim().is_empty() {
            return Err(ValidationError::EmptyId);
        }
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<RawId> for EntityId {
    type Error = ValidationError;

    fn try_from(raw: RawId) -> Result<Self, Self::Error> {
        match raw {
            RawId::Str(s) => Self::new(s),
            RawId::Int(n) => Ok(Self::from(n)),
        }
    }
}

impl From<EntityId> for String {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

impl From<u64> for EntityId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Display name, also the grouping and filtering key. Never blank.
#[derive(Serialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct EntityName(String);

impl EntityName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque handle to an image owned by the shell. The core never dereferences it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(try_from = "RawEntity")]
pub struct Entity {
    id: EntityId,
    name: EntityName,
    image_ref: ImageRef,
}

impl Entity {
    pub fn new(
        id: EntityId,
        name: impl Into<String>,
        image_ref: ImageRef,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName {
                id: id.as_str().to_string(),
            });
        }
        Ok(Self {
            id,
            name: EntityName(name),
            image_ref,
        })
    }

    pub fn id(&self) -> &EntityId {
        &self.id
    }

    pub fn name(&self) -> &EntityName {
        &self.name
    }

    pub fn image_ref(&self) -> &ImageRef {
        &self.image_ref
    }
}

/// Wire shape of an entity before validation.
#[derive(Deserialize, Clone, Debug)]
pub struct RawEntity {
    pub id: RawId,
    pub name: String,
    #[serde(default)]
    pub image_ref: String,
}

impl TryFrom<RawEntity> for Entity {
    type Error = ValidationError;

    fn try_from(raw: RawEntity) -> Result<Self, Self::Error> {
        Entity::new(EntityId::try_from(raw.id)?, raw.name, ImageRef::new(raw.image_ref))
    }
}
