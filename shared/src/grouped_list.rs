//! Filtered, alphabetically sectioned list of entities.
//!
//! [`GroupedSearchList`] holds an immutable entity list plus the current search
//! query. [`GroupedSearchList::current_view`] is a pure function of the two: it
//! filters by case-insensitive substring, buckets survivors by the uppercased
//! first character of their name, and returns the buckets in ascending key order.
//! Nothing is cached; the host re-reads the view after each mutation.

use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;
use tracing::debug;

use crate::entity::{Entity, EntityId};
use crate::ErrorKind;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ListError {
    #[error("invalid argument: duplicate entity id `{id}`")]
    DuplicateId { id: EntityId },
}

impl ListError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::DuplicateId { .. } => ErrorKind::InvalidArgument,
        }
    }
}

/// Uppercased first character of `name`, or the character itself when it has no
/// single-character uppercase form (digits, symbols, `ß`, most non-Latin scripts).
#[must_use]
pub fn group_key(name: &str) -> Option<char> {
    let first = name.chars().next()?;
    let mut upper = first.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => Some(u),
        _ => Some(first),
    }
}

/// Case-insensitive substring test. The empty query matches every name.
#[must_use]
pub fn matches_query(name: &str, query: &str) -> bool {
    contains_folded(name, &query.to_lowercase())
}

/// `needle` must already be lowercased.
fn contains_folded(name: &str, needle: &str) -> bool {
    needle.is_empty() || name.to_lowercase().contains(needle)
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Group {
    pub key: char,
    pub members: Vec<Entity>,
}

/// Groups in ascending key order. Never contains an empty group.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GroupedView(Vec<Group>);

impl GroupedView {
    pub fn groups(&self) -> &[Group] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total_members(&self) -> usize {
        self.0.iter().map(|g| g.members.len()).sum()
    }

    pub fn keys(&self) -> impl Iterator<Item = char> + '_ {
        self.0.iter().map(|g| g.key)
    }

    pub fn into_groups(self) -> Vec<Group> {
        self.0
    }
}

impl<'a> IntoIterator for &'a GroupedView {
    type Item = &'a Group;
    type IntoIter = std::slice::Iter<'a, Group>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Not synchronized. Callers serialize access, which a single UI thread (or
/// Crux's `&mut Model` in `update`) already guarantees.
#[derive(Clone, Debug, Default)]
pub struct GroupedSearchList {
    entities: Vec<Entity>,
    query: String,
}

impl GroupedSearchList {
    pub fn new(entities: Vec<Entity>) -> Result<Self, ListError> {
        let mut seen = HashSet::with_capacity(entities.len());
        for entity in &entities {
            if !seen.insert(entity.id()) {
                return Err(ListError::DuplicateId {
                    id: entity.id().clone(),
                });
            }
        }

        Ok(Self {
            entities,
            query: String::new(),
        })
    }

    /// Replaces the query verbatim. No trimming.
    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
        debug!(query_len = self.query.len(), "query replaced");
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn current_view(&self) -> GroupedView {
        let needle = self.query.to_lowercase();
        let mut buckets: BTreeMap<char, Vec<Entity>> = BTreeMap::new();

        for entity in &self.entities {
            let name = entity.name().as_str();
            if !contains_folded(name, &needle) {
                continue;
            }
            let Some(key) = group_key(name) else {
                continue;
            };
            buckets.entry(key).or_default().push(entity.clone());
        }

        GroupedView(
            buckets
                .into_iter()
                .map(|(key, members)| Group { key, members })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::ImageRef;
    use proptest::prelude::*;

    fn entity(id: u64, name: &str) -> Entity {
        Entity::new(EntityId::from(id), name, ImageRef::default()).unwrap()
    }

    fn heroes() -> Vec<Entity> {
        vec![
            entity(1, "Batman"),
            entity(2, "Batgirl"),
            entity(3, "Superman"),
        ]
    }

    fn names(group: &Group) -> Vec<&str> {
        group.members.iter().map(|e| e.name().as_str()).collect()
    }

    mod construction_tests {
        use super::*;

        #[test]
        fn test_duplicate_ids_rejected() {
            let list = vec![
                Entity::new(EntityId::new("h1").unwrap(), "Kartini", ImageRef::default()).unwrap(),
                Entity::new(EntityId::new("h1").unwrap(), "Diponegoro", ImageRef::default())
                    .unwrap(),
            ];
            let err = GroupedSearchList::new(list).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument);
            assert!(matches!(err, ListError::DuplicateId { ref id } if id.as_str() == "h1"));
        }

        #[test]
        fn test_query_starts_empty() {
            let model = GroupedSearchList::new(heroes()).unwrap();
            assert_eq!(model.query(), "");
            assert_eq!(model.len(), 3);
        }
    }

    mod view_tests {
        use super::*;

        #[test]
        fn test_filter_preserves_input_order() {
            let mut model = GroupedSearchList::new(heroes()).unwrap();
            model.set_query("bat");
            let view = model.current_view();
            assert_eq!(view.len(), 1);
            assert_eq!(view.groups()[0].key, 'B');
            assert_eq!(names(&view.groups()[0]), ["Batman", "Batgirl"]);
        }

        #[test]
        fn test_empty_query_groups_everything() {
            let model = GroupedSearchList::new(heroes()).unwrap();
            let view = model.current_view();
            assert_eq!(view.keys().collect::<Vec<_>>(), ['B', 'S']);
            assert_eq!(names(&view.groups()[0]), ["Batman", "Batgirl"]);
            assert_eq!(names(&view.groups()[1]), ["Superman"]);
        }

        #[test]
        fn test_reset_query_restores_full_view() {
            let mut model = GroupedSearchList::new(heroes()).unwrap();
            model.set_query("super");
            assert_eq!(model.current_view().total_members(), 1);
            model.set_query("");
            assert_eq!(model.current_view().total_members(), 3);
        }

        #[test]
        fn test_no_match_is_empty_view() {
            let mut model = GroupedSearchList::new(heroes()).unwrap();
            model.set_query("joker");
            assert!(model.current_view().is_empty());
        }

        #[test]
        fn test_empty_entities() {
            let mut model = GroupedSearchList::new(Vec::new()).unwrap();
            assert!(model.current_view().is_empty());
            model.set_query("a");
            assert!(model.current_view().is_empty());
        }

        #[test]
        fn test_query_not_trimmed() {
            let mut model = GroupedSearchList::new(heroes()).unwrap();
            model.set_query(" bat");
            assert_eq!(model.query(), " bat");
            assert!(model.current_view().is_empty());
        }

        #[test]
        fn test_case_insensitive_match() {
            let mut model = GroupedSearchList::new(heroes()).unwrap();
            model.set_query("SUPER");
            assert_eq!(model.current_view().keys().collect::<Vec<_>>(), ['S']);
        }

        #[test]
        fn test_case_insensitive_match_beyond_ascii() {
            let mut model =
                GroupedSearchList::new(vec![entity(1, "éclair"), entity(2, "Éowyn")]).unwrap();
            model.set_query("ÉCLAIR");
            let view = model.current_view();
            assert_eq!(view.keys().collect::<Vec<_>>(), ['É']);
            assert_eq!(names(&view.groups()[0]), ["éclair"]);

            model.set_query("é");
            assert_eq!(names(&model.current_view().groups()[0]), ["éclair", "Éowyn"]);
        }

        #[test]
        fn test_lowercase_names_share_uppercase_group() {
            let model =
                GroupedSearchList::new(vec![entity(1, "ahmad"), entity(2, "Agus")]).unwrap();
            let view = model.current_view();
            assert_eq!(view.len(), 1);
            assert_eq!(view.groups()[0].key, 'A');
            assert_eq!(names(&view.groups()[0]), ["ahmad", "Agus"]);
        }

        #[test]
        fn test_non_alphabetic_initials_use_literal_char() {
            let model = GroupedSearchList::new(vec![
                entity(1, "Zorro"),
                entity(2, "99 Heroes"),
                entity(3, "#hashtag"),
                entity(4, "Arjuna"),
            ])
            .unwrap();
            let view = model.current_view();
            assert_eq!(view.keys().collect::<Vec<_>>(), ['#', '9', 'A', 'Z']);
        }

        #[test]
        fn test_view_is_idempotent() {
            let mut model = GroupedSearchList::new(heroes()).unwrap();
            model.set_query("man");
            assert_eq!(model.current_view(), model.current_view());
        }
    }

    mod key_tests {
        use super::*;

        #[test]
        fn test_group_key_uppercases() {
            assert_eq!(group_key("batman"), Some('B'));
            assert_eq!(group_key("éclair"), Some('É'));
        }

        #[test]
        fn test_group_key_literal_fallback() {
            assert_eq!(group_key("7 Samurai"), Some('7'));
            assert_eq!(group_key("ßeta"), Some('ß'));
            assert_eq!(group_key("孙悟空"), Some('孙'));
            assert_eq!(group_key(""), None);
        }

        #[test]
        fn test_matches_query() {
            assert!(matches_query("Batman", ""));
            assert!(matches_query("Batman", "TMA"));
            assert!(!matches_query("Batman", "robin"));
        }
    }

    fn arb_entities() -> impl Strategy<Value = Vec<Entity>> {
        prop::collection::vec("[a-zA-Z0-9 #]{0,7}[a-zA-Z]", 0..24).prop_map(|names| {
            names
                .into_iter()
                .enumerate()
                .map(|(i, name)| entity(i as u64, &name))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn members_match_query(entities in arb_entities(), query in "[a-cA-C ]{0,2}") {
            let mut model = GroupedSearchList::new(entities).unwrap();
            model.set_query(query.clone());
            for group in &model.current_view() {
                for member in &group.members {
                    prop_assert!(matches_query(member.name().as_str(), &query));
                }
            }
        }

        #[test]
        fn view_covers_filtered_subset_exactly(
            entities in arb_entities(),
            query in "[a-cA-C]{0,2}",
        ) {
            let expected: Vec<Entity> = entities
                .iter()
                .filter(|e| matches_query(e.name().as_str(), &query))
                .cloned()
                .collect();

            let mut model = GroupedSearchList::new(entities).unwrap();
            model.set_query(query);
            let view = model.current_view();
            prop_assert_eq!(view.total_members(), expected.len());

            // Per group, members are the filtered subsequence with that key.
            for group in &view {
                let subsequence: Vec<&Entity> = expected
                    .iter()
                    .filter(|e| group_key(e.name().as_str()) == Some(group.key))
                    .collect();
                prop_assert_eq!(group.members.iter().collect::<Vec<_>>(), subsequence);
            }
        }

        #[test]
        fn groups_strictly_ascending_and_non_empty(
            entities in arb_entities(),
            query in "[a-z]{0,1}",
        ) {
            let mut model = GroupedSearchList::new(entities).unwrap();
            model.set_query(query);
            let view = model.current_view();
            let keys: Vec<char> = view.keys().collect();
            prop_assert!(keys.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(view.groups().iter().all(|g| !g.members.is_empty()));
        }
    }
}
