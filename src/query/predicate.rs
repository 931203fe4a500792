// src/query/predicate.rs
use std::collections::HashMap;

/// The three listable entity kinds, each with exactly one searchable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Manufacturer,
    Car,
    Driver,
}

impl EntityKind {
    /// Name of the searchable field, which is also the query parameter name.
    pub fn search_field(&self) -> &'static str {
        match self {
            EntityKind::Manufacturer => "name",
            EntityKind::Car => "model",
            EntityKind::Driver => "username",
        }
    }
}

/// Entities that can be filtered by a [`SearchPredicate`].
pub trait Searchable {
    const KIND: EntityKind;

    fn search_value(&self) -> &str;
}

/// Case-insensitive substring filter over an entity's search field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPredicate {
    kind: EntityKind,
    query: Option<String>,
    folded: Option<String>,
}

impl SearchPredicate {
    pub fn match_all(kind: EntityKind) -> Self {
        Self {
            kind,
            query: None,
            folded: None,
        }
    }

    /// Empty or whitespace-only queries match everything.
    pub fn contains(kind: EntityKind, query: &str) -> Self {
        let query = query.trim();
        if query.is_empty() {
            return Self::match_all(kind);
        }

        Self {
            kind,
            query: Some(query.to_string()),
            folded: Some(query.to_lowercase()),
        }
    }

    /// The query text as submitted (trimmed), if any.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn matches<T: Searchable>(&self, entity: &T) -> bool {
        debug_assert_eq!(T::KIND, self.kind, "predicate applied to the wrong entity kind");

        match &self.folded {
            None => true,
            Some(needle) => entity.search_value().to_lowercase().contains(needle.as_str()),
        }
    }
}

/// Build the search predicate for `kind` from raw query-string parameters.
pub fn build_predicate(kind: EntityKind, query_params: &HashMap<String, String>) -> SearchPredicate {
    match query_params.get(kind.search_field()) {
        Some(query) => SearchPredicate::contains(kind, query),
        None => SearchPredicate::match_all(kind),
    }
}
