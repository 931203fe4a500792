// src/query/mod.rs
pub mod pagination;
pub mod predicate;

pub use pagination::{list_page, BaseOrdering, Page, PageNumber, SearchResult, DEFAULT_PAGE_SIZE};
pub use predicate::{build_predicate, EntityKind, SearchPredicate, Searchable};
