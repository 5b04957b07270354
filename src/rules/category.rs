#![forbid(unsafe_code)]

//! Rule categories

use crate::types::CategoryLocation;
use serde::Serialize;

/// A category grouping thematically related rules
///
/// A category is shared, not owned: every rule compiled while the category
/// is open holds a reference to the same descriptor. Its enabled default
/// cascades onto contained rules that do not set their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    /// Human-readable category name
    pub name: String,
    /// Optional ordering priority
    pub priority: Option<i32>,
    /// Whether the category ships with the checker or is externally loaded
    pub location: CategoryLocation,
    /// Whether contained rules are enabled unless they opt out
    pub on_by_default: bool,
}

impl Category {
    /// Creates a category with the given name and defaults for the rest
    pub fn new(name: impl Into<String>) -> Self {
        Category {
            name: name.into(),
            priority: None,
            location: CategoryLocation::Internal,
            on_by_default: true,
        }
    }
}
