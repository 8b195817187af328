//! Category rows as read from the nested-set table

use serde::Serialize;

/// Id of the absolute root of the category tree
pub const ROOT_CATEGORY_ID: i64 = 1;

/// Language code meaning "all languages"
pub const ALL_LANGUAGES: &str = "*";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PublishedState {
    Trashed,
    Unpublished,
    Published,
    Archived,
    /// Any other state code stored in the table; never visible
    Other(i64),
}

impl PublishedState {
    pub fn code(self) -> i64 {
        match self {
            PublishedState::Trashed => -2,
            PublishedState::Unpublished => 0,
            PublishedState::Published => 1,
            PublishedState::Archived => 2,
            PublishedState::Other(code) => code,
        }
    }

    pub fn from_code(code: i64) -> Self {
        match code {
            -2 => PublishedState::Trashed,
            0 => PublishedState::Unpublished,
            1 => PublishedState::Published,
            2 => PublishedState::Archived,
            other => PublishedState::Other(other),
        }
    }
}

/// One row of the category query, ordered by `lft`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryNode {
    pub id: i64,
    pub title: String,
    /// Depth in the tree; the root is level 0
    pub level: i64,
    pub published: PublishedState,
    pub hidden: bool,
    /// Some ancestor is hidden
    pub in_hidden: bool,
    pub lft: i64,
    pub language: String,
}

impl CategoryNode {
    /// Published and neither hidden itself nor below a hidden ancestor
    pub fn is_visible(&self) -> bool {
        self.published == PublishedState::Published && !self.hidden && !self.in_hidden
    }
}

/// Placement of a single category, used when deciding on root options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryPlacement {
    pub parent_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(published: PublishedState, hidden: bool, in_hidden: bool) -> CategoryNode {
        CategoryNode {
            id: 2,
            title: "Landscapes".to_string(),
            level: 1,
            published,
            hidden,
            in_hidden,
            lft: 1,
            language: ALL_LANGUAGES.to_string(),
        }
    }

    #[test]
    fn test_state_codes() {
        for state in [
            PublishedState::Trashed,
            PublishedState::Unpublished,
            PublishedState::Published,
            PublishedState::Archived,
        ] {
            assert_eq!(PublishedState::from_code(state.code()), state);
        }
    }

    #[test]
    fn test_unknown_state_code_is_kept_but_not_visible() {
        let state = PublishedState::from_code(3);
        assert_eq!(state, PublishedState::Other(3));
        assert_eq!(state.code(), 3);
        assert!(!node(state, false, false).is_visible());
    }

    #[test]
    fn test_visibility() {
        assert!(node(PublishedState::Published, false, false).is_visible());
        assert!(!node(PublishedState::Unpublished, false, false).is_visible());
        assert!(!node(PublishedState::Published, true, false).is_visible());
        assert!(!node(PublishedState::Published, false, true).is_visible());
    }
}
