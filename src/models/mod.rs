use serde::Serialize;

/// Longest name the items table accepts.
pub const MAX_NAME_LEN: usize = 50;

/// A row of the items table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Item {
    pub id: i64,
    pub name: String,
}

/// Response wrapper for the list endpoint
#[derive(Debug, Serialize)]
pub struct ItemList {
    pub items: Vec<Item>,
}

/// Query parameters for creating an item
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CreateItemQuery {
    pub name: Option<String>,
}

impl CreateItemQuery {
    /// Picks parameters out of raw query pairs. A repeated key keeps its
    /// first value.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let name = pairs
            .into_iter()
            .find_map(|(key, value)| (key == "name").then_some(value));

        CreateItemQuery { name }
    }
}
