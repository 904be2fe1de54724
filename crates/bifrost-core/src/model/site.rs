use serde::Serialize;

/// A building or complex grouping addressable units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Site {
    pub id: i64,
    pub name: String,
}
