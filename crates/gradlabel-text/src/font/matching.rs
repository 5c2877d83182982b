//! Font matching query

/// Family list to match against the database
#[derive(Debug, Clone, PartialEq)]
pub struct FontQuery {
    /// Families in order of preference (generic names allowed)
    pub families: Vec<String>,
}

impl FontQuery {
    pub fn new(families: &[&str]) -> Self {
        Self {
            families: families.iter().map(|f| f.to_string()).collect(),
        }
    }

    /// Create a query from owned family names
    pub fn from_families(families: &[String]) -> Self {
        Self { families: families.to_vec() }
    }
}
