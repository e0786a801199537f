use serde::{Deserialize, Serialize};

/// A bookable facility (club) as listed by the booking site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    pub name: String,
    pub district: String,
}
