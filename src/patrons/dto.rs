use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::patrons::domain::model::Patron;


// PatronDto is a snapshot of a library member and the ids of items they hold.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct PatronDto {
    pub patron_id: String,
    pub name: String,
    pub borrowed_item_ids: Vec<String>,
}

impl From<&Patron> for PatronDto {
    fn from(other: &Patron) -> Self {
        Self {
            patron_id: other.id(),
            name: other.name().to_string(),
            borrowed_item_ids: other.borrowed_items().iter().map(|i| i.id()).collect(),
        }
    }
}
