use serde::{Deserialize, Serialize};
use crate::core::library::ItemStatus;
use crate::items::domain::Lendable;
use crate::items::domain::model::{Item, ItemKind};

// ItemDto is a point-in-time snapshot of an item for reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDto {
    pub unique_id: String,
    pub title: String,
    pub kind: ItemKind,
    pub item_status: ItemStatus,
}

impl ItemDto {
    pub fn summary(&self) -> String {
        format!("{} (ID: {})", self.title, self.unique_id)
    }
}

impl From<&Item> for ItemDto {
    fn from(other: &Item) -> Self {
        Self {
            unique_id: other.unique_id().to_string(),
            title: other.title().to_string(),
            kind: other.kind().clone(),
            item_status: other.status(),
        }
    }
}
