use serde::{Deserialize, Serialize};
use crate::core::library::LibraryResult;
use crate::items::dto::ItemDto;

pub const AVAILABLE_HEADER: &str = "Available Items:";
pub const BORROWED_HEADER: &str = "Borrowed Items:";

// AvailabilityReport partitions the catalog, in catalog order, by borrowed state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityReport {
    pub available: Vec<ItemDto>,
    pub borrowed: Vec<ItemDto>,
}

impl AvailabilityReport {
    pub fn new(available: Vec<ItemDto>, borrowed: Vec<ItemDto>) -> Self {
        Self {
            available,
            borrowed,
        }
    }

    pub fn to_json(&self) -> LibraryResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    // Console text: each section header followed by one `<title> (ID: <id>)` line per item.
    pub fn render(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.available.len() + self.borrowed.len() + 2);
        lines.push(AVAILABLE_HEADER.to_string());
        lines.extend(self.available.iter().map(ItemDto::summary));
        lines.push(BORROWED_HEADER.to_string());
        lines.extend(self.borrowed.iter().map(ItemDto::summary));
        lines
    }
}
