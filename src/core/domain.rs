use serde::{Deserialize, Serialize};
use crate::core::library::LibraryResult;

// Identifiable defines common traits that can be shared by catalog objects
pub trait Identifiable {
    fn id(&self) -> String;
}


// Configuration abstracts config options for library system
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Configuration {
    pub branch_id: String,
    // rejects add/register_patron when the id is already present
    pub reject_duplicate_ids: bool,
    // rejects lend_item for items that were never added to this catalog
    pub require_catalog_membership: bool,
    pub log_level: String,
}

impl Configuration {
    pub fn new(branch_id: &str) -> Self {
        Configuration {
            branch_id: branch_id.to_string(),
            reject_duplicate_ids: false,
            require_catalog_membership: false,
            log_level: "info".to_string(),
        }
    }

    pub fn strict(branch_id: &str) -> Self {
        Configuration {
            reject_duplicate_ids: true,
            require_catalog_membership: true,
            ..Configuration::new(branch_id)
        }
    }

    pub fn from_json(json: &str) -> LibraryResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration::new("main")
    }
}
