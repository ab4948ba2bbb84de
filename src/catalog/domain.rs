pub mod service;

use crate::core::library::LibraryResult;
use crate::items::domain::model::ItemRef;

// Catalog membership and availability reporting.
pub trait Manageable {
    fn add(&mut self, item: ItemRef) -> LibraryResult<()>;
    // Removes the first entry that is the same handle as `item`; borrowed state is left as is.
    fn remove(&mut self, item: &ItemRef) -> Option<ItemRef>;
    fn list_available(&self) -> Vec<String>;
    fn list_borrowed(&self) -> Vec<String>;
}
