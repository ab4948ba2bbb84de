use crate::core::domain::Identifiable;
use crate::core::library::ItemStatus;

pub mod model;

pub trait Lendable: Identifiable {
    fn title(&self) -> &str;
    fn is_borrowed(&self) -> bool;
    fn status(&self) -> ItemStatus {
        ItemStatus::from(self.is_borrowed())
    }
}
