use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info, warn};
use crate::catalog::domain::Manageable;
use crate::catalog::dto::AvailabilityReport;
use crate::checkout::dto::CheckoutDto;
use crate::core::domain::{Configuration, Identifiable};
use crate::core::library::{ItemStatus, LibraryError, LibraryResult};
use crate::items::domain::Lendable;
use crate::items::domain::model::ItemRef;
use crate::items::dto::ItemDto;
use crate::patrons::domain::model::{Patron, PatronRef};

// Library owns the catalog and the roster of patrons and coordinates lending.
#[derive(Debug)]
pub struct Library {
    config: Configuration,
    items: Vec<ItemRef>,
    patrons: Vec<PatronRef>,
    // open checkouts, keyed by the lent item handle and the borrowing patron id
    checkouts: RefCell<Vec<(ItemRef, CheckoutDto)>>,
}

impl Library {
    pub fn new(config: &Configuration) -> Self {
        Self {
            config: config.clone(),
            items: vec![],
            patrons: vec![],
            checkouts: RefCell::new(vec![]),
        }
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn items(&self) -> &[ItemRef] {
        &self.items
    }

    pub fn patrons(&self) -> &[PatronRef] {
        &self.patrons
    }

    pub fn find_item(&self, id: &str) -> Option<ItemRef> {
        self.items.iter().find(|i| i.unique_id() == id).cloned()
    }

    pub fn find_patron(&self, id: &str) -> Option<PatronRef> {
        self.patrons.iter().find(|p| p.id() == id).cloned()
    }

    pub fn open_checkouts(&self) -> Vec<CheckoutDto> {
        self.checkouts.borrow().iter().map(|(_, c)| c.clone()).collect()
    }

    pub fn find_checkout(&self, checkout_id: &str) -> Option<CheckoutDto> {
        self.checkouts.borrow().iter().find(|(_, c)| c.id() == checkout_id).map(|(_, c)| c.clone())
    }

    pub fn contains(&self, item: &ItemRef) -> bool {
        self.items.iter().any(|i| Rc::ptr_eq(i, item))
    }

    pub fn register_patron(&mut self, patron: PatronRef) -> LibraryResult<()> {
        if self.config.reject_duplicate_ids && self.find_patron(patron.id().as_str()).is_some() {
            warn!(patron_id = patron.id().as_str(), "rejected duplicate patron");
            return Err(LibraryError::duplicate_key(
                format!("patron with id {} already registered", patron.id()).as_str()));
        }
        info!(patron_id = patron.id().as_str(), "registered patron");
        self.patrons.push(patron);
        Ok(())
    }

    pub fn lend_item(&self, patron: &Patron, item: &ItemRef) -> LibraryResult<CheckoutDto> {
        if item.is_borrowed() {
            warn!(patron_id = patron.id().as_str(), item_id = item.unique_id(), "item is already borrowed");
            return Err(LibraryError::already_borrowed(item.unique_id()));
        }
        if self.config.require_catalog_membership && !self.contains(item) {
            warn!(item_id = item.unique_id(), "item is not in catalog");
            return Err(LibraryError::not_found(
                format!("item with id {} is not in catalog", item.unique_id()).as_str()));
        }
        patron.borrow(item);
        let checkout = CheckoutDto::from_patron_item(self.config.branch_id.as_str(), patron, item);
        self.checkouts.borrow_mut().push((Rc::clone(item), checkout.clone()));
        info!(patron_id = patron.id().as_str(), item_id = item.unique_id(),
            checkout_id = checkout.id().as_str(), "{}", checkout.message());
        Ok(checkout)
    }

    pub fn return_item(&self, patron: &Patron, item: &ItemRef) -> LibraryResult<CheckoutDto> {
        if !patron.is_holding(item) {
            warn!(patron_id = patron.id().as_str(), item_id = item.unique_id(), "patron did not borrow item");
            return Err(LibraryError::not_borrowed(patron.id().as_str(), item.unique_id()));
        }
        patron.return_item(item);
        let mut checkout = self.take_checkout(patron, item)
            .unwrap_or_else(|| CheckoutDto::from_patron_item(self.config.branch_id.as_str(), patron, item));
        checkout.mark_returned();
        info!(patron_id = patron.id().as_str(), item_id = item.unique_id(),
            checkout_id = checkout.id().as_str(), "{}", checkout.message());
        Ok(checkout)
    }

    fn take_checkout(&self, patron: &Patron, item: &ItemRef) -> Option<CheckoutDto> {
        let mut checkouts = self.checkouts.borrow_mut();
        let patron_id = patron.id();
        let ndx = checkouts.iter().position(|(lent, c)| Rc::ptr_eq(lent, item) && c.patron_id == patron_id)?;
        Some(checkouts.remove(ndx).1)
    }

    pub fn availability_report(&self) -> AvailabilityReport {
        let (borrowed, available): (Vec<_>, Vec<_>) = self.items.iter()
            .map(|i| ItemDto::from(&**i))
            .partition(|dto| dto.item_status == ItemStatus::Borrowed);
        debug!(available = available.len(), borrowed = borrowed.len(), "built availability report");
        AvailabilityReport::new(available, borrowed)
    }

    fn summaries(&self, borrowed: bool) -> Vec<String> {
        self.items.iter()
            .filter(|i| i.is_borrowed() == borrowed)
            .map(|i| i.summary())
            .collect()
    }
}

impl Default for Library {
    fn default() -> Self {
        Library::new(&Configuration::default())
    }
}

impl Manageable for Library {
    fn add(&mut self, item: ItemRef) -> LibraryResult<()> {
        if self.config.reject_duplicate_ids && self.find_item(item.unique_id()).is_some() {
            warn!(item_id = item.unique_id(), "rejected duplicate item");
            return Err(LibraryError::duplicate_key(
                format!("item with id {} already in catalog", item.unique_id()).as_str()));
        }
        info!(item_id = item.unique_id(), kind = %item.kind(), "added item");
        self.items.push(item);
        Ok(())
    }

    fn remove(&mut self, item: &ItemRef) -> Option<ItemRef> {
        let ndx = self.items.iter().position(|i| Rc::ptr_eq(i, item))?;
        info!(item_id = item.unique_id(), "removed item");
        Some(self.items.remove(ndx))
    }

    fn list_available(&self) -> Vec<String> {
        self.summaries(false)
    }

    fn list_borrowed(&self) -> Vec<String> {
        self.summaries(true)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::rc::Rc;
    use crate::catalog::domain::Manageable;
    use crate::catalog::domain::service::Library;
    use crate::core::domain::Configuration;
    use crate::core::library::{CheckoutStatus, LibraryError};
    use crate::items::domain::Lendable;
    use crate::items::domain::model::{Item, ItemRef};
    use crate::patrons::domain::model::{Patron, PatronRef};

    fn build_library(config: &Configuration) -> (Library, Vec<ItemRef>, Vec<PatronRef>) {
        let mut library = Library::new(config);
        let items = vec![
            Item::book("Book 1", "B001", "Author 1").into_ref(),
            Item::book("Book 2", "B002", "Author 2").into_ref(),
            Item::dvd("DVD 1", "D001", 120).into_ref(),
        ];
        for item in items.iter() {
            library.add(Rc::clone(item)).expect("should add item");
        }
        let patrons = vec![
            Patron::new("Patron 1", "P001").into_ref(),
            Patron::new("Patron 2", "P002").into_ref(),
        ];
        for patron in patrons.iter() {
            library.register_patron(Rc::clone(patron)).expect("should register patron");
        }
        (library, items, patrons)
    }

    fn assert_partition(library: &Library) {
        let available: HashSet<String> = library.list_available().into_iter().collect();
        let borrowed: HashSet<String> = library.list_borrowed().into_iter().collect();
        let all: HashSet<String> = library.items().iter().map(|i| i.summary()).collect();
        assert!(available.is_disjoint(&borrowed));
        let union: HashSet<String> = available.union(&borrowed).cloned().collect();
        assert_eq!(all, union);
    }

    #[test]
    fn test_should_list_everything_available_initially() {
        let (library, _, _) = build_library(&Configuration::new("test"));
        assert_eq!(vec!["Book 1 (ID: B001)", "Book 2 (ID: B002)", "DVD 1 (ID: D001)"], library.list_available());
        assert!(library.list_borrowed().is_empty());
    }

    #[test]
    fn test_should_lend_item() {
        let (library, items, patrons) = build_library(&Configuration::new("test"));
        let checkout = library.lend_item(&patrons[0], &items[0]).expect("should lend");
        assert_eq!("Book 1 has been borrowed by Patron 1", checkout.message());
        assert_eq!(CheckoutStatus::CheckedOut, checkout.checkout_status);
        assert_eq!("test", checkout.branch_id.as_str());
        assert!(items[0].is_borrowed());
        assert_eq!(1, patrons[0].borrowed_items().len());
        assert_partition(&library);
    }

    #[test]
    fn test_should_not_lend_borrowed_item() {
        let (library, items, patrons) = build_library(&Configuration::new("test"));
        let _ = library.lend_item(&patrons[0], &items[2]).expect("should lend");

        let res = library.lend_item(&patrons[1], &items[2]);
        let err = res.expect_err("should reject second lend");
        assert_eq!("Item is already borrowed.", err.to_string());
        assert!(items[2].is_borrowed());
        assert_eq!(1, patrons[0].borrowed_items().len());
        assert!(patrons[1].borrowed_items().is_empty());

        let again = library.lend_item(&patrons[0], &items[2]);
        assert!(matches!(again, Err(LibraryError::AlreadyBorrowed { .. })));
        assert_eq!(1, patrons[0].borrowed_items().len());
    }

    #[test]
    fn test_should_return_item() {
        let (library, items, patrons) = build_library(&Configuration::new("test"));
        let _ = library.lend_item(&patrons[1], &items[2]).expect("should lend");
        let checkout = library.return_item(&patrons[1], &items[2]).expect("should return");
        assert_eq!("DVD 1 has been returned by Patron 2", checkout.message());
        assert_eq!(CheckoutStatus::Returned, checkout.checkout_status);
        assert!(!items[2].is_borrowed());
        assert!(patrons[1].borrowed_items().is_empty());
        assert_partition(&library);
    }

    #[test]
    fn test_should_not_return_item_never_borrowed() {
        let (library, items, patrons) = build_library(&Configuration::new("test"));
        let _ = library.lend_item(&patrons[0], &items[0]).expect("should lend");

        let err = library.return_item(&patrons[1], &items[0]).expect_err("should reject return");
        assert_eq!("Patron did not borrow this item.", err.to_string());
        assert!(items[0].is_borrowed());
        assert!(patrons[0].is_holding(&items[0]));

        let err = library.return_item(&patrons[1], &items[1]).expect_err("should reject return");
        assert!(matches!(err, LibraryError::NotBorrowed { .. }));
        assert!(!items[1].is_borrowed());
    }

    #[test]
    fn test_should_close_lend_checkout_on_return() {
        let (library, items, patrons) = build_library(&Configuration::new("test"));
        let lent = library.lend_item(&patrons[0], &items[0]).expect("should lend");
        let _ = library.lend_item(&patrons[1], &items[2]).expect("should lend");
        assert_eq!(2, library.open_checkouts().len());
        assert_eq!(Some(lent.clone()), library.find_checkout(lent.checkout_id.as_str()));

        std::thread::sleep(std::time::Duration::from_millis(5));
        let returned = library.return_item(&patrons[0], &items[0]).expect("should return");
        assert_eq!(lent.checkout_id, returned.checkout_id);
        assert_eq!(lent.checkout_at, returned.checkout_at);
        assert_eq!(CheckoutStatus::Returned, returned.checkout_status);
        assert!(returned.returned_at.is_some_and(|at| at > lent.checkout_at));
        assert!(library.find_checkout(lent.checkout_id.as_str()).is_none());
        assert_eq!(1, library.open_checkouts().len());
        assert_eq!("D001", library.open_checkouts()[0].item_id.as_str());
    }

    #[test]
    fn test_should_keep_checkout_when_return_rejected() {
        let (library, items, patrons) = build_library(&Configuration::new("test"));
        let lent = library.lend_item(&patrons[0], &items[0]).expect("should lend");
        let _ = library.return_item(&patrons[1], &items[0]).expect_err("should reject return");
        assert_eq!(Some(lent), library.open_checkouts().into_iter().next());
    }

    #[test]
    fn test_should_cycle_item_between_patrons() {
        let (library, items, patrons) = build_library(&Configuration::new("test"));
        for _ in 0..3 {
            let _ = library.lend_item(&patrons[0], &items[1]).expect("should lend");
            let _ = library.return_item(&patrons[0], &items[1]).expect("should return");
            let _ = library.lend_item(&patrons[1], &items[1]).expect("should lend");
            let _ = library.return_item(&patrons[1], &items[1]).expect("should return");
        }
        assert!(!items[1].is_borrowed());
        assert!(library.open_checkouts().is_empty());
        assert_partition(&library);
    }

    #[test]
    fn test_should_remove_item_without_touching_state() {
        let (mut library, items, patrons) = build_library(&Configuration::new("test"));
        let _ = library.lend_item(&patrons[0], &items[0]).expect("should lend");

        let removed = library.remove(&items[0]).expect("should remove");
        assert!(Rc::ptr_eq(&items[0], &removed));
        assert!(removed.is_borrowed());
        assert!(patrons[0].is_holding(&items[0]));
        assert!(library.list_borrowed().is_empty());
        assert!(library.remove(&items[0]).is_none());
        assert_eq!(2, library.items().len());
    }

    #[test]
    fn test_should_remove_by_identity() {
        let (mut library, _, _) = build_library(&Configuration::new("test"));
        let twin = Item::book("Book 1", "B001", "Author 1").into_ref();
        assert!(library.remove(&twin).is_none());
        assert_eq!(3, library.items().len());
    }

    #[test]
    fn test_should_allow_duplicates_by_default() {
        let (mut library, _, _) = build_library(&Configuration::new("test"));
        library.add(Item::book("Copy", "B001", "Author 1").into_ref()).expect("should add");
        library.register_patron(Patron::new("Again", "P001").into_ref()).expect("should register");
        assert_eq!(4, library.items().len());
        assert_eq!(3, library.patrons().len());
        let found = library.find_item("B001").expect("should find");
        assert_eq!("Book 1", found.title());
    }

    #[test]
    fn test_should_reject_duplicates_when_configured() {
        let (mut library, _, _) = build_library(&Configuration::strict("test"));
        let res = library.add(Item::book("Copy", "B001", "Author 1").into_ref());
        assert!(matches!(res, Err(LibraryError::DuplicateKey { .. })));
        let res = library.register_patron(Patron::new("Again", "P001").into_ref());
        assert!(matches!(res, Err(LibraryError::DuplicateKey { .. })));
        assert_eq!(3, library.items().len());
        assert_eq!(2, library.patrons().len());
    }

    #[test]
    fn test_should_lend_uncatalogued_item_by_default() {
        let (library, _, patrons) = build_library(&Configuration::new("test"));
        let stray = Item::dvd("Stray", "X001", 90).into_ref();
        let _ = library.lend_item(&patrons[0], &stray).expect("should lend");
        assert!(stray.is_borrowed());
        assert!(library.list_borrowed().is_empty());
    }

    #[test]
    fn test_should_reject_uncatalogued_item_when_configured() {
        let (library, _, patrons) = build_library(&Configuration::strict("test"));
        let stray = Item::dvd("Stray", "X001", 90).into_ref();
        let res = library.lend_item(&patrons[0], &stray);
        assert!(matches!(res, Err(LibraryError::NotFound { .. })));
        assert!(!stray.is_borrowed());
        assert!(patrons[0].borrowed_items().is_empty());
    }

    #[test]
    fn test_should_find_patron() {
        let (library, _, patrons) = build_library(&Configuration::new("test"));
        let found = library.find_patron("P002").expect("should find");
        assert!(Rc::ptr_eq(&patrons[1], &found));
        assert!(library.find_patron("P404").is_none());
    }

    #[test]
    fn test_should_build_availability_report() {
        let (library, items, patrons) = build_library(&Configuration::new("test"));
        let _ = library.lend_item(&patrons[1], &items[2]).expect("should lend");
        let report = library.availability_report();
        assert_eq!(2, report.available.len());
        assert_eq!(1, report.borrowed.len());
        assert_eq!("D001", report.borrowed[0].unique_id.as_str());
    }
}
