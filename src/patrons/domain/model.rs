use std::cell::RefCell;
use std::rc::Rc;
use crate::core::domain::Identifiable;
use crate::items::domain::model::ItemRef;

pub type PatronRef = Rc<Patron>;

// Patron abstracts library member and the items they currently hold.
#[derive(Debug)]
pub struct Patron {
    name: String,
    id: String,
    borrowed_items: RefCell<Vec<ItemRef>>,
}

impl Patron {
    pub fn new(name: &str, id: &str) -> Self {
        Self {
            name: name.to_string(),
            id: id.to_string(),
            borrowed_items: RefCell::new(vec![]),
        }
    }

    pub fn into_ref(self) -> PatronRef {
        Rc::new(self)
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    // Items currently held, in the order they were borrowed.
    pub fn borrowed_items(&self) -> Vec<ItemRef> {
        self.borrowed_items.borrow().clone()
    }

    pub fn is_holding(&self, item: &ItemRef) -> bool {
        self.borrowed_items.borrow().iter().any(|held| Rc::ptr_eq(held, item))
    }

    pub(crate) fn borrow(&self, item: &ItemRef) {
        self.borrowed_items.borrow_mut().push(Rc::clone(item));
        item.borrow_item();
    }

    // Clears the item's flag only when this patron actually held it.
    pub(crate) fn return_item(&self, item: &ItemRef) -> bool {
        let mut held = self.borrowed_items.borrow_mut();
        match held.iter().position(|h| Rc::ptr_eq(h, item)) {
            Some(ndx) => {
                held.remove(ndx);
                item.return_item();
                true
            }
            None => false,
        }
    }
}

impl Identifiable for Patron {
    fn id(&self) -> String {
        self.id.to_string()
    }
}
