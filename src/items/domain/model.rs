use std::cell::Cell;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::rc::Rc;
use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::items::domain::Lendable;

// Shared handle to a catalog item. The catalog and every patron holding the
// item point at the same allocation, and lookups compare handles by identity.
pub type ItemRef = Rc<Item>;

// ItemKind carries the fields that differ between media types; lending
// behaviour is identical for all of them.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub enum ItemKind {
    Book {
        author: String,
    },
    Dvd {
        // running time in minutes
        duration: u32,
    },
}

impl Display for ItemKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            ItemKind::Book { .. } => write!(f, "Book"),
            ItemKind::Dvd { .. } => write!(f, "DVD"),
        }
    }
}

// Item abstracts a single lendable unit in the catalog.
#[derive(Debug)]
pub struct Item {
    title: String,
    unique_id: String,
    kind: ItemKind,
    borrowed: Cell<bool>,
}

impl Item {
    pub fn new(title: &str, unique_id: &str, kind: ItemKind) -> Self {
        Self {
            title: title.to_string(),
            unique_id: unique_id.to_string(),
            kind,
            borrowed: Cell::new(false),
        }
    }

    pub fn book(title: &str, unique_id: &str, author: &str) -> Self {
        Self::new(title, unique_id, ItemKind::Book { author: author.to_string() })
    }

    pub fn dvd(title: &str, unique_id: &str, duration: u32) -> Self {
        Self::new(title, unique_id, ItemKind::Dvd { duration })
    }

    pub fn into_ref(self) -> ItemRef {
        Rc::new(self)
    }

    pub fn unique_id(&self) -> &str {
        self.unique_id.as_str()
    }

    pub fn kind(&self) -> &ItemKind {
        &self.kind
    }

    pub fn author(&self) -> Option<&str> {
        match &self.kind {
            ItemKind::Book { author } => Some(author.as_str()),
            ItemKind::Dvd { .. } => None,
        }
    }

    pub fn duration(&self) -> Option<u32> {
        match self.kind {
            ItemKind::Dvd { duration } => Some(duration),
            ItemKind::Book { .. } => None,
        }
    }

    // Renders the report line `<title> (ID: <unique_id>)`.
    pub fn summary(&self) -> String {
        format!("{} (ID: {})", self.title, self.unique_id)
    }

    // No precondition here; Library::lend_item checks availability first.
    pub(crate) fn borrow_item(&self) {
        self.borrowed.set(true);
    }

    pub(crate) fn return_item(&self) {
        self.borrowed.set(false);
    }
}

impl Identifiable for Item {
    fn id(&self) -> String {
        self.unique_id.to_string()
    }
}

impl Lendable for Item {
    fn title(&self) -> &str {
        self.title.as_str()
    }

    fn is_borrowed(&self) -> bool {
        self.borrowed.get()
    }
}
