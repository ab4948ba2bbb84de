use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};

pub const ALREADY_BORROWED_MSG: &str = "Item is already borrowed.";
pub const NOT_BORROWED_MSG: &str = "Patron did not borrow this item.";

#[derive(Debug, PartialEq, Clone)]
pub enum LibraryError {
    // The item is currently held by some patron and cannot be lent again until returned.
    AlreadyBorrowed {
        message: String,
        item_id: String,
    },
    // The patron has no record of holding the item being returned.
    NotBorrowed {
        message: String,
        patron_id: String,
        item_id: String,
    },
    DuplicateKey {
        message: String,
    },
    NotFound {
        message: String,
    },
    Serialization {
        message: String,
    },
}

impl LibraryError {
    pub fn already_borrowed(item_id: &str) -> LibraryError {
        LibraryError::AlreadyBorrowed { message: ALREADY_BORROWED_MSG.to_string(), item_id: item_id.to_string() }
    }

    pub fn not_borrowed(patron_id: &str, item_id: &str) -> LibraryError {
        LibraryError::NotBorrowed {
            message: NOT_BORROWED_MSG.to_string(),
            patron_id: patron_id.to_string(),
            item_id: item_id.to_string(),
        }
    }

    pub fn duplicate_key(message: &str) -> LibraryError {
        LibraryError::DuplicateKey { message: message.to_string() }
    }

    pub fn not_found(message: &str) -> LibraryError {
        LibraryError::NotFound { message: message.to_string() }
    }

    pub fn serialization(message: &str) -> LibraryError {
        LibraryError::Serialization { message: message.to_string() }
    }

    // An item that is already borrowed becomes lendable again once it is returned.
    pub fn retryable(&self) -> bool {
        match self {
            LibraryError::AlreadyBorrowed { .. } => { true }
            LibraryError::NotBorrowed { .. } => { false }
            LibraryError::DuplicateKey { .. } => { false }
            LibraryError::NotFound { .. } => { false }
            LibraryError::Serialization { .. } => { false }
        }
    }
}

impl From<serde_json::Error> for LibraryError {
    fn from(err: serde_json::Error) -> Self {
        LibraryError::serialization(
            format!("serde json parsing {:?}", err).as_str())
    }
}

impl Display for LibraryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LibraryError::AlreadyBorrowed { message, .. } => {
                write!(f, "{}", message)
            }
            LibraryError::NotBorrowed { message, .. } => {
                write!(f, "{}", message)
            }
            LibraryError::DuplicateKey { message } => {
                write!(f, "{}", message)
            }
            LibraryError::NotFound { message } => {
                write!(f, "{}", message)
            }
            LibraryError::Serialization { message } => {
                write!(f, "{}", message)
            }
        }
    }
}

impl std::error::Error for LibraryError {}

/// A specialized Result type for catalog operations.
pub type LibraryResult<T> = Result<T, LibraryError>;

#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub enum ItemStatus {
    Available,
    Borrowed,
}

impl From<bool> for ItemStatus {
    fn from(borrowed: bool) -> Self {
        if borrowed { ItemStatus::Borrowed } else { ItemStatus::Available }
    }
}

impl From<String> for ItemStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Borrowed" => ItemStatus::Borrowed,
            _ => ItemStatus::Available,
        }
    }
}

impl Display for ItemStatus {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            ItemStatus::Available => write!(f, "Available"),
            ItemStatus::Borrowed => write!(f, "Borrowed"),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub enum CheckoutStatus {
    CheckedOut,
    Returned,
}

impl From<String> for CheckoutStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "CheckedOut" => CheckoutStatus::CheckedOut,
            "Returned" => CheckoutStatus::Returned,
            _ => CheckoutStatus::CheckedOut,
        }
    }
}

impl Display for CheckoutStatus {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            CheckoutStatus::CheckedOut => write!(f, "CheckedOut"),
            CheckoutStatus::Returned => write!(f, "Returned"),
        }
    }
}
