use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::library::CheckoutStatus;
use crate::core::domain::Identifiable;
use crate::items::domain::Lendable;
use crate::items::domain::model::Item;
use crate::patrons::domain::model::Patron;
use crate::utils::date::{option_serializer, serializer};


// CheckoutDto is the receipt for an item lent to or returned by a patron.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct CheckoutDto {
    pub checkout_id: String,
    pub branch_id: String,
    pub item_id: String,
    pub item_title: String,
    pub patron_id: String,
    pub patron_name: String,
    pub checkout_status: CheckoutStatus,
    #[serde(with = "serializer")]
    pub checkout_at: NaiveDateTime,
    #[serde(with = "option_serializer")]
    pub returned_at: Option<NaiveDateTime>,
}

impl CheckoutDto {
    pub fn from_patron_item(branch_id: &str, patron: &Patron, item: &Item) -> Self {
        CheckoutDto {
            checkout_id: Uuid::new_v4().to_string(),
            branch_id: branch_id.to_string(),
            item_id: item.id(),
            item_title: item.title().to_string(),
            patron_id: patron.id(),
            patron_name: patron.name().to_string(),
            checkout_status: CheckoutStatus::CheckedOut,
            checkout_at: Utc::now().naive_utc(),
            returned_at: None,
        }
    }

    // Closes the checkout; checkout_id and checkout_at are kept from the lend.
    pub fn mark_returned(&mut self) {
        self.checkout_status = CheckoutStatus::Returned;
        self.returned_at = Some(Utc::now().naive_utc());
    }

    // Human readable outcome, e.g. `Book 1 has been borrowed by Patron 1`.
    pub fn message(&self) -> String {
        let verb = match self.checkout_status {
            CheckoutStatus::CheckedOut => "borrowed",
            CheckoutStatus::Returned => "returned",
        };
        format!("{} has been {} by {}", self.item_title, verb, self.patron_name)
    }
}

impl Identifiable for CheckoutDto {
    fn id(&self) -> String {
        self.checkout_id.to_string()
    }
}
