// In-memory library catalog: books and DVDs lent to and returned by patrons,
// with availability reporting.

pub mod catalog;
pub mod checkout;
pub mod core;
pub mod items;
pub mod patrons;
pub mod utils;
