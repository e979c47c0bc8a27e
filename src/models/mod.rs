pub mod category;
pub mod filter;
pub mod form;
pub mod summary;
pub mod transaction;

pub use category::{is_other, DEFAULT_CATEGORIES, OTHER_CATEGORY};
pub use filter::Filter;
pub use form::{is_valid_amount, NewTransaction, TransactionForm, ValidationError, MAX_AMOUNT};
pub use summary::Summary;
pub use transaction::{Transaction, TransactionId, TransactionType};
