pub mod budget;
pub mod category;
pub mod transaction;

pub use budget::{Budget, NewBudget};
pub use category::RECOMMENDED_CATEGORIES;
pub use transaction::{NewTransaction, Transaction, TransactionChanges, TransactionKind};
