pub mod budgets;
pub mod transactions;
