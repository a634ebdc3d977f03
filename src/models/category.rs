/// Recommended categories offered by the client's pickers. Transactions and
/// budgets store the category as a free string; this list is advisory only.
pub const RECOMMENDED_CATEGORIES: &[&str] = &[
    "Food & Dining",
    "Shopping",
    "Transportation",
    "Bills & Utilities",
    "Entertainment",
    "Healthcare",
    "Travel",
    "Education",
    "Personal Care",
    "Gifts & Donations",
    "Other",
];
