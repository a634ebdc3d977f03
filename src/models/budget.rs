use serde::Serialize;

use crate::models::transaction::serde_cents;

#[derive(Debug, Clone, Serialize)]
pub struct Budget {
    pub id: i64,
    pub category: String,
    #[serde(rename = "amount", with = "serde_cents")]
    pub amount_cents: i64,
    pub month: u32,
    pub year: i32,
}

#[derive(Debug, Clone)]
pub struct NewBudget {
    pub category: String,
    pub amount_cents: i64,
    pub month: u32,
    pub year: i32,
}
