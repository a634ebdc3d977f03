use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Amounts are stored as integer cents and exposed on the wire as decimal
/// dollars, matching what the client sends and displays.
pub mod serde_cents {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(cents: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(*cents as f64 / 100.0)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        Ok(super::cents_from_decimal(amount))
    }
}

pub fn cents_from_decimal(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Expense,
    Income,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
        }
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "expense" => Ok(Self::Expense),
            "income" => Ok(Self::Income),
            other => Err(format!(
                "type must be 'expense' or 'income', got '{}'",
                other
            )),
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Transaction {
    pub id: i64,
    pub date: String,
    #[serde(rename = "amount", with = "serde_cents")]
    pub amount_cents: i64,
    pub description: String,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub date: String,
    pub amount_cents: i64,
    pub description: String,
    pub category: String,
    pub kind: TransactionKind,
}

/// Field-wise changes for an update. `None` leaves the stored value alone;
/// present fields are replaced wholesale.
#[derive(Debug, Clone, Default)]
pub struct TransactionChanges {
    pub date: Option<String>,
    pub amount_cents: Option<i64>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub kind: Option<TransactionKind>,
}

impl TransactionChanges {
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.amount_cents.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.kind.is_none()
    }
}
