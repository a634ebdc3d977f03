use crate::models::{NewTransaction, Transaction, TransactionChanges, TransactionKind};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::str::FromStr;
use tracing::{debug, trace};

const COLUMNS: &str = "id, date, amount_cents, description, category, kind, created_at, updated_at";

#[derive(Default)]
pub struct TransactionFilter {
    pub kind: Option<TransactionKind>,
    /// Inclusive lower bound on the ISO date.
    pub from_date: Option<String>,
    /// Exclusive upper bound on the ISO date.
    pub before_date: Option<String>,
    pub limit: Option<i64>,
}

fn row_to_transaction(row: &Row) -> rusqlite::Result<Transaction> {
    let kind_str: String = row.get(5)?;
    Ok(Transaction {
        id: row.get(0)?,
        date: row.get(1)?,
        amount_cents: row.get(2)?,
        description: row.get(3)?,
        category: row.get(4)?,
        kind: TransactionKind::from_str(&kind_str).map_err(|_| {
            rusqlite::Error::InvalidColumnType(5, "kind".into(), rusqlite::types::Type::Text)
        })?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

/// List transactions newest-date-first, optionally restricted by kind and a
/// half-open date window.
pub fn list_transactions(
    conn: &Connection,
    filter: &TransactionFilter,
) -> rusqlite::Result<Vec<Transaction>> {
    let mut sql = format!("SELECT {} FROM transactions WHERE 1=1", COLUMNS);
    let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

    if let Some(kind) = filter.kind {
        sql.push_str(" AND kind = ?");
        params_vec.push(Box::new(kind.as_str()));
    }
    if let Some(ref from_date) = filter.from_date {
        sql.push_str(" AND date >= ?");
        params_vec.push(Box::new(from_date.clone()));
    }
    if let Some(ref before_date) = filter.before_date {
        sql.push_str(" AND date < ?");
        params_vec.push(Box::new(before_date.clone()));
    }

    sql.push_str(" ORDER BY date DESC, id DESC");

    if let Some(limit) = filter.limit {
        sql.push_str(" LIMIT ?");
        params_vec.push(Box::new(limit));
    }

    let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();
    let mut stmt = conn.prepare(&sql)?;
    let transactions = stmt
        .query_map(params_refs.as_slice(), row_to_transaction)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    debug!(count = transactions.len(), "Listed transactions");
    Ok(transactions)
}

/// Sum of expense amounts over a half-open `[from, before)` date window.
pub fn sum_expense_cents(
    conn: &Connection,
    from_date: &str,
    before_date: &str,
) -> rusqlite::Result<i64> {
    conn.query_row(
        "SELECT COALESCE(SUM(amount_cents), 0) FROM transactions
         WHERE kind = 'expense' AND date >= ? AND date < ?",
        params![from_date, before_date],
        |row| row.get(0),
    )
}

pub fn get_transaction(conn: &Connection, id: i64) -> rusqlite::Result<Option<Transaction>> {
    trace!(transaction_id = id, "Fetching transaction");
    conn.query_row(
        &format!("SELECT {} FROM transactions WHERE id = ?", COLUMNS),
        [id],
        row_to_transaction,
    )
    .optional()
}

pub fn create_transaction(conn: &Connection, tx: &NewTransaction) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO transactions (date, amount_cents, description, category, kind)
         VALUES (?, ?, ?, ?, ?)",
        params![
            tx.date,
            tx.amount_cents,
            tx.description,
            tx.category,
            tx.kind.as_str(),
        ],
    )?;

    let id = conn.last_insert_rowid();
    debug!(
        transaction_id = id,
        amount_cents = tx.amount_cents,
        kind = tx.kind.as_str(),
        "Created transaction"
    );
    Ok(id)
}

/// Apply field-wise changes; returns false when the id does not exist.
pub fn update_transaction(
    conn: &Connection,
    id: i64,
    changes: &TransactionChanges,
) -> rusqlite::Result<bool> {
    if changes.is_empty() {
        // Nothing to change; report whether the row exists at all.
        return Ok(get_transaction(conn, id)?.is_some());
    }

    let mut sets: Vec<&str> = Vec::new();
    let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

    if let Some(ref date) = changes.date {
        sets.push("date = ?");
        params_vec.push(Box::new(date.clone()));
    }
    if let Some(amount_cents) = changes.amount_cents {
        sets.push("amount_cents = ?");
        params_vec.push(Box::new(amount_cents));
    }
    if let Some(ref description) = changes.description {
        sets.push("description = ?");
        params_vec.push(Box::new(description.clone()));
    }
    if let Some(ref category) = changes.category {
        sets.push("category = ?");
        params_vec.push(Box::new(category.clone()));
    }
    if let Some(kind) = changes.kind {
        sets.push("kind = ?");
        params_vec.push(Box::new(kind.as_str()));
    }

    sets.push("updated_at = datetime('now')");
    let sql = format!(
        "UPDATE transactions SET {} WHERE id = ?",
        sets.join(", ")
    );
    params_vec.push(Box::new(id));

    let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();
    let rows = conn.execute(&sql, params_refs.as_slice())?;

    if rows > 0 {
        debug!(transaction_id = id, "Updated transaction");
    }
    Ok(rows > 0)
}

pub fn delete_transaction(conn: &Connection, id: i64) -> rusqlite::Result<bool> {
    let rows = conn.execute("DELETE FROM transactions WHERE id = ?", [id])?;
    if rows > 0 {
        debug!(transaction_id = id, "Deleted transaction");
    }
    Ok(rows > 0)
}
