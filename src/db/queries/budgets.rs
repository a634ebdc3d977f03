use crate::models::{Budget, NewBudget};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;

fn row_to_budget(row: &Row) -> rusqlite::Result<Budget> {
    Ok(Budget {
        id: row.get(0)?,
        category: row.get(1)?,
        amount_cents: row.get(2)?,
        month: row.get(3)?,
        year: row.get(4)?,
    })
}

/// List budgets, optionally scoped to one (month, year).
pub fn list_budgets(
    conn: &Connection,
    target: Option<(u32, i32)>,
) -> rusqlite::Result<Vec<Budget>> {
    let mut sql =
        String::from("SELECT id, category, amount_cents, month, year FROM budgets WHERE 1=1");
    let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

    if let Some((month, year)) = target {
        sql.push_str(" AND month = ? AND year = ?");
        params_vec.push(Box::new(month));
        params_vec.push(Box::new(year));
    }

    sql.push_str(" ORDER BY year, month, category");

    let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();
    let mut stmt = conn.prepare(&sql)?;
    let budgets = stmt
        .query_map(params_refs.as_slice(), row_to_budget)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    debug!(count = budgets.len(), "Listed budgets");
    Ok(budgets)
}

pub fn get_budget(conn: &Connection, id: i64) -> rusqlite::Result<Option<Budget>> {
    conn.query_row(
        "SELECT id, category, amount_cents, month, year FROM budgets WHERE id = ?",
        [id],
        row_to_budget,
    )
    .optional()
}

/// One budget per (category, month, year); the schema backs this with a
/// unique index, this check exists to produce a friendly error first.
pub fn budget_exists(
    conn: &Connection,
    category: &str,
    month: u32,
    year: i32,
) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM budgets WHERE category = ? AND month = ? AND year = ?)",
        params![category, month, year],
        |row| row.get(0),
    )
}

pub fn create_budget(conn: &Connection, budget: &NewBudget) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO budgets (category, amount_cents, month, year) VALUES (?, ?, ?, ?)",
        params![
            budget.category,
            budget.amount_cents,
            budget.month,
            budget.year,
        ],
    )?;

    let id = conn.last_insert_rowid();
    debug!(
        budget_id = id,
        category = %budget.category,
        month = budget.month,
        year = budget.year,
        "Created budget"
    );
    Ok(id)
}
