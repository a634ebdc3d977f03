//! The dashboard report: six-month spending trend, per-category breakdown,
//! budget-vs-actual comparison, recent activity and summary totals, all
//! computed on demand for one target month. Nothing here is persisted.

use rusqlite::Connection;
use serde::Serialize;
use std::collections::HashMap;

use crate::date_utils::{month_label, month_range, shift_months, to_db_date, TargetMonth};
use crate::db::queries::{budgets, transactions};
use crate::db::queries::transactions::TransactionFilter;
use crate::error::AppResult;
use crate::models::transaction::serde_cents;
use crate::models::{Transaction, TransactionKind};

const TREND_MONTHS: i32 = 6;
const RECENT_LIMIT: i64 = 5;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub monthly_data: Vec<TrendPoint>,
    pub category_data: Vec<CategorySlice>,
    pub budget_comparison: Vec<BudgetActual>,
    pub recent_transactions: Vec<Transaction>,
    pub summary: Summary,
}

/// Expense total for one calendar month of the trend window.
#[derive(Debug, Serialize)]
pub struct TrendPoint {
    /// Human-readable label, e.g. "Aug 2025".
    pub month: String,
    #[serde(rename = "amount", with = "serde_cents")]
    pub amount_cents: i64,
}

#[derive(Debug, Serialize)]
pub struct CategorySlice {
    pub name: String,
    #[serde(rename = "value", with = "serde_cents")]
    pub value_cents: i64,
}

#[derive(Debug, Serialize)]
pub struct BudgetActual {
    pub category: String,
    #[serde(rename = "budget", with = "serde_cents")]
    pub budget_cents: i64,
    #[serde(rename = "actual", with = "serde_cents")]
    pub actual_cents: i64,
    pub percentage: f64,
}

#[derive(Debug, Serialize)]
pub struct Summary {
    #[serde(rename = "totalExpenses", with = "serde_cents")]
    pub total_expenses_cents: i64,
    #[serde(rename = "totalBudget", with = "serde_cents")]
    pub total_budget_cents: i64,
    #[serde(rename = "budgetUtilization")]
    pub budget_utilization: f64,
}

fn ratio_percent(part_cents: i64, whole_cents: i64) -> f64 {
    if whole_cents > 0 {
        part_cents as f64 / whole_cents as f64 * 100.0
    } else {
        0.0
    }
}

/// Build the full analytics report for the target month.
///
/// All reads happen inside a single read transaction, so the report is a
/// consistent point-in-time view even with concurrent writers. Any store
/// failure aborts the whole report; there is no partial result.
pub fn monthly_report(conn: &Connection, target: TargetMonth) -> AppResult<AnalyticsReport> {
    let tx = conn.unchecked_transaction()?;
    let target_first = target.first_day();

    // Six consecutive months ending at the target, oldest first.
    let mut monthly_data = Vec::with_capacity(TREND_MONTHS as usize);
    for offset in (0..TREND_MONTHS).rev() {
        let first = shift_months(target_first, -offset);
        let (from, before) = month_range(first);
        let amount_cents =
            transactions::sum_expense_cents(&tx, &to_db_date(from), &to_db_date(before))?;
        monthly_data.push(TrendPoint {
            month: month_label(first),
            amount_cents,
        });
    }

    // The target-month expense set is fetched once and shared by the
    // category breakdown, the budget actuals and the summary total, so all
    // three agree on the same snapshot of the data.
    let (from, before) = month_range(target_first);
    let expenses = transactions::list_transactions(
        &tx,
        &TransactionFilter {
            kind: Some(TransactionKind::Expense),
            from_date: Some(to_db_date(from)),
            before_date: Some(to_db_date(before)),
            ..Default::default()
        },
    )?;

    let mut by_category: HashMap<String, i64> = HashMap::new();
    for t in &expenses {
        *by_category.entry(t.category.clone()).or_insert(0) += t.amount_cents;
    }

    let mut category_data: Vec<CategorySlice> = by_category
        .iter()
        .map(|(name, &value_cents)| CategorySlice {
            name: name.clone(),
            value_cents,
        })
        .collect();
    category_data.sort_by(|a, b| {
        b.value_cents
            .cmp(&a.value_cents)
            .then_with(|| a.name.cmp(&b.name))
    });

    // Budgets without spending appear with actual = 0; spending without a
    // budget shows up only in the category breakdown.
    let budget_list = budgets::list_budgets(&tx, Some((target.month, target.year)))?;
    let budget_comparison: Vec<BudgetActual> = budget_list
        .iter()
        .map(|b| {
            let actual_cents = by_category.get(&b.category).copied().unwrap_or(0);
            BudgetActual {
                category: b.category.clone(),
                budget_cents: b.amount_cents,
                actual_cents,
                percentage: ratio_percent(actual_cents, b.amount_cents),
            }
        })
        .collect();

    // Store-wide, not restricted to the target month.
    let recent_transactions = transactions::list_transactions(
        &tx,
        &TransactionFilter {
            limit: Some(RECENT_LIMIT),
            ..Default::default()
        },
    )?;

    let total_expenses_cents: i64 = category_data.iter().map(|c| c.value_cents).sum();
    let total_budget_cents: i64 = budget_list.iter().map(|b| b.amount_cents).sum();
    let summary = Summary {
        total_expenses_cents,
        total_budget_cents,
        budget_utilization: ratio_percent(total_expenses_cents, total_budget_cents),
    };

    tx.commit()?;

    Ok(AnalyticsReport {
        monthly_data,
        category_data,
        budget_comparison,
        recent_transactions,
        summary,
    })
}
