//! Grouped aggregation over transactions
//!
//! Transactions without a category never form a group.

use std::collections::{BTreeMap, BTreeSet};

use crate::models::{CategoryId, Transaction};

/// Sum of `amount_spent` per category, ascending by category
pub fn spent_by_category<'a, I>(transactions: I) -> BTreeMap<CategoryId, f64>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut totals = BTreeMap::new();

    for tx in transactions {
        if let Some(category) = &tx.category_id {
            *totals.entry(category.clone()).or_insert(0.0) += tx.amount_spent;
        }
    }

    totals
}

/// Per-category sum plus the distinct days of month with activity
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailyActivity {
    pub spent: f64,
    pub days: BTreeSet<u32>,
}

pub fn activity_by_category<'a, I>(transactions: I) -> BTreeMap<CategoryId, DailyActivity>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut groups: BTreeMap<CategoryId, DailyActivity> = BTreeMap::new();

    for tx in transactions {
        if let Some(category) = &tx.category_id {
            let entry = groups.entry(category.clone()).or_default();
            entry.spent += tx.amount_spent;
            entry.days.insert(tx.day);
        }
    }

    groups
}
