//! Grouping of flat transaction rows into installment groups.

use std::collections::HashMap;

use chrono::{Datelike, Months, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

use fluxo_shared::types::money::round_cents;

use super::types::{DateFallback, GroupMember, Grouping, GroupingAnomaly, InstallmentGroup};
use crate::ledger::types::TransactionRecord;

/// Trailing installment marker: `(digits/digits)` with optional whitespace.
static INSTALLMENT_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\(\d+/\d+\)\s*$").expect("installment marker pattern is valid"));

/// Strips one trailing `(n/total)` marker from a description.
#[must_use]
pub fn strip_installment_marker(description: &str) -> String {
    INSTALLMENT_MARKER
        .replace(description, "")
        .trim()
        .to_string()
}

/// Groups one tenant's transactions into installment groups.
///
/// Grouping is a partition: every row lands in exactly one group. Group
/// iteration order is the first-appearance order of keys in the input, so
/// grouping the same input twice yields identical output. Rows that resolve
/// to no usable key are kept as singleton groups under a synthetic key.
#[must_use]
pub fn group_transactions(transactions: Vec<TransactionRecord>) -> Grouping {
    let mut order: Vec<String> = Vec::new();
    let mut buckets: HashMap<String, Vec<TransactionRecord>> = HashMap::new();
    let mut anomalies: Vec<GroupingAnomaly> = Vec::new();

    for record in transactions {
        if record.due_date.is_none() {
            let fallback = if record.payment_date.is_some() {
                DateFallback::PaymentDate
            } else {
                DateFallback::CreatedAt
            };
            anomalies.push(GroupingAnomaly::MissingDueDate {
                transaction_id: record.id,
                fallback,
            });
        }

        let key = resolve_group_key(&record, &mut anomalies);
        if !buckets.contains_key(&key) {
            order.push(key.clone());
        }
        buckets.entry(key).or_default().push(record);
    }

    let groups = order
        .into_iter()
        .filter_map(|key| buckets.remove(&key).map(|members| build_group(key, members)))
        .collect();

    Grouping { groups, anomalies }
}

fn resolve_group_key(
    record: &TransactionRecord,
    anomalies: &mut Vec<GroupingAnomaly>,
) -> String {
    if let Some(key) = &record.installment_group {
        return key.clone();
    }

    let stripped = strip_installment_marker(&record.description);
    if stripped.is_empty() {
        anomalies.push(GroupingAnomaly::SyntheticKey {
            transaction_id: record.id,
        });
        return format!("tx:{}", record.id);
    }
    stripped
}

fn build_group(key: String, mut members: Vec<TransactionRecord>) -> InstallmentGroup {
    members.sort_by(|a, b| {
        let left = (
            a.installment_index.unwrap_or(u32::MAX),
            a.effective_date(),
            a.id,
        );
        let right = (
            b.installment_index.unwrap_or(u32::MAX),
            b.effective_date(),
            b.id,
        );
        left.cmp(&right)
    });

    let mut total = Decimal::ZERO;
    let mut interest = Decimal::ZERO;
    for member in &members {
        total = round_cents(total + member.amount);
        interest = round_cents(interest + member.interest);
    }

    let is_paid = members.iter().all(|member| member.status.is_paid());

    let description = members
        .iter()
        .map(|member| strip_installment_marker(&member.description))
        .find(|stripped| !stripped.is_empty())
        .unwrap_or_else(|| key.clone());

    let display_dates = display_due_dates(&members);
    let members = members
        .into_iter()
        .zip(display_dates)
        .map(|(transaction, display_due_date)| GroupMember {
            transaction,
            display_due_date,
        })
        .collect();

    InstallmentGroup {
        key,
        description,
        members,
        total,
        interest,
        is_paid,
    }
}

/// Presentation due dates.
///
/// When every member falls within the earliest member's calendar month, the
/// indexed installments display as `earliest + (index - 1) months`. Stored
/// dates are untouched.
fn display_due_dates(members: &[TransactionRecord]) -> Vec<NaiveDate> {
    let Some(earliest) = members.iter().map(TransactionRecord::effective_date).min() else {
        return Vec::new();
    };

    let same_month = members.iter().all(|member| {
        let date = member.effective_date();
        date.year() == earliest.year() && date.month() == earliest.month()
    });

    members
        .iter()
        .map(|member| {
            if same_month {
                if let Some(index) = member.installment_index.filter(|index| *index >= 1) {
                    return earliest
                        .checked_add_months(Months::new(index - 1))
                        .unwrap_or_else(|| member.effective_date());
                }
            }
            member.effective_date()
        })
        .collect()
}
