//! DRE report generation.

use std::collections::HashMap;

use rust_decimal::Decimal;

use fluxo_shared::types::money::round_cents;
use fluxo_shared::types::CategoryId;

use super::classifier::{CategoryClassifier, ExpenseBucket};
use super::types::{DreReport, MethodBreakdown};
use crate::ledger::types::{Category, TransactionRecord};

/// Category name exempt from revenue deductions.
const SERVICES_CATEGORY: &str = "services";

/// Fallback category name when no resolution succeeds.
const UNCATEGORIZED: &str = "Uncategorized";

/// Breakdown key for rows without a payment method.
const UNSPECIFIED_METHOD: &str = "unspecified";

/// Deduction rate applied to non-services revenue: 8%.
fn deduction_rate() -> Decimal {
    Decimal::new(8, 2)
}

/// Cap on total deductions, as a share of gross revenue: 15%.
fn deduction_cap_rate() -> Decimal {
    Decimal::new(15, 2)
}

/// Tax rate on a positive operating result: 27%.
fn tax_rate() -> Decimal {
    Decimal::new(27, 2)
}

/// Service for generating financial reports.
pub struct ReportService;

impl ReportService {
    /// Generates the DRE rollup from pre-fetched transactions and
    /// categories.
    ///
    /// Pure function of its inputs: no store access, no mutation. Only
    /// `sale` and `purchase` rows enter the rollup. Missing or unresolvable
    /// categories fall back to `"Uncategorized"` and are counted as
    /// diagnostic metadata; the report always renders.
    #[must_use]
    pub fn generate_dre(
        transactions: &[TransactionRecord],
        categories: &[Category],
        classifier: &impl CategoryClassifier,
    ) -> DreReport {
        let category_names: HashMap<CategoryId, &str> = categories
            .iter()
            .map(|category| (category.id, category.name.as_str()))
            .collect();

        let mut report = DreReport::default();
        let mut accrued_deductions = Decimal::ZERO;

        for record in transactions {
            if record.kind.is_income() {
                let category = Self::resolve_category(record, &category_names, &mut report);
                let contribution = round_cents(record.total_charged());

                report.gross_revenue = round_cents(report.gross_revenue + contribution);
                let bucket = report
                    .revenue_by_category
                    .entry(category.clone())
                    .or_default();
                *bucket = round_cents(*bucket + contribution);

                if !category.eq_ignore_ascii_case(SERVICES_CATEGORY) {
                    accrued_deductions = round_cents(
                        accrued_deductions + round_cents(record.amount * deduction_rate()),
                    );
                }

                let slot = Self::method_slot(&mut report, record);
                slot.income = round_cents(slot.income + contribution);
                slot.count += 1;
            } else if record.kind.is_expense() {
                let category = Self::resolve_category(record, &category_names, &mut report);
                let amount = round_cents(record.amount);

                match classifier.classify(&category) {
                    ExpenseBucket::DirectCost => {
                        report.direct_costs = round_cents(report.direct_costs + amount);
                    }
                    ExpenseBucket::Selling => {
                        report.selling_expenses = round_cents(report.selling_expenses + amount);
                    }
                    ExpenseBucket::Administrative => {
                        report.admin_expenses = round_cents(report.admin_expenses + amount);
                    }
                    ExpenseBucket::Other => {
                        report.other_operating_expenses =
                            round_cents(report.other_operating_expenses + amount);
                    }
                }

                let slot = Self::method_slot(&mut report, record);
                slot.expense = round_cents(slot.expense + amount);
                slot.count += 1;
            }
        }

        let cap = round_cents(report.gross_revenue * deduction_cap_rate());
        report.deductions = accrued_deductions.min(cap);
        report.net_revenue = report.gross_revenue - report.deductions;
        report.gross_profit = report.net_revenue - report.direct_costs;
        report.gross_margin = Self::margin(report.gross_profit, report.net_revenue);

        let operating_expenses = report.selling_expenses
            + report.admin_expenses
            + report.other_operating_expenses;
        report.operating_result = report.gross_profit - operating_expenses;
        report.operating_margin = Self::margin(report.operating_result, report.net_revenue);

        report.taxes = if report.operating_result > Decimal::ZERO {
            round_cents(report.operating_result * tax_rate())
        } else {
            Decimal::ZERO
        };
        report.net_result = report.operating_result - report.taxes;
        report.net_margin = Self::margin(report.net_result, report.net_revenue);

        report
    }

    /// Resolves a row's category name: reference, then raw label, then the
    /// fallback bucket.
    fn resolve_category(
        record: &TransactionRecord,
        category_names: &HashMap<CategoryId, &str>,
        report: &mut DreReport,
    ) -> String {
        if let Some(name) = record
            .category_id
            .and_then(|id| category_names.get(&id))
        {
            return (*name).to_string();
        }
        if let Some(raw) = record
            .category
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
        {
            return raw.to_string();
        }
        report.uncategorized_count += 1;
        UNCATEGORIZED.to_string()
    }

    fn method_slot<'r>(
        report: &'r mut DreReport,
        record: &TransactionRecord,
    ) -> &'r mut MethodBreakdown {
        let method = record
            .payment_method
            .clone()
            .unwrap_or_else(|| UNSPECIFIED_METHOD.to_string());
        report.by_payment_method.entry(method).or_default()
    }

    /// Percentage of `part` over `base`, zero when the base is not positive.
    fn margin(part: Decimal, base: Decimal) -> Decimal {
        if base <= Decimal::ZERO {
            Decimal::ZERO
        } else {
            round_cents(part / base * Decimal::ONE_HUNDRED)
        }
    }
}
