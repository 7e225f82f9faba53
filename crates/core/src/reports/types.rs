//! DRE report types.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

/// Per-payment-method drill-down totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MethodBreakdown {
    /// Income recorded under this method (amount plus interest).
    pub income: Decimal,
    /// Expenses recorded under this method.
    pub expense: Decimal,
    /// Number of transactions under this method.
    pub count: u64,
}

/// DRE (income statement) rollup for one tenant and period.
///
/// All monetary fields are cent-rounded; margin fields are percentages with
/// two fraction digits. An empty transaction set yields the all-zero report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DreReport {
    /// Revenue by resolved category name.
    pub revenue_by_category: BTreeMap<String, Decimal>,
    /// Total gross revenue (amount plus interest over income rows).
    pub gross_revenue: Decimal,
    /// Revenue deductions, capped at 15% of gross revenue.
    pub deductions: Decimal,
    /// Gross revenue minus deductions.
    pub net_revenue: Decimal,
    /// Expenses bucketed as direct costs.
    pub direct_costs: Decimal,
    /// Net revenue minus direct costs.
    pub gross_profit: Decimal,
    /// Gross profit over net revenue, as a percentage.
    pub gross_margin: Decimal,
    /// Selling expenses.
    pub selling_expenses: Decimal,
    /// Administrative expenses.
    pub admin_expenses: Decimal,
    /// Operating expenses matching no other bucket.
    pub other_operating_expenses: Decimal,
    /// Gross profit minus operating expenses.
    pub operating_result: Decimal,
    /// Operating result over net revenue, as a percentage.
    pub operating_margin: Decimal,
    /// Taxes on a positive operating result.
    pub taxes: Decimal,
    /// Operating result minus taxes.
    pub net_result: Decimal,
    /// Net result over net revenue, as a percentage.
    pub net_margin: Decimal,
    /// Per-payment-method drill-down.
    pub by_payment_method: BTreeMap<String, MethodBreakdown>,
    /// Rows whose category resolved to the fallback bucket. Diagnostic
    /// metadata - the report still renders.
    pub uncategorized_count: u64,
}
