//! DRE report tests.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use fluxo_shared::types::{CategoryId, TenantId, TransactionId};

use super::classifier::KeywordClassifier;
use super::service::ReportService;
use super::types::DreReport;
use crate::ledger::types::{
    Category, CategoryKind, PaymentStatus, TransactionKind, TransactionRecord,
};

fn record(kind: TransactionKind, amount: Decimal, category: Option<&str>) -> TransactionRecord {
    let created = "2026-04-01T12:00:00Z".parse::<DateTime<Utc>>().unwrap();
    TransactionRecord {
        id: TransactionId::new(),
        tenant_id: TenantId::from_uuid(uuid::Uuid::nil()),
        customer_id: None,
        supplier_id: None,
        kind,
        amount,
        interest: Decimal::ZERO,
        paid_amount: None,
        description: "row".to_string(),
        category: category.map(ToString::to_string),
        category_id: None,
        due_date: None,
        payment_date: None,
        payment_method: None,
        status: PaymentStatus::Pending,
        installment_group: None,
        installment_index: None,
        installment_count: None,
        reconciled: false,
        card_fee: None,
        original_amount: None,
        created_at: created,
        updated_at: created,
    }
}

fn generate(transactions: &[TransactionRecord]) -> DreReport {
    ReportService::generate_dre(transactions, &[], &KeywordClassifier::new())
}

#[test]
fn test_empty_input_yields_all_zero_report() {
    let report = generate(&[]);
    assert_eq!(report, DreReport::default());
    assert!(report.revenue_by_category.is_empty());
    assert!(report.by_payment_method.is_empty());
    assert_eq!(report.gross_revenue, Decimal::ZERO);
    assert_eq!(report.net_result, Decimal::ZERO);
}

#[test]
fn test_services_sale_with_material_cost() {
    let rows = vec![
        record(TransactionKind::Sale, dec!(100.00), Some("Services")),
        record(
            TransactionKind::Purchase,
            dec!(50.00),
            Some("Raw Material Cost"),
        ),
    ];
    let report = generate(&rows);

    assert_eq!(report.gross_revenue, dec!(100.00));
    // "Services" is deduction-exempt.
    assert_eq!(report.deductions, dec!(0.00));
    assert_eq!(report.net_revenue, dec!(100.00));
    assert_eq!(report.direct_costs, dec!(50.00));
    assert_eq!(report.gross_profit, dec!(50.00));
    assert_eq!(report.gross_margin, dec!(50.00));
    assert_eq!(report.operating_result, dec!(50.00));
    assert_eq!(report.taxes, dec!(13.50));
    assert_eq!(report.net_result, dec!(36.50));
}

#[test]
fn test_non_services_revenue_accrues_deduction() {
    let rows = vec![record(
        TransactionKind::Sale,
        dec!(200.00),
        Some("Consultoria"),
    )];
    let report = generate(&rows);

    assert_eq!(report.gross_revenue, dec!(200.00));
    assert_eq!(report.deductions, dec!(16.00));
    assert_eq!(report.net_revenue, dec!(184.00));
}

#[test]
fn test_services_exemption_is_case_insensitive() {
    let rows = vec![
        record(TransactionKind::Sale, dec!(100.00), Some("SERVICES")),
        record(TransactionKind::Sale, dec!(100.00), Some("services")),
    ];
    let report = generate(&rows);
    assert_eq!(report.deductions, dec!(0.00));
}

#[test]
fn test_deductions_never_exceed_cap() {
    let rows: Vec<TransactionRecord> = (0..10)
        .map(|_| record(TransactionKind::Sale, dec!(150.00), Some("Consultoria")))
        .collect();
    let report = generate(&rows);

    let cap = report.gross_revenue * dec!(0.15);
    assert!(report.deductions <= cap);
    assert_eq!(report.deductions, dec!(120.00));
}

#[test]
fn test_interest_enters_revenue_but_not_deductions() {
    let mut sale = record(TransactionKind::Sale, dec!(100.00), Some("Consultoria"));
    sale.interest = dec!(10.00);
    let report = generate(&[sale]);

    assert_eq!(report.gross_revenue, dec!(110.00));
    // Deduction is 8% of the amount, not of amount plus interest.
    assert_eq!(report.deductions, dec!(8.00));
}

#[test]
fn test_expense_bucketing_order() {
    let rows = vec![
        record(TransactionKind::Sale, dec!(1000.00), Some("Services")),
        record(
            TransactionKind::Purchase,
            dec!(300.00),
            Some("Compra de Mercadoria"),
        ),
        record(
            TransactionKind::Purchase,
            dec!(100.00),
            Some("Comissao de Vendas"),
        ),
        record(
            TransactionKind::Purchase,
            dec!(80.00),
            Some("Aluguel do Escritorio"),
        ),
        record(
            TransactionKind::Purchase,
            dec!(40.00),
            Some("Despesas Diversas"),
        ),
        // Matches cost and selling keywords; cost is evaluated first.
        record(
            TransactionKind::Purchase,
            dec!(60.00),
            Some("Custo de Venda"),
        ),
    ];
    let report = generate(&rows);

    assert_eq!(report.direct_costs, dec!(360.00));
    assert_eq!(report.selling_expenses, dec!(100.00));
    assert_eq!(report.admin_expenses, dec!(80.00));
    assert_eq!(report.other_operating_expenses, dec!(40.00));
    assert_eq!(report.gross_profit, dec!(640.00));
    assert_eq!(report.operating_result, dec!(420.00));
}

#[test]
fn test_negative_operating_result_pays_no_tax() {
    let rows = vec![
        record(TransactionKind::Sale, dec!(100.00), Some("Services")),
        record(
            TransactionKind::Purchase,
            dec!(300.00),
            Some("Despesas Diversas"),
        ),
    ];
    let report = generate(&rows);

    assert_eq!(report.operating_result, dec!(-200.00));
    assert_eq!(report.taxes, dec!(0.00));
    assert_eq!(report.net_result, dec!(-200.00));
    // Margins stay defined against the positive net revenue.
    assert_eq!(report.operating_margin, dec!(-200.00));
}

#[test]
fn test_margins_zero_when_net_revenue_not_positive() {
    let rows = vec![record(
        TransactionKind::Purchase,
        dec!(50.00),
        Some("Despesas Diversas"),
    )];
    let report = generate(&rows);

    assert_eq!(report.net_revenue, dec!(0.00));
    assert_eq!(report.gross_margin, dec!(0.00));
    assert_eq!(report.operating_margin, dec!(0.00));
    assert_eq!(report.net_margin, dec!(0.00));
}

#[test]
fn test_only_sales_and_purchases_enter_the_rollup() {
    let rows = vec![
        record(TransactionKind::Sale, dec!(100.00), Some("Services")),
        record(TransactionKind::Refund, dec!(30.00), Some("Services")),
        record(TransactionKind::Adjustment, dec!(20.00), None),
        record(TransactionKind::Payment, dec!(10.00), None),
    ];
    let report = generate(&rows);

    assert_eq!(report.gross_revenue, dec!(100.00));
    assert_eq!(report.direct_costs, dec!(0.00));
    assert_eq!(report.by_payment_method.len(), 1);
}

#[test]
fn test_category_reference_resolution_with_fallbacks() {
    let tenant = TenantId::from_uuid(uuid::Uuid::nil());
    let category = Category {
        id: CategoryId::new(),
        tenant_id: tenant,
        name: "Vendas Online".to_string(),
        kind: CategoryKind::Income,
    };

    let mut by_reference = record(TransactionKind::Sale, dec!(100.00), Some("stale label"));
    by_reference.category_id = Some(category.id);
    let by_raw_label = record(TransactionKind::Sale, dec!(50.00), Some("Balcao"));
    let mut dangling = record(TransactionKind::Sale, dec!(25.00), None);
    dangling.category_id = Some(CategoryId::new());

    let report = ReportService::generate_dre(
        &[by_reference, by_raw_label, dangling],
        std::slice::from_ref(&category),
        &KeywordClassifier::new(),
    );

    assert_eq!(
        report.revenue_by_category.get("Vendas Online"),
        Some(&dec!(100.00))
    );
    assert_eq!(report.revenue_by_category.get("Balcao"), Some(&dec!(50.00)));
    assert_eq!(
        report.revenue_by_category.get("Uncategorized"),
        Some(&dec!(25.00))
    );
    assert_eq!(report.uncategorized_count, 1);
}

#[test]
fn test_payment_method_breakdown() {
    let mut pix_sale = record(TransactionKind::Sale, dec!(100.00), Some("Services"));
    pix_sale.payment_method = Some("pix".to_string());
    pix_sale.interest = dec!(2.00);
    let mut pix_purchase = record(
        TransactionKind::Purchase,
        dec!(30.00),
        Some("Despesas Diversas"),
    );
    pix_purchase.payment_method = Some("pix".to_string());
    let unlabeled = record(TransactionKind::Sale, dec!(10.00), Some("Services"));

    let report = generate(&[pix_sale, pix_purchase, unlabeled]);

    let pix = report.by_payment_method.get("pix").unwrap();
    assert_eq!(pix.income, dec!(102.00));
    assert_eq!(pix.expense, dec!(30.00));
    assert_eq!(pix.count, 2);

    let unspecified = report.by_payment_method.get("unspecified").unwrap();
    assert_eq!(unspecified.income, dec!(10.00));
    assert_eq!(unspecified.count, 1);
}
