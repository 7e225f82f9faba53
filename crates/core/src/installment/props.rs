//! Property-based tests for installment grouping.
//!
//! - Grouping is a partition of its input
//! - Group totals preserve the input sum
//! - Grouping is idempotent

use chrono::{NaiveDate, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;

use fluxo_shared::types::{TenantId, TransactionId};

use super::grouper::group_transactions;
use crate::ledger::types::{PaymentStatus, TransactionKind, TransactionRecord};

/// Strategy for positive cent amounts (0.01 to 10,000.00).
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for group keys: an explicit key, or none.
fn group_key_strategy() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        (0u8..5u8).prop_map(|n| Some(format!("G{n}"))),
    ]
}

/// Strategy for descriptions, including marker-suffixed and marker-only ones.
fn description_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Venda registrada".to_string()),
        Just("Venda registrada (2/4)".to_string()),
        Just("Compra de mercadoria (1/3)".to_string()),
        Just("Assinatura mensal".to_string()),
        Just("(1/2)".to_string()),
    ]
}

fn status_strategy() -> impl Strategy<Value = PaymentStatus> {
    prop_oneof![
        Just(PaymentStatus::Pending),
        Just(PaymentStatus::Partial),
        Just(PaymentStatus::Paid),
    ]
}

prop_compose! {
    fn record_strategy()(
        amount in amount_strategy(),
        group in group_key_strategy(),
        description in description_strategy(),
        status in status_strategy(),
        index in proptest::option::of(1u32..6u32),
        due_day in proptest::option::of(1u32..28u32),
    ) -> TransactionRecord {
        let created = Utc::now();
        TransactionRecord {
            id: TransactionId::new(),
            tenant_id: TenantId::from_uuid(uuid::Uuid::nil()),
            customer_id: None,
            supplier_id: None,
            kind: TransactionKind::Sale,
            amount,
            interest: Decimal::ZERO,
            paid_amount: None,
            description,
            category: None,
            category_id: None,
            due_date: due_day.and_then(|day| NaiveDate::from_ymd_opt(2026, 3, day)),
            payment_date: None,
            payment_method: None,
            status,
            installment_group: group,
            installment_index: index,
            installment_count: index.map(|_| 6),
            reconciled: false,
            card_fee: None,
            original_amount: None,
            created_at: created,
            updated_at: created,
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Every transaction lands in exactly one group, and the group totals
    /// preserve the input sum.
    #[test]
    fn prop_grouping_is_a_partition(
        records in proptest::collection::vec(record_strategy(), 0..40),
    ) {
        let input_ids: Vec<TransactionId> = records.iter().map(|record| record.id).collect();
        let input_sum: Decimal = records.iter().map(|record| record.amount).sum();

        let grouping = group_transactions(records);

        let mut grouped_ids: Vec<TransactionId> = grouping
            .groups
            .iter()
            .flat_map(|group| group.members.iter().map(|member| member.transaction.id))
            .collect();
        prop_assert_eq!(grouped_ids.len(), input_ids.len());
        grouped_ids.sort();
        let mut expected = input_ids;
        expected.sort();
        prop_assert_eq!(grouped_ids, expected);

        let grouped_sum: Decimal = grouping.groups.iter().map(|group| group.total).sum();
        prop_assert_eq!(grouped_sum, input_sum);
    }

    /// Grouping the same input twice yields identical keys and ordering.
    #[test]
    fn prop_grouping_is_idempotent(
        records in proptest::collection::vec(record_strategy(), 0..40),
    ) {
        let first = group_transactions(records.clone());
        let second = group_transactions(records);

        let keys_first: Vec<&str> =
            first.groups.iter().map(|group| group.key.as_str()).collect();
        let keys_second: Vec<&str> =
            second.groups.iter().map(|group| group.key.as_str()).collect();
        prop_assert_eq!(keys_first, keys_second);

        for (left, right) in first.groups.iter().zip(&second.groups) {
            let left_ids: Vec<TransactionId> =
                left.members.iter().map(|member| member.transaction.id).collect();
            let right_ids: Vec<TransactionId> =
                right.members.iter().map(|member| member.transaction.id).collect();
            prop_assert_eq!(left_ids, right_ids);
        }
    }

    /// A group is fully paid iff every member is paid.
    #[test]
    fn prop_is_paid_means_all_members_paid(
        records in proptest::collection::vec(record_strategy(), 1..40),
    ) {
        let grouping = group_transactions(records);
        for group in &grouping.groups {
            let all_paid = group
                .members
                .iter()
                .all(|member| member.transaction.status.is_paid());
            prop_assert_eq!(group.is_paid, all_paid);
        }
    }
}
