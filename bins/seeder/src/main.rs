//! Database seeder for Fluxo development and testing.
//!
//! Seeds a demo tenant with categories, an installment sale, a purchase,
//! and pending bank statement items for local development.
//!
//! Usage: cargo run --bin seeder

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use fluxo_core::ledger::types::{EntryInput, TransactionKind};
use fluxo_core::ledger::LedgerService;
use fluxo_db::entities::{
    bank_statement_items, categories,
    sea_orm_active_enums::{BankItemStatus, CategoryKind},
};
use fluxo_db::SeaOrmLedgerStore;
use fluxo_shared::types::money::parse_amount;
use fluxo_shared::types::TenantId;
use fluxo_shared::AppConfig;

/// Demo tenant ID (consistent for all seeds)
const DEMO_TENANT_ID: &str = "00000000-0000-0000-0000-000000000001";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().expect("Failed to load configuration");

    println!("Connecting to database...");
    let db = fluxo_db::connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding categories...");
    seed_categories(&db).await;

    println!("Seeding ledger entries...");
    seed_ledger_entries(&db).await;

    println!("Seeding bank statement items...");
    seed_bank_items(&db).await;

    println!("Seeding complete!");
}

fn demo_tenant() -> TenantId {
    TenantId::from_uuid(Uuid::parse_str(DEMO_TENANT_ID).unwrap())
}

/// Seeds income/expense categories for the demo tenant.
async fn seed_categories(db: &DatabaseConnection) {
    let existing = categories::Entity::find()
        .filter(categories::Column::TenantId.eq(demo_tenant().into_inner()))
        .all(db)
        .await
        .expect("Failed to query categories");
    if !existing.is_empty() {
        println!("  Categories already exist, skipping...");
        return;
    }

    let seeds = [
        ("Services", CategoryKind::Income),
        ("Vendas Online", CategoryKind::Income),
        ("Custo de Mercadoria", CategoryKind::Expense),
        ("Comissao de Vendas", CategoryKind::Expense),
        ("Aluguel", CategoryKind::Expense),
        ("Despesas Diversas", CategoryKind::Expense),
    ];

    for (name, kind) in seeds {
        let category = categories::ActiveModel {
            id: Set(Uuid::new_v4()),
            tenant_id: Set(demo_tenant().into_inner()),
            name: Set(name.to_string()),
            kind: Set(kind),
        };
        if let Err(e) = category.insert(db).await {
            eprintln!("Failed to insert category {name}: {e}");
        } else {
            println!("  Created category: {name}");
        }
    }
}

/// Seeds an installment sale and a single purchase through the entry API.
async fn seed_ledger_entries(db: &DatabaseConnection) {
    let store = Arc::new(SeaOrmLedgerStore::new(db.clone()));
    let ledger = LedgerService::new(store);

    let sale = EntryInput {
        kind: TransactionKind::Sale,
        amount: parse_amount("1200.00").unwrap(),
        description: "Venda registrada".to_string(),
        due_date: NaiveDate::from_ymd_opt(2026, 9, 10),
        installments: 4,
        group_key: None,
        customer_id: None,
        supplier_id: None,
        category: Some("Services".to_string()),
        category_id: None,
        payment_method: Some("boleto".to_string()),
    };
    match ledger.create_entry(demo_tenant(), sale).await {
        Ok(rows) => println!("  Created installment sale ({} rows)", rows.len()),
        Err(e) => eprintln!("Failed to seed installment sale: {e}"),
    }

    let purchase = EntryInput {
        kind: TransactionKind::Purchase,
        amount: parse_amount("450.00").unwrap(),
        description: "Compra de mercadoria".to_string(),
        due_date: NaiveDate::from_ymd_opt(2026, 8, 20),
        installments: 1,
        group_key: None,
        customer_id: None,
        supplier_id: None,
        category: Some("Custo de Mercadoria".to_string()),
        category_id: None,
        payment_method: Some("pix".to_string()),
    };
    match ledger.create_entry(demo_tenant(), purchase).await {
        Ok(_) => println!("  Created purchase"),
        Err(e) => eprintln!("Failed to seed purchase: {e}"),
    }
}

/// Seeds pending bank statement items, standing in for the external import.
async fn seed_bank_items(db: &DatabaseConnection) {
    let items = [
        ("TED recebida - cliente", "300.00", (2026, 9, 11)),
        ("PIX enviado - fornecedor", "-450.00", (2026, 8, 20)),
    ];

    for (description, amount, (year, month, day)) in items {
        let item = bank_statement_items::ActiveModel {
            id: Set(Uuid::new_v4()),
            tenant_id: Set(demo_tenant().into_inner()),
            date: Set(NaiveDate::from_ymd_opt(year, month, day).unwrap()),
            amount: Set(parse_amount(amount).unwrap()),
            description: Set(description.to_string()),
            status: Set(BankItemStatus::Pending),
            transaction_id: Set(None),
            created_at: Set(Utc::now().into()),
            updated_at: Set(Utc::now().into()),
        };
        if let Err(e) = item.insert(db).await {
            eprintln!("Failed to insert bank item: {e}");
        } else {
            println!("  Created bank item: {description}");
        }
    }
}
