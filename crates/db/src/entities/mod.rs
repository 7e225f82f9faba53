//! `SeaORM` entity definitions.

pub mod bank_statement_items;
pub mod categories;
pub mod sea_orm_active_enums;
pub mod transactions;
