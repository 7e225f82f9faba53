//! `SeaORM` Entity for the transactions table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{PaymentStatus, TransactionKind};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub customer_id: Option<Uuid>,
    pub supplier_id: Option<Uuid>,
    pub kind: TransactionKind,
    #[sea_orm(column_type = "Decimal(Some((14, 2)))")]
    pub amount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((14, 2)))")]
    pub interest: Decimal,
    #[sea_orm(column_type = "Decimal(Some((14, 2)))", nullable)]
    pub paid_amount: Option<Decimal>,
    pub description: String,
    pub category: Option<String>,
    pub category_id: Option<Uuid>,
    pub due_date: Option<Date>,
    pub payment_date: Option<Date>,
    pub payment_method: Option<String>,
    pub status: PaymentStatus,
    pub installment_group: Option<String>,
    pub installment_index: Option<i32>,
    pub installment_count: Option<i32>,
    pub reconciled: bool,
    #[sea_orm(column_type = "Decimal(Some((14, 2)))", nullable)]
    pub card_fee: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((14, 2)))", nullable)]
    pub original_amount: Option<Decimal>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id"
    )]
    Categories,
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categories.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
