use sea_orm::entity::prelude::*;

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tasks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub description: String,
    pub priority: String,
    pub status: String,
    #[sea_orm(indexed)]
    pub category_id: Option<i32>,
    pub due_date: Option<DateTimeWithTimeZone>,
    // No ON DELETE action: the store rejects deleting a referenced category.
    #[sea_orm(belongs_to, from = "category_id", to = "id")]
    pub category: HasOne<super::category::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
