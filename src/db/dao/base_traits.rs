pub trait HasIdColumn: sea_orm::EntityTrait {
    fn id_column() -> Self::Column;
}

impl HasIdColumn for crate::db::entities::category::Entity {
    fn id_column() -> Self::Column {
        crate::db::entities::category::Column::Id
    }
}

impl HasIdColumn for crate::db::entities::task::Entity {
    fn id_column() -> Self::Column {
        crate::db::entities::task::Column::Id
    }
}
