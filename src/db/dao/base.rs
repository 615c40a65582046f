use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    QueryFilter, QueryOrder, TransactionTrait,
};

use super::base_traits::HasIdColumn;
use super::error::{DaoLayerError, DaoResult};

/// Read access shared by every DAO. Writes take an explicit connection so
/// callers can run them inside a transaction.
#[async_trait::async_trait]
pub trait DaoBase: Clone + Send + Sync + Sized
where
    <Self::Entity as EntityTrait>::Model: Send + Sync,
{
    type Entity: HasIdColumn + Send + Sync;
    const ENTITY_NAME: &'static str;

    fn new(db: &DatabaseConnection) -> Self;

    fn db(&self) -> &DatabaseConnection;

    async fn begin(&self) -> DaoResult<DatabaseTransaction> {
        Ok(self.db().begin().await?)
    }

    /// All rows in id order.
    async fn find_all(&self) -> DaoResult<Vec<<Self::Entity as EntityTrait>::Model>> {
        Ok(Self::Entity::find()
            .order_by_asc(Self::Entity::id_column())
            .all(self.db())
            .await?)
    }

    async fn find_by_id(&self, id: i32) -> DaoResult<<Self::Entity as EntityTrait>::Model> {
        find_by_id_in::<Self::Entity, _>(self.db(), Self::ENTITY_NAME, id).await
    }
}

pub async fn find_by_id_in<E, C>(conn: &C, entity: &'static str, id: i32) -> DaoResult<E::Model>
where
    E: HasIdColumn,
    C: ConnectionTrait,
{
    E::find()
        .filter(ColumnTrait::eq(&E::id_column(), id))
        .one(conn)
        .await?
        .ok_or(DaoLayerError::NotFound { entity, id })
}

/// Commits on success. On failure the transaction is rolled back before the
/// original error is returned; a commit failure is classified like any other
/// store error.
pub async fn commit_or_rollback<T>(txn: DatabaseTransaction, result: DaoResult<T>) -> DaoResult<T> {
    match result {
        Ok(value) => {
            txn.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = txn.rollback().await {
                tracing::error!(error = %rollback_err, "transaction rollback failed");
            }
            Err(err)
        }
    }
}
