use std::future::Future;

use sea_orm::{DatabaseConnection, DbErr};
use uuid::Uuid;

use crate::db;
use crate::models::{contracts, payments, properties, tenants};

/// Read-only queries the dashboard needs, scoped to one owner's portfolio.
///
/// Implemented for the live `DatabaseConnection`; tests plug in an in-memory
/// store instead.
pub trait PortfolioStore {
    fn properties_by_owner(
        &self,
        owner_id: Uuid,
    ) -> impl Future<Output = Result<Vec<properties::Model>, DbErr>>;

    /// Every contract on the given properties, whatever its status.
    fn contracts_for_properties(
        &self,
        property_ids: &[Uuid],
    ) -> impl Future<Output = Result<Vec<contracts::Model>, DbErr>>;

    fn payments_for_contracts(
        &self,
        contract_ids: &[Uuid],
    ) -> impl Future<Output = Result<Vec<payments::Model>, DbErr>>;

    fn tenants_by_ids(
        &self,
        tenant_ids: &[Uuid],
    ) -> impl Future<Output = Result<Vec<tenants::Model>, DbErr>>;
}

impl PortfolioStore for DatabaseConnection {
    async fn properties_by_owner(&self, owner_id: Uuid) -> Result<Vec<properties::Model>, DbErr> {
        db::properties::get_properties_by_owner(self, owner_id).await
    }

    async fn contracts_for_properties(
        &self,
        property_ids: &[Uuid],
    ) -> Result<Vec<contracts::Model>, DbErr> {
        db::contracts::get_contracts_by_property_ids(self, property_ids).await
    }

    async fn payments_for_contracts(
        &self,
        contract_ids: &[Uuid],
    ) -> Result<Vec<payments::Model>, DbErr> {
        db::payments::get_payments_by_contract_ids(self, contract_ids).await
    }

    async fn tenants_by_ids(&self, tenant_ids: &[Uuid]) -> Result<Vec<tenants::Model>, DbErr> {
        db::tenants::get_tenants_by_ids(self, tenant_ids).await
    }
}

impl<S: PortfolioStore + ?Sized> PortfolioStore for &S {
    async fn properties_by_owner(&self, owner_id: Uuid) -> Result<Vec<properties::Model>, DbErr> {
        (**self).properties_by_owner(owner_id).await
    }

    async fn contracts_for_properties(
        &self,
        property_ids: &[Uuid],
    ) -> Result<Vec<contracts::Model>, DbErr> {
        (**self).contracts_for_properties(property_ids).await
    }

    async fn payments_for_contracts(
        &self,
        contract_ids: &[Uuid],
    ) -> Result<Vec<payments::Model>, DbErr> {
        (**self).payments_for_contracts(contract_ids).await
    }

    async fn tenants_by_ids(&self, tenant_ids: &[Uuid]) -> Result<Vec<tenants::Model>, DbErr> {
        (**self).tenants_by_ids(tenant_ids).await
    }
}
