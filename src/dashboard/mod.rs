//! Owner dashboard: property counts, rent revenue and payment status for one
//! owner's portfolio, computed from a single read of the store.

pub mod metrics;
pub mod payments;
pub mod revenue;
pub mod store;

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::DbErr;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::properties::PropertyStatus;

pub use store::PortfolioStore;

/// Number of points in `monthly_revenues`, the current month included.
pub const REVENUE_SERIES_MONTHS: u32 = 4;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("invalid owner id")]
    InvalidInput(#[source] uuid::Error),
    #[error("failed to load {what}: {source}")]
    UpstreamFailure {
        what: &'static str,
        #[source]
        source: DbErr,
    },
}

impl DashboardError {
    fn upstream(what: &'static str) -> impl FnOnce(DbErr) -> Self {
        move |source| Self::UpstreamFailure { what, source }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    pub total_properties: usize,
    pub rented_properties: usize,
    pub available_properties: usize,
    pub monthly_revenue: Decimal,
    pub pending_payments: usize,
    pub overdue_payments: usize,
    pub recent_payments: Vec<RecentPayment>,
    pub monthly_revenues: Vec<MonthlyRevenue>,
    pub property_status: Vec<PropertyStatusCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentPayment {
    pub id: Uuid,
    pub tenant: String,
    pub property: String,
    pub amount: Decimal,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRevenue {
    pub month: String,
    pub revenue: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyStatusCount {
    pub status: PropertyStatus,
    pub count: usize,
}

pub fn parse_owner_id(raw: &str) -> Result<Uuid, DashboardError> {
    Uuid::parse_str(raw.trim()).map_err(DashboardError::InvalidInput)
}

/// Builds [`DashboardReport`]s from an injected store handle.
pub struct Dashboard<S> {
    store: S,
}

impl<S: PortfolioStore> Dashboard<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Validate `raw_owner_id`, then build that owner's report.
    ///
    /// A malformed id fails before the store is touched.
    pub async fn report(
        &self,
        raw_owner_id: &str,
        now: DateTime<Utc>,
    ) -> Result<DashboardReport, DashboardError> {
        let owner_id = parse_owner_id(raw_owner_id)?;
        self.report_for_owner(owner_id, now).await
    }

    /// Any store error aborts the whole report. Dangling references inside
    /// the portfolio are logged and skipped.
    pub async fn report_for_owner(
        &self,
        owner_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<DashboardReport, DashboardError> {
        let today = now.date_naive();

        let properties = self
            .store
            .properties_by_owner(owner_id)
            .await
            .map_err(DashboardError::upstream("properties"))?;
        let counts = metrics::count_properties(&properties);

        let property_ids: Vec<Uuid> = properties.iter().map(|p| p.id).collect();
        let contracts = self
            .store
            .contracts_for_properties(&property_ids)
            .await
            .map_err(DashboardError::upstream("contracts"))?;

        let contract_ids: Vec<Uuid> = contracts.iter().map(|c| c.id).collect();
        let installments = self
            .store
            .payments_for_contracts(&contract_ids)
            .await
            .map_err(DashboardError::upstream("payments"))?;

        let tenant_ids: Vec<Uuid> = contracts
            .iter()
            .map(|c| c.tenant_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let tenants = self
            .store
            .tenants_by_ids(&tenant_ids)
            .await
            .map_err(DashboardError::upstream("tenants"))?;

        let portfolio = payments::Portfolio::new(&properties, &contracts, &tenants);
        let summary = payments::classify_payments(&installments, &portfolio, now);

        tracing::debug!(
            %owner_id,
            properties = counts.total,
            contracts = contracts.len(),
            payments = installments.len(),
            "dashboard computed"
        );

        Ok(DashboardReport {
            total_properties: counts.total,
            rented_properties: counts.rented,
            available_properties: counts.available,
            monthly_revenue: revenue::current_revenue(&properties, &contracts, today),
            pending_payments: summary.pending,
            overdue_payments: summary.overdue,
            recent_payments: summary.recent,
            monthly_revenues: revenue::trailing_series(&contracts, today, REVENUE_SERIES_MONTHS),
            property_status: counts.breakdown(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_ids() {
        let id = Uuid::new_v4();
        assert_eq!(parse_owner_id(&id.to_string()).unwrap(), id);
        assert_eq!(parse_owner_id(&format!(" {id} ")).unwrap(), id);
    }

    #[test]
    fn rejects_malformed_ids() {
        for raw in ["", "abc", "123", "not-a-uuid-at-all-0000000000000000"] {
            let err = parse_owner_id(raw).unwrap_err();
            assert!(matches!(err, DashboardError::InvalidInput(_)));
            assert_eq!(err.to_string(), "invalid owner id");
        }
    }
}
