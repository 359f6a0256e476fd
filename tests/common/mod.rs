//! In-memory `PortfolioStore` and fixtures shared by the dashboard tests.
#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::DbErr;
use uuid::Uuid;

use aluguei_backend::dashboard::PortfolioStore;
use aluguei_backend::models::contracts::{self, ContractStatus};
use aluguei_backend::models::payments::{self, PaymentStatus};
use aluguei_backend::models::properties::{self, PropertyStatus};
use aluguei_backend::models::tenants;

pub const TEST_SECRET: &str = "test-secret-at-least-256-bits-long-for-hs256-xxxxxxx";

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Which query should fail, to exercise upstream-failure handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailOn {
    Properties,
    Contracts,
    Payments,
    Tenants,
}

#[derive(Default)]
pub struct InMemoryStore {
    pub properties: Vec<properties::Model>,
    pub contracts: Vec<contracts::Model>,
    pub payments: Vec<payments::Model>,
    pub tenants: Vec<tenants::Model>,
    pub fail_on: Mutex<Option<FailOn>>,
    calls: AtomicUsize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn fail_on(&self, query: FailOn) {
        *self.fail_on.lock().unwrap() = Some(query);
    }

    fn enter(&self, query: FailOn) -> Result<(), DbErr> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if *self.fail_on.lock().unwrap() == Some(query) {
            return Err(DbErr::Custom(format!("{query:?} query failed")));
        }
        Ok(())
    }

    pub fn add_property(&mut self, owner_id: Uuid, status: PropertyStatus, title: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.properties.push(properties::Model {
            id,
            owner_id,
            title: title.to_string(),
            description: String::new(),
            address: "Rua das Flores, 10".into(),
            city: "Recife".into(),
            state: "PE".into(),
            zip_code: "50000-000".into(),
            bedrooms: 2,
            bathrooms: 1,
            area: 70,
            rent_amount: Decimal::new(1000, 0),
            status,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        });
        id
    }

    pub fn add_tenant(&mut self, owner_id: Uuid, name: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.tenants.push(tenants::Model {
            id,
            name: name.to_string(),
            email: format!("{id}@example.com"),
            phone: "81999990000".into(),
            cpf: "52998224725".into(),
            birth_date: None,
            owner_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        });
        id
    }

    pub fn add_contract(
        &mut self,
        property_id: Uuid,
        tenant_id: Uuid,
        status: ContractStatus,
        start: NaiveDate,
        end: NaiveDate,
        monthly_rent: Decimal,
    ) -> Uuid {
        let id = Uuid::new_v4();
        self.contracts.push(contracts::Model {
            id,
            property_id,
            tenant_id,
            start_date: start,
            end_date: end,
            monthly_rent,
            payment_due_day: 5,
            status,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        });
        id
    }

    pub fn add_payment(
        &mut self,
        contract_id: Uuid,
        status: PaymentStatus,
        amount: Decimal,
        due: NaiveDate,
        paid: Option<(Decimal, NaiveDate)>,
    ) -> Uuid {
        let id = Uuid::new_v4();
        self.payments.push(payments::Model {
            id,
            contract_id,
            amount,
            due_date: due,
            paid_amount: paid.map(|(amount, _)| amount),
            paid_date: paid.map(|(_, date)| date),
            status,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        });
        id
    }
}

impl PortfolioStore for InMemoryStore {
    async fn properties_by_owner(&self, owner_id: Uuid) -> Result<Vec<properties::Model>, DbErr> {
        self.enter(FailOn::Properties)?;
        Ok(self
            .properties
            .iter()
            .filter(|p| p.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn contracts_for_properties(
        &self,
        property_ids: &[Uuid],
    ) -> Result<Vec<contracts::Model>, DbErr> {
        self.enter(FailOn::Contracts)?;
        Ok(self
            .contracts
            .iter()
            .filter(|c| property_ids.contains(&c.property_id))
            .cloned()
            .collect())
    }

    async fn payments_for_contracts(
        &self,
        contract_ids: &[Uuid],
    ) -> Result<Vec<payments::Model>, DbErr> {
        self.enter(FailOn::Payments)?;
        Ok(self
            .payments
            .iter()
            .filter(|p| contract_ids.contains(&p.contract_id))
            .cloned()
            .collect())
    }

    async fn tenants_by_ids(&self, tenant_ids: &[Uuid]) -> Result<Vec<tenants::Model>, DbErr> {
        self.enter(FailOn::Tenants)?;
        Ok(self
            .tenants
            .iter()
            .filter(|t| tenant_ids.contains(&t.id))
            .cloned()
            .collect())
    }
}

/// Store that hands back every payment it holds, ignoring the contract
/// filter, the way a careless backend might.
pub struct LeakyStore(pub InMemoryStore);

impl PortfolioStore for LeakyStore {
    async fn properties_by_owner(&self, owner_id: Uuid) -> Result<Vec<properties::Model>, DbErr> {
        self.0.properties_by_owner(owner_id).await
    }

    async fn contracts_for_properties(
        &self,
        _property_ids: &[Uuid],
    ) -> Result<Vec<contracts::Model>, DbErr> {
        self.0.enter(FailOn::Contracts)?;
        Ok(self.0.contracts.clone())
    }

    async fn payments_for_contracts(
        &self,
        _contract_ids: &[Uuid],
    ) -> Result<Vec<payments::Model>, DbErr> {
        self.0.enter(FailOn::Payments)?;
        Ok(self.0.payments.clone())
    }

    async fn tenants_by_ids(&self, tenant_ids: &[Uuid]) -> Result<Vec<tenants::Model>, DbErr> {
        self.0.tenants_by_ids(tenant_ids).await
    }
}
