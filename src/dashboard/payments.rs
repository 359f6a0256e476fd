use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::models::payments::{self, PaymentStatus};
use crate::models::{contracts, properties, tenants};

use super::RecentPayment;

pub const RECENT_PAYMENTS_LIMIT: usize = 5;

pub const UNKNOWN_TENANT: &str = "Unknown tenant";

/// Id lookups over one owner's already-fetched portfolio.
pub struct Portfolio<'a> {
    properties: HashMap<Uuid, &'a properties::Model>,
    contracts: HashMap<Uuid, &'a contracts::Model>,
    tenants: HashMap<Uuid, &'a tenants::Model>,
}

impl<'a> Portfolio<'a> {
    pub fn new(
        properties: &'a [properties::Model],
        contracts: &'a [contracts::Model],
        tenants: &'a [tenants::Model],
    ) -> Self {
        Self {
            properties: properties.iter().map(|p| (p.id, p)).collect(),
            contracts: contracts.iter().map(|c| (c.id, c)).collect(),
            tenants: tenants.iter().map(|t| (t.id, t)).collect(),
        }
    }

    /// The contract behind `payment`, provided it sits on one of the
    /// owner's properties.
    fn owned_contract(&self, payment: &payments::Model) -> Option<&'a contracts::Model> {
        let Some(contract) = self.contracts.get(&payment.contract_id).copied() else {
            tracing::warn!(
                payment_id = %payment.id,
                contract_id = %payment.contract_id,
                "payment references a missing contract, skipping"
            );
            return None;
        };

        self.properties
            .contains_key(&contract.property_id)
            .then_some(contract)
    }

    fn tenant_name(&self, contract: &contracts::Model) -> String {
        match self.tenants.get(&contract.tenant_id) {
            Some(tenant) => tenant.name.clone(),
            None => {
                tracing::warn!(
                    contract_id = %contract.id,
                    tenant_id = %contract.tenant_id,
                    "contract references a missing tenant"
                );
                UNKNOWN_TENANT.to_string()
            }
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct PaymentSummary {
    pub pending: usize,
    pub overdue: usize,
    pub recent: Vec<RecentPayment>,
}

/// Count pending and overdue installments and pick the latest settled ones.
///
/// Only payments whose contract belongs to `portfolio` are considered.
/// Overdue is decided against `now`, so two calls across a due-date
/// boundary may disagree.
pub fn classify_payments(
    payments: &[payments::Model],
    portfolio: &Portfolio<'_>,
    now: DateTime<Utc>,
) -> PaymentSummary {
    let mut summary = PaymentSummary::default();
    let mut settled: Vec<(NaiveDate, RecentPayment)> = Vec::new();

    for payment in payments {
        let Some(contract) = portfolio.owned_contract(payment) else {
            continue;
        };

        match (payment.status, payment.paid_date) {
            (PaymentStatus::Pending, _) => {
                summary.pending += 1;
                if payment.is_overdue(now) {
                    summary.overdue += 1;
                }
            }
            (PaymentStatus::Paid, Some(paid_date)) => {
                let Some(property) = portfolio.properties.get(&contract.property_id) else {
                    continue;
                };
                settled.push((
                    paid_date,
                    RecentPayment {
                        id: payment.id,
                        tenant: portfolio.tenant_name(contract),
                        property: property.title.clone(),
                        amount: payment.settled_amount(),
                        date: paid_date,
                    },
                ));
            }
            _ => {}
        }
    }

    // Stable, so equal dates keep store order.
    settled.sort_by(|a, b| b.0.cmp(&a.0));
    summary.recent = settled
        .into_iter()
        .take(RECENT_PAYMENTS_LIMIT)
        .map(|(_, recent)| recent)
        .collect();

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::models::contracts::ContractStatus;
    use crate::models::properties::PropertyStatus;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn noon(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    struct Fixture {
        properties: Vec<properties::Model>,
        contracts: Vec<contracts::Model>,
        tenants: Vec<tenants::Model>,
    }

    impl Fixture {
        fn new() -> Self {
            let owner_id = Uuid::new_v4();
            let property = properties::Model {
                id: Uuid::new_v4(),
                owner_id,
                title: "Sala 101".into(),
                description: String::new(),
                address: "Av. Boa Viagem, 100".into(),
                city: "Recife".into(),
                state: "PE".into(),
                zip_code: String::new(),
                bedrooms: 1,
                bathrooms: 1,
                area: 40,
                rent_amount: dec!(1000),
                status: PropertyStatus::Rented,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            };
            let tenant = tenants::Model {
                id: Uuid::new_v4(),
                name: "Maria Souza".into(),
                email: "maria@example.com".into(),
                phone: "81999990000".into(),
                cpf: "52998224725".into(),
                birth_date: None,
                owner_id,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            };
            let contract = contracts::Model {
                id: Uuid::new_v4(),
                property_id: property.id,
                tenant_id: tenant.id,
                start_date: date(2024, 1, 1),
                end_date: date(2025, 1, 1),
                monthly_rent: dec!(1000),
                payment_due_day: 5,
                status: ContractStatus::Active,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            };
            Self {
                properties: vec![property],
                contracts: vec![contract],
                tenants: vec![tenant],
            }
        }

        fn contract_id(&self) -> Uuid {
            self.contracts[0].id
        }
    }

    fn payment(
        contract_id: Uuid,
        status: PaymentStatus,
        due: NaiveDate,
        paid: Option<NaiveDate>,
    ) -> payments::Model {
        payments::Model {
            id: Uuid::new_v4(),
            contract_id,
            amount: dec!(1000),
            due_date: due,
            paid_amount: paid.map(|_| dec!(1000)),
            paid_date: paid,
            status,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn pending_and_overdue_split_on_due_date() {
        let fx = Fixture::new();
        let portfolio = Portfolio::new(&fx.properties, &fx.contracts, &fx.tenants);
        let now = noon(2024, 3, 10);
        let payments = vec![
            payment(fx.contract_id(), PaymentStatus::Pending, date(2024, 3, 9), None),
            payment(fx.contract_id(), PaymentStatus::Pending, date(2024, 3, 10), None),
            payment(fx.contract_id(), PaymentStatus::Pending, date(2024, 3, 11), None),
            payment(fx.contract_id(), PaymentStatus::Overdue, date(2024, 1, 5), None),
        ];

        let summary = classify_payments(&payments, &portfolio, now);
        assert_eq!(summary.pending, 3);
        assert_eq!(summary.overdue, 2);
        assert!(summary.recent.is_empty());
    }

    #[test]
    fn payments_outside_portfolio_are_ignored() {
        let fx = Fixture::new();
        let portfolio = Portfolio::new(&fx.properties, &fx.contracts, &fx.tenants);
        let payments = vec![
            payment(Uuid::new_v4(), PaymentStatus::Pending, date(2024, 1, 1), None),
            payment(
                Uuid::new_v4(),
                PaymentStatus::Paid,
                date(2024, 1, 1),
                Some(date(2024, 1, 2)),
            ),
        ];

        let summary = classify_payments(&payments, &portfolio, noon(2024, 3, 10));
        assert_eq!(summary, PaymentSummary::default());
    }

    #[test]
    fn paid_without_date_is_not_recent() {
        let fx = Fixture::new();
        let portfolio = Portfolio::new(&fx.properties, &fx.contracts, &fx.tenants);
        let payments = vec![payment(fx.contract_id(), PaymentStatus::Paid, date(2024, 1, 5), None)];

        let summary = classify_payments(&payments, &portfolio, noon(2024, 3, 10));
        assert!(summary.recent.is_empty());
    }

    #[test]
    fn recent_keeps_five_latest_by_paid_date() {
        let fx = Fixture::new();
        let portfolio = Portfolio::new(&fx.properties, &fx.contracts, &fx.tenants);
        let payments: Vec<_> = [3, 7, 1, 5, 2, 6, 4]
            .into_iter()
            .map(|month| {
                payment(
                    fx.contract_id(),
                    PaymentStatus::Paid,
                    date(2024, month, 5),
                    Some(date(2024, month, 4)),
                )
            })
            .collect();

        let summary = classify_payments(&payments, &portfolio, noon(2024, 8, 1));
        let months: Vec<u32> = summary
            .recent
            .iter()
            .map(|r| chrono::Datelike::month(&r.date))
            .collect();
        assert_eq!(months, vec![7, 6, 5, 4, 3]);
    }

    #[test]
    fn recent_entry_resolves_tenant_and_property() {
        let fx = Fixture::new();
        let portfolio = Portfolio::new(&fx.properties, &fx.contracts, &fx.tenants);
        let mut paid = payment(
            fx.contract_id(),
            PaymentStatus::Paid,
            date(2024, 2, 5),
            Some(date(2024, 2, 1)),
        );
        paid.paid_amount = Some(dec!(950.25));

        let summary =
            classify_payments(std::slice::from_ref(&paid), &portfolio, noon(2024, 3, 1));
        assert_eq!(summary.recent.len(), 1);
        let recent = &summary.recent[0];
        assert_eq!(recent.id, paid.id);
        assert_eq!(recent.tenant, "Maria Souza");
        assert_eq!(recent.property, "Sala 101");
        assert_eq!(recent.amount, dec!(950.25));
        assert_eq!(recent.date, date(2024, 2, 1));
    }

    #[test]
    fn missing_tenant_gets_a_placeholder() {
        let fx = Fixture::new();
        let portfolio = Portfolio::new(&fx.properties, &fx.contracts, &[]);
        let mut paid = payment(
            fx.contract_id(),
            PaymentStatus::Paid,
            date(2024, 2, 5),
            Some(date(2024, 2, 1)),
        );
        paid.paid_amount = None;

        let summary = classify_payments(&[paid], &portfolio, noon(2024, 3, 1));
        assert_eq!(summary.recent[0].tenant, UNKNOWN_TENANT);
        assert_eq!(summary.recent[0].amount, dec!(1000));
        assert_ne!(summary.recent[0].amount, Decimal::ZERO);
    }
}
