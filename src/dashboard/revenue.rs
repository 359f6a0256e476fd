use chrono::{Datelike, Days, Months, NaiveDate};
use rust_decimal::Decimal;

use crate::models::contracts;
use crate::models::properties;

use super::MonthlyRevenue;

/// Sum of the monthly rent of each property's active contract.
///
/// A property without an active contract contributes nothing. Should a
/// property carry more than one, the one that started last is counted.
pub fn current_revenue(
    properties: &[properties::Model],
    contracts: &[contracts::Model],
    today: NaiveDate,
) -> Decimal {
    properties
        .iter()
        .filter_map(|property| {
            contracts
                .iter()
                .filter(|c| c.property_id == property.id && c.is_active(today))
                .max_by_key(|c| c.start_date)
        })
        .map(|c| c.monthly_rent)
        .sum()
}

/// Rent that was in force during each of the last `months` calendar months,
/// the current one included, oldest first.
pub fn trailing_series(
    contracts: &[contracts::Model],
    today: NaiveDate,
    months: u32,
) -> Vec<MonthlyRevenue> {
    let this_month = month_start(today);

    (0..months)
        .rev()
        .map(|back| {
            let from = this_month
                .checked_sub_months(Months::new(back))
                .unwrap_or(NaiveDate::MIN);
            let until = from
                .checked_add_months(Months::new(1))
                .unwrap_or(NaiveDate::MAX);

            MonthlyRevenue {
                month: from.format("%b").to_string(),
                revenue: revenue_between(contracts, from, until),
            }
        })
        .collect()
}

/// Rent of every contract in force at some point of `[from, until)`.
pub fn revenue_between(contracts: &[contracts::Model], from: NaiveDate, until: NaiveDate) -> Decimal {
    contracts
        .iter()
        .filter(|c| c.overlaps(from, until))
        .map(|c| c.monthly_rent)
        .sum()
}

fn month_start(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    use crate::models::contracts::ContractStatus;
    use crate::models::properties::PropertyStatus;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn property() -> properties::Model {
        properties::Model {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            title: "Casa".into(),
            description: String::new(),
            address: "Rua B, 2".into(),
            city: "Olinda".into(),
            state: "PE".into(),
            zip_code: String::new(),
            bedrooms: 3,
            bathrooms: 2,
            area: 120,
            rent_amount: dec!(1500),
            status: PropertyStatus::Rented,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn contract(
        property_id: Uuid,
        status: ContractStatus,
        start: NaiveDate,
        end: NaiveDate,
        rent: Decimal,
    ) -> contracts::Model {
        contracts::Model {
            id: Uuid::new_v4(),
            property_id,
            tenant_id: Uuid::new_v4(),
            start_date: start,
            end_date: end,
            monthly_rent: rent,
            payment_due_day: 10,
            status,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn month_start_handles_first_and_last_days() {
        assert_eq!(month_start(date(2024, 3, 1)), date(2024, 3, 1));
        assert_eq!(month_start(date(2024, 2, 29)), date(2024, 2, 1));
        assert_eq!(month_start(date(2024, 12, 31)), date(2024, 12, 1));
    }

    #[test]
    fn current_revenue_counts_active_contracts_only() {
        let a = property();
        let b = property();
        let c = property();
        let contracts = vec![
            contract(a.id, ContractStatus::Active, date(2024, 1, 1), date(2025, 1, 1), dec!(1000)),
            contract(b.id, ContractStatus::Cancelled, date(2024, 1, 1), date(2025, 1, 1), dec!(900)),
            contract(b.id, ContractStatus::Expired, date(2023, 1, 1), date(2024, 1, 1), dec!(800)),
        ];

        let today = date(2024, 6, 1);
        assert_eq!(current_revenue(&[a, b, c], &contracts, today), dec!(1000));
    }

    #[test]
    fn current_revenue_ignores_leases_past_their_end_date() {
        let a = property();
        let contracts = vec![contract(
            a.id,
            ContractStatus::Active,
            date(2023, 1, 1),
            date(2024, 1, 1),
            dec!(1000),
        )];

        let last_day = date(2023, 12, 31);
        assert_eq!(
            current_revenue(std::slice::from_ref(&a), &contracts, last_day),
            dec!(1000)
        );
        assert_eq!(current_revenue(&[a], &contracts, date(2024, 1, 1)), Decimal::ZERO);
    }

    #[test]
    fn current_revenue_picks_latest_active_contract() {
        let a = property();
        let contracts = vec![
            contract(a.id, ContractStatus::Active, date(2023, 1, 1), date(2024, 1, 1), dec!(700)),
            contract(a.id, ContractStatus::Active, date(2024, 1, 1), date(2025, 1, 1), dec!(750.50)),
        ];

        assert_eq!(current_revenue(&[a], &contracts, date(2023, 12, 1)), dec!(750.50));
    }

    #[test]
    fn series_is_four_months_oldest_first() {
        let series = trailing_series(&[], date(2024, 2, 15), 4);
        let labels: Vec<&str> = series.iter().map(|p| p.month.as_str()).collect();
        assert_eq!(labels, vec!["Nov", "Dec", "Jan", "Feb"]);
        assert!(series.iter().all(|p| p.revenue == Decimal::ZERO));
    }

    #[test]
    fn series_reflects_when_contracts_were_in_force() {
        let id = Uuid::new_v4();
        let contracts = vec![
            // Dec 2023 .. Jan 2024
            contract(id, ContractStatus::Expired, date(2023, 12, 10), date(2024, 1, 20), dec!(500)),
            // Feb 2024 onwards
            contract(id, ContractStatus::Active, date(2024, 2, 1), date(2025, 2, 1), dec!(600)),
            contract(id, ContractStatus::Cancelled, date(2023, 11, 1), date(2024, 12, 1), dec!(999)),
        ];

        let series = trailing_series(&contracts, date(2024, 2, 15), 4);
        let revenues: Vec<Decimal> = series.iter().map(|p| p.revenue).collect();
        assert_eq!(revenues, vec![dec!(0), dec!(500), dec!(500), dec!(600)]);
    }

    #[test]
    fn renewal_on_the_end_date_is_not_double_counted() {
        let id = Uuid::new_v4();
        let contracts = vec![
            contract(id, ContractStatus::Expired, date(2023, 3, 1), date(2024, 3, 1), dec!(1000)),
            contract(id, ContractStatus::Active, date(2024, 3, 1), date(2025, 3, 1), dec!(1000)),
        ];
        let properties = vec![properties::Model { id, ..property() }];
        let today = date(2024, 3, 15);

        let series = trailing_series(&contracts, today, 4);
        let revenues: Vec<Decimal> = series.iter().map(|p| p.revenue).collect();
        assert_eq!(revenues, vec![dec!(1000); 4]);
        assert_eq!(series[3].revenue, current_revenue(&properties, &contracts, today));
    }
}
