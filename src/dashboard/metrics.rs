use crate::models::properties::{self, PropertyStatus};

use super::PropertyStatusCount;

/// Property counts for one owner. Maintenance and inactive properties only
/// show up in `total`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PropertyCounts {
    pub total: usize,
    pub rented: usize,
    pub available: usize,
}

impl PropertyCounts {
    /// The two-entry breakdown rendered as `property_status`.
    pub fn breakdown(&self) -> Vec<PropertyStatusCount> {
        vec![
            PropertyStatusCount {
                status: PropertyStatus::Rented,
                count: self.rented,
            },
            PropertyStatusCount {
                status: PropertyStatus::Available,
                count: self.available,
            },
        ]
    }
}

pub fn count_properties(properties: &[properties::Model]) -> PropertyCounts {
    properties
        .iter()
        .fold(PropertyCounts::default(), |mut counts, property| {
            counts.total += 1;
            match property.status {
                PropertyStatus::Rented => counts.rented += 1,
                PropertyStatus::Available => counts.available += 1,
                PropertyStatus::Maintenance | PropertyStatus::Inactive => {}
            }
            counts
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn property(status: PropertyStatus) -> properties::Model {
        properties::Model {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            title: "Apto".into(),
            description: String::new(),
            address: "Rua A, 1".into(),
            city: "Recife".into(),
            state: "PE".into(),
            zip_code: "50000-000".into(),
            bedrooms: 2,
            bathrooms: 1,
            area: 60,
            rent_amount: Decimal::ZERO,
            status,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn empty_portfolio() {
        assert_eq!(count_properties(&[]), PropertyCounts::default());
    }

    #[test]
    fn other_statuses_only_count_towards_total() {
        let props = vec![
            property(PropertyStatus::Rented),
            property(PropertyStatus::Rented),
            property(PropertyStatus::Available),
            property(PropertyStatus::Maintenance),
            property(PropertyStatus::Inactive),
        ];
        let counts = count_properties(&props);
        assert_eq!(
            counts,
            PropertyCounts {
                total: 5,
                rented: 2,
                available: 1
            }
        );
        assert!(counts.rented + counts.available <= counts.total);
    }

    #[test]
    fn breakdown_is_rented_then_available() {
        let counts = PropertyCounts {
            total: 3,
            rented: 1,
            available: 2,
        };
        let breakdown = counts.breakdown();
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].status, PropertyStatus::Rented);
        assert_eq!(breakdown[0].count, 1);
        assert_eq!(breakdown[1].status, PropertyStatus::Available);
        assert_eq!(breakdown[1].count, 2);
    }
}
