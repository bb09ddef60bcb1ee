use chrono::{Days, NaiveDate};
use tracing::{debug, warn};

use crate::store::SaleStore;

/// Opening reading for `target_date`: the closing reading of the latest
/// record on the previous calendar day.
///
/// Returns `0` when there is no such record or the lookup fails. A missing
/// prior day must never block today's entry, so errors are only logged.
pub async fn resolve_opening_reading(store: &dyn SaleStore, target_date: NaiveDate) -> f64 {
    let Some(prior_date) = target_date.checked_sub_days(Days::new(1)) else {
        return 0.0;
    };

    match store.select_latest_by_date(prior_date).await {
        Ok(Some(record)) => {
            debug!(
                "Carrying forward closing reading {} from {} to {}",
                record.dispenser_close, prior_date, target_date
            );
            record.dispenser_close
        }
        Ok(None) => 0.0,
        Err(e) => {
            warn!("Error fetching closing reading for {}: {}", prior_date, e);
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewFuelSale;
    use crate::store::MemorySaleStore;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn reading(day: &str, open: f64, close: f64) -> NewFuelSale {
        NewFuelSale {
            date: date(day),
            rate_per_liter: 9500.0,
            dispenser_open: open,
            dispenser_close: close,
            units_sold: close - open,
            total_sale: (close - open) * 9500.0,
        }
    }

    #[tokio::test]
    async fn test_previous_close_becomes_next_open() {
        let store = MemorySaleStore::new();
        store.insert(&[reading("2024-01-02", 100.0, 150.0)]).await.unwrap();

        assert_eq!(resolve_opening_reading(&store, date("2024-01-03")).await, 150.0);
    }

    #[tokio::test]
    async fn test_missing_previous_day_defaults_to_zero() {
        let store = MemorySaleStore::new();
        store.insert(&[reading("2024-01-01", 100.0, 150.0)]).await.unwrap();

        // 2024-01-02 has no record, so 2024-01-03 does not see 2024-01-01
        assert_eq!(resolve_opening_reading(&store, date("2024-01-03")).await, 0.0);
    }

    #[tokio::test]
    async fn test_latest_same_day_record_wins() {
        let store = MemorySaleStore::new();
        store.insert(&[reading("2024-01-02", 100.0, 150.0)]).await.unwrap();
        store.insert(&[reading("2024-01-02", 150.0, 180.0)]).await.unwrap();

        assert_eq!(resolve_opening_reading(&store, date("2024-01-03")).await, 180.0);
    }

    #[tokio::test]
    async fn test_month_and_year_boundaries() {
        let store = MemorySaleStore::new();
        store.insert(&[reading("2023-12-31", 0.0, 42.0)]).await.unwrap();
        store.insert(&[reading("2024-02-29", 42.0, 77.0)]).await.unwrap();

        assert_eq!(resolve_opening_reading(&store, date("2024-01-01")).await, 42.0);
        assert_eq!(resolve_opening_reading(&store, date("2024-03-01")).await, 77.0);
    }

    #[tokio::test]
    async fn test_store_failure_is_swallowed() {
        let store = MemorySaleStore::new();
        store.insert(&[reading("2024-01-02", 100.0, 150.0)]).await.unwrap();
        store.set_unavailable(Some("timeout"));

        assert_eq!(resolve_opening_reading(&store, date("2024-01-03")).await, 0.0);
    }
}
