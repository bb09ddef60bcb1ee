use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Derived figures for one sale period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SaleFigures {
    pub units_sold: f64,
    pub total_sale: f64,
}

/// Derive units and total from form readings, where a blank reading is `None`.
///
/// A blank reading counts as `0` when checking `close > open`, and forces
/// `units_sold` to `0` so a half-filled form never yields a negative figure.
pub fn compute_sale(
    open: Option<f64>,
    close: Option<f64>,
    rate_per_liter: f64,
) -> Result<SaleFigures, ValidationError> {
    let open_value = open.unwrap_or(0.0);
    let close_value = close.unwrap_or(0.0);
    ensure_close_above_open(open_value, close_value)?;

    let units_sold = match (open, close) {
        (Some(open), Some(close)) => close - open,
        _ => 0.0,
    };
    Ok(SaleFigures {
        units_sold,
        total_sale: units_sold * rate_per_liter,
    })
}

/// Derive units and total for an edited record. Both readings are always set.
pub fn compute_edited_sale(
    open: f64,
    close: f64,
    rate_per_liter: f64,
) -> Result<SaleFigures, ValidationError> {
    ensure_close_above_open(open, close)?;
    Ok(preview(open, close, rate_per_liter))
}

/// Unvalidated figures, used for the live preview of a row being edited.
pub fn preview(open: f64, close: f64, rate_per_liter: f64) -> SaleFigures {
    let units_sold = close - open;
    SaleFigures {
        units_sold,
        total_sale: units_sold * rate_per_liter,
    }
}

fn ensure_close_above_open(open: f64, close: f64) -> Result<(), ValidationError> {
    // `!(a > b)` also rejects NaN readings
    if !(close > open) {
        return Err(ValidationError::CloseNotAboveOpen);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_reading_yields_units_and_total() {
        let figures = compute_sale(Some(100.0), Some(150.0), 9500.0).unwrap();
        assert_eq!(figures.units_sold, 50.0);
        assert_eq!(figures.total_sale, 475_000.0);
    }

    #[test]
    fn test_close_below_open_is_rejected() {
        let err = compute_sale(Some(200.0), Some(100.0), 9500.0).unwrap_err();
        assert_eq!(err, ValidationError::CloseNotAboveOpen);
        assert_eq!(err.to_string(), "Dispenser Close must be greater than Dispenser Open");
    }

    #[test]
    fn test_equal_readings_are_rejected() {
        assert!(compute_sale(Some(120.5), Some(120.5), 9500.0).is_err());
        assert!(compute_edited_sale(120.5, 120.5, 9500.0).is_err());
    }

    #[test]
    fn test_blank_close_is_rejected() {
        // blank close counts as 0, which never exceeds a positive open
        assert!(compute_sale(Some(10.0), None, 9500.0).is_err());
        assert!(compute_sale(None, None, 9500.0).is_err());
    }

    #[test]
    fn test_blank_open_forces_zero_units() {
        let figures = compute_sale(None, Some(150.0), 9500.0).unwrap();
        assert_eq!(figures.units_sold, 0.0);
        assert_eq!(figures.total_sale, 0.0);
    }

    #[test]
    fn test_figures_match_plain_arithmetic() {
        let cases = [
            (0.0, 0.01, 9500.0),
            (1234.56, 1300.78, 9750.5),
            (99_999.9, 100_250.25, 1.0),
            (5.0, 7.5, 0.0),
        ];
        for (open, close, rate) in cases {
            let figures = compute_sale(Some(open), Some(close), rate).unwrap();
            assert_eq!(figures.units_sold, close - open);
            assert_eq!(figures.total_sale, (close - open) * rate);

            let edited = compute_edited_sale(open, close, rate).unwrap();
            assert_eq!(edited, figures);
        }
    }

    #[test]
    fn test_nan_reading_is_rejected() {
        assert!(compute_edited_sale(f64::NAN, 10.0, 9500.0).is_err());
    }

    #[test]
    fn test_preview_allows_inverted_readings() {
        let figures = preview(200.0, 150.0, 10.0);
        assert_eq!(figures.units_sold, -50.0);
        assert_eq!(figures.total_sale, -500.0);
    }
}
