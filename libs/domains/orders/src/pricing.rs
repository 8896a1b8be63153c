//! Checkout pricing rules.
//!
//! All money values are rounded to two decimal places. Shipping is a
//! flat fee, waived once the subtotal exceeds the free-shipping
//! threshold. Tax applies to the subtotal only.

pub const FLAT_SHIPPING_FEE: f64 = 10.0;
pub const FREE_SHIPPING_THRESHOLD: f64 = 50.0;
pub const TAX_RATE: f64 = 0.08;

/// Round to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderTotals {
    pub subtotal: f64,
    pub shipping_fee: f64,
    pub tax_amount: f64,
    pub total_amount: f64,
}

/// Compute order totals from (unit price, quantity) lines
pub fn compute_totals(lines: &[(f64, i32)]) -> OrderTotals {
    let subtotal = round2(
        lines
            .iter()
            .map(|(price, quantity)| price * f64::from(*quantity))
            .sum(),
    );

    let shipping_fee = if subtotal > FREE_SHIPPING_THRESHOLD {
        0.0
    } else {
        FLAT_SHIPPING_FEE
    };

    let tax_amount = round2(subtotal * TAX_RATE);
    let total_amount = round2(subtotal + shipping_fee + tax_amount);

    OrderTotals {
        subtotal,
        shipping_fee,
        tax_amount,
        total_amount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shipping_waived_above_threshold() {
        let totals = compute_totals(&[(30.0, 2)]);
        assert_eq!(totals.subtotal, 60.0);
        assert_eq!(totals.shipping_fee, 0.0);
        assert_eq!(totals.tax_amount, 4.80);
        assert_eq!(totals.total_amount, 64.80);
    }

    #[test]
    fn test_flat_shipping_below_threshold() {
        let totals = compute_totals(&[(10.0, 1)]);
        assert_eq!(totals.subtotal, 10.0);
        assert_eq!(totals.shipping_fee, 10.0);
        assert_eq!(totals.tax_amount, 0.80);
        assert_eq!(totals.total_amount, 20.80);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        // Exactly at the threshold still pays shipping
        let totals = compute_totals(&[(25.0, 2)]);
        assert_eq!(totals.shipping_fee, FLAT_SHIPPING_FEE);
        assert_eq!(totals.total_amount, 64.0);
    }

    #[test]
    fn test_subtotal_rounds_to_cents() {
        let totals = compute_totals(&[(19.995, 1)]);
        assert_eq!(totals.subtotal, 20.0);
    }

    #[test]
    fn test_multiple_lines_sum() {
        let totals = compute_totals(&[(19.99, 2), (5.50, 1)]);
        assert_eq!(totals.subtotal, 45.48);
        assert_eq!(totals.shipping_fee, 10.0);
        assert_eq!(totals.tax_amount, 3.64);
        assert_eq!(totals.total_amount, 59.12);
    }
}
