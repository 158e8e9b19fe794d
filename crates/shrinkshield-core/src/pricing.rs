//! # Unit Price Calculator
//!
//! Derives price-per-millilitre from a normalized size and a price.
//!
//! ```text
//!   size: Some(1000.0 mL) ─┐
//!                          ├──► 1.29 / 1000.0 = 0.00129 per mL
//!   price: Some(1.29) ─────┘
//!
//!   size: None / Some(0.0) ──► None   (never divides)
//!   price: None ─────────────► None
//! ```
//!
//! No rounding happens here; formatting for display belongs to clients.

use crate::size::Millilitres;

/// Computes price per millilitre.
///
/// Returns `None` unless the size is present and strictly positive and the
/// price is present. The guard runs before the division.
///
/// ## Example
/// ```rust
/// use shrinkshield_core::pricing::unit_price_per_ml;
/// use shrinkshield_core::size::Millilitres;
///
/// let litre = Millilitres::new(1000.0);
/// assert_eq!(unit_price_per_ml(litre, Some(1.29)), Some(1.29 / 1000.0));
/// assert_eq!(unit_price_per_ml(None, Some(0.99)), None);
/// ```
pub fn unit_price_per_ml(size: Option<Millilitres>, price: Option<f64>) -> Option<f64> {
    let size = size?;
    let price = price?;

    if size.value() <= 0.0 {
        return None;
    }

    Some(price / size.value())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_litre_bottle_price() {
        let size = Millilitres::new(1000.0);
        let unit = unit_price_per_ml(size, Some(1.29)).unwrap();
        assert!((unit - 0.00129).abs() < 1e-12);
    }

    #[test]
    fn test_absent_size_yields_none() {
        assert_eq!(unit_price_per_ml(None, Some(0.99)), None);
    }

    #[test]
    fn test_zero_size_yields_none() {
        assert_eq!(unit_price_per_ml(Millilitres::new(0.0), Some(1.00)), None);
    }

    #[test]
    fn test_absent_price_yields_none() {
        assert_eq!(unit_price_per_ml(Millilitres::new(500.0), None), None);
    }

    #[test]
    fn test_no_rounding_applied() {
        let unit = unit_price_per_ml(Millilitres::new(3.0), Some(1.0)).unwrap();
        assert_eq!(unit, 1.0 / 3.0);
    }

    #[test]
    fn test_zero_price_is_a_real_price() {
        assert_eq!(unit_price_per_ml(Millilitres::new(250.0), Some(0.0)), Some(0.0));
    }
}
