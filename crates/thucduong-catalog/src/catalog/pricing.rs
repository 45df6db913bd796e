//! Product pricing.
//!
//! Amounts are whole units of the currency's smallest denomination. For VND,
//! the storefront's currency, that is the đồng itself.

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Currency of stored prices. The storefront only sells in VND.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    VND,
}

/// Regular and sale price of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pricing {
    /// List price; always positive for a sound record.
    pub regular: i64,
    /// Sale price, if any. Only a discount when `0 < sale < regular`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale: Option<i64>,
    #[serde(default)]
    pub currency: Currency,
}

impl Pricing {
    /// Create validated pricing in VND.
    pub fn new(regular: i64, sale: Option<i64>) -> Result<Self, CatalogError> {
        let pricing = Self {
            regular,
            sale,
            currency: Currency::VND,
        };
        pricing.check().map_err(CatalogError::Validation)?;
        Ok(pricing)
    }

    /// Check the pricing invariants, describing the first violation.
    pub fn check(&self) -> Result<(), String> {
        if self.regular <= 0 {
            return Err(format!("regular price must be positive, got {}", self.regular));
        }
        if let Some(sale) = self.sale {
            if sale < 0 {
                return Err(format!("sale price must not be negative, got {}", sale));
            }
        }
        Ok(())
    }

    /// The sale price, when it is an actual discount.
    pub fn active_sale(&self) -> Option<i64> {
        self.sale.filter(|sale| *sale > 0 && *sale < self.regular)
    }

    /// Percentage off the regular price, or 0 without an active sale.
    pub fn discount_percentage(&self) -> f64 {
        match self.active_sale() {
            Some(sale) => (self.regular - sale) as f64 / self.regular as f64 * 100.0,
            None => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discount_percentage() {
        let pricing = Pricing::new(55000, Some(49000)).unwrap();
        assert!((pricing.discount_percentage() - 10.909).abs() < 0.01);
        assert_eq!(pricing.active_sale(), Some(49000));
    }

    #[test]
    fn test_no_discount_without_active_sale() {
        for sale in [None, Some(0), Some(55000), Some(60000)] {
            let pricing = Pricing::new(55000, sale).unwrap();
            assert_eq!(pricing.discount_percentage(), 0.0, "sale {:?}", sale);
            assert_eq!(pricing.active_sale(), None);
        }
    }

    #[test]
    fn test_invalid_pricing_rejected() {
        assert!(matches!(Pricing::new(0, None), Err(CatalogError::Validation(_))));
        assert!(matches!(Pricing::new(-5, None), Err(CatalogError::Validation(_))));
        assert!(matches!(Pricing::new(1000, Some(-1)), Err(CatalogError::Validation(_))));
    }

    #[test]
    fn test_currency_defaults_to_vnd() {
        let pricing: Pricing = serde_json::from_str(r#"{"regular": 120000}"#).unwrap();
        assert_eq!(pricing.currency, Currency::VND);
        assert_eq!(pricing.sale, None);
    }
}
