//! # Pricing Configuration
//!
//! The immutable value handed to every pricing call.
//!
//! ## Lifecycle
//! ```text
//! process start ──► PricingConfig::default()           (built-in tables)
//!                   PricingConfig::from_toml_str(..)   (operator overrides)
//!                          │
//!                          ▼
//!                   validate() ──► shared read-only for the rest of the run
//! ```
//!
//! Reading the file is the caller's job; this module only parses text.
//!
//! ## File Format
//! ```toml
//! [[products]]
//! name = "Large"
//! dimensions = "94 x 152 cm"
//! price = 1575000            # cents
//!
//! [products.costs]
//! framing = 199000
//! printing = 88700
//! drytac = 57600
//! acrylic = 74000
//! mounting = 30000
//! paper = 34000
//!
//! [[financing]]
//! installments = 3
//! rate_bps = 575
//! ```
//! A missing `products` or `financing` section falls back to the built-in
//! table for that section.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::catalog::{FinancingSurchargeTable, ProductCatalog, ProductSpec};
use crate::error::{CoreError, CoreResult};
use crate::types::FULL_BPS;

/// Catalog plus financing table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Products available for sale.
    #[serde(default)]
    pub products: ProductCatalog,

    /// Card financing surcharges.
    #[serde(default)]
    pub financing: FinancingSurchargeTable,
}

impl PricingConfig {
    /// Creates a config from explicit tables.
    pub fn new(products: ProductCatalog, financing: FinancingSurchargeTable) -> Self {
        PricingConfig {
            products,
            financing,
        }
    }

    /// Parses and validates a TOML document.
    ///
    /// ## Example
    /// ```rust
    /// use eterno_core::config::PricingConfig;
    ///
    /// let config = PricingConfig::from_toml_str(r#"
    ///     [[financing]]
    ///     installments = 18
    ///     rate_bps = 1100
    /// "#).unwrap();
    ///
    /// assert_eq!(config.financing.rate(18).bps(), 1100);
    /// assert!(config.financing.rate(3).is_zero());   // table replaced, not merged
    /// assert!(config.products.get("Large").is_some()); // built-in catalog kept
    /// ```
    pub fn from_toml_str(s: &str) -> CoreResult<Self> {
        let config: PricingConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the tables for inconsistencies.
    ///
    /// ## Rules
    /// - At least one product
    /// - Product names non-blank and unique
    /// - Prices and costs not negative
    /// - Installment counts positive and unique
    /// - Rates at most 100%
    pub fn validate(&self) -> CoreResult<()> {
        if self.products.is_empty() {
            return Err(invalid("catalog has no products"));
        }

        let mut names = HashSet::new();
        for product in self.products.iter() {
            if product.name.trim().is_empty() {
                return Err(invalid("product name is blank"));
            }
            if !names.insert(product.name.as_str()) {
                return Err(invalid(format!("duplicate product '{}'", product.name)));
            }
            if product.price.is_negative() {
                return Err(invalid(format!("product '{}' has a negative price", product.name)));
            }
            if let Some((category, _)) = product.costs.iter().find(|(_, c)| c.is_negative()) {
                return Err(invalid(format!(
                    "product '{}' has a negative {} cost",
                    product.name, category
                )));
            }
        }

        let mut counts = HashSet::new();
        for tier in self.financing.tiers() {
            if tier.installments == 0 {
                return Err(invalid("financing tier with 0 installments"));
            }
            if !counts.insert(tier.installments) {
                return Err(invalid(format!(
                    "duplicate financing tier for {} installments",
                    tier.installments
                )));
            }
            if tier.rate_bps.bps() > FULL_BPS {
                return Err(invalid(format!(
                    "financing rate for {} installments exceeds 100%",
                    tier.installments
                )));
            }
        }

        Ok(())
    }

    /// Looks up a product, failing with `UnknownProduct`.
    pub fn product(&self, name: &str) -> CoreResult<&ProductSpec> {
        self.products
            .get(name)
            .ok_or_else(|| CoreError::UnknownProduct(name.to_string()))
    }
}

fn invalid(reason: impl Into<String>) -> CoreError {
    CoreError::InvalidConfig(reason.into())
}

// =============================================================================
// Unit Tests
// =============================================================================
