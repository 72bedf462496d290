//! # Catalog Module
//!
//! The two static tables every breakdown is computed from.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ProductCatalog                                                         │
//! │  ──────────────                                                         │
//! │  "Large"  94 x 152 cm   price 15750   costs Σ 4833                     │
//! │  "Small"  75 x 122 cm   price 13125   costs Σ 3761                     │
//! │                                                                         │
//! │  FinancingSurchargeTable                                                │
//! │  ───────────────────────                                                │
//! │  installments:   2      3      6      10     12                        │
//! │  surcharge:      5%     5.75%  7%     7%     8%                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both are immutable once loaded. Lookups are exact-match by product name
//! and by installment count.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::money::Money;
use crate::types::{CostCategory, SurchargeRate};

// =============================================================================
// Product Catalog
// =============================================================================

/// One sellable product size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSpec {
    /// Catalog key, matched exactly.
    pub name: String,
    /// Printed size, for display.
    #[serde(default)]
    pub dimensions: String,
    /// Unit sale price.
    pub price: Money,
    /// Per-unit production cost by category.
    pub costs: BTreeMap<CostCategory, Money>,
}

impl ProductSpec {
    /// Production cost of one unit (sum over categories).
    pub fn unit_cost(&self) -> Money {
        self.costs.values().sum()
    }

    /// Cost of a single category for one unit (zero if not listed).
    pub fn cost_of(&self, category: CostCategory) -> Money {
        self.costs.get(&category).copied().unwrap_or_default()
    }
}

/// Mapping from product name to its price and cost breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductCatalog(Vec<ProductSpec>);

impl ProductCatalog {
    /// Builds a catalog from product specs.
    pub fn new(products: Vec<ProductSpec>) -> Self {
        ProductCatalog(products)
    }

    /// The studio's two framed print sizes.
    pub fn standard() -> Self {
        let costs = |framing, printing, drytac, acrylic, mounting, paper| {
            BTreeMap::from([
                (CostCategory::Framing, Money::from_major(framing)),
                (CostCategory::Printing, Money::from_major(printing)),
                (CostCategory::Drytac, Money::from_major(drytac)),
                (CostCategory::Acrylic, Money::from_major(acrylic)),
                (CostCategory::Mounting, Money::from_major(mounting)),
                (CostCategory::Paper, Money::from_major(paper)),
            ])
        };

        ProductCatalog(vec![
            ProductSpec {
                name: "Large".to_string(),
                dimensions: "94 x 152 cm".to_string(),
                price: Money::from_major(15750),
                costs: costs(1990, 887, 576, 740, 300, 340),
            },
            ProductSpec {
                name: "Small".to_string(),
                dimensions: "75 x 122 cm".to_string(),
                price: Money::from_major(13125),
                costs: costs(1500, 595, 576, 470, 300, 320),
            },
        ])
    }

    /// Looks up a product by exact name.
    pub fn get(&self, name: &str) -> Option<&ProductSpec> {
        self.0.iter().find(|p| p.name == name)
    }

    /// Product names in catalog order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|p| p.name.as_str())
    }

    /// Iterates over products in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &ProductSpec> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for ProductCatalog {
    fn default() -> Self {
        ProductCatalog::standard()
    }
}

// =============================================================================
// Financing Surcharge Table
// =============================================================================

/// Surcharge for paying in a given number of card installments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurchargeTier {
    pub installments: u32,
    pub rate_bps: SurchargeRate,
}

/// Installment count → surcharge rate.
///
/// ## Unknown Counts
/// ```text
/// rate(0)  → 0%          (not financed)
/// rate(3)  → 5.75%       (tier found)
/// rate(4)  → 0%          (no tier: priced as if not financed, NOT an error)
/// ```
/// The silent fallback for unknown counts is kept for compatibility with
/// rows already stored; callers that take operator input can use
/// [`FinancingSurchargeTable::is_known`] to warn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FinancingSurchargeTable(Vec<SurchargeTier>);

impl FinancingSurchargeTable {
    /// Builds a table from tiers.
    pub fn new(tiers: Vec<SurchargeTier>) -> Self {
        FinancingSurchargeTable(tiers)
    }

    /// Card financing rates currently charged to the studio.
    pub fn standard() -> Self {
        let tier = |installments, bps| SurchargeTier {
            installments,
            rate_bps: SurchargeRate::from_bps(bps),
        };
        FinancingSurchargeTable(vec![
            tier(2, 500),
            tier(3, 575),
            tier(6, 700),
            tier(10, 700),
            tier(12, 800),
        ])
    }

    /// Surcharge rate for an installment count; zero for 0 or unknown counts.
    pub fn rate(&self, installments: u32) -> SurchargeRate {
        if installments == 0 {
            return SurchargeRate::zero();
        }
        self.0
            .iter()
            .find(|t| t.installments == installments)
            .map(|t| t.rate_bps)
            .unwrap_or_default()
    }

    /// True for 0 (not financed) or a count with a tier.
    pub fn is_known(&self, installments: u32) -> bool {
        installments == 0 || self.0.iter().any(|t| t.installments == installments)
    }

    /// Tiers in table order.
    pub fn tiers(&self) -> &[SurchargeTier] {
        &self.0
    }
}

impl Default for FinancingSurchargeTable {
    fn default() -> Self {
        FinancingSurchargeTable::standard()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_unit_costs() {
        let catalog = ProductCatalog::standard();
        assert_eq!(catalog.len(), 2);

        let large = catalog.get("Large").unwrap();
        assert_eq!(large.price, Money::from_major(15750));
        assert_eq!(large.unit_cost(), Money::from_major(4833));
        assert_eq!(large.cost_of(CostCategory::Framing), Money::from_major(1990));

        let small = catalog.get("Small").unwrap();
        assert_eq!(small.price, Money::from_major(13125));
        assert_eq!(small.unit_cost(), Money::from_major(3761));
    }

    #[test]
    fn test_catalog_lookup_is_exact() {
        let catalog = ProductCatalog::standard();
        assert!(catalog.get("large").is_none());
        assert!(catalog.get("Large ").is_none());
        assert_eq!(catalog.names().collect::<Vec<_>>(), vec!["Large", "Small"]);
    }

    #[test]
    fn test_surcharge_lookup() {
        let table = FinancingSurchargeTable::standard();
        assert_eq!(table.rate(2).bps(), 500);
        assert_eq!(table.rate(3).bps(), 575);
        assert_eq!(table.rate(6).bps(), 700);
        assert_eq!(table.rate(10).bps(), 700);
        assert_eq!(table.rate(12).bps(), 800);
        assert!(table.rate(0).is_zero());
    }

    /// Unknown counts price as zero surcharge instead of failing.
    /// This may be hiding data-entry mistakes; kept until the studio decides
    /// whether an unknown count should be rejected.
    #[test]
    fn test_unknown_installments_fall_back_to_zero() {
        let table = FinancingSurchargeTable::standard();
        assert!(table.rate(4).is_zero());
        assert!(table.rate(24).is_zero());
        assert!(!table.is_known(4));
        assert!(table.is_known(0));
        assert!(table.is_known(12));
    }

    #[test]
    fn test_cost_of_missing_category_is_zero() {
        let spec = ProductSpec {
            name: "Mini".to_string(),
            dimensions: String::new(),
            price: Money::from_major(100),
            costs: BTreeMap::from([(CostCategory::Paper, Money::from_major(10))]),
        };
        assert_eq!(spec.cost_of(CostCategory::Acrylic), Money::zero());
        assert_eq!(spec.unit_cost(), Money::from_major(10));
    }
}
