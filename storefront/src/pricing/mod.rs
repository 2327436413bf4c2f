//! Price Calculator
//!
//! Derives the checkout breakdown (subtotal, tax, delivery fee, grand
//! total) from a cart subtotal. All arithmetic stays in `Decimal`;
//! rounding to 2 decimal places happens only at the presentation boundary
//! via [`PriceBreakdown::rounded`], so the displayed subtotal, tax and
//! total always add up.

use rust_decimal::prelude::*;
use serde::Serialize;

/// Rounding for monetary display values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Pricing constants
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | TAX_RATE | 0.085 | 税率（小数） |
/// | DELIVERY_FEE | 2.99 | 配送费 |
#[derive(Debug, Clone, PartialEq)]
pub struct PricingConfig {
    /// Tax rate as a fraction of the subtotal
    pub tax_rate: Decimal,
    /// Flat delivery fee in currency units
    pub delivery_fee: Decimal,
}

impl PricingConfig {
    /// Load pricing constants from the environment, falling back to the
    /// defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            tax_rate: std::env::var("TAX_RATE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.tax_rate),
            delivery_fee: std::env::var("DELIVERY_FEE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.delivery_fee),
        }
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            // 8.5% tax, flat 2.99 delivery
            tax_rate: Decimal::new(85, 3),
            delivery_fee: Decimal::new(299, 2),
        }
    }
}

/// Full price breakdown for a cart subtotal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceBreakdown {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub delivery_fee: Decimal,
    pub grand_total: Decimal,
}

impl PriceBreakdown {
    /// Presentation-boundary rounding. Exact values stay internal; this is
    /// the only place display rounding is applied.
    pub fn rounded(&self) -> PriceBreakdown {
        PriceBreakdown {
            subtotal: round_money(self.subtotal),
            tax: round_money(self.tax),
            delivery_fee: round_money(self.delivery_fee),
            grand_total: round_money(self.grand_total),
        }
    }
}

#[inline]
fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Compute the breakdown for a cart subtotal
///
/// `subtotal` is passed through unchanged; tax is `subtotal * tax_rate`;
/// the grand total is their sum plus the flat delivery fee. No
/// intermediate rounding.
pub fn price_breakdown(subtotal: Decimal, config: &PricingConfig) -> PriceBreakdown {
    let tax = subtotal * config.tax_rate;
    let grand_total = subtotal + tax + config.delivery_fee;
    PriceBreakdown {
        subtotal,
        tax,
        delivery_fee: config.delivery_fee,
        grand_total,
    }
}
