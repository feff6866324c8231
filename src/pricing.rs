//! Rental period tiers and billing arithmetic.
//!
//! Everything here is pure: the booking flow feeds it a daily rate and a period label and
//! stores whatever comes back.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

/// Fixed tax rate applied to every subtotal (15%).
pub const TAX_RATE: Decimal = Decimal::from_parts(15, 0, 0, false, 2);

/// Highest daily rate the catalog accepts (£1,000,000).
pub const MAX_COST_PER_DAY: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// One of the four rental-duration tiers offered at the counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RentalPeriod {
    UpTo30Days,
    UpTo90Days,
    UpTo270Days,
    UpTo365Days,
}

impl RentalPeriod {
    pub const ALL: [RentalPeriod; 4] = [
        RentalPeriod::UpTo30Days,
        RentalPeriod::UpTo90Days,
        RentalPeriod::UpTo270Days,
        RentalPeriod::UpTo365Days,
    ];

    /// The label shown in the period selector, e.g. `"1-30 days"`.
    pub fn label(self) -> &'static str {
        match self {
            RentalPeriod::UpTo30Days => "1-30 days",
            RentalPeriod::UpTo90Days => "31-90 days",
            RentalPeriod::UpTo270Days => "91-270 days",
            RentalPeriod::UpTo365Days => "271-365 days",
        }
    }

    /// Parses a selector label. Anything other than the four known labels yields `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL.into_iter().find(|p| p.label() == label)
    }

    /// Billed days: the upper bound of the tier.
    pub fn day_count(self) -> u32 {
        match self {
            RentalPeriod::UpTo30Days => 30,
            RentalPeriod::UpTo90Days => 90,
            RentalPeriod::UpTo270Days => 270,
            RentalPeriod::UpTo365Days => 365,
        }
    }

    /// Credit limit granted for the tier, in pounds.
    pub fn credit_limit(self) -> Decimal {
        match self {
            RentalPeriod::UpTo30Days => Decimal::from(150),
            RentalPeriod::UpTo90Days => Decimal::from(200),
            RentalPeriod::UpTo270Days => Decimal::from(250),
            RentalPeriod::UpTo365Days => Decimal::from(300),
        }
    }

    /// Discount for the tier as a whole percentage (5 means 5%).
    pub fn discount_percent(self) -> Decimal {
        match self {
            RentalPeriod::UpTo30Days => Decimal::from(5),
            RentalPeriod::UpTo90Days => Decimal::from(10),
            RentalPeriod::UpTo270Days => Decimal::from(15),
            RentalPeriod::UpTo365Days => Decimal::from(20),
        }
    }

    pub fn discount_fraction(self) -> Decimal {
        self.discount_percent() / Decimal::ONE_HUNDRED
    }
}

impl Display for RentalPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RentalPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| {
            let known: Vec<&str> = Self::ALL.iter().map(|p| p.label()).collect();
            format!(
                "unknown rental period '{}' (expected one of: {})",
                s,
                known.join(", ")
            )
        })
    }
}

/// The billed amounts for one booking.
///
/// Each amount is rounded to pennies, and `total` is the sum of the rounded `subtotal` and
/// `tax`, so a stored row always satisfies `total == subtotal + tax`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub period: RentalPeriod,
    pub cost_per_day: Decimal,
    pub day_count: u32,
    pub credit_limit: Decimal,
    pub discount_percent: Decimal,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

/// The rate is too large for the billed amounts to be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cost per day {cost_per_day} is too large to price over {period}")]
pub struct PriceOverflow {
    pub cost_per_day: Decimal,
    pub period: RentalPeriod,
}

impl Quote {
    pub fn new(cost_per_day: Decimal, period: RentalPeriod) -> Result<Self, PriceOverflow> {
        let overflow = PriceOverflow {
            cost_per_day,
            period,
        };
        let gross = cost_per_day
            .checked_mul(Decimal::from(period.day_count()))
            .ok_or(overflow)?;
        let discounted = gross
            .checked_mul(Decimal::ONE - period.discount_fraction())
            .ok_or(overflow)?;
        let subtotal = to_pennies(discounted);
        let tax = to_pennies(subtotal.checked_mul(TAX_RATE).ok_or(overflow)?);
        let total = subtotal.checked_add(tax).ok_or(overflow)?;
        Ok(Self {
            period,
            cost_per_day,
            day_count: period.day_count(),
            credit_limit: period.credit_limit(),
            discount_percent: period.discount_percent(),
            subtotal,
            tax,
            total,
        })
    }
}

/// Prices a booking from the raw selector label.
///
/// Unknown labels leave the computed fields unset, which callers see as `Ok(None)`.
pub fn quote(cost_per_day: Decimal, period_label: &str) -> Result<Option<Quote>, PriceOverflow> {
    RentalPeriod::from_label(period_label)
        .map(|period| Quote::new(cost_per_day, period))
        .transpose()
}

/// Rounds to two decimal places, halves away from zero.
pub fn to_pennies(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount as pounds with two decimals, e.g. `£393.30`.
pub fn format_gbp(amount: Decimal) -> String {
    format!("£{:.2}", to_pennies(amount))
}
