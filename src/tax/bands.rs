use crate::amount::format_amount;
use serde::{Serialize, Serializer};
use std::fmt;

/// A contiguous income range taxed at a single rate.
///
/// Bands are inclusive integer ranges: a band ending at 800,000 is followed by
/// one starting at 800,001. The top band of a schedule has `max = f64::INFINITY`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TaxBand {
    pub min: f64,
    /// Written as `null` when unbounded
    #[serde(serialize_with = "serialize_band_max")]
    pub max: f64,
    pub rate: f64,
}

impl TaxBand {
    pub const fn new(min: f64, max: f64, rate: f64) -> Self {
        TaxBand { min, max, rate }
    }

    pub fn is_unbounded(&self) -> bool {
        self.max == f64::INFINITY
    }

    /// Amount of income this band can absorb.
    ///
    /// A band starting at zero holds `max` units; every later band holds
    /// `max - min + 1`. The unbounded band absorbs whatever remains.
    pub fn width(&self) -> f64 {
        if self.is_unbounded() {
            f64::INFINITY
        } else {
            self.max - (self.min - 1.0).max(0.0)
        }
    }

    /// Human readable range, e.g. "800,001 - 3,000,000" or "Above 50,000,001"
    pub fn description(&self) -> String {
        if self.is_unbounded() {
            format!("Above {}", format_amount(self.min, 0))
        } else {
            format!(
                "{} - {}",
                format_amount(self.min, 0),
                format_amount(self.max, 0)
            )
        }
    }
}

impl fmt::Display for TaxBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}%", self.rate * 100.0)
    }
}

fn serialize_band_max<S: Serializer>(max: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if max.is_finite() {
        serializer.serialize_some(max)
    } else {
        serializer.serialize_none()
    }
}

/// Tax charged within a single band
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaxBreakdown {
    pub band: TaxBand,
    pub taxable_in_band: f64,
    pub tax_amount: f64,
}

/// Spread taxable income across the bands in ascending order.
///
/// Only bands that actually receive income appear in the result.
pub fn apply_bands(taxable_income: f64, bands: &[TaxBand]) -> Vec<TaxBreakdown> {
    let mut breakdown = Vec::with_capacity(bands.len());
    let mut remaining = taxable_income;

    for band in bands {
        if remaining <= 0.0 {
            break;
        }

        let taxable_in_band = remaining.min(band.width());
        let tax_amount = taxable_in_band * band.rate;
        log::trace!(
            "band {} ({}): {} taxable, {} tax",
            band.description(),
            band,
            taxable_in_band,
            tax_amount
        );

        breakdown.push(TaxBreakdown {
            band: *band,
            taxable_in_band,
            tax_amount,
        });
        remaining -= taxable_in_band;
    }

    breakdown
}

pub fn total_tax(breakdown: &[TaxBreakdown]) -> f64 {
    breakdown.iter().map(|b| b.tax_amount).sum()
}

/// The highest band whose lower bound has been reached.
///
/// Falls back to the first band, `None` only for an empty schedule.
pub fn marginal_band(taxable_income: f64, bands: &[TaxBand]) -> Option<&TaxBand> {
    bands
        .iter()
        .rev()
        .find(|b| taxable_income >= b.min)
        .or_else(|| bands.first())
}

/// Additional income needed to reach the next band, zero once in the top band.
pub fn amount_to_next_band(taxable_income: f64, bands: &[TaxBand]) -> f64 {
    match marginal_band(taxable_income, bands) {
        Some(band) if !band.is_unbounded() => band.max - taxable_income + 1.0,
        _ => 0.0,
    }
}
