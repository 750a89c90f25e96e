//! Personal income tax

use super::bands::{amount_to_next_band, apply_bands, marginal_band, total_tax, TaxBand, TaxBreakdown};
use super::rates::{MAX_RENT_RELIEF, PERSONAL_TAX_BANDS, RENT_RELIEF_PERCENTAGE};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Annual deductions claimed by an individual. Missing fields are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PersonalDeductions {
    /// Rent paid over the year (20% qualifies for relief, capped at 500,000)
    pub annual_rent: f64,
    /// Contributions to an approved pension scheme
    pub pension_contributions: f64,
    /// National Housing Fund contributions
    pub nhf_contributions: f64,
    /// National Health Insurance Scheme contributions
    pub nhis_contributions: f64,
    /// Life insurance premiums
    pub life_insurance: f64,
    /// Interest paid on a mortgage for an owner-occupied home
    pub mortgage_interest: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DeductionBreakdown {
    pub rent_relief: f64,
    pub pension: f64,
    pub nhf: f64,
    pub nhis: f64,
    pub insurance: f64,
    pub mortgage: f64,
    pub total: f64,
}

/// Complete personal income tax calculation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaxCalculationResult {
    pub gross_income: f64,
    pub total_deductions: f64,
    pub deduction_breakdown: DeductionBreakdown,
    /// Gross income less deductions, never negative
    pub taxable_income: f64,
    pub tax_breakdown: Vec<TaxBreakdown>,
    pub total_tax: f64,
    pub effective_rate: f64,
    pub net_income: f64,
}

impl TaxCalculationResult {
    /// The band taxable income falls in
    pub fn marginal_band(&self) -> Option<&TaxBand> {
        marginal_band(self.taxable_income, &PERSONAL_TAX_BANDS)
    }

    /// Additional taxable income before the next band starts
    pub fn amount_to_next_band(&self) -> f64 {
        amount_to_next_band(self.taxable_income, &PERSONAL_TAX_BANDS)
    }
}

/// 20% of annual rent, capped at 500,000. Negative rent yields no relief.
pub fn compute_rent_relief(annual_rent: f64) -> f64 {
    (annual_rent.max(0.0) * RENT_RELIEF_PERCENTAGE).min(MAX_RENT_RELIEF)
}

pub fn aggregate_deductions(deductions: &PersonalDeductions) -> DeductionBreakdown {
    let rent_relief = compute_rent_relief(deductions.annual_rent);
    let pension = deductions.pension_contributions;
    let nhf = deductions.nhf_contributions;
    let nhis = deductions.nhis_contributions;
    let insurance = deductions.life_insurance;
    let mortgage = deductions.mortgage_interest;

    DeductionBreakdown {
        rent_relief,
        pension,
        nhf,
        nhis,
        insurance,
        mortgage,
        total: rent_relief + pension + nhf + nhis + insurance + mortgage,
    }
}

/// Total tax as a share of gross income, zero when there is no income
pub fn effective_rate(total_tax: f64, gross_income: f64) -> f64 {
    if gross_income <= 0.0 {
        return 0.0;
    }
    total_tax / gross_income
}

/// Calculate personal income tax on a year's gross income
pub fn calculate_tax(gross_income: f64, deductions: &PersonalDeductions) -> TaxCalculationResult {
    let deduction_breakdown = aggregate_deductions(deductions);
    let total_deductions = deduction_breakdown.total;
    let taxable_income = (gross_income - total_deductions).max(0.0);

    let tax_breakdown = apply_bands(taxable_income, &PERSONAL_TAX_BANDS);
    let total_tax = total_tax(&tax_breakdown);
    let effective_rate = effective_rate(total_tax, gross_income);

    log::debug!(
        "personal: gross {} deductions {} taxable {} tax {}",
        gross_income,
        total_deductions,
        taxable_income,
        total_tax
    );

    TaxCalculationResult {
        gross_income,
        total_deductions,
        deduction_breakdown,
        taxable_income,
        tax_breakdown,
        total_tax,
        effective_rate,
        net_income: gross_income - total_tax,
    }
}
