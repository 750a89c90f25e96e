//! Companies income tax, development levy and the minimum effective tax rate

use super::rates::{
    CIT_RATE, DEVELOPMENT_LEVY_RATE, LARGE_COMPANY_TURNOVER_THRESHOLD, MINIMUM_ETR,
    SMALL_COMPANY_ASSETS_LIMIT, SMALL_COMPANY_TURNOVER_LIMIT,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Size classification of a company for tax purposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum CompanySize {
    /// Exempt from CIT and the development levy
    Small,
    Standard,
    /// Subject to the minimum effective tax rate
    Large,
}

impl fmt::Display for CompanySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CompanySize::Small => "small",
            CompanySize::Standard => "standard",
            CompanySize::Large => "large",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CorporateDeductions {
    /// Expenses wholly and exclusively incurred in generating revenue
    pub allowed_expenses: f64,
    pub capital_allowances: f64,
    /// Unrelieved losses brought forward from earlier years
    pub losses_carried_forward: f64,
}

/// Annual figures for a company. Missing fields are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CorporateTaxInput {
    pub annual_turnover: f64,
    pub total_fixed_assets: f64,
    pub total_revenue: f64,
    pub deductions: CorporateDeductions,
    pub profit_before_tax: f64,
    /// Other taxes already paid, counted towards the effective tax rate
    pub other_taxes_paid: f64,
    /// Professional services firms never qualify as small companies
    pub is_professional_services: bool,
}

impl CorporateTaxInput {
    pub fn company_size(&self) -> CompanySize {
        classify_size(
            self.annual_turnover,
            self.total_fixed_assets,
            self.is_professional_services,
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CorporateTaxBreakdown {
    pub cit: f64,
    pub dev_levy: f64,
    pub top_up: f64,
}

/// Complete corporate tax calculation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorporateTaxResult {
    pub company_size: CompanySize,
    pub is_small_company: bool,
    pub is_large_company: bool,
    pub total_revenue: f64,
    pub assessable_profit: f64,
    pub corporate_income_tax: f64,
    pub development_levy: f64,
    /// CIT, development levy and other taxes paid, before any top-up
    pub subtotal_tax: f64,
    /// Total tax (including top-up) over profit before tax
    pub effective_tax_rate: f64,
    pub minimum_etr_applies: bool,
    pub top_up_tax: f64,
    pub total_tax: f64,
    /// Profit before tax less total tax; negative when tax exceeds profit
    pub net_profit: f64,
    pub breakdown: CorporateTaxBreakdown,
}

pub fn classify_size(
    turnover: f64,
    fixed_assets: f64,
    is_professional_services: bool,
) -> CompanySize {
    if turnover <= SMALL_COMPANY_TURNOVER_LIMIT
        && fixed_assets <= SMALL_COMPANY_ASSETS_LIMIT
        && !is_professional_services
    {
        CompanySize::Small
    } else if turnover >= LARGE_COMPANY_TURNOVER_THRESHOLD {
        CompanySize::Large
    } else {
        CompanySize::Standard
    }
}

/// Revenue less allowable deductions, never negative
pub fn compute_assessable_profit(
    revenue: f64,
    allowed_expenses: f64,
    capital_allowances: f64,
    losses_carried_forward: f64,
) -> f64 {
    (revenue - allowed_expenses - capital_allowances - losses_carried_forward).max(0.0)
}

pub fn compute_cit(assessable_profit: f64, is_small: bool) -> f64 {
    if is_small {
        0.0
    } else {
        assessable_profit * CIT_RATE
    }
}

pub fn compute_development_levy(assessable_profit: f64, is_small: bool) -> f64 {
    if is_small {
        0.0
    } else {
        assessable_profit * DEVELOPMENT_LEVY_RATE
    }
}

pub fn compute_etr(total_tax: f64, profit_before_tax: f64) -> f64 {
    if profit_before_tax <= 0.0 {
        return 0.0;
    }
    total_tax / profit_before_tax
}

/// Additional tax that lifts a large company's effective rate to the minimum.
pub fn compute_top_up(current_total_tax: f64, profit_before_tax: f64, is_large: bool) -> f64 {
    if !is_large || profit_before_tax <= 0.0 {
        return 0.0;
    }
    if compute_etr(current_total_tax, profit_before_tax) >= MINIMUM_ETR {
        return 0.0;
    }
    profit_before_tax * MINIMUM_ETR - current_total_tax
}

/// Calculate the full corporate tax position for a year
pub fn calculate_corporate_tax(input: &CorporateTaxInput) -> CorporateTaxResult {
    let company_size = input.company_size();
    let is_small = company_size == CompanySize::Small;
    let is_large = company_size == CompanySize::Large;

    let deductions = &input.deductions;
    let assessable_profit = compute_assessable_profit(
        input.total_revenue,
        deductions.allowed_expenses,
        deductions.capital_allowances,
        deductions.losses_carried_forward,
    );

    let cit = compute_cit(assessable_profit, is_small);
    let dev_levy = compute_development_levy(assessable_profit, is_small);
    let subtotal_tax = cit + dev_levy + input.other_taxes_paid;

    let top_up = compute_top_up(subtotal_tax, input.profit_before_tax, is_large);
    let total_tax = subtotal_tax + top_up;
    let effective_tax_rate = compute_etr(total_tax, input.profit_before_tax);

    log::debug!(
        "corporate: {} company, assessable {} subtotal {} top-up {}",
        company_size,
        assessable_profit,
        subtotal_tax,
        top_up
    );

    CorporateTaxResult {
        company_size,
        is_small_company: is_small,
        is_large_company: is_large,
        total_revenue: input.total_revenue,
        assessable_profit,
        corporate_income_tax: cit,
        development_levy: dev_levy,
        subtotal_tax,
        effective_tax_rate,
        minimum_etr_applies: top_up > 0.0,
        top_up_tax: top_up,
        total_tax,
        net_profit: input.profit_before_tax - total_tax,
        breakdown: CorporateTaxBreakdown {
            cit,
            dev_levy,
            top_up,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {expected}, got {actual}"
        );
    }

    fn large_company() -> CorporateTaxInput {
        CorporateTaxInput {
            annual_turnover: 25_000_000_000.0,
            total_fixed_assets: 5_000_000_000.0,
            ..Default::default()
        }
    }

    #[test]
    fn classify_small_company() {
        assert_eq!(
            classify_size(10_000_000.0, 50_000_000.0, false),
            CompanySize::Small
        );
        assert_eq!(
            classify_size(50_000_000.0, 250_000_000.0, false),
            CompanySize::Small
        );
    }

    #[test]
    fn classify_over_small_limits() {
        assert_eq!(
            classify_size(50_000_001.0, 1_000.0, false),
            CompanySize::Standard
        );
        assert_eq!(
            classify_size(1_000.0, 250_000_001.0, false),
            CompanySize::Standard
        );
    }

    #[test]
    fn professional_services_never_small() {
        assert_eq!(
            classify_size(1_000_000.0, 1_000_000.0, true),
            CompanySize::Standard
        );
    }

    #[test]
    fn classify_large_company() {
        assert_eq!(
            classify_size(20_000_000_000.0, 0.0, false),
            CompanySize::Large
        );
        assert_eq!(
            classify_size(19_999_999_999.0, 0.0, false),
            CompanySize::Standard
        );
        assert_eq!(
            classify_size(30_000_000_000.0, 0.0, true),
            CompanySize::Large
        );
    }

    #[test]
    fn assessable_profit_is_floored() {
        assert_eq!(
            compute_assessable_profit(1_000.0, 400.0, 100.0, 50.0),
            450.0
        );
        assert_eq!(compute_assessable_profit(1_000.0, 2_000.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn small_company_pays_no_cit_or_levy() {
        assert_eq!(compute_cit(1_000_000.0, true), 0.0);
        assert_eq!(compute_development_levy(1_000_000.0, true), 0.0);
        assert_close(compute_cit(1_000_000.0, false), 300_000.0);
        assert_close(compute_development_levy(1_000_000.0, false), 40_000.0);
    }

    #[test]
    fn etr_with_no_profit_is_zero() {
        assert_eq!(compute_etr(1_000.0, 0.0), 0.0);
        assert_eq!(compute_etr(1_000.0, -10.0), 0.0);
        assert_eq!(compute_etr(25.0, 100.0), 0.25);
    }

    #[test]
    fn top_up_only_for_large_companies() {
        assert_eq!(compute_top_up(0.0, 1_000_000.0, false), 0.0);
        assert_eq!(compute_top_up(0.0, 0.0, true), 0.0);
        assert_eq!(compute_top_up(0.0, -1_000.0, true), 0.0);
        assert_eq!(compute_top_up(200_000.0, 1_000_000.0, true), 0.0);
        assert_eq!(compute_top_up(150_000.0, 1_000_000.0, true), 0.0);
        assert_close(compute_top_up(100_000.0, 1_000_000.0, true), 50_000.0);
    }

    #[test]
    fn small_company_calculation() {
        let input = CorporateTaxInput {
            annual_turnover: 10_000_000.0,
            total_fixed_assets: 50_000_000.0,
            total_revenue: 10_000_000.0,
            profit_before_tax: 4_000_000.0,
            ..Default::default()
        };
        let result = calculate_corporate_tax(&input);

        assert_eq!(result.company_size, CompanySize::Small);
        assert!(result.is_small_company);
        assert!(!result.is_large_company);
        assert_eq!(result.assessable_profit, 10_000_000.0);
        assert_eq!(result.corporate_income_tax, 0.0);
        assert_eq!(result.development_levy, 0.0);
        assert_eq!(result.total_tax, 0.0);
        assert_eq!(result.net_profit, 4_000_000.0);
    }

    #[test]
    fn standard_company_calculation() {
        let input = CorporateTaxInput {
            annual_turnover: 500_000_000.0,
            total_fixed_assets: 300_000_000.0,
            total_revenue: 500_000_000.0,
            deductions: CorporateDeductions {
                allowed_expenses: 300_000_000.0,
                capital_allowances: 50_000_000.0,
                losses_carried_forward: 50_000_000.0,
            },
            profit_before_tax: 120_000_000.0,
            other_taxes_paid: 1_000_000.0,
            is_professional_services: false,
        };
        let result = calculate_corporate_tax(&input);

        assert_eq!(result.company_size, CompanySize::Standard);
        assert_eq!(result.assessable_profit, 100_000_000.0);
        assert_close(result.corporate_income_tax, 30_000_000.0);
        assert_close(result.development_levy, 4_000_000.0);
        assert_close(result.subtotal_tax, 35_000_000.0);
        assert_eq!(result.top_up_tax, 0.0);
        assert!(!result.minimum_etr_applies);
        assert_close(result.total_tax, 35_000_000.0);
        assert_close(result.effective_tax_rate, 35.0 / 120.0);
        assert_close(result.net_profit, 85_000_000.0);
    }

    #[test]
    fn standard_company_below_minimum_etr_has_no_top_up() {
        let input = CorporateTaxInput {
            annual_turnover: 1_000_000_000.0,
            total_fixed_assets: 1_000_000_000.0,
            total_revenue: 10_000_000.0,
            profit_before_tax: 500_000_000.0,
            ..Default::default()
        };
        let result = calculate_corporate_tax(&input);
        assert_eq!(result.company_size, CompanySize::Standard);
        assert!(result.effective_tax_rate < MINIMUM_ETR);
        assert_eq!(result.top_up_tax, 0.0);
    }

    #[test]
    fn large_company_top_up() {
        let input = CorporateTaxInput {
            profit_before_tax: 1_000_000_000.0,
            other_taxes_paid: 100_000_000.0,
            ..large_company()
        };
        let result = calculate_corporate_tax(&input);

        assert_eq!(result.company_size, CompanySize::Large);
        assert_eq!(result.subtotal_tax, 100_000_000.0);
        assert!(result.minimum_etr_applies);
        assert_eq!(result.top_up_tax, 50_000_000.0);
        assert_eq!(result.total_tax, 150_000_000.0);
        assert_eq!(result.effective_tax_rate, 0.15);
        assert_eq!(result.net_profit, 850_000_000.0);
        assert_eq!(
            result.breakdown,
            CorporateTaxBreakdown {
                cit: 0.0,
                dev_levy: 0.0,
                top_up: 50_000_000.0,
            }
        );
    }

    #[test]
    fn large_company_top_up_with_cit_and_levy() {
        // 75m CIT + 10m levy + 15m other taxes = 100m, 10% of 1bn
        let input = CorporateTaxInput {
            total_revenue: 250_000_000.0,
            profit_before_tax: 1_000_000_000.0,
            other_taxes_paid: 15_000_000.0,
            ..large_company()
        };
        let result = calculate_corporate_tax(&input);

        assert_close(result.corporate_income_tax, 75_000_000.0);
        assert_close(result.development_levy, 10_000_000.0);
        assert_close(result.subtotal_tax, 100_000_000.0);
        assert_close(result.top_up_tax, 50_000_000.0);
        assert_close(result.total_tax, 150_000_000.0);
        assert_close(result.effective_tax_rate, 0.15);
    }

    #[test]
    fn large_company_above_minimum_etr() {
        let input = CorporateTaxInput {
            total_revenue: 1_000_000_000.0,
            profit_before_tax: 1_000_000_000.0,
            ..large_company()
        };
        let result = calculate_corporate_tax(&input);
        assert!(!result.minimum_etr_applies);
        assert_eq!(result.top_up_tax, 0.0);
        assert_close(result.effective_tax_rate, 0.34);
    }

    #[test]
    fn net_profit_can_be_negative() {
        let input = CorporateTaxInput {
            annual_turnover: 100_000_000.0,
            total_fixed_assets: 10_000_000.0,
            total_revenue: 100_000_000.0,
            profit_before_tax: 10_000_000.0,
            ..Default::default()
        };
        let result = calculate_corporate_tax(&input);
        assert_close(result.total_tax, 34_000_000.0);
        assert_close(result.net_profit, -24_000_000.0);
    }

    #[test]
    fn all_zero_input() {
        let result = calculate_corporate_tax(&CorporateTaxInput::default());
        assert_eq!(result.company_size, CompanySize::Small);
        assert_eq!(result.total_tax, 0.0);
        assert_eq!(result.effective_tax_rate, 0.0);
        assert_eq!(result.net_profit, 0.0);
    }

    #[test]
    fn input_deserializes_with_missing_fields() {
        let input: CorporateTaxInput = serde_json::from_str(
            r#"{
                "annual_turnover": 1000000,
                "deductions": { "allowed_expenses": 500 },
                "is_professional_services": true
            }"#,
        )
        .unwrap();
        assert_eq!(input.annual_turnover, 1_000_000.0);
        assert_eq!(input.deductions.allowed_expenses, 500.0);
        assert_eq!(input.deductions.capital_allowances, 0.0);
        assert!(input.is_professional_services);
        assert_eq!(input.company_size(), CompanySize::Standard);
    }

    #[test]
    fn company_size_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&CompanySize::Large).unwrap(),
            r#""large""#
        );
        assert_eq!(CompanySize::Standard.to_string(), "standard");
    }

    proptest! {
        #[test]
        fn small_companies_pay_no_cit(
            turnover in 0.0f64..=50_000_000.0,
            assets in 0.0f64..=250_000_000.0,
            revenue in 0.0f64..1_000_000_000.0,
            profit in -1_000_000.0f64..1_000_000_000.0,
        ) {
            let input = CorporateTaxInput {
                annual_turnover: turnover,
                total_fixed_assets: assets,
                total_revenue: revenue,
                profit_before_tax: profit,
                ..Default::default()
            };
            let result = calculate_corporate_tax(&input);
            prop_assert!(result.is_small_company);
            prop_assert_eq!(result.corporate_income_tax, 0.0);
            prop_assert_eq!(result.development_levy, 0.0);
            prop_assert_eq!(result.top_up_tax, 0.0);
        }

        #[test]
        fn large_companies_meet_minimum_etr(
            revenue in 0.0f64..10_000_000_000.0,
            profit in 1.0f64..10_000_000_000.0,
        ) {
            let input = CorporateTaxInput {
                total_revenue: revenue,
                profit_before_tax: profit,
                ..large_company()
            };
            let result = calculate_corporate_tax(&input);
            prop_assert!(result.effective_tax_rate >= MINIMUM_ETR - 1e-9);
            prop_assert!(result.top_up_tax >= 0.0);
        }
    }
}
