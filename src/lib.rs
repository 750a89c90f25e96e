//! Nigerian personal and corporate income tax calculations.
//!
//! The engines in [`tax`] are pure functions over `f64`: every input resolves
//! to a result, with negative or missing figures clamped rather than rejected.

pub mod amount;
pub mod tax;

// Flat public surface for the calculators and published rates.
pub use tax::rates::*;
pub use tax::{
    calculate_corporate_tax, calculate_tax, CompanySize, CorporateDeductions, CorporateTaxInput,
    CorporateTaxResult, PersonalDeductions, TaxBand, TaxBreakdown, TaxCalculationResult,
};
