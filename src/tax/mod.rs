pub mod bands;
pub mod corporate;
pub mod personal;
pub mod rates;

pub use bands::{amount_to_next_band, apply_bands, marginal_band, total_tax, TaxBand, TaxBreakdown};
pub use corporate::{
    calculate_corporate_tax, classify_size, CompanySize, CorporateDeductions, CorporateTaxInput,
    CorporateTaxResult,
};
pub use personal::{
    aggregate_deductions, calculate_tax, compute_rent_relief, DeductionBreakdown,
    PersonalDeductions, TaxCalculationResult,
};
