//! Statutory rates and thresholds under the Nigeria Tax Act (effective 1 January 2026).

use super::bands::TaxBand;

/// Personal income tax bands, ascending. The last band is unbounded.
pub const PERSONAL_TAX_BANDS: [TaxBand; 6] = [
    TaxBand::new(0.0, 800_000.0, 0.0),
    TaxBand::new(800_001.0, 3_000_000.0, 0.15),
    TaxBand::new(3_000_001.0, 12_000_000.0, 0.18),
    TaxBand::new(12_000_001.0, 25_000_000.0, 0.21),
    TaxBand::new(25_000_001.0, 50_000_000.0, 0.23),
    TaxBand::new(50_000_001.0, f64::INFINITY, 0.25),
];

/// Cap on rent relief
pub const MAX_RENT_RELIEF: f64 = 500_000.0;

/// Share of annual rent that qualifies for relief
pub const RENT_RELIEF_PERCENTAGE: f64 = 0.20;

/// Companies income tax rate
pub const CIT_RATE: f64 = 0.30;

/// Development levy on assessable profit
pub const DEVELOPMENT_LEVY_RATE: f64 = 0.04;

/// Minimum effective tax rate for large companies
pub const MINIMUM_ETR: f64 = 0.15;

pub const SMALL_COMPANY_TURNOVER_LIMIT: f64 = 50_000_000.0;
pub const SMALL_COMPANY_ASSETS_LIMIT: f64 = 250_000_000.0;
pub const LARGE_COMPANY_TURNOVER_THRESHOLD: f64 = 20_000_000_000.0;
