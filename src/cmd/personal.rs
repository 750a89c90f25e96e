//! Personal command - income tax for an individual

use crate::cmd::{format_rate, render_table};
use clap::Args;
use ngtax::amount::{format_ngn, parse_amount};
use ngtax::{calculate_tax, PersonalDeductions, TaxCalculationResult};
use tabled::Tabled;

#[derive(Args, Debug)]
pub struct PersonalCommand {
    /// Annual gross income (e.g. 940000 or "₦940,000")
    #[arg(short, long, value_parser = parse_amount, allow_negative_numbers = true)]
    income: f64,

    /// Annual rent paid (20% relief, capped at ₦500,000)
    #[arg(long, value_parser = parse_amount, allow_negative_numbers = true, default_value = "0")]
    rent: f64,

    /// Pension contributions
    #[arg(long, value_parser = parse_amount, allow_negative_numbers = true, default_value = "0")]
    pension: f64,

    /// National Housing Fund contributions
    #[arg(long, value_parser = parse_amount, allow_negative_numbers = true, default_value = "0")]
    nhf: f64,

    /// National Health Insurance Scheme contributions
    #[arg(long, value_parser = parse_amount, allow_negative_numbers = true, default_value = "0")]
    nhis: f64,

    /// Life insurance premiums
    #[arg(long, value_parser = parse_amount, allow_negative_numbers = true, default_value = "0")]
    insurance: f64,

    /// Mortgage interest paid
    #[arg(long, value_parser = parse_amount, allow_negative_numbers = true, default_value = "0")]
    mortgage: f64,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Tabled)]
struct BreakdownRow {
    #[tabled(rename = "Band")]
    band: String,
    #[tabled(rename = "Rate")]
    rate: String,
    #[tabled(rename = "Taxable")]
    taxable: String,
    #[tabled(rename = "Tax")]
    tax: String,
}

impl PersonalCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let deductions = PersonalDeductions {
            annual_rent: self.rent,
            pension_contributions: self.pension,
            nhf_contributions: self.nhf,
            nhis_contributions: self.nhis,
            life_insurance: self.insurance,
            mortgage_interest: self.mortgage,
        };
        let result = calculate_tax(self.income, &deductions);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            print_summary(&result);
        }
        Ok(())
    }
}

fn print_summary(result: &TaxCalculationResult) {
    let deductions = &result.deduction_breakdown;

    println!();
    println!("PERSONAL INCOME TAX (Nigeria Tax Act 2026)");
    println!();
    println!("INCOME");
    println!("  Gross: {}", format_ngn(result.gross_income));
    println!();
    println!("DEDUCTIONS");
    println!(
        "  Rent relief: {} | Pension: {} | NHF: {}",
        format_ngn(deductions.rent_relief),
        format_ngn(deductions.pension),
        format_ngn(deductions.nhf)
    );
    println!(
        "  NHIS: {} | Insurance: {} | Mortgage: {}",
        format_ngn(deductions.nhis),
        format_ngn(deductions.insurance),
        format_ngn(deductions.mortgage)
    );
    println!("  Total: {}", format_ngn(result.total_deductions));
    println!();
    println!("TAXABLE INCOME: {}", format_ngn(result.taxable_income));
    println!();

    if result.tax_breakdown.is_empty() {
        println!("No taxable income");
    } else {
        let rows: Vec<BreakdownRow> = result
            .tax_breakdown
            .iter()
            .map(|b| BreakdownRow {
                band: b.band.description(),
                rate: b.band.to_string(),
                taxable: format_ngn(b.taxable_in_band),
                tax: format_ngn(b.tax_amount),
            })
            .collect();
        println!("{}", render_table(&rows));
    }
    println!();

    println!(
        "TOTAL TAX: {} (effective {})",
        format_ngn(result.total_tax),
        format_rate(result.effective_rate)
    );
    println!("NET INCOME: {}", format_ngn(result.net_income));

    if let Some(band) = result.marginal_band() {
        let to_next = result.amount_to_next_band();
        if to_next > 0.0 {
            println!(
                "Marginal rate: {} ({} until the next band)",
                band,
                format_ngn(to_next)
            );
        } else {
            println!("Marginal rate: {} (top band)", band);
        }
    }
    println!();
}
