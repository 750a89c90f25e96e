//! Corporate command - companies income tax, levy and minimum ETR top-up

use crate::cmd::{format_rate, read_input};
use anyhow::Context;
use clap::Args;
use ngtax::amount::{format_ngn, parse_amount};
use ngtax::{calculate_corporate_tax, CorporateDeductions, CorporateTaxInput, CorporateTaxResult};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct CorporateCommand {
    /// JSON file with the company's figures ("-" for stdin). Flags are used when omitted.
    file: Option<PathBuf>,

    /// Annual turnover
    #[arg(long, value_parser = parse_amount, allow_negative_numbers = true, default_value = "0", conflicts_with = "file")]
    turnover: f64,

    /// Total fixed assets
    #[arg(long, value_parser = parse_amount, allow_negative_numbers = true, default_value = "0", conflicts_with = "file")]
    assets: f64,

    /// Total revenue
    #[arg(long, value_parser = parse_amount, allow_negative_numbers = true, default_value = "0", conflicts_with = "file")]
    revenue: f64,

    /// Allowed expenses
    #[arg(long, value_parser = parse_amount, allow_negative_numbers = true, default_value = "0", conflicts_with = "file")]
    expenses: f64,

    /// Capital allowances
    #[arg(long, value_parser = parse_amount, allow_negative_numbers = true, default_value = "0", conflicts_with = "file")]
    capital_allowances: f64,

    /// Losses carried forward
    #[arg(long, value_parser = parse_amount, allow_negative_numbers = true, default_value = "0", conflicts_with = "file")]
    losses: f64,

    /// Profit before tax
    #[arg(long, value_parser = parse_amount, allow_negative_numbers = true, default_value = "0", conflicts_with = "file")]
    profit: f64,

    /// Other taxes already paid
    #[arg(long, value_parser = parse_amount, allow_negative_numbers = true, default_value = "0", conflicts_with = "file")]
    other_taxes: f64,

    /// Company provides professional services (never classed as small)
    #[arg(long, conflicts_with = "file")]
    professional_services: bool,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

impl CorporateCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let input = match self.file {
            Some(ref path) => {
                let bytes = read_input(path)?;
                serde_json::from_slice::<CorporateTaxInput>(&bytes)
                    .with_context(|| format!("Invalid corporate input in {}", path.display()))?
            }
            None => self.input_from_flags(),
        };
        let result = calculate_corporate_tax(&input);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            print_summary(&input, &result);
        }
        Ok(())
    }

    fn input_from_flags(&self) -> CorporateTaxInput {
        CorporateTaxInput {
            annual_turnover: self.turnover,
            total_fixed_assets: self.assets,
            total_revenue: self.revenue,
            deductions: CorporateDeductions {
                allowed_expenses: self.expenses,
                capital_allowances: self.capital_allowances,
                losses_carried_forward: self.losses,
            },
            profit_before_tax: self.profit,
            other_taxes_paid: self.other_taxes,
            is_professional_services: self.professional_services,
        }
    }
}

fn print_summary(input: &CorporateTaxInput, result: &CorporateTaxResult) {
    println!();
    println!("CORPORATE INCOME TAX ({} company)", result.company_size);
    println!();
    println!("PROFIT");
    println!(
        "  Revenue: {} | Deductions: {}",
        format_ngn(result.total_revenue),
        format_ngn(
            input.deductions.allowed_expenses
                + input.deductions.capital_allowances
                + input.deductions.losses_carried_forward
        )
    );
    println!("  Assessable profit: {}", format_ngn(result.assessable_profit));
    println!("  Profit before tax: {}", format_ngn(input.profit_before_tax));
    println!();
    println!("TAX");
    if result.is_small_company {
        println!("  Small company: exempt from CIT and development levy");
    }
    println!(
        "  CIT: {} | Development levy: {} | Other taxes: {}",
        format_ngn(result.breakdown.cit),
        format_ngn(result.breakdown.dev_levy),
        format_ngn(input.other_taxes_paid)
    );
    println!("  Subtotal: {}", format_ngn(result.subtotal_tax));
    if result.minimum_etr_applies {
        println!(
            "  Minimum ETR top-up: {}",
            format_ngn(result.breakdown.top_up)
        );
    }
    println!();
    println!(
        "TOTAL TAX: {} (effective {})",
        format_ngn(result.total_tax),
        format_rate(result.effective_tax_rate)
    );
    println!("NET PROFIT: {}", format_ngn(result.net_profit));
    println!();
}
