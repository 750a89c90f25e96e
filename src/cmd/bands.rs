//! Bands command - the personal income tax schedule

use crate::cmd::render_table;
use clap::Args;
use ngtax::amount::{format_ngn, parse_amount};
use ngtax::tax::bands::{amount_to_next_band, marginal_band};
use ngtax::tax::rates::PERSONAL_TAX_BANDS;
use tabled::Tabled;

#[derive(Args, Debug)]
pub struct BandsCommand {
    /// Taxable income to locate within the bands
    #[arg(short, long, value_parser = parse_amount)]
    income: Option<f64>,

    /// Output as JSON instead of formatted table
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Tabled)]
struct BandRow {
    #[tabled(rename = "Band")]
    band: String,
    #[tabled(rename = "Rate")]
    rate: String,
    #[tabled(rename = "")]
    marker: String,
}

impl BandsCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(&PERSONAL_TAX_BANDS)?);
            return Ok(());
        }

        let current = self
            .income
            .and_then(|income| marginal_band(income, &PERSONAL_TAX_BANDS));

        let rows: Vec<BandRow> = PERSONAL_TAX_BANDS
            .iter()
            .map(|band| BandRow {
                band: band.description(),
                rate: band.to_string(),
                marker: if current == Some(band) {
                    "<".to_string()
                } else {
                    String::new()
                },
            })
            .collect();

        println!();
        println!("PERSONAL INCOME TAX BANDS (Nigeria Tax Act 2026)");
        println!();
        println!("{}", render_table(&rows));

        if let (Some(income), Some(band)) = (self.income, current) {
            println!();
            println!("Taxable income {} is in the {} band", format_ngn(income), band);
            let to_next = amount_to_next_band(income, &PERSONAL_TAX_BANDS);
            if to_next > 0.0 {
                println!("{} until the next band", format_ngn(to_next));
            } else {
                println!("Already in the top band");
            }
        }
        println!();
        Ok(())
    }
}
