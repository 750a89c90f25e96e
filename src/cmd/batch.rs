//! Batch command - personal income tax for every row of a CSV file

use crate::cmd::{format_rate, read_input, render_table};
use anyhow::Context;
use clap::Args;
use ngtax::amount::{format_ngn, parse_amount};
use ngtax::{calculate_tax, PersonalDeductions, TaxCalculationResult};
use serde::{Deserialize, Deserializer, Serialize};
use std::io;
use std::path::PathBuf;
use tabled::Tabled;

#[derive(Args, Debug)]
pub struct BatchCommand {
    /// CSV file of incomes and deductions. Reads from stdin if not specified.
    #[arg(default_value = "-")]
    file: PathBuf,

    /// Output as CSV instead of formatted table
    #[arg(long)]
    csv: bool,
}

/// One input row. Deduction columns may be omitted or left empty.
#[derive(Debug, Deserialize)]
pub struct BatchRow {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(deserialize_with = "amount")]
    pub gross_income: f64,
    #[serde(default, deserialize_with = "optional_amount")]
    pub annual_rent: Option<f64>,
    #[serde(default, deserialize_with = "optional_amount")]
    pub pension_contributions: Option<f64>,
    #[serde(default, deserialize_with = "optional_amount")]
    pub nhf_contributions: Option<f64>,
    #[serde(default, deserialize_with = "optional_amount")]
    pub nhis_contributions: Option<f64>,
    #[serde(default, deserialize_with = "optional_amount")]
    pub life_insurance: Option<f64>,
    #[serde(default, deserialize_with = "optional_amount")]
    pub mortgage_interest: Option<f64>,
}

fn amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_amount(&raw).map_err(serde::de::Error::custom)
}

fn optional_amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => parse_amount(&raw)
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

impl BatchRow {
    fn deductions(&self) -> PersonalDeductions {
        PersonalDeductions {
            annual_rent: self.annual_rent.unwrap_or_default(),
            pension_contributions: self.pension_contributions.unwrap_or_default(),
            nhf_contributions: self.nhf_contributions.unwrap_or_default(),
            nhis_contributions: self.nhis_contributions.unwrap_or_default(),
            life_insurance: self.life_insurance.unwrap_or_default(),
            mortgage_interest: self.mortgage_interest.unwrap_or_default(),
        }
    }
}

/// Columns of the batch CSV input: (name, required, description)
pub const BATCH_CSV_FIELDS: &[(&str, bool, &str)] = &[
    ("id", false, "Identifier echoed back in the output"),
    ("gross_income", true, "Annual gross income"),
    ("annual_rent", false, "Annual rent paid"),
    ("pension_contributions", false, "Pension contributions"),
    ("nhf_contributions", false, "National Housing Fund contributions"),
    ("nhis_contributions", false, "National Health Insurance Scheme contributions"),
    ("life_insurance", false, "Life insurance premiums"),
    ("mortgage_interest", false, "Mortgage interest paid"),
];

/// Output record for both table and CSV output
#[derive(Debug, Tabled, Serialize)]
struct BatchRecord {
    #[tabled(rename = "#")]
    row_num: usize,
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Gross")]
    gross_income: String,
    #[tabled(rename = "Deductions")]
    total_deductions: String,
    #[tabled(rename = "Taxable")]
    taxable_income: String,
    #[tabled(rename = "Tax")]
    total_tax: String,
    #[tabled(rename = "Effective")]
    effective_rate: String,
    #[tabled(rename = "Net")]
    net_income: String,
}

impl BatchCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let bytes = read_input(&self.file)?;
        let rows = read_rows(&bytes[..])?;
        log::info!("calculating tax for {} rows", rows.len());

        let results: Vec<(BatchRow, TaxCalculationResult)> = rows
            .into_iter()
            .map(|row| {
                let result = calculate_tax(row.gross_income, &row.deductions());
                (row, result)
            })
            .collect();

        if self.csv {
            write_csv(&results, io::stdout())
        } else {
            print_table(&results);
            Ok(())
        }
    }
}

pub fn read_rows<R: io::Read>(reader: R) -> anyhow::Result<Vec<BatchRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    rdr.deserialize::<BatchRow>()
        .enumerate()
        .map(|(i, row)| row.with_context(|| format!("Invalid row {}", i + 1)))
        .collect()
}

fn print_table(results: &[(BatchRow, TaxCalculationResult)]) {
    if results.is_empty() {
        println!("No rows found");
        return;
    }

    let records: Vec<BatchRecord> = results
        .iter()
        .enumerate()
        .map(|(i, (row, result))| BatchRecord {
            row_num: i + 1,
            id: row.id.clone().unwrap_or_default(),
            gross_income: format_ngn(result.gross_income),
            total_deductions: format_ngn(result.total_deductions),
            taxable_income: format_ngn(result.taxable_income),
            total_tax: format_ngn(result.total_tax),
            effective_rate: format_rate(result.effective_rate),
            net_income: format_ngn(result.net_income),
        })
        .collect();

    println!("{}", render_table(&records));

    let total_tax: f64 = results.iter().map(|(_, r)| r.total_tax).sum();
    println!();
    println!("TOTAL TAX ({} rows): {}", results.len(), format_ngn(total_tax));
}

fn write_csv<W: io::Write>(
    results: &[(BatchRow, TaxCalculationResult)],
    writer: W,
) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for (i, (row, result)) in results.iter().enumerate() {
        wtr.serialize(BatchRecord {
            row_num: i + 1,
            id: row.id.clone().unwrap_or_default(),
            gross_income: format!("{:.2}", result.gross_income),
            total_deductions: format!("{:.2}", result.total_deductions),
            taxable_income: format!("{:.2}", result.taxable_income),
            total_tax: format!("{:.2}", result.total_tax),
            effective_rate: format!("{:.6}", result.effective_rate),
            net_income: format!("{:.2}", result.net_income),
        })?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_rows_with_optional_columns() {
        let data = "id,gross_income,annual_rent\na,940000,\nb,940000,200000\n";
        let rows = read_rows(data.as_bytes()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id.as_deref(), Some("a"));
        assert_eq!(rows[0].deductions(), PersonalDeductions::default());
        assert_eq!(rows[1].deductions().annual_rent, 200_000.0);
    }

    #[test]
    fn reads_rows_without_deduction_columns() {
        let data = "gross_income\n800000\n800001\n";
        let rows = read_rows(data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows[1].id.is_none());
        assert_eq!(rows[1].gross_income, 800_001.0);
    }

    #[test]
    fn invalid_row_names_the_row() {
        let data = "gross_income\n940000\nlots\n";
        let err = read_rows(data.as_bytes()).unwrap_err();
        assert_eq!(err.to_string(), "Invalid row 2");
    }

    #[test]
    fn non_finite_amounts_are_rejected() {
        let err = read_rows("gross_income\n940000\nNaN\n".as_bytes()).unwrap_err();
        assert_eq!(err.to_string(), "Invalid row 2");
        assert!(format!("{:#}", err).contains("amount must be a finite number"));

        let err = read_rows("gross_income,annual_rent\n940000,inf\n".as_bytes()).unwrap_err();
        assert_eq!(err.to_string(), "Invalid row 1");
    }

    #[test]
    fn amounts_may_be_currency_formatted() {
        let data = "gross_income,annual_rent\n\"₦940,000\",NGN 200000\n";
        let rows = read_rows(data.as_bytes()).unwrap();
        assert_eq!(rows[0].gross_income, 940_000.0);
        assert_eq!(rows[0].annual_rent, Some(200_000.0));
    }

    #[test]
    fn csv_output_has_results() {
        let rows = read_rows("id,gross_income\nx,940000\n".as_bytes()).unwrap();
        let results: Vec<_> = rows
            .into_iter()
            .map(|row| {
                let result = calculate_tax(row.gross_income, &row.deductions());
                (row, result)
            })
            .collect();

        let mut out = Vec::new();
        write_csv(&results, &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();

        let mut lines = out.lines();
        assert_eq!(
            lines.next(),
            Some("row_num,id,gross_income,total_deductions,taxable_income,total_tax,effective_rate,net_income")
        );
        assert_eq!(
            lines.next(),
            Some("1,x,940000.00,0.00,940000.00,21000.00,0.022340,919000.00")
        );
    }

    #[test]
    fn documented_columns_match_row_fields() {
        let header: Vec<&str> = BATCH_CSV_FIELDS.iter().map(|(name, _, _)| *name).collect();
        let data = format!("{}\nx,1,2,3,4,5,6,7\n", header.join(","));
        let rows = read_rows(data.as_bytes()).unwrap();
        assert_eq!(rows[0].mortgage_interest, Some(7.0));
    }
}
