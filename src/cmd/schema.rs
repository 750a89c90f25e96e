//! Schema command - print expected input formats

use crate::cmd::batch::BATCH_CSV_FIELDS;
use clap::Args;
use ngtax::{CorporateTaxInput, PersonalDeductions};
use schemars::schema_for;

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// Which input to describe
    #[arg(value_enum, default_value = "corporate")]
    format: SchemaFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SchemaFormat {
    /// JSON Schema for personal deductions
    Personal,
    /// JSON Schema for the corporate command input
    Corporate,
    /// CSV columns for the batch command
    BatchCsv,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        match self.format {
            SchemaFormat::Personal => {
                let schema = schema_for!(PersonalDeductions);
                println!("{}", serde_json::to_string_pretty(&schema)?);
            }
            SchemaFormat::Corporate => {
                let schema = schema_for!(CorporateTaxInput);
                println!("{}", serde_json::to_string_pretty(&schema)?);
            }
            SchemaFormat::BatchCsv => print_csv_fields(),
        }
        Ok(())
    }
}

fn print_csv_fields() {
    let header: Vec<&str> = BATCH_CSV_FIELDS.iter().map(|(name, _, _)| *name).collect();

    println!("Batch CSV Input Format");
    println!("======================");
    println!();
    println!("{}", header.join(","));
    println!();
    for (name, required, description) in BATCH_CSV_FIELDS {
        let req = if *required { "required" } else { "optional" };
        println!("{:24} ({:8})  {}", name, req, description);
    }
    println!();
    println!("Amounts are plain numbers in naira, without currency symbols or separators");
}
