use clap::{Parser, Subcommand};

use crate::cmd::{
    bands::BandsCommand, batch::BatchCommand, corporate::CorporateCommand,
    personal::PersonalCommand, schema::SchemaCommand,
};

mod cmd;

#[derive(Parser, Debug)]
#[command(name = "ngtax", version, author)]
#[command(about = "Calculate Nigerian personal and corporate income tax (Nigeria Tax Act 2026)")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Personal income tax from gross income and deductions
    Personal(PersonalCommand),
    /// Companies income tax, development levy and minimum ETR top-up
    Corporate(CorporateCommand),
    /// Show the personal income tax bands
    Bands(BandsCommand),
    /// Personal income tax for each row of a CSV file
    Batch(BatchCommand),
    /// Print expected input formats
    Schema(SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    log::debug!("{:?}", cli.command);

    match cli.command {
        Command::Personal(cmd) => cmd.exec(),
        Command::Corporate(cmd) => cmd.exec(),
        Command::Bands(cmd) => cmd.exec(),
        Command::Batch(cmd) => cmd.exec(),
        Command::Schema(cmd) => cmd.exec(),
    }
}
