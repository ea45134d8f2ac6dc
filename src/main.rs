use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use xconv::cli::convert::{ConvertRequest, SupportedCurrency, describe_failure, list_currencies};
use xconv::cli::ui::{StyleType, style_text};
use xconv::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// List the supported currencies
    Currencies,
    /// Convert an amount between two currencies
    Convert {
        /// Amount to convert, must be greater than 0
        #[arg(allow_negative_numbers = true)]
        amount: f64,
        /// Currency to convert from
        #[arg(value_enum, ignore_case = true)]
        from: SupportedCurrency,
        /// Currency to convert to
        #[arg(value_enum, ignore_case = true)]
        to: SupportedCurrency,
        /// Swap the source and target currencies
        #[arg(short, long)]
        swap: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => xconv::cli::setup::setup(),
        Some(Commands::Currencies) => {
            println!("{}", style_text("Supported currencies", StyleType::Title));
            for line in list_currencies() {
                println!("  {line}");
            }
            Ok(())
        }
        Some(Commands::Convert {
            amount,
            from,
            to,
            swap,
        }) => {
            let request = ConvertRequest {
                amount,
                from: from.code().to_string(),
                to: to.code().to_string(),
                swap,
            };
            xconv::run_command(xconv::AppCommand::Convert(request), cli.config_path.as_deref())
                .await
        }
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
        eprintln!("{}", style_text(&describe_failure(e), StyleType::Error));
        std::process::exit(1);
    }
    Ok(())
}
