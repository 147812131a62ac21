use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use marketplace_sdk::models::{LeadSubmission, SupplierSearchParams, UserAnswers};
use marketplace_sdk::{ApiResponse, ClientBuilder, DataClient, DataClientConfig};

#[derive(Parser, Debug)]
#[command(
    name = "data-probe",
    about = "Run one marketplace data operation and print the resulting envelope",
    version
)]
pub(crate) struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Default)]
struct ConnectionArgs {
    /// Override the configured API base URL
    #[arg(long, global = true)]
    base_url: Option<String>,
    /// Override the configured request timeout, in milliseconds
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Company search and lookup
    Companies {
        #[command(subcommand)]
        command: CompaniesCommand,
    },
    /// Postal codes, cities and countries
    Locations {
        #[command(subcommand)]
        command: LocationsCommand,
    },
    /// Questionnaire steps
    Questions {
        /// Fetch a single question instead of the whole list
        #[arg(long)]
        id: Option<u32>,
    },
    /// Supplier listing, matching and search
    Suppliers {
        #[command(subcommand)]
        command: SuppliersCommand,
    },
    /// Lead submission and lookup
    Leads {
        #[command(subcommand)]
        command: LeadsCommand,
    },
    /// Search criteria lists
    Criteria {
        #[command(subcommand)]
        command: CriteriaCommand,
    },
}

#[derive(Subcommand, Debug)]
enum CompaniesCommand {
    /// Search by name or SIREN
    Search { query: String },
    /// Fetch one company by SIREN
    Get { siren: String },
}

#[derive(Subcommand, Debug)]
enum LocationsCommand {
    /// Postal codes starting with a prefix
    PostalCodes { prefix: String },
    /// Cities served by a postal code
    Cities { postal_code: String },
    /// Known countries
    Countries,
}

#[derive(Subcommand, Debug)]
enum SuppliersCommand {
    /// Every supplier
    List,
    /// One supplier by id
    Get { id: String },
    /// Suppliers matched to answers given as QUESTION=ANSWER pairs
    Recommended {
        #[arg(value_parser = parse_answer)]
        answers: Vec<(u32, String)>,
    },
    /// Filtered search
    Search(SearchArgs),
}

#[derive(Args, Debug)]
struct SearchArgs {
    #[arg(long)]
    q: Option<String>,
    #[arg(long)]
    capacity: Option<String>,
    #[arg(long)]
    zone: Option<String>,
    #[arg(long)]
    voltage: Option<String>,
    #[arg(long)]
    lift_type: Option<String>,
}

#[derive(Subcommand, Debug)]
enum LeadsCommand {
    /// Submit the lead described by a JSON file
    Submit { file: PathBuf },
    /// Fetch a submitted lead
    Get { id: String },
}

#[derive(Subcommand, Debug)]
enum CriteriaCommand {
    Capacities,
    Zones,
    Voltages,
    Options,
    LiftTypes,
    /// Criteria preselected before refinement
    Defaults,
}

fn parse_answer(raw: &str) -> Result<(u32, String), String> {
    let (question, answer) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected QUESTION=ANSWER, got `{}`", raw))?;
    let question = question
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("invalid question id `{}`: {}", question, e))?;
    Ok((question, answer.trim().to_string()))
}

fn build_client(args: &ConnectionArgs) -> anyhow::Result<DataClient> {
    let config = DataClientConfig::from_env().context("failed to load MARKETPLACE_* configuration")?;

    let mut builder = ClientBuilder::new().config(config);
    if let Some(ref base_url) = args.base_url {
        builder = builder.base_url(base_url.clone());
    }
    if let Some(timeout_ms) = args.timeout_ms {
        builder = builder.timeout(Duration::from_millis(timeout_ms));
    }

    builder.build().context("failed to build marketplace client")
}

fn print<T: Serialize>(response: ApiResponse<T>) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

pub(crate) async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let client = build_client(&cli.connection)?;

    tracing::debug!(base_url = client.endpoints().base_url(), "client ready");

    match cli.command {
        Command::Companies { command } => match command {
            CompaniesCommand::Search { query } => print(client.companies().search(&query).await),
            CompaniesCommand::Get { siren } => print(client.companies().get_by_siren(&siren).await),
        },
        Command::Locations { command } => match command {
            LocationsCommand::PostalCodes { prefix } => {
                print(client.locations().search_postal_codes(&prefix).await)
            }
            LocationsCommand::Cities { postal_code } => print(client.locations().cities(&postal_code).await),
            LocationsCommand::Countries => print(client.locations().countries().await),
        },
        Command::Questions { id: Some(id) } => print(client.questions().get(id).await),
        Command::Questions { id: None } => print(client.questions().list().await),
        Command::Suppliers { command } => match command {
            SuppliersCommand::List => print(client.suppliers().list().await),
            SuppliersCommand::Get { id } => print(client.suppliers().get(&id).await),
            SuppliersCommand::Recommended { answers } => {
                let mut grouped = UserAnswers::new();
                for (question, answer) in answers {
                    grouped.entry(question).or_default().push(answer);
                }
                print(client.suppliers().recommended(&grouped).await)
            }
            SuppliersCommand::Search(args) => {
                let params = SupplierSearchParams {
                    q: args.q,
                    capacity: args.capacity,
                    zone: args.zone,
                    voltage: args.voltage,
                    lift_type: args.lift_type,
                };
                print(client.suppliers().search(&params).await)
            }
        },
        Command::Leads { command } => match command {
            LeadsCommand::Submit { file } => {
                let raw = std::fs::read_to_string(&file)
                    .with_context(|| format!("failed to read {}", file.display()))?;
                let lead: LeadSubmission =
                    serde_json::from_str(&raw).with_context(|| format!("invalid lead in {}", file.display()))?;
                print(client.leads().submit(&lead).await)
            }
            LeadsCommand::Get { id } => print(client.leads().get(&id).await),
        },
        Command::Criteria { command } => match command {
            CriteriaCommand::Capacities => print(client.criteria().capacities().await),
            CriteriaCommand::Zones => print(client.criteria().zones().await),
            CriteriaCommand::Voltages => print(client.criteria().voltages().await),
            CriteriaCommand::Options => print(client.criteria().options().await),
            CriteriaCommand::LiftTypes => print(client.criteria().lift_types()),
            CriteriaCommand::Defaults => print(client.criteria().default_criteria()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_answer() {
        assert_eq!(parse_answer("1=2-colonnes").unwrap(), (1, "2-colonnes".to_string()));
        assert!(parse_answer("2-colonnes").is_err());
        assert!(parse_answer("x=4t").is_err());
    }

    #[test]
    fn test_cli_parses_nested_commands() {
        let cli = Cli::try_parse_from([
            "data-probe",
            "--base-url",
            "http://api.test",
            "suppliers",
            "recommended",
            "1=2-colonnes",
            "4=traverse-sup",
        ])
        .unwrap();

        assert_eq!(cli.connection.base_url.as_deref(), Some("http://api.test"));
        match cli.command {
            Command::Suppliers {
                command: SuppliersCommand::Recommended { answers },
            } => assert_eq!(answers.len(), 2),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
