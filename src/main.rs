use anyhow::{Context, Result};
use clap::Parser;
use fleetstate::cli::{Cli, Command, DataArgs, OutputFormat};
use fleetstate::config::MetricsConfig;
use fleetstate::csv_output::CsvOutput;
use fleetstate::fleet::FleetData;
use fleetstate::json_output::{JsonDurationReport, JsonFleetReport, JsonHistoryRow};
use fleetstate::metrics::StateMetrics;
use fleetstate::text_output;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Build the metrics pipeline from the config file and CLI overrides
fn load_metrics(args: &DataArgs) -> Result<StateMetrics> {
    let mut config = match &args.config {
        Some(path) => MetricsConfig::from_toml(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => MetricsConfig::default(),
    };

    if let Some(hours) = args.window_hours {
        config = config.with_window_hours(hours);
    }

    StateMetrics::new(config).context("Invalid metrics configuration")
}

fn load_fleet(args: &DataArgs) -> Result<FleetData> {
    FleetData::load_dir(&args.data_dir)
        .with_context(|| format!("Failed to load fleet data from {}", args.data_dir.display()))
}

fn run_summary(data: &DataArgs, format: OutputFormat) -> Result<()> {
    let metrics = load_metrics(data)?;
    let fleet = load_fleet(data)?;
    let summaries = fleet.summarize(&metrics);
    let window_hours = metrics.config().window_hours;

    let failed = summaries.iter().filter(|s| s.error.is_some()).count();
    if failed > 0 {
        tracing::warn!(failed, "some equipment histories could not be aggregated");
    }

    match format {
        OutputFormat::Text => print!("{}", text_output::render_summary(&summaries, window_hours)),
        OutputFormat::Json => println!("{}", JsonFleetReport::new(window_hours, &summaries).to_json()?),
        OutputFormat::Csv => {
            let mut csv = CsvOutput::new(true);
            for summary in summaries {
                csv.add_summary(summary);
            }
            print!("{}", csv.render());
        }
    }
    Ok(())
}

fn run_durations(data: &DataArgs, equipment_id: &str, format: OutputFormat) -> Result<()> {
    let metrics = load_metrics(data)?;
    let fleet = load_fleet(data)?;
    let equipment = fleet.require_equipment(equipment_id)?;
    let report = fleet.durations_for(equipment_id, &metrics)?;

    match format {
        OutputFormat::Text => print!(
            "{}",
            text_output::render_durations(&equipment.name, &report, &fleet.catalog)
        ),
        OutputFormat::Json => println!(
            "{}",
            JsonDurationReport::new(equipment_id, &report, &fleet.catalog).to_json()?
        ),
        OutputFormat::Csv => anyhow::bail!("--format csv is only supported by `summary`"),
    }
    Ok(())
}

fn run_history(data: &DataArgs, equipment_id: &str, format: OutputFormat) -> Result<()> {
    let fleet = load_fleet(data)?;
    let equipment = fleet.require_equipment(equipment_id)?;
    let rows = fleet.history_rows(equipment_id)?;

    match format {
        OutputFormat::Text => print!("{}", text_output::render_history(&equipment.name, &rows)),
        OutputFormat::Json => {
            let rows: Vec<JsonHistoryRow> = rows.iter().map(JsonHistoryRow::from).collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        OutputFormat::Csv => anyhow::bail!("--format csv is only supported by `summary`"),
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    match &args.command {
        Command::Summary { data, format } => run_summary(data, *format),
        Command::Durations {
            data,
            equipment,
            format,
        } => run_durations(data, equipment, *format),
        Command::History {
            data,
            equipment,
            format,
        } => run_history(data, equipment, *format),
    }
}
