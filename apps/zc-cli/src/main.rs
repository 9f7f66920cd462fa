use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use zc_app::{
    AppResult, Editor, EditorConfig, SaveOutcome, Script, ZoneSource, load_zone_list,
    render_report, run_script,
};
use zc_form::{Severity, Zone};

#[derive(Parser)]
#[command(name = "zc-cli")]
#[command(about = "ZoneCharge CLI - shipping charges per rate zone", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SourceArgs {
    /// Zone list URL (overrides the config)
    #[arg(long, conflicts_with = "file")]
    url: Option<String>,
    /// Read the zone list from a local JSON file instead
    #[arg(long)]
    file: Option<PathBuf>,
    /// Editor config YAML file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List zones of the catalog
    Zones {
        #[command(flatten)]
        source: SourceArgs,
        /// Show only zones whose name contains this text
        #[arg(long)]
        filter: Option<String>,
    },
    /// Replay a scripted editing session and print the save outcome
    Run {
        /// Path to the session script YAML file
        script_path: PathBuf,
        #[command(flatten)]
        source: SourceArgs,
        /// Print the saved payload as JSON instead of the report
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> AppResult<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Zones { source, filter } => cmd_zones(&source, filter.as_deref()).await,
        Commands::Run {
            script_path,
            source,
            json,
        } => cmd_run(&script_path, &source, json).await,
    }
}

fn load_config(source: &SourceArgs) -> AppResult<EditorConfig> {
    let mut config = match &source.config {
        Some(path) => EditorConfig::load(path)?,
        None => EditorConfig::default(),
    };
    if let Some(url) = &source.url {
        config.zone_list_url = url.clone();
    }
    config.validate()?;
    Ok(config)
}

fn zone_source(source: &SourceArgs, config: &EditorConfig) -> ZoneSource {
    match &source.file {
        Some(path) => ZoneSource::File(path.clone()),
        None => ZoneSource::Url(config.zone_list_url.clone()),
    }
}

async fn open_editor(source: &SourceArgs) -> AppResult<Editor> {
    let config = load_config(source)?;
    let from = zone_source(source, &config);
    let seeds = load_zone_list(&from).await.inspect_err(|e| {
        tracing::error!(source = %from.describe(), error = %e, "zone list unavailable");
    })?;
    Ok(Editor::new(config, seeds))
}

async fn cmd_zones(source: &SourceArgs, filter: Option<&str>) -> AppResult<ExitCode> {
    let mut editor = open_editor(source).await?;
    let now = std::time::Instant::now();
    if let Some(query) = filter {
        editor.search_keyup(query, now);
    }
    let due = now + editor.config().debounce.search_keyup();
    editor.tick(due);

    let default_value = &editor.config().base_charge_value;
    let rows: Vec<Zone> = editor
        .catalog()
        .visible()
        .map(|seed| Zone::from_seed(seed, default_value))
        .collect();

    if rows.is_empty() {
        println!("No zones found");
    } else {
        println!("Zones:");
        for zone in rows {
            println!("  {:>5}  {}  (base charge {})", zone.id.get(), zone.name, zone.value);
        }
    }
    Ok(ExitCode::SUCCESS)
}

async fn cmd_run(script_path: &Path, source: &SourceArgs, json: bool) -> AppResult<ExitCode> {
    let script = Script::load(script_path)?;
    let mut editor = open_editor(source).await?;

    println!("Replaying session: {}", script_path.display());
    let outcomes = run_script(&mut editor, &script)?;

    let Some(last) = outcomes.last() else {
        println!("Session never saved");
        return Ok(ExitCode::SUCCESS);
    };
    print_outcome(last, json, &editor.config().locale)?;

    Ok(if last.saved() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn print_outcome(outcome: &SaveOutcome, json: bool, locale: &str) -> AppResult<()> {
    for annotation in &outcome.report.annotations {
        let mark = match annotation.issue.severity() {
            Severity::Error => "✗",
            Severity::Advisory => "!",
        };
        println!("  {mark} {annotation}");
    }

    match &outcome.payload {
        Some(payload) if json => println!("{}", serde_json::to_string_pretty(payload)?),
        Some(payload) => print!(
            "{}",
            render_report(payload, chrono::Local::now().naive_local(), locale)
        ),
        None if outcome.report.passed() => println!("Nothing selected, nothing saved"),
        None => println!("✗ Form has {} error(s), not saved", outcome.report.errors),
    }
    Ok(())
}
