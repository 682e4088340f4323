use anyhow::Context;
use clap::Parser;
use cropops::app::App;
use cropops::cli::{
    Cli, Commands, EngineArgs, FieldCommand, IssueCommand, IssueKindArg, SeverityArg,
};
use cropops::config::Config;
use cropops::db::Database;
use cropops::models::{Field, IssueKind, IssueSeverity, Recommendation};
use cropops::report::{self, RecommendationsReport};
use tracing_subscriber::EnvFilter;

fn main() {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    if let Commands::Init = cli.command {
        let path = Config::write_default()?;
        println!("Configuration saved to {}", path.display());
        return Ok(());
    }

    let config = Config::load(cli.config.as_ref())?;
    let db_path = config.db_path(cli.data_dir.as_ref())?;
    let db = Database::open(&db_path)
        .with_context(|| format!("Failed to open database at {}", db_path.display()))?;
    tracing::debug!("Using database {}", db.path().display());

    let app = App::new(config, db).context("Failed to load crop catalog")?;

    match cli.command {
        Commands::Init => {}
        Commands::Field(cmd) => handle_field(&app, cmd)?,
        Commands::Issue(cmd) => handle_issue(&app, cmd)?,
        Commands::Plant {
            field_id,
            crop,
            date,
            notes,
        } => {
            let id = app.record_planting(field_id, &crop, date, notes.as_deref())?;
            println!("Recorded planting #{} of {} on field #{}", id, crop, field_id);
        }
        Commands::Unplant { planting_id } => {
            app.db.delete_planting(planting_id)?;
            println!("Removed planting #{}", planting_id);
        }
        Commands::Plantings { field_id } => {
            let plantings = app.db.get_plantings_for_field(field_id)?;
            print!("{}", report::render_plantings(&plantings, app.catalog()));
        }
        Commands::Crops => print!("{}", report::render_catalog(app.catalog())),
        Commands::Recommend(args) => {
            let (field, recs) = app.recommendations(args.field_id, args.as_of)?;
            print_recommendations(&app, &args, &field, &recs, "Recommendations")?;
        }
        Commands::Avoid(args) => {
            let (field, results) = app.crops_to_avoid(args.field_id, args.as_of)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                print!("{}", report::render_crops_to_avoid(&field, &results));
            }
        }
        Commands::Alternatives(args) => {
            let (field, recs) = app.resistant_alternatives(args.field_id, args.as_of)?;
            print_recommendations(&app, &args, &field, &recs, "Resistant alternatives")?;
        }
    }

    Ok(())
}

fn handle_field(app: &App, cmd: FieldCommand) -> anyhow::Result<()> {
    match cmd {
        FieldCommand::Add {
            name,
            ph,
            soil_type,
        } => {
            let id = app.add_field(&name, ph, soil_type.as_deref())?;
            println!("Added field #{} ({})", id, name);
        }
        FieldCommand::List => print!("{}", report::render_field_list(&app.db.list_fields()?)),
        FieldCommand::Show { id } => print!("{}", report::render_field(&app.db.get_field(id)?)),
        FieldCommand::Update { id, ph, soil_type } => {
            let field = app.update_field(id, ph, soil_type.as_deref())?;
            print!("{}", report::render_field(&field));
        }
        FieldCommand::Remove { id } => {
            app.db.delete_field(id)?;
            println!("Removed field #{}", id);
        }
    }
    Ok(())
}

fn handle_issue(app: &App, cmd: IssueCommand) -> anyhow::Result<()> {
    match cmd {
        IssueCommand::Log {
            field_id,
            kind,
            name,
            severity,
            date,
        } => {
            let kind = match kind {
                IssueKindArg::Pest => IssueKind::Pest,
                IssueKindArg::Disease => IssueKind::Disease,
            };
            let severity = match severity {
                SeverityArg::Low => IssueSeverity::Low,
                SeverityArg::Medium => IssueSeverity::Medium,
                SeverityArg::High => IssueSeverity::High,
            };
            let id = app.log_issue(field_id, kind, &name, severity, date)?;
            println!("Logged {} #{} on field #{}", kind, id, field_id);
        }
        IssueCommand::Resolve { issue_id } => {
            app.db.resolve_issue(issue_id)?;
            println!("Resolved issue #{}", issue_id);
        }
    }
    Ok(())
}

fn print_recommendations(
    app: &App,
    args: &EngineArgs,
    field: &Field,
    recs: &[Recommendation],
    title: &str,
) -> anyhow::Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(recs)?);
        return Ok(());
    }

    let output = &app.config.output;
    let text = RecommendationsReport::new(field, recs)
        .with_limit(output.limit)
        .details(output.show_details)
        .render(title);
    print!("{}", text);
    Ok(())
}
