//! CLI entry point for zerosight.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and exit codes.
//! All business logic lives in the `zerosight-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};
use zerosight_app::{
    ActorDirectory, ExplainOutput, JsonFileStore, ReportService, SessionManager,
    format_decisions, initial_reports, parse_scenario_toml, run_explain, run_scenario,
};
use zerosight_domain::{ReportQuery, sections_for};
use zerosight_settings::{Overrides, ResolvedConfig, ZerosightConfigV1};
use zerosight_types::{Actor, Report, ReportSeverity, ReportStatus};

#[derive(Parser, Debug)]
#[command(
    name = "zerosight",
    version,
    about = "Role-gated security report desk"
)]
struct Cli {
    /// Path to zerosight config TOML (missing file means defaults).
    #[arg(long, default_value = "zerosight.toml", global = true)]
    config: Utf8PathBuf,

    /// Override profile (strict|legacy|audited).
    #[arg(long, global = true)]
    profile: Option<String>,

    /// Override enforcement (strict|trust-caller).
    #[arg(long, global = true)]
    enforcement: Option<String>,

    /// Override report numbering (monotonic|collection-size).
    #[arg(long, global = true)]
    report_numbering: Option<String>,

    /// Session file; defaults to `session.path` from the config.
    #[arg(long, global = true)]
    session_file: Option<Utf8PathBuf>,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Authenticate and persist the session.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Clear the persisted session.
    Logout,

    /// Print the logged-in actor.
    Whoami,

    /// List reports visible to the logged-in actor.
    Reports {
        /// Case-insensitive match on title, description or id.
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        status: Option<ReportStatus>,
        #[arg(long)]
        severity: Option<ReportSeverity>,
        /// Print the matching reports as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show one report and what the logged-in actor may do with it.
    Show {
        id: String,
        #[arg(long)]
        json: bool,
    },

    /// Dashboard counts over the visible reports.
    Summary,

    /// Navigation sections open to the logged-in actor.
    Sections,

    /// Replay a scenario script against a fresh collection.
    Replay {
        scenario: Utf8PathBuf,
        /// Print the outcome as JSON.
        #[arg(long)]
        json: bool,
        /// Exit with code 2 when any step does not meet its expectation.
        #[arg(long)]
        fail_on_error: bool,
    },

    /// Explain an access rule id.
    Explain {
        /// The rule id (e.g., "access.view.client_approved").
        rule_id: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    match run(cli) {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("zerosight error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn run(cli: Cli) -> anyhow::Result<i32> {
    if let Commands::Explain { rule_id } = &cli.cmd {
        return Ok(cmd_explain(rule_id));
    }

    let resolved = load_config(&cli)?;
    let directory = resolved
        .directory
        .clone()
        .map(ActorDirectory::new)
        .unwrap_or_default();
    let session_path = cli
        .session_file
        .clone()
        .unwrap_or_else(|| Utf8PathBuf::from(&resolved.session.path));
    let mut session = SessionManager::new(JsonFileStore::new(session_path), &resolved.session);
    session.restore().context("restore session")?;

    match cli.cmd {
        Commands::Login { email, password } => {
            let actor = session.login(&directory, &email, &password)?;
            println!("logged in as {} ({}, {})", actor.name, actor.email, actor.role);
        }
        Commands::Logout => {
            session.logout().context("clear session")?;
            println!("logged out");
        }
        Commands::Whoami => {
            let actor = require_actor(session.current())?;
            println!("{} <{}> role={} id={}", actor.name, actor.email, actor.role, actor.id);
        }
        Commands::Reports {
            search,
            status,
            severity,
            json,
        } => {
            let actor = require_actor(session.current())?;
            let service = ReportService::new(resolved.effective.clone(), initial_reports());
            let query = ReportQuery {
                text: search,
                status,
                severity,
            };
            let reports = service.search(actor, &query);
            if json {
                println!("{}", serde_json::to_string_pretty(&reports)?);
            } else {
                print_report_table(&reports);
            }
        }
        Commands::Show { id, json } => {
            let actor = require_actor(session.current())?;
            let service = ReportService::new(resolved.effective.clone(), initial_reports());
            let report = service
                .visible_to(actor)
                .into_iter()
                .find(|r| r.id == id)
                .with_context(|| format!("no visible report with id {id}"))?;
            if json {
                println!("{}", serde_json::to_string_pretty(report)?);
            } else {
                print_report(report);
                println!("\nAccess");
                print!("{}", format_decisions(&service.decisions(&id, actor)?));
            }
        }
        Commands::Summary => {
            let actor = require_actor(session.current())?;
            let service = ReportService::new(resolved.effective.clone(), initial_reports());
            let summary = service.summary(actor);
            println!("total           {}", summary.total);
            println!("pending review  {}", summary.pending_review);
            println!("critical        {}", summary.critical);
            for status in ReportStatus::ALL {
                println!("{:<15} {}", status.as_str(), summary.count(status));
            }
        }
        Commands::Sections => {
            let actor = require_actor(session.current())?;
            for section in sections_for(actor.role) {
                println!("{}", section.as_str());
            }
        }
        Commands::Replay {
            scenario,
            json,
            fail_on_error,
        } => {
            let text = std::fs::read_to_string(&scenario)
                .with_context(|| format!("read scenario: {scenario}"))?;
            let script =
                parse_scenario_toml(&text).with_context(|| format!("parse scenario: {scenario}"))?;
            let mut service = ReportService::new(resolved.effective.clone(), initial_reports());
            let outcome = run_scenario(&mut service, &directory, &script)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                for step in &outcome.steps {
                    let mark = if step.matched() { "ok  " } else { "FAIL" };
                    println!(
                        "{mark} {:>3} {:<12} {:<26} {:<14} {}",
                        step.index,
                        step.op,
                        step.actor,
                        step.report_id.as_deref().unwrap_or("-"),
                        step.result.as_str()
                    );
                }
                println!();
                print_report_table(&outcome.reports.iter().collect::<Vec<_>>());
            }

            if fail_on_error && outcome.has_failures() {
                return Ok(2);
            }
        }
        Commands::Explain { rule_id } => return Ok(cmd_explain(&rule_id)),
    }

    Ok(0)
}

fn load_config(cli: &Cli) -> anyhow::Result<ResolvedConfig> {
    let cfg = match read_optional(&cli.config)? {
        Some(text) if !text.trim().is_empty() => {
            zerosight_settings::parse_config_toml(&text).context("parse config")?
        }
        _ => ZerosightConfigV1::default(),
    };
    let overrides = Overrides {
        profile: cli.profile.clone(),
        enforcement: cli.enforcement.clone(),
        report_numbering: cli.report_numbering.clone(),
    };
    let resolved = zerosight_settings::resolve_config(cfg, overrides).context("resolve config")?;
    tracing::debug!(
        profile = %resolved.effective.profile,
        enforcement = ?resolved.effective.enforcement,
        numbering = ?resolved.effective.numbering,
        "config resolved"
    );
    Ok(resolved)
}

fn read_optional(path: &Utf8Path) -> anyhow::Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("read config: {path}")),
    }
}

fn require_actor(actor: Option<&Actor>) -> anyhow::Result<&Actor> {
    actor.context("not logged in (run `zerosight login`)")
}

fn print_report_table(reports: &[&Report]) {
    if reports.is_empty() {
        println!("no reports");
        return;
    }
    for r in reports {
        println!(
            "{:<14} {:<12} {:<13} {:<8} {}",
            r.id,
            r.status.as_str(),
            r.severity.as_str(),
            r.visibility.as_str(),
            r.title
        );
    }
}

fn print_report(r: &Report) {
    println!("{}  {}", r.id, r.title);
    println!("status      {}", r.status);
    println!("severity    {}", r.severity);
    println!("visibility  {}", r.visibility);
    println!("author      {} ({})", r.author_name, r.author_role);
    if let Some(by) = &r.reviewed_by {
        println!("reviewed by {by}");
    }
    if !r.description.is_empty() {
        println!("\n{}", r.description);
    }
    if !r.comments.is_empty() {
        println!("\nComments");
        for c in &r.comments {
            println!("  [{}] {}: {}", c.id, c.author_name, c.content);
        }
    }
    println!("\nActivity");
    for e in &r.activity_log {
        match &e.details {
            Some(details) => println!("  {} {} by {} ({details})", e.id, e.action, e.performed_by),
            None => println!("  {} {} by {}", e.id, e.action, e.performed_by),
        }
    }
}

fn cmd_explain(rule_id: &str) -> i32 {
    match run_explain(rule_id) {
        ExplainOutput::Found(exp) => {
            print!("{}", zerosight_app::format_explanation(&exp));
            0
        }
        ExplainOutput::NotFound {
            identifier,
            available_rule_ids,
        } => {
            eprint!(
                "{}",
                zerosight_app::format_not_found(&identifier, available_rule_ids)
            );
            1
        }
    }
}
