use anyhow::{bail, Context};
use clap::{Arg, ArgMatches, Command};
use email_qc::analytics::HistorySummary;
use email_qc::history::{self, HistoryStore, JsonFileHistoryStore};
use email_qc::result::{Details, ValidationResult};
use email_qc::templates::{self, TemplateName};
use email_qc::{QcEngine, RubricConfig, RubricKind, Settings};
use log::LevelFilter;
use std::path::{Path, PathBuf};
use std::process;

const HISTORY_FILE: &str = "history.json";
const SETTINGS_FILE: &str = "settings.json";

fn main() {
    let matches = Command::new("email-qc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Quality checks for customer-facing email addresses and reply drafts")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Rubric configuration file (YAML); built-in lists are used when absent")
                .global(true),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .value_name("DIR")
                .help("Directory holding history.json and settings.json")
                .default_value(".email-qc")
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable debug logging")
                .action(clap::ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("validate")
                .about("Score an email address or email body")
                .arg(
                    Arg::new("text")
                        .value_name("TEXT")
                        .help("Text to check")
                        .conflicts_with_all(["file", "template"]),
                )
                .arg(
                    Arg::new("file")
                        .short('f')
                        .long("file")
                        .value_name("FILE")
                        .help("Read the text to check from a file")
                        .conflicts_with("template"),
                )
                .arg(
                    Arg::new("template")
                        .short('t')
                        .long("template")
                        .value_name("NAME")
                        .help("Check one of the built-in templates (update, received, payment)"),
                )
                .arg(
                    Arg::new("rubric")
                        .short('r')
                        .long("rubric")
                        .value_name("RUBRIC")
                        .help("Scoring rubric")
                        .value_parser(["address", "structural", "weighted"])
                        .default_value("weighted"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print the result as JSON")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("no-save")
                        .long("no-save")
                        .help("Do not append the result to history")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("history")
                .about("List saved results, newest first")
                .arg(
                    Arg::new("search")
                        .short('s')
                        .long("search")
                        .value_name("TERM")
                        .help("Filter by text or by status (valid/invalid)"),
                ),
        )
        .subcommand(Command::new("clear-history").about("Delete all saved results"))
        .subcommand(Command::new("stats").about("Summarise saved results"))
        .subcommand(
            Command::new("settings")
                .about("Show or change settings")
                .subcommand(Command::new("show").about("Print current settings"))
                .subcommand(
                    Command::new("set")
                        .about("Change one setting")
                        .arg(Arg::new("key").value_name("KEY").required(true))
                        .arg(Arg::new("value").value_name("VALUE").required(true)),
                ),
        )
        .subcommand(
            Command::new("templates")
                .about("List the built-in templates or print one")
                .arg(Arg::new("name").value_name("NAME")),
        )
        .subcommand(
            Command::new("generate-config")
                .about("Write the default rubric configuration to a file")
                .arg(Arg::new("file").value_name("FILE").required(true)),
        )
        .get_matches();

    let log_level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    let data_dir = matches
        .get_one::<String>("data-dir")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(".email-qc"));

    let outcome = match matches.subcommand() {
        Some(("validate", sub)) => run_validate(sub, &data_dir),
        Some(("history", sub)) => show_history(&data_dir, sub.get_one::<String>("search")),
        Some(("clear-history", _)) => clear_history(&data_dir),
        Some(("stats", _)) => show_stats(&data_dir),
        Some(("settings", sub)) => run_settings(sub, &data_dir),
        Some(("templates", sub)) => show_templates(sub.get_one::<String>("name")),
        Some(("generate-config", sub)) => match sub.get_one::<String>("file") {
            Some(path) => generate_default_config(path),
            None => Ok(()),
        },
        _ => Ok(()),
    };

    if let Err(e) = outcome {
        eprintln!("❌ {e:#}");
        process::exit(1);
    }
}

fn load_config(path: Option<&String>) -> anyhow::Result<RubricConfig> {
    match path {
        Some(path) => RubricConfig::load_or_default(Path::new(path)),
        None => Ok(RubricConfig::default()),
    }
}

fn load_settings(data_dir: &Path) -> Settings {
    let path = data_dir.join(SETTINGS_FILE);
    Settings::load(&path).unwrap_or_else(|e| {
        log::warn!("{e:#}; using default settings");
        Settings::default()
    })
}

fn generate_default_config(path: &str) -> anyhow::Result<()> {
    RubricConfig::default().to_file(Path::new(path))?;
    println!("Default rubric configuration written to: {path}");
    println!("Edit the word lists and thresholds to suit your team.");
    Ok(())
}

fn input_text(sub: &ArgMatches) -> anyhow::Result<String> {
    if let Some(file) = sub.get_one::<String>("file") {
        return std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read input file: {file}"));
    }
    if let Some(name) = sub.get_one::<String>("template") {
        let name: TemplateName = name.parse().map_err(anyhow::Error::msg)?;
        return Ok(templates::template(name).to_string());
    }
    match sub.get_one::<String>("text") {
        Some(text) => Ok(text.clone()),
        None => bail!("Please enter email content to validate."),
    }
}

fn run_validate(sub: &ArgMatches, data_dir: &Path) -> anyhow::Result<()> {
    let kind: RubricKind = sub
        .get_one::<String>("rubric")
        .map(|r| r.parse::<RubricKind>())
        .transpose()
        .map_err(anyhow::Error::msg)?
        .unwrap_or_default();

    let text = input_text(sub)?;
    let config = load_config(sub.get_one::<String>("config"))?;
    let engine = QcEngine::new(kind, &config)?;
    let result = engine.validate(&text)?;
    let settings = load_settings(data_dir);

    if sub.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(&result, engine.rubric_name(), &settings);
    }

    if !settings.autosave || sub.get_flag("no-save") {
        log::debug!("Result not saved to history");
        return Ok(());
    }

    let store = JsonFileHistoryStore::new(data_dir.join(HISTORY_FILE));
    store
        .append(text.trim(), &result)
        .context("Result computed but could not be saved to history")?;
    Ok(())
}

fn mark(passed: bool) -> &'static str {
    if passed {
        "✅"
    } else {
        "❌"
    }
}

fn print_result(result: &ValidationResult, rubric_name: &str, settings: &Settings) {
    println!("📋 QC Result ({rubric_name} rubric)");
    println!("═══════════════════════════════════════");
    println!(
        "  Status: {} {}",
        mark(result.is_valid),
        if result.is_valid { "Valid" } else { "Invalid" }
    );
    println!("  Score: {}/100 ({})", result.score, result.band());
    if let Some(total) = result.total_score {
        println!("  Total: {total:.1}/10");
    }
    println!();

    println!("🔍 Checks:");
    match &result.details {
        Details::Address(checks) => {
            let rows = [
                ("format", "Format", checks.format),
                ("dns", "Domain", checks.dns),
                ("disposable", "Not disposable", !checks.disposable),
                ("spam", "Not spam-like", !checks.spam),
                ("deliverable", "Deliverable", checks.deliverable),
            ];
            for (key, label, passed) in rows {
                if settings.shows_address_check(key) {
                    println!("  {} {label}", mark(passed));
                }
            }
        }
        Details::Structural(checks) => {
            let rows = [
                ("Structure", checks.structure),
                ("Clarity", checks.clarity),
                ("Tone", checks.tone),
                ("Grammar", checks.grammar),
                ("Completeness", checks.completeness),
                ("Personalization", checks.personalization),
                ("Branding", checks.branding),
            ];
            for (label, passed) in rows {
                println!("  {} {label}", mark(passed));
            }
        }
        Details::Weighted(criteria) => {
            for (name, criterion) in criteria.in_order() {
                println!(
                    "  {:<11} {:>4.2}/2.5  {}",
                    name, criterion.score, criterion.feedback
                );
            }
        }
    }

    if !result.suggestions().is_empty() {
        println!();
        println!("💡 Suggestions:");
        for suggestion in result.suggestions() {
            println!("  • {suggestion}");
        }
    }
}

fn show_history(data_dir: &Path, term: Option<&String>) -> anyhow::Result<()> {
    let store = JsonFileHistoryStore::new(data_dir.join(HISTORY_FILE));
    let records = history::newest_first(store.list_all()?);
    let matching = history::search(&records, term.map(String::as_str).unwrap_or(""));

    if matching.is_empty() {
        println!("📭 No saved results");
        return Ok(());
    }

    println!("🗂️  QC History ({} results)", matching.len());
    println!("┌──────────────────────┬─────────┬───────┬──────────────────────────────────────────┐");
    println!("│ Saved                │ Status  │ Score │ Text                                     │");
    println!("├──────────────────────┼─────────┼───────┼──────────────────────────────────────────┤");
    for record in matching {
        let first_line = record.input_text.lines().next().unwrap_or("");
        println!(
            "│ {:<20} │ {:<7} │ {:>5} │ {:<40} │",
            record.timestamp.format("%Y-%m-%d %H:%M:%S"),
            record.result.status_word(),
            record.result.score,
            truncate_string(first_line, 40)
        );
    }
    println!("└──────────────────────┴─────────┴───────┴──────────────────────────────────────────┘");
    Ok(())
}

fn clear_history(data_dir: &Path) -> anyhow::Result<()> {
    JsonFileHistoryStore::new(data_dir.join(HISTORY_FILE)).clear()?;
    println!("✅ History cleared");
    Ok(())
}

fn show_stats(data_dir: &Path) -> anyhow::Result<()> {
    let store = JsonFileHistoryStore::new(data_dir.join(HISTORY_FILE));
    let summary = HistorySummary::from_records(&store.list_all()?);

    println!("📊 Email QC Statistics");
    println!("═══════════════════════════════════════");
    println!("  Total Checks: {}", summary.total);
    if let (Some(average), Some(valid_pct)) = (summary.average_score, summary.valid_percentage()) {
        println!("  ├─ Valid: {} ({valid_pct}%)", summary.valid);
        println!("  ├─ Invalid: {}", summary.invalid);
        println!("  └─ Average Score: {average}");
    } else {
        println!("📭 No results recorded yet");
        return Ok(());
    }
    println!();

    println!("📈 Score Distribution:");
    for bucket in &summary.score_distribution {
        println!("  {:>7}: {}", bucket.range, bucket.count);
    }

    if !summary.top_domains.is_empty() {
        println!();
        println!("🌐 Top Domains:");
        for domain in &summary.top_domains {
            println!(
                "  {:<30} {:>4} checks, avg {}",
                truncate_string(&domain.domain, 30),
                domain.count,
                domain.average_score
            );
        }
    }
    Ok(())
}

fn run_settings(sub: &ArgMatches, data_dir: &Path) -> anyhow::Result<()> {
    let path = data_dir.join(SETTINGS_FILE);
    let mut settings = Settings::load(&path)?;

    if let Some(("set", set)) = sub.subcommand() {
        let key = set.get_one::<String>("key").map(String::as_str).unwrap_or("");
        let value = set.get_one::<String>("value").map(String::as_str).unwrap_or("");
        settings.set(key, value)?;
        settings.save(&path)?;
        println!("✅ {key} updated");
    }

    println!("{}", serde_json::to_string_pretty(&settings)?);
    Ok(())
}

fn show_templates(name: Option<&String>) -> anyhow::Result<()> {
    match name {
        Some(name) => {
            let name: TemplateName = name.parse().map_err(anyhow::Error::msg)?;
            println!("{}", templates::template(name));
        }
        None => {
            println!("📝 Built-in templates:");
            for name in TemplateName::ALL {
                println!("  {:<10} {}", name.as_str(), name.description());
            }
        }
    }
    Ok(())
}

fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
