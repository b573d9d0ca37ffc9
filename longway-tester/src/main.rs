mod common;
mod logic;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use common::scenario::{get_scenario, list_scenarios};
use common::split_csv;
use logic::{LogicTester, RouteWalker, ScenarioResult, SeedInfo, resolve_seed_inputs};
use longway_game::SongCatalog;

#[derive(Debug, Parser)]
#[command(name = "longway-tester", version = "0.1.0")]
#[command(about = "Headless QA runs for the Long Way To The Top route engine")]
struct Args {
    /// Scenarios to run (comma-separated, or `all`)
    #[arg(long, default_value = "smoke")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Seeds to run (comma-separated integers or LW- share codes)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Number of iterations per scenario and seed
    #[arg(long, default_value_t = 10)]
    iterations: usize,

    /// Song catalog to generate from (.json or .csv); defaults to the bundled list
    #[arg(long)]
    songs: Option<PathBuf>,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console"])]
    report: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_scenarios(&args)? {
        return Ok(());
    }

    announce_banner();

    let start_time = Instant::now();
    let scenarios = expand_scenarios(&args.scenarios);
    let seed_tokens = split_csv(&args.seeds);
    let seed_infos = resolve_seed_inputs(&seed_tokens)?;
    let catalog = load_catalog(args.songs.as_deref())?;
    let walker = RouteWalker::new(Arc::new(catalog), args.verbose);

    let all_results = run_scenarios(&args, &scenarios, &seed_infos, walker);

    write_reports(&args, &all_results, start_time)?;

    if all_results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }

    Ok(())
}

fn maybe_list_scenarios(args: &Args) -> Result<bool> {
    if !args.list_scenarios {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available scenarios:")?;
    for (key, description) in list_scenarios() {
        writeln!(output_target.writer(), "  {key:15} - {description}")?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "🎸 Long Way To The Top Route Tester".bright_cyan().bold());
    println!("{}", "===================================".cyan());
}

fn expand_scenarios(scenarios_arg: &str) -> Vec<String> {
    let mut scenarios = split_csv(scenarios_arg);
    if scenarios.iter().any(|s| s.eq_ignore_ascii_case("all")) {
        scenarios.retain(|s| !s.eq_ignore_ascii_case("all"));
        scenarios.extend(list_scenarios().into_iter().map(|(key, _)| key.to_string()));
    }
    scenarios
}

fn load_catalog(path: Option<&Path>) -> Result<SongCatalog> {
    let Some(path) = path else {
        return Ok(SongCatalog::load_from_static());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let is_csv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    let catalog = if is_csv {
        SongCatalog::from_csv(&text)
    } else {
        SongCatalog::from_json(&text)
    }
    .with_context(|| format!("failed to parse song catalog {}", path.display()))?;
    log::info!("loaded {} songs from {}", catalog.len(), path.display());
    Ok(catalog)
}

fn run_scenarios(
    args: &Args,
    scenarios: &[String],
    seed_infos: &[SeedInfo],
    walker: RouteWalker,
) -> Vec<ScenarioResult> {
    println!("{}", "🧠 Running Route Tests".bright_yellow().bold());
    println!("{}", "-".repeat(30).yellow());
    if walker.catalog().is_empty() {
        eprintln!("⚠️  Song catalog is empty; challenges will have no songs");
    }

    let tester = LogicTester::new(walker);
    let mut results = Vec::new();

    for scenario_name in scenarios {
        if let Some(scenario) = get_scenario(scenario_name) {
            results.extend(tester.run_scenario(&scenario, seed_infos, args.iterations));
        } else {
            eprintln!("⚠️  Unknown scenario: {}", scenario_name.yellow());
        }
    }

    results
}

fn write_reports(args: &Args, results: &[ScenarioResult], start_time: Instant) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report.as_str() {
        "json" => {
            if results.is_empty() {
                writeln!(&mut output_target, "[]")?;
            } else {
                logic::reports::generate_json_report(&mut output_target, results)?;
            }
        }
        "markdown" => {
            if results.is_empty() {
                writeln!(
                    &mut output_target,
                    "# Long Way To The Top Route Test Results\n\n_No scenarios executed._"
                )?;
            } else {
                logic::reports::generate_markdown_report(&mut output_target, results)?;
            }
        }
        _ => {
            if results.is_empty() {
                writeln!(&mut output_target, "No route scenarios executed.")?;
            } else {
                logic::reports::generate_console_report(
                    &mut output_target,
                    results,
                    start_time.elapsed(),
                )?;
            }
            let duration = start_time.elapsed();
            writeln!(&mut output_target)?;
            writeln!(&mut output_target, "🏁 Total time: {duration:?}")?;
        }
    }

    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> Args {
        Args {
            scenarios: "smoke".to_string(),
            list_scenarios: false,
            seeds: "1337".to_string(),
            iterations: 1,
            songs: None,
            report: "json".to_string(),
            verbose: false,
            output: None,
        }
    }

    fn temp_path(label: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        std::env::temp_dir().join(format!("longway-main-{nanos}-{label}"))
    }

    #[test]
    fn expand_scenarios_replaces_all() {
        let expanded = expand_scenarios("walk, ALL");
        assert_eq!(expanded[0], "walk");
        assert!(expanded.iter().any(|s| s == "reroll"));
        assert!(!expanded.iter().any(|s| s.eq_ignore_ascii_case("all")));
        assert_eq!(expand_scenarios("smoke"), vec!["smoke"]);
    }

    #[test]
    fn load_catalog_reads_csv_and_json() {
        let csv = temp_path("songs.csv");
        std::fs::write(&csv, "title,difficulty\nThunderstruck,4\n\"Hello, Goodbye\",1\n").unwrap();
        assert_eq!(csv.extension().and_then(|e| e.to_str()), Some("csv"));
        let catalog = load_catalog(Some(csv.as_path())).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.songs()[1].title, "Hello, Goodbye");

        let json_in_csv = temp_path("mislabeled.csv");
        std::fs::write(&json_in_csv, r#"[{"title":"Jump","difficulty":3}]"#).unwrap();
        assert!(load_catalog(Some(json_in_csv.as_path())).is_err());

        let json = temp_path("songs.json");
        std::fs::write(&json, r#"[{"title":"Jump","difficulty":3}]"#).unwrap();
        assert_eq!(load_catalog(Some(json.as_path())).unwrap().len(), 1);

        assert!(load_catalog(Some(temp_path("missing.json").as_path())).is_err());
        assert!(!load_catalog(None).unwrap().is_empty());
    }

    #[test]
    fn write_reports_to_file() {
        let path = temp_path("report");
        let mut args = base_args();
        args.output = Some(path.clone());
        args.report = "markdown".to_string();
        write_reports(&args, &[], Instant::now()).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("_No scenarios executed._"));
    }

    #[test]
    fn run_scenarios_skips_unknown_names() {
        let args = base_args();
        let walker = RouteWalker::new(Arc::new(SongCatalog::load_from_static()), false);
        let results = run_scenarios(
            &args,
            &["smoke".to_string(), "missing".to_string()],
            &[SeedInfo::new(5)],
            walker,
        );
        assert_eq!(results.len(), 1);
        assert!(results[0].passed);
    }
}
