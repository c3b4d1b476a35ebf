use log::{debug, info, warn};

use snafu::{prelude::*, ErrorCompat, Snafu};
use survey_core::*;

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::dashboard::charts::render_chart;
use crate::dashboard::config_reader::*;

pub mod charts;
pub mod config_reader;
mod io_common;

#[derive(Debug, Snafu)]
pub enum DashboardError {
    #[snafu(display("Error opening file {}", path.display()))]
    OpeningJson {
        source: std::io::Error,
        path: PathBuf,
    },
    #[snafu(display("Error parsing the JSON file {}", path.display()))]
    ParsingJson {
        source: serde_json::Error,
        path: PathBuf,
    },
    #[snafu(display("Error serializing the summary"))]
    WritingJson { source: serde_json::Error },
    #[snafu(display("Error writing the summary to {}", path.display()))]
    WritingSummary {
        source: std::io::Error,
        path: PathBuf,
    },
    #[snafu(display("Error loading the survey data: {source}"))]
    LoadingSurvey { source: SurveyError },
    #[snafu(display("Invalid chart {graph_id}: {source}"))]
    InvalidChart {
        source: SurveyError,
        graph_id: String,
    },
    #[snafu(display(""))]
    MissingParentDir {},

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type DashboardResult<T> = Result<T, DashboardError>;

/// Where the summary goes.
#[derive(Eq, PartialEq, Debug, Clone)]
enum SummaryOutput {
    Stdout,
    File(PathBuf),
}

/// The configuration after applying the command line, with all the paths
/// resolved.
#[derive(Debug, Clone)]
struct Settings {
    config: DashboardConfig,
    data_dir: PathBuf,
    descriptions_dir: Option<PathBuf>,
    output: SummaryOutput,
}

fn resolve_settings(args: &Args) -> DashboardResult<Settings> {
    let (config, root) = match &args.config {
        Some(path) => {
            let config_p = Path::new(path.as_str());
            let config = read_config(config_p)?;
            let root = config_p.parent().context(MissingParentDirSnafu {})?;
            (config, Some(root.to_path_buf()))
        }
        None => match &args.data {
            Some(data) => (DashboardConfig::for_data_directory(data), None),
            None => whatever!("Either --config or --data must be provided"),
        },
    };
    info!("config: {:?}", config);

    let relative = |p: &str| io_common::relative_to(root.as_deref(), p);
    let data_dir = match &args.data {
        Some(data) => PathBuf::from(data),
        None => relative(config.data_directory.as_str()),
    };
    let descriptions_dir = config.descriptions_directory.as_deref().map(relative);
    let output = match (&args.out, &config.output_settings.output_directory) {
        (Some(out), _) if out == "stdout" || out.is_empty() => SummaryOutput::Stdout,
        (Some(out), _) => SummaryOutput::File(PathBuf::from(out)),
        (None, Some(dir)) => SummaryOutput::File(relative(dir.as_str()).join("summary.json")),
        (None, None) => SummaryOutput::Stdout,
    };

    let mut config = config;
    if args.year.is_some() {
        config.active_year = args.year.clone();
    }
    if args.compare.is_some() {
        config.compare_year = args.compare.clone();
    }
    Ok(Settings {
        config,
        data_dir,
        descriptions_dir,
        output,
    })
}

/// The charts to compute: all of them, or the explored one with the charts
/// it lists.
fn selected_charts<'c>(
    config: &'c DashboardConfig,
    orchestrator: &ChartOrchestrator<'_>,
) -> DashboardResult<Vec<&'c ChartConfig>> {
    let explored: Vec<String> = match orchestrator.navigator.active_id() {
        Some(id) => match config.chart(&id) {
            Some(c) => c.explore.clone(),
            None => whatever!("Cannot explore {}: no such chart", id),
        },
        None => Vec::new(),
    };
    Ok(config
        .charts
        .iter()
        .filter(|c| orchestrator.is_visible(&c.graph_id) || explored.contains(&c.graph_id))
        .collect())
}

fn build_summary_js(config: &DashboardConfig, year: &str, views: &[ChartView]) -> JSValue {
    json!({
        "title": config.output_settings.title,
        "year": year,
        "compareYear": config.compare_year,
        "charts": views,
    })
}

/// Computes the summary of a dashboard.
pub fn compute_summary(args: &Args) -> DashboardResult<JSValue> {
    let settings = resolve_settings(args)?;
    summarize(&settings, args.explore.as_deref())
}

fn summarize(settings: &Settings, explore: Option<&str>) -> DashboardResult<JSValue> {
    let config = &settings.config;

    let repository = SurveyRepository::from_dir(&settings.data_dir).context(LoadingSurveySnafu {})?;

    let year = match config.active_year.clone().or_else(|| repository.latest_year()) {
        Some(y) => y,
        None => whatever!("No survey found in {}", settings.data_dir.display()),
    };
    if !repository.has_year(&year) {
        warn!("No survey for the active year {}", year);
    }
    let context =
        SurveyContext::from_repository(&repository, &year).context(LoadingSurveySnafu {})?;

    let descriptions = match &settings.descriptions_dir {
        Some(dir) => GraphDescriptions::from_dir(dir).context(LoadingSurveySnafu {})?,
        None => GraphDescriptions::new(),
    };
    let palette = config.palette.clone().unwrap_or_default();
    let navigator = ExploreNavigator::new();
    if let Some(id) = explore {
        navigator.explore(id, 0.0);
    }

    let orchestrator = ChartOrchestrator {
        repository: &repository,
        context: &context,
        palette: &palette,
        descriptions: &descriptions,
        navigator: &navigator,
    };
    let state = match &config.compare_year {
        Some(compare) => {
            let candidates = orchestrator.compare_year_candidates();
            if !candidates.contains(compare) {
                warn!("Comparing with {}, which is not one of {:?}", compare, candidates);
            }
            ChartState::comparing(compare)
        }
        None => ChartState::new(),
    };

    let mut views: Vec<ChartView> = Vec::new();
    for chart in selected_charts(config, &orchestrator)? {
        match render_chart(&orchestrator, chart, &state)? {
            Some(view) => {
                debug!("chart {}: {} responses", view.graph_id, view.number_of_responses);
                views.push(view);
            }
            None => {
                info!("chart {}: nothing to render", chart.graph_id);
            }
        }
    }

    Ok(build_summary_js(config, &year, &views))
}

pub fn run_dashboard(args: &Args) -> DashboardResult<()> {
    let settings = resolve_settings(args)?;
    if args.list_years {
        let repository =
            SurveyRepository::from_dir(&settings.data_dir).context(LoadingSurveySnafu {})?;
        for year in repository.available_years() {
            println!("{}", year);
        }
        return Ok(());
    }

    let summary_js = summarize(&settings, args.explore.as_deref())?;
    let pretty_js_summary = serde_json::to_string_pretty(&summary_js).context(WritingJsonSnafu {})?;

    match &settings.output {
        SummaryOutput::Stdout => println!("{}", pretty_js_summary),
        SummaryOutput::File(path) => {
            info!("Writing summary to {}", path.display());
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).context(WritingSummarySnafu { path })?;
            }
            fs::write(path, &pretty_js_summary).context(WritingSummarySnafu { path })?;
        }
    }

    // The reference summary, if provided for comparison
    if let Some(summary_p) = &args.reference {
        check_reference(Path::new(summary_p), &pretty_js_summary)?;
    }

    Ok(())
}

fn check_reference(reference_p: &Path, pretty_js_summary: &str) -> DashboardResult<()> {
    let summary_ref = read_summary(reference_p)?;
    let pretty_js_summary_ref =
        serde_json::to_string_pretty(&summary_ref).context(WritingJsonSnafu {})?;
    if pretty_js_summary_ref != pretty_js_summary {
        warn!("Found differences with the reference string");
        print_diff(pretty_js_summary_ref.as_str(), pretty_js_summary, "\n");
        whatever!("Difference detected between calculated summary and reference summary")
    }
    Ok(())
}

pub fn report_error(e: &DashboardError) {
    warn!("Error occured {:?}", e);
    eprintln!("An error occured: {}", e);
    if let Some(bt) = ErrorCompat::backtrace(e) {
        eprintln!("trace: {}", bt);
    }
}

#[cfg(test)]
fn test_args(test_name: &str) -> Args {
    let test_dir = option_env!("SURVEY_TEST_DIR")
        .unwrap_or(concat!(env!("CARGO_MANIFEST_DIR"), "/testdata"));
    Args {
        config: Some(format!("{}/{}/{}_config.json", test_dir, test_name, test_name)),
        data: None,
        year: None,
        compare: None,
        out: None,
        reference: Some(format!(
            "{}/{}/{}_expected_summary.json",
            test_dir, test_name, test_name
        )),
        explore: None,
        list_years: false,
        verbose: false,
    }
}

#[cfg(test)]
fn test_wrapper(args: Args) {
    let _ = env_logger::builder().is_test(true).try_init();
    let summary_js = compute_summary(&args);
    if let Err(e) = &summary_js {
        report_error(e);
    }
    let pretty = serde_json::to_string_pretty(&summary_js.unwrap()).unwrap();
    let res = check_reference(Path::new(args.reference.as_deref().unwrap()), &pretty);
    if let Err(e) = &res {
        report_error(e);
    }
    assert!(res.is_ok());
}
