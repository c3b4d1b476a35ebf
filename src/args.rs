use clap::Parser;

/// This is a survey dashboard program: it computes the charts of a yearly survey and compares them
/// between years.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) The JSON file describing the dashboard: where the surveys are and which charts to
    /// compute. For more information about the file format, read the manual of survey_core.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (directory path) The directory containing the yearly exports (`2025.csv`, `2026.csv`, ...).
    /// Setting this option overrides the directory that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub data: Option<String>,

    /// (year, default: the most recent export) The active year of the dashboard.
    #[clap(short, long, value_parser)]
    pub year: Option<String>,

    /// (year, optional) If specified, every chart that supports it is compared with this year.
    #[clap(long, value_parser)]
    pub compare: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the dashboard will be written in JSON format to
    /// the given location. Setting this option overrides the path that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference file containing a dashboard summary in JSON format. If provided, surveydash will
    /// check that the computed summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (chart id, optional) Only computes the given chart and the charts it lists in its `explore` option.
    #[clap(long, value_parser)]
    pub explore: Option<String>,

    /// If passed as an argument, prints the years with an export and exits.
    #[clap(long, takes_value = false)]
    pub list_years: bool,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
