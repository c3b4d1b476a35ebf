use clap::Parser;
use log::LevelFilter;

mod args;
mod dashboard;

fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
}

fn main() {
    let args = args::Args::parse();
    init_logging(args.verbose);

    if let Err(e) = dashboard::run_dashboard(&args) {
        dashboard::report_error(&e);
        std::process::exit(1);
    }
}
