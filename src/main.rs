use clap::Parser;
use inetnum_cidr_summary::cli::{Cli, Commands};
use inetnum_cidr_summary::{run_consolidate, run_parse};
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::error::Error;
use std::path::Path;
use std::time::Instant;

const LOG_CONFIG_FILE: &str = "log4rs.yml";

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    let cli = Cli::parse();
    init_logging(cli.verbose)?;
    dotenv::dotenv().ok();
    log::info!("#Start main()");

    match cli.command {
        Commands::Parse(args) => {
            let start = Instant::now();
            let stats = run_parse(&args)?;
            let runtime = start.elapsed().as_secs_f64();
            println!(
                "Found {} records in {:.0} seconds (about {:.0} records per second on average)",
                stats.records,
                runtime,
                stats.records as f64 / runtime.max(f64::EPSILON)
            );
        }
        Commands::Consolidate(args) => {
            run_consolidate(&args)?;
        }
    }

    Ok(())
}

/// Use log4rs.yml when present, else log to stderr.
fn init_logging(verbose: bool) -> Result<(), Box<dyn Error>> {
    if !verbose && Path::new(LOG_CONFIG_FILE).exists() {
        log4rs::init_file(LOG_CONFIG_FILE, Default::default())
            .map_err(|e| format!("Error initializing log4rs: {e}"))?;
        return Ok(());
    }

    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{d(%H:%M:%S)} {h({l})} {m}{n}")))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))?;
    log4rs::init_config(config)?;
    Ok(())
}
