mod commands;
mod config;
mod output;

use tracing_subscriber::EnvFilter;

use crate::config::CliConfig;

/// Exit status when only usage text was shown.
const USAGE_EXIT_CODE: i32 = 2;

fn main() {
    let config = match CliConfig::discover() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(config.log_filter.as_deref().unwrap_or("warn"))
        }))
        .init();

    let args: Vec<String> = std::env::args().collect();
    let parsed = match cmdflag_core::parse(&commands::templates(), args.as_slice()) {
        Ok(parsed) => parsed,
        Err(err) => {
            eprint!("{err}");
            std::process::exit(if err.is_usage_only() {
                USAGE_EXIT_CODE
            } else {
                1
            });
        }
    };

    let result = commands::run(parsed)
        .map_err(|err| err.to_string())
        .and_then(|outcome| output::format_outcome(&outcome, config.format));

    match result {
        Ok(text) => println!("{}", text.trim_end()),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}
