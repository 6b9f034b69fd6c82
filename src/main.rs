use anyhow::{self, format_err};
use clap::Parser;
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::append::file::FileAppender;
use log4rs::append::Append;
use log4rs::config::{Appender, Config, Logger, Root};
use log4rs::encode::pattern::PatternEncoder;

use mixphase::interfaces::cli::{log_heading, Cli};
use mixphase::interfaces::input::Input;
use mixphase::interfaces::InputHandle;
use mixphase::io::read_mixphase_yaml;

/// Configures `log4rs` so that the `mixphase-output` target goes to the requested output file (or
/// the standard output) and all other diagnostics go to the standard error.
fn init_logging(cli: &Cli) -> Result<(), anyhow::Error> {
    let output_appender: Box<dyn Append> = if let Some(output) = cli.output.as_ref() {
        Box::new(
            FileAppender::builder()
                .encoder(Box::new(PatternEncoder::new("{m}{n}")))
                .append(false)
                .build(output)?,
        )
    } else {
        Box::new(
            ConsoleAppender::builder()
                .encoder(Box::new(PatternEncoder::new("{m}{n}")))
                .target(Target::Stdout)
                .build(),
        )
    };
    let diagnostics_appender = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} {h({l:<5})} [{t}] {m}{n}",
        )))
        .target(Target::Stderr)
        .build();
    let root_level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    let config = Config::builder()
        .appender(Appender::builder().build("output", output_appender))
        .appender(Appender::builder().build("diagnostics", Box::new(diagnostics_appender)))
        .logger(
            Logger::builder()
                .appender("output")
                .additive(false)
                .build("mixphase-output", LevelFilter::Info),
        )
        .build(
            Root::builder()
                .appender("diagnostics")
                .build(root_level),
        )
        .map_err(|err| format_err!(err))?;
    log4rs::init_config(config).map_err(|err| format_err!(err))?;
    Ok(())
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    log_heading();
    let input = read_mixphase_yaml::<Input, _>(&cli.config)?;
    input.handle()
}
