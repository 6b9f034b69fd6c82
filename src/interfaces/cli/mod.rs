//! Command-line interface for mixphase.

use std::path::PathBuf;

use clap::Parser;

use crate::io::format::mixphase_output;

const VERSION: Option<&str> = option_env!("CARGO_PKG_VERSION");

/// Logs a nicely formatted mixphase heading to the `mixphase-output` logger.
pub fn log_heading() {
    let version = if let Some(ver) = VERSION {
        format!("v{ver}")
    } else {
        "v unknown".to_string()
    };
    mixphase_output!("╭─────────────────────────────────────────────────────────────────────────────╮");
    mixphase_output!("│                                                                             │");
    mixphase_output!("│            ┏┳┓ ╻ ╻ ╻ ┏━┓ ╻ ╻ ┏━┓ ┏━┓ ┏━╸                                    │");
    mixphase_output!("│            ┃┃┃ ┃ ┏╋┛ ┣━┛ ┣━┫ ┣━┫ ┗━┓ ┣╸                                     │");
    mixphase_output!("│            ╹ ╹ ╹ ╹ ╹ ╹   ╹ ╹ ╹ ╹ ┗━┛ ┗━╸                                    │");
    mixphase_output!("│                                                                             │");
    mixphase_output!("│      Mixing angles and phases of CKM and PMNS matrices in the standard      │");
    mixphase_output!("│          parametrisation, and rephasing of fermion rotation matrices        │");
    mixphase_output!("│                                                                             │");
    mixphase_output!("│                                                               {version:>13} │");
    mixphase_output!("╰─────────────────────────────────────────────────────────────────────────────╯");
    mixphase_output!("");
}

#[derive(Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long)]
    pub config: PathBuf,

    /// Path to the output file. If not given, the output is written to the standard output.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Logs debugging diagnostics to the standard error. May be given twice for trace-level
    /// diagnostics.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
