//! Nice mixphase output formatting.
//!
//! Report lines are sent to the dedicated `mixphase-output` log target, which the `mixphase`
//! binary routes to the output file or the standard output. Warnings and errors are also sent to
//! the default target so that they appear among the diagnostics on the standard error.

use std::fmt;

use log;

const MIXPHASE_BANNER_LENGTH: usize = 79;

/// Logs an error to the `mixphase-output` logger.
macro_rules! mixphase_error {
    ($fmt:expr $(, $($arg:tt)*)?) => {
        log::error!($fmt, $($($arg)*)?);
        log::error!(target: "mixphase-output", $fmt, $($($arg)*)?);
    }
}

/// Logs a warning to the `mixphase-output` logger.
macro_rules! mixphase_warn {
    ($fmt:expr $(, $($arg:tt)*)?) => {
        log::warn!($fmt, $($($arg)*)?);
        log::warn!(target: "mixphase-output", $fmt, $($($arg)*)?);
    }
}

/// Logs a main output line to the `mixphase-output` logger.
macro_rules! mixphase_output {
    ($fmt:expr $(, $($arg:tt)*)?) => { log::info!(target: "mixphase-output", $fmt, $($($arg)*)?); }
}

pub(crate) use {mixphase_error, mixphase_output, mixphase_warn};

/// Writes a nicely formatted subtitle.
pub(crate) fn write_subtitle(f: &mut fmt::Formatter<'_>, subtitle: &str) -> fmt::Result {
    let length = subtitle.chars().count();
    let bar = "═".repeat(length);
    writeln!(f, "{subtitle}")?;
    writeln!(f, "{bar}")?;
    Ok(())
}

/// Logs a nicely formatted section title to the `mixphase-output` logger.
pub(crate) fn log_title(title: &str) {
    let length = title.chars().count().max(MIXPHASE_BANNER_LENGTH - 6);
    let bar = "─".repeat(length);
    mixphase_output!("┌──{bar}──┐");
    mixphase_output!("│§ {title:^length$} §│");
    mixphase_output!("└──{bar}──┘");
}

/// Logs a nicely formatted subtitle to the `mixphase-output` logger.
pub(crate) fn log_subtitle(subtitle: &str) {
    let length = subtitle.chars().count();
    let bar = "═".repeat(length);
    mixphase_output!("{}", subtitle);
    mixphase_output!("{}", bar);
}

/// Logs a nicely formatted macro-section beginning to the `mixphase-output` logger.
pub(crate) fn log_macsec_begin(sectitle: &str) {
    let width = MIXPHASE_BANNER_LENGTH - 14;
    let sectitle_space = sectitle.to_string() + " ";
    mixphase_output!("❬❬❬❬❬ [Begin] {sectitle_space:❬<width$}");
}

/// Logs a nicely formatted macro-section ending to the `mixphase-output` logger.
pub(crate) fn log_macsec_end(sectitle: &str) {
    let width = MIXPHASE_BANNER_LENGTH - 14;
    let sectitle_space = sectitle.to_string() + " ";
    mixphase_output!("❭❭❭❭❭ [ End ] {sectitle_space:❭<width$}");
}

/// Turns a boolean into a string of `yes` or `no`.
pub(crate) fn nice_bool(b: bool) -> String {
    if b {
        "yes".to_string()
    } else {
        "no".to_string()
    }
}

/// A trait for logging mixphase outputs nicely.
pub(crate) trait MixPhaseOutput: fmt::Debug + fmt::Display {
    /// Logs display output nicely.
    fn log_output_display(&self) {
        let lines = self.to_string();
        lines.lines().for_each(|line| {
            mixphase_output!("{line}");
        })
    }
}

// Blanket implementation
impl<T> MixPhaseOutput for T where T: fmt::Debug + fmt::Display {}
