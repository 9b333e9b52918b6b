use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Arg, Command, CommandFactory, Parser, ValueEnum};

use crate::output::OutputFormat;

/// Color output control
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal capability
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Parser, Debug)]
#[command(name = "rel-guard")]
#[command(
    author,
    version,
    about = "Find and fix target=\"_blank\" links missing rel=\"noopener noreferrer\""
)]
#[command(long_about = "Audits HTML documents for external links that open in a new tab \
    without rel=\"noopener noreferrer\", and optionally rewrites them in place.\n\n\
    Files named on the command line are audited in the order given; arguments without a \
    document extension and unrecognised flags are ignored. With no document arguments, the \
    working directory is listed instead.\n\n\
    Exit codes:\n  \
    0 - No insecure links found, or --fix was given\n  \
    1 - Insecure links found\n  \
    2 - Configuration error or invalid option value")]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Documents to audit (non-document arguments are ignored)
    pub files: Vec<String>,

    /// Add rel="noopener noreferrer" to insecure links and rewrite the files
    #[arg(long)]
    pub fix: bool,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Skip loading configuration file
    #[arg(long, conflicts_with = "config")]
    pub no_config: bool,

    /// Document extensions (comma-separated, e.g., html,htm)
    #[arg(long, value_delimiter = ',')]
    pub ext: Option<Vec<String>>,

    /// Exclude patterns for the directory listing (glob syntax, can be specified multiple times)
    #[arg(long, short = 'x')]
    pub exclude: Vec<String>,

    /// List subdirectories when no documents are named
    #[arg(short, long)]
    pub recursive: bool,

    /// Output format [possible values: text, json]
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Control color output
    #[arg(long, value_enum, default_value = "auto")]
    pub color: ColorChoice,

    /// Increase output verbosity (-v, -vv for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress the report and all logging below errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Parse `args`, dropping any flag the command does not define.
    #[must_use]
    pub fn parse_lenient<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::parse_from(retain_known_flags(args))
    }
}

/// Remove unrecognised `--long` and `-s` flags from `args` (program name
/// first). Values of known options and everything after `--` are kept.
pub fn retain_known_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut command = Cli::command();
    command.build();

    let mut args = args.into_iter().map(Into::into);
    let mut kept: Vec<OsString> = args.next().into_iter().collect();
    let mut expects_value = false;
    let mut escaped = false;

    for arg in args {
        if escaped || expects_value {
            expects_value = false;
            kept.push(arg);
            continue;
        }
        let Some(token) = arg.to_str() else {
            kept.push(arg);
            continue;
        };
        if token == "--" {
            escaped = true;
            kept.push(arg);
            continue;
        }
        if let Some(needs_value) = known_flag(&command, token) {
            expects_value = needs_value;
            kept.push(arg);
        }
    }

    kept
}

/// `None` for a flag `command` does not define. Otherwise whether the next
/// argument is this flag's value. Non-flag tokens count as known.
fn known_flag(command: &Command, token: &str) -> Option<bool> {
    if let Some(long) = token.strip_prefix("--") {
        let (name, attached) = long.split_once('=').map_or((long, false), |(n, _)| (n, true));
        let arg = command
            .get_arguments()
            .find(|arg| arg.get_long() == Some(name))?;
        return Some(!attached && takes_value(arg));
    }

    if let Some(shorts) = token.strip_prefix('-') {
        for (i, c) in shorts.char_indices() {
            let arg = command
                .get_arguments()
                .find(|arg| arg.get_short() == Some(c))?;
            if takes_value(arg) {
                return Some(i + c.len_utf8() == shorts.len());
            }
        }
    }

    Some(false)
}

fn takes_value(arg: &Arg) -> bool {
    arg.get_action().takes_values()
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
