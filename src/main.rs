use std::path::Path;

use tracing::debug;
use tracing_subscriber::EnvFilter;

use rel_guard::audit::{AuditMode, LinkAuditor, RunReport};
use rel_guard::cli::{Cli, ColorChoice};
use rel_guard::config::{Config, ConfigLoader, FileConfigLoader, validate_config_semantics};
use rel_guard::output::{ColorMode, JsonFormatter, OutputFormat, OutputFormatter, TextFormatter};
use rel_guard::scanner::{DocumentScanner, GlobFilter, resolve_documents};
use rel_guard::EXIT_CONFIG_ERROR;

const fn color_choice_to_mode(choice: ColorChoice) -> ColorMode {
    match choice {
        ColorChoice::Auto => ColorMode::Auto,
        ColorChoice::Always => ColorMode::Always,
        ColorChoice::Never => ColorMode::Never,
    }
}

/// Default log level when `RUST_LOG` is not set.
const fn log_level(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level(verbose, quiet)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() {
    let cli = Cli::parse_lenient(std::env::args_os());
    init_logging(cli.verbose, cli.quiet);

    std::process::exit(run(&cli));
}

fn run(cli: &Cli) -> i32 {
    match run_impl(cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

fn run_impl(cli: &Cli) -> rel_guard::Result<i32> {
    // 1. Load configuration
    let mut config = load_config(cli.config.as_deref(), cli.no_config)?;

    // 2. Apply CLI argument overrides
    apply_cli_overrides(&mut config, cli);
    validate_config_semantics(&config)?;

    // 3. Resolve the documents to audit
    let extensions = config.scan.normalized_extensions();
    let filter = GlobFilter::new(extensions.clone(), &config.scan.exclude)?;
    let scanner = DocumentScanner::with_recursion(filter, config.scan.recursive);
    let documents = resolve_documents(&cli.files, &extensions, &scanner, Path::new("."))?;
    debug!(count = documents.len(), "resolved documents");

    // 4. Audit
    let mode = AuditMode::from_fix_flag(cli.fix);
    let report = LinkAuditor::new().audit_run(&documents, mode);

    // 5. Format and write output
    if !cli.quiet {
        let output = format_output(cli.format, &report, color_choice_to_mode(cli.color))?;
        print!("{output}");
    }

    Ok(report.exit_code())
}

fn load_config(config_path: Option<&Path>, no_config: bool) -> rel_guard::Result<Config> {
    if no_config {
        return Ok(Config::default());
    }

    let loader = FileConfigLoader::new();
    config_path.map_or_else(|| loader.load(), |path| loader.load_from_path(path))
}

fn apply_cli_overrides(config: &mut Config, cli: &Cli) {
    if let Some(ext) = &cli.ext {
        config.scan.extensions.clone_from(ext);
    }
    config.scan.exclude.extend(cli.exclude.iter().cloned());
    if cli.recursive {
        config.scan.recursive = true;
    }
}

fn format_output(
    format: OutputFormat,
    report: &RunReport,
    color_mode: ColorMode,
) -> rel_guard::Result<String> {
    match format {
        OutputFormat::Text => TextFormatter::new(color_mode).format(report),
        OutputFormat::Json => JsonFormatter.format(report),
    }
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
