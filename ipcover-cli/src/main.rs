use clap::Parser;
use ipcover_cli::cli::CliArgs;
use ipcover_cli::cli::CliCommand;
use ipcover_cli::cli::LogOutputFormat;
use ipcover_cli::commands;
use ipcover_cli::config::Settings;
use ipcover_cli::logging;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse the command line arguments.
    let args = CliArgs::parse();

    // Configure the binary's stderr output based on the provided output format.
    let pretty = matches!(args.output_format, LogOutputFormat::Pretty);
    logging::setup_logging(logging::DEFAULT_DIRECTIVES, pretty);

    // Load the configuration file and/or environment variables.
    let settings = Settings::new(args.config.as_ref()).inspect_err(|error| {
        tracing::error!(%error, "failed to construct the configuration");
    })?;

    let result = match &args.command {
        CliCommand::Cover(cover_args) => commands::run_cover(cover_args, settings.cover),
        CliCommand::Demo(demo_args) => commands::run_demo(demo_args, settings.cover),
    };
    let report = result.inspect_err(|error| {
        tracing::error!(%error, "failed to compute a cover");
    })?;

    report.print(&mut std::io::stdout().lock(), &mut std::io::stderr().lock())?;

    Ok(())
}
