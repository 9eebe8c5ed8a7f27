use clap::Parser;
use hpath::cli::commands::{cmd_batch, cmd_locate, cmd_reduce};
use hpath::cli::config::{resolve_format, resolve_trace_file, Cli, Commands, load_config};
use hpath::cli::logging::init_logging;
use hpath::trace::logger::TraceLogger;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_deref());

    // Resolve trace file: CLI > config > disabled
    let tracer = TraceLogger::from_path(resolve_trace_file(cli.trace_file.as_deref(), &config));

    match cli.command {
        Commands::Locate {
            snapshot,
            target,
            format,
        } => {
            let format = resolve_format(format.as_deref(), config.output.format.as_deref(), "text");
            let located = cmd_locate(&snapshot, target, &format, &config.simplify, &tracer)?;
            if !located {
                std::process::exit(1);
            }
        }
        Commands::Reduce { snapshot, format } => {
            cmd_reduce(&snapshot, &format, &config.simplify)?;
        }
        Commands::Batch {
            snapshot,
            targets,
            format,
            output,
        } => {
            let format =
                resolve_format(format.as_deref(), config.output.format.as_deref(), "console");
            cmd_batch(
                &snapshot,
                &targets,
                &format,
                output.as_deref(),
                &config.simplify,
                &tracer,
                cli.verbose,
            )?;
        }
    }

    Ok(())
}
