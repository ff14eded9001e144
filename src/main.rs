use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use console::style;
use indicatif::ProgressBar;

use sticker_processor::cli::{Args, CommandLineArgs};
use sticker_processor::image_processing::batch_report::BatchReport;
use sticker_processor::image_processing::format_detector::detect_source_kind;
use sticker_processor::utils::{
    batch_progress_bar, display_name, error_println, format_duration, warn_println,
};
use sticker_processor::{JsonMessage, ProcessingEngine, ProcessingResult};

/// Parse the command line, exiting with status 1 on bad arguments
fn parse_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    }
}

fn print_configuration(cmd: &CommandLineArgs) {
    println!("{}", style("Configuration:").bold());
    println!("  Input: {}", cmd.input_path.display());
    println!("  Output: {}", cmd.output_path.display());
    println!(
        "  Mode: {}",
        if cmd.is_batch_mode { "batch" } else { "single file" }
    );
    println!("  Output format: {}", cmd.options.format);
    println!("  Quality: {}", cmd.options.quality);
    if cmd.is_batch_mode {
        println!("  Pattern: {}", cmd.options.pattern);
    }
    println!();
}

fn run_single(engine: &ProcessingEngine, cmd: &CommandLineArgs, json: bool) -> Result<()> {
    let kind = detect_source_kind(&cmd.input_path);
    if kind.is_animated() && !json {
        println!("Detected animated file, extracting the first frame as sticker");
    }

    match engine.process_file_as(&cmd.input_path, &cmd.output_path, kind) {
        Ok(info) => {
            if json {
                JsonMessage::file_completed(
                    &cmd.input_path,
                    &cmd.output_path,
                    (info.width, info.height),
                )
                .emit();
            } else {
                println!(
                    "{} Output file: {} ({}x{})",
                    style("Processing completed!").bold().green(),
                    cmd.output_path.display(),
                    info.width,
                    info.height
                );
            }
            Ok(())
        }
        Err(e) => {
            if json {
                JsonMessage::file_failed(&cmd.input_path, e.to_string()).emit();
            }
            Err(e).with_context(|| format!("Failed to convert {}", cmd.input_path.display()))
        }
    }
}

fn report_result(pb: &ProgressBar, json: bool, result: &ProcessingResult) {
    if json {
        let message = match (result.success, result.output_size) {
            (true, Some(size)) => {
                JsonMessage::file_completed(&result.input_path, &result.output_path, size)
            }
            _ => JsonMessage::file_failed(
                &result.input_path,
                result.error.clone().unwrap_or_default(),
            ),
        };
        message.emit();
        return;
    }

    let name = display_name(&result.input_path);
    pb.suspend(|| {
        if result.success {
            println!(
                "  {} {} [{}] -> {}",
                style("✓").green(),
                style(&name).bold(),
                result.source_kind,
                display_name(&result.output_path)
            );
        } else {
            error_println(&format!(
                "Processing failed: {} - {}",
                result.input_path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            ));
        }
    });
    pb.set_message(name);
}

fn run_batch(
    engine: &ProcessingEngine,
    cmd: &CommandLineArgs,
    json: bool,
    verbose: bool,
    report: bool,
) -> Result<()> {
    let pb = batch_progress_bar(json, verbose);

    let (results, summary) = engine
        .process_directory_timed(&cmd.input_path, &cmd.output_path, |index, total, result| {
            pb.set_length(total as u64);
            pb.set_position(index as u64);
            report_result(&pb, json, result);
        })
        .with_context(|| {
            format!(
                "Batch conversion of {} into {} failed",
                cmd.input_path.display(),
                cmd.output_path.display()
            )
        })?;
    pb.finish_and_clear();

    if json {
        JsonMessage::summary(
            summary.total_files,
            summary.successful,
            summary.failed,
            summary.total_duration.as_secs_f64(),
        )
        .emit();
        return Ok(());
    }

    if results.is_empty() {
        warn_println(&format!(
            "No files matching '{}' found in {}",
            engine.options().pattern,
            cmd.input_path.display()
        ));
    }

    println!();
    println!("{}", style("Processing completed!").bold().green());
    println!("  Total: {} files", summary.total_files);
    println!("  Success: {} files", style(summary.successful).bold().green());
    if summary.failed > 0 {
        println!("  Failed: {} files", style(summary.failed).bold().red());
    } else {
        println!("  Failed: 0 files");
    }
    println!("  Output directory: {}", cmd.output_path.display());
    println!(
        "  Total processing time: {}",
        style(format_duration(summary.total_duration)).dim()
    );

    if report && !results.is_empty() {
        BatchReport::new(&results, &summary).print();
    }

    Ok(())
}

fn main() -> Result<()> {
    let mut args = parse_args();
    args.load_and_merge_config()?;
    let cmd = args.to_command_line();

    if !args.json {
        println!("{}", style("Sticker Processor").bold().blue());
        println!();
    }

    if cmd.options.remove_background {
        warn_println("Background removal is not supported; the option is ignored");
    }

    let verbose = args.verbose && !args.json;
    if verbose {
        print_configuration(&cmd);
    }

    let engine = ProcessingEngine::new(cmd.options.clone(), verbose);

    if cmd.is_batch_mode {
        run_batch(&engine, &cmd, args.json, verbose, args.report)
    } else {
        run_single(&engine, &cmd, args.json)
    }
}
