//! Wordlist Forge - Name-based password wordlist generation for penetration testing
//!
//! Main entry point for the command-line application.

use clap::Parser;
use std::process;

use wordlist_forge::analyze::analyze_file;
use wordlist_forge::cli::Args;
use wordlist_forge::config::GeneratorConfig;
use wordlist_forge::engine::{create_generator, ProgressCallback, RunState};
use wordlist_forge::monitor::create_probe;
use wordlist_forge::output::{generate_output_path, LineSink, StreamWriter};
use wordlist_forge::progress::{
    create_spinner, format_number, print_analysis_report, print_banner, print_error,
    print_generation_summary, print_header, print_info, print_warning,
};

fn main() {
    // Parse command-line arguments
    let args = Args::parse();

    // Set up logging
    if args.verbose {
        std::env::set_var("RUST_LOG", "debug");
    } else if !args.quiet {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    // Run the application
    if let Err(e) = run(args) {
        print_error(&format!("{}", e));

        // Print chain of errors
        let mut source = e.source();
        while let Some(err) = source {
            print_error(&format!("  Caused by: {}", err));
            source = err.source();
        }

        process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    // Print banner unless quiet mode
    if !args.quiet {
        print_banner();
    }

    if let Some(path) = args.analyze.clone() {
        run_analysis(&args, &path)
    } else {
        run_generation(&args)
    }
}

/// Count exact duplicates in an existing wordlist
fn run_analysis(args: &Args, path: &std::path::Path) -> anyhow::Result<()> {
    let spinner = if args.quiet {
        indicatif::ProgressBar::hidden()
    } else {
        create_spinner(&format!("Analyzing {:?}...", path))
    };

    let report = analyze_file(path)?;
    spinner.finish_and_clear();

    if args.quiet {
        println!(
            "{} {} {} {:.2}%",
            report.total_words,
            report.unique_words,
            report.duplicated_words,
            report.duplicate_percentage
        );
    } else {
        print_analysis_report(&report, &path.display().to_string());
    }

    Ok(())
}

/// Generate a wordlist from the target's names
fn run_generation(args: &Args) -> anyhow::Result<()> {
    let config = config_from_args(args)?;

    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| {
            generate_output_path(args.mode.as_str(), &config.first_name, &config.last_name)
        });

    if !args.quiet && args.verbose {
        print_config(args, &config);
    }

    let spinner = if args.quiet {
        indicatif::ProgressBar::hidden()
    } else {
        create_spinner("Generating candidates...")
    };

    // Surface engine progress and system notices through the spinner
    let progress = spinner.clone();
    let callback: ProgressCallback = Box::new(move |sample, generated, duplicates| {
        if let Some(notice) = sample.strip_prefix("[SYSTEM] ") {
            progress.println(format!("  {}", notice));
        } else if generated % 1000 == 0 {
            progress.set_message(format!(
                "Generating... {} words ({} duplicates skipped)",
                format_number(generated),
                format_number(duplicates)
            ));
        }
    });

    let mut engine = create_generator(args.mode, config, create_probe(), Some(callback));
    let mut writer = StreamWriter::new(output_path.clone())?;

    let write_result = (|| -> anyhow::Result<()> {
        while let Some(candidate) = engine.next() {
            writer.accept(&candidate)?;
        }
        Ok(())
    })();

    // Flush whatever was generated, even when the write loop failed
    writer.close()?;
    write_result?;

    spinner.finish_and_clear();

    let snapshot = engine.stats().snapshot();
    log::info!(
        "run finished: {} words, {} duplicates, state {:?}",
        snapshot.generated,
        snapshot.duplicates,
        engine.state()
    );

    if args.quiet {
        println!("{}", output_path.display());
    } else {
        print_generation_summary(
            &snapshot,
            engine.state(),
            engine.seed_count(),
            &output_path.display().to_string(),
        );
    }

    if engine.state() == RunState::HaltedResourceLimit && args.quiet {
        print_warning("generation stopped early due to resource limits");
    }

    Ok(())
}

/// Build the generator configuration from validated arguments
fn config_from_args(args: &Args) -> anyhow::Result<GeneratorConfig> {
    let first_name = args
        .first_name
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("--first-name is required for generation"))?;
    let last_name = args
        .last_name
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("--last-name is required for generation"))?;

    let mut config = GeneratorConfig::new(
        first_name,
        last_name,
        args.middle_name.as_deref(),
        args.min_length,
        args.max_length,
    )?;

    config.enable_leet = !args.no_leet;
    config.enable_capitals = !args.no_capitals;
    config.append_numbers = !args.no_append_numbers;
    config.prepend_numbers = !args.no_prepend_numbers;
    config.special_chars = !args.no_special_chars;

    Ok(config)
}

/// Print configuration summary
fn print_config(args: &Args, config: &GeneratorConfig) {
    print_header("Configuration");

    print_info(&format!("First name:   {}", config.first_name));
    if let Some(ref middle) = config.middle_name {
        print_info(&format!("Middle name:  {}", middle));
    }
    print_info(&format!("Last name:    {}", config.last_name));
    print_info(&format!("Mode:         {}", args.mode.as_str()));
    print_info(&format!(
        "Length:       {}-{}",
        config.min_length, config.max_length
    ));
    print_info(&format!("Leet:         {}", config.enable_leet));
    print_info(&format!("Capitals:     {}", config.enable_capitals));
    print_info(&format!("Append nums:  {}", config.append_numbers));
    print_info(&format!("Prepend nums: {}", config.prepend_numbers));
    print_info(&format!("Specials:     {}", config.special_chars));
}
