// VLAN Config Faker - Main Entry Point
//
// You can run it via Cargo:
//
// ```console
// $ cargo build --release
// $ ./target/release/vlan-config-faker generate --count 100 --seed 42
// ```
//
// Or check an existing fixture file:
//
// ```console
// $ ./target/release/vlan-config-faker validate --input vlans.csv
// ```

use anyhow::Context;
use clap::Parser;
use std::io;
use std::process;
use tracing::{error, info};
use vlan_config_faker::catalog::DepartmentCatalog;
use vlan_config_faker::generation::{
    progress_enabled, BarProgress, GeneratorError, LoggingConfig, RecordAllocator,
};
use vlan_config_faker::output::{read_csv_file, write_records, write_to_path};
use vlan_config_faker::types::{CliArgs, Command, GenerateArgs, GeneratorConfig, ValidateArgs};
use vlan_config_faker::validate::BatchValidator;

fn main() {
    let args = CliArgs::parse();

    // Handle special CLI flags that don't require full initialization
    if let Command::Generate(generate) = &args.command {
        if generate.print_config {
            match GeneratorConfig::default().print_json() {
                Ok(json) => {
                    println!("{}", json);
                    return;
                }
                Err(e) => {
                    eprintln!("Failed to serialize default configuration: {}", e);
                    process::exit(1);
                }
            }
        }
    }

    let _logging_guard = match LoggingConfig::from_verbosity(args.verbose, args.debug).init() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            process::exit(1);
        }
    };

    info!("Starting VLAN Config Faker");

    let result = match &args.command {
        Command::Generate(generate) => run_generate(generate, args.quiet),
        Command::Validate(validate) => run_validate(validate, args.quiet),
    };

    if let Err(e) = result {
        error!("{:#}", e);
        eprintln!("Error: {:#}", e);

        let generator_error = e.chain().find_map(|cause| cause.downcast_ref::<GeneratorError>());
        if let Some(err) = generator_error {
            if err.is_exhausted() {
                eprintln!("Hint: reduce --count, widen the VLAN range, or choose another seed.");
            }
        }
        process::exit(generator_error.map(GeneratorError::exit_code).unwrap_or(1));
    }

    info!("VLAN Config Faker completed successfully");
}

/// Load, validate and run one generation
fn run_generate(args: &GenerateArgs, quiet: bool) -> anyhow::Result<()> {
    let config = GeneratorConfig::from_generate_args(args)
        .map_err(GeneratorError::from)
        .context("Failed to load configuration")?;
    config.validate().map_err(GeneratorError::from).context("Configuration validation failed")?;
    let format = config.get_output_format().map_err(GeneratorError::from)?;

    info!("Configuration loaded and validated successfully");

    if args.dry_run {
        eprintln!("Configuration validation successful!");
        eprintln!("Dry run mode - no records will be generated.");
        print_configuration_summary(&config, config.seed);
        return Ok(());
    }

    let (seed, drawn) = config.resolve_seed();
    if drawn {
        info!(seed, "Drew random seed; pass --seed {} to replay this run", seed);
        // quiet mode skips the summary
        if quiet {
            eprintln!("Random Seed: {}", seed);
        }
    }
    if !quiet {
        print_configuration_summary(&config, Some(seed));
    }

    let mut allocator = RecordAllocator::from_config(&config, seed);
    // stdout output stays clean of bar redraws
    let mut progress = BarProgress::new(progress_enabled(quiet) && config.output.is_some());
    let records = allocator.generate_with_progress(&mut progress)?;

    match &config.output {
        Some(path) => {
            write_to_path(&records, format, path, config.force)
                .with_context(|| format!("Failed to write {}", path))?;
            info!("Wrote {} records to {}", records.len(), path);
        }
        None => {
            let stdout = io::stdout();
            write_records(&records, format, stdout.lock())?;
        }
    }

    if !quiet {
        eprintln!("{}", allocator.statistics().summary());
    }
    Ok(())
}

/// Read a CSV fixture file and check the batch invariants
fn run_validate(args: &ValidateArgs, quiet: bool) -> anyhow::Result<()> {
    let catalog = DepartmentCatalog::standard();
    let records = read_csv_file(&args.input, &catalog)
        .with_context(|| format!("Failed to read {}", args.input))?;

    BatchValidator::new(args.vlan_id_min, args.vlan_id_max)
        .check_all(&records)
        .map_err(GeneratorError::from)
        .with_context(|| format!("{} failed validation", args.input))?;

    if !quiet {
        eprintln!("{}: {} records valid", args.input, records.len());
    }
    Ok(())
}

/// Print configuration summary
fn print_configuration_summary(config: &GeneratorConfig, seed: Option<u64>) {
    eprintln!("Configuration:");
    eprintln!("  Record Count: {}", config.count);
    eprintln!(
        "  VLAN Range: {} - {} ({} IDs)",
        config.vlan_id_min,
        config.vlan_id_max,
        config.vlan_space()
    );
    eprintln!("  Class Policy: {}", config.class_policy);
    eprintln!("  Output Format: {}", config.output_format);
    eprintln!("  Output: {}", config.output.as_deref().unwrap_or("stdout"));
    match seed {
        Some(seed) => eprintln!("  Random Seed: {}", seed),
        None => eprintln!("  Random Seed: (drawn at run time)"),
    }
    eprintln!();
}
