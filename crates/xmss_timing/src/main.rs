use std::env;
use std::process::ExitCode;

use xmss_timing::{
    resolve, variants, BenchmarkConfig, BenchmarkReport, Family,
    HarnessError, MESSAGE_LEN, NTESTS,
};

fn parse_usize_env(name: &str, default: usize) -> Result<usize, HarnessError> {
    match env::var(name) {
        Ok(value) => value.parse::<usize>().map_err(|err| {
            HarnessError::configuration(format!("{name}={value:?}: {err}"))
        }),
        Err(_) => Ok(default),
    }
}

fn load_config() -> Result<(Family, BenchmarkConfig), HarnessError> {
    let family = match env::var("XMSS_FAMILY") {
        Ok(value) => value.parse::<Family>()?,
        Err(_) => Family::Xmss,
    };
    let mut config = BenchmarkConfig::new(family)
        .with_iterations(parse_usize_env("XMSS_ITERATIONS", NTESTS)?)
        .with_message_len(parse_usize_env("XMSS_MESSAGE_SIZE", MESSAGE_LEN)?);
    if let Ok(variant) = env::var("XMSS_VARIANT") {
        config = config.with_variant(variant);
    }
    Ok((family, config))
}

#[cfg(xmss_reference)]
fn run_benchmark(
    config: &BenchmarkConfig,
) -> Result<BenchmarkReport, HarnessError> {
    xmss_timing::Harness::new(xmss_timing::ReferenceBackend).run(config)
}

#[cfg(not(xmss_reference))]
fn run_benchmark(
    config: &BenchmarkConfig,
) -> Result<BenchmarkReport, HarnessError> {
    config.validate()?;
    resolve(&config.variant)?;
    Err(HarnessError::BackendUnavailable(
        "set XMSS_REFERENCE_DIR to the xmss-reference sources and rebuild",
    ))
}

fn print_supported(family: Family) {
    eprintln!("supported {family} variants:");
    for name in variants(family) {
        eprintln!("  {name}");
    }
}

fn main() -> ExitCode {
    let (family, config) = match load_config() {
        Ok(loaded) => loaded,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    println!("Testing variant {}", config.variant);
    println!("Running {} iterations\n", config.iterations);
    println!("Running {} iterations...", config.iterations);

    match run_benchmark(&config) {
        Ok(report) => {
            println!("\n{report}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");
            if resolve(&config.variant).is_err() {
                print_supported(family);
            }
            ExitCode::FAILURE
        }
    }
}
