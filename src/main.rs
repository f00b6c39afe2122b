//! Binary entry point for the `dedup-bench` command-line tool.
//!
//! # Control flow
//!
//! 1. `Args::parse()` processes all flags (clap exits on `--help`/`--version`
//!    and on malformed input).
//! 2. [`run`] resolves variants and the workload source, then hands them to
//!    the bench layer.
//! 3. `main` maps the outcome onto the process exit code.

use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::Parser;

use dedup_append::bench::{bench_values, bench_workloads};
use dedup_append::cli::args::Args;
use dedup_append::cli::constants::{set_display_level, PROGRAM_NAME};
use dedup_append::workload::split_lines;
use dedup_append::{display, displaylevel};

fn run(args: &Args) -> anyhow::Result<()> {
    set_display_level(args.display_level());
    displaylevel!(3, "*** {} v{} ***\n", PROGRAM_NAME, dedup_append::version_string());

    let variants = args.variants()?;
    if variants.is_empty() {
        bail!("bad usage: no cache variant selected");
    }
    let config = args.bench_config();

    if let Some(path) = &args.input {
        if !args.content {
            displaylevel!(
                2,
                "warning: lines of {} are separate storage; address keys will not dedup them (try --content)\n",
                path.display()
            );
        }
        let data = std::fs::read(path)
            .with_context(|| format!("cannot read input file {}", path.display()))?;
        let values = split_lines(&data);
        displaylevel!(3, "{}: {} values, {} bytes\n", path.display(), values.len(), data.len());
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        bench_values(&values, &name, &variants, &config)
            .with_context(|| format!("benchmark failed on {}", path.display()))?;
        return Ok(());
    }

    let seed = args.seed();
    displaylevel!(4, "seed {}, cardinality {}\n", seed, args.cardinality);
    bench_workloads(&args.uniques()?, args.cardinality, seed, &variants, &config)
        .context("benchmark failed")?;
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            display!("{}: {:#}\n", PROGRAM_NAME, e);
            ExitCode::FAILURE
        }
    }
}
