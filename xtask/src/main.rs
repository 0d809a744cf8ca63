// Development tasks for scanline-rs
//
// `cargo run -p xtask -- ci` runs what a merge must pass: fmt, clippy, tests. The
// demo and budget commands drive the `scanline-rs` binary through its
// SCANLINE_* environment overrides.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use std::process::Command;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "x")]
#[command(about = "Development tasks for scanline-rs")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// fmt --check, clippy and the full test suite
    Ci,
    /// Format the workspace
    Fmt {
        /// Only report unformatted files
        #[arg(long)]
        check: bool,
    },
    /// Clippy over every target, warnings denied
    Clippy,
    /// Run tests, optionally only those whose name contains FILTER
    Test {
        /// e.g. `render`, `frame`, `palette`, `laws`
        filter: Option<String>,
    },
    /// Run criterion benchmarks
    Bench {
        /// Only this bench target
        #[arg(long, value_enum)]
        target: Option<BenchTarget>,
    },
    /// Render the demo frame and save a screenshot
    Demo {
        #[command(flatten)]
        run: DemoArgs,
    },
    /// Render the demo in release mode, fail if a frame misses 20 ms
    CheckBudget {
        /// Worker threads (overrides the config file)
        #[arg(long)]
        threads: Option<usize>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum BenchTarget {
    /// Single-line kernels
    Render,
    /// Whole frames
    Frame,
}

impl BenchTarget {
    fn bench_name(self) -> &'static str {
        match self {
            BenchTarget::Render => "render_bench",
            BenchTarget::Frame => "frame_bench",
        }
    }
}

#[derive(clap::Args)]
struct DemoArgs {
    /// Build in release mode
    #[arg(long)]
    release: bool,
    /// Worker threads (overrides the config file)
    #[arg(long)]
    threads: Option<usize>,
    /// Horizontal scale, `1x` or `2x` (overrides the config file)
    #[arg(long)]
    scale: Option<String>,
}

fn main() -> Result<()> {
    match Cli::parse().command {
        Commands::Ci => run_ci(),
        Commands::Fmt { check } => run_fmt(check),
        Commands::Clippy => run_clippy(),
        Commands::Test { filter } => run_test(filter.as_deref()),
        Commands::Bench { target } => run_bench(target),
        Commands::Demo { run } => run_demo(&run, false),
        Commands::CheckBudget { threads } => {
            let run = DemoArgs {
                release: true,
                threads,
                scale: None,
            };
            run_demo(&run, true)
        }
    }
}

fn run_ci() -> Result<()> {
    println!("{}", "=== CI ===".bold().blue());
    let start = Instant::now();

    step("fmt", || run_fmt(true))?;
    step("clippy", run_clippy)?;
    step("test", || run_test(None))?;

    println!(
        "\n{} {:.2}s",
        "✓ CI passed in".green().bold(),
        start.elapsed().as_secs_f64()
    );
    Ok(())
}

fn run_fmt(check: bool) -> Result<()> {
    let mut cmd = cargo("fmt");
    cmd.arg("--all");
    if check {
        cmd.args(["--", "--check"]);
    }
    execute(&mut cmd)
}

fn run_clippy() -> Result<()> {
    let mut cmd = cargo("clippy");
    cmd.args(["--workspace", "--all-targets", "--", "-D", "warnings"]);
    execute(&mut cmd)
}

fn run_test(filter: Option<&str>) -> Result<()> {
    let mut cmd = cargo("test");
    cmd.arg("--workspace");
    if let Some(filter) = filter {
        cmd.arg(filter);
    }
    execute(&mut cmd)
}

fn run_bench(target: Option<BenchTarget>) -> Result<()> {
    let mut cmd = cargo("bench");
    if let Some(target) = target {
        cmd.args(["--bench", target.bench_name()]);
    }
    execute(&mut cmd)
}

fn run_demo(run: &DemoArgs, enforce_budget: bool) -> Result<()> {
    let mut cmd = cargo("run");
    cmd.args(["--bin", "scanline-rs"]);
    if run.release {
        cmd.arg("--release");
    }
    if let Some(threads) = run.threads {
        cmd.env("SCANLINE_THREADS", threads.to_string());
    }
    if let Some(scale) = &run.scale {
        cmd.env("SCANLINE_SCALE", scale);
    }
    if enforce_budget {
        cmd.env("SCANLINE_ENFORCE_BUDGET", "1");
    }

    println!(
        "{} demo ({})",
        "→".blue(),
        if run.release {
            "release".green().bold()
        } else {
            "debug".yellow().bold()
        }
    );
    execute(&mut cmd).context(if enforce_budget {
        "frame budget check failed"
    } else {
        "demo failed"
    })
}

fn step(name: &str, task: impl FnOnce() -> Result<()>) -> Result<()> {
    println!("{} {}", "→".blue(), name.bold());
    let start = Instant::now();
    match task() {
        Ok(()) => {
            println!("{} {} ({:.2}s)", "✓".green(), name, start.elapsed().as_secs_f64());
            Ok(())
        }
        Err(e) => {
            println!("{} {}", "✗".red().bold(), name);
            Err(e)
        }
    }
}

fn cargo(subcommand: &str) -> Command {
    let cargo = std::env::var_os("CARGO").unwrap_or_else(|| "cargo".into());
    let mut cmd = Command::new(cargo);
    cmd.arg(subcommand);
    cmd
}

fn execute(cmd: &mut Command) -> Result<()> {
    let status = cmd
        .status()
        .with_context(|| format!("could not spawn {:?}", cmd))?;
    if !status.success() {
        bail!("{:?} exited with {}", cmd.get_args().collect::<Vec<_>>(), status);
    }
    Ok(())
}
