//! CLI command definitions for runcheck.
//!
//! Four commands cover the toolkit: `check` classifies an already-captured
//! run, `run` and `suite` execute commands and classify them, and `env`
//! prints the CI environment file.

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use crate::classifier::{classify, Verdict};
use crate::envfile;
use crate::runner::{load_suite, CaseResult, CommandRunner, RunConfig, RunnerError, SuiteSummary};

/// Default per-command timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// CI test-run validation toolkit.
#[derive(Parser)]
#[command(name = "runcheck")]
#[command(about = "Classify test-run output and drive CI test suites")]
#[command(version)]
#[command(
    long_about = "runcheck decides whether a test run passed by scanning its captured output for marker lines.\n\nIt can classify output you already captured (check), execute a command and classify it (run), drive a whole suite file (suite), or print the CI environment file (env).\n\nExample usage:\n  runcheck run --timeout 600 'busybox sh busybox_testcode.sh'\n  some-test | runcheck check"
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info", global = true)]
    pub log_level: String,
}

/// Available CLI subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Classify an already-captured test run from its exit code and output.
    Check(CheckArgs),

    /// Execute a single test command and classify its output.
    Run(RunArgs),

    /// Execute every command in a suite file and summarize the results.
    ///
    /// A suite file lists one shell command per line; blank lines and
    /// `#` comments are skipped. Cases that hit the timeout are recorded
    /// as failures and the suite continues.
    Suite(SuiteArgs),

    /// Print the CI environment file named by GITHUB_ENV.
    Env(EnvArgs),
}

/// Arguments for `runcheck check`.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Exit code of the test command.
    #[arg(short = 'c', long, default_value = "0", allow_hyphen_values = true)]
    pub exit_code: i32,

    /// File holding the captured output (stdin when omitted).
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Treat marker-free output as a failure.
    #[arg(long)]
    pub strict: bool,

    /// Output the verdict as JSON.
    #[arg(short, long)]
    pub json: bool,
}

/// Arguments for `runcheck run`.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Shell command to execute.
    pub command: String,

    /// Shell used to interpret the command.
    #[arg(long, default_value = "sh", env = "RUNCHECK_SHELL")]
    pub shell: String,

    /// Per-command timeout in seconds.
    #[arg(short, long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Extra environment variable for the command (repeatable).
    #[arg(short, long = "env", value_name = "KEY=VALUE")]
    pub env_vars: Vec<String>,

    /// Working directory for the command.
    #[arg(short, long)]
    pub workdir: Option<PathBuf>,

    /// Treat marker-free output as a failure.
    #[arg(long)]
    pub strict: bool,

    /// Output the full case result as JSON.
    #[arg(short, long)]
    pub json: bool,
}

/// Arguments for `runcheck suite`.
#[derive(Parser, Debug)]
pub struct SuiteArgs {
    /// Suite file: one shell command per line.
    pub file: PathBuf,

    /// Shell used to interpret the commands.
    #[arg(long, default_value = "sh", env = "RUNCHECK_SHELL")]
    pub shell: String,

    /// Per-command timeout in seconds.
    #[arg(short, long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Extra environment variable for the commands (repeatable).
    #[arg(short, long = "env", value_name = "KEY=VALUE")]
    pub env_vars: Vec<String>,

    /// Working directory for the commands.
    #[arg(short, long)]
    pub workdir: Option<PathBuf>,

    /// Treat marker-free output as a failure.
    #[arg(long)]
    pub strict: bool,

    /// Output the full suite summary as JSON.
    #[arg(short, long)]
    pub json: bool,
}

/// Arguments for `runcheck env`.
#[derive(Parser, Debug)]
pub struct EnvArgs {
    /// Environment file path (resolved from GITHUB_ENV when omitted).
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Output the parsed entries as JSON.
    #[arg(short, long)]
    pub json: bool,
}

/// Parses CLI arguments from the process command line.
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Runs the CLI with pre-parsed arguments.
///
/// The returned exit code follows the verdict: success when the check,
/// run, or suite passed, failure otherwise.
pub async fn run_with_cli(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.command {
        Commands::Check(args) => cmd_check(args),
        Commands::Run(args) => cmd_run(args).await,
        Commands::Suite(args) => cmd_suite(args).await,
        Commands::Env(args) => cmd_env(args),
    }
}

/// Classifies captured output supplied via file or stdin.
fn cmd_check(args: CheckArgs) -> anyhow::Result<ExitCode> {
    let captured = match &args.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read captured output from {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read captured output from stdin")?;
            buffer
        }
    };

    let mut verdict = classify(args.exit_code, &captured);
    if args.strict {
        verdict = verdict.strict();
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&verdict)?);
    } else {
        print_verdict(&verdict);
    }
    Ok(exit_for(verdict.passed))
}

/// Executes a single command and classifies it.
async fn cmd_run(args: RunArgs) -> anyhow::Result<ExitCode> {
    let config = run_config(
        &args.shell,
        args.timeout,
        &args.env_vars,
        args.workdir.clone(),
        args.strict,
    )?;
    let runner = CommandRunner::new(config);

    let result = match runner.run(&args.command).await {
        Ok(result) => result,
        Err(RunnerError::Timeout(timeout)) => CaseResult::timed_out(&args.command, timeout),
        Err(e) => return Err(e.into()),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_verdict(&result.verdict);
    }
    Ok(exit_for(result.is_success()))
}

/// Runs a suite file and prints the aggregate summary.
async fn cmd_suite(args: SuiteArgs) -> anyhow::Result<ExitCode> {
    let commands = load_suite(&args.file)
        .with_context(|| format!("Failed to load suite from {}", args.file.display()))?;
    info!("Loaded {} case(s) from {}", commands.len(), args.file.display());

    let config = run_config(
        &args.shell,
        args.timeout,
        &args.env_vars,
        args.workdir.clone(),
        args.strict,
    )?;
    let runner = CommandRunner::new(config);
    let summary = runner.run_suite(&commands).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }
    Ok(exit_for(summary.all_passed()))
}

/// Prints the CI environment file.
fn cmd_env(args: EnvArgs) -> anyhow::Result<ExitCode> {
    let path = match args.file {
        Some(path) => path,
        None => envfile::env_file_path()?,
    };

    if args.json {
        let entries = envfile::read_entries(&path)?;
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        for line in envfile::read_lines(&path)? {
            println!("{}", line);
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Builds a [`RunConfig`] from CLI flags.
fn run_config(
    shell: &str,
    timeout_secs: u64,
    env_vars: &[String],
    workdir: Option<PathBuf>,
    strict: bool,
) -> anyhow::Result<RunConfig> {
    let mut config = RunConfig::new()
        .with_shell(shell)
        .with_timeout(Duration::from_secs(timeout_secs))
        .with_strict(strict);

    for pair in env_vars {
        let (key, value) = pair
            .split_once('=')
            .with_context(|| format!("Invalid --env value '{}': expected KEY=VALUE", pair))?;
        config = config.with_env(key, value);
    }
    if let Some(dir) = workdir {
        config = config.with_working_dir(dir);
    }
    Ok(config)
}

fn print_verdict(verdict: &Verdict) {
    println!("{}", verdict.message);
}

fn print_summary(summary: &SuiteSummary) {
    for result in &summary.results {
        let status = if result.is_success() { "PASS" } else { "FAIL" };
        println!("[{}] {} ({})", status, result.command, result.verdict.message);
    }
    println!(
        "{}/{} cases passed ({:.1}%)",
        summary.passed,
        summary.total,
        summary.pass_rate()
    );
}

fn exit_for(passed: bool) -> ExitCode {
    if passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_check_defaults() {
        let cli = Cli::try_parse_from(["runcheck", "check"]).unwrap();
        match cli.command {
            Commands::Check(args) => {
                assert_eq!(args.exit_code, 0);
                assert!(args.input.is_none());
                assert!(!args.strict);
                assert!(!args.json);
            }
            _ => panic!("expected check subcommand"),
        }
    }

    #[test]
    fn test_parse_check_negative_exit_code() {
        let cli = Cli::try_parse_from(["runcheck", "check", "--exit-code", "-1"]).unwrap();
        match cli.command {
            Commands::Check(args) => assert_eq!(args.exit_code, -1),
            _ => panic!("expected check subcommand"),
        }
    }

    #[test]
    fn test_parse_run_flags() {
        let cli = Cli::try_parse_from([
            "runcheck",
            "run",
            "--timeout",
            "30",
            "-e",
            "AX_TC=busybox",
            "--strict",
            "busybox sh test_all.sh",
        ])
        .unwrap();
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.command, "busybox sh test_all.sh");
                assert_eq!(args.timeout, 30);
                assert_eq!(args.env_vars, vec!["AX_TC=busybox".to_string()]);
                assert!(args.strict);
            }
            _ => panic!("expected run subcommand"),
        }
    }

    #[test]
    fn test_run_config_from_flags() {
        let config = run_config(
            "bash",
            60,
            &["A=1".to_string(), "B=two=2".to_string()],
            Some(PathBuf::from("/tmp")),
            true,
        )
        .unwrap();

        assert_eq!(config.shell, "bash");
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(
            config.env_vars,
            vec![
                ("A".to_string(), "1".to_string()),
                ("B".to_string(), "two=2".to_string()),
            ]
        );
        assert!(config.strict);
    }

    #[test]
    fn test_run_config_rejects_malformed_env() {
        let err = run_config("sh", 60, &["NOT_A_PAIR".to_string()], None, false).unwrap_err();
        assert!(err.to_string().contains("NOT_A_PAIR"));
    }
}
