//! CLI entry point for storeguard.
//!
//! Argument parsing, file I/O, logging setup and exit codes. All checking logic lives in
//! the `storeguard-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use std::collections::BTreeMap;
use storeguard_app::{
    CheckInput, ExplainOutput, format_explanation, format_not_found, list_rules,
    parse_report_json, render_annotations, render_markdown, run_check, run_explain,
    runtime_error_report, serialize_report, to_renderable, verdict_exit_code,
};
use storeguard_settings::Overrides;
use storeguard_types::StoreguardReport;

#[derive(Parser, Debug)]
#[command(
    name = "storeguard",
    version,
    about = "Pre-submission configuration checks for iOS projects"
)]
struct Cli {
    /// Directory containing the iOS project.
    #[arg(long, default_value = ".")]
    project_root: Utf8PathBuf,

    /// Path to storeguard config TOML, relative to the project root.
    #[arg(long, default_value = "storeguard.toml")]
    config: Utf8PathBuf,

    /// Override profile (strict|warn).
    #[arg(long)]
    profile: Option<String>,

    /// Override maximum findings to emit.
    #[arg(long)]
    max_findings: Option<u32>,

    /// Log at debug level (STOREGUARD_LOG takes precedence).
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the rules and write artifacts.
    Check {
        /// Where to write the JSON report.
        #[arg(long, default_value = "artifacts/storeguard/report.json")]
        report_out: Utf8PathBuf,

        /// Write a Markdown report alongside the JSON.
        #[arg(long)]
        write_markdown: bool,

        /// Where to write the Markdown report (if enabled).
        #[arg(long, default_value = "artifacts/storeguard/comment.md")]
        markdown_out: Utf8PathBuf,
    },

    /// List registered rules and the environment variables that gate them.
    Rules,

    /// Render markdown from an existing JSON report.
    Md {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/storeguard/report.json")]
        report: Utf8PathBuf,

        /// Where to write the Markdown output (stdout if omitted).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Render GitHub Actions annotations from an existing JSON report.
    Annotations {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/storeguard/report.json")]
        report: Utf8PathBuf,

        /// Maximum number of annotations to emit.
        #[arg(long, default_value = "10")]
        max: usize,
    },

    /// Explain a rule key or finding code with remediation guidance.
    Explain {
        /// The rule key (e.g. "verify_firebase_dynamic_links") or code (e.g. "missing_entitlements").
        identifier: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    match &cli.cmd {
        Commands::Check {
            report_out,
            write_markdown,
            markdown_out,
        } => cmd_check(&cli, report_out, *write_markdown, markdown_out),
        Commands::Rules => {
            cmd_rules();
            Ok(())
        }
        Commands::Md { report, output } => cmd_md(report, output.as_deref()),
        Commands::Annotations { report, max } => cmd_annotations(report, *max),
        Commands::Explain { identifier } => cmd_explain(identifier),
    }
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("STOREGUARD_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

fn cmd_check(
    cli: &Cli,
    report_out: &Utf8Path,
    write_markdown: bool,
    markdown_out: &Utf8Path,
) -> anyhow::Result<()> {
    let project_root = cli
        .project_root
        .canonicalize_utf8()
        .unwrap_or_else(|_| cli.project_root.clone());

    let result = (|| -> anyhow::Result<i32> {
        if !project_root.is_dir() {
            anyhow::bail!("project root does not exist: {}", project_root);
        }

        // A missing config file is allowed (the profile preset applies).
        let cfg_path = project_root.join(&cli.config);
        let cfg_text = if cfg_path.is_file() {
            std::fs::read_to_string(&cfg_path)
                .with_context(|| format!("read config: {}", cfg_path))?
        } else {
            tracing::debug!(path = %cfg_path, "no config file; using profile defaults");
            String::new()
        };

        let overrides = Overrides {
            profile: cli.profile.clone(),
            max_findings: cli.max_findings,
            env: process_env(),
        };

        let output = run_check(CheckInput {
            project_root: &project_root,
            config_text: &cfg_text,
            overrides,
        })?;

        write_report_file(report_out, &output.report).context("write report json")?;
        if write_markdown {
            let md = render_markdown(&to_renderable(&output.report));
            write_text_file(markdown_out, &md).context("write markdown")?;
        }

        Ok(verdict_exit_code(output.report.verdict))
    })();

    match result {
        Ok(0) => Ok(()),
        Ok(code) => std::process::exit(code),
        Err(err) => {
            let report = runtime_error_report(&format!("{err:#}"));
            if let Err(write_err) = write_report_file(report_out, &report) {
                tracing::error!(error = %format!("{write_err:#}"), "could not write error report");
            }
            eprintln!("storeguard error: {err:#}");
            std::process::exit(1);
        }
    }
}

/// The process environment, read once. Non-UTF-8 variables are ignored.
fn process_env() -> BTreeMap<String, String> {
    std::env::vars_os()
        .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
        .collect()
}

fn write_report_file(path: &Utf8Path, report: &StoreguardReport) -> anyhow::Result<()> {
    let data = serialize_report(report)?;
    create_parent(path)?;
    std::fs::write(path, data).with_context(|| format!("write report: {}", path))
}

fn write_text_file(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    create_parent(path)?;
    std::fs::write(path, text).with_context(|| format!("write text: {}", path))
}

fn create_parent(path: &Utf8Path) -> anyhow::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => std::fs::create_dir_all(parent)
            .with_context(|| format!("create directory: {}", parent)),
        _ => Ok(()),
    }
}

fn read_report(path: &Utf8Path) -> anyhow::Result<StoreguardReport> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("read report: {}", path))?;
    parse_report_json(&text)
}

fn cmd_rules() {
    for rule in list_rules() {
        println!("{}  ({})", rule.key, rule.friendly_name);
        println!("    env: {}", rule.env_name);
        println!("    {}", rule.description);
        if let Some(url) = rule.documentation_url {
            println!("    docs: {}", url);
        }
    }
}

fn cmd_md(report_path: &Utf8Path, output: Option<&Utf8Path>) -> anyhow::Result<()> {
    let report = read_report(report_path)?;
    let md = render_markdown(&to_renderable(&report));

    match output {
        Some(out_path) => write_text_file(out_path, &md).context("write markdown output"),
        None => {
            print!("{}", md);
            Ok(())
        }
    }
}

fn cmd_annotations(report_path: &Utf8Path, max: usize) -> anyhow::Result<()> {
    let report = read_report(report_path)?;
    for annotation in render_annotations(&to_renderable(&report), max) {
        println!("{}", annotation);
    }
    Ok(())
}

fn cmd_explain(identifier: &str) -> anyhow::Result<()> {
    match run_explain(identifier) {
        ExplainOutput::Found(exp) => {
            print!("{}", format_explanation(&exp));
            Ok(())
        }
        ExplainOutput::NotFound {
            identifier,
            available_check_ids,
            available_codes,
        } => {
            eprint!(
                "{}",
                format_not_found(&identifier, available_check_ids, available_codes)
            );
            std::process::exit(1);
        }
    }
}
