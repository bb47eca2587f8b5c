use anyhow::Result;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use osaudit::{
    checker::{default_checker, VulnerabilityChecker},
    config::Config,
    detect,
    exclude::Exclusions,
    model::PackageManager,
    output::{render, OutputFormat},
    parser::parser_for,
    purl::purls,
    ReportCache,
};
use std::io::{BufRead, IsTerminal, Write};
use std::process::ExitCode;
use std::str::FromStr;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Exit codes for CI integration
mod exit_codes {
    pub const SUCCESS: u8 = 0;
    pub const VULNERABLE: u8 = 1;
    pub const ERROR: u8 = 2;
}

#[derive(Parser)]
#[command(name = "osaudit")]
#[command(
    author,
    version,
    about = "Audit installed OS packages for known vulnerabilities"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Audit a package listing read from standard input
    Audit {
        /// Package manager that produced the listing (apk, dpkg, yum, dnf); detected from /etc/os-release when omitted
        #[arg(short = 'm', long)]
        package_manager: Option<String>,

        /// Output format (text, json, csv)
        #[arg(short, long)]
        format: Option<String>,

        /// Include non-vulnerable packages in the output
        #[arg(long)]
        loud: bool,

        /// Suppress the header banner
        #[arg(short, long)]
        quiet: bool,

        /// Disable ANSI colors in text output
        #[arg(long)]
        no_color: bool,

        /// Comma separated list of vulnerability ids to exclude from reporting
        #[arg(short = 'e', long, value_delimiter = ',')]
        exclude_vulnerability: Vec<String>,

        /// File of newline separated vulnerability ids to exclude from reporting
        #[arg(short = 'x', long, default_value = "./.osaudit-ignore")]
        exclude_vulnerability_file: String,

        /// OSS Index username for authenticated requests
        #[arg(short, long)]
        user: Option<String>,

        /// OSS Index API token for authenticated requests
        #[arg(short, long)]
        token: Option<String>,

        /// Clear cached vulnerability reports before auditing
        #[arg(long)]
        clean_cache: bool,
    },

    /// Show or create config file
    Config {
        /// Generate default config file
        #[arg(long)]
        init: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },

    /// Clear cached vulnerability reports
    CleanCache,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_codes::ERROR)
        }
    }
}

async fn run() -> Result<u8> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = Config::load().unwrap_or_default();

    match cli.command {
        Commands::Audit {
            package_manager,
            format,
            loud,
            quiet,
            no_color,
            exclude_vulnerability,
            exclude_vulnerability_file,
            user,
            token,
            clean_cache,
        } => {
            if clean_cache {
                ReportCache::new().clear()?;
                return Ok(exit_codes::SUCCESS);
            }

            let format_str = format.unwrap_or(config.default_format.clone());
            let loud = loud || config.loud;
            let no_color = no_color || config.no_color;
            let user = user.or(config.username.clone());
            let token = token.or(config.token.clone());

            run_audit(
                package_manager,
                format_str,
                loud,
                quiet,
                no_color,
                exclude_vulnerability,
                exclude_vulnerability_file,
                user,
                token,
                config.cache_ttl_hours,
            )
            .await
        }
        Commands::Config { init, path } => {
            handle_config(init, path)?;
            Ok(exit_codes::SUCCESS)
        }
        Commands::CleanCache => {
            ReportCache::new().clear()?;
            println!("Cache cleared.");
            Ok(exit_codes::SUCCESS)
        }
    }
}

#[allow(clippy::too_many_arguments)]
async fn run_audit(
    package_manager: Option<String>,
    format: String,
    loud: bool,
    quiet: bool,
    no_color: bool,
    excluded_ids: Vec<String>,
    exclude_file: String,
    user: Option<String>,
    token: Option<String>,
    cache_ttl_hours: u64,
) -> Result<u8> {
    let format = OutputFormat::from_str(&format).map_err(|e| anyhow::anyhow!(e))?;
    let is_interactive = format == OutputFormat::Text;

    if is_interactive && !quiet {
        print_header();
    }

    // Exclusions are resolved before any network traffic so a malformed
    // `until` date fails fast.
    let mut exclusions = Exclusions::from_file(&exclude_file)?;
    exclusions.extend(excluded_ids);

    let manager = match package_manager {
        Some(name) => PackageManager::from_str(&name).map_err(|e| anyhow::anyhow!(e))?,
        None => detect::detect()?,
    };
    tracing::info!(manager = %manager, "auditing package listing");

    let lines = read_stdin()?;
    let packages = parser_for(manager).parse(&lines);
    tracing::info!(count = packages.len(), "parsed packages");

    let coordinates = purls(manager, &packages);

    let checker = default_checker(user, token, cache_ttl_hours);

    let progress = if is_interactive {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message(format!(
            "Auditing {} packages with {}...",
            coordinates.len(),
            checker.name()
        ));
        Some(pb)
    } else {
        None
    };
    let result = checker.audit(&coordinates).await;

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    let mut reports = result?;
    exclusions.mark(&mut reports);

    let (vulnerable_count, rendered) = render(format, loud, no_color, &reports)?;
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    stdout.flush()?;

    if vulnerable_count > 0 {
        Ok(exit_codes::VULNERABLE)
    } else {
        Ok(exit_codes::SUCCESS)
    }
}

/// Reads the piped package listing. Refuses to run against a terminal
/// because an interactive audit with no input would hang forever.
fn read_stdin() -> Result<Vec<String>> {
    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        anyhow::bail!(
            "nothing passed in to standard input; pipe a package listing, e.g. `dpkg-query -W -f='${{Package}} ${{Version}}\\n' | osaudit audit -m dpkg`"
        );
    }

    let mut lines = Vec::new();
    for line in stdin.lock().lines() {
        lines.push(line?);
    }
    Ok(lines)
}

fn print_header() {
    println!("osaudit {}", env!("CARGO_PKG_VERSION"));
    println!("Audit installed OS packages with Sonatype OSS Index");
    println!();
}

fn handle_config(init: bool, path: bool) -> Result<()> {
    let config_path = Config::config_path();

    if path {
        println!("{}", config_path.display());
        return Ok(());
    }

    if init {
        if config_path.exists() {
            println!("Config file already exists: {}", config_path.display());
            return Ok(());
        }

        Config::default().save()?;
        println!("Created config file: {}", config_path.display());
        return Ok(());
    }

    if config_path.exists() {
        let contents = std::fs::read_to_string(&config_path)?;
        println!("{}", contents);
    } else {
        println!("No config file found at: {}", config_path.display());
        println!("Run with --init to create one.");
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "error",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("osaudit={default_level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
