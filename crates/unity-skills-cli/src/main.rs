//! unity-skills - invoke Unity Editor skills from the command line
//!
//! Usage:
//!   unity-skills <skill_name> [key=value ...]   # Call a skill
//!   unity-skills --list                         # Print the skill listing
//!   unity-skills --health                       # Is the REST server up?
//!   unity-skills --wait 30                      # Wait for it to come back

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use unity_skills_core::prelude::*;

const USAGE: &str = "\
Usage: unity-skills <skill_name> [param=value ...]
       unity-skills --list
       unity-skills --health";

#[derive(Parser, Debug)]
#[command(name = "unity-skills")]
#[command(about = "Invoke Unity Editor skills over REST", long_about = None)]
struct Cli {
    /// Print the skill listing as JSON
    #[arg(long)]
    list: bool,

    /// With --list, print one line per skill instead of JSON
    #[arg(long, requires = "list")]
    brief: bool,

    /// Report whether the Unity REST server is running
    #[arg(long)]
    health: bool,

    /// Wait up to SECS for the Unity REST server to answer
    #[arg(long, value_name = "SECS")]
    wait: Option<f64>,

    /// Delay between polls while waiting
    #[arg(long, value_name = "MS", default_value_t = 500)]
    interval: u64,

    /// Base URL of the Unity REST server (overrides config and UNITY_SKILLS_URL)
    #[arg(long)]
    url: Option<String>,

    /// Skill naming dialect of the server (namespaced or sample)
    #[arg(long)]
    dialect: Option<String>,

    /// Config file (defaults to <config dir>/unity-skills/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log requests to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Skill to invoke
    skill: Option<String>,

    /// Skill parameters; numeric values are sent as numbers
    #[arg(value_name = "KEY=VALUE", trailing_var_arg = true, allow_hyphen_values = true)]
    params: Vec<String>,
}

/// What a single invocation does
#[derive(Debug, Clone, PartialEq)]
enum Action {
    List { brief: bool },
    Health,
    Wait { timeout: Duration, interval: Duration },
    Call(SkillRequest),
}

impl Cli {
    /// `None` when nothing was asked for. A named skill wins over the
    /// flags; among the flags `--list` wins, then `--health`, then `--wait`.
    fn action(&self) -> Result<Option<Action>> {
        if let Some(skill) = &self.skill {
            return Ok(Some(Action::Call(SkillRequest::from_pairs(skill, &self.params))));
        }
        if self.list {
            return Ok(Some(Action::List { brief: self.brief }));
        }
        if self.health {
            return Ok(Some(Action::Health));
        }
        if let Some(secs) = self.wait {
            let timeout = Duration::try_from_secs_f64(secs)
                .with_context(|| format!("Invalid --wait value: {secs}"))?;
            return Ok(Some(Action::Wait {
                timeout,
                interval: Duration::from_millis(self.interval),
            }));
        }
        Ok(None)
    }

    fn client_config(&self) -> Result<ClientConfig> {
        let mut config = ClientConfig::load(self.config.as_deref())?;
        if let Some(url) = &self.url {
            config = config.with_base_url(url)?;
        }
        if let Some(dialect) = &self.dialect {
            let dialect: Dialect = dialect.parse().map_err(|e: String| anyhow::anyhow!(e))?;
            config = config.with_dialect(dialect);
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let Some(action) = cli.action()? else {
        println!("{USAGE}");
        std::process::exit(1);
    };

    let config = cli.client_config()?;
    tracing::debug!(base_url = config.base_url(), dialect = %config.dialect, "resolved config");
    let client = BlockingSkillClient::new(config)?;

    run(&client, action)
}

/// Filter used when `RUST_LOG` is unset. `unity_skills` matches both the
/// binary and `unity_skills_core` targets.
fn default_filter(verbose: bool) -> &'static str {
    if verbose { "unity_skills=debug,info" } else { "warn" }
}

fn init_tracing(verbose: bool) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(verbose).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(client: &BlockingSkillClient, action: Action) -> Result<()> {
    match action {
        Action::List { brief: false } => print_json(&client.get_skills().into_json())?,
        Action::List { brief: true } => match client.manifest() {
            Ok(manifest) => print_skill_table(&manifest),
            Err(err) => print_json(&SkillResponse::Failed(err).into_json())?,
        },
        Action::Health => {
            let state = if client.health() { "running" } else { "not running" };
            println!("Unity server is {state}");
        }
        Action::Wait { timeout, interval } => {
            if client.wait_for_unity(timeout, interval) {
                println!("Unity server is running");
            } else {
                println!(
                    "Unity server did not respond within {}s",
                    timeout.as_secs_f64()
                );
            }
        }
        Action::Call(request) => print_json(&client.call(&request).into_json())?,
    }
    Ok(())
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_skill_table(manifest: &SkillManifest) {
    if manifest.skills.is_empty() {
        println!("No skills registered.");
        return;
    }

    let width = manifest
        .names()
        .map(str::len)
        .max()
        .unwrap_or(0)
        .max("Skill".len());

    println!("  {:<width$}  Description", "Skill");
    println!("  {}", "-".repeat(width + 13));
    for skill in &manifest.skills {
        println!("  {:<width$}  {}", skill.name, skill.description);
    }
    println!("\n{} skills", manifest.skills.len());
}
