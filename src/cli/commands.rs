use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::services::CacheOutcome;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::domain::OrgChartDisplay;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Composite { seed }) => cmd_composite(*seed),
        Some(Commands::Proxy { keys, repeat }) => cmd_proxy(keys, *repeat),
        Some(Commands::Config { command }) => cmd_config(command),
        Some(Commands::Completion { shell }) => {
            cmd_completion(*shell);
            Ok(())
        }
        None => Err(CliError::Usage(
            "no command given, run with --help for usage".into(),
        )),
    }
}

#[instrument]
fn cmd_composite(seed: Option<u64>) -> CliResult<()> {
    let mut settings = Settings::load()?;
    if seed.is_some() {
        settings.revenue.seed = seed;
    }
    debug!("revenue settings: {:?}", settings.revenue);

    let container = ServiceContainer::new(settings)?;
    let service = container.org_chart_service();
    let sample = service.sample_chart()?;

    output::header("Description");
    print!("{}", sample.chart.describe(sample.root)?);

    output::header("Structure");
    print!("{}", sample.chart.to_tree(sample.root)?);

    output::header("Revenue");
    let report = service.report(&sample.chart, sample.root)?;
    for (name, amount) in &report.entries {
        output::detail(&format!("{:<10} {:>6}", name, amount));
    }
    output::action("total", &report.total);
    Ok(())
}

#[instrument]
fn cmd_proxy(keys: &[String], repeat: usize) -> CliResult<()> {
    if repeat == 0 {
        return Err(CliError::InvalidArgs("--repeat must be at least 1".into()));
    }

    let container = ServiceContainer::new(Settings::load()?)?;
    let proxy = container.caching_downloader();

    for key in keys {
        for _ in 0..repeat {
            let fetched = proxy.fetch(key);
            let content = fetched.content.as_deref().unwrap_or("<empty>");
            let line = format!("{} -> {}", key, content);
            match fetched.outcome {
                CacheOutcome::Miss => output::action(&fetched.outcome.to_string(), &line),
                CacheOutcome::Hit => output::cached(&fetched.outcome.to_string(), &line),
            }
        }
    }

    let stats = proxy.stats();
    output::success(&format!(
        "{} requests: {} downloads, {} cache reads, {} cached keys",
        stats.requests(),
        stats.misses,
        stats.hits,
        proxy.len()
    ));
    Ok(())
}

fn cmd_config(command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load()?;
            let rendered = settings.to_toml().map_err(|e| InfraError::Render {
                what: "settings".into(),
                message: e.to_string(),
            })?;
            output::info(rendered.trim_end());
        }
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => output::error("no config directory available on this platform"),
        },
    }
    Ok(())
}

fn cmd_completion(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}
