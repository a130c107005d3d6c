//! Run subcommand: drive one scenario against a live browser.

use std::sync::Arc;

use tracing::{info, warn};

use formpilot_browser::{BrowserManager, BrowserManagerConfig, PageSession};
use formpilot_config::{Config, ConfigLoader, ConfigValidator};
use formpilot_engine::{CdpFormPage, Scenario, ScenarioReport};

use crate::cli::RunArgs;

/// Fold command-line overrides into the loaded configuration.
pub(crate) fn apply_overrides(config: &mut Config, args: &RunArgs) {
    if let Some(url) = &args.url {
        config.target.url = url.clone();
    }
    if args.headless {
        config.browser.headless = true;
    }
    if let Some(dir) = &args.artifacts_dir {
        config.artifacts.dir = dir.clone();
    }
    let expanded = ConfigLoader::expand_path(&config.artifacts.dir.to_string_lossy());
    config.artifacts.dir = expanded.into();
}

fn manager_config(config: &Config) -> BrowserManagerConfig {
    BrowserManagerConfig {
        debug_port: config.browser.debug_port,
        viewport_width: config.browser.viewport_width,
        viewport_height: config.browser.viewport_height,
        profile_dir: config.browser.profile_dir.clone(),
        headless: config.browser.headless,
        launch: config.browser.launch,
    }
}

pub(crate) async fn run_scenario(mut config: Config, args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    apply_overrides(&mut config, &args);
    for warning in ConfigValidator::validate(&config)?.into_result()? {
        warn!("{}: {}", warning.path, warning.message);
    }

    info!("Starting FormPilot v{}", env!("CARGO_PKG_VERSION"));
    let manager = BrowserManager::new(manager_config(&config));
    let session = acquire_page(&manager, &config, args.attach).await?;
    session.wait_for_load().await?;

    let page = CdpFormPage::new(Arc::clone(&session));
    let mut scenario = Scenario::new(&page, &config);
    if let Some(seed) = args.seed {
        scenario = scenario.with_seed(seed);
    }
    let outcome = scenario.run().await;

    if !args.keep_open {
        if !args.attach {
            if let Err(e) = manager.close_page(&session).await {
                warn!("Failed to close page: {}", e);
            }
        }
        manager.shutdown_chrome().await?;
    }

    let report = outcome?;
    print_report(&report);
    report.into_result(&config)?;
    Ok(())
}

async fn acquire_page(
    manager: &BrowserManager,
    config: &Config,
    attach: bool,
) -> Result<Arc<PageSession>, Box<dyn std::error::Error>> {
    if attach {
        if let Some(session) = manager.attach_page(&config.target.url).await? {
            info!("Attached to open tab for {}", config.target.url);
            return Ok(session);
        }
        warn!("No open tab for {}, opening one", config.target.url);
    }
    Ok(manager.open_page(&config.target.url).await?)
}

fn print_report(report: &ScenarioReport) {
    println!("Filled controls: {}", report.filled.total);
    for context in &report.filled.contexts {
        match &context.error {
            Some(e) => println!("  {:<40} skipped ({})", context.context, e),
            None => println!(
                "  {:<40} {} / {} eligible",
                context.context, context.filled, context.eligible
            ),
        }
    }

    println!("Dialog tasks:");
    for task in &report.tasks {
        let status = if task.is_success() { "ok" } else { "FAILED" };
        let failures: Vec<String> = task.failures.iter().map(ToString::to_string).collect();
        println!("  {:<40} {:<7} {}", task.task, status, failures.join(", "));
    }

    println!("Commit: {:?}", report.commit);
    if let Some(url) = &report.final_url {
        println!("Final URL: {}", url);
    }
    for path in &report.screenshots {
        println!("Screenshot: {}", path.display());
    }
}
