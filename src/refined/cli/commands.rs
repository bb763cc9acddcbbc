//! # CLI Layer
//!
//! This module is **one possible client** of the refined library. It is the only
//! place that reads files, writes to stdout/stderr, or sets up logging.
//!
//! ## Output Contract
//!
//! - `list` writes human-readable rows (or JSON with `--json`) to stdout
//! - `clear` and `clear-all` write the resulting state as JSON to stdout, so they
//!   compose with pipes (`refined -s state.json rm 1 | refined -s - list`)
//! - Confirmations, logs and errors go to stderr
//!
//! ## Structure
//!
//! - `run()`: Main dispatch logic (called by `main.rs`)
//! - `init_context()`: Loads state, results and widget configuration
//! - `handle_*()`: Per-command handlers that call the API and format output

use super::render::{render_cleared, render_cleared_all, render_refinement_list};
use super::setup::{Cli, Commands};
use clap::Parser;
use refined::api::CurrentRefinements;
use refined::config::WidgetConfig;
use refined::error::{RefinedError, Result};
use refined::state::{LocalHelper, SearchHelper, SearchResults, SearchState};
use refined::template::ItemRenderer;
use serde::de::DeserializeOwned;
use std::io::Read;
use std::path::Path;
use tracing::debug;
use tracing_subscriber::EnvFilter;

struct AppContext {
    widget: CurrentRefinements,
    state: SearchState,
    results: Option<SearchResults>,
    json: bool,
    use_color: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = init_context(&cli)?;

    match cli.command.unwrap_or(Commands::List) {
        Commands::List => handle_list(&ctx),
        Commands::Clear { index } => handle_clear(ctx, index),
        Commands::ClearAll => handle_clear_all(ctx),
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "refined=debug" } else { "refined=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // stdout carries data; logs go to stderr
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let state_path = cli
        .state
        .as_deref()
        .ok_or_else(|| RefinedError::Config("missing --state <FILE>".to_string()))?;
    let state: SearchState = load_json(state_path)?;

    let results = match &cli.results {
        Some(path) => Some(load_json::<SearchResults>(path)?),
        None => None,
    };

    let config = match &cli.config {
        Some(path) => WidgetConfig::load(path)?,
        None => WidgetConfig::default(),
    };
    debug!(
        attributes = config.attributes.len(),
        only_listed = config.only_listed_attributes,
        "loaded widget configuration"
    );

    Ok(AppContext {
        widget: CurrentRefinements::new(config)?,
        state,
        results,
        json: cli.json,
        use_color: console::colors_enabled(),
    })
}

/// Read JSON from a file, or from stdin when the path is `-`.
fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)?
    };
    Ok(serde_json::from_str(&content)?)
}

fn handle_list(ctx: &AppContext) -> Result<()> {
    let refinements = ctx.widget.refinements(ctx.results.as_ref(), &ctx.state);

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&refinements)?);
        return Ok(());
    }

    let renderer = ItemRenderer::new(ctx.widget.config())?;
    let items = renderer.render_all(&refinements)?;
    print!(
        "{}",
        render_refinement_list(&refinements, &items, ctx.use_color)
    );
    Ok(())
}

fn handle_clear(ctx: AppContext, index: usize) -> Result<()> {
    // shown positions are 1-based
    let position = index
        .checked_sub(1)
        .ok_or(RefinedError::IndexOutOfRange(index))?;

    let mut helper = LocalHelper::new(ctx.state);
    let removed = ctx
        .widget
        .clear_at(&mut helper, position)
        .map_err(|_| RefinedError::IndexOutOfRange(index))?;

    eprintln!("{}", render_cleared(&removed, ctx.use_color));
    print_state(helper.state())
}

fn handle_clear_all(ctx: AppContext) -> Result<()> {
    let count = ctx.widget.refinements(None, &ctx.state).len();

    let mut helper = LocalHelper::new(ctx.state);
    ctx.widget.clear_all(&mut helper);

    eprintln!("{}", render_cleared_all(count, ctx.use_color));
    print_state(helper.state())
}

fn print_state(state: &SearchState) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(state)?);
    Ok(())
}
