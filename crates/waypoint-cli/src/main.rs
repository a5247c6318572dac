// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Waypoint journey reconstruction binary.

use std::path::PathBuf;

use anyhow::Context;
use chrono::Duration;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use waypoint_config::{SourceKind, WaypointConfig};
use waypoint_pipeline::{Pipeline, PipelineOptions};
use waypoint_source::{fetch_tables, JsonlRowSource, RowSource, SqliteRowSource};

mod output;

/// Waypoint - reconstructs onboarding journeys from event logs.
#[derive(Parser, Debug)]
#[command(name = "waypoint", about = "Onboarding journey reconstruction", version)]
struct Args {
	/// Path to a waypoint.toml config file
	#[arg(long, env = "WAYPOINT_CONFIG")]
	config: Option<PathBuf>,

	#[command(subcommand)]
	command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Fetch the input tables, run the pipeline, and write the report
	Run,
	/// Show version information
	Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let args = Args::parse();

	if let Some(Command::Version) = args.command {
		println!("waypoint {}", env!("CARGO_PKG_VERSION"));
		return Ok(());
	}

	// Load .env file if present
	dotenvy::dotenv().ok();

	let config = match &args.config {
		Some(path) => waypoint_config::load_config_with_file(path)?,
		None => waypoint_config::load_config()?,
	};

	tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| config.logging.level.clone().into()),
		)
		.init();

	tracing::info!(
		source = ?config.source.kind,
		output = %config.output.path,
		"starting waypoint"
	);

	run(&config).await
}

async fn run(config: &WaypointConfig) -> anyhow::Result<()> {
	let source: Box<dyn RowSource> = match config.source.kind {
		SourceKind::Sqlite => Box::new(
			SqliteRowSource::connect(&config.source.database_url)
				.await
				.with_context(|| {
					format!("failed to open database {}", config.source.database_url)
				})?,
		),
		SourceKind::Jsonl => Box::new(JsonlRowSource::new(&config.source.tables_dir)),
	};

	let tables = fetch_tables(source.as_ref())
		.await
		.context("failed to fetch input tables")?;

	let pipeline = Pipeline::new(pipeline_options(config));
	let result = pipeline.execute(&tables);

	output::write_report(
		config.output.path.as_ref(),
		config.output.format,
		&result.report,
	)?;

	let funnel = waypoint_funnel::rollup(&result.report);
	output::log_funnel(&funnel);

	Ok(())
}

fn pipeline_options(config: &WaypointConfig) -> PipelineOptions {
	PipelineOptions {
		session_window: Duration::seconds(config.pipeline.session_window_secs as i64),
		purchase_lookback: Duration::seconds(config.pipeline.purchase_lookback_secs as i64),
		purchase_lookahead: Duration::seconds(config.pipeline.purchase_lookahead_secs as i64),
		resource_type: config.pipeline.resource_type.clone(),
		candidate_pattern: config.pipeline.candidate_pattern.clone(),
		report_filter: config.pipeline.report_filter.clone(),
	}
}
