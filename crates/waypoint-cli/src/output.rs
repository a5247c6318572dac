// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Report and funnel output.

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use tracing::info;

use waypoint_config::OutputFormat;
use waypoint_core::ReportRow;
use waypoint_funnel::FunnelReport;

/// Write the journey report to disk in the configured format.
pub fn write_report(path: &Path, format: OutputFormat, report: &[ReportRow]) -> anyhow::Result<()> {
	let file = std::fs::File::create(path)
		.with_context(|| format!("failed to create {}", path.display()))?;
	let mut writer = std::io::BufWriter::new(file);

	match format {
		OutputFormat::Json => {
			serde_json::to_writer_pretty(&mut writer, report)
				.with_context(|| format!("failed to write {}", path.display()))?;
			writer.write_all(b"\n")?;
		}
		OutputFormat::Jsonl => {
			for row in report {
				serde_json::to_writer(&mut writer, row)
					.with_context(|| format!("failed to write {}", path.display()))?;
				writer.write_all(b"\n")?;
			}
		}
	}

	writer.flush()?;
	info!(path = %path.display(), rows = report.len(), "wrote journey report");
	Ok(())
}

/// Log the funnel breakdown, one line per step.
pub fn log_funnel(funnel: &FunnelReport) {
	if funnel.steps.is_empty() {
		info!("no onboarding funnel data");
		return;
	}

	info!(
		baseline_users = funnel.baseline_users(),
		completion_rate = format!("{:.1}%", funnel.completion_rate()),
		"onboarding funnel"
	);
	for step in &funnel.steps {
		info!(
			step = %step.step,
			users = step.users,
			conversion = format!("{:.1}%", step.conversion_rate),
			drop_off = step.drop_off,
			drop_off_pct = format!("{:.1}%", step.drop_off_pct),
			"funnel step"
		);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn row(seq: u32) -> ReportRow {
		ReportRow {
			session_id: "s-1".to_string(),
			event_seq: seq,
			event_time: "2026-03-01 10:00:00".to_string(),
			origin: "page".to_string(),
			event_name: "/onboarding".to_string(),
			event_value: None,
			anonymous_id: "anon-1".to_string(),
			user_id: None,
			email: None,
			session_user_id: None,
			session_email: None,
			session_started_at: "2026-03-01 10:00:00".to_string(),
			session_ended_at: "2026-03-01 10:05:00".to_string(),
			resource_id: None,
			referral_link: None,
			converted_to_purchase: "No".to_string(),
			event_category: "onboarding".to_string(),
			event_category_ordered: "1.onboarding_main".to_string(),
			event_category_ordered_numbered: Some(1),
		}
	}

	#[test]
	fn test_write_json_array() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("report.json");
		write_report(&path, OutputFormat::Json, &[row(1), row(2)]).unwrap();

		let content = std::fs::read_to_string(&path).unwrap();
		let parsed: Vec<ReportRow> = serde_json::from_str(&content).unwrap();
		assert_eq!(parsed.len(), 2);
		assert_eq!(parsed[1].event_seq, 2);
	}

	#[test]
	fn test_write_jsonl() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("report.jsonl");
		write_report(&path, OutputFormat::Jsonl, &[row(1), row(2)]).unwrap();

		let content = std::fs::read_to_string(&path).unwrap();
		let lines: Vec<&str> = content.lines().collect();
		assert_eq!(lines.len(), 2);
		let first: ReportRow = serde_json::from_str(lines[0]).unwrap();
		assert_eq!(first.event_seq, 1);
	}
}
