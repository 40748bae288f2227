//! CLI and chart emission tests
//!
//! Tests for:
//! - Configuration resolution from file plus overrides
//! - Chart specs written one JSON object per line
//! - Report formats

use std::fs;

use semmelweis::charts::{charts_for, emit_all, ChartSink, MemoryChartSink};
use semmelweis::cli::{analyze, resolve_config, write_json_report, write_text_report, OutputFormat};
use semmelweis::pipeline::run_analysis;
use tempfile::TempDir;

const YEARLY_CSV: &str = "year,births,deaths,clinic
1845,3492,241,clinic 1
1846,4010,459,clinic 1
1845,3241,66,clinic 2
1846,3754,105,clinic 2
";

const MONTHLY_CSV: &str = "date,births,deaths
1847-02-01,312,6
1847-03-01,305,11
1847-04-01,312,57
1847-05-01,294,36
1847-06-01,268,6
1847-07-01,250,3
1847-08-01,264,5
";

// =============================================================================
// Test Utilities
// =============================================================================

fn setup() -> TempDir {
    let temp = TempDir::new().expect("Failed to create temp dir");
    fs::write(temp.path().join("yearly.csv"), YEARLY_CSV).unwrap();
    fs::write(temp.path().join("monthly.csv"), MONTHLY_CSV).unwrap();
    fs::write(
        temp.path().join("semmelweis.json"),
        format!(
            r#"{{"yearly_path": "{}", "monthly_path": "{}", "format": {{"decimals": 1}}}}"#,
            temp.path().join("yearly.csv").display(),
            temp.path().join("monthly.csv").display()
        ),
    )
    .unwrap();
    temp
}

/// Counts charts and records whether `finish` ran
#[derive(Default)]
struct CountingSink {
    rendered: usize,
    finished: bool,
}

impl ChartSink for CountingSink {
    fn render(&mut self, _chart: &semmelweis::charts::Chart) -> std::io::Result<()> {
        self.rendered += 1;
        Ok(())
    }

    fn finish(&mut self) -> std::io::Result<()> {
        self.finished = true;
        Ok(())
    }
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_config_file_supplies_paths_and_format() {
    let temp = setup();
    let config = resolve_config(Some(&temp.path().join("semmelweis.json")), None, None).unwrap();

    assert_eq!(config.format.decimals, 1);
    assert!(config.format.thousands_separator);
    assert_eq!(config.significance_level, 0.05);
}

#[test]
fn test_invalid_alpha_is_rejected() {
    let temp = setup();
    let path = temp.path().join("bad.json");
    fs::write(&path, r#"{"significance_level": 1.5}"#).unwrap();

    let err = resolve_config(Some(&path), None, None).unwrap_err();
    assert_eq!(err.code_str(), "SEMMELWEIS_CLI_CONFIG_ERROR");
}

// =============================================================================
// Charts
// =============================================================================

#[test]
fn test_analyze_writes_chart_file() {
    let temp = setup();
    let config = resolve_config(Some(&temp.path().join("semmelweis.json")), None, None).unwrap();
    let charts_path = temp.path().join("charts.jsonl");

    analyze(&config, OutputFormat::Json, Some(&charts_path)).unwrap();

    let content = fs::read_to_string(&charts_path).unwrap();
    let kinds: Vec<String> = content
        .lines()
        .map(|line| {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            value["kind"].as_str().unwrap().to_string()
        })
        .collect();
    assert_eq!(kinds.len(), 8);
    assert_eq!(kinds[5], "box");
    assert_eq!(kinds[6], "histogram");
    assert_eq!(kinds[7], "density");
}

#[test]
fn test_sink_is_finished_after_all_charts() {
    let temp = setup();
    let config = resolve_config(Some(&temp.path().join("semmelweis.json")), None, None).unwrap();
    let charts = charts_for(&run_analysis(&config).unwrap());

    let mut sink = CountingSink::default();
    emit_all(&charts, &mut sink).unwrap();
    assert_eq!(sink.rendered, charts.len());
    assert!(sink.finished);

    let mut memory = MemoryChartSink::new();
    emit_all(&charts, &mut memory).unwrap();
    assert_eq!(memory.charts(), charts.as_slice());
}

// =============================================================================
// Report output
// =============================================================================

#[test]
fn test_json_report_is_one_object() {
    let temp = setup();
    let config = resolve_config(Some(&temp.path().join("semmelweis.json")), None, None).unwrap();
    let report = run_analysis(&config).unwrap();

    let mut out = Vec::new();
    write_json_report(&mut out, &report).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

    assert_eq!(value["monthly"]["cutoff"], "1847-06-01");
    assert_eq!(value["monthly"]["significance"]["status"], "computed");
    assert_eq!(value["yearly"]["clinics"][0]["clinic"], "clinic 1");
}

#[test]
fn test_text_report_uses_configured_decimals() {
    let temp = setup();
    let config = resolve_config(Some(&temp.path().join("semmelweis.json")), None, None).unwrap();
    let report = run_analysis(&config).unwrap();

    let mut out = Vec::new();
    write_text_report(&mut out, &report, &config.format).unwrap();
    let text = String::from_utf8(out).unwrap();

    // 1846: 564 / 7764
    assert!(text.contains("Chances of dying from childbirth in 1846 in Vienna: 7.3%"));
    assert!(text.lines().all(|l| !l.is_empty()));
}
