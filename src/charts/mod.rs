//! Plotting collaborator interface
//!
//! This crate renders nothing. It builds chart specifications from finished
//! results and hands them to a `ChartSink`; the sink returns nothing the
//! analysis consumes.

mod build;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::stats::{BinShares, DensityEstimate, Summary};

pub use build::charts_for;

/// One (x, y) point; `y` is absent where the value is undefined
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    /// ISO date or year
    pub x: String,
    pub y: Option<f64>,
}

/// A named line of a line chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub label: String,
    /// Plotted against the secondary y axis
    pub secondary_axis: bool,
    pub points: Vec<SeriesPoint>,
}

/// One box of a box plot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxGroup {
    pub label: String,
    pub summary: Summary,
}

/// One overlaid sample of a histogram
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramGroup {
    pub label: String,
    #[serde(flatten)]
    pub shares: BinShares,
}

/// One curve of a density plot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DensityCurve {
    pub label: String,
    pub estimate: DensityEstimate,
}

/// A chart specification
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Chart {
    Line {
        title: String,
        x_label: String,
        y_label: String,
        series: Vec<Series>,
    },
    Box {
        title: String,
        y_label: String,
        groups: Vec<BoxGroup>,
    },
    /// Overlaid groups sharing one set of bin edges, heights in percent
    Histogram {
        title: String,
        x_label: String,
        edges: Vec<f64>,
        groups: Vec<HistogramGroup>,
    },
    Density {
        title: String,
        x_label: String,
        curves: Vec<DensityCurve>,
    },
}

impl Chart {
    pub fn title(&self) -> &str {
        match self {
            Chart::Line { title, .. }
            | Chart::Box { title, .. }
            | Chart::Histogram { title, .. }
            | Chart::Density { title, .. } => title,
        }
    }
}

/// Consumer of chart specifications
pub trait ChartSink {
    /// Accept one chart
    fn render(&mut self, chart: &Chart) -> io::Result<()>;

    /// Flush anything buffered
    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Writes one JSON chart spec per line
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl JsonLinesSink<BufWriter<File>> {
    /// Create (or truncate) a chart file
    pub fn create(path: &Path) -> io::Result<Self> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> ChartSink for JsonLinesSink<W> {
    fn render(&mut self, chart: &Chart) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, chart)?;
        writeln!(self.writer)
    }

    fn finish(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// In-memory sink for testing
#[derive(Debug, Default)]
pub struct MemoryChartSink {
    charts: Vec<Chart>,
}

impl MemoryChartSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn charts(&self) -> &[Chart] {
        &self.charts
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }
}

impl ChartSink for MemoryChartSink {
    fn render(&mut self, chart: &Chart) -> io::Result<()> {
        self.charts.push(chart.clone());
        Ok(())
    }
}

/// Hand every chart to `sink`, in order
pub fn emit_all<S: ChartSink + ?Sized>(charts: &[Chart], sink: &mut S) -> io::Result<()> {
    for chart in charts {
        sink.render(chart)?;
    }
    sink.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line() -> Chart {
        Chart::Line {
            title: "Total Yearly Births by Clinic".to_string(),
            x_label: "year".to_string(),
            y_label: "births".to_string(),
            series: vec![Series {
                label: "clinic 1".to_string(),
                secondary_axis: false,
                points: vec![
                    SeriesPoint {
                        x: "1841".to_string(),
                        y: Some(3036.0),
                    },
                    SeriesPoint {
                        x: "1842".to_string(),
                        y: None,
                    },
                ],
            }],
        }
    }

    #[test]
    fn test_json_lines_sink_one_chart_per_line() {
        let mut sink = JsonLinesSink::new(Vec::new());
        emit_all(&[line(), line()], &mut sink).unwrap();

        let output = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);

        let parsed: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(parsed["kind"], "line");
        assert_eq!(parsed["series"][0]["points"][1]["y"], serde_json::Value::Null);
    }

    #[test]
    fn test_memory_sink() {
        let mut sink = MemoryChartSink::new();
        assert!(sink.is_empty());
        emit_all(&[line()], &mut sink).unwrap();
        assert_eq!(sink.len(), 1);
        assert_eq!(sink.charts()[0].title(), "Total Yearly Births by Clinic");
    }
}
