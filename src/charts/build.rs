//! Chart specifications for a finished report

use super::{BoxGroup, Chart, DensityCurve, HistogramGroup, Series, SeriesPoint};
use crate::regime::Regime;
use crate::report::{AnalysisReport, LabelledMonth, RegimeReport};
use crate::stats::{bin_edges, bin_shares, HISTOGRAM_BINS};
use crate::yearly::ClinicSeries;

fn defined(value: f64) -> Option<f64> {
    if value.is_nan() {
        None
    } else {
        Some(value)
    }
}

fn monthly_series<F>(label: &str, months: &[&LabelledMonth], secondary: bool, y: F) -> Series
where
    F: Fn(&LabelledMonth) -> Option<f64>,
{
    Series {
        label: label.to_string(),
        secondary_axis: secondary,
        points: months
            .iter()
            .map(|m| SeriesPoint {
                x: m.date.to_string(),
                y: y(m),
            })
            .collect(),
    }
}

fn clinic_series<F>(clinic: &ClinicSeries, y: F) -> Series
where
    F: Fn(u64, u64, f64) -> Option<f64>,
{
    Series {
        label: clinic.clinic.to_string(),
        secondary_axis: false,
        points: clinic
            .years
            .iter()
            .map(|r| SeriesPoint {
                x: r.observation.year.to_string(),
                y: y(r.observation.births, r.observation.deaths, r.pct_deaths),
            })
            .collect(),
    }
}

fn by_clinic<F>(report: &AnalysisReport, title: &str, y_label: &str, y: F) -> Chart
where
    F: Fn(u64, u64, f64) -> Option<f64> + Copy,
{
    Chart::Line {
        title: title.to_string(),
        x_label: "year".to_string(),
        y_label: y_label.to_string(),
        series: report
            .yearly
            .clinics
            .iter()
            .map(|c| clinic_series(c, y))
            .collect(),
    }
}

fn in_regime(months: &[LabelledMonth], regime: Regime) -> Vec<&LabelledMonth> {
    months.iter().filter(|m| m.handwashing == regime).collect()
}

fn regime_label(regime: &RegimeReport) -> String {
    match regime.regime {
        Regime::Before => "Before Handwashing".to_string(),
        Regime::After => "After Handwashing".to_string(),
    }
}

/// Monthly rates by regime over shared edges; `None` without a defined rate
fn rate_histogram(months: &[LabelledMonth]) -> Option<Chart> {
    let rates: Vec<f64> = months.iter().map(|m| m.pct_deaths).collect();
    let edges = bin_edges(&rates, HISTOGRAM_BINS).ok()?;

    let groups = Regime::ALL
        .iter()
        .map(|&regime| {
            let regime_rates: Vec<f64> = in_regime(months, regime)
                .iter()
                .map(|m| m.pct_deaths)
                .collect();
            HistogramGroup {
                label: regime.to_string(),
                shares: bin_shares(&regime_rates, &edges),
            }
        })
        .filter(|g| g.shares.count > 0)
        .collect();

    Some(Chart::Histogram {
        title: "Monthly Death Rate Before and After Handwashing (percent of months)"
            .to_string(),
        x_label: "pct_deaths".to_string(),
        edges,
        groups,
    })
}

/// Every chart of the analysis, in narrative order
pub fn charts_for(report: &AnalysisReport) -> Vec<Chart> {
    let monthly = &report.monthly;
    let all: Vec<&LabelledMonth> = monthly.months.iter().collect();

    let mut charts = vec![
        Chart::Line {
            title: "Total Number of Monthly Births and Deaths".to_string(),
            x_label: "date".to_string(),
            y_label: "births / deaths".to_string(),
            series: vec![
                monthly_series("Births", &all, false, |m| Some(m.births as f64)),
                monthly_series("Deaths", &all, true, |m| Some(m.deaths as f64)),
            ],
        },
        by_clinic(report, "Total Yearly Births by Clinic", "births", |b, _, _| {
            Some(b as f64)
        }),
        by_clinic(report, "Total Yearly Deaths by Clinic", "deaths", |_, d, _| {
            Some(d as f64)
        }),
        by_clinic(
            report,
            "Total Maternal Mortality Percentage by Clinic",
            "pct_deaths",
            |_, _, rate| defined(rate),
        ),
    ];

    let rolling = Series {
        label: "6mo Moving Average".to_string(),
        secondary_axis: false,
        points: monthly
            .rolling_before
            .iter()
            .map(|p| SeriesPoint {
                x: p.date.to_string(),
                y: p.rolling_mean,
            })
            .collect(),
    };
    charts.push(Chart::Line {
        title: "Monthly Death Rate Before and After Handwashing".to_string(),
        x_label: "date".to_string(),
        y_label: "pct_deaths".to_string(),
        series: vec![
            rolling,
            monthly_series(
                "Before Handwashing",
                &in_regime(&monthly.months, Regime::Before),
                false,
                |m| defined(m.pct_deaths),
            ),
            monthly_series(
                "After Handwashing",
                &in_regime(&monthly.months, Regime::After),
                false,
                |m| defined(m.pct_deaths),
            ),
        ],
    });

    let regimes = [&monthly.before, &monthly.after];
    charts.push(Chart::Box {
        title: "Death Rate Before vs. After Handwashing".to_string(),
        y_label: "pct_deaths".to_string(),
        groups: regimes
            .iter()
            .map(|r| BoxGroup {
                label: r.regime.to_string(),
                summary: r.summary,
            })
            .collect(),
    });

    charts.extend(rate_histogram(&monthly.months));

    let curves: Vec<DensityCurve> = regimes
        .iter()
        .filter_map(|r| {
            r.density.as_ref().map(|estimate| DensityCurve {
                label: regime_label(r),
                estimate: estimate.clone(),
            })
        })
        .collect();
    if !curves.is_empty() {
        charts.push(Chart::Density {
            title: "Est. Distribution of Monthly Death Rate Before and After Handwashing"
                .to_string(),
            x_label: "pct_deaths".to_string(),
            curves,
        });
    }

    charts
}
