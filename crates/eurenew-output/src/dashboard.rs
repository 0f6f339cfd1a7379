//! View model of the leaderboard dashboard.
//!
//! [`DashboardView::from_report`] lays a [`SectorReport`] out the way the page
//! shows it. Rows are reordered and formatted here, never filtered.

use eurenew_pipeline::{EnergySector, Observation, SectorReport};
use serde::Serialize;
use std::cmp::Ordering;

/// Page title.
pub const DASHBOARD_TITLE: &str = "European Renewable Energy: Top 10 Tracker";

/// Plotly's qualitative "Pastel" sequence, cycled over the bars.
pub const PASTEL_PALETTE: [&str; 11] = [
    "rgb(102, 197, 204)",
    "rgb(246, 207, 113)",
    "rgb(248, 156, 116)",
    "rgb(220, 176, 242)",
    "rgb(135, 197, 95)",
    "rgb(158, 185, 243)",
    "rgb(254, 136, 177)",
    "rgb(201, 219, 116)",
    "rgb(139, 224, 164)",
    "rgb(180, 151, 231)",
    "rgb(179, 179, 179)",
];

/// One entry of the sector selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectorOption {
    /// `nrg_bal` code
    pub code: &'static str,
    /// Display name, also the query value
    pub name: &'static str,
    /// Whether this is the sector on screen
    pub selected: bool,
}

/// Bar chart of the leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    /// Chart title
    pub title: String,
    /// Y axis label
    pub y_label: String,
    /// Country codes, best first
    pub x: Vec<String>,
    /// Values aligned with `x`
    pub y: Vec<f64>,
    /// Bar labels such as `66.0%`
    pub text: Vec<String>,
    /// One colour per bar
    pub colors: Vec<String>,
}

/// One line of the ranked table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRow {
    /// 1-based rank
    pub rank: usize,
    /// Country code
    pub country: String,
    /// Year of the value
    pub year: i32,
    /// Renewables share
    pub value: f64,
}

/// One country's series on the history chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineSeries {
    /// Country code
    pub country: String,
    /// Years, ascending
    pub years: Vec<i32>,
    /// Values aligned with `years`
    pub values: Vec<f64>,
}

/// Everything the dashboard page displays for one sector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    /// Page title
    pub title: String,
    /// Sector on screen
    pub sector: EnergySector,
    /// Selector entries in display order
    pub sectors: Vec<SectorOption>,
    /// Latest year with data
    pub latest_year: Option<i32>,
    /// Heading above the bar chart
    pub subheading: String,
    /// Leaderboard chart
    pub bar: BarChart,
    /// Leaderboard table
    pub ranking: Vec<RankedRow>,
    /// History chart, one series per cohort country
    pub trend: Vec<LineSeries>,
    /// Every row of the sector, newest year first then by country
    pub raw: Vec<Observation>,
}

impl DashboardView {
    /// Lay out a sector report.
    pub fn from_report(report: &SectorReport) -> Self {
        let sector = report.sector;

        let sectors = EnergySector::all()
            .into_iter()
            .map(|s| SectorOption {
                code: s.code(),
                name: s.name(),
                selected: s == sector,
            })
            .collect();

        let subheading = match report.latest_year {
            Some(year) => format!("Top 10 Countries in {year}"),
            None => format!("No data published yet for {sector}"),
        };

        Self {
            title: DASHBOARD_TITLE.to_string(),
            sector,
            sectors,
            latest_year: report.latest_year,
            subheading,
            bar: bar_chart(sector, &report.leaderboard),
            ranking: ranking(&report.leaderboard),
            trend: trend_series(&report.cohort, &report.history),
            raw: sorted_raw(&report.raw),
        }
    }
}

fn bar_chart(sector: EnergySector, leaderboard: &[Observation]) -> BarChart {
    BarChart {
        title: format!("Top 10 Performers ({sector})"),
        y_label: "% Share".to_string(),
        x: leaderboard.iter().map(|o| o.country.clone()).collect(),
        y: leaderboard.iter().map(|o| o.value).collect(),
        text: leaderboard.iter().map(|o| format!("{:.1}%", o.value)).collect(),
        colors: PASTEL_PALETTE
            .iter()
            .cycle()
            .take(leaderboard.len())
            .map(|c| (*c).to_string())
            .collect(),
    }
}

/// Number leaderboard rows from 1, best first.
pub(crate) fn ranking(leaderboard: &[Observation]) -> Vec<RankedRow> {
    leaderboard
        .iter()
        .enumerate()
        .map(|(i, o)| RankedRow {
            rank: i + 1,
            country: o.country.clone(),
            year: o.year,
            value: o.value,
        })
        .collect()
}

fn trend_series(cohort: &[String], history: &[Observation]) -> Vec<LineSeries> {
    cohort
        .iter()
        .map(|country| {
            let mut points: Vec<(i32, f64)> = history
                .iter()
                .filter(|o| &o.country == country)
                .map(|o| (o.year, o.value))
                .collect();
            points.sort_by_key(|(year, _)| *year);

            LineSeries {
                country: country.clone(),
                years: points.iter().map(|(year, _)| *year).collect(),
                values: points.iter().map(|(_, value)| *value).collect(),
            }
        })
        .collect()
}

fn sorted_raw(raw: &[Observation]) -> Vec<Observation> {
    let mut rows = raw.to_vec();
    rows.sort_by(|a, b| match b.year.cmp(&a.year) {
        Ordering::Equal => a.country.cmp(&b.country),
        other => other,
    });
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(country: &str, year: i32, value: f64) -> Observation {
        Observation {
            country: country.to_string(),
            year,
            sector: EnergySector::Electricity,
            unit: Some("PC".to_string()),
            value,
        }
    }

    fn report() -> SectorReport {
        SectorReport {
            sector: EnergySector::Electricity,
            latest_year: Some(2022),
            leaderboard: vec![obs("AT", 2022, 74.66), obs("SE", 2022, 74.2)],
            cohort: vec!["AT".to_string(), "SE".to_string()],
            history: vec![
                obs("AT", 2022, 74.66),
                obs("SE", 2022, 74.2),
                obs("AT", 2021, 76.2),
                obs("SE", 2021, 75.7),
            ],
            raw: vec![
                obs("AT", 2021, 76.2),
                obs("SE", 2022, 74.2),
                obs("EU27_2020", 2022, 41.2),
                obs("AT", 2022, 74.66),
            ],
        }
    }

    #[test]
    fn test_selector_marks_current_sector() {
        let view = DashboardView::from_report(&report());

        assert_eq!(view.sectors.len(), 4);
        let selected: Vec<&str> = view
            .sectors
            .iter()
            .filter(|s| s.selected)
            .map(|s| s.name)
            .collect();
        assert_eq!(selected, vec!["Electricity Only"]);
    }

    #[test]
    fn test_bar_chart() {
        let view = DashboardView::from_report(&report());

        assert_eq!(view.bar.title, "Top 10 Performers (Electricity Only)");
        assert_eq!(view.bar.y_label, "% Share");
        assert_eq!(view.bar.x, vec!["AT", "SE"]);
        assert_eq!(view.bar.text, vec!["74.7%", "74.2%"]);
        assert_eq!(view.bar.colors, vec![PASTEL_PALETTE[0], PASTEL_PALETTE[1]]);
        assert_eq!(view.subheading, "Top 10 Countries in 2022");
    }

    #[test]
    fn test_ranking_is_one_based() {
        let view = DashboardView::from_report(&report());
        let ranks: Vec<usize> = view.ranking.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2]);
    }

    #[test]
    fn test_trend_points_sorted_by_year() {
        let view = DashboardView::from_report(&report());

        assert_eq!(view.trend.len(), 2);
        assert_eq!(view.trend[0].country, "AT");
        assert_eq!(view.trend[0].years, vec![2021, 2022]);
        assert_eq!(view.trend[0].values, vec![76.2, 74.66]);
    }

    #[test]
    fn test_raw_sorted_year_desc_then_country() {
        let view = DashboardView::from_report(&report());
        let order: Vec<(i32, &str)> = view
            .raw
            .iter()
            .map(|o| (o.year, o.country.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![(2022, "AT"), (2022, "EU27_2020"), (2022, "SE"), (2021, "AT")]
        );
    }

    #[test]
    fn test_empty_sector() {
        let report = SectorReport {
            sector: EnergySector::Transport,
            latest_year: None,
            leaderboard: Vec::new(),
            cohort: Vec::new(),
            history: Vec::new(),
            raw: Vec::new(),
        };
        let view = DashboardView::from_report(&report);

        assert!(view.ranking.is_empty());
        assert!(view.trend.is_empty());
        assert!(view.bar.colors.is_empty());
        assert_eq!(view.subheading, "No data published yet for Transport");
    }
}
