//! Terminal rendering of a sector leaderboard.

use crate::dashboard::{RankedRow, ranking};
use eurenew_pipeline::{EnergySector, SectorReport};
use serde::Serialize;
use std::fmt;

/// The ranked rows of one sector, ready for printing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardTable {
    /// Ranked sector
    pub sector: EnergySector,
    /// Year of the ranking
    pub latest_year: Option<i32>,
    /// Rows, best first
    pub rows: Vec<RankedRow>,
    /// Countries whose history the dashboard charts
    pub cohort: Vec<String>,
}

impl LeaderboardTable {
    /// Build the table from a sector report.
    pub fn from_report(report: &SectorReport) -> Self {
        Self {
            sector: report.sector,
            latest_year: report.latest_year,
            rows: ranking(&report.leaderboard),
            cohort: report.cohort.clone(),
        }
    }

    fn year_label(&self) -> String {
        self.latest_year
            .map_or_else(|| "no data".to_string(), |year| year.to_string())
    }

    /// Format as an ASCII table.
    pub fn to_ascii_table(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "\nTop {} Performers: {} ({})\n",
            self.rows.len(),
            self.sector,
            self.year_label()
        ));
        output.push_str(&"=".repeat(40));
        output.push('\n');

        output.push_str(&format!("{:>4}  {:<12} {:>12}\n", "#", "Country", "% Share"));
        output.push_str(&"-".repeat(40));
        output.push('\n');

        if self.rows.is_empty() {
            output.push_str("No data available for this sector.\n");
        }
        for row in &self.rows {
            let marker = if self.cohort.contains(&row.country) {
                "*"
            } else {
                ""
            };
            output.push_str(&format!(
                "{:>4}  {:<12} {:>11.1}%{}\n",
                row.rank, row.country, row.value, marker
            ));
        }

        output.push_str(&"=".repeat(40));
        output.push('\n');
        if !self.cohort.is_empty() {
            output.push_str("* charted in the history of the top 5\n");
        }

        output
    }

    /// Format as a Markdown table.
    pub fn to_markdown(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("# Top 10 Performers ({})\n\n", self.sector));
        output.push_str(&format!("**Year:** {}\n\n", self.year_label()));

        output.push_str("| Rank | Country | % Share |\n");
        output.push_str("|------|---------|---------|\n");
        for row in &self.rows {
            output.push_str(&format!(
                "| {} | {} | {:.1}% |\n",
                row.rank, row.country, row.value
            ));
        }

        output
    }
}

impl fmt::Display for LeaderboardTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_ascii_table())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eurenew_pipeline::Observation;

    fn report(values: &[(&str, f64)]) -> SectorReport {
        let leaderboard: Vec<Observation> = values
            .iter()
            .map(|(country, value)| Observation {
                country: (*country).to_string(),
                year: 2022,
                sector: EnergySector::Overall,
                unit: Some("PC".to_string()),
                value: *value,
            })
            .collect();
        let cohort = leaderboard
            .iter()
            .take(5)
            .map(|o| o.country.clone())
            .collect();

        SectorReport {
            sector: EnergySector::Overall,
            latest_year: (!leaderboard.is_empty()).then_some(2022),
            leaderboard,
            cohort,
            history: Vec::new(),
            raw: Vec::new(),
        }
    }

    #[test]
    fn test_ascii_table() {
        let table = LeaderboardTable::from_report(&report(&[("SE", 66.0), ("FI", 47.88)]));
        let ascii = table.to_ascii_table();

        assert!(ascii.contains("Top 2 Performers: Overall Share (2022)"));
        assert!(ascii.contains("SE"));
        assert!(ascii.contains("66.0%*"));
        assert!(ascii.contains("47.9%*"));
    }

    #[test]
    fn test_markdown() {
        let table = LeaderboardTable::from_report(&report(&[("SE", 66.0)]));
        let markdown = table.to_markdown();

        assert!(markdown.contains("# Top 10 Performers (Overall Share)"));
        assert!(markdown.contains("| 1 | SE | 66.0% |"));
    }

    #[test]
    fn test_rows_match_dashboard_ranking() {
        let report = report(&[("SE", 66.0), ("FI", 47.88), ("LV", 43.22)]);
        let table = LeaderboardTable::from_report(&report);
        let view = crate::DashboardView::from_report(&report);

        assert_eq!(table.rows, view.ranking);
        assert_eq!(table.rows[2].rank, 3);
    }

    #[test]
    fn test_empty_table() {
        let table = LeaderboardTable::from_report(&report(&[]));
        let ascii = format!("{table}");

        assert!(ascii.contains("(no data)"));
        assert!(ascii.contains("No data available for this sector."));
    }
}
