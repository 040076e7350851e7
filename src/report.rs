//! Text, JSON and CSV rendering of aggregation results

use crate::analysis::{AggregateResult, YearSeries};
use crate::{ReportConfig, Result};
use std::fmt::Write;

/// Output format for reports
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use table, json, or csv.", s)),
        }
    }
}

/// Render a result in the requested format
pub fn render(
    result: &AggregateResult,
    format: OutputFormat,
    options: &ReportConfig,
) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(format_table(result, options)),
        OutputFormat::Json => Ok(format_json(result)),
        OutputFormat::Csv => format_csv(result),
    }
}

fn metric(value: Option<f64>, decimals: usize, suffix: &str) -> String {
    match value {
        Some(v) => format!("{:.*}{}", decimals, v, suffix),
        None => "n/a".to_string(),
    }
}

fn format_series(out: &mut String, title: &str, series: &YearSeries, decimals: usize) {
    let _ = writeln!(out, "  {}", title);
    for (year, value) in series {
        let _ = writeln!(out, "    {}  {:>8.*}", year, decimals, value);
    }
}

/// Human-readable summary for the terminal
pub fn format_table(result: &AggregateResult, options: &ReportConfig) -> String {
    let mut out = String::new();
    let kpis = &result.kpis;

    let _ = writeln!(out, "Six Nations summary: {}", result.filter);
    let _ = writeln!(out, "───────────────────────────────────────────");
    let _ = writeln!(out, "  Matches:               {}", result.match_count);
    let _ = writeln!(out, "  Avg points / match:    {}", metric(kpis.avg_total_points, 2, ""));
    let _ = writeln!(out, "  Avg score difference:  {}", metric(kpis.avg_score_diff, 2, ""));
    let _ = writeln!(out, "  Avg bonus / match:     {}", metric(kpis.avg_total_bonus, 2, ""));
    let _ = writeln!(out, "  Close matches (<=7):   {}", metric(kpis.close_match_pct, 1, " %"));

    if result.is_empty() {
        let _ = writeln!(out, "\nNo matches for this selection.");
        return out;
    }

    let trends = &result.trends;
    let _ = writeln!(out, "\nOffensive trend");
    format_series(&mut out, "Avg points per match", &trends.total_points, 2);
    format_series(&mut out, "Share of high-scoring matches", &trends.high_scoring_rate, 3);
    format_series(&mut out, "Avg bonus per match", &trends.total_bonus, 2);

    let _ = writeln!(out, "\nScore balance");
    format_series(&mut out, "Avg score difference", &trends.score_diff, 2);
    format_series(&mut out, "Share of close matches", &trends.close_match_rate, 3);

    let _ = writeln!(out, "\nTeam ranking (avg home + avg away points)");
    let ranked = result.team_ranking.sorted_desc();
    let limit = options.rank_limit.unwrap_or(ranked.len());
    for (pos, (team, score)) in ranked.iter().take(limit).enumerate() {
        let _ = writeln!(out, "  {:>2}. {:<12} {:>6.2}", pos + 1, team, score);
    }

    if options.show_heatmap {
        let heatmap = &result.heatmap;
        let _ = writeln!(out, "\nAvg home points by team and year");
        let _ = write!(out, "  {:<12}", "");
        for year in &heatmap.years {
            let _ = write!(out, " {:>6}", year);
        }
        let _ = writeln!(out);
        for (col, team) in heatmap.teams.iter().enumerate() {
            let _ = write!(out, "  {:<12}", team);
            for row in &heatmap.values {
                match row.get(col) {
                    Some(value) => {
                        let _ = write!(out, " {:>6.1}", value);
                    }
                    None => {
                        let _ = write!(out, " {:>6}", "-");
                    }
                }
            }
            let _ = writeln!(out);
        }
    }

    out
}

pub fn format_json(result: &AggregateResult) -> String {
    // Every field is a plain number, string, map or option
    serde_json::to_string_pretty(result).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
}

/// Header of the long-format CSV report
pub const CSV_HEADER: [&str; 5] = ["section", "metric", "year", "team", "value"];

/// Long-format CSV: one row per number, with `year` and `team` left blank
/// where they do not apply
pub fn format_csv(result: &AggregateResult) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(CSV_HEADER)?;

    let kpis = &result.kpis;
    let cell = |v: Option<f64>| v.map(|v| v.to_string()).unwrap_or_default();
    let match_count = result.match_count.to_string();
    for (metric, value) in [
        ("matches", match_count),
        ("avg_total_points", cell(kpis.avg_total_points)),
        ("avg_score_diff", cell(kpis.avg_score_diff)),
        ("avg_total_bonus", cell(kpis.avg_total_bonus)),
        ("close_match_pct", cell(kpis.close_match_pct)),
    ] {
        wtr.write_record(["kpi", metric, "", "", value.as_str()])?;
    }

    let trends = &result.trends;
    for (metric, series) in [
        ("total_points", &trends.total_points),
        ("high_scoring_rate", &trends.high_scoring_rate),
        ("total_bonus", &trends.total_bonus),
        ("score_diff", &trends.score_diff),
        ("close_match_rate", &trends.close_match_rate),
    ] {
        for (year, value) in series {
            wtr.write_record([
                "trend",
                metric,
                year.to_string().as_str(),
                "",
                value.to_string().as_str(),
            ])?;
        }
    }

    for (team, score) in result.team_ranking.sorted_desc() {
        wtr.write_record(["team_ranking", "avg_points", "", team, score.to_string().as_str()])?;
    }
    for (year, team, value) in result.heatmap.cells() {
        wtr.write_record([
            "heatmap",
            "avg_home_points",
            year.to_string().as_str(),
            team,
            value.to_string().as_str(),
        ])?;
    }

    let bytes = wtr.into_inner().map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{aggregate, FilterCriteria, YearRange};
    use crate::{Fixture, MatchRecord, MatchTable};
    use chrono::NaiveDate;

    fn table() -> MatchTable {
        let make = |year: u16, home: &str, away: &str, hs: u16, as_: u16| {
            MatchRecord::new(Fixture {
                date: NaiveDate::from_ymd_opt(year as i32, 2, 1).unwrap(),
                year,
                home_team: home.to_string(),
                away_team: away.to_string(),
                home_score: hs,
                away_score: as_,
                home_bonus: 0,
                away_bonus: 0,
            })
        };
        MatchTable::new(vec![
            make(2020, "France", "Wales", 30, 17),
            make(2021, "Wales", "France", 20, 20),
        ])
    }

    #[test]
    fn test_parse_format() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("table".parse::<OutputFormat>(), Ok(OutputFormat::Table));
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_table_shows_ranking_in_order() {
        let table = table();
        let result = aggregate(&table, &FilterCriteria::full_range(&table));
        let text = format_table(&result, &ReportConfig::default());
        assert!(text.contains("Avg points / match:    43.50"));
        let france = text.find(" 1. France").unwrap();
        let wales = text.find(" 2. Wales").unwrap();
        assert!(france < wales);
        assert!(text.contains("Avg home points by team and year"));
    }

    #[test]
    fn test_table_respects_options() {
        let table = table();
        let result = aggregate(&table, &FilterCriteria::full_range(&table));
        let options = ReportConfig {
            rank_limit: Some(1),
            show_heatmap: false,
        };
        let text = format_table(&result, &options);
        assert!(text.contains(" 1. France"));
        assert!(!text.contains(" 2. Wales"));
        assert!(!text.contains("Avg home points by team and year"));
    }

    #[test]
    fn test_empty_selection_renders_no_data() {
        let table = table();
        let result = aggregate(&table, &FilterCriteria::new(YearRange::single(1999)));
        let text = format_table(&result, &ReportConfig::default());
        assert!(text.contains("Avg points / match:    n/a"));
        assert!(text.contains("No matches for this selection."));

        let json: serde_json::Value = serde_json::from_str(&format_json(&result)).unwrap();
        assert!(json["kpis"]["avg_total_points"].is_null());

        let csv = format_csv(&result).unwrap();
        assert!(csv.contains("kpi,avg_total_points,,,\n"));
    }

    fn csv_rows(text: &str) -> Vec<Vec<String>> {
        let mut reader = csv::Reader::from_reader(text.as_bytes());
        assert_eq!(reader.headers().unwrap(), &csv::StringRecord::from(CSV_HEADER.to_vec()));
        reader
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect()
    }

    #[test]
    fn test_csv_sections() {
        let table = table();
        let result = aggregate(&table, &FilterCriteria::full_range(&table));
        let rows = csv_rows(&format_csv(&result).unwrap());

        assert!(rows.contains(&vec![
            "kpi".into(), "avg_total_points".into(), "".into(), "".into(), "43.5".into()
        ]));
        assert!(rows.contains(&vec![
            "trend".into(), "total_points".into(), "2020".into(), "".into(), "47".into()
        ]));
        assert!(rows.contains(&vec![
            "team_ranking".into(), "avg_points".into(), "".into(), "France".into(), "50".into()
        ]));
        assert!(rows.contains(&vec![
            "heatmap".into(), "avg_home_points".into(), "2021".into(), "Wales".into(), "20".into()
        ]));
    }

    #[test]
    fn test_csv_quotes_team_names() {
        let record = MatchRecord::new(Fixture {
            date: NaiveDate::from_ymd_opt(2001, 2, 3).unwrap(),
            year: 2001,
            home_team: "Ireland, \"A\"".to_string(),
            away_team: "Italy".to_string(),
            home_score: 12,
            away_score: 3,
            home_bonus: 0,
            away_bonus: 0,
        });
        let table = MatchTable::new(vec![record]);
        let result = aggregate(&table, &FilterCriteria::full_range(&table));
        let text = format_csv(&result).unwrap();
        assert!(text.contains("\"Ireland, \"\"A\"\"\""));

        let rows = csv_rows(&text);
        let heat: Vec<_> = rows.iter().filter(|r| r[0] == "heatmap").collect();
        assert_eq!(heat.len(), 1);
        assert_eq!(heat[0][2], "2001");
        assert_eq!(heat[0][3], "Ireland, \"A\"");
        assert_eq!(heat[0][4], "12");
    }

    #[test]
    fn test_ragged_heatmap_does_not_panic() {
        let table = table();
        let mut result = aggregate(&table, &FilterCriteria::full_range(&table));
        result.heatmap.values[0].clear();
        let text = format_table(&result, &ReportConfig::default());
        assert!(text.contains("Avg home points by team and year"));
        assert!(text.contains("     -"));
    }

    #[test]
    fn test_json_roundtrip() {
        let table = table();
        let result = aggregate(&table, &FilterCriteria::full_range(&table));
        let back: AggregateResult = serde_json::from_str(&format_json(&result)).unwrap();
        assert_eq!(back, result);
    }
}
