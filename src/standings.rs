use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use tracing::{info, warn};

use crate::error::{MvpError, Result};

pub const EASTERN_TABLE_ID: &str = "divs_standings_E";
pub const WESTERN_TABLE_ID: &str = "divs_standings_W";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamRecord {
    pub name: String,
    pub abbreviation: String,
    pub wins: u32,
    pub losses: u32,
    pub win_pct: f64,
    /// 1-based position after sorting by ascending wins.
    pub rank: u32,
}

struct RowSelectors {
    full_row: Selector,
    link: Selector,
    wins: Selector,
    losses: Selector,
    win_pct: Selector,
}

impl RowSelectors {
    fn new() -> Result<Self> {
        Ok(Self {
            full_row: selector("tr.full_table")?,
            link: selector("a")?,
            wins: selector(r#"td[data-stat="wins"]"#)?,
            losses: selector(r#"td[data-stat="losses"]"#)?,
            win_pct: selector(r#"td[data-stat="win_loss_pct"]"#)?,
        })
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| MvpError::SchemaMismatch(format!("selector {css}: {e}")))
}

/// Extracts every team from both conference tables and assigns ranks.
pub fn extract_standings(html: &str) -> Result<Vec<TeamRecord>> {
    let document = Html::parse_document(html);
    let selectors = RowSelectors::new()?;

    let mut teams = Vec::new();
    for table_id in [EASTERN_TABLE_ID, WESTERN_TABLE_ID] {
        let table_sel = selector(&format!("table#{table_id}"))?;
        let table = document
            .select(&table_sel)
            .next()
            .ok_or_else(|| MvpError::SchemaMismatch(format!("table#{table_id} not found")))?;

        for (row_index, row) in table.select(&selectors.full_row).enumerate() {
            match parse_team_row(&row, &selectors) {
                Ok(team) => teams.push(team),
                Err(e) => warn!("dropping {table_id} row {row_index}: {e}"),
            }
        }
    }

    assign_ranks(&mut teams);
    info!("extracted {} teams from standings", teams.len());
    Ok(teams)
}

fn parse_team_row(row: &ElementRef, selectors: &RowSelectors) -> Result<TeamRecord> {
    let link = row
        .select(&selectors.link)
        .next()
        .ok_or_else(|| MvpError::SchemaMismatch("team link missing".to_string()))?;
    let name = cell_text(&link);
    let href = link
        .value()
        .attr("href")
        .ok_or_else(|| MvpError::SchemaMismatch("team link has no href".to_string()))?;
    let abbreviation = abbreviation_from_href(href)
        .ok_or_else(|| MvpError::SchemaMismatch(format!("no team code in href {href:?}")))?;

    let wins = stat_cell(row, &selectors.wins, "wins")?;
    let losses = stat_cell(row, &selectors.losses, "losses")?;
    let win_pct = stat_cell(row, &selectors.win_pct, "win_loss_pct")?;

    Ok(TeamRecord {
        name,
        abbreviation,
        wins,
        losses,
        win_pct,
        rank: 0,
    })
}

fn stat_cell<T: std::str::FromStr>(row: &ElementRef, sel: &Selector, column: &str) -> Result<T> {
    let cell = row
        .select(sel)
        .next()
        .ok_or_else(|| MvpError::SchemaMismatch(format!("{column} cell missing")))?;
    let raw = cell_text(&cell);
    raw.parse::<T>().map_err(|_| MvpError::NumericCoercion {
        column: column.to_string(),
        raw,
    })
}

fn cell_text(el: &ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// `/teams/BOS/2024.html` -> `BOS`
pub fn abbreviation_from_href(href: &str) -> Option<String> {
    let parts: Vec<&str> = href.split('/').collect();
    if parts.len() < 2 {
        return None;
    }
    let code = parts[parts.len() - 2].trim();
    if code.is_empty() {
        return None;
    }
    Some(code.to_uppercase())
}

/// Stable sort by ascending wins, then rank = position + 1. The fewest-wins
/// team ends up with rank 1.
pub fn assign_ranks(teams: &mut [TeamRecord]) {
    teams.sort_by_key(|t| t.wins);
    for (idx, team) in teams.iter_mut().enumerate() {
        team.rank = idx as u32 + 1;
    }
}

pub fn find_team<'a>(teams: &'a [TeamRecord], abbreviation: &str) -> Option<&'a TeamRecord> {
    teams.iter().find(|t| t.abbreviation == abbreviation)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(abbr: &str, wins: u32) -> TeamRecord {
        TeamRecord {
            name: abbr.to_string(),
            abbreviation: abbr.to_string(),
            wins,
            losses: 82 - wins,
            win_pct: wins as f64 / 82.0,
            rank: 0,
        }
    }

    fn row(name: &str, code: &str, wins: &str, losses: &str, pct: &str) -> String {
        format!(
            r#"<tr class="full_table"><th data-stat="team_name"><a href="/teams/{code}/2024.html">{name}</a></th>
            <td data-stat="wins">{wins}</td><td data-stat="losses">{losses}</td>
            <td data-stat="win_loss_pct">{pct}</td></tr>"#
        )
    }

    fn page(east: &str, west: &str) -> String {
        format!(
            r#"<html><body>
            <table id="divs_standings_E"><tr class="thead"><th>Atlantic Division</th></tr>{east}</table>
            <table id="divs_standings_W"><tr class="thead"><th>Pacific Division</th></tr>{west}</table>
            </body></html>"#
        )
    }

    #[test]
    fn href_segment_is_upper_cased() {
        assert_eq!(abbreviation_from_href("/teams/bos/2024.html").as_deref(), Some("BOS"));
        assert_eq!(abbreviation_from_href("2024.html"), None);
    }

    #[test]
    fn ranks_ascend_with_wins_and_ties_keep_order() {
        let mut teams = vec![team("AAA", 30), team("BBB", 10), team("CCC", 30), team("DDD", 50)];
        assign_ranks(&mut teams);
        let order: Vec<&str> = teams.iter().map(|t| t.abbreviation.as_str()).collect();
        assert_eq!(order, ["BBB", "AAA", "CCC", "DDD"]);
        let ranks: Vec<u32> = teams.iter().map(|t| t.rank).collect();
        assert_eq!(ranks, [1, 2, 3, 4]);
    }

    #[test]
    fn extracts_both_conferences() {
        let html = page(
            &row("Boston Celtics", "BOS", "64", "18", ".780"),
            &format!(
                "{}{}",
                row("Denver Nuggets", "DEN", "57", "25", ".695"),
                row("Portland Trail Blazers", "POR", "21", "61", ".256")
            ),
        );
        let teams = extract_standings(&html).unwrap();
        assert_eq!(teams.len(), 3);
        assert_eq!(teams[0].abbreviation, "POR");
        assert_eq!(teams[0].rank, 1);
        let bos = find_team(&teams, "BOS").unwrap();
        assert_eq!(bos.name, "Boston Celtics");
        assert_eq!((bos.wins, bos.losses, bos.rank), (64, 18, 3));
        assert!((bos.win_pct - 0.780).abs() < 1e-9);
    }

    #[test]
    fn malformed_row_is_dropped_not_fatal() {
        let html = page(
            &format!(
                "{}{}",
                row("Boston Celtics", "BOS", "64", "18", ".780"),
                row("Broken", "BRK", "n/a", "18", ".500")
            ),
            &row("Denver Nuggets", "DEN", "57", "25", ".695"),
        );
        let teams = extract_standings(&html).unwrap();
        assert_eq!(teams.len(), 2);
        assert!(find_team(&teams, "BRK").is_none());
    }

    #[test]
    fn missing_conference_table_is_schema_mismatch() {
        let html = r#"<table id="divs_standings_E"></table>"#;
        let err = extract_standings(html).unwrap_err();
        assert!(matches!(err, MvpError::SchemaMismatch(_)));
    }
}
