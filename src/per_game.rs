use scraper::{Html, Selector};
use tracing::{info, warn};

use crate::error::{MvpError, Result};

/// Raw text table keyed by header name. The leading row-index column of the
/// source page is not kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl StatsTable {
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// First header among `names` that exists.
    pub fn column_any(&self, names: &[&str]) -> Option<usize> {
        names.iter().find_map(|name| self.column(name))
    }

    pub fn require_column(&self, names: &[&str]) -> Result<usize> {
        self.column_any(names).ok_or_else(|| {
            MvpError::SchemaMismatch(format!("per-game table has no {} column", names.join("/")))
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub fn extract_per_game(html: &str) -> Result<StatsTable> {
    let document = Html::parse_document(html);
    let tr = selector("tr")?;
    let th = selector("th")?;
    let td = selector("td")?;

    let mut rows = document.select(&tr);
    let header_row = rows
        .next()
        .ok_or_else(|| MvpError::SchemaMismatch("per-game page has no table rows".to_string()))?;
    let headers: Vec<String> = header_row
        .select(&th)
        .skip(1)
        .map(|cell| cell.text().collect::<String>().trim().to_string())
        .collect();
    if headers.is_empty() {
        return Err(MvpError::SchemaMismatch(
            "per-game header row has no columns".to_string(),
        ));
    }

    let mut table = StatsTable {
        headers,
        rows: Vec::new(),
    };
    let mut skipped = 0usize;
    for (row_index, row) in rows.enumerate() {
        let mut cells: Vec<String> = row
            .select(&td)
            .map(|cell| cell.text().collect::<String>().trim().to_string())
            .collect();
        // Header repeats carry no <td> at all.
        if cells.is_empty() {
            continue;
        }
        if cells.len() > table.headers.len() {
            warn!(
                "skipping per-game row {}: {} cells for {} columns",
                row_index + 1,
                cells.len(),
                table.headers.len()
            );
            skipped += 1;
            continue;
        }
        cells.resize(table.headers.len(), String::new());
        table.rows.push(cells);
    }

    info!(
        "extracted {} player rows ({} columns, {} skipped)",
        table.rows.len(),
        table.headers.len(),
        skipped
    );
    Ok(table)
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| MvpError::SchemaMismatch(format!("selector {css}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><body><table id="per_game_stats">
        <thead><tr><th>Rk</th><th>Player</th><th>Tm</th><th>GS</th><th>PTS</th></tr></thead>
        <tbody>
        <tr><th>1</th><td>Alpha One</td><td>BOS</td><td>70</td><td>22.1</td></tr>
        <tr class="thead"><th>Rk</th><th>Player</th><th>Tm</th><th>GS</th><th>PTS</th></tr>
        <tr><th>2</th><td>Beta Two</td><td>DEN</td><td>12</td></tr>
        <tr><th>3</th><td>Gamma</td><td>LAL</td><td>1</td><td>2</td><td>3</td></tr>
        </tbody></table></body></html>"#;

    #[test]
    fn drops_index_column_from_headers() {
        let table = extract_per_game(PAGE).unwrap();
        assert_eq!(table.headers, ["Player", "Tm", "GS", "PTS"]);
        assert_eq!(table.column("GS"), Some(2));
        assert_eq!(table.column_any(&["Team", "Tm"]), Some(1));
    }

    #[test]
    fn skips_header_repeats_and_overlong_rows() {
        let table = extract_per_game(PAGE).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0], ["Alpha One", "BOS", "70", "22.1"]);
    }

    #[test]
    fn short_rows_are_padded_with_blanks() {
        let table = extract_per_game(PAGE).unwrap();
        assert_eq!(table.rows[1], ["Beta Two", "DEN", "12", ""]);
    }

    #[test]
    fn missing_column_is_schema_mismatch() {
        let table = extract_per_game(PAGE).unwrap();
        assert!(matches!(
            table.require_column(&["eFG%"]),
            Err(MvpError::SchemaMismatch(_))
        ));
    }

    #[test]
    fn empty_page_is_schema_mismatch() {
        assert!(extract_per_game("<html></html>").is_err());
    }
}
