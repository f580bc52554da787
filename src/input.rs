use chrono::NaiveDate;

use crate::error::RiskError;
use crate::model::price::PriceMatrix;

/// Parse a flat price-history file: a `date` header column followed by one
/// column per asset, ISO dates, positive prices, one row per trading day.
///
/// This is the agreed interface with the data-fetch collaborator; the table
/// arrives already sorted and forward-filled. All structural problems
/// (missing header, ragged rows, bad cells) surface as [`RiskError::Data`];
/// the date/price invariants are then enforced by [`PriceMatrix::new`].
pub fn parse_price_csv(text: &str) -> Result<PriceMatrix, RiskError> {
    let mut lines = text.lines().filter(|l| !l.trim().is_empty());

    let header = lines
        .next()
        .ok_or_else(|| RiskError::Data("empty price file".to_string()))?;
    let mut columns = header.split(',').map(str::trim);
    match columns.next() {
        Some("date") => {}
        other => {
            return Err(RiskError::Data(format!(
                "first column must be 'date', got '{}'",
                other.unwrap_or("")
            )));
        }
    }
    let assets: Vec<String> = columns.map(str::to_string).collect();
    if assets.is_empty() {
        return Err(RiskError::Data("no asset columns in header".to_string()));
    }

    let mut dates = Vec::new();
    let mut rows = Vec::new();
    for (lineno, line) in lines.enumerate() {
        let mut cells = line.split(',').map(str::trim);
        let date_cell = cells.next().unwrap_or("");
        let date: NaiveDate = date_cell.parse().map_err(|_| {
            RiskError::Data(format!(
                "row {}: invalid date '{}'",
                lineno + 2,
                date_cell
            ))
        })?;

        let mut row = Vec::with_capacity(assets.len());
        for cell in cells {
            let px: f64 = cell.parse().map_err(|_| {
                RiskError::Data(format!("row {}: invalid price '{}'", lineno + 2, cell))
            })?;
            row.push(px);
        }
        dates.push(date);
        rows.push(row);
    }

    PriceMatrix::new(dates, assets, rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_file() {
        let text = "date,AAPL,MSFT\n2024-01-02,185.0,370.0\n2024-01-03,186.5,372.1\n";
        let m = parse_price_csv(text).unwrap();
        assert_eq!(m.n_days(), 2);
        assert_eq!(m.assets(), &["AAPL".to_string(), "MSFT".to_string()]);
        assert!((m.price(0, 1) - 370.0).abs() < f64::EPSILON);
    }

    #[test]
    fn skips_blank_lines() {
        let text = "date,AAPL\n2024-01-02,185.0\n\n2024-01-03,186.5\n";
        let m = parse_price_csv(text).unwrap();
        assert_eq!(m.n_days(), 2);
    }

    #[test]
    fn rejects_missing_date_header() {
        let text = "timestamp,AAPL\n2024-01-02,185.0\n";
        assert!(matches!(
            parse_price_csv(text).unwrap_err(),
            RiskError::Data(_)
        ));
    }

    #[test]
    fn rejects_bad_cells() {
        let text = "date,AAPL\n2024-01-02,x\n";
        assert!(matches!(
            parse_price_csv(text).unwrap_err(),
            RiskError::Data(_)
        ));

        let text = "date,AAPL\nnot-a-date,185.0\n";
        assert!(matches!(
            parse_price_csv(text).unwrap_err(),
            RiskError::Data(_)
        ));
    }

    #[test]
    fn rejects_ragged_row() {
        let text = "date,AAPL,MSFT\n2024-01-02,185.0\n";
        assert!(matches!(
            parse_price_csv(text).unwrap_err(),
            RiskError::Data(_)
        ));
    }

    #[test]
    fn rejects_out_of_order_dates() {
        let text = "date,AAPL\n2024-01-03,185.0\n2024-01-02,184.0\n";
        assert!(matches!(
            parse_price_csv(text).unwrap_err(),
            RiskError::Data(_)
        ));
    }
}
