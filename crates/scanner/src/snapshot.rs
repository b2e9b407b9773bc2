use std::fs::File;

use csv::ReaderBuilder;
use tracing::debug;

use arb_scan_core::table::RateTable;

use super::error::Error;

/// Loads a snapshot CSV into a rate table.
///
/// The snapshot is a square matrix: the header row names the destination
/// currencies, the first column of each record names the source currency,
/// and each cell is "units of destination per unit of source". Empty cells
/// are missing quotes and produce no entry; diagonal and invalid rates are
/// the graph constructor's concern, not ours.
pub fn load_snapshot(path: &str) -> Result<RateTable, Error> {
    let file = File::open(path)?;
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(file);

    let headers = rdr.headers()?.clone();
    if headers.len() < 2 {
        return Err(Error::MissingHeader);
    }

    let mut table = RateTable::new();
    let mut cells = 0usize;
    for record in rdr.records() {
        let record = record?;
        let from = record.get(0).ok_or(Error::MissingHeader)?.trim().to_string();

        for (i, raw) in record.iter().enumerate().skip(1) {
            let raw = raw.trim();
            if raw.is_empty() {
                continue;
            }
            let to = headers.get(i).ok_or(Error::MissingHeader)?.trim();
            let rate: f64 = raw.parse().map_err(|_| Error::BadCell {
                row: from.clone(),
                col: to.to_string(),
                value: raw.to_string(),
            })?;
            table.insert(from.clone(), to, rate);
            cells += 1;
        }
    }

    debug!(path, cells, "snapshot loaded");
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const MOCK_SNAPSHOT: &str = "\
,BTC,ETH,USDT
BTC,,15.0,95000
ETH,0.066,,3500
USDT,0.00002,0.00028,
";

    fn write_snapshot(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write mock content");
        file
    }

    #[test]
    fn parses_a_square_snapshot() {
        let file = write_snapshot(MOCK_SNAPSHOT);
        let table = load_snapshot(file.path().to_str().unwrap()).unwrap();

        assert_eq!(table.get("BTC", "ETH"), Some(15.0));
        assert_eq!(table.get("USDT", "BTC"), Some(0.00002));
        assert_eq!(table.get("ETH", "USDT"), Some(3500.0));
        // Empty diagonal cells never became entries.
        assert_eq!(table.get("BTC", "BTC"), None);
    }

    #[test]
    fn empty_cells_are_missing_quotes() {
        let file = write_snapshot(",AAA,BBB\nAAA,,2.0\nBBB,,\n");
        let table = load_snapshot(file.path().to_str().unwrap()).unwrap();

        assert_eq!(table.get("AAA", "BBB"), Some(2.0));
        assert_eq!(table.get("BBB", "AAA"), None);
    }

    #[test]
    fn non_numeric_cell_is_reported_with_its_position() {
        let file = write_snapshot(",AAA,BBB\nAAA,,abc\n");
        let err = load_snapshot(file.path().to_str().unwrap()).unwrap_err();

        match err {
            Error::BadCell { row, col, value } => {
                assert_eq!(row, "AAA");
                assert_eq!(col, "BBB");
                assert_eq!(value, "abc");
            }
            other => panic!("expected BadCell, got: {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_snapshot("no_such_snapshot.csv").unwrap_err();
        match err {
            Error::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
            other => panic!("expected IoError, got: {other:?}"),
        }
    }
}
