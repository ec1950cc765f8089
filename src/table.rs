use crate::error::Error;
use crate::results::{Point, ResultRecord};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// One csv row. Field order is the column order of the exported table.
#[derive(Debug, Serialize, Deserialize)]
struct Row {
    source_name: String,
    client_count: u64,
    throughput_ops: f64,
    avg_latency_ms: f64,
}

impl From<&Point> for Row {
    fn from(point: &Point) -> Self {
        Self {
            source_name: point.record.source_name.clone(),
            client_count: point.record.client_count,
            throughput_ops: point.record.throughput_ops,
            avg_latency_ms: point.record.avg_latency_ms,
        }
    }
}

impl From<Row> for ResultRecord {
    fn from(row: Row) -> Self {
        Self {
            source_name: row.source_name,
            client_count: row.client_count,
            throughput_ops: row.throughput_ops,
            avg_latency_ms: row.avg_latency_ms,
        }
    }
}

const HEADER: [&str; 4] =
    ["source_name", "client_count", "throughput_ops", "avg_latency_ms"];

/// Writes `points` to a csv table at `path`, one row per point in sequence
/// order, creating the parent directory if needed. An empty sequence still
/// produces the header row.
pub fn export(points: &[Point], path: impl AsRef<Path>) -> Result<(), Error> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    // the header is written by hand so that it also shows up for an empty
    // sequence
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(&HEADER)?;
    for point in points {
        writer.serialize(Row::from(point))?;
    }
    writer.flush()?;

    info!("exported {} points to {}", points.len(), path.display());
    Ok(())
}

/// Reads a table previously written by `export` back into records, e.g. to
/// re-plot an old run without the original result files.
pub fn import(path: impl AsRef<Path>) -> Result<Vec<ResultRecord>, Error> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    for row in reader.deserialize() {
        let row: Row = row.map_err(|err| Error::Parse {
            file: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        records.push(ResultRecord::from(row));
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fmt::LabelMode;
    use quickcheck_macros::quickcheck;

    fn point(
        source_name: &str,
        client_count: u64,
        throughput_ops: f64,
        avg_latency_ms: f64,
    ) -> Point {
        let record = ResultRecord {
            source_name: source_name.to_string(),
            client_count,
            throughput_ops,
            avg_latency_ms,
        };
        Point::new(record, LabelMode::ClientCount)
    }

    #[test]
    fn export_writes_rows_in_sequence_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pontos.csv");
        let points =
            vec![point("a.json", 1, 100.0, 5.0), point("b.json", 2, 200.0, 3.0)];

        export(&points, &path).unwrap();

        let records = import(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], points[0].record);
        assert_eq!(records[1], points[1].record);
    }

    #[test]
    fn export_empty_sequence_writes_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pontos.csv");

        export(&[], &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "source_name,client_count,throughput_ops,avg_latency_ms\n"
        );
        assert!(import(&path).unwrap().is_empty());
    }

    #[test]
    fn export_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resultados").join("pontos.csv");

        export(&[point("a.json", 1, 1.0, 1.0)], &path).unwrap();
        assert!(path.is_file());
    }

    #[quickcheck]
    fn export_import_round_trip(entries: Vec<(u64, u32, u32)>) -> bool {
        // u32 values survive the trip through f64 and back exactly
        let points: Vec<_> = entries
            .iter()
            .enumerate()
            .map(|(i, &(clients, throughput, latency))| {
                point(
                    &format!("run-{:03}.json", i),
                    clients,
                    f64::from(throughput),
                    f64::from(latency),
                )
            })
            .collect();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pontos.csv");
        export(&points, &path).unwrap();
        let records = import(&path).unwrap();

        records.len() == points.len()
            && records
                .iter()
                .zip(&points)
                .all(|(record, point)| record == &point.record)
    }
}
