use crate::error::Error;
use crate::fmt::LabelMode;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

/// One benchmark run, as written by the loadgen. The file carries many more
/// keys (percentiles, cdf, per-client stats); only the three below matter for
/// the throughput-latency plot and the rest are ignored. A missing key
/// defaults to zero, which keeps partially written results plottable.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResultRecord {
    #[serde(skip)]
    pub source_name: String,
    #[serde(default)]
    pub client_count: u64,
    #[serde(default)]
    pub throughput_ops: f64,
    #[serde(default)]
    pub avg_latency_ms: f64,
}

/// One plotted point: throughput on x, average latency on y.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub record: ResultRecord,
    pub label: String,
}

impl Point {
    pub fn new(record: ResultRecord, label_mode: LabelMode) -> Self {
        let label = label_mode.label(&record);
        Self { record, label }
    }

    pub fn x(&self) -> f64 {
        self.record.throughput_ops
    }

    pub fn y(&self) -> f64 {
        self.record.avg_latency_ms
    }

    pub fn source_name(&self) -> &str {
        &self.record.source_name
    }
}

/// Scans `folder` for `*.json` result files and returns one point per file,
/// ordered by file name so that repeated invocations over the same results
/// always produce the same sequence.
pub fn collect(
    folder: impl AsRef<Path>,
    label_mode: LabelMode,
) -> Result<Vec<Point>, Error> {
    let folder = folder.as_ref();

    let mut files = Vec::new();
    for entry in std::fs::read_dir(folder)? {
        let path = entry?.path();
        if path.extension().and_then(|ext| ext.to_str()) == Some("json")
            && path.is_file()
        {
            files.push(path);
        }
    }
    if files.is_empty() {
        return Err(Error::NotFound {
            folder: folder.to_path_buf(),
        });
    }

    // directory enumeration order is not deterministic; file-name order is
    files.sort();

    info!("found {} result files in {}", files.len(), folder.display());

    let mut points = Vec::with_capacity(files.len());
    for path in files {
        let record = load_record(&path)?;
        points.push(Point::new(record, label_mode));
    }
    Ok(points)
}

fn load_record(path: &Path) -> Result<ResultRecord, Error> {
    let file = File::open(path)?;
    let buf = BufReader::new(file);
    let mut record: ResultRecord =
        serde_json::from_reader(buf).map_err(|err| Error::Parse {
            file: path.to_path_buf(),
            reason: err.to_string(),
        })?;
    record.source_name = file_name(path);
    Ok(record)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
