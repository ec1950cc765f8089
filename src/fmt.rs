use crate::results::ResultRecord;

/// How the annotation attached to each plotted point is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelMode {
    /// Label with the number of clients of the run, e.g. "8 clients".
    ClientCount,
    /// Label with a cleaned-up form of the originating file name.
    SourceStem,
}

impl LabelMode {
    pub fn label(&self, record: &ResultRecord) -> String {
        match self {
            Self::ClientCount => format!("{} clients", record.client_count),
            Self::SourceStem => Self::stem(&record.source_name),
        }
    }

    // "resultados-16c.json" becomes "16c"; the unprefixed "resultados.json"
    // is the baseline run
    fn stem(source_name: &str) -> String {
        let stem = source_name.strip_suffix(".json").unwrap_or(source_name);
        let stem = stem.strip_prefix("resultados-").unwrap_or(stem);
        if stem == "resultados" {
            String::from("base")
        } else {
            stem.to_string()
        }
    }
}
