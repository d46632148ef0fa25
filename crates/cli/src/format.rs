use clap::ValueEnum;
use serde::Serialize;
use store::FileMetadata;

/// Output rendering selected by `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Aligned columns, one row per version (the default).
    #[default]
    Table,
    /// A single JSON value on stdout.
    Json,
    /// One compact line per version, no header.
    Brief,
}

#[derive(Serialize)]
struct MetaRow<'a> {
    version: u32,
    base_size: u32,
    delta_size: u32,
    operation_count: u32,
    timestamp: i64,
    checksum: &'a str,
    message: &'a str,
}

impl<'a> From<&'a FileMetadata> for MetaRow<'a> {
    fn from(m: &'a FileMetadata) -> Self {
        Self {
            version: m.version,
            base_size: m.base_size,
            delta_size: m.delta_size,
            operation_count: m.operation_count,
            timestamp: m.timestamp,
            checksum: &m.checksum,
            message: &m.message,
        }
    }
}

/// Renders a file's version history per `format`.
#[must_use]
pub fn render_history(format: OutputFormat, entries: &[FileMetadata]) -> String {
    match format {
        OutputFormat::Json => {
            let rows: Vec<MetaRow<'_>> = entries.iter().map(MetaRow::from).collect();
            serde_json::to_string_pretty(&rows).unwrap_or_else(|_| "[]".to_string())
        }
        OutputFormat::Brief => entries
            .iter()
            .map(|m| format!("v{} {} {}", m.version, m.timestamp, m.message))
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Table => {
            let mut out = String::from("VERSION  BASE     DELTA    OPS  TIMESTAMP    MESSAGE\n");
            for m in entries {
                out.push_str(&format!(
                    "{:<8} {:<8} {:<8} {:<4} {:<12} {}\n",
                    m.version, m.base_size, m.delta_size, m.operation_count, m.timestamp, m.message
                ));
            }
            out
        }
    }
}

#[derive(Serialize)]
struct NameRow {
    name: String,
    versions: usize,
    latest: Option<u32>,
}

/// Renders the list of tracked logical names per `format`.
#[must_use]
pub fn render_list(format: OutputFormat, names: &[(String, Vec<u32>)]) -> String {
    match format {
        OutputFormat::Json => {
            let rows: Vec<NameRow> = names
                .iter()
                .map(|(name, versions)| NameRow {
                    name: name.clone(),
                    versions: versions.len(),
                    latest: versions.last().copied(),
                })
                .collect();
            serde_json::to_string_pretty(&rows).unwrap_or_else(|_| "[]".to_string())
        }
        OutputFormat::Brief => names
            .iter()
            .map(|(name, versions)| format!("{name} ({})", versions.len()))
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Table => {
            let mut out = String::from("NAME                 VERSIONS  LATEST\n");
            for (name, versions) in names {
                out.push_str(&format!(
                    "{:<20} {:<9} {}\n",
                    name,
                    versions.len(),
                    versions.last().copied().unwrap_or(0)
                ));
            }
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FileMetadata {
        FileMetadata {
            filename: "f".to_string(),
            version: 1,
            base_size: 0,
            delta_size: 3,
            operation_count: 1,
            timestamp: 1000,
            checksum: "abc".to_string(),
            message: "first".to_string(),
        }
    }

    #[test]
    fn json_history_is_valid_json() {
        let rendered = render_history(OutputFormat::Json, &[sample()]);
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value[0]["version"], 1);
    }

    #[test]
    fn brief_history_is_one_line_per_version() {
        let rendered = render_history(OutputFormat::Brief, &[sample(), sample()]);
        assert_eq!(rendered.lines().count(), 2);
    }

    #[test]
    fn table_history_has_a_header() {
        let rendered = render_history(OutputFormat::Table, &[sample()]);
        assert!(rendered.starts_with("VERSION"));
    }
}
