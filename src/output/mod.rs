//! Sinks that receive trend records once a fetch is done.

use crate::error::Result;
use crate::trending::TrendRecord;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Where a batch of records goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sink {
    Console,
    Json(PathBuf),
}

impl Sink {
    pub fn from_output(output: Option<PathBuf>) -> Self {
        match output {
            Some(path) => Sink::Json(path),
            None => Sink::Console,
        }
    }

    pub async fn deliver(&self, records: &[TrendRecord]) -> Result<()> {
        match self {
            Sink::Console => {
                let stdout = std::io::stdout();
                write_table(&mut stdout.lock(), records)?;
                Ok(())
            }
            Sink::Json(path) => write_json(path, records).await,
        }
    }
}

/// One line per record: name, stars, reason, url
pub fn write_table<W: Write>(out: &mut W, records: &[TrendRecord]) -> std::io::Result<()> {
    if records.is_empty() {
        writeln!(out, "No trending repositories available right now.")?;
        return Ok(());
    }

    for record in records {
        writeln!(
            out,
            "{} - ⭐ {} - {} - {}",
            record.name, record.star_count, record.trend_reason, record.url
        )?;
        if !record.description.is_empty() {
            writeln!(out, "    {}", record.description)?;
        }
    }

    Ok(())
}

/// Write records as a pretty-printed JSON array, creating parent directories
pub async fn write_json(path: &Path, records: &[TrendRecord]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let body = serde_json::to_vec_pretty(records)?;
    tokio::fs::write(path, body).await?;

    info!("Saved {} trending repositories to {}", records.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trending::TrendReason;
    use chrono::Utc;

    fn record(name: &str, stars: u64, description: &str) -> TrendRecord {
        TrendRecord {
            name: name.to_string(),
            url: format!("https://github.com/{name}"),
            star_count: stars,
            description: description.to_string(),
            language: "Rust".to_string(),
            fetched_at: Utc::now(),
            trend_reason: TrendReason::Popular,
        }
    }

    #[test]
    fn test_table_lines() {
        let mut out = Vec::new();
        write_table(&mut out, &[record("x/a", 12, "a tool"), record("y/b", 3, "")]).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "x/a - ⭐ 12 - popular - https://github.com/x/a");
        assert_eq!(lines[1], "    a tool");
        assert!(lines[2].starts_with("y/b - ⭐ 3"));
    }

    #[test]
    fn test_table_empty() {
        let mut out = Vec::new();
        write_table(&mut out, &[]).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "No trending repositories available right now.\n"
        );
    }

    #[tokio::test]
    async fn test_write_json_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("github.json");

        let records = vec![record("x/a", 12, "")];
        write_json(&path, &records).await.unwrap();

        let saved: Vec<TrendRecord> =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(saved, records);
    }

    #[tokio::test]
    async fn test_write_json_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.json");

        write_json(&path, &[]).await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn test_sink_from_output() {
        assert_eq!(Sink::from_output(None), Sink::Console);
        assert_eq!(
            Sink::from_output(Some("out.json".into())),
            Sink::Json("out.json".into())
        );
    }
}
