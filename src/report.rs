// src/report.rs

//! Report sinks: where completed campaign results go.
//!
//! Each campaign's report is handed to the sink as soon as the campaign
//! completes, so a long batch never has to hold every result in memory.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::Result;
use crate::models::CampaignReport;

/// Receiver for completed campaign reports.
#[async_trait]
pub trait ReportSink: Send + Sync {
    /// Persist or collect one completed campaign.
    async fn append(&mut self, report: &CampaignReport) -> Result<()>;
}

/// Collects reports in memory for the caller.
#[derive(Debug, Default)]
pub struct MemorySink {
    reports: Vec<CampaignReport>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> &[CampaignReport] {
        &self.reports
    }

    pub fn into_reports(self) -> Vec<CampaignReport> {
        self.reports
    }
}

#[async_trait]
impl ReportSink for MemorySink {
    async fn append(&mut self, report: &CampaignReport) -> Result<()> {
        self.reports.push(report.clone());
        Ok(())
    }
}

/// Appends one JSON line per completed campaign to a file.
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ReportSink for FileSink {
    async fn append(&mut self, report: &CampaignReport) -> Result<()> {
        let mut line = serde_json::to_string(report)?;
        line.push('\n');

        let mut file = tokio::fs::OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        log::debug!(
            "Appended report for '{}' to {}",
            report.keyword,
            self.path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Campaign;

    fn sample_report(keyword: &str) -> CampaignReport {
        Campaign::new(keyword, "example.com").report()
    }

    #[tokio::test]
    async fn test_memory_sink_collects_in_order() {
        let mut sink = MemorySink::new();
        sink.append(&sample_report("first")).await.unwrap();
        sink.append(&sample_report("second")).await.unwrap();

        let reports = sink.into_reports();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].keyword, "first");
        assert_eq!(reports[1].keyword, "second");
    }

    #[tokio::test]
    async fn test_file_sink_appends_json_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.jsonl");

        let mut sink = FileSink::new(&path);
        sink.append(&sample_report("first")).await.unwrap();
        sink.append(&sample_report("second")).await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let parsed: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(parsed["keyword"], "second");
        assert_eq!(parsed["target"], "example.com");
    }
}
