//! JSON-export-backed assignment source.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::{Assignment, AssignmentSource, SourceError};

/// Reads assignments from the JSON export written by the scraper pipeline.
pub struct ExportFileSource {
    path: PathBuf,
}

impl ExportFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl AssignmentSource for ExportFileSource {
    async fn fetch(&self) -> Result<Vec<Assignment>, SourceError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(SourceError::Unavailable(format!(
                    "export file not found: {}",
                    self.path.display()
                )));
            }
            Err(err) => return Err(err.into()),
        };

        Ok(serde_json::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn reads_assignment_array() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("assignments.json");
        std::fs::write(
            &path,
            r#"[
                {
                    "id": "7001",
                    "course": "Operating Systems",
                    "title": "Scheduling report",
                    "due_date_raw": "2024.05.01 오후 11:59",
                    "link": "https://lms.example.ac.kr/report_view_form.acl?RT_SEQ=7001"
                }
            ]"#,
        )
        .unwrap();

        let records = ExportFileSource::new(path).fetch().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "7001");
        assert_eq!(records[0].due_date_raw, "2024.05.01 오후 11:59");
    }

    #[tokio::test]
    async fn link_is_optional() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("assignments.json");
        std::fs::write(
            &path,
            r#"[{"id": "1", "course": "Calculus", "title": "Problem set 3", "due_date_raw": "2024.05.01"}]"#,
        )
        .unwrap();

        let records = ExportFileSource::new(path).fetch().await.unwrap();
        assert_eq!(records[0].link, None);
    }

    #[tokio::test]
    async fn missing_file_is_unavailable() {
        let temp_dir = TempDir::new().unwrap();
        let source = ExportFileSource::new(temp_dir.path().join("nope.json"));
        let result = source.fetch().await;
        assert!(matches!(result, Err(SourceError::Unavailable(_))));
    }

    #[tokio::test]
    async fn malformed_export_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("assignments.json");
        std::fs::write(&path, "{ this is not json").unwrap();

        let result = ExportFileSource::new(path).fetch().await;
        assert!(matches!(result, Err(SourceError::Malformed(_))));
    }
}
