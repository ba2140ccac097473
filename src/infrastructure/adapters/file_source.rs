//! File Text Source - 文件系统文本读取实现
//!
//! 实现 TextSourcePort trait，并负责把导出结果写回磁盘

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::application::ports::{SourceError, SourceText, TextSourcePort};
use crate::domain::manuscript::ExportedManuscript;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// 文件系统文本源
#[derive(Debug, Clone, Default)]
pub struct FileTextSource;

impl FileTextSource {
    pub fn new() -> Self {
        Self
    }

    /// 把导出结果写入目录，返回写入的文件路径
    pub async fn write_export(
        &self,
        output_dir: impl AsRef<Path>,
        exported: &ExportedManuscript,
    ) -> Result<PathBuf, SourceError> {
        let output_dir = output_dir.as_ref();

        fs::create_dir_all(output_dir)
            .await
            .map_err(|e| SourceError::Io(e.to_string()))?;

        let path = output_dir.join(&exported.filename);
        fs::write(&path, exported.content.as_bytes())
            .await
            .map_err(|e| SourceError::Io(e.to_string()))?;

        tracing::debug!(
            "Wrote export: path={}, size={} bytes",
            path.display(),
            exported.content.len()
        );

        Ok(path)
    }
}

#[async_trait]
impl TextSourcePort for FileTextSource {
    async fn read(&self, path: &Path) -> Result<SourceText, SourceError> {
        let bytes = fs::read(path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => SourceError::NotFound(path.display().to_string()),
            _ => SourceError::Io(e.to_string()),
        })?;

        let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes[..]);
        let content = String::from_utf8(body.to_vec())
            .map_err(|_| SourceError::InvalidEncoding(path.display().to_string()))?;

        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        tracing::debug!(
            "Read source: file={}, size={} bytes",
            filename,
            content.len()
        );

        Ok(SourceText { content, filename })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_read_strips_bom_and_keeps_filename() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("novel.txt");
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice("Chapter 1\nHello".as_bytes());
        std::fs::write(&path, bytes).unwrap();

        let source = FileTextSource::new().read(&path).await.unwrap();

        assert_eq!(source.filename, "novel.txt");
        assert_eq!(source.content, "Chapter 1\nHello");
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        let dir = tempdir().unwrap();
        let result = FileTextSource::new().read(&dir.path().join("missing.txt")).await;

        assert!(matches!(result, Err(SourceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_read_rejects_invalid_utf8() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("latin1.txt");
        std::fs::write(&path, [0x43, 0x61, 0x66, 0xE9]).unwrap();

        let result = FileTextSource::new().read(&path).await;

        assert!(matches!(result, Err(SourceError::InvalidEncoding(_))));
    }

    #[tokio::test]
    async fn test_write_export_creates_directory() {
        let dir = tempdir().unwrap();
        let output_dir = dir.path().join("out");
        let exported = ExportedManuscript {
            content: "Chapter 1\nHello".to_string(),
            filename: "novel_edited.txt".to_string(),
        };

        let path = FileTextSource::new()
            .write_export(&output_dir, &exported)
            .await
            .unwrap();

        assert_eq!(path, output_dir.join("novel_edited.txt"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "Chapter 1\nHello");
    }
}
