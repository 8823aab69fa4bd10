//! 文件交付服务 - 业务能力层
//!
//! 把单个文档或批量压缩包写入输出目录

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{AppResult, FileError};
use crate::models::{DocumentKind, GeneratedDocument};

/// 未指定筛选条件时压缩包名称中使用的标记
const ALL_LABEL: &str = "semua";

/// 文件交付服务
pub struct Delivery {
    output_dir: PathBuf,
}

impl Delivery {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// 写出单个文档，返回文件路径
    pub async fn deliver_document(&self, document: &GeneratedDocument) -> AppResult<PathBuf> {
        let path = self.output_dir.join(&document.file_name);
        self.write(&path, &document.bytes).await?;
        info!("📄 文档已保存: {}", path.display());
        Ok(path)
    }

    /// 写出批量压缩包：`batch_<种类>_<筛选条件|semua>.zip`
    pub async fn deliver_archive(
        &self,
        bytes: &[u8],
        kind: DocumentKind,
        filter_label: Option<&str>,
    ) -> AppResult<PathBuf> {
        let path = self.output_dir.join(archive_file_name(kind, filter_label));
        self.write(&path, bytes).await?;
        info!("📦 压缩包已保存: {}", path.display());
        Ok(path)
    }

    async fn write(&self, path: &Path, bytes: &[u8]) -> AppResult<()> {
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|source| FileError::CreateDirFailed {
                path: self.output_dir.display().to_string(),
                source,
            })?;

        tokio::fs::write(path, bytes)
            .await
            .map_err(|source| FileError::WriteFailed {
                path: path.display().to_string(),
                source,
            })?;
        Ok(())
    }
}

/// 批量压缩包文件名
pub fn archive_file_name(kind: DocumentKind, filter_label: Option<&str>) -> String {
    let label = filter_label
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .unwrap_or(ALL_LABEL);
    format!("batch_{}_{}.zip", kind.label(), label)
}
