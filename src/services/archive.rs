//! 批量归档服务 - 业务能力层
//!
//! 把一批生成结果中的成功项打包为一个 zip 文件

use std::collections::HashMap;
use std::io::{Cursor, Write};

use tracing::{debug, warn};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{AppResult, ArchiveError};
use crate::models::GenerationResult;

/// 内存中的批量归档
pub struct BatchArchive {
    writer: ZipWriter<Cursor<Vec<u8>>>,
    /// 每个文件名已使用的次数
    names: HashMap<String, usize>,
    entries: usize,
}

impl BatchArchive {
    pub fn new() -> Self {
        Self {
            writer: ZipWriter::new(Cursor::new(Vec::new())),
            names: HashMap::new(),
            entries: 0,
        }
    }

    /// 添加一个条目，重名时追加 ` (2)`、` (3)` … 后缀，返回实际使用的文件名
    pub fn add(&mut self, file_name: &str, bytes: &[u8]) -> AppResult<String> {
        let entry_name = self.unique_name(file_name);
        if entry_name != file_name {
            warn!("文件名重复，重命名为: {}", entry_name);
        }

        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        self.writer
            .start_file(entry_name.as_str(), options)
            .map_err(|e| ArchiveError::EntryFailed {
                entry: entry_name.clone(),
                reason: e.to_string(),
            })?;
        self.writer
            .write_all(bytes)
            .map_err(|e| ArchiveError::EntryFailed {
                entry: entry_name.clone(),
                reason: e.to_string(),
            })?;

        self.entries += 1;
        debug!("已加入压缩包: {} ({} 字节)", entry_name, bytes.len());
        Ok(entry_name)
    }

    pub fn len(&self) -> usize {
        self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }

    /// 完成压缩包并返回字节
    pub fn finish(self) -> AppResult<Vec<u8>> {
        let cursor = self
            .writer
            .finish()
            .map_err(|e| ArchiveError::FinishFailed(e.to_string()))?;
        Ok(cursor.into_inner())
    }

    fn unique_name(&mut self, file_name: &str) -> String {
        let mut count = self.names.get(file_name).copied().unwrap_or(0);
        let mut candidate = file_name.to_string();
        while self.names.contains_key(&candidate) {
            count += 1;
            candidate = with_suffix(file_name, count + 1);
        }
        self.names.insert(file_name.to_string(), count);
        self.names.insert(candidate.clone(), 0);
        candidate
    }
}

impl Default for BatchArchive {
    fn default() -> Self {
        Self::new()
    }
}

/// `Budi_KRS_paket1.docx` → `Budi_KRS_paket1 (2).docx`
fn with_suffix(file_name: &str, n: usize) -> String {
    match file_name.rfind('.') {
        Some(dot) if dot > 0 => format!("{} ({}){}", &file_name[..dot], n, &file_name[dot..]),
        _ => format!("{} ({})", file_name, n),
    }
}

/// 把成功的结果打包为 zip，失败项跳过
pub fn assemble_archive(results: &[GenerationResult]) -> AppResult<Vec<u8>> {
    let mut archive = BatchArchive::new();
    for doc in results.iter().filter_map(GenerationResult::document) {
        archive.add(&doc.file_name, &doc.bytes)?;
    }
    debug!("压缩包共 {} 个文件", archive.len());
    archive.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenerationError;
    use crate::models::GeneratedDocument;
    use std::io::Read;
    use zip::ZipArchive;

    fn success(id: &str, file_name: &str) -> GenerationResult {
        GenerationResult::Success(GeneratedDocument {
            participant_id: id.to_string(),
            file_name: file_name.to_string(),
            bytes: format!("isi {}", id).into_bytes(),
        })
    }

    fn failure(id: &str) -> GenerationResult {
        GenerationResult::Failure {
            participant_id: id.to_string(),
            error: GenerationError::NotFound { id: id.to_string() },
        }
    }

    fn entry_names(bytes: Vec<u8>) -> Vec<String> {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect()
    }

    #[test]
    fn test_only_successes_become_entries() {
        let bytes = assemble_archive(&[
            success("p1", "Siti_KRS_paket2.docx"),
            failure("p2"),
            success("p3", "Budi_KRS_paket1.docx"),
        ])
        .unwrap();

        assert_eq!(
            entry_names(bytes.clone()),
            vec!["Siti_KRS_paket2.docx", "Budi_KRS_paket1.docx"]
        );

        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut content = String::new();
        archive
            .by_name("Budi_KRS_paket1.docx")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "isi p3");
    }

    #[test]
    fn test_only_failures_produce_empty_archive() {
        let bytes = assemble_archive(&[failure("p1"), failure("p2")]).unwrap();
        assert!(entry_names(bytes).is_empty());

        let bytes = assemble_archive(&[]).unwrap();
        assert!(entry_names(bytes).is_empty());
    }

    #[test]
    fn test_duplicate_names_get_suffix() {
        let bytes = assemble_archive(&[
            success("p1", "Budi_KRS_paket1.docx"),
            success("p2", "Budi_KRS_paket1.docx"),
            success("p3", "Budi_KRS_paket1.docx"),
            success("p4", "Budi_KRS_paket1 (2).docx"),
        ])
        .unwrap();

        assert_eq!(
            entry_names(bytes),
            vec![
                "Budi_KRS_paket1.docx",
                "Budi_KRS_paket1 (2).docx",
                "Budi_KRS_paket1 (3).docx",
                "Budi_KRS_paket1 (2) (2).docx",
            ]
        );
    }

    #[test]
    fn test_with_suffix_without_extension() {
        assert_eq!(with_suffix("laporan", 2), "laporan (2)");
        assert_eq!(with_suffix(".docx", 2), ".docx (2)");
    }
}
