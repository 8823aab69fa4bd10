use crate::error::GenerationError;
use std::collections::BTreeMap;

/// 占位符 key（点路径）→ 显示字符串
///
/// 渲染前临时生成，不做持久化。
pub type FieldMapping = BTreeMap<String, String>;

/// 生成成功的文档
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedDocument {
    pub participant_id: String,
    /// 建议的下载文件名
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// 单个参与者的生成结果
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationResult {
    Success(GeneratedDocument),
    Failure {
        participant_id: String,
        error: GenerationError,
    },
}

impl GenerationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, GenerationResult::Success(_))
    }

    pub fn participant_id(&self) -> &str {
        match self {
            GenerationResult::Success(doc) => &doc.participant_id,
            GenerationResult::Failure { participant_id, .. } => participant_id,
        }
    }

    pub fn document(&self) -> Option<&GeneratedDocument> {
        match self {
            GenerationResult::Success(doc) => Some(doc),
            GenerationResult::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&GenerationError> {
        match self {
            GenerationResult::Success(_) => None,
            GenerationResult::Failure { error, .. } => Some(error),
        }
    }
}
