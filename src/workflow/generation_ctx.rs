//! 文档生成上下文
//!
//! 封装"我正在为第几个参与者生成哪种文档"这一信息

use std::fmt::Display;

use crate::models::DocumentKind;

/// 文档生成上下文
#[derive(Debug, Clone)]
pub struct GenerationCtx {
    /// 参与者ID
    pub participant_id: String,

    /// 在本批中的序号（从1开始，仅用于日志显示）
    pub item_index: usize,

    /// 本批总数
    pub total: usize,

    /// 文档种类
    pub kind: DocumentKind,
}

impl GenerationCtx {
    /// 创建新的生成上下文
    pub fn new(participant_id: String, item_index: usize, total: usize, kind: DocumentKind) -> Self {
        Self {
            participant_id,
            item_index,
            total,
            kind,
        }
    }

    /// 单个文档生成的上下文
    pub fn single(participant_id: &str, kind: DocumentKind) -> Self {
        Self::new(participant_id.to_string(), 1, 1, kind)
    }
}

impl Display for GenerationCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{} {}/{} 参与者#{}]",
            self.kind, self.item_index, self.total, self.participant_id
        )
    }
}
