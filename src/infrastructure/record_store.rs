//! 参与者记录库 - 基础设施层
//!
//! 只暴露"按 ID 读取"和"全量读取"两种能力

use crate::error::StoreError;
use crate::models::Participant;
use std::collections::BTreeMap;
use std::future::Future;
use std::sync::RwLock;

/// 参与者记录库
pub trait RecordStore: Send + Sync {
    /// 按 ID 读取，记录不存在时返回 `Ok(None)`
    fn get_by_id(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<Participant>, StoreError>> + Send;

    /// 读取全部记录
    fn get_all(&self) -> impl Future<Output = Result<Vec<Participant>, StoreError>> + Send;
}

/// 内存记录库（测试和离线使用）
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    records: RwLock<BTreeMap<String, Participant>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用一组记录创建
    pub fn from_records(records: impl IntoIterator<Item = Participant>) -> Self {
        let store = Self::new();
        for record in records {
            store.insert(record);
        }
        store
    }

    /// 插入或覆盖记录
    pub fn insert(&self, record: Participant) {
        let mut records = self.records.write().unwrap_or_else(|e| e.into_inner());
        records.insert(record.id.clone(), record);
    }

    pub fn len(&self) -> usize {
        self.records.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RecordStore for MemoryRecordStore {
    async fn get_by_id(&self, id: &str) -> Result<Option<Participant>, StoreError> {
        let records = self.records.read().unwrap_or_else(|e| e.into_inner());
        Ok(records.get(id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<Participant>, StoreError> {
        let records = self.records.read().unwrap_or_else(|e| e.into_inner());
        Ok(records.values().cloned().collect())
    }
}
