//! 批量文档生成器 - 编排层
//!
//! ## 职责
//!
//! 本模块负责单个/批量文档的调度和统计。
//!
//! ## 核心功能
//!
//! 1. **单个生成**：`generate_one`，任何失败都转换为失败结果，不会向上抛出
//! 2. **批量生成**：`generate_batch`，逐个处理参与者，单个失败不影响其他参与者
//! 3. **顺序保证**：结果顺序与输入 ID 顺序一致（即使开启并发）
//! 4. **并发控制**：`max_concurrency` 限制同时处理的数量，默认 1（严格顺序）
//! 5. **取消**：取消后不再开始新的参与者，返回已完成的部分结果
//! 6. **ID 选择**：按参与者状态筛选全部记录
//!
//! ## 设计特点
//!
//! - **向下委托**：单个参与者的处理委托给 `GenerationFlow`
//! - **模板缓存**：每次批处理创建一个 `TemplateCache`，批处理结束即丢弃

use futures::stream::{self, StreamExt};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::error::AppResult;
use crate::infrastructure::{RecordStore, TemplateStore};
use crate::models::{DocumentKind, GenerationResult, StatusPeserta};
use crate::workflow::{GenerationCtx, GenerationFlow, TemplateCache};

/// 批量文档生成器
pub struct Generator<R, T> {
    flow: GenerationFlow<R, T>,
    max_concurrency: usize,
}

impl<R: RecordStore, T: TemplateStore> Generator<R, T> {
    /// 创建生成器（严格顺序处理）
    pub fn new(records: R, templates: T) -> Self {
        Self {
            flow: GenerationFlow::new(records, templates),
            max_concurrency: 1,
        }
    }

    /// 使用已配置好的流程创建
    pub fn from_flow(flow: GenerationFlow<R, T>) -> Self {
        Self {
            flow,
            max_concurrency: 1,
        }
    }

    /// 设置最大并发数（0 按 1 处理）
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    /// 生成单个文档
    pub async fn generate_one(&self, participant_id: &str, kind: DocumentKind) -> GenerationResult {
        let ctx = GenerationCtx::single(participant_id, kind);
        let cache = TemplateCache::new();
        self.run_item(&ctx, &cache).await
    }

    /// 批量生成
    ///
    /// # 参数
    /// - `participant_ids`: 参与者ID列表
    /// - `kind`: 文档种类
    /// - `cancel`: 取消令牌，取消后不再开始新的参与者
    ///
    /// # 返回
    /// 每个已处理的参与者一个结果，顺序与输入一致
    pub async fn generate_batch(
        &self,
        participant_ids: &[String],
        kind: DocumentKind,
        cancel: &CancellationToken,
    ) -> Vec<GenerationResult> {
        let total = participant_ids.len();
        if total == 0 {
            return Vec::new();
        }

        let cache = TemplateCache::new();
        let cache = &cache;

        let results: Vec<GenerationResult> = stream::iter(participant_ids.iter().enumerate())
            .take_while(|_| futures::future::ready(!cancel.is_cancelled()))
            .map(|(index, id)| {
                let ctx = GenerationCtx::new(id.clone(), index + 1, total, kind);
                async move { self.run_item(&ctx, cache).await }
            })
            .buffered(self.max_concurrency)
            .collect()
            .await;

        if results.len() < total {
            warn!(
                "⚠️ 批处理已取消: 已处理 {}/{}，剩余 {} 个未开始",
                results.len(),
                total,
                total - results.len()
            );
        }

        results
    }

    /// 选择要生成的参与者ID（按ID排序）
    ///
    /// 读取失败属于批次级错误。
    pub async fn select_ids(&self, filter: Option<StatusPeserta>) -> AppResult<Vec<String>> {
        let participants = self.flow.records().get_all().await?;
        let mut ids: Vec<String> = participants
            .into_iter()
            .filter(|p| filter.map_or(true, |status| p.status_peserta == status))
            .map(|p| p.id)
            .collect();
        ids.sort();
        Ok(ids)
    }

    /// 处理单个参与者，所有错误都转换为失败结果
    async fn run_item(&self, ctx: &GenerationCtx, cache: &TemplateCache) -> GenerationResult {
        match self.flow.run(ctx, cache).await {
            Ok(document) => {
                info!("{} ✓ 生成成功: {}", ctx, document.file_name);
                GenerationResult::Success(document)
            }
            Err(e) => {
                error!("{} ❌ 生成失败: {}", ctx, e);
                GenerationResult::Failure {
                    participant_id: ctx.participant_id.clone(),
                    error: e,
                }
            }
        }
    }
}

/// 批处理统计
#[derive(Debug, Default, Clone, PartialEq)]
pub struct BatchSummary {
    pub total: usize,
    pub success: usize,
    /// (参与者ID, 失败原因)
    pub failures: Vec<(String, String)>,
}

impl BatchSummary {
    pub fn from_results(results: &[GenerationResult]) -> Self {
        let mut summary = Self {
            total: results.len(),
            ..Default::default()
        };
        for result in results {
            match result {
                GenerationResult::Success(_) => summary.success += 1,
                GenerationResult::Failure {
                    participant_id,
                    error,
                } => summary
                    .failures
                    .push((participant_id.clone(), error.to_string())),
            }
        }
        summary
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{GenerationError, StoreError};
    use crate::infrastructure::{MemoryRecordStore, MemoryTemplateStore};
    use crate::models::{InformasiPribadi, Participant};
    use crate::services::template_renderer::test_support::build_docx;

    fn participant(id: &str, paket: &str, status: StatusPeserta) -> Participant {
        Participant {
            id: id.to_string(),
            informasi_pribadi: InformasiPribadi {
                nama_lengkap: format!("Peserta {}", id),
                ..Default::default()
            },
            paket_pelatihan: paket.to_string(),
            status_peserta: status,
            ..Default::default()
        }
    }

    fn generator(
        records: Vec<Participant>,
    ) -> Generator<MemoryRecordStore, MemoryTemplateStore> {
        let templates = MemoryTemplateStore::new()
            .with_template("paket1", build_docx(&["{informasiPribadi.namaLengkap}"], None))
            .with_template("paket3", build_docx(&["{tidakAda}"], None));
        Generator::new(MemoryRecordStore::from_records(records), templates)
    }

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_generate_one_not_found_is_a_failure_result() {
        let generator = generator(vec![]);
        let result = generator.generate_one("p404", DocumentKind::Krs).await;
        assert_eq!(
            result.error(),
            Some(&GenerationError::NotFound {
                id: "p404".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_generate_batch_empty() {
        let generator = generator(vec![]);
        let results = generator
            .generate_batch(&[], DocumentKind::Krs, &CancellationToken::new())
            .await;
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_generate_batch_isolates_failures_and_keeps_order() {
        let input = ids(&["e", "b", "x", "c", "d", "a"]);

        for concurrency in [1, 3] {
            let generator = generator(vec![
                participant("a", "paket1", StatusPeserta::Aktif),
                participant("b", "", StatusPeserta::Aktif),
                participant("c", "paket3", StatusPeserta::Aktif),
                participant("d", "paket2", StatusPeserta::Aktif),
                participant("e", "paket1", StatusPeserta::Aktif),
            ])
            .with_max_concurrency(concurrency);

            let results = generator
                .generate_batch(&input, DocumentKind::Krs, &CancellationToken::new())
                .await;

            let order: Vec<&str> = results.iter().map(|r| r.participant_id()).collect();
            assert_eq!(order, vec!["e", "b", "x", "c", "d", "a"]);

            let kinds: Vec<&str> = results
                .iter()
                .map(|r| r.error().map_or("ok", GenerationError::kind))
                .collect();
            assert_eq!(
                kinds,
                vec![
                    "ok",
                    "invalid_package",
                    "not_found",
                    "template_render",
                    "template_fetch",
                    "ok"
                ]
            );
        }
    }

    #[tokio::test]
    async fn test_cancelled_batch_returns_partial_results() {
        let generator = generator(vec![participant("a", "paket1", StatusPeserta::Baru)]);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let results = generator
            .generate_batch(&ids(&["a", "a"]), DocumentKind::Krs, &cancel)
            .await;
        assert!(results.is_empty());
    }

    /// 第一次读取记录时触发取消
    struct CancelOnFirstRead {
        inner: MemoryRecordStore,
        cancel: CancellationToken,
    }

    impl RecordStore for CancelOnFirstRead {
        async fn get_by_id(&self, id: &str) -> Result<Option<Participant>, StoreError> {
            self.cancel.cancel();
            self.inner.get_by_id(id).await
        }

        async fn get_all(&self) -> Result<Vec<Participant>, StoreError> {
            self.inner.get_all().await
        }
    }

    #[tokio::test]
    async fn test_cancel_during_batch_keeps_finished_items() {
        let cancel = CancellationToken::new();
        let records = CancelOnFirstRead {
            inner: MemoryRecordStore::from_records(vec![
                participant("a", "paket1", StatusPeserta::Aktif),
                participant("b", "paket1", StatusPeserta::Aktif),
                participant("c", "paket1", StatusPeserta::Aktif),
            ]),
            cancel: cancel.clone(),
        };
        let templates = MemoryTemplateStore::new()
            .with_template("paket1", build_docx(&["{informasiPribadi.namaLengkap}"], None));
        let generator = Generator::new(records, templates);

        let results = generator
            .generate_batch(&ids(&["a", "b", "c"]), DocumentKind::Krs, &cancel)
            .await;

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].participant_id(), "a");
        assert!(results[0].is_success());
    }

    #[tokio::test]
    async fn test_select_ids_filters_by_status() {
        let generator = generator(vec![
            participant("c", "paket1", StatusPeserta::Aktif),
            participant("a", "paket1", StatusPeserta::Aktif),
            participant("b", "paket1", StatusPeserta::Lulus),
        ]);

        assert_eq!(
            generator.select_ids(None).await.unwrap(),
            vec!["a", "b", "c"]
        );
        assert_eq!(
            generator
                .select_ids(Some(StatusPeserta::Aktif))
                .await
                .unwrap(),
            vec!["a", "c"]
        );
    }

    #[test]
    fn test_batch_summary() {
        let results = vec![
            GenerationResult::Failure {
                participant_id: "p2".to_string(),
                error: GenerationError::InvalidPackage {
                    id: "p2".to_string(),
                    paket: String::new(),
                },
            },
            GenerationResult::Failure {
                participant_id: "p3".to_string(),
                error: GenerationError::NotFound {
                    id: "p3".to_string(),
                },
            },
        ];

        let summary = BatchSummary::from_results(&results);
        assert_eq!(summary.total, 2);
        assert_eq!(summary.success, 0);
        assert_eq!(summary.failed(), 2);
        assert_eq!(summary.failures[0].0, "p2");
    }
}
