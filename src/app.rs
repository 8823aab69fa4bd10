use crate::clients::{FirebaseRecordStore, HttpTemplateStore};
use crate::config::Config;
use crate::error::StoreError;
use crate::infrastructure::{DirTemplateStore, RecordStore, TemplateStore};
use crate::models::{DocumentKind, GenerationResult, StatusPeserta};
use crate::orchestrator::{BatchSummary, Generator};
use crate::services::{assemble_archive, Delivery, RenderOptions};
use crate::utils::logging::{log_ids_loaded, log_startup, print_final_stats};
use crate::workflow::GenerationFlow;
use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// 模板来源：按 `template_base` 选择网络或本地目录
pub enum TemplateSource {
    Http(HttpTemplateStore),
    Dir(DirTemplateStore),
}

impl TemplateSource {
    pub fn from_config(config: &Config) -> Self {
        if config.templates_are_remote() {
            TemplateSource::Http(HttpTemplateStore::new(&config.template_base))
        } else {
            TemplateSource::Dir(DirTemplateStore::new(&config.template_base))
        }
    }
}

impl TemplateStore for TemplateSource {
    async fn fetch(&self, template_name: &str) -> Result<Vec<u8>, StoreError> {
        match self {
            TemplateSource::Http(store) => store.fetch(template_name).await,
            TemplateSource::Dir(store) => store.fetch(template_name).await,
        }
    }
}

/// 应用主结构
pub struct App<R, T> {
    config: Config,
    generator: Generator<R, T>,
    delivery: Delivery,
}

impl App<FirebaseRecordStore, TemplateSource> {
    /// 初始化应用（实时数据库 + 配置的模板来源）
    pub fn initialize(config: Config) -> Result<Self> {
        config.validate().context("配置校验失败")?;

        let records = FirebaseRecordStore::new(&config);
        let templates = TemplateSource::from_config(&config);
        info!(
            "📁 模板来源: {} ({})",
            config.template_base,
            if config.templates_are_remote() {
                "网络"
            } else {
                "本地目录"
            }
        );

        Ok(Self::with_stores(config, records, templates))
    }
}

impl<R: RecordStore, T: TemplateStore> App<R, T> {
    /// 使用指定的记录库和模板库创建应用
    pub fn with_stores(config: Config, records: R, templates: T) -> Self {
        let flow = GenerationFlow::new(records, templates).with_options(RenderOptions {
            strict: config.strict_placeholders,
        });
        let generator = Generator::from_flow(flow).with_max_concurrency(config.max_concurrency);
        let delivery = Delivery::new(&config.output_dir);

        Self {
            config,
            generator,
            delivery,
        }
    }

    /// 生成单个文档并写入输出目录
    ///
    /// # 返回
    /// 写入的文件路径
    pub async fn generate(&self, participant_id: &str, kind: DocumentKind) -> Result<PathBuf> {
        log_startup(kind, 1);

        match self.generator.generate_one(participant_id, kind).await {
            GenerationResult::Success(document) => {
                let path = self
                    .delivery
                    .deliver_document(&document)
                    .await
                    .context("写入文档失败")?;
                info!("✅ 文档已保存至: {}", path.display());
                Ok(path)
            }
            GenerationResult::Failure { error, .. } => Err(anyhow!(
                "参与者 {} 的{}生成失败: {}",
                participant_id,
                kind,
                error
            )),
        }
    }

    /// 批量生成并打包
    ///
    /// # 参数
    /// - `participant_ids`: 指定的参与者ID，为空时从记录库中选择
    /// - `filter`: 未指定ID时按状态筛选
    /// - `kind`: 文档种类
    /// - `cancel`: 取消令牌，取消后仍会写出已完成部分的压缩包
    ///
    /// # 返回
    /// 压缩包路径
    pub async fn run_batch(
        &self,
        participant_ids: Vec<String>,
        filter: Option<StatusPeserta>,
        kind: DocumentKind,
        cancel: &CancellationToken,
    ) -> Result<PathBuf> {
        log_startup(kind, self.config.max_concurrency);

        let (ids, filter_label) = if participant_ids.is_empty() {
            info!("\n📁 正在读取参与者列表...");
            let ids = self
                .generator
                .select_ids(filter)
                .await
                .context("读取参与者列表失败")?;
            (ids, filter.map(StatusPeserta::as_str))
        } else {
            if filter.is_some() {
                warn!("⚠️ 已指定参与者ID，忽略状态筛选");
            }
            (participant_ids, None)
        };
        log_ids_loaded(ids.len(), filter_label);

        if ids.is_empty() {
            warn!("⚠️ 没有找到待处理的参与者");
        }

        let results = self.generator.generate_batch(&ids, kind, cancel).await;
        let summary = BatchSummary::from_results(&results);

        let archive = assemble_archive(&results).context("打包失败")?;
        let path = self
            .delivery
            .deliver_archive(&archive, kind, filter_label)
            .await
            .context("写入压缩包失败")?;

        print_final_stats(&summary, &path.display().to_string());
        Ok(path)
    }
}
