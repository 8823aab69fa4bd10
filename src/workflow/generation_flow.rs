//! 文档生成流程 - 流程层
//!
//! 核心职责：定义"一个参与者"的完整生成流程
//!
//! 流程顺序：
//! 1. 读取参与者记录
//! 2. 校验培训套餐并解析模板
//! 3. 字段映射
//! 4. 获取模板（本批内按模板名缓存）
//! 5. 渲染并生成文件名

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::GenerationError;
use crate::infrastructure::{RecordStore, TemplateStore};
use crate::models::{GeneratedDocument, Paket, TemplateDescriptor};
use crate::services::{map_participant_to_fields, render_template, RenderOptions};
use crate::workflow::generation_ctx::GenerationCtx;

/// 文件名中不允许出现的字符
const FORBIDDEN_FILE_CHARS: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// 单次运行内的模板缓存
///
/// 一次批处理期间模板不会变化，同一模板只需下载一次。获取失败不缓存。
#[derive(Default)]
pub struct TemplateCache {
    entries: Mutex<HashMap<String, Arc<Vec<u8>>>>,
}

impl TemplateCache {
    pub fn new() -> Self {
        Self::default()
    }

    async fn get(&self, name: &str) -> Option<Arc<Vec<u8>>> {
        self.entries.lock().await.get(name).cloned()
    }

    async fn insert(&self, name: &str, bytes: Arc<Vec<u8>>) {
        self.entries.lock().await.insert(name.to_string(), bytes);
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }
}

/// 文档生成流程
///
/// - 编排单个参与者的完整生成流程
/// - 不关心批次、并发和取消
/// - 所有失败都以 [`GenerationError`] 返回
pub struct GenerationFlow<R, T> {
    records: R,
    templates: T,
    options: RenderOptions,
    print_date: Option<NaiveDate>,
}

impl<R: RecordStore, T: TemplateStore> GenerationFlow<R, T> {
    /// 创建新的生成流程
    pub fn new(records: R, templates: T) -> Self {
        Self {
            records,
            templates,
            options: RenderOptions::default(),
            print_date: None,
        }
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// 固定打印日期（默认为当天）
    pub fn with_print_date(mut self, date: NaiveDate) -> Self {
        self.print_date = Some(date);
        self
    }

    pub fn records(&self) -> &R {
        &self.records
    }

    pub async fn run(
        &self,
        ctx: &GenerationCtx,
        cache: &TemplateCache,
    ) -> Result<GeneratedDocument, GenerationError> {
        let id = ctx.participant_id.as_str();

        // ========== 步骤 1: 读取记录 ==========
        let participant = self
            .records
            .get_by_id(id)
            .await
            .map_err(|e| GenerationError::Unknown(e.to_string()))?
            .ok_or_else(|| GenerationError::NotFound { id: id.to_string() })?;

        // ========== 步骤 2: 解析模板 ==========
        let paket = Paket::from_slug(&participant.paket_pelatihan).ok_or_else(|| {
            GenerationError::InvalidPackage {
                id: id.to_string(),
                paket: participant.paket_pelatihan.clone(),
            }
        })?;
        let template = TemplateDescriptor::resolve(ctx.kind, paket);

        info!(
            "{} 姓名: {} | 套餐: {}",
            ctx,
            participant.display_name(),
            paket
        );

        // ========== 步骤 3: 字段映射 ==========
        let print_date = self
            .print_date
            .unwrap_or_else(|| chrono::Local::now().date_naive());
        let fields = map_participant_to_fields(&participant, print_date);

        // ========== 步骤 4: 获取模板 ==========
        let template_bytes = self.fetch_template(&template, cache).await?;

        // ========== 步骤 5: 渲染 ==========
        let bytes = render_template(&template_bytes, &fields, &self.options).map_err(|source| {
            GenerationError::TemplateRender {
                template: template.name.clone(),
                source,
            }
        })?;

        let file_name = document_file_name(participant.display_name(), ctx, &template);
        debug!("{} 生成完成: {} ({} 字节)", ctx, file_name, bytes.len());

        Ok(GeneratedDocument {
            participant_id: id.to_string(),
            file_name,
            bytes,
        })
    }

    async fn fetch_template(
        &self,
        template: &TemplateDescriptor,
        cache: &TemplateCache,
    ) -> Result<Arc<Vec<u8>>, GenerationError> {
        if let Some(bytes) = cache.get(&template.name).await {
            debug!("模板命中缓存: {}", template);
            return Ok(bytes);
        }

        let bytes = self
            .templates
            .fetch(&template.name)
            .await
            .map(Arc::new)
            .map_err(|e| GenerationError::TemplateFetch {
                template: template.name.clone(),
                reason: e.to_string(),
            })?;

        cache.insert(&template.name, bytes.clone()).await;
        Ok(bytes)
    }
}

/// `<姓名>_<种类>_<模板名>.docx`
fn document_file_name(name: &str, ctx: &GenerationCtx, template: &TemplateDescriptor) -> String {
    let mut safe: String = name
        .chars()
        .map(|c| {
            if c.is_control() || FORBIDDEN_FILE_CHARS.contains(&c) {
                '_'
            } else {
                c
            }
        })
        .collect::<String>()
        .trim()
        .to_string();
    if safe.is_empty() || safe.chars().all(|c| c == '.') {
        safe = ctx.participant_id.clone();
    }

    format!("{}_{}_{}.docx", safe, ctx.kind.label(), template.name)
}
