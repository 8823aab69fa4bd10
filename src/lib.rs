//! # KRS Generator
//!
//! 培训机构参与者 KRS（Kartu Rencana Studi）/ 合同文档批量生成工具
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 存储抽象，只暴露读取能力
//! - `RecordStore` - 参与者记录库（实时数据库 / 内存）
//! - `TemplateStore` - 模板库（HTTP / 本地目录 / 内存）
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个文档
//! - `field_mapper` - 参与者记录 → 占位符字段（印尼语日期）
//! - `template_renderer` - 填充 `.docx` 模板
//! - `archive` / `delivery` - 打包与写出
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一个参与者"的完整生成流程
//! - `GenerationCtx` - 上下文封装（参与者ID + 序号 + 文档种类）
//! - `GenerationFlow` - 流程编排（读取 → 校验套餐 → 映射 → 取模板 → 渲染）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 单个 / 批量生成，控制并发与取消
//!
//! ## 模块结构

pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::{App, TemplateSource};
pub use config::Config;
pub use error::{AppError, AppResult, GenerationError, RenderError};
pub use infrastructure::{
    DirTemplateStore, MemoryRecordStore, MemoryTemplateStore, RecordStore, TemplateStore,
};
pub use models::{DocumentKind, GenerationResult, Paket, Participant, StatusPeserta};
pub use orchestrator::{BatchSummary, Generator};
pub use services::{assemble_archive, render_template, Delivery, RenderOptions};
pub use workflow::{GenerationCtx, GenerationFlow};
