//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量生成和流程调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量文档生成器
//! - 单个生成 / 批量生成
//! - 控制并发数量（默认严格顺序）
//! - 响应取消令牌
//! - 按状态选择参与者
//! - 汇总统计信息
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<参与者ID>)
//!     ↓
//! workflow::GenerationFlow (处理单个参与者)
//!     ↓
//! services (能力层：字段映射 / 渲染 / 打包 / 交付)
//!     ↓
//! infrastructure (基础设施：RecordStore / TemplateStore)
//! ```
//!
//! ## 设计原则
//!
//! 1. **失败隔离**：单个参与者的失败只体现在它自己的结果里
//! 2. **向下依赖**：编排层 → workflow → services → infrastructure
//! 3. **无业务逻辑**：只做调度和统计，不做具体业务判断

pub mod batch_processor;

// 重新导出主要类型
pub use batch_processor::{BatchSummary, Generator};
