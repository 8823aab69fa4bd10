/// 日志工具模块
///
/// 提供日志格式化和输出的辅助函数
use tracing::{info, warn};

use crate::models::DocumentKind;
use crate::orchestrator::BatchSummary;

/// 失败原因在汇总中显示的最大长度
const REASON_DISPLAY_LEN: usize = 120;

/// 记录程序启动信息
///
/// # 参数
/// - `kind`: 文档种类
/// - `max_concurrency`: 最大并发数
pub fn log_startup(kind: DocumentKind, max_concurrency: usize) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - {} 文档生成", kind);
    info!("📊 最大并发数: {}", max_concurrency);
    info!("{}", "=".repeat(60));
}

/// 记录参与者选择结果
///
/// # 参数
/// - `total`: 参与者总数
/// - `filter_label`: 状态筛选（None 表示全部）
pub fn log_ids_loaded(total: usize, filter_label: Option<&str>) {
    match filter_label {
        Some(label) => info!("✓ 找到 {} 个状态为 '{}' 的参与者", total, label),
        None => info!("✓ 找到 {} 个参与者", total),
    }
}

/// 打印最终统计信息
///
/// # 参数
/// - `summary`: 批处理统计
/// - `output_path`: 压缩包保存位置
pub fn print_final_stats(summary: &BatchSummary, output_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", summary.success, summary.total);
    info!("❌ 失败: {}", summary.failed());
    for (id, reason) in &summary.failures {
        warn!("   - {}: {}", id, truncate_text(reason, REASON_DISPLAY_LEN));
    }
    info!("{}", "=".repeat(60));
    info!("\n压缩包已保存至: {}", output_path);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度（按字符计）
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
