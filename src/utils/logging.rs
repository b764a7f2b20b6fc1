/// 日志工具模块
///
/// 提供日志格式化和输出的辅助函数
use tracing::info;

use crate::config::Config;

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 文献综述论文筛选");
    info!("📁 论文目录: {}", config.papers_dir);
    info!("🤖 模型: {}", config.llm_model_name);
    info!(
        "📄 每篇最多读取 {} 页，节选 {} 字符",
        config.max_pages, config.excerpt_chars
    );
    info!("{}", "=".repeat(60));
}

/// 记录论文加载信息
///
/// # 参数
/// - `total`: 论文总数
/// - `call_delay_ms`: 每次调用后的间隔
pub fn log_papers_loaded(total: usize, call_delay_ms: u64) {
    info!("✓ 找到 {} 篇待评审的论文", total);
    info!("📋 将逐篇顺序评审，每次调用后间隔 {} 毫秒\n", call_delay_ms);
}

/// 打印最终统计信息
///
/// # 参数
/// - `judged`: 评审成功数量
/// - `failed`: 评审失败数量
/// - `included`: 满足纳入标准的数量
/// - `total`: 总数
/// - `output_dir`: 报告目录
pub fn print_final_stats(judged: usize, failed: usize, included: usize, total: usize, output_dir: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 评审成功: {}/{}", judged, total);
    info!("❌ 评审失败: {}", failed);
    info!("📌 满足纳入标准: {}", included);
    info!("{}", "=".repeat(60));
    info!("\n报告已保存至: {}", output_dir);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
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
