//! 流程层
//!
//! 六阶段向导式流程的状态机与远程操作编排：
//! - `stage` - 阶段枚举（上传 → 预览 → 提取中 → 已提取 → 分析中 → 结果）
//! - `session` - 单一可变的会话状态
//! - `progress` - 处理期间的进度模拟定时器
//! - `analysis_flow` - 编排三个远程操作并驱动状态迁移

pub mod analysis_flow;
pub mod progress;
pub mod session;
pub mod stage;

pub use analysis_flow::{AnalysisFlow, AnalyzeOutcome, ExtractOutcome};
pub use progress::{ProgressHandle, ProgressTicker};
pub use session::Session;
pub use stage::Stage;
