//! 进度模拟定时器
//!
//! 后端不提供真实进度，这里用一个后台任务模拟：处理期间每个固定间隔
//! 随机增加 1-10%，封顶 90%，真实操作结束时打到 100%，处理标志清除后归零。
//! 每次操作启动新任务并撤掉上一个，跨周期不泄漏任务。

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::task::JoinHandle;

/// 进度上限（真实操作未结束前不会超过）
const PROGRESS_CAP: u8 = 90;

/// 进度只读句柄，供展示层轮询
#[derive(Debug, Clone)]
pub struct ProgressHandle {
    percent: Arc<AtomicU8>,
}

impl ProgressHandle {
    /// 当前进度百分比 0-100
    pub fn percent(&self) -> u8 {
        self.percent.load(Ordering::Relaxed)
    }
}

/// 进度模拟定时器
#[derive(Debug)]
pub struct ProgressTicker {
    percent: Arc<AtomicU8>,
    tick: Duration,
    task: Option<JoinHandle<()>>,
}

impl ProgressTicker {
    pub fn new(tick_ms: u64) -> Self {
        Self {
            percent: Arc::new(AtomicU8::new(0)),
            tick: Duration::from_millis(tick_ms),
            task: None,
        }
    }

    /// 获取只读句柄
    pub fn handle(&self) -> ProgressHandle {
        ProgressHandle {
            percent: Arc::clone(&self.percent),
        }
    }

    /// 启动新一轮进度模拟，撤掉上一轮的任务
    pub fn start(&mut self) {
        self.teardown();
        self.percent.store(0, Ordering::Relaxed);

        let percent = Arc::clone(&self.percent);
        let tick = self.tick;
        self.task = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick);
            // 第一个 tick 立即返回，跳过它让进度从 0 开始爬升
            interval.tick().await;
            loop {
                interval.tick().await;
                let current = percent.load(Ordering::Relaxed);
                if current >= PROGRESS_CAP {
                    continue;
                }
                let step = rand::thread_rng().gen_range(1..=10);
                percent.store(
                    (current + step).min(PROGRESS_CAP),
                    Ordering::Relaxed,
                );
            }
        }));
    }

    /// 真实操作已结束：停掉模拟任务并把进度打满
    pub fn complete(&mut self) {
        self.teardown();
        self.percent.store(100, Ordering::Relaxed);
    }

    /// 处理标志清除后归零
    pub fn idle(&mut self) {
        self.teardown();
        self.percent.store(0, Ordering::Relaxed);
    }

    fn teardown(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for ProgressTicker {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn progress_climbs_but_stays_capped() {
        let mut ticker = ProgressTicker::new(5);
        let handle = ticker.handle();
        ticker.start();

        tokio::time::sleep(Duration::from_millis(120)).await;
        let seen = handle.percent();
        assert!(seen > 0, "进度应该已经开始爬升");
        assert!(seen <= PROGRESS_CAP, "真实操作结束前不应超过 {}", PROGRESS_CAP);

        // 给足时间，确认封顶在 90 不会到 100
        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(handle.percent() <= PROGRESS_CAP);

        ticker.complete();
        assert_eq!(handle.percent(), 100);

        ticker.idle();
        assert_eq!(handle.percent(), 0);
    }

    #[tokio::test]
    async fn restart_replaces_previous_task() {
        let mut ticker = ProgressTicker::new(5);
        let handle = ticker.handle();

        ticker.start();
        tokio::time::sleep(Duration::from_millis(60)).await;
        ticker.start();
        // 重新启动后进度从 0 重新爬升
        assert!(handle.percent() <= 10);

        ticker.idle();
        tokio::time::sleep(Duration::from_millis(60)).await;
        // 任务已撤掉，进度不再变化
        assert_eq!(handle.percent(), 0);
    }
}
