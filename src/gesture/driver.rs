//! 手势驱动器
//!
//! 把纯状态机接到tokio定时器上，形成可挂接的触摸处理器束
//! （touch-start/move/end/cancel），识别出的手势通过无界通道发出。
//!
//! 长按定时是一个被spawn的任务，其 `AbortHandle` 存放在驱动器里；
//! move/end/cancel 先在识别器锁内清除截止时刻、再中止任务，因此
//! 已调度但尚未执行的回调必然在 `poll` 处扑空，不会迟到触发。

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::Instant;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::AbortHandle;

use super::recognizer::{GestureConfig, GestureEvent, GestureRecognizer, TouchTarget};

/// 基于tokio的手势驱动器
pub struct GestureDriver {
    recognizer: Arc<Mutex<GestureRecognizer>>,
    timer: Mutex<Option<AbortHandle>>,
    events_tx: UnboundedSender<GestureEvent>,
    epoch: Instant,
}

impl GestureDriver {
    /// 创建驱动器和手势事件接收端
    pub fn new(config: GestureConfig) -> (Self, UnboundedReceiver<GestureEvent>) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let driver = Self {
            recognizer: Arc::new(Mutex::new(GestureRecognizer::new(config))),
            timer: Mutex::new(None),
            events_tx,
            epoch: Instant::now(),
        };
        (driver, events_rx)
    }

    fn now_ms(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }

    /// touch-start处理器
    pub fn touch_start(&self, x: f32, y: f32, target: Option<TouchTarget>) {
        let now = self.now_ms();
        let long_press_ms = {
            let mut recognizer = self.recognizer.lock().unwrap();
            recognizer.on_touch_start(x, y, now, target);
            recognizer.config().long_press_ms
        };

        self.clear_timer();

        // 长按定时任务：睡满时长后在识别器锁内结算
        let recognizer = Arc::clone(&self.recognizer);
        let events_tx = self.events_tx.clone();
        let epoch = self.epoch;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(long_press_ms)).await;
            let now = epoch.elapsed().as_millis() as u64;
            let fired = recognizer.lock().unwrap().poll(now);
            if let Some(event) = fired {
                let _ = events_tx.send(event);
            }
        });
        *self.timer.lock().unwrap() = Some(handle.abort_handle());
    }

    /// touch-move处理器
    pub fn touch_move(&self, x: f32, y: f32) {
        let mut recognizer = self.recognizer.lock().unwrap();
        recognizer.on_touch_move(x, y);
        // 截止时刻还在就让任务继续睡；已取消则中止任务省一次空转
        let pending = recognizer.has_pending_press();
        drop(recognizer);
        if !pending {
            self.clear_timer();
        }
    }

    /// touch-end处理器
    pub fn touch_end(&self, x: f32, y: f32) {
        let now = self.now_ms();
        let events = self.recognizer.lock().unwrap().on_touch_end(x, y, now);
        self.clear_timer();
        for event in events {
            let _ = self.events_tx.send(event);
        }
    }

    /// touch-cancel处理器
    pub fn touch_cancel(&self) {
        let ended = self.recognizer.lock().unwrap().on_touch_cancel();
        self.clear_timer();
        if let Some(event) = ended {
            let _ = self.events_tx.send(event);
        }
    }

    fn clear_timer(&self) {
        if let Some(handle) = self.timer.lock().unwrap().take() {
            handle.abort();
        }
    }
}
