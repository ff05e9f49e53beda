//! 手势状态机
//!
//! 状态流转：Idle → TouchActive → {Tap | LongPress | DoubleTapLongPress |
//! Swipe | Cancelled}。状态机本身不持有定时器：调用方（`driver`模块或
//! 测试）以毫秒时间戳推动 `poll`，长按在截止时刻到达且无移动时触发。
//!
//! 定时器取消是同步的：`on_touch_move`/`on_touch_end` 清除截止时刻后，
//! 任何迟到的 `poll` 都不再触发，杜绝快速抬指与已调度回调之间的竞争。

use std::sync::Arc;

use crate::text::words::word_at_offset;

/// 手势阈值配置
#[derive(Debug, Clone)]
pub struct GestureConfig {
    /// 长按触发时长（毫秒）
    pub long_press_ms: u64,
    /// 双击窗口：距上次抬指小于该值时，本次按下武装双击长按（毫秒）
    pub double_tap_window_ms: u64,
    /// 水平位移超过该值且占主导时判定为滑动（像素）
    pub swipe_threshold_px: f32,
    /// 点击的最大位移（像素）
    pub tap_max_distance_px: f32,
    /// 点击的最大时长（毫秒）
    pub tap_max_duration_ms: u64,
    /// 超过该抖动容差的移动会取消未触发的长按（像素）
    pub jitter_tolerance_px: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            long_press_ms: 500,
            double_tap_window_ms: 300,
            swipe_threshold_px: 50.0,
            tap_max_distance_px: 10.0,
            tap_max_duration_ms: 200,
            jitter_tolerance_px: 10.0,
        }
    }
}

/// 识别出的高层手势，由阅读器消费
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GestureEvent {
    Tap,
    LongPress,
    LongPressEnd,
    DoubleTapLongPress,
    DoubleTapLongPressEnd,
    SwipeLeft,
    SwipeRight,
    WordTap {
        word: String,
        /// 词首字符偏移（含）
        start: usize,
        /// 词尾字符偏移（不含）
        end: usize,
    },
}

/// 触摸落点对应的文本目标
///
/// `offset` 是触点在 `text` 中的字符偏移，由外部UI层换算。
#[derive(Debug, Clone)]
pub struct TouchTarget {
    pub text: Arc<str>,
    pub offset: usize,
}

/// 武装的长按种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PressKind {
    Single,
    Double,
}

/// 单次触摸的短暂会话状态
///
/// touchstart时创建，move/end时变更，end/cancel时丢弃。
#[derive(Debug)]
struct TouchSession {
    origin_x: f32,
    origin_y: f32,
    start_ms: u64,
    target: Option<TouchTarget>,
    /// 未触发长按的截止时刻；清除即取消
    deadline_ms: Option<u64>,
    press_kind: PressKind,
    /// 已触发的长按；置位后抬指不再派生点击/滑动
    fired: Option<PressKind>,
}

/// 手势识别器
#[derive(Debug)]
pub struct GestureRecognizer {
    config: GestureConfig,
    session: Option<TouchSession>,
    /// 上次抬指时刻，用于双击检测
    last_touch_end_ms: Option<u64>,
}

impl GestureRecognizer {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            session: None,
            last_touch_end_ms: None,
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// 是否存在活跃的触摸会话
    pub fn is_touch_active(&self) -> bool {
        self.session.is_some()
    }

    /// 是否仍有武装中（未触发、未取消）的长按
    pub fn has_pending_press(&self) -> bool {
        self.session
            .as_ref()
            .map(|s| s.deadline_ms.is_some())
            .unwrap_or(false)
    }

    /// 处理touchstart：记录起点并武装长按截止时刻
    ///
    /// 距上次抬指不足双击窗口时，武装的是双击长按。
    pub fn on_touch_start(&mut self, x: f32, y: f32, now_ms: u64, target: Option<TouchTarget>) {
        let press_kind = match self.last_touch_end_ms {
            Some(last_end) if now_ms.saturating_sub(last_end) < self.config.double_tap_window_ms => {
                PressKind::Double
            }
            _ => PressKind::Single,
        };

        tracing::trace!("触摸开始: ({}, {}) 武装{:?}长按", x, y, press_kind);

        self.session = Some(TouchSession {
            origin_x: x,
            origin_y: y,
            start_ms: now_ms,
            target,
            deadline_ms: Some(now_ms + self.config.long_press_ms),
            press_kind,
            fired: None,
        });
    }

    /// 推动时钟：长按截止时刻已过且未被取消时触发一次
    ///
    /// 触发是带副作用的回调而非纯状态转移：置位后会话被标记，
    /// 同一会话内再次 `poll` 不会重复触发。
    pub fn poll(&mut self, now_ms: u64) -> Option<GestureEvent> {
        let session = self.session.as_mut()?;
        let deadline = session.deadline_ms?;
        if now_ms < deadline {
            return None;
        }

        session.deadline_ms = None;
        session.fired = Some(session.press_kind);

        let event = match session.press_kind {
            PressKind::Single => GestureEvent::LongPress,
            PressKind::Double => GestureEvent::DoubleTapLongPress,
        };
        tracing::debug!("长按触发: {:?}", event);
        Some(event)
    }

    /// 处理touchmove：超过抖动容差即取消未触发的长按
    ///
    /// 防止滚动/滑动途中误触发简化。
    pub fn on_touch_move(&mut self, x: f32, y: f32) {
        let jitter = self.config.jitter_tolerance_px;
        if let Some(session) = self.session.as_mut() {
            let dx = x - session.origin_x;
            let dy = y - session.origin_y;
            if session.deadline_ms.is_some() && (dx.abs() > jitter || dy.abs() > jitter) {
                tracing::trace!("移动超过抖动容差，取消长按定时");
                session.deadline_ms = None;
            }
        }
    }

    /// 处理touchend：结算会话
    ///
    /// 长按已触发时只发出对应的 `-end` 事件；否则按位移和时长分类为
    /// 滑动或点击。点击落在词上时先发 WordTap 再发通用 Tap。
    pub fn on_touch_end(&mut self, x: f32, y: f32, now_ms: u64) -> Vec<GestureEvent> {
        let Some(session) = self.session.take() else {
            return Vec::new();
        };
        self.last_touch_end_ms = Some(now_ms);

        if let Some(fired) = session.fired {
            return vec![match fired {
                PressKind::Single => GestureEvent::LongPressEnd,
                PressKind::Double => GestureEvent::DoubleTapLongPressEnd,
            }];
        }

        let dx = x - session.origin_x;
        let dy = y - session.origin_y;
        let duration_ms = now_ms.saturating_sub(session.start_ms);

        if dx.abs() > self.config.swipe_threshold_px && dx.abs() > dy.abs() {
            let event = if dx > 0.0 {
                GestureEvent::SwipeRight
            } else {
                GestureEvent::SwipeLeft
            };
            tracing::debug!("滑动: {:?} (dx={:.0})", event, dx);
            return vec![event];
        }

        if dx.abs() < self.config.tap_max_distance_px
            && dy.abs() < self.config.tap_max_distance_px
            && duration_ms < self.config.tap_max_duration_ms
        {
            let mut events = Vec::new();
            if let Some(target) = &session.target {
                if let Some(hit) = word_at_offset(&target.text, target.offset) {
                    tracing::debug!("点词: {}", hit.word);
                    events.push(GestureEvent::WordTap {
                        word: hit.word,
                        start: hit.start,
                        end: hit.end,
                    });
                }
            }
            events.push(GestureEvent::Tap);
            return events;
        }

        // 既非滑动也非点击的含糊触摸不产生手势
        Vec::new()
    }

    /// 处理touchcancel：清除定时并丢弃会话
    ///
    /// 长按已触发时补发对应的 `-end` 事件。
    pub fn on_touch_cancel(&mut self) -> Option<GestureEvent> {
        let session = self.session.take()?;
        match session.fired {
            Some(PressKind::Single) => Some(GestureEvent::LongPressEnd),
            Some(PressKind::Double) => Some(GestureEvent::DoubleTapLongPressEnd),
            None => None,
        }
    }
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}
