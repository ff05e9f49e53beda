//! # 手势识别模块
//!
//! 仅凭原始触摸坐标和时间把触摸事件序列区分为阅读导航（滑动）、
//! 查词（点词）和难度控制（长按变体），互不歧义：长按一旦触发，
//! 同一会话的点击/滑动分类即被抑制。
//!
//! # 模块组织
//!
//! - `recognizer` - 纯粹的、由调用方推动时钟的状态机
//! - `driver` - 基于tokio定时器的可挂接处理器束

pub mod driver;
pub mod recognizer;

// Re-export commonly used items for convenience
pub use driver::GestureDriver;
pub use recognizer::{GestureConfig, GestureEvent, GestureRecognizer, TouchTarget};
