//! 阅读会话集成测试
//!
//! 从触摸事件到翻译结果的完整链路：识别器产出手势，会话把手势
//! 映射成翻页、整页翻译、临时简化和查词。

use std::sync::Arc;

use lingreader::cefr::CefrLevel;
use lingreader::gesture::{GestureConfig, GestureEvent, GestureRecognizer, TouchTarget};
use lingreader::reader::ReaderAction;
use lingreader::text::WORDS_PER_PAGE;
use lingreader::translation::provider::ProviderKind;

mod common;

use common::{open_session, orchestrator_with, StaticProvider};

fn long_text(words: usize) -> String {
    let paragraph = vec!["wort"; 50].join(" ");
    let count = words.div_ceil(50);
    vec![paragraph; count].join("\n\n")
}

/// 长文本打开时被分页，每页不超过词数预算
#[tokio::test]
async fn test_blob_is_paginated_on_open() {
    let orch = orchestrator_with(vec![StaticProvider::new(ProviderKind::Ai, "ok")]);
    let mut session = open_session(orch, &long_text(700), CefrLevel::B1);

    assert!(session.page_count() >= 3);
    for page in 0..session.page_count() {
        session.go_to_page(page).unwrap();
        assert!(lingreader::text::count_words(session.original_page_text()) <= WORDS_PER_PAGE);
    }
}

/// 识别器的滑动手势驱动翻页，边界处不动作
#[tokio::test]
async fn test_swipes_drive_page_navigation() {
    let orch = orchestrator_with(vec![StaticProvider::new(ProviderKind::Ai, "ok")]);
    let mut session = open_session(orch, &long_text(700), CefrLevel::B1);

    let mut recognizer = GestureRecognizer::new(GestureConfig::default());

    // 向左滑动 → 下一页
    recognizer.on_touch_start(300.0, 200.0, 0, None);
    recognizer.on_touch_move(180.0, 205.0);
    let events = recognizer.on_touch_end(180.0, 205.0, 150);
    assert_eq!(events, vec![GestureEvent::SwipeLeft]);

    let action = session.handle_gesture(events[0].clone()).await;
    assert_eq!(action, ReaderAction::PageChanged(1));

    // 回到首页后再向右滑动无效
    assert!(session.prev_page());
    let action = session.handle_gesture(GestureEvent::SwipeRight).await;
    assert_eq!(action, ReaderAction::None);
    assert_eq!(session.current_page(), 0);
}

/// 长按显示整页翻译，抬指收起
#[tokio::test]
async fn test_long_press_shows_page_translation() {
    let orch = orchestrator_with(vec![StaticProvider::new(ProviderKind::Ai, "translated page")]);
    let mut session = open_session(orch, "Hallo Welt", CefrLevel::B1);

    let mut recognizer = GestureRecognizer::new(GestureConfig::default());
    recognizer.on_touch_start(100.0, 100.0, 0, None);
    let fired = recognizer.poll(500).expect("long press should fire");

    match session.handle_gesture(fired).await {
        ReaderAction::TranslationShown(translated) => {
            assert_eq!(translated.text, "translated page");
            assert_eq!(translated.provider, ProviderKind::Ai);
        }
        other => panic!("unexpected action: {:?}", other),
    }

    let events = recognizer.on_touch_end(100.0, 100.0, 700);
    assert_eq!(
        session.handle_gesture(events[0].clone()).await,
        ReaderAction::TranslationHidden
    );
}

/// 双击长按临时显示低一级的简化文本，不改动会话等级
#[tokio::test]
async fn test_double_tap_hold_peeks_simpler_level() {
    let orch = orchestrator_with(vec![StaticProvider::new(ProviderKind::Ai, "einfacher Text")]);
    let mut session = open_session(orch, "Komplizierter Text", CefrLevel::B2);

    let action = session.handle_gesture(GestureEvent::DoubleTapLongPress).await;
    match action {
        ReaderAction::SimplifiedShown(simplified) => {
            assert_eq!(simplified.text, "einfacher Text");
        }
        other => panic!("unexpected action: {:?}", other),
    }
    // 临时查看不改变会话等级
    assert_eq!(session.current_level(), CefrLevel::B2);

    assert_eq!(
        session.handle_gesture(GestureEvent::DoubleTapLongPressEnd).await,
        ReaderAction::SimplifiedHidden
    );
}

/// 点词手势触发带句子上下文的查词
#[tokio::test]
async fn test_word_tap_looks_up_word() {
    let orch = orchestrator_with(vec![StaticProvider::new(ProviderKind::Ai, "cat - die Katze")]);
    let mut session = open_session(orch, "Die Katze schläft. Der Hund bellt.", CefrLevel::B1);

    let mut recognizer = GestureRecognizer::new(GestureConfig::default());
    let target = TouchTarget {
        text: Arc::from(session.original_page_text()),
        offset: 5,
    };
    recognizer.on_touch_start(100.0, 100.0, 0, Some(target));
    let events = recognizer.on_touch_end(101.0, 100.0, 120);

    assert!(matches!(events[0], GestureEvent::WordTap { ref word, .. } if word == "Katze"));

    match session.handle_gesture(events[0].clone()).await {
        ReaderAction::WordLookup(translated) => {
            assert_eq!(translated.text, "cat - die Katze");
        }
        other => panic!("unexpected action: {:?}", other),
    }
}

/// 永久降级路径：simplify_current改变等级并影响显示文本
#[tokio::test]
async fn test_persistent_simplification_changes_display() {
    let orch = orchestrator_with(vec![StaticProvider::new(ProviderKind::Ai, "einfach")]);
    let mut session = open_session(orch, "Kompliziert", CefrLevel::A2);

    assert!(session.simplify_current(1).await.is_some());
    assert_eq!(session.current_level(), CefrLevel::A1);
    assert_eq!(session.display_text(), "einfach");

    // 最低等级不能再降
    assert!(session.simplify_current(1).await.is_none());

    session.restore_level();
    assert_eq!(session.display_text(), "Kompliziert");
}

/// 可选等级上限是文档的原始等级
#[tokio::test]
async fn test_offered_levels_follow_document_level() {
    let orch = orchestrator_with(vec![StaticProvider::new(ProviderKind::Ai, "ok")]);
    let session = open_session(orch, "Text", CefrLevel::A2);
    assert_eq!(
        session.offered_levels(),
        vec![CefrLevel::A1, CefrLevel::A2]
    );
}
