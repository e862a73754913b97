//! Bilingual overlay strings.

use spectra_core::{Action, Category, Language, PacingMode};

/// Picks the string for `language`.
#[must_use]
pub const fn tr(language: Language, zh: &'static str, en: &'static str) -> &'static str {
    match language {
        Language::Zh => zh,
        Language::En => en,
    }
}

/// `On` / `Off`.
#[must_use]
pub const fn on_off(language: Language, on: bool) -> &'static str {
    match (language, on) {
        (Language::Zh, true) => "开",
        (Language::Zh, false) => "关",
        (Language::En, true) => "On",
        (Language::En, false) => "Off",
    }
}

/// Display name of a pattern group.
#[must_use]
pub const fn group_name(language: Language, category: Category) -> &'static str {
    match category {
        Category::Static => tr(language, "静态图样", "Static"),
        Category::Dynamic => tr(language, "动态高熵", "High-Entropy"),
        Category::Auxiliary => tr(language, "辅助诊断", "Auxiliary"),
    }
}

/// Name of a pacing strategy as shown in the "Mode" line.
#[must_use]
pub const fn mode_name(language: Language, mode: PacingMode) -> &'static str {
    match mode {
        PacingMode::Fixed => tr(language, "固定帧率", "Fixed FPS"),
        PacingMode::Jitter => tr(language, "抖动模式", "Jitter FPS"),
        PacingMode::Oscillation => tr(language, "震荡模式", "Oscillation FPS"),
    }
}

/// The "Pacing" line: vsync wins over the configured strategy.
#[must_use]
pub const fn pacing_line(language: Language, mode: PacingMode, vsync: bool) -> &'static str {
    if vsync {
        tr(language, "帧率策略: 垂直同步", "Pacing: VSync")
    } else if mode.is_range() {
        tr(language, "帧率策略: 动态范围", "Pacing: Range")
    } else {
        tr(language, "帧率策略: 固定", "Pacing: Fixed")
    }
}

/// Description column of the controls panel.
///
/// Paired actions share one row, so the first action of each pair carries
/// the combined description.
#[must_use]
pub const fn action_description(language: Language, action: Action) -> &'static str {
    match action {
        Action::Exit => tr(language, "退出程序", "Exit"),
        Action::TogglePause => tr(language, "暂停/继续", "Pause/Resume"),
        Action::CycleCategory => tr(language, "切换模式组", "Toggle group"),
        Action::PreviousPattern | Action::NextPattern => {
            tr(language, "上一/下一图样", "Prev/Next pattern")
        }
        Action::ToggleVsync => tr(language, "垂直同步 开/关", "VSync On/Off"),
        Action::ToggleMinimalOverlay => tr(language, "精简显示 开/关", "Minimal overlay On/Off"),
        Action::TogglePacing => tr(language, "帧率策略 固定/动态范围", "Pacing Fixed/Range"),
        Action::ToggleRangeKind => tr(language, "动态策略 抖动/震荡", "Range Jitter/Oscillation"),
        Action::ToggleExtreme => tr(language, "一键极限模式", "Extreme mode toggle"),
        Action::DecreaseMinFps | Action::IncreaseMinFps => {
            tr(language, "动态最小帧 -/+", "Range min -/+")
        }
        Action::DecreaseMaxFps | Action::IncreaseMaxFps => {
            tr(language, "动态最大帧 -/+", "Range max -/+")
        }
        Action::ToggleLanguage => "Toggle language (ZH/EN)",
    }
}
