//! 主题分类模块
//!
//! 将消息匹配到固定的知识库主题键：先做直接子串包含检查，
//! 无命中时回退到少量复合条件启发式。

/// 可直接匹配的主题键，按声明顺序检查
const TOPIC_KEYS: &[&str] = &[
    "anxiety",
    "depression",
    "stress",
    "therapy",
    "meditation",
    "trauma",
    "self-care",
    "mindfulness",
    "boundaries",
    "grief",
    "panic attack",
    "ptsd",
    "addiction",
    "insomnia",
];

/// 对消息做主题分类（不区分大小写）
///
/// 返回命中的主题键；直接匹配优先，其次为复合条件启发式。
pub fn classify_topic(message: &str) -> Option<&'static str> {
    let lower = message.to_lowercase();

    if let Some(key) = TOPIC_KEYS.iter().find(|key| lower.contains(*key)) {
        return Some(key);
    }

    // 复合条件启发式：无直接关键词时的近义推断
    if lower.contains("worry") && lower.contains("too much") {
        return Some("anxiety");
    }
    if lower.contains("can't sleep") || lower.contains("trouble sleeping") {
        return Some("insomnia");
    }
    if lower.contains("lost someone") || lower.contains("passed away") {
        return Some("grief");
    }
    if lower.contains("flashback") || lower.contains("nightmares about") {
        return Some("ptsd");
    }

    None
}
