//! 危机检测模块
//!
//! 对用户消息做三级危机语句检测：直接表述、间接意念、语境性绝望。
//! 纯函数、无副作用；命中即在调用方短路其它所有分类。
//!
//! 已知限制：检测基于裸子串包含，无否定/引述/第三人称判别，
//! 存在误报与漏报（例如转述或否定句也会触发）。该行为按产品
//! 原始语义保留，短语表不得随意增删。

use tracing::warn;

/// 第一级：直接表述
const DIRECT_PHRASES: &[&str] = &[
    "kill myself",
    "suicide",
    "end my life",
    "don't want to live",
    "want to die",
    "better off dead",
];

/// 第二级：间接意念
const INDIRECT_PHRASES: &[&str] = &[
    "no point in living",
    "can't go on",
    "tired of life",
    "not worth living",
    "disappear forever",
    "everyone would be better without me",
];

/// 第三级语境词：绝望表述
const HOPELESS_CUES: &[&str] = &["hopeless", "no hope"];

/// 第三级语境词：不可持续表述
const CONTEXT_CUES: &[&str] = &["future", "anymore", "can't continue"];

/// 检测消息是否包含危机语句（不区分大小写）
///
/// 返回 true 时，调用方必须以危机回复短路所有后续分类。
pub fn is_emergency(message: &str) -> bool {
    let lower = message.to_lowercase();

    for phrase in DIRECT_PHRASES {
        if lower.contains(phrase) {
            warn!("Emergency detected: direct phrase '{}'", phrase);
            return true;
        }
    }

    for phrase in INDIRECT_PHRASES {
        if lower.contains(phrase) {
            warn!("Emergency detected: indirect phrase '{}'", phrase);
            return true;
        }
    }

    // 语境性绝望：绝望词与不可持续词同时出现
    let hopeless = HOPELESS_CUES.iter().any(|cue| lower.contains(cue));
    let contextual = CONTEXT_CUES.iter().any(|cue| lower.contains(cue));
    if hopeless && contextual {
        warn!("Emergency detected: contextual hopelessness");
        return true;
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("I want to kill myself")]
    #[case("I've been thinking about suicide")]
    #[case("i just want to END MY LIFE")]
    #[case("I don't want to live")]
    #[case("sometimes I want to die")]
    #[case("they'd be better off dead without me around")]
    fn test_direct_phrases(#[case] message: &str) {
        assert!(is_emergency(message));
    }

    #[rstest]
    #[case("there's no point in living")]
    #[case("I can't go on like this")]
    #[case("I'm so tired of life")]
    #[case("my life is not worth living")]
    #[case("I wish I could disappear forever")]
    #[case("everyone would be better without me")]
    fn test_indirect_phrases(#[case] message: &str) {
        assert!(is_emergency(message));
    }

    #[rstest]
    #[case("everything feels hopeless and I see no future")]
    #[case("no hope left, I can't continue")]
    #[case("it's hopeless, I can't do this anymore")]
    fn test_contextual_hopelessness(#[case] message: &str) {
        assert!(is_emergency(message));
    }

    #[rstest]
    // 单独的绝望词不触发第三级
    #[case("I feel hopeless about this exam")]
    #[case("there is no hope for my team winning")]
    #[case("I had a rough day at work")]
    #[case("tell me about meditation")]
    #[case("")]
    fn test_non_emergency(#[case] message: &str) {
        assert!(!is_emergency(message));
    }

    #[test]
    fn test_known_false_positive_preserved() {
        // 裸子串匹配的已知误报行为，按原始语义保留
        assert!(is_emergency(
            "not afraid of speaking about suicide in a documentary"
        ));
    }
}
