//! 情绪状态分类模块
//!
//! 按固定优先级顺序匹配情绪词组：悲伤 → 抑郁 → 焦虑 → 不堪重负 →
//! 愤怒 → 快乐 → 困惑 → 绝望 → 麻木 → 羞耻。首个命中的词组获胜，
//! 每次调用至多返回一个标签。
//!
//! 声明顺序是有意设计的平局规则：消息同时命中多个词组时，
//! 先声明的词组获胜。该顺序必须原样保留以保证行为可复现。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 情绪状态标签（闭合集合，仅从消息文本瞬态推导，不持久化）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmotionalState {
    Sad,
    Depressed,
    Anxious,
    Overwhelmed,
    Angry,
    Happy,
    Confused,
    Hopeless,
    Numb,
    Ashamed,
}

impl fmt::Display for EmotionalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl EmotionalState {
    /// 人类可读标签
    pub fn label(&self) -> &'static str {
        match self {
            EmotionalState::Sad => "feeling sad",
            EmotionalState::Depressed => "feeling depressed",
            EmotionalState::Anxious => "feeling anxious",
            EmotionalState::Overwhelmed => "feeling overwhelmed",
            EmotionalState::Angry => "feeling angry",
            EmotionalState::Happy => "feeling happy",
            EmotionalState::Confused => "feeling confused",
            EmotionalState::Hopeless => "feeling hopeless",
            EmotionalState::Numb => "feeling numb",
            EmotionalState::Ashamed => "feeling shame",
        }
    }

    /// 对应的知识库主题键（模板缺失时的回退查找键）
    pub fn topic_key(&self) -> &'static str {
        match self {
            EmotionalState::Sad => "depression",
            EmotionalState::Depressed => "depression",
            EmotionalState::Anxious => "anxiety",
            EmotionalState::Overwhelmed => "stress",
            EmotionalState::Angry => "stress",
            EmotionalState::Happy => "self-care",
            EmotionalState::Confused => "mindfulness",
            EmotionalState::Hopeless => "depression",
            EmotionalState::Numb => "trauma",
            EmotionalState::Ashamed => "self-care",
        }
    }
}

/// 情绪线索：子串命中，可带否定排除
struct Cue {
    text: &'static str,
    /// 消息中出现任一排除短语时，该线索不命中
    unless: &'static [&'static str],
}

const fn cue(text: &'static str) -> Cue {
    Cue { text, unless: &[] }
}

const fn cue_unless(text: &'static str, unless: &'static [&'static str]) -> Cue {
    Cue { text, unless }
}

/// 情绪词组（与一个标签一一对应）
struct EmotionGroup {
    state: EmotionalState,
    cues: &'static [Cue],
}

/// 词组表，按固定优先级声明
static GROUPS: &[EmotionGroup] = &[
    EmotionGroup {
        state: EmotionalState::Sad,
        cues: &[
            cue("sad"),
            cue("unhappy"),
            cue("feeling down"),
            cue("feel down"),
            cue("tearful"),
            cue("crying"),
            cue("heartbroken"),
            cue("miserable"),
        ],
    },
    EmotionGroup {
        state: EmotionalState::Depressed,
        cues: &[
            cue("depressed"),
            cue_unless("empty", &["empty stomach"]),
            cue("worthless"),
            cue("no energy"),
            cue("can't get out of bed"),
        ],
    },
    EmotionGroup {
        state: EmotionalState::Anxious,
        cues: &[
            cue("anxious"),
            cue("nervous"),
            cue("worried"),
            cue("panicking"),
            cue_unless("afraid", &["not afraid"]),
            cue("scared"),
            cue("on edge"),
            cue("freaking out"),
        ],
    },
    EmotionGroup {
        state: EmotionalState::Overwhelmed,
        cues: &[
            cue("overwhelmed"),
            cue("too much to handle"),
            cue("can't cope"),
            cue("drowning in"),
            cue("overloaded"),
        ],
    },
    EmotionGroup {
        state: EmotionalState::Angry,
        cues: &[
            cue("angry"),
            cue("furious"),
            cue("mad at"),
            cue("rage"),
            cue("irritated"),
            cue("frustrated"),
            cue("fed up"),
        ],
    },
    EmotionGroup {
        state: EmotionalState::Happy,
        cues: &[
            cue("happy"),
            cue("joyful"),
            cue("excited"),
            cue("delighted"),
            cue("feeling great"),
            cue("feeling good"),
        ],
    },
    EmotionGroup {
        state: EmotionalState::Confused,
        cues: &[
            cue("confused"),
            cue("mixed up"),
            cue("don't know what to do"),
            cue("can't make sense"),
            cue("feel lost"),
            cue("unsure"),
        ],
    },
    EmotionGroup {
        state: EmotionalState::Hopeless,
        cues: &[
            cue("hopeless"),
            cue("no hope"),
            cue("pointless"),
            cue("what's the point"),
            cue("no way out"),
        ],
    },
    EmotionGroup {
        state: EmotionalState::Numb,
        cues: &[
            cue("numb"),
            cue("feel nothing"),
            cue("can't feel anything"),
            cue("emotionless"),
        ],
    },
    EmotionGroup {
        state: EmotionalState::Ashamed,
        cues: &[
            cue("ashamed"),
            cue("shame"),
            cue("embarrassed"),
            cue("humiliated"),
            cue("hate myself"),
        ],
    },
];

/// 对消息做情绪状态分类（不区分大小写）
///
/// 返回首个命中词组的标签；无命中返回 None。
pub fn classify_emotion(message: &str) -> Option<EmotionalState> {
    let lower = message.to_lowercase();

    for group in GROUPS {
        let hit = group.cues.iter().any(|cue| {
            lower.contains(cue.text) && !cue.unless.iter().any(|ex| lower.contains(ex))
        });
        if hit {
            return Some(group.state);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("I'm so sad today", EmotionalState::Sad)]
    #[case("I've been feeling really depressed", EmotionalState::Depressed)]
    #[case("I'm feeling really anxious about my presentation", EmotionalState::Anxious)]
    #[case("I'm completely overwhelmed by work", EmotionalState::Overwhelmed)]
    #[case("I am FURIOUS right now", EmotionalState::Angry)]
    #[case("I'm actually happy for once", EmotionalState::Happy)]
    #[case("I'm confused about everything", EmotionalState::Confused)]
    #[case("it all feels pointless", EmotionalState::Hopeless)]
    #[case("I just feel numb", EmotionalState::Numb)]
    #[case("I'm so ashamed of what I did", EmotionalState::Ashamed)]
    fn test_single_group_match(#[case] message: &str, #[case] expected: EmotionalState) {
        assert_eq!(classify_emotion(message), Some(expected));
    }

    #[test]
    fn test_priority_order_is_tiebreak() {
        // 同时命中 sad 与 happy 词组时，先声明的 sad 获胜
        assert_eq!(
            classify_emotion("I was happy but now I'm sad"),
            Some(EmotionalState::Sad)
        );
        // anxiety 声明先于 anger
        assert_eq!(
            classify_emotion("I'm anxious and frustrated"),
            Some(EmotionalState::Anxious)
        );
    }

    #[test]
    fn test_negative_exclusions() {
        assert_eq!(classify_emotion("I feel empty"), Some(EmotionalState::Depressed));
        assert_eq!(classify_emotion("I have an empty stomach"), None);
        assert_eq!(
            classify_emotion("I'm afraid of failing"),
            Some(EmotionalState::Anxious)
        );
        assert_eq!(classify_emotion("I'm not afraid of it now"), None);
    }

    #[test]
    fn test_no_match_returns_none() {
        assert_eq!(classify_emotion("tell me about meditation"), None);
        assert_eq!(classify_emotion(""), None);
    }

    #[test]
    fn test_labels() {
        assert_eq!(EmotionalState::Anxious.label(), "feeling anxious");
        assert_eq!(EmotionalState::Ashamed.label(), "feeling shame");
    }
}
