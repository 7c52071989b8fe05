//! 知识库模块
//!
//! 静态的主题键 → 固定回复文本映射，进程启动时构建一次，运行期只读。
//! 键唯一；子串扫描按声明顺序进行，条目内容不可在运行时修改。

use std::collections::HashMap;
use std::sync::LazyLock;

/// 知识库条目（主题键, 回复文本）
///
/// 扫描匹配按声明顺序进行，先声明的键优先命中。
pub const ENTRIES: &[(&str, &str)] = &[
    (
        "anxiety",
        "Anxiety is your body's alarm system working overtime. Slow, deep breaths \
         can calm it: try breathing in for 4 counts, holding for 4, and out for 6. \
         Grounding exercises, like naming five things you can see, also help bring \
         you back to the present moment.",
    ),
    (
        "depression",
        "Depression can make even small tasks feel heavy, and that is not a personal \
         failing. Gentle structure helps: one small activity a day, a little daylight, \
         and reaching out to someone you trust. Professional support makes a real \
         difference, and seeking it is a sign of strength.",
    ),
    (
        "stress",
        "Stress builds when demands outpace recovery. Short, regular breaks, a walk \
         outside, and writing down what is in your control versus what is not can \
         lower the pressure. Your body needs rest to reset, so protect your sleep.",
    ),
    (
        "therapy",
        "Therapy is a confidential space to work through what is weighing on you with \
         someone trained to help. There are many styles, from talk therapy to CBT. It \
         often takes a session or two to find the right fit, and that is completely \
         normal.",
    ),
    (
        "meditation",
        "Meditation is training your attention to rest in the present. Start small: \
         two minutes of following your breath, noticing when your mind wanders, and \
         gently returning. There is no 'doing it wrong' - the returning is the practice.",
    ),
    (
        "trauma",
        "Trauma is the mind and body's response to overwhelming experiences, and its \
         effects can surface long after. Healing is possible, usually with support. \
         Trauma-informed therapists can help you process at a pace that feels safe.",
    ),
    (
        "self-care",
        "Self-care is not indulgence, it is maintenance: sleep, food, movement, \
         connection, and saying no when you need to. Start with one small act today \
         that future-you will be grateful for.",
    ),
    (
        "mindfulness",
        "Mindfulness means noticing what is happening right now without judging it - \
         your breath, your senses, your thoughts passing like weather. Even one \
         mindful minute during the day counts.",
    ),
    (
        "boundaries",
        "Boundaries are how you teach others to treat you. It is okay to say 'no' \
         without a long explanation. Healthy boundaries protect your energy and \
         usually improve relationships rather than harm them.",
    ),
    (
        "grief",
        "Grief has no timetable and no correct shape. Waves of sadness, anger, or \
         even numbness are all part of it. Be patient with yourself, and let people \
         who care about you stay close.",
    ),
    (
        "panic attack",
        "Panic attacks are intensely frightening but not dangerous, and they pass - \
         usually within minutes. Try slow exhales, cold water on your wrists, and \
         reminding yourself: 'this is panic, it will peak and fade.' If they recur, \
         a clinician can help you get ahead of them.",
    ),
    (
        "ptsd",
        "PTSD can bring flashbacks, nightmares, and feeling constantly on guard after \
         trauma. It is a recognized, treatable condition - therapies like EMDR and \
         trauma-focused CBT have strong evidence behind them.",
    ),
    (
        "addiction",
        "Addiction is a health condition, not a moral failure. Recovery usually \
         starts with telling one safe person the truth. Support groups and addiction \
         counselors can meet you wherever you are in the process.",
    ),
    (
        "insomnia",
        "Insomnia feeds on the worry about not sleeping. Keep a regular wake time, \
         dim screens an hour before bed, and if you cannot sleep after 20 minutes, \
         get up and do something calm until you feel drowsy. If it persists for \
         weeks, talk to a professional.",
    ),
    (
        "loneliness",
        "Loneliness is a signal, not a verdict - it means you are wired for \
         connection. Small steps count: a message to an old friend, a class, a \
         community group. Quality of connection matters more than quantity.",
    ),
    (
        "burnout",
        "Burnout is exhaustion plus detachment plus feeling ineffective, and it does \
         not fix itself with one weekend off. Real recovery means lowering the load, \
         restoring rest, and reconnecting with what matters to you.",
    ),
    (
        "motivation",
        "Motivation usually follows action rather than preceding it. Shrink the task \
         until it is almost too small to fail - two minutes of starting often \
         carries you further than waiting to feel ready.",
    ),
    (
        "journaling",
        "Journaling gives your thoughts somewhere to land. Try three lines a day: \
         what happened, what you felt, one thing you are grateful for. There are no \
         rules - messy pages are still progress.",
    ),
    (
        "exercise",
        "Movement is one of the most reliable mood lifters we know. It does not need \
         to be intense: a 15-minute walk can measurably reduce anxiety and low mood. \
         Consistency beats intensity.",
    ),
    (
        "relationships",
        "Healthy relationships are built on respect, honesty, and repair after \
         conflict, not on never disagreeing. If a relationship consistently leaves \
         you smaller or afraid, that is worth taking seriously.",
    ),
    (
        "greeting",
        "Hello! I'm your digital counselor. I'm here to listen and support you. \
         How are you feeling today?",
    ),
    (
        "how are you",
        "Thank you for asking! I'm here and ready to support you. More importantly, \
         how are YOU doing today?",
    ),
    (
        "who are you",
        "I'm a digital counselor - a supportive companion for your mental wellness \
         journey. I can listen, share coping techniques, and point you toward \
         helpful resources. I'm not a replacement for a licensed therapist, but I'm \
         always here.",
    ),
    (
        "thank you",
        "You're very welcome. I'm glad I could help. Remember, reaching out is a \
         sign of strength, and I'm here whenever you need me.",
    ),
    (
        "help",
        "I'm here for you. You can tell me how you're feeling, ask about topics like \
         anxiety, stress, or sleep, or just talk things through. If you're in \
         crisis, please reach out to the 988 Suicide & Crisis Lifeline right away.",
    ),
    (
        "self-awareness",
        "I'm an automated counselor, not a human - my responses come from a curated \
         knowledge base, not lived experience. What I can offer is a judgment-free \
         space and practical techniques, any time you need them.",
    ),
];

/// 精确查找索引（键为小写）
static INDEX: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| ENTRIES.iter().copied().collect());

/// 按主题键精确查找（不区分大小写）
pub fn lookup(key: &str) -> Option<&'static str> {
    INDEX.get(key.to_lowercase().as_str()).copied()
}

/// 在消息中扫描首个命中的主题键（不区分大小写的子串包含）
///
/// 返回 (键, 回复文本)；按 `ENTRIES` 声明顺序检查，保证结果可复现。
pub fn scan(message: &str) -> Option<(&'static str, &'static str)> {
    let lower = message.to_lowercase();
    ENTRIES
        .iter()
        .find(|(key, _)| lower.contains(key))
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_exact_key() {
        assert!(lookup("meditation").is_some());
        assert!(lookup("MEDITATION").is_some());
        assert!(lookup("no-such-topic").is_none());
    }

    #[test]
    fn test_scan_finds_embedded_key() {
        let (key, _) = scan("tell me about meditation").unwrap();
        assert_eq!(key, "meditation");
    }

    #[test]
    fn test_scan_declaration_order_wins() {
        // "anxiety" 声明在 "stress" 之前
        let (key, _) = scan("anxiety and stress together").unwrap();
        assert_eq!(key, "anxiety");
    }

    #[test]
    fn test_scan_no_match() {
        assert!(scan("completely unrelated gibberish").is_none());
    }

    #[test]
    fn test_keys_are_unique() {
        let mut keys: Vec<&str> = ENTRIES.iter().map(|(k, _)| *k).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), ENTRIES.len());
    }
}
