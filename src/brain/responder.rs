//! 回复装配模块
//!
//! 将消息按严格的优先级顺序分类并渲染为回复文本：
//! 危机 → 情绪状态 → 基础对话 → 知识库扫描 → 认知边界 → 导航 → 随机兜底。
//! 优先级实现为显式的有序规则表，而非级联 if/else，使顺序可审计、可测试。
//!
//! 本模块对任意字符串输入都不会 panic 或返回错误；空白输入由
//! API 层在调用前拒绝。

use rand::Rng;

use crate::brain::basic::{BasicQuestion, classify_basic_question};
use crate::brain::emergency::is_emergency;
use crate::brain::emotion::{EmotionalState, classify_emotion};
use crate::brain::knowledge;
use crate::brain::topic::classify_topic;

/// 危机回复（固定文本，优先级最高，不可被任何低优先级分支覆盖）
pub const CRISIS_RESPONSE: &str = "I'm really concerned about what you just shared. \
    You don't have to go through this alone. Please reach out right now to the \
    National Suicide Prevention Lifeline - call or text 988. It's free, confidential, \
    and available 24/7. If you're in immediate danger, please call 911. \
    Would you like me to share more support resources?";

/// 认知边界回复（"understand me" 类元提问）
pub const LIMITATIONS_RESPONSE: &str = "I want to be honest with you: I can't truly \
    read minds or know exactly how you feel - I'm an automated counselor working \
    from patterns in what you write. But I am here to listen, and the more you \
    share, the better I can support you.";

/// 兜底回复集合（恰好五条，无命中时等概率随机选取，不做去重）
pub const FALLBACK_RESPONSES: [&str; 5] = [
    "I'm here with you. Can you tell me a little more about what's on your mind?",
    "Thank you for sharing that with me. How has this been affecting you day to day?",
    "I want to make sure I understand. Could you tell me more about how you're feeling?",
    "That sounds important. What would feel most helpful to talk through right now?",
    "I'm listening. Take your time - there's no rush here.",
];

/// 导航目标
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTarget {
    /// 工作坊页面
    Workshops,
    /// 社区支持小组
    Community,
}

/// 消息意图（分类结果）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// 危机语句
    Emergency,
    /// 情绪状态
    Emotion(EmotionalState),
    /// 基础对话
    Basic(BasicQuestion),
    /// 知识库主题
    KnowledgeTopic(&'static str),
    /// 认知边界元提问
    MetaUnderstanding,
    /// 导航请求
    Navigate(NavTarget),
    /// 无法分类
    Unclassified,
}

/// 分类规则：(名称, 判定函数)，按声明顺序求值，首个命中者获胜
struct Rule {
    name: &'static str,
    apply: fn(&str) -> Option<Intent>,
}

fn rule_emergency(message: &str) -> Option<Intent> {
    is_emergency(message).then_some(Intent::Emergency)
}

fn rule_emotion(message: &str) -> Option<Intent> {
    classify_emotion(message).map(Intent::Emotion)
}

fn rule_basic_question(message: &str) -> Option<Intent> {
    classify_basic_question(message).map(Intent::Basic)
}

fn rule_knowledge_scan(message: &str) -> Option<Intent> {
    knowledge::scan(message).map(|(key, _)| Intent::KnowledgeTopic(key))
}

fn rule_topic_heuristics(message: &str) -> Option<Intent> {
    classify_topic(message).map(Intent::KnowledgeTopic)
}

fn rule_meta_understanding(message: &str) -> Option<Intent> {
    let lower = message.to_lowercase();
    let hit = lower.contains("understand me")
        || lower.contains("know how i feel")
        || lower.contains("mind reading");
    hit.then_some(Intent::MetaUnderstanding)
}

fn rule_navigation(message: &str) -> Option<Intent> {
    let lower = message.to_lowercase();
    if lower.contains("workshop") {
        return Some(Intent::Navigate(NavTarget::Workshops));
    }
    if lower.contains("community") || lower.contains("support group") {
        return Some(Intent::Navigate(NavTarget::Community));
    }
    None
}

/// 有序规则表（优先级自上而下）
static RULES: &[Rule] = &[
    Rule { name: "emergency", apply: rule_emergency },
    Rule { name: "emotion", apply: rule_emotion },
    Rule { name: "basic_question", apply: rule_basic_question },
    Rule { name: "knowledge_scan", apply: rule_knowledge_scan },
    Rule { name: "topic_heuristics", apply: rule_topic_heuristics },
    Rule { name: "meta_understanding", apply: rule_meta_understanding },
    Rule { name: "navigation", apply: rule_navigation },
];

/// 对消息做意图分类
pub fn classify(message: &str) -> Intent {
    for rule in RULES {
        if let Some(intent) = (rule.apply)(message) {
            tracing::debug!("Message classified by rule '{}'", rule.name);
            return intent;
        }
    }
    Intent::Unclassified
}

/// 情绪共情模板：(引导句, 正文)
///
/// 返回 None 时由调用方回退到该标签对应的知识库条目。
fn empathy_template(state: EmotionalState) -> Option<(&'static str, &'static str)> {
    let pair = match state {
        EmotionalState::Sad => (
            "I'm really sorry you're feeling sad",
            "Your feelings are valid, and it's okay to sit with them. Would you like \
             to talk about what's been weighing on you?",
        ),
        EmotionalState::Depressed => (
            "It sounds like you're carrying something really heavy",
            "Depression can drain the color out of everything, but you don't have to \
             face it alone. Talking to a professional can genuinely help - and I'm \
             here to listen in the meantime.",
        ),
        EmotionalState::Anxious => (
            "I hear how anxious you're feeling",
            "Anxiety can be really uncomfortable, but it does pass. Try a slow breath \
             with me: in for 4, hold for 4, out for 6. What's worrying you most right \
             now?",
        ),
        EmotionalState::Overwhelmed => (
            "It sounds like everything is piling up at once",
            "When it's all too much, we can break it down together. What's the one \
             thing pressing on you hardest right now?",
        ),
        EmotionalState::Angry => (
            "It sounds like something has really upset you",
            "Anger is often a signal that something important to you was crossed. Do \
             you want to tell me what happened?",
        ),
        EmotionalState::Happy => (
            "I'm so glad to hear you're feeling good",
            "It's worth pausing to savor moments like this. What's been going well \
             for you?",
        ),
        EmotionalState::Confused => (
            "It sounds like things feel tangled right now",
            "Confusion is usually a sign that a lot is happening at once. Let's take \
             it one piece at a time - what's on your mind?",
        ),
        EmotionalState::Hopeless => (
            "I'm sorry things feel so dark right now",
            "Hopelessness is a feeling, not a fact, even when it's loud. You deserve \
             support - would you like to talk about what's been happening?",
        ),
        EmotionalState::Numb => (
            "Feeling numb can be its own kind of pain",
            "Sometimes numbness is how we protect ourselves when things have been \
             too much. I'm here with you - what's been going on lately?",
        ),
        EmotionalState::Ashamed => (
            "Shame is such a heavy thing to carry",
            "Whatever happened, you are not defined by it. Being able to name the \
             feeling already takes courage. Do you want to talk it through?",
        ),
    };
    Some(pair)
}

/// 渲染情绪共情回复，可用用户名个性化
fn render_emotion(state: EmotionalState, user_name: Option<&str>) -> String {
    if let Some((lead, rest)) = empathy_template(state) {
        return match user_name {
            Some(name) => format!("{}, {}. {}", lead, name, rest),
            None => format!("{}. {}", lead, rest),
        };
    }
    // 模板缺失时回退到标签对应的知识库条目
    knowledge::lookup(state.topic_key())
        .map(str::to_string)
        .unwrap_or_else(|| FALLBACK_RESPONSES[0].to_string())
}

/// 渲染导航回复
fn render_navigation(target: NavTarget) -> &'static str {
    match target {
        NavTarget::Workshops => {
            "We have guided workshops on topics like stress, mindfulness, and \
             self-esteem. Would you like me to take you to the workshops section?"
        }
        NavTarget::Community => {
            "Sometimes it helps to connect with people who understand. Would you \
             like me to take you to the community support groups?"
        }
    }
}

/// 等概率选取一条兜底回复
fn pick_fallback() -> &'static str {
    let idx = rand::thread_rng().gen_range(0..FALLBACK_RESPONSES.len());
    FALLBACK_RESPONSES[idx]
}

/// 生成回复文本
///
/// 唯一必需的对外入口：对任意字符串输入返回一条回复，绝不失败。
/// 除兜底分支外，相同输入与用户名总是得到相同输出。
pub fn generate_response(message: &str, user_name: Option<&str>) -> String {
    respond(classify(message), user_name)
}

/// 渲染已分类的意图
///
/// 供需要同时拿到分类结果与回复文本的调用方使用，避免二次分类。
pub fn respond(intent: Intent, user_name: Option<&str>) -> String {
    match intent {
        Intent::Emergency => CRISIS_RESPONSE.to_string(),
        Intent::Emotion(state) => render_emotion(state, user_name),
        Intent::Basic(tag) => knowledge::lookup(tag.topic_key())
            .map(str::to_string)
            .unwrap_or_else(|| pick_fallback().to_string()),
        Intent::KnowledgeTopic(key) => knowledge::lookup(key)
            .map(str::to_string)
            .unwrap_or_else(|| pick_fallback().to_string()),
        Intent::MetaUnderstanding => LIMITATIONS_RESPONSE.to_string(),
        Intent::Navigate(target) => render_navigation(target).to_string(),
        Intent::Unclassified => pick_fallback().to_string(),
    }
}
