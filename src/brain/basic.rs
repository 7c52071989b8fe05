//! 基础对话分类模块
//!
//! 识别问候、问安、身份询问、致谢、求助与自我认知类提问，
//! 按声明的优先级顺序检查，首个命中者获胜。

use serde::{Deserialize, Serialize};

/// 基础对话标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BasicQuestion {
    /// 问候
    Greeting,
    /// 问安（询问助手状态）
    HowAreYou,
    /// 身份询问
    WhoAreYou,
    /// 致谢
    Gratitude,
    /// 求助
    HelpRequest,
    /// 自我认知类提问（"are you real" 等）
    SelfAwareness,
}

impl BasicQuestion {
    /// 对应的知识库主题键
    pub fn topic_key(&self) -> &'static str {
        match self {
            BasicQuestion::Greeting => "greeting",
            BasicQuestion::HowAreYou => "how are you",
            BasicQuestion::WhoAreYou => "who are you",
            BasicQuestion::Gratitude => "thank you",
            BasicQuestion::HelpRequest => "help",
            BasicQuestion::SelfAwareness => "self-awareness",
        }
    }
}

/// 对消息做基础对话分类（不区分大小写）
pub fn classify_basic_question(message: &str) -> Option<BasicQuestion> {
    let lower = message.trim().to_lowercase();

    let is_greeting = matches!(lower.as_str(), "hi" | "hello" | "hey" | "yo")
        || lower.starts_with("hello")
        || lower.starts_with("hi ")
        || lower.starts_with("hey")
        || lower.contains("good morning")
        || lower.contains("good afternoon")
        || lower.contains("good evening");
    if is_greeting {
        return Some(BasicQuestion::Greeting);
    }

    if lower.contains("how are you") || lower.contains("how're you") {
        return Some(BasicQuestion::HowAreYou);
    }

    if lower.contains("who are you")
        || lower.contains("what are you")
        || lower.contains("your name")
    {
        return Some(BasicQuestion::WhoAreYou);
    }

    if lower.contains("thank you") || lower.contains("thanks") || lower.contains("appreciate it") {
        return Some(BasicQuestion::Gratitude);
    }

    if lower == "help"
        || lower.contains("help me")
        || lower.contains("i need help")
        || lower.contains("can you help")
    {
        return Some(BasicQuestion::HelpRequest);
    }

    if lower.contains("are you real")
        || lower.contains("are you ai")
        || lower.contains("are you an ai")
        || lower.contains("are you a robot")
        || lower.contains("are you human")
    {
        return Some(BasicQuestion::SelfAwareness);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("hello", BasicQuestion::Greeting)]
    #[case("Hi there", BasicQuestion::Greeting)]
    #[case("good morning!", BasicQuestion::Greeting)]
    #[case("how are you doing?", BasicQuestion::HowAreYou)]
    #[case("who are you exactly?", BasicQuestion::WhoAreYou)]
    #[case("what's your name?", BasicQuestion::WhoAreYou)]
    #[case("thank you so much", BasicQuestion::Gratitude)]
    #[case("thanks!", BasicQuestion::Gratitude)]
    #[case("can you help me with something", BasicQuestion::HelpRequest)]
    #[case("help", BasicQuestion::HelpRequest)]
    #[case("are you real?", BasicQuestion::SelfAwareness)]
    #[case("are you a robot?", BasicQuestion::SelfAwareness)]
    fn test_tags(#[case] message: &str, #[case] expected: BasicQuestion) {
        assert_eq!(classify_basic_question(message), Some(expected));
    }

    #[test]
    fn test_priority_order() {
        // 问候先于问安检查
        assert_eq!(
            classify_basic_question("hello, how are you?"),
            Some(BasicQuestion::Greeting)
        );
        // 问安先于身份询问
        assert_eq!(
            classify_basic_question("how are you, and who are you?"),
            Some(BasicQuestion::HowAreYou)
        );
    }

    #[test]
    fn test_no_match() {
        assert_eq!(classify_basic_question("tell me about stress"), None);
        assert_eq!(classify_basic_question(""), None);
    }
}
