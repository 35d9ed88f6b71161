//! KQL 生成结果过滤
//!
//! 对语言模型输出做黑名单检查：只拦截 SQL 关键字，不做 KQL 语法校验

use super::KqlQuery;

/// 禁止出现的关键字（小写，子串匹配）
pub const FORBIDDEN_KEYWORDS: &[&str] = &["select", "from"];

/// 命中黑名单时替换的安全查询，执行结果恒为 0
pub const FALLBACK_QUERY: &str = "// Invalid SQL keywords replaced\nprint result = 0";

/// 检查文本是否包含任一禁止关键字（大小写不敏感，任意位置）
pub fn contains_forbidden_keyword(text: &str) -> bool {
    let lowered = text.to_lowercase();
    FORBIDDEN_KEYWORDS.iter().any(|kw| lowered.contains(kw))
}

/// 过滤模型输出
///
/// 先去掉首尾空白；命中黑名单则整体替换为 [`FALLBACK_QUERY`]，否则原样返回
pub fn sanitize_completion(completion: &str) -> KqlQuery {
    let trimmed = completion.trim();
    if contains_forbidden_keyword(trimmed) {
        tracing::warn!(completion = %trimmed, "Generated query contains forbidden keyword, replaced");
        return KqlQuery::new(FALLBACK_QUERY);
    }
    KqlQuery::new(trimmed)
}
