//! Deterministic prompt assembly. Everything here is pure string work so it
//! can be tested without a provider.

use serde::{Deserialize, Serialize};

/// Characters of search-result content quoted into the prompt
const EXCERPT_CHARS: usize = 200;

const SOURCE_BLOCK_HEADER: &str = "--- معلومات من مصادر موثوقة ---";
const SOURCE_BLOCK_FOOTER: &str = "--- نهاية المعلومات ---";

const SOURCE_INSTRUCTIONS: &str = "تعليمات مهمة:
- استخدم هذه المعلومات بحذر شديد
- **لا تذكر أي عناوين كتب محددة من نتائج البحث إلا إذا كانت من مصادر موثوقة 100%**
- إذا تضاربت المصادر أو كانت غير مؤكدة، اعترف بذلك صراحة
- **قل \"لا أملك معلومات مؤكدة\" بدلاً من ذكر عناوين مشكوك فيها**
- ركز على التحليل الأدبي والنحوي العميق
- اعتمد على الحقائق المؤكدة فقط

🚨 **تحذير نهائي:** إذا لم تكن متأكداً من عنوان كتاب أو تاريخ أو معلومة محددة، لا تذكرها أبداً. قل \"أحتاج للتحقق من مصادر إضافية\"";

const LITERARY_FRAMEWORK: &str = "📝 **إطار تحليلي بسيط:**
• حلل النص المُعطى فقط (لا تختلق نصوص)
• استخدم المصطلحات النحوية والبلاغية الصحيحة
• اذكر فقط ما هو واضح في النص
• لا تفترض معلومات غير مذكورة";

const GRAMMAR_FRAMEWORK: &str = "✏️ **تحليل نحوي مطلوب:**
• أعرب الكلمات الموجودة في النص فقط
• اشرح القواعد النحوية بدقة
• لا تضيف أمثلة من عندك
• التزم بالنص المُعطى فقط";

const LITERARY_TRIGGERS: &[&str] = &["تحليل", "حلل", "نقد", "إعراب"];
const GRAMMAR_TRIGGERS: &[&str] = &["أعرب", "نحو", "إعراب"];

/// One retrieved source passed alongside the user message. All fields except
/// `content` are optional; the prompt substitutes Arabic defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: Option<String>,
    pub source: Option<String>,
    #[serde(rename = "type")]
    pub result_type: Option<String>,
    #[serde(default)]
    pub content: String,
    pub final_score: Option<f64>,
    pub reliability_warning: Option<String>,
}

/// Assemble the full prompt for one request.
///
/// With search results: question (context-wrapped when prior conversation
/// exists), the numbered source block, the analytical framework when the
/// message asks for analysis, and the anti-fabrication instructions. Without
/// results: just the question plus the framework.
pub fn build_prompt(message: &str, results: &[SearchResult], context: &str) -> String {
    let framework = analytical_framework(message);
    let body = if context.is_empty() {
        message.to_string()
    } else {
        format!("{context}\n\nالسؤال الحالي: {message}")
    };

    if results.is_empty() {
        if framework.is_empty() {
            return body;
        }
        return format!("{body}\n\n{framework}");
    }

    let mut sections = vec![format!("السؤال: {body}"), search_block(results)];
    if !framework.is_empty() {
        sections.push(framework.to_string());
    }
    sections.push(SOURCE_INSTRUCTIONS.to_string());
    sections.join("\n\n")
}

/// Numbered source entries wrapped in the source-material delimiters. Each
/// entry quotes at most the first 200 characters of its content.
pub fn search_block(results: &[SearchResult]) -> String {
    let mut block = String::from(SOURCE_BLOCK_HEADER);
    block.push('\n');

    for (i, result) in results.iter().enumerate() {
        let title = result.title.as_deref().unwrap_or("بلا عنوان");
        let source = result.source.as_deref().unwrap_or("غير محدد");
        let result_type = result.result_type.as_deref().unwrap_or("عام");
        let score = result.final_score.unwrap_or(0.5);

        block.push_str(&format!("\n{}. {}", i + 1, title));
        if let Some(warning) = &result.reliability_warning {
            block.push_str(&format!(" (تنبيه: {warning})"));
        }
        block.push_str(&format!(
            "\nالمصدر: {} - نوع: {}\nالمحتوى: {}...\nدرجة الموثوقية: {:.1}/1.0\n",
            source,
            result_type,
            excerpt(&result.content),
            score
        ));
    }

    block.push('\n');
    block.push_str(SOURCE_BLOCK_FOOTER);
    block
}

/// Directive block matching the kind of analysis the message asks for, or
/// empty. The literary triggers take precedence over the grammatical ones.
pub fn analytical_framework(message: &str) -> &'static str {
    if LITERARY_TRIGGERS.iter().any(|t| message.contains(t)) {
        LITERARY_FRAMEWORK
    } else if GRAMMAR_TRIGGERS.iter().any(|t| message.contains(t)) {
        GRAMMAR_FRAMEWORK
    } else {
        ""
    }
}

/// Format prior (label, text) history pairs into the conversation-context
/// string `build_prompt` expects. Empty history yields an empty context.
pub fn history_context(entries: &[(&str, &str)]) -> String {
    if entries.is_empty() {
        return String::new();
    }

    let mut context = String::from("سياق المحادثة السابقة:");
    for (label, text) in entries {
        context.push('\n');
        context.push_str(label);
        context.push_str(": ");
        context.push_str(text);
    }
    context
}

/// First `EXCERPT_CHARS` characters, cut on a char boundary
fn excerpt(content: &str) -> &str {
    match content.char_indices().nth(EXCERPT_CHARS) {
        Some((idx, _)) => &content[..idx],
        None => content,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_with_content(content: impl Into<String>) -> SearchResult {
        SearchResult {
            content: content.into(),
            ..SearchResult::default()
        }
    }

    #[test]
    fn test_plain_message_passes_through() {
        let prompt = build_prompt("مرحبا", &[], "");
        assert_eq!(prompt, "مرحبا");
    }

    #[test]
    fn test_context_wraps_current_question() {
        let context = history_context(&[("المستخدم", "من هو المتنبي؟"), ("راوي", "شاعر عباسي.")]);
        let prompt = build_prompt("وما أشهر قصائده؟", &[], &context);

        assert!(prompt.starts_with("سياق المحادثة السابقة:"));
        assert!(prompt.contains("المستخدم: من هو المتنبي؟"));
        assert!(prompt.contains("راوي: شاعر عباسي."));
        assert!(prompt.contains("السؤال الحالي: وما أشهر قصائده؟"));
    }

    #[test]
    fn test_empty_history_yields_empty_context() {
        assert_eq!(history_context(&[]), "");
    }

    #[test]
    fn test_framework_for_analysis_request() {
        let prompt = build_prompt("حلل هذا البيت", &[], "");
        assert!(prompt.contains("إطار تحليلي بسيط"));

        let prompt = build_prompt("أعرب الجملة التالية", &[], "");
        assert!(prompt.contains("تحليل نحوي مطلوب"));
    }

    #[test]
    fn test_literary_framework_takes_precedence() {
        // contains both a literary and a grammatical trigger
        let framework = analytical_framework("حلل النص ثم أعرب كلماته");
        assert!(framework.contains("إطار تحليلي بسيط"));
    }

    #[test]
    fn test_search_block_applies_defaults() {
        let block = search_block(&[result_with_content("نص قصير")]);

        assert!(block.contains("1. بلا عنوان"));
        assert!(block.contains("المصدر: غير محدد - نوع: عام"));
        assert!(block.contains("المحتوى: نص قصير..."));
        assert!(block.contains("درجة الموثوقية: 0.5/1.0"));
        assert!(block.starts_with(SOURCE_BLOCK_HEADER));
        assert!(block.ends_with(SOURCE_BLOCK_FOOTER));
    }

    #[test]
    fn test_search_block_carries_reliability_warning() {
        let result = SearchResult {
            title: Some("ديوان".to_string()),
            reliability_warning: Some("مصدر غير موثق".to_string()),
            final_score: Some(0.3),
            ..result_with_content("محتوى")
        };
        let block = search_block(&[result]);

        assert!(block.contains("1. ديوان (تنبيه: مصدر غير موثق)"));
        assert!(block.contains("درجة الموثوقية: 0.3/1.0"));
    }

    #[test]
    fn test_content_truncated_to_200_chars() {
        let content: String = "نص ".chars().cycle().take(300).collect();
        assert_eq!(content.chars().count(), 300);

        let prompt = build_prompt("سؤال", &[result_with_content(content.clone())], "");

        let expected: String = content.chars().take(200).collect();
        assert!(prompt.contains(&format!("المحتوى: {expected}...")));
        assert!(!prompt.contains(&content));
    }

    #[test]
    fn test_short_content_kept_whole() {
        let block = search_block(&[result_with_content("قصير")]);
        assert!(block.contains("المحتوى: قصير..."));
    }

    #[test]
    fn test_prompt_with_results_carries_instructions() {
        let prompt = build_prompt("من كتب هذا؟", &[result_with_content("نص")], "");

        assert!(prompt.starts_with("السؤال: من كتب هذا؟"));
        assert!(prompt.contains(SOURCE_BLOCK_HEADER));
        assert!(prompt.contains("تعليمات مهمة:"));
    }

    #[test]
    fn test_search_result_deserializes_from_partial_json() {
        let result: SearchResult =
            serde_json::from_str(r#"{"content": "نص", "type": "مقال"}"#).unwrap();

        assert_eq!(result.content, "نص");
        assert_eq!(result.result_type.as_deref(), Some("مقال"));
        assert!(result.title.is_none());
        assert!(result.final_score.is_none());
    }
}
