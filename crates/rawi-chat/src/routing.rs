//! Model routing: which requests deserve the advanced (more capable) model.

/// Literary, critical and grammatical terms that signal an analysis request.
/// Matching is plain substring search, so both noun and imperative forms are
/// listed (`تحليل` does not contain `حلل` as a substring).
const ADVANCED_KEYWORDS: &[&str] = &[
    "تحليل",
    "حلل",
    "نقد",
    "إبداع",
    "شاعرية",
    "جمالية",
    "أسلوب",
    "بلاغة",
    "صورة شعرية",
    "رمزية",
    "نحو",
    "إعراب",
    "أعرب",
    "قواعد",
    "بنية",
    "تركيب",
    "نظرية",
    "منهج",
    "مدرسة أدبية",
    "تيار",
];

/// True when the message asks for deep literary or grammatical analysis and
/// should be routed to the advanced model. Computed on every request,
/// whether or not a provider call ends up being made.
pub fn should_use_advanced_model(message: &str) -> bool {
    ADVANCED_KEYWORDS
        .iter()
        .any(|keyword| message.contains(keyword))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_imperative_routes_to_advanced() {
        assert!(should_use_advanced_model("حلل هذا النص"));
    }

    #[test]
    fn test_greeting_stays_on_default() {
        assert!(!should_use_advanced_model("مرحبا"));
        assert!(!should_use_advanced_model("ما هي عاصمة عُمان؟"));
    }

    #[test]
    fn test_grammatical_terms_route_to_advanced() {
        assert!(should_use_advanced_model("أعرب الجملة التالية"));
        assert!(should_use_advanced_model("اشرح قواعد النحو في هذا البيت"));
    }

    #[test]
    fn test_keyword_inside_longer_message() {
        assert!(should_use_advanced_model(
            "أريد منك تحليل قصيدة عن البحر مع التركيز على الصور"
        ));
    }

    #[test]
    fn test_empty_message() {
        assert!(!should_use_advanced_model(""));
    }
}
