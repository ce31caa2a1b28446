use once_cell::sync::Lazy;
use regex::Regex;

static THINK_TAG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<think>[\s\S]*?</think>|<think\s*/>").unwrap());

static REASONING_TAG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<reasoning>[\s\S]*?</reasoning>").unwrap());

static TRAILING_SPACE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+\n").unwrap());

static MULTIPLE_NEWLINES_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Strip model reasoning blocks and whitespace noise from generated text
/// before it is embedded in the report.
pub fn clean_generated_text(response: &str) -> String {
    let normalized = response.replace("\r\n", "\n");

    let cleaned = THINK_TAG_PATTERN.replace_all(&normalized, "");
    let cleaned = REASONING_TAG_PATTERN.replace_all(&cleaned, "");
    let cleaned = TRAILING_SPACE_PATTERN.replace_all(&cleaned, "\n");

    // Collapse multiple consecutive newlines into at most two
    MULTIPLE_NEWLINES_PATTERN
        .replace_all(cleaned.trim(), "\n\n")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_think_tags() {
        let input = "<think>weighing CVEs</think>1. Patch the VPN gateways";
        assert_eq!(clean_generated_text(input), "1. Patch the VPN gateways");
    }

    #[test]
    fn test_clean_self_closing_think() {
        assert_eq!(clean_generated_text("<think />Risks"), "Risks");
    }

    #[test]
    fn test_clean_reasoning_tags() {
        let input = "<reasoning>count severities</reasoning>Most findings are High";
        assert_eq!(clean_generated_text(input), "Most findings are High");
    }

    #[test]
    fn test_clean_whitespace() {
        let input = "\r\nKey risks:   \r\n\r\n\r\n\r\n- Outdated OpenSSL\n";
        assert_eq!(clean_generated_text(input), "Key risks:\n\n- Outdated OpenSSL");
    }

    #[test]
    fn test_clean_preserves_normal_text() {
        let input = "Apply vendor patches for CVE-2024-3400 first.";
        assert_eq!(clean_generated_text(input), input);
    }
}
