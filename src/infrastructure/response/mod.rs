use once_cell::sync::Lazy;
use regex::Regex;

static LEADING_JSON_FENCE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\A\s*```json\s*").unwrap());

static TRAILING_FENCE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*```\s*\z").unwrap());

/// Removes the ```json ... ``` wrapper some models put around JSON output
/// even when told not to, then trims the result.
pub fn strip_code_fences(response: &str) -> String {
    let cleaned = LEADING_JSON_FENCE_PATTERN.replace(response, "");
    let cleaned = TRAILING_FENCE_PATTERN.replace(&cleaned, "");
    cleaned.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json_fence() {
        let input = "```json\n{\"testCases\": []}\n```";
        assert_eq!(strip_code_fences(input), "{\"testCases\": []}");
    }

    #[test]
    fn test_strip_fence_is_case_insensitive() {
        let input = "```JSON {\"a\": 1}```";
        assert_eq!(strip_code_fences(input), "{\"a\": 1}");
    }

    #[test]
    fn test_strip_fence_with_surrounding_whitespace() {
        let input = "\n  ```json  \n{\"a\": 1}\n  ```  \n";
        assert_eq!(strip_code_fences(input), "{\"a\": 1}");
    }

    #[test]
    fn test_unfenced_text_is_only_trimmed() {
        assert_eq!(strip_code_fences("  {\"a\": 1}\n"), "{\"a\": 1}");
    }

    #[test]
    fn test_fence_inside_content_is_preserved() {
        let input = "{\"steps\": \"run ```json``` literally\"}";
        assert_eq!(strip_code_fences(input), input);
    }

    #[test]
    fn test_bare_opening_fence_is_left_alone() {
        let input = "```\n{\"a\": 1}\n```";
        assert_eq!(strip_code_fences(input), "```\n{\"a\": 1}");
    }
}
