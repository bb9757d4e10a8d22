//! Prompt templates for the two analysis task kinds.
//!
//! Both builders are pure: deterministic templates embedding the language
//! and the verbatim code. No escaping happens here; the transport layer
//! serializes the prompt into the request body.

/// Build the complexity-analysis prompt.
///
/// Asks the model to structure its answer with Time Complexity,
/// Space Complexity and Explanation sections, which is the shape the
/// field parser looks for.
pub fn complexity_prompt(code: &str, language: &str) -> String {
    format!(
        "Analyze the following {language} code and determine its time complexity and space complexity. \
         Provide a detailed analysis explaining why. \
         Focus on the algorithm's efficiency, not just language-specific details. \
         Identify any nested loops, recursive calls, or other complex structures. \
         Format your response clearly with sections for Time Complexity, Space Complexity, and Explanation. \
         Here's the code:\n\n{code}"
    )
}

/// Build the optimization-suggestions prompt.
pub fn optimization_prompt(code: &str, language: &str) -> String {
    format!(
        "Review the following {language} code and suggest specific optimizations to improve its efficiency. \
         Focus on algorithmic improvements, not just style changes. \
         Explain why each suggestion would improve performance. \
         Include code examples where appropriate. \
         Here's the code:\n\n{code}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complexity_prompt_embeds_language_and_code() {
        let prompt = complexity_prompt("def f():\n    pass", "Python");

        assert!(prompt.contains("the following Python code"));
        assert!(prompt.ends_with("Here's the code:\n\ndef f():\n    pass"));
    }

    #[test]
    fn complexity_prompt_requests_sections() {
        let prompt = complexity_prompt("x", "C");

        assert!(prompt.contains("Time Complexity"));
        assert!(prompt.contains("Space Complexity"));
        assert!(prompt.contains("Explanation"));
    }

    #[test]
    fn optimization_prompt_embeds_language_and_code() {
        let prompt = optimization_prompt("int main() {}", "C++");

        assert!(prompt.contains("the following C++ code"));
        assert!(prompt.ends_with("Here's the code:\n\nint main() {}"));
    }

    #[test]
    fn prompts_are_deterministic() {
        assert_eq!(complexity_prompt("a", "Rust"), complexity_prompt("a", "Rust"));
        assert_eq!(optimization_prompt("a", "Rust"), optimization_prompt("a", "Rust"));
    }

    #[test]
    fn empty_code_still_produces_a_prompt() {
        let prompt = complexity_prompt("", "Java");
        assert!(prompt.ends_with("Here's the code:\n\n"));
    }
}
