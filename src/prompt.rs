use crate::types::AlgorithmRequest;

/// Languages that get the dynamic-typing framing. Matched case-insensitively
/// so free-form CLI input like "python" still triggers it.
const DYNAMIC_LANGUAGES: [&str; 2] = ["Python", "JavaScript"];

const DYNAMIC_TYPING_CLAUSE: &str = "Explain the algorithm, *emphasizing how dynamic typing \
     affects the implementation.* Specifically, discuss how the lack of compile-time type \
     checking influences the design and how you would handle potential type errors at runtime.\n";

const DYNAMIC_EXAMPLES_CLAUSE: &str = "When providing examples, make them valid Python or \
     JavaScript snippets that illustrate dynamic typing (assigning different types to the same \
     variable, checking types at runtime), and explicitly state that the explanation assumes a \
     dynamically-typed approach.\n";

const CLOSING_CLAUSES: &str = "Provide a step-by-step explanation of the algorithm. Do NOT \
     provide any actual code. Focus on the logic and steps involved. Only give the algorithm. \
     If the question is beyond coding algorithms, say that it is beyond your limits. Organize \
     the explanation into clear sections with headings and subheadings. Use concise language \
     and avoid unnecessary jargon. For each step, provide a concise example illustrating that \
     step; keep examples tied to the explanation rather than inventing unrelated ones.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltPrompt {
    pub text: String,
    pub dynamic_typing: bool,
}

pub fn wants_dynamic_typing(language: &str) -> bool {
    DYNAMIC_LANGUAGES
        .iter()
        .any(|l| l.eq_ignore_ascii_case(language.trim()))
}

/// Deterministically assembles the instruction prompt for one turn. No input
/// validation: an empty problem description is forwarded as-is.
pub fn build_algorithm_prompt(req: &AlgorithmRequest) -> BuiltPrompt {
    let mut text = format!(
        "Explain the algorithm to solve the following coding problem:\n\n{}\n\n",
        req.problem_description
    );

    let language = req.target_language.trim();
    let any_language = language.is_empty() || language.eq_ignore_ascii_case("any");
    if !any_language {
        text.push_str(&format!(
            "Explain it in terms of concepts relevant to {language}.\n"
        ));
    }

    let dynamic_typing = wants_dynamic_typing(language);
    if dynamic_typing {
        text.push_str(DYNAMIC_TYPING_CLAUSE);
        text.push_str(DYNAMIC_EXAMPLES_CLAUSE);
    } else {
        text.push_str("Explain the algorithm.\n");
    }

    text.push_str(CLOSING_CLAUSES);
    BuiltPrompt {
        text,
        dynamic_typing,
    }
}

#[cfg(test)]
mod tests {
    use super::{build_algorithm_prompt, wants_dynamic_typing};
    use crate::types::AlgorithmRequest;

    #[test]
    fn any_language_gets_no_language_clause_and_no_flag() {
        let built = build_algorithm_prompt(&AlgorithmRequest::new("reverse a linked list"));
        assert!(!built.dynamic_typing);
        assert!(!built.text.contains("dynamic typing"));
        assert!(!built.text.contains("concepts relevant to"));
        assert!(built.text.contains("reverse a linked list"));
        assert!(built.text.contains("Do NOT provide any actual code"));
    }

    #[test]
    fn statically_typed_language_gets_language_clause_only() {
        let built = build_algorithm_prompt(
            &AlgorithmRequest::new("two-sum with a hash map").with_language("Rust"),
        );
        assert!(!built.dynamic_typing);
        assert!(built.text.contains("concepts relevant to Rust"));
        assert!(!built.text.contains("dynamic typing"));
    }

    #[test]
    fn python_sets_flag_and_adds_dynamic_typing_clause() {
        let built =
            build_algorithm_prompt(&AlgorithmRequest::new("merge intervals").with_language("Python"));
        assert!(built.dynamic_typing);
        assert!(built.text.contains("dynamic typing"));
        assert!(built.text.contains("concepts relevant to Python"));
    }

    #[test]
    fn javascript_match_is_case_insensitive() {
        assert!(wants_dynamic_typing("javascript"));
        assert!(wants_dynamic_typing("  JavaScript "));
        assert!(!wants_dynamic_typing("Java"));
        assert!(!wants_dynamic_typing("TypeScript"));
    }

    #[test]
    fn empty_problem_description_is_forwarded() {
        let built = build_algorithm_prompt(&AlgorithmRequest::new(""));
        assert!(built
            .text
            .starts_with("Explain the algorithm to solve the following coding problem:"));
    }

    #[test]
    fn building_is_deterministic() {
        let req = AlgorithmRequest::new("binary search").with_language("JavaScript");
        assert_eq!(build_algorithm_prompt(&req), build_algorithm_prompt(&req));
    }
}
