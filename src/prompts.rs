//! Prompt templates rendered with Tera.
//!
//! Templates are compiled into the binary and autoescaping is off, so the
//! student's code reaches the model exactly as typed.

use tera::{Context, Tera};

use crate::web::models::Problem;

const TUTOR_SYSTEM: &str = "tutor_system.txt";
const GENERATE_PROBLEM: &str = "generate_problem.txt";

pub struct PromptBuilder {
    tera: Tera,
}

impl PromptBuilder {
    pub fn new() -> tera::Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            (TUTOR_SYSTEM, include_str!("../templates/tutor_system.txt")),
            (GENERATE_PROBLEM, include_str!("../templates/generate_problem.txt")),
        ])?;
        tera.autoescape_on(vec![]);
        Ok(Self { tera })
    }

    /// System message for the Socratic tutor, embedding the problem and code.
    pub fn system_prompt(&self, problem: &Problem, code: &str) -> tera::Result<String> {
        let mut context = Context::new();
        context.insert("title", &problem.title);
        context.insert("description", &problem.description);
        context.insert("examples", &problem.examples);
        context.insert("code", code);
        self.tera.render(TUTOR_SYSTEM, &context)
    }

    /// Instruction asking the model for a new problem as a JSON object.
    pub fn generation_prompt(&self, difficulty: &str, category: &str) -> tera::Result<String> {
        let mut context = Context::new();
        context.insert("difficulty", difficulty);
        context.insert("category", category);
        self.tera.render(GENERATE_PROBLEM, &context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::models::Example;

    fn problem(examples: Vec<Example>) -> Problem {
        Problem {
            title: "Two Sum".into(),
            description: "Find two numbers that add up to target.".into(),
            difficulty: Some("Easy".into()),
            category: None,
            examples,
        }
    }

    fn example(input: &str, output: &str) -> Example {
        Example {
            input: input.into(),
            output: output.into(),
        }
    }

    #[test]
    fn examples_are_numbered_from_one_in_order() {
        let prompts = PromptBuilder::new().unwrap();
        let prompt = prompts
            .system_prompt(
                &problem(vec![
                    example("nums = [2,7,11,15], target = 9", "[0,1]"),
                    example("nums = [3,2,4], target = 6", "[1,2]"),
                ]),
                "def two_sum(nums, target):\n    pass",
            )
            .unwrap();

        let first = prompt
            .find("  Example 1: Input: nums = [2,7,11,15], target = 9 → Output: [0,1]\n")
            .expect("first example line");
        let second = prompt
            .find("  Example 2: Input: nums = [3,2,4], target = 6 → Output: [1,2]\n")
            .expect("second example line");
        assert!(first < second);
        assert!(prompt.contains("Examples:\n"));
        assert_eq!(prompt.matches("Example ").count(), 2);
    }

    #[test]
    fn empty_examples_leave_no_example_block() {
        let prompts = PromptBuilder::new().unwrap();
        let prompt = prompts.system_prompt(&problem(vec![]), "").unwrap();
        assert!(!prompt.contains("Example"));
        assert!(prompt.contains("Title: Two Sum\n"));
        assert!(prompt.contains("Description: Find two numbers that add up to target.\n"));
    }

    #[test]
    fn system_prompt_ends_without_trailing_newline() {
        let prompts = PromptBuilder::new().unwrap();
        let prompt = prompts.system_prompt(&problem(vec![]), "").unwrap();
        assert!(prompt.ends_with("Do not provide code solutions."));
        let generation = prompts.generation_prompt("Easy", "Arrays").unwrap();
        assert!(generation.ends_with("no other text."));
    }

    #[test]
    fn code_is_embedded_verbatim_inside_fence() {
        let prompts = PromptBuilder::new().unwrap();
        let code = "if a < b and \"x\" != '{{ y }}':\n    print(a & b)";
        let prompt = prompts.system_prompt(&problem(vec![]), code).unwrap();
        assert!(prompt.contains(&format!("```python\n{code}\n```")));
        assert!(!prompt.contains("&lt;"));
    }

    #[test]
    fn generation_prompt_names_difficulty_and_category() {
        let prompts = PromptBuilder::new().unwrap();
        let prompt = prompts.generation_prompt("Hard", "Graphs").unwrap();
        assert!(prompt.contains("- Difficulty: Hard\n"));
        assert!(prompt.contains("- Category: Graphs\n"));
        assert!(prompt.contains("\"difficulty\": \"Hard\""));
        let fields = [
            "title",
            "description",
            "category",
            "estimatedTime",
            "examples",
            "starterCode",
        ];
        for field in fields {
            assert!(prompt.contains(&format!("\"{field}\"")), "missing {field}");
        }
    }
}
