use crate::utils::error::{BotError, Result};

pub const QUESTION_PLACEHOLDER: &str = "{question}";

pub const DEFAULT_TEMPLATE: &str = "You are an experienced, supportive career coach.

Guidelines:
- Give practical, specific advice the person can act on this week.
- Keep the answer focused and well structured; use short headers, bullet points or numbered steps where they help.
- If the question is outside career topics, say so briefly and steer back to careers.
- Be honest about trade-offs and never invent facts about companies or salaries.

Question: \"{question}\"";

/// Instruction template wrapped around every question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    template: String,
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
        }
    }
}

impl PromptTemplate {
    pub fn new(template: impl Into<String>) -> Result<Self> {
        let template = template.into();
        if !template.contains(QUESTION_PLACEHOLDER) {
            return Err(BotError::InvalidConfigValueError {
                field: "prompt.template".to_string(),
                value: template,
                reason: format!("Template must contain {}", QUESTION_PLACEHOLDER),
            });
        }
        Ok(Self { template })
    }

    pub fn build(&self, question: &str) -> String {
        self.template.replace(QUESTION_PLACEHOLDER, question)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template_embeds_question() {
        let prompt = PromptTemplate::default().build("How do I ask for a raise?");
        assert!(prompt.starts_with("You are an experienced, supportive career coach."));
        assert!(prompt.ends_with("Question: \"How do I ask for a raise?\""));
    }

    #[test]
    fn test_template_requires_placeholder() {
        assert!(PromptTemplate::new("Answer this").is_err());
        let template = PromptTemplate::new("Q: {question}").unwrap();
        assert_eq!(template.build("why?"), "Q: why?");
    }
}
