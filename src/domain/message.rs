use crate::domain::repository::RepositoryState;

const SUMMARIZE_INSTRUCTIONS: &str = "You are writing the commit message for a set of staged changes in a git repository. \
Describe the changes precisely and specifically; avoid generic statements. \
Keep the message short when the change is simple and go into more detail only when the change is complex. \
The input is the output of git diff. \
Format the message with Markdown, using only dashes - or asterisks *text* for structure. \
Never start a line with the # character and never use code blocks: the message is pasted directly into COMMIT_EDITMSG, where # starts a comment. \
Reply with the commit message and nothing else. \
If the input is unusable or unexpected, reply with no characters at all instead of explaining.";

const POLISH_INSTRUCTIONS: &str = "The text below is a commit message assembled from summaries of separate parts of one diff. \
Merge it into a single cohesive commit message: group related points together, remove repetition, and make it read as one message. \
Format the message with Markdown, using only dashes - or asterisks *text* for structure. \
Never start a line with the # character and never use code blocks. \
Reply with the commit message and nothing else. \
If the input is unusable or unexpected, reply with no characters at all instead of explaining.";

const INITIAL_COMMIT_INSTRUCTIONS: &str = " This is the first commit of the repository. \
Ignore scaffolding, configuration, tooling and other project setup files; describe only the code the author actually wrote.";

/// Prefix placed in front of every user payload sent to the model.
pub const USER_PAYLOAD_PREFIX: &str = "diff:\n";

pub struct Instructions;

impl Instructions {
    pub fn summarize(state: RepositoryState) -> String {
        Self::with_state(SUMMARIZE_INSTRUCTIONS, state)
    }

    pub fn polish(state: RepositoryState) -> String {
        Self::with_state(POLISH_INSTRUCTIONS, state)
    }

    fn with_state(base: &str, state: RepositoryState) -> String {
        if state.initial_commit {
            format!("{base}{INITIAL_COMMIT_INSTRUCTIONS}")
        } else {
            base.to_string()
        }
    }
}

pub fn user_payload(text: &str) -> String {
    format!("{USER_PAYLOAD_PREFIX}{text}")
}

/// Per-chunk summaries joined in chunk order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinedSummary(String);

impl CombinedSummary {
    pub fn join(summaries: &[String]) -> Self {
        Self(summaries.join("\n"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalMessage(pub String);

impl FinalMessage {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_commit_extends_both_instruction_sets() {
        let initial = RepositoryState::new(true);
        let regular = RepositoryState::new(false);

        assert!(Instructions::summarize(initial).starts_with(&Instructions::summarize(regular)));
        assert!(Instructions::summarize(initial).contains("first commit"));
        assert!(Instructions::polish(initial).contains("first commit"));
        assert!(!Instructions::polish(regular).contains("first commit"));
    }

    #[test]
    fn join_keeps_empty_slots() {
        let summaries = vec!["- a".to_string(), String::new(), "- c".to_string()];
        assert_eq!(CombinedSummary::join(&summaries).as_str(), "- a\n\n- c");
    }

    #[test]
    fn all_empty_summaries_join_to_separators() {
        let summaries = vec![String::new(); 3];
        assert_eq!(CombinedSummary::join(&summaries).as_str(), "\n\n");
    }
}
