//! Sentence correction agent

use super::client::TextGenerator;

pub const CORRECTOR_INSTRUCTION: &str = "You are an expert English corrector.\n\
Given a user's sentence, return a corrected plain-text version and a brief 'What to improve' note.\n\
Output TWO labeled sections (plain text only) exactly as shown below, and do NOT suggest or pick any phrase to learn:\n\
Corrected context: <the corrected sentence>\n\
What to improve: <one-line note about grammar/word choice/phrasing>\n\
Do NOT include the user's original raw sentence or any phrase suggestions.";

/// Corrects a learner's sentence and notes what to improve
pub struct CorrectorAgent<G> {
    generator: G,
}

impl<G: TextGenerator> CorrectorAgent<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    /// Corrector output, or `"Error in Corrector Agent: <e>"` on failure
    pub fn correct(&self, user_text: &str) -> String {
        match self.generator.generate(CORRECTOR_INSTRUCTION, user_text) {
            Ok(text) => text,
            Err(e) => {
                log::error!("Corrector generation failed: {}", e);
                format!("Error in Corrector Agent: {}", e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tutor::testing::ScriptedGenerator;

    #[test]
    fn test_correct_passes_sentence_through() {
        let generator = ScriptedGenerator::new(vec![Ok(
            "Corrected context: I was exhausted.\nWhat to improve: word choice".to_string(),
        )]);
        let agent = CorrectorAgent::new(&generator);

        let output = agent.correct("I was very tired");
        assert!(output.starts_with("Corrected context: I was exhausted."));

        let calls = generator.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, CORRECTOR_INSTRUCTION);
        assert_eq!(calls[0].1, "I was very tired");
    }

    #[test]
    fn test_failure_becomes_labeled_string() {
        let generator = ScriptedGenerator::new(vec![Err("quota exceeded".to_string())]);
        let agent = CorrectorAgent::new(&generator);
        assert_eq!(
            agent.correct("hello"),
            "Error in Corrector Agent: API error: 500 - quota exceeded"
        );
    }
}
