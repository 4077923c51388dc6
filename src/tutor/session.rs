//! End-to-end tutoring flow: correct, pick a phrase, teach, store

use serde::Serialize;
use thiserror::Error;

use super::client::TextGenerator;
use super::corrector::CorrectorAgent;
use super::teacher::TeacherAgent;
use crate::corrector::{LooseTargetFinder, TeachingTargetResolver};
use crate::memory::PhraseStore;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("No sentence provided")]
    EmptySentence,
}

/// Everything produced for one submitted sentence
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitOutcome {
    pub corrector_output: String,
    pub corrector_html: String,
    /// Phrase that was taught
    pub phrase: String,
    pub lesson_text: String,
    pub lesson_html: Option<String>,
}

/// Corrector output as HTML: markup escaped, emphasis asterisks removed,
/// newlines as `<br>`
pub fn corrector_html(output: &str) -> String {
    html_escape::encode_text(output)
        .replace('*', "")
        .replace('\n', "<br>")
}

/// Drives the corrector and teacher agents for a learner
pub struct TutorSession<G> {
    corrector: CorrectorAgent<G>,
    teacher: TeacherAgent<G>,
    targets: TeachingTargetResolver,
    loose: LooseTargetFinder,
}

impl<G: TextGenerator + Clone> TutorSession<G> {
    pub fn new(generator: G) -> Self {
        Self {
            corrector: CorrectorAgent::new(generator.clone()),
            teacher: TeacherAgent::new(generator),
            targets: TeachingTargetResolver::new(),
            loose: LooseTargetFinder::new(),
        }
    }
}

impl<G: TextGenerator> TutorSession<G> {
    pub fn corrector(&self) -> &CorrectorAgent<G> {
        &self.corrector
    }

    pub fn teacher(&self) -> &TeacherAgent<G> {
        &self.teacher
    }

    /// Correct `sentence`, teach the phrase suggested for it and store the
    /// lesson
    pub fn submit(&self, store: &mut PhraseStore, sentence: &str) -> Result<SubmitOutcome, SessionError> {
        let sentence = sentence.trim();
        if sentence.is_empty() {
            return Err(SessionError::EmptySentence);
        }

        let corrector_output = self.corrector.correct(sentence);

        let (phrase, context) = match self.targets.resolve(&corrector_output) {
            Some(target) => {
                log::debug!("Teaching target from rule '{}': {}", target.rule, target.phrase);
                (target.phrase, target.context)
            }
            None => {
                log::info!("No teaching target in corrector output, using loose detection");
                (
                    self.loose.phrase(&corrector_output).unwrap_or_default(),
                    self.loose.context(&corrector_output),
                )
            }
        };
        let context = if context.trim().is_empty() {
            sentence.to_string()
        } else {
            context
        };

        let (lesson_text, lesson_html) = self.teacher.teach(store, &phrase, &context);

        // A failed lesson was not stored, so there is nothing to look up
        let final_phrase = match lesson_html.as_deref() {
            Some(html) => {
                let canonical = self
                    .teacher
                    .parser()
                    .phrases()
                    .resolve_from_lesson(&lesson_text, html);
                let stored = store.locate(canonical.as_deref().unwrap_or_default(), &phrase, Some(&context));
                canonical
                    .or_else(|| stored.map(|r| r.phrase.clone()))
                    .unwrap_or(phrase)
            }
            None => phrase,
        };

        Ok(SubmitOutcome {
            corrector_html: corrector_html(&corrector_output),
            corrector_output,
            phrase: final_phrase,
            lesson_text,
            lesson_html,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryBackend;
    use crate::tutor::testing::ScriptedGenerator;

    const LESSON: &str = "What to improve: word choice\n\
                          Phrase to learn: <<burned out>>\n\
                          Definition: exhausted from overwork\n\
                          Examples:\n\
                          I'm burned out after this week.\n\
                          He got burned out at his last job.";

    fn empty_store() -> PhraseStore {
        PhraseStore::with_backend(Box::new(InMemoryBackend::default()))
    }

    #[test]
    fn test_submit_with_suggestion_block() {
        let generator = ScriptedGenerator::new(vec![
            Ok("I am **very** tired of work.\n---\nPhrase to learn: <<burned out>>\nDefinition: exhausted".to_string()),
            Ok(LESSON.to_string()),
        ]);
        let session = TutorSession::new(&generator);
        let mut store = empty_store();

        let outcome = session.submit(&mut store, "  I am very tired from work ").unwrap();

        assert_eq!(outcome.phrase, "burned out");
        assert!(outcome.lesson_text.contains("Phrase to learn: <<burned out>>"));
        assert!(outcome.lesson_html.is_some());
        assert_eq!(
            outcome.corrector_html,
            "I am very tired of work.<br>---<br>Phrase to learn: &lt;&lt;burned out&gt;&gt;<br>Definition: exhausted"
        );

        let calls = generator.calls();
        assert_eq!(calls[0].1, "I am very tired from work");
        assert_eq!(
            calls[1].1,
            "Phrase: burned out | Context: I am **very** tired of work."
        );

        let record = store.find("burned out").unwrap();
        assert_eq!(record.corrected_context.as_deref(), Some("I am **very** tired of work."));
        assert_eq!(record.meaning, "exhausted from overwork");
    }

    #[test]
    fn test_submit_loose_fallback() {
        let generator = ScriptedGenerator::new(vec![
            Ok("Corrected context: I went to bed early.\nWhat to improve: try \"hit the sack\"".to_string()),
            Ok("Phrase to learn: <<hit the sack>>\nDefinition: go to bed".to_string()),
        ]);
        let session = TutorSession::new(&generator);
        let mut store = empty_store();

        let outcome = session.submit(&mut store, "I go to bed early").unwrap();
        assert_eq!(outcome.phrase, "hit the sack");
        assert_eq!(
            generator.calls()[1].1,
            "Phrase: hit the sack | Context: I went to bed early."
        );
    }

    #[test]
    fn test_submit_teacher_failure() {
        let generator = ScriptedGenerator::new(vec![
            Ok("Fixed.\n---\nPhrase to learn: <<crash>>".to_string()),
            Err("unavailable".to_string()),
        ]);
        let session = TutorSession::new(&generator);
        let mut store = empty_store();

        let outcome = session.submit(&mut store, "I sleep fast").unwrap();
        assert_eq!(outcome.phrase, "crash");
        assert!(outcome.lesson_text.starts_with("Error in Teacher Agent:"));
        assert!(outcome.lesson_html.is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_empty_sentence_rejected() {
        let generator = ScriptedGenerator::new(vec![]);
        let session = TutorSession::new(&generator);
        let mut store = empty_store();
        assert_eq!(
            session.submit(&mut store, "   "),
            Err(SessionError::EmptySentence)
        );
        assert!(generator.calls().is_empty());
    }
}
