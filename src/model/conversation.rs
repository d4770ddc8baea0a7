use crate::engine::error::StoryError;
use crate::engine::story_client::{StoryReply, StoryRequest};
use crate::model::character::Character;
use crate::model::message::Turn;

pub const BOOTSTRAP_PROMPT: &str = "I want to start a new adventure story.";
pub const APOLOGY: &str = "Sorry, I encountered an error. Please try again.";

/// Everything the chat window shows.
///
/// Requests are split into a `begin_*` half that mutates state and hands back
/// the request to send, and a `finish_*` half that applies the outcome. At most
/// one request is outstanding: every `begin_*` is a no-op while `busy`.
#[derive(Debug, Default)]
pub struct Conversation {
    transcript: Vec<Turn>,
    busy: bool,
    error: Option<String>,
    session_id: Option<String>,
    character: Option<Character>,
}

impl Conversation {
    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    pub fn character(&self) -> Option<&Character> {
        self.character.as_ref()
    }

    pub fn begin_bootstrap(&mut self) -> Option<StoryRequest> {
        if self.busy {
            return None;
        }

        self.busy = true;
        self.error = None;

        Some(StoryRequest {
            prompt: BOOTSTRAP_PROMPT.to_string(),
            session_id: None,
        })
    }

    pub fn finish_bootstrap(&mut self, result: Result<StoryReply, StoryError>) {
        match result {
            Ok(reply) => {
                self.transcript = vec![Turn::assistant(reply.text)];
                if reply.session_id.is_some() {
                    self.session_id = reply.session_id;
                }
                if reply.character.is_some() {
                    self.character = reply.character;
                }
            }
            Err(err) => {
                self.error = Some(err.to_string());
            }
        }

        self.busy = false;
    }

    pub fn begin_submit(&mut self, text: &str) -> Option<StoryRequest> {
        if self.busy || text.trim().is_empty() {
            return None;
        }

        self.busy = true;
        self.error = None;
        self.transcript.push(Turn::user(text));

        Some(StoryRequest {
            prompt: text.to_string(),
            session_id: self.session_id.clone(),
        })
    }

    /// Applies a submit outcome. The reply's session id is deliberately not
    /// captured here; only the bootstrap reply binds the session.
    pub fn finish_submit(&mut self, result: Result<StoryReply, StoryError>) {
        match result {
            Ok(reply) => {
                self.transcript.push(Turn::assistant(reply.text));
                if reply.character.is_some() {
                    self.character = reply.character;
                }
            }
            Err(err) => {
                self.error = Some(err.to_string());
                self.transcript.push(Turn::assistant(APOLOGY));
            }
        }

        self.busy = false;
    }

    /// Drops the whole conversation, including the session binding.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
#[path = "tests/conversation_tests.rs"]
mod tests;
