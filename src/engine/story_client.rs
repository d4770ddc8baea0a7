use std::time::Duration;

use anyhow::Context;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::engine::error::StoryError;
use crate::model::character::Character;

/// Body of the one request the story service understands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoryRequest {
    pub prompt: String,
    pub session_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StoryResponse {
    #[serde(default)]
    pub generated_text: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub character: Option<Character>,
}

/// A validated, successful reply.
#[derive(Debug, Clone, PartialEq)]
pub struct StoryReply {
    pub text: String,
    pub session_id: Option<String>,
    pub character: Option<Character>,
}

impl TryFrom<StoryResponse> for StoryReply {
    type Error = StoryError;

    fn try_from(resp: StoryResponse) -> Result<Self, Self::Error> {
        let text = match resp.generated_text {
            Some(text) if !text.is_empty() => text,
            _ => return Err(StoryError::MissingText),
        };

        Ok(Self {
            text,
            session_id: resp.session_id,
            character: resp.character,
        })
    }
}

/// Anything that can turn a prompt into the next piece of the story.
pub trait StoryBackend {
    fn generate(&self, request: &StoryRequest) -> Result<StoryReply, StoryError>;
}

pub struct HttpStoryClient {
    client: Client,
    endpoint: String,
}

impl HttpStoryClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

impl StoryBackend for HttpStoryClient {
    fn generate(&self, request: &StoryRequest) -> Result<StoryReply, StoryError> {
        let resp = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .map_err(|e| StoryError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(StoryError::Http {
                status: status.as_u16(),
            });
        }

        let body = resp
            .json::<StoryResponse>()
            .map_err(|e| StoryError::Decode(e.to_string()))?;

        StoryReply::try_from(body)
    }
}

#[cfg(test)]
#[path = "tests/story_client_tests.rs"]
mod tests;
