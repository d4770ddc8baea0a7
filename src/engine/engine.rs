use crossbeam_channel::{Receiver, Sender};

use crate::engine::protocol::{EngineCommand, EngineResponse};
use crate::engine::story_client::StoryBackend;

/// Worker that owns the story backend and serves one request at a time.
pub struct Engine<B> {
    rx: Receiver<EngineCommand>,
    tx: Sender<EngineResponse>,
    backend: B,
}

impl<B: StoryBackend> Engine<B> {
    pub fn new(rx: Receiver<EngineCommand>, tx: Sender<EngineResponse>, backend: B) -> Self {
        Self { rx, tx, backend }
    }

    pub fn run(&mut self) {
        while let Ok(cmd) = self.rx.recv() {
            match cmd {
                EngineCommand::Generate { kind, request } => {
                    tracing::debug!(
                        ?kind,
                        has_session = request.session_id.is_some(),
                        "sending story request"
                    );

                    let result = self.backend.generate(&request);
                    match &result {
                        Ok(reply) => tracing::info!(
                            ?kind,
                            chars = reply.text.len(),
                            has_character = reply.character.is_some(),
                            "story request completed"
                        ),
                        Err(err) => tracing::warn!(?kind, "story request failed: {err}"),
                    }

                    if self
                        .tx
                        .send(EngineResponse::Generated { kind, result })
                        .is_err()
                    {
                        break;
                    }
                }
            }
        }

        tracing::debug!("story engine stopped");
    }
}
