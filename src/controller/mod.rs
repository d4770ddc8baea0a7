//! UI-thread side of the request cycle: owns the conversation, dispatches
//! requests to the engine worker and applies completed results.

use std::thread;
use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender, TryRecvError};

use crate::engine::engine::Engine;
use crate::engine::error::StoryError;
use crate::engine::protocol::{EngineCommand, EngineResponse, RequestKind};
use crate::engine::story_client::{StoryBackend, StoryReply, StoryRequest};
use crate::model::conversation::Conversation;

pub struct ConversationController {
    state: Conversation,
    cmd_tx: Sender<EngineCommand>,
    resp_rx: Receiver<EngineResponse>,
    in_flight: Option<RequestKind>,
}

const ENGINE_GONE: &str = "Story engine is not running";

impl ConversationController {
    /// Starts the engine worker thread around `backend`.
    pub fn spawn<B>(backend: B) -> Self
    where
        B: StoryBackend + Send + 'static,
    {
        let (cmd_tx, cmd_rx) = unbounded();
        let (resp_tx, resp_rx) = unbounded();

        thread::spawn(move || {
            let mut engine = Engine::new(cmd_rx, resp_tx, backend);
            engine.run();
        });

        Self {
            state: Conversation::default(),
            cmd_tx,
            resp_rx,
            in_flight: None,
        }
    }

    pub fn state(&self) -> &Conversation {
        &self.state
    }

    /// Requests the opening of the story. Returns whether a request went out.
    pub fn start(&mut self) -> bool {
        match self.state.begin_bootstrap() {
            Some(request) => {
                self.dispatch(RequestKind::Bootstrap, request);
                true
            }
            None => false,
        }
    }

    /// Sends one player message. Blank input and input while busy are ignored.
    pub fn submit(&mut self, text: &str) -> bool {
        match self.state.begin_submit(text) {
            Some(request) => {
                self.dispatch(RequestKind::Submit, request);
                true
            }
            None => {
                tracing::debug!(busy = self.state.is_busy(), "submit ignored");
                false
            }
        }
    }

    /// Throws the current story away and bootstraps a fresh one.
    pub fn restart(&mut self) -> bool {
        if self.state.is_busy() {
            return false;
        }

        self.state.reset();
        self.start()
    }

    /// Applies every response that has arrived. Returns how many were applied.
    /// A worker that died with a request outstanding counts as that request failing.
    pub fn poll(&mut self) -> usize {
        let mut applied = 0;
        loop {
            match self.resp_rx.try_recv() {
                Ok(resp) => {
                    self.apply(resp);
                    applied += 1;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if self.fail_in_flight() {
                        applied += 1;
                    }
                    break;
                }
            }
        }
        applied
    }

    /// Blocks for at most `timeout` waiting for one response and applies it.
    pub fn wait(&mut self, timeout: Duration) -> bool {
        match self.resp_rx.recv_timeout(timeout) {
            Ok(resp) => {
                self.apply(resp);
                true
            }
            Err(RecvTimeoutError::Timeout) => false,
            Err(RecvTimeoutError::Disconnected) => self.fail_in_flight(),
        }
    }

    fn dispatch(&mut self, kind: RequestKind, request: StoryRequest) {
        self.in_flight = Some(kind);
        if self
            .cmd_tx
            .send(EngineCommand::Generate { kind, request })
            .is_err()
        {
            tracing::error!(?kind, "story engine is not running");
            self.finish(kind, Err(StoryError::Network(ENGINE_GONE.to_string())));
        }
    }

    fn fail_in_flight(&mut self) -> bool {
        match self.in_flight {
            Some(kind) => {
                tracing::error!(?kind, "story engine stopped with a request outstanding");
                self.finish(kind, Err(StoryError::Network(ENGINE_GONE.to_string())));
                true
            }
            None => false,
        }
    }

    fn apply(&mut self, resp: EngineResponse) {
        match resp {
            EngineResponse::Generated { kind, result } => self.finish(kind, result),
        }
    }

    fn finish(&mut self, kind: RequestKind, result: Result<StoryReply, StoryError>) {
        self.in_flight = None;
        match kind {
            RequestKind::Bootstrap => {
                self.state.finish_bootstrap(result);
                tracing::info!(session = ?self.state.session_id(), "story bootstrapped");
            }
            RequestKind::Submit => self.state.finish_submit(result),
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
