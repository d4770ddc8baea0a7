use crate::engine::error::StoryError;
use crate::engine::story_client::{StoryReply, StoryRequest};

/// Which controller operation a request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Bootstrap,
    Submit,
}

pub enum EngineCommand {
    Generate {
        kind: RequestKind,
        request: StoryRequest,
    },
}

pub enum EngineResponse {
    Generated {
        kind: RequestKind,
        result: Result<StoryReply, StoryError>,
    },
}
