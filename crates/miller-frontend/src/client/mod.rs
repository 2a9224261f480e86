//! Parsing collaborators.
//!
//! A submission is handed to a [`ParseDispatcher`] together with its
//! [`SubmissionId`]. Replies come back later through [`ParseDispatcher::poll`],
//! possibly out of order; the viewport decides which ones still matter.

mod http;
mod local;

pub use http::{HttpParser, decode_response};
pub use local::LocalParser;

use miller_core::{IndexRecord, ParseError, SubmissionId};

use crate::config::{ParserConfig, ParserMode};

/// Result of parsing one submission.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseReply {
    pub id: SubmissionId,
    pub result: Result<IndexRecord, ParseError>,
}

/// Non-blocking access to a parser.
pub trait ParseDispatcher {
    /// Start parsing `input`. Must not block the caller.
    fn dispatch(&mut self, id: SubmissionId, input: &str);

    /// Replies that arrived since the last call.
    fn poll(&mut self) -> Vec<ParseReply>;

    /// Short description for the status bar.
    fn describe(&self) -> String;
}

/// Dispatcher for the configured parser mode.
pub fn dispatcher_for(config: &ParserConfig) -> Box<dyn ParseDispatcher> {
    match config.mode {
        ParserMode::Http => Box::new(HttpParser::new(config)),
        ParserMode::Local => Box::new(LocalParser::new()),
    }
}
