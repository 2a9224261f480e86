//! In-process parser.

use std::collections::VecDeque;

use tracing::debug;

use miller_core::{NotationParser, SubmissionId};

use super::{ParseDispatcher, ParseReply};

/// Parses immediately with [`NotationParser`] and queues the reply so it is
/// delivered through `poll` like a remote one.
#[derive(Debug, Default)]
pub struct LocalParser {
    parser: NotationParser,
    pending: VecDeque<ParseReply>,
}

impl LocalParser {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ParseDispatcher for LocalParser {
    fn dispatch(&mut self, id: SubmissionId, input: &str) {
        let result = self.parser.parse(input);
        debug!("Parsed {} locally: {:?}", id, result);
        self.pending.push_back(ParseReply { id, result });
    }

    fn poll(&mut self) -> Vec<ParseReply> {
        self.pending.drain(..).collect()
    }

    fn describe(&self) -> String {
        "Local parser".to_string()
    }
}
