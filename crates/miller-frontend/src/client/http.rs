//! Parsing service client.

use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use tracing::{debug, warn};

use miller_core::{IndexRecord, ParseError, ParseRequest, ParseResponse, SubmissionId};

use super::{ParseDispatcher, ParseReply};
use crate::config::ParserConfig;

/// Sends each submission to the parsing service on its own worker thread.
///
/// In-flight requests are never cancelled; their replies are simply ignored
/// once a newer submission exists.
pub struct HttpParser {
    agent: ureq::Agent,
    endpoint: String,
    sender: Sender<ParseReply>,
    receiver: Receiver<ParseReply>,
}

impl HttpParser {
    pub fn new(config: &ParserConfig) -> Self {
        let agent_config = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_secs.max(1))))
            .http_status_as_error(false)
            .build();
        let (sender, receiver) = mpsc::channel();

        Self {
            agent: ureq::Agent::new_with_config(agent_config),
            endpoint: config.endpoint.clone(),
            sender,
            receiver,
        }
    }
}

impl ParseDispatcher for HttpParser {
    fn dispatch(&mut self, id: SubmissionId, input: &str) {
        let agent = self.agent.clone();
        let endpoint = self.endpoint.clone();
        let sender = self.sender.clone();
        let request = ParseRequest {
            input: input.to_string(),
        };

        debug!("Dispatching {} to {}", id, endpoint);
        std::thread::spawn(move || {
            let result = post(&agent, &endpoint, &request);
            if sender.send(ParseReply { id, result }).is_err() {
                debug!("Reply for {} dropped, viewport is gone", id);
            }
        });
    }

    fn poll(&mut self) -> Vec<ParseReply> {
        self.receiver.try_iter().collect()
    }

    fn describe(&self) -> String {
        format!("HTTP {}", self.endpoint)
    }
}

fn post(agent: &ureq::Agent, endpoint: &str, request: &ParseRequest) -> Result<IndexRecord, ParseError> {
    let mut response = agent.post(endpoint).send_json(request).map_err(|e| {
        warn!("Parser request failed: {}", e);
        ParseError::Transport(e.to_string())
    })?;

    let status = response.status().as_u16();
    let body = response
        .body_mut()
        .read_to_string()
        .map_err(|e| ParseError::Transport(e.to_string()))?;

    decode_response(status, &body)
}

/// Turn a status and body into a validated record.
///
/// Any non-2xx status is a rejection whose reason is the body text.
pub fn decode_response(status: u16, body: &str) -> Result<IndexRecord, ParseError> {
    if !(200..300).contains(&status) {
        return Err(ParseError::Rejected {
            status,
            message: body.trim().to_string(),
        });
    }
    IndexRecord::try_from(ParseResponse::from_json(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use miller_core::IndexKind;

    #[test]
    fn test_decode_plane() {
        let body = r#"{"type":"plane","indices":[1,0,0],"intercept":[1,0,0]}"#;
        let record = decode_response(200, body).unwrap();
        assert_eq!(record.kind, IndexKind::Plane);
        assert_eq!(record.indices, Vec3::X);
        assert_eq!(record.intercept, Some(Vec3::X));
    }

    #[test]
    fn test_decode_direction_with_null_intercept() {
        let body = r#"{"type":"direction","indices":[1,1,1],"intercept":null}"#;
        let record = decode_response(200, body).unwrap();
        assert_eq!(record.kind, IndexKind::Direction);
        assert_eq!(record.intercept, None);
    }

    #[test]
    fn test_non_success_status_is_rejected() {
        let err = decode_response(400, "Invalid notation\n").unwrap_err();
        assert_eq!(
            err,
            ParseError::Rejected {
                status: 400,
                message: "Invalid notation".to_string()
            }
        );
    }

    #[test]
    fn test_garbage_body_is_malformed() {
        assert!(matches!(
            decode_response(200, "<html>"),
            Err(ParseError::Malformed(_))
        ));
        assert!(matches!(
            decode_response(200, r#"{"type":"plane","indices":[1,0],"intercept":[1,0,0]}"#),
            Err(ParseError::Malformed(_))
        ));
    }

    #[test]
    fn test_unreachable_endpoint_reports_transport() {
        let config = ParserConfig {
            endpoint: "http://127.0.0.1:9/api/parse".to_string(),
            timeout_secs: 1,
            ..Default::default()
        };
        let mut parser = HttpParser::new(&config);
        let mut sequencer = miller_core::SubmissionSequencer::new();
        let id = sequencer.next();
        parser.dispatch(id, "(100)");

        let deadline = std::time::Instant::now() + Duration::from_secs(10);
        let mut replies = Vec::new();
        while replies.is_empty() && std::time::Instant::now() < deadline {
            replies = parser.poll();
            std::thread::sleep(Duration::from_millis(10));
        }
        assert_eq!(replies.len(), 1);
        assert_eq!(replies[0].id, id);
        assert!(matches!(replies[0].result, Err(ParseError::Transport(_))));
    }
}
