//! In-process parser for Miller notation.
//!
//! Mirrors the parsing service so the viewer can run without it:
//! `(hkl)` is a plane, `[uvw]` a direction. Output is a [`ParseResponse`]
//! so it goes through the same validation as a service reply.

use thiserror::Error;

use crate::record::{IndexRecord, ParseError, ParseResponse};

/// Intercept used on axes the plane never crosses.
pub const PARALLEL_INTERCEPT: f64 = 0.5;

/// Notation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NotationError {
    #[error(
        "Invalid format. Use parentheses for planes (e.g., (100)) or brackets for directions (e.g., [111])."
    )]
    UnknownBrackets,

    #[error("No valid indices found")]
    NoIndices,

    #[error("Invalid index '{0}'")]
    InvalidIndex(String),
}

impl From<NotationError> for ParseError {
    fn from(e: NotationError) -> Self {
        ParseError::Notation(e.to_string())
    }
}

/// Parser for `(hkl)` / `[uvw]` text.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotationParser;

impl NotationParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse into the service wire format.
    pub fn parse_response(&self, input: &str) -> Result<ParseResponse, NotationError> {
        let input = input.trim();

        if let Some(content) = strip_brackets(input, '(', ')') {
            let indices = parse_indices(content)?;
            let intercept = indices
                .iter()
                .map(|&v| if v != 0.0 { 1.0 / v } else { PARALLEL_INTERCEPT })
                .collect();
            Ok(ParseResponse {
                kind: "plane".to_string(),
                indices,
                intercept: Some(intercept),
            })
        } else if let Some(content) = strip_brackets(input, '[', ']') {
            Ok(ParseResponse {
                kind: "direction".to_string(),
                indices: parse_indices(content)?,
                intercept: None,
            })
        } else {
            Err(NotationError::UnknownBrackets)
        }
    }

    /// Parse and validate into a record.
    pub fn parse(&self, input: &str) -> Result<IndexRecord, ParseError> {
        let response = self.parse_response(input)?;
        tracing::debug!(?response, "parsed notation locally");
        IndexRecord::try_from(response)
    }
}

fn strip_brackets(input: &str, open: char, close: char) -> Option<&str> {
    input.strip_prefix(open)?.strip_suffix(close)
}

fn parse_indices(content: &str) -> Result<Vec<f64>, NotationError> {
    let separated = content.contains(|c: char| c == ',' || c.is_whitespace());
    let indices = if separated {
        parse_separated(content)?
    } else {
        parse_compact(content)
    };
    if indices.is_empty() {
        return Err(NotationError::NoIndices);
    }
    Ok(indices)
}

/// `1, -1, 10` or `1 -1 10`: signed integers of any width.
fn parse_separated(content: &str) -> Result<Vec<f64>, NotationError> {
    content
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<i32>()
                .map(f64::from)
                .map_err(|_| NotationError::InvalidIndex(token.to_string()))
        })
        .collect()
}

/// `1-10`: one digit per index. A `-` negates the character after it, which
/// is consumed whether or not it is a digit; anything else is skipped.
fn parse_compact(content: &str) -> Vec<f64> {
    let mut indices = Vec::new();
    let mut chars = content.chars();
    while let Some(c) = chars.next() {
        let (sign, c) = match c {
            '-' => match chars.next() {
                Some(next) => (-1.0, next),
                None => break,
            },
            c => (1.0, c),
        };
        if let Some(digit) = c.to_digit(10) {
            indices.push(sign * f64::from(digit));
        }
    }
    indices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::IndexKind;
    use glam::Vec3;

    #[test]
    fn test_plane_100() {
        let record = NotationParser::new().parse("(100)").unwrap();
        assert_eq!(record.kind, IndexKind::Plane);
        assert_eq!(record.indices, Vec3::X);
        assert_eq!(record.intercept, Some(Vec3::new(1.0, 0.5, 0.5)));
    }

    #[test]
    fn test_negative_direction() {
        let record = NotationParser::new().parse(" [1-11] ").unwrap();
        assert_eq!(record.kind, IndexKind::Direction);
        assert_eq!(record.indices, Vec3::new(1.0, -1.0, 1.0));
        assert_eq!(record.intercept, None);
    }

    #[test]
    fn test_separated_form() {
        let record = NotationParser::new().parse("(2, -1, 10)").unwrap();
        assert_eq!(record.indices, Vec3::new(2.0, -1.0, 10.0));
        assert_eq!(record.intercept, Some(Vec3::new(0.5, -1.0, 0.1)));

        let record = NotationParser::new().parse("[1 1 0]").unwrap();
        assert_eq!(record.indices, Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_plane_intercepts() {
        let response = NotationParser::new().parse_response("(2-20)").unwrap();
        assert_eq!(response.indices, vec![2.0, -2.0, 0.0]);
        assert_eq!(response.intercept, Some(vec![0.5, -0.5, 0.5]));
    }

    #[test]
    fn test_dash_consumes_following_character() {
        let parser = NotationParser::new();
        assert_eq!(parser.parse_response("(1--1)").unwrap().indices, vec![1.0, 1.0]);
        assert_eq!(
            parser.parse_response("[-a-12]").unwrap().indices,
            vec![-1.0, 2.0]
        );
        assert_eq!(parser.parse_response("[10-]").unwrap().indices, vec![1.0, 0.0]);
        assert_eq!(parser.parse_response("[-]"), Err(NotationError::NoIndices));
    }

    #[test]
    fn test_rejections() {
        let parser = NotationParser::new();
        assert_eq!(
            parser.parse_response("111"),
            Err(NotationError::UnknownBrackets)
        );
        assert_eq!(parser.parse_response("()"), Err(NotationError::NoIndices));
        assert_eq!(parser.parse_response("[abc]"), Err(NotationError::NoIndices));
        assert!(matches!(
            parser.parse_response("(1, x, 0)"),
            Err(NotationError::InvalidIndex(_))
        ));
    }

    #[test]
    fn test_wrong_count_is_malformed() {
        let parser = NotationParser::new();
        assert!(parser.parse_response("(11)").is_ok());
        assert!(matches!(parser.parse("(11)"), Err(ParseError::Malformed(_))));
        assert!(matches!(parser.parse("[1111]"), Err(ParseError::Malformed(_))));
    }

    #[test]
    fn test_zero_vector_parses() {
        let record = NotationParser::new().parse("[000]").unwrap();
        assert_eq!(record.indices, Vec3::ZERO);
    }
}
