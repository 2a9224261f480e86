//! Index records and the parser wire format.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// What an index triple describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexKind {
    /// Miller plane `(hkl)`.
    Plane,
    /// Miller direction `[uvw]`.
    Direction,
}

impl IndexKind {
    /// Human readable name.
    pub fn label(self) -> &'static str {
        match self {
            IndexKind::Plane => "plane",
            IndexKind::Direction => "direction",
        }
    }
}

impl std::fmt::Display for IndexKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Validated plane or direction description.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndexRecord {
    pub kind: IndexKind,
    pub indices: Vec3,
    /// Plane anchor point. Ignored for directions.
    pub intercept: Option<Vec3>,
}

impl IndexRecord {
    pub fn new(kind: IndexKind, indices: Vec3, intercept: Option<Vec3>) -> Self {
        Self {
            kind,
            indices,
            intercept,
        }
    }

    /// Plane `(hkl)` anchored at `intercept`.
    pub fn plane(indices: Vec3, intercept: Vec3) -> Self {
        Self::new(IndexKind::Plane, indices, Some(intercept))
    }

    /// Direction `[uvw]`.
    pub fn direction(indices: Vec3) -> Self {
        Self::new(IndexKind::Direction, indices, None)
    }
}

/// Errors raised at the parser boundary.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("Parser unreachable: {0}")]
    Transport(String),
    #[error("Parser rejected input (status {status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("Malformed parser response: {0}")]
    Malformed(String),
    #[error("Invalid notation: {0}")]
    Notation(String),
}

/// Request body sent to the parsing service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseRequest {
    pub input: String,
}

/// Response body as produced by the parsing service, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseResponse {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub indices: Vec<f64>,
    #[serde(default)]
    pub intercept: Option<Vec<f64>>,
}

impl ParseResponse {
    /// Decode a JSON body.
    pub fn from_json(body: &str) -> Result<Self, ParseError> {
        serde_json::from_str(body).map_err(|e| ParseError::Malformed(e.to_string()))
    }
}

impl TryFrom<ParseResponse> for IndexRecord {
    type Error = ParseError;

    fn try_from(response: ParseResponse) -> Result<Self, Self::Error> {
        let kind = match response.kind.as_str() {
            "plane" => IndexKind::Plane,
            "direction" => IndexKind::Direction,
            other => {
                return Err(ParseError::Malformed(format!("unknown type '{other}'")));
            }
        };

        let indices = triple("indices", &response.indices)?;

        let intercept = match (kind, response.intercept.as_deref()) {
            (IndexKind::Plane, Some(values)) => Some(triple("intercept", values)?),
            (IndexKind::Plane, None) => {
                return Err(ParseError::Malformed(
                    "plane response has no intercept".to_string(),
                ));
            }
            (IndexKind::Direction, _) => None,
        };

        Ok(IndexRecord::new(kind, indices, intercept))
    }
}

fn triple(field: &str, values: &[f64]) -> Result<Vec3, ParseError> {
    let [x, y, z] = values else {
        return Err(ParseError::Malformed(format!(
            "{field} must have 3 components, got {}",
            values.len()
        )));
    };
    let v = Vec3::new(*x as f32, *y as f32, *z as f32);
    if !v.is_finite() {
        return Err(ParseError::Malformed(format!("{field} is not finite")));
    }
    Ok(v)
}
