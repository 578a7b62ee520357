// Vision API wire types
//
// Request types serialize to the provider's camelCase JSON. Response types
// are the subset of the provider schema we consume. Parsing goes through
// `parse_batch_response`, which rejects a body without a usable
// `responses[0]` entry but tolerates missing or ill-typed detections.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::Error;

// ── Request ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeatureType {
    ObjectLocalization,
    LabelDetection,
    FaceDetection,
}

#[derive(Debug, Clone, Serialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: FeatureType,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageContent<'a> {
    /// Base64-encoded image bytes.
    pub content: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnnotateImageRequest<'a> {
    pub image: ImageContent<'a>,
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchAnnotateRequest<'a> {
    pub requests: Vec<AnnotateImageRequest<'a>>,
}

impl<'a> BatchAnnotateRequest<'a> {
    /// Single-image request asking for every detection mode occupancy
    /// counting uses. Labels are requested but not consumed downstream.
    pub fn occupancy(image_base64: &'a str) -> Self {
        Self {
            requests: vec![AnnotateImageRequest {
                image: ImageContent {
                    content: image_base64,
                },
                features: vec![
                    Feature {
                        kind: FeatureType::ObjectLocalization,
                    },
                    Feature {
                        kind: FeatureType::LabelDetection,
                    },
                    Feature {
                        kind: FeatureType::FaceDetection,
                    },
                ],
            }],
        }
    }
}

// ── Response ────────────────────────────────────────────────────────

/// A localized object (bounding-box detection).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalizedObjectAnnotation {
    #[serde(default)]
    pub mid: Option<String>,
    pub name: String,
    pub score: f64,
}

/// A detected face. Only the presence of the entry matters for counting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceAnnotation {
    #[serde(default)]
    pub detection_confidence: Option<f64>,
}

/// Generic label from LABEL_DETECTION.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityAnnotation {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub score: f64,
}

/// Detections for a single image.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotateImageResponse {
    pub localized_object_annotations: Vec<LocalizedObjectAnnotation>,
    pub face_annotations: Vec<FaceAnnotation>,
    pub label_annotations: Vec<EntityAnnotation>,
}

/// The provider's `google.rpc.Status`-shaped error object.
#[derive(Debug, Clone, Default, Deserialize)]
struct ProviderStatus {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    message: Option<String>,
}

/// Parse a successful (2xx) `images:annotate` body.
///
/// Fails when the body is not JSON, carries a top-level or per-image
/// `error`, or lacks a `responses[0]` object. Detections are parsed entry
/// by entry: a malformed entry is skipped, and a missing or ill-typed
/// array yields no detections of that kind.
pub(crate) fn parse_batch_response(body: &str) -> Result<AnnotateImageResponse, Error> {
    let root: Value = serde_json::from_str(body).map_err(|e| Error::Deserialization {
        message: e.to_string(),
        body: body.to_owned(),
    })?;

    if let Some(err) = root.get("error") {
        return Err(provider_error(200, err));
    }

    let first = root
        .get("responses")
        .and_then(Value::as_array)
        .and_then(|responses| responses.first())
        .filter(|first| first.is_object())
        .ok_or_else(|| Error::Deserialization {
            message: "missing `responses[0]` in annotate response".into(),
            body: body.to_owned(),
        })?;

    if let Some(err) = first.get("error") {
        return Err(provider_error(200, err));
    }

    Ok(AnnotateImageResponse {
        localized_object_annotations: detections(first, "localizedObjectAnnotations"),
        face_annotations: detections(first, "faceAnnotations"),
        label_annotations: detections(first, "labelAnnotations"),
    })
}

/// Build an `Error::Vision` from a non-2xx body, falling back to the raw
/// text when it isn't the provider's JSON error envelope.
pub(crate) fn error_from_body(status: u16, body: &str) -> Error {
    match serde_json::from_str::<Value>(body) {
        Ok(root) => match root.get("error") {
            Some(err) => provider_error(status, err),
            None => Error::Vision {
                status,
                code: None,
                message: body.to_owned(),
            },
        },
        Err(_) => Error::Vision {
            status,
            code: None,
            message: body.trim().to_owned(),
        },
    }
}

fn provider_error(http_status: u16, err: &Value) -> Error {
    let parsed = ProviderStatus::deserialize(err).unwrap_or_default();
    let message = parsed.message.unwrap_or_else(|| err.to_string());
    Error::Vision {
        status: http_status,
        code: parsed.code,
        message,
    }
}

fn detections<T: DeserializeOwned>(response: &Value, field: &'static str) -> Vec<T> {
    let Some(raw) = response.get(field) else {
        return Vec::new();
    };
    let Some(entries) = raw.as_array() else {
        debug!(field, "ignoring non-array detections");
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| match T::deserialize(entry) {
            Ok(item) => Some(item),
            Err(e) => {
                debug!(field, error = %e, "skipping malformed detection");
                None
            }
        })
        .collect()
}
