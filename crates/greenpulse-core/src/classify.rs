// ── Classification adapter ──
//
// Turns a raw provider response into a person count and a confidence.
// The provider is reached through `OccupantDetector` so the engine can be
// driven by a fake in tests.

use std::future::Future;

use greenpulse_api::VisionClient;
use greenpulse_api::vision::AnnotateImageResponse;
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::model::Classification;

/// Object name the provider uses for people.
pub const PERSON_LABEL: &str = "Person";

/// Confidence reported when faces were found but no person object scored.
pub const FACE_FALLBACK_CONFIDENCE: f64 = 0.85;

/// A capability that annotates a base64-encoded image.
pub trait OccupantDetector: Send + Sync + 'static {
    fn annotate(
        &self,
        image_base64: &str,
    ) -> impl Future<Output = Result<AnnotateImageResponse, greenpulse_api::Error>> + Send;
}

impl OccupantDetector for VisionClient {
    fn annotate(
        &self,
        image_base64: &str,
    ) -> impl Future<Output = Result<AnnotateImageResponse, greenpulse_api::Error>> + Send {
        VisionClient::annotate(self, image_base64)
    }
}

/// Classifies frames into occupancy counts.
#[derive(Debug)]
pub struct ClassificationAdapter<D> {
    detector: D,
}

impl<D: OccupantDetector> ClassificationAdapter<D> {
    pub fn new(detector: D) -> Self {
        Self { detector }
    }

    pub fn detector(&self) -> &D {
        &self.detector
    }

    /// Classify one frame.
    ///
    /// Any provider failure surfaces as
    /// [`CoreError::ClassificationUnavailable`], never as a zero count.
    pub async fn classify(&self, image_base64: &str) -> Result<Classification, CoreError> {
        let response = self.detector.annotate(image_base64).await.map_err(|e| {
            warn!(error = %e, "classification provider failed");
            CoreError::classification(&e)
        })?;

        let classification = normalize(&response);
        debug!(
            count = classification.count,
            confidence = classification.confidence,
            faces = response.face_annotations.len(),
            objects = response.localized_object_annotations.len(),
            "frame classified"
        );
        Ok(classification)
    }
}

/// Reduce a provider response to a person count and confidence.
///
/// Faces take precedence over person objects when both are present. The
/// confidence is the best person-object score, falling back to
/// [`FACE_FALLBACK_CONFIDENCE`] when only faces were seen. Labels are
/// ignored.
pub fn normalize(response: &AnnotateImageResponse) -> Classification {
    let (people, object_confidence) = response
        .localized_object_annotations
        .iter()
        .filter(|o| o.name == PERSON_LABEL)
        .fold((0usize, 0.0f64), |(n, best), o| (n + 1, best.max(o.score)));

    let faces = response.face_annotations.len();

    let (count, confidence) = if faces > 0 {
        let confidence = if object_confidence > 0.0 {
            object_confidence
        } else {
            FACE_FALLBACK_CONFIDENCE
        };
        (faces, confidence)
    } else {
        (people, object_confidence)
    };

    Classification {
        count: u32::try_from(count).unwrap_or(u32::MAX),
        confidence: round2(confidence),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use greenpulse_api::vision::{FaceAnnotation, LocalizedObjectAnnotation};

    use super::*;

    fn object(name: &str, score: f64) -> LocalizedObjectAnnotation {
        LocalizedObjectAnnotation {
            mid: None,
            name: name.to_owned(),
            score,
        }
    }

    fn response(faces: usize, objects: Vec<LocalizedObjectAnnotation>) -> AnnotateImageResponse {
        AnnotateImageResponse {
            localized_object_annotations: objects,
            face_annotations: vec![FaceAnnotation::default(); faces],
            label_annotations: Vec::new(),
        }
    }

    #[test]
    fn faces_win_over_objects() {
        let c = normalize(&response(2, vec![object("Person", 0.9)]));
        assert_eq!(c.count, 2);
        assert!((c.confidence - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn person_objects_when_no_faces() {
        let c = normalize(&response(0, vec![object("Person", 0.7), object("Person", 0.6)]));
        assert_eq!(c.count, 2);
        assert!((c.confidence - 0.7).abs() < f64::EPSILON);
    }

    #[test]
    fn faces_only_use_fallback_confidence() {
        let c = normalize(&response(1, Vec::new()));
        assert_eq!(c.count, 1);
        assert!((c.confidence - FACE_FALLBACK_CONFIDENCE).abs() < f64::EPSILON);
    }

    #[test]
    fn non_person_objects_are_ignored() {
        let c = normalize(&response(
            0,
            vec![object("Chair", 0.99), object("person", 0.8)],
        ));
        assert_eq!(c.count, 0);
        assert!(c.confidence.abs() < f64::EPSILON);
    }

    #[test]
    fn confidence_is_rounded() {
        let c = normalize(&response(0, vec![object("Person", 0.876_54)]));
        assert!((c.confidence - 0.88).abs() < f64::EPSILON);
    }

    struct FailingDetector;

    impl OccupantDetector for FailingDetector {
        async fn annotate(
            &self,
            _image_base64: &str,
        ) -> Result<AnnotateImageResponse, greenpulse_api::Error> {
            Err(greenpulse_api::Error::Vision {
                status: 403,
                code: Some(403),
                message: "API key not valid".into(),
            })
        }
    }

    #[tokio::test]
    async fn provider_failure_is_typed() {
        let adapter = ClassificationAdapter::new(FailingDetector);
        let err = adapter.classify("aGVsbG8=").await.unwrap_err();
        assert!(matches!(err, CoreError::ClassificationUnavailable { .. }));
        assert!(err.is_unavailable());
    }
}
