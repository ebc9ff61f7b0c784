//! Classification results and the prediction endpoint's wire format.

use serde::{Deserialize, Serialize};

/// Errors from a classify request.
///
/// The UI reports all of them the same way; the variants exist for
/// logging.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClassifyError {
    /// The server answered with a non-success status.
    #[error("server returned HTTP {0}")]
    Status(u16),

    /// The request never completed (DNS, connection refused, CORS, ...).
    #[error("request failed: {0}")]
    Transport(String),

    /// The body was not the expected JSON.
    #[error("invalid prediction response: {0}")]
    InvalidResponse(String),
}

/// JSON body returned by `POST /api/predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Predicted label.
    pub predicted_class: String,
    /// Model confidence, nominally in `[0, 1]`.
    pub confidence: f64,
}

/// A label and how sure the model is about it.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    /// Predicted label as returned by the server.
    pub predicted_label: String,
    /// Confidence in `[0, 1]`.
    pub confidence: f32,
}

impl ClassificationResult {
    /// Confidence as a percentage with two decimals, e.g. `"97.53%"`.
    #[must_use]
    pub fn confidence_percent(&self) -> String {
        format!("{:.2}%", f64::from(self.confidence) * 100.0)
    }
}

impl TryFrom<Prediction> for ClassificationResult {
    type Error = ClassifyError;

    /// Rejects non-finite confidences and clamps the rest into `[0, 1]`.
    #[allow(clippy::cast_possible_truncation)]
    fn try_from(p: Prediction) -> Result<Self, Self::Error> {
        if !p.confidence.is_finite() {
            return Err(ClassifyError::InvalidResponse(format!(
                "confidence is not a number: {}",
                p.confidence
            )));
        }
        Ok(Self {
            predicted_label: p.predicted_class,
            confidence: p.confidence.clamp(0.0, 1.0) as f32,
        })
    }
}

/// Parse a prediction response body.
///
/// # Errors
///
/// Returns [`ClassifyError::InvalidResponse`] if the body is not JSON with
/// a string `predicted_class` and a numeric `confidence`.
pub fn parse_prediction(body: &[u8]) -> Result<ClassificationResult, ClassifyError> {
    let prediction: Prediction = serde_json::from_slice(body)
        .map_err(|e| ClassifyError::InvalidResponse(e.to_string()))?;
    ClassificationResult::try_from(prediction)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_server_body() {
        let r = parse_prediction(br#"{"predicted_class":"banana","confidence":0.9753}"#).unwrap();
        assert_eq!(r.predicted_label, "banana");
        assert_eq!(r.confidence_percent(), "97.53%");
    }

    #[test]
    fn extra_fields_are_ignored() {
        let body = br#"{"predicted_class":"kiwi","confidence":1,"elapsed_ms":12}"#;
        let r = parse_prediction(body).unwrap();
        assert_eq!(r.predicted_label, "kiwi");
        assert!((r.confidence - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn confidence_is_clamped() {
        let r = ClassificationResult::try_from(Prediction {
            predicted_class: "x".into(),
            confidence: 1.7,
        })
        .unwrap();
        assert!((r.confidence - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn malformed_bodies_are_rejected() {
        let bodies: [&[u8]; 4] = [
            b"not json",
            br#"{"predicted_class":"apple"}"#,
            br#"{"confidence":0.5}"#,
            br#"{"predicted_class":3,"confidence":0.5}"#,
        ];
        for body in bodies {
            assert!(
                matches!(parse_prediction(body), Err(ClassifyError::InvalidResponse(_))),
                "{:?}",
                String::from_utf8_lossy(body)
            );
        }
    }
}
