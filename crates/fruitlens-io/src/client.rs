//! Upload to the prediction endpoint.
//!
//! One `multipart/form-data` POST per submission, with the image in a
//! single file field. Status codes and transport failures are folded
//! into [`ClassifyError`]; the session turns all of them into the same
//! connectivity notice.

use fruitlens_core::{
    ClassificationResult, ClassifyError, ClientConfig, ImageSource, parse_prediction,
};
use reqwest::multipart::{Form, Part};

/// HTTP client bound to one prediction endpoint.
#[derive(Debug, Clone)]
pub struct PredictClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl PredictClient {
    /// Create a client for `config.endpoint`.
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// The configuration this client was built with.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Upload `source` and parse the prediction.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::Transport`] if the request cannot be built
    /// or sent, [`ClassifyError::Status`] for a non-2xx answer, and
    /// [`ClassifyError::InvalidResponse`] if the body is not a prediction.
    #[allow(clippy::future_not_send)] // WASM is single-threaded; Send is not needed
    pub async fn classify(
        &self,
        source: &ImageSource,
    ) -> Result<ClassificationResult, ClassifyError> {
        let part = Part::bytes(source.bytes().to_vec())
            .file_name(source.filename().to_owned())
            .mime_str(source.mime_type())
            .map_err(transport)?;
        let form = Form::new().part(self.config.upload_field.clone(), part);

        tracing::debug!(
            endpoint = %self.config.endpoint,
            filename = source.filename(),
            bytes = source.bytes().len(),
            "posting image"
        );
        let response = self
            .http
            .post(&self.config.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClassifyError::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(transport)?;
        parse_prediction(&body)
    }
}

#[allow(clippy::needless_pass_by_value)]
fn transport(err: reqwest::Error) -> ClassifyError {
    ClassifyError::Transport(err.to_string())
}
