//! Report client: builds the search request for a university and runs it
//! through the retrying executor.

use std::time::Duration;

use secrecy::SecretString;

use crate::config::{ApiConfig, ScoutConfig};
use crate::gemini::request::GenerateContentRequest;
use crate::gemini::response::extract_report_text;
use crate::resilience::{
    CallOutcome, Credential, HttpTransport, RequestSpec, RetryPolicy, RetryingRequestExecutor,
    Sleeper, Subject, TokioSleeper, Transport,
};

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-goog-api-key";

pub struct ReportClient<T, S = TokioSleeper> {
    api: ApiConfig,
    request_timeout: Duration,
    api_key: Option<SecretString>,
    executor: RetryingRequestExecutor<T, S>,
}

impl ReportClient<HttpTransport, TokioSleeper> {
    /// Production client using reqwest and the Tokio timer.
    pub fn from_config(config: &ScoutConfig, api_key: Option<SecretString>) -> Self {
        let executor =
            RetryingRequestExecutor::new(HttpTransport::default(), RetryPolicy::from(&config.retries))
                .with_extraction_fallback(config.harvest.extraction_fallback.clone());
        Self::new(config.api.clone(), config.timeouts.request(), api_key, executor)
    }
}

impl<T: Transport, S: Sleeper> ReportClient<T, S> {
    pub fn new(
        api: ApiConfig,
        request_timeout: Duration,
        api_key: Option<SecretString>,
        executor: RetryingRequestExecutor<T, S>,
    ) -> Self {
        Self {
            api,
            request_timeout,
            api_key,
            executor,
        }
    }

    pub fn executor(&self) -> &RetryingRequestExecutor<T, S> {
        &self.executor
    }

    /// The request sent for `subject`. The API key travels as a credential so
    /// it is only exposed when the transport writes the header.
    pub fn build_request(&self, subject: &Subject) -> RequestSpec {
        let body =
            GenerateContentRequest::transfer_requirements(&subject.name, &subject.domain).to_json();

        RequestSpec::post_json(self.api.endpoint(), body, self.request_timeout)
            .with_credential(Credential::required(API_KEY_HEADER, self.api_key.clone()))
    }

    /// Search for one university's transfer requirements.
    pub async fn fetch(&self, subject: &Subject) -> CallOutcome {
        let request = self.build_request(subject);
        self.executor
            .execute(subject, &request, extract_report_text)
            .await
    }
}
