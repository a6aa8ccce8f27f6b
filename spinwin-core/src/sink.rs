use crate::config::CollectorConfig;
use crate::error::{Result, SpinError};
use crate::types::{Submission, SubmitOutcome};
use async_trait::async_trait;
use reqwest::{Client, Url};

/// Destination for email/prize pairs. Never fails; problems come back as
/// an outcome for the operator log.
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    async fn submit(&self, submission: &Submission) -> SubmitOutcome;
}

/// Posts submissions as a urlencoded form, the way a hosted form expects.
pub struct HttpFormSink {
    client: Client,
    url: Url,
    email_field: String,
    prize_field: String,
}

impl HttpFormSink {
    pub fn new(url: &str, email_field: &str, prize_field: &str) -> Result<Self> {
        let url = Url::parse(url)
            .map_err(|e| SpinError::config(format!("Invalid collector URL '{}': {}", url, e)))?;

        let client = Client::builder()
            .build()
            .map_err(|e| SpinError::internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url,
            email_field: email_field.to_string(),
            prize_field: prize_field.to_string(),
        })
    }

    /// `None` when no collector URL is configured.
    pub fn from_config(config: &CollectorConfig) -> Result<Option<Self>> {
        config
            .url
            .as_deref()
            .map(|url| Self::new(url, &config.email_field, &config.prize_field))
            .transpose()
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    fn form<'a>(&'a self, submission: &'a Submission) -> [(&'a str, &'a str); 2] {
        [
            (self.email_field.as_str(), submission.email.as_str()),
            (self.prize_field.as_str(), submission.prize_label.as_str()),
        ]
    }
}

#[async_trait]
impl SubmissionSink for HttpFormSink {
    async fn submit(&self, submission: &Submission) -> SubmitOutcome {
        let response = self
            .client
            .post(self.url.clone())
            .form(&self.form(submission))
            .send()
            .await;

        match response {
            Ok(resp) if resp.status().is_success() => SubmitOutcome::Delivered,
            Ok(resp) => SubmitOutcome::Rejected {
                status: resp.status().as_u16(),
            },
            Err(e) => SubmitOutcome::Failed {
                reason: e.to_string(),
            },
        }
    }
}

/// Dry-run sink: records the submission in the log and reports delivery.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

#[async_trait]
impl SubmissionSink for LogSink {
    async fn submit(&self, submission: &Submission) -> SubmitOutcome {
        tracing::info!(
            "Submission {} (dry run): {} won '{}'",
            submission.spin_id,
            submission.email,
            submission.prize_label
        );
        SubmitOutcome::Delivered
    }
}
