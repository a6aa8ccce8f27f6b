use crate::aligner::Calibration;
use crate::catalog::Catalog;
use crate::error::{Result, SpinError};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const PRIZE_PLACEHOLDER: &str = "{prize}";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WheelConfig {
    pub catalog: Catalog,
    #[serde(default)]
    pub calibration: Calibration,
    #[serde(default)]
    pub timing: Timing,
    #[serde(default)]
    pub collector: CollectorConfig,
    #[serde(default)]
    pub claim: ClaimConfig,
}

/// Cosmetic pacing between reveal stages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timing {
    pub settle_delay: Duration,
    pub confetti_duration: Duration,
    pub reveal_delay: Duration,
    pub spin_again_delay: Duration,
}

/// Form endpoint that receives email/prize pairs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectorConfig {
    /// Submissions are only logged when unset.
    pub url: Option<String>,
    pub email_field: String,
    pub prize_field: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimConfig {
    pub base_url: String,
    pub phone: Option<String>,
    pub message_template: String,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_millis(200),
            confetti_duration: Duration::from_secs(8),
            reveal_delay: Duration::from_millis(300),
            spin_again_delay: Duration::from_millis(1500),
        }
    }
}

impl Timing {
    /// No pacing at all, for headless runs.
    pub fn instant() -> Self {
        Self {
            settle_delay: Duration::ZERO,
            confetti_duration: Duration::ZERO,
            reveal_delay: Duration::ZERO,
            spin_again_delay: Duration::ZERO,
        }
    }
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            url: None,
            email_field: "email".to_string(),
            prize_field: "prize".to_string(),
        }
    }
}

impl Default for ClaimConfig {
    fn default() -> Self {
        Self {
            base_url: "https://wa.me".to_string(),
            phone: None,
            message_template: format!("Hi! I just won \"{}\" on the prize wheel.", PRIZE_PLACEHOLDER),
        }
    }
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            catalog: Catalog::default(),
            calibration: Calibration::HalfTurn,
            timing: Timing::default(),
            collector: CollectorConfig::default(),
            claim: ClaimConfig::default(),
        }
    }
}

impl WheelConfig {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            ..Self::default()
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if !self.has_reachable_reward() {
            return Err(SpinError::config(
                "Catalog needs at least one reward the pointer can land on",
            ));
        }

        if let Some(url) = &self.collector.url {
            let parsed = Url::parse(url)
                .map_err(|e| SpinError::config(format!("Invalid collector URL '{}': {}", url, e)))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(SpinError::config("Collector URL must be http or https"));
            }
        }

        if self.collector.email_field.is_empty() || self.collector.prize_field.is_empty() {
            return Err(SpinError::config("Collector field identifiers cannot be empty"));
        }

        Url::parse(&self.claim.base_url).map_err(|e| {
            SpinError::config(format!(
                "Invalid claim URL '{}': {}",
                self.claim.base_url, e
            ))
        })?;

        if !self.claim.message_template.contains(PRIZE_PLACEHOLDER) {
            return Err(SpinError::config(format!(
                "Claim message must contain {}",
                PRIZE_PLACEHOLDER
            )));
        }

        Ok(())
    }

    /// Some drawable slice must resolve to a real reward, or every spin
    /// would come back as spin-again.
    fn has_reachable_reward(&self) -> bool {
        let n = self.catalog.len();
        (0..n).any(|selected| {
            self.catalog.effective_weight(selected) > 0.0
                && self
                    .calibration
                    .align_result(&self.catalog, selected)
                    .map(|prize| !prize.is_spin_again())
                    .unwrap_or(false)
        })
    }
}

impl ClaimConfig {
    /// Deep link into the messaging app, pre-filled with the prize.
    pub fn link_for(&self, prize_label: &str) -> Result<String> {
        let base = self.base_url.trim_end_matches('/');
        let target = match &self.phone {
            Some(phone) => format!("{}/{}", base, phone.trim_start_matches('+')),
            None => format!("{}/", base),
        };

        let message = self.message_template.replace(PRIZE_PLACEHOLDER, prize_label);
        let url = Url::parse_with_params(&target, &[("text", message.as_str())])
            .map_err(|e| SpinError::config(format!("Invalid claim URL '{}': {}", target, e)))?;

        Ok(url.to_string())
    }
}
