use crate::client::{GenerationRequest, TextGenerator};
use crate::prompt::{anomaly_prompt, anomaly_schema, efficiency_prompt};
use crate::response::parse_anomaly;
use fabwatch_config::InsightConfig;
use fabwatch_core::{AnomalyVerdict, FabricSpec, Sample};
use tracing::{error, warn};

/// Shown when the service answers with no text.
pub const ANALYSIS_UNAVAILABLE: &str = "Analysis unavailable.";
/// Shown when the request fails for any reason.
pub const ANALYSIS_FAILED: &str = "AI Analysis failed. Please check your network connection.";

pub const ANOMALY_NO_DATA: &str = "No data";
pub const ANOMALY_CHECK_FAILED: &str = "Error checking anomaly";
pub const ANOMALY_MALFORMED: &str = "Malformed anomaly response";

/// Wraps a [`TextGenerator`] so callers never see an error: every failure
/// becomes a user-facing fallback.
#[derive(Debug, Clone)]
pub struct InsightService<G> {
    generator:         G,
    critical_percent:  f64,
    max_output_tokens: u32,
    temperature:       f32,
}

impl<G: TextGenerator> InsightService<G> {
    pub fn new(generator: G, config: &InsightConfig) -> Self {
        Self {
            generator,
            critical_percent:  config.critical_wastage_percent,
            max_output_tokens: config.max_output_tokens,
            temperature:       config.temperature,
        }
    }

    /// Same generator with prompt settings taken from `config`.
    pub fn reconfigured(&self, config: &InsightConfig) -> Self
    where
        G: Clone,
    {
        Self::new(self.generator.clone(), config)
    }

    /// Natural-language quality summary, or a fallback message.
    pub async fn efficiency_report(&self, sample: &Sample, fabric: &FabricSpec) -> String {
        let request = GenerationRequest {
            prompt: efficiency_prompt(sample, fabric, self.critical_percent),
            max_output_tokens: Some(self.max_output_tokens),
            temperature: Some(self.temperature),
            json_schema: None,
        };

        match self.generator.generate(&request).await {
            Ok(text) if text.trim().is_empty() => ANALYSIS_UNAVAILABLE.to_string(),
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                error!("AI analysis failed: {e}");
                ANALYSIS_FAILED.to_string()
            }
        }
    }

    /// Structured anomaly judgement; defaults to "not an anomaly" whenever
    /// the reply is missing or can't be trusted.
    pub async fn check_anomaly(&self, wastage_percent: f64) -> AnomalyVerdict {
        let request = GenerationRequest {
            prompt: anomaly_prompt(wastage_percent),
            json_schema: Some(anomaly_schema()),
            ..GenerationRequest::default()
        };

        let text = match self.generator.generate(&request).await {
            Ok(text) if text.trim().is_empty() => {
                return AnomalyVerdict::not_anomalous(ANOMALY_NO_DATA)
            }
            Ok(text) => text,
            Err(e) => {
                error!("Anomaly check failed: {e}");
                return AnomalyVerdict::not_anomalous(ANOMALY_CHECK_FAILED);
            }
        };

        parse_anomaly(&text).unwrap_or_else(|e| {
            warn!("Discarding anomaly reply: {e}");
            AnomalyVerdict::not_anomalous(ANOMALY_MALFORMED)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InsightError;
    use chrono::Utc;
    use fabwatch_core::WastageModel;
    use std::sync::Mutex;

    /// Replays a canned reply and records the last request.
    #[derive(Default)]
    struct Canned {
        reply: Option<String>,
        seen:  Mutex<Option<GenerationRequest>>,
    }

    impl Canned {
        fn replying(text: &str) -> Self {
            Self {
                reply: Some(text.to_string()),
                ..Self::default()
            }
        }

        fn failing() -> Self {
            Self::default()
        }
    }

    impl TextGenerator for Canned {
        async fn generate(&self, request: &GenerationRequest) -> Result<String, InsightError> {
            *self.seen.lock().unwrap() = Some(request.clone());
            self.reply
                .clone()
                .ok_or_else(|| InsightError::Status { status: 503, body: "down".into() })
        }
    }

    fn service(generator: Canned) -> InsightService<Canned> {
        InsightService::new(generator, &InsightConfig::default())
    }

    fn sample() -> Sample {
        Sample::new(8, 2, 0.1255, Utc::now(), &WastageModel::default())
    }

    #[tokio::test]
    async fn report_returns_trimmed_text() {
        let svc = service(Canned::replying("  Quality is acceptable.\n"));
        let text = svc.efficiency_report(&sample(), &FabricSpec::default()).await;
        assert_eq!(text, "Quality is acceptable.");

        let seen = svc.generator.seen.lock().unwrap().clone().unwrap();
        assert_eq!(seen.max_output_tokens, Some(150));
        assert!(seen.json_schema.is_none());
        assert!(seen.prompt.contains("Total Holes Detected: 8"));
    }

    #[tokio::test]
    async fn empty_report_is_unavailable() {
        let svc = service(Canned::replying("   "));
        let text = svc.efficiency_report(&sample(), &FabricSpec::default()).await;
        assert_eq!(text, ANALYSIS_UNAVAILABLE);
    }

    #[tokio::test]
    async fn failed_report_is_absorbed() {
        let svc = service(Canned::failing());
        let text = svc.efficiency_report(&sample(), &FabricSpec::default()).await;
        assert_eq!(text, ANALYSIS_FAILED);
    }

    #[tokio::test]
    async fn anomaly_request_uses_schema() {
        let svc = service(Canned::replying(r#"{"isAnomaly": true, "reason": "High"}"#));
        let verdict = svc.check_anomaly(7.25).await;
        assert!(verdict.is_anomaly);
        assert_eq!(verdict.reason, "High");

        let seen = svc.generator.seen.lock().unwrap().clone().unwrap();
        assert!(seen.json_schema.is_some());
        assert!(seen.prompt.contains("7.25%"));
    }

    #[tokio::test]
    async fn anomaly_defaults_are_conservative() {
        let cases = [
            (Canned::replying(""), ANOMALY_NO_DATA),
            (Canned::failing(), ANOMALY_CHECK_FAILED),
            (Canned::replying(r#"{"isAnomaly": "true"}"#), ANOMALY_MALFORMED),
        ];
        for (generator, reason) in cases {
            let verdict = service(generator).check_anomaly(42.0).await;
            assert_eq!(verdict, AnomalyVerdict::not_anomalous(reason));
        }
    }
}
