//! Ollama-backed predictor.
//!
//! Calls a local Ollama generate endpoint with a strict-JSON prompt and a
//! short timeout, so a slow or absent model server cannot stall complaint
//! creation. Every failure path returns `None`.

use std::time::Duration;

use async_trait::async_trait;

use super::{AiPredictor, Prediction};
use crate::config::PredictorConfig;
use crate::model::Priority;

/// Predictor backed by an Ollama `/api/generate` endpoint.
pub struct OllamaPredictor {
    client: reqwest::Client,
    url: String,
    model: String,
    category_names: Vec<String>,
}

impl OllamaPredictor {
    /// Build the shared client once; `category_names` constrains the prompt
    /// to names the store can actually resolve.
    pub fn new(config: &PredictorConfig, category_names: Vec<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()
                .expect("Failed to create HTTP client"),
            url: config.url.clone(),
            model: config.model.clone(),
            category_names,
        }
    }

    fn build_prompt(&self, title: &str, description: &str) -> String {
        format!(
            "Analyze the complaint and return ONLY valid JSON.\n\n\
             Complaint Title: {}\n\
             Complaint Description: {}\n\n\
             Categories: {}\n\
             Priorities: low, medium, high, critical\n\n\
             Return format:\n\
             {{\"category\": \"{}\", \"priority\": \"high\"}}",
            title,
            description,
            self.category_names.join(", "),
            self.category_names
                .first()
                .map(String::as_str)
                .unwrap_or("General"),
        )
    }

    /// Parse model output into a prediction, tolerating markdown fences.
    /// Unrecognized priority strings degrade to `medium`.
    fn parse_output(text: &str) -> Option<Prediction> {
        let mut body = text.trim();
        if body.starts_with("```") {
            body = body.split("```").nth(1)?;
            body = body.trim_start_matches("json").trim();
        }

        let value: serde_json::Value = serde_json::from_str(body).ok()?;
        let category = value
            .get("category")
            .and_then(|v| v.as_str())
            .map(str::to_string);
        let priority = value
            .get("priority")
            .and_then(|v| v.as_str())
            .and_then(Priority::parse)
            .unwrap_or_default();

        Some(Prediction { category, priority })
    }
}

#[async_trait]
impl AiPredictor for OllamaPredictor {
    async fn predict(&self, title: &str, description: &str) -> Option<Prediction> {
        let request_body = serde_json::json!({
            "model": self.model,
            "prompt": self.build_prompt(title, description),
            "stream": false,
        });

        let response = match self.client.post(&self.url).json(&request_body).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!("predictor unreachable, falling back to keywords: {}", e);
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::warn!("predictor returned HTTP {}", response.status());
            return None;
        }

        let value: serde_json::Value = match response.json().await {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!("predictor response was not JSON: {}", e);
                return None;
            }
        };

        let output = value.get("response").and_then(|v| v.as_str()).unwrap_or("");
        let prediction = Self::parse_output(output);
        if prediction.is_none() {
            tracing::warn!("predictor output was unparseable: {:?}", output);
        }
        prediction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_json() {
        let p = OllamaPredictor::parse_output(
            r#"{"category": "Electricity", "priority": "critical"}"#,
        )
        .unwrap();
        assert_eq!(p.category.as_deref(), Some("Electricity"));
        assert_eq!(p.priority, Priority::Critical);
    }

    #[test]
    fn test_parse_fenced_json() {
        let p = OllamaPredictor::parse_output(
            "```json\n{\"category\": \"Food & Mess\", \"priority\": \"low\"}\n```",
        )
        .unwrap();
        assert_eq!(p.category.as_deref(), Some("Food & Mess"));
        assert_eq!(p.priority, Priority::Low);
    }

    #[test]
    fn test_parse_unknown_priority_degrades_to_medium() {
        let p = OllamaPredictor::parse_output(r#"{"category": "Electricity", "priority": "urgent"}"#)
            .unwrap();
        assert_eq!(p.priority, Priority::Medium);
    }

    #[test]
    fn test_parse_garbage_is_none() {
        assert_eq!(OllamaPredictor::parse_output("I think it's plumbing"), None);
        assert_eq!(OllamaPredictor::parse_output(""), None);
    }

    #[test]
    fn test_prompt_lists_known_categories() {
        let config = PredictorConfig::default();
        let predictor = OllamaPredictor::new(
            &config,
            vec!["Water & Plumbing".to_string(), "Electricity".to_string()],
        );
        let prompt = predictor.build_prompt("No power", "socket dead in room 4");
        assert!(prompt.contains("Water & Plumbing, Electricity"));
        assert!(prompt.contains("low, medium, high, critical"));
    }
}
