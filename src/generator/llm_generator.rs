// ABOUTME: Plan generator backed by an LLM chat completion in JSON mode
// ABOUTME: Renders the prompt context, calls the provider and extracts the JSON plan document
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, instrument};

use super::{parse_generator_output, PlanGenerator, PlanPromptContext};
use crate::config::GeneratorConfig;
use crate::errors::AppResult;
use crate::llm::{
    plan_generator_system_prompt, ChatMessage, ChatRequest, LlmProvider, OpenAiCompatibleProvider,
};

/// Plan generator that asks a language model for the plan
pub struct LlmPlanGenerator {
    provider: Arc<dyn LlmProvider>,
    temperature: f32,
    max_tokens: u32,
}

impl LlmPlanGenerator {
    /// Wrap an existing provider
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>, temperature: f32, max_tokens: u32) -> Self {
        Self {
            provider,
            temperature,
            max_tokens,
        }
    }

    /// Build an OpenAI-compatible provider from generator settings
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created
    pub fn from_config(config: &GeneratorConfig) -> AppResult<Self> {
        let provider = OpenAiCompatibleProvider::from_generator(config)?;
        Ok(Self::new(
            Arc::new(provider),
            config.temperature,
            config.max_tokens,
        ))
    }

    fn build_request(&self, context: &PlanPromptContext) -> AppResult<ChatRequest> {
        let context_json = serde_json::to_string_pretty(context)?;
        let user_prompt = format!(
            "Create a {}-day meal plan for this patient.\n\n{context_json}",
            context.duration_days
        );

        Ok(ChatRequest::new(vec![
            ChatMessage::system(plan_generator_system_prompt()),
            ChatMessage::user(user_prompt),
        ])
        .with_temperature(self.temperature)
        .with_max_tokens(self.max_tokens)
        .with_json_mode())
    }
}

#[async_trait]
impl PlanGenerator for LlmPlanGenerator {
    fn name(&self) -> &str {
        self.provider.name()
    }

    #[instrument(skip_all, fields(provider = %self.provider.name(), days = context.duration_days))]
    async fn complete(&self, context: &PlanPromptContext) -> AppResult<Value> {
        let request = self.build_request(context)?;
        let response = self.provider.complete(&request).await?;

        debug!(
            model = %response.model,
            chars = response.content.len(),
            total_tokens = response.usage.as_ref().map(|usage| usage.total_tokens),
            "Generator responded"
        );

        parse_generator_output(&response.content)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use ayurdiet_core::errors::ErrorCode;
    use ayurdiet_core::models::{
        BiologicalSex, Constitution, DietType, MacroTargets, MealType, NutritionProfile,
    };
    use chrono::NaiveDate;
    use tokio::sync::Mutex;

    use super::*;
    use crate::generator::{PromptPatient, PromptRecipe};
    use crate::llm::{ChatResponse, MessageRole};

    struct CannedProvider {
        reply: String,
        requests: Mutex<Vec<ChatRequest>>,
    }

    impl CannedProvider {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_owned(),
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LlmProvider for CannedProvider {
        fn name(&self) -> &str {
            "canned"
        }

        async fn complete(&self, request: &ChatRequest) -> AppResult<ChatResponse> {
            self.requests.lock().await.push(request.clone());
            Ok(ChatResponse {
                content: self.reply.clone(),
                model: "canned-model".to_owned(),
                usage: None,
                finish_reason: Some("stop".to_owned()),
            })
        }
    }

    fn context() -> PlanPromptContext {
        PlanPromptContext {
            patient: PromptPatient {
                constitution: Constitution::PittaKapha,
                diet_type: DietType::Vegetarian,
                age: Some(42),
                biological_sex: BiologicalSex::Female,
                health_concerns: vec!["acidity".to_owned()],
                allergies: Vec::new(),
                preferred_cuisines: Vec::new(),
            },
            duration_days: 3,
            start_date: NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
            target_calories: 1800,
            macros: MacroTargets::default(),
            slot_targets: BTreeMap::from([(MealType::Lunch, 720)]),
            meal_times: BTreeMap::from([(MealType::Lunch, "12:30".to_owned())]),
            health_goals: Vec::new(),
            guidelines: Vec::new(),
            candidates: vec![PromptRecipe {
                id: "moong-dal-khichdi".to_owned(),
                name: "Moong Dal Khichdi".to_owned(),
                meal_types: vec![MealType::Lunch],
                nutrition: NutritionProfile::default(),
                total_minutes: 35,
                score: 0.82,
            }],
        }
    }

    #[tokio::test]
    async fn test_complete_sends_json_mode_prompt_and_parses_fenced_reply() {
        let provider = Arc::new(CannedProvider::new(
            "```json\n{\"planName\": \"Cooling week\", \"dailyPlans\": []}\n```",
        ));
        let generator = LlmPlanGenerator::new(provider.clone(), 0.2, 2048);

        let document = generator.complete(&context()).await.unwrap();
        assert_eq!(document["planName"], "Cooling week");
        assert_eq!(generator.name(), "canned");

        let requests = provider.requests.lock().await;
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert!(request.json_mode);
        assert!(request
            .temperature
            .is_some_and(|temperature| (temperature - 0.2).abs() < f32::EPSILON));
        assert_eq!(request.max_tokens, Some(2048));
        assert_eq!(request.messages[0].role, MessageRole::System);
        assert_eq!(request.messages[1].role, MessageRole::User);
        assert!(request.messages[1].content.starts_with("Create a 3-day meal plan"));
        assert!(request.messages[1].content.contains("moong-dal-khichdi"));
    }

    #[tokio::test]
    async fn test_prose_reply_is_malformed() {
        let provider = Arc::new(CannedProvider::new("Sorry, I cannot help with that."));
        let generator = LlmPlanGenerator::new(provider, 0.2, 2048);

        let error = generator.complete(&context()).await.unwrap_err();
        assert_eq!(error.code, ErrorCode::ExternalGeneratorMalformed);
    }
}
