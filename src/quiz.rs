use crate::errors::{AppError, ValidationError};
use crate::models::QuizResult;
use crate::storage::{QUIZ_RESULTS_KEY, SharedStore, load_json, save_json};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

pub const HISTORY_LIMIT: usize = 10;

#[derive(Debug, Serialize)]
pub struct QuizQuestion {
    pub id: &'static str,
    pub question: &'static str,
    pub options: [&'static str; 5],
}

pub static QUESTIONS: [QuizQuestion; 5] = [
    QuizQuestion {
        id: "1",
        question: "How often do you feel overwhelmed?",
        options: ["Never", "Rarely", "Sometimes", "Often", "Always"],
    },
    QuizQuestion {
        id: "2",
        question: "How well do you sleep at night?",
        options: ["Very well", "Well", "Okay", "Poorly", "Very poorly"],
    },
    QuizQuestion {
        id: "3",
        question: "How satisfied are you with your daily routine?",
        options: [
            "Very satisfied",
            "Satisfied",
            "Neutral",
            "Unsatisfied",
            "Very unsatisfied",
        ],
    },
    QuizQuestion {
        id: "4",
        question: "How often do you engage in activities you enjoy?",
        options: ["Daily", "A few times a week", "Weekly", "Rarely", "Never"],
    },
    QuizQuestion {
        id: "5",
        question: "How connected do you feel to others?",
        options: [
            "Very connected",
            "Connected",
            "Somewhat connected",
            "Disconnected",
            "Very disconnected",
        ],
    },
];

struct Band {
    ceiling: f64,
    category: &'static str,
    description: &'static str,
    recommendations: [&'static str; 3],
}

static BANDS: [Band; 4] = [
    Band {
        ceiling: 1.0,
        category: "Excellent Mental Wellness",
        description: "You demonstrate strong mental wellness practices and emotional resilience.",
        recommendations: [
            "Continue your current wellness practices",
            "Consider sharing your strategies with others",
            "Maintain regular check-ins with yourself",
        ],
    },
    Band {
        ceiling: 2.0,
        category: "Good Mental Wellness",
        description: "You have a solid foundation for mental wellness with room for growth.",
        recommendations: [
            "Incorporate more mindfulness practices",
            "Focus on improving sleep quality",
            "Engage in regular physical activity",
        ],
    },
    Band {
        ceiling: 3.0,
        category: "Moderate Mental Wellness",
        description: "There are areas where you can improve your mental wellness and life satisfaction.",
        recommendations: [
            "Establish a consistent daily routine",
            "Practice stress management techniques",
            "Connect with supportive friends or family",
        ],
    },
    Band {
        ceiling: f64::INFINITY,
        category: "Needs Attention",
        description: "Your mental wellness could benefit from focused attention and support.",
        recommendations: [
            "Consider speaking with a mental health professional",
            "Start with small, manageable wellness practices",
            "Prioritize self-care and stress reduction",
        ],
    },
];

/// Scores a completed quiz. Option `i` of each question is worth `4 - i` points.
pub fn score(answers: &BTreeMap<String, usize>) -> Result<QuizResult, ValidationError> {
    let mut total = 0usize;
    for question in &QUESTIONS {
        let Some(&selected) = answers.get(question.id) else {
            return Err(ValidationError::new(format!(
                "Please answer question {} before finishing.",
                question.id
            )));
        };
        if selected >= question.options.len() {
            return Err(ValidationError::new(format!(
                "Answer {selected} is not an option for question {}.",
                question.id
            )));
        }
        total += 4 - selected;
    }
    if let Some(unknown) = answers
        .keys()
        .find(|id| !QUESTIONS.iter().any(|question| question.id == id.as_str()))
    {
        return Err(ValidationError::new(format!("Unknown question {unknown}.")));
    }

    let average = total as f64 / QUESTIONS.len() as f64;
    let band = BANDS
        .iter()
        .find(|band| average <= band.ceiling)
        .unwrap_or(&BANDS[BANDS.len() - 1]);

    Ok(QuizResult {
        score: (average * 25.0).round() as u32,
        category: band.category.to_string(),
        description: band.description.to_string(),
        recommendations: band.recommendations.iter().map(|r| r.to_string()).collect(),
        timestamp: None,
    })
}

pub struct QuizHistory {
    store: SharedStore,
}

impl QuizHistory {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub fn results(&self) -> Vec<QuizResult> {
        load_json(self.store.as_ref(), QUIZ_RESULTS_KEY)
    }

    pub async fn record(
        &self,
        mut result: QuizResult,
        now: DateTime<Utc>,
    ) -> Result<QuizResult, AppError> {
        result.timestamp = Some(now.to_rfc3339_opts(SecondsFormat::Millis, true));
        let mut results = self.results();
        results.insert(0, result.clone());
        results.truncate(HISTORY_LIMIT);
        save_json(self.store.as_ref(), QUIZ_RESULTS_KEY, &results).await?;
        Ok(result)
    }
}
