// AI client for schedule commentary
//
// Sends a plain-text summary of one squad's sessions to the configured
// provider and returns free-text commentary. Any failure is recovered
// by the caller with the fixed fallback string; the core never raises.

use serde::{Deserialize, Serialize};

use rostergrid_config::settings::AISettings;
use rostergrid_engine::model::Session;

/// What the user sees whenever the analysis call fails, for any reason.
pub const ANALYSIS_FALLBACK: &str = "Error analyzing schedule.";

/// Error from the analysis call
#[derive(Debug, Clone)]
pub enum AnalyzeError {
    /// Network error
    Network(String),
    /// API error response
    Api { status: u16, message: String },
    /// Provider returned an unexpected shape
    InvalidResponse(String),
}

impl std::fmt::Display for AnalyzeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalyzeError::Network(msg) => write!(f, "Network error: {}", msg),
            AnalyzeError::Api { status, message } => {
                write!(f, "API error ({}): {}", status, message)
            }
            AnalyzeError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
        }
    }
}

impl std::error::Error for AnalyzeError {}

/// The text block handed to the provider: one line per session.
pub fn schedule_summary(squad: &str, sessions: &[Session]) -> String {
    let mut text = format!("Squad: {}\nSchedule:\n", squad);
    for s in sessions {
        text.push_str(&format!("{} @ {}: {}\n", s.date, s.from, s.course_id));
    }
    text
}

// ============================================================================
// OpenAI API types
// ============================================================================

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

const SYSTEM_PROMPT: &str = "You are a training coordinator's assistant. \
Given a squad's schedule, comment briefly on its balance: session density \
per day, gaps, and anything a coordinator should double-check. Plain text, \
a short paragraph, no markdown.";

/// Request commentary on a schedule summary.
///
/// This is a blocking call with a 60 second client timeout; run it off
/// the interactive path. The caller substitutes [`ANALYSIS_FALLBACK`]
/// for any error.
pub fn analyze(settings: &AISettings, api_key: &str, summary: &str) -> Result<String, AnalyzeError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(60))
        .build()
        .map_err(|e| AnalyzeError::Network(e.to_string()))?;

    let request = ChatRequest {
        model: settings.effective_model().to_string(),
        messages: vec![
            ChatMessage {
                role: "system".to_string(),
                content: SYSTEM_PROMPT.to_string(),
            },
            ChatMessage {
                role: "user".to_string(),
                content: summary.to_string(),
            },
        ],
        temperature: 0.3,
        max_tokens: 512,
    };

    let response = client
        .post("https://api.openai.com/v1/chat/completions")
        .header("Authorization", format!("Bearer {}", api_key))
        .header("Content-Type", "application/json")
        .json(&request)
        .send()
        .map_err(|e| AnalyzeError::Network(e.to_string()))?;

    let status = response.status();
    let body = response
        .text()
        .map_err(|e| AnalyzeError::Network(e.to_string()))?;

    if !status.is_success() {
        return Err(AnalyzeError::Api {
            status: status.as_u16(),
            message: body,
        });
    }

    extract_answer(&body)
}

fn extract_answer(body: &str) -> Result<String, AnalyzeError> {
    let parsed: ChatResponse =
        serde_json::from_str(body).map_err(|e| AnalyzeError::InvalidResponse(e.to_string()))?;

    parsed
        .choices
        .first()
        .map(|c| c.message.content.trim().to_string())
        .ok_or_else(|| AnalyzeError::InvalidResponse("No choices in response".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(date: &str, from: &str, course: &str) -> Session {
        Session {
            id: "x".into(),
            squad: "4".into(),
            date: date.into(),
            from: from.into(),
            to: String::new(),
            course_id: course.into(),
            lu_id: String::new(),
            mentor_id: "Unassigned".into(),
        }
    }

    #[test]
    fn summary_has_one_line_per_session() {
        let sessions = vec![
            session("2024-01-01", "0830", "Intro"),
            session("2024-01-01", "1030", "Advanced"),
        ];
        let text = schedule_summary("4", &sessions);
        assert_eq!(
            text,
            "Squad: 4\nSchedule:\n2024-01-01 @ 0830: Intro\n2024-01-01 @ 1030: Advanced\n"
        );
    }

    #[test]
    fn extract_answer_takes_first_choice() {
        let body = r#"{"choices":[{"message":{"content":"  Looks balanced.  "}}]}"#;
        assert_eq!(extract_answer(body).unwrap(), "Looks balanced.");
    }

    #[test]
    fn extract_answer_rejects_empty_choices() {
        let body = r#"{"choices":[]}"#;
        assert!(matches!(
            extract_answer(body),
            Err(AnalyzeError::InvalidResponse(_))
        ));
    }

    #[test]
    fn extract_answer_rejects_non_json() {
        assert!(matches!(
            extract_answer("<html>rate limited</html>"),
            Err(AnalyzeError::InvalidResponse(_))
        ));
    }
}
