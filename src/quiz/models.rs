//! Data models for practice questions

use serde::{Deserialize, Serialize};

/// Exam question style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    /// Spot and correct errors (syntax, logic, API misuse)
    ErrorSpotting,
    /// Fill in the blanks (API names, parameters, types)
    FillBlank,
    /// Conceptual explanation
    Concept,
}

impl QuestionType {
    pub fn label(self) -> &'static str {
        match self {
            QuestionType::ErrorSpotting => "error spotting",
            QuestionType::FillBlank => "fill blank",
            QuestionType::Concept => "concept",
        }
    }
}

/// A generated practice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_context: Option<String>,
    pub answer: String,
    pub explanation: String,
}

impl Question {
    /// Shown whenever a generation request fails
    pub fn fallback() -> Self {
        Self {
            id: 1,
            kind: QuestionType::ErrorSpotting,
            question: "Find the error in the following ISR code.".to_string(),
            code_context: Some(
                "void IRAM_ATTR onTimer() {\n  Serial.println(\"Interrupt triggered\");\n}"
                    .to_string(),
            ),
            answer: "Serial.println() inside ISR".to_string(),
            explanation: "ISRs must be short and fast. Serial printing depends on interrupts which are often disabled inside an ISR, and it is too slow, potentially causing a crash.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_question_json() {
        let json = r#"{
            "id": 2,
            "type": "fill_blank",
            "question": "Complete the MQTT call",
            "codeContext": "client.____(\"topic/out\", \"msg\");",
            "answer": "publish",
            "explanation": "publish sends a message to a topic"
        }"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert_eq!(q.kind, QuestionType::FillBlank);
        assert_eq!(q.code_context.as_deref(), Some("client.____(\"topic/out\", \"msg\");"));
    }

    #[test]
    fn test_code_context_optional() {
        let json = r#"{"id":3,"type":"concept","question":"Deep vs light sleep?","answer":"RAM","explanation":"..."}"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert_eq!(q.code_context, None);

        let back = serde_json::to_value(&q).unwrap();
        assert!(back.get("codeContext").is_none());
        assert_eq!(back["type"], "concept");
    }

    #[test]
    fn test_unknown_type_rejected() {
        let json = r#"{"id":3,"type":"essay","question":"q","answer":"a","explanation":"e"}"#;
        assert!(serde_json::from_str::<Question>(json).is_err());
    }
}
