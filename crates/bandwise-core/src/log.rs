//! Append-only ledger of submitted responses.

use serde::{Deserialize, Serialize};

use crate::table::DifficultyCode;

/// Column headers of the exported response table, in order.
pub const EXPORT_COLUMNS: [&str; 5] = [
    "Name",
    "Question_Count",
    "Difficulty",
    "Correct/Incorrect",
    "Confidence",
];

/// One answered question.
///
/// `confidence` is the value in effect *before* this answer was scored, so
/// the entry for question `n` carries the confidence computed after `n - 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    #[serde(rename = "Name")]
    pub name: String,
    /// 1-based position in the session.
    #[serde(rename = "Question_Count")]
    pub question_count: usize,
    #[serde(rename = "Difficulty")]
    pub difficulty: DifficultyCode,
    #[serde(rename = "Correct/Incorrect", with = "outcome")]
    pub correct: bool,
    #[serde(rename = "Confidence")]
    pub confidence: f64,
}

impl Response {
    /// `"Correct"` or `"Incorrect"`.
    pub fn outcome_label(&self) -> &'static str {
        outcome::label(self.correct)
    }

    /// Cell values in [`EXPORT_COLUMNS`] order.
    pub fn cells(&self) -> [String; 5] {
        [
            self.name.clone(),
            self.question_count.to_string(),
            self.difficulty.to_string(),
            self.outcome_label().to_string(),
            format!("{:.6}", self.confidence),
        ]
    }
}

mod outcome {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn label(correct: bool) -> &'static str {
        if correct {
            "Correct"
        } else {
            "Incorrect"
        }
    }

    pub fn serialize<S: Serializer>(correct: &bool, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(label(*correct))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        let raw = String::deserialize(d)?;
        match raw.as_str() {
            "Correct" => Ok(true),
            "Incorrect" => Ok(false),
            other => Err(serde::de::Error::custom(format!(
                "expected \"Correct\" or \"Incorrect\", got \"{other}\""
            ))),
        }
    }
}

/// Ordered, append-only sequence of [`Response`] records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseLog {
    entries: Vec<Response>,
}

impl ResponseLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn append(&mut self, response: Response) {
        self.entries.push(response);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&Response> {
        self.entries.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Response> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[Response] {
        &self.entries
    }
}

impl<'a> IntoIterator for &'a ResponseLog {
    type Item = &'a Response;
    type IntoIter = std::slice::Iter<'a, Response>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(n: usize, correct: bool) -> Response {
        Response {
            name: "Ada".into(),
            question_count: n,
            difficulty: DifficultyCode(7),
            correct,
            confidence: 0.25,
        }
    }

    #[test]
    fn serializes_with_export_column_names() {
        let json = serde_json::to_value(response(3, false)).unwrap();
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        for column in EXPORT_COLUMNS {
            assert!(keys.contains(&column), "missing column {column}");
        }
        assert_eq!(json["Correct/Incorrect"], "Incorrect");
        assert_eq!(json["Difficulty"], 7);
    }

    #[test]
    fn rejects_unknown_outcome_label() {
        let raw = r#"{"Name":"x","Question_Count":1,"Difficulty":0,"Correct/Incorrect":"Maybe","Confidence":0.0}"#;
        assert!(serde_json::from_str::<Response>(raw).is_err());
    }

    #[test]
    fn cells_follow_column_order() {
        let cells = response(2, true).cells();
        assert_eq!(cells[0], "Ada");
        assert_eq!(cells[1], "2");
        assert_eq!(cells[2], "7");
        assert_eq!(cells[3], "Correct");
        assert_eq!(cells[4], "0.250000");
    }

    #[test]
    fn log_appends_in_order() {
        let mut log = ResponseLog::new();
        assert!(log.is_empty());
        log.append(response(1, true));
        log.append(response(2, false));
        assert_eq!(log.len(), 2);
        let counts: Vec<usize> = log.iter().map(|r| r.question_count).collect();
        assert_eq!(counts, vec![1, 2]);
        assert!(!log.last().unwrap().correct);
    }
}
