use serde_json::Value;

pub const MIN_SCORE: u8 = 1;
pub const MAX_SCORE: u8 = 10;
pub const MAX_KEYWORDS: usize = 5;

/// Importance score and keywords extracted from a model answer.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreResponse {
    pub score: u8,
    pub keywords: Vec<String>,
}

/// Pull `{"s": score, "k": [keywords]}` out of free-form model output.
///
/// Models wrap the object in prose or code fences, so the span from the first
/// `{` to the last `}` is parsed. The long field names `score` and `keywords`
/// are accepted too. Scores are clamped to 1..=10 and keywords truncated to
/// five. Returns `None` when no numeric score is present.
pub fn parse_score_response(text: &str) -> Option<ScoreResponse> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    let value: Value = serde_json::from_str(&text[start..=end]).ok()?;

    let score = ["s", "score"]
        .iter()
        .find_map(|key| value.get(*key).and_then(numeric))?;
    let score = score.round().clamp(MIN_SCORE as f64, MAX_SCORE as f64) as u8;

    let keywords = ["k", "keywords"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_array))
        .map(|list| {
            list.iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .take(MAX_KEYWORDS)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Some(ScoreResponse { score, keywords })
}

fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
    .filter(|n: &f64| n.is_finite())
}
