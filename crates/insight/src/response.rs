use crate::error::InsightError;
use fabwatch_core::AnomalyVerdict;
use serde_json::Value;

/// Concatenate the text parts of the first candidate of a
/// `generateContent` reply.
///
/// Returns `None` when the reply carries no text at all (blocked prompt,
/// empty candidate list, unexpected shape).
pub fn extract_text(body: &Value) -> Option<String> {
    let parts = body
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .as_array()?;

    let text: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();

    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Parse a structured anomaly reply.
///
/// The reply must be a JSON object whose `isAnomaly` is a boolean; `reason`
/// must be a string when present. Anything else is a decode error; nothing
/// is guessed from loosely shaped data.
pub fn parse_anomaly(text: &str) -> Result<AnomalyVerdict, InsightError> {
    let value: Value = serde_json::from_str(strip_code_fence(text))
        .map_err(|e| InsightError::Decode(format!("anomaly reply is not JSON: {e}")))?;

    let object = value
        .as_object()
        .ok_or_else(|| InsightError::Decode("anomaly reply is not an object".into()))?;

    let is_anomaly = object
        .get("isAnomaly")
        .and_then(Value::as_bool)
        .ok_or_else(|| InsightError::Decode("`isAnomaly` missing or not a boolean".into()))?;

    let reason = match object.get("reason") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(_) => return Err(InsightError::Decode("`reason` is not a string".into())),
    };

    Ok(AnomalyVerdict { is_anomaly, reason })
}

/// Drop a surrounding Markdown code fence (```` ```json ... ``` ````), if any.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}
