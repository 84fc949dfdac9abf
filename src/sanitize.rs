use serde::Deserialize;
use serde_json::Value;
use tracing::{error, info};

use crate::errors::{GenerationFailure, GenerationOutcome};
use crate::models::{FitnessPlan, DAYS_PER_PLAN};

const FENCE: &str = "```";

/// Removes code fence markers (with an optional `json` tag) and trims.
/// Repeats until nothing changes, so applying it twice equals once.
pub fn sanitize(raw: &str) -> String {
    let mut current = raw.trim().to_string();
    loop {
        let next = strip_fences(&current).trim().to_string();
        if next == current {
            return current;
        }
        current = next;
    }
}

fn strip_fences(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(idx) = rest.find(FENCE) {
        out.push_str(&rest[..idx]);
        rest = &rest[idx + FENCE.len()..];
        if rest.get(..4).is_some_and(|tag| tag.eq_ignore_ascii_case("json")) {
            rest = &rest[4..];
        }
    }
    out.push_str(rest);
    out
}

/// Parse-then-validate pipeline for live plan output. Never repairs: a
/// plan with the wrong shape is a failure, not best-effort output.
pub fn sanitize_and_validate(raw: &str) -> GenerationOutcome<FitnessPlan> {
    let cleaned = sanitize(raw);
    let parsed: Value = match serde_json::from_str(&cleaned) {
        Ok(value) => value,
        Err(e) => {
            error!("❌ JSON parse error in plan output: {}", e);
            return Err(GenerationFailure::invalid_output(
                Value::String(cleaned),
                format!("Invalid JSON returned from provider: {e}"),
            ));
        }
    };
    validate(parsed)
}

/// Structural checks on already-parsed output. The parsed object is the
/// diagnostic payload on failure.
pub fn validate(parsed: Value) -> GenerationOutcome<FitnessPlan> {
    if let Some(days) = parsed.get("workoutPlan").and_then(Value::as_array) {
        if days.len() != DAYS_PER_PLAN {
            let message = format!("expected {DAYS_PER_PLAN} workout days, found {}", days.len());
            error!("❌ Plan output rejected: {}", message);
            return Err(GenerationFailure::invalid_output(parsed, message));
        }
    }

    let plan = match FitnessPlan::deserialize(&parsed) {
        Ok(plan) => plan,
        Err(e) => {
            error!("❌ Plan output does not match schema: {}", e);
            return Err(GenerationFailure::invalid_output(
                parsed,
                format!("Plan does not match schema: {e}"),
            ));
        }
    };

    info!(
        "✅ Plan output validated: {} days, {} tips",
        plan.workout_plan.len(),
        plan.tips.len()
    );
    Ok(plan)
}

/// Char-safe preview for log lines.
pub fn preview(text: &str, max_chars: usize) -> String {
    let total = text.chars().count();
    if total <= max_chars {
        text.to_string()
    } else {
        let head: String = text.chars().take(max_chars).collect();
        format!("{head}...[{total} chars total]")
    }
}
