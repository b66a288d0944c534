//! Second-level fallback: derive a verdict from a malformed (non-JSON)
//! classifier payload by scanning the text for known specialist ids.

use super::traits::ClassifierVerdict;

/// Confidence assumed when the payload names a specialist but no number.
const DEFAULT_TEXT_CONFIDENCE: f64 = 0.5;

/// Best-effort extraction of a verdict from free text. Returns `None` when
/// no known specialist id appears, in which case the caller should treat the
/// payload as unusable.
pub fn extract_verdict(text: &str, known_specialists: &[String]) -> Option<ClassifierVerdict> {
    let lower = text.to_lowercase();

    // Earliest-mentioned specialist wins.
    let target = known_specialists
        .iter()
        .filter_map(|id| lower.find(&id.to_lowercase()).map(|pos| (pos, id)))
        .min_by_key(|(pos, _)| *pos)
        .map(|(_, id)| id.clone())?;

    let confidence = first_unit_float(&lower).unwrap_or(DEFAULT_TEXT_CONFIDENCE);
    let needs_clarification = lower.contains("clarif");

    Some(ClassifierVerdict {
        target_specialist: target,
        confidence,
        rationale: format!("extracted from unstructured classifier output: {}", summary(text)),
        needs_clarification,
    })
}

/// First decimal in `[0, 1]` appearing in the text, e.g. from
/// "confidence: 0.85".
fn first_unit_float(lower: &str) -> Option<f64> {
    let mut token = String::new();
    let mut chars = lower.chars().peekable();
    while let Some(c) = chars.next() {
        if c.is_ascii_digit() {
            token.clear();
            token.push(c);
            while let Some(&next) = chars.peek() {
                if next.is_ascii_digit() || next == '.' {
                    token.push(next);
                    chars.next();
                } else {
                    break;
                }
            }
            if let Ok(value) = token.trim_end_matches('.').parse::<f64>() {
                if (0.0..=1.0).contains(&value) && token.contains('.') {
                    return Some(value);
                }
            }
        }
    }
    None
}

fn summary(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= 60 {
        return trimmed.to_string();
    }
    let head: String = trimmed.chars().take(57).collect();
    format!("{head}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn known() -> Vec<String> {
        vec![
            "technical-specialist".into(),
            "business-analyst".into(),
            "general-assistant".into(),
        ]
    }

    #[test]
    fn extracts_specialist_and_confidence() {
        let verdict = extract_verdict(
            "I'd route this to the technical-specialist, confidence: 0.85",
            &known(),
        )
        .unwrap();
        assert_eq!(verdict.target_specialist, "technical-specialist");
        assert!((verdict.confidence - 0.85).abs() < 1e-9);
        assert!(!verdict.needs_clarification);
    }

    #[test]
    fn defaults_confidence_when_no_number() {
        let verdict =
            extract_verdict("business-analyst seems right for this", &known()).unwrap();
        assert!((verdict.confidence - 0.5).abs() < 1e-9);
    }

    #[test]
    fn earliest_mention_wins() {
        let verdict = extract_verdict(
            "either business-analyst or technical-specialist could work",
            &known(),
        )
        .unwrap();
        assert_eq!(verdict.target_specialist, "business-analyst");
    }

    #[test]
    fn detects_clarification_request() {
        let verdict = extract_verdict(
            "general-assistant, but clarification is needed",
            &known(),
        )
        .unwrap();
        assert!(verdict.needs_clarification);
    }

    #[test]
    fn unknown_text_yields_none() {
        assert!(extract_verdict("no idea what this is", &known()).is_none());
    }

    #[test]
    fn integer_version_numbers_are_not_confidence() {
        let verdict = extract_verdict("technical-specialist v2 handles this", &known()).unwrap();
        assert!((verdict.confidence - 0.5).abs() < 1e-9);
    }
}
