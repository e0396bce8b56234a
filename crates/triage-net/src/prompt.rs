//! Fixed instruction prompt for the triage classifier.

/// System instruction sent with every classification request. The JSON shape
/// it asks for must stay in sync with `triage_core::TriageAnalysis`.
pub const TRIAGE_SYSTEM_PROMPT: &str = r#"You are a medical triage assistant. Analyze the provided medical data and determine if it's an emergency.
Respond with a JSON object containing:
{
    "is_emergency": boolean,
    "severity_level": string (LOW|MEDIUM|HIGH|CRITICAL),
    "reason": string,
    "recommended_action": string,
    "processed_data": object,
    "required_specialists": array of strings
}
Respond with the JSON object only, no surrounding prose."#;

/// Builds the user message for a classification request.
pub fn build_user_message(extracted_json: &str) -> String {
    format!("Analyze this medical data: {}", extracted_json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_embeds_payload() {
        let msg = build_user_message(r#"{"symptoms":"chest pain"}"#);
        assert!(msg.starts_with("Analyze this medical data:"));
        assert!(msg.contains("chest pain"));
    }
}
