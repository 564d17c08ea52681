//! Presentation helpers for backend error payloads.

/// Returned when there is nothing to format
pub const GENERIC_VALIDATION_MESSAGE: &str = "Validation error";

const DEFAULT_MIN_LENGTH: &str = "6";

/// Collapse raw backend validation messages (`"email must be an email"`,
/// ...) into a single sentence, one clause per field in first-seen order.
pub fn format_validation_errors(messages: &[String]) -> String {
    if messages.is_empty() {
        return GENERIC_VALIDATION_MESSAGE.to_string();
    }

    let mut groups: Vec<(&str, Vec<&str>)> = Vec::new();
    for msg in messages {
        let field = extract_field_name(msg);
        match groups.iter_mut().find(|(name, _)| *name == field) {
            Some((_, errors)) => errors.push(msg.as_str()),
            None => groups.push((field, vec![msg.as_str()])),
        }
    }

    groups
        .iter()
        .map(|(field, errors)| format_field(field, errors))
        .collect::<Vec<_>>()
        .join(". ")
}

fn format_field(field: &str, errors: &[&str]) -> String {
    let field_name = capitalize_first_letter(field);

    if errors.iter().any(|e| e.contains("should not be empty")) {
        format!("{} is required", field_name)
    } else if errors.iter().any(|e| e.contains("must be an email")) {
        "Please enter a valid email address".to_string()
    } else if errors.iter().any(|e| e.contains("longer than or equal")) {
        // Bound is read from the group's first message, as the backend words it
        let min_length = first_number(errors[0]).unwrap_or(DEFAULT_MIN_LENGTH);
        format!("{} must be at least {} characters", field_name, min_length)
    } else {
        errors[0].to_string()
    }
}

/// Leading word token, `"field"` when the message does not start with one
fn extract_field_name(message: &str) -> &str {
    let end = message
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_alphanumeric() || *c == '_'))
        .map(|(i, _)| i)
        .unwrap_or(message.len());

    if end == 0 {
        "field"
    } else {
        &message[..end]
    }
}

fn first_number(message: &str) -> Option<&str> {
    let start = message.find(|c: char| c.is_ascii_digit())?;
    let rest = &message[start..];
    let len = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    Some(&rest[..len])
}

fn capitalize_first_letter(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
