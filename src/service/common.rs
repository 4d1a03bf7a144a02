//! Common helpers for the service layer

use reqwest::StatusCode;

use crate::enhancer::templates::{META_PROMPT_TEMPLATE, USER_PROMPT_PLACEHOLDER};

/// Render the meta-prompt without corrupting user input
/// Uses split+concat instead of replace so placeholder text inside the idea
/// is left alone
pub fn render_meta_prompt(user_prompt: &str) -> String {
    match META_PROMPT_TEMPLATE.split_once(USER_PROMPT_PLACEHOLDER) {
        Some((before, after)) => {
            let mut rendered =
                String::with_capacity(before.len() + user_prompt.len() + after.len());
            rendered.push_str(before);
            rendered.push_str(user_prompt);
            rendered.push_str(after);
            rendered
        }
        None => format!("{}{}", META_PROMPT_TEMPLATE, user_prompt),
    }
}

/// Mask an API key for display, keeping four characters at each end
pub fn mask_key(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() > 8 {
        let prefix: String = chars[..4].iter().collect();
        let suffix: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", prefix, suffix)
    } else {
        "****".to_string()
    }
}

/// Mask the `key` query parameter of a URL so it can be logged
pub fn redact_url(url: &str) -> String {
    let Some((base, query)) = url.split_once('?') else {
        return url.to_string();
    };

    let params: Vec<String> = query
        .split('&')
        .map(|param| match param.split_once('=') {
            Some(("key", value)) => format!("key={}", mask_key(value)),
            _ => param.to_string(),
        })
        .collect();

    format!("{}?{}", base, params.join("&"))
}

/// Describe a non-success HTTP status for the user
pub fn describe_status(status: StatusCode, body: &str, provider: &str) -> String {
    match status.as_u16() {
        401 => format!("{} API key invalid or expired", provider),
        403 => format!("{} access denied, API key may be disabled", provider),
        _ => {
            let body = body.split_whitespace().collect::<Vec<_>>().join(" ");
            format!("{} API failed: {} - {}", provider, status, body)
        }
    }
}
