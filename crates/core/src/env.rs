//! Environment helpers: `.env` loading and `${VAR}` reference expansion.

use crate::error::CoreError;

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

/// Expand `${VAR_NAME}` references in `input` from the process environment.
///
/// Fails if a referenced variable is unset or a reference is unclosed.
pub fn resolve_env_refs(input: &str) -> Result<String, CoreError> {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && chars.peek() == Some(&'{') {
            chars.next();
            let mut var_name = String::new();
            let mut closed = false;
            for c in chars.by_ref() {
                if c == '}' {
                    closed = true;
                    break;
                }
                var_name.push(c);
            }
            if !closed {
                return Err(CoreError::Config(format!(
                    "unclosed env var reference in: {input}"
                )));
            }
            let value = std::env::var(&var_name)
                .ok()
                .filter(|v| !v.is_empty())
                .ok_or(CoreError::MissingEnv(var_name))?;
            result.push_str(&value);
        } else {
            result.push(ch);
        }
    }

    Ok(result)
}
