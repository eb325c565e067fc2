use std::env;
use std::str::FromStr;

/// Retrieves an environment variable, falling back to `default` when unset or empty.
pub fn get_env_var_or(var: &str, default: &str) -> String {
    env::var(var)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Retrieves and parses an environment variable.
///
/// # Returns
/// - The parsed value, or `default` when the variable is unset or does not parse.
pub fn get_env_var_parsed<T: FromStr>(var: &str, default: T) -> T {
    env::var(var)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_for_unset_variables() {
        let var = "TOPIC_FORGE_TEST_SURELY_UNSET";
        assert_eq!(get_env_var_or(var, "fallback"), "fallback");
        assert_eq!(get_env_var_parsed(var, 11434u16), 11434);
    }
}
