use std::env;
use std::path::PathBuf;
use std::time::Duration;

use supplink_core::{AppError, AppResult};
use supplink_domain::ApprovalPolicy;

/// Shell settings read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    pub seed_path: Option<PathBuf>,
    pub approval_policy: ApprovalPolicy,
    pub fetch_timeout: Duration,
}

impl ShellConfig {
    pub fn load() -> AppResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let seed_path = lookup("SUPPLINK_SEED_PATH")
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        let approval_policy = match lookup("SUPPLINK_APPROVAL_POLICY") {
            Some(value) => value.parse::<ApprovalPolicy>().map_err(|error| {
                AppError::Validation(format!(
                    "invalid SUPPLINK_APPROVAL_POLICY: {}",
                    error.user_message()
                ))
            })?,
            None => ApprovalPolicy::default(),
        };
        let fetch_timeout_ms = parse_u64(&lookup, "SUPPLINK_FETCH_TIMEOUT_MS", 5000)?;

        if fetch_timeout_ms == 0 {
            return Err(AppError::Validation(
                "SUPPLINK_FETCH_TIMEOUT_MS must be greater than zero".to_owned(),
            ));
        }

        Ok(Self {
            seed_path,
            approval_policy,
            fetch_timeout: Duration::from_millis(fetch_timeout_ms),
        })
    }
}

fn parse_u64(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: u64,
) -> AppResult<u64> {
    match lookup(name) {
        Some(value) => value.trim().parse::<u64>().map_err(|error| {
            AppError::Validation(format!("invalid {name} value '{value}': {error}"))
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load_with(vars: &[(&str, &str)]) -> AppResult<ShellConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
            .collect();
        ShellConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = load_with(&[]);
        assert_eq!(
            config,
            Ok(ShellConfig {
                seed_path: None,
                approval_policy: ApprovalPolicy::Legacy,
                fetch_timeout: Duration::from_millis(5000),
            })
        );
    }

    #[test]
    fn values_are_parsed() {
        let config = load_with(&[
            ("SUPPLINK_SEED_PATH", " fixtures/seed.json "),
            ("SUPPLINK_APPROVAL_POLICY", "strict"),
            ("SUPPLINK_FETCH_TIMEOUT_MS", "250"),
        ])
        .unwrap_or_else(|_| unreachable!());

        assert_eq!(config.seed_path, Some(PathBuf::from("fixtures/seed.json")));
        assert_eq!(config.approval_policy, ApprovalPolicy::Strict);
        assert_eq!(config.fetch_timeout, Duration::from_millis(250));
    }

    #[test]
    fn invalid_values_are_validation_errors() {
        assert!(matches!(
            load_with(&[("SUPPLINK_APPROVAL_POLICY", "lenient")]),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            load_with(&[("SUPPLINK_FETCH_TIMEOUT_MS", "soon")]),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            load_with(&[("SUPPLINK_FETCH_TIMEOUT_MS", "0")]),
            Err(AppError::Validation(_))
        ));
    }
}
