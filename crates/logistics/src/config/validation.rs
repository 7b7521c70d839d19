use smartcotton_common::config::LogisticsConfig;

use super::loader::ConfigError;

/// Validate the service configuration.
///
/// Checks sane ranges on numeric parameters and non-empty identifiers.
/// Every problem is collected into one message.
pub fn validate(config: &LogisticsConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_solver(config, &mut errors);
    validate_insights(config, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::Validation(errors.join("; ")))
    }
}

fn validate_solver(config: &LogisticsConfig, errors: &mut Vec<String>) {
    let s = &config.solver;

    if !is_http_url(&s.base_url) {
        errors.push("solver.base_url must be an http(s) URL".into());
    }
    if s.profile.is_empty() {
        errors.push("solver.profile must not be empty".into());
    }
    if s.timeout_seconds == 0 {
        errors.push("solver.timeout_seconds must be > 0".into());
    }
}

fn validate_insights(config: &LogisticsConfig, errors: &mut Vec<String>) {
    let i = &config.insights;

    if !is_http_url(&i.base_url) {
        errors.push("insights.base_url must be an http(s) URL".into());
    }
    if i.model.is_empty() {
        errors.push("insights.model must not be empty".into());
    }
    if i.timeout_seconds == 0 {
        errors.push("insights.timeout_seconds must be > 0".into());
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartcotton_common::config::{InsightsConfig, SolverConfig};

    fn valid_config() -> LogisticsConfig {
        LogisticsConfig {
            solver: SolverConfig {
                base_url: "https://api.openrouteservice.org".into(),
                profile: "driving-car".into(),
                timeout_seconds: 30,
            },
            insights: InsightsConfig {
                base_url: "https://generativelanguage.googleapis.com".into(),
                model: "gemini-2.0-flash-exp".into(),
                timeout_seconds: 30,
            },
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_all_problems_reported() {
        let mut config = valid_config();
        config.solver.base_url = "api.openrouteservice.org".into();
        config.solver.timeout_seconds = 0;
        config.insights.model = String::new();

        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("solver.base_url"));
        assert!(err.contains("solver.timeout_seconds"));
        assert!(err.contains("insights.model"));
        assert!(!err.contains("solver.profile"));
    }
}
