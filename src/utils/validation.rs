// Validation utilities
use crate::error::{Error, Result};
use regex::Regex;
use std::sync::OnceLock;
use tracing::warn;
use url::Url;

/// Upper bound GitHub accepts for `per_page`
pub const MAX_LIMIT: usize = 100;

fn language_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // Words of letters, digits and + # . - _ separated by single spaces
    PATTERN.get_or_init(|| {
        Regex::new(r"^[\w+#.\-]+( [\w+#.\-]+)*$").expect("language pattern is valid")
    })
}

/// Validate a language name before it goes into a `language:` qualifier
///
/// Rejects anything that could smuggle extra qualifiers into the query,
/// such as `python stars:>0` or quotes.
pub fn validate_language(language: &str) -> Result<String> {
    let trimmed = language.trim();

    if trimmed.is_empty() {
        return Err(Error::Validation("Language must not be empty".to_string()));
    }

    if !language_pattern().is_match(trimmed) {
        warn!("Rejected language filter: {:?}", language);
        return Err(Error::Validation(format!(
            "Invalid language name: {trimmed}"
        )));
    }

    Ok(trimmed.to_string())
}

/// Validate a requested result count
pub fn validate_limit(limit: usize) -> Result<usize> {
    if limit == 0 {
        return Err(Error::Validation("Limit must be at least 1".to_string()));
    }
    if limit > MAX_LIMIT {
        return Err(Error::Validation(format!(
            "Limit must be at most {MAX_LIMIT}"
        )));
    }
    Ok(limit)
}

/// Validate the API base URL uses http or https and has a host
pub fn validate_api_url(url_str: &str) -> Result<Url> {
    let url = Url::parse(url_str)?;

    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(Error::Validation(format!(
                "API URL must use http or https scheme, got {other}"
            )));
        }
    }

    if url.host_str().is_none() {
        return Err(Error::Validation("API URL must have a valid host".to_string()));
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_languages() {
        assert_eq!(validate_language("python").unwrap(), "python");
        assert_eq!(validate_language("  C++ ").unwrap(), "C++");
        assert_eq!(validate_language("C#").unwrap(), "C#");
        assert_eq!(validate_language("objective-c").unwrap(), "objective-c");
        assert_eq!(
            validate_language("Jupyter Notebook").unwrap(),
            "Jupyter Notebook"
        );
    }

    #[test]
    fn test_invalid_languages() {
        assert!(validate_language("").is_err());
        assert!(validate_language("   ").is_err());
        assert!(validate_language("python stars:>0").is_err());
        assert!(validate_language("rust\"").is_err());
        assert!(validate_language("go  lang").is_err());
    }

    #[test]
    fn test_limits() {
        assert!(validate_limit(0).is_err());
        assert_eq!(validate_limit(1).unwrap(), 1);
        assert_eq!(validate_limit(100).unwrap(), 100);
        assert!(validate_limit(101).is_err());
    }

    #[test]
    fn test_api_url() {
        assert!(validate_api_url("https://api.github.com").is_ok());
        assert!(validate_api_url("http://127.0.0.1:8080").is_ok());
        assert!(validate_api_url("ftp://api.github.com").is_err());
        assert!(validate_api_url("not a url").is_err());
    }
}
