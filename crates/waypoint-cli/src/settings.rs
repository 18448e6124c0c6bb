use anyhow::Result;
use waypoint_client::config::DEFAULT_URL;

/// Environment variable consulted when `--url` is not given.
pub const URL_ENV_VAR: &str = "WAYPOINT_SERVICE_URL";

/// Validates that a URL string starts with http:// or https://
///
/// # Errors
///
/// Returns an error if the URL doesn't start with http:// or https://
pub fn validate_http_url(url: &str, description: &str) -> Result<()> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(anyhow::anyhow!(
            "Invalid {}: '{}' must start with http:// or https://",
            description,
            url
        ))
    }
}

/// Picks the service URL: flag, then environment, then the default.
pub fn resolve_url(flag: Option<String>, env: Option<String>) -> String {
    flag.or_else(|| env.filter(|value| !value.trim().is_empty()))
        .unwrap_or_else(|| DEFAULT_URL.to_string())
}

/// Splits a `name:value` header argument.
pub fn parse_header(arg: &str) -> Result<(String, String)> {
    let (name, value) = arg
        .split_once(':')
        .ok_or_else(|| anyhow::anyhow!("Invalid header '{}': expected name:value", arg))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(anyhow::anyhow!("Invalid header '{}': empty name", arg));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_http_url() {
        assert!(validate_http_url("http://127.0.0.1:8080", "service URL").is_ok());
        assert!(validate_http_url("https://example.com", "service URL").is_ok());

        let err = validate_http_url("127.0.0.1:8080", "service URL").unwrap_err();
        assert!(err.to_string().contains("service URL"));
    }

    #[test]
    fn test_resolve_url_precedence() {
        assert_eq!(
            resolve_url(Some("http://flag:1".into()), Some("http://env:2".into())),
            "http://flag:1"
        );
        assert_eq!(resolve_url(None, Some("http://env:2".into())), "http://env:2");
        assert_eq!(resolve_url(None, Some("  ".into())), "http://127.0.0.1:8080");
        assert_eq!(resolve_url(None, None), "http://127.0.0.1:8080");
    }

    #[test]
    fn test_parse_header() {
        assert_eq!(
            parse_header("X-Client: cli").unwrap(),
            ("X-Client".to_string(), "cli".to_string())
        );
        // only the first colon separates
        assert_eq!(
            parse_header("Referer:http://host/").unwrap(),
            ("Referer".to_string(), "http://host/".to_string())
        );
        assert!(parse_header("no-colon").is_err());
        assert!(parse_header(":value").is_err());
    }
}
