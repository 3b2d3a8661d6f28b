use crate::utils::error::{DeployError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(DeployError::invalid_value(
            field_name,
            url_str,
            "URL cannot be empty",
        ));
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(DeployError::invalid_value(
                field_name,
                url_str,
                format!("Unsupported URL scheme: {}", scheme),
            )),
        },
        Err(e) => Err(DeployError::invalid_value(
            field_name,
            url_str,
            format!("Invalid URL format: {}", e),
        )),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DeployError::invalid_value(
            field_name,
            value,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(DeployError::invalid_value(
            field_name,
            value,
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

/// Checks `0 <= request <= limit` for one resource dimension.
pub fn validate_request_limit<T: PartialOrd + std::fmt::Display + Copy + Default>(
    field_name: &str,
    request: T,
    limit: T,
) -> Result<()> {
    if request < T::default() {
        return Err(DeployError::invalid_value(
            format!("{}_request", field_name),
            request,
            "Request cannot be negative",
        ));
    }
    if request > limit {
        return Err(DeployError::invalid_value(
            format!("{}_limit", field_name),
            limit,
            format!("Limit must be greater than or equal to request ({})", request),
        ));
    }
    Ok(())
}

/// Service names: lowercase letters, digits and `-`, 3 to 32 chars,
/// starting with a letter and not ending with `-`.
pub fn validate_resource_name(field_name: &str, name: &str) -> Result<()> {
    let len = name.chars().count();
    if !(3..=32).contains(&len) {
        return Err(DeployError::invalid_value(
            field_name,
            name,
            "Name must be between 3 and 32 characters",
        ));
    }

    let mut chars = name.chars();
    if !chars.next().is_some_and(|c| c.is_ascii_lowercase()) {
        return Err(DeployError::invalid_value(
            field_name,
            name,
            "Name must start with a lowercase letter",
        ));
    }
    if name.ends_with('-') {
        return Err(DeployError::invalid_value(
            field_name,
            name,
            "Name cannot end with '-'",
        ));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(DeployError::invalid_value(
            field_name,
            name,
            "Only lowercase alphanumeric characters and '-' are allowed",
        ));
    }
    Ok(())
}

pub fn validate_hostname(field_name: &str, host: &str) -> Result<()> {
    validate_non_empty_string(field_name, host)?;

    if host.len() > 253 {
        return Err(DeployError::invalid_value(
            field_name,
            host,
            "Hostname is longer than 253 characters",
        ));
    }

    for label in host.split('.') {
        let valid = !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-');
        if !valid {
            return Err(DeployError::invalid_value(
                field_name,
                host,
                format!("Invalid DNS label '{}'", label),
            ));
        }
    }
    Ok(())
}

/// Routing prefixes are absolute and directory-like: `/name/`.
pub fn validate_path_prefix(field_name: &str, path: &str) -> Result<()> {
    if !path.starts_with('/') || !path.ends_with('/') {
        return Err(DeployError::invalid_value(
            field_name,
            path,
            "Path must start and end with '/'",
        ));
    }
    if path.chars().any(char::is_whitespace) {
        return Err(DeployError::invalid_value(
            field_name,
            path,
            "Path cannot contain whitespace",
        ));
    }
    Ok(())
}

/// Workspace FQNs have the shape `<cluster>:<workspace>`.
pub fn validate_workspace_fqn(field_name: &str, fqn: &str) -> Result<()> {
    match fqn.split_once(':') {
        Some((cluster, workspace))
            if !cluster.trim().is_empty()
                && !workspace.trim().is_empty()
                && !workspace.contains(':') =>
        {
            Ok(())
        }
        _ => Err(DeployError::invalid_value(
            field_name,
            fqn,
            "Expected '<cluster>:<workspace>'",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("TFY_HOST", "https://example.com").is_ok());
        assert!(validate_url("TFY_HOST", "http://example.com").is_ok());
        assert!(validate_url("TFY_HOST", "").is_err());
        assert!(validate_url("TFY_HOST", "invalid-url").is_err());
        assert!(validate_url("TFY_HOST", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_request_limit() {
        assert!(validate_request_limit("cpu", 0.5, 0.5).is_ok());
        assert!(validate_request_limit("memory", 500u32, 1000u32).is_ok());
        assert!(validate_request_limit("cpu", 1.0, 0.5).is_err());
        assert!(validate_request_limit("cpu", -0.1, 0.5).is_err());
    }

    #[test]
    fn test_validate_resource_name() {
        assert!(validate_resource_name("name", "fast-mcp").is_ok());
        assert!(validate_resource_name("name", "ab").is_err());
        assert!(validate_resource_name("name", "Fast-mcp").is_err());
        assert!(validate_resource_name("name", "1fast").is_err());
        assert!(validate_resource_name("name", "fast-").is_err());
        assert!(validate_resource_name("name", "fast_mcp").is_err());
    }

    #[test]
    fn test_validate_hostname() {
        assert!(validate_hostname("host", "ml.tfy-eo.truefoundry.cloud").is_ok());
        assert!(validate_hostname("host", "").is_err());
        assert!(validate_hostname("host", "bad..host").is_err());
        assert!(validate_hostname("host", "-bad.host").is_err());
    }

    #[test]
    fn test_validate_path_prefix() {
        assert!(validate_path_prefix("path", "/fast-mcp-rishi-ws-8096/").is_ok());
        assert!(validate_path_prefix("path", "/").is_ok());
        assert!(validate_path_prefix("path", "fast-mcp/").is_err());
        assert!(validate_path_prefix("path", "/fast-mcp").is_err());
    }

    #[test]
    fn test_validate_workspace_fqn() {
        assert!(validate_workspace_fqn("workspace_fqn", "tfy-ea-dev-eo-az:rishi-ws").is_ok());
        assert!(validate_workspace_fqn("workspace_fqn", "rishi-ws").is_err());
        assert!(validate_workspace_fqn("workspace_fqn", ":rishi-ws").is_err());
        assert!(validate_workspace_fqn("workspace_fqn", "a:b:c").is_err());
    }
}
