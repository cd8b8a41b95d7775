use super::Config;
use anyhow::{Context, Result};
use std::path::Path;

/// Characters Excel refuses in worksheet names
const FORBIDDEN_SHEET_CHARS: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];

/// Maximum worksheet name length accepted by Excel
const MAX_SHEET_NAME_LEN: usize = 31;

/// Read and validate a config file
///
/// # Errors
///
/// Returns an error if the file cannot be read or its contents are invalid.
pub fn parse_config_file(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_config_str(&content)
        .with_context(|| format!("Invalid config file: {}", path.display()))
}

/// Parse and validate TOML config text
///
/// # Errors
///
/// Returns an error on malformed TOML or a value [`validate_config`] rejects.
pub fn parse_config_str(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).context("Failed to parse TOML config")?;

    // Validation errors are returned directly without wrapping
    validate_config(&config)?;
    Ok(config)
}

/// Check values the workbook writer or the file lister would reject later
///
/// # Errors
///
/// Returns the first invalid value found.
pub fn validate_config(config: &Config) -> Result<()> {
    let extension = &config.input.extension;
    if extension.is_empty() {
        anyhow::bail!("Input extension cannot be empty");
    }
    if extension.contains('.') {
        anyhow::bail!("Input extension must not contain a dot: {extension:?}");
    }

    if config.output.path.as_os_str().is_empty() {
        anyhow::bail!("Output path cannot be empty");
    }

    validate_sheet_name(&config.output.sheet_name)
}

/// Excel worksheet name rules: 1 to 31 characters, none of `[]:*?/\`
///
/// # Errors
///
/// Returns an error describing the violated rule.
pub fn validate_sheet_name(name: &str) -> Result<()> {
    let len = name.chars().count();
    if len == 0 || len > MAX_SHEET_NAME_LEN {
        anyhow::bail!("Sheet name must be between 1 and {MAX_SHEET_NAME_LEN} characters: {name:?}");
    }
    if let Some(c) = name.chars().find(|c| FORBIDDEN_SHEET_CHARS.contains(c)) {
        anyhow::bail!("Sheet name contains forbidden character {c:?}: {name:?}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parse_empty_config_uses_defaults() -> Result<()> {
        let config = parse_config_str("")?;
        assert_eq!(config, Config::default());
        Ok(())
    }

    #[test]
    fn test_parse_full_config() -> Result<()> {
        let config = parse_config_str(
            r#"
[input]
dir = "/data/realm"
extension = "export"

[output]
path = "out/users.xlsx"
sheet_name = "Comptes"
ldap_dates = true
"#,
        )?;

        assert_eq!(config.input.dir, PathBuf::from("/data/realm"));
        assert_eq!(config.input.extension, "export");
        assert_eq!(config.output.path, PathBuf::from("out/users.xlsx"));
        assert_eq!(config.output.sheet_name, "Comptes");
        assert!(config.output.ldap_dates);
        Ok(())
    }

    #[test]
    fn test_invalid_toml_fails() {
        assert!(parse_config_str("[input\ndir = 1").is_err());
    }

    #[test]
    fn test_rejects_dotted_extension() {
        let err = parse_config_str("[input]\nextension = \".json\"\n").unwrap_err();
        assert!(err.to_string().contains("must not contain a dot"));
    }

    #[test]
    fn test_rejects_empty_extension() {
        assert!(parse_config_str("[input]\nextension = \"\"\n").is_err());
    }

    #[test]
    fn test_sheet_name_rules() {
        assert!(validate_sheet_name("Users").is_ok());
        assert!(validate_sheet_name("Utilisateurs désactivés").is_ok());
        assert!(validate_sheet_name("").is_err());
        assert!(validate_sheet_name("a/b").is_err());
        assert!(validate_sheet_name(&"x".repeat(32)).is_err());
        assert!(validate_sheet_name(&"é".repeat(31)).is_ok());
    }
}
