//! Settings file parsing (YAML/JSON/JSONC).

use crate::config::error::ConfigError;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Config file type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFileType {
    Yaml,
    Json,
    Jsonc,
    Unknown,
}

/// Get config file type from path extension
pub fn get_file_type(path: &str) -> ConfigFileType {
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "yaml" | "yml" => ConfigFileType::Yaml,
        "json" => ConfigFileType::Json,
        "jsonc" => ConfigFileType::Jsonc,
        _ => ConfigFileType::Unknown,
    }
}

/// Strip `//` and `/* */` comments from JSONC content.
///
/// Comment markers inside string literals are kept. Line comments keep their
/// terminating newline so error positions stay on the right line.
pub fn strip_json_comments(content: &str) -> String {
    let mut result = String::with_capacity(content.len());
    let mut chars = content.chars().peekable();
    let mut in_string = false;
    let mut escaped = false;

    while let Some(c) = chars.next() {
        if in_string {
            result.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match (c, chars.peek()) {
            ('"', _) => {
                in_string = true;
                result.push(c);
            }
            ('/', Some('/')) => {
                while chars.next_if(|&next| next != '\n' && next != '\r').is_some() {}
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for next in chars.by_ref() {
                    if prev == '*' && next == '/' {
                        break;
                    }
                    prev = next;
                }
            }
            _ => result.push(c),
        }
    }

    result
}

/// Parse JSON content
pub fn parse_json<T: DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    serde_json::from_str(content).map_err(ConfigError::from)
}

/// Parse JSONC content (JSON with comments)
pub fn parse_jsonc<T: DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    parse_json(&strip_json_comments(content))
}

/// Parse YAML content
pub fn parse_yaml<T: DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    serde_yaml::from_str(content).map_err(ConfigError::from)
}

/// Parse config content based on file type
pub fn parse_config<T: DeserializeOwned>(content: &str, path: &str) -> Result<T, ConfigError> {
    match get_file_type(path) {
        ConfigFileType::Yaml => parse_yaml(content),
        ConfigFileType::Json => parse_json(content),
        ConfigFileType::Jsonc => parse_jsonc(content),
        ConfigFileType::Unknown => Err(ConfigError::UnknownFileType(path.to_string())),
    }
}

/// Read and parse a config file, picking the format from its extension.
pub fn load_config<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, ConfigError> {
    let path = path.as_ref();
    let display = path.display().to_string();

    if get_file_type(&display) == ConfigFileType::Unknown {
        return Err(ConfigError::UnknownFileType(display));
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: display.clone(),
        source,
    })?;

    parse_config(&content, &display)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::Value;

    #[rstest]
    #[case("settings.yaml", ConfigFileType::Yaml)]
    #[case("settings.YML", ConfigFileType::Yaml)]
    #[case("settings.json", ConfigFileType::Json)]
    #[case("settings.JSON", ConfigFileType::Json)]
    #[case("settings.jsonc", ConfigFileType::Jsonc)]
    #[case("settings.txt", ConfigFileType::Unknown)]
    #[case("settings", ConfigFileType::Unknown)]
    #[case("", ConfigFileType::Unknown)]
    fn test_get_file_type(#[case] path: &str, #[case] expected: ConfigFileType) {
        assert_eq!(get_file_type(path), expected);
    }

    #[rstest]
    #[case(r#"{"slug": "x"} // trailing"#, r#"{"slug": "x"} "#)]
    #[case(r#"{"slug": /* inline */ "x"}"#, r#"{"slug":  "x"}"#)]
    #[case("{\"a\": 1, // one\n\"b\": 2}", "{\"a\": 1, \n\"b\": 2}")]
    #[case(r#"{"url": "http://example.test/a"}"#, r#"{"url": "http://example.test/a"}"#)]
    #[case(r#"{"q": "say \"/* hi */\""}"#, r#"{"q": "say \"/* hi */\""}"#)]
    #[case("/* never closed", "")]
    fn test_strip_json_comments(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(strip_json_comments(input), expected);
    }

    #[rstest]
    fn test_parse_jsonc_with_comments() {
        let content = r#"
            // routes eligible for override
            {
                "slug": "mock-state", /* default */
                "ttl_secs": 60
            }
        "#;
        let value: Value = parse_jsonc(content).expect("Should parse");
        assert_eq!(value["slug"], "mock-state");
        assert_eq!(value["ttl_secs"], 60);
    }

    #[rstest]
    fn test_parse_json_invalid() {
        let result: Result<Value, _> = parse_json("{invalid");
        assert!(matches!(result.unwrap_err(), ConfigError::Json(_)));
    }

    #[rstest]
    fn test_parse_yaml_invalid() {
        let result: Result<Value, _> = parse_yaml("routes: [");
        assert!(matches!(result.unwrap_err(), ConfigError::Yaml(_)));
    }

    #[rstest]
    #[case("settings.yaml", "slug: from-yaml")]
    #[case("settings.json", r#"{"slug": "from-json"}"#)]
    #[case("settings.jsonc", r#"{"slug": "from-jsonc"} // comment"#)]
    fn test_parse_config_by_extension(#[case] path: &str, #[case] content: &str) {
        let value: Value = parse_config(content, path).expect("Should parse");
        assert!(value["slug"].as_str().unwrap().starts_with("from-"));
    }

    #[rstest]
    fn test_parse_config_unknown_file_type() {
        let result: Result<Value, _> = parse_config("{}", "settings.toml");
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::UnknownFileType(_)
        ));
    }

    #[rstest]
    fn test_load_config_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.yml");
        std::fs::write(&path, "slug: on-disk\n").unwrap();

        let value: Value = load_config(&path).expect("Should load");
        assert_eq!(value["slug"], "on-disk");
    }

    #[rstest]
    fn test_load_config_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result: Result<Value, _> = load_config(dir.path().join("absent.json"));
        assert!(matches!(result.unwrap_err(), ConfigError::Io { .. }));
    }
}
