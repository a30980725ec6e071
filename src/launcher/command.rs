//! Launch requests and the editor command built from them

use serde::Deserialize;
use serde_json::Value;
use std::borrow::Cow;

use crate::config::LauncherConfig;
use crate::error::ValidationError;

/// Wire shape of `POST /api/launch-cursor`
#[derive(Debug, Default, Deserialize)]
pub struct LaunchRequest {
    #[serde(default)]
    pub path: Option<Value>,
}

impl LaunchRequest {
    /// Parse a request body. Valid JSON that is not an object carries no path.
    pub fn from_body(body: &[u8]) -> Result<Self, serde_json::Error> {
        match serde_json::from_slice::<Value>(body)? {
            value @ Value::Object(_) => serde_json::from_value(value),
            _ => Ok(Self::default()),
        }
    }

    /// The trimmed path, or [`ValidationError::PathRequired`].
    pub fn validate(self) -> Result<String, ValidationError> {
        self.path
            .as_ref()
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .ok_or(ValidationError::PathRequired)
    }
}

/// Program plus discrete arguments. Never passed through a shell, so the
/// path reaches the editor exactly as submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl LaunchCommand {
    pub fn for_path(config: &LauncherConfig, path: &str) -> Self {
        let mut args = config.editor_args.clone();
        args.push(path.to_string());
        Self {
            program: config.editor.clone(),
            args,
        }
    }

    /// The path argument (always last)
    pub fn path(&self) -> &str {
        self.args.last().map(String::as_str).unwrap_or_default()
    }

    /// Shell-style rendering for log lines only. Arguments containing a space
    /// are double-quoted with embedded double quotes escaped.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .map(display_arg)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn display_arg(arg: &str) -> Cow<'_, str> {
    if arg.contains(' ') {
        Cow::Owned(format!("\"{}\"", arg.replace('"', "\\\"")))
    } else {
        Cow::Borrowed(arg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> LauncherConfig {
        LauncherConfig::default()
    }

    #[test]
    fn test_validate_trims() {
        let req = LaunchRequest::from_body(br#"{"path": "  /Users/a/proj  "}"#).unwrap();
        assert_eq!(req.validate().unwrap(), "/Users/a/proj");
    }

    #[test]
    fn test_missing_or_blank_path() {
        let bodies: [&[u8]; 6] = [
            br#"{"path": ""}"#,
            br#"{"path": "   "}"#,
            br#"{}"#,
            br#"{"path": 7}"#,
            b"null",
            b"[]",
        ];
        for body in bodies {
            let req = LaunchRequest::from_body(body).unwrap();
            assert_eq!(req.validate(), Err(ValidationError::PathRequired));
        }
    }

    #[test]
    fn test_malformed_body_is_a_parse_error() {
        assert!(LaunchRequest::from_body(b"{path:").is_err());
        assert!(LaunchRequest::from_body(b"").is_err());
    }

    #[test]
    fn test_path_is_one_discrete_argument() {
        let cmd = LaunchCommand::for_path(&config(), r#"/Users/a/My "Best" Project; rm -rf ~"#);
        assert_eq!(cmd.program, "cursor");
        assert_eq!(cmd.args, vec![r#"/Users/a/My "Best" Project; rm -rf ~"#.to_string()]);
    }

    #[test]
    fn test_editor_args_precede_path() {
        let config = LauncherConfig {
            editor: "code".to_string(),
            editor_args: vec!["--new-window".to_string()],
            ..LauncherConfig::default()
        };
        let cmd = LaunchCommand::for_path(&config, "/srv/app");
        assert_eq!(cmd.args, vec!["--new-window", "/srv/app"]);
        assert_eq!(cmd.path(), "/srv/app");
    }

    #[test]
    fn test_display_quotes_paths_with_spaces() {
        let cmd = LaunchCommand::for_path(&config(), "/Users/a/My Project");
        assert_eq!(cmd.display(), r#"cursor "/Users/a/My Project""#);

        let cmd = LaunchCommand::for_path(&config(), r#"/Users/a/My "Q" Project"#);
        assert_eq!(cmd.display(), r#"cursor "/Users/a/My \"Q\" Project""#);

        let cmd = LaunchCommand::for_path(&config(), "/Users/a/plain");
        assert_eq!(cmd.display(), "cursor /Users/a/plain");
    }
}
