use anyhow::{Context, Result};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use tbdeploy_core::{EngineOptions, ProjectId, DEFAULT_WEB_BASE};
use tbdeploy_teambox::{TeamboxConfig, DEFAULT_API_BASE};

/// Prefix of the environment variables that override the config file.
const ENV_PREFIX: &str = "TEAMBOX";

#[derive(Clone, Deserialize)]
pub struct Settings {
    pub user: String,
    pub password: String,
    /// Project the announcement is posted to.
    pub project_id: ProjectId,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_web_base")]
    pub web_base: String,
    #[serde(default)]
    pub dedupe: bool,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_web_base() -> String {
    DEFAULT_WEB_BASE.to_string()
}

impl Settings {
    /// Read `path` if it exists, then let `TEAMBOX_*` variables override it.
    pub fn load(path: &Path) -> Result<Self> {
        Self::load_with_env(path, Environment::with_prefix(ENV_PREFIX))
    }

    /// Values stay strings until deserialized, so credentials such as `007`
    /// keep their exact text while `project_id` and `dedupe` are still parsed.
    fn load_with_env(path: &Path, env: Environment) -> Result<Self> {
        tracing::debug!("Loading configuration from {}", path.display());

        let builder = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .add_source(env);

        Self::from_builder(builder)
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        builder
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration: user, password and project_id are required")
    }

    pub fn teambox(&self) -> TeamboxConfig {
        TeamboxConfig {
            api_base: self.api_base.clone(),
            username: self.user.clone(),
            password: self.password.clone(),
        }
    }

    /// Engine options, with command-line flags taking precedence.
    pub fn engine_options(&self, tag: Option<String>, dedupe: bool) -> EngineOptions {
        EngineOptions::new(self.project_id)
            .with_dedupe(self.dedupe || dedupe)
            .with_tag(tag)
            .with_web_base(self.web_base.clone())
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("project_id", &self.project_id)
            .field("api_base", &self.api_base)
            .field("web_base", &self.web_base)
            .field("dedupe", &self.dedupe)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(toml: &str) -> Result<Settings> {
        Settings::from_builder(
            Config::builder().add_source(File::from_str(toml, FileFormat::Toml)),
        )
    }

    #[test]
    fn test_defaults() {
        let settings = from_toml(
            r#"
            user = "deploy-bot"
            password = "secret"
            project_id = 77
            "#,
        )
        .unwrap();

        assert_eq!(settings.api_base, DEFAULT_API_BASE);
        assert_eq!(settings.web_base, DEFAULT_WEB_BASE);
        assert!(!settings.dedupe);
        assert!(!format!("{:?}", settings).contains("secret"));

        let teambox = settings.teambox();
        assert_eq!(teambox.username, "deploy-bot");
        assert_eq!(teambox.password, "secret");
    }

    #[test]
    fn test_missing_credentials() {
        let err = from_toml("project_id = 77").unwrap_err();
        assert!(err.to_string().contains("Invalid configuration"));
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let builder = Config::builder()
            .add_source(
                File::from(Path::new("/nonexistent/tbdeploy.toml"))
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(File::from_str(
                "user = \"u\"\npassword = \"p\"\nproject_id = 1",
                FileFormat::Toml,
            ));

        let settings = Settings::from_builder(builder).unwrap();
        assert_eq!(settings.project_id, 1);
    }

    fn env(vars: &[(&str, &str)]) -> Environment {
        let source: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix(ENV_PREFIX).source(Some(source))
    }

    #[test]
    fn test_environment_keeps_credentials_verbatim() {
        let settings = Settings::load_with_env(
            Path::new("/nonexistent/tbdeploy.toml"),
            env(&[
                ("TEAMBOX_USER", "0042"),
                ("TEAMBOX_PASSWORD", "007"),
                ("TEAMBOX_PROJECT_ID", "77"),
                ("TEAMBOX_DEDUPE", "true"),
                ("TEAMBOX_API_BASE", "https://tracker.example.com/api/1"),
            ]),
        )
        .unwrap();

        assert_eq!(settings.user, "0042");
        assert_eq!(settings.password, "007");
        assert_eq!(settings.project_id, 77);
        assert!(settings.dedupe);
        assert_eq!(settings.api_base, "https://tracker.example.com/api/1");
        assert_eq!(settings.web_base, DEFAULT_WEB_BASE);

        let teambox = settings.teambox();
        assert_eq!(teambox.username, "0042");
        assert_eq!(teambox.password, "007");
    }

    #[test]
    fn test_environment_requires_project_id() {
        let err = Settings::load_with_env(
            Path::new("/nonexistent/tbdeploy.toml"),
            env(&[("TEAMBOX_USER", "deploy-bot"), ("TEAMBOX_PASSWORD", "secret")]),
        )
        .unwrap_err();

        assert!(err.to_string().contains("Invalid configuration"));
    }

    #[test]
    fn test_engine_options() {
        let settings = from_toml(
            r#"
            user = "u"
            password = "p"
            project_id = 77
            web_base = "https://tasks.example.com"
            dedupe = false
            "#,
        )
        .unwrap();

        let options = settings.engine_options(Some("v1".to_string()), true);

        assert_eq!(options.project_id, 77);
        assert!(options.dedupe);
        assert_eq!(options.tag.as_deref(), Some("v1"));
        assert_eq!(options.web_base, "https://tasks.example.com");
    }
}
