use crate::error::{JobdocsError, Result};
use crate::model::{Candidate, PortfolioProject, Qualifications, null_as_default};
use directories::{BaseDirs, ProjectDirs};
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONFIG_FILE: &str = "config.yaml";
pub const EXAMPLE_CONFIG_FILE: &str = "config.example.yaml";
pub const PROFILES_DIR: &str = "profiles";
pub const DEFAULT_OUTPUT_DIR: &str = "~/Documents/Job Application Docs/generated/";

const CONFIG_KEYS: &[&str] = &[
    "candidate",
    "paths",
    "preferences",
    "qualifications",
    "portfolio_projects",
];
const CANDIDATE_KEYS: &[&str] = &["name", "title", "phone", "email", "linkedin", "calendar"];

/// Directory holding the active config, the example config and saved profiles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigHome {
    root: PathBuf,
}

impl ConfigHome {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Uses `explicit` when given, otherwise the platform config directory
    ///
    /// # Errors
    ///
    /// Returns `JobdocsError::NoHomeDir` if no platform directory can be determined.
    pub fn resolve(explicit: Option<PathBuf>) -> Result<Self> {
        if let Some(root) = explicit {
            return Ok(Self::new(root));
        }
        ProjectDirs::from("com", "jobdocs", "jobdocs")
            .map(|dirs| Self::new(dirs.config_dir()))
            .ok_or(JobdocsError::NoHomeDir)
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    #[must_use]
    pub fn example_config_path(&self) -> PathBuf {
        self.root.join(EXAMPLE_CONFIG_FILE)
    }

    #[must_use]
    pub fn profiles_dir(&self) -> PathBuf {
        self.root.join(PROFILES_DIR)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<String>,
}

/// The user's configuration: contact details, resume qualifications and
/// portfolio, plus output settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, deserialize_with = "null_as_default")]
    pub candidate: Candidate,
    #[serde(default, deserialize_with = "null_as_default")]
    pub paths: PathsConfig,
    /// Not interpreted here; kept so saving doesn't drop it
    #[serde(default, deserialize_with = "null_as_default")]
    pub preferences: Mapping,
    #[serde(default, deserialize_with = "null_as_default")]
    pub qualifications: Qualifications,
    #[serde(default, deserialize_with = "null_as_default")]
    pub portfolio_projects: Vec<PortfolioProject>,
    /// Other top-level sections, written back unchanged
    #[serde(skip)]
    pub extra: Mapping,
}

impl Config {
    /// Parses config YAML; a blank document is an empty config.
    ///
    /// Top-level and `candidate` keys that aren't modelled are collected
    /// into `extra` so [`Config::save`] writes them back. They're read in a
    /// second pass over the raw mapping because typed fields go through
    /// serde_yaml directly, which keeps `dates: 2020` readable as a string.
    ///
    /// # Errors
    ///
    /// Returns `JobdocsError::Yaml` if the content doesn't parse.
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let mut config: Self = serde_yaml::from_str(content)?;
        if let Value::Mapping(raw) = serde_yaml::from_str(content)? {
            if let Some(Value::Mapping(candidate)) = raw.get("candidate") {
                config.candidate.extra = unknown_keys(candidate, CANDIDATE_KEYS);
            }
            config.extra = unknown_keys(&raw, CONFIG_KEYS);
        }
        Ok(config)
    }

    fn to_yaml(&self) -> Result<String> {
        let mut value = serde_yaml::to_value(self)?;
        if let Value::Mapping(root) = &mut value {
            if !self.candidate.extra.is_empty()
                && let Some(Value::Mapping(candidate)) = root.get_mut("candidate")
            {
                candidate.extend(self.candidate.extra.clone());
            }
            root.extend(self.extra.clone());
        }
        Ok(serde_yaml::to_string(&value)?)
    }

    /// Loads the config at `path`, or `None` when there is no such file
    ///
    /// # Errors
    ///
    /// - `JobdocsError::Io` if the file exists but can't be read.
    /// - `JobdocsError::Yaml` if it doesn't parse.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.is_file() {
            debug!(path = %path.display(), "no config file");
            return Ok(None);
        }
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content).map(Some)
    }

    /// The active config, else the example config, else an empty one
    ///
    /// # Errors
    ///
    /// Returns errors from [`Config::load`].
    pub fn load_or_seed(home: &ConfigHome) -> Result<Self> {
        if let Some(config) = Self::load(&home.config_path())? {
            return Ok(config);
        }
        if let Some(config) = Self::load(&home.example_config_path())? {
            debug!("seeding from example config");
            return Ok(config);
        }
        Ok(Self::default())
    }

    /// Writes the config as YAML, creating parent directories
    ///
    /// # Errors
    ///
    /// - `JobdocsError::Yaml` if serialization fails.
    /// - `JobdocsError::Io` if the file can't be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_yaml()?)?;
        debug!(path = %path.display(), "config saved");
        Ok(())
    }

    #[must_use]
    pub fn candidate(&self) -> &Candidate {
        &self.candidate
    }

    /// Resume content, or `None` until at least one position is configured
    #[must_use]
    pub fn qualifications(&self) -> Option<&Qualifications> {
        if self.qualifications.experience.is_empty() {
            None
        } else {
            Some(&self.qualifications)
        }
    }

    #[must_use]
    pub fn portfolio_projects(&self) -> &[PortfolioProject] {
        &self.portfolio_projects
    }

    /// Configured output directory with `~` expanded
    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        expand_tilde(
            self.paths
                .output_dir
                .as_deref()
                .filter(|dir| !dir.trim().is_empty())
                .unwrap_or(DEFAULT_OUTPUT_DIR),
        )
    }
}

fn unknown_keys(mapping: &Mapping, known: &[&str]) -> Mapping {
    mapping
        .iter()
        .filter(|(key, _)| !key.as_str().is_some_and(|key| known.contains(&key)))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Expands a leading `~` to the user's home directory
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix('~')
        && (rest.is_empty() || rest.starts_with(['/', '\\']))
        && let Some(base) = BaseDirs::new()
    {
        return base.home_dir().join(rest.trim_start_matches(['/', '\\']));
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = r"
candidate:
  name: Alex Rivera
  phone: 555.867.5309
  email: alex.rivera@example.com
  linkedin: linkedin.com/in/alexrivera
paths:
  output_dir: /tmp/jobdocs-out
preferences:
  tone: direct
  max_pages: 2
qualifications:
  summary: Engineer.
  experience:
    - title: Engineer
      company: StartupCo
      dates: 2018 - 2021
portfolio_projects:
  - name: AutoDeploy
    technologies: [Python, Docker]
";

    #[test]
    fn test_load_missing_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let home = ConfigHome::new(temp_dir.path());
        assert!(Config::load(&home.config_path()).unwrap().is_none());
    }

    #[test]
    fn test_accessors() {
        let config = Config::from_yaml(SAMPLE).unwrap();
        assert_eq!(config.candidate().name, "Alex Rivera");
        assert_eq!(config.qualifications().unwrap().experience.len(), 1);
        assert_eq!(config.portfolio_projects()[0].name, "AutoDeploy");
        assert_eq!(config.output_dir(), PathBuf::from("/tmp/jobdocs-out"));
    }

    #[test]
    fn test_qualifications_require_experience() {
        let config = Config::from_yaml("qualifications:\n  summary: Only a summary\n").unwrap();
        assert!(config.qualifications().is_none());
    }

    #[test]
    fn test_null_and_blank_sections() {
        let config = Config::from_yaml("candidate:\nqualifications:\nportfolio_projects:\n").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(Config::from_yaml("  \n").unwrap(), Config::default());
    }

    #[test]
    fn test_save_round_trip_keeps_preferences() {
        let temp_dir = TempDir::new().unwrap();
        let home = ConfigHome::new(temp_dir.path().join("home"));
        let config = Config::from_yaml(SAMPLE).unwrap();

        config.save(&home.config_path()).unwrap();
        let loaded = Config::load(&home.config_path()).unwrap().unwrap();
        assert_eq!(loaded, config);
        assert_eq!(
            loaded.preferences.get("tone").and_then(|v| v.as_str()),
            Some("direct")
        );

        // sections keep declaration order
        let written = fs::read_to_string(home.config_path()).unwrap();
        let candidate_at = written.find("candidate:").unwrap();
        let quals_at = written.find("qualifications:").unwrap();
        assert!(candidate_at < quals_at);
    }

    #[test]
    fn test_save_keeps_unknown_keys() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE);
        let mut config = Config::from_yaml(
            r"
candidate:
  name: Alex Rivera
  phone: 5558675309
  github: github.com/alexrivera
job_search:
  target_roles: [Staff Engineer]
qualifications:
  experience:
    - {title: Engineer, company: Acme, dates: 2020}
",
        )
        .unwrap();
        assert!(config.extra.contains_key("job_search"));
        assert!(config.candidate.extra.contains_key("github"));

        config.candidate.name = "Alex R.".to_string();
        config.save(&path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("github: github.com/alexrivera"), "{written}");
        assert!(written.contains("job_search:"), "{written}");
        assert!(written.contains("Staff Engineer"), "{written}");

        let reloaded = Config::load(&path).unwrap().unwrap();
        assert_eq!(reloaded.candidate.name, "Alex R.");
        assert_eq!(reloaded.candidate.phone, "5558675309");
        assert_eq!(reloaded.qualifications.experience[0].dates, "2020");
        assert_eq!(reloaded.extra, config.extra);
        assert_eq!(reloaded.candidate.extra, config.candidate.extra);
    }

    #[test]
    fn test_load_or_seed() {
        let temp_dir = TempDir::new().unwrap();
        let home = ConfigHome::new(temp_dir.path());

        assert_eq!(Config::load_or_seed(&home).unwrap(), Config::default());

        fs::write(home.example_config_path(), "candidate:\n  name: Example\n").unwrap();
        assert_eq!(Config::load_or_seed(&home).unwrap().candidate.name, "Example");

        fs::write(home.config_path(), "candidate:\n  name: Active\n").unwrap();
        assert_eq!(Config::load_or_seed(&home).unwrap().candidate.name, "Active");
    }

    #[test]
    fn test_default_output_dir_expands_home() {
        let config = Config::default();
        let dir = config.output_dir();
        if let Some(base) = BaseDirs::new() {
            assert!(dir.starts_with(base.home_dir()));
        }
        assert!(dir.ends_with("Documents/Job Application Docs/generated"));
    }

    #[test]
    fn test_expand_tilde() {
        assert_eq!(expand_tilde("/abs/path"), PathBuf::from("/abs/path"));
        assert_eq!(expand_tilde("~user/x"), PathBuf::from("~user/x"));
        if let Some(base) = BaseDirs::new() {
            assert_eq!(expand_tilde("~"), base.home_dir().to_path_buf());
            assert_eq!(expand_tilde("~/docs"), base.home_dir().join("docs"));
        }
    }

    #[test]
    fn test_resolve_explicit_home() {
        let home = ConfigHome::resolve(Some(PathBuf::from("/tmp/jobdocs-home"))).unwrap();
        assert_eq!(home.config_path(), PathBuf::from("/tmp/jobdocs-home/config.yaml"));
        assert_eq!(home.profiles_dir(), PathBuf::from("/tmp/jobdocs-home/profiles"));
    }
}
