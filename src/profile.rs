//! Portable profile files.
//!
//! A profile carries the candidate's contact details, qualifications and
//! portfolio so they can be reused across machines or sessions without
//! importing a resume again.

use crate::config::Config;
use crate::error::{JobdocsError, Result};
use crate::model::{Candidate, PortfolioProject, Qualifications, null_as_default};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, deserialize_with = "null_as_default")]
    pub candidate: Candidate,
    #[serde(default, deserialize_with = "null_as_default")]
    pub qualifications: Qualifications,
    #[serde(default, deserialize_with = "null_as_default")]
    pub portfolio_projects: Vec<PortfolioProject>,
}

impl Profile {
    /// Contact fields are copied without the resume title, which is
    /// chosen per application.
    #[must_use]
    pub fn new(
        candidate: &Candidate,
        qualifications: &Qualifications,
        portfolio_projects: &[PortfolioProject],
    ) -> Self {
        Self {
            candidate: Candidate {
                title: None,
                ..candidate.clone()
            },
            qualifications: qualifications.clone(),
            portfolio_projects: portfolio_projects.to_vec(),
        }
    }

    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.candidate,
            &config.qualifications,
            &config.portfolio_projects,
        )
    }

    /// Replaces the profile-carried sections of `config`, leaving paths
    /// and preferences untouched
    pub fn apply_to(self, config: &mut Config) {
        let extra = std::mem::take(&mut config.candidate.extra);
        config.candidate = Candidate {
            extra,
            ..self.candidate
        };
        config.qualifications = self.qualifications;
        config.portfolio_projects = self.portfolio_projects;
    }
}

/// Writes a portable profile to `path`
///
/// # Errors
///
/// - `JobdocsError::Yaml` if serialization fails.
/// - `JobdocsError::Io` if the file can't be written.
pub fn write_profile(
    path: &Path,
    candidate: &Candidate,
    qualifications: &Qualifications,
    portfolio_projects: &[PortfolioProject],
) -> Result<()> {
    let profile = Profile::new(candidate, qualifications, portfolio_projects);
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_yaml::to_string(&profile)?)?;
    info!(path = %path.display(), "profile saved");
    Ok(())
}

/// Loads a portable profile; missing sections come back empty
///
/// # Errors
///
/// - `JobdocsError::FileNotFound` if the file doesn't exist.
/// - `JobdocsError::Yaml` if it doesn't parse.
pub fn load_profile(path: &Path) -> Result<Profile> {
    if !path.is_file() {
        return Err(JobdocsError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(Profile::default());
    }
    Ok(serde_yaml::from_str(&content)?)
}
