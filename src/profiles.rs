//! Named copies of the active configuration.
//!
//! Profiles live as `profiles/<name>.yaml` next to the active `config.yaml`.
//! Switching copies a profile over the active config; a profile is "current"
//! when its bytes equal the active config exactly.

use crate::config::{Config, ConfigHome};
use crate::error::{JobdocsError, Result};
use globset::{Glob, GlobMatcher};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};
use walkdir::WalkDir;

const PROFILE_EXT: &str = "yaml";

/// Counts shown for a configured resume
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualificationCounts {
    pub experience: usize,
    pub skills: usize,
    pub certifications: usize,
}

/// What `profile current` reports about the active configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSummary {
    /// Matching saved profile, if any
    pub profile: Option<String>,
    pub name: String,
    pub email: String,
    pub qualifications: Option<QualificationCounts>,
    pub portfolio_projects: usize,
}

impl ProfileSummary {
    #[must_use]
    pub fn new(profile: Option<String>, config: &Config) -> Self {
        let quals = &config.qualifications;
        let qualifications = (*quals != Default::default()).then(|| QualificationCounts {
            experience: quals.experience.len(),
            skills: quals.skills.len(),
            certifications: quals.certifications.len(),
        });
        Self {
            profile,
            name: config.candidate.name.clone(),
            email: config.candidate.email.clone(),
            qualifications,
            portfolio_projects: config.portfolio_projects.len(),
        }
    }
}

impl fmt::Display for ProfileSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn or_not_set(value: &str) -> &str {
            if value.is_empty() { "Not set" } else { value }
        }

        writeln!(
            f,
            "Current profile: {}",
            self.profile.as_deref().unwrap_or("(unsaved)")
        )?;
        writeln!(f, "{}", "-".repeat(40))?;
        writeln!(f, "  Name: {}", or_not_set(&self.name))?;
        writeln!(f, "  Email: {}", or_not_set(&self.email))?;
        match &self.qualifications {
            Some(counts) => {
                writeln!(f, "  Experience: {} positions", counts.experience)?;
                writeln!(f, "  Skills: {} categories", counts.skills)?;
                writeln!(f, "  Certifications: {}", counts.certifications)?;
            }
            None => writeln!(f, "  Qualifications: Not configured")?,
        }
        write!(f, "  Portfolio projects: {}", self.portfolio_projects)
    }
}

/// Checks that a profile name is usable as a file stem
///
/// # Errors
///
/// Returns `JobdocsError::InvalidProfileName` for empty names, names with
/// path separators or control characters, and names starting with `.`.
pub fn validate_profile_name(name: &str) -> Result<()> {
    let invalid = name.trim().is_empty()
        || name.starts_with('.')
        || name.contains(['/', '\\'])
        || name.chars().any(char::is_control);
    if invalid {
        return Err(JobdocsError::InvalidProfileName {
            name: name.to_string(),
        });
    }
    Ok(())
}

pub struct ProfileStore {
    home: ConfigHome,
    matcher: GlobMatcher,
}

impl ProfileStore {
    /// # Errors
    ///
    /// Returns `JobdocsError::Glob` if the profile pattern fails to compile.
    pub fn new(home: ConfigHome) -> Result<Self> {
        let matcher = Glob::new(&format!("*.{PROFILE_EXT}"))?.compile_matcher();
        Ok(Self { home, matcher })
    }

    #[must_use]
    pub fn home(&self) -> &ConfigHome {
        &self.home
    }

    fn profiles_dir(&self) -> Result<PathBuf> {
        let dir = self.home.profiles_dir();
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Path of the named profile file
    ///
    /// # Errors
    ///
    /// Returns errors from [`validate_profile_name`] or from creating the
    /// profiles directory.
    pub fn profile_path(&self, name: &str) -> Result<PathBuf> {
        validate_profile_name(name)?;
        Ok(self.profiles_dir()?.join(format!("{name}.{PROFILE_EXT}")))
    }

    /// Saved profile names, sorted
    ///
    /// # Errors
    ///
    /// Returns `JobdocsError::WalkDir` or `JobdocsError::Io` if the profiles
    /// directory can't be read.
    pub fn list(&self) -> Result<Vec<String>> {
        let dir = self.profiles_dir()?;
        let mut names = Vec::new();
        for entry in WalkDir::new(&dir).min_depth(1).max_depth(1) {
            let entry = entry?;
            if !entry.file_type().is_file() || !self.matcher.is_match(entry.file_name()) {
                continue;
            }
            let Some(stem) = entry.path().file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            // editor backups and dotfiles can't be addressed by name
            if validate_profile_name(stem).is_err() {
                debug!("Skipping {}", entry.path().display());
                continue;
            }
            names.push(stem.to_string());
        }
        names.sort();
        Ok(names)
    }

    #[must_use]
    pub fn active_exists(&self) -> bool {
        self.home.config_path().is_file()
    }

    /// The saved profile whose contents equal the active config
    ///
    /// # Errors
    ///
    /// Returns `JobdocsError::Io` if a file can't be read.
    pub fn current(&self) -> Result<Option<String>> {
        let config_path = self.home.config_path();
        if !config_path.is_file() {
            return Ok(None);
        }
        let active = fs::read(&config_path)?;
        for name in self.list()? {
            if fs::read(self.profile_path(&name)?)? == active {
                return Ok(Some(name));
            }
        }
        Ok(None)
    }

    /// True when an active config exists that no saved profile matches
    ///
    /// # Errors
    ///
    /// Returns errors from [`ProfileStore::current`].
    pub fn has_unsaved_active(&self) -> Result<bool> {
        Ok(self.active_exists() && self.current()?.is_none())
    }

    /// Summary of the active config, or `None` in the new-user state
    ///
    /// # Errors
    ///
    /// Returns errors from loading the config or [`ProfileStore::current`].
    pub fn summary(&self) -> Result<Option<ProfileSummary>> {
        let Some(config) = Config::load(&self.home.config_path())? else {
            return Ok(None);
        };
        Ok(Some(ProfileSummary::new(self.current()?, &config)))
    }

    /// Whether the named profile exists
    ///
    /// # Errors
    ///
    /// Returns errors from [`ProfileStore::profile_path`].
    pub fn exists(&self, name: &str) -> Result<bool> {
        Ok(self.profile_path(name)?.is_file())
    }

    /// Copies the active config to the named profile
    ///
    /// # Errors
    ///
    /// - `JobdocsError::NoActiveConfig` if there is nothing to save.
    /// - `JobdocsError::ProfileExists` if the profile exists and `overwrite` is false.
    pub fn save(&self, name: &str, overwrite: bool) -> Result<PathBuf> {
        let config_path = self.home.config_path();
        if !config_path.is_file() {
            return Err(JobdocsError::NoActiveConfig);
        }
        let profile_path = self.profile_path(name)?;
        if profile_path.exists() && !overwrite {
            return Err(JobdocsError::ProfileExists {
                name: name.to_string(),
            });
        }
        fs::copy(&config_path, &profile_path)?;
        info!(profile = name, path = %profile_path.display(), "profile saved");
        Ok(profile_path)
    }

    /// Makes the named profile the active config
    ///
    /// # Errors
    ///
    /// Returns `JobdocsError::ProfileNotFound` for an unknown profile.
    pub fn switch(&self, name: &str) -> Result<()> {
        let profile_path = self.profile_path(name)?;
        if !profile_path.is_file() {
            return Err(JobdocsError::ProfileNotFound {
                name: name.to_string(),
            });
        }
        fs::create_dir_all(self.home.root())?;
        fs::copy(&profile_path, self.home.config_path())?;
        info!(profile = name, "switched profile");
        Ok(())
    }

    /// Removes the active config, returning whether there was one
    ///
    /// # Errors
    ///
    /// Returns `JobdocsError::Io` if the file can't be removed.
    pub fn reset(&self) -> Result<bool> {
        let config_path = self.home.config_path();
        if !config_path.is_file() {
            debug!("already in new-user state");
            return Ok(false);
        }
        fs::remove_file(&config_path)?;
        info!("active config removed");
        Ok(true)
    }

    /// Deletes a saved profile that is not currently active
    ///
    /// # Errors
    ///
    /// - `JobdocsError::ProfileNotFound` for an unknown profile.
    /// - `JobdocsError::ActiveProfile` if the active config matches it.
    pub fn delete(&self, name: &str) -> Result<()> {
        let profile_path = self.profile_path(name)?;
        if !profile_path.is_file() {
            return Err(JobdocsError::ProfileNotFound {
                name: name.to_string(),
            });
        }
        if self.current()?.as_deref() == Some(name) {
            return Err(JobdocsError::ActiveProfile {
                name: name.to_string(),
            });
        }
        fs::remove_file(&profile_path)?;
        info!(profile = name, "profile deleted");
        Ok(())
    }
}
