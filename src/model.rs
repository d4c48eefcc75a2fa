//! Data trees supplied by the caller: who is applying, for what, and with
//! which letter and resume content.
//!
//! Every type deserializes leniently from YAML. Optional fields default to
//! empty and list entries accept either a bare string or a mapping, so the
//! same files people write by hand and the files the import wizard saves
//! both load.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Treats an explicit YAML `null` (a key with nothing after it) like a missing key
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Contact details printed in both document headers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub name: String,
    /// Target title shown under the name on the resume
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub linkedin: String,
    #[serde(default)]
    pub calendar: String,
    /// Keys this crate doesn't interpret; see [`crate::config::Config::from_yaml`]
    #[serde(skip)]
    pub extra: serde_yaml::Mapping,
}

impl Candidate {
    /// Phone, email, LinkedIn and calendar, skipping blanks, joined by `" | "`
    #[must_use]
    pub fn contact_line(&self) -> String {
        [&self.phone, &self.email, &self.linkedin, &self.calendar]
            .into_iter()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

/// The position being applied for
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: String,
    /// Letter date as printed; today's date when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// Default sign-off when the letter doesn't provide one
pub const DEFAULT_CLOSING: &str = "Best regards,";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverLetter {
    pub opening: String,
    #[serde(default)]
    pub sections: Vec<LetterSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closing: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature_title: Option<String>,
}

impl CoverLetter {
    #[must_use]
    pub fn closing(&self) -> &str {
        self.closing.as_deref().unwrap_or(DEFAULT_CLOSING)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterSection {
    pub title: String,
    #[serde(default)]
    pub paragraphs: Vec<LetterParagraph>,
}

/// One entry of a letter section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LetterParagraph {
    /// A plain paragraph
    Plain(String),
    /// A bullet list
    Bullets(Vec<BulletItem>),
    /// Optional bold label, then text with bolded highlights
    Labeled {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        #[serde(default)]
        text: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        highlights: Vec<String>,
    },
}

/// Item of a letter bullet list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BulletItem {
    Plain(String),
    Labeled {
        label: String,
        #[serde(default)]
        text: String,
    },
}

/// Resume content. Also stored in config as the candidate's qualifications.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resume {
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: Vec<SkillGroup>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub experience: Vec<Position>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub certifications: Vec<Certification>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub education: Vec<Education>,
}

/// Qualifications in config share the resume's shape
pub type Qualifications = Resume;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillGroup {
    pub category: String,
    #[serde(default)]
    pub items: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub dates: String,
    #[serde(default)]
    pub bullets: Vec<Bullet>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Bullet {
    Plain(String),
    Highlighted {
        text: String,
        #[serde(default)]
        highlights: Vec<String>,
    },
}

impl Bullet {
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Plain(text) | Self::Highlighted { text, .. } => text,
        }
    }
}

/// A year written either as a YAML integer or a string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Year {
    Number(i64),
    Text(String),
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s.trim()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Certification {
    Plain(String),
    Detailed {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        detail: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        year: Option<Year>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        issuer: Option<String>,
    },
}

impl Certification {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Plain(name) | Self::Detailed { name, .. } => name,
        }
    }

    /// Text printed after the certification name.
    ///
    /// An explicit `detail` wins; otherwise issuer and year are joined with
    /// `", "`. Plain entries have no detail.
    #[must_use]
    pub fn detail_line(&self) -> String {
        let Self::Detailed {
            detail,
            year,
            issuer,
            ..
        } = self
        else {
            return String::new();
        };

        if let Some(detail) = detail.as_deref().map(str::trim)
            && !detail.is_empty()
        {
            return detail.to_string();
        }

        let year = year.as_ref().map(ToString::to_string);
        [issuer.as_deref().map(str::trim), year.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Education {
    Plain(String),
    Detailed {
        degree: String,
        #[serde(default)]
        school: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        year: Option<Year>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioProject {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub achievements: Vec<Achievement>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub metric: String,
    #[serde(default)]
    pub description: String,
}
