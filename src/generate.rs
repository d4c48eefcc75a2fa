//! Producing the cover letter and resume pair for one application.

use crate::docx::write_docx;
use crate::error::{JobdocsError, Result};
use crate::layout;
use crate::model::{Candidate, CoverLetter, Job, Resume};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Longest filename component produced by [`sanitize_filename`]
pub const MAX_COMPONENT_CHARS: usize = 50;

/// Format used for the letter date when the job has none
pub const LETTER_DATE_FORMAT: &str = "%B %d, %Y";

/// Everything needed to produce one application's documents.
///
/// Candidate and resume may be omitted and taken from the active config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate: Option<Candidate>,
    pub job: Job,
    pub cover_letter: CoverLetter,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume: Option<Resume>,
}

impl Application {
    /// Reads an application file
    ///
    /// # Errors
    ///
    /// - `JobdocsError::FileNotFound` if the file doesn't exist.
    /// - `JobdocsError::Yaml` if it doesn't parse.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(JobdocsError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&content)?)
    }
}

/// Paths of the two generated documents
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedDocuments {
    pub cover_letter: PathBuf,
    pub resume: PathBuf,
}

/// Turns free text into a safe filename component.
///
/// Removes characters that are reserved on common filesystems, collapses
/// dashes and whitespace into `_`, drops control characters, and trims
/// underscores from both ends. The result is at most
/// [`MAX_COMPONENT_CHARS`] characters long.
///
/// # Errors
///
/// Returns `JobdocsError::Regex` if a pattern fails to compile.
pub fn sanitize_filename(text: &str) -> Result<String> {
    let reserved = Regex::new(r#"[/\\:*?"<>|]"#)?;
    let separators = Regex::new(r"[-\s]+")?;
    let control = Regex::new(r"[\x00-\x1f\x7f]")?;

    let safe = reserved.replace_all(text, "");
    let safe = separators.replace_all(&safe, "_");
    let safe = control.replace_all(&safe, "");
    let truncated: String = safe
        .trim_matches('_')
        .chars()
        .take(MAX_COMPONENT_CHARS)
        .collect();
    Ok(truncated.trim_end_matches('_').to_string())
}

/// File names for the cover letter and resume, in that order
///
/// # Errors
///
/// Returns errors from [`sanitize_filename`].
pub fn document_file_names(candidate: &Candidate, job: &Job) -> Result<(String, String)> {
    let name = sanitize_filename(&candidate.name)?;
    let role = sanitize_filename(&job.title)?;
    let company = sanitize_filename(&job.company)?;
    Ok((
        format!("{name}_Cover_Letter_{role}_{company}.docx"),
        format!("{name}_Resume_{role}_{company}.docx"),
    ))
}

/// Today's date as printed on a letter
#[must_use]
pub fn today() -> String {
    chrono::Local::now().format(LETTER_DATE_FORMAT).to_string()
}

/// Lays out and writes both documents into `output_dir`, creating it if needed
///
/// # Errors
///
/// - `JobdocsError::Io` if the directory or files cannot be written.
/// - `JobdocsError::DocxWrite` if packing a document fails.
pub fn generate_application_documents(
    candidate: &Candidate,
    job: &Job,
    cover_letter: &CoverLetter,
    resume: &Resume,
    output_dir: &Path,
) -> Result<GeneratedDocuments> {
    fs::create_dir_all(output_dir)?;

    let (letter_name, resume_name) = document_file_names(candidate, job)?;
    let documents = GeneratedDocuments {
        cover_letter: output_dir.join(letter_name),
        resume: output_dir.join(resume_name),
    };

    let letter = layout::cover_letter(candidate, job, cover_letter, &today());
    write_docx(&letter, &documents.cover_letter)?;
    info!(path = %documents.cover_letter.display(), "cover letter saved");

    let resume = layout::resume(candidate, resume);
    write_docx(&resume, &documents.resume)?;
    info!(path = %documents.resume.display(), "resume saved");

    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract_docx_text;
    use tempfile::TempDir;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("Alex Rivera").unwrap(), "Alex_Rivera");
        assert_eq!(
            sanitize_filename("Sr. Engineer - Platform/Infra").unwrap(),
            "Sr._Engineer_PlatformInfra"
        );
        assert_eq!(sanitize_filename("  Acme: \"Corp\"?  ").unwrap(), "Acme_Corp");
        assert_eq!(sanitize_filename("a\u{7}b").unwrap(), "ab");
        assert_eq!(sanitize_filename("").unwrap(), "");
    }

    #[test]
    fn test_sanitize_filename_truncates() {
        let long = "word ".repeat(30);
        let safe = sanitize_filename(&long).unwrap();
        assert!(safe.chars().count() <= MAX_COMPONENT_CHARS);
        assert!(!safe.ends_with('_'));
        assert!(safe.starts_with("word_word"));
    }

    #[test]
    fn test_document_file_names() {
        let candidate = Candidate {
            name: "Alex Rivera".to_string(),
            ..Candidate::default()
        };
        let job = Job {
            title: "Staff Engineer".to_string(),
            company: "Acme Corp".to_string(),
            ..Job::default()
        };
        let (letter, resume) = document_file_names(&candidate, &job).unwrap();
        assert_eq!(letter, "Alex_Rivera_Cover_Letter_Staff_Engineer_Acme_Corp.docx");
        assert_eq!(resume, "Alex_Rivera_Resume_Staff_Engineer_Acme_Corp.docx");
    }

    #[test]
    fn test_application_yaml_without_candidate() {
        let yaml = r"
job:
  title: Staff Engineer
  company: Acme Corp
cover_letter:
  opening: Hello.
";
        let app: Application = serde_yaml::from_str(yaml).unwrap();
        assert!(app.candidate.is_none());
        assert!(app.resume.is_none());
        assert_eq!(app.job.company, "Acme Corp");
        assert!(app.cover_letter.sections.is_empty());
    }

    #[test]
    fn test_generate_application_documents() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path().join("nested").join("generated");

        let candidate = Candidate {
            name: "Alex Rivera".to_string(),
            email: "alex@example.com".to_string(),
            ..Candidate::default()
        };
        let job = Job {
            title: "Staff Engineer".to_string(),
            company: "Acme Corp".to_string(),
            location: "Remote".to_string(),
            date: Some("May 1, 2026".to_string()),
        };
        let letter = CoverLetter {
            opening: "I would like to apply.".to_string(),
            ..CoverLetter::default()
        };
        let resume: Resume = serde_yaml::from_str(
            "summary: Engineer.\nskills:\n  - {category: Languages, items: 'Python, Rust'}\n",
        )
        .unwrap();

        let docs = generate_application_documents(&candidate, &job, &letter, &resume, &out).unwrap();
        assert!(docs.cover_letter.starts_with(&out));
        assert!(docs.cover_letter.metadata().unwrap().len() > 0);
        assert!(docs.resume.metadata().unwrap().len() > 0);

        let letter_text = extract_docx_text(&docs.cover_letter).unwrap();
        assert!(letter_text.contains("Re: Staff Engineer"));
        assert!(letter_text.contains("May 1, 2026"));

        let resume_text = extract_docx_text(&docs.resume).unwrap();
        assert!(resume_text.contains("Alex Rivera"));
        assert!(resume_text.contains("Languages: Python, Rust"));
    }
}
