//! # jobdocs
//!
//! Generates a styled cover letter and resume as Word documents from YAML
//! describing the candidate, the job and the letter content. Also extracts
//! plain text from uploaded resumes and manages named profiles of the
//! candidate's configuration.
//!
//! ## Usage
//!
//! ### As a Library
//!
//! ```no_run
//! use jobdocs::{Application, generate_application_documents};
//! use std::path::Path;
//!
//! let app = Application::load(Path::new("application.yaml"))?;
//! let candidate = app.candidate.unwrap_or_default();
//! let resume = app.resume.unwrap_or_default();
//! let docs = generate_application_documents(
//!     &candidate,
//!     &app.job,
//!     &app.cover_letter,
//!     &resume,
//!     Path::new("out"),
//! )?;
//! println!("{}", docs.resume.display());
//! # Ok::<(), jobdocs::JobdocsError>(())
//! ```
//!
//! ### As a CLI Tool
//!
//! ```bash
//! # Generate both documents for an application
//! jobdocs generate application.yaml -o out/
//!
//! # Pull text out of an existing resume
//! jobdocs extract resume.docx --full
//!
//! # Keep separate profiles and switch between them
//! jobdocs profile save work
//! jobdocs profile switch personal
//! ```

pub mod config;
pub mod docx;
pub mod error;
pub mod extract;
pub mod generate;
pub mod highlight;
pub mod layout;
pub mod model;
pub mod profile;
pub mod profiles;
pub mod wizard;

// Re-export main types and functions for convenience
pub use config::{Config, ConfigHome};
pub use error::{JobdocsError, Result};
pub use extract::{extract_docx_text, extract_text};
pub use generate::{Application, GeneratedDocuments, generate_application_documents};
pub use highlight::{Segment, split_highlights};
pub use model::{Candidate, CoverLetter, Job, Qualifications, Resume};
pub use profile::{Profile, load_profile, write_profile};
pub use profiles::{ProfileStore, ProfileSummary};
pub use wizard::{Prompter, Wizard};
