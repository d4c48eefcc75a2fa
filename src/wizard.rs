//! Interactive entry of contact details and qualifications.
//!
//! All console I/O goes through [`Prompter`], so the wizard runs the same
//! against a terminal or an in-memory script.

use crate::config::Config;
use crate::error::Result;
use crate::model::{Bullet, Certification, Education, Position, SkillGroup, Year};
use std::io::{BufRead, Write};

const RULE_WIDTH: usize = 60;
const SUMMARY_PREVIEW_CHARS: usize = 100;
const REVIEW_SUMMARY_CHARS: usize = 50;

/// Line-oriented prompts over any reader and writer
pub struct Prompter<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }

    /// Writes one line of output
    ///
    /// # Errors
    ///
    /// Returns `JobdocsError::Io` if the writer fails.
    pub fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.writer, "{text}")?;
        Ok(())
    }

    /// Next line without its terminator, or `None` at end of input
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Prompts and returns the raw reply; end of input reads as empty
    fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.writer, "{prompt}")?;
        self.writer.flush()?;
        Ok(self.read_line()?.unwrap_or_default())
    }

    /// Asks for a value, returning `default` on an empty reply
    ///
    /// # Errors
    ///
    /// Returns `JobdocsError::Io` on read or write failure.
    pub fn input(&mut self, prompt: &str, default: &str) -> Result<String> {
        if default.is_empty() {
            return Ok(self.ask(&format!("{prompt}: "))?.trim().to_string());
        }
        let reply = self.ask(&format!("{prompt} [{default}]: "))?;
        let reply = reply.trim();
        Ok(if reply.is_empty() { default } else { reply }.to_string())
    }

    /// Asks a yes/no question; anything but `y` or `yes` is no
    ///
    /// # Errors
    ///
    /// Returns `JobdocsError::Io` on read or write failure.
    pub fn yes_no(&mut self, prompt: &str, default: bool) -> Result<bool> {
        let hint = if default { "Y/n" } else { "y/N" };
        let reply = self.ask(&format!("{prompt} [{hint}]: "))?;
        let reply = reply.trim().to_lowercase();
        if reply.is_empty() {
            return Ok(default);
        }
        Ok(matches!(reply.as_str(), "y" | "yes"))
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Comma-separated highlight phrases, blanks dropped
fn parse_highlights(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|phrase| !phrase.is_empty())
        .map(str::to_string)
        .collect()
}

fn optional(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

pub struct Wizard<R, W> {
    prompter: Prompter<R, W>,
}

impl<R: BufRead, W: Write> Wizard<R, W> {
    pub fn new(prompter: Prompter<R, W>) -> Self {
        Self { prompter }
    }

    pub fn into_prompter(self) -> Prompter<R, W> {
        self.prompter
    }

    fn heading(&mut self, title: &str) -> Result<()> {
        let rule = "=".repeat(RULE_WIDTH);
        self.prompter.say(&format!("\n{rule}\n{title}\n{rule}"))
    }

    /// Walks through every section, edits `config` in place, then shows a
    /// review. Returns whether the user confirmed saving.
    ///
    /// # Errors
    ///
    /// Returns `JobdocsError::Io` on console failure.
    pub fn run(&mut self, config: &mut Config) -> Result<bool> {
        self.heading("RESUME IMPORT WIZARD")?;
        self.prompter
            .say("\nThis wizard sets up the qualifications used to generate\ntailored resumes and cover letters.")?;

        self.collect_candidate(config)?;
        self.collect_summary(config)?;
        self.collect_skills(config)?;
        self.collect_experience(config)?;
        self.collect_certifications(config)?;
        self.collect_education(config)?;

        self.review(config)?;
        self.prompter.yes_no("\nSave this configuration?", true)
    }

    fn collect_candidate(&mut self, config: &mut Config) -> Result<()> {
        self.heading("CONTACT INFORMATION")?;
        let candidate = &mut config.candidate;
        let p = &mut self.prompter;
        candidate.name = p.input("Full name", &candidate.name)?;
        candidate.phone = p.input("Phone number", &candidate.phone)?;
        candidate.email = p.input("Email address", &candidate.email)?;
        candidate.linkedin = p.input("LinkedIn URL (without https://)", &candidate.linkedin)?;
        candidate.calendar = p.input("Calendar link (optional)", &candidate.calendar)?;
        Ok(())
    }

    fn collect_summary(&mut self, config: &mut Config) -> Result<()> {
        self.heading("PROFESSIONAL SUMMARY")?;
        self.prompter
            .say("Enter a 2-3 sentence summary of your professional background.\n(Press Enter twice to finish)")?;

        let existing = &config.qualifications.summary;
        if !existing.is_empty() {
            let preview = truncate(existing, SUMMARY_PREVIEW_CHARS);
            self.prompter.say(&format!("\nCurrent summary: {preview}..."))?;
            if !self.prompter.yes_no("Replace existing summary?", false)? {
                return Ok(());
            }
        }

        self.prompter.say("\nEnter your summary:")?;
        let mut lines: Vec<String> = Vec::new();
        while let Some(line) = self.prompter.read_line()? {
            let line = line.trim().to_string();
            if line.is_empty() {
                if lines.is_empty() {
                    continue;
                }
                break;
            }
            lines.push(line);
        }
        config.qualifications.summary = lines.join(" ");
        Ok(())
    }

    /// Shows existing entries and asks whether to add more
    fn extend_existing(&mut self, label: &str, entries: &[String], prompt: &str) -> Result<bool> {
        if entries.is_empty() {
            return Ok(true);
        }
        self.prompter.say(&format!("\nExisting {label}: {}", entries.len()))?;
        for entry in entries {
            self.prompter.say(&format!("  - {entry}"))?;
        }
        self.prompter.yes_no(prompt, true)
    }

    fn collect_skills(&mut self, config: &mut Config) -> Result<()> {
        self.heading("SKILLS")?;
        self.prompter.say("Enter skills organized by category.")?;

        let existing: Vec<String> = config
            .qualifications
            .skills
            .iter()
            .map(|group| group.category.clone())
            .collect();
        if !self.extend_existing("categories", &existing, "Add more skill categories?")? {
            return Ok(());
        }

        loop {
            self.prompter.say("\n(Leave category empty to finish)")?;
            let category = self
                .prompter
                .input("Skill category (e.g., 'Programming Languages', 'Tools')", "")?;
            if category.is_empty() {
                break;
            }
            let items = self
                .prompter
                .input(&format!("Skills in '{category}' (comma-separated)"), "")?;
            if !items.is_empty() {
                config.qualifications.skills.push(SkillGroup { category, items });
            }
        }
        Ok(())
    }

    fn collect_experience(&mut self, config: &mut Config) -> Result<()> {
        self.heading("WORK EXPERIENCE")?;
        self.prompter.say("Enter your work history, most recent first.")?;

        let existing: Vec<String> = config
            .qualifications
            .experience
            .iter()
            .map(|position| format!("{} at {}", position.title, position.company))
            .collect();
        if !self.extend_existing("positions", &existing, "Add more positions?")? {
            return Ok(());
        }

        loop {
            self.prompter.say("\n(Leave job title empty to finish)")?;
            let title = self.prompter.input("Job title", "")?;
            if title.is_empty() {
                break;
            }
            let company = self.prompter.input("Company name", "")?;
            let dates = self.prompter.input("Dates (e.g., 'Jan 2020 - Present')", "")?;

            self.prompter
                .say("Enter bullet points for this position (one per line, empty line to finish):")?;
            let mut bullets = Vec::new();
            loop {
                let text = self.prompter.ask("  • ")?.trim().to_string();
                if text.is_empty() {
                    break;
                }
                let highlights = parse_highlights(
                    &self
                        .prompter
                        .ask("    Phrases to highlight (comma-separated, or Enter for none): ")?,
                );
                bullets.push(if highlights.is_empty() {
                    Bullet::Plain(text)
                } else {
                    Bullet::Highlighted { text, highlights }
                });
            }

            config.qualifications.experience.push(Position {
                title,
                company,
                dates,
                bullets,
            });
        }
        Ok(())
    }

    fn collect_certifications(&mut self, config: &mut Config) -> Result<()> {
        self.heading("CERTIFICATIONS")?;

        let existing: Vec<String> = config
            .qualifications
            .certifications
            .iter()
            .map(|cert| cert.name().to_string())
            .collect();
        if !self.extend_existing("certifications", &existing, "Add more certifications?")? {
            return Ok(());
        }

        loop {
            self.prompter.say("\n(Leave certification name empty to finish)")?;
            let name = self.prompter.input("Certification name", "")?;
            if name.is_empty() {
                break;
            }
            let year = self.prompter.input("Year earned", "")?;
            let issuer = self.prompter.input("Issuing organization (optional)", "")?;
            config.qualifications.certifications.push(Certification::Detailed {
                name,
                detail: None,
                year: optional(year).map(Year::Text),
                issuer: optional(issuer),
            });
        }
        Ok(())
    }

    fn collect_education(&mut self, config: &mut Config) -> Result<()> {
        self.heading("EDUCATION")?;

        let existing: Vec<String> = config
            .qualifications
            .education
            .iter()
            .map(|entry| match entry {
                Education::Plain(text) => text.clone(),
                Education::Detailed { degree, school, .. } => format!("{degree} from {school}"),
            })
            .collect();
        if !self.extend_existing("education", &existing, "Add more education?")? {
            return Ok(());
        }

        loop {
            self.prompter.say("\n(Leave degree empty to finish)")?;
            let degree = self
                .prompter
                .input("Degree and major (e.g., 'Bachelor of Science, Computer Science')", "")?;
            if degree.is_empty() {
                break;
            }
            let school = self.prompter.input("School name", "")?;
            let year = self.prompter.input("Graduation year (optional)", "")?;
            config.qualifications.education.push(Education::Detailed {
                degree,
                school,
                year: optional(year).map(Year::Text),
            });
        }
        Ok(())
    }

    fn review(&mut self, config: &Config) -> Result<()> {
        self.heading("REVIEW")?;
        let quals = &config.qualifications;
        let name = if config.candidate.name.is_empty() {
            "Not set"
        } else {
            config.candidate.name.as_str()
        };
        let summary = if quals.summary.is_empty() {
            "Not set".to_string()
        } else {
            format!("{}...", truncate(&quals.summary, REVIEW_SUMMARY_CHARS))
        };

        let p = &mut self.prompter;
        p.say(&format!("\nCandidate: {name}"))?;
        p.say(&format!("Summary: {summary}"))?;
        p.say(&format!("Skills: {} categories", quals.skills.len()))?;
        p.say(&format!("Experience: {} positions", quals.experience.len()))?;
        p.say(&format!("Certifications: {}", quals.certifications.len()))?;
        p.say(&format!("Education: {}", quals.education.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(prompter: Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(prompter.into_inner().1).unwrap()
    }

    #[test]
    fn test_input_default_and_eof() {
        let mut p = prompter("\n  typed  \n");
        assert_eq!(p.input("Name", "Alex").unwrap(), "Alex");
        assert_eq!(p.input("Name", "Alex").unwrap(), "typed");
        assert_eq!(p.input("Name", "Alex").unwrap(), "Alex");
        assert_eq!(p.input("Phone", "").unwrap(), "");
        let out = output(p);
        assert!(out.contains("Name [Alex]: "));
        assert!(out.contains("Phone: "));
    }

    #[test]
    fn test_yes_no() {
        let mut p = prompter("y\nYES\nno\nmaybe\n\n");
        assert!(p.yes_no("Q", false).unwrap());
        assert!(p.yes_no("Q", false).unwrap());
        assert!(!p.yes_no("Q", true).unwrap());
        assert!(!p.yes_no("Q", true).unwrap());
        assert!(p.yes_no("Q", true).unwrap());
        // end of input takes the default
        assert!(!p.yes_no("Q", false).unwrap());
        let out = output(p);
        assert!(out.contains("Q [y/N]: "));
        assert!(out.contains("Q [Y/n]: "));
    }

    #[test]
    fn test_parse_highlights() {
        assert_eq!(
            parse_highlights(" 10M events/day , ,40% "),
            vec!["10M events/day", "40%"]
        );
        assert!(parse_highlights("").is_empty());
    }

    #[test]
    fn test_full_run_on_empty_config() {
        let script = [
            // contact
            "Alex Rivera",
            "555.867.5309",
            "alex@example.com",
            "linkedin.com/in/alex",
            "",
            // summary
            "",
            "Engineer with ten years",
            "of platform work.",
            "",
            // skills
            "Languages",
            "Python, Rust",
            "Empty Category",
            "",
            "",
            // experience
            "Senior Engineer",
            "BigTech",
            "2021 - Present",
            "Cut latency by 40%",
            "40%",
            "Mentored engineers",
            "",
            "",
            "",
            // certifications
            "CKA",
            "2022",
            "",
            "",
            // education
            "BS Computer Science",
            "State University",
            "",
            "",
            // save
            "y",
        ]
        .join("\n");

        let mut config = Config::default();
        let mut wizard = Wizard::new(prompter(&format!("{script}\n")));
        assert!(wizard.run(&mut config).unwrap());

        assert_eq!(config.candidate.name, "Alex Rivera");
        assert_eq!(config.candidate.calendar, "");
        let quals = &config.qualifications;
        assert_eq!(quals.summary, "Engineer with ten years of platform work.");
        assert_eq!(quals.skills.len(), 1);
        assert_eq!(quals.skills[0].items, "Python, Rust");

        let position = &quals.experience[0];
        assert_eq!(position.company, "BigTech");
        assert_eq!(
            position.bullets[0],
            Bullet::Highlighted {
                text: "Cut latency by 40%".into(),
                highlights: vec!["40%".into()],
            }
        );
        assert_eq!(position.bullets[1], Bullet::Plain("Mentored engineers".into()));

        assert_eq!(quals.certifications[0].detail_line(), "2022");
        assert_eq!(
            quals.education[0],
            Education::Detailed {
                degree: "BS Computer Science".into(),
                school: "State University".into(),
                year: None,
            }
        );

        let out = output(wizard.into_prompter());
        assert!(out.contains("CONTACT INFORMATION"));
        assert!(out.contains("Experience: 1 positions"));
    }

    #[test]
    fn test_existing_sections_kept_without_confirmation() {
        let mut config = Config::from_yaml(
            r"
candidate:
  name: Alex
qualifications:
  summary: Existing summary.
  skills:
    - {category: Languages, items: Rust}
  experience:
    - {title: Engineer, company: Acme}
",
        )
        .unwrap();
        let original = config.qualifications.clone();

        // contact defaults, keep summary, decline every extension, decline save
        let script = "\n\n\n\n\nn\nn\nn\n\n\nn\n";
        let mut wizard = Wizard::new(prompter(script));
        assert!(!wizard.run(&mut config).unwrap());

        assert_eq!(config.candidate.name, "Alex");
        assert_eq!(config.qualifications, original);
        let out = output(wizard.into_prompter());
        assert!(out.contains("Current summary: Existing summary...."));
        assert!(out.contains("  - Engineer at Acme"));
    }

    #[test]
    fn test_run_survives_end_of_input() {
        let mut config = Config::default();
        let mut wizard = Wizard::new(prompter(""));
        // the final confirmation defaults to yes
        assert!(wizard.run(&mut config).unwrap());
        assert_eq!(config, Config::default());
    }
}
