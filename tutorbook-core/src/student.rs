//! Students on the tutor's roster.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A student the tutor teaches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    pub name: String,
    pub subject: String,
    /// Free-form contact details (phone, email, parent's number...)
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub level: EducationLevel,
}

impl Student {
    pub fn new(name: String, subject: String, contact: String, level: EducationLevel) -> Self {
        Student {
            id: crate::new_id(),
            name,
            subject,
            contact,
            level,
        }
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.subject)
    }
}

/// Stage of education a student is at.
///
/// The Polish labels used by older snapshots are accepted as aliases.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EducationLevel {
    #[serde(alias = "Szkoła Podstawowa")]
    PrimarySchool,
    #[default]
    #[serde(alias = "Liceum")]
    HighSchool,
    #[serde(alias = "Matura")]
    FinalExam,
    #[serde(alias = "Studia")]
    University,
}

impl EducationLevel {
    pub const ALL: [EducationLevel; 4] = [
        EducationLevel::PrimarySchool,
        EducationLevel::HighSchool,
        EducationLevel::FinalExam,
        EducationLevel::University,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EducationLevel::PrimarySchool => "primary-school",
            EducationLevel::HighSchool => "high-school",
            EducationLevel::FinalExam => "final-exam",
            EducationLevel::University => "university",
        }
    }
}

impl fmt::Display for EducationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EducationLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EducationLevel::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let known: Vec<_> = EducationLevel::ALL.iter().map(|l| l.as_str()).collect();
                format!("Unknown level '{}'. Expected one of: {}", s, known.join(", "))
            })
    }
}

/// Partial update for a [`Student`]. Present fields overwrite, absent fields are kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentPatch {
    pub name: Option<String>,
    pub subject: Option<String>,
    pub contact: Option<String>,
    pub level: Option<EducationLevel>,
}

impl StudentPatch {
    pub fn is_empty(&self) -> bool {
        *self == StudentPatch::default()
    }

    pub fn apply(&self, student: &mut Student) {
        if let Some(name) = &self.name {
            student.name = name.clone();
        }
        if let Some(subject) = &self.subject {
            student.subject = subject.clone();
        }
        if let Some(contact) = &self.contact {
            student.contact = contact.clone();
        }
        if let Some(level) = self.level {
            student.level = level;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anna() -> Student {
        Student::new(
            "Anna".to_string(),
            "Math".to_string(),
            "555-0100".to_string(),
            EducationLevel::HighSchool,
        )
    }

    #[test]
    fn test_patch_overwrites_present_fields_only() {
        let mut student = anna();
        let id = student.id.clone();

        StudentPatch {
            subject: Some("Physics".to_string()),
            level: Some(EducationLevel::FinalExam),
            ..Default::default()
        }
        .apply(&mut student);

        assert_eq!(student.id, id);
        assert_eq!(student.name, "Anna");
        assert_eq!(student.subject, "Physics");
        assert_eq!(student.contact, "555-0100");
        assert_eq!(student.level, EducationLevel::FinalExam);
    }

    #[test]
    fn test_empty_patch_is_noop() {
        let mut student = anna();
        let before = student.clone();
        let patch = StudentPatch::default();

        assert!(patch.is_empty());
        patch.apply(&mut student);
        assert_eq!(student, before);
    }

    #[test]
    fn test_level_accepts_legacy_labels() {
        let json = r#"{"id":"s1","name":"Ola","subject":"Chemistry","contact":"","level":"Matura"}"#;
        let student: Student = serde_json::from_str(json).unwrap();
        assert_eq!(student.level, EducationLevel::FinalExam);

        let out = serde_json::to_string(&student).unwrap();
        assert!(out.contains(r#""level":"final-exam""#));
    }

    #[test]
    fn test_level_from_str() {
        assert_eq!("University".parse::<EducationLevel>(), Ok(EducationLevel::University));
        assert!("kindergarten".parse::<EducationLevel>().is_err());
    }
}
