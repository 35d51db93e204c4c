//! Course Categories

use std::{
    convert::Infallible,
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Category tag of a purchasable course.
///
/// Tags the engine has no special handling for are kept verbatim in
/// [`CourseCategory::Other`] so that category matching still compares the
/// catalog's own strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CourseCategory {
    /// Certificate programme.
    Certificate,

    /// Internship with duration-based plans.
    Internship,

    /// Diploma programme.
    Diploma,

    /// Pre-recorded course.
    PreRecorded,

    /// Live masterclass.
    Masterclass,

    /// Therapy sessions, priced per session.
    Therapy,

    /// Supervised practice sessions, priced per session.
    Supervised,

    /// Resume studio service.
    ResumeStudio,

    /// Downloadable worksheet.
    Worksheet,

    /// Any tag not known to the engine.
    Other(String),
}

impl CourseCategory {
    /// Catalog tag for this category.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Certificate => "certificate",
            Self::Internship => "internship",
            Self::Diploma => "diploma",
            Self::PreRecorded => "pre-recorded",
            Self::Masterclass => "masterclass",
            Self::Therapy => "therapy",
            Self::Supervised => "supervised",
            Self::ResumeStudio => "resume-studio",
            Self::Worksheet => "worksheet",
            Self::Other(tag) => tag,
        }
    }

    /// Whether courses in this category are priced per session.
    ///
    /// Session-priced enrollments carry no human-facing enrollment number.
    #[must_use]
    pub const fn is_session_priced(&self) -> bool {
        matches!(self, Self::Therapy | Self::Supervised)
    }

    /// Whether this category offers several duration plans for one course.
    #[must_use]
    pub const fn is_multi_plan(&self) -> bool {
        matches!(self, Self::Internship)
    }

    /// Whether enrollments in this category are confirmed as a guided session booking.
    #[must_use]
    pub const fn is_guided_session(&self) -> bool {
        matches!(self, Self::Therapy | Self::Supervised)
    }
}

impl FromStr for CourseCategory {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase();

        Ok(match tag.as_str() {
            "certificate" => Self::Certificate,
            "internship" => Self::Internship,
            "diploma" => Self::Diploma,
            "pre-recorded" | "prerecorded" | "pre_recorded" => Self::PreRecorded,
            "masterclass" => Self::Masterclass,
            "therapy" => Self::Therapy,
            "supervised" => Self::Supervised,
            "resume-studio" | "resume_studio" => Self::ResumeStudio,
            "worksheet" => Self::Worksheet,
            _ => Self::Other(tag),
        })
    }
}

impl From<&str> for CourseCategory {
    fn from(value: &str) -> Self {
        match value.parse() {
            Ok(category) => category,
            Err(never) => match never {},
        }
    }
}

impl Display for CourseCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl Serialize for CourseCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CourseCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;

        Ok(Self::from(tag.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tags_round_trip_through_as_str() {
        for category in [
            CourseCategory::Certificate,
            CourseCategory::Internship,
            CourseCategory::PreRecorded,
            CourseCategory::ResumeStudio,
            CourseCategory::Supervised,
        ] {
            assert_eq!(CourseCategory::from(category.as_str()), category);
        }
    }

    #[test]
    fn tags_are_normalised() {
        assert_eq!(CourseCategory::from(" Therapy "), CourseCategory::Therapy);
        assert_eq!(
            CourseCategory::from("resume_studio"),
            CourseCategory::ResumeStudio
        );
    }

    #[test]
    fn unknown_tags_keep_their_text() {
        let category = CourseCategory::from("Bootcamp");

        assert_eq!(category, CourseCategory::Other("bootcamp".to_string()));
        assert_eq!(category.as_str(), "bootcamp");
        assert_ne!(category, CourseCategory::from("workshop"));
    }

    #[test]
    fn session_priced_categories_are_guided() {
        assert!(CourseCategory::Therapy.is_session_priced());
        assert!(CourseCategory::Supervised.is_guided_session());
        assert!(!CourseCategory::Internship.is_session_priced());
        assert!(CourseCategory::Internship.is_multi_plan());
        assert!(!CourseCategory::Diploma.is_multi_plan());
    }
}
