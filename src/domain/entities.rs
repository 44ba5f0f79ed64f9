//! Domain entities: catalog records and the raw dataset shape

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::error::DomainError;

/// Minimum passing grade attached to a prerequisite.
///
/// Catalog text is a letter `A`-`D` with an optional `+`/`-` sign, `F`, or `Any`
/// for "no specific minimum".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Grade {
    APlus,
    A,
    AMinus,
    BPlus,
    B,
    BMinus,
    CPlus,
    C,
    CMinus,
    DPlus,
    D,
    DMinus,
    F,
    Any,
}

impl Grade {
    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::AMinus => "A-",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::BMinus => "B-",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::CMinus => "C-",
            Grade::DPlus => "D+",
            Grade::D => "D",
            Grade::DMinus => "D-",
            Grade::F => "F",
            Grade::Any => "Any",
        }
    }

    /// Position on the letter scale, higher is better. `Any` has no rank.
    fn rank(&self) -> Option<u8> {
        match self {
            Grade::APlus => Some(12),
            Grade::A => Some(11),
            Grade::AMinus => Some(10),
            Grade::BPlus => Some(9),
            Grade::B => Some(8),
            Grade::BMinus => Some(7),
            Grade::CPlus => Some(6),
            Grade::C => Some(5),
            Grade::CMinus => Some(4),
            Grade::DPlus => Some(3),
            Grade::D => Some(2),
            Grade::DMinus => Some(1),
            Grade::F => Some(0),
            Grade::Any => None,
        }
    }

    /// Whether an earned grade meets `minimum`.
    ///
    /// Every grade meets an `Any` minimum; an earned `Any` meets nothing else.
    pub fn satisfies(&self, minimum: Grade) -> bool {
        match (self.rank(), minimum.rank()) {
            (_, None) => true,
            (Some(earned), Some(required)) => earned >= required,
            (None, Some(_)) => false,
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Grade {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let grade = match s.trim() {
            "A+" => Grade::APlus,
            "A" => Grade::A,
            "A-" => Grade::AMinus,
            "B+" => Grade::BPlus,
            "B" => Grade::B,
            "B-" => Grade::BMinus,
            "C+" => Grade::CPlus,
            "C" => Grade::C,
            "C-" => Grade::CMinus,
            "D+" => Grade::DPlus,
            "D" => Grade::D,
            "D-" => Grade::DMinus,
            "F" => Grade::F,
            "Any" => Grade::Any,
            other => return Err(DomainError::UnknownGrade(other.to_string())),
        };
        Ok(grade)
    }
}

impl TryFrom<String> for Grade {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Grade> for String {
    fn from(grade: Grade) -> Self {
        grade.as_str().to_string()
    }
}

/// A single required course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prerequisite {
    #[serde(rename = "codeName")]
    pub code_name: String,
    #[serde(rename = "minimumGrade", alias = "minimum grade")]
    pub minimum_grade: Grade,
}

impl Prerequisite {
    pub fn new(code_name: impl Into<String>, minimum_grade: Grade) -> Self {
        Self {
            code_name: code_name.into(),
            minimum_grade,
        }
    }
}

/// Alternative group: any one member satisfies the group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrerequisiteUnion {
    #[serde(rename = "one of")]
    pub one_of: Vec<Requirement>,
}

/// One entry of a course's prerequisite list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Requirement {
    Course(Prerequisite),
    OneOf(PrerequisiteUnion),
}

impl Requirement {
    pub fn course(code_name: impl Into<String>, minimum_grade: Grade) -> Self {
        Requirement::Course(Prerequisite::new(code_name, minimum_grade))
    }

    pub fn one_of(members: Vec<Requirement>) -> Self {
        Requirement::OneOf(PrerequisiteUnion { one_of: members })
    }

    /// The leaf prerequisite, if this entry is not an alternative group.
    pub fn as_course(&self) -> Option<&Prerequisite> {
        match self {
            Requirement::Course(p) => Some(p),
            Requirement::OneOf(_) => None,
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Requirement::Course(p) if p.minimum_grade == Grade::Any => write!(f, "{}", p.code_name),
            Requirement::Course(p) => write!(f, "{} (min {})", p.code_name, p.minimum_grade),
            Requirement::OneOf(_) => f.write_str("one of"),
        }
    }
}

/// Student organization. Flat, no relationships.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub name: String,
    pub description: String,
}

/// Faculty directory entry attached to a college.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacultyMember {
    pub name: String,
    /// Accepts either `titles: [..]` or a single `title: ".."`.
    #[serde(default, alias = "title", deserialize_with = "one_or_many")]
    pub titles: Vec<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub interests: Option<String>,
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(title) => vec![title],
        OneOrMany::Many(titles) => titles,
    })
}

// ============================================================
// RAW DATASET (forward references only)
// ============================================================

#[derive(Debug, Clone, Deserialize)]
pub struct RawDataset {
    pub colleges: Vec<RawCollege>,
    #[serde(alias = "studentOrganizations")]
    pub organizations: Vec<Organization>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCollege {
    pub name: String,
    pub majors: Vec<RawMajor>,
    #[serde(default)]
    pub faculty: Vec<FacultyMember>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawMajor {
    pub name: String,
    pub courses: Vec<RawCourse>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCourse {
    pub code_name: String,
    pub proper_name: String,
    pub credits: f64,
    pub prerequisites: Vec<Requirement>,
}

/// Whether `text` has the catalog's course code shape, e.g. `CS-171`.
pub fn is_course_code(text: &str) -> bool {
    static CODE: OnceLock<Regex> = OnceLock::new();
    CODE.get_or_init(|| Regex::new(r"^[A-Z]+-\d+$").unwrap())
        .is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_catalog_grade_text_when_parsing_then_roundtrips_display() {
        for text in ["A+", "A", "B-", "C-", "D+", "F", "Any"] {
            let grade: Grade = text.parse().expect("valid grade");
            assert_eq!(grade.to_string(), text);
        }
    }

    #[test]
    fn given_unknown_grade_when_parsing_then_errors() {
        let result = "E".parse::<Grade>();
        assert!(matches!(result, Err(DomainError::UnknownGrade(g)) if g == "E"));
    }

    #[test]
    fn given_minimum_grade_when_checking_then_ranks_letters() {
        assert!(Grade::B.satisfies(Grade::CMinus));
        assert!(Grade::CMinus.satisfies(Grade::CMinus));
        assert!(!Grade::DPlus.satisfies(Grade::CMinus));
        assert!(Grade::F.satisfies(Grade::Any));
        assert!(Grade::Any.satisfies(Grade::Any));
        assert!(!Grade::Any.satisfies(Grade::D));
    }

    #[test]
    fn given_union_json_when_deserializing_then_builds_tagged_variants() {
        let json = r#"[
            {"codeName": "CS-171", "minimumGrade": "C-"},
            {"one of": [
                {"codeName": "MATH-101", "minimum grade": "Any"},
                {"one of": [{"codeName": "MATH-102", "minimumGrade": "D"}]}
            ]}
        ]"#;

        let parsed: Vec<Requirement> = serde_json::from_str(json).unwrap();

        assert_eq!(
            parsed,
            vec![
                Requirement::course("CS-171", Grade::CMinus),
                Requirement::one_of(vec![
                    Requirement::course("MATH-101", Grade::Any),
                    Requirement::one_of(vec![Requirement::course("MATH-102", Grade::D)]),
                ]),
            ]
        );
    }

    #[test]
    fn given_single_title_when_deserializing_faculty_then_wraps_in_vec() {
        let json = r#"{"name": "Ada Lovelace", "title": "Professor", "email": "ada@example.edu"}"#;
        let member: FacultyMember = serde_json::from_str(json).unwrap();
        assert_eq!(member.titles, vec!["Professor".to_string()]);
        assert_eq!(member.phone, None);
    }

    #[test]
    fn given_code_shapes_when_checking_then_matches_catalog_format() {
        assert!(is_course_code("CS-171"));
        assert!(is_course_code("ARCH-283"));
        assert!(!is_course_code("cs-171"));
        assert!(!is_course_code("CS 171"));
        assert!(!is_course_code("CS-"));
    }
}
