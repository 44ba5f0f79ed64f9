//! Catalog builder: stitches parent references into the raw dataset tree.

use tracing::{debug, instrument, warn};

use crate::domain::arena::{Catalog, CollegeId, CollegeNode, CourseId, CourseNode, MajorId, MajorNode};
use crate::domain::entities::{is_course_code, RawCollege, RawCourse, RawDataset, RawMajor};
use crate::domain::error::DomainResult;

/// Turns the forward-only raw dataset (college -> majors -> courses) into a
/// catalog where every major knows its college and every course its major.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    catalog: Catalog,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self {
            catalog: Catalog::new(),
        }
    }

    /// Consume the builder and the raw dataset, returning the linked catalog.
    #[instrument(level = "debug", skip_all)]
    pub fn build(mut self, raw: RawDataset) -> Catalog {
        for college in raw.colleges {
            self.add_college(college);
        }
        self.catalog.organizations = raw.organizations;

        debug!(
            "built catalog: {} colleges, {} majors, {} courses, {} organizations",
            self.catalog.college_count(),
            self.catalog.major_count(),
            self.catalog.course_count(),
            self.catalog.organizations.len()
        );
        self.catalog
    }

    fn add_college(&mut self, raw: RawCollege) -> CollegeId {
        let college_id = CollegeId(self.catalog.colleges.insert(CollegeNode {
            name: raw.name,
            majors: Vec::new(),
            faculty: raw.faculty,
        }));
        self.catalog.college_order.push(college_id);

        let majors: Vec<MajorId> = raw
            .majors
            .into_iter()
            .map(|major| self.add_major(major, college_id))
            .collect();

        if let Some(college) = self.catalog.colleges.get_mut(college_id.0) {
            college.majors = majors;
        }
        college_id
    }

    fn add_major(&mut self, raw: RawMajor, college: CollegeId) -> MajorId {
        // The major carries its college before any course is attached to it.
        let major_id = MajorId(self.catalog.majors.insert(MajorNode {
            name: raw.name,
            college,
            courses: Vec::new(),
        }));

        let courses: Vec<CourseId> = raw
            .courses
            .into_iter()
            .map(|course| self.add_course(course, major_id))
            .collect();

        if let Some(major) = self.catalog.majors.get_mut(major_id.0) {
            major.courses = courses;
        }
        major_id
    }

    fn add_course(&mut self, raw: RawCourse, major: MajorId) -> CourseId {
        if !is_course_code(&raw.code_name) {
            warn!("course code {:?} is not of the form SUBJ-123", raw.code_name);
        }
        let college = self.catalog.majors[major.0].college;
        CourseId(self.catalog.courses.insert(CourseNode {
            code_name: raw.code_name,
            proper_name: raw.proper_name,
            credits: raw.credits,
            prerequisites: raw.prerequisites,
            major,
            college,
        }))
    }
}

impl Catalog {
    /// Parse a dataset document and build the linked catalog.
    ///
    /// A document missing a required field is rejected as a whole.
    pub fn from_json(text: &str) -> DomainResult<Self> {
        let raw: RawDataset = serde_json::from_str(text)?;
        Ok(CatalogBuilder::new().build(raw))
    }

    pub fn from_raw(raw: RawDataset) -> Self {
        CatalogBuilder::new().build(raw)
    }
}
