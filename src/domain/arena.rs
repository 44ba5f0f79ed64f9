//! Arena-backed catalog store.
//!
//! Colleges, majors and courses live in flat generational arenas. Parent links
//! are typed indices resolved on access, so the back-linked hierarchy
//! (course -> major -> college) never forms an ownership cycle.

use std::fmt;
use std::ptr;

use generational_arena::{Arena, Index};

use crate::domain::entities::{FacultyMember, Organization, Requirement};

/// Index of a college in its catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollegeId(pub(crate) Index);

/// Index of a major in its catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MajorId(pub(crate) Index);

/// Index of a course in its catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CourseId(pub(crate) Index);

#[derive(Debug)]
pub(crate) struct CollegeNode {
    pub name: String,
    pub majors: Vec<MajorId>,
    pub faculty: Vec<FacultyMember>,
}

#[derive(Debug)]
pub(crate) struct MajorNode {
    pub name: String,
    pub college: CollegeId,
    pub courses: Vec<CourseId>,
}

#[derive(Debug)]
pub(crate) struct CourseNode {
    pub code_name: String,
    pub proper_name: String,
    pub credits: f64,
    pub prerequisites: Vec<Requirement>,
    pub major: MajorId,
    /// Denormalized copy of `major.college`.
    pub college: CollegeId,
}

/// Immutable, fully back-linked catalog.
///
/// Built once by [`CatalogBuilder`](crate::domain::CatalogBuilder) and shared by
/// reference afterwards; no method takes `&mut self`.
#[derive(Debug)]
pub struct Catalog {
    pub(crate) colleges: Arena<CollegeNode>,
    pub(crate) majors: Arena<MajorNode>,
    pub(crate) courses: Arena<CourseNode>,
    /// Colleges in dataset order
    pub(crate) college_order: Vec<CollegeId>,
    pub(crate) organizations: Vec<Organization>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    /// An empty catalog. Populated through [`CatalogBuilder`](crate::domain::CatalogBuilder).
    pub fn new() -> Self {
        Self {
            colleges: Arena::new(),
            majors: Arena::new(),
            courses: Arena::new(),
            college_order: Vec::new(),
            organizations: Vec::new(),
        }
    }

    pub fn college(&self, id: CollegeId) -> Option<CollegeRef<'_>> {
        self.colleges
            .contains(id.0)
            .then_some(CollegeRef { catalog: self, id })
    }

    pub fn major(&self, id: MajorId) -> Option<MajorRef<'_>> {
        self.majors
            .contains(id.0)
            .then_some(MajorRef { catalog: self, id })
    }

    pub fn course(&self, id: CourseId) -> Option<CourseRef<'_>> {
        self.courses
            .contains(id.0)
            .then_some(CourseRef { catalog: self, id })
    }

    /// Colleges in dataset order.
    pub fn colleges(&self) -> impl Iterator<Item = CollegeRef<'_>> + '_ {
        self.college_order
            .iter()
            .map(move |&id| CollegeRef { catalog: self, id })
    }

    /// Majors in college order, then major order.
    pub fn majors(&self) -> impl Iterator<Item = MajorRef<'_>> + '_ {
        self.colleges().flat_map(|college| college.majors())
    }

    /// Courses in college order, then major order, then course order.
    pub fn courses(&self) -> impl Iterator<Item = CourseRef<'_>> + '_ {
        self.majors().flat_map(|major| major.courses())
    }

    /// Student organizations in dataset order.
    pub fn organizations(&self) -> &[Organization] {
        &self.organizations
    }

    pub fn college_count(&self) -> usize {
        self.colleges.len()
    }

    pub fn major_count(&self) -> usize {
        self.majors.len()
    }

    pub fn course_count(&self) -> usize {
        self.courses.len()
    }

    fn college_node(&self, id: CollegeId) -> &CollegeNode {
        &self.colleges[id.0]
    }

    fn major_node(&self, id: MajorId) -> &MajorNode {
        &self.majors[id.0]
    }

    fn course_node(&self, id: CourseId) -> &CourseNode {
        &self.courses[id.0]
    }
}

// ============================================================
// VIEWS
// ============================================================
//
// Views borrow the catalog and compare by identity: two views are equal only
// when they point at the same slot of the same catalog instance.

/// Read-only view of a college.
#[derive(Clone, Copy)]
pub struct CollegeRef<'a> {
    catalog: &'a Catalog,
    id: CollegeId,
}

impl<'a> CollegeRef<'a> {
    pub fn id(&self) -> CollegeId {
        self.id
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn name(&self) -> &'a str {
        &self.catalog.college_node(self.id).name
    }

    pub fn majors(&self) -> impl Iterator<Item = MajorRef<'a>> + 'a {
        let catalog = self.catalog;
        catalog
            .college_node(self.id)
            .majors
            .iter()
            .map(move |&id| MajorRef { catalog, id })
    }

    pub fn faculty(&self) -> &'a [FacultyMember] {
        &self.catalog.college_node(self.id).faculty
    }
}

impl PartialEq for CollegeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.catalog, other.catalog) && self.id == other.id
    }
}

impl Eq for CollegeRef<'_> {}

impl fmt::Debug for CollegeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("College").field("name", &self.name()).finish()
    }
}

/// Read-only view of a major.
#[derive(Clone, Copy)]
pub struct MajorRef<'a> {
    catalog: &'a Catalog,
    id: MajorId,
}

impl<'a> MajorRef<'a> {
    pub fn id(&self) -> MajorId {
        self.id
    }

    pub fn name(&self) -> &'a str {
        &self.catalog.major_node(self.id).name
    }

    /// Owning college.
    pub fn college(&self) -> CollegeRef<'a> {
        CollegeRef {
            catalog: self.catalog,
            id: self.catalog.major_node(self.id).college,
        }
    }

    pub fn courses(&self) -> impl Iterator<Item = CourseRef<'a>> + 'a {
        let catalog = self.catalog;
        catalog
            .major_node(self.id)
            .courses
            .iter()
            .map(move |&id| CourseRef { catalog, id })
    }
}

impl PartialEq for MajorRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.catalog, other.catalog) && self.id == other.id
    }
}

impl Eq for MajorRef<'_> {}

impl fmt::Debug for MajorRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Major")
            .field("name", &self.name())
            .field("college", &self.college().name())
            .finish()
    }
}

/// Read-only view of a course.
#[derive(Clone, Copy)]
pub struct CourseRef<'a> {
    catalog: &'a Catalog,
    id: CourseId,
}

impl<'a> CourseRef<'a> {
    pub fn id(&self) -> CourseId {
        self.id
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// Coded name such as `CS-171`.
    pub fn code_name(&self) -> &'a str {
        &self.catalog.course_node(self.id).code_name
    }

    pub fn proper_name(&self) -> &'a str {
        &self.catalog.course_node(self.id).proper_name
    }

    pub fn credits(&self) -> f64 {
        self.catalog.course_node(self.id).credits
    }

    /// Direct prerequisite entries in declaration order.
    pub fn prerequisites(&self) -> &'a [Requirement] {
        &self.catalog.course_node(self.id).prerequisites
    }

    pub fn major(&self) -> MajorRef<'a> {
        MajorRef {
            catalog: self.catalog,
            id: self.catalog.course_node(self.id).major,
        }
    }

    /// Equivalent to `self.major().college()`.
    pub fn college(&self) -> CollegeRef<'a> {
        CollegeRef {
            catalog: self.catalog,
            id: self.catalog.course_node(self.id).college,
        }
    }
}

impl PartialEq for CourseRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.catalog, other.catalog) && self.id == other.id
    }
}

impl Eq for CourseRef<'_> {}

impl fmt::Debug for CourseRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Course")
            .field("code_name", &self.code_name())
            .field("proper_name", &self.proper_name())
            .finish()
    }
}

impl fmt::Display for CourseRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code_name(), self.proper_name())
    }
}
