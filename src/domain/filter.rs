//! Generic attribute filter engine.
//!
//! A filter is a partial attribute set. An entity matches when every supplied
//! attribute equals the entity's value: strings and numbers by value, catalog
//! views by identity. Scans are unindexed; the catalog is small and static.

use tracing::{debug, instrument};

use crate::domain::arena::{Catalog, CollegeRef, CourseRef, MajorRef};
use crate::domain::entities::Organization;

/// Partial attribute set over entities of type `E`.
pub trait Filter<E> {
    /// Number of attributes supplied.
    fn criteria(&self) -> usize;

    /// Whether every supplied attribute equals the entity's value.
    fn matches(&self, entity: &E) -> bool;

    fn is_empty(&self) -> bool {
        self.criteria() == 0
    }
}

/// First candidate matching `filter`, in candidate order.
///
/// An empty filter matches nothing.
pub fn first_match<E, F, I>(filter: &F, candidates: I) -> Option<E>
where
    F: Filter<E> + ?Sized,
    I: IntoIterator<Item = E>,
{
    if filter.is_empty() {
        debug!("empty filter, no match");
        return None;
    }
    candidates.into_iter().find(|candidate| filter.matches(candidate))
}

/// All candidates matching `filter`, in candidate order.
///
/// An empty filter matches nothing.
pub fn all_matches<E, F, I>(filter: &F, candidates: I) -> Vec<E>
where
    F: Filter<E> + ?Sized,
    I: IntoIterator<Item = E>,
{
    if filter.is_empty() {
        debug!("empty filter, no match");
        return Vec::new();
    }
    candidates
        .into_iter()
        .filter(|candidate| filter.matches(candidate))
        .collect()
}

fn attr<T: PartialEq + ?Sized>(expected: Option<&T>, actual: &T) -> bool {
    expected.map_or(true, |expected| expected == actual)
}

fn count(supplied: &[bool]) -> usize {
    supplied.iter().filter(|&&s| s).count()
}

// ============================================================
// TYPED FILTERS
// ============================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollegeFilter {
    pub name: Option<String>,
}

impl CollegeFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl<'a> Filter<CollegeRef<'a>> for CollegeFilter {
    fn criteria(&self) -> usize {
        count(&[self.name.is_some()])
    }

    fn matches(&self, college: &CollegeRef<'a>) -> bool {
        attr(self.name.as_deref(), college.name())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MajorFilter<'a> {
    pub name: Option<String>,
    pub college: Option<CollegeRef<'a>>,
}

impl<'a> MajorFilter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn college(mut self, college: CollegeRef<'a>) -> Self {
        self.college = Some(college);
        self
    }
}

impl<'a> Filter<MajorRef<'a>> for MajorFilter<'a> {
    fn criteria(&self) -> usize {
        count(&[self.name.is_some(), self.college.is_some()])
    }

    fn matches(&self, major: &MajorRef<'a>) -> bool {
        attr(self.name.as_deref(), major.name()) && attr(self.college.as_ref(), &major.college())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseFilter<'a> {
    pub code_name: Option<String>,
    pub proper_name: Option<String>,
    pub credits: Option<f64>,
    pub major: Option<MajorRef<'a>>,
    pub college: Option<CollegeRef<'a>>,
}

impl<'a> CourseFilter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn code_name(mut self, code_name: impl Into<String>) -> Self {
        self.code_name = Some(code_name.into());
        self
    }

    pub fn proper_name(mut self, proper_name: impl Into<String>) -> Self {
        self.proper_name = Some(proper_name.into());
        self
    }

    pub fn credits(mut self, credits: f64) -> Self {
        self.credits = Some(credits);
        self
    }

    pub fn major(mut self, major: MajorRef<'a>) -> Self {
        self.major = Some(major);
        self
    }

    pub fn college(mut self, college: CollegeRef<'a>) -> Self {
        self.college = Some(college);
        self
    }
}

impl<'a> Filter<CourseRef<'a>> for CourseFilter<'a> {
    fn criteria(&self) -> usize {
        count(&[
            self.code_name.is_some(),
            self.proper_name.is_some(),
            self.credits.is_some(),
            self.major.is_some(),
            self.college.is_some(),
        ])
    }

    fn matches(&self, course: &CourseRef<'a>) -> bool {
        attr(self.code_name.as_deref(), course.code_name())
            && attr(self.proper_name.as_deref(), course.proper_name())
            && attr(self.credits.as_ref(), &course.credits())
            && attr(self.major.as_ref(), &course.major())
            && attr(self.college.as_ref(), &course.college())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrganizationFilter {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl OrganizationFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl<'o> Filter<&'o Organization> for OrganizationFilter {
    fn criteria(&self) -> usize {
        count(&[self.name.is_some(), self.description.is_some()])
    }

    fn matches(&self, organization: &&'o Organization) -> bool {
        attr(self.name.as_deref(), organization.name.as_str())
            && attr(self.description.as_deref(), organization.description.as_str())
    }
}

// ============================================================
// CATALOG QUERIES
// ============================================================

impl Catalog {
    /// First course matching `filter`, scanning colleges, majors, then courses
    /// in dataset order.
    ///
    /// Worst case visits every course once per supplied attribute.
    #[instrument(level = "debug", skip(self))]
    pub fn course_with<'a>(&'a self, filter: &CourseFilter<'a>) -> Option<CourseRef<'a>> {
        first_match(filter, self.courses())
    }

    /// All courses matching `filter`, in dataset order.
    #[instrument(level = "debug", skip(self))]
    pub fn courses_with<'a>(&'a self, filter: &CourseFilter<'a>) -> Vec<CourseRef<'a>> {
        all_matches(filter, self.courses())
    }

    #[instrument(level = "debug", skip(self))]
    pub fn major_with<'a>(&'a self, filter: &MajorFilter<'a>) -> Option<MajorRef<'a>> {
        first_match(filter, self.majors())
    }

    #[instrument(level = "debug", skip(self))]
    pub fn majors_with<'a>(&'a self, filter: &MajorFilter<'a>) -> Vec<MajorRef<'a>> {
        all_matches(filter, self.majors())
    }

    #[instrument(level = "debug", skip(self))]
    pub fn college_with(&self, filter: &CollegeFilter) -> Option<CollegeRef<'_>> {
        first_match(filter, self.colleges())
    }

    #[instrument(level = "debug", skip(self))]
    pub fn colleges_with(&self, filter: &CollegeFilter) -> Vec<CollegeRef<'_>> {
        all_matches(filter, self.colleges())
    }

    #[instrument(level = "debug", skip(self))]
    pub fn student_organization_with(&self, filter: &OrganizationFilter) -> Option<&Organization> {
        first_match(filter, self.organizations.iter())
    }

    #[instrument(level = "debug", skip(self))]
    pub fn student_organizations_with(&self, filter: &OrganizationFilter) -> Vec<&Organization> {
        all_matches(filter, self.organizations.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Even;

    impl Filter<u32> for Even {
        fn criteria(&self) -> usize {
            1
        }

        fn matches(&self, n: &u32) -> bool {
            n % 2 == 0
        }
    }

    struct Nothing;

    impl Filter<u32> for Nothing {
        fn criteria(&self) -> usize {
            0
        }

        fn matches(&self, _: &u32) -> bool {
            true
        }
    }

    #[test]
    fn given_candidates_when_first_match_then_returns_earliest() {
        assert_eq!(first_match(&Even, [1, 3, 4, 6]), Some(4));
        assert_eq!(first_match(&Even, [1, 3]), None);
    }

    #[test]
    fn given_candidates_when_all_matches_then_keeps_order() {
        assert_eq!(all_matches(&Even, [6, 1, 2, 4]), vec![6, 2, 4]);
    }

    #[test]
    fn given_empty_filter_when_matching_then_matches_nothing() {
        assert_eq!(first_match(&Nothing, [1, 2, 3]), None);
        assert!(all_matches(&Nothing, [1, 2, 3]).is_empty());
    }

    #[test]
    fn given_builder_calls_when_counting_criteria_then_counts_supplied_attributes() {
        let filter = CourseFilter::new().code_name("CS-171").credits(3.0);
        assert_eq!(Filter::<CourseRef<'_>>::criteria(&filter), 2);
        assert!(Filter::<CourseRef<'_>>::is_empty(&CourseFilter::new()));
    }
}
