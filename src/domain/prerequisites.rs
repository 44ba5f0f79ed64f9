//! Prerequisite graph traversal over course views.
//!
//! Only leaf entries count as required. A course listed inside a "one of"
//! group can be substituted, so it is neither a strict prerequisite nor part
//! of the transitive closure.

use std::collections::{HashSet, VecDeque};

use tracing::{instrument, warn};

use crate::domain::arena::CourseRef;
use crate::domain::entities::{Prerequisite, PrerequisiteUnion, Requirement};
use crate::domain::filter::CourseFilter;

impl<'a> CourseRef<'a> {
    /// Whether this course is a strict prerequisite of `course`: it appears as
    /// a leaf entry directly in `course`'s prerequisite list.
    pub fn is_prerequisite_of(&self, course: &CourseRef<'_>) -> bool {
        course
            .prerequisites()
            .iter()
            .filter_map(Requirement::as_course)
            .any(|prerequisite| prerequisite.code_name == self.code_name())
    }

    /// Alternative groups declared directly on this course.
    pub fn alternatives(&self) -> impl Iterator<Item = &'a PrerequisiteUnion> + 'a {
        self.prerequisites().iter().filter_map(|entry| match entry {
            Requirement::OneOf(union) => Some(union),
            Requirement::Course(_) => None,
        })
    }

    /// Leaf prerequisites of this course resolved to catalog courses, in
    /// declaration order. Codes with no course in the catalog are skipped.
    pub fn direct_prerequisites(&self) -> Vec<CourseRef<'a>> {
        self.prerequisites()
            .iter()
            .filter_map(Requirement::as_course)
            .filter_map(|prerequisite| self.resolve(prerequisite))
            .collect()
    }

    /// Transitive closure of strict prerequisites, breadth first.
    ///
    /// Each level lists the prerequisites of the previous level in declaration
    /// order. A course reachable along several paths appears once per path.
    /// There is no cycle detection: a cyclic catalog does not terminate.
    #[instrument(level = "debug", skip(self), fields(course = %self.code_name()))]
    pub fn all_prerequisites(&self) -> Vec<CourseRef<'a>> {
        let mut prerequisites = Vec::new();
        let mut current = vec![*self];

        while !current.is_empty() {
            let mut next = Vec::new();
            for course in &current {
                for prerequisite in course.direct_prerequisites() {
                    prerequisites.push(prerequisite);
                    next.push(prerequisite);
                }
            }
            current = next;
        }

        prerequisites
    }

    /// Like [`all_prerequisites`](Self::all_prerequisites), with every course
    /// listed once at its first breadth-first position. Terminates on cycles.
    #[instrument(level = "debug", skip(self), fields(course = %self.code_name()))]
    pub fn distinct_prerequisites(&self) -> Vec<CourseRef<'a>> {
        let mut seen = HashSet::new();
        let mut queue = VecDeque::from([*self]);
        let mut prerequisites = Vec::new();

        while let Some(course) = queue.pop_front() {
            for prerequisite in course.direct_prerequisites() {
                if seen.insert(prerequisite.id()) {
                    prerequisites.push(prerequisite);
                    queue.push_back(prerequisite);
                }
            }
        }

        prerequisites
    }

    fn resolve(&self, prerequisite: &Prerequisite) -> Option<CourseRef<'a>> {
        let filter = CourseFilter::new().code_name(prerequisite.code_name.as_str());
        let found = self.catalog().course_with(&filter);
        if found.is_none() {
            warn!(
                "{} lists unknown prerequisite {}, skipping",
                self.code_name(),
                prerequisite.code_name
            );
        }
        found
    }
}
