//! Tree rendering for terminal display

use termtree::Tree;

use crate::domain::{Catalog, CourseRef, Requirement};

pub trait ToTree {
    fn to_tree(&self) -> Tree<String>;
}

impl ToTree for Requirement {
    fn to_tree(&self) -> Tree<String> {
        match self {
            Requirement::Course(_) => Tree::new(self.to_string()),
            Requirement::OneOf(union) => {
                Tree::new(self.to_string()).with_leaves(union.one_of.iter().map(|m| m.to_tree()))
            }
        }
    }
}

// Course with its declared prerequisite expression
impl ToTree for CourseRef<'_> {
    fn to_tree(&self) -> Tree<String> {
        Tree::new(self.to_string()).with_leaves(self.prerequisites().iter().map(|r| r.to_tree()))
    }
}

// colleges -> majors, with course counts
impl ToTree for Catalog {
    fn to_tree(&self) -> Tree<String> {
        let mut root = Tree::new("catalog".to_string());
        for college in self.colleges() {
            let mut college_tree = Tree::new(college.name().to_string());
            for major in college.majors() {
                college_tree.push(Tree::new(format!(
                    "{} ({} courses)",
                    major.name(),
                    major.courses().count()
                )));
            }
            root.push(college_tree);
        }
        root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Grade;

    #[test]
    fn given_union_when_rendering_then_nests_members() {
        let requirement = Requirement::one_of(vec![
            Requirement::course("MATH-101", Grade::Any),
            Requirement::course("MATH-102", Grade::CMinus),
        ]);

        let rendered = requirement.to_tree().to_string();

        assert!(rendered.starts_with("one of"));
        assert!(rendered.contains("MATH-101"));
        assert!(rendered.contains("MATH-102 (min C-)"));
    }
}
