//! Tests for filter queries over the bundled catalog

use rstest::{fixture, rstest};

use coursegraph::application::services::BUNDLED_DATASET;
use coursegraph::domain::{
    Catalog, CollegeFilter, CourseFilter, CourseRef, MajorFilter, OrganizationFilter,
};
use coursegraph::util::testing::init_test_setup;

#[fixture]
fn catalog() -> Catalog {
    init_test_setup();
    Catalog::from_json(BUNDLED_DATASET).expect("bundled dataset loads")
}

fn codes(courses: &[CourseRef<'_>]) -> Vec<String> {
    courses.iter().map(|c| c.code_name().to_string()).collect()
}

#[rstest]
fn given_code_name_when_course_with_then_returns_linked_course(catalog: Catalog) {
    // Act
    let course = catalog
        .course_with(&CourseFilter::new().code_name("CS-171"))
        .expect("CS-171 exists");

    // Assert
    assert_eq!(course.proper_name(), "Computer Programming I");
    assert_eq!(course.credits(), 3.0);
    assert_eq!(course.major().name(), "Computer Science");
    assert_eq!(course.college().name(), "Computing & Informatics");
    assert_eq!(course.college(), course.major().college());
}

#[rstest]
fn given_college_when_courses_with_then_returns_all_courses_in_dataset_order(catalog: Catalog) {
    // Arrange
    let college = catalog
        .college_with(&CollegeFilter::new().name("Computing & Informatics"))
        .expect("college exists");

    // Act
    let courses = catalog.courses_with(&CourseFilter::new().college(college));

    // Assert
    assert_eq!(
        codes(&courses),
        [
            "CS-164", "CS-171", "CS-172", "CS-260", "CS-265", "CS-273", "CS-360", "SE-181",
            "SE-201"
        ]
    );
    assert!(courses.iter().all(|c| c.college() == college));
}

#[rstest]
fn given_credits_when_courses_with_then_matches_across_colleges(catalog: Catalog) {
    let courses = catalog.courses_with(&CourseFilter::new().credits(4.0));

    assert_eq!(
        codes(&courses),
        [
            "CS-260", "MATH-101", "MATH-102", "MATH-121", "MATH-122", "PHYS-101", "PHYS-102",
            "ECE-201", "ECE-301"
        ]
    );
}

#[rstest]
fn given_college_when_majors_with_then_returns_its_majors(catalog: Catalog) {
    // Arrange
    let college = catalog
        .college_with(&CollegeFilter::new().name("Arts and Sciences"))
        .expect("college exists");

    // Act
    let majors = catalog.majors_with(&MajorFilter::new().college(college));

    // Assert
    let names: Vec<&str> = majors.iter().map(|m| m.name()).collect();
    assert_eq!(names, ["Mathematics", "Physics"]);
}

#[rstest]
fn given_major_when_courses_with_then_returns_only_that_major(catalog: Catalog) {
    // Arrange
    let major = catalog
        .major_with(&MajorFilter::new().name("Software Engineering"))
        .expect("major exists");

    // Act
    let courses = catalog.courses_with(&CourseFilter::new().major(major));

    // Assert
    assert_eq!(codes(&courses), ["SE-181", "SE-201"]);
}

#[rstest]
fn given_conflicting_attributes_when_course_with_then_returns_none(catalog: Catalog) {
    // Arrange
    let college = catalog
        .college_with(&CollegeFilter::new().name("Arts and Sciences"))
        .expect("college exists");

    // Act
    let found = catalog.course_with(&CourseFilter::new().code_name("CS-171").college(college));

    // Assert
    assert!(found.is_none());
}

#[rstest]
fn given_college_from_another_catalog_when_filtering_then_matches_nothing(catalog: Catalog) {
    // Arrange: equal content, different instance
    let other = Catalog::from_json(BUNDLED_DATASET).expect("bundled dataset loads");
    let foreign = other
        .college_with(&CollegeFilter::new().name("Computing & Informatics"))
        .expect("college exists");

    // Act
    let found = catalog.courses_with(&CourseFilter::new().college(foreign));

    // Assert
    assert!(found.is_empty());
}

#[rstest]
fn given_empty_filter_when_querying_then_matches_nothing(catalog: Catalog) {
    assert!(catalog.course_with(&CourseFilter::new()).is_none());
    assert!(catalog.courses_with(&CourseFilter::new()).is_empty());
    assert!(catalog.majors_with(&MajorFilter::new()).is_empty());
    assert!(catalog.colleges_with(&CollegeFilter::new()).is_empty());
    assert!(catalog
        .student_organizations_with(&OrganizationFilter::new())
        .is_empty());
}

#[rstest]
fn given_same_filter_when_queried_twice_then_returns_same_views(catalog: Catalog) {
    let filter = CourseFilter::new().credits(3.0);

    let first = catalog.courses_with(&filter);
    let second = catalog.courses_with(&filter);

    assert_eq!(first, second);
    assert_eq!(
        catalog.course_with(&filter),
        first.first().copied(),
        "first match is the head of all matches"
    );
}

#[rstest]
fn given_organization_name_when_student_organization_with_then_returns_it(catalog: Catalog) {
    let org = catalog
        .student_organization_with(&OrganizationFilter::new().name("Robotics Club"))
        .expect("organization exists");

    assert!(org.description.contains("robots"));
}

#[rstest]
fn given_unknown_organization_when_student_organization_with_then_returns_none(
    catalog: Catalog,
) {
    let found = catalog
        .student_organization_with(&OrganizationFilter::new().name("Underwater Basket Weaving"));

    assert!(found.is_none());
}

#[rstest]
fn given_bundled_catalog_when_counting_then_counts_every_entity(catalog: Catalog) {
    assert_eq!(catalog.college_count(), 3);
    assert_eq!(catalog.major_count(), 5);
    assert_eq!(catalog.course_count(), 19);
    assert_eq!(catalog.courses().count(), 19);
    assert_eq!(catalog.organizations().len(), 4);
}

#[rstest]
fn given_college_with_single_title_faculty_when_loading_then_keeps_title(catalog: Catalog) {
    let college = catalog
        .college_with(&CollegeFilter::new().name("Engineering"))
        .expect("college exists");

    let faculty = college.faculty();

    assert_eq!(faculty.len(), 1);
    assert_eq!(faculty[0].titles, ["Assistant Professor"]);
}

#[test]
fn given_catalog_when_shared_across_threads_then_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Catalog>();
}
