//! Command dispatch

use std::io;

use clap::CommandFactory;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::cli::tree::ToTree;
use crate::config::{global_config_path, Settings};
use crate::domain::{
    parse_prerequisites, Catalog, CollegeFilter, CollegeRef, CourseFilter, CourseRef, MajorFilter,
    MajorRef, OrganizationFilter,
};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        Cli::command()
            .print_help()
            .map_err(|e| InfraError::io("print help", e))?;
        return Ok(());
    };

    // commands that need no catalog
    match command {
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(*shell, &mut cmd, name, &mut io::stdout());
            return Ok(());
        }
        Commands::Config { command } => return config(cli, command),
        Commands::Parse { text } => return parse(text),
        _ => {}
    }

    let container = build_container(cli)?;
    let catalog = container.load_catalog()?;
    let distinct_default = container.settings.distinct_prerequisites;

    match command {
        Commands::Course { code } => course(&catalog, code),
        Commands::Courses {
            college,
            major,
            name,
            credits,
        } => courses(
            &catalog,
            college.as_deref(),
            major.as_deref(),
            name.as_deref(),
            *credits,
        ),
        Commands::Majors { college, name } => majors(&catalog, college.as_deref(), name.as_deref()),
        Commands::Colleges { tree } => colleges(&catalog, *tree),
        Commands::Faculty { college } => faculty(&catalog, college),
        Commands::Prereqs { code, distinct } => prereqs(&catalog, code, *distinct || distinct_default),
        Commands::Requires {
            prerequisite,
            course,
        } => requires(&catalog, prerequisite, course),
        Commands::Org { name } => org(&catalog, name),
        Commands::Completion { .. } | Commands::Config { .. } | Commands::Parse { .. } => Ok(()),
    }
}

/// Settings from file and environment, then command line overrides.
fn build_container(cli: &Cli) -> CliResult<ServiceContainer> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(dataset) = &cli.dataset {
        settings.dataset = Some(dataset.clone());
    }
    debug!("settings: {:?}", settings);
    Ok(ServiceContainer::new(settings))
}

fn find_course<'a>(catalog: &'a Catalog, code: &str) -> CliResult<CourseRef<'a>> {
    catalog
        .course_with(&CourseFilter::new().code_name(code))
        .ok_or_else(|| CliError::not_found("course", code))
}

fn find_college<'a>(catalog: &'a Catalog, name: &str) -> CliResult<CollegeRef<'a>> {
    catalog
        .college_with(&CollegeFilter::new().name(name))
        .ok_or_else(|| CliError::not_found("college", name))
}

fn print_course_line(course: &CourseRef<'_>) {
    output::info(&format!(
        "{:<10} {} ({} cr)",
        course.code_name(),
        course.proper_name(),
        course.credits()
    ));
}

#[instrument(skip(catalog))]
fn course(catalog: &Catalog, code: &str) -> CliResult<()> {
    let course = find_course(catalog, code)?;

    output::header(&course);
    output::field("credits", &course.credits());
    output::field("major", course.major().name());
    output::field("college", course.college().name());
    if course.prerequisites().is_empty() {
        output::field("prerequisites", "none");
    } else {
        output::info(&course.to_tree());
    }
    Ok(())
}

#[instrument(skip(catalog))]
fn courses(
    catalog: &Catalog,
    college: Option<&str>,
    major: Option<&str>,
    name: Option<&str>,
    credits: Option<f64>,
) -> CliResult<()> {
    let mut filter = CourseFilter::new();
    let mut major_filter = MajorFilter::new();
    if let Some(college) = college {
        let college = find_college(catalog, college)?;
        filter = filter.college(college);
        major_filter = major_filter.college(college);
    }
    if let Some(name) = name {
        filter = filter.proper_name(name);
    }
    if let Some(credits) = credits {
        filter = filter.credits(credits);
    }

    let found: Vec<CourseRef<'_>> = match major {
        // a major name can exist in several colleges
        Some(major) => {
            let majors = catalog.majors_with(&major_filter.name(major));
            if majors.is_empty() {
                return Err(CliError::not_found("major", major));
            }
            majors
                .into_iter()
                .flat_map(|m| catalog.courses_with(&filter.clone().major(m)))
                .collect()
        }
        None if college.is_none() && name.is_none() && credits.is_none() => {
            catalog.courses().collect()
        }
        None => catalog.courses_with(&filter),
    };

    for course in &found {
        print_course_line(course);
    }
    debug!("{} courses listed", found.len());
    Ok(())
}

#[instrument(skip(catalog))]
fn majors(catalog: &Catalog, college: Option<&str>, name: Option<&str>) -> CliResult<()> {
    let mut filter = MajorFilter::new();
    if let Some(college) = college {
        filter = filter.college(find_college(catalog, college)?);
    }
    if let Some(name) = name {
        filter = filter.name(name);
    }

    let found: Vec<MajorRef<'_>> = if college.is_none() && name.is_none() {
        catalog.majors().collect()
    } else {
        catalog.majors_with(&filter)
    };

    for major in found {
        output::info(&format!(
            "{} ({}, {} courses)",
            major.name(),
            major.college().name(),
            major.courses().count()
        ));
    }
    Ok(())
}

#[instrument(skip(catalog))]
fn colleges(catalog: &Catalog, tree: bool) -> CliResult<()> {
    if tree {
        output::info(&catalog.to_tree());
        return Ok(());
    }
    for college in catalog.colleges() {
        output::info(&format!("{} ({} majors)", college.name(), college.majors().count()));
    }
    Ok(())
}

#[instrument(skip(catalog))]
fn faculty(catalog: &Catalog, college: &str) -> CliResult<()> {
    let college = find_college(catalog, college)?;
    if college.faculty().is_empty() {
        output::detail(&format!("no faculty listed for {}", college.name()));
        return Ok(());
    }

    output::header(college.name());
    for member in college.faculty() {
        let titles = member.titles.iter().join("; ");
        let contact = [member.email.as_deref(), member.phone.as_deref()]
            .into_iter()
            .flatten()
            .join(", ");
        output::info(&format!("{} | {} | {}", member.name, titles, contact));
    }
    Ok(())
}

#[instrument(skip(catalog))]
fn prereqs(catalog: &Catalog, code: &str, distinct: bool) -> CliResult<()> {
    let course = find_course(catalog, code)?;
    let prerequisites = if distinct {
        course.distinct_prerequisites()
    } else {
        course.all_prerequisites()
    };

    output::header(&format!("strict prerequisites of {}", course.code_name()));
    if prerequisites.is_empty() {
        output::detail("none");
    }
    for (n, prerequisite) in prerequisites.iter().enumerate() {
        output::detail(&format!("{:>3}. {}", n + 1, prerequisite));
    }

    let alternatives = course.alternatives().count();
    if alternatives > 0 {
        output::detail(&format!(
            "({} alternative group(s) not counted; see `coursegraph course {}`)",
            alternatives,
            course.code_name()
        ));
    }
    Ok(())
}

#[instrument(skip(catalog))]
fn requires(catalog: &Catalog, prerequisite: &str, course: &str) -> CliResult<()> {
    let candidate = find_course(catalog, prerequisite)?;
    let course = find_course(catalog, course)?;

    if candidate.is_prerequisite_of(&course) {
        output::success(&format!(
            "{} is a strict prerequisite of {}",
            candidate.code_name(),
            course.code_name()
        ));
        Ok(())
    } else {
        Err(CliError::NotPrerequisite {
            prerequisite: candidate.code_name().to_string(),
            course: course.code_name().to_string(),
        })
    }
}

#[instrument(skip(catalog))]
fn org(catalog: &Catalog, name: &str) -> CliResult<()> {
    let organization = catalog
        .student_organization_with(&OrganizationFilter::new().name(name))
        .ok_or_else(|| CliError::not_found("student organization", name))?;

    output::header(&organization.name);
    output::detail(&organization.description);
    Ok(())
}

#[instrument]
fn parse(text: &str) -> CliResult<()> {
    let requirements = parse_prerequisites(text)?;
    let json = serde_json::to_string_pretty(&requirements).map_err(|e| InfraError::Serialize {
        what: "prerequisites".to_string(),
        message: e.to_string(),
    })?;
    output::info(&json);
    Ok(())
}

#[instrument(skip(cli))]
fn config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load(cli.config.as_deref())?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => output::failure("no config directory on this platform"),
        },
    }
    Ok(())
}
