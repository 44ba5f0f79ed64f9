//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Query colleges, majors, courses and prerequisite chains of an academic catalog
#[derive(Parser, Debug)]
#[command(name = "coursegraph")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log verbosity: -d info, -dd debug, -ddd trace
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Catalog dataset (default: bundled sample catalog)
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub dataset: Option<PathBuf>,

    /// Config file (default: $XDG_CONFIG_HOME/coursegraph/coursegraph.toml)
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show a course and its prerequisite expression
    Course {
        /// Course code, e.g. CS-171
        code: String,
    },

    /// List courses matching all given attributes (all courses without filters)
    Courses {
        /// College name
        #[arg(long)]
        college: Option<String>,
        /// Major name
        #[arg(long)]
        major: Option<String>,
        /// Proper name, e.g. "Computer Programming I"
        #[arg(long)]
        name: Option<String>,
        /// Credit count
        #[arg(long)]
        credits: Option<f64>,
    },

    /// List majors matching all given attributes (all majors without filters)
    Majors {
        /// College name
        #[arg(long)]
        college: Option<String>,
        /// Major name
        #[arg(long)]
        name: Option<String>,
    },

    /// List colleges
    Colleges {
        /// Show colleges with their majors as a tree
        #[arg(long)]
        tree: bool,
    },

    /// List a college's faculty
    Faculty {
        /// College name
        college: String,
    },

    /// Transitive strict prerequisites of a course, breadth first
    Prereqs {
        /// Course code
        code: String,
        /// List each course once
        #[arg(long)]
        distinct: bool,
    },

    /// Check whether PREREQUISITE is a strict prerequisite of COURSE
    Requires {
        /// Candidate prerequisite code
        prerequisite: String,
        /// Course code
        course: String,
    },

    /// Show a student organization
    Org {
        /// Organization name
        name: String,
    },

    /// Parse catalog prerequisite text into dataset JSON
    Parse {
        /// Text such as "CS 171 [Min Grade: C-] and (MATH 101 or MATH 102)"
        text: String,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Print a template config file
    Template,
    /// Print the global config file location
    Path,
}
