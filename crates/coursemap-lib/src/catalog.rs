//! The read-only course catalog consumed by the resolver.
//!
//! The resolver only ever talks to a [`Catalog`], at map creation time. [`MemoryCatalog`] is the
//! bundled implementation, it keeps programs, courses and prerequisites in a single graph.

use serde::{Serialize, Deserialize};

mod prerequisite_graph;
pub use prerequisite_graph::MemoryCatalog;

mod import;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
	pub code: String,
	pub name: String,
	pub credits: u32,
	/// Credits that must be earned in earlier semesters before this course can be taken.
	pub prerequisite_hours: u32,
}

impl Course {
	pub fn new(code: impl Into<String>, name: impl Into<String>, credits: u32, prerequisite_hours: u32) -> Self {
		Self {
			code: code.into(),
			name: name.into(),
			credits,
			prerequisite_hours,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
	pub code: String,
	pub name: String,
}

impl Program {
	pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
		Self { code: code.into(), name: name.into() }
	}
}

/// A course required by a program, tagged with the requirement group it counts towards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
	pub course: Course,
	pub group: Option<String>,
}

/// Source of programs, courses and the prerequisite relation.
///
/// Implementations must keep the prerequisite relation acyclic.
pub trait Catalog {
	/// # Errors
	/// - [`NotFound`](crate::Error::NotFound) when no program has this code.
	fn get_program(&self, program_code: &str) -> crate::Result<Program>;

	/// Every course the program requires, ordered by course code.
	fn get_program_requirements(&self, program_code: &str) -> crate::Result<Vec<Requirement>>;

	/// Codes of the courses that must be taken before `course_code`, ordered by code.
	fn get_direct_prerequisites(&self, course_code: &str) -> crate::Result<Vec<String>>;

	fn get_course(&self, course_code: &str) -> crate::Result<Course>;
}
