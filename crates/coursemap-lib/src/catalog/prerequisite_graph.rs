//! In-memory catalog stored as one directed graph.
//!
//! Programs point at the courses they require, courses point at their prerequisites.

use std::collections::HashMap;

use petgraph::prelude::*;

use super::*;
use crate::ValidationError;

#[derive(Debug, Clone)]
enum NodeData {
	Course(Course),
	Program(Program),
}

#[derive(Debug, Clone)]
enum EdgeData {
	/// Source program requires the target course, optionally as part of a group.
	Requires(Option<String>),
	/// Source course can only be taken after the target course.
	Prerequisite,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
	graph: StableDiGraph<NodeData, EdgeData>,
	courses: HashMap<String, NodeIndex>,
	programs: HashMap<String, NodeIndex>,
}

impl MemoryCatalog {
	pub fn new() -> Self {
		Self::default()
	}

	/// # Errors
	/// - [`Validation`](crate::Error::Validation) when the code is malformed or already used.
	pub fn add_course(&mut self, mut course: Course) -> crate::Result<()> {
		course.code = crate::validation::validate_course_code(&course.code)?;
		if self.courses.contains_key(&course.code) {
			return Err(ValidationError::AlreadyExists(format!("course {}", course.code)).into());
		}
		let code = course.code.clone();
		let i = self.graph.add_node(NodeData::Course(course));
		self.courses.insert(code, i);
		Ok(())
	}

	pub fn add_program(&mut self, mut program: Program) -> crate::Result<()> {
		program.code = crate::validation::validate_program_code(&program.code)?;
		if self.programs.contains_key(&program.code) {
			return Err(ValidationError::AlreadyExists(format!("program {}", program.code)).into());
		}
		let code = program.code.clone();
		let i = self.graph.add_node(NodeData::Program(program));
		self.programs.insert(code, i);
		Ok(())
	}

	/// Marks `course_code` as required by the program. Requiring it again only replaces the group.
	pub fn add_requirement(&mut self, program_code: &str, course_code: &str, group: Option<String>) -> crate::Result<()> {
		let program = self.program_index(program_code)?;
		let course = self.course_index(course_code)?;
		if let Some(e) = self.graph.find_edge(program, course) {
			self.graph[e] = EdgeData::Requires(group);
		} else {
			self.graph.add_edge(program, course, EdgeData::Requires(group));
		}
		Ok(())
	}

	/// Records that `prerequisite_code` must be taken before `course_code`.
	///
	/// # Errors
	/// - [`NotFound`](crate::Error::NotFound) when either course is missing.
	/// - [`Validation`](crate::Error::Validation) when the edge would close a cycle.
	pub fn add_prerequisite(&mut self, course_code: &str, prerequisite_code: &str) -> crate::Result<()> {
		let course = self.course_index(course_code)?;
		let prerequisite = self.course_index(prerequisite_code)?;

		if self.graph.find_edge(course, prerequisite).is_some() {
			return Ok(());
		}
		/* Only course nodes have incoming edges so any path found here runs through prerequisites alone */
		if course == prerequisite || petgraph::algo::has_path_connecting(&self.graph, prerequisite, course, None) {
			return Err(ValidationError::PrerequisiteCycle {
				course: course_code.to_string(),
				prerequisite: prerequisite_code.to_string(),
			}.into());
		}

		log::trace!("Adding prerequisite {} -> {}", course_code, prerequisite_code);
		self.graph.add_edge(course, prerequisite, EdgeData::Prerequisite);
		Ok(())
	}

	pub fn courses(&self) -> impl Iterator<Item = &Course> {
		self.graph.node_weights().filter_map(|n| match n {
			NodeData::Course(c) => Some(c),
			NodeData::Program(_) => None,
		})
	}

	pub fn programs(&self) -> impl Iterator<Item = &Program> {
		self.graph.node_weights().filter_map(|n| match n {
			NodeData::Program(p) => Some(p),
			NodeData::Course(_) => None,
		})
	}

	fn course_index(&self, code: &str) -> crate::Result<NodeIndex> {
		self.courses.get(code).copied().ok_or_else(|| crate::Error::NotFound(format!("course {}", code)))
	}

	fn program_index(&self, code: &str) -> crate::Result<NodeIndex> {
		self.programs.get(code).copied().ok_or_else(|| crate::Error::NotFound(format!("program {}", code)))
	}

	fn course_at(&self, i: NodeIndex) -> &Course {
		match &self.graph[i] {
			NodeData::Course(c) => c,
			/* Indices only ever come from the `courses` map or prerequisite/requires edge targets */
			NodeData::Program(p) => unreachable!("program {} indexed as a course", p.code),
		}
	}
}

impl Catalog for MemoryCatalog {
	fn get_program(&self, program_code: &str) -> crate::Result<Program> {
		match &self.graph[self.program_index(program_code)?] {
			NodeData::Program(p) => Ok(p.clone()),
			NodeData::Course(c) => unreachable!("course {} indexed as a program", c.code),
		}
	}

	fn get_program_requirements(&self, program_code: &str) -> crate::Result<Vec<Requirement>> {
		let program = self.program_index(program_code)?;
		let mut requirements: Vec<_> = self.graph.edges_directed(program, Outgoing)
			.filter_map(|e| match e.weight() {
				EdgeData::Requires(group) => Some(Requirement {
					course: self.course_at(e.target()).clone(),
					group: group.clone(),
				}),
				EdgeData::Prerequisite => None,
			})
			.collect();
		requirements.sort_by(|a, b| a.course.code.cmp(&b.course.code));
		Ok(requirements)
	}

	fn get_direct_prerequisites(&self, course_code: &str) -> crate::Result<Vec<String>> {
		let course = self.course_index(course_code)?;
		let mut prerequisites: Vec<_> = self.graph.edges_directed(course, Outgoing)
			.filter(|e| matches!(e.weight(), EdgeData::Prerequisite))
			.map(|e| self.course_at(e.target()).code.clone())
			.collect();
		prerequisites.sort();
		Ok(prerequisites)
	}

	fn get_course(&self, course_code: &str) -> crate::Result<Course> {
		Ok(self.course_at(self.course_index(course_code)?).clone())
	}
}
