//! The per-user plan and the resolver state stored alongside it.

use std::collections::BTreeMap;

use serde::{Serialize, Deserialize};

use crate::catalog::{Course, Program};
use crate::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CourseMapId(pub u64);

impl std::fmt::Display for CourseMapId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// Only unique within its course map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SemesterId(pub u64);

impl std::fmt::Display for SemesterId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// Identity handed over by whatever authenticated the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub String);

impl From<&str> for UserId {
	fn from(s: &str) -> Self {
		UserId(s.to_string())
	}
}

impl std::fmt::Display for UserId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
	Fall,
	Spring,
	Summer,
}

impl Season {
	/// Position inside a calendar year.
	fn calendar_rank(self) -> u8 {
		match self {
			Season::Spring => 0,
			Season::Summer => 1,
			Season::Fall => 2,
		}
	}
}

impl std::fmt::Display for Season {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let s = match self {
			Season::Fall => "Fall",
			Season::Spring => "Spring",
			Season::Summer => "Summer",
		};
		write!(f, "{}", s)
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Semester {
	pub id: SemesterId,
	pub season: Season,
	pub year: u16,
	/// Strictly increasing with calendar position, the only field ordering rules look at.
	pub order: i32,
	/// Courses taken in this semester, in the order they were placed.
	courses: Vec<String>,
}

impl Semester {
	pub(crate) fn new(id: SemesterId, season: Season, year: u16, order: i32) -> Self {
		Self { id, season, year, order, courses: Vec::new() }
	}

	pub fn courses(&self) -> &[String] {
		&self.courses
	}

	pub fn takes(&self, course_code: &str) -> bool {
		self.courses.iter().any(|c| c == course_code)
	}

	pub(crate) fn add_course(&mut self, course_code: String) {
		self.courses.push(course_code);
	}

	pub(crate) fn remove_course(&mut self, course_code: &str) -> bool {
		let before = self.courses.len();
		self.courses.retain(|c| c != course_code);
		before != self.courses.len()
	}

	fn calendar_position(&self) -> (u16, u8) {
		(self.year, self.season.calendar_rank())
	}
}

impl std::fmt::Display for Semester {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{} {}", self.season, self.year)
	}
}

/// Resolver state of one required course inside one course map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Containment {
	pub(crate) course: Course,
	pub(crate) taken: bool,
	/// Direct prerequisites in the requirement set that are not taken yet.
	pub(crate) outdegree: u32,
	/// Highest semester order any direct prerequisite was placed in, `-1` when none were.
	pub(crate) last_prereq_semester_order: i32,
	pub(crate) group: Option<String>,
}

impl Containment {
	pub(crate) fn new(course: Course, outdegree: u32, group: Option<String>) -> Self {
		Self {
			course,
			taken: false,
			outdegree,
			last_prereq_semester_order: -1,
			group,
		}
	}

	pub fn course(&self) -> &Course {
		&self.course
	}

	pub fn taken(&self) -> bool {
		self.taken
	}

	pub fn outdegree(&self) -> u32 {
		self.outdegree
	}

	pub fn last_prereq_semester_order(&self) -> i32 {
		self.last_prereq_semester_order
	}

	pub fn group(&self) -> Option<&str> {
		self.group.as_deref()
	}

	/// Direct prerequisite ordering test against a semester of the given order.
	pub fn is_available_at(&self, order: i32) -> bool {
		!self.taken && self.outdegree == 0 && self.last_prereq_semester_order < order
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseMapSummary {
	pub id: CourseMapId,
	pub name: String,
	pub program: Program,
}

/// A user's plan for one program.
///
/// Everything the resolver needs is snapshotted from the catalog when the map is created, so
/// later catalog edits never change an existing map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseMap {
	id: CourseMapId,
	owner: UserId,
	name: String,
	program: Program,
	/// Kept sorted by `order`.
	semesters: Vec<Semester>,
	next_semester_id: u64,
	pub(crate) containments: BTreeMap<String, Containment>,
	/// course -> direct prerequisites, restricted to the requirement set.
	pub(crate) prerequisites: BTreeMap<String, Vec<String>>,
	/// course -> courses listing it as a direct prerequisite, restricted to the requirement set.
	pub(crate) dependents: BTreeMap<String, Vec<String>>,
}

impl CourseMap {
	pub(crate) fn new(id: CourseMapId, owner: UserId, name: String, program: Program) -> Self {
		Self {
			id,
			owner,
			name,
			program,
			semesters: Vec::new(),
			next_semester_id: 1,
			containments: Default::default(),
			prerequisites: Default::default(),
			dependents: Default::default(),
		}
	}

	/* Fields */

	pub fn id(&self) -> CourseMapId {
		self.id
	}

	pub fn owner(&self) -> &UserId {
		&self.owner
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn program(&self) -> &Program {
		&self.program
	}

	pub fn summary(&self) -> CourseMapSummary {
		CourseMapSummary {
			id: self.id,
			name: self.name.clone(),
			program: self.program.clone(),
		}
	}

	/* Semesters */

	pub fn semesters(&self) -> &[Semester] {
		&self.semesters
	}

	/// # Errors
	/// - [`NotFound`](crate::Error::NotFound) when the semester is not part of this map.
	pub fn semester(&self, id: SemesterId) -> crate::Result<&Semester> {
		self.semesters.iter()
			.find(|s| s.id == id)
			.ok_or_else(|| crate::Error::NotFound(format!("semester {} in course map {}", id, self.id)))
	}

	pub(crate) fn semester_mut(&mut self, id: SemesterId) -> crate::Result<&mut Semester> {
		let map_id = self.id;
		self.semesters.iter_mut()
			.find(|s| s.id == id)
			.ok_or_else(|| crate::Error::NotFound(format!("semester {} in course map {}", id, map_id)))
	}

	/// Appends a semester after the current last one.
	///
	/// # Errors
	/// - [`Validation`](crate::Error::Validation) when the semester isn't strictly later in the calendar than the last one.
	pub fn add_semester(&mut self, season: Season, year: u16) -> crate::Result<&Semester> {
		let order = match self.semesters.last() {
			Some(last) => {
				if (year, season.calendar_rank()) <= last.calendar_position() {
					return Err(ValidationError::SemesterOutOfOrder.into());
				}
				last.order + 1
			},
			None => 1,
		};

		let id = SemesterId(self.next_semester_id);
		self.next_semester_id += 1;
		log::debug!("Adding semester {} {} with order {} to course map {}", season, year, order, self.id);
		self.semesters.push(Semester::new(id, season, year, order));
		Ok(&self.semesters[self.semesters.len() - 1])
	}

	/* Containments */

	pub fn containment(&self, course_code: &str) -> Option<&Containment> {
		self.containments.get(course_code)
	}

	/// All containment records ordered by course code.
	pub fn containments(&self) -> impl Iterator<Item = &Containment> {
		self.containments.values()
	}

	pub fn direct_prerequisites(&self, course_code: &str) -> &[String] {
		self.prerequisites.get(course_code).map(Vec::as_slice).unwrap_or(&[])
	}

	pub fn dependents(&self, course_code: &str) -> &[String] {
		self.dependents.get(course_code).map(Vec::as_slice).unwrap_or(&[])
	}

	/// The semester a course was placed in, if any.
	pub fn semester_of(&self, course_code: &str) -> Option<&Semester> {
		self.semesters.iter().find(|s| s.takes(course_code))
	}

	/* Credits */

	pub fn credits_in(&self, semester: &Semester) -> u32 {
		semester.courses.iter()
			.filter_map(|c| self.containments.get(c))
			.fold(0u32, |t, c| t.saturating_add(c.course.credits))
	}

	/// Credits earned in semesters strictly before `order`.
	pub fn credits_before(&self, order: i32) -> u32 {
		self.semesters.iter()
			.filter(|s| s.order < order)
			.fold(0u32, |t, s| t.saturating_add(self.credits_in(s)))
	}

	/// Lists every place where containment state disagrees with the placed courses.
	///
	/// `last_prereq_semester_order` is not checked since it may legitimately be stale.
	pub fn check_invariants(&self) -> Vec<String> {
		let mut problems = Vec::new();
		for (code, c) in &self.containments {
			let placements = self.semesters.iter().filter(|s| s.takes(code)).count();
			if c.taken != (placements == 1) || placements > 1 {
				problems.push(format!("{} is marked taken={} but placed in {} semesters", code, c.taken, placements));
			}
			if !c.taken {
				let expected = self.direct_prerequisites(code).iter()
					.filter(|p| self.containments.get(*p).map_or(false, |p| !p.taken))
					.count() as u32;
				if expected != c.outdegree {
					problems.push(format!("{} has outdegree {} but {} prerequisites are untaken", code, c.outdegree, expected));
				}
			}
		}
		problems
	}
}
