//! The operations a request layer calls, one per user action.
//!
//! Inputs arrive as the caller typed them and are validated here. Every call runs as a single
//! read or a single transaction on one course map.

use crate::catalog::{Catalog, Course};
use crate::course_map::*;
use crate::resolver::{self, CourseMapBuilder, Placement, Removal};
use crate::{Config, CourseMapStore};

pub struct Planner<'a, C: Catalog + ?Sized> {
	catalog: &'a C,
	store: &'a CourseMapStore,
	config: &'a Config,
}

impl<'a, C: Catalog + ?Sized> Planner<'a, C> {
	pub fn new(catalog: &'a C, store: &'a CourseMapStore, config: &'a Config) -> Self {
		Self { catalog, store, config }
	}

	/// Creates a course map for `program_code`, with generated semesters when `starting_year` is given.
	///
	/// # Errors
	/// - [`NotFound`](crate::Error::NotFound) when the program doesn't exist.
	/// - [`Validation`](crate::Error::Validation) for malformed input or a name the user already used.
	pub fn create_course_map(&self, user: &UserId, name: &str, program_code: &str, starting_year: Option<&str>) -> crate::Result<CourseMap> {
		let name = crate::validation::validate_course_map_name(name)?;
		let program_code = crate::validation::validate_program_code(program_code)?;
		let starting_year = starting_year.map(crate::validation::validate_year).transpose()?;

		self.store.create(user, &name, |id| {
			CourseMapBuilder::new(self.catalog)
				.owner(user.clone())
				.name(name.as_str())
				.program(program_code.as_str())
				.starting_year(starting_year)
				.generated_years(self.config.generated_years())
				.build(id)
		})
	}

	pub fn list_course_maps(&self, user: &UserId) -> crate::Result<Vec<CourseMapSummary>> {
		self.store.list(user)
	}

	pub fn course_map(&self, user: &UserId, course_map_id: CourseMapId) -> crate::Result<CourseMap> {
		self.store.read(user, course_map_id, |map| Ok(map.clone()))
	}

	pub fn add_semester(&self, user: &UserId, course_map_id: CourseMapId, season: &str, year: &str) -> crate::Result<Semester> {
		let season = crate::validation::validate_semester_season(season)?;
		let year = crate::validation::validate_year(year)?;
		self.store.write(user, course_map_id, |map| map.add_semester(season, year).cloned())
	}

	/// Semesters ordered by `order`.
	pub fn list_semesters(&self, user: &UserId, course_map_id: CourseMapId) -> crate::Result<Vec<Semester>> {
		self.store.read(user, course_map_id, |map| Ok(map.semesters().to_vec()))
	}

	pub fn courses_in_semester(&self, user: &UserId, course_map_id: CourseMapId, semester_id: SemesterId) -> crate::Result<Vec<Course>> {
		self.store.read(user, course_map_id, |map| {
			Ok(map.semester(semester_id)?
				.courses()
				.iter()
				.filter_map(|c| map.containment(c))
				.map(|c| c.course().clone())
				.collect())
		})
	}

	/// Courses that can be added to the semester right now.
	pub fn available_courses(&self, user: &UserId, course_map_id: CourseMapId, semester_id: SemesterId) -> crate::Result<Vec<Course>> {
		let cap = self.config.semester_credit_cap();
		self.store.read(user, course_map_id, |map| resolver::available_courses(map, semester_id, cap))
	}

	pub fn place_course(&self, user: &UserId, course_map_id: CourseMapId, semester_id: SemesterId, course_code: &str) -> crate::Result<Semester> {
		Ok(self.place_courses(user, course_map_id, semester_id, &[course_code])?.semester)
	}

	/// Places all the courses or none of them.
	pub fn place_courses<S: AsRef<str>>(&self, user: &UserId, course_map_id: CourseMapId, semester_id: SemesterId, course_codes: &[S]) -> crate::Result<Placement> {
		let codes = course_codes.iter()
			.map(|c| crate::validation::validate_course_code(c.as_ref()))
			.collect::<crate::Result<Vec<_>>>()?;
		let cap = self.config.semester_credit_cap();
		self.store.write(user, course_map_id, |map| resolver::place_courses(map, semester_id, &codes, cap))
	}

	pub fn remove_course(&self, user: &UserId, course_map_id: CourseMapId, semester_id: SemesterId, course_code: &str) -> crate::Result<Removal> {
		let code = crate::validation::validate_course_code(course_code)?;
		let policy = self.config.removal_policy();
		self.store.write(user, course_map_id, |map| resolver::remove_course(map, semester_id, &code, policy))
	}
}
