use std::collections::{BTreeMap, HashSet};

use crate::catalog::Catalog;
use crate::course_map::*;
use crate::ValidationError::InvalidInput;

/// Builds a new [`CourseMap`] seeded from a program in the catalog.
pub struct CourseMapBuilder<'c, C: Catalog + ?Sized> {
	catalog: &'c C,
	owner: Option<UserId>,
	name: Option<String>,
	program_code: Option<String>,
	starting_year: Option<u16>,
	generated_years: u32,
}

impl<'c, C: Catalog + ?Sized> CourseMapBuilder<'c, C> {
	pub fn new(catalog: &'c C) -> Self {
		Self {
			catalog,
			owner: None,
			name: None,
			program_code: None,
			starting_year: None,
			generated_years: 5,
		}
	}

	pub fn owner(mut self, owner: UserId) -> Self {
		self.owner = Some(owner);
		self
	}

	pub fn name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	pub fn program(mut self, program_code: impl Into<String>) -> Self {
		self.program_code = Some(program_code.into());
		self
	}

	/// When set, semesters for [`generated_years()`](Self::generated_years) academic years are created,
	/// the first one being the fall of `year`.
	pub fn starting_year(mut self, year: Option<u16>) -> Self {
		self.starting_year = year;
		self
	}

	pub fn generated_years(mut self, years: u32) -> Self {
		self.generated_years = years;
		self
	}

	/// # Errors
	/// - [`NotFound`](crate::Error::NotFound) when the program doesn't exist.
	/// - [`Validation`](crate::Error::Validation) when the owner, name or program are missing, or
	///   the generated semesters don't fit in a `u16` year.
	pub fn build(self, id: CourseMapId) -> crate::Result<CourseMap> {
		let owner = self.owner.ok_or_else(|| InvalidInput("course map owner missing".to_string()))?;
		let name = self.name.ok_or_else(|| InvalidInput("course map name missing".to_string()))?;
		let program_code = self.program_code.ok_or_else(|| InvalidInput("program code missing".to_string()))?;

		let program = self.catalog.get_program(&program_code)?;
		let requirements = self.catalog.get_program_requirements(&program.code)?;
		let required: HashSet<&str> = requirements.iter().map(|r| r.course.code.as_str()).collect();

		let mut map = CourseMap::new(id, owner, name, program);

		let mut dependents = BTreeMap::<String, Vec<String>>::new();
		for r in &requirements {
			/* Prerequisites outside the program can never be taken in this map so they don't count */
			let prerequisites: Vec<String> = self.catalog.get_direct_prerequisites(&r.course.code)?
				.into_iter()
				.filter(|p| required.contains(p.as_str()))
				.collect();
			for p in &prerequisites {
				dependents.entry(p.clone()).or_default().push(r.course.code.clone());
			}

			log::trace!("Seeding {} with outdegree {}", r.course.code, prerequisites.len());
			map.containments.insert(
				r.course.code.clone(),
				Containment::new(r.course.clone(), prerequisites.len() as u32, r.group.clone()),
			);
			map.prerequisites.insert(r.course.code.clone(), prerequisites);
		}
		for d in dependents.values_mut() {
			d.sort();
		}
		map.dependents = dependents;

		if let Some(year) = self.starting_year {
			let years = u16::try_from(self.generated_years)
				.map_err(|_| InvalidInput(format!("cannot generate {} years of semesters", self.generated_years)))?;
			/* The last spring falls in `year + years` */
			if year.checked_add(years).is_none() {
				return Err(InvalidInput(format!("generated semesters run past the year {}", u16::MAX)).into());
			}
			for fall in year..year + years {
				map.add_semester(Season::Fall, fall)?;
				map.add_semester(Season::Spring, fall + 1)?;
				map.add_semester(Season::Summer, fall + 1)?;
			}
		}

		log::info!("Seeded course map {} for program {} with {} courses and {} semesters",
			map.id(), map.program().code, map.containments.len(), map.semesters().len());
		Ok(map)
	}
}
