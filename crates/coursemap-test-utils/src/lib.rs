//! Various helper functions for testing
//!
//! functions in this module should use results and not use any panics to avoid confusion in callers

use coursemap::catalog::{Course, Program};
use coursemap::course_map::{CourseMapId, UserId};
use coursemap::{Config, CourseMap, CourseMapStore, MemoryCatalog};

/// The two course example: `CMPN211` needs `CMPN201`, both 3 credits with no prerequisite hours.
pub fn two_course_catalog() -> coursemap::Result<MemoryCatalog> {
	let mut catalog = MemoryCatalog::new();
	catalog.add_course(Course::new("CMPN201", "Logic Design", 3, 0))?;
	catalog.add_course(Course::new("CMPN211", "Computer Architecture", 3, 0))?;
	catalog.add_prerequisite("CMPN211", "CMPN201")?;
	catalog.add_program(Program::new("CCE", "Computer and Communication Engineering"))?;
	catalog.add_requirement("CCE", "CMPN201", None)?;
	catalog.add_requirement("CCE", "CMPN211", None)?;
	Ok(catalog)
}

/// A larger program for exercising fan in, prerequisite hours and the credit cap.
///
/// ```text
/// MTHN101 ─┬─> MTHN102 ─┬─> MTHN201
///          │            └─> ELCN201 (also needs PHYN101)
/// PHYN101 ─┴──────────────> ELCN201
/// CMPN101 ───> CMPN102 ───> CMPN301 (60 prerequisite hours)
/// GENN101, GENN102 (4 credits, "humanities")   GENN201 (5 credits)
/// ```
/// `CCE` requires everything except `OUTN100`, which is a prerequisite of `CMPN102` from outside
/// the program and must not affect its outdegree.
pub fn cce_catalog() -> coursemap::Result<MemoryCatalog> {
	let mut catalog = MemoryCatalog::new();
	let courses = [
		Course::new("MTHN101", "Calculus I", 3, 0),
		Course::new("MTHN102", "Calculus II", 3, 0),
		Course::new("MTHN201", "Differential Equations", 3, 0),
		Course::new("PHYN101", "Physics I", 4, 0),
		Course::new("ELCN201", "Electronics", 4, 0),
		Course::new("CMPN101", "Programming", 3, 0),
		Course::new("CMPN102", "Data Structures", 3, 0),
		Course::new("CMPN301", "Compilers", 3, 60),
		Course::new("GENN101", "Technical Writing", 4, 0),
		Course::new("GENN102", "Ethics", 4, 0),
		Course::new("GENN201", "Management", 5, 0),
		Course::new("OUTN100", "Orientation", 1, 0),
	];
	for c in courses {
		catalog.add_course(c)?;
	}

	catalog.add_prerequisite("MTHN102", "MTHN101")?;
	catalog.add_prerequisite("MTHN201", "MTHN102")?;
	catalog.add_prerequisite("ELCN201", "MTHN102")?;
	catalog.add_prerequisite("ELCN201", "PHYN101")?;
	catalog.add_prerequisite("CMPN102", "CMPN101")?;
	catalog.add_prerequisite("CMPN102", "OUTN100")?;
	catalog.add_prerequisite("CMPN301", "CMPN102")?;

	catalog.add_program(Program::new("CCE", "Computer and Communication Engineering"))?;
	for code in ["MTHN101", "MTHN102", "MTHN201", "PHYN101", "ELCN201", "CMPN101", "CMPN102", "CMPN301", "GENN201"] {
		catalog.add_requirement("CCE", code, Some("core".to_string()))?;
	}
	for code in ["GENN101", "GENN102"] {
		catalog.add_requirement("CCE", code, Some("humanities".to_string()))?;
	}
	Ok(catalog)
}

pub fn student() -> UserId {
	UserId::from("student")
}

/// Config pointing at a fresh temporary data directory, the directory is removed when the guard drops.
pub fn temp_config() -> std::io::Result<(tempfile::TempDir, Config)> {
	let dir = tempfile::tempdir()?;
	let mut config = Config::default();
	config.set_data_dir(dir.path().to_path_buf());
	Ok((dir, config))
}

/// Creates a map for [`student()`] in `store`, with generated semesters starting in 2019.
pub fn seeded_map(store: &CourseMapStore, catalog: &MemoryCatalog, name: &str) -> coursemap::Result<(CourseMapId, CourseMap)> {
	let config = Config::default();
	let planner = coursemap::Planner::new(catalog, store, &config);
	let map = planner.create_course_map(&student(), name, "CCE", Some("2019"))?;
	Ok((map.id(), map))
}
