//! Building a [`MemoryCatalog`] from a JSON document.

use serde::Deserialize;

use super::*;
use crate::Error::Parse;

#[derive(Debug, Deserialize)]
struct CatalogFile {
	courses: Vec<CourseEntry>,
	#[serde(default)]
	programs: Vec<ProgramEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CourseEntry {
	code: String,
	name: String,
	credits: u32,
	#[serde(default)]
	prerequisite_hours: u32,
	#[serde(default)]
	prerequisites: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ProgramEntry {
	code: String,
	name: String,
	#[serde(default)]
	requirements: Vec<RequirementEntry>,
}

#[derive(Debug, Deserialize)]
struct RequirementEntry {
	course: String,
	#[serde(default)]
	group: Option<String>,
}

impl MemoryCatalog {
	/// Builds a catalog from its JSON form.
	/// # Parameters
	/// - `json` - The catalog document, see `catalog.schema.json`.
	/// - `do_validation` - Checks the document against the schema first, giving clearer errors for hand written files.
	/// # Errors
	/// - [`Parse`](crate::Error::Parse) when the document doesn't match the schema.
	/// - [`SerdeJSON`](crate::Error::SerdeJSON) when the document doesn't have the expected shape.
	/// - Any error from [`add_course()`](MemoryCatalog::add_course()) and friends, e.g. a prerequisite cycle.
	pub fn from_json(json: &serde_json::Value, do_validation: bool) -> crate::Result<Self> {
		if do_validation {
			let schema: serde_json::Value = serde_json::from_str(include_str!("catalog.schema.json"))?;
			let compiled = jsonschema::JSONSchema::compile(&schema)
				.map_err(|e| Parse(format!("catalog schema is invalid: {}", e)))?;
			let reasons: Vec<String> = match compiled.validate(json) {
				Ok(()) => Vec::new(),
				Err(errors) => errors.map(|e| e.to_string()).collect(),
			};
			if !reasons.is_empty() {
				return Err(Parse(format!("catalog does not match schema: {}", reasons.join("; "))));
			}
		}

		let file: CatalogFile = serde_json::from_value(json.clone())?;
		let mut catalog = MemoryCatalog::new();

		/* All courses have to exist before any edge can point at them */
		for c in &file.courses {
			catalog.add_course(Course::new(c.code.as_str(), c.name.as_str(), c.credits, c.prerequisite_hours))?;
		}
		for c in &file.courses {
			let code = crate::validation::validate_course_code(&c.code)?;
			for p in &c.prerequisites {
				catalog.add_prerequisite(&code, &crate::validation::validate_course_code(p)?)?;
			}
		}
		for p in &file.programs {
			catalog.add_program(Program::new(p.code.as_str(), p.name.as_str()))?;
			let code = crate::validation::validate_program_code(&p.code)?;
			for r in &p.requirements {
				catalog.add_requirement(&code, &crate::validation::validate_course_code(&r.course)?, r.group.clone())?;
			}
		}

		log::debug!("Imported catalog with {} courses and {} programs", file.courses.len(), file.programs.len());
		Ok(catalog)
	}

	pub fn load_from_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
		let file = std::fs::File::open(path)?;
		let json: serde_json::Value = serde_json::from_reader(std::io::BufReader::new(file))?;
		Self::from_json(&json, true)
	}
}
