//! Input shape checks applied before a request reaches the resolver.
//!
//! Every function normalises its input (trimming, upper-casing) and returns the normalised value.

use std::sync::OnceLock;

use regex::Regex;

use crate::course_map::Season;
use crate::ValidationError::InvalidInput;

fn course_code_regex() -> &'static Regex {
	static RE: OnceLock<Regex> = OnceLock::new();
	RE.get_or_init(|| Regex::new(r"^[A-Z]{2,4}N[0-9]{3}$").expect("course code pattern is valid"))
}

fn program_code_regex() -> &'static Regex {
	static RE: OnceLock<Regex> = OnceLock::new();
	RE.get_or_init(|| Regex::new(r"^[A-Z]{2,4}$").expect("program code pattern is valid"))
}

fn year_regex() -> &'static Regex {
	static RE: OnceLock<Regex> = OnceLock::new();
	RE.get_or_init(|| Regex::new(r"^[0-9]{4}$").expect("year pattern is valid"))
}

/// Course codes look like `CMPN201`: two to four letters, `N`, three digits.
pub fn validate_course_code(code: &str) -> crate::Result<String> {
	let code = code.trim().to_uppercase();
	if !course_code_regex().is_match(&code) {
		return Err(InvalidInput(format!("invalid course code {}, must be in the format of CMPN123 or PEN123", code)).into());
	}
	Ok(code)
}

pub fn validate_program_code(code: &str) -> crate::Result<String> {
	let code = code.trim().to_uppercase();
	if !program_code_regex().is_match(&code) {
		return Err(InvalidInput(format!("invalid program code {}, must be in the format of CCEC, EEE or UND", code)).into());
	}
	Ok(code)
}

pub fn validate_year(year: &str) -> crate::Result<u16> {
	let year = year.trim();
	if !year_regex().is_match(year) {
		return Err(InvalidInput(format!("invalid year {}, must be in the format of 2020", year)).into());
	}
	year.parse::<u16>().map_err(|e| InvalidInput(format!("invalid year {}: {}", year, e)).into())
}

pub fn validate_semester_season(season: &str) -> crate::Result<Season> {
	match season.trim().to_uppercase().as_str() {
		"F" | "FALL" => Ok(Season::Fall),
		"S" | "SPRING" => Ok(Season::Spring),
		"SU" | "SUMMER" => Ok(Season::Summer),
		other => Err(InvalidInput(format!("invalid semester season {}, must be either F or S or SU", other)).into()),
	}
}

pub fn validate_course_map_name(name: &str) -> crate::Result<String> {
	let name = name.trim();
	if name.is_empty() {
		return Err(InvalidInput("course map name must not be empty".to_string()).into());
	}
	Ok(name.to_string())
}
