use crate::catalog::Course;
use crate::course_map::*;

/// Courses whose direct prerequisites were all placed strictly before the semester.
///
/// This ignores prerequisite hours and the credit cap, see [`available_courses()`] for those.
pub fn directly_available(map: &CourseMap, semester_id: SemesterId) -> crate::Result<Vec<&Containment>> {
	let order = map.semester(semester_id)?.order;
	Ok(map.containments().filter(|c| c.is_available_at(order)).collect())
}

/// Courses that could be placed into the semester on their own right now, ordered by code.
///
/// On top of [`directly_available()`] a course must have its prerequisite hours covered by the
/// credits of earlier semesters and must fit under `credit_cap` next to what the semester
/// already holds.
pub fn available_courses(map: &CourseMap, semester_id: SemesterId, credit_cap: u32) -> crate::Result<Vec<Course>> {
	let semester = map.semester(semester_id)?;
	let earned = map.credits_before(semester.order);
	let in_semester = map.credits_in(semester);

	Ok(directly_available(map, semester_id)?
		.into_iter()
		.map(Containment::course)
		.filter(|c| earned >= c.prerequisite_hours)
		.filter(|c| in_semester.checked_add(c.credits).map_or(false, |t| t <= credit_cap))
		.cloned()
		.collect())
}
