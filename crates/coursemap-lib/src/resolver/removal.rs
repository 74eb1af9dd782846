use crate::config::RemovalPolicy;
use crate::course_map::*;
use crate::ValidationError;

/// Result of a successful [`remove_course()`].
#[derive(Debug, Clone)]
pub struct Removal {
	pub course_map: CourseMapSummary,
	/// The semester after the course was removed.
	pub semester: Semester,
}

/// Takes a course back out of the semester it was placed in.
///
/// A course can't be removed while any course depending on it is placed, the error lists those
/// courses so they can be removed first. Untaken dependents are locked again, and depending on
/// `policy` their last prerequisite order is recomputed or left as it was.
///
/// # Errors
/// - [`NotFound`](crate::Error::NotFound) when the semester isn't part of the map or the course isn't placed in it.
/// - [`Validation`](crate::Error::Validation) when placed dependents block the removal.
pub fn remove_course(map: &mut CourseMap, semester_id: SemesterId, course_code: &str, policy: RemovalPolicy) -> crate::Result<Removal> {
	let semester = map.semester(semester_id)?;
	if !semester.takes(course_code) {
		return Err(crate::Error::NotFound(format!("course {} in semester {} of course map {}", course_code, semester_id, map.id())));
	}

	let blocking: Vec<String> = map.dependents(course_code).iter()
		.filter(|d| map.containment(d).map_or(false, Containment::taken))
		.cloned()
		.collect();
	if !blocking.is_empty() {
		log::debug!("Rejecting removal of {} from course map {}, placed dependents: {:?}", course_code, map.id(), blocking);
		return Err(ValidationError::RemovalBlocked {
			course: course_code.to_string(),
			dependents: blocking,
		}.into());
	}

	map.semester_mut(semester_id)?.remove_course(course_code);
	if let Some(c) = map.containments.get_mut(course_code) {
		c.taken = false;
	}

	/* Worked out before touching anything since it needs to look at the whole map */
	let recomputed: Vec<(String, i32)> = match policy {
		RemovalPolicy::KeepStale => Vec::new(),
		RemovalPolicy::Recompute => map.dependents(course_code).iter()
			.map(|d| (d.clone(), latest_prerequisite_order(map, d)))
			.collect(),
	};

	if let Some(dependents) = map.dependents.get(course_code) {
		for d in dependents {
			let Some(c2) = map.containments.get_mut(d) else { continue };
			/* Every dependent is untaken here, the blocking check above guarantees it */
			c2.outdegree += 1;
			log::trace!("{} locked again with outdegree {}", d, c2.outdegree);
		}
	}
	for (d, order) in recomputed {
		if let Some(c2) = map.containments.get_mut(&d) {
			log::trace!("{} last prerequisite order {} -> {}", d, c2.last_prereq_semester_order, order);
			c2.last_prereq_semester_order = order;
		}
	}

	let semester = map.semester(semester_id)?.clone();
	log::info!("Removed {} from {} of course map {}", course_code, semester, map.id());

	Ok(Removal {
		course_map: map.summary(),
		semester,
	})
}

/// Highest order of a semester holding one of the course's direct prerequisites, `-1` if none do.
fn latest_prerequisite_order(map: &CourseMap, course_code: &str) -> i32 {
	map.direct_prerequisites(course_code).iter()
		.filter_map(|p| map.semester_of(p))
		.map(|s| s.order)
		.max()
		.unwrap_or(-1)
}
