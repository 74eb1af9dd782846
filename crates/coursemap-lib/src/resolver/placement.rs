use std::collections::HashSet;

use crate::catalog::Course;
use crate::course_map::*;
use crate::ValidationError;

/// Result of a successful [`place_courses()`].
#[derive(Debug, Clone)]
pub struct Placement {
	/// The semester after the courses were added.
	pub semester: Semester,
	/// The courses just added, in request order.
	pub added: Vec<Course>,
}

/// Places a batch of courses into a semester.
///
/// The whole batch is checked before anything changes: every course must belong to the map,
/// be available in the semester, have its prerequisite hours covered by earlier semesters, and
/// the semester must stay within `credit_cap` with all of them added together.
///
/// # Errors
/// - [`NotFound`](crate::Error::NotFound) when the semester isn't part of the map.
/// - [`Validation`](crate::Error::Validation) for the first rule the batch breaks.
pub fn place_courses<S: AsRef<str>>(map: &mut CourseMap, semester_id: SemesterId, course_codes: &[S], credit_cap: u32) -> crate::Result<Placement> {
	let semester = map.semester(semester_id)?;
	let order = semester.order;

	if course_codes.is_empty() {
		return Err(ValidationError::InvalidInput("no courses to place".to_string()).into());
	}

	/* 1. Membership */
	let mut seen = HashSet::<&str>::new();
	for code in course_codes.iter().map(AsRef::as_ref) {
		if map.containment(code).is_none() {
			log::debug!("Rejecting placement into course map {}, {} is unknown", map.id(), code);
			return Err(ValidationError::UnknownCourse(code.to_string()).into());
		}
		if !seen.insert(code) {
			return Err(ValidationError::DuplicateCourse(code.to_string()).into());
		}
	}
	let requested: Vec<&Containment> = course_codes.iter()
		.filter_map(|c| map.containment(c.as_ref()))
		.collect();

	/* 2. Direct prerequisite ordering */
	for c in &requested {
		if c.taken() {
			log::debug!("Rejecting placement into course map {}, {} is already taken", map.id(), c.course().code);
			return Err(ValidationError::AlreadyTaken(c.course().code.clone()).into());
		}
		if !c.is_available_at(order) {
			log::debug!("Rejecting placement of {} at order {}: outdegree {}, last prerequisite order {}",
				c.course().code, order, c.outdegree(), c.last_prereq_semester_order());
			return Err(ValidationError::PrerequisitesNotSatisfied(c.course().code.clone()).into());
		}
	}

	/* 3. Earned credits from earlier semesters */
	let earned = map.credits_before(order);
	for c in &requested {
		if earned < c.course().prerequisite_hours {
			log::debug!("Rejecting placement of {}, {} credits earned of {}", c.course().code, earned, c.course().prerequisite_hours);
			return Err(ValidationError::InsufficientCredit {
				course: c.course().code.clone(),
				required: c.course().prerequisite_hours,
				earned,
			}.into());
		}
	}

	/* 4. Semester credit cap, for the batch as a whole */
	let over = match requested.iter().try_fold(map.credits_in(semester), |t, c| t.checked_add(c.course().credits)) {
		Some(t) if t <= credit_cap => None,
		Some(t) => Some(t),
		/* Past u32::MAX is over any cap */
		None => Some(u32::MAX),
	};
	if let Some(total) = over {
		log::debug!("Rejecting placement into semester {} of course map {}, {} credits over cap {}", semester_id, map.id(), total, credit_cap);
		return Err(ValidationError::CreditCapExceeded { total, cap: credit_cap }.into());
	}

	let added: Vec<Course> = requested.iter().map(|c| c.course().clone()).collect();

	/* Nothing below can fail */
	for course in &added {
		if let Some(dependents) = map.dependents.get(&course.code) {
			for d in dependents {
				let Some(c2) = map.containments.get_mut(d) else { continue };
				if c2.taken {
					continue;
				}
				if c2.outdegree == 0 {
					log::warn!("Dependent {} of {} already had outdegree 0", d, course.code);
				}
				c2.outdegree = c2.outdegree.saturating_sub(1);
				c2.last_prereq_semester_order = c2.last_prereq_semester_order.max(order);
				log::trace!("{} now has outdegree {} and last prerequisite order {}", d, c2.outdegree, c2.last_prereq_semester_order);
			}
		}
		if let Some(c) = map.containments.get_mut(&course.code) {
			c.taken = true;
		}
	}
	let semester = map.semester_mut(semester_id)?;
	for course in &added {
		semester.add_course(course.code.clone());
	}
	let semester = semester.clone();

	log::info!("Placed {} into {} of course map {}",
		added.iter().map(|c| c.code.as_str()).collect::<Vec<_>>().join(", "), semester, map.id());

	Ok(Placement { semester, added })
}
