use coursemap::catalog::{Course, Program};
use coursemap::course_map::{Containment, CourseMap, Semester, SemesterId};
use coursemap::{Config, CourseMapStore, Error, MemoryCatalog, Planner, ValidationError};
use coursemap_test_utils::*;

fn init() {
	let _ = env_logger::builder().is_test(true).try_init();
}

fn snapshot(map: &CourseMap) -> (Vec<Containment>, Vec<Semester>) {
	(map.containments().cloned().collect(), map.semesters().to_vec())
}

#[test]
fn prerequisite_must_be_in_an_earlier_semester() {
	init();
	let catalog = two_course_catalog().unwrap();
	let store = CourseMapStore::new();
	let config = Config::default();
	let planner = Planner::new(&catalog, &store, &config);
	let user = student();
	let map = planner.create_course_map(&user, "Plan A", "CCE", Some("2019")).unwrap();
	let id = map.id();

	planner.place_course(&user, id, SemesterId(1), "CMPN201").unwrap();
	let map = planner.course_map(&user, id).unwrap();
	assert!(map.containment("CMPN201").unwrap().taken());
	let dependent = map.containment("CMPN211").unwrap();
	assert_eq!(dependent.outdegree(), 0);
	assert_eq!(dependent.last_prereq_semester_order(), 1);

	let err = planner.place_course(&user, id, SemesterId(1), "CMPN211").unwrap_err();
	assert!(matches!(err, Error::Validation(ValidationError::PrerequisitesNotSatisfied(ref c)) if c == "CMPN211"));

	let semester = planner.place_course(&user, id, SemesterId(2), "cmpn211").unwrap();
	assert_eq!(semester.order, 2);
	assert_eq!(semester.courses(), ["CMPN211".to_string()]);
	assert!(planner.course_map(&user, id).unwrap().check_invariants().is_empty());
}

#[test]
fn dependents_never_land_at_or_before_their_prerequisite() {
	init();
	let catalog = cce_catalog().unwrap();
	let store = CourseMapStore::new();
	let config = Config::default();
	let planner = Planner::new(&catalog, &store, &config);
	let (id, _) = seeded_map(&store, &catalog, "Plan A").unwrap();
	let user = student();

	planner.place_course(&user, id, SemesterId(3), "MTHN101").unwrap();
	for s in 1..=3 {
		let err = planner.place_course(&user, id, SemesterId(s), "MTHN102").unwrap_err();
		assert!(matches!(err, Error::Validation(ValidationError::PrerequisitesNotSatisfied(_))), "semester {}", s);
	}
	planner.place_course(&user, id, SemesterId(4), "MTHN102").unwrap();

	let map = planner.course_map(&user, id).unwrap();
	assert_eq!(map.containment("MTHN201").unwrap().last_prereq_semester_order(), 4);
	assert_eq!(map.containment("ELCN201").unwrap().outdegree(), 1);
}

#[test]
fn course_unlocks_when_every_prerequisite_is_placed() {
	init();
	let catalog = cce_catalog().unwrap();
	let store = CourseMapStore::new();
	let config = Config::default();
	let planner = Planner::new(&catalog, &store, &config);
	let user = student();

	/* Same placements, sibling prerequisites in both orders */
	let orders: [&[(u64, &str)]; 2] = [
		&[(1, "PHYN101"), (1, "MTHN101"), (2, "MTHN102")],
		&[(1, "MTHN101"), (2, "MTHN102"), (1, "PHYN101")],
	];
	for (n, placements) in orders.iter().enumerate() {
		let (id, _) = seeded_map(&store, &catalog, &format!("Plan {}", n)).unwrap();
		for (i, (semester, code)) in placements.iter().enumerate() {
			let map = planner.course_map(&user, id).unwrap();
			let elc = map.containment("ELCN201").unwrap();
			assert_ne!(elc.outdegree(), 0, "unlocked before placement {}", i);
			planner.place_course(&user, id, SemesterId(*semester), code).unwrap();
		}

		let map = planner.course_map(&user, id).unwrap();
		let elc = map.containment("ELCN201").unwrap();
		assert_eq!(elc.outdegree(), 0);
		assert_eq!(elc.last_prereq_semester_order(), 2);
		assert!(!elc.is_available_at(2));
		assert!(elc.is_available_at(3));
		planner.place_course(&user, id, SemesterId(3), "ELCN201").unwrap();
	}
}

#[test]
fn credit_cap_applies_to_the_whole_batch() {
	init();
	let catalog = cce_catalog().unwrap();
	let store = CourseMapStore::new();
	let config = Config::default();
	let planner = Planner::new(&catalog, &store, &config);
	let (id, _) = seeded_map(&store, &catalog, "Plan A").unwrap();
	let user = student();

	let placement = planner.place_courses(&user, id, SemesterId(1), &["GENN201", "GENN101", "GENN102"]).unwrap();
	assert_eq!(placement.added.iter().map(|c| c.credits).sum::<u32>(), 13);
	let before = snapshot(&planner.course_map(&user, id).unwrap());

	/* Each of these fits on its own, together they make 23 */
	for code in ["PHYN101", "MTHN101", "CMPN101"] {
		assert!(planner.available_courses(&user, id, SemesterId(1)).unwrap().iter().any(|c| c.code == code));
	}
	let err = planner.place_courses(&user, id, SemesterId(1), &["PHYN101", "MTHN101", "CMPN101"]).unwrap_err();
	assert!(matches!(err, Error::Validation(ValidationError::CreditCapExceeded { total: 23, cap: 21 })));
	assert_eq!(snapshot(&planner.course_map(&user, id).unwrap()), before);

	let placement = planner.place_courses(&user, id, SemesterId(1), &["PHYN101", "MTHN101"]).unwrap();
	let map = planner.course_map(&user, id).unwrap();
	assert_eq!(map.credits_in(&placement.semester), 20);
	assert_eq!(placement.semester.courses().len(), 5);
}

#[test]
fn huge_credit_values_exceed_the_cap_instead_of_overflowing() {
	init();
	let mut catalog = MemoryCatalog::new();
	catalog.add_course(Course::new("CMPN201", "Logic Design", 3_000_000_000, 0)).unwrap();
	catalog.add_course(Course::new("CMPN202", "Circuits", 3_000_000_000, 0)).unwrap();
	catalog.add_program(Program::new("CCE", "Computer and Communication Engineering")).unwrap();
	catalog.add_requirement("CCE", "CMPN201", None).unwrap();
	catalog.add_requirement("CCE", "CMPN202", None).unwrap();
	let store = CourseMapStore::new();
	let mut config = Config::default();
	config.set_semester_credit_cap(u32::MAX);
	let planner = Planner::new(&catalog, &store, &config);
	let user = student();
	let map = planner.create_course_map(&user, "Plan A", "CCE", Some("2019")).unwrap();

	let err = planner.place_courses(&user, map.id(), SemesterId(1), &["CMPN201", "CMPN202"]).unwrap_err();
	assert!(matches!(err, Error::Validation(ValidationError::CreditCapExceeded { total: u32::MAX, cap: u32::MAX })));
	assert!(planner.course_map(&user, map.id()).unwrap().semesters()[0].courses().is_empty());

	planner.place_course(&user, map.id(), SemesterId(1), "CMPN201").unwrap();
	assert!(planner.available_courses(&user, map.id(), SemesterId(1)).unwrap().is_empty());
	let err = planner.place_course(&user, map.id(), SemesterId(1), "CMPN202").unwrap_err();
	assert!(matches!(err, Error::Validation(ValidationError::CreditCapExceeded { .. })));
	planner.place_course(&user, map.id(), SemesterId(2), "CMPN202").unwrap();
}

#[test]
fn credit_cap_follows_config() {
	let catalog = cce_catalog().unwrap();
	let store = CourseMapStore::new();
	let mut config = Config::default();
	config.set_semester_credit_cap(6);
	let planner = Planner::new(&catalog, &store, &config);
	let (id, _) = seeded_map(&store, &catalog, "Plan A").unwrap();
	let user = student();

	planner.place_courses(&user, id, SemesterId(1), &["MTHN101", "CMPN101"]).unwrap();
	let err = planner.place_course(&user, id, SemesterId(1), "GENN101").unwrap_err();
	assert!(matches!(err, Error::Validation(ValidationError::CreditCapExceeded { total: 10, cap: 6 })));
}

#[test]
fn prerequisite_hours_only_count_earlier_semesters() {
	init();
	let mut catalog = MemoryCatalog::new();
	catalog.add_course(Course::new("MTHN101", "Calculus I", 3, 0)).unwrap();
	catalog.add_course(Course::new("PHYN101", "Physics I", 3, 0)).unwrap();
	catalog.add_course(Course::new("CMPN201", "Seminar", 2, 6)).unwrap();
	catalog.add_program(Program::new("CCE", "Computer")).unwrap();
	for code in ["MTHN101", "PHYN101", "CMPN201"] {
		catalog.add_requirement("CCE", code, None).unwrap();
	}
	let store = CourseMapStore::new();
	let (id, _) = seeded_map(&store, &catalog, "Plan A").unwrap();
	let config = Config::default();
	let planner = Planner::new(&catalog, &store, &config);
	let user = student();

	let err = planner.place_course(&user, id, SemesterId(1), "CMPN201").unwrap_err();
	assert!(matches!(err, Error::Validation(ValidationError::InsufficientCredit { required: 6, earned: 0, .. })));

	planner.place_courses(&user, id, SemesterId(1), &["MTHN101", "PHYN101"]).unwrap();
	let err = planner.place_course(&user, id, SemesterId(1), "CMPN201").unwrap_err();
	assert!(matches!(err, Error::Validation(ValidationError::InsufficientCredit { earned: 0, .. })));

	planner.place_course(&user, id, SemesterId(2), "CMPN201").unwrap();
}

#[test]
fn large_prerequisite_hours_block_placement() {
	let catalog = cce_catalog().unwrap();
	let store = CourseMapStore::new();
	let config = Config::default();
	let planner = Planner::new(&catalog, &store, &config);
	let (id, _) = seeded_map(&store, &catalog, "Plan A").unwrap();
	let user = student();

	planner.place_course(&user, id, SemesterId(1), "CMPN101").unwrap();
	planner.place_course(&user, id, SemesterId(2), "CMPN102").unwrap();
	let err = planner.place_course(&user, id, SemesterId(3), "CMPN301").unwrap_err();
	match err {
		Error::Validation(ValidationError::InsufficientCredit { course, required, earned }) => {
			assert_eq!(course, "CMPN301");
			assert_eq!(required, 60);
			assert_eq!(earned, 6);
		},
		e => panic!("unexpected error {:?}", e),
	}
}

#[test]
fn batch_rejections_leave_the_map_untouched() {
	init();
	let catalog = cce_catalog().unwrap();
	let store = CourseMapStore::new();
	let config = Config::default();
	let planner = Planner::new(&catalog, &store, &config);
	let (id, _) = seeded_map(&store, &catalog, "Plan A").unwrap();
	let user = student();
	planner.place_course(&user, id, SemesterId(1), "CMPN101").unwrap();
	let before = snapshot(&planner.course_map(&user, id).unwrap());

	let cases: Vec<(Vec<&str>, fn(&Error) -> bool)> = vec![
		(vec!["MTHN101", "PHYN999"], |e| matches!(e, Error::Validation(ValidationError::UnknownCourse(_)))),
		(vec!["OUTN100"], |e| matches!(e, Error::Validation(ValidationError::UnknownCourse(_)))),
		(vec!["MTHN101", "MTHN101"], |e| matches!(e, Error::Validation(ValidationError::DuplicateCourse(_)))),
		(vec!["MTHN101", "CMPN101"], |e| matches!(e, Error::Validation(ValidationError::AlreadyTaken(_)))),
		(vec!["MTHN101", "MTHN102"], |e| matches!(e, Error::Validation(ValidationError::PrerequisitesNotSatisfied(_)))),
		(vec!["MTHN101", "bad"], |e| matches!(e, Error::Validation(ValidationError::InvalidInput(_)))),
		(vec![], |e| matches!(e, Error::Validation(ValidationError::InvalidInput(_)))),
	];
	for (codes, expected) in cases {
		let err = planner.place_courses(&user, id, SemesterId(2), &codes).unwrap_err();
		assert!(expected(&err), "{:?} gave {:?}", codes, err);
		assert_eq!(snapshot(&planner.course_map(&user, id).unwrap()), before);
	}

	let err = planner.place_course(&user, id, SemesterId(99), "MTHN101").unwrap_err();
	assert!(matches!(err, Error::NotFound(_)));
	assert!(!err.is_transient());
}

#[test]
fn placement_reports_added_courses() {
	let catalog = cce_catalog().unwrap();
	let store = CourseMapStore::new();
	let config = Config::default();
	let planner = Planner::new(&catalog, &store, &config);
	let (id, _) = seeded_map(&store, &catalog, "Plan A").unwrap();
	let user = student();

	let placement = planner.place_courses(&user, id, SemesterId(2), &["PHYN101", "MTHN101"]).unwrap();
	let codes: Vec<_> = placement.added.iter().map(|c| c.code.as_str()).collect();
	assert_eq!(codes, vec!["PHYN101", "MTHN101"]);
	assert_eq!(placement.semester.id, SemesterId(2));
	assert_eq!(placement.semester.courses(), ["PHYN101".to_string(), "MTHN101".to_string()]);

	let in_semester = planner.courses_in_semester(&user, id, SemesterId(2)).unwrap();
	assert_eq!(in_semester.len(), 2);
	assert_eq!(in_semester[1].name, "Calculus I");
}
