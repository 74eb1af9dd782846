use coursemap::catalog::Catalog;
use coursemap::course_map::SemesterId;
use coursemap::{Config, CourseMapStore, Error, MemoryCatalog, Planner, ValidationError};
use coursemap_test_utils::*;

fn sample() -> serde_json::Value {
	serde_json::json!({
		"courses": [
			{ "code": "CMPN201", "name": "Logic Design", "credits": 3 },
			{ "code": "CMPN211", "name": "Computer Architecture", "credits": 3, "prerequisiteHours": 0, "prerequisites": ["CMPN201"] },
			{ "code": "CMPN311", "name": "Operating Systems", "credits": 3, "prerequisiteHours": 3, "prerequisites": ["CMPN211"] }
		],
		"programs": [
			{ "code": "CCE", "name": "Computer and Communication Engineering", "requirements": [
				{ "course": "CMPN201", "group": "core" },
				{ "course": "CMPN211" },
				{ "course": "CMPN311", "group": null }
			]}
		]
	})
}

#[test]
fn imported_catalog_seeds_maps() {
	let _ = env_logger::builder().is_test(true).try_init();
	let catalog = MemoryCatalog::from_json(&sample(), true).unwrap();
	assert_eq!(catalog.courses().count(), 3);
	assert_eq!(catalog.get_direct_prerequisites("CMPN311").unwrap(), vec!["CMPN211"]);
	assert_eq!(catalog.get_course("CMPN311").unwrap().prerequisite_hours, 3);

	let store = CourseMapStore::new();
	let config = Config::default();
	let planner = Planner::new(&catalog, &store, &config);
	let (id, map) = seeded_map(&store, &catalog, "Plan A").unwrap();
	assert_eq!(map.containment("CMPN201").unwrap().group(), Some("core"));
	assert_eq!(map.containment("CMPN311").unwrap().outdegree(), 1);

	planner.place_course(&student(), id, SemesterId(1), "CMPN201").unwrap();
	planner.place_course(&student(), id, SemesterId(2), "CMPN211").unwrap();
	planner.place_course(&student(), id, SemesterId(3), "CMPN311").unwrap();
}

#[test]
fn schema_violations_are_parse_errors() {
	let mut bad = sample();
	bad["courses"][0]["credits"] = serde_json::json!("three");
	assert!(matches!(MemoryCatalog::from_json(&bad, true), Err(Error::Parse(_))));
	/* Without the schema serde still refuses it */
	assert!(matches!(MemoryCatalog::from_json(&bad, false), Err(Error::SerdeJSON(_))));

	let missing = serde_json::json!({ "programs": [] });
	assert!(matches!(MemoryCatalog::from_json(&missing, true), Err(Error::Parse(_))));
}

#[test]
fn graph_errors_surface_from_import() {
	let mut cyclic = sample();
	cyclic["courses"][0]["prerequisites"] = serde_json::json!(["CMPN311"]);
	assert!(matches!(
		MemoryCatalog::from_json(&cyclic, true),
		Err(Error::Validation(ValidationError::PrerequisiteCycle { .. }))
	));

	let mut dangling = sample();
	dangling["courses"][1]["prerequisites"] = serde_json::json!(["MTHN101"]);
	assert!(matches!(MemoryCatalog::from_json(&dangling, true), Err(Error::NotFound(_))));

	let mut duplicate = sample();
	duplicate["courses"][1]["code"] = serde_json::json!("CMPN201");
	assert!(matches!(
		MemoryCatalog::from_json(&duplicate, true),
		Err(Error::Validation(ValidationError::AlreadyExists(_)))
	));
}

#[test]
fn catalog_loads_from_file() {
	let (dir, _) = temp_config().unwrap();
	let path = dir.path().join("catalog.json");
	std::fs::write(&path, serde_json::to_string_pretty(&sample()).unwrap()).unwrap();

	let catalog = MemoryCatalog::load_from_file(&path).unwrap();
	assert_eq!(catalog.get_program("CCE").unwrap().name, "Computer and Communication Engineering");
	assert!(matches!(MemoryCatalog::load_from_file(dir.path().join("missing.json")), Err(Error::IO(_))));
}
