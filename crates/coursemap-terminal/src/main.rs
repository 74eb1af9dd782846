use coursemap::course_map::{CourseMapId, SemesterId, UserId};
use coursemap::{Config, CourseMapStore, MemoryCatalog, Planner};

fn main() {
	let mut opts;

	/* Parse console input */
	let parsed_options = {
		let args: Vec<String> = std::env::args().collect();

		opts = getopts::Options::new();
		opts.optflag( "h", "help",    "Show help");
		opts.optflag( "v", "verbose", "Increased verbosity");
		opts.optopt(  "c", "catalog", "Catalog JSON file to plan against", "FILE");
		opts.optopt(  "u", "user",    "User owning the course maps, defaults to $USER", "ID");
		opts.parsing_style(getopts::ParsingStyle::FloatingFrees);

		let parsed_options = match opts.parse(&args[1..]) {
			Ok(m)  => { m }
			Err(e) => { println!("Unable to parse options: {}", e); return }
		};

		if parsed_options.opt_present("h") || parsed_options.free.is_empty() {
			eprintln!("{}", opts.usage(USAGE));
			return;
		}

		parsed_options
	};

	let mut logger = env_logger::Builder::from_default_env();
	if parsed_options.opt_present("v") {
		logger.filter_level(log::LevelFilter::Debug);
	}
	logger.init();

	let config = Config::load_from_disk().unwrap_or_else(|e| {
		log::warn!("Failed to read config file: {}", e);
		log::warn!("Using default config.");
		Config::default()
	});

	let catalog = match parsed_options.opt_str("c") {
		Some(path) => match MemoryCatalog::load_from_file(&path) {
			Ok(c) => c,
			Err(e) => { log::error!("Failed to load catalog {}: {}", path, e); return },
		},
		None => {
			log::debug!("No catalog given, only existing course maps can be used.");
			MemoryCatalog::new()
		},
	};

	let store = match CourseMapStore::load_from_disk(&config) {
		Ok(s) => s,
		Err(coursemap::Error::IO(e)) if e.kind() == std::io::ErrorKind::NotFound => {
			log::info!("No saved course maps found, starting fresh.");
			CourseMapStore::new()
		},
		Err(e) => { log::error!("Failed to open saved course maps: {}", e); return },
	};

	let user = parsed_options.opt_str("u")
		.or_else(|| std::env::var("USER").ok())
		.map(UserId)
		.unwrap_or_else(|| UserId::from("default"));

	let planner = Planner::new(&catalog, &store, &config);
	let args: Vec<&str> = parsed_options.free.iter().map(String::as_str).collect();
	match run_command(&planner, &user, &args) {
		Ok(()) => {},
		Err(e) => {
			eprintln!("{}", e);
			return;
		},
	}

	if let Err(e) = store.save_to_disk(&config) {
		log::error!("Failed to save course maps: {}", e);
	}
}

const USAGE: &str = "Usage: coursemap [options] COMMAND

Commands:
	map create NAME PROGRAM [YEAR]
	map list
	semester add MAP SEASON YEAR
	semester list MAP
	semester courses MAP SEMESTER
	available MAP SEMESTER
	place MAP SEMESTER COURSE...
	remove MAP SEMESTER COURSE";

fn run_command(planner: &Planner<MemoryCatalog>, user: &UserId, args: &[&str]) -> Result<(), Error> {
	match args {
		["map", "create", name, program, rest @ ..] => {
			let map = planner.create_course_map(user, name, program, rest.first().copied())?;
			println!("Created course map {} [{}] for {}", map.name(), map.id(), map.program().code);
			for s in map.semesters() {
				println!("\t{}) {}", s.id, s);
			}
		},
		["map", "list"] => {
			for m in planner.list_course_maps(user)? {
				println!("{}) {} ({})", m.id, m.name, m.program.code);
			}
		},
		["semester", "add", map, season, year] => {
			let s = planner.add_semester(user, map_id(map)?, season, year)?;
			println!("Added semester {}) {}", s.id, s);
		},
		["semester", "list", map] => {
			let map_id = map_id(map)?;
			for s in planner.list_semesters(user, map_id)? {
				println!("{}) {} [{}]", s.id, s, s.courses().join(", "));
			}
		},
		["semester", "courses", map, semester] => {
			for c in planner.courses_in_semester(user, map_id(map)?, semester_id(semester)?)? {
				println!("{} {} ({} credits)", c.code, c.name, c.credits);
			}
		},
		["available", map, semester] => {
			for c in planner.available_courses(user, map_id(map)?, semester_id(semester)?)? {
				println!("{} {} ({} credits)", c.code, c.name, c.credits);
			}
		},
		["place", map, semester, courses @ ..] if !courses.is_empty() => {
			let placement = planner.place_courses(user, map_id(map)?, semester_id(semester)?, courses)?;
			println!("Placed in {}:", placement.semester);
			for c in &placement.added {
				println!("\t{} {}", c.code, c.name);
			}
		},
		["remove", map, semester, course] => {
			let removal = planner.remove_course(user, map_id(map)?, semester_id(semester)?, course)?;
			println!("Removed {} from {} in {}", course, removal.semester, removal.course_map.name);
		},
		[] => return Err(Error::MissingArgument),
		_ => return Err(Error::UnknownCommand(args.join(" "))),
	}
	Ok(())
}

fn map_id(arg: &str) -> Result<CourseMapId, Error> {
	arg.parse().map(CourseMapId).map_err(|_| Error::InvalidId(arg.to_string()))
}

fn semester_id(arg: &str) -> Result<SemesterId, Error> {
	arg.parse().map(SemesterId).map_err(|_| Error::InvalidId(arg.to_string()))
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("coursemap error: {0}")]
	Coursemap(#[from] coursemap::Error),
	#[error("Missing argument")]
	MissingArgument,
	#[error("Unknown command: {0}")]
	UnknownCommand(String),
	#[error("Invalid id: {0}")]
	InvalidId(String),
}
