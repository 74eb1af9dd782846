//! Runtime options shared by the store, the resolver and the terminal.

use serde::{Serialize, Deserialize};

/// What happens to a dependent's `last_prereq_semester_order` when one of its prerequisites is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RemovalPolicy {
	/// Recompute from the prerequisites that are still placed.
	#[default]
	Recompute,
	/// Leave the value untouched, it can only ever grow.
	KeepStale,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
	data_dir: std::path::PathBuf,
	semester_credit_cap: u32,
	generated_years: u32,
	removal_policy: RemovalPolicy,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			data_dir: default_data_dir(),
			semester_credit_cap: 21,
			generated_years: 5,
			removal_policy: RemovalPolicy::default(),
		}
	}
}

fn default_data_dir() -> std::path::PathBuf {
	let base = if let Ok(e) = std::env::var("XDG_DATA_HOME") {
		std::path::PathBuf::from(e)
	} else if let Ok(home) = std::env::var("HOME") {
		std::path::PathBuf::from(home).join(".local/share")
	} else {
		std::path::PathBuf::from(".")
	};
	base.join("coursemap")
}

impl Config {
	/// Reads `config.json` from the default data directory.
	///
	/// # Errors
	/// - [`IO`](crate::Error::IO) when the file can't be opened.
	/// - [`SerdeJSON`](crate::Error::SerdeJSON) when the file is malformed.
	pub fn load_from_disk() -> crate::Result<Self> {
		Self::load_from_file(default_data_dir().join("config.json"))
	}

	pub fn load_from_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
		let file = std::fs::File::open(path)?;
		Ok(serde_json::from_reader(file)?)
	}

	/// Writes `config.json` into the configured data directory, creating it if needed.
	pub fn save_to_disk(&self) -> crate::Result<()> {
		std::fs::create_dir_all(&self.data_dir)?;
		let file = std::fs::File::create(self.data_dir.join("config.json"))?;
		serde_json::to_writer_pretty(file, self)?;
		Ok(())
	}

	pub fn data_dir(&self) -> &std::path::PathBuf {
		&self.data_dir
	}
	pub fn set_data_dir(&mut self, data_dir: std::path::PathBuf) {
		self.data_dir = data_dir;
	}

	/// Most credits a single semester may hold.
	pub fn semester_credit_cap(&self) -> u32 {
		self.semester_credit_cap
	}
	pub fn set_semester_credit_cap(&mut self, cap: u32) {
		self.semester_credit_cap = cap;
	}

	/// Academic years of semesters generated when a map is created with a starting year.
	pub fn generated_years(&self) -> u32 {
		self.generated_years
	}
	pub fn set_generated_years(&mut self, years: u32) {
		self.generated_years = years;
	}

	pub fn removal_policy(&self) -> RemovalPolicy {
		self.removal_policy
	}
	pub fn set_removal_policy(&mut self, policy: RemovalPolicy) {
		self.removal_policy = policy;
	}
}
