//! Shared storage for every user's course maps.
//!
//! Each map sits behind its own lock so edits to different maps never wait on each other.
//! Writes go through a [`CourseMapTransaction`], reads see the last committed state.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::course_map::*;
use crate::ValidationError;

mod transaction;
pub use transaction::CourseMapTransaction;

#[derive(Debug)]
struct Entry {
	owner: UserId,
	name: String,
	map: Arc<RwLock<CourseMap>>,
}

#[derive(Debug)]
pub struct CourseMapStore {
	/// Only held long enough to find or insert an entry, never while a map is locked.
	index: RwLock<BTreeMap<CourseMapId, Entry>>,
	next_id: AtomicU64,
}

impl Default for CourseMapStore {
	fn default() -> Self {
		Self {
			index: Default::default(),
			next_id: AtomicU64::new(1),
		}
	}
}

impl CourseMapStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates and stores a new map named `name` for `owner`.
	///
	/// `build` receives the id for the new map and runs without any lock held. The name is
	/// checked again when inserting, so of two racing creations with the same name only one is stored.
	///
	/// # Errors
	/// - [`Validation`](crate::Error::Validation) when `owner` already has a map called `name`.
	/// - Anything returned by `build`, in which case nothing is stored.
	pub fn create<F>(&self, owner: &UserId, name: &str, build: F) -> crate::Result<CourseMap>
	where F: FnOnce(CourseMapId) -> crate::Result<CourseMap>
	{
		if Self::has_name(&*self.index.read()?, owner, name) {
			return Err(ValidationError::AlreadyExists(format!("course map {}", name)).into());
		}

		let id = CourseMapId(self.next_id.fetch_add(1, Ordering::Relaxed));
		let map = build(id)?;

		let mut index = self.index.write()?;
		if Self::has_name(&*index, owner, name) {
			log::debug!("Course map {} for {} was created concurrently, dropping {}", name, owner, id);
			return Err(ValidationError::AlreadyExists(format!("course map {}", name)).into());
		}
		index.insert(id, Entry {
			owner: map.owner().clone(),
			name: map.name().to_string(),
			map: Arc::new(RwLock::new(map.clone())),
		});
		Ok(map)
	}

	fn has_name(index: &BTreeMap<CourseMapId, Entry>, owner: &UserId, name: &str) -> bool {
		index.values().any(|e| &e.owner == owner && e.name == name)
	}

	/// Summaries of every map `owner` created, ordered by id.
	pub fn list(&self, owner: &UserId) -> crate::Result<Vec<CourseMapSummary>> {
		let entries: Vec<_> = self.index.read()?
			.values()
			.filter(|e| &e.owner == owner)
			.map(|e| e.map.clone())
			.collect();
		let mut summaries = Vec::with_capacity(entries.len());
		for m in entries {
			summaries.push(m.read()?.summary());
		}
		Ok(summaries)
	}

	pub fn len(&self) -> usize {
		self.index.read().map(|i| i.len()).unwrap_or(0)
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Maps owned by somebody else are reported exactly like missing ones.
	fn entry(&self, owner: &UserId, id: CourseMapId) -> crate::Result<Arc<RwLock<CourseMap>>> {
		self.index.read()?
			.get(&id)
			.filter(|e| &e.owner == owner)
			.map(|e| e.map.clone())
			.ok_or_else(|| crate::Error::NotFound(format!("course map {}", id)))
	}

	/// Runs `f` against the committed state of a map.
	pub fn read<R, F>(&self, owner: &UserId, id: CourseMapId, f: F) -> crate::Result<R>
	where F: FnOnce(&CourseMap) -> crate::Result<R>
	{
		let entry = self.entry(owner, id)?;
		let map = entry.read()?;
		f(&*map)
	}

	/// Runs `f` inside a transaction on a map, committing only when it succeeds.
	pub fn write<R, F>(&self, owner: &UserId, id: CourseMapId, f: F) -> crate::Result<R>
	where F: FnOnce(&mut CourseMap) -> crate::Result<R>
	{
		let entry = self.entry(owner, id)?;
		log::debug!("Locking course map {} for writing", id);
		let mut tx = CourseMapTransaction::new(entry.write()?);
		match f(tx.map_mut()) {
			Ok(r) => {
				tx.commit();
				Ok(r)
			},
			Err(e) => {
				tx.cancel();
				Err(e)
			},
		}
	}

	/* Serialization */

	/// Saves every map to `coursemaps.bin` in the data directory.
	///
	/// # Errors
	/// - [`IO`](crate::Error::IO) when creating the directory or file.
	/// - [`Bincode`](crate::Error::Bincode) when serializing.
	pub fn save_to_disk(&self, config: &crate::Config) -> crate::Result<()> {
		let entries: Vec<_> = self.index.read()?.values().map(|e| e.map.clone()).collect();
		let mut maps = Vec::with_capacity(entries.len());
		for m in entries {
			maps.push(m.read()?.clone());
		}

		std::fs::create_dir_all(config.data_dir())?;
		let path = config.data_dir().join("coursemaps.bin");
		let file = std::fs::File::create(&path)?;
		bincode::serialize_into(std::io::BufWriter::new(file), &maps)?;
		log::debug!("Saved {} course maps to {}", maps.len(), path.display());
		Ok(())
	}

	/// Loads the maps saved by [`save_to_disk()`](Self::save_to_disk()).
	///
	/// # Errors
	/// - [`IO`](crate::Error::IO) when opening the file, `NotFound` kind when nothing was saved yet.
	/// - [`Bincode`](crate::Error::Bincode) when deserializing.
	pub fn load_from_disk(config: &crate::Config) -> crate::Result<Self> {
		let file = std::fs::File::open(config.data_dir().join("coursemaps.bin"))?;
		let maps: Vec<CourseMap> = bincode::deserialize_from(std::io::BufReader::new(file))?;

		let next_id = maps.iter().map(|m| m.id().0).max().unwrap_or(0) + 1;
		let index = maps.into_iter()
			.map(|m| (m.id(), Entry {
				owner: m.owner().clone(),
				name: m.name().to_string(),
				map: Arc::new(RwLock::new(m)),
			}))
			.collect::<BTreeMap<_, _>>();
		log::debug!("Loaded {} course maps", index.len());

		Ok(Self {
			index: RwLock::new(index),
			next_id: AtomicU64::new(next_id),
		})
	}
}
