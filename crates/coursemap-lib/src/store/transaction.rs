use std::sync::RwLockWriteGuard;

use crate::course_map::CourseMap;

/// Exclusive edit of one course map.
///
/// Changes are made to a working copy and only become visible on [`commit()`](Self::commit()).
/// Dropping the transaction without committing discards them. The map's write lock is held for
/// the whole transaction, so readers and other writers of the same map wait for it to end and
/// then see the committed state.
pub struct CourseMapTransaction<'g> {
	guard: RwLockWriteGuard<'g, CourseMap>,
	working: CourseMap,
}

impl<'g> CourseMapTransaction<'g> {
	pub fn new(guard: RwLockWriteGuard<'g, CourseMap>) -> CourseMapTransaction<'g> {
		let working = guard.clone();
		Self { guard, working }
	}

	pub fn map_mut(&mut self) -> &mut CourseMap {
		&mut self.working
	}

	pub fn commit(self) {
		let Self { mut guard, working } = self;
		log::trace!("Committing transaction on course map {}", working.id());
		*guard = working;
	}

	pub fn cancel(self) {
		log::trace!("Cancelling transaction on course map {}", self.working.id());
	}
}
