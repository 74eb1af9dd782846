//! Library error type.

pub type Result<T> = std::result::Result<T, Error>;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
	#[error("not found: {0}")]
	NotFound(String),
	#[error("validation error: {0}")]
	Validation(#[from] ValidationError),
	/// The store could not be accessed. Unlike the other variants this is worth retrying.
	#[error("store error: {0}")]
	Store(String),
	#[error("IO error: {0}")]
	IO(#[from] std::io::Error),
	#[error("JSON error: {0}")]
	SerdeJSON(#[from] serde_json::Error),
	#[error("bincode error: {0}")]
	Bincode(#[from] bincode::Error),
	#[error("parsing error: {0}")]
	Parse(String),
}

impl Error {
	/// Business rule rejections are final, only store failures may succeed on a second attempt.
	pub fn is_transient(&self) -> bool {
		matches!(self, Error::Store(_))
	}
}

/// Reasons an otherwise well-addressed request is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
	#[error("invalid input: {0}")]
	InvalidInput(String),
	#[error("{0} already exists")]
	AlreadyExists(String),
	#[error("course {0} is not part of this course map")]
	UnknownCourse(String),
	#[error("course {0} was requested more than once")]
	DuplicateCourse(String),
	#[error("course {0} is already taken")]
	AlreadyTaken(String),
	#[error("prerequisites of {0} are not satisfied before this semester")]
	PrerequisitesNotSatisfied(String),
	#[error("course {course} requires {required} earned credits before this semester, only {earned} are earned")]
	InsufficientCredit {
		course: String,
		required: u32,
		earned: u32,
	},
	#[error("semester would hold {total} credits, the cap is {cap}")]
	CreditCapExceeded {
		total: u32,
		cap: u32,
	},
	#[error("cannot remove {course}, it is a prerequisite of already placed courses: {}", .dependents.join(", "))]
	RemovalBlocked {
		course: String,
		dependents: Vec<String>,
	},
	#[error("semester must come after the last semester of the course map")]
	SemesterOutOfOrder,
	#[error("prerequisite {prerequisite} of {course} would create a cycle")]
	PrerequisiteCycle {
		course: String,
		prerequisite: String,
	},
}

impl<T> From<std::sync::PoisonError<T>> for Error {
	fn from(e: std::sync::PoisonError<T>) -> Self {
		Error::Store(e.to_string())
	}
}
