//! Keeps course unlock state consistent while a course map is edited.
//!
//! Every [`Containment`](crate::course_map::Containment) carries two numbers about its direct
//! prerequisites: how many are still untaken (`outdegree`) and the latest semester order any of
//! them was placed in. Together they make "can this course go into semester N" a constant time
//! check, and placing or removing a course only has to touch its direct dependents.
//!
//! # Usage
//! 1. Create a map with a [`CourseMapBuilder`].
//! 1. Ask [`available_courses()`] which courses fit a semester.
//! 1. [`place_courses()`] to add one or more courses to a semester.
//! 1. [`remove_course()`] to take a course back out.
//!
//! The functions here work on a plain `&mut CourseMap` and leave it untouched when they return
//! an error. Serializing concurrent edits is the job of [`CourseMapStore`](crate::CourseMapStore).

mod seeding;
pub use seeding::CourseMapBuilder;

mod availability;
pub use availability::available_courses;
pub use availability::directly_available;

mod placement;
pub use placement::place_courses;
pub use placement::Placement;

mod removal;
pub use removal::remove_course;
pub use removal::Removal;
