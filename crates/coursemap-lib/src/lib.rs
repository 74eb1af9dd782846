//! Prerequisite-aware multi-semester course planning.
//!
//! A [`CourseMap`] is seeded from a program in a [`Catalog`] and then edited one placement or
//! removal at a time. The [`resolver`] keeps every course's unlock state current so availability
//! questions never have to walk the prerequisite graph.

pub mod error;
pub use error::Result;
pub use error::Error;
pub use error::ValidationError;

pub mod config;
pub use config::Config;
pub use config::RemovalPolicy;

pub mod validation;

pub mod catalog;
pub use catalog::Catalog;
pub use catalog::MemoryCatalog;

pub mod course_map;
pub use course_map::CourseMap;

pub mod resolver;
pub mod store;
pub use store::CourseMapStore;

pub mod planner;
pub use planner::Planner;
