//! # Lesson Table Compiler
//!
//! Lesson authors write language lessons as one flat, hand-edited table: a lesson
//! header row (level, lesson number, title) followed by word rows carrying an
//! image key and one translation column per language. This crate turns that
//! table into structured lessons and keeps parallel tables consistent.
//!
//! ## Features
//!
//! - **Column grammar**: column names such as `Noun-base word Russian` are parsed
//!   once into a role and a language label
//! - **Lesson segmentation**: the row stream is partitioned into lesson blocks,
//!   addressed by synthetic identifiers `table_<number>_<title>`
//! - **Column reordering**: tables are rebuilt in a canonical column order
//! - **Theme synchronization**: lesson titles of the main table are seeded into
//!   the adjective, preposition and question-word tables
//! - **Persistence**: tables are stored whole, in memory or in a DuckDB database
//!
//! The transforms are pure functions over borrowed tables; only
//! [`service::LessonService`] reads and writes the store.
pub mod database;
pub mod error;
mod helpers;
pub mod lesson;
pub mod options;
pub mod service;
pub mod table;
pub mod transform;

pub use crate::database::duck::DuckDbTableStore;
pub use crate::database::memory::MemoryTableStore;
pub use crate::database::TableStore;
pub use crate::error::LessonTableError;
pub use crate::options::Options;
pub use crate::service::LessonService;
pub use crate::table::row::Row;
pub use crate::table::Table;
pub use crate::table::TableKind;
