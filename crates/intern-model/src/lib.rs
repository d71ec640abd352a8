//! Data model for the internship program import pipeline.
//!
//! Three entity types are extracted from spreadsheets and persisted per
//! academic year: [`Student`], [`Company`] and [`Supervisor`]. Each one
//! implements [`Entity`], which exposes the natural key used to decide
//! between insert and update during reconciliation.

pub mod company;
pub mod entity;
pub mod error;
pub mod ids;
pub mod patch;
pub mod student;
pub mod supervisor;
pub mod year;

pub use company::Company;
pub use entity::{Entity, EntityKind, Stored};
pub use error::{ModelError, Result};
pub use ids::RecordId;
pub use patch::{FieldUpdate, Patch};
pub use student::{Collaborateur, Collaboration, LocalisationType, Student};
pub use supervisor::{Categorie, Supervisor, SupervisorKey};
pub use year::Year;
