//! Read-side statistics over persisted internship records.
//!
//! Load a [`Dataset`] once from a [`Database`](intern_store::Database), then
//! compute any of the projections. Groups with no matching record are never
//! emitted as zero rows.

mod companies;
mod dataset;
mod error;
mod grades;
mod trends;
mod workload;

pub use companies::{CompanyRanking, top_companies};
pub use dataset::Dataset;
pub use error::{AnalyticsError, Result};
pub use grades::{GradeStats, grade_stats};
pub use trends::{YearTrend, yearly_trends};
pub use workload::{HOURS_PER_STUDENT, SupervisorWorkload, supervisor_workload};
