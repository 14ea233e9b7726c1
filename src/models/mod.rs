pub mod user;
pub mod class;
pub mod budget;
pub mod study_task;
pub mod question;

pub use user::*;
pub use class::*;
pub use budget::*;
pub use study_task::*;
pub use question::*;

use serde::{Deserialize, Serialize};

/// Result of an owner-scoped update or delete
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MutationResult {
    pub id: String,
    pub affected: u64,
}

/// `?email=` owner filter shared by list and delete routes
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OwnerQuery {
    pub email: Option<String>,
}
