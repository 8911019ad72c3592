//! Data Transfer Objects for REST request/response serialization.
//!
//! Juice values are minutes as JSON numbers; civil dates are `YYYY-MM-DD`.

pub mod board_dto;
pub mod claim_dto;
pub mod common_dto;
pub mod user_dto;

pub use board_dto::*;
pub use claim_dto::*;
pub use common_dto::*;
pub use user_dto::*;
