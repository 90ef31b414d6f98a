//! Client identity entities.

pub mod kind;
pub mod model;
pub mod row;

pub use kind::ClientKind;
pub use model::Client;
pub use row::ClientRow;
