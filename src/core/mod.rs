//! Pure building blocks of the update protocol.
//!
//! This module holds the values a reducer works with and nothing that runs
//! on its own:
//! - `Update` outcomes and their constructors/accessors
//! - `Refs`, the per-instance element handle table
//! - `Snapshot`, the state/props view handed to update hooks
//! - `InstanceId`, the identity used to correlate logs

mod instance_id;
mod refs;
mod snapshot;
pub mod update;

pub use instance_id::InstanceId;
pub use refs::Refs;
pub use snapshot::Snapshot;
pub use update::Update;
