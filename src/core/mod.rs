//! Core data types: trajectories, parameter snapshots, broadcast slot.

pub mod param_slot;
pub mod param_sync;
pub mod trajectory;

pub use param_slot::{param_slot, param_slot_with, ParamSlot, SharedParamSlot};
pub use param_sync::{load_into, snapshot_of, ParamSnapshot, ParamTensor, SyncError};
pub use trajectory::{Trajectory, TrajectoryError};
