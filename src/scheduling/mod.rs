//! Entropy-weight scheduling module.
//!
//! Provides epoch-dependent entropy-bonus coefficients for the actor loss.
//!
//! ## Available Schedules
//!
//! - [`LinearEntropyDecay`]: Linear decay from a start weight to a floor
//! - [`ConstantEntropy`]: No scheduling (fixed weight)
//!
//! ## Example
//!
//! ```rust,ignore
//! use a3c_core::scheduling::{EntropySchedule, LinearEntropyDecay};
//!
//! // Decay from 1.0 to the 0.1 floor over 100k epochs
//! let schedule = LinearEntropyDecay::new(1.0, 0.1, 100_000);
//!
//! // In the gradient computation:
//! let weight = schedule.weight(epoch);
//! let actor_loss = policy_loss - entropy * weight;
//! ```

pub mod entropy_schedule;

pub use entropy_schedule::{ConstantEntropy, EntropySchedule, LinearEntropyDecay};
