//! Ports (trait boundaries) between the game driver and its participants.
//!
//! The driver only talks to players through [`Learner`] and reports progress
//! through [`Observer`]; agents, scripted opponents, the console player and
//! the renderers are adapters behind these traits.

pub mod learner;
pub mod observer;

pub use learner::Learner;
pub use observer::Observer;
