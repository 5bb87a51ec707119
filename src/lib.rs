//! Signal Simulation Library
//!
//! A stochastic model of one signalized four-way intersection, used to
//! compare fixed signal-timing plans by their vehicle and pedestrian delay.

pub mod simulation;
