// Application layer - Use cases and the projection engine
pub mod actions;
pub mod chart_projection;
pub mod client;
pub mod keg_store;
pub mod sequencer;
pub mod transport;
