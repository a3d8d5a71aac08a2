//! Process lifecycle.
//!
//! Startup order is main's concern (config, then logging, then the server);
//! this module only owns shutdown signaling.

pub mod shutdown;
