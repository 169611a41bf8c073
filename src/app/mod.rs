pub mod event_loop;
pub mod poller;
pub mod state;
pub mod timers;
