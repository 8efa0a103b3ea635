pub mod actions;
pub mod debounce;
pub mod log;
pub mod merge;
pub mod report;
pub mod session;
pub mod sync;
pub mod upload;
pub mod view;
