pub mod config;
pub mod edit;
pub mod export;
pub mod init;
pub mod log;
pub mod print;
pub mod save_word;
pub mod session;
pub mod show;
pub mod whoami;
