use crate::config::Config;
use crate::core::session::SessionLogic;
use crate::errors::AppResult;

pub fn handle(cfg: &Config) -> AppResult<()> {
    SessionLogic::run(cfg)
}
