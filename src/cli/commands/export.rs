use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::report::ReportLogic;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use std::path::Path;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        force,
    } = cmd
    {
        let mut engine = ReportLogic::open(cfg)?;
        engine.teardown();

        ExportLogic::export(engine.document(), *format, Path::new(file), *force)?;
    }
    Ok(())
}
