use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::report::ReportLogic;
use crate::core::view::render_text;
use crate::errors::AppResult;
use crate::models::project;
use crate::utils::colors::{GREY, RESET};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Show { json } = cmd {
        let mut engine = ReportLogic::open(cfg)?;
        engine.teardown();

        if *json {
            println!("{}", project(engine.document()).to_json_pretty()?);
            return Ok(());
        }

        print!("{}", render_text(engine.document()));

        if let Some((_, meta)) = engine.store().read(&cfg.document_path)? {
            println!(
                "\n{}revision {} · last saved by {} at {}{}",
                GREY, meta.revision, meta.updated_by, meta.updated_at, RESET
            );
        }
    }
    Ok(())
}
