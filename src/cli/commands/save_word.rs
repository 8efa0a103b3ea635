use crate::core::session::SAVE_WORD_GUIDANCE;
use crate::errors::AppResult;
use crate::ui::messages::info;

/// Word output is not produced: point the user to the PDF path instead.
pub fn handle() -> AppResult<()> {
    info(SAVE_WORD_GUIDANCE);
    Ok(())
}
