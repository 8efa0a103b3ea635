use crate::config::Config;
use crate::errors::AppResult;
use crate::store::{FileIdentity, IdentityProvider};

/// Print the anonymous identifier (created on first use).
pub fn handle(cfg: &Config) -> AppResult<()> {
    let mut identity = FileIdentity::new(&cfg.identity_file);
    let uid = identity.sign_in_anonymously()?;
    println!("{}", uid);
    Ok(())
}
