use chrono::Utc;
use clap::Subcommand;
use eclipse_core::{Config, Database};

use super::CmdResult;

#[derive(Subcommand)]
pub enum PresenceAction {
    /// Mark yourself as focusing
    Join,
    /// Stop focusing
    Leave,
    /// Number of other users focusing right now
    Count,
}

pub fn run(action: PresenceAction) -> CmdResult {
    let config = Config::load()?;
    let db = Database::open()?;
    let uid = config.profile.user_id.as_str();

    match action {
        PresenceAction::Join => {
            db.set_presence(uid, Utc::now())?;
            println!("focusing as {uid}");
        }
        PresenceAction::Leave => {
            db.clear_presence(uid, Utc::now())?;
            println!("left focus");
        }
        PresenceAction::Count => {
            println!("{}", db.focusing_count(Some(uid))?);
        }
    }
    Ok(())
}
