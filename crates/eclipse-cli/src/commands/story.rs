use chrono::Utc;
use clap::Subcommand;
use eclipse_core::story::{self, CHAPTERS};
use eclipse_core::{Alignment, Database};
use serde::Serialize;

use super::{print_json, CmdResult};

#[derive(Subcommand)]
pub enum StoryAction {
    /// List chapters with their lock state
    List,
    /// Show a chapter's narrative and choice
    Show {
        /// Chapter ID
        id: u32,
    },
    /// Move to a chapter, optionally making its choice
    Advance {
        /// Chapter ID
        id: u32,
        /// Choice alignment: focused, balanced or driven
        #[arg(long, value_parser = parse_alignment)]
        choice: Option<Alignment>,
    },
}

fn parse_alignment(s: &str) -> Result<Alignment, String> {
    Alignment::parse(&s.to_lowercase())
        .ok_or_else(|| format!("unknown alignment '{s}' (expected focused, balanced or driven)"))
}

#[derive(Serialize)]
struct ChapterEntry {
    id: u32,
    title: &'static str,
    unlock_level: u32,
    unlocked: bool,
    current: bool,
}

pub fn run(action: StoryAction) -> CmdResult {
    let db = Database::open()?;

    match action {
        StoryAction::List => {
            let profile = db.profile()?;
            let entries: Vec<ChapterEntry> = CHAPTERS
                .iter()
                .map(|c| ChapterEntry {
                    id: c.id,
                    title: c.title,
                    unlock_level: c.unlock_level,
                    unlocked: c.is_unlocked_at(profile.level),
                    current: c.id == profile.chapter,
                })
                .collect();
            print_json(&entries)?;
        }
        StoryAction::Show { id } => {
            let level = db.profile()?.level;
            let chapter = story::validate_advance(id, level, None)?;
            print_json(chapter)?;
        }
        StoryAction::Advance { id, choice } => {
            let chapter = db.advance_chapter(id, choice, Utc::now())?;
            println!("now at chapter {}: {}", chapter.id, chapter.title);
        }
    }
    Ok(())
}
