//! Message log fed by the session's presenter callbacks.

use std::collections::VecDeque;

use game_core::world::EndingDefinition;
use game_core::{BattleEvent, QuestCompletion, VictorySummary};
use runtime::{BattleView, Presenter};

const MAX_LINES: usize = 200;

/// Rolling log of everything the session reported, newest last.
///
/// The UI draws the tail of this log in the message panel; the app also
/// pushes its own notes (refused commands, hints) through [`Transcript::note`].
#[derive(Default)]
pub struct Transcript {
    lines: VecDeque<String>,
}

impl Transcript {
    pub fn lines(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn note(&mut self, line: impl Into<String>) {
        if self.lines.len() == MAX_LINES {
            self.lines.pop_front();
        }
        self.lines.push_back(line.into());
    }
}

impl Presenter for Transcript {
    fn dialogue(&mut self, speaker: Option<&str>, text: &str) {
        match speaker {
            Some(name) => self.note(format!("{name}: {text}")),
            None => self.note(text.to_owned()),
        }
    }

    fn battle_started(&mut self, view: &BattleView) {
        self.note(format!("{} draws near!", view.name));
    }

    fn battle_round(&mut self, events: &[BattleEvent], _view: &BattleView) {
        for event in events {
            self.note(describe(event));
        }
    }

    fn victory(&mut self, summary: &VictorySummary) {
        self.note(format!(
            "Victory! Gained {} EXP and {} gold.",
            summary.exp, summary.gold
        ));
        for level_up in &summary.level_ups {
            self.note(format!(
                "{} reached level {}!",
                level_up.member, level_up.level
            ));
        }
    }

    fn quest_completed(&mut self, completion: &QuestCompletion) {
        self.note(format!("Quest complete: {}", completion.name));
    }

    fn ending(&mut self, ending: &EndingDefinition) {
        self.note(format!("~ {} ~", ending.title));
        self.note(ending.text.clone());
    }

    fn game_over(&mut self) {
        self.note("The party has fallen...");
    }
}

fn describe(event: &BattleEvent) -> String {
    match event {
        BattleEvent::PlayerAttacked { target, damage } => {
            format!("You hit {target} for {damage} damage.")
        }
        BattleEvent::PlayerCast {
            skill,
            target,
            damage,
        } => format!("{skill} strikes {target} for {damage} damage."),
        BattleEvent::PlayerHealed { source, amount } => {
            format!("{source} restores {amount} HP.")
        }
        BattleEvent::PlayerUsedItem {
            item,
            healed_hp,
            restored_mp,
        } => match (healed_hp, restored_mp) {
            (0, 0) => format!("Used {item}."),
            (hp, 0) => format!("Used {item}: +{hp} HP."),
            (0, mp) => format!("Used {item}: +{mp} MP."),
            (hp, mp) => format!("Used {item}: +{hp} HP, +{mp} MP."),
        },
        BattleEvent::PlayerDefended => "You brace for the next blow.".to_owned(),
        BattleEvent::EnemyDefeated { name } => format!("{name} is defeated!"),
        BattleEvent::EnemyAttacked {
            name,
            damage,
            power,
        } => {
            if *power {
                format!("{name} unleashes a mighty blow: {damage} damage!")
            } else {
                format!("{name} attacks for {damage} damage.")
            }
        }
        BattleEvent::EnemyDefended { name } => format!("{name} guards."),
        BattleEvent::DropGranted { item, qty } => {
            if *qty > 1 {
                format!("Found {item} x{qty}.")
            } else {
                format!("Found {item}.")
            }
        }
    }
}
