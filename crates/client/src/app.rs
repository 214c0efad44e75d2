//! Input handling and the main draw/poll loop.

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use game_content::WorldData;
use game_core::{Direction, ItemId, ItemKind, PlayerCommand, SkillId, WorldOracle};
use ratatui::DefaultTerminal;
use runtime::{Session, SessionMode};

use crate::config::ClientConfig;
use crate::transcript::Transcript;
use crate::ui;

pub const BATTLE_MENU: [&str; 4] = ["Attack", "Skill", "Item", "Defend"];

/// Which list the arrow keys currently drive.
pub enum Focus {
    World,
    BattleMenu { cursor: usize },
    SkillMenu { cursor: usize },
    ItemMenu { cursor: usize },
}

pub struct App {
    pub session: Session<WorldData>,
    pub transcript: Transcript,
    pub focus: Focus,
    pub config: ClientConfig,
    should_quit: bool,
}

impl App {
    pub fn new(session: Session<WorldData>, config: ClientConfig) -> Self {
        Self {
            session,
            transcript: Transcript::default(),
            focus: Focus::World,
            config,
            should_quit: false,
        }
    }

    pub fn run(mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        self.session.start(&mut self.transcript)?;
        self.transcript
            .note("Welcome to Pixel Hero. Arrow keys move; Enter talks.");
        self.sync_focus();

        while !self.should_quit {
            terminal.draw(|frame| ui::render(frame, &self))?;
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key.code)?;
                }
            }
        }
        Ok(())
    }

    /// Skill entries of the hero: id, display name, MP cost.
    pub fn hero_skills(&self) -> Vec<(SkillId, String, u32)> {
        let world = self.session.world();
        let Some(hero) = self.session.state().party.hero() else {
            return Vec::new();
        };
        hero.skills
            .iter()
            .filter_map(|id| {
                let def = world.skill(id)?;
                Some((id.clone(), def.name.clone(), def.mp_cost))
            })
            .collect()
    }

    /// Carried consumables: id, display name, quantity.
    pub fn consumables(&self) -> Vec<(ItemId, String, u32)> {
        let world = self.session.world();
        self.session
            .state()
            .inventory
            .iter()
            .filter_map(|stack| {
                let def = world.item(&stack.item)?;
                matches!(def.kind, ItemKind::Consumable { .. })
                    .then(|| (stack.item.clone(), def.name.clone(), stack.qty))
            })
            .collect()
    }

    fn handle_key(&mut self, code: KeyCode) -> Result<()> {
        match self.focus {
            Focus::World => self.handle_world_key(code)?,
            _ => self.handle_menu_key(code)?,
        }
        self.sync_focus();
        Ok(())
    }

    fn handle_world_key(&mut self, code: KeyCode) -> Result<()> {
        match self.session.mode().clone() {
            SessionMode::Ended(_) => {
                if matches!(code, KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter) {
                    self.should_quit = true;
                }
            }
            SessionMode::Dialogue => {
                if matches!(
                    code,
                    KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('z')
                ) {
                    let result = self.session.acknowledge(&mut self.transcript);
                    self.digest(result)?;
                }
            }
            SessionMode::Exploring => match code {
                KeyCode::Up | KeyCode::Char('w') => self.step(Direction::Up)?,
                KeyCode::Down | KeyCode::Char('s') => self.step(Direction::Down)?,
                KeyCode::Left | KeyCode::Char('a') => self.step(Direction::Left)?,
                KeyCode::Right | KeyCode::Char('d') => self.step(Direction::Right)?,
                KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('z') => {
                    let result = self.session.interact(&mut self.transcript);
                    if let Some(false) = self.digest(result)? {
                        self.transcript.note("There is nothing here.");
                    }
                }
                KeyCode::Char('i') => self.open_item_menu(),
                KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
                _ => {}
            },
            // The battle menu owns input while a battle runs.
            SessionMode::Battle => {}
        }
        Ok(())
    }

    fn handle_menu_key(&mut self, code: KeyCode) -> Result<()> {
        match code {
            KeyCode::Up => self.move_cursor(-1),
            KeyCode::Down => self.move_cursor(1),
            KeyCode::Esc => self.close_menu(),
            KeyCode::Enter | KeyCode::Char('z') => self.confirm_menu()?,
            _ => {}
        }
        Ok(())
    }

    fn move_cursor(&mut self, delta: isize) {
        let len = match &self.focus {
            Focus::World => return,
            Focus::BattleMenu { .. } => BATTLE_MENU.len(),
            Focus::SkillMenu { .. } => self.hero_skills().len(),
            Focus::ItemMenu { .. } => self.consumables().len(),
        };
        if len == 0 {
            return;
        }
        if let Focus::BattleMenu { cursor }
        | Focus::SkillMenu { cursor }
        | Focus::ItemMenu { cursor } = &mut self.focus
        {
            *cursor = (*cursor as isize + delta).rem_euclid(len as isize) as usize;
        }
    }

    fn close_menu(&mut self) {
        self.focus = match self.focus {
            Focus::SkillMenu { .. } | Focus::ItemMenu { .. }
                if self.session.mode() == &SessionMode::Battle =>
            {
                Focus::BattleMenu { cursor: 0 }
            }
            _ => Focus::World,
        };
    }

    fn confirm_menu(&mut self) -> Result<()> {
        match self.focus {
            Focus::World => Ok(()),
            Focus::BattleMenu { cursor } => match cursor {
                0 => self.battle_command(PlayerCommand::Attack),
                1 => {
                    if self.hero_skills().is_empty() {
                        self.transcript.note("No skills learned.");
                    } else {
                        self.focus = Focus::SkillMenu { cursor: 0 };
                    }
                    Ok(())
                }
                2 => {
                    self.open_item_menu();
                    Ok(())
                }
                _ => self.battle_command(PlayerCommand::Defend),
            },
            Focus::SkillMenu { cursor } => {
                let Some((skill, _, _)) = self.hero_skills().into_iter().nth(cursor) else {
                    return Ok(());
                };
                self.battle_command(PlayerCommand::Skill(skill))
            }
            Focus::ItemMenu { cursor } => {
                let Some((item, _, _)) = self.consumables().into_iter().nth(cursor) else {
                    return Ok(());
                };
                if self.session.mode() == &SessionMode::Battle {
                    self.battle_command(PlayerCommand::UseItem(item))
                } else {
                    let result = self.session.use_item(&item);
                    if let Some(report) = self.digest(result)? {
                        self.transcript.note(format!(
                            "Used {}: +{} HP, +{} MP.",
                            report.item_name, report.healed_hp, report.restored_mp
                        ));
                    }
                    self.focus = Focus::World;
                    Ok(())
                }
            }
        }
    }

    fn open_item_menu(&mut self) {
        if self.consumables().is_empty() {
            self.transcript.note("No usable items.");
        } else {
            self.focus = Focus::ItemMenu { cursor: 0 };
        }
    }

    fn step(&mut self, direction: Direction) -> Result<()> {
        let result = self.session.move_player(direction, &mut self.transcript);
        self.digest(result)?;
        Ok(())
    }

    fn battle_command(&mut self, command: PlayerCommand) -> Result<()> {
        let result = self.session.battle_command(command, &mut self.transcript);
        if self.digest(result)?.is_some() {
            self.focus = Focus::BattleMenu { cursor: 0 };
        }
        Ok(())
    }

    /// Recoverable refusals become log lines; everything else aborts.
    fn digest<T>(&mut self, result: runtime::Result<T>) -> Result<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.is_recoverable() => {
                self.transcript.note(err.to_string());
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Keeps the focused list consistent with the session mode.
    fn sync_focus(&mut self) {
        match self.session.mode() {
            SessionMode::Battle => {
                if matches!(self.focus, Focus::World) {
                    self.focus = Focus::BattleMenu { cursor: 0 };
                }
            }
            SessionMode::Exploring => {
                if matches!(
                    self.focus,
                    Focus::BattleMenu { .. } | Focus::SkillMenu { .. }
                ) {
                    self.focus = Focus::World;
                }
            }
            SessionMode::Dialogue | SessionMode::Ended(_) => {
                self.focus = Focus::World;
            }
        }
    }
}
