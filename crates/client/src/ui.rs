//! Ratatui layout and widgets.
//!
//! Pure rendering: every frame is drawn from scratch off the session's
//! current views and the transcript tail. Nothing here mutates state.

use game_core::world::Position;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};
use runtime::SessionMode;

use crate::app::{App, BATTLE_MENU, Focus};
use crate::theme;

pub fn render(frame: &mut Frame, app: &App) {
    let rows = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(8),
        Constraint::Length(app.config.message_panel_height),
    ])
    .split(frame.area());

    header(frame, rows[0], app);
    if app.session.mode() == &SessionMode::Battle {
        battle_panel(frame, rows[1], app);
    } else {
        world_panel(frame, rows[1], app);
    }
    messages(frame, rows[2], app);
}

fn header(frame: &mut Frame, area: Rect, app: &App) {
    let hint = match app.session.mode() {
        SessionMode::Exploring => "arrows move | enter talk | i items | q quit",
        SessionMode::Dialogue => "enter continue",
        SessionMode::Battle => "arrows select | enter confirm | esc back",
        SessionMode::Ended(_) => "q quit",
    };
    let line = Line::from(vec![
        Span::styled("Pixel Hero", theme::title()),
        Span::raw("  "),
        Span::styled(hint, theme::hint()),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn world_panel(frame: &mut Frame, area: Rect, app: &App) {
    let cols =
        Layout::horizontal([Constraint::Min(20), Constraint::Length(26)]).split(area);
    map_panel(frame, cols[0], app);
    sidebar(frame, cols[1], app);
}

fn map_panel(frame: &mut Frame, area: Rect, app: &App) {
    match app.session.map_view() {
        Ok(view) => {
            let npcs: Vec<Position> = view.npcs.iter().map(|npc| npc.at).collect();
            let mut lines = Vec::with_capacity(view.height as usize);
            for y in 0..view.height as i32 {
                let mut spans = Vec::with_capacity(view.width as usize * 2);
                for x in 0..view.width as i32 {
                    let at = Position::new(x, y);
                    let (glyph, style) = if at == view.player {
                        (theme::PLAYER_GLYPH, theme::player())
                    } else if npcs.contains(&at) {
                        (theme::NPC_GLYPH, theme::npc())
                    } else if view.exits.contains(&at) {
                        (theme::EXIT_GLYPH, theme::exit())
                    } else if view.blocked[y as usize][x as usize] {
                        (theme::WALL_GLYPH, theme::wall())
                    } else {
                        (theme::FLOOR_GLYPH, theme::floor())
                    };
                    spans.push(Span::styled(glyph, style));
                    spans.push(Span::raw(" "));
                }
                lines.push(Line::from(spans));
            }
            let block = Block::default().borders(Borders::ALL).title(view.name.clone());
            frame.render_widget(Paragraph::new(lines).block(block), area);
        }
        Err(err) => {
            let block = Block::default().borders(Borders::ALL).title("Map");
            frame.render_widget(Paragraph::new(err.to_string()).block(block), area);
        }
    }
}

fn sidebar(frame: &mut Frame, area: Rect, app: &App) {
    if let Focus::ItemMenu { cursor } = app.focus {
        let items = app.consumables();
        let rows = Layout::vertical([
            Constraint::Min(6),
            Constraint::Length(items.len() as u16 + 2),
        ])
        .split(area);
        party_panel(frame, rows[0], app);
        item_menu(frame, rows[1], &items, cursor);
    } else {
        party_panel(frame, area, app);
    }
}

fn party_panel(frame: &mut Frame, area: Rect, app: &App) {
    let state = app.session.state();
    let mut lines = Vec::new();
    for member in state.party.iter() {
        lines.push(Line::from(Span::styled(
            format!("{}  Lv {}", member.name, member.level),
            theme::title(),
        )));
        lines.push(Line::from(Span::styled(
            format!(" HP {:>3}/{:<3}", member.hp, member.max_hp),
            theme::health(member.hp, member.max_hp),
        )));
        lines.push(Line::from(Span::styled(
            format!(" MP {:>3}/{:<3}", member.mp, member.max_mp),
            theme::mana(member.mp, member.max_mp),
        )));
        lines.push(Line::default());
    }
    lines.push(Line::from(format!("Gold: {}", state.gold)));
    let block = Block::default().borders(Borders::ALL).title("Party");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn battle_panel(frame: &mut Frame, area: Rect, app: &App) {
    let cols =
        Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);

    let Some(view) = app.session.battle_view() else {
        let block = Block::default().borders(Borders::ALL).title("Battle");
        frame.render_widget(Paragraph::new("...").block(block), cols[0]);
        return;
    };

    let mut lines = Vec::new();
    for enemy in &view.enemies {
        let style = theme::health(enemy.hp, enemy.max_hp);
        if enemy.hp == 0 {
            lines.push(Line::from(Span::styled(
                format!("{}  (down)", enemy.name),
                theme::hint(),
            )));
        } else {
            lines.push(Line::from(vec![
                Span::raw(format!("{}  ", enemy.name)),
                Span::styled(format!("HP {:>3}/{:<3}", enemy.hp, enemy.max_hp), style),
            ]));
        }
    }
    let block = Block::default().borders(Borders::ALL).title(view.name.clone());
    frame.render_widget(Paragraph::new(lines).block(block), cols[0]);

    let menu_height = match &app.focus {
        Focus::BattleMenu { .. } => BATTLE_MENU.len() as u16 + 2,
        Focus::SkillMenu { .. } => app.hero_skills().len() as u16 + 2,
        Focus::ItemMenu { .. } => app.consumables().len() as u16 + 2,
        Focus::World => 3,
    };
    let rows =
        Layout::vertical([Constraint::Min(6), Constraint::Length(menu_height)]).split(cols[1]);
    party_panel(frame, rows[0], app);

    match &app.focus {
        Focus::BattleMenu { cursor } => {
            let entries: Vec<String> = BATTLE_MENU.iter().map(|s| s.to_string()).collect();
            menu(frame, rows[1], "Command", &entries, *cursor);
        }
        Focus::SkillMenu { cursor } => {
            let entries: Vec<String> = app
                .hero_skills()
                .iter()
                .map(|(_, name, mp)| format!("{name} ({mp} MP)"))
                .collect();
            menu(frame, rows[1], "Skills", &entries, *cursor);
        }
        Focus::ItemMenu { cursor } => {
            let items = app.consumables();
            item_menu(frame, rows[1], &items, *cursor);
        }
        Focus::World => {}
    }
}

fn item_menu(
    frame: &mut Frame,
    area: Rect,
    items: &[(game_core::ItemId, String, u32)],
    cursor: usize,
) {
    let entries: Vec<String> = items
        .iter()
        .map(|(_, name, qty)| format!("{name} x{qty}"))
        .collect();
    menu(frame, area, "Items", &entries, cursor);
}

fn menu(frame: &mut Frame, area: Rect, title: &str, entries: &[String], cursor: usize) {
    let items: Vec<ListItem> = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let item = ListItem::new(entry.clone());
            if index == cursor {
                item.style(theme::selected())
            } else {
                item
            }
        })
        .collect();
    let block = Block::default().borders(Borders::ALL).title(title.to_owned());
    frame.render_widget(List::new(items).block(block), area);
}

fn messages(frame: &mut Frame, area: Rect, app: &App) {
    let capacity = area.height.saturating_sub(2) as usize;
    let recent: Vec<&str> = app.transcript.lines().rev().take(capacity).collect();
    let lines: Vec<Line> = recent
        .into_iter()
        .rev()
        .map(|line| Line::from(line.to_owned()))
        .collect();
    let block = Block::default().borders(Borders::ALL).title("Log");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
