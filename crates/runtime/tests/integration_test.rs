use game_content::rescue_the_princess;
use game_core::world::EndingDefinition;
use game_core::{
    BattleEvent, Direction, FlagId, GameConfig, ItemId, PlayerCommand, QuestCompletion,
    SessionState, VictorySummary,
};
use runtime::{
    BattleView, EndState, MoveOutcome, Presenter, RuntimeError, Session, SessionMode,
};

/// Presenter that records everything the session reports, so the tests
/// can assert on the play-by-play after the fact.
#[derive(Default)]
struct Recording {
    dialogues: Vec<String>,
    battles_started: usize,
    rounds: usize,
    victories: Vec<VictorySummary>,
    quests: Vec<String>,
    endings: Vec<String>,
    game_overs: usize,
}

impl Presenter for Recording {
    fn dialogue(&mut self, speaker: Option<&str>, text: &str) {
        match speaker {
            Some(name) => self.dialogues.push(format!("{name}: {text}")),
            None => self.dialogues.push(text.to_owned()),
        }
    }

    fn battle_started(&mut self, _view: &BattleView) {
        self.battles_started += 1;
    }

    fn battle_round(&mut self, _events: &[BattleEvent], _view: &BattleView) {
        self.rounds += 1;
    }

    fn victory(&mut self, summary: &VictorySummary) {
        self.victories.push(summary.clone());
    }

    fn quest_completed(&mut self, completion: &QuestCompletion) {
        self.quests.push(completion.name.clone());
    }

    fn ending(&mut self, ending: &EndingDefinition) {
        self.endings.push(ending.title.clone());
    }

    fn game_over(&mut self) {
        self.game_overs += 1;
    }
}

type CampaignSession = Session<game_content::WorldData>;

/// Acknowledges dialogue lines and attacks through battles until the
/// session is back to exploring (or has ended).
fn settle_ui(session: &mut CampaignSession, presenter: &mut Recording) {
    for _ in 0..500 {
        match session.mode().clone() {
            SessionMode::Dialogue => {
                session
                    .acknowledge(presenter)
                    .expect("acknowledge should succeed");
            }
            SessionMode::Battle => {
                session
                    .battle_command(PlayerCommand::Attack, presenter)
                    .expect("attack should resolve");
            }
            SessionMode::Exploring | SessionMode::Ended(_) => return,
        }
    }
    panic!("session never settled; stuck in {:?}", session.mode());
}

/// Walks `steps` tiles in `direction`, resolving any dialogue or
/// random encounter each step triggers. Panics if a step is blocked.
fn walk(
    session: &mut CampaignSession,
    presenter: &mut Recording,
    direction: Direction,
    steps: u32,
) {
    for _ in 0..steps {
        let outcome = session
            .move_player(direction, presenter)
            .expect("movement should succeed");
        assert_ne!(
            outcome,
            MoveOutcome::Blocked,
            "unexpected wall at {:?} going {direction:?}",
            session.position()
        );
        settle_ui(session, presenter);
    }
}

/// Faces a blocked tile (the move is expected to bounce) and interacts
/// with whatever occupies it.
fn face_and_interact(
    session: &mut CampaignSession,
    presenter: &mut Recording,
    direction: Direction,
) {
    let outcome = session
        .move_player(direction, presenter)
        .expect("facing move should succeed");
    assert_eq!(outcome, MoveOutcome::Blocked, "expected an occupied tile");
    let fired = session.interact(presenter).expect("interact should succeed");
    assert!(fired, "no action event on the faced tile");
    settle_ui(session, presenter);
}

/// End-to-End Campaign Playthrough
///
/// A seasoned hero plays "Rescue the Princess" from the village square
/// to the good ending:
/// 1. Talk to the King and the quest-giving villager
/// 2. Travel east and bounce off the locked castle gate
/// 3. Loot the Castle Key from the gatehouse chest
/// 4. Pass the gate, loot the hall chest, climb to the tower
/// 5. Defeat the Dark Knight and rescue the princess
#[test]
fn campaign_playthrough_reaches_the_good_ending() {
    println!("\n══════════════════════════════════════════════════");
    println!("  PIXEL HERO - Campaign Playthrough");
    println!("══════════════════════════════════════════════════\n");

    let world = rescue_the_princess();
    let config = GameConfig::default();

    // A hero with four levels of exp behind them; random encounters on
    // the road stay survivable and the Dark Knight is beatable on
    // attacks alone.
    let mut state = SessionState::new_game(&world).expect("new game");
    state.grant_party_exp(200, &config);
    let mut session = Session::from_state(world, config, state, 0xC0FFEE).expect("session");
    let mut p = Recording::default();
    session.start(&mut p).expect("start");

    assert_eq!(session.mode(), &SessionMode::Exploring);
    assert_eq!(session.map_id().as_str(), "village_01");
    assert_eq!(session.state().party.hero().expect("hero").level, 5);

    println!("PHASE 1: The village - King and quest giver");
    println!("──────────────────────────────────────────────────\n");

    // Spawn (6,10); the King holds court at (6,6).
    walk(&mut session, &mut p, Direction::Up, 3);
    face_and_interact(&mut session, &mut p, Direction::Up);
    assert!(session.state().flags.get(&FlagId::new("met_king")));
    let lines_after_intro = p.dialogues.len();
    assert!(lines_after_intro >= 2, "the King has more than one line");

    // A second audience gets the short reminder, not the intro again.
    face_and_interact(&mut session, &mut p, Direction::Up);
    assert!(p.dialogues.len() > lines_after_intro);

    // The villager at (4,10) hands out the slime hunt.
    walk(&mut session, &mut p, Direction::Down, 3);
    walk(&mut session, &mut p, Direction::Left, 1);
    face_and_interact(&mut session, &mut p, Direction::Left);
    let slime_hunt = game_core::QuestId::new("slime_hunt");
    assert!(
        session.state().quests.is_active(&slime_hunt)
            || session.state().quests.is_completed(&slime_hunt)
    );
    assert!(session.state().flags.get(&FlagId::new("accepted_slime_hunt")));

    println!("PHASE 2: The road east and the locked gate");
    println!("──────────────────────────────────────────────────\n");

    // East exit at (15,8), then castle gate spawn (1,5).
    walk(&mut session, &mut p, Direction::Right, 1);
    walk(&mut session, &mut p, Direction::Up, 2);
    walk(&mut session, &mut p, Direction::Right, 9);
    assert_eq!(session.map_id().as_str(), "castle_entrance");

    // The gate tile (11,5) is an exit gated on the key; without the
    // key the tile is just wall.
    walk(&mut session, &mut p, Direction::Right, 9);
    let bounce = session
        .move_player(Direction::Right, &mut p)
        .expect("gate bounce");
    assert_eq!(bounce, MoveOutcome::Blocked);
    assert!(session.interact(&mut p).expect("gate interact"));
    settle_ui(&mut session, &mut p);
    assert!(
        p.dialogues.iter().any(|line| line.contains("locked")),
        "the gate should refuse entry"
    );

    println!("PHASE 3: The gatehouse chest");
    println!("──────────────────────────────────────────────────\n");

    let castle_key = ItemId::new("castle_key");
    assert_eq!(session.state().inventory.quantity(&castle_key), 0);

    walk(&mut session, &mut p, Direction::Up, 4);
    walk(&mut session, &mut p, Direction::Left, 1);
    face_and_interact(&mut session, &mut p, Direction::Up);
    assert!(session.state().flags.get(&FlagId::new("got_castle_key")));
    assert_eq!(session.state().inventory.quantity(&castle_key), 1);

    // Opening it again finds only an empty chest.
    face_and_interact(&mut session, &mut p, Direction::Up);
    assert_eq!(session.state().inventory.quantity(&castle_key), 1);

    println!("PHASE 4: Through the gate, into the hall");
    println!("──────────────────────────────────────────────────\n");

    walk(&mut session, &mut p, Direction::Down, 4);
    walk(&mut session, &mut p, Direction::Right, 1);
    let through = session
        .move_player(Direction::Right, &mut p)
        .expect("gate passage");
    assert_eq!(through, MoveOutcome::ChangedMap);
    assert_eq!(session.map_id().as_str(), "castle_hall");

    // The hall chest at (7,9) holds spare potions.
    let potion = ItemId::new("potion");
    let potions_before = session.state().inventory.quantity(&potion);
    walk(&mut session, &mut p, Direction::Right, 6);
    walk(&mut session, &mut p, Direction::Down, 3);
    face_and_interact(&mut session, &mut p, Direction::Down);
    assert_eq!(
        session.state().inventory.quantity(&potion),
        potions_before + 2
    );

    println!("PHASE 5: The tower and the Dark Knight");
    println!("──────────────────────────────────────────────────\n");

    walk(&mut session, &mut p, Direction::Up, 6);
    walk(&mut session, &mut p, Direction::Right, 5);
    let to_tower = session
        .move_player(Direction::Right, &mut p)
        .expect("tower stairs");
    assert_eq!(to_tower, MoveOutcome::ChangedMap);
    assert_eq!(session.map_id().as_str(), "castle_tower");

    let battles_before_boss = p.battles_started;
    walk(&mut session, &mut p, Direction::Right, 5);
    walk(&mut session, &mut p, Direction::Up, 1);

    // Stepping onto (7,3) springs the boss. settle_ui acknowledges the
    // challenge, fights the battle, and plays the victory script plus
    // the rescue scene that auto-fires after it.
    let boss_step = session
        .move_player(Direction::Right, &mut p)
        .expect("boss step");
    assert_eq!(boss_step, MoveOutcome::TriggeredEvent);
    settle_ui(&mut session, &mut p);

    println!("PHASE 6: The rescue");
    println!("──────────────────────────────────────────────────\n");

    assert!(p.battles_started > battles_before_boss);
    assert!(session.state().flags.get(&FlagId::new("boss_defeated")));
    assert!(session.state().flags.get(&FlagId::new("princess_rescued")));
    assert_eq!(
        session.mode(),
        &SessionMode::Ended(EndState::Ending(game_core::EndingId::new("good_end")))
    );
    assert_eq!(p.endings.len(), 1);
    assert_eq!(p.game_overs, 0);
    assert!(!p.victories.is_empty());
    let completions: usize = p
        .victories
        .iter()
        .map(|summary| summary.completed_quests.len())
        .sum();
    assert_eq!(p.quests.len(), completions);

    // The Dark Knight always drops his copy of the key.
    assert_eq!(session.state().inventory.quantity(&castle_key), 2);

    // Quest bookkeeping stayed consistent: never active and completed
    // at once.
    let quests = &session.state().quests;
    assert!(!(quests.is_active(&slime_hunt) && quests.is_completed(&slime_hunt)));

    // The session is over; no command is accepted anymore.
    let refused = session.move_player(Direction::Left, &mut p);
    assert!(matches!(refused, Err(RuntimeError::SessionEnded)));

    println!(
        "✓ {} dialogue lines, {} battles, {} rounds",
        p.dialogues.len(),
        p.battles_started,
        p.rounds
    );
    println!("✓ Ending reached: {}\n", p.endings[0]);
}

/// Marching a fresh level-1 hero straight at the Dark Knight ends the
/// run: the boss outlasts an unleveled attacker on every variance roll.
#[test]
fn boss_defeat_at_level_one_is_game_over() {
    let world = rescue_the_princess();
    let config = GameConfig::default();

    let mut state = SessionState::new_game(&world).expect("new game");
    state.flags.set(FlagId::new("got_castle_key"), true);
    // Enough HP to shrug off road encounters; level-1 attack still
    // cannot chew through the boss before his power strikes land.
    let hero = state.party.hero_mut().expect("hero");
    hero.max_hp = 60;
    hero.hp = 60;
    let mut session = Session::from_state(world, config, state, 7).expect("session");
    let mut p = Recording::default();
    session.start(&mut p).expect("start");

    // Village -> castle gate -> hall -> tower.
    walk(&mut session, &mut p, Direction::Up, 2);
    walk(&mut session, &mut p, Direction::Right, 9);
    assert_eq!(session.map_id().as_str(), "castle_entrance");
    walk(&mut session, &mut p, Direction::Right, 10);
    assert_eq!(session.map_id().as_str(), "castle_hall");
    walk(&mut session, &mut p, Direction::Up, 3);
    walk(&mut session, &mut p, Direction::Right, 12);
    assert_eq!(session.map_id().as_str(), "castle_tower");
    walk(&mut session, &mut p, Direction::Right, 5);
    walk(&mut session, &mut p, Direction::Up, 1);

    session
        .move_player(Direction::Right, &mut p)
        .expect("boss step");
    settle_ui(&mut session, &mut p);

    assert_eq!(session.mode(), &SessionMode::Ended(EndState::GameOver));
    assert_eq!(p.game_overs, 1);
    assert!(p.endings.is_empty());
    assert!(session.state().party.hero().expect("hero").is_down());

    let refused = session.interact(&mut p);
    assert!(matches!(refused, Err(RuntimeError::SessionEnded)));
}

/// Exploration commands are refused while a dialogue is on screen, and
/// battle commands are refused while exploring.
#[test]
fn mode_gating_refuses_out_of_turn_commands() {
    let world = rescue_the_princess();
    let mut session = Session::new(world, GameConfig::default(), 99).expect("session");
    let mut p = Recording::default();
    session.start(&mut p).expect("start");

    assert!(matches!(
        session.acknowledge(&mut p),
        Err(RuntimeError::NotInDialogue)
    ));
    assert!(matches!(
        session.battle_command(PlayerCommand::Attack, &mut p),
        Err(RuntimeError::NotInBattle)
    ));

    // Open the King's dialogue, then try to walk away mid-line.
    walk(&mut session, &mut p, Direction::Up, 3);
    let bounced = session
        .move_player(Direction::Up, &mut p)
        .expect("face king");
    assert_eq!(bounced, MoveOutcome::Blocked);
    assert!(session.interact(&mut p).expect("king interact"));
    assert_eq!(session.mode(), &SessionMode::Dialogue);

    assert!(matches!(
        session.move_player(Direction::Down, &mut p),
        Err(RuntimeError::NotExploring)
    ));
    assert!(matches!(
        session.use_item(&ItemId::new("potion")),
        Err(RuntimeError::NotExploring)
    ));
    assert!(matches!(
        session.interact(&mut p),
        Err(RuntimeError::NotExploring)
    ));

    settle_ui(&mut session, &mut p);
    assert_eq!(session.mode(), &SessionMode::Exploring);
}

/// Two sessions with the same seed and the same command script land in
/// identical states, encounters included.
#[test]
fn same_seed_replays_identically() {
    let script = [
        Direction::Up,
        Direction::Down,
        Direction::Up,
        Direction::Down,
        Direction::Up,
        Direction::Down,
        Direction::Up,
        Direction::Down,
        Direction::Up,
        Direction::Down,
    ];

    let mut runs = Vec::new();
    for _ in 0..2 {
        let world = rescue_the_princess();
        let mut session = Session::new(world, GameConfig::default(), 0xDECADE).expect("session");
        let mut p = Recording::default();
        session.start(&mut p).expect("start");
        for direction in script {
            session.move_player(direction, &mut p).expect("step");
            settle_ui(&mut session, &mut p);
        }
        let hero = session.state().party.hero().expect("hero");
        runs.push((
            session.position(),
            hero.level,
            hero.hp,
            hero.exp,
            session.state().gold,
            p.battles_started,
            p.rounds,
        ));
    }

    assert_eq!(runs[0], runs[1]);
}

/// Field item use goes through the same consumable rules as battle.
#[test]
fn field_potion_use_consumes_the_item() {
    let world = rescue_the_princess();
    let mut session = Session::new(world, GameConfig::default(), 3).expect("session");
    let mut p = Recording::default();
    session.start(&mut p).expect("start");

    let potion = ItemId::new("potion");
    let before = session.state().inventory.quantity(&potion);
    assert!(before > 0, "the hero starts with potions");

    // Full HP, so the heal is a no-op but the potion is still spent.
    let report = session.use_item(&potion).expect("potion use");
    assert_eq!(report.healed_hp, 0);
    assert_eq!(session.state().inventory.quantity(&potion), before - 1);

    assert!(matches!(
        session.use_item(&ItemId::new("castle_key")),
        Err(RuntimeError::Item(_))
    ));
}
