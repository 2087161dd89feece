use gemscout::protocol::parse_turn;
use gemscout::turn_log::Reason;
use gemscout::{Brain, Config, Move};

/// One turn in a 7x3 corridor walled above and below
fn corridor_turn(tick: u32, bot: (i32, i32), gem_ttl: u32) -> String {
    let walls: Vec<String> = (0..7).flat_map(|x| [format!("[{},0]", x), format!("[{},2]", x)]).collect();
    let floor: Vec<String> = (0..7).map(|x| format!("[{},1]", x)).collect();
    format!(
        r#"{{"config":{{"stage_key":"corridor","width":7,"height":3,"vis_radius":5,"bot_seed":7}},
            "tick":{},"bot":[{},{}],"wall":[{}],"floor":[{}],
            "visible_gems":[{{"position":[4,1],"ttl":{}}}]}}"#,
        tick,
        bot.0,
        bot.1,
        walls.join(","),
        floor.join(","),
        gem_ttl
    )
}

#[test]
fn test_bot_walks_to_gem_and_forgets_it() {
    let first = parse_turn(&corridor_turn(0, (1, 1), 20)).unwrap();
    let mut brain = Brain::new(first.config.clone(), &Config::default());

    let mut bot = (1, 1);
    for tick in 0..3 {
        let turn = parse_turn(&corridor_turn(tick, bot, 20 - tick)).unwrap();
        let decision = brain.decide(&turn).unwrap();
        assert_eq!(decision.reason, Reason::Gem, "tick {}", tick);
        assert_eq!(decision.target, Some((4, 1)));
        assert_eq!(decision.mv, Move::East);

        let (dx, dy) = decision.mv.delta();
        bot = (bot.0 + dx, bot.1 + dy);
    }
    assert_eq!(bot, (4, 1));

    // Standing on the gem collects it
    let turn = parse_turn(&corridor_turn(3, bot, 17)).unwrap();
    let decision = brain.decide(&turn).unwrap();
    assert!(brain.map().gems().is_empty());
    assert_ne!(decision.reason, Reason::Gem);
}

#[test]
fn test_fully_known_corridor_is_cached() {
    let turn = parse_turn(&corridor_turn(0, (1, 1), 20)).unwrap();
    let mut brain = Brain::new(turn.config.clone(), &Config::default());
    let decision = brain.decide(&turn).unwrap();

    // Radius 5 from (1,1) covers x = 0..=5 of the corridor row
    assert_eq!(decision.visible_cells, 6);
    assert!(brain.engine().is_cached(1, 1, 5));
}

#[test]
fn test_bad_line_is_protocol_error() {
    let err = parse_turn("{\"tick\": ").unwrap_err();
    assert!(err.to_string().to_lowercase().contains("protocol"), "{}", err);
}
