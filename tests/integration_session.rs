use assert_matches::assert_matches;

use kanatype::batch::Batch;
use kanatype::session::{Phase, Session, SessionConfig};
use kanatype::token::Token;

fn pool(words: &[&str]) -> Vec<Token> {
    words.iter().map(|w| Token::Plain(w.to_string())).collect()
}

/// Deliver the romaji keystroke by keystroke as full-buffer replacement
/// events, mirroring the clamped buffer back like a real host.
fn type_word(session: &mut Session, romaji: &str) {
    let mut buffer = String::new();
    for c in romaji.chars() {
        buffer.push(c);
        session.on_input(&buffer);
        buffer = session.raw_input().to_string();
    }
}

fn romaji_for(target: &str) -> &'static str {
    match target {
        "ねこ" => "neko",
        "いぬ" => "inu",
        other => panic!("unexpected target {other}"),
    }
}

// The end-to-end scenario: pool = ["neko", "inu"], batch size 2, 5 seconds,
// relaxed. One word typed, then the clock runs out.
#[test]
fn end_to_end_timed_session() {
    let config = SessionConfig {
        initial_secs: 5,
        batch_size: 2,
        strict: false,
        ..SessionConfig::default()
    };
    let mut session = Session::new(pool(&["ねこ", "いぬ"]), config).unwrap();

    session.start();
    assert_matches!(session.phase(), Phase::Running);
    assert_eq!(session.batch().len(), 2);

    let target = session.active_target().unwrap().to_string();
    type_word(&mut session, romaji_for(&target));
    assert_eq!(session.score(), 1);
    assert_eq!(session.batch().cursor(), 1);

    for _ in 0..5 {
        session.on_tick();
    }
    assert_matches!(session.phase(), Phase::Over);
    assert_eq!(session.secs_remaining(), 0);
    // 1 word in 5 seconds of a 5-second game: 12 wpm
    assert_eq!(session.wpm(), 12);

    // input after game over changes nothing
    session.on_input("inu");
    assert_eq!(session.score(), 1);
}

#[test]
fn restart_after_game_over() {
    let config = SessionConfig {
        initial_secs: 3,
        batch_size: 2,
        strict: false,
        ..SessionConfig::default()
    };
    let mut session = Session::new(pool(&["ねこ", "いぬ"]), config).unwrap();

    session.start();
    let target = session.active_target().unwrap().to_string();
    type_word(&mut session, romaji_for(&target));
    for _ in 0..3 {
        session.on_tick();
    }
    assert_matches!(session.phase(), Phase::Over);

    session.reset();
    assert_matches!(session.phase(), Phase::Idle);

    session.start();
    assert_matches!(session.phase(), Phase::Running);
    assert_eq!(session.score(), 0);
    assert_eq!(session.secs_remaining(), 3);
    assert!(!session.batch().is_empty());
}

#[test]
fn batches_rotate_through_a_long_game() {
    let words = ["ねこ", "いぬ"];
    let config = SessionConfig {
        initial_secs: 60,
        batch_size: 2,
        strict: false,
        ..SessionConfig::default()
    };
    let mut session = Session::new(pool(&words), config).unwrap();
    session.start();

    // finish several full batches; the session must keep producing targets
    for _ in 0..10 {
        let target = session.active_target().expect("active target").to_string();
        type_word(&mut session, romaji_for(&target));
    }
    assert_eq!(session.score(), 10);
    assert_matches!(session.phase(), Phase::Running);
}

#[test]
fn batch_draw_invariants_hold_over_many_draws() {
    let tokens = pool(&["あ", "い", "う", "え", "お", "か", "き", "く", "け", "こ"]);
    let mut rng = rand::thread_rng();
    let mut previous = Batch::empty();

    for _ in 0..100 {
        let batch = Batch::draw(&tokens, 4, &previous, &mut rng);
        assert!(batch.len() >= 1 && batch.len() <= 4);
        // 10 tokens minus 4 previous leaves 6 eligible, enough to exclude
        for item in batch.items() {
            assert!(
                !previous.items().iter().any(|p| p.token == item.token),
                "immediate repeat despite sufficient pool"
            );
        }
        previous = batch;
    }
}

#[test]
fn kanji_pool_end_to_end() {
    use kanatype::provider::{KanjiProvider, TargetProvider};

    let pool = KanjiProvider::embedded().load_pool().unwrap();
    let config = SessionConfig {
        initial_secs: 120,
        batch_size: 5,
        strict: false,
        ..SessionConfig::default()
    };
    let mut session = Session::new(pool, config).unwrap();
    session.start();

    assert_eq!(session.batch().len(), 5);
    // every drawn target is non-empty kana, never raw romaji
    for item in session.batch().items() {
        assert!(!item.target.is_empty());
        assert!(item.target.chars().all(|c| !c.is_ascii_alphabetic()));
    }
}
