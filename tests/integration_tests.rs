// Integration tests for the termo-solver application
// These tests verify that all modules work together correctly

use std::fs;
use termo_solver::cli::CliInterface;
use termo_solver::*;

fn word(s: &str) -> Word {
    Word::parse(s).unwrap()
}

fn scenario_corpus() -> Corpus {
    Corpus::from_words(["bater", "carta", "porta", "festa", "manta"].iter().map(|s| word(s)))
        .unwrap()
}

fn seeded_config(seed: u64) -> SolverConfig {
    let mut config = SolverConfig::with_defaults().unwrap();
    config.seed = Some(seed);
    config
}

#[test]
fn test_end_to_end_session_output() {
    let corpus = scenario_corpus();
    let config = seeded_config(1);
    let presentation = PresentationConfig {
        mode: DisplayMode::Symbols,
        show_secret: true,
    };
    let mut interface = CliInterface::new(Vec::new(), presentation);

    let outcomes = play_games(&corpus, &config, Some(word("porta")), 1, &mut interface).unwrap();
    assert_eq!(outcomes, vec![Outcome::Solved { attempts: 3 }]);

    let output = String::from_utf8(interface.into_inner()).unwrap();
    assert!(output.contains("5 words loaded. The solver has 6 attempts."));
    assert!(output.contains("(The secret word is 'PORTA')"));
    assert!(output.contains("Solver guessed: ACELO (opening probe)"));
    assert!(output.contains("Solver guessed: SUMIR (opening probe)"));
    assert!(output.contains("Solver guessed: PORTA (only candidate left)"));
    assert!(output.contains("SOLVER GUESSED THE WORD IN 3!"));
    assert!(!output.contains("Warning"));
}

#[test]
fn test_manual_pipeline_matches_session() {
    // Drive evaluator, model and filter by hand for the same game
    let corpus = scenario_corpus();
    let secret = word("porta");
    let mut model = ConstraintModel::new();

    let first = Feedback::evaluate(&word("acelo"), &secret);
    assert_eq!(first.pattern(), "YXXXY");
    model.update(&first);
    let candidates = filter_candidates(corpus.words(), &model).unwrap();
    assert_eq!(candidates, vec![word("porta")]);

    let second = Feedback::evaluate(&word("sumir"), &secret);
    assert_eq!(second.pattern(), "XXXXY");
    model.update(&second);
    assert_eq!(filter_candidates(&candidates, &model).unwrap(), vec![word("porta")]);
}

#[test]
fn test_duplicate_letters_in_guess() {
    let feedback = Feedback::evaluate_str("sassy", "glass").unwrap();
    assert_eq!(
        feedback.statuses(),
        &[
            LetterStatus::Present,
            LetterStatus::Present,
            LetterStatus::Absent,
            LetterStatus::Correct,
            LetterStatus::Absent,
        ]
    );

    // Two of the three s's are positive and the third is absent: exactly two
    let mut model = ConstraintModel::new();
    model.update(&feedback);
    assert_eq!(model.min_count(b's'), 2);
    assert_eq!(model.exact_counts().unwrap().get(&b's'), Some(&2));
    assert!(is_consistent(&word("glass"), &model).unwrap());
}

#[test]
fn test_exact_count_excludes_extra_copies() {
    let mut model = ConstraintModel::new();
    model.update(&Feedback::evaluate(&word("roraz"), &word("carta")));

    assert_eq!(model.exact_counts().unwrap().get(&b'r'), Some(&1));
    assert!(is_consistent(&word("carta"), &model).unwrap());
    assert!(!is_consistent(&word("carro"), &model).unwrap());
}

#[test]
fn test_min_count_without_absent_copy() {
    // Both r's in carro come back positive, so only a lower bound is known
    let mut model = ConstraintModel::new();
    let feedback = Feedback::evaluate(&word("roraz"), &word("carro"));
    model.update(&feedback);

    assert_eq!(model.min_count(b'r'), 2);
    assert_eq!(model.exact_counts().unwrap().get(&b'r'), None);
    assert!(is_consistent(&word("carro"), &model).unwrap());
}

#[test]
fn test_secret_always_survives_filtering() {
    let corpus = Corpus::embedded().unwrap();
    let probes: Vec<Word> = corpus.words().iter().step_by(7).copied().collect();

    for secret in corpus.words().iter().step_by(11) {
        let mut model = ConstraintModel::new();
        for guess in probes.iter().take(6) {
            model.update(&Feedback::evaluate(guess, secret));
            assert!(
                is_consistent(secret, &model).unwrap(),
                "{secret} rejected after guessing {guess}"
            );
        }
    }
}

#[test]
fn test_candidate_set_only_shrinks() {
    let corpus = Corpus::embedded().unwrap();
    let secret = word("porta");
    let mut model = ConstraintModel::new();
    let mut candidates = corpus.words().to_vec();

    for guess in ["acelo", "sumir", "carta", "festa"] {
        model.update(&Feedback::evaluate(&word(guess), &secret));
        let next = filter_candidates(&candidates, &model).unwrap();
        assert!(next.len() <= candidates.len());
        assert!(next.iter().all(|w| candidates.contains(w)));
        assert!(next.contains(&secret));
        candidates = next;
    }
}

#[test]
fn test_openers_fixed_for_every_seed() {
    let corpus = Corpus::embedded().unwrap();
    for seed in 0..10 {
        let strategy = StrategyKind::Random.build(Some(seed));
        let mut selector = GuessSelector::new(
            [word("acelo"), word("sumir")],
            strategy,
        );
        assert_eq!(selector.select(0, corpus.words(), &corpus), Selection::Opening(word("acelo")));
        assert_eq!(selector.select(1, corpus.words(), &corpus), Selection::Opening(word("sumir")));
    }
}

#[test]
fn test_game_from_word_list_file() {
    let path = std::env::temp_dir().join(format!("termo-solver-it-{}.txt", std::process::id()));
    fs::write(&path, "Órgão\nporta\nCARTA\nfesta\nbolo\nmanta\n\nporta\n").unwrap();

    let corpus = Corpus::load_from_file(&path).unwrap();
    fs::remove_file(&path).ok();

    assert_eq!(corpus.len(), 5);
    assert!(corpus.contains(&word("orgao")));

    let mut summary = BatchSummary::new();
    let config = seeded_config(3);
    let outcomes = play_games(&corpus, &config, Some(word("orgao")), 1, &mut summary).unwrap();
    assert!(outcomes[0].is_solved());
    assert_eq!(summary.solved, 1);
    assert_eq!(summary.anomalies, 0);
}

#[test]
fn test_missing_word_list_file() {
    let result = Corpus::load_from_file("/nonexistent/termo-solver/words.txt");
    assert!(matches!(result, Err(SolverError::Io { .. })));
}

#[test]
fn test_batch_over_embedded_corpus() {
    let corpus = Corpus::embedded().unwrap();
    let config = seeded_config(2024);

    let mut summary = BatchSummary::new();
    let outcomes = play_games(&corpus, &config, None, 25, &mut summary).unwrap();

    assert_eq!(outcomes.len(), 25);
    assert_eq!(summary.games, 25);
    assert_eq!(summary.solved + summary.exhausted, 25);
    assert_eq!(summary.histogram.values().sum::<usize>(), summary.solved);
    // Secrets come from the corpus, so the filter never empties
    assert_eq!(summary.anomalies, 0);

    let report = summary.to_string();
    assert!(report.contains("Games played: 25"));
}

#[test]
fn test_batch_is_reproducible_with_seed() {
    let corpus = Corpus::embedded().unwrap();
    let config = seeded_config(77);

    let first = play_games(&corpus, &config, None, 10, &mut BatchSummary::new()).unwrap();
    let second = play_games(&corpus, &config, None, 10, &mut BatchSummary::new()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_secret_outside_corpus_reports_anomaly() {
    let corpus = scenario_corpus();
    let config = seeded_config(5);
    let presentation = PresentationConfig {
        mode: DisplayMode::Symbols,
        show_secret: false,
    };
    let mut interface = CliInterface::new(Vec::new(), presentation);

    let outcomes = play_games(&corpus, &config, Some(word("torta")), 1, &mut interface).unwrap();
    assert!(matches!(outcomes[0], Outcome::Exhausted { .. }));

    let output = String::from_utf8(interface.into_inner()).unwrap();
    assert!(output.contains("Warning: no possible words remain at attempt 4"));
    assert!(output.contains("Solver used all attempts!"));
    assert!(output.contains("The secret word was: TORTA"));
}

#[test]
fn test_conflicting_history_is_an_error() {
    let mut model = ConstraintModel::new();
    model.update(&Feedback::from_pattern(word("roraz"), "XXGXX").unwrap());
    model.update(&Feedback::from_pattern(word("errar"), "XGGXX").unwrap());

    let result = filter_candidates(&[word("carta")], &model);
    assert!(matches!(
        result,
        Err(SolverError::ExactCountConflict { letter: 'r', .. })
    ));
}
