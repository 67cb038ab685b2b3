//! End-to-end quiz session behaviour

use std::sync::Arc;
use std::time::Duration;

use quizterm::app::{Controller, InputAction};
use quizterm::audio::SilentBackend;
use quizterm::quiz::{
    AdvanceOutcome, Phase, Question, QuestionBank, QuizSession, ResultBand, Screen, ScoreBands,
    SubmitOutcome,
};

fn bank(correct: &[usize]) -> Arc<QuestionBank> {
    let questions = correct
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            Question::new(
                format!("Question {}", i + 1),
                vec!["first".to_string(), "second".to_string()],
                c,
            )
            .unwrap()
        })
        .collect();
    Arc::new(QuestionBank::new(questions).unwrap())
}

#[test]
fn test_two_question_perfect_run() {
    let bank = bank(&[0, 1]);
    let mut session = QuizSession::new(bank.clone(), ScoreBands::for_total(bank.len()));

    assert!(session.begin());
    session.submit_answer(0).unwrap();
    assert_eq!(session.advance(), AdvanceOutcome::NextQuestion(1));
    session.submit_answer(1).unwrap();
    assert_eq!(session.advance(), AdvanceOutcome::Finished);

    assert_eq!(session.state().score, 2);
    assert_eq!(session.band(), Some(ResultBand::Perfect));
}

#[test]
fn test_builtin_bank_all_correct_scores_ten() {
    let bank = Arc::new(QuestionBank::builtin());
    let mut session = QuizSession::new(bank.clone(), ScoreBands::for_total(bank.len()));
    session.begin();

    for (i, question) in bank.all().iter().enumerate() {
        let outcome = session.submit_answer(question.correct_index()).unwrap();
        assert!(matches!(outcome, SubmitOutcome::Revealed { correct: true, .. }));
        assert_eq!(session.state().score, i + 1);
        session.advance();
    }

    assert_eq!(session.state().phase, Phase::Finished);
    assert_eq!(session.state().score, 10);
    assert_eq!(session.band(), Some(ResultBand::Perfect));
}

#[test]
fn test_builtin_bank_band_boundaries() {
    let bands = ScoreBands::for_total(QuestionBank::builtin().len());
    assert_eq!(bands.band_for(0).index(), 0);
    assert_eq!(bands.band_for(4).index(), 1);
    assert_eq!(bands.band_for(9).index(), 2);
    assert_eq!(bands.band_for(10).index(), 3);
}

#[test]
fn test_score_never_exceeds_question_count() {
    let bank = bank(&[0, 0, 0]);
    let mut session = QuizSession::new(bank, ScoreBands::for_total(3));
    session.begin();
    for _ in 0..10 {
        session.submit_answer(0).unwrap();
        session.submit_answer(0).unwrap();
        session.advance();
    }
    assert_eq!(session.state().score, 3);
    assert_eq!(session.state().phase, Phase::Finished);
}

#[test]
fn test_invalid_bank_prevents_session() {
    let err = Question::new(
        "Broken",
        vec!["a".to_string(), "b".to_string(), "c".to_string()],
        5,
    );
    assert!(err.is_err());

    let json = r#"[{"text": "Broken", "answers": ["a", "b", "c"], "correctIndex": 5}]"#;
    assert!(QuestionBank::from_json_str(json).is_err());
}

#[tokio::test(start_paused = true)]
async fn test_timed_flow_through_controller() {
    let bank = bank(&[0, 1]);
    let bands = ScoreBands::for_total(bank.len());
    let mut controller = Controller::new(
        bank,
        bands,
        Duration::from_millis(1500),
        Box::new(SilentBackend),
    );

    controller.handle_action(InputAction::Select);
    controller.handle_action(InputAction::Choose(0));
    // Input during the reveal must not double count
    controller.handle_action(InputAction::Choose(0));
    assert_eq!(controller.session().state().score, 1);

    tokio::time::sleep(Duration::from_millis(1000)).await;
    controller.drain_advances();
    assert_eq!(controller.session().state().phase, Phase::AnswerRevealed);

    tokio::time::sleep(Duration::from_millis(600)).await;
    controller.drain_advances();
    assert_eq!(controller.session().state().current_index, 1);
    assert_eq!(controller.session().state().phase, Phase::AwaitingAnswer);

    controller.handle_action(InputAction::Choose(1));
    assert_eq!(controller.next_advance().await, Some(AdvanceOutcome::Finished));

    let snapshot = controller.session().snapshot();
    assert_eq!(snapshot.screen, Screen::Result);
    assert_eq!(snapshot.score, 2);
    assert_eq!(snapshot.band, Some(ResultBand::Perfect));
}

#[tokio::test(start_paused = true)]
async fn test_fast_restart_ignores_stale_timer() {
    let bank = bank(&[0, 0]);
    let bands = ScoreBands::for_total(bank.len());
    let mut controller = Controller::new(
        bank,
        bands,
        Duration::from_millis(1500),
        Box::new(SilentBackend),
    );

    controller.handle_action(InputAction::Select);
    controller.handle_action(InputAction::Choose(0));
    controller.handle_action(InputAction::Back);
    controller.handle_action(InputAction::Select);
    controller.handle_action(InputAction::Choose(1));

    tokio::time::sleep(Duration::from_millis(1600)).await;
    controller.drain_advances();

    // Only the second run's timer advanced the session, exactly once
    let state = controller.session().state();
    assert_eq!(state.current_index, 1);
    assert_eq!(state.score, 0);
    assert_eq!(state.phase, Phase::AwaitingAnswer);
}
