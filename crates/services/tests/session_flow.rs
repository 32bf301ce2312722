use std::sync::Arc;

use drill_core::model::{AttemptRecord, Operator, Problem};
use drill_core::{RandomProblemGenerator, SequenceGenerator};
use services::QuizSession;
use storage::{InMemoryStore, KeyValueStore, QuizStore, Storage};

#[tokio::test]
async fn persisted_state_is_restored_with_a_fresh_problem() {
    let mem = InMemoryStore::with_entries([
        ("digit", "2"),
        ("operation", "*"),
        ("score", "5"),
        (
            "history",
            r#"[{"q":"3 * 4","a":"12","correct":true},{"q":"10 * 2","a":"21","correct":false}]"#,
        ),
    ]);

    let session = QuizSession::initialize(
        QuizStore::new(Arc::new(mem.clone())),
        Box::new(SequenceGenerator::new(vec![55, 66])),
    )
    .await
    .unwrap();

    let snapshot = session.snapshot();
    assert_eq!(snapshot.digit_width.get(), 2);
    assert_eq!(snapshot.operator, Operator::Multiply);
    assert_eq!(snapshot.score, 5);
    assert_eq!(
        snapshot.history,
        vec![
            AttemptRecord::new("3 * 4", "12", true),
            AttemptRecord::new("10 * 2", "21", false),
        ]
    );
    assert_eq!(session.problem(), Problem::new(55, 66));
    assert_eq!(snapshot.expression(), "55 * 66");
}

#[tokio::test]
async fn sqlite_session_survives_a_restart() {
    let url = "sqlite:file:memdb_session_restart?mode=memory&cache=shared";
    let storage = Storage::sqlite(url).await.expect("open");

    {
        let mut session = QuizSession::initialize(
            storage.quiz_store(),
            Box::new(SequenceGenerator::new(vec![3, 4, 1, 1, 12, 34])),
        )
        .await
        .unwrap();
        session.set_operator(Operator::Subtract).await;
        session.submit_answer("-1").await.unwrap();
        session.set_digit_width(2).await.unwrap();
        session.submit_answer("0").await.unwrap();
        assert_eq!(session.take_persistence_error(), None);
    }

    let restarted = QuizSession::initialize(
        storage.quiz_store(),
        Box::new(RandomProblemGenerator::seeded(9)),
    )
    .await
    .unwrap();

    let snapshot = restarted.snapshot();
    assert_eq!(snapshot.digit_width.get(), 2);
    assert_eq!(snapshot.operator, Operator::Subtract);
    assert_eq!(snapshot.score, 0);
    assert_eq!(
        snapshot.history,
        vec![
            AttemptRecord::new("3 - 4", "-1", true),
            AttemptRecord::new("12 - 34", "0", false),
        ]
    );
    assert!(snapshot.operand_a <= 99 && snapshot.operand_b <= 99);
}

#[tokio::test]
async fn reset_then_restart_starts_clean() {
    let mem = InMemoryStore::new();
    let mut session = QuizSession::initialize(
        QuizStore::new(Arc::new(mem.clone())),
        Box::new(RandomProblemGenerator::seeded(1)),
    )
    .await
    .unwrap();
    session.submit_answer("not a number").await.unwrap();
    session.reset().await;

    assert_eq!(mem.load("score").await.unwrap(), None);
    assert_eq!(mem.load("history").await.unwrap(), None);

    let restarted = QuizSession::initialize(
        QuizStore::new(Arc::new(mem)),
        Box::new(RandomProblemGenerator::seeded(2)),
    )
    .await
    .unwrap();
    assert_eq!(restarted.score(), 0);
    assert!(restarted.history().is_empty());
}

#[tokio::test]
async fn snapshot_serializes_for_presentation() {
    let session = QuizSession::initialize(
        Storage::in_memory().quiz_store(),
        Box::new(SequenceGenerator::new(vec![3, 4])),
    )
    .await
    .unwrap();

    let json = serde_json::to_value(session.snapshot()).unwrap();
    assert_eq!(json["operand_a"], 3);
    assert_eq!(json["operand_b"], 4);
    assert_eq!(json["operator"], "+");
    assert_eq!(json["digit_width"], 1);
    assert_eq!(json["score"], 0);
    assert!(json["history"].as_array().unwrap().is_empty());
}
