use super::*;
use shared::domain::{CellState, GameState};
use shared::protocol::{CellUpdate, GameSummary};
use tokio::io::{duplex, split, AsyncBufReadExt, AsyncWriteExt, BufReader, DuplexStream, ReadHalf,
    WriteHalf};

struct FakeEngine {
    lines: tokio::io::Lines<BufReader<ReadHalf<DuplexStream>>>,
    writer: WriteHalf<DuplexStream>,
}

impl FakeEngine {
    fn connect() -> (Arc<EngineClient>, Self) {
        let (client_io, engine_io) = duplex(16 * 1024);
        let (client_read, client_write) = split(client_io);
        let (engine_read, engine_write) = split(engine_io);
        let client = EngineClient::from_io(client_read, client_write);
        let engine = Self {
            lines: BufReader::new(engine_read).lines(),
            writer: engine_write,
        };
        (client, engine)
    }

    async fn next_request(&mut self) -> RequestFrame {
        let line = self
            .lines
            .next_line()
            .await
            .expect("engine read failed")
            .expect("engine side saw eof");
        serde_json::from_str(&line).expect("client sent malformed frame")
    }

    async fn send_line(&mut self, line: &str) {
        self.writer.write_all(line.as_bytes()).await.unwrap();
        self.writer.write_all(b"\n").await.unwrap();
        self.writer.flush().await.unwrap();
    }

    async fn reply_ok(&mut self, id: u64, result: serde_json::Value) {
        let line = serde_json::to_string(&serde_json::json!({ "id": id, "result": result }))
            .unwrap();
        self.send_line(&line).await;
    }

    async fn reply_err(&mut self, id: u64, message: &str) {
        let line = serde_json::to_string(&serde_json::json!({ "id": id, "error": message }))
            .unwrap();
        self.send_line(&line).await;
    }
}

#[tokio::test]
async fn serialize_returns_content_synchronously() {
    let (client, mut engine) = FakeEngine::connect();

    let engine_task = tokio::spawn(async move {
        let frame = engine.next_request().await;
        assert!(matches!(frame.request, EngineRequest::Serialize));
        engine.reply_ok(frame.id, serde_json::json!("the-puzzle")).await;
        engine
    });

    assert_eq!(client.serialize().await.unwrap(), "the-puzzle");
    engine_task.await.unwrap();
}

#[tokio::test]
async fn replies_correlate_by_id_even_out_of_order() {
    let (client, mut engine) = FakeEngine::connect();

    let engine_task = tokio::spawn(async move {
        let first = engine.next_request().await;
        let second = engine.next_request().await;
        let (serialize_id, elapsed_id) = match first.request {
            EngineRequest::Serialize => (first.id, second.id),
            _ => (second.id, first.id),
        };
        // Answer in the reverse order of arrival.
        engine.reply_ok(elapsed_id, serde_json::json!(42)).await;
        engine.reply_ok(serialize_id, serde_json::json!("content")).await;
    });

    let (content, elapsed) = tokio::join!(client.serialize(), client.elapsed_seconds());
    assert_eq!(content.unwrap(), "content");
    assert_eq!(elapsed.unwrap(), 42);
    engine_task.await.unwrap();
}

#[tokio::test]
async fn error_reply_surfaces_as_rejected() {
    let (client, mut engine) = FakeEngine::connect();

    let engine_task = tokio::spawn(async move {
        let frame = engine.next_request().await;
        match frame.request {
            EngineRequest::SetValue { row, col, value, counts } => {
                assert_eq!((row, col, value), (0, 0, 5));
                assert!(counts.clue_count && counts.solution_count);
            }
            other => panic!("unexpected request: {other:?}"),
        }
        engine.reply_err(frame.id, "cell is fixed").await;
    });

    let err = client
        .set_value(0, 0, 5, CountFlags::all())
        .await
        .unwrap_err();
    match err {
        EngineError::Rejected(message) => assert_eq!(message, "cell is fixed"),
        other => panic!("expected rejection, got {other:?}"),
    }
    engine_task.await.unwrap();
}

#[tokio::test]
async fn pushes_fan_out_to_subscribers() {
    let (client, mut engine) = FakeEngine::connect();
    let mut events = client.subscribe_events();

    engine
        .send_line(r#"{"type":"cell_update","payload":{"row":3,"col":4,"value":7,"state":"set"}}"#)
        .await;
    engine
        .send_line(r#"{"type":"game_update","payload":{"state":"running","clue_count":30,"solution_count":1}}"#)
        .await;

    let first = events.recv().await.unwrap();
    assert_eq!(
        first,
        EnginePush::CellUpdate(CellUpdate {
            row: 3,
            col: 4,
            value: Some(7),
            state: Some(CellState::Set),
            notes: None,
        })
    );
    let second = events.recv().await.unwrap();
    assert_eq!(
        second,
        EnginePush::GameUpdate(GameSummary {
            state: GameState::Running,
            clue_count: 30,
            solution_count: 1,
        })
    );
}

#[tokio::test]
async fn engine_eof_fails_pending_calls_with_disconnected() {
    let (client, mut engine) = FakeEngine::connect();

    let engine_task = tokio::spawn(async move {
        // Read the request, then hang up without answering.
        let _ = engine.next_request().await;
    });

    let err = client.solve(CountFlags::none()).await.unwrap_err();
    assert!(matches!(err, EngineError::Disconnected));
    engine_task.await.unwrap();
}

#[tokio::test]
async fn malformed_frames_are_skipped() {
    let (client, mut engine) = FakeEngine::connect();

    let engine_task = tokio::spawn(async move {
        let frame = engine.next_request().await;
        engine.send_line("this is not json").await;
        engine.reply_ok(frame.id, serde_json::Value::Null).await;
    });

    client.hint(CountFlags::none()).await.unwrap();
    engine_task.await.unwrap();
}
