use super::*;
use canvas::camera::Point;
use canvas::doc::AiStatus;
use frames::{FinishReason, Usage, encode_part};

// =============================================================
// Helpers
// =============================================================

fn engine_with_ai_card() -> (EngineCore, String) {
    let mut engine = EngineCore::new();
    let source = engine.store.add_card("Explain ownership", Point::new(0.0, 0.0));
    let actions = engine.ask_ai(&source);
    let id = actions
        .iter()
        .find_map(|a| match a {
            Action::AiRequested { id, .. } => Some(id.clone()),
            _ => None,
        })
        .unwrap();
    assert!(engine.begin_ai_request(&id).is_some());
    (engine, id)
}

fn line(part: StreamPart) -> String {
    encode_part(&part).unwrap()
}

fn finish_lines() -> String {
    let usage = Usage { prompt_tokens: 4, completion_tokens: 2 };
    line(StreamPart::FinishStep { finish_reason: FinishReason::Stop, usage })
        + &line(StreamPart::FinishMessage { finish_reason: FinishReason::Stop, usage })
}

// =============================================================
// Streaming
// =============================================================

#[test]
fn text_parts_stream_into_ai_card() {
    let (mut engine, id) = engine_with_ai_card();
    let mut reader = ResponseReader::new(id.clone());

    reader.push(&mut engine, line(StreamPart::Text("# Own".into())).as_bytes());
    reader.push(&mut engine, line(StreamPart::Text("ership".into())).as_bytes());

    let card = engine.store.ai_card(&id).unwrap();
    assert_eq!(card.text, "# Ownership");
    assert_eq!(card.status, AiStatus::Streaming);
    assert!(!reader.is_done());
}

#[test]
fn finish_message_resolves_to_static_card() {
    let (mut engine, id) = engine_with_ai_card();
    let mut reader = ResponseReader::new(id.clone());

    let body = line(StreamPart::Text("  answer  ".into())) + &finish_lines();
    let actions = reader.push(&mut engine, body.as_bytes());

    assert!(reader.is_done());
    assert!(engine.store.ai_card(&id).is_none());
    assert!(actions.iter().any(|a| matches!(a, Action::CardDeleted(d) if *d == id)));
    assert!(engine.store.cards().iter().any(|c| c.text == "answer"));
}

#[test]
fn finish_step_alone_keeps_reading() {
    let (mut engine, id) = engine_with_ai_card();
    let mut reader = ResponseReader::new(id.clone());

    let usage = Usage { prompt_tokens: 1, completion_tokens: 1 };
    reader.push(&mut engine, line(StreamPart::FinishStep { finish_reason: FinishReason::Stop, usage }).as_bytes());
    assert!(!reader.is_done());
    assert!(engine.ai_request_started(&id));

    reader.push(&mut engine, line(StreamPart::Text("late".into())).as_bytes());
    assert_eq!(engine.store.ai_card(&id).unwrap().text, "late");
}

#[test]
fn chunks_split_mid_line_are_reassembled() {
    let (mut engine, id) = engine_with_ai_card();
    let mut reader = ResponseReader::new(id.clone());

    let body = line(StreamPart::Text("héllo".into()));
    let bytes = body.as_bytes();
    // Split inside the two-byte 'é'.
    let cut = body.find('é').unwrap() + 1;
    reader.push(&mut engine, &bytes[..cut]);
    assert_eq!(engine.store.ai_card(&id).unwrap().text, "");
    reader.push(&mut engine, &bytes[cut..]);
    assert_eq!(engine.store.ai_card(&id).unwrap().text, "héllo");
}

#[test]
fn error_part_fails_card() {
    let (mut engine, id) = engine_with_ai_card();
    let mut reader = ResponseReader::new(id.clone());

    reader.push(&mut engine, line(StreamPart::Error("model crashed".into())).as_bytes());

    assert!(reader.is_done());
    assert_eq!(engine.store.ai_card(&id).unwrap().status, AiStatus::Failed("model crashed".into()));
}

#[test]
fn parts_after_terminal_are_ignored() {
    let (mut engine, id) = engine_with_ai_card();
    let mut reader = ResponseReader::new(id.clone());

    let body = line(StreamPart::Error("boom".into())) + &line(StreamPart::Text("late".into()));
    reader.push(&mut engine, body.as_bytes());

    assert_eq!(engine.store.ai_card(&id).unwrap().text, "");
}

#[test]
fn malformed_line_fails_card() {
    let (mut engine, id) = engine_with_ai_card();
    let mut reader = ResponseReader::new(id.clone());

    reader.push(&mut engine, b"not a part\n");

    let status = &engine.store.ai_card(&id).unwrap().status;
    assert!(matches!(status, AiStatus::Failed(msg) if msg.starts_with("unreadable response")));
}

#[test]
fn body_ending_early_fails_card() {
    let (mut engine, id) = engine_with_ai_card();
    let mut reader = ResponseReader::new(id.clone());

    reader.push(&mut engine, line(StreamPart::Text("partial".into())).as_bytes());
    reader.finish(&mut engine);

    let card = engine.store.ai_card(&id).unwrap();
    assert_eq!(card.text, "partial");
    assert_eq!(card.status, AiStatus::Failed(INCOMPLETE_RESPONSE.into()));
}

#[test]
fn finish_after_terminal_is_noop() {
    let (mut engine, id) = engine_with_ai_card();
    let mut reader = ResponseReader::new(id.clone());

    reader.push(&mut engine, (line(StreamPart::Text("ok".into())) + &finish_lines()).as_bytes());
    let actions = reader.finish(&mut engine);

    assert!(actions.is_empty());
}

#[test]
fn unterminated_final_line_is_applied_on_finish() {
    let (mut engine, id) = engine_with_ai_card();
    let mut reader = ResponseReader::new(id.clone());

    let body = finish_lines();
    let body = body.trim_end_matches('\n');
    reader.push(&mut engine, body.as_bytes());
    reader.finish(&mut engine);

    assert!(engine.store.ai_card(&id).is_none());
}

#[test]
fn fail_is_applied_once() {
    let (mut engine, id) = engine_with_ai_card();
    let mut reader = ResponseReader::new(id.clone());

    assert!(!reader.fail(&mut engine, "network down").is_empty());
    assert!(reader.fail(&mut engine, "again").is_empty());
    assert_eq!(engine.store.ai_card(&id).unwrap().status, AiStatus::Failed("network down".into()));
}

#[test]
fn deleted_card_mid_stream_stays_deleted() {
    let (mut engine, id) = engine_with_ai_card();
    let mut reader = ResponseReader::new(id.clone());

    reader.push(&mut engine, line(StreamPart::Text("a".into())).as_bytes());
    assert!(engine.ai_request_started(&id));
    engine.delete_card(&id);
    assert!(!engine.ai_request_started(&id));
    let cards_before = engine.store.cards().len();
    reader.push(&mut engine, finish_lines().as_bytes());

    assert!(engine.store.ai_card(&id).is_none());
    assert_eq!(engine.store.cards().len(), cards_before);
}

// =============================================================
// HTTP errors
// =============================================================

#[test]
fn http_error_message_uses_server_message() {
    let body = r#"{"error":"E_AI_DISABLED","message":"AI is not configured on this server"}"#;
    assert_eq!(http_error_message(503, body), "request failed (503): AI is not configured on this server");
}

#[test]
fn http_error_message_without_json_body() {
    assert_eq!(http_error_message(502, "<html>bad gateway</html>"), "request failed (502)");
}
