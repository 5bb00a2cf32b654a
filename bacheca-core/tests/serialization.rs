use bacheca_core::*;
use serde_json::{self as json, Value};
use time::macros::datetime;

fn parse(json_str: &str) -> Value {
    json::from_str(json_str).expect("valid json")
}

fn sample() -> Message {
    Message {
        id: "my-id".to_string(),
        name: "Guilherme".to_string(),
        email: "xguiga@gmail.com".to_string(),
        text: "My text goes here".to_string(),
        creation_time: datetime!(2020-08-12 15:30:00 UTC),
    }
}

/*
    Obiettivo test: un Message deve serializzarsi con i campi snake_case
    e creation_time in RFC3339, e deserializzarsi nello stesso valore.
*/
#[test]
fn message_wire_shape() {
    let m = sample();
    let s = json::to_string(&m).expect("serialize");
    let v = parse(&s);

    assert_eq!(
        v,
        json::json!({
            "id": "my-id",
            "name": "Guilherme",
            "email": "xguiga@gmail.com",
            "text": "My text goes here",
            "creation_time": "2020-08-12T15:30:00Z"
        })
    );

    let back: Message = json::from_str(&s).expect("deserialize");
    assert_eq!(back, m);
}

/*
    I millisecondi vengono mantenuti nel formato RFC3339.
*/
#[test]
fn message_time_keeps_milliseconds() {
    let m = Message {
        creation_time: datetime!(2020-08-12 15:30:00.250 UTC),
        ..sample()
    };
    let v = parse(&json::to_string(&m).expect("serialize"));
    assert_eq!(v["creation_time"], "2020-08-12T15:30:00.25Z");
}

/*
    Una lista vuota deve avere "data": [] e mai null.
*/
#[test]
fn empty_list_has_array_data() {
    let list = MessageList::default();
    let v = parse(&json::to_string(&list).expect("serialize"));
    assert_eq!(v, json::json!({ "total": 0, "data": [] }));
}

#[test]
fn list_total_is_independent_from_page_size() {
    let list = MessageList {
        total: 42,
        data: vec![sample()],
    };
    let v = parse(&json::to_string(&list).expect("serialize"));
    assert_eq!(v["total"], 42);
    assert_eq!(v["data"].as_array().map(Vec::len), Some(1));
    assert_eq!(v["data"][0]["id"], "my-id");
}

/*
    Il corpo d'errore espone solo code e message.
*/
#[test]
fn error_body_shape() {
    let body = BoardError::NotFound.body();
    let v = parse(&json::to_string(&body).expect("serialize"));
    assert_eq!(
        v,
        json::json!({ "code": "not_found", "message": "message was not found" })
    );

    let body = BoardError::MissingField(Field::Text).body();
    assert_eq!(body.code, "missing_text");
    assert_eq!(body.message, r#"field "text" is missing"#);
}

#[test]
fn draft_serializes_only_content_fields() {
    let draft = MessageDraft::from(&sample());
    let v = parse(&json::to_string(&draft).expect("serialize"));
    assert_eq!(
        v,
        json::json!({
            "name": "Guilherme",
            "email": "xguiga@gmail.com",
            "text": "My text goes here"
        })
    );
}
