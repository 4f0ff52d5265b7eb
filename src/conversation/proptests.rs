//! Property tests for the booking flow

use proptest::prelude::*;

use super::*;

fn answer() -> impl Strategy<Value = String> {
    // Anything with at least one visible character is a valid answer.
    "[ ]{0,2}[a-zA-Z0-9@:+&'-]{1,12}[ a-zA-Z0-9]{0,8}"
}

fn blank() -> impl Strategy<Value = String> {
    "[ \t\n]{0,4}"
}

fn session_with(pet: Option<String>) -> Session {
    let mut session = Session::default();
    if let Some(pet) = pet {
        session.context.insert("petName".into(), serde_json::Value::String(pet));
    }
    session
}

proptest! {
    #[test]
    fn final_payload_carries_exactly_the_four_answers(
        pet in proptest::option::of("[A-Za-z]{1,8}"),
        answers in proptest::array::uniform4(answer()),
        blanks in proptest::collection::vec(blank(), 0..6),
        chat_before in proptest::bool::ANY,
    ) {
        let mut conv = Conversation::new(
            &session_with(pet),
            AnonymousId::from("anon".to_string()),
            HistoryWindow::default(),
        );

        if chat_before {
            let Submission::Chat(pending) = conv.submit("hello") else {
                panic!("expected chat");
            };
            conv.complete_chat(pending.ticket, Ok("hi".into()));
        }

        prop_assert!(conv.start_booking());

        let mut blanks = blanks.into_iter();
        let mut outcome = Submission::Ignored;
        for answer in &answers {
            // Blank keystrokes in between never move the cursor.
            if let Some(blank) = blanks.next() {
                prop_assert_eq!(conv.submit(&blank), Submission::Ignored);
            }
            outcome = conv.submit(answer);
        }

        let pending = match outcome {
            Submission::Booking(pending) => pending,
            other => panic!("fourth answer must submit the booking, got {other:?}"),
        };
        let payload = serde_json::to_value(&pending.request).unwrap();
        let object = payload.as_object().unwrap();

        prop_assert_eq!(object.len(), 5);
        prop_assert_eq!(object["sessionId"].as_str(), Some("anon"));
        for (step, answer) in BOOKING_STEPS.iter().zip(&answers) {
            prop_assert_eq!(object[step.field.key()].as_str(), Some(answer.as_str()));
        }
    }

    #[test]
    fn blank_input_never_changes_the_transcript(
        inputs in proptest::collection::vec(blank(), 1..8),
        booking in proptest::bool::ANY,
    ) {
        let mut conv = Conversation::new(
            &Session::default(),
            AnonymousId::from("anon".to_string()),
            HistoryWindow::default(),
        );
        if booking {
            conv.start_booking();
        }
        let before = conv.messages().to_vec();
        let mode = conv.mode();

        for input in &inputs {
            prop_assert_eq!(conv.submit(input), Submission::Ignored);
        }

        prop_assert_eq!(conv.messages(), before.as_slice());
        prop_assert_eq!(conv.mode(), mode);
        prop_assert!(!conv.is_busy());
    }
}
