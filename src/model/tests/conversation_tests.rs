use super::*;
use crate::model::message::Role;

fn reply(text: &str) -> StoryReply {
    StoryReply {
        text: text.to_string(),
        session_id: None,
        character: None,
    }
}

fn with_session(text: &str, session_id: &str) -> StoryReply {
    StoryReply {
        session_id: Some(session_id.to_string()),
        ..reply(text)
    }
}

fn with_character(text: &str, character: Character) -> StoryReply {
    StoryReply {
        character: Some(character),
        ..reply(text)
    }
}

/// Scenario A: bootstrap answered with "You wake in a forest." and session "s1".
fn bootstrapped() -> Conversation {
    let mut convo = Conversation::default();
    convo.begin_bootstrap().expect("idle at mount");
    convo.finish_bootstrap(Ok(with_session("You wake in a forest.", "s1")));
    convo
}

#[test]
fn bootstrap_sends_fixed_prompt_without_session() {
    let mut convo = Conversation::default();
    let request = convo.begin_bootstrap().expect("request");

    assert_eq!(request.prompt, "I want to start a new adventure story.");
    assert_eq!(request.session_id, None);
    assert!(convo.is_busy());
    assert!(convo.transcript().is_empty());
}

#[test]
fn scenario_a_bootstrap_success() {
    let convo = bootstrapped();

    assert_eq!(convo.transcript(), &[Turn::assistant("You wake in a forest.")]);
    assert_eq!(convo.session_id(), Some("s1"));
    assert!(convo.character().is_none());
    assert!(!convo.is_busy());
    assert!(convo.error().is_none());
}

#[test]
fn bootstrap_failure_keeps_transcript_empty() {
    let mut convo = Conversation::default();
    convo.begin_bootstrap().expect("request");
    convo.finish_bootstrap(Err(StoryError::Network("connection refused".into())));

    assert!(convo.transcript().is_empty());
    assert_eq!(convo.error(), Some("connection refused"));
    assert!(!convo.is_busy());
    assert!(convo.session_id().is_none());
}

#[test]
fn bootstrap_clears_previous_error() {
    let mut convo = Conversation::default();
    convo.begin_bootstrap().expect("request");
    convo.finish_bootstrap(Err(StoryError::MissingText));
    assert!(convo.error().is_some());

    convo.begin_bootstrap().expect("retry");
    assert!(convo.error().is_none());
}

#[test]
fn scenario_b_submit_appends_both_turns_and_character() {
    let mut convo = bootstrapped();

    let request = convo.begin_submit("look around").expect("request");
    assert_eq!(
        request,
        StoryRequest {
            prompt: "look around".into(),
            session_id: Some("s1".into()),
        }
    );

    let rin = Character {
        name: Some("Rin".into()),
        class: Some("Rogue".into()),
        story_progress: 1.0,
        current_location: Some("Forest".into()),
        ..Default::default()
    };
    convo.finish_submit(Ok(with_character("You see a path.", rin)));

    let roles: Vec<Role> = convo.transcript().iter().map(|t| t.role).collect();
    assert_eq!(roles, vec![Role::Assistant, Role::User, Role::Assistant]);
    assert_eq!(convo.transcript()[1].content, "look around");
    assert_eq!(convo.transcript()[2].content, "You see a path.");
    assert_eq!(
        convo.character().and_then(|c| c.name.as_deref()),
        Some("Rin")
    );
    assert!(!convo.is_busy());
}

#[test]
fn scenario_c_blank_input_sends_nothing() {
    let mut convo = bootstrapped();

    assert!(convo.begin_submit("   ").is_none());
    assert!(convo.begin_submit("").is_none());
    assert_eq!(convo.transcript().len(), 1);
    assert!(!convo.is_busy());
}

#[test]
fn scenario_d_http_failure_keeps_user_turn_and_apologises() {
    let mut convo = bootstrapped();

    convo.begin_submit("fight").expect("request");
    convo.finish_submit(Err(StoryError::Http { status: 500 }));

    let tail = &convo.transcript()[1..];
    assert_eq!(tail, &[Turn::user("fight"), Turn::assistant(APOLOGY)]);
    assert_eq!(convo.error(), Some("HTTP error! status: 500"));
    assert!(!convo.is_busy());
}

#[test]
fn transcript_grows_by_two_per_successful_submit() {
    let mut convo = bootstrapped();
    let base = convo.transcript().len();

    for n in 1..=5 {
        convo.begin_submit(&format!("step {n}")).expect("request");
        convo.finish_submit(Ok(reply("ok")));
        assert_eq!(convo.transcript().len(), base + 2 * n);
    }
}

#[test]
fn failed_submit_leaves_user_turn_then_apology() {
    let mut convo = bootstrapped();

    convo.begin_submit("hello").expect("request");
    convo.finish_submit(Err(StoryError::MissingText));

    let n = convo.transcript().len();
    assert_eq!(convo.transcript()[n - 2], Turn::user("hello"));
    assert_eq!(convo.transcript()[n - 1], Turn::assistant(APOLOGY));
}

#[test]
fn session_from_bootstrap_sticks_across_submits() {
    let mut convo = Conversation::default();
    convo.begin_bootstrap().expect("request");
    convo.finish_bootstrap(Ok(with_session("Once upon a time.", "abc")));

    for prompt in ["north", "open door", "rest"] {
        let request = convo.begin_submit(prompt).expect("request");
        assert_eq!(request.session_id.as_deref(), Some("abc"));
        // Submit replies never rebind the session.
        convo.finish_submit(Ok(with_session("...", "other")));
    }

    assert_eq!(convo.session_id(), Some("abc"));
}

#[test]
fn submit_while_busy_is_rejected() {
    let mut convo = bootstrapped();
    convo.begin_submit("first").expect("request");
    let before = convo.transcript().to_vec();

    assert!(convo.begin_submit("second").is_none());
    assert!(convo.begin_bootstrap().is_none());
    assert_eq!(convo.transcript(), before.as_slice());
}

#[test]
fn submit_before_bootstrap_completes_is_rejected() {
    let mut convo = Conversation::default();
    convo.begin_bootstrap().expect("request");

    assert!(convo.begin_submit("hurry").is_none());
    assert!(convo.transcript().is_empty());
}

#[test]
fn character_is_replaced_not_merged() {
    let mut convo = bootstrapped();
    let bob = |goals: Vec<&str>| Character {
        name: Some("Bob".into()),
        goals: goals.into_iter().map(String::from).collect(),
        inventory: vec!["torch".into()],
        ..Default::default()
    };

    convo.begin_submit("a").expect("request");
    convo.finish_submit(Ok(with_character("...", bob(vec!["find sword"]))));
    assert_eq!(convo.character().map(|c| c.goals.len()), Some(1));

    convo.begin_submit("b").expect("request");
    convo.finish_submit(Ok(with_character("...", bob(vec![]))));
    assert_eq!(convo.character().map(|c| c.goals.is_empty()), Some(true));
}

#[test]
fn reply_without_character_keeps_previous_snapshot() {
    let mut convo = bootstrapped();
    let rin = Character {
        name: Some("Rin".into()),
        ..Default::default()
    };

    convo.begin_submit("a").expect("request");
    convo.finish_submit(Ok(with_character("...", rin.clone())));
    convo.begin_submit("b").expect("request");
    convo.finish_submit(Ok(reply("...")));

    assert_eq!(convo.character(), Some(&rin));
}

#[test]
fn reset_clears_everything() {
    let mut convo = bootstrapped();
    convo.begin_submit("fight").expect("request");
    convo.finish_submit(Err(StoryError::Http { status: 502 }));

    convo.reset();

    assert!(convo.transcript().is_empty());
    assert!(convo.session_id().is_none());
    assert!(convo.character().is_none());
    assert!(convo.error().is_none());
    assert!(!convo.is_busy());
}
