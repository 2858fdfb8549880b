//! Integration tests — end-to-end script flows.
//!
//! These walk the full path an operator action takes: scan the move library,
//! assemble sessions from a store file, pick an action, and dispatch it over
//! a recorded connection; plus store durability across reopen and the media
//! catalogue's file ownership.

use std::fs;
use std::path::Path;
use std::time::Duration;

use patter_core::action::{Action, Command, MoveAction, SayAction, SayAndMoveAction};
use patter_core::catalogue::MoveCatalogue;
use patter_core::dispatch::{self, RecordingConnection};
use patter_core::error::PatterError;
use patter_core::media::{MediaItem, MediaLibrary};
use patter_core::session::{Session, SessionItem, SessionLibrary};
use patter_core::types::{ActionId, ItemId, MediaId, SessionId};

fn seed_motion(dir: &Path, group: &str, name: &str, bytes: &[u8]) {
    let group_dir = dir.join(group);
    fs::create_dir_all(&group_dir).expect("mkdir");
    fs::write(group_dir.join(format!("{name}.qianim")), bytes).expect("write");
}

fn authored_session() -> Session {
    Session {
        id: SessionId::nil(),
        name: "Session 1".to_string(),
        description: "Introductions".to_string(),
        items: vec![SessionItem {
            id: ItemId::nil(),
            actions: vec![
                SayAndMoveAction {
                    id: ActionId::nil(),
                    say_item: SayAction {
                        id: ActionId::nil(),
                        phrase: "Tere, mina olen robot.".to_string(),
                        file_path: Some("intro.wav".into()),
                    },
                    move_item: MoveAction {
                        id: ActionId::nil(),
                        name: "hello_a010".to_string(),
                        delay: Duration::from_secs(5),
                        ..MoveAction::default()
                    },
                },
                SayAndMoveAction {
                    id: ActionId::nil(),
                    say_item: SayAction {
                        id: ActionId::nil(),
                        phrase: "Very nice".to_string(),
                        file_path: None,
                    },
                    move_item: MoveAction {
                        id: ActionId::nil(),
                        name: "NiceReaction_01".to_string(),
                        ..MoveAction::default()
                    },
                },
            ],
        }],
    }
}

// ---------------------------------------------------------------------------
// Full flow: scan -> assemble -> pick -> dispatch
// ---------------------------------------------------------------------------

#[test]
fn scripted_session_reaches_the_wire() {
    let dir = tempfile::tempdir().expect("tempdir");

    // 1. A move library on disk and a recorded intro for Session 1.
    let moves_dir = dir.path().join("moves");
    seed_motion(&moves_dir, "greetings", "hello_a010", b"<Animation name=\"hello\"/>");
    let audio_root = dir.path().join("audio");
    fs::create_dir_all(audio_root.join("Session 1")).expect("mkdir");
    fs::write(audio_root.join("Session 1/intro.wav"), b"RIFF").expect("write");

    // 2. An authored store file.
    let store_path = dir.path().join("sessions.json");
    fs::write(
        &store_path,
        serde_json::to_vec(&vec![authored_session()]).expect("encode"),
    )
    .expect("seed");

    // 3. Scan and assemble.
    let catalogue = MoveCatalogue::scan(&moves_dir).expect("scan");
    let library = SessionLibrary::open(&store_path, &audio_root, &catalogue).expect("open");

    let sessions = library.sessions();
    assert_eq!(sessions.len(), 1);
    let prompt = &sessions[0].items[0].actions[0];
    assert!(!prompt.id.is_nil(), "assembly assigned identifiers");

    // 4. The operator clicks the prompt; only the move half goes out, with
    //    the catalogue motion bytes and the authored delay.
    let mut connection = RecordingConnection::new();
    let action = library.find_action(prompt.id).expect("lookup");
    dispatch::send(&Action::SayAndMove(action), Some(&mut connection)).expect("send");

    assert_eq!(connection.messages.len(), 1);
    let frame = &connection.messages[0];
    assert_eq!(frame.command, Command::Move);
    assert_eq!(frame.name, "hello_a010");
    assert_eq!(frame.content, "<Animation name=\"hello\"/>");
    assert_eq!(frame.delay, 5000);

    // 5. The follow-up has no motion file anywhere; it rides on its name.
    let follow_up = &sessions[0].items[0].actions[1];
    let action = library.find_action(follow_up.id).expect("lookup");
    dispatch::send(&Action::SayAndMove(action), Some(&mut connection)).expect("send");

    let frame = &connection.messages[1];
    assert_eq!(frame.name, "NiceReaction_01");
    assert_eq!(frame.content, "");
}

// ---------------------------------------------------------------------------
// Store durability: an empty file, a create, a reopen
// ---------------------------------------------------------------------------

#[test]
fn empty_store_file_create_and_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store_path = dir.path().join("sessions.json");
    fs::write(&store_path, b"[]").expect("seed");
    let audio_root = dir.path();

    let library =
        SessionLibrary::open(&store_path, audio_root, &MoveCatalogue::default()).expect("open");
    assert!(library.sessions().is_empty());

    let created = library
        .create(Session {
            name: "Session 1".to_string(),
            ..Session::default()
        })
        .expect("create");
    assert!(!created.id.is_nil());

    let reopened =
        SessionLibrary::open(&store_path, audio_root, &MoveCatalogue::default()).expect("reopen");
    let sessions = reopened.sessions();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].name, "Session 1");
    assert_eq!(sessions[0].id, created.id);
}

#[test]
fn client_supplied_identifier_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let library = SessionLibrary::open(
        dir.path().join("sessions.json"),
        dir.path(),
        &MoveCatalogue::default(),
    )
    .expect("open");

    let result = library.create(Session {
        id: SessionId::new(),
        name: "smuggled".to_string(),
        ..Session::default()
    });
    assert!(matches!(result, Err(PatterError::IdentifierNotAllowed)));
}

// ---------------------------------------------------------------------------
// Media catalogue owns its files
// ---------------------------------------------------------------------------

#[test]
fn media_round_trip_and_file_ownership() {
    let dir = tempfile::tempdir().expect("tempdir");
    let library = MediaLibrary::open(dir.path().join("images.json")).expect("open");

    let file_path = dir.path().join("smile.png");
    fs::write(&file_path, b"\x89PNG").expect("write");

    let item = library
        .create(MediaItem {
            id: MediaId::nil(),
            name: "smile".to_string(),
            group: "faces".to_string(),
            file_path: file_path.clone(),
        })
        .expect("create");

    let fetched = library.get(&item.id.to_string()).expect("get");
    assert_eq!(fetched, item);

    library.delete(&item.id.to_string()).expect("delete");
    assert!(!file_path.exists(), "backing file removed with the record");
    assert!(matches!(
        library.get(&item.id.to_string()),
        Err(PatterError::NotFound(_))
    ));
}
