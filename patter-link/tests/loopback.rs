//! Loopback tests — real sockets on a local listener.
//!
//! These spin up both halves of the WebSocket handshake in-process and
//! assert the exact JSON frame the robot would receive.

use std::net::TcpListener;
use std::thread;

use patter_core::action::{Action, MoveAction, SayAction};
use patter_core::dispatch;
use patter_core::types::ActionId;
use patter_link::RobotLink;

#[test]
fn dispatched_frame_arrives_as_json_text() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");

    // The robot side: accept the dial-out and read one frame.
    let robot = thread::spawn(move || {
        let (stream, _) = listener.accept().expect("accept");
        let mut socket = tungstenite::accept(stream).expect("handshake");
        socket.read().expect("read").into_text().expect("text")
    });

    let mut link = RobotLink::connect(&format!("ws://{addr}")).expect("connect");

    // A name-only move: content resolution falls back to the name.
    let action = Action::Move(MoveAction {
        id: ActionId::new(),
        name: "hello_a010".to_string(),
        ..MoveAction::default()
    });
    dispatch::send(&action, Some(&mut link)).expect("send");
    link.close().ok();

    let raw = robot.join().expect("join");
    let frame: serde_json::Value = serde_json::from_str(&raw).expect("parse");
    assert_eq!(frame["command"].as_str(), Some("move"));
    assert_eq!(frame["name"].as_str(), Some("hello_a010"));
    assert_eq!(frame["content"].as_str(), Some(""));
    assert_eq!(frame["delay"].as_i64(), Some(0));
}

#[test]
fn robot_dial_in_is_served_by_accept() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");

    // The robot side initiates the connection, then listens for commands.
    let robot = thread::spawn(move || {
        let (mut socket, _) = tungstenite::connect(format!("ws://{addr}")).expect("dial in");
        socket.read().expect("read").into_text().expect("text")
    });

    let (stream, peer) = listener.accept().expect("accept");
    let mut link = RobotLink::accept(stream, &peer.to_string()).expect("handshake");

    let action = Action::Say(SayAction {
        id: ActionId::new(),
        phrase: "Kui vana sa oled?".to_string(),
        file_path: None,
    });
    dispatch::send(&action, Some(&mut link)).expect("send");
    link.close().ok();

    let raw = robot.join().expect("join");
    let frame: serde_json::Value = serde_json::from_str(&raw).expect("parse");
    assert_eq!(frame["command"].as_str(), Some("say"));
    assert_eq!(frame["content"].as_str(), Some("Kui vana sa oled?"));
}
