use std::fs;
use std::time::Duration;

use crossbeam::channel::Receiver;
use tempfile::TempDir;
use tokio::time::sleep;

use super::{ClientHandle, dispatch, spawn_controller};
use crate::config::PlaygroundConfig;
use crate::live::{ClientMsg, ServerMsg};
use crate::playground::artifact::CompiledArtifact;
use crate::playground::error::{FetchError, PlaygroundError};
use crate::playground::surface::{PreviewSurface, Shell};

fn drain(rx: &Receiver<ServerMsg>) -> Vec<ServerMsg> {
    rx.try_iter().collect()
}

fn collection(files: &[(&str, &str)]) -> (TempDir, PlaygroundConfig) {
    let temp = TempDir::new().unwrap();
    for (name, text) in files {
        fs::write(temp.path().join(name), text).unwrap();
    }
    let mut config = PlaygroundConfig::default();
    config.collection.dir = temp.path().to_path_buf();
    (temp, config)
}

/// Wait on real IO and the debounce window.
async fn settle() {
    for _ in 0..30 {
        sleep(Duration::from_millis(100)).await;
    }
}

#[test]
fn test_client_handle_queues_messages() {
    let (mut client, rx) = ClientHandle::channel();

    client.set_title("Playground - a.js");
    client.set_busy(true);
    client.listen_resize(false);
    client.notify(&PlaygroundError::Fetch {
        key: "a.js".into(),
        source: FetchError::NotFound,
    });

    let msgs = drain(&rx);
    assert_eq!(msgs.len(), 4);
    assert_eq!(
        msgs[0],
        ServerMsg::Title {
            text: "Playground - a.js".into()
        }
    );
    assert_eq!(msgs[1], ServerMsg::Busy { value: true });
    assert_eq!(msgs[2], ServerMsg::ResizeListener { enabled: false });
    assert!(matches!(&msgs[3], ServerMsg::Notify { kind: "fetch", .. }));
}

#[test]
fn test_inject_fails_after_disconnect() {
    let (mut client, rx) = ClientHandle::channel();
    drop(rx);

    let artifact = CompiledArtifact {
        script_text: "x()".into(),
        request_id: 3,
    };
    let err = client.inject(&artifact).unwrap_err();
    assert_eq!(err.run, 3);
}

#[tokio::test]
async fn test_page_message_opens_default_document() {
    let (_temp, config) = collection(&[
        ("index.yml", "# demos\n- demo.js\n"),
        ("demo.js", "console.log('demo');"),
    ]);
    let (client, rx) = ClientHandle::channel();
    let controller = spawn_controller(client, &config);

    dispatch(
        &controller,
        ClientMsg::Page {
            path: "/playground/".into(),
        },
    );
    settle().await;

    let msgs = drain(&rx);
    assert!(msgs.contains(&ServerMsg::Navigate {
        path: "/playground/demo.js".into()
    }));
    assert!(msgs.contains(&ServerMsg::Seed {
        text: "console.log('demo');".into()
    }));
    let injected: Vec<_> = msgs
        .iter()
        .filter_map(|m| match m {
            ServerMsg::Inject { run, script } => Some((*run, script.clone())),
            _ => None,
        })
        .collect();
    assert_eq!(injected.len(), 1);
    assert!(injected[0].1.contains("console.log('demo')"));

    dispatch(&controller, ClientMsg::Rendered { run: injected[0].0 });
    settle().await;
    assert_eq!(drain(&rx).last(), Some(&ServerMsg::Busy { value: false }));
}

#[tokio::test]
async fn test_page_message_with_key_skips_index() {
    let (_temp, config) = collection(&[("b.js", "console.log('b');")]);
    let (client, rx) = ClientHandle::channel();
    let controller = spawn_controller(client, &config);

    dispatch(
        &controller,
        ClientMsg::Page {
            path: "/playground/b.js".into(),
        },
    );
    settle().await;

    let msgs = drain(&rx);
    assert!(!msgs.iter().any(|m| matches!(m, ServerMsg::Navigate { .. })));
    assert!(msgs.iter().any(|m| matches!(m, ServerMsg::Inject { .. })));
}

#[tokio::test]
async fn test_page_message_with_invalid_key_notifies() {
    let (_temp, config) = collection(&[
        ("index.yml", "- demo.js\n"),
        ("demo.js", "console.log('demo');"),
    ]);
    let (client, rx) = ClientHandle::channel();
    let controller = spawn_controller(client, &config);

    dispatch(
        &controller,
        ClientMsg::Page {
            path: "/playground/%2E%2E/livepad.toml".into(),
        },
    );
    settle().await;

    let msgs = drain(&rx);
    assert!(msgs.iter().any(|m| matches!(m, ServerMsg::Notify { kind: "fetch", .. })));
    assert!(!msgs.iter().any(|m| matches!(m, ServerMsg::Navigate { .. })));
    assert!(!msgs.iter().any(|m| matches!(m, ServerMsg::Inject { .. })));
}
