/// Integration tests for shin's session flow against a real SQLite file and
/// a real shell.
use std::sync::Arc;

use shin_config::Config;
use shin_core::keys::{KEY_ESCAPE, KEY_RETURN, KEY_UP};
use shin_core::{Flow, HostEvent, KeyEvent, Preedit, RecallState, Session, SessionOptions, Surface};
use shin_exec::ShellExecutor;
use shin_history::{HistoryIndex, HistoryStore};
use tempfile::TempDir;

#[derive(Default)]
struct CollectingSurface {
    last: Option<Preedit>,
    commits: Vec<String>,
}

impl Surface for CollectingSurface {
    fn update_preedit(&mut self, preedit: &Preedit) {
        self.last = Some(preedit.clone());
    }

    fn commit_text(&mut self, text: &str) {
        self.commits.push(text.to_string());
    }
}

fn open_store(dir: &TempDir) -> Arc<HistoryStore> {
    let path = dir.path().join("shin").join("history.db");
    Arc::new(HistoryStore::open(&path, Config::default().history.busy_timeout()).unwrap())
}

fn session(store: Arc<HistoryStore>, shell: &str) -> Session<CollectingSurface> {
    Session::new(
        store,
        Arc::new(ShellExecutor::new(shell)),
        CollectingSurface::default(),
        SessionOptions::default(),
    )
}

async fn press(s: &mut Session<CollectingSurface>, keyval: u32) -> Flow {
    s.handle(HostEvent::Key(KeyEvent::press(keyval))).await
}

async fn type_text(s: &mut Session<CollectingSurface>, text: &str) {
    for c in text.chars() {
        assert_eq!(press(s, c as u32).await, Flow::Continue, "typing {c:?}");
    }
}

#[tokio::test]
async fn submitted_command_runs_and_is_recalled_after_restart() {
    let dir = TempDir::new().unwrap();

    {
        let mut s = session(open_store(&dir), "sh");
        s.handle(HostEvent::Enable).await;
        type_text(&mut s, "echo hello").await;
        assert_eq!(press(&mut s, KEY_RETURN).await, Flow::Exit);
        assert_eq!(s.surface().commits, vec!["hello"]);
        assert!(s.buffer().is_empty());
    }

    // A new process opens the existing file through the fast path.
    let store = open_store(&dir);
    assert_eq!(store.entry("echo hello").unwrap().map(|e| e.use_count), Some(1));

    let mut s = session(store, "sh");
    type_text(&mut s, "ec").await;
    press(&mut s, KEY_UP).await;
    assert_eq!(s.buffer().text(), "echo hello");
    assert_eq!(s.navigator().state(), RecallState::Recalling(1));
    assert_eq!(s.surface().last.as_ref().map(|p| p.text.as_str()), Some("echo hello"));

    assert_eq!(press(&mut s, KEY_ESCAPE).await, Flow::Continue);
    assert_eq!(s.buffer().text(), "ec");
}

#[tokio::test]
async fn sessions_share_one_store() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);

    let mut first = session(store.clone(), "sh");
    let mut second = session(store.clone(), "sh");

    type_text(&mut first, "true").await;
    press(&mut first, KEY_RETURN).await;

    type_text(&mut second, "t").await;
    press(&mut second, KEY_UP).await;
    assert_eq!(second.buffer().text(), "true");
}

#[tokio::test]
async fn multi_line_output_is_committed_as_block() {
    let dir = TempDir::new().unwrap();
    let mut s = session(open_store(&dir), "sh");
    type_text(&mut s, "printf 'a\\nb\\n'; exit 3").await;
    assert_eq!(press(&mut s, KEY_RETURN).await, Flow::Exit);
    assert_eq!(s.surface().commits, vec!["\na\nb\n"]);
}

#[tokio::test]
async fn stderr_is_captured_too() {
    let dir = TempDir::new().unwrap();
    let mut s = session(open_store(&dir), "sh");
    type_text(&mut s, "echo oops >&2").await;
    press(&mut s, KEY_RETURN).await;
    assert_eq!(s.surface().commits, vec!["oops"]);
}

#[tokio::test]
async fn missing_shell_still_ends_session() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);
    let mut s = session(store.clone(), "/nonexistent/shin-test-shell");
    type_text(&mut s, "ls").await;
    assert_eq!(press(&mut s, KEY_RETURN).await, Flow::Exit);
    assert!(s.buffer().is_empty());
    assert!(s.surface().commits.is_empty());
    assert!(store.lookup("ls", 0).unwrap().is_some());
}

#[test]
fn config_defaults_are_valid() {
    let config = Config::default();
    assert_eq!(config.session.exit_grace_ms, 100);
    assert_eq!(config.session.focus_out_grace_ms, 250);
    assert_eq!(config.exec.shell, "bash");
}
