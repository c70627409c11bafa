use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use lazypane_common::{
    LazypaneError, NotificationLevel, PtyError, Rect, RestorationRecord, SessionError, SurfaceId,
};
use lazypane_webview::{HostMessage, WebViewEvent};

use super::*;
use crate::app_state::pty_bridge::{Drained, Launcher, PtyProcess};

// =============================================================================
// FAKES
// =============================================================================

#[derive(Default)]
struct ProcessState {
    written: Vec<u8>,
    resizes: Vec<(u16, u16)>,
    kills: usize,
    output: VecDeque<Vec<u8>>,
    exited: bool,
    fail_writes: bool,
    fail_resizes: bool,
}

#[derive(Clone, Default)]
struct FakeProcess(Rc<RefCell<ProcessState>>);

impl FakeProcess {
    fn emit(&self, bytes: &[u8]) {
        self.0.borrow_mut().output.push_back(bytes.to_vec());
    }

    fn exit(&self) {
        self.0.borrow_mut().exited = true;
    }

    fn written(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow().written).into_owned()
    }

    fn kills(&self) -> usize {
        self.0.borrow().kills
    }
}

impl PtyProcess for FakeProcess {
    fn write_input(&mut self, data: &[u8]) -> Result<(), PtyError> {
        let mut state = self.0.borrow_mut();
        if state.fail_writes {
            return Err(PtyError::Write("broken pipe".into()));
        }
        state.written.extend_from_slice(data);
        Ok(())
    }

    fn resize(&mut self, cols: u16, rows: u16) -> Result<(), PtyError> {
        let mut state = self.0.borrow_mut();
        if state.fail_resizes {
            return Err(PtyError::Resize("bad fd".into()));
        }
        state.resizes.push((cols, rows));
        Ok(())
    }

    fn drain_output(&mut self) -> Drained {
        let mut state = self.0.borrow_mut();
        let chunks: Vec<_> = state.output.drain(..).collect();
        Drained {
            chunks,
            finished: state.exited,
        }
    }

    fn kill(&mut self) {
        let mut state = self.0.borrow_mut();
        state.kills += 1;
        state.exited = true;
    }
}

#[derive(Default)]
struct SurfaceState {
    posted: Vec<HostMessage>,
    bounds: Vec<Rect>,
    closes: usize,
    focuses: usize,
    fail_posts: bool,
}

#[derive(Clone, Default)]
struct FakeSurface(Rc<RefCell<SurfaceState>>);

impl FakeSurface {
    fn posted(&self) -> Vec<HostMessage> {
        self.0.borrow().posted.clone()
    }

    fn data(&self) -> String {
        self.0
            .borrow()
            .posted
            .iter()
            .filter_map(|m| match m {
                HostMessage::Data { data } => Some(data.as_str()),
                _ => None,
            })
            .collect()
    }

    fn closes(&self) -> usize {
        self.0.borrow().closes
    }

    fn focuses(&self) -> usize {
        self.0.borrow().focuses
    }
}

impl Surface for FakeSurface {
    fn post(&mut self, msg: &HostMessage) -> Result<(), LazypaneError> {
        let mut state = self.0.borrow_mut();
        if state.fail_posts {
            return Err(LazypaneError::WebView("surface gone".into()));
        }
        state.posted.push(msg.clone());
        Ok(())
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.0.borrow_mut().bounds.push(bounds);
    }

    fn focus(&mut self) {
        self.0.borrow_mut().focuses += 1;
    }

    fn close(&mut self) {
        self.0.borrow_mut().closes += 1;
    }
}

#[derive(Clone, Default)]
struct FakeLauncher {
    launched: Rc<RefCell<Vec<(PathBuf, u16, u16)>>>,
    processes: Rc<RefCell<Vec<FakeProcess>>>,
    fail: Rc<Cell<bool>>,
}

impl FakeLauncher {
    fn last(&self) -> FakeProcess {
        self.processes.borrow().last().cloned().expect("a process was launched")
    }

    fn count(&self) -> usize {
        self.launched.borrow().len()
    }
}

impl Launcher for FakeLauncher {
    fn launch(
        &self,
        cwd: &Path,
        cols: u16,
        rows: u16,
    ) -> Result<Box<dyn PtyProcess>, SessionError> {
        self.launched.borrow_mut().push((cwd.to_path_buf(), cols, rows));
        if self.fail.get() {
            return Err(SessionError::Spawn {
                program: "lazygit".into(),
                primary: "not found".into(),
                shell: "bash".into(),
                fallback: "not found".into(),
            });
        }
        let process = FakeProcess::default();
        self.processes.borrow_mut().push(process.clone());
        Ok(Box::new(process))
    }
}

#[derive(Default)]
struct FakeHost {
    opened: Vec<(SurfaceId, PathBuf, FakeSurface)>,
    fail: bool,
}

impl FakeHost {
    fn surface(&self, id: &SurfaceId) -> FakeSurface {
        self.opened
            .iter()
            .find(|(s, _, _)| s == id)
            .map(|(_, _, surface)| surface.clone())
            .expect("surface was opened")
    }
}

impl SurfaceHost for FakeHost {
    fn open_surface(
        &mut self,
        surface: &SurfaceId,
        cwd: &Path,
    ) -> Result<Box<dyn Surface>, LazypaneError> {
        if self.fail {
            return Err(LazypaneError::WebView("no window".into()));
        }
        let fake = FakeSurface::default();
        self.opened
            .push((surface.clone(), cwd.to_path_buf(), fake.clone()));
        Ok(Box::new(fake))
    }
}

struct Harness {
    controller: PanelController,
    launcher: FakeLauncher,
    host: FakeHost,
    repo: tempfile::TempDir,
}

impl Harness {
    fn new() -> Self {
        Self::with_store(StateStore::in_memory())
    }

    fn with_store(store: StateStore) -> Self {
        let launcher = FakeLauncher::default();
        let controller = PanelController::new(Box::new(launcher.clone()), store, (80, 24));
        Self {
            controller,
            launcher,
            host: FakeHost::default(),
            repo: tempfile::tempdir().unwrap(),
        }
    }

    fn open(&mut self) -> SurfaceId {
        let repo = self.repo.path().to_path_buf();
        self.controller
            .open_for_directory(Some(&repo), &mut self.host)
            .expect("open should succeed")
    }

    /// Open a panel in a subfolder of the repo, creating it first.
    fn open_in(&mut self, name: &str) -> SurfaceId {
        let dir = self.repo.path().join(name);
        std::fs::create_dir_all(&dir).unwrap();
        self.controller
            .open_for_directory(Some(&dir), &mut self.host)
            .expect("open should succeed")
    }

    fn send(&mut self, id: &SurfaceId, json: &str) {
        self.controller.handle_event(WebViewEvent::IpcMessage {
            surface: id.clone(),
            body: json.to_string(),
        });
    }

    fn error_bodies(&mut self) -> Vec<String> {
        self.controller
            .notifications_mut()
            .drain()
            .into_iter()
            .filter(|n| n.level == NotificationLevel::Error)
            .map(|n| n.body)
            .collect()
    }
}

fn state_message(cwd: &Path) -> HostMessage {
    HostMessage::SetState {
        state: RestorationRecord::new(cwd.to_string_lossy()),
    }
}

// =============================================================================
// OPEN
// =============================================================================

#[test]
fn open_without_directory_spawns_nothing() {
    let mut h = Harness::new();
    let result = h.controller.open_for_directory(None, &mut h.host);

    assert!(matches!(result, Err(SessionError::MissingArgument(_))));
    assert_eq!(h.launcher.count(), 0);
    assert!(h.host.opened.is_empty());
    assert_eq!(h.error_bodies(), vec![MISSING_FOLDER_MESSAGE.to_string()]);
}

#[test]
fn open_with_missing_directory_is_rejected() {
    let mut h = Harness::new();
    let missing = h.repo.path().join("gone");
    let result = h.controller.open_for_directory(Some(&missing), &mut h.host);

    assert!(matches!(result, Err(SessionError::MissingArgument(_))));
    assert_eq!(h.launcher.count(), 0);
    assert_eq!(h.error_bodies().len(), 1);
}

#[test]
fn open_launches_in_directory_at_default_size() {
    let mut h = Harness::new();
    let id = h.open();

    let launched = h.launcher.launched.borrow().clone();
    assert_eq!(launched, vec![(h.repo.path().to_path_buf(), 80, 24)]);
    assert_eq!(h.host.opened.len(), 1);
    assert_eq!(h.host.opened[0].1, h.repo.path());
    assert_eq!(h.controller.active(), Some(&id));
    assert_eq!(h.controller.session(&id).unwrap().state(), SessionState::Created);
}

#[test]
fn open_persists_record_and_hands_it_to_surface() {
    let mut h = Harness::new();
    let id = h.open();
    let expected = RestorationRecord::new(h.repo.path().to_string_lossy());

    assert_eq!(h.controller.store().get(&id), Some(&expected));

    let surface = h.host.surface(&id);
    assert!(surface.posted().is_empty(), "nothing posted before ready");
    h.send(&id, r#"{"command":"ready"}"#);
    assert_eq!(surface.posted(), vec![state_message(h.repo.path())]);
}

#[test]
fn opening_an_open_folder_focuses_its_panel() {
    let mut h = Harness::new();
    let first = h.open();
    let _other = h.open_in("other");

    let again = h.open();

    assert_eq!(again, first);
    assert_eq!(h.controller.session_count(), 2);
    assert_eq!(h.launcher.count(), 2);
    assert_eq!(h.controller.store().len(), 2);
    assert_eq!(h.controller.active(), Some(&first));
    assert_eq!(h.host.surface(&first).focuses(), 1);
}

#[test]
fn relaunching_with_a_restored_folder_keeps_one_panel() {
    let repo = tempfile::tempdir().unwrap();
    let state = tempfile::tempdir().unwrap();
    let path = state.path().join("panels.json");

    let mut counts = Vec::new();
    for _ in 0..3 {
        let mut h = Harness::with_store(StateStore::open(&path));
        h.controller.restore_all(&mut h.host);
        h.controller
            .open_for_directory(Some(repo.path()), &mut h.host)
            .expect("open should succeed");
        counts.push(h.controller.session_count());
        h.controller.shutdown();
    }

    assert_eq!(counts, vec![1, 1, 1]);
    assert_eq!(StateStore::open(&path).len(), 1);
}

#[test]
fn spawn_failure_is_reported_and_opens_no_surface() {
    let mut h = Harness::new();
    h.launcher.fail.set(true);
    let repo = h.repo.path().to_path_buf();
    let result = h.controller.open_for_directory(Some(&repo), &mut h.host);

    assert!(matches!(result, Err(SessionError::Spawn { .. })));
    assert!(h.host.opened.is_empty());
    assert_eq!(h.controller.session_count(), 0);
    assert!(h.controller.store().is_empty());
    let errors = h.error_bodies();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("lazygit"));
}

#[test]
fn surface_failure_kills_the_new_process() {
    let mut h = Harness::new();
    h.host.fail = true;
    let repo = h.repo.path().to_path_buf();
    let result = h.controller.open_for_directory(Some(&repo), &mut h.host);

    assert!(matches!(result, Err(SessionError::Surface(_))));
    assert_eq!(h.launcher.last().kills(), 1);
    assert_eq!(h.controller.session_count(), 0);
}

// =============================================================================
// OUTPUT
// =============================================================================

#[test]
fn output_before_ready_is_buffered_in_order() {
    let mut h = Harness::new();
    let id = h.open();
    let process = h.launcher.last();
    let surface = h.host.surface(&id);

    process.emit(b"one ");
    h.controller.poll_processes();
    process.emit(b"two ");
    process.emit(b"three");
    h.controller.poll_processes();

    assert!(surface.posted().is_empty());
    assert_eq!(h.controller.session(&id).unwrap().pending_len(), 4);

    h.send(&id, r#"{"command":"ready"}"#);
    assert_eq!(surface.data(), "one two three");
    assert_eq!(h.controller.session(&id).unwrap().pending_len(), 0);
}

#[test]
fn output_after_ready_is_posted_immediately() {
    let mut h = Harness::new();
    let id = h.open();
    let process = h.launcher.last();
    let surface = h.host.surface(&id);
    h.send(&id, r#"{"command":"ready"}"#);

    process.emit(b"\x1b[32mstaged\x1b[0m");
    h.controller.poll_processes();
    assert_eq!(surface.data(), "\x1b[32mstaged\x1b[0m");
}

#[test]
fn repeated_ready_does_not_replay_output() {
    let mut h = Harness::new();
    let id = h.open();
    let process = h.launcher.last();
    let surface = h.host.surface(&id);

    process.emit(b"once");
    h.controller.poll_processes();
    h.send(&id, r#"{"command":"ready"}"#);
    h.send(&id, r#"{"command":"ready"}"#);
    assert_eq!(surface.data(), "once");
}

#[test]
fn split_utf8_is_decoded_across_chunks() {
    let mut h = Harness::new();
    let id = h.open();
    let process = h.launcher.last();
    let surface = h.host.surface(&id);
    h.send(&id, r#"{"command":"ready"}"#);

    let bytes = "─┬─".as_bytes();
    process.emit(&bytes[..2]);
    h.controller.poll_processes();
    process.emit(&bytes[2..]);
    h.controller.poll_processes();
    assert_eq!(surface.data(), "─┬─");
}

// =============================================================================
// SURFACE MESSAGES
// =============================================================================

#[test]
fn keystrokes_reach_the_process() {
    let mut h = Harness::new();
    let id = h.open();
    let process = h.launcher.last();

    h.send(&id, r#"{"command":"data","data":"j"}"#);
    h.send(&id, r#"{"command":"data","data":"\r"}"#);
    assert_eq!(process.written(), "j\r");
}

#[test]
fn typing_makes_a_surface_active() {
    let mut h = Harness::new();
    let first = h.open();
    let second = h.open_in("other");
    assert_eq!(h.controller.active(), Some(&second));

    h.send(&first, r#"{"command":"data","data":"q"}"#);
    assert_eq!(h.controller.active(), Some(&first));
}

#[test]
fn valid_resize_is_applied() {
    let mut h = Harness::new();
    let id = h.open();
    let process = h.launcher.last();

    h.send(&id, r#"{"command":"resize","cols":132,"rows":43}"#);
    assert_eq!(process.0.borrow().resizes, vec![(132, 43)]);
    assert_eq!(h.controller.session(&id).unwrap().size(), (132, 43));
}

#[test]
fn invalid_resize_is_ignored() {
    let mut h = Harness::new();
    let id = h.open();
    let process = h.launcher.last();

    h.send(&id, r#"{"command":"resize","cols":0,"rows":24}"#);
    h.send(&id, r#"{"command":"resize","cols":80}"#);
    h.send(&id, r#"{"command":"resize","cols":80,"rows":9000}"#);
    h.send(&id, r#"{"command":"resize","cols":"wide","rows":24}"#);
    assert!(process.0.borrow().resizes.is_empty());
    assert_eq!(h.controller.session(&id).unwrap().size(), (80, 24));
}

#[test]
fn resize_failure_disposes_session() {
    let mut h = Harness::new();
    let id = h.open();
    let surface = h.host.surface(&id);
    h.launcher.last().0.borrow_mut().fail_resizes = true;

    h.send(&id, r#"{"command":"resize","cols":100,"rows":30}"#);

    assert!(h.controller.session(&id).is_none());
    assert_eq!(surface.closes(), 1);
    assert!(h.controller.store().get(&id).is_none());
}

#[test]
fn echoed_state_is_stored() {
    let mut h = Harness::new();
    let id = h.open();

    h.send(&id, r#"{"command":"set-state","state":{"cwd":"/elsewhere"}}"#);
    assert_eq!(
        h.controller.store().get(&id),
        Some(&RestorationRecord::new("/elsewhere"))
    );

    h.send(&id, r#"{"command":"set-state","state":{}}"#);
    assert_eq!(
        h.controller.store().get(&id),
        Some(&RestorationRecord::new("/elsewhere"))
    );
}

#[test]
fn unknown_messages_and_surfaces_are_ignored() {
    let mut h = Harness::new();
    let id = h.open();
    let process = h.launcher.last();

    h.send(&id, r#"{"command":"eval","code":"rm -rf"}"#);
    h.send(&id, "garbage");
    h.send(&SurfaceId::from("stranger"), r#"{"command":"data","data":"x"}"#);
    assert_eq!(process.written(), "");
    assert_eq!(h.controller.session_count(), 1);
}

// =============================================================================
// TEARDOWN
// =============================================================================

#[test]
fn process_exit_disposes_session() {
    let mut h = Harness::new();
    let id = h.open();
    let process = h.launcher.last();
    let surface = h.host.surface(&id);
    h.send(&id, r#"{"command":"ready"}"#);

    process.emit(b"bye");
    process.exit();
    h.controller.poll_processes();

    assert_eq!(surface.data(), "bye", "final output is delivered first");
    assert_eq!(surface.closes(), 1);
    assert!(h.controller.session(&id).is_none());
    assert!(h.controller.store().get(&id).is_none());
}

#[test]
fn exit_before_ready_reports_last_output() {
    let mut h = Harness::new();
    let id = h.open();
    let process = h.launcher.last();

    process.emit(b"\x1b[31mfatal:\x1b[0m not a git repository\r\n");
    process.exit();
    h.controller.poll_processes();

    assert!(h.controller.session(&id).is_none());
    let errors = h.error_bodies();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].ends_with(": fatal: not a git repository"), "{}", errors[0]);
}

#[test]
fn exit_before_ready_without_output_still_reports() {
    let mut h = Harness::new();
    let _id = h.open();
    h.launcher.last().exit();
    h.controller.poll_processes();

    let errors = h.error_bodies();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("Lazygit exited in "));
}

#[test]
fn exit_after_ready_is_not_reported() {
    let mut h = Harness::new();
    let id = h.open();
    h.send(&id, r#"{"command":"ready"}"#);
    h.launcher.last().exit();
    h.controller.poll_processes();

    assert!(h.controller.session(&id).is_none());
    assert!(h.controller.notifications_mut().drain().is_empty());
}

#[test]
fn closing_surface_kills_process_and_stops_messages() {
    let mut h = Harness::new();
    let id = h.open();
    let process = h.launcher.last();
    let surface = h.host.surface(&id);
    h.send(&id, r#"{"command":"ready"}"#);
    let posted_before = surface.posted().len();

    h.send(&id, r#"{"command":"close"}"#);
    assert_eq!(process.kills(), 1);
    assert!(h.controller.store().get(&id).is_none());

    process.emit(b"late");
    h.controller.poll_processes();
    h.send(&id, r#"{"command":"data","data":"x"}"#);
    assert_eq!(surface.posted().len(), posted_before);
    assert_eq!(process.written(), "");
}

#[test]
fn closed_event_after_disposal_is_harmless() {
    let mut h = Harness::new();
    let id = h.open();
    let surface = h.host.surface(&id);

    h.controller
        .handle_event(WebViewEvent::Closed { surface: id.clone() });
    h.controller
        .handle_event(WebViewEvent::Closed { surface: id.clone() });
    assert!(!h.controller.dispose(&id, DisposeReason::SurfaceClosed));
    assert_eq!(surface.closes(), 1);
    assert_eq!(h.launcher.last().kills(), 1);
}

#[test]
fn post_failure_disposes_session() {
    let mut h = Harness::new();
    let id = h.open();
    let surface = h.host.surface(&id);
    h.send(&id, r#"{"command":"ready"}"#);

    surface.0.borrow_mut().fail_posts = true;
    h.launcher.last().emit(b"output");
    h.controller.poll_processes();

    assert!(h.controller.session(&id).is_none());
    assert_eq!(h.launcher.last().kills(), 1);
}

#[test]
fn write_failure_disposes_session() {
    let mut h = Harness::new();
    let id = h.open();
    h.launcher.last().0.borrow_mut().fail_writes = true;

    h.send(&id, r#"{"command":"data","data":"x"}"#);
    assert!(h.controller.session(&id).is_none());
}

#[test]
fn session_dispose_runs_once() {
    let process = FakeProcess::default();
    let surface = FakeSurface::default();
    let mut session = Session::new(
        SurfaceId::from("s"),
        PathBuf::from("/repo"),
        Box::new(process.clone()),
        Box::new(surface.clone()),
        (80, 24),
    );

    assert!(session.dispose());
    assert!(!session.dispose());
    assert!(!session.dispose());
    drop(session);

    assert_eq!(process.kills(), 1);
    assert_eq!(surface.closes(), 1);
}

#[test]
fn shutdown_disposes_all_and_keeps_records() {
    let mut h = Harness::new();
    let a = h.open();
    let b = h.open_in("other");

    h.controller.shutdown();
    h.controller.shutdown();

    assert_eq!(h.controller.session_count(), 0);
    for process in h.launcher.processes.borrow().iter() {
        assert_eq!(process.kills(), 1);
    }
    assert_eq!(h.host.surface(&a).closes(), 1);
    assert_eq!(h.host.surface(&b).closes(), 1);
    assert!(h.controller.store().get(&a).is_some());
    assert!(h.controller.store().get(&b).is_some());
}

// =============================================================================
// REFRESH
// =============================================================================

#[test]
fn refresh_restarts_process_with_current_size() {
    let mut h = Harness::new();
    let id = h.open();
    let old = h.launcher.last();
    let surface = h.host.surface(&id);
    h.send(&id, r#"{"command":"ready"}"#);
    h.send(&id, r#"{"command":"resize","cols":100,"rows":30}"#);

    h.controller.refresh_current();

    assert_eq!(old.kills(), 1);
    assert_eq!(h.launcher.count(), 2);
    assert_eq!(
        h.launcher.launched.borrow()[1],
        (h.repo.path().to_path_buf(), 100, 30)
    );
    assert_eq!(surface.posted().last(), Some(&HostMessage::Refresh));

    let new = h.launcher.last();
    new.emit(b"fresh");
    h.controller.poll_processes();
    assert!(surface.data().ends_with("fresh"));
    assert_eq!(h.controller.session_count(), 1);
}

#[test]
fn refresh_current_focuses_the_active_panel() {
    let mut h = Harness::new();
    let id = h.open();
    h.controller.refresh_current();
    assert_eq!(h.host.surface(&id).focuses(), 1);
}

#[test]
fn refresh_message_targets_its_surface() {
    let mut h = Harness::new();
    let first = h.open();
    let _second = h.open_in("other");
    let first_process = h.launcher.processes.borrow()[0].clone();

    h.send(&first, r#"{"command":"refresh"}"#);
    assert_eq!(first_process.kills(), 1);
    assert_eq!(h.controller.active(), Some(&first));
}

#[test]
fn failed_refresh_reports_and_disposes() {
    let mut h = Harness::new();
    let id = h.open();
    h.launcher.fail.set(true);

    h.controller.refresh(&id);

    assert!(h.controller.session(&id).is_none());
    assert_eq!(h.error_bodies().len(), 1);
}

#[test]
fn refresh_without_panels_only_informs() {
    let mut h = Harness::new();
    h.controller.refresh_current();
    let notes = h.controller.notifications_mut().drain();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].level, NotificationLevel::Info);
    assert_eq!(h.launcher.count(), 0);
}

// =============================================================================
// RESTORE
// =============================================================================

#[test]
fn restore_revives_valid_records_and_drops_the_rest() {
    let repo = tempfile::tempdir().unwrap();
    let state = tempfile::tempdir().unwrap();
    let path = state.path().join("panels.json");
    {
        let mut store = StateStore::open(&path);
        store.save(
            &SurfaceId::from("good"),
            RestorationRecord::new(repo.path().to_string_lossy()),
        );
        store.save(&SurfaceId::from("blank"), RestorationRecord::new(""));
        store.save(
            &SurfaceId::from("moved"),
            RestorationRecord::new(repo.path().join("gone").to_string_lossy()),
        );
    }

    let mut h = Harness::with_store(StateStore::open(&path));
    let restored = h.controller.restore_all(&mut h.host);

    assert_eq!(restored, 1);
    let good = SurfaceId::from("good");
    assert!(h.controller.session(&good).is_some());
    assert_eq!(h.host.opened[0].0, good);
    assert_eq!(h.controller.session(&good).unwrap().cwd(), repo.path());
    assert_eq!(h.launcher.launched.borrow()[0].0, repo.path());
    assert!(h.error_bodies().is_empty(), "bad records are dropped silently");
    assert_eq!(StateStore::open(&path).len(), 1);
}

#[test]
fn restore_drops_duplicate_records_for_one_folder() {
    let repo = tempfile::tempdir().unwrap();
    let state = tempfile::tempdir().unwrap();
    let path = state.path().join("panels.json");
    {
        let mut store = StateStore::open(&path);
        for name in ["a", "b", "c"] {
            store.save(
                &SurfaceId::from(name),
                RestorationRecord::new(repo.path().to_string_lossy()),
            );
        }
    }

    let mut h = Harness::with_store(StateStore::open(&path));
    assert_eq!(h.controller.restore_all(&mut h.host), 1);
    assert_eq!(h.controller.session_count(), 1);
    assert!(h.error_bodies().is_empty());
    assert_eq!(StateStore::open(&path).len(), 1);
}

#[test]
fn restore_of_record_without_directory_is_restoration_error() {
    let mut h = Harness::new();
    let result = h.controller.restore(
        SurfaceId::from("x"),
        &RestorationRecord::default(),
        &mut h.host,
    );
    assert!(matches!(result, Err(SessionError::Restoration)));
    assert_eq!(h.launcher.count(), 0);
}

// =============================================================================
// REGISTRY / LAYOUT
// =============================================================================

#[test]
fn closing_active_panel_activates_previous() {
    let mut h = Harness::new();
    let first = h.open();
    let second = h.open_in("other");

    h.controller.surface_closed(&second);
    assert_eq!(h.controller.active(), Some(&first));
    h.controller.surface_closed(&first);
    assert_eq!(h.controller.active(), None);
}

#[test]
fn layout_splits_viewport_into_columns() {
    let mut h = Harness::new();
    let a = h.open();
    let b = h.open_in("other");

    h.controller.layout(Rect {
        x: 0.0,
        y: 0.0,
        width: 1000.0,
        height: 600.0,
    });

    let left = h.host.surface(&a).0.borrow().bounds.clone();
    let right = h.host.surface(&b).0.borrow().bounds.clone();
    assert_eq!(left.last().map(|r| (r.x, r.width)), Some((0.0, 500.0)));
    assert_eq!(right.last().map(|r| (r.x, r.width)), Some((500.0, 500.0)));
    assert_eq!(right.last().map(|r| r.height), Some(600.0));
}
