//! PTY spawn logic: start the tool, falling back to an interactive shell.

use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;

use lazypane_common::{PtyError, SessionError};
use lazypane_config::schema::{TerminalConfig, ToolConfig};
use portable_pty::{native_pty_system, CommandBuilder, PtySize};

use super::types::{LaunchMode, Launcher, PtyHandle, PtyProcess, PTY_READ_CHUNK};

// =============================================================================
// PROGRAM RESOLUTION
// =============================================================================

/// The tool's executable name for this platform.
///
/// On Windows a bare name gets `.exe` appended.
pub fn tool_program(program: &str) -> String {
    #[cfg(windows)]
    {
        if Path::new(program).extension().is_none() {
            return format!("{program}.exe");
        }
    }
    program.to_string()
}

/// The interactive shell used when the tool can't be spawned directly.
///
/// - Unix: `bash`
/// - Windows: `cmd.exe`
pub fn default_fallback_shell() -> String {
    #[cfg(windows)]
    {
        "cmd.exe".to_string()
    }
    #[cfg(not(windows))]
    {
        "bash".to_string()
    }
}

// =============================================================================
// LAUNCH SPEC
// =============================================================================

/// Everything needed to start the tool in one directory.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchPlan {
    pub program: String,
    pub args: Vec<String>,
    pub fallback_shell: String,
    pub cwd: PathBuf,
    /// Variables set on top of the inherited environment, applied in order.
    pub env: Vec<(String, String)>,
    pub cols: u16,
    pub rows: u16,
}

impl LaunchPlan {
    pub fn new(
        tool: &ToolConfig,
        terminal: &TerminalConfig,
        cwd: &Path,
        cols: u16,
        rows: u16,
    ) -> Self {
        let fallback_shell = if tool.fallback_shell.trim().is_empty() {
            default_fallback_shell()
        } else {
            tool.fallback_shell.clone()
        };
        Self {
            program: tool_program(&tool.program),
            args: tool.args.clone(),
            fallback_shell,
            cwd: cwd.to_path_buf(),
            env: terminal_env(terminal, &tool.env),
            cols,
            rows,
        }
    }

    /// The line typed into the fallback shell to start the tool.
    ///
    /// The program and each argument are quoted for the shell, so an
    /// argument containing spaces stays one word.
    pub fn typed_invocation(&self) -> String {
        let mut line = shell_quote(&self.program);
        for arg in &self.args {
            line.push(' ');
            line.push_str(&shell_quote(arg));
        }
        line.push('\r');
        line
    }
}

/// Quote one word for the platform's fallback shell. Plain words pass through.
fn shell_quote(word: &str) -> String {
    let plain = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=@+,%".contains(c));
    if plain {
        return word.to_string();
    }
    quote_for_shell(word)
}

#[cfg(not(windows))]
fn quote_for_shell(word: &str) -> String {
    format!("'{}'", word.replace('\'', r"'\''"))
}

#[cfg(windows)]
fn quote_for_shell(word: &str) -> String {
    format!("\"{}\"", word.replace('"', "\\\""))
}

/// Terminal variables for the child, then user overrides.
fn terminal_env(
    terminal: &TerminalConfig,
    extra: &HashMap<String, String>,
) -> Vec<(String, String)> {
    let mut env = vec![
        ("TERM".to_string(), terminal.term.clone()),
        ("COLORTERM".to_string(), terminal.colorterm.clone()),
        ("LANG".to_string(), terminal.locale.clone()),
        ("LC_ALL".to_string(), terminal.locale.clone()),
    ];
    let mut keys: Vec<&String> = extra.keys().collect();
    keys.sort();
    for key in keys {
        env.push((key.clone(), extra[key].clone()));
    }
    env
}

/// Build a `CommandBuilder` that inherits the host environment.
fn build_command(program: &str, args: &[String], plan: &LaunchPlan) -> CommandBuilder {
    let mut cmd = CommandBuilder::new(program);
    cmd.args(args);
    cmd.cwd(&plan.cwd);
    for (key, value) in &plan.env {
        cmd.env(key, value);
    }
    cmd
}

// =============================================================================
// SPAWN
// =============================================================================

/// Spawn `program` in a new PTY sized and configured from `plan`.
///
/// Returns a `PtyHandle` that owns the master side of the PTY pair.
/// A background thread reads output from the PTY and sends chunks
/// over the returned handle's `output_rx` channel.
pub fn spawn_pty(program: &str, args: &[String], plan: &LaunchPlan) -> Result<PtyHandle, PtyError> {
    let pty_system = native_pty_system();

    let size = PtySize {
        rows: plan.rows,
        cols: plan.cols,
        pixel_width: 0,
        pixel_height: 0,
    };

    let pair = pty_system
        .openpty(size)
        .map_err(|e| PtyError::Open(e.to_string()))?;

    let cmd = build_command(program, args, plan);

    let child = pair
        .slave
        .spawn_command(cmd)
        .map_err(|e| PtyError::Spawn {
            program: program.to_string(),
            reason: e.to_string(),
        })?;

    // Only the master side is needed from here on
    drop(pair.slave);

    let writer = pair
        .master
        .take_writer()
        .map_err(|e| PtyError::Open(format!("failed to take PTY writer: {e}")))?;

    let mut reader = pair
        .master
        .try_clone_reader()
        .map_err(|e| PtyError::Open(format!("failed to clone PTY reader: {e}")))?;

    let (tx, rx) = mpsc::channel::<Vec<u8>>();

    thread::Builder::new()
        .name("pty-reader".to_string())
        .spawn(move || {
            let mut buf = [0u8; PTY_READ_CHUNK];
            loop {
                match reader.read(&mut buf) {
                    Ok(0) => break, // EOF: child exited
                    Ok(n) => {
                        if tx.send(buf[..n].to_vec()).is_err() {
                            break; // Receiver dropped
                        }
                    }
                    Err(e) => {
                        tracing::debug!("PTY reader error: {e}");
                        break;
                    }
                }
            }
        })
        .map_err(|e| PtyError::Open(format!("failed to spawn PTY reader thread: {e}")))?;

    Ok(PtyHandle {
        writer,
        output_rx: rx,
        child,
        master: pair.master,
        size,
        launch: LaunchMode::Direct,
    })
}

/// Try the tool directly, then an interactive shell with the invocation typed in.
///
/// `spawn` is called with `(program, args)`. Both failures are reported
/// together in `SessionError::Spawn`.
pub(super) fn spawn_with_fallback<P, F>(
    plan: &LaunchPlan,
    mut spawn: F,
) -> Result<(P, LaunchMode), SessionError>
where
    P: PtyProcess,
    F: FnMut(&str, &[String]) -> Result<P, PtyError>,
{
    let primary = match spawn(&plan.program, &plan.args) {
        Ok(process) => return Ok((process, LaunchMode::Direct)),
        Err(e) => e,
    };

    tracing::warn!(
        program = %plan.program,
        shell = %plan.fallback_shell,
        error = %primary,
        "Direct spawn failed, falling back to shell"
    );

    let spawn_error = |fallback: String| SessionError::Spawn {
        program: plan.program.clone(),
        primary: primary.to_string(),
        shell: plan.fallback_shell.clone(),
        fallback,
    };

    let mut shell = spawn(&plan.fallback_shell, &[]).map_err(|e| spawn_error(e.to_string()))?;

    if let Err(e) = shell.write_input(plan.typed_invocation().as_bytes()) {
        shell.kill();
        return Err(spawn_error(e.to_string()));
    }

    Ok((
        shell,
        LaunchMode::ShellFallback {
            shell: plan.fallback_shell.clone(),
        },
    ))
}

/// Start the tool described by `plan` in a real PTY.
pub fn spawn_tool(plan: &LaunchPlan) -> Result<PtyHandle, SessionError> {
    let (mut handle, mode) =
        spawn_with_fallback(plan, |program, args| spawn_pty(program, args, plan))?;
    handle.launch = mode;
    Ok(handle)
}

// =============================================================================
// LAUNCHER
// =============================================================================

/// Launches the configured tool in real PTYs.
#[derive(Debug, Clone)]
pub struct ToolLauncher {
    tool: ToolConfig,
    terminal: TerminalConfig,
}

impl ToolLauncher {
    pub fn new(tool: ToolConfig, terminal: TerminalConfig) -> Self {
        Self { tool, terminal }
    }
}

impl Launcher for ToolLauncher {
    fn launch(
        &self,
        cwd: &Path,
        cols: u16,
        rows: u16,
    ) -> Result<Box<dyn PtyProcess>, SessionError> {
        let plan = LaunchPlan::new(&self.tool, &self.terminal, cwd, cols, rows);
        let handle = spawn_tool(&plan)?;
        tracing::info!(
            program = %plan.program,
            cwd = %cwd.display(),
            cols,
            rows,
            mode = ?handle.launch_mode(),
            "Tool launched"
        );
        Ok(Box::new(handle))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_state::pty_bridge::types::Drained;

    #[derive(Debug, Default)]
    struct Recorder {
        written: Vec<u8>,
        killed: bool,
        fail_writes: bool,
    }

    impl PtyProcess for Recorder {
        fn write_input(&mut self, data: &[u8]) -> Result<(), PtyError> {
            if self.fail_writes {
                return Err(PtyError::Write("closed".into()));
            }
            self.written.extend_from_slice(data);
            Ok(())
        }
        fn resize(&mut self, _cols: u16, _rows: u16) -> Result<(), PtyError> {
            Ok(())
        }
        fn drain_output(&mut self) -> Drained {
            Drained::default()
        }
        fn kill(&mut self) {
            self.killed = true;
        }
    }

    fn plan(program: &str, shell: &str) -> LaunchPlan {
        let tool = ToolConfig {
            program: program.into(),
            fallback_shell: shell.into(),
            ..Default::default()
        };
        LaunchPlan::new(&tool, &TerminalConfig::default(), Path::new("/tmp"), 80, 24)
    }

    fn not_found(program: &str) -> PtyError {
        PtyError::Spawn {
            program: program.into(),
            reason: "not found".into(),
        }
    }

    #[test]
    fn env_sets_terminal_and_locale() {
        let plan = plan("lazygit", "bash");
        assert!(plan.env.contains(&("TERM".into(), "xterm-256color".into())));
        assert!(plan.env.contains(&("COLORTERM".into(), "truecolor".into())));
        assert!(plan.env.contains(&("LANG".into(), "en_US.UTF-8".into())));
        assert!(plan.env.contains(&("LC_ALL".into(), "en_US.UTF-8".into())));
    }

    #[test]
    fn user_env_comes_after_terminal_defaults() {
        let mut tool = ToolConfig::default();
        tool.env.insert("TERM".into(), "screen".into());
        tool.env.insert("GIT_PAGER".into(), "cat".into());
        let plan = LaunchPlan::new(&tool, &TerminalConfig::default(), Path::new("/"), 80, 24);
        let last_term = plan.env.iter().rev().find(|(k, _)| k == "TERM").unwrap();
        assert_eq!(last_term.1, "screen");
        assert!(plan.env.contains(&("GIT_PAGER".into(), "cat".into())));
    }

    #[test]
    fn blank_fallback_shell_uses_platform_default() {
        let plan = plan("lazygit", "  ");
        assert_eq!(plan.fallback_shell, default_fallback_shell());
    }

    #[test]
    fn typed_invocation_ends_with_carriage_return() {
        let mut s = plan("lazygit", "bash");
        assert!(s.typed_invocation().ends_with('\r'));
        s.args = vec!["--debug".into()];
        assert!(s.typed_invocation().contains(" --debug"));
    }

    #[cfg(not(windows))]
    #[test]
    fn typed_invocation_keeps_spaced_args_as_one_word() {
        let mut s = plan("lazygit", "bash");
        s.args = vec!["-p".into(), "/my repo".into(), "it's".into()];
        assert_eq!(s.typed_invocation(), "lazygit -p '/my repo' 'it'\\''s'\r");
    }

    #[cfg(not(windows))]
    #[test]
    fn typed_invocation_quotes_program_path_and_empty_args() {
        let mut s = plan("/opt/my tools/lazygit", "bash");
        s.args = vec![String::new()];
        assert_eq!(s.typed_invocation(), "'/opt/my tools/lazygit' ''\r");
    }

    #[cfg(windows)]
    #[test]
    fn typed_invocation_double_quotes_spaced_args_on_windows() {
        let mut s = plan("lazygit", "cmd.exe");
        s.args = vec!["-p".into(), r"C:\my repo".into()];
        assert_eq!(s.typed_invocation(), "lazygit.exe -p \"C:\\my repo\"\r");
    }

    #[cfg(not(windows))]
    #[test]
    fn program_name_is_kept_on_unix() {
        assert_eq!(tool_program("lazygit"), "lazygit");
        assert_eq!(default_fallback_shell(), "bash");
    }

    #[cfg(windows)]
    #[test]
    fn program_gets_exe_suffix_on_windows() {
        assert_eq!(tool_program("lazygit"), "lazygit.exe");
        assert_eq!(tool_program("lazygit.exe"), "lazygit.exe");
        assert_eq!(default_fallback_shell(), "cmd.exe");
    }

    #[test]
    fn direct_spawn_skips_fallback() {
        let plan = plan("lazygit", "bash");
        let mut calls = Vec::new();
        let (process, mode) = spawn_with_fallback(&plan, |program, _| {
            calls.push(program.to_string());
            Ok(Recorder::default())
        })
        .unwrap();
        assert_eq!(mode, LaunchMode::Direct);
        assert!(process.written.is_empty());
        assert_eq!(calls.len(), 1);
    }

    #[test]
    fn failed_spawn_types_invocation_into_shell() {
        let plan = plan("lazygit", "bash");
        let (process, mode) = spawn_with_fallback(&plan, |program, args| {
            if program == "bash" {
                assert!(args.is_empty());
                Ok(Recorder::default())
            } else {
                Err(not_found(program))
            }
        })
        .unwrap();
        assert_eq!(
            mode,
            LaunchMode::ShellFallback {
                shell: "bash".into()
            }
        );
        assert_eq!(process.written, plan.typed_invocation().into_bytes());
    }

    #[test]
    fn both_failures_are_reported() {
        let plan = plan("lazygit", "bash");
        let err = spawn_with_fallback::<Recorder, _>(&plan, |program, _| Err(not_found(program)))
            .unwrap_err();
        match err {
            SessionError::Spawn {
                program,
                primary,
                shell,
                fallback,
            } => {
                assert_eq!(program, plan.program);
                assert!(primary.contains("not found"));
                assert_eq!(shell, "bash");
                assert!(fallback.contains("not found"));
            }
            other => panic!("expected spawn error, got {other:?}"),
        }
    }

    #[test]
    fn failed_typing_is_a_spawn_error() {
        let plan = plan("lazygit", "bash");
        let result = spawn_with_fallback(&plan, |program, _| {
            if program == "bash" {
                Ok(Recorder {
                    fail_writes: true,
                    ..Default::default()
                })
            } else {
                Err(not_found(program))
            }
        });
        match result {
            Err(SessionError::Spawn { fallback, .. }) => assert!(fallback.contains("closed")),
            other => panic!("expected spawn error, got {:?}", other.map(|(_, m)| m)),
        }
    }

    #[cfg(unix)]
    #[test]
    fn real_spawn_reports_missing_program_and_shell() {
        let dir = tempfile::tempdir().unwrap();
        let tool = ToolConfig {
            program: "lazypane-no-such-tool".into(),
            fallback_shell: "lazypane-no-such-shell".into(),
            ..Default::default()
        };
        let plan = LaunchPlan::new(&tool, &TerminalConfig::default(), dir.path(), 80, 24);
        assert!(matches!(spawn_tool(&plan), Err(SessionError::Spawn { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn real_spawn_runs_in_cwd() {
        let dir = tempfile::tempdir().unwrap();
        let tool = ToolConfig {
            program: "/bin/sh".into(),
            args: vec!["-c".into(), "pwd".into()],
            ..Default::default()
        };
        let plan = LaunchPlan::new(&tool, &TerminalConfig::default(), dir.path(), 80, 24);
        let mut handle = spawn_tool(&plan).expect("spawn should succeed");
        assert_eq!(handle.launch_mode(), &LaunchMode::Direct);
        assert_eq!(handle.size(), (80, 24));

        let mut output = Vec::new();
        for _ in 0..50 {
            let drained = handle.drain_output();
            for chunk in drained.chunks {
                output.extend_from_slice(&chunk);
            }
            if drained.finished {
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(50));
        }
        let text = String::from_utf8_lossy(&output);
        let name = dir.path().file_name().unwrap().to_string_lossy().to_string();
        assert!(text.contains(&name), "pwd output should name cwd, got: {text}");
        handle.kill();
    }
}
