//! Commented default config written on first run.

pub(super) fn default_config_toml() -> &'static str {
    r##"# lazypane configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[tool]
# program = "lazygit"          # ".exe" is appended on Windows
# args = []
# fallback_shell = ""          # empty: cmd.exe on Windows, bash elsewhere

[tool.env]
# EDITOR = "nvim"

[terminal]
# term = "xterm-256color"
# colorterm = "truecolor"
# locale = "en_US.UTF-8"
# default_cols = 80            # 1-500
# default_rows = 24            # 1-500

[window]
# title = "Lazygit"
# width = 1280.0
# height = 800.0

[panel]
# devtools = false
# assets_dir = "/path/to/panel"
# font_family = "Menlo, Consolas, \"Courier New\", monospace"
# font_size = 14               # 6-48

[session]
# restore_on_launch = true
# state_file = "/path/to/panels.json"

[logging]
# level = "info"               # trace, debug, info, warn, error
"##
}
