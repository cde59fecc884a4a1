//! Line-based REPL with rustyline
//!
//! Every line is compiled as its own source text against one long-lived
//! [`Compiler`], so definitions persist from line to line. Lines starting
//! with `:` are commands.

use std::io;
use std::path::PathBuf;

use rustyline::error::ReadlineError;
use rustyline::history::FileHistory;
use rustyline::{CompletionType, Config, EditMode, Editor};

use crate::frontend::{Compiler, UnitKind, UnitOutcome};
use crate::util::config::CompileConfig;
use crate::util::diagnostic::{EmitterConfig, TextEmitter};

/// Line REPL configuration
#[derive(Debug, Clone)]
pub struct LineReplConfig {
    /// Prompt to display
    pub prompt: String,
    /// Enable VI mode
    pub vi_mode: bool,
    /// History file path
    pub history_file: Option<PathBuf>,
}

impl Default for LineReplConfig {
    fn default() -> Self {
        Self {
            prompt: "ready> ".into(),
            vi_mode: false,
            history_file: None,
        }
    }
}

/// What the REPL should do after a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplAction {
    Continue,
    Exit,
}

const HELP: &str = "\
Enter definitions (`def int f(int x) x * 2`) or expressions (`f(21)`).
Commands:
  :ir      print the module IR
  :reset   forget all definitions
  :help    show this message
  :quit    leave the REPL";

/// Compiler state shared by every line
pub struct ReplState {
    config: CompileConfig,
    compiler: Compiler,
}

impl ReplState {
    pub fn new(config: CompileConfig) -> Self {
        let compiler = Self::fresh_compiler(&config);
        Self { config, compiler }
    }

    fn fresh_compiler(config: &CompileConfig) -> Compiler {
        let emitter = TextEmitter::with_config(EmitterConfig {
            use_colors: config.color,
            ..EmitterConfig::default()
        });
        Compiler::new(config.clone())
            .with_interpreter()
            .with_reporter(emitter)
    }

    pub fn compiler(&self) -> &Compiler {
        &self.compiler
    }

    /// Handle one input line; returns the lines to print on stdout
    pub fn eval_line(
        &mut self,
        line: &str,
    ) -> (ReplAction, Vec<String>) {
        let trimmed = line.trim();
        if let Some(command) = trimmed.strip_prefix(':') {
            return self.command(command.trim());
        }

        let output = self
            .compiler
            .compile("<repl>", line)
            .into_iter()
            .filter_map(|outcome| match outcome {
                UnitOutcome::Success(unit) => match (unit.kind, unit.value) {
                    (UnitKind::Definition, _) => Some(format!("defined {}", unit.name)),
                    (UnitKind::Expression, Some(value)) => Some(value.to_string()),
                    (UnitKind::Expression, None) => Some(unit.ir),
                },
                // already rendered by the reporter
                UnitOutcome::Failure(_) => None,
            })
            .collect();
        (ReplAction::Continue, output)
    }

    fn command(
        &mut self,
        command: &str,
    ) -> (ReplAction, Vec<String>) {
        match command {
            "q" | "quit" | "exit" => (ReplAction::Exit, Vec::new()),
            "ir" => (
                ReplAction::Continue,
                vec![self.compiler.module().to_string()],
            ),
            "reset" => {
                self.compiler = Self::fresh_compiler(&self.config);
                (ReplAction::Continue, vec!["all definitions cleared".into()])
            }
            "h" | "help" => (ReplAction::Continue, vec![HELP.into()]),
            other => (
                ReplAction::Continue,
                vec![format!("unknown command ':{}', try :help", other)],
            ),
        }
    }
}

/// Line REPL
pub struct LineRepl {
    config: LineReplConfig,
    editor: Editor<(), FileHistory>,
    state: ReplState,
}

impl LineRepl {
    pub fn new(compile_config: CompileConfig) -> io::Result<Self> {
        Self::with_config(compile_config, LineReplConfig::default())
    }

    pub fn with_config(
        compile_config: CompileConfig,
        config: LineReplConfig,
    ) -> io::Result<Self> {
        let rl_config = Config::builder()
            .history_ignore_space(true)
            .completion_type(CompletionType::List)
            .edit_mode(if config.vi_mode {
                EditMode::Vi
            } else {
                EditMode::Emacs
            })
            .build();

        let mut editor = Editor::with_config(rl_config)
            .map_err(|e| io::Error::other(format!("readline error: {}", e)))?;

        if let Some(history_file) = &config.history_file {
            if history_file.exists() {
                let _ = editor.load_history(history_file);
            }
        }

        Ok(Self {
            config,
            editor,
            state: ReplState::new(compile_config),
        })
    }

    /// Run until `:quit` or end of input
    pub fn run(&mut self) -> io::Result<()> {
        println!("mc {} - type :help for assistance", crate::VERSION);

        loop {
            match self.editor.readline(&self.config.prompt) {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    let _ = self.editor.add_history_entry(line.as_str());

                    let (action, output) = self.state.eval_line(&line);
                    for text in output {
                        println!("{}", text);
                    }
                    if action == ReplAction::Exit {
                        break;
                    }
                }
                Err(ReadlineError::Eof) => break,
                Err(ReadlineError::Interrupted) => {
                    println!("(Interrupted)");
                    continue;
                }
                Err(e) => return Err(io::Error::other(e.to_string())),
            }
        }

        if let Some(history_file) = &self.config.history_file {
            let _ = self.editor.save_history(history_file);
        }
        Ok(())
    }
}
