use crate::builtin::write_command_list;
use crate::command::{CommandFactory, ExitCode};
use crate::session::Session;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result};
use std::io::{BufRead, Write};

/// Factory allows creating instances of ExecutableCommand.
///
/// Only supports the built-in route commands defined in this crate.
pub(crate) struct Factory<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for Factory<T> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

/// The interactive command runner that owns the route list.
///
/// The interpreter maintains a [`Session`] and a list of [`CommandFactory`]
/// objects that are queried to create commands by name. See [`Default`] for
/// the built-in factories included out of the box.
///
/// Example
/// ```
/// use route_commands::Interpreter;
/// let mut runner = Interpreter::default();
/// let code = runner.run("help", &[]).unwrap();
/// assert_eq!(code, 0);
/// ```
pub struct Interpreter {
    session: Session,
    commands: Vec<Box<dyn CommandFactory>>,
}

impl Interpreter {
    /// Create a new interpreter with a custom set of command factories.
    pub fn new(commands: Vec<Box<dyn CommandFactory>>) -> Self {
        Self {
            session: Session::new(),
            commands,
        }
    }

    /// Run a single command invocation by name with arguments, using the
    /// process standard streams for prompts and output.
    ///
    /// Returns the command's exit code or an error if the command name is
    /// not recognized by any factory.
    pub fn run(&mut self, name: &str, args: &[&str]) -> anyhow::Result<ExitCode> {
        let mut stdin = std::io::stdin().lock();
        let mut stdout = std::io::stdout();
        self.run_with_io(name, args, &mut stdin, &mut stdout)
    }

    /// Same as [`run`](Self::run) but against caller-provided streams.
    /// Useful for embedding and for tests.
    pub fn run_with_io(
        &mut self,
        name: &str,
        args: &[&str],
        stdin: &mut dyn BufRead,
        stdout: &mut dyn Write,
    ) -> anyhow::Result<ExitCode> {
        for factory in &self.commands {
            if let Some(cmd) = factory.try_create(&self.session, name, args) {
                return cmd.execute(stdin, stdout, &mut self.session);
            }
        }
        Err(anyhow::anyhow!("command not found: {}", name))
    }

    /// The Read-Eval-Print Loop: prints the command list once, then reads
    /// lines until `exit`, Ctrl-C or Ctrl-D.
    pub fn repl(&mut self) -> Result<()> {
        let mut rl = DefaultEditor::new()?;
        write_command_list(&mut std::io::stdout())?;

        while !self.session.should_exit {
            let readline = rl.readline("Введите команду (add, info, list, load, save, exit, help): ");
            match readline {
                Ok(line) => {
                    rl.add_history_entry(line.as_str())?;
                    let (name, args) = split_command_line(&line);
                    let args_ref: Vec<&str> = args.iter().map(|s| s.as_str()).collect();
                    if self.run(&name, &args_ref).is_err() {
                        eprintln!("Неизвестная команда {}", name);
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    break;
                }
                Err(err) => {
                    println!("Error: {:?}", err);
                    break;
                }
            }
        }

        Ok(())
    }
}

/// Split an input line into a lowercased command token and at most one
/// argument. Command names are case-insensitive; the argument (a file path
/// for `load`/`save`) is passed through verbatim.
fn split_command_line(line: &str) -> (String, Vec<String>) {
    let trimmed = line.trim();
    match trimmed.split_once(char::is_whitespace) {
        Some((head, rest)) => (head.to_lowercase(), vec![rest.trim().to_string()]),
        None => (trimmed.to_lowercase(), Vec::new()),
    }
}

impl Default for Interpreter {
    /// Create an interpreter with the default set of commands:
    /// `add`, `list`, `select`, `help`, `exit`, `load`, `save`.
    fn default() -> Self {
        use crate::builtin::*;
        Self::new(vec![
            Box::new(Factory::<Add>::default()),
            Box::new(Factory::<List>::default()),
            Box::new(Factory::<Select>::default()),
            Box::new(Factory::<Help>::default()),
            Box::new(Factory::<Exit>::default()),
            Box::new(Factory::<Load>::default()),
            Box::new(Factory::<Save>::default()),
        ])
    }
}
