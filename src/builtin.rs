use crate::command::{CommandFactory, ExecutableCommand, ExitCode};
use crate::interpreter::Factory;
use crate::persistence;
use crate::session::Session;
use crate::store::Route;
use anyhow::{Context, Result};
use argh::{EarlyExit, FromArgs};
use std::io::{BufRead, Write};
use std::path::Path;

/// Built-in commands known to the interpreter at compile time.
///
/// Builtins are parsed using the [`argh`] crate (`FromArgs`) and executed
/// directly in-process against the current [`Session`].
pub(crate) trait BuiltinCommand: Sized + FromArgs {
    /// Canonical name of the command, e.g. "add" or "list".
    fn name() -> &'static str;

    /// Executes the command using provided IO streams and session state.
    ///
    /// Return value should follow shell conventions: 0 for success, non-zero for error.
    fn execute(
        self,
        stdin: &mut dyn BufRead,
        stdout: &mut dyn Write,
        session: &mut Session,
    ) -> Result<ExitCode>;
}

impl<T: BuiltinCommand> ExecutableCommand for T {
    fn execute(
        self: Box<Self>,
        stdin: &mut dyn BufRead,
        stdout: &mut dyn Write,
        session: &mut Session,
    ) -> Result<ExitCode> {
        match T::execute(*self, stdin, stdout, session) {
            Ok(x) => Ok(x),
            Err(e) => {
                // Recoverable report: the loop keeps running and the store
                // stays as it was before the failed command.
                writeln!(stdout, "{:#}", e)?;
                Ok(1)
            }
        }
    }
}

struct InvalidArgs {
    output: String,
    is_error: bool,
}

impl ExecutableCommand for InvalidArgs {
    fn execute(
        self: Box<Self>,
        _stdin: &mut dyn BufRead,
        stdout: &mut dyn Write,
        _session: &mut Session,
    ) -> Result<ExitCode> {
        if self.is_error {
            // A known command with a bad argument shape is reported on
            // stderr, like an unknown command; requested help goes to stdout.
            eprint!("{}", self.output);
            Ok(1)
        } else {
            stdout.write_all(self.output.as_bytes())?;
            Ok(0)
        }
    }
}

impl<T: BuiltinCommand + 'static> CommandFactory for Factory<T> {
    fn try_create(
        &self,
        _session: &Session,
        name: &str,
        args: &[&str],
    ) -> Option<Box<dyn ExecutableCommand>> {
        if name == T::name() {
            Some(match T::from_args(&[name], args) {
                Ok(cmd) => Box::new(cmd),
                Err(EarlyExit { output, status }) => Box::new(InvalidArgs {
                    output,
                    is_error: status.is_err(),
                }),
            })
        } else {
            None
        }
    }
}

/// Write the prompt, flush so it shows before the read blocks, and read one
/// response line with the trailing newline stripped.
fn prompt_line(stdin: &mut dyn BufRead, stdout: &mut dyn Write, prompt: &str) -> Result<String> {
    write!(stdout, "{}", prompt)?;
    stdout.flush()?;
    let mut line = String::new();
    let read = stdin.read_line(&mut line)?;
    if read == 0 {
        anyhow::bail!("unexpected end of input");
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// The static command list shared by the startup banner and `help`.
pub(crate) fn write_command_list(stdout: &mut dyn Write) -> std::io::Result<()> {
    writeln!(stdout, "Список команд:\n")?;
    writeln!(stdout, "add - добавить маршрут;")?;
    writeln!(stdout, "list - вывести список маршрутов;")?;
    writeln!(
        stdout,
        "select <тип> - вывод на экран пунктов маршрута, используя номер маршрута;"
    )?;
    writeln!(stdout, "help - отобразить справку;")?;
    writeln!(stdout, "exit - завершить работу с программой.")?;
    writeln!(stdout, "load - загрузить данные из файла;")?;
    writeln!(stdout, "save - сохранить данные в файл;")?;
    Ok(())
}

#[derive(FromArgs)]
/// Запросить данные о новом маршруте и добавить его в список.
pub struct Add {}

impl BuiltinCommand for Add {
    fn name() -> &'static str {
        "add"
    }

    fn execute(
        self,
        stdin: &mut dyn BufRead,
        stdout: &mut dyn Write,
        session: &mut Session,
    ) -> Result<ExitCode> {
        let name1 = prompt_line(stdin, stdout, "Название начального пункта маршрута:  ")?;
        let name2 = prompt_line(stdin, stdout, "Название конечного пункта маршрута: ")?;
        let raw = prompt_line(stdin, stdout, "Номер маршрута: ")?;
        // A non-numeric answer must not crash the loop or touch the store.
        let number: i64 = raw
            .trim()
            .parse()
            .with_context(|| format!("некорректный номер маршрута: {:?}", raw))?;

        session.store.add(Route {
            name1,
            name2,
            number: number.into(),
            extra: serde_json::Map::new(),
        });
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Вывести список маршрутов в виде таблицы.
pub struct List {}

impl BuiltinCommand for List {
    fn name() -> &'static str {
        "list"
    }

    fn execute(
        self,
        _stdin: &mut dyn BufRead,
        stdout: &mut dyn Write,
        session: &mut Session,
    ) -> Result<ExitCode> {
        let line = format!(
            "+-{}-+-{}-+-{}-+-{}-+",
            "-".repeat(4),
            "-".repeat(30),
            "-".repeat(20),
            "-".repeat(8)
        );
        writeln!(stdout, "{}", line)?;
        writeln!(
            stdout,
            "| {:^4} | {:^30} | {:^20} | {:^8} |",
            "№", "Начальный пункт.", "Конечный пункт", "№ маршрута"
        )?;
        writeln!(stdout, "{}", line)?;
        for (idx, route) in session.store.routes().iter().enumerate() {
            writeln!(
                stdout,
                "| {:>4} | {:<30} | {:<20} | {:>8} |",
                idx + 1,
                route.name1,
                route.name2,
                // serde_json::Number's Display ignores width flags; format
                // through a String so the {:>8} padding takes effect.
                route.number.to_string()
            )?;
        }
        writeln!(stdout, "{}", line)?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Найти маршрут по его номеру и вывести начальный и конечный пункты.
pub struct Select {
    #[argh(positional, greedy)]
    /// ignored; the route number is prompted for interactively.
    pub _args: Vec<String>,
}

impl BuiltinCommand for Select {
    fn name() -> &'static str {
        "select"
    }

    fn execute(
        self,
        stdin: &mut dyn BufRead,
        stdout: &mut dyn Write,
        session: &mut Session,
    ) -> Result<ExitCode> {
        let raw = prompt_line(stdin, stdout, "Введите значение: ")?;
        let number: i64 = raw
            .trim()
            .parse()
            .with_context(|| format!("некорректный номер маршрута: {:?}", raw))?;

        match session.store.find_by_number(number) {
            Some(route) => {
                writeln!(stdout, "Начальный пункт маршрута -  {}", route.name1)?;
                writeln!(stdout, "Конечный пункт маршрута -  {}", route.name2)?;
            }
            None => {
                writeln!(stdout, "Маршрут с таким номером не найден")?;
            }
        }
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Отобразить справку по командам.
pub struct Help {}

impl BuiltinCommand for Help {
    fn name() -> &'static str {
        "help"
    }

    fn execute(
        self,
        _stdin: &mut dyn BufRead,
        stdout: &mut dyn Write,
        _session: &mut Session,
    ) -> Result<ExitCode> {
        write_command_list(stdout)?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Завершить работу с программой.
pub struct Exit {}

impl BuiltinCommand for Exit {
    fn name() -> &'static str {
        "exit"
    }

    fn execute(
        self,
        _stdin: &mut dyn BufRead,
        _stdout: &mut dyn Write,
        session: &mut Session,
    ) -> Result<ExitCode> {
        session.should_exit = true;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Загрузить список маршрутов из JSON-файла.
pub struct Load {
    #[argh(positional)]
    /// путь к файлу с данными.
    pub file: String,
}

impl BuiltinCommand for Load {
    fn name() -> &'static str {
        "load"
    }

    fn execute(
        self,
        _stdin: &mut dyn BufRead,
        _stdout: &mut dyn Write,
        session: &mut Session,
    ) -> Result<ExitCode> {
        let routes = persistence::load_routes(Path::new(&self.file))?;
        // An empty document leaves the current list in place.
        if !routes.is_empty() {
            session.store.replace(routes);
        }
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Сохранить список маршрутов в JSON-файл.
pub struct Save {
    #[argh(positional)]
    /// путь к файлу с данными.
    pub file: String,
}

impl BuiltinCommand for Save {
    fn name() -> &'static str {
        "save"
    }

    fn execute(
        self,
        _stdin: &mut dyn BufRead,
        _stdout: &mut dyn Write,
        session: &mut Session,
    ) -> Result<ExitCode> {
        persistence::save_routes(Path::new(&self.file), session.store.routes())?;
        Ok(0)
    }
}
