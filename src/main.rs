use route_commands::Interpreter;

fn main() -> rustyline::Result<()> {
    Interpreter::default().repl()
}
