// File: src/cli.rs
//! Shared command-line interface logic, like printing help.

pub fn print_help() {
    println!(
        "Taskline v{} - A fast and simple personal task tracker",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    taskline [--root <path>]");
    println!("    taskline --help");
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>     Use a different directory for config and data.");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("COMMANDS:");
    println!("    todo <desc>                           Add a plain to-do");
    println!("    deadline <desc> /by <yyyy-mm-dd>      Add a deadline-bound task");
    println!("    event <desc> /from <date> /to <date>  Add a time-ranged event");
    println!("    list                                  Show every task with its position");
    println!("    mark <n> / unmark <n>                 Set or clear the done flag of task <n>");
    println!("    delete <n>                            Remove task <n> from the list");
    println!("    due <yyyy-mm-dd>                      Show deadlines due exactly on a date");
    println!("    find <keyword>                        Search task descriptions");
    println!("    alias <short> <canonical>             Register a command shorthand");
    println!("    bye                                   Exit the tracker");
    println!();
    println!("EXAMPLES:");
    println!("    todo read book");
    println!("    deadline return book /by 2025-03-24");
    println!("    event book club /from 2025-03-01 /to 2025-03-05");
    println!("    alias dl deadline");
    println!();
    println!("FILES:");
    println!("    Tasks persist to tasks.txt in the data directory (one task per line);");
    println!("    config.toml in the config directory can relocate it and seed aliases.");
}
