use anyhow::{Context, Result};
use clap::Parser;
use tmsim::{Outcome, Profile, Program, ProgramManager, Step, TuringMachine};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// The built-in program to run. Every built-in program runs when omitted
    #[clap(short, long)]
    program: Option<String>,

    /// Replace the program's initial tape
    #[clap(short, long)]
    input: Option<String>,

    /// Fail after this many transitions instead of running until the machine halts
    #[clap(short, long)]
    max_steps: Option<usize>,

    /// Print each step of the execution
    #[clap(short = 'd', long)]
    debug: bool,

    /// Print the outcome as JSON
    #[clap(long)]
    json: bool,

    /// List the built-in programs and exit
    #[clap(short, long)]
    list: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.list {
        for index in 0..ProgramManager::get_program_count() {
            let info = ProgramManager::get_program_info(index)?;
            println!(
                "{:<18} {:<9} tape: {:<10} states: {} rules: {}",
                info.name,
                if info.bounded { "bounded" } else { "unbounded" },
                info.initial_tape,
                info.state_count,
                info.rule_count
            );
        }
        return Ok(());
    }

    let programs = match &cli.program {
        Some(name) => vec![ProgramManager::get_program_by_name(name)?],
        None => ProgramManager::list_program_names()
            .iter()
            .map(|name| ProgramManager::get_program_by_name(name))
            .collect::<Result<Vec<_>, _>>()?,
    };

    let titled = programs.len() > 1;
    for (i, program) in programs.into_iter().enumerate() {
        if i > 0 {
            println!();
        }
        let name = program.name.clone();
        if titled {
            println!("Program: {}", name);
        }
        run(configure(program, &cli), &cli).with_context(|| format!("running '{}'", name))?;
    }

    Ok(())
}

fn configure(mut program: Program, cli: &Cli) -> Program {
    if let Some(input) = &cli.input {
        program = program.with_input(input);
    }
    if let Some(max_steps) = cli.max_steps {
        program = program.with_max_steps(max_steps);
    }
    program
}

fn run(program: Program, cli: &Cli) -> Result<()> {
    let bounded = matches!(program.profile, Profile::Bounded(_));
    let original = program.initial_tape();
    let mut machine = TuringMachine::new(program)?;

    if cli.debug {
        print_state(&machine);
        while !exhausted(&machine, cli.max_steps) {
            match machine.step()? {
                Step::Continue => print_state(&machine),
                Step::Halt(halt) => {
                    println!("Machine halted: {}", halt);
                    break;
                }
            }
        }
    }

    let outcome = machine.run()?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print!("{}", report(&original, &outcome, bounded));
    }

    Ok(())
}

/// The cap only counts when another transition would still apply; a machine about to
/// halt by omission is left to halt.
fn exhausted(machine: &TuringMachine, max_steps: Option<usize>) -> bool {
    max_steps.is_some_and(|limit| machine.step_count() >= limit) && machine.has_transition()
}

fn print_state(machine: &TuringMachine) {
    println!(
        "Step: {}, State: {}, Tape: {}, Head: {}",
        machine.step_count(),
        machine.state(),
        machine.tape(),
        machine.head()
    );
}

fn report(original: &str, outcome: &Outcome, bounded: bool) -> String {
    let mut lines = format!("Original tape: {}\nResult: {}\n", original, outcome.tape);
    if bounded {
        lines.push_str(&format!("Final State: {}\n", outcome.state));
    }
    lines
}
