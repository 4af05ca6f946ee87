use clap::Subcommand;

use sitless_core::task::{default_catalog, random_task};

#[derive(Subcommand)]
pub enum TasksAction {
    /// Print the micro-break catalog as JSON
    List,
    /// Pick one task at random, as a reminder would
    Sample,
}

pub fn run(action: TasksAction) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = default_catalog();
    match action {
        TasksAction::List => {
            println!("{}", serde_json::to_string_pretty(&catalog)?);
        }
        TasksAction::Sample => {
            if let Some(task) = random_task(&catalog) {
                println!("{}", serde_json::to_string_pretty(task)?);
            }
        }
    }
    Ok(())
}
