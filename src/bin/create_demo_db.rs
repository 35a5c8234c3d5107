use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;

use splitteur_rs::{
    EventName, ExpenseRecord, NewExpense, ParticipantName, compute_settlement, create_event,
    create_expense, create_participant, initialize_db,
};

/// A utility for creating a demo database for the REST API server of splitteur_rs.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

const PARTICIPANTS: [&str; 4] = ["Alice", "Bob", "Carol", "Dave"];

const EXPENSES: [(&str, f64, &str); 4] = [
    ("Cabin booking", 420.0, "Alice"),
    ("Groceries", 96.4, "Bob"),
    ("Fuel", 63.35, "Alice"),
    ("Board games", 0.0, "Carol"),
];

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating demo event...");
    let event = create_event(EventName::new("Weekend away")?, &conn)?;

    for name in PARTICIPANTS {
        create_participant(event.id, ParticipantName::new(name)?, &conn)?;
    }

    for (description, amount, paid_by) in EXPENSES {
        create_expense(
            event.id,
            NewExpense {
                description: description.to_owned(),
                amount,
                paid_by: ParticipantName::new(paid_by)?,
            },
            &conn,
        )?;
    }

    let roster: Vec<String> = PARTICIPANTS.iter().map(|name| name.to_string()).collect();
    let records: Vec<_> = EXPENSES
        .iter()
        .map(|(_, amount, paid_by)| ExpenseRecord::new(paid_by, *amount))
        .collect();
    let settlement = compute_settlement(&roster, &records)?;

    println!(
        "Created event {} with {} participants sharing ${:.2}",
        event.id, settlement.total_people, settlement.total_expense
    );
    for transfer in &settlement.settlements {
        println!(
            "  {} pays {} ${:.2}",
            transfer.from, transfer.to, transfer.amount
        );
    }

    println!("Success!");

    Ok(())
}
