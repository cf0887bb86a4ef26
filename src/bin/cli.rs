#![cfg(not(tarpaulin_include))]

use std::env;

use leadsheet::client::LeadClient;
use leadsheet::config::env_or;
use leadsheet::store::LeadInput;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        usage(&args[0]);
        return Ok(());
    }

    let endpoint = env_or("LEADSHEET_URL", "http://127.0.0.1:3000/");
    let client = LeadClient::new(endpoint)?;

    match args[1].as_str() {
        "list" => match client.fetch_leads().await {
            Ok(leads) if leads.is_empty() => {
                println!("No leads found in the sheet.");
            }
            Ok(leads) => {
                println!(
                    "{:<20} {:<25} {:<15} {:<30} {}",
                    "Name", "Email", "Phone", "Message", "Date"
                );
                for lead in leads {
                    println!(
                        "{:<20} {:<25} {:<15} {:<30} {}",
                        lead.name, lead.email, lead.phone, lead.message, lead.date
                    );
                }
            }
            Err(e) => {
                eprintln!("Failed to load leads: {e}");
            }
        },
        "add" => {
            if args.len() < 4 {
                usage(&args[0]);
                return Ok(());
            }

            let lead = LeadInput {
                name: args[2].clone(),
                email: args[3].clone(),
                phone: args.get(4).cloned().unwrap_or_default(),
                message: args.get(5).cloned().unwrap_or_default(),
            };

            match client.submit_lead(&lead).await {
                Ok(()) => println!("Lead submitted successfully."),
                Err(e) => eprintln!("Failed to submit lead: {e}"),
            }
        }
        _ => usage(&args[0]),
    }

    Ok(())
}

fn usage(program: &str) {
    eprintln!("Usage: {program} <command>");
    eprintln!("Commands:");
    eprintln!("  list                                    Show all leads, newest first");
    eprintln!("  add <name> <email> [phone] [message]    Submit a new lead");
    eprintln!();
    eprintln!("The endpoint defaults to http://127.0.0.1:3000/ and can be");
    eprintln!("overridden with LEADSHEET_URL.");
}
