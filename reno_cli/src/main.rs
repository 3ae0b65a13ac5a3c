//! # RenoCalc CLI
//!
//! Interactive demo: describe a room and a set of materials, watch the
//! validation pipeline work, and either print the prepared request
//! payload or send it to a running calculation service.
//!
//! ## Usage
//!
//! ```text
//! reno_cli                          # validate and print the payload
//! reno_cli http://localhost:8000   # also perform the calculation exchange
//! ```

use std::io::{self, BufRead, Write};

use chrono::Local;

use reno_client::{Orchestrator, ServiceClient};
use reno_core::actions::{apply, Action, Effect, RoomField};
use reno_core::prepare::prepare_submission;
use reno_core::results::{render_entry, render_summary, summarize};
use reno_core::room::OpeningKind;
use reno_core::schema::{FieldWidget, ALL_TYPES};
use reno_core::store::EstimateState;

fn prompt_line(prompt: &str) -> String {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return String::new();
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return String::new();
    }
    input.trim().to_string()
}

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    prompt_line(prompt).parse().unwrap_or(default)
}

fn prompt_yes(prompt: &str) -> bool {
    matches!(prompt_line(prompt).as_str(), "y" | "Y" | "д" | "Д")
}

fn read_room(state: &mut EstimateState) {
    apply(state, Action::SetRoomName(prompt_line("Room name: ")));
    for (field, label) in [
        (RoomField::Width, "Room width (m): "),
        (RoomField::Length, "Room length (m): "),
        (RoomField::Height, "Room height (m): "),
    ] {
        let raw = prompt_line(label);
        apply(state, Action::SetRoomDimension { field, raw });
    }
}

fn read_openings(state: &mut EstimateState) {
    while prompt_yes("Add an opening? (y/n): ") {
        let kind = if prompt_yes("  Window? (y = window, n = door): ") {
            OpeningKind::Window
        } else {
            OpeningKind::Door
        };
        let width = prompt_f64("  Opening width (m): ", f64::NAN);
        let height = prompt_f64("  Opening height (m): ", f64::NAN);

        match apply(state, Action::AddOpening { kind, width, height }) {
            Effect::ShowError(message) => println!("  ✗ {}", message),
            _ => println!("  ✓ opening added"),
        }
    }
}

fn read_materials(state: &mut EstimateState) {
    loop {
        println!();
        println!("Material types:");
        for (i, t) in ALL_TYPES.iter().enumerate() {
            println!("  {:2}. {}", i + 1, t.label());
        }

        let choice = prompt_line("Pick a type (number, blank to finish): ");
        if choice.is_empty() {
            break;
        }
        let Some(material_type) = choice
            .parse::<usize>()
            .ok()
            .and_then(|n| ALL_TYPES.get(n.wrapping_sub(1)))
        else {
            println!("  ✗ no such type");
            continue;
        };

        let id = match apply(state, Action::AddMaterial(*material_type)) {
            Effect::MaterialAdded(id) => id,
            _ => continue,
        };
        println!("Added: {}", material_type.label());

        for spec in material_type.schema().inputs {
            let hint = match &spec.widget {
                FieldWidget::Number { min, default, .. } => match default {
                    Some(d) => format!(" (min {}, default {})", min, d),
                    None => format!(" (min {})", min),
                },
                FieldWidget::Choice { options, .. } => format!(" ({})", options.join("/")),
            };
            let raw = prompt_line(&format!("  {}{}: ", spec.label, hint));
            if raw.is_empty() {
                continue;
            }

            let effect = apply(
                state,
                Action::SetMaterialField {
                    id,
                    field: spec.name.to_string(),
                    raw,
                },
            );
            if let Effect::MarkField { valid: false, .. } = effect {
                println!("    ✗ invalid value, field left empty");
            }
        }
    }
}

async fn run_exchange(server: &str, state: &EstimateState) {
    let client = match ServiceClient::new(server) {
        Ok(client) => client,
        Err(e) => {
            println!("✗ {}", e);
            return;
        }
    };
    if let Ok(token) = std::env::var("RENOCALC_CSRF_TOKEN") {
        client.set_csrf_token(&token);
    }

    let mut orchestrator = Orchestrator::new(client);
    match orchestrator.calculate(state).await {
        Ok(entries) => {
            println!();
            println!("═══════════════════════════════════════");
            println!("  CALCULATION RESULTS");
            println!("═══════════════════════════════════════");
            for entry in &entries {
                println!();
                println!("{}", render_entry(entry));
            }
            println!();
            println!("{}", render_summary(&summarize(&entries)));
        }
        Err(e) => println!("✗ {} [{}]", e, e.error_code()),
    }
}

#[tokio::main]
async fn main() {
    println!("RenoCalc CLI - Renovation Cost Estimator");
    println!("========================================");
    println!("{}", Local::now().format("%Y-%m-%d %H:%M"));
    println!();

    let server = std::env::args().nth(1);

    let mut state = EstimateState::new();
    read_room(&mut state);
    read_openings(&mut state);
    read_materials(&mut state);

    println!();
    match prepare_submission(&state) {
        Ok(request) => {
            println!("Prepared request payload:");
            match serde_json::to_string_pretty(&request) {
                Ok(json) => println!("{}", json),
                Err(e) => println!("✗ failed to serialize payload: {}", e),
            }

            if let Some(server) = server {
                println!();
                println!("Sending to {} ...", server);
                run_exchange(&server, &state).await;
            }
        }
        Err(e) => println!("✗ {} [{}]", e, e.error_code()),
    }
}
