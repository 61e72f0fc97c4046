use anyhow::Result;
use colored::*;
use dialoguer::{Input, Select};

use hirumeshi::config::Config;
use hirumeshi::core::{
    preference_description, ConfiguredLocation, Event, Form, Geolocator, Pace, Screen, Temperature,
};
use hirumeshi::formatter::Formatter;

use super::{go_out, print_log, Flow};

/// What the user picked on a screen.
enum Step {
    Send(Event),
    /// Record a questionnaire answer, then move to the next page
    Answer(Event),
    Stay,
    Quit,
}

pub async fn run(
    config: &Config,
    flow: &mut Flow,
    geo: &Geolocator<ConfiguredLocation>,
) -> Result<()> {
    loop {
        let step = match flow.screen() {
            Screen::Home => home(flow)?,
            Screen::Choose(0) => choose_temperature()?,
            Screen::Choose(1) => choose_form()?,
            Screen::Choose(_) => choose_richness_and_pace(flow)?,
            Screen::Result => result(flow)?,
            Screen::Recommend => recommend(config, flow, geo).await?,
            Screen::Saved => saved()?,
            Screen::Log => log(flow)?,
        };

        match step {
            Step::Send(event) => {
                if let Err(e) = flow.handle(event) {
                    println!("{}", e.to_string().yellow());
                }
            }
            Step::Answer(event) => {
                let answered = flow.handle(event).and_then(|_| flow.handle(Event::Next));
                if let Err(e) = answered {
                    println!("{}", e.to_string().yellow());
                }
            }
            Step::Stay => {}
            Step::Quit => return Ok(()),
        }
    }
}

fn pick(prompt: &str, items: &[&str]) -> Result<Option<usize>> {
    Ok(Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact_opt()?)
}

fn home(flow: &Flow) -> Result<Step> {
    println!("\n{}", "🍚 What should I eat?".cyan().bold());
    let items = ["Start deciding", "Surprise me", "View log", "Quit"];
    Ok(match pick("Home", &items)? {
        Some(0) => Step::Send(Event::Start),
        Some(1) => Step::Send(Event::LongPress),
        Some(2) => {
            print_log(flow.history());
            Step::Stay
        }
        _ => Step::Quit,
    })
}

fn choose_temperature() -> Result<Step> {
    let items = ["🔥 Something hot", "🧊 Something cold", "← Back"];
    Ok(match pick("Hot or cold? (1/3)", &items)? {
        Some(0) => Step::Answer(Event::SetTemperature(Temperature::Hot)),
        Some(1) => Step::Answer(Event::SetTemperature(Temperature::Cold)),
        Some(_) => Step::Send(Event::Back),
        None => Step::Quit,
    })
}

fn choose_form() -> Result<Step> {
    let items = ["🍜 With broth", "🍙 Without broth", "← Back"];
    Ok(match pick("Soup or dry? (2/3)", &items)? {
        Some(0) => Step::Answer(Event::SetForm(Form::Soup)),
        Some(1) => Step::Answer(Event::SetForm(Form::Dry)),
        Some(_) => Step::Send(Event::Back),
        None => Step::Quit,
    })
}

fn choose_richness_and_pace(flow: &mut Flow) -> Result<Step> {
    let current = (flow.preference().richness() * 100.0).round() as u8;
    let richness: u8 = Input::new()
        .with_prompt("How rich? 0 = light, 100 = heavy (3/3)")
        .default(current)
        .validate_with(|v: &u8| {
            if *v <= 100 {
                Ok(())
            } else {
                Err("enter a number from 0 to 100")
            }
        })
        .interact_text()?;

    let richness = f32::from(richness) / 100.0;
    flow.handle(Event::SetRichness(richness))?;
    println!(
        "  {} {}",
        Formatter::format_bar(richness),
        preference_description(richness).dimmed()
    );

    let items = ["🏃 Quick bite", "🪑 Sit down", "← Back"];
    Ok(match pick("How much time?", &items)? {
        Some(0) => Step::Answer(Event::SetPace(Pace::Fast)),
        Some(1) => Step::Answer(Event::SetPace(Pace::Sit)),
        Some(_) => Step::Send(Event::Back),
        None => Step::Quit,
    })
}

fn result(flow: &mut Flow) -> Result<Step> {
    let tags = flow.derived_tags().clone();
    println!("\n{}", Formatter::format_result(flow.preference(), &tags));

    let items = ["Show nearby places", "Reconsider", "Randomize", "Quit"];
    Ok(match pick("Next", &items)? {
        Some(0) => Step::Send(Event::ShowNearby),
        Some(1) => Step::Send(Event::Reconsider),
        Some(2) => Step::Send(Event::Randomize),
        _ => Step::Quit,
    })
}

async fn recommend(
    config: &Config,
    flow: &mut Flow,
    geo: &Geolocator<ConfiguredLocation>,
) -> Result<Step> {
    let recs = flow.recommendations();
    println!();
    print!("{}", Formatter::format_recommendations(&recs));

    let mut items: Vec<String> = recs.iter().map(|r| r.candidate.name.to_string()).collect();
    let go_out_index = items.len();
    if !geo.is_busy() {
        items.push("🗺️  Go out and search the map".to_string());
    }
    items.push("← Back".to_string());
    let labels: Vec<&str> = items.iter().map(String::as_str).collect();

    Ok(match pick("Where to?", &labels)? {
        Some(i) if i < recs.len() => Step::Send(Event::Select(recs[i].candidate.id.to_string())),
        Some(i) if i == go_out_index && !geo.is_busy() => {
            let query = flow.query();
            match go_out(config, geo, &query).await {
                Ok(_) => Step::Send(Event::GoOut),
                Err(e) => {
                    println!("{}", format!("{:#}", e).yellow());
                    Step::Stay
                }
            }
        }
        Some(_) => Step::Send(Event::Back),
        None => Step::Quit,
    })
}

fn saved() -> Result<Step> {
    println!("{}", "✅ Saved. Enjoy your meal!".green().bold());
    let items = ["View log", "Home"];
    Ok(match pick("Next", &items)? {
        Some(0) => Step::Send(Event::OpenLog),
        Some(_) => Step::Send(Event::Home),
        None => Step::Quit,
    })
}

fn log(flow: &Flow) -> Result<Step> {
    print_log(flow.history());
    println!();
    Ok(match pick("Next", &["Home", "Quit"])? {
        Some(0) => Step::Send(Event::Home),
        _ => Step::Quit,
    })
}
