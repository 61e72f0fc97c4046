use serde::Serialize;

use super::preference::{Form, Pace, Style, Temperature};

/// A place to eat. The table below is fixed at build time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub id: &'static str,
    pub name: &'static str,
    pub temperature: Temperature,
    pub style: Style,
    pub form: Form,
    pub pace: Pace,
    /// 1 (cheap) to 3 (treat yourself)
    pub price_tier: u8,
}

pub static CANDIDATES: [Candidate; 8] = [
    Candidate {
        id: "ichiban-ramen",
        name: "Ichiban Ramen",
        temperature: Temperature::Hot,
        style: Style::Rich,
        form: Form::Soup,
        pace: Pace::Sit,
        price_tier: 2,
    },
    Candidate {
        id: "tsuru-udon",
        name: "Tsuru Udon Stand",
        temperature: Temperature::Hot,
        style: Style::Light,
        form: Form::Soup,
        pace: Pace::Fast,
        price_tier: 1,
    },
    Candidate {
        id: "spice-curry",
        name: "Spice Curry House",
        temperature: Temperature::Hot,
        style: Style::Rich,
        form: Form::Dry,
        pace: Pace::Sit,
        price_tier: 2,
    },
    Candidate {
        id: "go-gyudon",
        name: "Go Gyudon",
        temperature: Temperature::Hot,
        style: Style::Rich,
        form: Form::Dry,
        pace: Pace::Fast,
        price_tier: 1,
    },
    Candidate {
        id: "saigon-pho",
        name: "Saigon Pho",
        temperature: Temperature::Hot,
        style: Style::Light,
        form: Form::Soup,
        pace: Pace::Sit,
        price_tier: 2,
    },
    Candidate {
        id: "kaze-soba",
        name: "Kaze Soba",
        temperature: Temperature::Cold,
        style: Style::Light,
        form: Form::Soup,
        pace: Pace::Sit,
        price_tier: 2,
    },
    Candidate {
        id: "onigiri-ya",
        name: "Onigiri-ya",
        temperature: Temperature::Cold,
        style: Style::Light,
        form: Form::Dry,
        pace: Pace::Fast,
        price_tier: 1,
    },
    Candidate {
        id: "harbor-poke",
        name: "Harbor Poke Bowls",
        temperature: Temperature::Cold,
        style: Style::Light,
        form: Form::Dry,
        pace: Pace::Sit,
        price_tier: 3,
    },
];

pub fn all() -> &'static [Candidate] {
    &CANDIDATES
}

pub fn find(id: &str) -> Option<&'static Candidate> {
    CANDIDATES.iter().find(|c| c.id == id)
}
