use colored::*;

use crate::core::filter::Recommendation;
use crate::core::history::LogEntry;
use crate::core::preference::{preference_description, DerivedTags, Preference, Style};
use crate::core::Candidate;

/// Terminal rendering of tags, recommendations and the decision log
pub struct Formatter;

impl Formatter {
    pub fn format_tags(tags: &DerivedTags) -> String {
        tags.tags
            .iter()
            .map(|t| format!("#{}", t.label()))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn format_result(pref: &Preference, tags: &DerivedTags) -> String {
        let style = match tags.style {
            Style::Rich => "rich".yellow().bold(),
            Style::Light => "light".green().bold(),
        };
        format!(
            "{}\n  {}\n  richness {} ({}), {}",
            "You feel like eating:".cyan().bold(),
            Self::format_tags(tags),
            Self::format_bar(pref.richness()),
            preference_description(pref.richness()),
            style,
        )
    }

    pub fn format_recommendations(recs: &[Recommendation]) -> String {
        let mut out = String::new();
        for (i, rec) in recs.iter().enumerate() {
            out.push_str(&format!(
                "{:>2}. {}  {}  ~{:.2} km\n",
                i + 1,
                rec.candidate.name.bold(),
                Self::price(rec.candidate.price_tier).dimmed(),
                rec.distance_km,
            ));
        }
        out
    }

    pub fn format_candidate(c: &Candidate) -> String {
        format!(
            "{:<14} {:<20} {:?}/{:?}/{:?}/{:?} {}",
            c.id,
            c.name,
            c.temperature,
            c.form,
            c.style,
            c.pace,
            Self::price(c.price_tier),
        )
    }

    pub fn format_entry(entry: &LogEntry) -> String {
        let what = if entry.went_out() {
            "(went out to look)".italic().to_string()
        } else {
            entry.description.bold().to_string()
        };
        let tags = entry
            .tags
            .iter()
            .map(|t| format!("#{}", t.label()))
            .collect::<Vec<_>>()
            .join(" ");
        format!(
            "{}  {}  {}",
            entry.created_at.format("%Y-%m-%d %H:%M").to_string().dimmed(),
            what,
            tags.cyan()
        )
    }

    /// Ten-cell bar for a value in [0, 1].
    pub fn format_bar(value: f32) -> String {
        let filled = (value.clamp(0.0, 1.0) * 10.0).round() as usize;
        format!("{}{}", "█".repeat(filled), "░".repeat(10 - filled))
    }

    fn price(tier: u8) -> String {
        "¥".repeat(tier as usize)
    }
}
