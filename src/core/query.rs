use rand::seq::SliceRandom;
use rand::Rng;

use super::preference::{DerivedTags, Tag};

/// Chance of appending a second keyword to the search phrase.
pub const SECOND_KEYWORD_PROBABILITY: f64 = 0.45;

const HOT_SOUP_RICH: &[&str] = &["ramen", "tonkotsu ramen", "miso ramen", "curry udon"];
const HOT_SOUP_LIGHT: &[&str] = &["udon", "soba", "pho", "shio ramen"];
const HOT_DRY_RICH: &[&str] = &["gyudon", "katsudon", "curry rice", "karaage"];
const DRY_LIGHT: &[&str] = &["onigiri", "sushi", "sandwich", "salad bowl"];
const COLD: &[&str] = &["zaru soba", "hiyashi chuka", "poke", "cold udon"];
const FALLBACK: &[&str] = &["lunch", "restaurant", "set meal", "diner"];

/// Keyword pool implied by the tag set. Combinations are additive.
pub fn keyword_pool(tags: &DerivedTags) -> Vec<&'static str> {
    let hot = tags.contains(Tag::Hot);
    let cold = tags.contains(Tag::Cold);
    let soup = tags.contains(Tag::Soup);
    let dry = tags.contains(Tag::Dry);
    let rich = tags.contains(Tag::Rich);
    let light = tags.contains(Tag::Light);

    let mut pool = Vec::new();
    if hot && soup && rich {
        pool.extend_from_slice(HOT_SOUP_RICH);
    }
    if hot && soup && light {
        pool.extend_from_slice(HOT_SOUP_LIGHT);
    }
    if hot && dry && rich {
        pool.extend_from_slice(HOT_DRY_RICH);
    }
    if dry && light {
        pool.extend_from_slice(DRY_LIGHT);
    }
    if cold {
        pool.extend_from_slice(COLD);
    }

    if pool.is_empty() {
        pool.extend_from_slice(FALLBACK);
    }
    pool
}

/// Build the external search phrase: one keyword from the pool, sometimes
/// two, joined by a single space with duplicates dropped.
pub fn build_query<R: Rng + ?Sized>(tags: &DerivedTags, rng: &mut R) -> String {
    let pool = keyword_pool(tags);

    let mut picks: Vec<&str> = Vec::with_capacity(2);
    if let Some(first) = pool.choose(rng) {
        picks.push(*first);
    }
    if rng.gen_bool(SECOND_KEYWORD_PROBABILITY) {
        if let Some(second) = pool.choose(rng) {
            if !picks.contains(second) {
                picks.push(*second);
            }
        }
    }

    picks.join(" ")
}
