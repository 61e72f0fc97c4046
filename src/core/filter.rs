use serde::Serialize;
use tracing::debug;

use super::candidate::Candidate;
use super::preference::Preference;

/// Most recommendations shown at once.
pub const MAX_RESULTS: usize = 8;

/// Placeholder distance of the first card.
pub const FIRST_DISTANCE_KM: f32 = 0.2;
/// Placeholder distance added per card.
pub const DISTANCE_STEP_KM: f32 = 0.15;

/// A candidate picked for the current preference.
///
/// `distance_km` is a display value derived from the card's position in
/// the list. It is not a geographic distance.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub candidate: &'static Candidate,
    pub distance_km: f32,
}

pub fn placeholder_distance(index: usize) -> f32 {
    FIRST_DISTANCE_KM + index as f32 * DISTANCE_STEP_KM
}

/// Filter `candidates` by temperature, form, pace (each skipped when unset)
/// and style (always applied). When nothing survives, fall back to a
/// temperature-only match, or everything if temperature is unset.
pub fn recommend(pref: &Preference, candidates: &'static [Candidate]) -> Vec<Recommendation> {
    let style = pref.style();

    let strict: Vec<&'static Candidate> = candidates
        .iter()
        .filter(|c| pref.temperature.map_or(true, |t| c.temperature == t))
        .filter(|c| pref.form.map_or(true, |f| c.form == f))
        .filter(|c| pref.pace.map_or(true, |p| c.pace == p))
        .filter(|c| c.style == style)
        .collect();

    let picked: Vec<&'static Candidate> = if strict.is_empty() {
        debug!(?pref, "no exact match, falling back to temperature only");
        candidates
            .iter()
            .filter(|c| pref.temperature.map_or(true, |t| c.temperature == t))
            .collect()
    } else {
        strict
    };

    picked
        .into_iter()
        .take(MAX_RESULTS)
        .enumerate()
        .map(|(index, candidate)| Recommendation {
            candidate,
            distance_km: placeholder_distance(index),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::candidate::CANDIDATES;
    use crate::core::preference::{Form, Pace, Temperature};

    fn pref(t: Option<Temperature>, f: Option<Form>, r: f32, p: Option<Pace>) -> Preference {
        let mut pref = Preference::new();
        if let Some(t) = t {
            pref.set_temperature(t);
        }
        if let Some(f) = f {
            pref.set_form(f);
        }
        pref.set_richness(r);
        if let Some(p) = p {
            pref.set_pace(p);
        }
        pref
    }

    #[test]
    fn test_hot_soup_sit_rich() {
        let p = pref(Some(Temperature::Hot), Some(Form::Soup), 0.8, Some(Pace::Sit));
        let results = recommend(&p, &CANDIDATES);

        assert!(!results.is_empty());
        assert_eq!(results[0].candidate.id, "ichiban-ramen");
        for r in &results {
            assert_eq!(r.candidate.temperature, Temperature::Hot);
            assert_eq!(r.candidate.form, Form::Soup);
            assert_eq!(r.candidate.pace, Pace::Sit);
            assert!(r.distance_km > 0.0);
        }
    }

    #[test]
    fn test_fallback_keeps_temperature_only() {
        // No cold candidate is rich, so the strict pass is empty.
        let p = pref(Some(Temperature::Cold), Some(Form::Soup), 0.9, Some(Pace::Fast));
        let results = recommend(&p, &CANDIDATES);

        assert!(!results.is_empty());
        assert!(results
            .iter()
            .all(|r| r.candidate.temperature == Temperature::Cold));
        let expected = CANDIDATES
            .iter()
            .filter(|c| c.temperature == Temperature::Cold)
            .count();
        assert_eq!(results.len(), expected);
    }

    #[test]
    fn test_fallback_without_temperature_returns_everything() {
        // Nothing is soup + fast + rich.
        let p = pref(None, Some(Form::Soup), 0.9, Some(Pace::Fast));
        let results = recommend(&p, &CANDIDATES);
        assert_eq!(results.len(), CANDIDATES.len().min(MAX_RESULTS));
    }

    #[test]
    fn test_style_is_never_skipped() {
        let p = pref(None, None, 0.0, None);
        let results = recommend(&p, &CANDIDATES);
        assert!(!results.is_empty());
        assert!(results
            .iter()
            .all(|r| r.candidate.style == crate::core::Style::Light));
    }

    #[test]
    fn test_distances_follow_position() {
        let p = pref(Some(Temperature::Hot), None, 0.9, None);
        let results = recommend(&p, &CANDIDATES);
        assert!(results.len() >= 2);
        for (i, r) in results.iter().enumerate() {
            assert_eq!(r.distance_km, placeholder_distance(i));
        }
        assert!(results[1].distance_km > results[0].distance_km);
        assert_eq!(results[0].distance_km, FIRST_DISTANCE_KM);
    }
}
