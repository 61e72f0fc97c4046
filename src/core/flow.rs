use rand::Rng;
use std::fmt;
use thiserror::Error;
use tracing::debug;

use super::candidate::{self, Candidate};
use super::filter::{self, Recommendation};
use super::history::{HistoryLog, LogEntry, GO_OUT_DESCRIPTION};
use super::preference::{DerivedTags, Form, Pace, Preference, Temperature};
use super::query;
use super::store::HistoryStore;

/// Questionnaire pages: temperature, form, richness and pace.
pub const CHOOSE_STEPS: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Choose(u8),
    Result,
    Recommend,
    Saved,
    Log,
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Screen::Home => write!(f, "home"),
            Screen::Choose(step) => write!(f, "choose {}/{}", step + 1, CHOOSE_STEPS),
            Screen::Result => write!(f, "result"),
            Screen::Recommend => write!(f, "recommend"),
            Screen::Saved => write!(f, "saved"),
            Screen::Log => write!(f, "log"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Start,
    SetTemperature(Temperature),
    SetForm(Form),
    SetRichness(f32),
    SetPace(Pace),
    Next,
    Back,
    ShowNearby,
    Reconsider,
    Randomize,
    /// Commit to a candidate by id
    Select(String),
    /// Commit to searching the map instead of a listed candidate
    GoOut,
    OpenLog,
    Home,
    LongPress,
}

/// Answer that must be given before leaving a questionnaire page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Temperature,
    Form,
    Pace,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Temperature => write!(f, "temperature"),
            Field::Form => write!(f, "form"),
            Field::Pace => write!(f, "pace"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlowError {
    #[error("Pick a {0} first")]
    Incomplete(Field),

    #[error("{event:?} is not available on the {screen} screen")]
    Unavailable { event: Event, screen: Screen },

    #[error("Unknown candidate: {0}")]
    UnknownCandidate(String),
}

/// Sequences one decision from Home through Log.
///
/// Rejected events leave every piece of state as it was.
pub struct FlowController<S: HistoryStore, R: Rng> {
    screen: Screen,
    preference: Preference,
    history: HistoryLog<S>,
    rng: R,
    tags: Option<(u64, DerivedTags)>,
}

impl<S: HistoryStore, R: Rng> FlowController<S, R> {
    pub fn new(history: HistoryLog<S>, rng: R) -> Self {
        Self {
            screen: Screen::Home,
            preference: Preference::new(),
            history,
            rng,
            tags: None,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn preference(&self) -> &Preference {
        &self.preference
    }

    pub fn history(&self) -> &HistoryLog<S> {
        &self.history
    }

    /// Tags of the current preference, recomputed only after it changed.
    pub fn derived_tags(&mut self) -> &DerivedTags {
        let version = self.preference.version();
        if matches!(&self.tags, Some((v, _)) if *v != version) {
            self.tags = None;
        }
        let preference = &self.preference;
        &self
            .tags
            .get_or_insert_with(|| (version, preference.derive_tags()))
            .1
    }

    pub fn recommendations(&self) -> Vec<Recommendation> {
        filter::recommend(&self.preference, candidate::all())
    }

    /// A fresh external search phrase for the current tags.
    pub fn query(&mut self) -> String {
        let tags = self.derived_tags().clone();
        query::build_query(&tags, &mut self.rng)
    }

    /// Clear the whole history. Available from any screen.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn handle(&mut self, event: Event) -> Result<Screen, FlowError> {
        let from = self.screen;
        let next = self.transition(&event)?;
        debug!(%from, to = %next, ?event, "flow transition");
        self.screen = next;
        Ok(next)
    }

    fn transition(&mut self, event: &Event) -> Result<Screen, FlowError> {
        let next = match (self.screen, event) {
            (Screen::Home, Event::Start) => {
                self.preference.reset();
                Screen::Choose(0)
            }
            (Screen::Home | Screen::Result, Event::LongPress) => {
                self.preference.randomize_all(&mut self.rng);
                Screen::Result
            }

            (Screen::Choose(step), Event::SetTemperature(t)) => {
                self.preference.set_temperature(*t);
                Screen::Choose(step)
            }
            (Screen::Choose(step), Event::SetForm(f)) => {
                self.preference.set_form(*f);
                Screen::Choose(step)
            }
            (Screen::Choose(step), Event::SetRichness(r)) => {
                self.preference.set_richness(*r);
                Screen::Choose(step)
            }
            (Screen::Choose(step), Event::SetPace(p)) => {
                self.preference.set_pace(*p);
                Screen::Choose(step)
            }
            (Screen::Choose(0), Event::Next) => {
                require(self.preference.temperature.is_some(), Field::Temperature)?;
                Screen::Choose(1)
            }
            (Screen::Choose(1), Event::Next) => {
                require(self.preference.form.is_some(), Field::Form)?;
                Screen::Choose(2)
            }
            (Screen::Choose(_), Event::Next) => {
                require(self.preference.pace.is_some(), Field::Pace)?;
                Screen::Result
            }
            (Screen::Choose(0), Event::Back) => Screen::Home,
            (Screen::Choose(step), Event::Back) => Screen::Choose(step - 1),

            (Screen::Result, Event::ShowNearby) => Screen::Recommend,
            (Screen::Result, Event::Reconsider) => Screen::Choose(0),
            (Screen::Result, Event::Randomize) => {
                self.preference.randomize_all(&mut self.rng);
                Screen::Result
            }

            (Screen::Recommend, Event::Back) => Screen::Result,
            (Screen::Recommend, Event::Select(id)) => {
                let picked: &Candidate = candidate::find(id)
                    .ok_or_else(|| FlowError::UnknownCandidate(id.clone()))?;
                self.history
                    .append(LogEntry::new(&self.preference, picked.name));
                Screen::Saved
            }
            (Screen::Recommend, Event::GoOut) => {
                self.history
                    .append(LogEntry::new(&self.preference, GO_OUT_DESCRIPTION));
                Screen::Saved
            }

            (Screen::Saved, Event::OpenLog) => Screen::Log,
            (Screen::Saved | Screen::Log, Event::Home) => Screen::Home,

            (screen, event) => {
                return Err(FlowError::Unavailable {
                    event: event.clone(),
                    screen,
                })
            }
        };
        Ok(next)
    }
}

fn require(present: bool, field: Field) -> Result<(), FlowError> {
    if present {
        Ok(())
    } else {
        Err(FlowError::Incomplete(field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::preference::Tag;
    use crate::core::store::MemoryStore;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn controller() -> FlowController<MemoryStore, StdRng> {
        FlowController::new(HistoryLog::open(MemoryStore::new()), StdRng::seed_from_u64(1))
    }

    fn to_result(flow: &mut FlowController<MemoryStore, StdRng>) {
        flow.handle(Event::Start).unwrap();
        flow.handle(Event::SetTemperature(Temperature::Hot)).unwrap();
        flow.handle(Event::Next).unwrap();
        flow.handle(Event::SetForm(Form::Soup)).unwrap();
        flow.handle(Event::Next).unwrap();
        flow.handle(Event::SetPace(Pace::Fast)).unwrap();
        flow.handle(Event::Next).unwrap();
    }

    #[test]
    fn test_full_questionnaire() {
        let mut flow = controller();
        assert_eq!(flow.handle(Event::Start), Ok(Screen::Choose(0)));
        flow.handle(Event::SetTemperature(Temperature::Hot)).unwrap();
        assert_eq!(flow.handle(Event::Next), Ok(Screen::Choose(1)));
        flow.handle(Event::SetForm(Form::Soup)).unwrap();
        assert_eq!(flow.handle(Event::Next), Ok(Screen::Choose(2)));
        flow.handle(Event::SetPace(Pace::Fast)).unwrap();
        assert_eq!(flow.handle(Event::Next), Ok(Screen::Result));

        assert_eq!(
            flow.derived_tags().tags,
            vec![Tag::Hot, Tag::Soup, Tag::Light, Tag::Fast]
        );
    }

    #[test]
    fn test_next_is_gated() {
        let mut flow = controller();
        flow.handle(Event::Start).unwrap();
        assert_eq!(
            flow.handle(Event::Next),
            Err(FlowError::Incomplete(Field::Temperature))
        );
        assert_eq!(flow.screen(), Screen::Choose(0));

        flow.handle(Event::SetTemperature(Temperature::Cold)).unwrap();
        flow.handle(Event::Next).unwrap();
        assert_eq!(flow.handle(Event::Next), Err(FlowError::Incomplete(Field::Form)));

        flow.handle(Event::SetForm(Form::Dry)).unwrap();
        flow.handle(Event::Next).unwrap();
        // Richness has a default, only pace gates the last page.
        assert_eq!(flow.handle(Event::Next), Err(FlowError::Incomplete(Field::Pace)));
        assert_eq!(flow.screen(), Screen::Choose(2));
    }

    #[test]
    fn test_back_navigation() {
        let mut flow = controller();
        flow.handle(Event::Start).unwrap();
        flow.handle(Event::SetTemperature(Temperature::Hot)).unwrap();
        flow.handle(Event::Next).unwrap();
        flow.handle(Event::SetForm(Form::Dry)).unwrap();
        assert_eq!(flow.handle(Event::Next), Ok(Screen::Choose(2)));

        assert_eq!(flow.handle(Event::Back), Ok(Screen::Choose(1)));
        assert_eq!(flow.handle(Event::Back), Ok(Screen::Choose(0)));
        assert_eq!(flow.handle(Event::Back), Ok(Screen::Home));

        // Answers given on the way survive stepping back.
        assert_eq!(flow.preference().form, Some(Form::Dry));
    }

    #[test]
    fn test_start_resets_preference() {
        let mut flow = controller();
        to_result(&mut flow);
        flow.handle(Event::ShowNearby).unwrap();
        flow.handle(Event::GoOut).unwrap();
        flow.handle(Event::Home).unwrap();

        flow.handle(Event::Start).unwrap();
        assert!(flow.preference().temperature.is_none());
        assert!(flow.preference().form.is_none());
        assert!(flow.preference().pace.is_none());
    }

    #[test]
    fn test_reconsider_keeps_answers() {
        let mut flow = controller();
        to_result(&mut flow);
        assert_eq!(flow.handle(Event::Reconsider), Ok(Screen::Choose(0)));
        assert_eq!(flow.preference().temperature, Some(Temperature::Hot));
        assert_eq!(flow.preference().pace, Some(Pace::Fast));
    }

    #[test]
    fn test_randomize_stays_on_result() {
        let mut flow = controller();
        to_result(&mut flow);
        let before = flow.preference().version();
        assert_eq!(flow.handle(Event::Randomize), Ok(Screen::Result));
        assert!(flow.preference().version() > before);
        assert!(flow.preference().is_complete());
    }

    #[test]
    fn test_long_press_from_home() {
        let mut flow = controller();
        assert_eq!(flow.handle(Event::LongPress), Ok(Screen::Result));
        assert!(flow.preference().is_complete());
        assert_eq!(flow.derived_tags().tags.len(), 4);
    }

    #[test]
    fn test_long_press_from_result() {
        let mut flow = controller();
        to_result(&mut flow);
        let before = flow.preference().version();

        assert_eq!(flow.handle(Event::LongPress), Ok(Screen::Result));
        assert!(flow.preference().version() > before);
        assert!(flow.preference().is_complete());
    }

    #[test]
    fn test_long_press_unavailable_mid_questionnaire() {
        let mut flow = controller();
        flow.handle(Event::Start).unwrap();
        assert!(matches!(
            flow.handle(Event::LongPress),
            Err(FlowError::Unavailable { .. })
        ));
        assert!(!flow.preference().is_complete());
    }

    #[test]
    fn test_select_logs_candidate() {
        let mut flow = controller();
        to_result(&mut flow);
        flow.handle(Event::ShowNearby).unwrap();

        let pick = flow.recommendations()[0].candidate;
        assert_eq!(pick.id, "tsuru-udon");
        assert_eq!(flow.handle(Event::Select(pick.id.to_string())), Ok(Screen::Saved));

        let entries = flow.history().entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].description, "Tsuru Udon Stand");
        assert_eq!(entries[0].tags, vec![Tag::Hot, Tag::Soup, Tag::Light, Tag::Fast]);

        assert_eq!(flow.handle(Event::OpenLog), Ok(Screen::Log));
        assert!(flow.handle(Event::Back).is_err());
        assert_eq!(flow.handle(Event::Home), Ok(Screen::Home));
    }

    #[test]
    fn test_unknown_candidate_is_rejected() {
        let mut flow = controller();
        to_result(&mut flow);
        flow.handle(Event::ShowNearby).unwrap();
        assert_eq!(
            flow.handle(Event::Select("nope".into())),
            Err(FlowError::UnknownCandidate("nope".into()))
        );
        assert_eq!(flow.screen(), Screen::Recommend);
        assert!(flow.history().is_empty());
    }

    #[test]
    fn test_go_out_logs_placeholder() {
        let mut flow = controller();
        to_result(&mut flow);
        flow.handle(Event::ShowNearby).unwrap();
        assert_eq!(flow.handle(Event::Back), Ok(Screen::Result));
        flow.handle(Event::ShowNearby).unwrap();
        assert_eq!(flow.handle(Event::GoOut), Ok(Screen::Saved));
        assert!(flow.history().entries()[0].went_out());
        assert_eq!(flow.handle(Event::Home), Ok(Screen::Home));
    }

    #[test]
    fn test_tags_are_memoized_per_version() {
        let mut flow = controller();
        flow.handle(Event::Start).unwrap();
        assert_eq!(flow.derived_tags().tags, vec![Tag::Light]);

        flow.handle(Event::SetRichness(0.9)).unwrap();
        assert_eq!(flow.derived_tags().tags, vec![Tag::Rich]);
        flow.handle(Event::SetRichness(0.55)).unwrap();
        assert_eq!(flow.derived_tags().style, crate::core::Style::Rich);
        flow.handle(Event::SetRichness(0.1)).unwrap();
        assert_eq!(flow.derived_tags().style, crate::core::Style::Light);
    }

    #[test]
    fn test_query_is_not_empty() {
        let mut flow = controller();
        to_result(&mut flow);
        for _ in 0..20 {
            assert!(!flow.query().is_empty());
        }
    }
}
