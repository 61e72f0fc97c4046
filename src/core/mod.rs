pub mod candidate;
pub mod error;
pub mod filter;
pub mod flow;
pub mod history;
pub mod location;
pub mod preference;
pub mod press;
pub mod query;
pub mod store;

pub use candidate::{Candidate, CANDIDATES};
pub use error::{HirumeshiError, Result};
pub use filter::{recommend, Recommendation};
pub use flow::{Event, Field, FlowController, FlowError, Screen};
pub use history::{HistoryLog, LogEntry, Signature};
pub use location::{
    map_search_url, plan_map_search, ConfiguredLocation, Coordinates, Geolocator, LocateError,
    LocationSource, MapSearch,
};
pub use preference::{
    derive_tags, preference_description, DerivedTags, Form, Pace, Preference, Style, Tag,
    Temperature,
};
pub use press::{PressKind, PressTimer};
pub use query::build_query;
pub use store::{HistoryStore, JsonFileStore, MemoryStore};
