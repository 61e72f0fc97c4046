use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Richness at or above this is classified as [`Style::Rich`].
pub const RICH_THRESHOLD: f32 = 0.55;

/// Richness a fresh flow starts from.
pub const DEFAULT_RICHNESS: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Temperature {
    Hot,
    Cold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Form {
    Soup,
    Dry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pace {
    Fast,
    Sit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    Light,
    Rich,
}

impl Style {
    pub fn from_richness(richness: f32) -> Self {
        if richness >= RICH_THRESHOLD {
            Style::Rich
        } else {
            Style::Light
        }
    }
}

/// One human-readable label of the derived "what you feel like eating" set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    Hot,
    Cold,
    Soup,
    Dry,
    Light,
    Rich,
    Fast,
    Sit,
}

impl Tag {
    pub fn label(&self) -> &'static str {
        match self {
            Tag::Hot => "hot",
            Tag::Cold => "cold",
            Tag::Soup => "soupy",
            Tag::Dry => "no broth",
            Tag::Light => "light",
            Tag::Rich => "rich",
            Tag::Fast => "quick bite",
            Tag::Sit => "sit down",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<Temperature> for Tag {
    fn from(t: Temperature) -> Self {
        match t {
            Temperature::Hot => Tag::Hot,
            Temperature::Cold => Tag::Cold,
        }
    }
}

impl From<Form> for Tag {
    fn from(f: Form) -> Self {
        match f {
            Form::Soup => Tag::Soup,
            Form::Dry => Tag::Dry,
        }
    }
}

impl From<Style> for Tag {
    fn from(s: Style) -> Self {
        match s {
            Style::Light => Tag::Light,
            Style::Rich => Tag::Rich,
        }
    }
}

impl From<Pace> for Tag {
    fn from(p: Pace) -> Self {
        match p {
            Pace::Fast => Tag::Fast,
            Pace::Sit => Tag::Sit,
        }
    }
}

/// Ordered projection of a [`Preference`]: temperature, form, style, pace.
/// Unset fields are omitted; the style label is always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedTags {
    pub tags: Vec<Tag>,
    pub style: Style,
}

impl DerivedTags {
    pub fn contains(&self, tag: Tag) -> bool {
        self.tags.contains(&tag)
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.tags.iter().map(Tag::label).collect()
    }
}

/// The four raw answers of one decision flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preference {
    pub temperature: Option<Temperature>,
    pub form: Option<Form>,
    richness: f32,
    pub pace: Option<Pace>,
    #[serde(skip)]
    version: u64,
}

impl Default for Preference {
    fn default() -> Self {
        Self {
            temperature: None,
            form: None,
            richness: DEFAULT_RICHNESS,
            pace: None,
            version: 0,
        }
    }
}

impl Preference {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn richness(&self) -> f32 {
        self.richness
    }

    /// Bumped on every mutation so derived views can tell they are stale.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn set_temperature(&mut self, temperature: Temperature) {
        self.temperature = Some(temperature);
        self.touch();
    }

    pub fn set_form(&mut self, form: Form) {
        self.form = Some(form);
        self.touch();
    }

    pub fn set_richness(&mut self, richness: f32) {
        self.richness = clamp_richness(richness);
        self.touch();
    }

    pub fn set_pace(&mut self, pace: Pace) {
        self.pace = Some(pace);
        self.touch();
    }

    /// Restore every field to its default, keeping the version monotonic.
    pub fn reset(&mut self) {
        let version = self.version;
        *self = Self::default();
        self.version = version;
        self.touch();
    }

    /// Fill every field at random: each enum uniformly between its two
    /// options, richness uniformly in [0, 1].
    pub fn randomize_all<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.temperature = Some(if rng.gen_bool(0.5) {
            Temperature::Hot
        } else {
            Temperature::Cold
        });
        self.form = Some(if rng.gen_bool(0.5) { Form::Soup } else { Form::Dry });
        self.richness = clamp_richness(rng.gen_range(0.0..=1.0));
        self.pace = Some(if rng.gen_bool(0.5) { Pace::Fast } else { Pace::Sit });
        self.touch();
    }

    pub fn is_complete(&self) -> bool {
        self.temperature.is_some() && self.form.is_some() && self.pace.is_some()
    }

    pub fn style(&self) -> Style {
        Style::from_richness(self.richness)
    }

    pub fn derive_tags(&self) -> DerivedTags {
        derive_tags(self)
    }

    fn touch(&mut self) {
        self.version = self.version.wrapping_add(1);
    }
}

pub fn clamp_richness(richness: f32) -> f32 {
    if richness.is_nan() {
        return DEFAULT_RICHNESS;
    }
    richness.clamp(0.0, 1.0)
}

pub fn derive_tags(pref: &Preference) -> DerivedTags {
    let style = pref.style();
    let mut tags = Vec::with_capacity(4);

    if let Some(t) = pref.temperature {
        tags.push(t.into());
    }
    if let Some(f) = pref.form {
        tags.push(f.into());
    }
    tags.push(style.into());
    if let Some(p) = pref.pace {
        tags.push(p.into());
    }

    DerivedTags { tags, style }
}

/// Text shown under the richness slider. Its 0.4/0.6 band is independent
/// of [`RICH_THRESHOLD`].
pub fn preference_description(richness: f32) -> &'static str {
    if richness < 0.4 {
        "leaning light"
    } else if richness > 0.6 {
        "leaning rich"
    } else {
        "either is fine"
    }
}
