use clickhero_ports::types::Seconds;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CueId {
    A,
    B,
    C,
}

impl CueId {
    pub const ALL: [CueId; 3] = [CueId::A, CueId::B, CueId::C];

    fn index(self) -> usize {
        match self {
            CueId::A => 0,
            CueId::B => 1,
            CueId::C => 2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventTag {
    Clickable,
    CueOn(CueId),
    CueOff(CueId),
}

impl EventTag {
    fn bit(self) -> u16 {
        match self {
            EventTag::Clickable => 1,
            EventTag::CueOn(cue) => 1 << (1 + cue.index()),
            EventTag::CueOff(cue) => 1 << (1 + CueId::ALL.len() + cue.index()),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<EventTag>", into = "Vec<EventTag>")]
pub struct TagSet(u16);

impl TagSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn with(mut self, tag: EventTag) -> Self {
        self.insert(tag);
        self
    }

    pub fn insert(&mut self, tag: EventTag) {
        self.0 |= tag.bit();
    }

    pub fn contains(self, tag: EventTag) -> bool {
        self.0 & tag.bit() != 0
    }

    pub fn is_clickable(self) -> bool {
        self.contains(EventTag::Clickable)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = EventTag> {
        let cues_on = CueId::ALL.into_iter().map(EventTag::CueOn);
        let cues_off = CueId::ALL.into_iter().map(EventTag::CueOff);
        std::iter::once(EventTag::Clickable)
            .chain(cues_on)
            .chain(cues_off)
            .filter(move |tag| self.contains(*tag))
    }
}

impl From<Vec<EventTag>> for TagSet {
    fn from(tags: Vec<EventTag>) -> Self {
        tags.into_iter().collect()
    }
}

impl From<TagSet> for Vec<EventTag> {
    fn from(tags: TagSet) -> Self {
        tags.iter().collect()
    }
}

impl FromIterator<EventTag> for TagSet {
    fn from_iter<I: IntoIterator<Item = EventTag>>(iter: I) -> Self {
        let mut set = TagSet::empty();
        for tag in iter {
            set.insert(tag);
        }
        set
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MusicEvent {
    pub time_s: Seconds,
    pub tags: TagSet,
}

impl MusicEvent {
    pub fn new(time_s: Seconds, tags: impl IntoIterator<Item = EventTag>) -> Self {
        Self {
            time_s,
            tags: tags.into_iter().collect(),
        }
    }

    pub fn clickable(time_s: Seconds) -> Self {
        Self::new(time_s, [EventTag::Clickable])
    }

    pub fn is_clickable(&self) -> bool {
        self.tags.is_clickable()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CueVisibility([bool; 3]);

impl CueVisibility {
    pub fn is_shown(&self, cue: CueId) -> bool {
        self.0[cue.index()]
    }

    pub fn set(&mut self, cue: CueId, shown: bool) {
        self.0[cue.index()] = shown;
    }

    pub fn apply(&mut self, tags: TagSet) -> bool {
        let before = *self;
        for cue in CueId::ALL {
            if tags.contains(EventTag::CueOn(cue)) {
                self.set(cue, true);
            }
            if tags.contains(EventTag::CueOff(cue)) {
                self.set(cue, false);
            }
        }
        before != *self
    }

    pub fn shown(&self) -> impl Iterator<Item = CueId> + '_ {
        CueId::ALL.into_iter().filter(|cue| self.is_shown(*cue))
    }
}

fn default_beats_per_bar() -> u32 {
    4
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    pub title: String,
    pub bpm: f64,
    #[serde(default = "default_beats_per_bar")]
    pub beats_per_bar: u32,
    pub events: Vec<MusicEvent>,
}
