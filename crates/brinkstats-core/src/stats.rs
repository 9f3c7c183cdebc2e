//! Platform identities, per-metric values, and the aggregated result shape.

use std::collections::BTreeMap;

use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Deserialize, Serialize, Serializer};

use crate::format::{format_count, format_whole};

/// Every platform the aggregate result reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Platform {
    Youtube,
    Instagram,
    Twitter,
    Linkedin,
    Spotify,
    ApplePodcast,
    Tiktok,
}

impl Platform {
    pub const ALL: [Platform; 7] = [
        Platform::Youtube,
        Platform::Instagram,
        Platform::Twitter,
        Platform::Linkedin,
        Platform::Spotify,
        Platform::ApplePodcast,
        Platform::Tiktok,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Youtube => "youtube",
            Platform::Instagram => "instagram",
            Platform::Twitter => "twitter",
            Platform::Linkedin => "linkedin",
            Platform::Spotify => "spotify",
            Platform::ApplePodcast => "applePodcast",
            Platform::Tiktok => "tiktok",
        }
    }

    /// The headline metric shown for this platform.
    #[must_use]
    pub fn primary_metric(self) -> MetricName {
        match self {
            Platform::Youtube | Platform::ApplePodcast => MetricName::Subscribers,
            Platform::Spotify => MetricName::Listeners,
            Platform::Instagram | Platform::Twitter | Platform::Linkedin | Platform::Tiktok => {
                MetricName::Followers
            }
        }
    }

    /// Static filler values for secondary metrics the free API tiers do not
    /// reliably expose.
    #[must_use]
    pub fn placeholders(self) -> &'static [(MetricName, u64)] {
        match self {
            Platform::Youtube => &[(MetricName::Views, 125_000), (MetricName::Videos, 48)],
            Platform::Instagram => &[(MetricName::Posts, 156)],
            Platform::Twitter => &[(MetricName::Tweets, 342)],
            Platform::Linkedin | Platform::Spotify | Platform::ApplePodcast | Platform::Tiktok => {
                &[]
            }
        }
    }

    fn index(self) -> usize {
        match self {
            Platform::Youtube => 0,
            Platform::Instagram => 1,
            Platform::Twitter => 2,
            Platform::Linkedin => 3,
            Platform::Spotify => 4,
            Platform::ApplePodcast => 5,
            Platform::Tiktok => 6,
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricName {
    Followers,
    Subscribers,
    Listeners,
    Posts,
    Tweets,
    Views,
    Videos,
}

impl MetricName {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MetricName::Followers => "followers",
            MetricName::Subscribers => "subscribers",
            MetricName::Listeners => "listeners",
            MetricName::Posts => "posts",
            MetricName::Tweets => "tweets",
            MetricName::Views => "views",
            MetricName::Videos => "videos",
        }
    }
}

impl std::fmt::Display for MetricName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The identifying parameter for one upstream lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatRequest {
    pub platform: Platform,
    identifier: String,
}

impl StatRequest {
    /// Returns `None` when the identifier is absent or blank.
    #[must_use]
    pub fn new(platform: Platform, identifier: Option<&str>) -> Option<Self> {
        let identifier = identifier.map(str::trim).filter(|s| !s.is_empty())?;
        Some(Self {
            platform,
            identifier: identifier.to_string(),
        })
    }

    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }
}

/// One displayed metric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    /// Fetched from the upstream for this request.
    Live(u64),
    /// Static filler, not fetched.
    Placeholder(u64),
    Unavailable,
}

impl Metric {
    #[must_use]
    pub fn value(self) -> Option<u64> {
        match self {
            Metric::Live(v) | Metric::Placeholder(v) => Some(v),
            Metric::Unavailable => None,
        }
    }

    #[must_use]
    pub fn is_live(self) -> bool {
        matches!(self, Metric::Live(_))
    }

    #[must_use]
    pub fn kind(self) -> &'static str {
        match self {
            Metric::Live(_) => "live",
            Metric::Placeholder(_) => "placeholder",
            Metric::Unavailable => "unavailable",
        }
    }

    /// Compact display string, the dash placeholder when there is no value.
    /// Placeholders keep their fixed text, so whole thousands show as `125K`.
    #[must_use]
    pub fn display(self) -> String {
        match self {
            Metric::Placeholder(n) => format_whole(n),
            Metric::Live(_) | Metric::Unavailable => format_count(self.value()),
        }
    }
}

impl Serialize for Metric {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Metric", 3)?;
        s.serialize_field("kind", self.kind())?;
        s.serialize_field("value", &self.value())?;
        s.serialize_field("display", &self.display())?;
        s.end()
    }
}

/// Raw counts returned by one successful platform fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiveCounts {
    pub primary: u64,
    pub secondary: BTreeMap<MetricName, u64>,
}

impl LiveCounts {
    #[must_use]
    pub fn new(primary: u64) -> Self {
        Self {
            primary,
            secondary: BTreeMap::new(),
        }
    }

    /// Records a secondary count when the upstream supplied one.
    #[must_use]
    pub fn with_secondary(mut self, name: MetricName, value: Option<u64>) -> Self {
        if let Some(v) = value {
            self.secondary.insert(name, v);
        }
        self
    }
}

/// Outcome of fetching one platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatResult {
    Live(LiveCounts),
    Unavailable,
}

/// Resolved metrics for one platform: live values where fetched, static
/// placeholders for secondary metrics that were not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformStats {
    pub primary_name: MetricName,
    pub primary: Metric,
    pub secondary: BTreeMap<MetricName, Metric>,
}

impl PlatformStats {
    #[must_use]
    pub fn resolve(platform: Platform, result: &StatResult) -> Self {
        let (primary, mut secondary) = match result {
            StatResult::Live(counts) => (
                Metric::Live(counts.primary),
                counts
                    .secondary
                    .iter()
                    .map(|(name, v)| (*name, Metric::Live(*v)))
                    .collect::<BTreeMap<_, _>>(),
            ),
            StatResult::Unavailable => (Metric::Unavailable, BTreeMap::new()),
        };

        for (name, filler) in platform.placeholders() {
            secondary
                .entry(*name)
                .or_insert(Metric::Placeholder(*filler));
        }

        Self {
            primary_name: platform.primary_metric(),
            primary,
            secondary,
        }
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        self.primary.is_live()
    }

    #[must_use]
    pub fn metric(&self, name: MetricName) -> Option<Metric> {
        if name == self.primary_name {
            return Some(self.primary);
        }
        self.secondary.get(&name).copied()
    }
}

impl Serialize for PlatformStats {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1 + self.secondary.len()))?;
        map.serialize_entry(self.primary_name.as_str(), &self.primary)?;
        for (name, metric) in &self.secondary {
            map.serialize_entry(name.as_str(), metric)?;
        }
        map.end()
    }
}

/// Stats for every known platform. There is always exactly one entry per
/// [`Platform::ALL`] member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatedStats {
    entries: [PlatformStats; 7],
}

impl AggregatedStats {
    /// Builds the aggregate from per-platform outcomes. Platforms with no
    /// outcome in `results` are recorded as unavailable.
    pub fn from_results<I>(results: I) -> Self
    where
        I: IntoIterator<Item = (Platform, StatResult)>,
    {
        let mut entries =
            Platform::ALL.map(|p| PlatformStats::resolve(p, &StatResult::Unavailable));
        for (platform, result) in results {
            entries[platform.index()] = PlatformStats::resolve(platform, &result);
        }
        Self { entries }
    }

    #[must_use]
    pub fn get(&self, platform: Platform) -> &PlatformStats {
        &self.entries[platform.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Platform, &PlatformStats)> {
        Platform::ALL.into_iter().zip(self.entries.iter())
    }
}

impl Serialize for AggregatedStats {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (platform, stats) in self.iter() {
            map.serialize_entry(platform.as_str(), stats)?;
        }
        map.end()
    }
}
