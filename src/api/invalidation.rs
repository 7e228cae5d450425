use serde::{Deserialize, Serialize};

/// Reason a chart needs to be repainted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvalidationTopic {
    /// Series registered, removed or changed.
    Series,
    /// Axis bounds, tick spacing or auto-scale flags changed.
    Axis,
    /// Colors, fonts, captions or symbols changed.
    Style,
    /// Border or viewport geometry changed.
    Layout,
}

impl InvalidationTopic {
    const fn bit(self) -> u8 {
        match self {
            Self::Series => 1 << 0,
            Self::Axis => 1 << 1,
            Self::Style => 1 << 2,
            Self::Layout => 1 << 3,
        }
    }
}

/// Bitmask of pending invalidation topics; empty means the chart is clean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct InvalidationTopics {
    bits: u8,
}

impl InvalidationTopics {
    const ALL_BITS: u8 = InvalidationTopic::Series.bit()
        | InvalidationTopic::Axis.bit()
        | InvalidationTopic::Style.bit()
        | InvalidationTopic::Layout.bit();

    #[must_use]
    pub const fn none() -> Self {
        Self { bits: 0 }
    }

    #[must_use]
    pub const fn all() -> Self {
        Self {
            bits: Self::ALL_BITS,
        }
    }

    #[must_use]
    pub const fn from_topic(topic: InvalidationTopic) -> Self {
        Self { bits: topic.bit() }
    }

    #[must_use]
    pub const fn with_topic(self, topic: InvalidationTopic) -> Self {
        Self {
            bits: self.bits | topic.bit(),
        }
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    #[must_use]
    pub const fn contains_topic(self, topic: InvalidationTopic) -> bool {
        (self.bits & topic.bit()) != 0
    }

    #[must_use]
    pub const fn is_none(self) -> bool {
        self.bits == 0
    }

    pub fn insert(&mut self, topic: InvalidationTopic) {
        self.bits |= topic.bit();
    }

    /// Returns the pending topics and leaves the mask empty.
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }
}

#[cfg(test)]
mod tests {
    use super::{InvalidationTopic, InvalidationTopics};

    #[test]
    fn topics_accumulate_and_take_clears() {
        let mut topics = InvalidationTopics::none();
        assert!(topics.is_none());

        topics.insert(InvalidationTopic::Series);
        topics.insert(InvalidationTopic::Style);
        assert!(topics.contains_topic(InvalidationTopic::Series));
        assert!(topics.contains_topic(InvalidationTopic::Style));
        assert!(!topics.contains_topic(InvalidationTopic::Axis));

        let taken = topics.take();
        assert!(topics.is_none());
        assert_eq!(
            taken,
            InvalidationTopics::from_topic(InvalidationTopic::Series)
                .with_topic(InvalidationTopic::Style)
        );
    }

    #[test]
    fn all_contains_every_topic() {
        let all = InvalidationTopics::all();
        for topic in [
            InvalidationTopic::Series,
            InvalidationTopic::Axis,
            InvalidationTopic::Style,
            InvalidationTopic::Layout,
        ] {
            assert!(all.contains_topic(topic));
        }
    }
}
