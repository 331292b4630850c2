use super::model::Record;

// ---------------------------------------------------------------------------
// Score ranges
// ---------------------------------------------------------------------------

/// Slider domain of the sentiment score.
pub const SENTIMENT_DOMAIN: ScoreRange = ScoreRange { min: -1.0, max: 1.0 };
/// Slider domain of the subjectivity score.
pub const SUBJECTIVITY_DOMAIN: ScoreRange = ScoreRange { min: 0.0, max: 1.0 };
/// Slider resolution.
pub const SLIDER_STEP: f64 = 0.01;

/// Inclusive `[min, max]` interval. Always `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreRange {
    min: f64,
    max: f64,
}

impl ScoreRange {
    /// Build a range from two bounds given in any order.
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            ScoreRange { min: a, max: b }
        } else {
            ScoreRange { min: b, max: a }
        }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn contains(&self, v: f64) -> bool {
        self.min <= v && v <= self.max
    }

    /// Round both bounds to the nearest slider step.
    ///
    /// Dividing by the whole number of steps per unit yields the same float
    /// a data file's `"0.95"` parses to; multiplying by `step` does not.
    pub fn snapped(&self, step: f64) -> Self {
        let per_unit = (1.0 / step).round();
        let snap = |v: f64| (v / step).round() / per_unit;
        ScoreRange::new(snap(self.min), snap(self.max))
    }
}

// ---------------------------------------------------------------------------
// Filter criteria
// ---------------------------------------------------------------------------

/// The active filter controls.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub category: String,
    pub sentiment: ScoreRange,
    pub subjectivity: ScoreRange,
}

impl FilterCriteria {
    /// Criteria for `category` with both sliders at their full domain.
    pub fn for_category(category: impl Into<String>) -> Self {
        FilterCriteria {
            category: category.into(),
            sentiment: SENTIMENT_DOMAIN,
            subjectivity: SUBJECTIVITY_DOMAIN,
        }
    }

    /// A record matches when the category is equal (case-sensitive) and both
    /// scores lie inside their inclusive ranges.
    pub fn matches(&self, rec: &Record) -> bool {
        rec.category == self.category
            && self.sentiment.contains(rec.sentiment)
            && self.subjectivity.contains(rec.subjectivity)
    }
}

/// Positions (into `records`) of every matching record, in order.
pub fn filtered_positions(records: &[Record], criteria: &FilterCriteria) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, rec)| criteria.matches(rec))
        .map(|(i, _)| i)
        .collect()
}

/// The matching records themselves, in their original relative order.
pub fn apply<'a>(records: &'a [Record], criteria: &FilterCriteria) -> Vec<&'a Record> {
    filtered_positions(records, criteria)
        .into_iter()
        .map(|i| &records[i])
        .collect()
}
