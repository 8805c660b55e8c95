//! Per-site statistics and interest brackets.

use std::fmt;

use kwa_model::NormalizedRecord;
use serde::Serialize;

/// Volume figures of a site, present when the run mapped a volume column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct VolumeSummary {
    pub total: f64,
    /// Mean over the records that carry a volume.
    pub average: Option<f64>,
    pub top_3: f64,
    pub top_10: f64,
    pub top_20: f64,
}

/// Descriptive statistics of one site.
///
/// Top-N counts are cumulative: a record at position 3 counts toward every
/// threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteSummary {
    pub site: String,
    pub keywords: usize,
    /// Mean position, 0 when the site has no record.
    pub avg_position: f64,
    pub top_3: usize,
    pub top_10: usize,
    pub top_20: usize,
    pub top_50: usize,
    pub top_100: usize,
    pub volume: Option<VolumeSummary>,
}

pub fn summarize<'a, I>(site: &str, records: I, has_volume: bool) -> SiteSummary
where
    I: IntoIterator<Item = &'a NormalizedRecord>,
{
    let mut summary = SiteSummary {
        site: site.to_string(),
        keywords: 0,
        avg_position: 0.0,
        top_3: 0,
        top_10: 0,
        top_20: 0,
        top_50: 0,
        top_100: 0,
        volume: None,
    };
    let mut position_sum = 0.0;
    let mut volume = VolumeSummary::default();
    let mut volume_count = 0usize;

    for record in records {
        let position = record.position;
        summary.keywords += 1;
        position_sum += position;
        summary.top_3 += usize::from(position <= 3.0);
        summary.top_10 += usize::from(position <= 10.0);
        summary.top_20 += usize::from(position <= 20.0);
        summary.top_50 += usize::from(position <= 50.0);
        summary.top_100 += usize::from(position <= 100.0);

        if let Some(value) = record.volume {
            volume_count += 1;
            volume.total += value;
            if position <= 3.0 {
                volume.top_3 += value;
            }
            if position <= 10.0 {
                volume.top_10 += value;
            }
            if position <= 20.0 {
                volume.top_20 += value;
            }
        }
    }

    if summary.keywords > 0 {
        summary.avg_position = position_sum / summary.keywords as f64;
    }
    if has_volume {
        volume.average = (volume_count > 0).then(|| volume.total / volume_count as f64);
        summary.volume = Some(volume);
    }
    summary
}

/// Exclusive position bands of the interest table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum InterestBracket {
    #[serde(rename = "1-3")]
    Top3,
    #[serde(rename = "4-10")]
    Top10,
    #[serde(rename = "11-20")]
    Top20,
    #[serde(rename = "21-50")]
    Top50,
    #[serde(rename = "51-100")]
    Top100,
}

impl InterestBracket {
    pub const ALL: [InterestBracket; 5] = [
        InterestBracket::Top3,
        InterestBracket::Top10,
        InterestBracket::Top20,
        InterestBracket::Top50,
        InterestBracket::Top100,
    ];

    pub fn label(self) -> &'static str {
        match self {
            InterestBracket::Top3 => "1-3",
            InterestBracket::Top10 => "4-10",
            InterestBracket::Top20 => "11-20",
            InterestBracket::Top50 => "21-50",
            InterestBracket::Top100 => "51-100",
        }
    }

    fn upper(self) -> f64 {
        match self {
            InterestBracket::Top3 => 3.0,
            InterestBracket::Top10 => 10.0,
            InterestBracket::Top20 => 20.0,
            InterestBracket::Top50 => 50.0,
            InterestBracket::Top100 => 100.0,
        }
    }

    /// Bracket containing `position`; positions outside 1-100 have none.
    pub fn for_position(position: f64) -> Option<Self> {
        if !(1.0..=100.0).contains(&position) {
            return None;
        }
        Self::ALL
            .into_iter()
            .find(|bracket| position <= bracket.upper())
    }
}

impl fmt::Display for InterestBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterestRow {
    pub site: String,
    pub bracket: InterestBracket,
    pub keywords: usize,
    pub volume: Option<f64>,
}

/// One row per bracket for `site`, empty brackets included.
pub fn interest<'a, I>(site: &str, records: I, has_volume: bool) -> Vec<InterestRow>
where
    I: IntoIterator<Item = &'a NormalizedRecord>,
{
    let mut rows: Vec<InterestRow> = InterestBracket::ALL
        .into_iter()
        .map(|bracket| InterestRow {
            site: site.to_string(),
            bracket,
            keywords: 0,
            volume: has_volume.then_some(0.0),
        })
        .collect();

    for record in records {
        let Some(bracket) = InterestBracket::for_position(record.position) else {
            continue;
        };
        let row = &mut rows[bracket as usize];
        row.keywords += 1;
        if let (Some(total), Some(value)) = (row.volume.as_mut(), record.volume) {
            *total += value;
        }
    }
    rows
}
