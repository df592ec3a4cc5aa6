/// End-of-run report: built once from the aggregator at end-of-stream,
/// rendered as sectioned terminal text or serialized as JSON.
use crate::aggregator::{CategoryAggregator, CategoryBucket};
use crate::event_classifier::CategoryKey;
use crate::stats;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::io::{self, Write};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseTimeStats {
    pub mean_ms: f64,
    pub median_ms: f64,
    pub mode_ms: u64,
}

impl ResponseTimeStats {
    fn from_samples(samples: &[u64]) -> Option<Self> {
        Some(Self {
            mean_ms: stats::mean(samples)?,
            median_ms: stats::median(samples)?,
            mode_ms: stats::mode(samples)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DynoUsage {
    pub most_active: u64,
    pub least_active: u64,
}

impl DynoUsage {
    fn from_samples(samples: &[u64]) -> Option<Self> {
        Some(Self {
            most_active: stats::mode(samples)?,
            least_active: stats::anti_mode(samples)?,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategorySummary {
    pub category: CategoryKey,
    pub endpoint: &'static str,
    pub request_count: u64,
    /// `None` when the category accumulated no measurable samples.
    pub response_times: Option<ResponseTimeStats>,
    pub dynos: Option<DynoUsage>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub total_requests: u64,
    pub categories: Vec<CategorySummary>,
    pub overall_response_times: Option<ResponseTimeStats>,
    pub overall_dynos: Option<DynoUsage>,
}

impl Report {
    /// Derive the read-only report view. Categories appear in the fixed
    /// `CategoryKey::ALL` order; a category the run never touched still gets
    /// a summary with a zero count.
    pub fn build(aggregator: &CategoryAggregator) -> Self {
        let empty = CategoryBucket::default();
        let categories = CategoryKey::ALL
            .iter()
            .map(|&category| {
                let bucket = aggregator.bucket(category).unwrap_or(&empty);
                CategorySummary {
                    category,
                    endpoint: category.endpoint(),
                    request_count: bucket.request_count,
                    response_times: ResponseTimeStats::from_samples(&bucket.response_time_samples),
                    dynos: DynoUsage::from_samples(&bucket.dyno_samples),
                }
            })
            .collect();

        Self {
            total_requests: aggregator.total_requests(),
            categories,
            overall_response_times: ResponseTimeStats::from_samples(&aggregator.all_response_times()),
            overall_dynos: DynoUsage::from_samples(&aggregator.all_dynos()),
        }
    }

    /// Render the sectioned text form.
    pub fn render(&self, out: &mut impl Write, color: bool) -> io::Result<()> {
        writeln!(out)?;
        banner(out, "REQUEST METRICS", '=', color)?;
        writeln!(out, "Out of {} requests:", self.total_requests)?;
        writeln!(out)?;

        for summary in &self.categories {
            banner(out, summary.endpoint, '-', color)?;
            writeln!(out, "  requests:           {}", summary.request_count)?;
            match &summary.response_times {
                Some(rt) => {
                    writeln!(out, "  mean response:      {:.2} ms", rt.mean_ms)?;
                    writeln!(out, "  median response:    {:.2} ms", rt.median_ms)?;
                    writeln!(out, "  mode response:      {} ms", rt.mode_ms)?;
                }
                None => writeln!(out, "  response times:     no data")?,
            }
            match &summary.dynos {
                Some(dynos) => {
                    writeln!(out, "  most active dyno:   #{}", dynos.most_active)?;
                    writeln!(out, "  least active dyno:  #{}", dynos.least_active)?;
                }
                None => writeln!(out, "  dyno usage:         no data")?,
            }
            writeln!(out)?;
        }

        banner(out, "OVERALL", '=', color)?;
        writeln!(out, "  requests:           {}", self.total_requests)?;
        match &self.overall_response_times {
            Some(rt) => {
                writeln!(out, "  mean response:      {:.2} ms", rt.mean_ms)?;
                writeln!(out, "  median response:    {:.2} ms", rt.median_ms)?;
                writeln!(out, "  mode response:      {} ms", rt.mode_ms)?;
            }
            None => writeln!(out, "  response times:     no data")?,
        }
        match &self.overall_dynos {
            Some(dynos) => {
                writeln!(out, "  most active dyno:   #{}", dynos.most_active)?;
                writeln!(out, "  least active dyno:  #{}", dynos.least_active)?;
            }
            None => writeln!(out, "  dyno usage:         no data")?,
        }
        writeln!(out)?;
        Ok(())
    }
}

fn banner(out: &mut impl Write, title: &str, rule: char, color: bool) -> io::Result<()> {
    let underline: String = std::iter::repeat(rule).take(title.len()).collect();
    if color {
        writeln!(out, "{}", title.cyan())?;
        writeln!(out, "{}", underline.cyan())?;
    } else {
        writeln!(out, "{title}")?;
        writeln!(out, "{underline}")?;
    }
    Ok(())
}
