//! Assembles the natural-language prompt handed to the text-generation
//! backend. Only statistics bundles travel here, never the raw series.

use crate::analysis::statistics::EntityStatistics;
use crate::query::Query;
use crate::store::DatasetKind;
use std::fmt::Write;

/// Direction word derived from the slope sign. Narrative-only: it is never
/// stored alongside the numeric results.
fn direction_label(slope: f64) -> &'static str {
    if slope > 0.0 {
        "increasing"
    } else {
        "decreasing"
    }
}

/// Builds the prompt for one or more statistics bundles.
///
/// A single bundle produces a direct descriptive prompt; two or more produce
/// a comparative prompt with one statistical sentence per country. Countries
/// that matched no data have no bundle and therefore never appear. Callers
/// must not invoke this with an empty slice; they answer "no data" themselves.
pub fn build_prompt(stats: &[EntityStatistics], query: &Query, kind: DatasetKind) -> String {
    debug_assert!(!stats.is_empty(), "prompt requested for empty statistics");
    if stats.len() == 1 {
        single_prompt(&stats[0], query, kind)
    } else {
        comparative_prompt(stats, query, kind)
    }
}

fn single_prompt(stats: &EntityStatistics, query: &Query, kind: DatasetKind) -> String {
    match kind {
        DatasetKind::Temperature => {
            let location = match query.city() {
                Some(city) => format!("{city}, {}", stats.country),
                None => stats.country.clone(),
            };
            format!(
                "Analyze the temperature data for {location} from {start} to {end}.\n\
                 The average temperature was {mean:.2}°C, with a minimum of {min:.2}°C \
                 and a maximum of {max:.2}°C.\n\
                 The trend shows a change of {slope:.2}°C per year.\n\
                 Provide a concise summary of the temperature trend in 3-5 sentences.",
                start = query.start_year(),
                end = query.end_year(),
                mean = stats.mean,
                min = stats.min,
                max = stats.max,
                slope = stats.trend.slope,
            )
        }
        DatasetKind::Co2 => format!(
            "Analyze the CO₂ emissions data for {country} from {start} to {end}.\n\
             The total CO₂ emissions were {total:.2} metric tons, with an average \
             annual emission of {mean:.2} metric tons.\n\
             The trend shows a change of {slope:.2} metric tons per year, \
             indicating {direction} emissions.\n\
             Provide a concise summary of the CO₂ emissions trend in 3-5 sentences.",
            country = stats.country,
            start = query.start_year(),
            end = query.end_year(),
            total = stats.total.unwrap_or(0.0),
            mean = stats.mean,
            slope = stats.trend.slope,
            direction = direction_label(stats.trend.slope),
        ),
    }
}

fn comparative_prompt(stats: &[EntityStatistics], query: &Query, kind: DatasetKind) -> String {
    let mut prompt = match kind {
        DatasetKind::Temperature => format!(
            "Compare the temperature data for the following countries from {} to {}.\n",
            query.start_year(),
            query.end_year()
        ),
        DatasetKind::Co2 => format!(
            "Compare the CO₂ emissions data for the following countries from {} to {}.\n",
            query.start_year(),
            query.end_year()
        ),
    };

    for entry in stats {
        let direction = direction_label(entry.trend.slope);
        // The write! cannot fail on a String.
        let _ = match kind {
            DatasetKind::Temperature => writeln!(
                prompt,
                "{}: average temperature {:.2}°C (minimum {:.2}°C, maximum {:.2}°C), \
                 changing by {:.2}°C per year ({direction}).",
                entry.country, entry.mean, entry.min, entry.max, entry.trend.slope,
            ),
            DatasetKind::Co2 => writeln!(
                prompt,
                "{}: total CO₂ emissions {:.2} metric tons, average annual emission \
                 {:.2} metric tons, changing by {:.2} metric tons per year ({direction}).",
                entry.country,
                entry.total.unwrap_or(0.0),
                entry.mean,
                entry.trend.slope,
            ),
        };
    }

    match kind {
        DatasetKind::Temperature => prompt.push_str(
            "Provide a concise comparison of the temperature trends across these \
             countries in 3-5 sentences.",
        ),
        DatasetKind::Co2 => prompt.push_str(
            "Provide a concise comparison of the CO₂ emissions trends across these \
             countries in 3-5 sentences.",
        ),
    }
    prompt
}
