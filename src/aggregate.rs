// src/aggregate.rs
//! Merging GGA and RMC sentences that describe the same second

use crate::config::AltitudePolicy;
use crate::gps::data::{AggregatedFix, GgaSentence, RmcSentence, Sentence};
use crate::gps::time::{format_datetime, FixKey};
use log::debug;
use std::collections::BTreeMap;

/// What happened to a sentence handed to the aggregator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    Created,
    Updated,
    Unchanged,
    /// RMC carrying the `000000` date; contributes nothing
    SentinelDate,
}

/// Key-ordered collection of fixes built from one log
#[derive(Debug, Clone, Default)]
pub struct FixAggregator {
    fixes: BTreeMap<FixKey, AggregatedFix>,
    policy: AltitudePolicy,
}

impl FixAggregator {
    pub fn new(policy: AltitudePolicy) -> Self {
        Self {
            fixes: BTreeMap::new(),
            policy,
        }
    }

    pub fn push(&mut self, sentence: &Sentence) -> MergeOutcome {
        match sentence {
            Sentence::Gga(gga) => self.add_gga(gga),
            Sentence::Rmc(rmc) => self.add_rmc(rmc),
        }
    }

    /// Record altitude (and position, for a new second) from a GGA sentence
    pub fn add_gga(&mut self, gga: &GgaSentence) -> MergeOutcome {
        let key = FixKey::from_time(&gga.time);

        if let Some(fix) = self.fixes.get_mut(&key) {
            return match self.policy {
                AltitudePolicy::KeepFirst => MergeOutcome::Unchanged,
                AltitudePolicy::Overwrite => {
                    debug!("{}: GGA overwrites altitude with {}", key, gga.altitude);
                    fix.altitude = Some(gga.altitude.clone());
                    MergeOutcome::Updated
                }
            };
        }

        let mut fix = AggregatedFix::new(
            key.clone(),
            gga.latitude.to_decimal(),
            gga.longitude.to_decimal(),
        );
        fix.altitude = Some(gga.altitude.clone());
        self.fixes.insert(key, fix);
        MergeOutcome::Created
    }

    /// Record course, speed and date from a dated RMC sentence.
    ///
    /// Position is only taken from the RMC when it creates the entry.
    pub fn add_rmc(&mut self, rmc: &RmcSentence) -> MergeOutcome {
        let Some(datetime) = format_datetime(&rmc.time, &rmc.date) else {
            return MergeOutcome::SentinelDate;
        };
        let key = FixKey::from_time(&rmc.time);

        if let Some(fix) = self.fixes.get_mut(&key) {
            fix.course = Some(rmc.course_degrees.clone());
            fix.speed = Some(rmc.speed_knots.clone());
            fix.datetime = Some(datetime);
            return MergeOutcome::Updated;
        }

        let mut fix = AggregatedFix::new(
            key.clone(),
            rmc.latitude.to_decimal(),
            rmc.longitude.to_decimal(),
        );
        fix.course = Some(rmc.course_degrees.clone());
        fix.speed = Some(rmc.speed_knots.clone());
        fix.datetime = Some(datetime);
        self.fixes.insert(key, fix);
        MergeOutcome::Created
    }

    pub fn get(&self, key: &FixKey) -> Option<&AggregatedFix> {
        self.fixes.get(key)
    }

    /// All entries in key order, including ones without a date
    pub fn fixes(&self) -> impl Iterator<Item = &AggregatedFix> {
        self.fixes.values()
    }

    /// Entries that will appear in the annotation file, in key order
    pub fn eligible(&self) -> impl Iterator<Item = &AggregatedFix> {
        self.fixes.values().filter(|fix| fix.is_eligible())
    }

    pub fn len(&self) -> usize {
        self.fixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixes.is_empty()
    }
}
