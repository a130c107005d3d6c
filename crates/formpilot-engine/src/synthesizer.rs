//! Value inference from contextual signals.

use chrono::{DateTime, Local};
use formpilot_config::VocabularyConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::model::{ControlKind, ControlSnapshot, SynthesizedValue};

/// Chooses a value for an eligible control.
///
/// Rules, first match wins:
///
/// 1. lists with at least two options get the second option
/// 2. unchecked toggles get checked; checked ones are left alone
/// 3. text near an extension keyword gets a four-digit number
/// 4. text near a subject keyword gets a timestamped subject line
/// 5. any other text gets `{prefix}_{HH:MM:SS}_{n}`
pub struct ValueSynthesizer {
    vocabulary: VocabularyConfig,
    rng: StdRng,
}

impl ValueSynthesizer {
    pub fn new(vocabulary: VocabularyConfig) -> Self {
        Self {
            vocabulary,
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic random stream, for reproducible runs.
    pub fn with_seed(vocabulary: VocabularyConfig, seed: u64) -> Self {
        Self {
            vocabulary,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn synthesize(&mut self, control: &ControlSnapshot) -> Option<SynthesizedValue> {
        self.synthesize_at(control, Local::now())
    }

    pub fn synthesize_at(&mut self, control: &ControlSnapshot, now: DateTime<Local>) -> Option<SynthesizedValue> {
        match control.kind()? {
            ControlKind::Select => {
                (control.option_count > 1).then_some(SynthesizedValue::AlternateOption { index: 1 })
            }
            ControlKind::Toggle => (!control.checked).then_some(SynthesizedValue::CheckedBoolean),
            ControlKind::TextLike => Some(self.text_value(control, now)),
        }
    }

    fn text_value(&mut self, control: &ControlSnapshot, now: DateTime<Local>) -> SynthesizedValue {
        let signal = &control.signal;
        if signal.mentions_any(&self.vocabulary.extension_keywords) {
            let extension: u16 = self.rng.gen_range(1000..=9999);
            return SynthesizedValue::NumericExtension {
                value: extension.to_string(),
            };
        }
        if signal.mentions_any(&self.vocabulary.subject_keywords) {
            return SynthesizedValue::SubjectLine {
                value: format!(
                    "[{}: {}] {}",
                    self.vocabulary.subject_prefix,
                    now.format("%Y/%m/%d %H:%M:%S"),
                    self.vocabulary.subject_marker
                ),
            };
        }
        let suffix: u8 = self.rng.gen_range(0..100);
        SynthesizedValue::GenericText {
            value: format!("{}_{}_{}", self.vocabulary.generic_prefix, now.format("%H:%M:%S"), suffix),
        }
    }
}

#[cfg(test)]
#[path = "synthesizer_tests.rs"]
mod synthesizer_tests;
