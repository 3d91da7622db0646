//! Emotion classification by keyword frequency.
//!
//! Counts how many keywords of each category occur in the message and keeps
//! the category with the strictly greatest count. Categories are scanned in
//! [`EMOTION_ORDER`], so an earlier category wins a tie.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::keywords::{normalize, KeywordSet};

/// Dominant feeling detected in a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionCategory {
    Sad,
    Angry,
    Worried,
    Happy,
    Confused,
    Neutral,
}

impl EmotionCategory {
    pub fn label(&self) -> &'static str {
        match self {
            EmotionCategory::Sad => "sad",
            EmotionCategory::Angry => "angry",
            EmotionCategory::Worried => "worried",
            EmotionCategory::Happy => "happy",
            EmotionCategory::Confused => "confused",
            EmotionCategory::Neutral => "neutral",
        }
    }
}

impl fmt::Display for EmotionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Punctuation-derived tone of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Normal,
    Urgent,
    Questioning,
}

/// Result of emotion classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionAnalysis {
    pub primary: EmotionCategory,
    /// 2 when nothing matched, otherwise `min(count * 3 + 2, 10)`
    pub intensity: u8,
    pub tone: Tone,
}

const SAD: KeywordSet = KeywordSet::new(
    "sad",
    &[
        "เศร้า", "เสียใจ", "ร้องไห้", "เหงา", "ผิดหวัง", "หดหู่", "ท้อแท้", "sad", "lonely", "cry",
    ],
);

const ANGRY: KeywordSet = KeywordSet::new(
    "angry",
    &[
        "โกรธ", "โมโห", "หงุดหงิด", "รำคาญ", "ไม่พอใจ", "เซ็ง", "angry", "furious", "annoyed",
    ],
);

const WORRIED: KeywordSet = KeywordSet::new(
    "worried",
    &[
        "กังวล", "เครียด", "กลัว", "ไม่แน่ใจ", "ห่วง", "วิตก", "worried", "anxious", "stress",
        "afraid",
    ],
);

const HAPPY: KeywordSet = KeywordSet::new(
    "happy",
    &[
        "ดีใจ", "มีความสุข", "สนุก", "ยิ้ม", "รักมาก", "ขอบคุณ", "happy", "glad", "love",
    ],
);

const CONFUSED: KeywordSet = KeywordSet::new(
    "confused",
    &[
        "งง", "สับสน", "ไม่เข้าใจ", "ทำไม", "ยังไงดี", "confused", "why",
    ],
);

/// Scan order for emotion categories. Earlier entries win ties.
pub const EMOTION_ORDER: [(EmotionCategory, KeywordSet); 5] = [
    (EmotionCategory::Sad, SAD),
    (EmotionCategory::Angry, ANGRY),
    (EmotionCategory::Worried, WORRIED),
    (EmotionCategory::Happy, HAPPY),
    (EmotionCategory::Confused, CONFUSED),
];

const INTENSITY_FLOOR: usize = 2;
const INTENSITY_STEP: usize = 3;
const INTENSITY_CAP: usize = 10;

/// Classify the dominant emotion of `text`. Total over all inputs.
pub fn classify_emotion(text: &str) -> EmotionAnalysis {
    let normalized = normalize(text);

    let mut primary = EmotionCategory::Neutral;
    let mut best_count = 0;

    for (category, keywords) in EMOTION_ORDER.iter() {
        let count = keywords.count_in(&normalized);
        // strictly greater: the first category to reach a count keeps it
        if count > best_count {
            best_count = count;
            primary = *category;
        }
    }

    EmotionAnalysis {
        primary,
        intensity: intensity_for(best_count),
        tone: detect_tone(&normalized),
    }
}

fn intensity_for(match_count: usize) -> u8 {
    let raw = match_count
        .saturating_mul(INTENSITY_STEP)
        .saturating_add(INTENSITY_FLOOR);
    raw.min(INTENSITY_CAP) as u8
}

fn detect_tone(normalized: &str) -> Tone {
    if normalized.contains('!') {
        Tone::Urgent
    } else if normalized.contains('?') {
        Tone::Questioning
    } else {
        Tone::Normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intensity_curve() {
        assert_eq!(intensity_for(0), 2);
        assert_eq!(intensity_for(1), 5);
        assert_eq!(intensity_for(2), 8);
        assert_eq!(intensity_for(3), 10);
        assert_eq!(intensity_for(usize::MAX), 10);
    }

    #[test]
    fn test_tone_precedence() {
        assert_eq!(detect_tone("จริงเหรอ?!"), Tone::Urgent);
        assert_eq!(detect_tone("why?"), Tone::Questioning);
        assert_eq!(detect_tone("ok"), Tone::Normal);
    }

    #[test]
    fn test_all_keywords_are_lowercase() {
        for (_, set) in EMOTION_ORDER.iter() {
            for word in set.words {
                assert!(!word.is_empty());
                assert_eq!(*word, word.to_lowercase(), "keyword {word} in {}", set.name);
            }
        }
    }

    #[test]
    fn test_english_matching_is_case_insensitive() {
        let analysis = classify_emotion("I am SO ANGRY");
        assert_eq!(analysis.primary, EmotionCategory::Angry);
    }
}
