//! Relationship-problem classification.
//!
//! Unlike emotions, problem types are chosen by priority: the first type in
//! [`PROBLEM_PRIORITY`] with any matching keyword wins, however many keywords
//! later types match.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::keywords::{normalize, KeywordSet};

/// Relationship-issue domain of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProblemType {
    Conflict,
    Communication,
    Trust,
    Jealousy,
    General,
}

impl ProblemType {
    pub fn label(&self) -> &'static str {
        match self {
            ProblemType::Conflict => "conflict",
            ProblemType::Communication => "communication",
            ProblemType::Trust => "trust",
            ProblemType::Jealousy => "jealousy",
            ProblemType::General => "general",
        }
    }
}

impl fmt::Display for ProblemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Normal,
}

/// Kind of help the user is implicitly asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Need {
    Advice,
    Support,
}

/// Result of context classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextAnalysis {
    pub problem_type: ProblemType,
    pub severity: Severity,
    /// Never empty; `[Support]` when nothing matched.
    pub needs: Vec<Need>,
}

const CONFLICT: KeywordSet = KeywordSet::new(
    "conflict",
    &[
        "ทะเลาะ", "เถียง", "ขัดแย้ง", "มีปัญหา", "ไม่ลงรอย", "fight", "argue",
    ],
);

const COMMUNICATION: KeywordSet = KeywordSet::new(
    "communication",
    &[
        "ไม่คุย", "ไม่ฟัง", "ไม่ตอบ", "สื่อสาร", "เงียบ", "เข้าใจผิด", "talk", "ignore",
    ],
);

const TRUST: KeywordSet = KeywordSet::new(
    "trust",
    &[
        "ไม่ไว้ใจ", "ไว้ใจ", "โกหก", "หลอก", "นอกใจ", "ปิดบัง", "trust", "lying", "cheat",
    ],
);

const JEALOUSY: KeywordSet = KeywordSet::new(
    "jealousy",
    &["หึง", "หวง", "อิจฉา", "แฟนเก่า", "คนอื่น", "jealous"],
);

/// Priority order for problem types. The first match wins.
pub const PROBLEM_PRIORITY: [(ProblemType, KeywordSet); 4] = [
    (ProblemType::Conflict, CONFLICT),
    (ProblemType::Communication, COMMUNICATION),
    (ProblemType::Trust, TRUST),
    (ProblemType::Jealousy, JEALOUSY),
];

/// Crisis-level language ("can't take it anymore", "break up").
pub const CRISIS: KeywordSet = KeywordSet::new(
    "crisis",
    &[
        "ทนไม่ไหว", "เลิก", "จบกัน", "ไม่อยากอยู่", "break up", "breakup",
    ],
);

pub const ADVICE_SEEKING: KeywordSet = KeywordSet::new(
    "advice",
    &[
        "ทำยังไง", "ควรทำ", "แนะนำ", "ช่วยด้วย", "วิธี", "advice", "what should",
    ],
);

pub const SUPPORT_SEEKING: KeywordSet = KeywordSet::new(
    "support",
    &[
        "ไม่ไหว", "เหนื่อย", "อยากระบาย", "ฟังหน่อย", "ปลอบ", "กอด", "support", "listen",
    ],
);

/// Classify the relationship context of `text`. Total over all inputs.
pub fn classify_context(text: &str) -> ContextAnalysis {
    let normalized = normalize(text);

    let problem_type = PROBLEM_PRIORITY
        .iter()
        .find(|(_, keywords)| keywords.matches(&normalized))
        .map(|(problem, _)| *problem)
        .unwrap_or(ProblemType::General);

    let severity = if CRISIS.matches(&normalized) {
        Severity::High
    } else {
        Severity::Normal
    };

    ContextAnalysis {
        problem_type,
        severity,
        needs: detect_needs(&normalized),
    }
}

fn detect_needs(normalized: &str) -> Vec<Need> {
    let mut needs = Vec::with_capacity(2);
    if ADVICE_SEEKING.matches(normalized) {
        needs.push(Need::Advice);
    }
    if SUPPORT_SEEKING.matches(normalized) {
        needs.push(Need::Support);
    }
    if needs.is_empty() {
        needs.push(Need::Support);
    }
    needs
}
