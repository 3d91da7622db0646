//! Canned-reply selection.
//!
//! Lookup goes `row for emotion -> exact problem type -> General -> first
//! entry`. An emotion without a row (Neutral in the built-in table) draws from
//! the generic pool through a [`RandomSource`].

use super::context::{ContextAnalysis, ProblemType};
use super::emotion::{EmotionAnalysis, EmotionCategory};
use super::keywords::{normalize, KeywordSet};
use super::random::RandomSource;

pub const GREETING: KeywordSet = KeywordSet::new(
    "greeting",
    &["สวัสดี", "หวัดดี", "ดีจ้า", "hello", "good morning"],
);

pub const GREETING_REPLY: &str = "สวัสดีค่ะ 💕 วันนี้เป็นยังไงบ้าง? มีเรื่องอะไรอยากเล่าให้ฟังไหมคะ ไม่ว่าจะเรื่องดีหรือเรื่องที่ไม่สบายใจ เราพร้อมรับฟังเสมอนะ";

/// Tone-neutral replies used when no table row matches the emotion.
pub const GENERIC_RESPONSES: &[&str] = &[
    "ขอบคุณที่เล่าให้ฟังนะคะ ลองเล่าเพิ่มอีกนิดได้ไหม ว่าตอนนี้รู้สึกยังไงบ้าง",
    "เราอยู่ตรงนี้นะ ค่อย ๆ เล่าได้เลย ไม่ต้องรีบ",
    "ความรักต้องอาศัยความเข้าใจจากทั้งสองฝ่าย ลองคุยกันด้วยใจเย็น ๆ ดูนะคะ",
    "ทุกความสัมพันธ์มีช่วงขึ้นลง สิ่งสำคัญคือการดูแลใจตัวเองและคนที่เรารักไปพร้อมกัน",
    "ลองหาเวลาพักสักหน่อย แล้วค่อยกลับมาคุยกันตอนที่ทั้งคู่พร้อมนะคะ",
];

/// One emotion's replies, keyed by problem type in declaration order.
#[derive(Debug, Clone, Copy)]
pub struct ResponseRow {
    pub emotion: EmotionCategory,
    pub entries: &'static [(ProblemType, &'static str)],
}

const BUILTIN_ROWS: &[ResponseRow] = &[
    ResponseRow {
        emotion: EmotionCategory::Sad,
        entries: &[
            (ProblemType::General, "เข้าใจเลยว่าตอนนี้รู้สึกเศร้ามาก ร้องไห้ออกมาได้เลยนะ ความรู้สึกแบบนี้ไม่ผิดเลย เราอยู่ข้าง ๆ เสมอ"),
            (ProblemType::Conflict, "การทะเลาะกันทำให้ใจเหนื่อยจริง ๆ ลองให้เวลาทั้งคู่ได้ใจเย็นลงก่อน แล้วค่อยคุยกันถึงสิ่งที่แต่ละคนรู้สึกนะคะ"),
            (ProblemType::Communication, "เวลาที่รู้สึกว่าไม่ได้ถูกรับฟัง มันเหงาและเศร้ามาก ลองบอกเขาตรง ๆ ว่าเราอยากให้เขาฟังเรื่องไหนบ้างนะ"),
            (ProblemType::Trust, "ความไม่ไว้ใจทำให้ใจเจ็บได้ลึกมาก ค่อย ๆ คุยกันถึงสิ่งที่เกิดขึ้น และบอกว่าเราต้องการอะไรเพื่อให้กลับมาสบายใจ"),
            (ProblemType::Jealousy, "ความหึงหวงมักมาจากความกลัวจะเสียคนที่รักไป ลองบอกความรู้สึกนี้กับเขาอย่างอ่อนโยนดูนะคะ"),
        ],
    },
    ResponseRow {
        emotion: EmotionCategory::Angry,
        entries: &[
            (ProblemType::General, "โกรธได้นะ ความรู้สึกนี้มีเหตุผลของมัน ลองหายใจลึก ๆ สักครู่ก่อนตัดสินใจทำอะไรต่อ"),
            (ProblemType::Conflict, "ตอนที่ยังโกรธอยู่ คำพูดอาจทำร้ายกันได้ง่าย ขอเวลานอกสักพัก แล้วค่อยกลับมาคุยกันตอนที่ใจเย็นลงนะคะ"),
            (ProblemType::Communication, "หงุดหงิดที่คุยกันไม่รู้เรื่องใช่ไหม ลองเริ่มประโยคด้วย 'เรารู้สึกว่า...' แทนการตำหนิ อาจช่วยให้เขาฟังมากขึ้น"),
            (ProblemType::Trust, "ถ้ารู้สึกว่าถูกหลอก ความโกรธเป็นเรื่องธรรมดา ลองถามความจริงจากเขาตรง ๆ ในเวลาที่ทั้งคู่พร้อมนะ"),
        ],
    },
    ResponseRow {
        emotion: EmotionCategory::Worried,
        entries: &[
            (ProblemType::General, "ความกังวลทำให้คิดวนได้ไม่จบ ลองเขียนสิ่งที่กังวลออกมา แล้วเลือกคุยกับเขาทีละเรื่องนะคะ"),
            (ProblemType::Trust, "ถ้ายังไม่แน่ใจในความสัมพันธ์ ลองบอกเขาว่าเราต้องการความชัดเจนเรื่องไหน การสื่อสารตรง ๆ ช่วยลดความกังวลได้"),
            (ProblemType::Jealousy, "กลัวว่าเขาจะสนใจคนอื่นใช่ไหม ลองบอกความกังวลนี้กับเขาโดยไม่กล่าวหา แล้วฟังคำตอบของเขาด้วยใจเปิดนะ"),
            (ProblemType::Communication, "เวลาที่เขาเงียบไป เรามักคิดไปเองหลายอย่าง ลองถามเขาตรง ๆ ว่าเกิดอะไรขึ้น ดีกว่าเก็บไว้คนเดียวนะคะ"),
        ],
    },
    ResponseRow {
        emotion: EmotionCategory::Happy,
        entries: &[(ProblemType::General, "ดีใจด้วยนะคะ! 🥰 เก็บช่วงเวลาดี ๆ แบบนี้ไว้ในไทม์ไลน์ของเราสองคนด้วยน้า")],
    },
    ResponseRow {
        emotion: EmotionCategory::Confused,
        entries: &[
            (ProblemType::General, "งงก็ไม่แปลกเลย ความรู้สึกบางอย่างต้องใช้เวลาทำความเข้าใจ ลองเล่าให้ฟังทีละส่วนนะคะ"),
            (ProblemType::Communication, "ถ้าไม่เข้าใจว่าเขาหมายถึงอะไร ลองถามกลับด้วยคำถามง่าย ๆ ว่า 'หมายความว่าแบบนี้ใช่ไหม' จะช่วยลดการเข้าใจผิดได้"),
        ],
    },
];

/// Nested `EmotionCategory -> ProblemType -> reply` table plus the generic pool.
#[derive(Debug, Clone, Copy)]
pub struct ResponseTable {
    rows: &'static [ResponseRow],
}

impl Default for ResponseTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ResponseTable {
    pub fn builtin() -> Self {
        Self { rows: BUILTIN_ROWS }
    }

    /// Custom rows; the generic pool stays [`GENERIC_RESPONSES`].
    pub fn with_rows(rows: &'static [ResponseRow]) -> Self {
        Self { rows }
    }

    /// Table entry for the pair, if the emotion has a row with any entry.
    pub fn lookup(&self, emotion: EmotionCategory, problem: ProblemType) -> Option<&'static str> {
        let row = self.rows.iter().find(|row| row.emotion == emotion)?;
        let find = |wanted: ProblemType| {
            row.entries
                .iter()
                .find(|(problem_type, _)| *problem_type == wanted)
                .map(|(_, text)| *text)
        };
        find(problem)
            .or_else(|| find(ProblemType::General))
            .or_else(|| row.entries.first().map(|(_, text)| *text))
    }

    /// Uniform pick from the generic pool.
    pub fn generic(&self, rng: &dyn RandomSource) -> &'static str {
        let index = rng.pick(GENERIC_RESPONSES.len());
        GENERIC_RESPONSES
            .get(index)
            .copied()
            .unwrap_or(GENERIC_RESPONSES[0])
    }

    pub fn select(
        &self,
        emotion: &EmotionAnalysis,
        context: &ContextAnalysis,
        rng: &dyn RandomSource,
    ) -> &'static str {
        self.lookup(emotion.primary, context.problem_type)
            .unwrap_or_else(|| self.generic(rng))
    }
}

/// True if the raw text contains a greeting keyword.
pub fn is_greeting(text: &str) -> bool {
    GREETING.matches(&normalize(text))
}

/// Select a reply from the built-in table.
pub fn select_response(
    emotion: &EmotionAnalysis,
    context: &ContextAnalysis,
    rng: &dyn RandomSource,
) -> String {
    ResponseTable::builtin().select(emotion, context, rng).to_string()
}
