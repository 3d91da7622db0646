//! Brain Module Tests
//!
//! Classifier properties, tie-break rules, response lookup and the
//! end-to-end Thai conversations the fallback brain must handle.

use crate::brain::{
    classify_context, classify_emotion, is_greeting, select_response, CompanionBrain,
    ContextAnalysis, EmotionAnalysis, EmotionCategory, FixedSequence, Need, ProblemType,
    ReplyKind, ResponseTable, SeededRandom, Severity, Tone, GENERIC_RESPONSES, GREETING_REPLY,
};
use std::sync::Arc;

#[cfg(test)]
mod emotion_classifier_tests {
    use super::*;

    #[test]
    fn test_no_keywords_is_neutral_with_intensity_two() {
        for text in ["", "   ", "วันนี้ฝนตก", "the weather is fine", "12345"] {
            let analysis = classify_emotion(text);
            assert_eq!(analysis.primary, EmotionCategory::Neutral, "text: {:?}", text);
            assert_eq!(analysis.intensity, 2, "text: {:?}", text);
        }
    }

    #[test]
    fn test_intensity_grows_with_distinct_matches() {
        let cases = [
            ("เศร้า", 5),
            ("เศร้า ร้องไห้", 8),
            ("เศร้า ร้องไห้ เหงา", 10),
            ("เศร้า ร้องไห้ เหงา ผิดหวัง หดหู่", 10),
        ];
        for (text, expected) in cases {
            let analysis = classify_emotion(text);
            assert_eq!(analysis.primary, EmotionCategory::Sad, "text: {}", text);
            assert_eq!(analysis.intensity, expected, "text: {}", text);
        }
    }

    #[test]
    fn test_repeated_keyword_counts_once() {
        let analysis = classify_emotion("เศร้า เศร้า เศร้า");
        assert_eq!(analysis.intensity, 5);
    }

    #[test]
    fn test_tie_goes_to_earlier_category() {
        // one sad keyword, one angry keyword
        let analysis = classify_emotion("เสียใจและโกรธ");
        assert_eq!(analysis.primary, EmotionCategory::Sad);

        // one worried, one happy
        let analysis = classify_emotion("กังวลแต่ก็ดีใจ");
        assert_eq!(analysis.primary, EmotionCategory::Worried);
    }

    #[test]
    fn test_higher_count_beats_earlier_category() {
        // one sad keyword, two angry keywords
        let analysis = classify_emotion("เสียใจ โกรธ โมโห");
        assert_eq!(analysis.primary, EmotionCategory::Angry);
        assert_eq!(analysis.intensity, 8);
    }

    #[test]
    fn test_tone() {
        assert_eq!(classify_emotion("เศร้า!").tone, Tone::Urgent);
        assert_eq!(classify_emotion("ทำไม?").tone, Tone::Questioning);
        assert_eq!(classify_emotion("ทำไม?!").tone, Tone::Urgent);
        assert_eq!(classify_emotion("?!").tone, Tone::Urgent);
        assert_eq!(classify_emotion("เฉย ๆ").tone, Tone::Normal);
    }

    #[test]
    fn test_english_keywords_match_whole_words_only() {
        assert_eq!(classify_emotion("I lost my glove").primary, EmotionCategory::Neutral);
        assert_eq!(classify_emotion("I love you").primary, EmotionCategory::Happy);
        assert_eq!(classify_emotion("a crystal vase").primary, EmotionCategory::Neutral);
        assert_eq!(classify_emotion("so sad.").primary, EmotionCategory::Sad);
    }

    #[test]
    fn test_tone_is_independent_of_emotion() {
        let analysis = classify_emotion("what?");
        assert_eq!(analysis.primary, EmotionCategory::Neutral);
        assert_eq!(analysis.tone, Tone::Questioning);
    }
}

#[cfg(test)]
mod context_classifier_tests {
    use super::*;

    #[test]
    fn test_priority_beats_frequency() {
        // one conflict keyword vs three jealousy keywords
        let context = classify_context("ทะเลาะกันเพราะหึง หวง อิจฉา");
        assert_eq!(context.problem_type, ProblemType::Conflict);
    }

    #[test]
    fn test_each_problem_type() {
        let cases = [
            ("เถียงกันทุกวัน", ProblemType::Conflict),
            ("เขาไม่ตอบแชทเลย", ProblemType::Communication),
            ("รู้สึกว่าเขาโกหก", ProblemType::Trust),
            ("เขาคุยกับแฟนเก่าอีกแล้ว", ProblemType::Jealousy),
            ("วันนี้ไปเที่ยวทะเลมา", ProblemType::General),
        ];
        for (text, expected) in cases {
            assert_eq!(classify_context(text).problem_type, expected, "text: {}", text);
        }
    }

    #[test]
    fn test_english_problem_words_need_boundaries() {
        assert_eq!(classify_context("We are flying to Japan").problem_type, ProblemType::General);
        assert_eq!(classify_context("he keeps lying to me").problem_type, ProblemType::Trust);
        assert_eq!(classify_context("she likes to stalk celebrities").problem_type, ProblemType::General);
    }

    #[test]
    fn test_severity() {
        assert_eq!(classify_context("ทนไม่ไหวแล้ว").severity, Severity::High);
        assert_eq!(classify_context("อยากเลิก").severity, Severity::High);
        assert_eq!(classify_context("เถียงกันนิดหน่อย").severity, Severity::Normal);
    }

    #[test]
    fn test_needs_default_to_support() {
        let context = classify_context("วันนี้ไปเที่ยวทะเลมา");
        assert_eq!(context.needs, vec![Need::Support]);
    }

    #[test]
    fn test_needs_advice_only() {
        let context = classify_context("แนะนำวิธีง้อแฟนหน่อย");
        assert_eq!(context.needs, vec![Need::Advice]);
    }

    #[test]
    fn test_needs_both_in_fixed_order() {
        let context = classify_context("เหนื่อยมาก ควรทำยังไง");
        assert_eq!(context.needs, vec![Need::Advice, Need::Support]);
    }

    #[test]
    fn test_needs_never_empty() {
        for text in ["", "!", "ทะเลาะ", "hello", "เหนื่อย", "แนะนำ"] {
            assert!(!classify_context(text).needs.is_empty(), "text: {:?}", text);
        }
    }
}

#[cfg(test)]
mod response_selector_tests {
    use super::*;

    fn emotion(primary: EmotionCategory) -> EmotionAnalysis {
        EmotionAnalysis {
            primary,
            intensity: 5,
            tone: Tone::Normal,
        }
    }

    fn context(problem_type: ProblemType) -> ContextAnalysis {
        ContextAnalysis {
            problem_type,
            severity: Severity::Normal,
            needs: vec![Need::Support],
        }
    }

    #[test]
    fn test_table_lookup_is_deterministic() {
        let rng = SeededRandom::new(7);
        let e = emotion(EmotionCategory::Angry);
        let c = context(ProblemType::Trust);
        let first = select_response(&e, &c, &rng);
        let second = select_response(&e, &c, &rng);
        assert_eq!(first, second);
        assert!(!GENERIC_RESPONSES.contains(&first.as_str()));
    }

    #[test]
    fn test_exact_entry_differs_from_general() {
        let table = ResponseTable::builtin();
        let exact = table.lookup(EmotionCategory::Sad, ProblemType::Conflict);
        let general = table.lookup(EmotionCategory::Sad, ProblemType::General);
        assert!(exact.is_some());
        assert_ne!(exact, general);
    }

    #[test]
    fn test_unpopulated_pair_uses_general() {
        let table = ResponseTable::builtin();
        assert_eq!(
            table.lookup(EmotionCategory::Confused, ProblemType::Jealousy),
            table.lookup(EmotionCategory::Confused, ProblemType::General),
        );
    }

    #[test]
    fn test_neutral_draws_from_generic_pool() {
        let rng = FixedSequence::new(vec![4]);
        let reply = select_response(&emotion(EmotionCategory::Neutral), &context(ProblemType::Trust), &rng);
        assert_eq!(reply, GENERIC_RESPONSES[4]);
    }

    #[test]
    fn test_every_reply_is_non_empty() {
        let rng = SeededRandom::new(1);
        let emotions = [
            EmotionCategory::Sad,
            EmotionCategory::Angry,
            EmotionCategory::Worried,
            EmotionCategory::Happy,
            EmotionCategory::Confused,
            EmotionCategory::Neutral,
        ];
        let problems = [
            ProblemType::Conflict,
            ProblemType::Communication,
            ProblemType::Trust,
            ProblemType::Jealousy,
            ProblemType::General,
        ];
        for e in emotions {
            for p in problems {
                assert!(!select_response(&emotion(e), &context(p), &rng).is_empty());
            }
        }
    }

    #[test]
    fn test_greeting_overrides_content() {
        let brain = CompanionBrain::new();
        for text in ["สวัสดีค่ะ", "หวัดดี ทะเลาะกับแฟนมา เศร้ามาก", "Hello, I am so angry!"] {
            assert!(is_greeting(text));
            let reply = brain.reply(text);
            assert_eq!(reply.kind, ReplyKind::Greeting);
            assert_eq!(reply.text, GREETING_REPLY);
        }
    }
}

#[cfg(test)]
mod scenario_tests {
    use super::*;

    #[test]
    fn test_crisis_without_emotion_keywords_uses_generic_pool() {
        let text = "ทนไม่ไหวแล้ว เลิกกันเถอะ";

        let context = classify_context(text);
        assert_eq!(context.severity, Severity::High);
        assert_eq!(context.problem_type, ProblemType::General);
        assert_eq!(classify_emotion(text).primary, EmotionCategory::Neutral);

        let brain = CompanionBrain::new();
        for _ in 0..20 {
            let reply = brain.reply(text);
            assert_eq!(reply.kind, ReplyKind::Generic);
            assert!(GENERIC_RESPONSES.contains(&reply.text.as_str()));
        }

        let pinned = CompanionBrain::with_random(Arc::new(FixedSequence::new(vec![1])));
        assert_eq!(pinned.reply(text).text, GENERIC_RESPONSES[1]);
    }

    #[test]
    fn test_sad_conflict_hits_exact_entry() {
        let text = "เศร้ามากเลย ทะเลาะกับแฟนอีกแล้ว";

        let emotion = classify_emotion(text);
        assert_eq!(emotion.primary, EmotionCategory::Sad);
        assert_eq!(emotion.intensity, 5);
        assert_eq!(emotion.tone, Tone::Normal);

        let context = classify_context(text);
        assert_eq!(context.problem_type, ProblemType::Conflict);
        assert_eq!(context.severity, Severity::Normal);

        let expected = ResponseTable::builtin()
            .lookup(EmotionCategory::Sad, ProblemType::Conflict)
            .unwrap();
        let brain = CompanionBrain::new();
        let first = brain.reply(text);
        let second = brain.reply(text);
        assert_eq!(first.kind, ReplyKind::Table);
        assert_eq!(first.text, expected);
        assert_eq!(first.text, second.text);
    }

    #[test]
    fn test_greeting_returns_fixed_string() {
        let reply = CompanionBrain::new().reply("สวัสดีค่ะ");
        assert_eq!(reply.kind, ReplyKind::Greeting);
        assert_eq!(reply.text, GREETING_REPLY);
    }

    #[test]
    fn test_classifiers_are_referentially_transparent() {
        let texts = [
            "เศร้ามากเลย ทะเลาะกับแฟนอีกแล้ว",
            "ทนไม่ไหวแล้ว เลิกกันเถอะ",
            "กังวลว่าเขาจะโกหก ควรทำยังไงดี?",
            "",
        ];
        for text in texts {
            let first = (classify_emotion(text), classify_context(text));
            for _ in 0..10 {
                assert_eq!((classify_emotion(text), classify_context(text)), first);
            }
        }
    }

    #[test]
    fn test_classifiers_are_safe_to_share_across_threads() {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                std::thread::spawn(|| {
                    let brain = CompanionBrain::new();
                    brain.reply("เศร้ามากเลย ทะเลาะกับแฟนอีกแล้ว").text
                })
            })
            .collect();
        let replies: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(replies.windows(2).all(|w| w[0] == w[1]));
    }
}
