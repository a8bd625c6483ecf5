// SPDX-FileCopyrightText: 2026 Mindcheck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deterministic questionnaire scoring.
//!
//! The 21-item questionnaire splits into three seven-item subscales. Each
//! subscale sums the scores at its fixed question numbers and maps the sum
//! to a [`RiskLevel`]. Missing questions contribute 0.

use std::collections::BTreeMap;

use mindcheck_core::types::{AnsweredItem, RiskAssessment, RiskLevel, RiskProfile};

/// Number of canonical questions.
pub const QUESTION_COUNT: u32 = 21;

/// Summary returned by the deterministic path, independent of input.
pub const FALLBACK_SUMMARY: &str = "This is an automated screening based on your answers. \
It is not a diagnosis; it only gives a rough picture of your recent stress, anxiety, and mood.";

/// Recommendations returned by the deterministic path, independent of input.
pub const FALLBACK_RECOMMENDATIONS: &str = "Keep regular sleep and meal times, move your body \
a little every day, and talk with someone you trust about how you feel. If any level is \
moderate or high, or if you feel unsafe, please reach out to a mental health professional.";

/// A questionnaire subscale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subscale {
    Stress,
    Anxiety,
    Depression,
}

impl Subscale {
    pub const ALL: [Subscale; 3] = [Self::Stress, Self::Anxiety, Self::Depression];

    /// The 1-based question numbers belonging to this subscale.
    pub fn questions(self) -> &'static [u32; 7] {
        match self {
            Self::Stress => &[1, 6, 8, 11, 12, 14, 18],
            Self::Anxiety => &[2, 4, 7, 9, 15, 19, 20],
            Self::Depression => &[3, 5, 10, 13, 16, 17, 21],
        }
    }
}

/// Indexes answers by question number.
///
/// An explicit `id` wins over sequence position. When two answers claim the
/// same question, the later one is kept.
pub fn scores_by_question(answers: &[AnsweredItem]) -> BTreeMap<u32, i64> {
    answers
        .iter()
        .zip(1u32..)
        .map(|(item, position)| (item.id.unwrap_or(position), item.score))
        .collect()
}

/// Sums one subscale. Unanswered questions count as 0.
///
/// The sum saturates at the `i64` bounds, so extreme scores still land on
/// the side of the thresholds their sign points to.
pub fn subscale_sum(scores: &BTreeMap<u32, i64>, subscale: Subscale) -> i64 {
    subscale
        .questions()
        .iter()
        .map(|q| scores.get(q).copied().unwrap_or(0))
        .fold(0i64, i64::saturating_add)
}

/// Computes the risk profile for a set of answers.
pub fn risk_profile(answers: &[AnsweredItem]) -> RiskProfile {
    let scores = scores_by_question(answers);
    let level = |subscale| RiskLevel::from_sum(subscale_sum(&scores, subscale));

    RiskProfile {
        stress: level(Subscale::Stress),
        anxiety: level(Subscale::Anxiety),
        depression: level(Subscale::Depression),
    }
}

/// The deterministic assessment: fixed texts plus the computed risk profile.
pub fn assess(answers: &[AnsweredItem]) -> RiskAssessment {
    RiskAssessment {
        summary: FALLBACK_SUMMARY.to_string(),
        risks: risk_profile(answers),
        recommendations: FALLBACK_RECOMMENDATIONS.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn uniform(score: i64) -> Vec<AnsweredItem> {
        (0..QUESTION_COUNT).map(|_| AnsweredItem::scored(score)).collect()
    }

    /// 21 answers, all zero except `subscale`, whose items are filled so
    /// that they sum to `sum`.
    fn with_subscale_sum(subscale: Subscale, sum: i64) -> Vec<AnsweredItem> {
        let mut answers = uniform(0);
        let mut remaining = sum;
        for &q in subscale.questions() {
            let score = remaining.min(3);
            answers[(q - 1) as usize].score = score;
            remaining -= score;
        }
        assert_eq!(remaining, 0, "sum {sum} does not fit in seven items");
        answers
    }

    #[test]
    fn subscales_partition_the_questionnaire() {
        let mut all: Vec<u32> = Subscale::ALL
            .iter()
            .flat_map(|s| s.questions().iter().copied())
            .collect();
        all.sort_unstable();
        assert_eq!(all, (1..=QUESTION_COUNT).collect::<Vec<_>>());
    }

    #[test]
    fn all_zero_is_low_everywhere() {
        let risks = risk_profile(&uniform(0));
        assert_eq!(risks.stress, RiskLevel::Low);
        assert_eq!(risks.anxiety, RiskLevel::Low);
        assert_eq!(risks.depression, RiskLevel::Low);
    }

    #[test]
    fn all_three_is_high_everywhere() {
        let assessment = assess(&uniform(3));
        assert_eq!(
            assessment.risks,
            RiskProfile {
                stress: RiskLevel::High,
                anxiety: RiskLevel::High,
                depression: RiskLevel::High,
            }
        );
        assert_eq!(assessment.summary, FALLBACK_SUMMARY);
        assert_eq!(assessment.recommendations, FALLBACK_RECOMMENDATIONS);
    }

    #[test]
    fn threshold_boundaries_per_subscale() {
        let cases = [
            (6, RiskLevel::Low),
            (7, RiskLevel::Moderate),
            (13, RiskLevel::Moderate),
            (14, RiskLevel::High),
        ];

        for subscale in Subscale::ALL {
            for (sum, expected) in cases {
                let risks = risk_profile(&with_subscale_sum(subscale, sum));
                let (own, others) = match subscale {
                    Subscale::Stress => (risks.stress, [risks.anxiety, risks.depression]),
                    Subscale::Anxiety => (risks.anxiety, [risks.stress, risks.depression]),
                    Subscale::Depression => (risks.depression, [risks.stress, risks.anxiety]),
                };
                assert_eq!(own, expected, "{subscale:?} sum {sum}");
                assert_eq!(others, [RiskLevel::Low; 2], "{subscale:?} leaked into others");
            }
        }
    }

    #[test]
    fn depression_items_only_touch_depression() {
        let mut answers = uniform(0);
        for q in [3, 5, 10, 13, 16, 17, 21] {
            answers[q - 1].score = 2;
        }
        let scores = scores_by_question(&answers);
        assert_eq!(subscale_sum(&scores, Subscale::Depression), 14);
        assert_eq!(subscale_sum(&scores, Subscale::Anxiety), 0);
        assert_eq!(subscale_sum(&scores, Subscale::Stress), 0);
    }

    #[test]
    fn empty_answers_score_zero() {
        let risks = risk_profile(&[]);
        assert_eq!(risks.stress, RiskLevel::Low);
    }

    #[test]
    fn extra_positions_are_ignored() {
        let mut answers = uniform(0);
        answers.extend((0..10).map(|_| AnsweredItem::scored(3)));
        assert_eq!(risk_profile(&answers), risk_profile(&uniform(0)));
    }

    #[test]
    fn out_of_range_scores_are_taken_at_face_value() {
        let mut answers = uniform(0);
        answers[0].score = 10; // question 1, stress
        let scores = scores_by_question(&answers);
        assert_eq!(subscale_sum(&scores, Subscale::Stress), 10);
        assert_eq!(risk_profile(&answers).stress, RiskLevel::Moderate);
    }

    #[test]
    fn extreme_positive_scores_saturate_to_high() {
        let mut answers = uniform(0);
        answers[0].score = i64::MAX; // question 1, stress
        answers[5].score = i64::MAX; // question 6, stress
        let scores = scores_by_question(&answers);
        assert_eq!(subscale_sum(&scores, Subscale::Stress), i64::MAX);
        assert_eq!(risk_profile(&answers).stress, RiskLevel::High);
    }

    #[test]
    fn extreme_negative_scores_saturate_to_low() {
        let mut answers = uniform(3);
        answers[1].score = i64::MIN; // question 2, anxiety
        answers[3].score = i64::MIN; // question 4, anxiety
        let scores = scores_by_question(&answers);
        assert_eq!(subscale_sum(&scores, Subscale::Anxiety), i64::MIN);
        let risks = risk_profile(&answers);
        assert_eq!(risks.anxiety, RiskLevel::Low);
        assert_eq!(risks.stress, RiskLevel::High);
    }

    #[test]
    fn explicit_ids_override_position() {
        // Submitted in reverse order, identified explicitly.
        let answers: Vec<AnsweredItem> = (1..=QUESTION_COUNT)
            .rev()
            .map(|id| AnsweredItem {
                id: Some(id),
                score: if Subscale::Anxiety.questions().contains(&id) { 3 } else { 0 },
            })
            .collect();

        let risks = risk_profile(&answers);
        assert_eq!(risks.anxiety, RiskLevel::High);
        assert_eq!(risks.stress, RiskLevel::Low);
        assert_eq!(risks.depression, RiskLevel::Low);
    }

    #[test]
    fn duplicate_question_keeps_last_answer() {
        let answers = vec![
            AnsweredItem { id: Some(1), score: 3 },
            AnsweredItem { id: Some(1), score: 1 },
        ];
        assert_eq!(scores_by_question(&answers).get(&1), Some(&1));
    }

    proptest! {
        #[test]
        fn short_input_equals_zero_padding(scores in prop::collection::vec(0i64..=3, 0..21)) {
            let short: Vec<AnsweredItem> = scores.iter().copied().map(AnsweredItem::scored).collect();
            let mut padded = short.clone();
            padded.resize(QUESTION_COUNT as usize, AnsweredItem::scored(0));
            prop_assert_eq!(assess(&short), assess(&padded));
        }

        #[test]
        fn any_i64_scores_are_scored_without_overflow(scores in prop::collection::vec(any::<i64>(), 21)) {
            let answers: Vec<AnsweredItem> = scores.iter().copied().map(AnsweredItem::scored).collect();
            let by_question = scores_by_question(&answers);
            for subscale in Subscale::ALL {
                let exact: i128 = subscale
                    .questions()
                    .iter()
                    .map(|q| i128::from(by_question[q]))
                    .sum();
                let saturated = exact.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64;
                prop_assert_eq!(subscale_sum(&by_question, subscale), saturated);
            }
            let _ = risk_profile(&answers);
        }

        #[test]
        fn assessment_is_idempotent(scores in prop::collection::vec(-5i64..=10, 0..30)) {
            let answers: Vec<AnsweredItem> = scores.into_iter().map(AnsweredItem::scored).collect();
            prop_assert_eq!(assess(&answers), assess(&answers));
        }

        #[test]
        fn levels_follow_sums(scores in prop::collection::vec(0i64..=3, 21)) {
            let answers: Vec<AnsweredItem> = scores.into_iter().map(AnsweredItem::scored).collect();
            let by_question = scores_by_question(&answers);
            let risks = risk_profile(&answers);
            prop_assert_eq!(risks.stress, RiskLevel::from_sum(subscale_sum(&by_question, Subscale::Stress)));
            prop_assert_eq!(risks.anxiety, RiskLevel::from_sum(subscale_sum(&by_question, Subscale::Anxiety)));
            prop_assert_eq!(risks.depression, RiskLevel::from_sum(subscale_sum(&by_question, Subscale::Depression)));
        }
    }
}
