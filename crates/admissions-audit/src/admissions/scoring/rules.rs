use super::super::domain::{Applicant, Policy};
use super::policy::ScoringPolicy;
use super::{ScoreComponent, ScoreFactor};

pub(crate) fn score_components(
    applicant: &Applicant,
    params: &ScoringPolicy,
    policy: Policy,
) -> Vec<ScoreComponent> {
    let mut components = merit_components(applicant, params);

    if let Some(component) = income_need(applicant, params) {
        components.push(component);
    }

    if policy == Policy::Aware {
        components.extend(contextual_components(applicant, params));
    }

    components
}

fn merit_components(applicant: &Applicant, params: &ScoringPolicy) -> Vec<ScoreComponent> {
    let rubric = [
        (
            ScoreFactor::Gpa,
            applicant.gpa,
            params.gpa_scale,
            params.gpa_weight,
        ),
        (
            ScoreFactor::TestScore,
            f64::from(applicant.test_score),
            params.test_scale,
            params.test_weight,
        ),
        (
            ScoreFactor::Extracurricular,
            applicant.extracurricular_score,
            params.rubric_scale,
            params.extracurricular_weight,
        ),
        (
            ScoreFactor::Essay,
            applicant.essay_score,
            params.rubric_scale,
            params.essay_weight,
        ),
        (
            ScoreFactor::Recommendation,
            applicant.recommendation_score,
            params.rubric_scale,
            params.recommendation_weight,
        ),
    ];

    rubric
        .into_iter()
        .map(|(factor, raw, scale, weight)| {
            let fraction = normalized(raw, scale);
            ScoreComponent {
                factor,
                points: fraction * finite_or_zero(weight),
            }
        })
        .collect()
}

fn income_need(applicant: &Applicant, params: &ScoringPolicy) -> Option<ScoreComponent> {
    if finite_or_zero(applicant.income) < params.income_need_threshold {
        Some(ScoreComponent {
            factor: ScoreFactor::IncomeNeed,
            points: finite_or_zero(params.income_need_bonus),
        })
    } else {
        None
    }
}

fn contextual_components(applicant: &Applicant, params: &ScoringPolicy) -> Vec<ScoreComponent> {
    let mut components = Vec::new();

    let flags = [
        (
            ScoreFactor::FirstGeneration,
            applicant.first_generation,
            params.first_generation_bonus,
        ),
        (
            ScoreFactor::Disability,
            applicant.disability,
            params.disability_bonus,
        ),
        (
            ScoreFactor::Legacy,
            applicant.legacy_status,
            params.legacy_bonus,
        ),
        (
            ScoreFactor::LocalResidency,
            applicant.local_residency,
            params.local_residency_bonus,
        ),
    ];

    for (factor, present, points) in flags {
        if present {
            components.push(ScoreComponent {
                factor,
                points: finite_or_zero(points),
            });
        }
    }

    let adjustment = finite_or_zero(params.ethnicity_adjustment(&applicant.ethnicity));
    if adjustment != 0.0 {
        components.push(ScoreComponent {
            factor: ScoreFactor::Ethnicity,
            points: adjustment,
        });
    }

    components
}

/// Maps `value / scale` into `[0, 1]`; unusable inputs count as zero.
fn normalized(value: f64, scale: f64) -> f64 {
    if !value.is_finite() || !scale.is_finite() || scale <= 0.0 {
        return 0.0;
    }
    (value / scale).clamp(0.0, 1.0)
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_clamps_and_rejects_bad_scales() {
        assert_eq!(normalized(5.0, 4.0), 1.0);
        assert_eq!(normalized(-1.0, 4.0), 0.0);
        assert_eq!(normalized(2.0, 0.0), 0.0);
        assert_eq!(normalized(f64::NAN, 4.0), 0.0);
        assert_eq!(normalized(2.0, 4.0), 0.5);
    }
}
